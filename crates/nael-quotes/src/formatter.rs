//! Quote id → mechanic call-out string.

use crate::mechanic::{Mechanic, MECHANIC_MAPPING};
use nael_core::{config::Settings, error::NaelError};
use std::collections::HashMap;
use tracing::debug;

/// Join the labels of `mechanics` with `separator`.
pub fn render(mechanics: &[Mechanic], settings: &Settings) -> String {
    mechanics
        .iter()
        .map(|m| m.label(&settings.labels))
        .collect::<Vec<_>>()
        .join(&settings.separator)
}

/// Cached call-out strings for every mapped quote.
///
/// The cache reflects the settings it was last built from; call
/// [`MechanicFormatter::rebuild`] after saving new settings.
#[derive(Debug, Clone, Default)]
pub struct MechanicFormatter {
    cache: HashMap<u32, String>,
}

impl MechanicFormatter {
    pub fn new(settings: &Settings) -> Self {
        let mut formatter = Self::default();
        formatter.rebuild(settings);
        formatter
    }

    /// Re-render every entry with the current labels and separator.
    pub fn rebuild(&mut self, settings: &Settings) {
        self.cache = MECHANIC_MAPPING
            .iter()
            .map(|e| (e.quote_id, render(e.mechanics, settings)))
            .collect();
        debug!("formatter: rebuilt {} call-outs", self.cache.len());
    }

    /// Call-out for `quote_id`.
    ///
    /// Every id the encounter uses is mapped, so a miss means the caller
    /// passed an id from outside the table.
    pub fn format(&self, quote_id: u32) -> Result<&str, NaelError> {
        self.cache
            .get(&quote_id)
            .map(String::as_str)
            .ok_or(NaelError::UnmappedQuote(quote_id))
    }
}
