//! # nael-quotes
//!
//! Quote catalog, mechanic mapping, call-out formatting and quote matching.
//! Everything here is synchronous and free of I/O apart from catalog loading.

pub mod catalog;
pub mod formatter;
pub mod matcher;
pub mod mechanic;
pub mod score;

// Re-export public API: consumers use `nael_quotes::*` paths.
pub use catalog::{QuoteCatalog, QuoteRecord, QuoteText};
pub use formatter::MechanicFormatter;
pub use matcher::{FuzzyMatcher, MatchOutcome, QuoteHit, QuoteMatcher, SenderMatcher};
pub use mechanic::{Mechanic, MechanicEntry, Phase, MECHANIC_MAPPING};
