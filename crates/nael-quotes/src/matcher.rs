//! Decide whether a chat line is one of Nael's quotes.
//!
//! Two strategies, picked by [`MatchMode`]:
//! - **Fuzzy**: score every text segment against the localized catalog and
//!   rewrite close matches into their mechanic call-out.
//! - **Sender**: forward the untouched line when the speaker is the target.

use crate::{catalog::QuoteCatalog, formatter::MechanicFormatter, score};
use nael_core::{
    config::{MatchMode, SenderRule, Settings},
    language::ClientLanguage,
    message::{ChatEvent, Payload},
};
use std::collections::HashSet;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

/// A fuzzy hit on a catalog quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteHit {
    pub quote_id: u32,
    /// Similarity, 0-100.
    pub score: u8,
    /// Call-out the line is replaced with.
    pub callout: String,
}

#[derive(Debug, Clone)]
struct FuzzyEntry {
    quote_id: u32,
    quote: String,
    callout: String,
}

/// Localized quote → call-out table with a similarity threshold.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    entries: Vec<FuzzyEntry>,
    threshold: u8,
}

impl FuzzyMatcher {
    /// Render every catalog quote in `language` and pair it with its call-out.
    ///
    /// Quotes with no text in `language` are indexed by their English line.
    /// Quotes without a mechanic mapping are skipped. If two quotes render to
    /// the same text, the first one in catalog order wins.
    pub fn build(
        catalog: &QuoteCatalog,
        formatter: &MechanicFormatter,
        language: ClientLanguage,
        threshold: u8,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(catalog.len());
        let mut untranslated = 0;

        for record in catalog.records() {
            let callout = match formatter.format(record.id) {
                Ok(c) => c.to_string(),
                Err(e) => {
                    warn!("matcher: skipping quote {}: {e}", record.id);
                    continue;
                }
            };
            if !record.has_text(language) {
                untranslated += 1;
            }
            let quote = record.text_for(language);
            if !seen.insert(quote.clone()) {
                warn!(
                    "matcher: quote {} duplicates an earlier {language} text, ignoring",
                    record.id
                );
                continue;
            }
            entries.push(FuzzyEntry {
                quote_id: record.id,
                quote,
                callout,
            });
        }

        if untranslated > 0 {
            warn!(
                "matcher: {untranslated} quotes have no {language} text, using the English \
                 lines; load a catalog exported from the {language} NpcYell sheet"
            );
        }
        debug!(
            "matcher: {} quotes indexed for {language} (threshold {threshold})",
            entries.len()
        );
        Self { entries, threshold }
    }

    /// Highest-scoring quote for `input`, whatever its score.
    pub fn best(&self, input: &str) -> Option<QuoteHit> {
        let (idx, score) = score::best_match(input, self.entries.iter().map(|e| e.quote.as_str()))?;
        let entry = &self.entries[idx];
        Some(QuoteHit {
            quote_id: entry.quote_id,
            score,
            callout: entry.callout.clone(),
        })
    }

    /// The matching quote, if `input` scores at or above the threshold.
    pub fn translate(&self, input: &str) -> Option<QuoteHit> {
        if input.trim().is_empty() {
            return None;
        }
        self.best(input).filter(|hit| hit.score >= self.threshold)
    }

    /// Rewrite every matching text segment of `event` in place.
    ///
    /// Segments are judged independently; non-matching and non-text
    /// segments are left alone. Returns the hits in segment order.
    pub fn rewrite(&self, event: &mut ChatEvent) -> Vec<QuoteHit> {
        let mut hits = Vec::new();
        for payload in event.payloads.iter_mut() {
            let Payload::Text { text } = payload else {
                continue;
            };
            if let Some(hit) = self.translate(text) {
                debug!(
                    "matcher: quote {} matched with score {}",
                    hit.quote_id, hit.score
                );
                text.clone_from(&hit.callout);
                hits.push(hit);
            }
        }
        hits
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Speaker filter for [`MatchMode::Sender`].
#[derive(Debug, Clone)]
pub struct SenderMatcher {
    target: String,
    /// Lowercased target plus aliases, for containment checks.
    needles: Vec<String>,
    rule: SenderRule,
}

impl SenderMatcher {
    pub fn new(target: &str, aliases: &[String], rule: SenderRule) -> Self {
        let needles = std::iter::once(target)
            .chain(aliases.iter().map(String::as_str))
            .map(|n| n.trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        Self {
            target: target.to_string(),
            needles,
            rule,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.target_name,
            &settings.target_aliases,
            settings.sender_rule,
        )
    }

    /// Whether `sender` is the configured target.
    pub fn is_target(&self, sender: &str) -> bool {
        if sender == self.target {
            return true;
        }
        match self.rule {
            SenderRule::Exact => false,
            SenderRule::Contains => {
                let sender = sender.to_lowercase();
                self.needles.iter().any(|n| sender.contains(n.as_str()))
            }
        }
    }

    /// The original line to forward, if `event` is an announcement from the
    /// target with some text in it.
    pub fn check(&self, event: &ChatEvent) -> Option<String> {
        if !event.category.is_announcement() || !self.is_target(&event.sender) {
            return None;
        }
        let text = event.text();
        if text.trim().is_empty() {
            return None;
        }
        Some(text)
    }
}

/// What happened to a chat event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Not an announcement; never looked at.
    Ignored,
    /// Looked at, nothing matched. The event is unchanged.
    NoMatch,
    /// Fuzzy mode: these segments were rewritten in place.
    Rewritten(Vec<QuoteHit>),
    /// Sender mode: forward this original text to the presenter.
    Forward(String),
}

/// One matcher for whichever mode the settings select.
#[derive(Debug, Clone)]
pub enum QuoteMatcher {
    Fuzzy(FuzzyMatcher),
    Sender(SenderMatcher),
}

impl QuoteMatcher {
    /// Build the matcher for `settings.mode`.
    pub fn build(
        settings: &Settings,
        catalog: &QuoteCatalog,
        formatter: &MechanicFormatter,
        language: ClientLanguage,
    ) -> Self {
        match settings.mode {
            MatchMode::Fuzzy => Self::Fuzzy(FuzzyMatcher::build(
                catalog,
                formatter,
                language,
                settings.match_threshold(),
            )),
            MatchMode::Sender => Self::Sender(SenderMatcher::from_settings(settings)),
        }
    }

    pub fn mode(&self) -> MatchMode {
        match self {
            Self::Fuzzy(_) => MatchMode::Fuzzy,
            Self::Sender(_) => MatchMode::Sender,
        }
    }

    /// Evaluate one chat event, rewriting it in place in fuzzy mode.
    pub fn handle(&self, event: &mut ChatEvent) -> MatchOutcome {
        if !event.category.is_announcement() {
            return MatchOutcome::Ignored;
        }
        match self {
            Self::Fuzzy(m) => {
                let hits = m.rewrite(event);
                if hits.is_empty() {
                    MatchOutcome::NoMatch
                } else {
                    MatchOutcome::Rewritten(hits)
                }
            }
            Self::Sender(m) => match m.check(event) {
                Some(text) => MatchOutcome::Forward(text),
                None => MatchOutcome::NoMatch,
            },
        }
    }
}
