//! Which attacks each quote announces.

use nael_core::config::Labels;
use std::fmt;

/// An attack Nael (or Bahamut Prime) telegraphs with a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mechanic {
    /// Lunar Dynamo: get in.
    Dynamo,
    /// Iron Chariot: get out.
    Chariot,
    /// Thermionic Beam: stack.
    Beam,
    /// Dalamud Dive: tank buster on the furthest player.
    Dive,
    /// Meteor Stream: spread.
    MeteorStream,
}

impl Mechanic {
    /// The user's label for this mechanic.
    pub fn label<'a>(&self, labels: &'a Labels) -> &'a str {
        match self {
            Self::Dynamo => &labels.dynamo,
            Self::Chariot => &labels.chariot,
            Self::Beam => &labels.beam,
            Self::Dive => &labels.dive,
            Self::MeteorStream => &labels.meteor_stream,
        }
    }
}

/// Encounter phase a quote belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Phase 2, Nael deus Darnus.
    Nael,
    /// Phase 3, Bahamut Prime.
    BahamutPrime,
    /// Phase 4, the adds.
    Adds,
}

impl Phase {
    pub fn number(&self) -> u8 {
        match self {
            Self::Nael => 2,
            Self::BahamutPrime => 3,
            Self::Adds => 4,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nael => "Nael deus Darnus",
            Self::BahamutPrime => "Bahamut Prime",
            Self::Adds => "Adds",
        };
        write!(f, "Phase {} - {name}", self.number())
    }
}

/// A quote id and the attacks it announces, in resolution order.
#[derive(Debug, Clone, Copy)]
pub struct MechanicEntry {
    pub quote_id: u32,
    pub phase: Phase,
    pub mechanics: &'static [Mechanic],
}

use Mechanic::*;

const fn entry(quote_id: u32, phase: Phase, mechanics: &'static [Mechanic]) -> MechanicEntry {
    MechanicEntry {
        quote_id,
        phase,
        mechanics,
    }
}

/// The fixed quote → mechanics table. Ids are NpcYell row ids.
pub const MECHANIC_MAPPING: &[MechanicEntry] = &[
    entry(6492, Phase::Nael, &[Dynamo, Chariot]),
    entry(6493, Phase::Nael, &[Dynamo, Beam]),
    entry(6494, Phase::Nael, &[Beam, Chariot]),
    entry(6495, Phase::Nael, &[Beam, Dynamo]),
    entry(6496, Phase::Nael, &[Dive, Chariot]),
    entry(6497, Phase::Nael, &[Dive, Dynamo]),
    entry(6500, Phase::Nael, &[MeteorStream, Dive]),
    entry(6501, Phase::Nael, &[Dive, Beam]),
    entry(6502, Phase::BahamutPrime, &[Dive, Dynamo, MeteorStream]),
    entry(6503, Phase::BahamutPrime, &[Dynamo, Dive, MeteorStream]),
    entry(6504, Phase::Adds, &[Chariot, Beam, Dive]),
    entry(6505, Phase::Adds, &[Chariot, Dive, Beam]),
    entry(6506, Phase::Adds, &[Dynamo, Dive, Beam]),
    entry(6507, Phase::Adds, &[Dynamo, Chariot, Dive]),
];

/// Mapping entry for `quote_id`, if any.
pub fn lookup(quote_id: u32) -> Option<&'static MechanicEntry> {
    MECHANIC_MAPPING.iter().find(|e| e.quote_id == quote_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mapping_has_fourteen_unique_ids() {
        let ids: HashSet<u32> = MECHANIC_MAPPING.iter().map(|e| e.quote_id).collect();
        assert_eq!(MECHANIC_MAPPING.len(), 14);
        assert_eq!(ids.len(), 14);
    }

    #[test]
    fn test_lookup() {
        let e = lookup(6503).unwrap();
        assert_eq!(e.phase, Phase::BahamutPrime);
        assert_eq!(e.mechanics, &[Dynamo, Dive, MeteorStream]);
        assert!(lookup(6498).is_none());
    }

    #[test]
    fn test_label_resolution() {
        let labels = Labels {
            dynamo: "In".into(),
            chariot: "Out".into(),
            beam: "Stack".into(),
            dive: "Buster".into(),
            meteor_stream: "Spread".into(),
        };
        assert_eq!(Dynamo.label(&labels), "In");
        assert_eq!(MeteorStream.label(&labels), "Spread");
    }

    #[test]
    fn test_every_mapped_id_is_in_bundled_catalog() {
        let catalog = crate::QuoteCatalog::bundled().unwrap();
        for e in MECHANIC_MAPPING {
            assert!(catalog.get(e.quote_id).is_some(), "missing {}", e.quote_id);
        }
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Adds.to_string(), "Phase 4 - Adds");
    }
}
