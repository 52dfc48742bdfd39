//! The quote catalog: every line Nael can yell, in five languages.
//!
//! Loaded once at startup from the bundled `data/quotes.json` (or a
//! user-supplied file) and never mutated afterwards. The bundled table only
//! carries the English lines; clients in other languages need a catalog
//! exported from their own NpcYell sheet.

use nael_core::{error::NaelError, language::ClientLanguage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Bundled catalog, embedded at compile time.
const BUNDLED_QUOTES: &str = include_str!("../data/quotes.json");

/// One quote in the catalog languages.
///
/// English is required. The other languages are only present when the
/// catalog carries the client's own NpcYell rows for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteText {
    #[serde(alias = "EN", alias = "Text_en")]
    pub en: String,
    #[serde(default, alias = "FR", alias = "Text_fr", skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
    #[serde(default, alias = "DE", alias = "Text_de", skip_serializing_if = "Option::is_none")]
    pub de: Option<String>,
    #[serde(
        default,
        alias = "JA",
        alias = "JP",
        alias = "Text_ja",
        skip_serializing_if = "Option::is_none"
    )]
    pub ja: Option<String>,
    #[serde(
        default,
        alias = "ZH",
        alias = "CN",
        alias = "Text_chs",
        skip_serializing_if = "Option::is_none"
    )]
    pub zh: Option<String>,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(alias = "ID")]
    pub id: u32,
    #[serde(alias = "Text")]
    pub text: QuoteText,
}

impl QuoteRecord {
    /// The quote as the given client would display it.
    ///
    /// English, French, German and Japanese pick their own text; every other
    /// language gets the Chinese text. A record without that text gives the
    /// English line. Blank lines (`"\n\n"`) are collapsed to a single line
    /// break.
    pub fn text_for(&self, language: ClientLanguage) -> String {
        let raw = self.localized(language).unwrap_or(&self.text.en);
        collapse_blank_lines(raw)
    }

    /// Whether the record carries its own text for `language`.
    pub fn has_text(&self, language: ClientLanguage) -> bool {
        self.localized(language).is_some()
    }

    fn localized(&self, language: ClientLanguage) -> Option<&String> {
        match language {
            ClientLanguage::English => Some(&self.text.en),
            ClientLanguage::French => self.text.fr.as_ref(),
            ClientLanguage::German => self.text.de.as_ref(),
            ClientLanguage::Japanese => self.text.ja.as_ref(),
            _ => self.text.zh.as_ref(),
        }
    }
}

/// Replace every run of blank lines with a single `\n`.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = text.to_string();
    while out.contains("\n\n") {
        out = out.replace("\n\n", "\n");
    }
    out
}

/// Immutable, ordered quote table with O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct QuoteCatalog {
    records: Vec<QuoteRecord>,
    index: HashMap<u32, usize>,
}

impl QuoteCatalog {
    /// The catalog shipped with the binary.
    pub fn bundled() -> Result<Self, NaelError> {
        Self::load(BUNDLED_QUOTES)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load_file(path: &Path) -> Result<Self, NaelError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NaelError::Catalog(format!("failed to read {}: {e}", path.display()))
        })?;
        let catalog = Self::load(&content)?;
        info!(
            "catalog: loaded {} quotes from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a catalog document.
    ///
    /// Accepts either a bare array of `{id, text: {en, fr, de, ja, zh}}`
    /// records or the older `{"Quotes": [{"ID", "Text": {"EN", ...}}]}`
    /// layout. A missing English text and duplicate ids are errors.
    pub fn load(source: &str) -> Result<Self, NaelError> {
        let document: Value = serde_json::from_str(source)
            .map_err(|e| NaelError::Catalog(format!("invalid JSON: {e}")))?;

        let list = match document {
            Value::Array(items) => Value::Array(items),
            Value::Object(mut map) => map
                .remove("quotes")
                .or_else(|| map.remove("Quotes"))
                .ok_or_else(|| NaelError::Catalog("missing \"quotes\" array".into()))?,
            _ => {
                return Err(NaelError::Catalog(
                    "expected an array of quotes or a {\"quotes\": [...]} object".into(),
                ))
            }
        };

        let records: Vec<QuoteRecord> = serde_json::from_value(list)
            .map_err(|e| NaelError::Catalog(format!("malformed quote record: {e}")))?;

        Self::from_records(records)
    }

    /// Build a catalog from already-parsed records.
    pub fn from_records(records: Vec<QuoteRecord>) -> Result<Self, NaelError> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id, pos).is_some() {
                return Err(NaelError::Catalog(format!(
                    "duplicate quote id {}",
                    record.id
                )));
            }
        }
        if records.is_empty() {
            warn!("catalog: loaded an empty quote table");
        }
        Ok(Self { records, index })
    }

    /// Look up a record by id.
    pub fn get(&self, id: u32) -> Option<&QuoteRecord> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    /// Records in file order.
    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_LANGUAGES: [ClientLanguage; 7] = [
        ClientLanguage::English,
        ClientLanguage::French,
        ClientLanguage::German,
        ClientLanguage::Japanese,
        ClientLanguage::Chinese,
        ClientLanguage::Korean,
        ClientLanguage::Unknown,
    ];

    fn record(en: &str) -> QuoteRecord {
        QuoteRecord {
            id: 1,
            text: QuoteText {
                en: en.into(),
                fr: Some("fr".into()),
                de: Some("de".into()),
                ja: Some("ja".into()),
                zh: Some("zh".into()),
            },
        }
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = QuoteCatalog::bundled().unwrap();
        assert_eq!(catalog.len(), 14);
        assert_eq!(catalog.records()[0].id, 6492);
        assert!(catalog.get(6507).is_some());
        assert!(catalog.get(6498).is_none());
    }

    #[test]
    fn test_bundled_catalog_is_english_only() {
        let catalog = QuoteCatalog::bundled().unwrap();
        for rec in catalog.records() {
            assert!(rec.has_text(ClientLanguage::English));
            assert!(!rec.has_text(ClientLanguage::German), "{}", rec.id);
            assert_eq!(
                rec.text_for(ClientLanguage::German),
                rec.text_for(ClientLanguage::English)
            );
        }
    }

    #[test]
    fn test_single_record_blank_line_collapsed() {
        let json = r#"[{"id":1,"text":{"en":"O hallowed moon,\n\nshine you the iron path!"}}]"#;
        let catalog = QuoteCatalog::load(json).unwrap();
        let rec = catalog.get(1).unwrap();
        assert_eq!(
            rec.text_for(ClientLanguage::English),
            "O hallowed moon,\nshine you the iron path!"
        );
    }

    #[test]
    fn test_text_for_never_returns_blank_lines() {
        let catalog = QuoteCatalog::bundled().unwrap();
        for rec in catalog.records() {
            for lang in ALL_LANGUAGES {
                let text = rec.text_for(lang);
                assert!(!text.contains("\n\n"), "{} / {lang}: {text:?}", rec.id);
            }
        }
        let triple = record("a\n\n\n\nb");
        assert_eq!(triple.text_for(ClientLanguage::English), "a\nb");
    }

    #[test]
    fn test_unknown_language_falls_back_to_chinese() {
        let rec = record("en");
        assert_eq!(rec.text_for(ClientLanguage::from_code("xx")), "zh");
        assert_eq!(rec.text_for(ClientLanguage::Korean), "zh");
        assert_eq!(rec.text_for(ClientLanguage::Chinese), "zh");
        assert_eq!(rec.text_for(ClientLanguage::German), "de");
        assert_eq!(rec.text_for(ClientLanguage::Japanese), "ja");
        assert_eq!(rec.text_for(ClientLanguage::French), "fr");
    }

    #[test]
    fn test_absent_language_uses_english() {
        let json = r#"[{"id":1,"text":{"en":"a","de":"b"}}]"#;
        let catalog = QuoteCatalog::load(json).unwrap();
        let rec = catalog.get(1).unwrap();
        assert_eq!(rec.text_for(ClientLanguage::German), "b");
        assert_eq!(rec.text_for(ClientLanguage::French), "a");
        assert_eq!(rec.text_for(ClientLanguage::Unknown), "a");
        assert!(!rec.has_text(ClientLanguage::Chinese));
    }

    #[test]
    fn test_legacy_layout_accepted() {
        let json = r#"{"Quotes":[{"ID":6492,"Text":{"DE":"d","EN":"e","FR":"f","JP":"j","CN":"c"}}]}"#;
        let catalog = QuoteCatalog::load(json).unwrap();
        let rec = catalog.get(6492).unwrap();
        assert_eq!(rec.text.en, "e");
        assert_eq!(rec.text.ja.as_deref(), Some("j"));
        assert_eq!(rec.text.zh.as_deref(), Some("c"));
    }

    #[test]
    fn test_missing_english_is_error() {
        let json = r#"[{"id":1,"text":{"fr":"b","de":"c","ja":"d","zh":"e"}}]"#;
        let err = QuoteCatalog::load(json).unwrap_err();
        assert!(matches!(err, NaelError::Catalog(_)), "{err}");
    }

    #[test]
    fn test_null_english_is_error() {
        let json = r#"[{"id":1,"text":{"en":null,"fr":"b","de":"c","ja":"d","zh":"e"}}]"#;
        assert!(QuoteCatalog::load(json).is_err());
    }

    #[test]
    fn test_duplicate_id_is_error() {
        let err = QuoteCatalog::from_records(vec![record("a"), record("b")]).unwrap_err();
        assert!(err.to_string().contains("duplicate quote id 1"));
    }

    #[test]
    fn test_garbage_is_error() {
        assert!(QuoteCatalog::load("not json").is_err());
        assert!(QuoteCatalog::load("42").is_err());
        assert!(QuoteCatalog::load("{}").is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let missing = Path::new("/definitely/not/here.json");
        let err = QuoteCatalog::load_file(missing).unwrap_err();
        assert!(matches!(err, NaelError::Catalog(_)));
    }
}
