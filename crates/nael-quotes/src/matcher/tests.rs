use super::*;
use crate::mechanic::MECHANIC_MAPPING;
use nael_core::message::ChatCategory;

const NAEL: &str = "Nael deus Darnus";

fn fuzzy(language: ClientLanguage) -> (QuoteCatalog, MechanicFormatter, FuzzyMatcher) {
    let catalog = QuoteCatalog::bundled().unwrap();
    let formatter = MechanicFormatter::new(&Settings::default());
    let matcher = FuzzyMatcher::build(&catalog, &formatter, language, 85);
    (catalog, formatter, matcher)
}

fn announcement(text: &str) -> ChatEvent {
    ChatEvent::new(ChatCategory::NpcDialogueAnnouncements, NAEL, text)
}

#[test]
fn test_exact_quote_scores_100() {
    let (catalog, formatter, matcher) = fuzzy(ClientLanguage::English);
    assert_eq!(matcher.len(), 14);
    for record in catalog.records() {
        let text = record.text_for(ClientLanguage::English);
        let hit = matcher.translate(&text).unwrap();
        assert_eq!(hit.score, 100, "{}", record.id);
        assert_eq!(hit.quote_id, record.id);
        assert_eq!(hit.callout, formatter.format(record.id).unwrap());
    }
}

#[test]
fn test_localized_catalog_matches_client_language() {
    let json = r#"[
        {"id":6492,"text":{"en":"O hallowed moon,\nshine you the iron path!","de":"erste Zeile"}},
        {"id":6493,"text":{"en":"O hallowed moon,\ntake fire and scorch my foes!","de":"zweite Zeile"}}
    ]"#;
    let catalog = QuoteCatalog::load(json).unwrap();
    let formatter = MechanicFormatter::new(&Settings::default());
    let matcher = FuzzyMatcher::build(&catalog, &formatter, ClientLanguage::German, 85);

    assert_eq!(matcher.translate("zweite Zeile").unwrap().quote_id, 6493);
    assert!(matcher
        .translate("O hallowed moon,\nshine you the iron path!")
        .is_none());
}

#[test]
fn test_untranslated_catalog_falls_back_to_english_lines() {
    let (_, _, matcher) = fuzzy(ClientLanguage::Japanese);
    assert_eq!(matcher.len(), 14);
    let hit = matcher
        .translate("Unbending iron,\ntake fire and descend!")
        .unwrap();
    assert_eq!(hit.quote_id, 6504);
}

#[test]
fn test_exact_quote_is_rewritten() {
    let (_, _, matcher) = fuzzy(ClientLanguage::English);
    let mut event = announcement("O hallowed moon,\nshine you the iron path!");
    let hits = matcher.rewrite(&mut event);
    assert_eq!(hits.len(), 1);
    assert_eq!(event.payloads, vec![Payload::text("Dynamo -> Chariot")]);
}

#[test]
fn test_raw_blank_line_form_still_matches() {
    let (_, _, matcher) = fuzzy(ClientLanguage::English);
    let hit = matcher
        .translate("From on high I descend,\n\nthe iron path to call!")
        .unwrap();
    assert_eq!(hit.quote_id, 6496);
    assert_eq!(hit.callout, "Dive -> Chariot");
}

#[test]
fn test_unrelated_text_passes_through() {
    let (_, _, matcher) = fuzzy(ClientLanguage::English);
    let line = "The limit break gauge is full, use it now please";
    let best = matcher.best(line).unwrap();
    assert!(best.score < 85, "score {}", best.score);

    let mut event = announcement(line);
    assert!(matcher.rewrite(&mut event).is_empty());
    assert_eq!(event.payloads, vec![Payload::text(line)]);
}

#[test]
fn test_empty_segment_ignored() {
    let (_, _, matcher) = fuzzy(ClientLanguage::English);
    assert!(matcher.translate("").is_none());
    assert!(matcher.translate("   \n").is_none());
}

#[test]
fn test_segments_judged_independently() {
    let (_, _, matcher) = fuzzy(ClientLanguage::English);
    let mut event = ChatEvent {
        category: ChatCategory::NpcDialogueAnnouncements,
        sender: NAEL.into(),
        payloads: vec![
            Payload::text("Blazing path,\nlead me to iron rule!"),
            Payload::Opaque {
                kind: "icon".into(),
            },
            Payload::text("completely unrelated trailing words"),
            Payload::text("Unbending iron,\ndescend with fiery edge!"),
        ],
        timestamp: chrono::Utc::now(),
    };

    let hits = matcher.rewrite(&mut event);
    assert_eq!(
        hits.iter().map(|h| h.quote_id).collect::<Vec<_>>(),
        vec![6494, 6505]
    );
    assert_eq!(event.payloads[0], Payload::text("Beam -> Chariot"));
    assert_eq!(
        event.payloads[1],
        Payload::Opaque {
            kind: "icon".into()
        }
    );
    assert_eq!(
        event.payloads[2],
        Payload::text("completely unrelated trailing words")
    );
    assert_eq!(event.payloads[3], Payload::text("Chariot -> Dive -> Beam"));
}

#[test]
fn test_threshold_is_respected() {
    let catalog = QuoteCatalog::bundled().unwrap();
    let formatter = MechanicFormatter::new(&Settings::default());
    let strict = FuzzyMatcher::build(&catalog, &formatter, ClientLanguage::English, 100);
    let typo = "O halowed moon, shine you the iron path!";
    assert!(strict.translate(typo).is_none());

    let lenient = FuzzyMatcher::build(&catalog, &formatter, ClientLanguage::English, 85);
    assert_eq!(lenient.translate(typo).unwrap().quote_id, 6492);
}

#[test]
fn test_unmapped_catalog_entries_skipped() {
    let json = r#"[
        {"id":6492,"text":{"en":"O hallowed moon,\nshine you the iron path!"}},
        {"id":42,"text":{"en":"Not a real yell"}}
    ]"#;
    let catalog = QuoteCatalog::load(json).unwrap();
    let formatter = MechanicFormatter::new(&Settings::default());
    let matcher = FuzzyMatcher::build(&catalog, &formatter, ClientLanguage::English, 85);
    assert_eq!(matcher.len(), 1);
    assert!(matcher.translate("Not a real yell").is_none());
}

#[test]
fn test_duplicate_localized_text_first_wins() {
    let json = r#"[
        {"id":6492,"text":{"en":"same","fr":"a","de":"b","ja":"c","zh":"d"}},
        {"id":6493,"text":{"en":"same","fr":"e","de":"f","ja":"g","zh":"h"}}
    ]"#;
    let catalog = QuoteCatalog::load(json).unwrap();
    let formatter = MechanicFormatter::new(&Settings::default());
    let matcher = FuzzyMatcher::build(&catalog, &formatter, ClientLanguage::English, 85);
    assert_eq!(matcher.len(), 1);
    assert_eq!(matcher.translate("same").unwrap().quote_id, 6492);
}

#[test]
fn test_quote_matcher_ignores_other_categories() {
    let (catalog, formatter, _) = fuzzy(ClientLanguage::English);
    let matcher = QuoteMatcher::build(
        &Settings::default(),
        &catalog,
        &formatter,
        ClientLanguage::English,
    );
    assert_eq!(matcher.mode(), MatchMode::Fuzzy);

    let text = "O hallowed moon,\nshine you the iron path!";
    let mut event = ChatEvent::new(ChatCategory::Say, "Some Player", text);
    assert_eq!(matcher.handle(&mut event), MatchOutcome::Ignored);
    assert_eq!(event.payloads, vec![Payload::text(text)]);

    let mut event = announcement(text);
    match matcher.handle(&mut event) {
        MatchOutcome::Rewritten(hits) => assert_eq!(hits[0].quote_id, 6492),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_every_mapping_reachable_through_matcher() {
    let (catalog, formatter, matcher) = fuzzy(ClientLanguage::English);
    for e in MECHANIC_MAPPING {
        let text = catalog
            .get(e.quote_id)
            .unwrap()
            .text_for(ClientLanguage::English);
        let hit = matcher.translate(&text).unwrap();
        assert_eq!(hit.quote_id, e.quote_id);
        assert_eq!(hit.callout, formatter.format(e.quote_id).unwrap());
    }
}

// --- Sender mode ---

fn sender_settings(rule: SenderRule, aliases: &[&str]) -> Settings {
    let mut s = Settings::default();
    s.mode = MatchMode::Sender;
    s.sender_rule = rule;
    s.target_aliases = aliases.iter().map(|a| a.to_string()).collect();
    s
}

#[test]
fn test_sender_exact_forwards_original_text() {
    let m = SenderMatcher::from_settings(&sender_settings(SenderRule::Exact, &[]));
    let event = announcement("Take fire,\nO hallowed moon!");
    assert_eq!(
        m.check(&event).as_deref(),
        Some("Take fire,\nO hallowed moon!")
    );
}

#[test]
fn test_sender_empty_text_ignored() {
    let m = SenderMatcher::from_settings(&sender_settings(SenderRule::Exact, &[]));
    assert!(m.check(&announcement("")).is_none());
    assert!(m.check(&announcement("  ")).is_none());
}

#[test]
fn test_sender_exact_rejects_near_names() {
    let m = SenderMatcher::from_settings(&sender_settings(SenderRule::Exact, &[]));
    assert!(!m.is_target("nael deus darnus"));
    assert!(!m.is_target("Nael deus Darnus (Ghost)"));
    assert!(m.is_target(NAEL));
}

#[test]
fn test_sender_contains_aliases_case_insensitive() {
    let settings = sender_settings(SenderRule::Contains, &["ネール", "Bahamut"]);
    let m = SenderMatcher::from_settings(&settings);
    assert!(m.is_target("NAEL DEUS DARNUS"));
    assert!(m.is_target("ネール・デウス・ダーナス"));
    assert!(m.is_target("Bahamut Prime"));
    assert!(!m.is_target("Twintania"));
}

#[test]
fn test_unrelated_sender_with_text_never_forwards() {
    // Regression: a non-target speaker with non-empty text must not slip
    // through regardless of how the conditions are combined.
    for rule in [SenderRule::Exact, SenderRule::Contains] {
        let m = SenderMatcher::from_settings(&sender_settings(rule, &["Bahamut"]));
        let event = ChatEvent::new(
            ChatCategory::NpcDialogueAnnouncements,
            "Twintania",
            "O hallowed moon,\nshine you the iron path!",
        );
        assert!(m.check(&event).is_none(), "{rule:?}");
    }
}

#[test]
fn test_sender_wrong_category_ignored() {
    let m = SenderMatcher::from_settings(&sender_settings(SenderRule::Exact, &[]));
    let event = ChatEvent::new(ChatCategory::NpcDialogue, NAEL, "hello");
    assert!(m.check(&event).is_none());
}

#[test]
fn test_quote_matcher_sender_mode_leaves_event_untouched() {
    let settings = sender_settings(SenderRule::Exact, &[]);
    let catalog = QuoteCatalog::bundled().unwrap();
    let formatter = MechanicFormatter::new(&settings);
    let matcher = QuoteMatcher::build(&settings, &catalog, &formatter, ClientLanguage::English);
    assert_eq!(matcher.mode(), MatchMode::Sender);

    let text = "O hallowed moon,\nshine you the iron path!";
    let mut event = announcement(text);
    assert_eq!(
        matcher.handle(&mut event),
        MatchOutcome::Forward(text.to_string())
    );
    assert_eq!(event.payloads, vec![Payload::text(text)]);

    let mut empty = announcement("");
    assert_eq!(matcher.handle(&mut empty), MatchOutcome::NoMatch);
}
