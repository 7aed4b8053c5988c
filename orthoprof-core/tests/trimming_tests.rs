//! Trimming behavior on realistic profiles

use orthoprof_core::{try_remove, Rule, RuleTable, RuleTrimmer, Segmenter};

fn table(pairs: &[(&str, &str)]) -> RuleTable {
    pairs.iter().map(|(g, t)| Rule::new(*g, *t)).collect()
}

fn german_like() -> RuleTable {
    table(&[
        ("^", "NULL"),
        ("$", "NULL"),
        ("s", "s"),
        ("c", "k"),
        ("h", "h"),
        ("ch", "x"),
        ("sch", "ʃ"),
        ("t", "t"),
        ("tsch", "tʃ"),
        ("a", "a"),
        ("e", "e"),
        ("ie", "iː"),
        ("i", "i"),
        ("ei", "ai"),
        ("sa", "s a"),
        ("sche", "ʃ e"),
        ("^ach$", "a x"),
        ("e$", "ə"),
    ])
}

#[test]
fn test_trims_implied_rules_only() {
    let outcome = RuleTrimmer::new().parallel(false).trim(&german_like());

    assert_eq!(outcome.removed, vec!["^ach$", "sche", "sa"]);
    for kept in ["sch", "tsch", "ch", "ie", "ei", "e$"] {
        assert!(outcome.table.contains(kept), "{kept} should survive");
    }
}

#[test]
fn test_survivors_reproduce_themselves() {
    let outcome = RuleTrimmer::new().parallel(false).trim(&german_like());
    let trimmed = &outcome.table;

    for rule in trimmed.iter().filter(|r| !r.transcription.contains("NULL")) {
        let output = Segmenter::new(trimmed)
            .segment_verbatim(&rule.grapheme)
            .to_string();
        assert_eq!(output, rule.transcription, "rule {}", rule.grapheme);
    }
}

#[test]
fn test_trimming_is_a_fixpoint() {
    let trimmer = RuleTrimmer::new().parallel(false);
    let once = trimmer.trim(&german_like());
    let twice = trimmer.trim(&once.table);

    assert_eq!(twice.removed_count(), 0);
    assert_eq!(twice.passes, 1);
    assert_eq!(twice.table, once.table);
}

#[test]
fn test_trimmed_table_segments_forms_identically() {
    let original = german_like();
    let outcome = RuleTrimmer::new().parallel(false).trim(&original);

    for form in ["ach", "tisch", "sie", "sa", "eis"] {
        assert_eq!(
            Segmenter::new(&original).segment(form),
            Segmenter::new(&outcome.table).segment(form),
            "form {form}"
        );
    }
}

#[test]
fn test_parallel_trimming_matches_sequential() {
    let sequential = RuleTrimmer::new().parallel(false).trim(&german_like());
    let parallel = RuleTrimmer::new().parallel(true).trim(&german_like());

    assert_eq!(sequential.removed, parallel.removed);
    assert_eq!(sequential.passes, parallel.passes);
    assert_eq!(sequential.table, parallel.table);
}

#[test]
fn test_try_remove_does_not_mutate() {
    let original = german_like();
    let (reduced, removed) = try_remove(&original, "sche");

    assert!(removed);
    assert_eq!(reduced.len(), original.len() - 1);
    assert!(original.contains("sche"));

    let (same, removed) = try_remove(&original, "sch");
    assert!(!removed);
    assert_eq!(same, original);
}
