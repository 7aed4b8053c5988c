//! End-to-end segmentation behavior against small hand-built profiles

use orthoprof_core::{
    FrequencyCollector, Rule, RuleTable, SegmentOptions, Segmenter, Token, UsageStats, WordForm,
};

fn table(pairs: &[(&str, &str)]) -> RuleTable {
    pairs.iter().map(|(g, t)| Rule::new(*g, *t)).collect()
}

#[test]
fn test_full_form_rule_beats_parts() {
    let table = table(&[("^a$", "A1"), ("a", "A2"), ("^", "NULL"), ("$", "NULL")]);
    let result = Segmenter::new(&table).segment("a");
    assert_eq!(result.rendered(), vec!["A1"]);
}

#[test]
fn test_longest_match_inside_boundaries() {
    let table = table(&[("ab", "X"), ("a", "a"), ("b", "b"), ("^", "NULL"), ("$", "NULL")]);
    let result = Segmenter::new(&table).segment("ab");
    assert_eq!(result.rendered(), vec!["X"]);
}

#[test]
fn test_boundary_rules_match_only_at_edges() {
    let table = table(&[("^a", "ʔa"), ("a", "a"), ("a$", "ə"), ("^", "NULL"), ("$", "NULL")]);
    let result = Segmenter::new(&table).segment("aaa");
    assert_eq!(result.to_string(), "ʔa a ə");
}

#[test]
fn test_unmatched_character_continues() {
    let table = table(&[("a", "a"), ("^", "NULL"), ("$", "NULL")]);
    let result = Segmenter::new(&table).segment("aza");

    assert_eq!(result.to_string(), "a <<z>> a");
    assert_eq!(result.unmatched().collect::<Vec<_>>(), vec!['z']);
    assert_eq!(
        result.tokens().iter().filter(|t| t.is_unmatched()).count(),
        1
    );
}

#[test]
fn test_spaces_become_word_boundaries() {
    let table = table(&[("a", "a"), ("b", "b")]);
    let result = Segmenter::new(&table).segment("a b");
    assert_eq!(result.tokens()[1], Token::WordBoundary);
    assert_eq!(result.to_string(), "a # b");
}

#[test]
fn test_decomposed_form_matches_composed_rule() {
    let table = table(&[("\u{00E9}", "e"), ("^", "NULL"), ("$", "NULL")]);

    let normalized = Segmenter::new(&table).segment("e\u{0301}");
    assert_eq!(normalized.to_string(), "e");

    let raw = Segmenter::with_options(
        &table,
        SegmentOptions {
            normalize: false,
            ..SegmentOptions::default()
        },
    )
    .segment("e\u{0301}");
    assert_eq!(raw.unmatched().count(), 2);
}

#[test]
fn test_without_boundaries_anchored_rules_never_match() {
    let table = table(&[("^a$", "A1"), ("a", "A2")]);
    let segmenter = Segmenter::with_options(
        &table,
        SegmentOptions {
            boundaries: false,
            ..SegmentOptions::default()
        },
    );
    assert_eq!(segmenter.segment("a").rendered(), vec!["A2"]);
}

#[test]
fn test_slash_segments_are_emitted_verbatim() {
    let table = table(&[("ch", "c/tʃ"), ("^", "NULL"), ("$", "NULL")]);
    let result = Segmenter::new(&table).segment("ch");

    assert_eq!(result.to_string(), "c/tʃ");
    assert_eq!(result.tokens()[0].canonical(), Some("tʃ"));
}

#[test]
fn test_segmenting_twice_is_deterministic() {
    let table = table(&[("a", "a"), ("aa", "aː"), ("b", "b"), ("^", "NULL"), ("$", "NULL")]);
    let segmenter = Segmenter::new(&table);

    let mut first_usage = UsageStats::new();
    let mut second_usage = UsageStats::new();
    let first = segmenter.segment_counted("baaab", "x", &mut first_usage);
    let second = segmenter.segment_counted("baaab", "x", &mut second_usage);

    assert_eq!(first, second);
    assert_eq!(first_usage, second_usage);
    assert_eq!(first.to_string(), "b aː a b");
    assert_eq!(first_usage.frequency("b"), 2);
}

#[test]
fn test_collection_resets_counters() {
    let table = table(&[("a", "a"), ("^", "NULL"), ("$", "NULL")]);
    let forms = vec![WordForm::new("aa", "l1")];

    let once = FrequencyCollector::new(&table).collect(&forms).table;
    let twice = FrequencyCollector::new(&once).collect(&forms).table;

    assert_eq!(once.get("a").unwrap().frequency(), 2);
    assert_eq!(twice.get("a").unwrap().frequency(), 2);
}

#[test]
fn test_parallel_collection_matches_sequential() {
    let table = table(&[
        ("a", "a"),
        ("b", "b"),
        ("ab", "p"),
        ("ba", "q"),
        ("^", "NULL"),
        ("$", "NULL"),
    ]);
    let words = ["ab", "ba", "aab", "bba", "abab", "b a", "c"];
    let forms: Vec<WordForm> = (0..700)
        .map(|i| WordForm::new(words[i % words.len()], format!("l{}", i % 3)))
        .collect();

    let sequential = FrequencyCollector::new(&table)
        .audit(true)
        .parallel(false)
        .collect(&forms);
    let parallel = FrequencyCollector::new(&table)
        .audit(true)
        .parallel(true)
        .collect(&forms);

    assert_eq!(sequential.table, parallel.table);
    assert_eq!(sequential.traces, parallel.traces);
}
