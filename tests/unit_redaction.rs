// Unit tests for the lexical redaction passes.
//
// Covers the whole-word boundary semantics, case-insensitivity, mask
// lengths, the classifier-pass gate, and the per-pass provenance buckets.

use std::collections::BTreeMap;

use palisade::redaction::{lexical, word_mask, RedactionSource, RedactionTrace};

fn dictionary(words: &[&str]) -> BTreeMap<String, String> {
    words
        .iter()
        .map(|w| (w.to_string(), word_mask(w)))
        .collect()
}

fn redact(text: &str, triggered: bool, words: &[&str]) -> (String, RedactionTrace) {
    let mut trace = RedactionTrace::default();
    let out = lexical::redact(text, triggered, &dictionary(words), &mut trace);
    (out, trace)
}

// ============================================================
// Case-insensitivity
// ============================================================

#[test]
fn lowercase_uppercase_and_mixed_case_redact_identically() {
    for text in ["quelle merde", "quelle MERDE", "quelle Merde"] {
        let (out, trace) = redact(text, false, &["merde"]);
        assert_eq!(out, "quelle *****", "input: {text}");
        assert_eq!(trace.dictionary_words, vec!["merde"]);
    }
}

#[test]
fn accented_entry_matches_case_insensitively() {
    let (out, _) = redact("espèce de CRÉTIN", false, &["crétin"]);
    assert_eq!(out, "espèce de ******");
}

// ============================================================
// Word boundaries
// ============================================================

#[test]
fn whole_word_only() {
    // "con" must not fire inside "constat" or "confort"
    let (out, trace) = redact("le constat du confort", false, &["con"]);
    assert_eq!(out, "le constat du confort");
    assert!(trace.dictionary_words.is_empty());
}

#[test]
fn boundary_match_next_to_punctuation() {
    let (out, _) = redact("merde!", false, &["merde"]);
    assert_eq!(out, "*****!");
}

#[test]
fn every_occurrence_is_replaced() {
    let (out, trace) = redact("merde et re-merde", false, &["merde"]);
    assert_eq!(out, "***** et re-*****");
    // One record per dictionary entry, not per occurrence
    assert_eq!(trace.dictionary_words, vec!["merde"]);
}

// ============================================================
// Mask lengths
// ============================================================

#[test]
fn mask_length_matches_word_chars() {
    let (out, _) = redact("con", false, &["con"]);
    assert_eq!(out, "***");
    let (out, _) = redact("trou du cul", false, &["trou du cul"]);
    assert_eq!(out, "***********");
}

// ============================================================
// Classifier pass gating
// ============================================================

#[test]
fn vocabulary_not_applied_without_trigger() {
    let (out, trace) = redact("sale ordure va", false, &[]);
    assert_eq!(out, "sale ordure va");
    assert!(trace.classifier_words.is_empty());
    assert!(trace.sources.is_empty());
}

#[test]
fn vocabulary_applied_on_trigger() {
    let (out, trace) = redact("sale ordure va", true, &[]);
    assert_eq!(out, "sale ****** va");
    assert_eq!(trace.classifier_words, vec!["ordure"]);
    assert_eq!(
        trace.sources.iter().collect::<Vec<_>>(),
        vec![&RedactionSource::Classifier]
    );
}

#[test]
fn classifier_and_dictionary_words_land_in_separate_buckets() {
    // "ordure" comes from the curated vocabulary, "zut" from the dictionary.
    let (out, trace) = redact("ordure de zut", true, &["zut"]);
    assert_eq!(out, "****** de ***");
    assert_eq!(trace.classifier_words, vec!["ordure"]);
    assert_eq!(trace.dictionary_words, vec!["zut"]);
    assert!(trace.sources.contains(&RedactionSource::Classifier));
    assert!(trace.sources.contains(&RedactionSource::Dictionary));
}

#[test]
fn word_already_masked_by_vocabulary_is_not_recorded_for_dictionary() {
    // "merde" is in both the vocabulary and the dictionary; pass 1 masks it,
    // so pass 2 finds nothing left to match.
    let (out, trace) = redact("quelle merde", true, &["merde"]);
    assert_eq!(out, "quelle *****");
    assert_eq!(trace.classifier_words, vec!["merde"]);
    assert!(trace.dictionary_words.is_empty());
    assert!(!trace.sources.contains(&RedactionSource::Dictionary));
}

// ============================================================
// No-op inputs
// ============================================================

#[test]
fn clean_text_passes_through_untouched() {
    let (out, trace) = redact("Le personnel est charmant", true, &["merde"]);
    assert_eq!(out, "Le personnel est charmant");
    assert_eq!(trace.word_count(), 0);
    assert!(trace.sources.is_empty());
}

#[test]
fn empty_dictionary_is_a_noop() {
    let (out, trace) = redact("n'importe quoi", false, &[]);
    assert_eq!(out, "n'importe quoi");
    assert!(trace.sources.is_empty());
}
