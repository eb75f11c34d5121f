// Lexical redaction — the two word-substitution passes.
//
// Pass 1 (classifier vocabulary) only runs when the classifier triggered.
// Pass 2 (forbidden-word dictionary) always runs, on pass 1's output.
// Both replace whole words case-insensitively with an equal-length mask.
//
// A word is only *recorded* when the boundary regex actually matched:
// the cheap substring pre-filter and the whole-word match can disagree
// ("constat" contains "con" but has no whole-word occurrence).

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use super::vocabulary::CLASSIFIER_VOCABULARY;
use super::{word_mask, RedactionSource, RedactionTrace};

/// Build the whole-word, case-insensitive pattern for a literal term.
fn whole_word(term: &str) -> Regex {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is always a valid pattern")
}

/// Vocabulary patterns are fixed, so compile them once per process instead
/// of per request.
fn vocabulary_patterns() -> &'static Vec<(&'static str, Regex)> {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        CLASSIFIER_VOCABULARY
            .iter()
            .map(|term| (*term, whole_word(term)))
            .collect()
    })
}

/// Apply both lexical passes and record provenance in `trace`.
///
/// Returns the redacted text. `triggered` gates the vocabulary pass;
/// `dictionary` is a consistent snapshot of the forbidden-word dictionary
/// (word -> mask).
pub fn redact(
    text: &str,
    triggered: bool,
    dictionary: &BTreeMap<String, String>,
    trace: &mut RedactionTrace,
) -> String {
    // Pass 1: classifier vocabulary, only when the classifier fired.
    let mut redacted = text.to_string();
    if triggered {
        let lower = redacted.to_lowercase();
        for (term, pattern) in vocabulary_patterns() {
            // Substring pre-filter keeps the regex off texts that can't match.
            if !lower.contains(term) {
                continue;
            }
            if pattern.is_match(&redacted) {
                redacted = pattern
                    .replace_all(&redacted, word_mask(term).as_str())
                    .into_owned();
                trace.classifier_words.push(term.to_string());
            }
        }
        if redacted != text {
            trace.sources.insert(RedactionSource::Classifier);
        }
    }

    // Pass 2: forbidden-word dictionary, on pass 1's output.
    let before_dictionary = redacted.clone();
    for (word, mask) in dictionary {
        if !redacted.to_lowercase().contains(word.as_str()) {
            continue;
        }
        let pattern = whole_word(word);
        if pattern.is_match(&redacted) {
            redacted = pattern.replace_all(&redacted, mask.as_str()).into_owned();
            trace.dictionary_words.push(word.clone());
        }
    }
    if redacted != before_dictionary {
        trace.sources.insert(RedactionSource::Dictionary);
    }

    redacted
}
