// Redaction — lexical substitution and title-anchored name masking.
//
// Two stages run in order on every request: the lexical pass (classifier
// vocabulary, then the persistent forbidden-word dictionary) and the name
// pass. Both append to a shared RedactionTrace so the flag engine can tell
// which source touched the text.

pub mod lexical;
pub mod names;
pub mod vocabulary;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Which redaction stage changed the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionSource {
    Classifier,
    Dictionary,
    Names,
}

impl RedactionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedactionSource::Classifier => "classifier",
            RedactionSource::Dictionary => "dictionary",
            RedactionSource::Names => "names",
        }
    }
}

impl std::fmt::Display for RedactionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provenance of a moderation run: which words and names were redacted, by
/// which pass. Built fresh per request, append-only while the pipeline runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionTrace {
    /// Vocabulary terms redacted by the classifier-triggered pass.
    pub classifier_words: Vec<String>,
    /// Dictionary entries redacted by the forbidden-word pass.
    pub dictionary_words: Vec<String>,
    /// Title + name matches masked by the name pass.
    pub names: Vec<String>,
    /// The stages that actually changed the text.
    pub sources: BTreeSet<RedactionSource>,
}

impl RedactionTrace {
    /// Combined count of redacted words across both lexical passes.
    pub fn word_count(&self) -> usize {
        self.classifier_words.len() + self.dictionary_words.len()
    }
}

/// Mask for a redacted word: one asterisk per character, so the replacement
/// never shortens the text.
pub fn word_mask(word: &str) -> String {
    "*".repeat(word.chars().count())
}
