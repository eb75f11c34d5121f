// Flag engine — turns classification scores and redaction provenance into
// a RED/GREEN publication verdict.
//
// RED means "hold for human review", GREEN means "safe to auto-publish".
// The rules run in a fixed order and each appends its own reason; the
// verdict is RED as soon as any reason accumulated. Rule 4 (text modified)
// is usually redundant with rules 2-3 but is evaluated independently on
// purpose: it catches any future redaction source without a rule of its own.

use serde::{Deserialize, Serialize};

use crate::classifier::Classification;
use crate::redaction::RedactionTrace;

/// The publication decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Flag {
    /// Needs human review before publication.
    Red,
    /// Can be published automatically.
    Green,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Red => "RED",
            Flag::Green => "GREEN",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The decision and the ordered reasons that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub flag: Flag,
    pub reasons: Vec<String>,
}

/// Which signals force a RED flag, and at what classifier score.
///
/// Operator-tunable, persisted by the flag-config store. Serde defaults
/// keep partially-written config files loadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagConfig {
    /// A classifier category score at or above this forces RED.
    #[serde(default = "default_score_threshold")]
    pub mistral_score_threshold: f64,
    /// Redacted forbidden words force RED.
    #[serde(default = "default_true")]
    pub forbidden_words_trigger_red: bool,
    /// Redacted personal names force RED (GDPR).
    #[serde(default = "default_true")]
    pub proper_names_trigger_red: bool,
    /// Any change to the text forces RED.
    #[serde(default = "default_true")]
    pub text_modification_trigger_red: bool,
}

fn default_score_threshold() -> f64 {
    0.3
}

fn default_true() -> bool {
    true
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            mistral_score_threshold: default_score_threshold(),
            forbidden_words_trigger_red: true,
            proper_names_trigger_red: true,
            text_modification_trigger_red: true,
        }
    }
}

/// A partial config update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagConfigPatch {
    pub mistral_score_threshold: Option<f64>,
    pub forbidden_words_trigger_red: Option<bool>,
    pub proper_names_trigger_red: Option<bool>,
    pub text_modification_trigger_red: Option<bool>,
}

impl FlagConfig {
    /// Merge a partial update into this config.
    pub fn apply(&mut self, patch: &FlagConfigPatch) {
        if let Some(threshold) = patch.mistral_score_threshold {
            self.mistral_score_threshold = threshold;
        }
        if let Some(v) = patch.forbidden_words_trigger_red {
            self.forbidden_words_trigger_red = v;
        }
        if let Some(v) = patch.proper_names_trigger_red {
            self.proper_names_trigger_red = v;
        }
        if let Some(v) = patch.text_modification_trigger_red {
            self.text_modification_trigger_red = v;
        }
    }
}

/// Evaluate the rule set. Pure function of its inputs.
pub fn determine_flag(
    classification: &Classification,
    trace: &RedactionTrace,
    original: &str,
    moderated: &str,
    config: &FlagConfig,
) -> Verdict {
    let mut reasons = Vec::new();

    // Rule 1: classifier score against the configured ceiling.
    let max_score = classification.max_score();
    if max_score >= config.mistral_score_threshold {
        reasons.push(format!(
            "classifier score {max_score:.2} reached the configured threshold {:.2}",
            config.mistral_score_threshold
        ));
    }

    // Rule 2: forbidden words from either lexical pass.
    if config.forbidden_words_trigger_red && trace.word_count() > 0 {
        reasons.push(format!("{} forbidden word(s) redacted", trace.word_count()));
    }

    // Rule 3: personal names (GDPR).
    if config.proper_names_trigger_red && !trace.names.is_empty() {
        reasons.push(format!(
            "{} personal name(s) redacted (GDPR)",
            trace.names.len()
        ));
    }

    // Rule 4: any modification at all. Not deduplicated against rules 2-3.
    if config.text_modification_trigger_red && original != moderated {
        reasons.push("text modified during moderation".to_string());
    }

    if reasons.is_empty() {
        Verdict {
            flag: Flag::Green,
            reasons: vec!["no issue detected".to_string()],
        }
    } else {
        Verdict {
            flag: Flag::Red,
            reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_input_is_green_with_single_reason() {
        let verdict = determine_flag(
            &Classification::default(),
            &RedactionTrace::default(),
            "tout va bien",
            "tout va bien",
            &FlagConfig::default(),
        );
        assert_eq!(verdict.flag, Flag::Green);
        assert_eq!(verdict.reasons, vec!["no issue detected"]);
    }

    #[test]
    fn score_at_threshold_is_red() {
        let mut classification = Classification::default();
        classification
            .category_scores
            .insert("hate_and_discrimination".to_string(), 0.3);
        let verdict = determine_flag(
            &classification,
            &RedactionTrace::default(),
            "texte",
            "texte",
            &FlagConfig::default(),
        );
        assert_eq!(verdict.flag, Flag::Red);
        assert_eq!(verdict.reasons.len(), 1);
    }

    #[test]
    fn modification_rule_fires_independently() {
        // Only the modification trigger enabled: still RED, single reason.
        let config = FlagConfig {
            mistral_score_threshold: 1.1,
            forbidden_words_trigger_red: false,
            proper_names_trigger_red: false,
            text_modification_trigger_red: true,
        };
        let mut trace = RedactionTrace::default();
        trace.dictionary_words.push("merde".to_string());
        let verdict = determine_flag(
            &Classification::default(),
            &trace,
            "quelle merde",
            "quelle *****",
            &config,
        );
        assert_eq!(verdict.flag, Flag::Red);
        assert_eq!(verdict.reasons, vec!["text modified during moderation"]);
    }

    #[test]
    fn all_rules_stack_in_order() {
        let mut classification = Classification::default();
        classification
            .category_scores
            .insert("violence_and_threats".to_string(), 0.9);
        let mut trace = RedactionTrace::default();
        trace.dictionary_words.push("merde".to_string());
        trace.names.push("Docteur Durant".to_string());
        let verdict = determine_flag(
            &classification,
            &trace,
            "original",
            "modéré",
            &FlagConfig::default(),
        );
        assert_eq!(verdict.flag, Flag::Red);
        assert_eq!(verdict.reasons.len(), 4);
        assert!(verdict.reasons[0].contains("classifier score"));
        assert!(verdict.reasons[1].contains("forbidden word"));
        assert!(verdict.reasons[2].contains("personal name"));
        assert_eq!(verdict.reasons[3], "text modified during moderation");
    }

    #[test]
    fn disabled_triggers_do_not_fire() {
        let config = FlagConfig {
            mistral_score_threshold: 1.1,
            forbidden_words_trigger_red: false,
            proper_names_trigger_red: false,
            text_modification_trigger_red: false,
        };
        let mut trace = RedactionTrace::default();
        trace.dictionary_words.push("merde".to_string());
        trace.names.push("Dr Martin".to_string());
        let verdict = determine_flag(
            &Classification::default(),
            &trace,
            "avant",
            "après",
            &config,
        );
        assert_eq!(verdict.flag, Flag::Green);
        assert_eq!(verdict.reasons, vec!["no issue detected"]);
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let mut config = FlagConfig::default();
        config.apply(&FlagConfigPatch {
            mistral_score_threshold: Some(0.7),
            proper_names_trigger_red: Some(false),
            ..Default::default()
        });
        assert_eq!(config.mistral_score_threshold, 0.7);
        assert!(!config.proper_names_trigger_red);
        // Untouched fields keep their defaults
        assert!(config.forbidden_words_trigger_red);
        assert!(config.text_modification_trigger_red);
    }
}
