// Name redaction — title-anchored masking of personal names.
//
// A name is only recognized after a civility or professional title
// ("Docteur Durant", "Mme Lefèvre", "Chef MARTIN"). This is pattern
// matching, not entity recognition: no title, no redaction.
//
// All titles are matched in ONE pass over the incoming text: match spans are
// collected across every title in declared priority order, overlapping
// claims lose to the earlier title, and the replacements are applied
// together at the end. Rescanning already-masked text per title (the
// obvious loop) lets a later title match leftover fragments of an earlier
// replacement; collecting spans first avoids that.
//
// The mask is a fixed 5-asterisk token regardless of the name's length, so
// the redacted text does not leak how long the name was. Word masks
// elsewhere are length-preserving; this asymmetry is deliberate.

use std::sync::OnceLock;

use regex::Regex;

use super::{RedactionSource, RedactionTrace};

/// Fixed mask for a redacted name.
pub const NAME_MASK: &str = "*****";

struct Title {
    text: &'static str,
    /// Abbreviated civilities accept an optional trailing period ("M." / "M").
    optional_period: bool,
}

const fn title(text: &'static str) -> Title {
    Title {
        text,
        optional_period: false,
    }
}

const fn abbrev(text: &'static str) -> Title {
    Title {
        text,
        optional_period: true,
    }
}

/// Title table, in priority order. Earlier titles win overlapping matches.
const TITLES: &[Title] = &[
    // Medical and academic titles
    title("Dr"),
    title("Docteur"),
    title("Pr"),
    title("Professeur"),
    title("Prof"),
    // Medical professions
    title("Médecin"),
    title("Infirmier"),
    title("Infirmière"),
    title("Chirurgien"),
    title("Chirurgienne"),
    title("Pharmacien"),
    title("Pharmacienne"),
    title("Kinésithérapeute"),
    title("Kiné"),
    title("Aide-soignant"),
    title("Aide-soignante"),
    title("Sage-femme"),
    title("Sage femme"),
    // Full civilities
    title("Monsieur"),
    title("Madame"),
    title("Mademoiselle"),
    // Abbreviated civilities, with or without the period
    abbrev("M"),
    abbrev("Mr"),
    abbrev("Mme"),
    abbrev("Mlle"),
    abbrev("Me"),
    // Other professional titles
    title("Maître"),
    title("Maitre"),
    title("Directeur"),
    title("Directrice"),
    title("Responsable"),
    title("Chef"),
];

const UPPER: &str = "A-ZÉÈÊËÀÂÄÔÖÛÜÇ";
const LOWER: &str = "a-zéèêëàâäôöûüç";

/// Build the two sub-patterns for one title: capitalized-word form first,
/// then all-uppercase form. The title match is case-insensitive; the name
/// classes are not, so a lowercase word after a title is left alone.
fn title_patterns(t: &Title) -> [Regex; 2] {
    let mut fragment = regex::escape(t.text);
    if t.optional_period {
        fragment.push_str(r"\.?");
    }
    let capitalized = format!(r"\b((?i:{fragment})\s+)([{UPPER}][{LOWER}-]+)");
    let uppercase = format!(r"\b((?i:{fragment})\s+)([{UPPER}][{UPPER}]+)");
    [
        Regex::new(&capitalized).expect("title pattern is valid"),
        Regex::new(&uppercase).expect("title pattern is valid"),
    ]
}

fn all_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| TITLES.iter().flat_map(|t| title_patterns(t)).collect())
}

/// Mask every title-anchored name in `text`, recording each match
/// (title + name) in `trace` before replacement.
pub fn redact_names(text: &str, trace: &mut RedactionTrace) -> String {
    // Claimed name spans, byte offsets into `text`. Disjoint by construction.
    let mut claims: Vec<(usize, usize)> = Vec::new();

    for pattern in all_patterns() {
        for caps in pattern.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 always present");
            let name = caps.get(2).expect("name group always present");

            // An earlier (higher-priority) title already claimed part of
            // this region, e.g. the name here was that match's name.
            let taken = claims
                .iter()
                .any(|&(start, end)| whole.start() < end && start < whole.end());
            if taken {
                continue;
            }

            trace
                .names
                .push(format!("{}{}", &caps[1], name.as_str()));
            claims.push((name.start(), name.end()));
        }
    }

    claims.sort_unstable();

    let mut redacted = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in claims {
        redacted.push_str(&text[cursor..start]);
        redacted.push_str(NAME_MASK);
        cursor = end;
    }
    redacted.push_str(&text[cursor..]);

    if redacted != text {
        trace.sources.insert(RedactionSource::Names);
    }

    redacted
}
