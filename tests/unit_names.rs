// Unit tests for title-anchored name redaction.
//
// The contract: a capitalized (or all-uppercase) word directly after a
// civility or professional title is masked with a fixed 5-asterisk token.
// Titles match case-insensitively; the name's capitalization is literal.

use palisade::redaction::{names, RedactionSource, RedactionTrace};

fn redact(text: &str) -> (String, RedactionTrace) {
    let mut trace = RedactionTrace::default();
    let out = names::redact_names(text, &mut trace);
    (out, trace)
}

// ============================================================
// Title coverage
// ============================================================

#[test]
fn medical_titles_are_recognized() {
    let cases = [
        ("Dr Martin", "Dr *****"),
        ("Docteur Martin", "Docteur *****"),
        ("Professeur Martin", "Professeur *****"),
        ("Infirmière Martin", "Infirmière *****"),
        ("Chirurgien Martin", "Chirurgien *****"),
        ("Pharmacienne Martin", "Pharmacienne *****"),
        ("Kiné Martin", "Kiné *****"),
        ("Sage-femme Martin", "Sage-femme *****"),
    ];
    for (input, expected) in cases {
        let (out, _) = redact(input);
        assert_eq!(out, expected, "input: {input}");
    }
}

#[test]
fn civilities_are_recognized() {
    let cases = [
        ("Monsieur Dupont", "Monsieur *****"),
        ("Madame Dupont", "Madame *****"),
        ("Mademoiselle Dupont", "Mademoiselle *****"),
        ("M. Dupont", "M. *****"),
        ("M Dupont", "M *****"),
        ("Mme Dupont", "Mme *****"),
        ("Mlle. Dupont", "Mlle. *****"),
    ];
    for (input, expected) in cases {
        let (out, _) = redact(input);
        assert_eq!(out, expected, "input: {input}");
    }
}

#[test]
fn professional_titles_are_recognized() {
    let cases = [
        ("Maître Berger", "Maître *****"),
        ("Directrice Berger", "Directrice *****"),
        ("Responsable Berger", "Responsable *****"),
        ("Chef Berger", "Chef *****"),
    ];
    for (input, expected) in cases {
        let (out, _) = redact(input);
        assert_eq!(out, expected, "input: {input}");
    }
}

// ============================================================
// Matching semantics
// ============================================================

#[test]
fn title_is_preserved_only_name_is_masked() {
    let (out, trace) = redact("Merci au Docteur Blanc pour son accueil");
    assert_eq!(out, "Merci au Docteur ***** pour son accueil");
    assert_eq!(trace.names, vec!["Docteur Blanc"]);
    assert!(trace.sources.contains(&RedactionSource::Names));
}

#[test]
fn title_without_following_capitalized_word_is_ignored() {
    let (out, trace) = redact("le docteur est très compétent");
    assert_eq!(out, "le docteur est très compétent");
    assert!(trace.names.is_empty());
    assert!(trace.sources.is_empty());
}

#[test]
fn all_uppercase_name_is_masked() {
    let (out, trace) = redact("madame DUBOIS attend toujours");
    assert_eq!(out, "madame ***** attend toujours");
    assert_eq!(trace.names, vec!["madame DUBOIS"]);
}

#[test]
fn accented_capital_starts_a_name() {
    let (out, _) = redact("Docteur Émile est absent");
    assert_eq!(out, "Docteur ***** est absent");
}

#[test]
fn multiple_names_in_one_text() {
    let (out, trace) = redact("Dr Blanc opère, Mme Noir assiste");
    assert_eq!(out, "Dr ***** opère, Mme ***** assiste");
    assert_eq!(trace.names.len(), 2);
}

#[test]
fn recorded_match_includes_title_and_name() {
    let (_, trace) = redact("Monsieur Dupont");
    assert_eq!(trace.names, vec!["Monsieur Dupont"]);
}

// ============================================================
// Mask asymmetry and idempotence
// ============================================================

#[test]
fn name_mask_is_always_five_asterisks() {
    let (short, _) = redact("Dr Li");
    let (long, _) = redact("Dr Grandmontagne");
    assert_eq!(short, "Dr *****");
    assert_eq!(long, "Dr *****");
}

#[test]
fn redacting_masked_text_changes_nothing() {
    let (first, _) = redact("Docteur Durant et Madame DUBOIS");
    let (second, trace) = redact(&first);
    assert_eq!(first, second);
    assert!(trace.names.is_empty());
    assert!(trace.sources.is_empty());
}
