// Curated vocabulary for the classifier-triggered pass.
//
// When the external classifier flags a review, these terms are the ones we
// mask. The list is deliberately separate from the operator-managed
// dictionary: it only applies once the classifier has already judged the
// content inappropriate, and it covers the common ground so the dictionary
// can stay a small safety net.

/// Terms checked by the classifier-triggered pass, in application order.
/// Entries are literals (regex-escaped before matching), multi-word phrases
/// included.
pub const CLASSIFIER_VOCABULARY: &[&str] = &[
    // Common profanity
    "merde",
    "putain",
    "con",
    "connard",
    "connasse",
    "salope",
    "pute",
    "enculé",
    "encule",
    "bite",
    "couille",
    "couilles",
    "trou du cul",
    "trou-du-cul",
    // Sexual terms
    "sexe",
    "penis",
    "pénis",
    "vagin",
    "seins",
    "cul",
    // Insults
    "salaud",
    "ordure",
    "fumier",
    "crétin",
    "imbécile",
    "idiot",
    "débile",
    "abruti",
    "taré",
    "dégénéré",
    "pourriture",
    "salopard",
    // Crude verbs
    "niquer",
    "nique",
    "foutre",
    "chier",
    "pisser",
    // Phrases
    "fils de pute",
    "va te faire",
    "ta gueule",
    "ferme ta gueule",
];
