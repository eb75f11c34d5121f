// Storage — backend-agnostic traits for the word list and flag config.
//
// Both records are deliberately simple: a flat list of lowercase words and a
// four-field JSON document. The file implementations cover production; the
// traits exist so tests (and any future backed store) can swap in their own.

pub mod file;
pub mod traits;

pub use file::{FileFlagConfigStore, FileWordListStore};
pub use traits::{FlagConfigStore, StoreError, WordListStore};

/// The word list a fresh installation starts with.
pub const DEFAULT_FORBIDDEN_WORDS: &[&str] = &[
    "merde",
    "putain",
    "connard",
    "con",
    "pute",
    "bite",
    "trou du cul",
];
