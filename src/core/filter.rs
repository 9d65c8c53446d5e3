// File: src/core/filter.rs
use crate::core::types::{Category, RawEntry};
use std::fmt;

/// Characters dropped from a form before the alphabetic check.
const IGNORED_FORM_CHARS: [char; 3] = ['\'', '\u{2019}', '-'];

/// Why an entry did not make it into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Missing lemma or category, or a source line that could not be read.
    MalformedEntry,
    ExcludedCategory,
    NonAlphabeticForm,
    MappingFailure,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::MalformedEntry => "malformed entry",
            SkipReason::ExcludedCategory => "excluded category",
            SkipReason::NonAlphabeticForm => "non-alphabetic form",
            SkipReason::MappingFailure => "mapping failure",
        })
    }
}

/// Decides whether a raw entry is usable by the grammar engine.
/// Returns the parsed category so the mapper does not parse it twice.
pub fn admit(entry: &RawEntry) -> Result<Category, SkipReason> {
    if entry.lemma.is_empty() || entry.category.is_empty() {
        return Err(SkipReason::MalformedEntry);
    }

    let category = Category::parse(&entry.category);
    if category.is_excluded() {
        return Err(SkipReason::ExcludedCategory);
    }

    if !is_alphabetic_form(&entry.form) {
        return Err(SkipReason::NonAlphabeticForm);
    }

    Ok(category)
}

/// True when the form, minus apostrophes and hyphens, is a non-empty run of letters.
pub fn is_alphabetic_form(form: &str) -> bool {
    let mut residue = form.chars().filter(|c| !IGNORED_FORM_CHARS.contains(c)).peekable();
    residue.peek().is_some() && residue.all(char::is_alphabetic)
}
