// File: src/error.rs
use std::fmt;

/// Result type used across the crate, defaulting to [`LexiconError`].
pub type Result<T, E = LexiconError> = std::result::Result<T, E>;

/// Failures that abort a conversion run.
///
/// Per-entry problems never end up here; they are counted in the
/// [`ConversionReport`](crate::core::engine::ConversionReport) instead. The
/// exceptions are [`LexiconError::Json`] and [`LexiconError::Decode`], which the
/// reader hands back so the converter can count the line as a malformed entry.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A source line that could not be decoded into a raw entry.
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A source line that is not valid UTF-8.
    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error(transparent)]
    Persist(#[from] tempfile::PersistError),
}

/// Which part of a raw entry made tagging fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    Lemma,
    FeatureSetA,
    FeatureSetB,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Category => "category",
            Field::Lemma => "lemma",
            Field::FeatureSetA => "msfeatures",
            Field::FeatureSetB => "unimorph",
        };
        f.write_str(name)
    }
}

/// A mapping failure for a single, otherwise eligible entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    /// The value would break the tag grammar or the tab-separated output.
    #[error("{field} {value:?} cannot be represented in a tag record")]
    Unrepresentable { field: Field, value: String },
}
