//! Core error types

use crate::segment::SegmentKind;
use thiserror::Error;

/// Errors raised by the segmentation and casing engine
#[derive(Error, Debug)]
pub enum CoreError {
    /// The requested locale is not syntactically valid
    #[error("unknown locale: {0:?}")]
    UnknownLocale(String),

    /// The locale exists but carries no data for the requested segment kind
    #[error("locale {locale:?} has no {kind} data")]
    UnknownSegmentKind {
        /// Locale whose data was consulted
        locale: String,
        /// The segment kind that was missing
        kind: SegmentKind,
    },

    /// A break kind string did not name one of grapheme/word/sentence/line
    #[error("invalid break kind: {0:?}")]
    InvalidBreakKind(String),

    /// A rule referenced a variable with no definition (data bug)
    #[error("variable {name} not found while expanding {context:?}")]
    VariableNotFound {
        /// The unresolved `$Name` reference
        name: String,
        /// The rule or variable body being expanded
        context: String,
    },

    /// A rule did not split into exactly `left OP right` (data bug)
    #[error("invalid rule {id}: {text:?}")]
    InvalidRule {
        /// Rule id as written in the data file
        id: String,
        /// The offending rule text
        text: String,
    },

    /// A rule side failed to compile as a regex (data bug)
    #[error("failed to compile rule fragment {fragment:?}: {source}")]
    RegexCompile {
        /// The expanded fragment handed to the regex engine
        fragment: String,
        /// Underlying regex error
        source: regex::Error,
    },

    /// A dictionary locale was requested but its word list is not installed
    #[error("dictionary for {language:?} unavailable at {path:?}: {source}")]
    DictionaryUnavailable {
        /// Canonical dictionary language
        language: String,
        /// Path that was probed
        path: std::path::PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
