//! Locale-aware Unicode text segmentation and case transformation
//!
//! The segmentation engine interprets declarative break rules loaded from
//! per-locale data files: variables referencing Unicode property sets expand
//! into anchored regular expressions, numbered rules evaluate in order at
//! every candidate boundary, locale data inherits along the ancestor chain
//! down to `root`, sentence breaking honors per-locale abbreviation
//! suppressions, and locales without interword spacing switch to
//! longest-match segmentation over a compiled word trie.
//!
//! Casing is a table-driven transducer implementing Unicode case folding and
//! the SpecialCasing context predicates with locale exceptions.
//!
//! ```
//! use cleave_core::segment::{SegmentKind, SegmentOptions, Segmenter};
//!
//! let segmenter = Segmenter::new(SegmentOptions::new(SegmentKind::Sentence))?;
//! let sentences = segmenter.split("This is a sentence. And another.");
//! assert_eq!(sentences, vec!["This is a sentence. ", "And another."]);
//! # Ok::<(), cleave_core::CoreError>(())
//! ```

pub mod case;
pub mod error;
pub mod locale;
pub mod segment;
mod unicode;

pub use case::{
    downcase, equals_ignoring_case, equals_ignoring_case_with, fold, fold_with,
    special_casing_locales, titlecase, upcase, CaseOptions, FoldMode,
};
pub use error::{CoreError, Result};
pub use locale::Locale;
pub use segment::dictionary::{loaded_dictionaries, PrefixMatch, WordTrie, DICTIONARY_LANGUAGES};
pub use segment::rule::{BreakOp, Decision};
pub use segment::{SegmentKind, SegmentOptions, Segmenter, Segments};

/// The locales that ship segmentation data.
pub fn known_segmentation_locales() -> Vec<&'static str> {
    segment::data::known_locales()
}

/// The canonical languages with a packaged word dictionary.
pub fn known_dictionary_locales() -> &'static [&'static str] {
    DICTIONARY_LANGUAGES
}
