//! Case folding and case mapping
//!
//! Folding serves case-insensitive comparison; mapping serves presentation.
//! Both are table-driven transducers over the standard Unicode mappings,
//! with locale hooks for Turkish/Azeri, Lithuanian, Dutch, and Greek.

mod fold;
mod map;
pub mod tables;

pub use fold::{equals_ignoring_case, equals_ignoring_case_with, fold, fold_with, FoldMode};
pub use map::{downcase, special_casing_locales, titlecase, upcase, CaseOptions};
