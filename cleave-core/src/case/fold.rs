//! Case folding
//!
//! Folding maps each codepoint to a canonical caseless form so that two
//! strings compare bytewise-equal exactly when they are case-insensitively
//! equal. Folding is context-free; the only variation is the Turkic mode,
//! which redirects the two dotted/dotless I codepoints.

use crate::case::tables::{FOLD_EXCEPTIONS, FOLD_TURKIC};
use crate::locale::Locale;

/// Folding variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoldMode {
    /// Full case folding (`C` + `F` status).
    #[default]
    Full,
    /// Full folding with the Turkic `T` substitutions for I and İ.
    Turkic,
}

impl FoldMode {
    /// The folding mode a locale implies: Turkic for `tr` and `az`.
    pub fn for_locale(locale: &Locale) -> Self {
        match locale.language() {
            "tr" | "az" => FoldMode::Turkic,
            _ => FoldMode::Full,
        }
    }
}

/// Full case folding of `text`.
pub fn fold(text: &str) -> String {
    fold_with(text, FoldMode::Full)
}

/// Case folding of `text` under an explicit mode.
pub fn fold_with(text: &str, mode: FoldMode) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        fold_char(ch, mode, &mut out);
    }
    out
}

fn fold_char(ch: char, mode: FoldMode, out: &mut String) {
    if mode == FoldMode::Turkic {
        if let Ok(idx) = FOLD_TURKIC.binary_search_by_key(&ch, |(cp, _)| *cp) {
            out.push_str(FOLD_TURKIC[idx].1);
            return;
        }
    }
    match FOLD_EXCEPTIONS.binary_search_by_key(&ch, |(cp, _)| *cp) {
        Ok(idx) => out.push_str(FOLD_EXCEPTIONS[idx].1),
        Err(_) => out.extend(ch.to_lowercase()),
    }
}

/// Whether `a` and `b` are equal ignoring case.
pub fn equals_ignoring_case(a: &str, b: &str) -> bool {
    equals_ignoring_case_with(a, b, FoldMode::Full)
}

/// Case-insensitive equality under an explicit folding mode.
pub fn equals_ignoring_case_with(a: &str, b: &str, mode: FoldMode) -> bool {
    fold_with(a, mode) == fold_with(b, mode)
}
