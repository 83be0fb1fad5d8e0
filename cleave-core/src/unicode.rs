//! Unicode property predicates
//!
//! The casing context predicates need a handful of binary properties the
//! standard library does not expose (Cased, Case_Ignorable, Soft_Dotted,
//! script membership). Rather than carrying generated tables for them, each
//! predicate is a compiled single-codepoint character class — the same regex
//! engine that executes the break rules.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::canonical_combining_class;

/// A compiled single-codepoint property test.
pub(crate) struct CharProperty {
    regex: Regex,
}

impl CharProperty {
    fn new(class: &str) -> Self {
        let pattern = format!(r"\A{class}\z");
        Self {
            // The class expressions are compile-time constants below; a
            // failure here is a programming error, not a data error.
            regex: Regex::new(&pattern).expect("property class must compile"),
        }
    }

    pub(crate) fn contains(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.regex.is_match(ch.encode_utf8(&mut buf))
    }
}

macro_rules! property {
    ($fn_name:ident, $class:expr) => {
        pub(crate) fn $fn_name() -> &'static CharProperty {
            static PROP: OnceLock<CharProperty> = OnceLock::new();
            PROP.get_or_init(|| CharProperty::new($class))
        }
    };
}

property!(cased, r"\p{Cased}");
property!(case_ignorable, r"\p{Case_Ignorable}");
property!(soft_dotted, r"\p{Soft_Dotted}");
property!(greek, r"\p{Greek}");

/// Canonical combining class 230 marks sit above their base letter; the
/// More_Above / After_Soft_Dotted contexts are defined in terms of them.
pub(crate) fn is_above_mark(ch: char) -> bool {
    canonical_combining_class(ch) == 230
}

pub(crate) fn is_combining(ch: char) -> bool {
    canonical_combining_class(ch) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cased() {
        assert!(cased().contains('a'));
        assert!(cased().contains('Σ'));
        assert!(!cased().contains('.'));
        assert!(!cased().contains(' '));
    }

    #[test]
    fn test_case_ignorable() {
        assert!(case_ignorable().contains('\'')); // MidNumLet apostrophe
        assert!(case_ignorable().contains('\u{0301}')); // combining acute
        assert!(!case_ignorable().contains('a'));
    }

    #[test]
    fn test_soft_dotted() {
        assert!(soft_dotted().contains('i'));
        assert!(soft_dotted().contains('j'));
        assert!(!soft_dotted().contains('a'));
    }

    #[test]
    fn test_above_marks() {
        assert!(is_above_mark('\u{0301}'));
        assert!(is_above_mark('\u{0307}'));
        assert!(!is_above_mark('\u{0345}')); // ypogegrammeni is ccc 240
        assert!(!is_above_mark('a'));
    }
}
