//! Locale identifiers and resolution
//!
//! Locales arrive as strings (`"en-US"`, `"zh_Hant_HK"`) or as an already
//! structured [`Locale`]. Resolution walks a fixed fallback chain against the
//! set of locales that actually carry data, so callers can request any
//! well-formed tag and still land on usable rules.

use crate::error::{CoreError, Result};
use std::fmt;
use std::str::FromStr;

/// Sentinel locale naming the default segmentation data.
pub const ROOT: &str = "root";

/// Sentinel casing locale meaning "no locale-specific rules".
pub const ANY: &str = "any";

/// A canonicalized locale identifier: language, optional script, optional
/// region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl Locale {
    /// Parse a locale from its string or symbolic form.
    ///
    /// Hyphens and underscores are both accepted as subtag separators; case
    /// is canonicalized (language lowercased, script titlecased, region
    /// uppercased). Subtags past the region (variants, extensions) are
    /// ignored. A malformed language subtag is an error.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::UnknownLocale(input.to_string()));
        }

        let mut subtags = trimmed.split(['-', '_']);
        let language = subtags
            .next()
            .filter(|l| is_language_subtag(l))
            .ok_or_else(|| CoreError::UnknownLocale(input.to_string()))?
            .to_ascii_lowercase();

        let mut script = None;
        let mut region = None;
        for subtag in subtags {
            if script.is_none() && region.is_none() && is_script_subtag(subtag) {
                script = Some(titlecase_ascii(subtag));
            } else if region.is_none() && is_region_subtag(subtag) {
                region = Some(subtag.to_ascii_uppercase());
            } else {
                // Variants and extensions carry no segmentation or casing
                // data; stop at the first unrecognized subtag.
                break;
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// The lowercased language subtag.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The titlecased script subtag, if present.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// The uppercased region subtag, if present.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Canonical hyphen-joined form, e.g. `zh-Hant-HK`.
    pub fn canonical_name(&self) -> String {
        let mut name = self.language.clone();
        if let Some(script) = &self.script {
            name.push('-');
            name.push_str(script);
        }
        if let Some(region) = &self.region {
            name.push('-');
            name.push_str(region);
        }
        name
    }

    /// Underscore-joined form matching the data file naming convention.
    pub fn data_file_stem(&self) -> String {
        self.canonical_name().replace('-', "_")
    }

    /// Progressively less specific lookup candidates:
    /// `lang-Script-Region`, `lang-Region`, `lang-Script`, `lang`.
    pub fn candidates(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(4);
        if let (Some(script), Some(region)) = (&self.script, &self.region) {
            out.push(format!("{}-{}-{}", self.language, script, region));
        }
        if let Some(region) = &self.region {
            out.push(format!("{}-{}", self.language, region));
        }
        if let Some(script) = &self.script {
            out.push(format!("{}-{}", self.language, script));
        }
        out.push(self.language.clone());
        out
    }

    /// The first candidate present in `known`, if any.
    pub fn resolve<F: Fn(&str) -> bool>(&self, known: F) -> Option<String> {
        self.candidates().into_iter().find(|c| known(c))
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// Ancestor chain of a canonical locale id, most specific first and ending
/// with `root`: `a-b-c` yields `[a-b-c, a-b, a, root]`.
pub fn ancestor_chain(locale: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = locale.to_string();
    loop {
        if current == ROOT {
            break;
        }
        chain.push(current.clone());
        match current.rfind('-') {
            Some(idx) => current.truncate(idx),
            None => break,
        }
    }
    chain.push(ROOT.to_string());
    chain
}

fn is_language_subtag(s: &str) -> bool {
    (2..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_script_subtag(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region_subtag(s: &str) -> bool {
    (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
        || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn titlecase_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, ch) in s.chars().enumerate() {
        if i == 0 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_only() {
        let locale = Locale::parse("en").unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.canonical_name(), "en");
    }

    #[test]
    fn test_parse_normalizes_case_and_separators() {
        let locale = Locale::parse("ZH_hant_hk").unwrap();
        assert_eq!(locale.language(), "zh");
        assert_eq!(locale.script(), Some("Hant"));
        assert_eq!(locale.region(), Some("HK"));
        assert_eq!(locale.canonical_name(), "zh-Hant-HK");
        assert_eq!(locale.data_file_stem(), "zh_Hant_HK");
    }

    #[test]
    fn test_parse_region_without_script() {
        let locale = Locale::parse("en-US").unwrap();
        assert_eq!(locale.script(), None);
        assert_eq!(locale.region(), Some("US"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("x").is_err());
        assert!(Locale::parse("123").is_err());
        assert!(Locale::parse("en!US").is_err());
    }

    #[test]
    fn test_candidates_order() {
        let locale = Locale::parse("zh-Hant-HK").unwrap();
        assert_eq!(
            locale.candidates(),
            vec!["zh-Hant-HK", "zh-HK", "zh-Hant", "zh"]
        );
    }

    #[test]
    fn test_resolve_picks_first_known() {
        let locale = Locale::parse("zh-Hant-HK").unwrap();
        let known = ["zh-Hant", "zh"];
        assert_eq!(
            locale.resolve(|c| known.contains(&c)),
            Some("zh-Hant".to_string())
        );
        assert_eq!(locale.resolve(|c| c == "zh"), Some("zh".to_string()));
        assert_eq!(locale.resolve(|_| false), None);
    }

    #[test]
    fn test_ancestor_chain() {
        assert_eq!(
            ancestor_chain("zh-Hant-HK"),
            vec!["zh-Hant-HK", "zh-Hant", "zh", "root"]
        );
        assert_eq!(ancestor_chain("en"), vec!["en", "root"]);
        assert_eq!(ancestor_chain("root"), vec!["root"]);
    }
}
