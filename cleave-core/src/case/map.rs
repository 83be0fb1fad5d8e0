//! Case mapping
//!
//! Upcase, downcase, and titlecase over the standard Unicode full mappings,
//! refined by the conditional SpecialCasing records and their context
//! predicates, plus the locale hooks: Turkish/Azeri dotted-I, Lithuanian
//! dot retention, Dutch IJ titlecasing, and the Greek diacritic-stripping
//! upcase. Titlecase consumes the word segmenter.

use crate::case::tables::{
    CasingContext, GREEK_STRIPPED_MARKS, SPECIAL_CASING, SPECIAL_CASING_LANGUAGES,
    TITLECASE_DIGRAPHS,
};
use crate::error::Result;
use crate::locale::Locale;
use crate::segment::{SegmentKind, SegmentOptions, Segmenter};
use crate::unicode;
use unicode_normalization::UnicodeNormalization;

/// Options for the casing operations.
#[derive(Debug, Clone, Default)]
pub struct CaseOptions {
    /// Requested locale; `None` means no locale-specific rules.
    pub locale: Option<Locale>,
}

impl CaseOptions {
    /// Options with no locale-specific rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a locale.
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale: Some(locale),
        }
    }
}

/// The languages with locale-specific casing rules.
pub fn special_casing_locales() -> &'static [&'static str] {
    SPECIAL_CASING_LANGUAGES
}

/// The effective casing language: a special-casing language code, or `None`
/// for "any" (no locale-specific rules).
fn casing_language(options: &CaseOptions) -> Option<&'static str> {
    let language = options.locale.as_ref()?.language();
    SPECIAL_CASING_LANGUAGES
        .iter()
        .copied()
        .find(|lang| *lang == language)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Lower,
    Title,
    Upper,
}

/// Uppercase `text` under the options' locale.
pub fn upcase(text: &str, options: &CaseOptions) -> String {
    match casing_language(options) {
        None if text.is_ascii() => ascii_map(text, Casing::Upper),
        None => map_chars(text, Casing::Upper, None),
        Some("el") => upcase_greek(text),
        Some(language) => map_chars(text, Casing::Upper, Some(language)),
    }
}

/// Lowercase `text` under the options' locale.
pub fn downcase(text: &str, options: &CaseOptions) -> String {
    match casing_language(options) {
        None if text.is_ascii() => ascii_map(text, Casing::Lower),
        language => map_chars(text, Casing::Lower, language),
    }
}

/// Titlecase `text` under the options' locale: split into word segments,
/// titlecase each segment's first codepoint and downcase the rest.
pub fn titlecase(text: &str, options: &CaseOptions) -> Result<String> {
    let language = casing_language(options);
    let segmenter = Segmenter::new(SegmentOptions {
        locale: options.locale.clone(),
        ..SegmentOptions::new(SegmentKind::Word)
    })?;

    let mut out = String::with_capacity(text.len());
    for segment in segmenter.segments(text) {
        titlecase_segment(segment, language, &mut out);
    }
    Ok(out)
}

fn titlecase_segment(segment: &str, language: Option<&'static str>, out: &mut String) {
    // Dutch: a leading ij digraph titlecases as a unit.
    if language == Some("nl") {
        let mut chars = segment.chars();
        if let (Some(first), Some(second)) = (chars.next(), chars.next()) {
            if matches!(first, 'i' | 'I') && matches!(second, 'j' | 'J') {
                out.push_str("IJ");
                let rest = &segment[first.len_utf8() + second.len_utf8()..];
                out.push_str(&map_chars(rest, Casing::Lower, language));
                return;
            }
        }
    }

    let chars: Vec<char> = segment.chars().collect();
    let Some(&first) = chars.first() else {
        return;
    };
    map_char(first, 0, &chars, Casing::Title, language, out);
    out.push_str(&map_chars(
        &segment[first.len_utf8()..],
        Casing::Lower,
        language,
    ));
}

/// Greek uppercasing strips the accents and iota subscripts from Greek
/// letters. Order matters: decompose, strip, recompose, then apply the
/// general map so precomposed inputs upcase correctly.
fn upcase_greek(text: &str) -> String {
    let decomposed: String = text.nfd().collect();
    let mut stripped = String::with_capacity(decomposed.len());
    let mut after_greek_base = false;
    for ch in decomposed.chars() {
        if unicode::is_combining(ch) {
            if after_greek_base && GREEK_STRIPPED_MARKS.contains(&ch) {
                continue;
            }
        } else {
            after_greek_base = unicode::greek().contains(ch);
        }
        stripped.push(ch);
    }
    let recomposed: String = stripped.nfc().collect();
    map_chars(&recomposed, Casing::Upper, Some("el"))
}

fn map_chars(text: &str, casing: Casing, language: Option<&'static str>) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &ch) in chars.iter().enumerate() {
        map_char(ch, i, &chars, casing, language, &mut out);
    }
    out
}

fn map_char(
    ch: char,
    index: usize,
    chars: &[char],
    casing: Casing,
    language: Option<&'static str>,
    out: &mut String,
) {
    if let Some(replacement) = special_mapping(ch, index, chars, casing, language) {
        out.push_str(replacement);
        return;
    }
    match casing {
        Casing::Lower => out.extend(ch.to_lowercase()),
        Casing::Upper => out.extend(ch.to_uppercase()),
        Casing::Title => {
            match TITLECASE_DIGRAPHS.binary_search_by_key(&ch, |(cp, _)| *cp) {
                Ok(idx) => out.push(TITLECASE_DIGRAPHS[idx].1),
                Err(_) => out.extend(ch.to_uppercase()),
            }
        }
    }
}

/// The first SpecialCasing record matching this codepoint, language, and
/// context that constrains the requested casing.
fn special_mapping(
    ch: char,
    index: usize,
    chars: &[char],
    casing: Casing,
    language: Option<&'static str>,
) -> Option<&'static str> {
    for record in SPECIAL_CASING {
        if record.cp != ch {
            continue;
        }
        if let Some(required) = record.language {
            if language != Some(required) {
                continue;
            }
        }
        if let Some(context) = record.context {
            if !context_matches(context, chars, index) {
                continue;
            }
        }
        let replacement = match casing {
            Casing::Lower => record.lower,
            Casing::Title => record.title,
            Casing::Upper => record.upper,
        };
        if let Some(replacement) = replacement {
            return Some(replacement);
        }
    }
    None
}

fn context_matches(context: CasingContext, chars: &[char], index: usize) -> bool {
    match context {
        CasingContext::FinalSigma => {
            preceded_by_cased(chars, index) && !followed_by_cased(chars, index)
        }
        CasingContext::NotBeforeDot => !before_dot(chars, index),
        CasingContext::MoreAbove => more_above(chars, index),
        CasingContext::AfterSoftDotted => after_soft_dotted(chars, index),
        CasingContext::AfterI => after_i(chars, index),
    }
}

fn preceded_by_cased(chars: &[char], index: usize) -> bool {
    for &ch in chars[..index].iter().rev() {
        if unicode::case_ignorable().contains(ch) {
            continue;
        }
        return unicode::cased().contains(ch);
    }
    false
}

fn followed_by_cased(chars: &[char], index: usize) -> bool {
    for &ch in &chars[index + 1..] {
        if unicode::case_ignorable().contains(ch) {
            continue;
        }
        return unicode::cased().contains(ch);
    }
    false
}

/// A combining dot above follows, before any base or above-class character.
fn before_dot(chars: &[char], index: usize) -> bool {
    for &ch in &chars[index + 1..] {
        if ch == '\u{0307}' {
            return true;
        }
        if !unicode::is_combining(ch) || unicode::is_above_mark(ch) {
            return false;
        }
    }
    false
}

/// An above-class mark follows, before the next base character.
fn more_above(chars: &[char], index: usize) -> bool {
    for &ch in &chars[index + 1..] {
        if unicode::is_above_mark(ch) {
            return true;
        }
        if !unicode::is_combining(ch) {
            return false;
        }
    }
    false
}

/// The last preceding base character is soft-dotted, with no above-class
/// mark in between.
fn after_soft_dotted(chars: &[char], index: usize) -> bool {
    for &ch in chars[..index].iter().rev() {
        if unicode::is_above_mark(ch) {
            return false;
        }
        if !unicode::is_combining(ch) {
            return unicode::soft_dotted().contains(ch);
        }
    }
    false
}

/// The last preceding base character is `I`, with no above-class mark in
/// between.
fn after_i(chars: &[char], index: usize) -> bool {
    for &ch in chars[..index].iter().rev() {
        if unicode::is_above_mark(ch) {
            return false;
        }
        if !unicode::is_combining(ch) {
            return ch == 'I';
        }
    }
    false
}

fn ascii_map(text: &str, casing: Casing) -> String {
    let mut bytes = text.as_bytes().to_vec();
    for byte in &mut bytes {
        *byte = match casing {
            Casing::Lower => byte.to_ascii_lowercase(),
            _ => byte.to_ascii_uppercase(),
        };
    }
    debug_assert!(bytes.is_ascii());
    // ASCII in, ASCII out.
    unsafe { String::from_utf8_unchecked(bytes) }
}
