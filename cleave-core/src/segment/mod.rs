//! Text segmentation
//!
//! The [`Segmenter`] is the public driver: it resolves the locale once,
//! compiles (or fetches from cache) the break rules or the word dictionary,
//! and then yields segments of an input string one call at a time. All
//! per-call state lives on the stack; segmenters are cheap to share across
//! threads.

pub mod compile;
pub mod data;
pub mod dictionary;
pub mod rule;

use crate::error::Result;
use crate::locale::{Locale, ROOT};
use crate::segment::dictionary::{dictionary, dictionary_language, WordTrie};
use crate::segment::rule::{first_codepoint, BreakOp, Decision, RuleSet};
use std::fmt;
use std::sync::Arc;

/// The four segmentation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// User-perceived characters.
    GraphemeCluster,
    /// Words and the separators between them.
    Word,
    /// Sentences, terminators attached.
    Sentence,
    /// Line-break opportunities.
    Line,
}

impl SegmentKind {
    /// Normalize a data-file segmentation type to a kind. Accepts both the
    /// CLDR camel-case spellings and the canonical snake_case forms.
    pub fn from_data_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|ch| *ch != '_')
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "graphemeclusterbreak" | "graphemecluster" | "grapheme" => {
                Some(SegmentKind::GraphemeCluster)
            }
            "wordbreak" | "word" => Some(SegmentKind::Word),
            "sentencebreak" | "sentence" => Some(SegmentKind::Sentence),
            "linebreak" | "line" => Some(SegmentKind::Line),
            _ => None,
        }
    }

    /// The canonical snake_case data key.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            SegmentKind::GraphemeCluster => "grapheme_cluster_break",
            SegmentKind::Word => "word_break",
            SegmentKind::Sentence => "sentence_break",
            SegmentKind::Line => "line_break",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Options for building a [`Segmenter`].
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Requested locale; `None` means "unspecified" and falls back to root.
    pub locale: Option<Locale>,
    /// Segmentation mode.
    pub kind: SegmentKind,
    /// Whether sentence segmentation honors the locale's abbreviation list.
    pub suppressions: bool,
    /// Whether whitespace-only segments are dropped.
    pub trim: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            locale: None,
            kind: SegmentKind::Word,
            suppressions: true,
            trim: false,
        }
    }
}

impl SegmentOptions {
    /// Options for a segmentation kind with everything else defaulted.
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set the locale.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Enable or disable sentence suppressions.
    pub fn suppressions(mut self, enabled: bool) -> Self {
        self.suppressions = enabled;
        self
    }

    /// Enable or disable whitespace trimming.
    pub fn trim(mut self, enabled: bool) -> Self {
        self.trim = enabled;
        self
    }
}

/// A segmenter bound to one `(locale, kind)` pair.
///
/// Construction resolves the locale and compiles or fetches the rule set
/// (and, for word mode in dictionary locales, loads the dictionary); the
/// per-string operations never touch shared mutable state.
#[derive(Debug, Clone)]
pub struct Segmenter {
    options: SegmentOptions,
    resolved_locale: String,
    rules: Arc<RuleSet>,
    dictionary: Option<Arc<WordTrie>>,
}

impl Segmenter {
    /// Build a segmenter for the given options.
    pub fn new(options: SegmentOptions) -> Result<Self> {
        let resolved_locale = match &options.locale {
            Some(locale) => locale
                .resolve(data::is_known_locale)
                .unwrap_or_else(|| ROOT.to_string()),
            None => ROOT.to_string(),
        };

        let dictionary = match (&options.locale, options.kind) {
            (Some(locale), SegmentKind::Word) => match dictionary_language(locale) {
                Some(language) => Some(dictionary(language)?),
                None => None,
            },
            _ => None,
        };

        let rules = compile::rule_set(&resolved_locale, options.kind, options.suppressions)?;

        Ok(Self {
            options,
            resolved_locale,
            rules,
            dictionary,
        })
    }

    /// The locale the options resolved to.
    pub fn resolved_locale(&self) -> &str {
        &self.resolved_locale
    }

    /// The options this segmenter was built from.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Whether word segmentation is dictionary-driven for this segmenter.
    pub fn uses_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    /// Evaluate the boundary between `before` and `after`.
    pub fn break_at<'t>(&self, before: &str, after: &'t str) -> Decision<'t> {
        self.rules.evaluate(before, after)
    }

    /// Whether a boundary lies between `before` and `after`.
    pub fn is_break(&self, before: &str, after: &str) -> bool {
        self.break_at(before, after).op == BreakOp::Break
    }

    /// Produce the next segment of `text` and the remainder, or `None` at
    /// end of input. With `trim`, whitespace-only segments are skipped.
    pub fn next<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        let mut input = text;
        loop {
            if input.is_empty() {
                return None;
            }
            let (segment, rest) = match &self.dictionary {
                Some(trie) => {
                    let word = trie.next_word(input);
                    (word, &input[word.len()..])
                }
                None => self.next_by_rules(input),
            };
            if self.options.trim && is_whitespace_only(segment) {
                input = rest;
                continue;
            }
            return Some((segment, rest));
        }
    }

    /// One pass of the start → extending → done cursor over `text`.
    fn next_by_rules<'t>(&self, text: &'t str) -> (&'t str, &'t str) {
        let mut end = first_codepoint(text).len();
        loop {
            let (before, after) = text.split_at(end);
            let decision = self.rules.evaluate(before, after);
            match decision.op {
                BreakOp::Break => return (before, after),
                BreakOp::NoBreak => {
                    // A right context never consumes nothing unless the
                    // pattern can match empty; advance one codepoint then.
                    end += if decision.consumed.is_empty() {
                        first_codepoint(after).len()
                    } else {
                        decision.consumed.len()
                    };
                }
            }
        }
    }

    /// Split `text` into its full segment list.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.segments(text).collect()
    }

    /// A restartable lazy iterator over the segments of `text`.
    pub fn segments<'s, 't>(&'s self, text: &'t str) -> Segments<'s, 't> {
        Segments {
            segmenter: self,
            rest: text,
        }
    }
}

/// Lazy segment iterator returned by [`Segmenter::segments`].
#[derive(Debug, Clone)]
pub struct Segments<'s, 't> {
    segmenter: &'s Segmenter,
    rest: &'t str,
}

impl<'s, 't> Iterator for Segments<'s, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        let (segment, rest) = self.segmenter.next(self.rest)?;
        self.rest = rest;
        Some(segment)
    }
}

impl<'s, 't> std::iter::FusedIterator for Segments<'s, 't> {}

/// Whether every codepoint of `segment` has the White_Space property.
fn is_whitespace_only(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(char::is_whitespace)
}
