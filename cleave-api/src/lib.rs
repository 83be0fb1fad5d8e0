//! Public API for cleave locale-aware segmentation and casing
//!
//! This crate provides a clean, stable interface over the engine in
//! `cleave-core`: validated options, convenience functions for one-shot
//! calls, and a reusable [`TextSegmenter`] for repeated segmentation with
//! the same configuration.

#![warn(missing_docs)]

pub mod error;
pub mod options;

pub use cleave_core::{BreakOp, Decision, FoldMode, Locale};
pub use error::{ApiError, Result};
pub use options::{BreakKind, Options, OptionsBuilder};

use cleave_core::{CaseOptions, Segmenter};

/// A segmenter bound to validated options.
///
/// Building resolves the locale and compiles (or fetches from the
/// process-wide cache) the rule set or dictionary once; the per-string
/// operations are then cheap and thread-safe.
#[derive(Debug, Clone)]
pub struct TextSegmenter {
    inner: Segmenter,
}

impl TextSegmenter {
    /// A segmenter with default options (root locale, word breaking).
    pub fn new() -> Result<Self> {
        Self::with_options(Options::default())
    }

    /// A segmenter for specific options.
    pub fn with_options(options: Options) -> Result<Self> {
        Ok(Self {
            inner: Segmenter::new(options.segment_options())?,
        })
    }

    /// A segmenter for a locale with everything else defaulted.
    pub fn with_locale(locale: &str) -> Result<Self> {
        Self::with_options(Options::builder().locale(locale)?.build()?)
    }

    /// The locale the options resolved to.
    pub fn resolved_locale(&self) -> &str {
        self.inner.resolved_locale()
    }

    /// Split `text` into its full segment list.
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.inner.split(text)
    }

    /// The next segment of `text` and the remainder, or `None` at end of
    /// input.
    pub fn next_segment<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        self.inner.next(text)
    }

    /// Whether a boundary lies between `before` and `after`.
    pub fn is_break(&self, before: &str, after: &str) -> bool {
        self.inner.is_break(before, after)
    }

    /// The raw evaluator decision at the boundary between `before` and
    /// `after`.
    pub fn break_at<'t>(&self, before: &str, after: &'t str) -> Decision<'t> {
        self.inner.break_at(before, after)
    }

    /// A lazy iterator over the segments of `text`. Call again to restart.
    pub fn segments<'s, 't>(&'s self, text: &'t str) -> cleave_core::Segments<'s, 't> {
        self.inner.segments(text)
    }
}

// Convenience functions

/// Split text under the given options.
pub fn split(text: &str, options: Options) -> Result<Vec<String>> {
    let segmenter = TextSegmenter::with_options(options)?;
    Ok(segmenter.split(text).into_iter().map(str::to_string).collect())
}

/// Produce one segment and the remaining text under the given options.
pub fn next_segment<'t>(text: &'t str, options: Options) -> Result<Option<(&'t str, &'t str)>> {
    let segmenter = TextSegmenter::with_options(options)?;
    Ok(segmenter.next_segment(text))
}

/// A restartable lazy segment sequence over `text`.
///
/// The returned stream owns its segmenter, so it can outlive the options;
/// dropping it cancels nothing because no work runs ahead of `next`.
pub fn splitter(text: &str, options: Options) -> Result<SegmentStream<'_>> {
    Ok(SegmentStream {
        segmenter: TextSegmenter::with_options(options)?,
        rest: text,
    })
}

/// Alias for [`splitter`], matching the streaming name.
pub fn stream(text: &str, options: Options) -> Result<SegmentStream<'_>> {
    splitter(text, options)
}

/// Whether a boundary lies between `before` and `after` under the options.
pub fn is_break(before: &str, after: &str, options: Options) -> Result<bool> {
    Ok(TextSegmenter::with_options(options)?.is_break(before, after))
}

/// The raw evaluator decision between `before` and `after`.
pub fn break_at<'t>(before: &str, after: &'t str, options: Options) -> Result<Decision<'t>> {
    Ok(TextSegmenter::with_options(options)?.break_at(before, after))
}

/// Owned lazy segment iterator returned by [`splitter`] and [`stream`].
#[derive(Debug, Clone)]
pub struct SegmentStream<'t> {
    segmenter: TextSegmenter,
    rest: &'t str,
}

impl<'t> Iterator for SegmentStream<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        let (segment, rest) = self.segmenter.next_segment(self.rest)?;
        self.rest = rest;
        Some(segment)
    }
}

impl<'t> std::iter::FusedIterator for SegmentStream<'t> {}

// Casing

fn case_options(locale: Option<&str>) -> Result<CaseOptions> {
    Ok(match locale {
        Some(tag) => CaseOptions {
            locale: Some(Locale::parse(tag)?),
        },
        None => CaseOptions::default(),
    })
}

/// Full case folding.
pub fn fold(text: &str) -> String {
    cleave_core::fold(text)
}

/// Case folding under an explicit mode.
pub fn fold_with(text: &str, mode: FoldMode) -> String {
    cleave_core::fold_with(text, mode)
}

/// Case folding under the mode a locale implies (Turkic for `tr`/`az`).
pub fn fold_for(text: &str, locale: &str) -> Result<String> {
    let locale = Locale::parse(locale)?;
    Ok(cleave_core::fold_with(text, FoldMode::for_locale(&locale)))
}

/// Case-insensitive equality via folding.
pub fn equals_ignoring_case(a: &str, b: &str) -> bool {
    cleave_core::equals_ignoring_case(a, b)
}

/// Case-insensitive equality under the mode a locale implies.
pub fn equals_ignoring_case_for(a: &str, b: &str, locale: &str) -> Result<bool> {
    let locale = Locale::parse(locale)?;
    Ok(cleave_core::equals_ignoring_case_with(
        a,
        b,
        FoldMode::for_locale(&locale),
    ))
}

/// Uppercase `text`, honoring the locale's casing rules when given.
pub fn upcase(text: &str, locale: Option<&str>) -> Result<String> {
    Ok(cleave_core::upcase(text, &case_options(locale)?))
}

/// Lowercase `text`, honoring the locale's casing rules when given.
pub fn downcase(text: &str, locale: Option<&str>) -> Result<String> {
    Ok(cleave_core::downcase(text, &case_options(locale)?))
}

/// Titlecase `text`: word-segment it, titlecase each segment's first
/// codepoint, downcase the rest.
pub fn titlecase(text: &str, locale: Option<&str>) -> Result<String> {
    Ok(cleave_core::titlecase(text, &case_options(locale)?)?)
}

// Introspection

/// The locales that ship segmentation data.
pub fn known_segmentation_locales() -> Vec<&'static str> {
    cleave_core::known_segmentation_locales()
}

/// The canonical languages with a packaged word dictionary.
pub fn known_dictionary_locales() -> &'static [&'static str] {
    cleave_core::known_dictionary_locales()
}

/// The languages with locale-specific casing rules.
pub fn special_casing_locales() -> &'static [&'static str] {
    cleave_core::special_casing_locales()
}
