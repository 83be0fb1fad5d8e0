//! High-level segmentation options

use crate::error::{ApiError, Result};
use cleave_core::{CoreError, Locale, SegmentKind, SegmentOptions};
use std::str::FromStr;

/// The four break kinds accepted by the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakKind {
    /// Grapheme cluster boundaries.
    Grapheme,
    /// Word boundaries (the default).
    #[default]
    Word,
    /// Sentence boundaries.
    Sentence,
    /// Line-break opportunities.
    Line,
}

impl BreakKind {
    /// The engine-level segment kind.
    pub fn segment_kind(self) -> SegmentKind {
        match self {
            BreakKind::Grapheme => SegmentKind::GraphemeCluster,
            BreakKind::Word => SegmentKind::Word,
            BreakKind::Sentence => SegmentKind::Sentence,
            BreakKind::Line => SegmentKind::Line,
        }
    }
}

impl FromStr for BreakKind {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, CoreError> {
        match s {
            "grapheme" => Ok(BreakKind::Grapheme),
            "word" => Ok(BreakKind::Word),
            "sentence" => Ok(BreakKind::Sentence),
            "line" => Ok(BreakKind::Line),
            other => Err(CoreError::InvalidBreakKind(other.to_string())),
        }
    }
}

/// Validated options for the segmentation operations.
///
/// Defaults: no locale (root data), word breaking, suppressions enabled,
/// trimming disabled.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub(crate) locale: Option<Locale>,
    pub(crate) break_kind: BreakKind,
    pub(crate) suppressions: Option<bool>,
    pub(crate) trim: bool,
}

impl Options {
    /// Create a builder.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// The requested locale, if one was given.
    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// The break kind.
    pub fn break_kind(&self) -> BreakKind {
        self.break_kind
    }

    pub(crate) fn segment_options(&self) -> SegmentOptions {
        let mut options = SegmentOptions::new(self.break_kind.segment_kind());
        options.locale = self.locale.clone();
        if let Some(enabled) = self.suppressions {
            options.suppressions = enabled;
        }
        options.trim = self.trim;
        options
    }
}

/// Builder for [`Options`].
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Set the locale from a string or symbolic form. An unparseable locale
    /// is rejected here.
    pub fn locale(mut self, locale: impl AsRef<str>) -> Result<Self> {
        self.options.locale = Some(Locale::parse(locale.as_ref())?);
        Ok(self)
    }

    /// Set the break kind from its name. Anything but
    /// `grapheme`/`word`/`sentence`/`line` is rejected.
    pub fn break_kind(mut self, kind: impl AsRef<str>) -> Result<Self> {
        self.options.break_kind = kind.as_ref().parse()?;
        Ok(self)
    }

    /// Set the break kind directly.
    pub fn kind(mut self, kind: BreakKind) -> Self {
        self.options.break_kind = kind;
        self
    }

    /// Enable or disable sentence suppressions (default enabled).
    pub fn suppressions(mut self, enabled: bool) -> Self {
        self.options.suppressions = Some(enabled);
        self
    }

    /// Enable or disable whitespace trimming (default disabled).
    pub fn trim(mut self, enabled: bool) -> Self {
        self.options.trim = enabled;
        self
    }

    /// Validate and build the options.
    pub fn build(self) -> Result<Options> {
        if self.options.suppressions.is_some() && self.options.break_kind != BreakKind::Sentence {
            // Suppressions only affect sentence breaking; an explicit choice
            // anywhere else is a configuration mistake worth flagging.
            return Err(ApiError::Config(
                "suppressions only apply to sentence breaking".to_string(),
            ));
        }
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.break_kind(), BreakKind::Word);
        assert!(options.locale().is_none());
        let segment_options = options.segment_options();
        assert!(segment_options.suppressions);
        assert!(!segment_options.trim);
    }

    #[test]
    fn test_break_kind_parsing() {
        assert_eq!("sentence".parse::<BreakKind>().unwrap(), BreakKind::Sentence);
        match "paragraph".parse::<BreakKind>() {
            Err(CoreError::InvalidBreakKind(kind)) => assert_eq!(kind, "paragraph"),
            other => panic!("expected InvalidBreakKind, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_rejects_bad_locale() {
        assert!(Options::builder().locale("not a locale!").is_err());
    }

    #[test]
    fn test_builder_roundtrip() {
        let options = Options::builder()
            .locale("en-US")
            .unwrap()
            .break_kind("sentence")
            .unwrap()
            .trim(true)
            .build()
            .unwrap();
        assert_eq!(options.break_kind(), BreakKind::Sentence);
        assert_eq!(options.locale().unwrap().canonical_name(), "en-US");
        assert!(options.segment_options().trim);
    }

    #[test]
    fn test_builder_flags_suppressions_outside_sentences() {
        let result = Options::builder()
            .kind(BreakKind::Word)
            .suppressions(true)
            .build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }
}
