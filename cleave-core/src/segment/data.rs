//! Segmentation data loader
//!
//! Parses the per-locale segmentation data files (embedded at compile time)
//! into a process-wide catalog mapping `(locale, segment kind)` to raw
//! variables, rules, and suppressions. The catalog is built once on first
//! use and is immutable afterwards.

use crate::error::{CoreError, Result};
use crate::locale::ancestor_chain;
use crate::segment::SegmentKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Raw (uncompiled) data for one `(locale, segment kind)`.
#[derive(Debug, Clone, Default)]
pub struct RawSegmentData {
    /// `($Name, pattern)` pairs in declaration order.
    pub variables: Vec<(String, String)>,
    /// `(id, rule text)` pairs as written in the data file.
    pub rules: Vec<(String, String)>,
    /// Literal abbreviation strings for sentence-break suppression.
    pub suppressions: Vec<String>,
}

impl RawSegmentData {
    fn absorb(&mut self, other: &RawSegmentData) {
        self.variables.extend(other.variables.iter().cloned());
        self.rules.extend(other.rules.iter().cloned());
        self.suppressions.extend(other.suppressions.iter().cloned());
    }
}

macro_rules! embed_segment_data {
    ($stem:expr) => {
        (
            $stem,
            include_str!(concat!("../../data/segments/", $stem, ".xml")),
        )
    };
}

/// The packaged segmentation data. File stems use `_` where canonical locale
/// ids use `-`.
static SEGMENT_FILES: &[(&str, &str)] = &[
    embed_segment_data!("root"),
    embed_segment_data!("en"),
    embed_segment_data!("de"),
    embed_segment_data!("fr"),
    embed_segment_data!("fi"),
    embed_segment_data!("el"),
    embed_segment_data!("ja"),
];

// Serde shapes for the XML data files:
// <segmentations>
//   <segmentation type="WordBreak">
//     <variables><variable id="$CR">\p{Word_Break=CR}</variable>…</variables>
//     <rules><rule id="3">$CR × $LF</rule>…</rules>
//     <suppressions><suppression>Mr.</suppression>…</suppressions>
//   </segmentation>
// </segmentations>

#[derive(Debug, Deserialize)]
struct SegmentationFile {
    #[serde(rename = "segmentation", default)]
    segmentations: Vec<SegmentationNode>,
}

#[derive(Debug, Deserialize)]
struct SegmentationNode {
    #[serde(rename = "@type")]
    kind: String,
    #[serde(default)]
    variables: VariablesNode,
    #[serde(default)]
    rules: RulesNode,
    #[serde(default)]
    suppressions: SuppressionsNode,
}

#[derive(Debug, Default, Deserialize)]
struct VariablesNode {
    #[serde(rename = "variable", default)]
    items: Vec<VariableNode>,
}

#[derive(Debug, Deserialize)]
struct VariableNode {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "$text")]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct RulesNode {
    #[serde(rename = "rule", default)]
    items: Vec<RuleNode>,
}

#[derive(Debug, Deserialize)]
struct RuleNode {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "$text")]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct SuppressionsNode {
    #[serde(rename = "suppression", default)]
    items: Vec<String>,
}

/// The parsed, immutable segmentation catalog.
pub(crate) struct Catalog {
    locales: HashMap<String, HashMap<SegmentKind, RawSegmentData>>,
}

impl Catalog {
    fn parse_embedded() -> std::result::Result<Self, String> {
        let mut locales = HashMap::new();
        for (stem, content) in SEGMENT_FILES {
            let file: SegmentationFile = quick_xml::de::from_str(content)
                .map_err(|e| format!("failed to parse segments/{stem}.xml: {e}"))?;
            let locale_id = stem.replace('_', "-");
            let mut kinds: HashMap<SegmentKind, RawSegmentData> = HashMap::new();
            for node in file.segmentations {
                let kind = SegmentKind::from_data_name(&node.kind).ok_or_else(|| {
                    format!("segments/{stem}.xml: unrecognized segmentation type {:?}", node.kind)
                })?;
                let data = RawSegmentData {
                    variables: node
                        .variables
                        .items
                        .into_iter()
                        .map(|v| (v.id, v.value))
                        .collect(),
                    rules: node.rules.items.into_iter().map(|r| (r.id, r.value)).collect(),
                    suppressions: node.suppressions.items,
                };
                if kinds.insert(kind, data).is_some() {
                    return Err(format!(
                        "segments/{stem}.xml: duplicate {kind} segmentation"
                    ));
                }
            }
            locales.insert(locale_id, kinds);
        }
        Ok(Self { locales })
    }

    /// The set of locales that ship segmentation data.
    pub(crate) fn known_locales(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.locales.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// All segment data for one locale.
    pub(crate) fn segments(
        &self,
        locale: &str,
    ) -> Result<&HashMap<SegmentKind, RawSegmentData>> {
        self.locales
            .get(locale)
            .ok_or_else(|| CoreError::UnknownLocale(locale.to_string()))
    }

    /// Segment data for one `(locale, kind)`.
    pub(crate) fn segments_of_kind(
        &self,
        locale: &str,
        kind: SegmentKind,
    ) -> Result<&RawSegmentData> {
        self.segments(locale)?
            .get(&kind)
            .ok_or(CoreError::UnknownSegmentKind {
                locale: locale.to_string(),
                kind,
            })
    }

    /// Effective data for `(locale, kind)`: the concatenation of every
    /// ancestor's data, root first and the most specific locale last, so
    /// locale definitions shadow root definitions at substitution time.
    pub(crate) fn merged(&self, locale: &str, kind: SegmentKind) -> Result<RawSegmentData> {
        let mut merged = RawSegmentData::default();
        let mut found = false;
        for ancestor in ancestor_chain(locale).iter().rev() {
            if let Some(kinds) = self.locales.get(ancestor) {
                if let Some(data) = kinds.get(&kind) {
                    merged.absorb(data);
                    found = true;
                }
            }
        }
        if found {
            Ok(merged)
        } else {
            Err(CoreError::UnknownSegmentKind {
                locale: locale.to_string(),
                kind,
            })
        }
    }
}

/// The process-wide catalog, parsed from the embedded data on first use.
pub(crate) fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        Catalog::parse_embedded().expect("embedded segmentation data must parse")
    })
}

/// The locales that ship segmentation data, sorted.
pub fn known_locales() -> Vec<&'static str> {
    catalog().known_locales()
}

/// Whether a canonical locale id ships segmentation data.
pub fn is_known_locale(locale: &str) -> bool {
    catalog().contains(locale)
}

/// All raw segment data for one locale, keyed by kind.
pub fn segments(locale: &str) -> Result<&'static HashMap<SegmentKind, RawSegmentData>> {
    catalog().segments(locale)
}

/// Raw segment data for one `(locale, kind)`.
pub fn segments_of_kind(locale: &str, kind: SegmentKind) -> Result<&'static RawSegmentData> {
    catalog().segments_of_kind(locale, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_locales_includes_root_and_en() {
        let locales = catalog().known_locales();
        assert!(locales.contains(&"root"));
        assert!(locales.contains(&"en"));
    }

    #[test]
    fn test_root_carries_all_four_kinds() {
        let kinds = catalog().segments("root").unwrap();
        for kind in [
            SegmentKind::GraphemeCluster,
            SegmentKind::Word,
            SegmentKind::Sentence,
            SegmentKind::Line,
        ] {
            assert!(kinds.contains_key(&kind), "root is missing {kind}");
        }
    }

    #[test]
    fn test_unknown_locale_query() {
        match catalog().segments("xx") {
            Err(CoreError::UnknownLocale(id)) => assert_eq!(id, "xx"),
            other => panic!("expected UnknownLocale, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_segment_kind_query() {
        // en ships only sentence suppressions.
        match catalog().segments_of_kind("en", SegmentKind::GraphemeCluster) {
            Err(CoreError::UnknownSegmentKind { locale, kind }) => {
                assert_eq!(locale, "en");
                assert_eq!(kind, SegmentKind::GraphemeCluster);
            }
            other => panic!("expected UnknownSegmentKind, got {other:?}"),
        }
    }

    #[test]
    fn test_merged_concatenates_root_then_locale() {
        let root = catalog()
            .merged("root", SegmentKind::Sentence)
            .unwrap();
        let en = catalog().merged("en", SegmentKind::Sentence).unwrap();
        // en inherits every root rule and adds its suppressions on top.
        assert_eq!(root.rules, en.rules);
        assert!(root.suppressions.is_empty());
        assert!(en.suppressions.iter().any(|s| s == "Mr."));
    }

    #[test]
    fn test_merged_falls_back_through_chain() {
        // No el line data ships, so the merge for el is exactly root's.
        let root = catalog().merged("root", SegmentKind::Line).unwrap();
        let el = catalog().merged("el", SegmentKind::Line).unwrap();
        assert_eq!(root.rules.len(), el.rules.len());
    }

    #[test]
    fn test_variables_preserve_declaration_order() {
        let root = catalog()
            .merged("root", SegmentKind::GraphemeCluster)
            .unwrap();
        let cr = root.variables.iter().position(|(n, _)| n == "$CR");
        let lf = root.variables.iter().position(|(n, _)| n == "$LF");
        assert!(cr.unwrap() < lf.unwrap());
    }
}
