//! Break rules and the rule evaluator
//!
//! A compiled rule set is an ordered list of `(id, left, operator, right)`
//! records. Evaluation walks the list once per boundary: the first rule whose
//! end-anchored left regex matches the tail of `before` and whose
//! start-anchored right regex matches the head of `after` decides whether the
//! position is a break. When nothing fires, the implicit final rule breaks
//! off one codepoint.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// The two rule operators: `÷` marks a boundary, `×` forbids one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOp {
    /// `÷` — a segment boundary lies between `before` and `after`
    Break,
    /// `×` — the text continues across this position
    NoBreak,
}

/// Rational rule identifier, e.g. `8`, `8.1`, `10.5`.
///
/// Ids compare numerically (`10.5` sorts between `10.45` and `11`, and
/// `1.50` equals `1.5`); fractional ids exist so synthesized rules can be
/// slotted between standard ones without renumbering.
#[derive(Debug, Clone)]
pub struct RuleId {
    text: String,
    major: u64,
    fraction: Vec<u8>,
}

impl RuleId {
    /// Parse a decimal rule id. Returns `None` for anything that is not
    /// `digits` or `digits.digits`.
    pub fn parse(text: &str) -> Option<Self> {
        let (major_part, frac_part) = match text.split_once('.') {
            Some((m, f)) => (m, Some(f)),
            None => (text, None),
        };
        if major_part.is_empty() || !major_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let major = major_part.parse().ok()?;
        let fraction = match frac_part {
            Some(f) if !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()) => {
                f.bytes().map(|b| b - b'0').collect()
            }
            Some(_) => return None,
            None => Vec::new(),
        };
        Some(Self {
            text: text.to_string(),
            major,
            fraction,
        })
    }

    /// The id exactly as written in the data file.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Ord for RuleId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major.cmp(&other.major).then_with(|| {
            // Compare fractions as decimal expansions: .5 > .45
            let len = self.fraction.len().max(other.fraction.len());
            for i in 0..len {
                let a = self.fraction.get(i).copied().unwrap_or(0);
                let b = other.fraction.get(i).copied().unwrap_or(0);
                match a.cmp(&b) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                }
            }
            Ordering::Equal
        })
    }
}

impl PartialOrd for RuleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RuleId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RuleId {}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One side of a compiled rule.
#[derive(Debug, Clone)]
pub enum Side {
    /// The side was absent in the rule text; matches the empty string.
    Any,
    /// A compiled, anchored regex.
    Pattern(Regex),
}

impl Side {
    fn is_any(&self) -> bool {
        matches!(self, Side::Any)
    }
}

/// A compiled break rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Rational id; lower ids fire first.
    pub id: RuleId,
    /// Break or no-break.
    pub op: BreakOp,
    /// End-anchored left context.
    pub left: Side,
    /// Start-anchored right context.
    pub right: Side,
}

/// The outcome of evaluating one boundary position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<'t> {
    /// The firing rule's operator (or `Break` for the implicit default).
    pub op: BreakOp,
    /// The prefix of `after` consumed by the right context.
    pub consumed: &'t str,
    /// What remains of `after` past `consumed`.
    pub remainder: &'t str,
}

/// An ordered rule list for one `(locale, segment kind)`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set, sorting by id ascending.
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| a.id.cmp(&b.id));
        Self { rules }
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Decide whether a boundary lies between `before` and `after`.
    ///
    /// Rules fire in id order; a rule with both sides absent is degenerate
    /// and skipped. End of text is always a break. When no rule fires, the
    /// implicit final rule breaks off the first codepoint of `after`.
    pub fn evaluate<'t>(&self, before: &str, after: &'t str) -> Decision<'t> {
        if after.is_empty() {
            return Decision {
                op: BreakOp::Break,
                consumed: "",
                remainder: "",
            };
        }

        for rule in &self.rules {
            if rule.left.is_any() && rule.right.is_any() {
                continue;
            }
            let left_matches = match &rule.left {
                Side::Any => true,
                Side::Pattern(re) => re.is_match(before),
            };
            if !left_matches {
                continue;
            }
            let consumed = match &rule.right {
                Side::Any => first_codepoint(after),
                Side::Pattern(re) => match re.find(after) {
                    Some(m) => &after[..m.end()],
                    None => continue,
                },
            };
            return Decision {
                op: rule.op,
                consumed,
                remainder: &after[consumed.len()..],
            };
        }

        let consumed = first_codepoint(after);
        Decision {
            op: BreakOp::Break,
            consumed,
            remainder: &after[consumed.len()..],
        }
    }
}

/// The first codepoint of `text` as a subslice (empty input yields "").
pub fn first_codepoint(text: &str) -> &str {
    match text.chars().next() {
        Some(ch) => &text[..ch.len_utf8()],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn side(pattern: &str) -> Side {
        Side::Pattern(
            RegexBuilder::new(pattern)
                .ignore_whitespace(true)
                .dot_matches_new_line(true)
                .build()
                .unwrap(),
        )
    }

    fn rule(id: &str, op: BreakOp, left: Side, right: Side) -> Rule {
        Rule {
            id: RuleId::parse(id).unwrap(),
            op,
            left,
            right,
        }
    }

    #[test]
    fn test_rule_id_parse() {
        assert_eq!(RuleId::parse("8").unwrap().as_str(), "8");
        assert_eq!(RuleId::parse("10.5").unwrap().as_str(), "10.5");
        assert!(RuleId::parse("").is_none());
        assert!(RuleId::parse("a.b").is_none());
        assert!(RuleId::parse("1.").is_none());
    }

    #[test]
    fn test_rule_id_ordering_is_numeric() {
        let mut ids: Vec<RuleId> = ["11", "10.5", "10.45", "9", "10"]
            .iter()
            .map(|s| RuleId::parse(s).unwrap())
            .collect();
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(sorted, vec!["9", "10", "10.45", "10.5", "11"]);
    }

    #[test]
    fn test_evaluate_end_of_text_breaks() {
        let set = RuleSet::new(vec![]);
        let decision = set.evaluate("abc", "");
        assert_eq!(decision.op, BreakOp::Break);
        assert_eq!(decision.consumed, "");
        assert_eq!(decision.remainder, "");
    }

    #[test]
    fn test_evaluate_default_rule_splits_one_codepoint() {
        let set = RuleSet::new(vec![]);
        let decision = set.evaluate("a", "héllo");
        assert_eq!(decision.op, BreakOp::Break);
        assert_eq!(decision.consumed, "h");
        assert_eq!(decision.remainder, "éllo");
    }

    #[test]
    fn test_evaluate_first_matching_rule_wins() {
        let set = RuleSet::new(vec![
            rule("2", BreakOp::Break, side(r"b$"), Side::Any),
            rule("1", BreakOp::NoBreak, side(r"a$"), side(r"\A b")),
        ]);
        // Rule 1 sorts first and fires.
        let decision = set.evaluate("xa", "bc");
        assert_eq!(decision.op, BreakOp::NoBreak);
        assert_eq!(decision.consumed, "b");
        assert_eq!(decision.remainder, "c");
    }

    #[test]
    fn test_evaluate_right_side_consumes_match() {
        let set = RuleSet::new(vec![rule(
            "1",
            BreakOp::NoBreak,
            Side::Any,
            side(r"\A ab+"),
        )]);
        let decision = set.evaluate("x", "abbbz");
        assert_eq!(decision.consumed, "abbb");
        assert_eq!(decision.remainder, "z");
    }

    #[test]
    fn test_evaluate_any_right_consumes_one_codepoint() {
        let set = RuleSet::new(vec![rule("1", BreakOp::Break, side(r"a$"), Side::Any)]);
        let decision = set.evaluate("a", "日本");
        assert_eq!(decision.op, BreakOp::Break);
        assert_eq!(decision.consumed, "日");
        assert_eq!(decision.remainder, "本");
    }

    #[test]
    fn test_degenerate_rule_skipped() {
        let set = RuleSet::new(vec![rule("1", BreakOp::NoBreak, Side::Any, Side::Any)]);
        let decision = set.evaluate("a", "bc");
        // Falls through to the implicit break.
        assert_eq!(decision.op, BreakOp::Break);
        assert_eq!(decision.consumed, "b");
    }
}
