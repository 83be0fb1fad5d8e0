//! Rule compilation
//!
//! Turns raw segment data into executable [`RuleSet`]s: expands `$Name`
//! variable references in declaration order, splits each rule on its single
//! `÷`/`×` operator, anchors the left side at end-of-string and the right
//! side at start-of-string, and compiles both sides under Unicode mode with
//! whitespace-insensitive patterns. Sentence rule sets optionally gain a
//! synthesized suppression rule built from the locale's abbreviation list.
//!
//! Compiled sets are cached per `(locale, kind, suppressions)`; a data error
//! is returned on every lookup for the affected pair and never cached.

use crate::error::{CoreError, Result};
use crate::segment::data::{catalog, RawSegmentData};
use crate::segment::rule::{BreakOp, Rule, RuleId, RuleSet, Side};
use crate::segment::SegmentKind;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Id of the synthesized sentence-suppression rule: fires between the
/// structural no-break rules (9, 10) and the terminal break rule (11).
const SUPPRESSION_RULE_ID: &str = "10.5";

type CacheKey = (String, SegmentKind, bool);

fn cache() -> &'static Mutex<HashMap<CacheKey, Arc<RuleSet>>> {
    static CACHE: OnceLock<Mutex<HashMap<CacheKey, Arc<RuleSet>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// The compiled rule set for a resolved `(locale, kind)`, with or without
/// the synthesized suppression rule.
pub(crate) fn rule_set(
    locale: &str,
    kind: SegmentKind,
    suppressions: bool,
) -> Result<Arc<RuleSet>> {
    let key = (locale.to_string(), kind, suppressions);
    if let Some(set) = cache().lock().expect("rule cache poisoned").get(&key) {
        return Ok(Arc::clone(set));
    }

    let mut raw = catalog().merged(locale, kind)?;
    if kind == SegmentKind::Sentence && suppressions {
        synthesize_suppression_rule(&mut raw);
    }
    let set = Arc::new(compile(&raw)?);

    cache()
        .lock()
        .expect("rule cache poisoned")
        .insert(key, Arc::clone(&set));
    Ok(set)
}

/// Compile merged raw data into an ordered rule set.
pub(crate) fn compile(raw: &RawSegmentData) -> Result<RuleSet> {
    let variables = expand_variables(&raw.variables)?;
    let mut rules = Vec::with_capacity(raw.rules.len());
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (id_text, rule_text) in &raw.rules {
        let rule = compile_rule(id_text, rule_text, &variables)?;
        // A locale re-stating an id replaces the inherited rule.
        match seen.get(id_text) {
            Some(&idx) => rules[idx] = rule,
            None => {
                seen.insert(id_text.clone(), rules.len());
                rules.push(rule);
            }
        }
    }
    Ok(RuleSet::new(rules))
}

/// Expand the declaration-ordered variable list into a name → pattern map.
///
/// Each definition is substituted against the map built so far, so later
/// variables may reference earlier ones and forward references fail as
/// unresolved. Re-definition shadows: the most recent value wins for all
/// subsequent substitutions.
fn expand_variables(variables: &[(String, String)]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for (name, value) in variables {
        let expanded = substitute(value, &map)?;
        map.insert(name.clone(), expanded);
    }
    Ok(map)
}

fn variable_reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Variable names are `$` + ID_Start ID_Continue* (the shipped data stays
    // within ASCII, but the grammar is the full Unicode identifier one).
    RE.get_or_init(|| Regex::new(r"\$\p{ID_Start}\p{ID_Continue}*").expect("must compile"))
}

/// Replace every `$Name` reference in `pattern` with its expansion.
///
/// Substitution is textual; a multi-term expansion is wrapped in `(?:…)` so
/// a following quantifier binds the whole variable, while set-valued and
/// already-grouped expansions are inserted verbatim and remain legal inside
/// character classes.
fn substitute(pattern: &str, variables: &HashMap<String, String>) -> Result<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut last = 0;
    for reference in variable_reference().find_iter(pattern) {
        out.push_str(&pattern[last..reference.start()]);
        let name = reference.as_str();
        let expansion = variables
            .get(name)
            .ok_or_else(|| CoreError::VariableNotFound {
                name: name.to_string(),
                context: pattern.to_string(),
            })?;
        if is_atom(expansion) {
            out.push_str(expansion);
        } else {
            out.push_str("(?:");
            out.push_str(expansion);
            out.push(')');
        }
        last = reference.end();
    }
    out.push_str(&pattern[last..]);
    Ok(out)
}

/// Whether `pattern` is a single regex unit: one `\p{…}`/`\P{…}` escape, one
/// (possibly nested) character class, or one parenthesized group.
fn is_atom(pattern: &str) -> bool {
    let trimmed = pattern.trim();
    let bytes = trimmed.as_bytes();
    if trimmed.len() < 2 {
        return false;
    }
    match bytes[0] {
        b'\\' => {
            (trimmed.starts_with(r"\p{") || trimmed.starts_with(r"\P{"))
                && trimmed.ends_with('}')
                && !trimmed[..trimmed.len() - 1].contains('}')
        }
        b'[' => delimited_span(trimmed, b'[', b']') == Some(trimmed.len()),
        b'(' => delimited_span(trimmed, b'(', b')') == Some(trimmed.len()),
        _ => false,
    }
}

/// Byte length of the balanced `open…close` span starting at byte 0, honoring
/// backslash escapes. Returns `None` when unbalanced.
fn delimited_span(pattern: &str, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (idx, byte) in pattern.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        if byte == b'\\' {
            escaped = true;
        } else if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                return Some(idx + 1);
            }
        }
    }
    None
}

/// Split a rule on its operator and compile both sides.
fn compile_rule(
    id_text: &str,
    rule_text: &str,
    variables: &HashMap<String, String>,
) -> Result<Rule> {
    let id = RuleId::parse(id_text).ok_or_else(|| CoreError::InvalidRule {
        id: id_text.to_string(),
        text: rule_text.to_string(),
    })?;

    let substituted = substitute(rule_text.trim(), variables)?;
    let mut operators = substituted
        .char_indices()
        .filter(|(_, ch)| *ch == '÷' || *ch == '×');
    let (op_idx, op_char) = operators.next().ok_or_else(|| CoreError::InvalidRule {
        id: id_text.to_string(),
        text: rule_text.to_string(),
    })?;
    if operators.next().is_some() {
        return Err(CoreError::InvalidRule {
            id: id_text.to_string(),
            text: rule_text.to_string(),
        });
    }

    let op = if op_char == '÷' {
        BreakOp::Break
    } else {
        BreakOp::NoBreak
    };
    let left_text = substituted[..op_idx].trim();
    let right_text = substituted[op_idx + op_char.len_utf8()..].trim();

    let left = if left_text.is_empty() {
        Side::Any
    } else {
        Side::Pattern(build_regex(&format!("(?:{left_text})$"), left_text)?)
    };
    let right = if right_text.is_empty() {
        Side::Any
    } else {
        Side::Pattern(build_regex(&format!(r"\A(?:{right_text})"), right_text)?)
    };

    Ok(Rule {
        id,
        op,
        left,
        right,
    })
}

/// Compile one anchored rule side: Unicode mode (crate default), extended
/// whitespace-insensitive syntax, dot matching newlines, `$` as end-of-text.
fn build_regex(anchored: &str, fragment: &str) -> Result<Regex> {
    RegexBuilder::new(anchored)
        .ignore_whitespace(true)
        .dot_matches_new_line(true)
        .build()
        .map_err(|source| CoreError::RegexCompile {
            fragment: fragment.to_string(),
            source,
        })
}

/// Append the synthesized no-break rule for the locale's abbreviation list.
///
/// `$Suppressions` becomes a case-insensitive alternation of the escaped
/// literals; the rule's left context is
/// `$SpacesBefore? $Suppressions $Close* $Sp* $ParaSep?` in end-anchored
/// form, and the right side is absent.
fn synthesize_suppression_rule(raw: &mut RawSegmentData) {
    if raw.suppressions.is_empty() {
        return;
    }
    let mut literals: Vec<&str> = raw.suppressions.iter().map(|s| s.as_str()).collect();
    literals.sort_by_key(|s| std::cmp::Reverse(s.len()));
    let alternation = literals
        .iter()
        .map(|s| escape_literal(s))
        .collect::<Vec<_>>()
        .join("|");

    raw.variables
        .push(("$SpacesBefore".to_string(), r"[\s]".to_string()));
    raw.variables
        .push(("$Suppressions".to_string(), format!("(?i:{alternation})")));
    raw.rules.push((
        SUPPRESSION_RULE_ID.to_string(),
        "$SpacesBefore? $Suppressions ($Close $FE*)* ($Sp $FE*)* $ParaSep? ×".to_string(),
    ));
}

/// Escape a suppression literal for the extended regex syntax, where an
/// unescaped space would be stripped.
fn escape_literal(literal: &str) -> String {
    regex::escape(literal).replace(' ', r"\x20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_expand_variables_in_declaration_order() {
        let expanded = expand_variables(&vars(&[
            ("$Letter", r"\p{L}"),
            ("$Word", r"$Letter+"),
        ]))
        .unwrap();
        assert_eq!(expanded["$Word"], r"\p{L}+");
    }

    #[test]
    fn test_expand_wraps_multi_term_expansions() {
        let expanded = expand_variables(&vars(&[
            ("$Seq", r"\p{L} \p{N}*"),
            ("$Rep", r"$Seq*"),
        ]))
        .unwrap();
        assert_eq!(expanded["$Rep"], r"(?:\p{L} \p{N}*)*");
    }

    #[test]
    fn test_expand_keeps_classes_usable_inside_classes() {
        let expanded = expand_variables(&vars(&[
            ("$A", r"[ab]"),
            ("$B", r"[cd]"),
            ("$Both", r"[$A $B]"),
        ]))
        .unwrap();
        assert_eq!(expanded["$Both"], r"[[ab] [cd]]");
    }

    #[test]
    fn test_forward_reference_is_unresolved() {
        let err = expand_variables(&vars(&[("$Word", r"$Letter+"), ("$Letter", r"\p{L}")]))
            .unwrap_err();
        match err {
            CoreError::VariableNotFound { name, .. } => assert_eq!(name, "$Letter"),
            other => panic!("expected VariableNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_redefinition_shadows() {
        let expanded = expand_variables(&vars(&[
            ("$X", r"[ab]"),
            ("$X", r"[cd]"),
        ]))
        .unwrap();
        assert_eq!(expanded["$X"], r"[cd]");
    }

    #[test]
    fn test_is_atom() {
        assert!(is_atom(r"\p{L}"));
        assert!(is_atom(r"[abc]"));
        assert!(is_atom(r"[[ab][cd]]"));
        assert!(is_atom(r"(?:a b)"));
        assert!(!is_atom(r"\p{L}+"));
        assert!(!is_atom(r"[ab] [cd]"));
        assert!(!is_atom(r"a"));
    }

    #[test]
    fn test_compile_rule_splits_and_anchors() {
        let variables = expand_variables(&vars(&[("$CR", r"[\r]"), ("$LF", r"[\n]")])).unwrap();
        let rule = compile_rule("3", "$CR × $LF", &variables).unwrap();
        assert_eq!(rule.op, BreakOp::NoBreak);
        match (&rule.left, &rule.right) {
            (Side::Pattern(left), Side::Pattern(right)) => {
                assert!(left.is_match("abc\r"));
                assert!(!left.is_match("\rabc"));
                assert!(right.find("\nabc").is_some());
                assert!(right.find("abc\n").is_none());
            }
            other => panic!("expected compiled sides, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_rule_empty_sides() {
        let variables = HashMap::new();
        let rule = compile_rule("4", r"[\r\n] ÷", &variables).unwrap();
        assert_eq!(rule.op, BreakOp::Break);
        assert!(matches!(rule.right, Side::Any));
        let rule = compile_rule("5", r"÷ [\r\n]", &variables).unwrap();
        assert!(matches!(rule.left, Side::Any));
    }

    #[test]
    fn test_compile_rule_rejects_zero_or_two_operators() {
        let variables = HashMap::new();
        assert!(matches!(
            compile_rule("1", "a b", &variables),
            Err(CoreError::InvalidRule { .. })
        ));
        assert!(matches!(
            compile_rule("1", "a ÷ b × c", &variables),
            Err(CoreError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_compile_rule_bad_id() {
        let variables = HashMap::new();
        assert!(matches!(
            compile_rule("1.x", "a ÷ b", &variables),
            Err(CoreError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_compile_rule_regex_error_names_fragment() {
        let variables = HashMap::new();
        match compile_rule("1", r"[unclosed ÷", &variables) {
            Err(CoreError::RegexCompile { fragment, .. }) => {
                assert_eq!(fragment, "[unclosed");
            }
            other => panic!("expected RegexCompile, got {other:?}"),
        }
    }

    #[test]
    fn test_suppression_synthesis() {
        let mut raw = RawSegmentData {
            variables: vec![],
            rules: vec![],
            suppressions: vec!["Mr.".to_string(), "Ph.D.".to_string()],
        };
        synthesize_suppression_rule(&mut raw);
        let (_, alternation) = raw
            .variables
            .iter()
            .find(|(n, _)| n == "$Suppressions")
            .unwrap();
        assert!(alternation.contains(r"Mr\."));
        assert!(alternation.contains(r"Ph\.D\."));
        assert!(alternation.starts_with("(?i:"));
        assert_eq!(raw.rules.last().unwrap().0, SUPPRESSION_RULE_ID);
    }

    #[test]
    fn test_escape_literal_space_survives_extended_mode() {
        assert_eq!(escape_literal("a. m."), r"a\.\x20m\.");
    }

    #[test]
    fn test_rule_set_cache_returns_shared_instance() {
        let a = rule_set("root", SegmentKind::Word, true).unwrap();
        let b = rule_set("root", SegmentKind::Word, true).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_suppressed_and_plain_sets_differ() {
        let plain = rule_set("en", SegmentKind::Sentence, false).unwrap();
        let suppressed = rule_set("en", SegmentKind::Sentence, true).unwrap();
        assert_eq!(plain.rules().len() + 1, suppressed.rules().len());
    }
}
