//! # Compatibility Rule Evaluator
//!
//! Directed binary constraints between options, and the pure functions that
//! decide whether a selection satisfies them.
//!
//! ## Rule Semantics
//! ```text
//! REQUIRES    if A selected, B must be selected too
//! EXCLUDES    A and B may never be selected together
//! ONLY_ALLOWS if A selected, B must be the ONLY pick from B's group
//!             (besides A itself, if A happens to share the group)
//! ```
//!
//! Every rule kind is vacuously satisfied when its if-side option is not in
//! the selection. Overall validity is the conjunction over all rules touching
//! the selection, so evaluation short-circuits on the first violation.
//!
//! ## Closed Rule Set
//! `RuleKind` is a closed enum and every match on it is exhaustive: adding a
//! rule kind is a compile-time exercise, not a runtime default-case surprise.
//! Unrecognized rule-type strings are rejected where reference data is parsed
//! ([`RuleKind::from_str`]), which is the only place a bad kind can enter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::OptionSet;

/// The three supported compatibility constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    Requires,
    Excludes,
    OnlyAllows,
}

impl RuleKind {
    /// Wire/storage representation, matching the serde rename.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Requires => "REQUIRES",
            RuleKind::Excludes => "EXCLUDES",
            RuleKind::OnlyAllows => "ONLY_ALLOWS",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = CoreError;

    /// Parses the storage representation. An unknown string is corrupted
    /// reference data, not user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUIRES" => Ok(RuleKind::Requires),
            "EXCLUDES" => Ok(RuleKind::Excludes),
            "ONLY_ALLOWS" => Ok(RuleKind::OnlyAllows),
            other => Err(CoreError::UnknownRuleKind(other.to_string())),
        }
    }
}

/// A directed binary constraint between two options.
///
/// Reference data, edited only by catalog administration; the engine never
/// mutates rules. An `if_option_id == then_option_id` rule is vacuous but
/// tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRule {
    pub id: String,
    pub kind: RuleKind,
    pub if_option_id: String,
    pub then_option_id: String,
    pub is_active: bool,
}

impl OptionRule {
    pub fn new(
        id: impl Into<String>,
        kind: RuleKind,
        if_option_id: impl Into<String>,
        then_option_id: impl Into<String>,
    ) -> Self {
        OptionRule {
            id: id.into(),
            kind,
            if_option_id: if_option_id.into(),
            then_option_id: then_option_id.into(),
            is_active: true,
        }
    }

    /// Whether the rule references the given option on either side.
    pub fn touches(&self, option_id: &str) -> bool {
        self.if_option_id == option_id || self.then_option_id == option_id
    }
}

/// Evaluates one rule against a selection. Pure function, no I/O.
///
/// The selection must already contain group membership for every selected
/// option (it always does: an [`OptionSet`] is built from full option rows).
pub fn is_rule_valid(rule: &OptionRule, selected: &OptionSet) -> bool {
    let if_selected = selected.contains(&rule.if_option_id);
    let then_selected = selected.contains(&rule.then_option_id);

    match rule.kind {
        RuleKind::Requires => !if_selected || then_selected,

        RuleKind::Excludes => !if_selected || !then_selected,

        RuleKind::OnlyAllows => {
            if !if_selected {
                return true;
            }

            // The then-option must be resolvable from the selection; if it is
            // not there, either it was not selected or it is inactive, and
            // the constraint fails either way.
            let Some(then_option) = selected.get(&rule.then_option_id) else {
                return false;
            };

            let excluded = [rule.if_option_id.as_str(), rule.then_option_id.as_str()];
            let other_in_group = selected.group_siblings(then_option, &excluded).next();

            then_selected && other_in_group.is_none()
        }
    }
}

/// Conjunction over all supplied rules, short-circuiting on the first
/// violation.
pub fn all_rules_hold(rules: &[OptionRule], selected: &OptionSet) -> bool {
    rules.iter().all(|rule| is_rule_valid(rule, selected))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ProductOption;

    fn opt(id: &str, group: &str) -> ProductOption {
        ProductOption::new(id, group, id, id, Money::zero())
    }

    fn selection(options: &[(&str, &str)]) -> OptionSet {
        OptionSet::from_options(options.iter().map(|(id, group)| opt(id, group)))
    }

    #[test]
    fn requires_rule() {
        let rule = OptionRule::new("r", RuleKind::Requires, "a", "b");

        assert!(is_rule_valid(&rule, &selection(&[("a", "g1"), ("b", "g2")])));
        assert!(!is_rule_valid(&rule, &selection(&[("a", "g1")])));
        assert!(is_rule_valid(&rule, &selection(&[("b", "g2")])));
        assert!(is_rule_valid(&rule, &selection(&[])));
    }

    #[test]
    fn excludes_rule() {
        let rule = OptionRule::new("r", RuleKind::Excludes, "a", "b");

        assert!(!is_rule_valid(&rule, &selection(&[("a", "g1"), ("b", "g2")])));
        assert!(is_rule_valid(&rule, &selection(&[("a", "g1")])));
        assert!(is_rule_valid(&rule, &selection(&[("b", "g2")])));
        assert!(is_rule_valid(&rule, &selection(&[])));
    }

    #[test]
    fn only_allows_rule() {
        // a and b share group g; c is another g option, d is elsewhere
        let rule = OptionRule::new("r", RuleKind::OnlyAllows, "a", "b");

        // exactly the pair: fine
        assert!(is_rule_valid(&rule, &selection(&[("a", "g"), ("b", "g")])));

        // trigger selected but then-option missing: violation
        assert!(!is_rule_valid(&rule, &selection(&[("a", "g")])));

        // a third option from the same group: violation
        assert!(!is_rule_valid(
            &rule,
            &selection(&[("a", "g"), ("b", "g"), ("c", "g")])
        ));

        // extra option from a different group: fine
        assert!(is_rule_valid(
            &rule,
            &selection(&[("a", "g"), ("b", "g"), ("d", "other")])
        ));

        // trigger absent: rule inert
        assert!(is_rule_valid(&rule, &selection(&[("b", "g")])));
        assert!(is_rule_valid(&rule, &selection(&[])));
    }

    #[test]
    fn only_allows_across_groups() {
        // trigger lives in a different group than the then-option; only the
        // then-option's group is constrained
        let rule = OptionRule::new("r", RuleKind::OnlyAllows, "trigger", "b");

        assert!(is_rule_valid(
            &rule,
            &selection(&[("trigger", "g1"), ("b", "g2")])
        ));
        assert!(!is_rule_valid(
            &rule,
            &selection(&[("trigger", "g1"), ("b", "g2"), ("c", "g2")])
        ));
    }

    #[test]
    fn self_referential_rule_does_not_crash() {
        let rule = OptionRule::new("r", RuleKind::Requires, "a", "a");
        assert!(is_rule_valid(&rule, &selection(&[("a", "g")])));
        assert!(is_rule_valid(&rule, &selection(&[])));

        let rule = OptionRule::new("r", RuleKind::Excludes, "a", "a");
        // vacuous by construction: selecting a "excludes" itself
        assert!(!is_rule_valid(&rule, &selection(&[("a", "g")])));
    }

    #[test]
    fn conjunction_short_circuits_to_overall_validity() {
        let rules = vec![
            OptionRule::new("r1", RuleKind::Requires, "a", "b"),
            OptionRule::new("r2", RuleKind::Excludes, "a", "c"),
        ];

        assert!(all_rules_hold(&rules, &selection(&[("a", "g"), ("b", "g")])));
        assert!(!all_rules_hold(
            &rules,
            &selection(&[("a", "g"), ("b", "g"), ("c", "g")])
        ));
        assert!(all_rules_hold(&rules, &selection(&[])));
    }

    #[test]
    fn rule_kind_parses_storage_strings() {
        assert_eq!("REQUIRES".parse::<RuleKind>().unwrap(), RuleKind::Requires);
        assert_eq!("EXCLUDES".parse::<RuleKind>().unwrap(), RuleKind::Excludes);
        assert_eq!(
            "ONLY_ALLOWS".parse::<RuleKind>().unwrap(),
            RuleKind::OnlyAllows
        );
        assert_eq!(RuleKind::OnlyAllows.to_string(), "ONLY_ALLOWS");
    }

    #[test]
    fn unknown_rule_kind_is_a_fatal_parse_error() {
        let err = "UNEXISTENT".parse::<RuleKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unhandled rule type: UNEXISTENT");
    }
}
