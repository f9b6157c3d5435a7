//! # Price Rule Resolver
//!
//! Pair-dependent price overrides and the pure functions that resolve the
//! contributing price of each selected option.
//!
//! ## Resolution
//! ```text
//! For a selected option O and price rules R (already filtered to rules
//! whose target AND dependent are both in the selection):
//!
//!   first r in R with r.dependent_option_id == O.id
//!                 and r.target_option_id selected   -> O contributes r.price
//!   no such rule                                    -> O contributes O.base_price
//!   O inactive                                      -> O contributes 0
//! ```
//!
//! When several rules could fire for the same option through different
//! simultaneously-selected counterparts, the first match in rule iteration
//! order wins. Stores hand rules over in creation order, which makes the
//! tie-break stable, but it remains a data-modeling gap rather than a
//! business rule: creation only enforces uniqueness per (target, dependent)
//! pair, not per target.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{OptionSet, ProductOption};

/// A directed price override: selecting the dependent option together with
/// the target changes the price the dependent contributes.
///
/// At most one active rule may exist per (target, dependent) pair; creation
/// rejects duplicates and self-pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionPriceRule {
    pub id: String,
    pub price: Money,
    pub target_option_id: String,
    pub dependent_option_id: String,
    pub is_active: bool,
}

impl OptionPriceRule {
    pub fn new(
        id: impl Into<String>,
        target_option_id: impl Into<String>,
        dependent_option_id: impl Into<String>,
        price: Money,
    ) -> Self {
        OptionPriceRule {
            id: id.into(),
            price,
            target_option_id: target_option_id.into(),
            dependent_option_id: dependent_option_id.into(),
            is_active: true,
        }
    }
}

/// First rule that fires for `option` within the selection, if any.
pub fn applicable_rule<'a>(
    rules: &'a [OptionPriceRule],
    option: &ProductOption,
    selected: &OptionSet,
) -> Option<&'a OptionPriceRule> {
    rules.iter().find(|rule| {
        rule.dependent_option_id == option.id && selected.contains(&rule.target_option_id)
    })
}

/// The price one selected option contributes to the configuration.
pub fn resolve_option_price(
    option: &ProductOption,
    selected: &OptionSet,
    rules: &[OptionPriceRule],
) -> Money {
    if !option.is_active {
        return Money::zero();
    }

    match applicable_rule(rules, option, selected) {
        Some(rule) => rule.price,
        None => option.base_price,
    }
}

/// Sum of resolved prices over every option in the selection.
pub fn options_price(selected: &OptionSet, rules: &[OptionPriceRule]) -> Money {
    selected
        .iter()
        .map(|option| resolve_option_price(option, selected, rules))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(id: &str, cents: i64) -> ProductOption {
        ProductOption::new(id, "g", id, id, Money::from_cents(cents))
    }

    #[test]
    fn rule_applies_when_option_is_dependent_and_target_selected() {
        let rule = OptionPriceRule::new("pr", "target", "dependent", Money::from_cents(5000));
        let selected = OptionSet::from_options(vec![opt("dependent", 13_000), opt("target", 4000)]);
        let dependent = selected.get("dependent").unwrap().clone();

        let found = applicable_rule(std::slice::from_ref(&rule), &dependent, &selected);
        assert_eq!(found.map(|r| r.id.as_str()), Some("pr"));
    }

    #[test]
    fn rule_skipped_when_option_is_not_the_dependent() {
        let rule = OptionPriceRule::new("pr", "target", "dependent", Money::from_cents(5000));
        let selected = OptionSet::from_options(vec![opt("other", 1000), opt("target", 4000)]);
        let other = selected.get("other").unwrap().clone();

        assert!(applicable_rule(std::slice::from_ref(&rule), &other, &selected).is_none());
    }

    #[test]
    fn rule_skipped_when_target_not_selected() {
        let rule = OptionPriceRule::new("pr", "target", "dependent", Money::from_cents(5000));
        let selected = OptionSet::from_options(vec![opt("dependent", 13_000)]);
        let dependent = selected.get("dependent").unwrap().clone();

        assert!(applicable_rule(std::slice::from_ref(&rule), &dependent, &selected).is_none());
    }

    #[test]
    fn override_replaces_base_price_in_sum() {
        // The dependent is the option whose price changes. o1 (130.00) is
        // the dependent here, so the pair prices at 50.00 + 40.00 = 90.00,
        // not 170.00.
        let o1 = opt("o1", 13_000);
        let o3 = opt("o3", 4000);
        let rules = vec![OptionPriceRule::new(
            "pr",
            "o3",
            "o1",
            Money::from_cents(5000),
        )];
        let selected = OptionSet::from_options(vec![o1, o3]);

        assert_eq!(options_price(&selected, &rules).cents(), 9000);
    }

    #[test]
    fn no_rules_sums_base_prices() {
        let selected = OptionSet::from_options(vec![opt("a", 3500), opt("b", 8000)]);
        assert_eq!(options_price(&selected, &[]).cents(), 11_500);
    }

    #[test]
    fn inactive_option_contributes_zero() {
        let mut dead = opt("dead", 9900);
        dead.is_active = false;
        let selected = OptionSet::from_options(vec![dead]);

        assert!(options_price(&selected, &[]).is_zero());
    }

    #[test]
    fn empty_selection_prices_at_zero() {
        let selected = OptionSet::default();
        assert!(options_price(&selected, &[]).is_zero());
    }

    #[test]
    fn first_matching_rule_wins() {
        // Two rules fire for the same dependent through different targets;
        // iteration order decides.
        let rules = vec![
            OptionPriceRule::new("pr1", "t1", "dep", Money::from_cents(1000)),
            OptionPriceRule::new("pr2", "t2", "dep", Money::from_cents(2000)),
        ];
        let selected =
            OptionSet::from_options(vec![opt("dep", 9000), opt("t1", 0), opt("t2", 0)]);
        let dep = selected.get("dep").unwrap().clone();

        let winner = applicable_rule(&rules, &dep, &selected).unwrap();
        assert_eq!(winner.id, "pr1");
        assert_eq!(resolve_option_price(&dep, &selected, &rules).cents(), 1000);
    }
}
