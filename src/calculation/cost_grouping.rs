//! Grouping of additional costs by item name.
//!
//! Entries with identical item names (exact, case- and whitespace-sensitive
//! string equality) collapse into one [`CostGroup`]. Groups keep the order in
//! which their item name was first seen.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AdditionalCostEntry;

/// Additional costs that share one item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostGroup {
    /// The shared item name.
    pub item: String,
    /// Every amount recorded for the item, in insertion order.
    pub amounts: Vec<Decimal>,
    /// Distinct payment methods, in first-seen order.
    pub payment_methods: Vec<String>,
}

impl CostGroup {
    fn from_entry(entry: &AdditionalCostEntry) -> Self {
        Self {
            item: entry.item.clone(),
            amounts: vec![entry.amount],
            payment_methods: vec![entry.payment_method.clone()],
        }
    }

    fn absorb(&mut self, other: &CostGroup) {
        self.amounts.extend_from_slice(&other.amounts);
        for method in &other.payment_methods {
            if !self.payment_methods.contains(method) {
                self.payment_methods.push(method.clone());
            }
        }
    }

    /// The arithmetic sum of all amounts.
    pub fn total(&self) -> Decimal {
        self.amounts.iter().copied().sum()
    }

    /// Payment methods joined one per line, as printed on the report.
    pub fn payment_method_text(&self) -> String {
        self.payment_methods.join("\n")
    }

    /// The addition formula for a group with several amounts.
    ///
    /// Returns `None` for a single amount, which is written as a literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_paperwork::calculation::group_additional_costs;
    /// use trip_paperwork::models::AdditionalCostEntry;
    /// use rust_decimal::Decimal;
    ///
    /// let groups = group_additional_costs(&[
    ///     AdditionalCostEntry::new("숙박비", "법인카드", Decimal::from(80_000)),
    ///     AdditionalCostEntry::new("숙박비", "개인카드", Decimal::from(45_000)),
    /// ]);
    /// assert_eq!(groups[0].summation_formula().as_deref(), Some("=80000+45000"));
    /// assert_eq!(groups[0].total(), Decimal::from(125_000));
    /// ```
    pub fn summation_formula(&self) -> Option<String> {
        if self.amounts.len() < 2 {
            return None;
        }
        let terms: Vec<String> = self
            .amounts
            .iter()
            .map(|amount| amount.normalize().to_string())
            .collect();
        Some(format!("={}", terms.join("+")))
    }
}

#[derive(Default)]
struct CostGrouper {
    groups: Vec<CostGroup>,
    index: HashMap<String, usize>,
}

impl CostGrouper {
    fn absorb(&mut self, group: &CostGroup) {
        match self.index.get(&group.item) {
            Some(&position) => self.groups[position].absorb(group),
            None => {
                self.index.insert(group.item.clone(), self.groups.len());
                self.groups.push(group.clone());
            }
        }
    }

    fn finish(self) -> Vec<CostGroup> {
        self.groups
    }
}

/// Groups additional cost entries by exact item name.
///
/// The result is ordered by each item name's first appearance. No
/// normalization is applied: `"숙박비"` and `"숙박비 "` are different items.
pub fn group_additional_costs(entries: &[AdditionalCostEntry]) -> Vec<CostGroup> {
    let mut grouper = CostGrouper::default();
    for entry in entries {
        grouper.absorb(&CostGroup::from_entry(entry));
    }
    grouper.finish()
}

/// Groups already-grouped costs again.
///
/// Merges groups that share an item name; for the output of
/// [`group_additional_costs`] this returns an identical list.
pub fn regroup(groups: &[CostGroup]) -> Vec<CostGroup> {
    let mut grouper = CostGrouper::default();
    for group in groups {
        grouper.absorb(group);
    }
    grouper.finish()
}
