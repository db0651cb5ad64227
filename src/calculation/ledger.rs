//! Ordered collections of travelers and additional costs.
//!
//! [`TripRoster`] holds priced travelers in report order and [`CostLedger`]
//! holds additional cost submissions. Both support removal by index and
//! expose the running totals shown before a report is generated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PaperworkError, PaperworkResult};
use crate::models::{AdditionalCostEntry, EmployeeTripEntry};

use super::cost_grouping::{CostGroup, group_additional_costs};

/// Travelers added to a trip, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRoster {
    entries: Vec<EmployeeTripEntry>,
}

impl TripRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a traveler, rejecting a name that is already on the roster.
    pub fn add(&mut self, entry: EmployeeTripEntry) -> PaperworkResult<()> {
        if self
            .entries
            .iter()
            .any(|existing| existing.employee_name == entry.employee_name)
        {
            return Err(PaperworkError::DuplicateEntry {
                name: entry.employee_name,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Removes and returns the traveler at `index`.
    pub fn remove(&mut self, index: usize) -> PaperworkResult<EmployeeTripEntry> {
        if index >= self.entries.len() {
            return Err(PaperworkError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Removes every traveler.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The travelers in report order.
    pub fn entries(&self) -> &[EmployeeTripEntry] {
        &self.entries
    }

    /// Number of travelers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no traveler has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every traveler's daily allowance and meal totals.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(EmployeeTripEntry::subtotal).sum()
    }
}

/// Count and sum of the submissions for one item name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTotal {
    /// Number of submissions.
    pub count: usize,
    /// Sum of their amounts.
    pub total: Decimal,
}

/// Additional cost submissions, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLedger {
    entries: Vec<AdditionalCostEntry>,
}

impl CostLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submission.
    ///
    /// The item name must not be blank and the amount must be a positive
    /// whole number of won.
    pub fn add(&mut self, entry: AdditionalCostEntry) -> PaperworkResult<()> {
        if entry.item.trim().is_empty() {
            return Err(PaperworkError::validation("item", "항목명을 입력해주세요."));
        }
        if entry.amount <= Decimal::ZERO {
            return Err(PaperworkError::validation("amount", "금액을 입력해주세요."));
        }
        if !entry.amount.fract().is_zero() {
            return Err(PaperworkError::validation(
                "amount",
                "금액은 원 단위 정수로 입력해주세요.",
            ));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Removes and returns the submission at `index`.
    pub fn remove(&mut self, index: usize) -> PaperworkResult<AdditionalCostEntry> {
        if index >= self.entries.len() {
            return Err(PaperworkError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Removes every submission.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The submissions in insertion order.
    pub fn entries(&self) -> &[AdditionalCostEntry] {
        &self.entries
    }

    /// Running count and sum for one exact item name.
    pub fn item_total(&self, item: &str) -> ItemTotal {
        self.entries
            .iter()
            .filter(|entry| entry.item == item)
            .fold(ItemTotal::default(), |acc, entry| ItemTotal {
                count: acc.count + 1,
                total: acc.total + entry.amount,
            })
    }

    /// Sum of all submissions.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|entry| entry.amount).sum()
    }

    /// The submissions grouped by item name.
    pub fn groups(&self) -> Vec<CostGroup> {
        group_additional_costs(&self.entries)
    }
}

/// Grand total of a trip: every traveler's per-diem plus every additional cost.
pub fn trip_total(employees: &[EmployeeTripEntry], costs: &[AdditionalCostEntry]) -> Decimal {
    let per_diem: Decimal = employees.iter().map(EmployeeTripEntry::subtotal).sum();
    let additional: Decimal = costs.iter().map(|cost| cost.amount).sum();
    per_diem + additional
}
