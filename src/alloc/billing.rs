//! Post-hoc bill aggregation from snapshotted consumption records.

use std::fmt;

use super::types::Household;

/// Aggregate billing figures for a completed allocation.
///
/// Computed purely from the unit costs snapshotted into each consumption at
/// draw time, so recomputing from the same assignment always yields the same
/// totals regardless of later ledger state.
#[derive(Debug, Clone)]
pub struct BillingReport {
    /// Billed cost per household, indexed by household id.
    pub household_costs: Vec<u64>,
    /// Sum of all household costs.
    pub total_cost: u64,
    /// Budget ceiling from the instance.
    pub max_bill: u64,
}

impl BillingReport {
    /// Computes the bill from finished household assignments.
    pub fn from_households(households: &[Household], max_bill: u64) -> Self {
        let household_costs: Vec<u64> = households
            .iter()
            .map(|h| h.tasks.iter().map(|t| t.cost()).sum())
            .collect();
        let total_cost = household_costs.iter().sum();
        Self {
            household_costs,
            total_cost,
            max_bill,
        }
    }

    /// Budget left after the bill; negative when the bill overshoots.
    pub fn remaining_budget(&self) -> i128 {
        self.max_bill as i128 - self.total_cost as i128
    }
}

impl fmt::Display for BillingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Billing Report ---")?;
        for (id, cost) in self.household_costs.iter().enumerate() {
            let label = format!("Household {id}:");
            writeln!(f, "{label:<18}{cost}")?;
        }
        writeln!(f, "Total bill:       {}", self.total_cost)?;
        write!(f, "Remaining budget: {}", self.remaining_budget())
    }
}
