//! Minute-slot ledger: priced timeline with per-household capacity columns.

use super::types::AllocParams;

/// Price timeline with per-household capacity accounting.
///
/// Capacity is held as explicit 2D (minute × household) vectors so the
/// ownership model is visible in the layout: households never touch each
/// other's columns, only the congestion surcharge reads across all of them.
///
/// # Examples
///
/// ```
/// use gridplan::alloc::ledger::SlotLedger;
/// use gridplan::alloc::types::AllocParams;
///
/// let ledger = SlotLedger::new(vec![5, 1, 5], &AllocParams::new(10, 100, 1), 1);
/// assert_eq!(ledger.minutes(), 3);
/// assert_eq!(ledger.effective_cost(1), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SlotLedger {
    base_costs: Vec<u64>,
    max_power: u64,
    max_concurrent: u64,
    /// `remaining[minute][household]`, each entry in `0..=max_power`.
    remaining: Vec<Vec<u64>>,
    /// `active[minute][household]`, each entry in `0..=max_concurrent`.
    active: Vec<Vec<u64>>,
}

impl SlotLedger {
    /// Creates a ledger with full capacity for every household at every slot.
    ///
    /// # Panics
    ///
    /// Panics if `base_costs` is empty or `households` is zero.
    pub fn new(base_costs: Vec<u64>, params: &AllocParams, households: usize) -> Self {
        assert!(!base_costs.is_empty(), "ledger needs at least one slot");
        assert!(households > 0, "ledger needs at least one household");
        let minutes = base_costs.len();
        Self {
            base_costs,
            max_power: params.max_power_per_household,
            max_concurrent: params.max_concurrent,
            remaining: vec![vec![params.max_power_per_household; households]; minutes],
            active: vec![vec![0; households]; minutes],
        }
    }

    /// Number of slots on the timeline.
    pub fn minutes(&self) -> usize {
        self.base_costs.len()
    }

    /// Number of household capacity columns.
    pub fn households(&self) -> usize {
        self.remaining[0].len()
    }

    /// Fixed input price of a slot.
    pub fn base_cost(&self, minute: usize) -> u64 {
        self.base_costs[minute]
    }

    /// Per-slot power cap for each household.
    pub fn max_power(&self) -> u64 {
        self.max_power
    }

    pub fn remaining_power(&self, minute: usize, household: usize) -> u64 {
        self.remaining[minute][household]
    }

    pub fn active_consumers(&self, minute: usize, household: usize) -> u64 {
        self.active[minute][household]
    }

    /// Congestion-adjusted price of a slot.
    ///
    /// `round(base * (1 + consumed / max_power))` where `consumed` sums the
    /// power drawn at this slot across all households. Equals the base cost
    /// while the slot is untouched and only grows from there.
    pub fn effective_cost(&self, minute: usize) -> u64 {
        let consumed: u64 = self.remaining[minute]
            .iter()
            .map(|r| self.max_power - r)
            .sum();
        let base = self.base_costs[minute] as f64;
        (base * (1.0 + consumed as f64 / self.max_power as f64)).round() as u64
    }

    /// Whether a household can still draw from a slot: power left and a free
    /// concurrency seat.
    pub fn has_headroom(&self, minute: usize, household: usize) -> bool {
        self.remaining[minute][household] > 0
            && self.active[minute][household] < self.max_concurrent
    }

    /// Takes `amount` power from a slot for a household and seats one more
    /// consumer there.
    ///
    /// # Panics
    ///
    /// Panics if the draw exceeds remaining power or the concurrency cap;
    /// both indicate a broken caller, not a recoverable condition.
    pub fn draw(&mut self, minute: usize, household: usize, amount: u64) {
        let remaining = &mut self.remaining[minute][household];
        assert!(
            amount <= *remaining,
            "minute {minute} household {household}: draw of {amount} exceeds remaining {remaining}"
        );
        *remaining -= amount;

        let active = &mut self.active[minute][household];
        assert!(
            *active < self.max_concurrent,
            "minute {minute} household {household}: concurrency cap {} exceeded",
            self.max_concurrent
        );
        *active += 1;
    }

    /// Returns a previous draw to a slot, freeing its concurrency seat.
    ///
    /// # Panics
    ///
    /// Panics if the revert would raise remaining power above the cap or
    /// there is no active consumer to release.
    pub fn revert(&mut self, minute: usize, household: usize, amount: u64) {
        let remaining = &mut self.remaining[minute][household];
        assert!(
            *remaining + amount <= self.max_power,
            "minute {minute} household {household}: revert of {amount} overflows cap {}",
            self.max_power
        );
        *remaining += amount;

        let active = &mut self.active[minute][household];
        assert!(
            *active > 0,
            "minute {minute} household {household}: revert with no active consumer"
        );
        *active -= 1;
    }
}
