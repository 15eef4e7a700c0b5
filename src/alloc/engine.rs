//! Allocation engine that ties ledger, households, and allocator together.

use rand::{SeedableRng, rngs::StdRng};

use crate::instance::Instance;

use super::allocator::{AllocError, Allocator};
use super::ledger::SlotLedger;
use super::types::{Household, Task};

/// Owns the ledger, the household task lists, and the RNG for one instance.
///
/// Households are processed strictly sequentially; their capacity columns in
/// the ledger are disjoint, so the order does not change any household's own
/// result, only the congestion surcharges later households observe.
pub struct Engine {
    ledger: SlotLedger,
    households: Vec<Household>,
    rng: StdRng,
}

impl Engine {
    /// Builds an engine from a parsed instance and a master seed.
    pub fn from_instance(instance: &Instance, seed: u64) -> Self {
        let households: Vec<Household> = instance
            .households
            .iter()
            .enumerate()
            .map(|(id, spec)| {
                let tasks = spec
                    .tasks
                    .iter()
                    .map(|t| Task::new(t.id, t.power_needed, t.start, t.end))
                    .collect();
                Household::new(id, tasks)
            })
            .collect();
        let ledger = SlotLedger::new(
            instance.base_costs.clone(),
            &instance.params,
            households.len(),
        );
        Self {
            ledger,
            households,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Runs the distribution pass for every household.
    ///
    /// # Errors
    ///
    /// Returns the first [`AllocError`] encountered; the instance produces
    /// no output in that case.
    pub fn run(&mut self) -> Result<(), AllocError> {
        for household in &mut self.households {
            Allocator::new(&mut self.ledger, &mut self.rng).distribute(household)?;
        }
        Ok(())
    }

    pub fn households(&self) -> &[Household] {
        &self.households
    }

    pub fn ledger(&self) -> &SlotLedger {
        &self.ledger
    }

    /// Consumes the engine, returning the finished household assignments.
    pub fn into_households(self) -> Vec<Household> {
        self.households
    }
}
