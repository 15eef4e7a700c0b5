//! Greedy per-household distribution with displacement.

use std::collections::VecDeque;

use rand::Rng;
use thiserror::Error;

use super::ledger::SlotLedger;
use super::types::{Household, Task, TaskState};

/// Fatal allocation failure.
#[derive(Debug, Error)]
pub enum AllocError {
    /// A task has no free slot in its window and no finished task overlaps
    /// the window, so displacement cannot make progress.
    #[error(
        "household {household}: task {task} has no free slot in [{start}, {end}] \
         and no finished task to displace"
    )]
    Infeasible {
        household: usize,
        task: u64,
        start: usize,
        end: usize,
    },
}

/// Per-household scheduling engine.
///
/// Holds a mutable view of the shared ledger plus the RNG used for the
/// displacement victim pick. The RNG is injected rather than taken from a
/// process-wide source so runs are reproducible from a seed.
pub struct Allocator<'a, R: Rng> {
    ledger: &'a mut SlotLedger,
    rng: &'a mut R,
}

impl<'a, R: Rng> Allocator<'a, R> {
    pub fn new(ledger: &'a mut SlotLedger, rng: &'a mut R) -> Self {
        Self { ledger, rng }
    }

    /// Assigns every task's required power across its window.
    ///
    /// Tasks are processed FIFO in descending importance order (input order
    /// on ties). The front task draws from the cheapest slots of its window
    /// first; when its window has no headroom left, one finished task with
    /// an overlapping consumption is picked uniformly at random, fully
    /// reverted, and requeued at the back.
    ///
    /// Feasibility of the instance is a caller-guaranteed precondition; the
    /// only failure detected is a blocked task with nothing to displace.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::Infeasible`] if a blocked task has no
    /// displacement victim.
    pub fn distribute(&mut self, household: &mut Household) -> Result<(), AllocError> {
        let mut order: Vec<usize> = (0..household.tasks.len()).collect();
        // Stable sort: equal importance keeps input order.
        order.sort_by(|&a, &b| {
            household.tasks[b]
                .importance()
                .total_cmp(&household.tasks[a].importance())
        });
        let mut queue: VecDeque<usize> = order.into();

        while let Some(&current) = queue.front() {
            self.run_task(household, current, &mut queue)?;
            queue.pop_front();
        }
        Ok(())
    }

    /// Draws power for one task until it finishes.
    fn run_task(
        &mut self,
        household: &mut Household,
        current: usize,
        queue: &mut VecDeque<usize>,
    ) -> Result<(), AllocError> {
        let hh = household.id;
        let mut candidates: VecDeque<usize> = VecDeque::new();

        while !household.tasks[current].is_finished() {
            if candidates.is_empty() {
                candidates = self.candidate_slots(hh, &household.tasks[current]);
                while candidates.is_empty() {
                    let victim = self.pick_victim(&household.tasks, current).ok_or_else(|| {
                        let task = &household.tasks[current];
                        AllocError::Infeasible {
                            household: hh,
                            task: task.id,
                            start: task.start,
                            end: task.end,
                        }
                    })?;
                    log::debug!(
                        "household {hh}: displacing task {} for task {}",
                        household.tasks[victim].id,
                        household.tasks[current].id
                    );
                    self.evict(hh, &mut household.tasks[victim]);
                    queue.push_back(victim);
                    candidates = self.candidate_slots(hh, &household.tasks[current]);
                }
            }

            // Cheapest remaining candidate; the list is a snapshot and is
            // only rebuilt once exhausted, not after every draw.
            let Some(minute) = candidates.pop_front() else {
                continue;
            };
            let task = &mut household.tasks[current];
            let amount = task
                .outstanding()
                .min(self.ledger.remaining_power(minute, hh));
            let unit_cost = self.ledger.effective_cost(minute);
            self.ledger.draw(minute, hh, amount);
            task.record_draw(minute, amount, unit_cost);
        }
        Ok(())
    }

    /// Slots of the task's window with headroom, cheapest effective cost
    /// first; the stable sort keeps ties minute-ascending.
    fn candidate_slots(&self, household: usize, task: &Task) -> VecDeque<usize> {
        let mut slots: Vec<usize> = (task.start..=task.end)
            .filter(|&minute| self.ledger.has_headroom(minute, household))
            .collect();
        slots.sort_by_key(|&minute| self.ledger.effective_cost(minute));
        slots.into()
    }

    /// Picks a uniformly random finished task with at least one consumption
    /// inside the blocked task's window.
    fn pick_victim(&mut self, tasks: &[Task], current: usize) -> Option<usize> {
        let blocked = &tasks[current];
        let eligible: Vec<usize> = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                t.is_finished()
                    && t.consumptions
                        .iter()
                        .any(|c| blocked.window_contains(c.minute))
            })
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            None
        } else {
            Some(eligible[self.rng.random_range(0..eligible.len())])
        }
    }

    /// Reverts every draw of a task and resets it to pending.
    fn evict(&mut self, household: usize, task: &mut Task) {
        for consumption in task.consumptions.drain(..) {
            self.ledger
                .revert(consumption.minute, household, consumption.power);
        }
        task.state = TaskState::Pending;
    }
}
