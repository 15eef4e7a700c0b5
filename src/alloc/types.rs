//! Core allocation types: global parameters, tasks, and households.

/// Global instance parameters shared by every slot and household.
///
/// # Examples
///
/// ```
/// use gridplan::alloc::types::AllocParams;
///
/// let params = AllocParams::new(10, 1_000, 2);
/// assert_eq!(params.max_power_per_household, 10);
/// ```
#[derive(Debug, Clone)]
pub struct AllocParams {
    /// Per-slot power cap for each household (same for every slot).
    pub max_power_per_household: u64,
    /// Budget ceiling, used only for the remaining-budget diagnostic.
    pub max_bill: u64,
    /// Per-slot cap on concurrent consumers for each household.
    pub max_concurrent: u64,
}

impl AllocParams {
    /// Creates new instance parameters.
    ///
    /// # Panics
    ///
    /// Panics if `max_power_per_household` or `max_concurrent` is zero.
    pub fn new(max_power_per_household: u64, max_bill: u64, max_concurrent: u64) -> Self {
        assert!(
            max_power_per_household > 0,
            "max_power_per_household must be > 0"
        );
        assert!(max_concurrent > 0, "max_concurrent must be > 0");
        Self {
            max_power_per_household,
            max_bill,
            max_concurrent,
        }
    }
}

/// Allocation state of a task.
///
/// The lifecycle is a simple cycle: a task starts `Pending`, becomes
/// `Finished` once its consumptions cover `power_needed`, and returns to
/// `Pending` when it is displaced to free capacity for a blocked task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Still needs power drawn.
    Pending,
    /// Consumptions sum exactly to `power_needed`.
    Finished,
}

/// One power draw: where, how much, and the slot's effective unit cost at
/// the moment the draw was applied.
///
/// The unit cost is snapshotted here because later draws (by this or any
/// other household) change the slot's congestion surcharge; recomputing at
/// report time would bill the wrong amount.
#[derive(Debug, Clone)]
pub struct Consumption {
    /// Slot minute the power came from.
    pub minute: usize,
    /// Power units drawn.
    pub power: u64,
    /// Effective slot cost per power unit when the draw was made.
    pub unit_cost: u64,
}

/// One unit of demand: total power over an allowed minute window.
#[derive(Debug, Clone)]
pub struct Task {
    /// Identifier, unique within its household.
    pub id: u64,
    /// Total power units required.
    pub power_needed: u64,
    /// First allowed minute (inclusive).
    pub start: usize,
    /// Last allowed minute (inclusive).
    pub end: usize,
    /// Ordered draw records; their power never exceeds `power_needed`.
    pub consumptions: Vec<Consumption>,
    /// Current lifecycle state.
    pub state: TaskState,
}

impl Task {
    /// Creates a pending task with no consumptions.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `power_needed` is zero.
    pub fn new(id: u64, power_needed: u64, start: usize, end: usize) -> Self {
        assert!(start <= end, "task {id}: window start {start} > end {end}");
        assert!(power_needed > 0, "task {id}: power_needed must be > 0");
        Self {
            id,
            power_needed,
            start,
            end,
            consumptions: Vec::new(),
            state: TaskState::Pending,
        }
    }

    /// Total power drawn so far.
    pub fn drawn(&self) -> u64 {
        self.consumptions.iter().map(|c| c.power).sum()
    }

    /// Power still to be drawn.
    pub fn outstanding(&self) -> u64 {
        self.power_needed - self.drawn()
    }

    pub fn is_finished(&self) -> bool {
        self.state == TaskState::Finished
    }

    /// Scheduling priority: power per window minute. Tasks with a lot of
    /// demand squeezed into a short window run first.
    pub fn importance(&self) -> f64 {
        self.power_needed as f64 / (self.end - self.start + 1) as f64
    }

    /// Whether `minute` lies inside the task's allowed window.
    pub fn window_contains(&self, minute: usize) -> bool {
        (self.start..=self.end).contains(&minute)
    }

    /// Appends a draw record and flips to `Finished` once demand is met.
    ///
    /// # Panics
    ///
    /// Panics if the draw would overshoot `power_needed` or lies outside
    /// the task's window.
    pub fn record_draw(&mut self, minute: usize, power: u64, unit_cost: u64) {
        assert!(
            self.window_contains(minute),
            "task {}: draw at minute {minute} outside window [{}, {}]",
            self.id,
            self.start,
            self.end
        );
        assert!(
            power <= self.outstanding(),
            "task {}: draw of {power} overshoots outstanding {}",
            self.id,
            self.outstanding()
        );
        self.consumptions.push(Consumption {
            minute,
            power,
            unit_cost,
        });
        if self.drawn() == self.power_needed {
            self.state = TaskState::Finished;
        }
    }

    /// Total billed cost of this task's consumptions.
    pub fn cost(&self) -> u64 {
        self.consumptions.iter().map(|c| c.power * c.unit_cost).sum()
    }
}

/// A named grouping of tasks sharing one capacity view of the ledger.
#[derive(Debug, Clone)]
pub struct Household {
    /// Zero-based household index; also the ledger capacity-column index.
    pub id: usize,
    /// Tasks in input order.
    pub tasks: Vec<Task>,
}

impl Household {
    pub fn new(id: usize, tasks: Vec<Task>) -> Self {
        Self { id, tasks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_lifecycle_pending_to_finished() {
        let mut task = Task::new(7, 10, 0, 4);
        assert_eq!(task.state, TaskState::Pending);
        task.record_draw(2, 4, 3);
        assert_eq!(task.state, TaskState::Pending);
        assert_eq!(task.outstanding(), 6);
        task.record_draw(3, 6, 5);
        assert_eq!(task.state, TaskState::Finished);
        assert_eq!(task.drawn(), 10);
    }

    #[test]
    fn task_cost_uses_snapshotted_unit_cost() {
        let mut task = Task::new(1, 5, 0, 1);
        task.record_draw(0, 2, 3);
        task.record_draw(1, 3, 7);
        assert_eq!(task.cost(), 2 * 3 + 3 * 7);
    }

    #[test]
    fn importance_is_power_per_window_minute() {
        let task = Task::new(1, 10, 2, 6);
        assert_eq!(task.importance(), 2.0);
        let tight = Task::new(2, 10, 3, 3);
        assert_eq!(tight.importance(), 10.0);
    }

    #[test]
    #[should_panic]
    fn draw_outside_window_panics() {
        let mut task = Task::new(1, 5, 2, 4);
        task.record_draw(5, 1, 1);
    }

    #[test]
    #[should_panic]
    fn overshoot_panics() {
        let mut task = Task::new(1, 5, 0, 4);
        task.record_draw(0, 6, 1);
    }

    #[test]
    #[should_panic]
    fn inverted_window_panics() {
        Task::new(1, 5, 4, 2);
    }
}
