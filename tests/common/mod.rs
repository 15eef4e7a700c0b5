//! Shared test fixtures for integration tests.

use gridplan::alloc::types::Household;
use gridplan::instance::Instance;

/// Scenario with one household and one task whose window has a clear
/// cheapest minute (costs [5, 1, 5], task needs 10 over [0, 2]).
pub const SINGLE_TASK: &str = "\
10
50
1
3
5
1
5
1
1
0 10 0 2
";

/// Scenario forcing displacement: maxConcurrent 1, maxPower 5, three
/// equal-cost minutes; the wide task (10 over [0, 2]) runs first and claims
/// minutes 0 and 1, blocking the narrow task (3 over [1, 1]).
pub const DISPLACEMENT: &str = "\
5
100
1
3
1
1
1
1
2
0 3 1 1
1 10 0 2
";

/// Infeasible scenario: one task needing 10 power in a single slot capped
/// at 5, with nothing to displace.
pub const INFEASIBLE: &str = "\
5
50
1
1
3
1
1
0 10 0 0
";

/// Three households with overlapping windows and mixed importance.
pub const MULTI_HOUSEHOLD: &str = "\
10
500
2
5
4
2
1
3
5
3
2
0 12 0 4
1 8 2 3
3
0 10 0 2
1 5 1 1
2 6 3 4
1
0 20 0 4
";

pub fn parse(text: &str) -> Instance {
    Instance::from_text(text).expect("fixture instance parses")
}

/// Total power a household draws at one minute, summed over its tasks.
pub fn total_drawn_at(household: &Household, minute: usize) -> u64 {
    household
        .tasks
        .iter()
        .flat_map(|t| &t.consumptions)
        .filter(|c| c.minute == minute)
        .map(|c| c.power)
        .sum()
}
