//! Per-instance pipeline: parse, allocate, bill, write output.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::alloc::allocator::AllocError;
use crate::alloc::billing::BillingReport;
use crate::alloc::engine::Engine;
use crate::alloc::types::Household;
use crate::instance::{Instance, ParseError};
use crate::output::write_assignment_to_path;

/// Any failure that aborts one instance of a batch.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Alloc(#[from] AllocError),
    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),
}

/// A completed allocation with its bill.
#[derive(Debug)]
pub struct InstanceResult {
    pub households: Vec<Household>,
    pub billing: BillingReport,
}

/// Allocates a parsed instance and computes its bill.
///
/// # Errors
///
/// Returns an [`AllocError`] if any household's distribution pass fails;
/// no partial assignment is returned.
pub fn run_parsed(instance: &Instance, seed: u64) -> Result<InstanceResult, AllocError> {
    let mut engine = Engine::from_instance(instance, seed);
    engine.run()?;
    let households = engine.into_households();
    let billing = BillingReport::from_households(&households, instance.params.max_bill);
    Ok(InstanceResult {
        households,
        billing,
    })
}

/// Output file path for an instance: the input path with `.out` appended.
pub fn output_path(instance_path: &Path) -> PathBuf {
    let mut name = instance_path.as_os_str().to_owned();
    name.push(".out");
    PathBuf::from(name)
}

/// Runs one instance file end to end and writes `<path>.out`.
///
/// Logs the total bill and remaining budget on success. A failed instance
/// writes nothing.
///
/// # Errors
///
/// Returns a [`RunError`] on malformed input, infeasible allocation, or an
/// output write failure.
pub fn run_instance_file(path: &Path, seed: u64) -> Result<InstanceResult, RunError> {
    let instance = Instance::from_path(path)?;
    let result = run_parsed(&instance, seed)?;
    write_assignment_to_path(&output_path(path), &result.households)?;
    log::info!(
        "{}: total bill {} of {}, remaining budget {}",
        path.display(),
        result.billing.total_cost,
        result.billing.max_bill,
        result.billing.remaining_budget()
    );
    Ok(result)
}
