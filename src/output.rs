//! Text assignment output.
//!
//! Format:
//!
//! ```text
//! H
//! per household:
//!   householdId
//!   taskCount
//!   taskId minute0 power0 minute1 power1 ...   (one line per task)
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::alloc::types::Household;

/// Writes the assignment for all households to any writer.
pub fn write_assignment<W: Write>(writer: &mut W, households: &[Household]) -> io::Result<()> {
    writeln!(writer, "{}", households.len())?;
    for household in households {
        writeln!(writer, "{}", household.id)?;
        writeln!(writer, "{}", household.tasks.len())?;
        for task in &household.tasks {
            write!(writer, "{}", task.id)?;
            for consumption in &task.consumptions {
                write!(writer, " {} {}", consumption.minute, consumption.power)?;
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

/// Writes the assignment to a file path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn write_assignment_to_path(path: &Path, households: &[Household]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_assignment(&mut writer, households)?;
    writer.flush()
}
