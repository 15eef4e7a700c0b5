//! Line-oriented instance file parser.
//!
//! Format (fields within a line are space- or comma-separated):
//!
//! ```text
//! maxPowerPerSlotPerHousehold
//! maxBill
//! maxConcurrentConsumersPerSlot
//! N                      (number of minutes)
//! baseCost               (N lines, one per minute)
//! H                      (number of households)
//! repeated H times:
//!   M                    (number of tasks in this household)
//!   taskId powerNeeded startMinute endMinute   (M lines)
//! ```
//!
//! Any count or field mismatch aborts the whole instance; there is no
//! partial parse.

use std::fs;
use std::num::ParseIntError;
use std::path::Path;

use thiserror::Error;

use crate::alloc::types::AllocParams;

/// Malformed instance input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: unexpected end of input, expected {expected}")]
    MissingLine { line: usize, expected: &'static str },
    #[error("line {line}: expected {expected} field(s) for {what}, got {got}")]
    FieldCount {
        line: usize,
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("line {line}: invalid {what} \"{value}\": {source}")]
    BadNumber {
        line: usize,
        what: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },
    #[error("line {line}: trailing content after instance")]
    Trailing { line: usize },
}

/// One task declaration.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub id: u64,
    pub power_needed: u64,
    pub start: usize,
    pub end: usize,
}

/// One household's task declarations, in input order.
#[derive(Debug, Clone)]
pub struct HouseholdSpec {
    pub tasks: Vec<TaskSpec>,
}

/// A fully parsed problem instance.
#[derive(Debug, Clone)]
pub struct Instance {
    pub params: AllocParams,
    /// Base price per minute, index = minute.
    pub base_costs: Vec<u64>,
    pub households: Vec<HouseholdSpec>,
}

impl Instance {
    /// Reads and parses an instance file.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the file cannot be read or its content
    /// does not match the declared counts.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_text(&text)
    }

    /// Parses an instance from text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the offending line on any mismatch.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let mut cursor = Cursor::new(text);

        let (line, max_power) = cursor.single_value("max power per slot per household")?;
        if max_power == 0 {
            return Err(ParseError::Invalid {
                line,
                message: "max power per slot per household must be > 0".to_string(),
            });
        }
        let (_, max_bill) = cursor.single_value("max bill")?;
        let (line, max_concurrent) = cursor.single_value("max concurrent consumers per slot")?;
        if max_concurrent == 0 {
            return Err(ParseError::Invalid {
                line,
                message: "max concurrent consumers per slot must be > 0".to_string(),
            });
        }

        let (line, minutes) = cursor.single_value("minute count")?;
        if minutes == 0 {
            return Err(ParseError::Invalid {
                line,
                message: "minute count must be > 0".to_string(),
            });
        }
        let minutes = minutes as usize;
        let mut base_costs = Vec::with_capacity(minutes);
        for _ in 0..minutes {
            let (_, cost) = cursor.single_value("base cost")?;
            base_costs.push(cost);
        }

        let (line, household_count) = cursor.single_value("household count")?;
        if household_count == 0 {
            return Err(ParseError::Invalid {
                line,
                message: "household count must be > 0".to_string(),
            });
        }
        let mut households = Vec::with_capacity(household_count as usize);
        for _ in 0..household_count {
            let (_, task_count) = cursor.single_value("task count")?;
            let mut tasks = Vec::with_capacity(task_count as usize);
            for _ in 0..task_count {
                tasks.push(cursor.task_line(minutes)?);
            }
            households.push(HouseholdSpec { tasks });
        }

        cursor.finish()?;

        Ok(Self {
            params: AllocParams::new(max_power, max_bill, max_concurrent),
            base_costs,
            households,
        })
    }

    /// Number of minutes on the timeline.
    pub fn minutes(&self) -> usize {
        self.base_costs.len()
    }
}

/// Line-by-line reader tracking 1-based line numbers for error reporting.
struct Cursor<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_no: 0,
        }
    }

    fn next_fields(
        &mut self,
        what: &'static str,
        expected: usize,
    ) -> Result<(usize, Vec<&'a str>), ParseError> {
        let line = self.lines.next().ok_or(ParseError::MissingLine {
            line: self.line_no + 1,
            expected: what,
        })?;
        self.line_no += 1;
        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() != expected {
            return Err(ParseError::FieldCount {
                line: self.line_no,
                what,
                expected,
                got: fields.len(),
            });
        }
        Ok((self.line_no, fields))
    }

    /// Reads a line holding exactly one unsigned integer.
    fn single_value(&mut self, what: &'static str) -> Result<(usize, u64), ParseError> {
        let (line, fields) = self.next_fields(what, 1)?;
        Ok((line, parse_u64(fields[0], line, what)?))
    }

    /// Reads one `taskId powerNeeded startMinute endMinute` line.
    fn task_line(&mut self, minutes: usize) -> Result<TaskSpec, ParseError> {
        let (line, fields) = self.next_fields("task declaration", 4)?;
        let id = parse_u64(fields[0], line, "task id")?;
        let power_needed = parse_u64(fields[1], line, "power needed")?;
        let start = parse_u64(fields[2], line, "start minute")? as usize;
        let end = parse_u64(fields[3], line, "end minute")? as usize;

        if power_needed == 0 {
            return Err(ParseError::Invalid {
                line,
                message: format!("task {id}: power needed must be > 0"),
            });
        }
        if start > end {
            return Err(ParseError::Invalid {
                line,
                message: format!("task {id}: window start {start} > end {end}"),
            });
        }
        if end >= minutes {
            return Err(ParseError::Invalid {
                line,
                message: format!(
                    "task {id}: window end {end} exceeds timeline of {minutes} minute(s)"
                ),
            });
        }

        Ok(TaskSpec {
            id,
            power_needed,
            start,
            end,
        })
    }

    /// Rejects any non-blank content after the declared instance.
    fn finish(&mut self) -> Result<(), ParseError> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            if !line.trim().is_empty() {
                return Err(ParseError::Trailing { line: self.line_no });
            }
        }
        Ok(())
    }
}

fn parse_u64(value: &str, line: usize, what: &'static str) -> Result<u64, ParseError> {
    value.parse::<u64>().map_err(|source| ParseError::BadNumber {
        line,
        what,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "\
10
1000
2
3
5
1
5
2
1
0 10 0 2
2
0 4 0 1
1 6 1 2
";

    #[test]
    fn parses_valid_instance() {
        let instance = Instance::from_text(VALID).expect("valid instance");
        assert_eq!(instance.params.max_power_per_household, 10);
        assert_eq!(instance.params.max_bill, 1000);
        assert_eq!(instance.params.max_concurrent, 2);
        assert_eq!(instance.base_costs, vec![5, 1, 5]);
        assert_eq!(instance.households.len(), 2);
        assert_eq!(instance.households[0].tasks.len(), 1);
        assert_eq!(instance.households[1].tasks.len(), 2);
        let t = &instance.households[1].tasks[1];
        assert_eq!((t.id, t.power_needed, t.start, t.end), (1, 6, 1, 2));
    }

    #[test]
    fn accepts_comma_separated_task_fields() {
        let text = VALID.replace("1 6 1 2", "1,6,1,2");
        let instance = Instance::from_text(&text).expect("commas are separators too");
        assert_eq!(instance.households[1].tasks[1].power_needed, 6);
    }

    #[test]
    fn missing_base_cost_line_is_reported() {
        // declares 3 minutes but provides 2 cost lines
        let text = "10\n1000\n2\n3\n5\n1\n1\n1\n0 10 0 2\n";
        let err = Instance::from_text(text).expect_err("must fail");
        // the household-count line gets consumed as the third base cost,
        // leaving the parse short further down
        assert!(matches!(
            err,
            ParseError::MissingLine { .. } | ParseError::FieldCount { .. }
        ));
    }

    #[test]
    fn wrong_field_count_names_line() {
        let text = VALID.replace("0 10 0 2", "0 10 0");
        let err = Instance::from_text(text.as_str()).expect_err("must fail");
        match err {
            ParseError::FieldCount {
                line,
                expected,
                got,
                ..
            } => {
                assert_eq!(line, 10);
                assert_eq!(expected, 4);
                assert_eq!(got, 3);
            }
            other => panic!("expected FieldCount, got {other}"),
        }
    }

    #[test]
    fn non_numeric_field_is_reported() {
        let text = VALID.replace("1000", "lots");
        let err = Instance::from_text(&text).expect_err("must fail");
        assert!(matches!(err, ParseError::BadNumber { line: 2, .. }));
    }

    #[test]
    fn zero_household_count_is_rejected() {
        // grammar-valid but unusable: the ledger has no capacity columns
        let text = "10\n1000\n2\n1\n5\n0\n";
        let err = Instance::from_text(text).expect_err("must fail");
        match err {
            ParseError::Invalid { line, message } => {
                assert_eq!(line, 6);
                assert!(message.contains("household count"));
            }
            other => panic!("expected Invalid, got {other}"),
        }
    }

    #[test]
    fn window_past_timeline_is_rejected() {
        let text = VALID.replace("1 6 1 2", "1 6 1 3");
        let err = Instance::from_text(&text).expect_err("must fail");
        assert!(matches!(err, ParseError::Invalid { .. }));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let text = VALID.replace("1 6 1 2", "1 6 2 1");
        let err = Instance::from_text(&text).expect_err("must fail");
        assert!(matches!(err, ParseError::Invalid { .. }));
    }

    #[test]
    fn trailing_content_is_rejected() {
        let mut text = VALID.to_string();
        text.push_str("99 99 0 0\n");
        let err = Instance::from_text(&text).expect_err("must fail");
        assert!(matches!(err, ParseError::Trailing { line: 14 }));
    }

    #[test]
    fn trailing_blank_lines_are_tolerated() {
        let mut text = VALID.to_string();
        text.push_str("\n  \n");
        assert!(Instance::from_text(&text).is_ok());
    }
}
