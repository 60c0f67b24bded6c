//! Import of the flat CSV table used by earlier SmartBacklog releases.
//!
//! The old table had six positional columns: subject, lessons, difficulty,
//! days until the exam, a precomputed priority and the student's name. The
//! priority column is ignored because urgency is always derived on read, and
//! "days until the exam" is pinned to a real date relative to the import day.

use std::io::Read;

use chrono::{Duration, NaiveDate};

use crate::error::{CoreError, Result, ValidationError};
use crate::task::{Difficulty, NewTask};

/// One decoded row of a legacy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRow {
    pub subject: String,
    pub lessons: u32,
    pub difficulty: Difficulty,
    pub days: i64,
    /// May be blank in old exports
    pub student: String,
}

impl LegacyRow {
    pub fn into_new_task(self, owner: String, today: NaiveDate) -> NewTask {
        NewTask {
            owner,
            subject: self.subject,
            size: self.lessons,
            difficulty: self.difficulty,
            due_date: today + Duration::days(self.days),
        }
    }
}

/// Parse a legacy CSV export. The first line is a header and is skipped.
///
/// # Errors
/// Returns `InvalidInput` naming the first bad row; nothing is returned for
/// a partially valid file.
pub fn parse<R: Read>(reader: R) -> Result<Vec<LegacyRow>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv.records().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let record = record.map_err(|e| row_error(line, e.to_string()))?;
        rows.push(parse_record(line, &record)?);
    }
    Ok(rows)
}

fn parse_record(line: usize, record: &csv::StringRecord) -> Result<LegacyRow> {
    if record.len() < 4 {
        return Err(row_error(line, format!("expected at least 4 columns, got {}", record.len())));
    }
    let field = |i: usize| record.get(i).unwrap_or_default();

    let subject = field(0).to_string();
    if subject.is_empty() {
        return Err(row_error(line, ValidationError::EmptySubject.to_string()));
    }
    let lessons = whole_number(field(1)).ok_or_else(|| row_error(line, format!("lessons '{}'", field(1))))?;
    if lessons < 1 {
        return Err(row_error(line, ValidationError::ZeroSize.to_string()));
    }
    let lessons = u32::try_from(lessons)
        .map_err(|_| row_error(line, format!("lessons '{}' is out of range", field(1))))?;
    let difficulty = whole_number(field(2))
        .ok_or_else(|| row_error(line, format!("difficulty '{}'", field(2))))?;
    let difficulty = Difficulty::new(difficulty).map_err(|e| row_error(line, e.to_string()))?;
    let days = whole_number(field(3))
        .filter(|d| (0..=3650).contains(d))
        .ok_or_else(|| row_error(line, format!("days '{}'", field(3))))?;

    Ok(LegacyRow {
        subject,
        lessons,
        difficulty,
        days,
        student: field(5).to_string(),
    })
}

/// Old exports sometimes wrote integers as floats ("5.0").
fn whole_number(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| {
        let f = raw.parse::<f64>().ok()?;
        (f.fract() == 0.0 && f.is_finite()).then_some(f as i64)
    })
}

fn row_error(line: usize, message: String) -> CoreError {
    ValidationError::invalid(format!("line {line}"), message).into()
}
