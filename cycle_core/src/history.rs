//! Loading period and symptom history from disk.
//!
//! Period history lives in a CSV file, symptom logs and pregnancy updates in
//! JSON arrays. A
//! missing file is an empty history (a new user), not an error. Unlike the
//! predictor, the loaders validate every record they hand out.

use crate::{Error, FlowIntensity, PeriodRecord, PregnancyUpdate, Result, SymptomLog};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

/// Date format used in history files
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV row format for period history
#[derive(Debug, Deserialize)]
struct CsvRow {
    start_date: String,
    end_date: Option<String>,
    flow_intensity: Option<String>,
    notes: Option<String>,
}

impl TryFrom<CsvRow> for PeriodRecord {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let start_date = parse_date(&row.start_date)?;

        let end_date = non_empty(row.end_date)
            .map(|s| parse_date(&s))
            .transpose()?;

        let flow_intensity = non_empty(row.flow_intensity)
            .map(|s| {
                FlowIntensity::parse(&s).ok_or_else(|| {
                    Error::InvalidRecord(format!("Unknown flow intensity '{}'", s))
                })
            })
            .transpose()?;

        let record = PeriodRecord {
            start_date,
            end_date,
            flow_intensity,
            notes: non_empty(row.notes),
        };
        record.validate()?;
        Ok(record)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("'{}': {}", s, e)))
}

/// Load period history from a CSV file
///
/// Returns records sorted by start date (newest first). Any malformed row
/// fails the whole load, naming the offending line.
pub fn load_periods(path: &Path) -> Result<Vec<PeriodRecord>> {
    if !path.exists() {
        tracing::debug!("No period history found at {:?}", path);
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut periods = Vec::new();
    for (i, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Line 1 is the header
        let line = i + 2;
        let record = result
            .map_err(Error::from)
            .and_then(PeriodRecord::try_from)
            .map_err(|e| {
                let reason = match e {
                    Error::InvalidRecord(msg) => msg,
                    other => other.to_string(),
                };
                Error::InvalidRecord(format!("{:?} line {}: {}", path, line, reason))
            })?;
        periods.push(record);
    }

    periods.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    tracing::info!("Loaded {} periods from {:?}", periods.len(), path);
    Ok(periods)
}

/// Load symptom logs from a JSON array
///
/// Returns logs sorted by date (newest first).
pub fn load_symptom_logs(path: &Path) -> Result<Vec<SymptomLog>> {
    if !path.exists() {
        tracing::debug!("No symptom logs found at {:?}", path);
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let mut logs: Vec<SymptomLog> = serde_json::from_str(&contents)?;
    logs.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::info!("Loaded {} symptom logs from {:?}", logs.len(), path);
    Ok(logs)
}

/// Load weekly pregnancy updates from a JSON array
///
/// Returns updates sorted by week (oldest first).
pub fn load_pregnancy_updates(path: &Path) -> Result<Vec<PregnancyUpdate>> {
    if !path.exists() {
        tracing::debug!("No pregnancy updates found at {:?}", path);
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    let mut updates: Vec<PregnancyUpdate> = serde_json::from_str(&contents)?;
    updates.sort_by_key(|u| u.week);

    tracing::info!("Loaded {} pregnancy updates from {:?}", updates.len(), path);
    Ok(updates)
}
