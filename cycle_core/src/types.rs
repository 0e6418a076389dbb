//! Core domain types for cycle and pregnancy tracking.
//!
//! This module defines the fundamental types used throughout the system:
//! - Period records and flow intensity
//! - Derived cycle predictions and calendar markers
//! - Pregnancy milestones and gestation status
//! - Symptom logs and their summaries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Period Types
// ============================================================================

/// Self-reported menstrual flow
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FlowIntensity {
    Light,
    Medium,
    Heavy,
}

impl FlowIntensity {
    /// Parse a flow intensity label, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(FlowIntensity::Light),
            "medium" => Some(FlowIntensity::Medium),
            "heavy" => Some(FlowIntensity::Heavy),
            _ => None,
        }
    }
}

impl fmt::Display for FlowIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlowIntensity::Light => "light",
            FlowIntensity::Medium => "medium",
            FlowIntensity::Heavy => "heavy",
        };
        f.write_str(label)
    }
}

/// One logged period.
///
/// A record without an end date is a single-day event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PeriodRecord {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub flow_intensity: Option<FlowIntensity>,
    pub notes: Option<String>,
}

impl PeriodRecord {
    /// A period starting on `start_date` with nothing else recorded
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            flow_intensity: None,
            notes: None,
        }
    }

    /// A period spanning `start_date..=end_date`
    pub fn spanning(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            end_date: Some(end_date),
            ..Self::starting(start_date)
        }
    }

    pub fn with_flow(mut self, flow: FlowIntensity) -> Self {
        self.flow_intensity = Some(flow);
        self
    }

    /// Check the record invariant: an end date never precedes the start date.
    ///
    /// The predictor does not call this; whoever constructs records from
    /// untrusted input does.
    pub fn validate(&self) -> crate::Result<()> {
        match self.end_date {
            Some(end) if end < self.start_date => Err(crate::Error::InvalidRecord(format!(
                "end date {} is before start date {}",
                end, self.start_date
            ))),
            _ => Ok(()),
        }
    }

    /// Whether `date` falls inside this period (inclusive)
    pub fn covers(&self, date: NaiveDate) -> bool {
        match self.end_date {
            None => date == self.start_date,
            Some(end) => self.start_date <= date && date <= end,
        }
    }
}

// ============================================================================
// Prediction Types
// ============================================================================

/// Inclusive date range with elevated conception probability
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FertileWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Everything the predictor derives from a period history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CyclePrediction {
    pub average_cycle_length_days: i64,
    pub next_period_start: NaiveDate,
    pub ovulation_date: NaiveDate,
    pub fertile_window: FertileWindow,
}

/// Calendar highlighting flags for a single day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DayMarkers {
    pub period: bool,
    pub flow: Option<FlowIntensity>,
    pub fertile: bool,
    pub ovulation: bool,
}

// ============================================================================
// Pregnancy Types
// ============================================================================

/// Fetal development reference data for one gestational week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MilestoneEntry {
    pub week: i64,
    pub size: String,
    pub weight: String,
    pub developments: Vec<String>,
    pub tips: Vec<String>,
}

/// Pregnancy stage
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    /// 1, 2 or 3
    pub fn number(self) -> u8 {
        match self {
            Trimester::First => 1,
            Trimester::Second => 2,
            Trimester::Third => 3,
        }
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Where a pregnancy stands on a given day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GestationStatus {
    pub current_week: i64,
    pub trimester: Trimester,
    pub progress_percent: f64,
}

/// A weekly check-in logged during a pregnancy
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PregnancyUpdate {
    pub week: i64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Weight gained (or lost) between the earliest and latest weighed update
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightChange {
    pub first_week: i64,
    pub first_weight: f64,
    pub latest_week: i64,
    pub latest_weight: f64,
    pub change: f64,
}

// ============================================================================
// Symptom Types
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Anxious,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Good,
    Fair,
    Poor,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

/// One day's self-reported symptoms
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SymptomLog {
    pub date: NaiveDate,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub physical_symptoms: Vec<String>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub sleep_quality: Option<SleepQuality>,
    #[serde(default)]
    pub energy_level: Option<EnergyLevel>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomCount {
    pub symptom: String,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

/// Aggregate view over a set of symptom logs
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SymptomSummary {
    pub total_logs: usize,
    pub most_common: Vec<SymptomCount>,
    pub average_sleep_hours: f64,
    pub mood_distribution: Vec<MoodCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let record = PeriodRecord::spanning(date(2024, 3, 10), date(2024, 3, 9));
        assert!(matches!(
            record.validate(),
            Err(crate::Error::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_validate_accepts_single_day_and_open_records() {
        assert!(PeriodRecord::spanning(date(2024, 3, 10), date(2024, 3, 10))
            .validate()
            .is_ok());
        assert!(PeriodRecord::starting(date(2024, 3, 10)).validate().is_ok());
    }

    #[test]
    fn test_covers_without_end_date_is_single_day() {
        let record = PeriodRecord::starting(date(2024, 1, 15));
        assert!(record.covers(date(2024, 1, 15)));
        assert!(!record.covers(date(2024, 1, 16)));
    }

    #[test]
    fn test_flow_intensity_parse() {
        assert_eq!(FlowIntensity::parse(" Heavy "), Some(FlowIntensity::Heavy));
        assert_eq!(FlowIntensity::parse("spotting"), None);
    }

    #[test]
    fn test_trimester_numbers() {
        assert_eq!(Trimester::First.number(), 1);
        assert_eq!(Trimester::Third.to_string(), "3");
    }

    #[test]
    fn test_symptom_log_defaults_missing_fields() {
        let log: SymptomLog = serde_json::from_str(r#"{"date":"2024-03-01"}"#).unwrap();
        assert!(log.physical_symptoms.is_empty());
        assert_eq!(log.mood, None);
    }
}
