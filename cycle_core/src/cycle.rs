//! Cycle prediction from period history.
//!
//! Prediction rules:
//! - Average cycle length is the mean start-to-start gap, rounded half-up
//! - Next period = most recent start + average cycle length
//! - Ovulation = next period - luteal phase (14 days)
//! - Fertile window = 5 days before ovulation through 1 day after
//!
//! Fewer than two periods fall back to a 28-day cycle; an empty history
//! yields no prediction at all, and so does a prediction that would land
//! outside the calendar `NaiveDate` can represent.

use crate::{CyclePrediction, DayMarkers, FertileWindow, FlowIntensity, PeriodRecord};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Cycle length assumed until two periods have been logged
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;

/// Days from ovulation to the next period
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Fertile days preceding ovulation (sperm viability)
pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;

/// Fertile days following ovulation (egg viability)
pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

/// Longest cycle length accepted from configuration
pub const MAX_CYCLE_LENGTH_DAYS: i64 = 365;

/// Tunable constants behind every prediction.
///
/// `CycleParams::default()` matches the free functions in this module.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleParams {
    #[serde(default = "default_cycle_length_days")]
    pub default_cycle_length_days: i64,

    #[serde(default = "default_luteal_phase_days")]
    pub luteal_phase_days: i64,

    #[serde(default = "default_fertile_days_before_ovulation")]
    pub fertile_days_before_ovulation: i64,

    #[serde(default = "default_fertile_days_after_ovulation")]
    pub fertile_days_after_ovulation: i64,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            default_cycle_length_days: DEFAULT_CYCLE_LENGTH_DAYS,
            luteal_phase_days: LUTEAL_PHASE_DAYS,
            fertile_days_before_ovulation: FERTILE_DAYS_BEFORE_OVULATION,
            fertile_days_after_ovulation: FERTILE_DAYS_AFTER_OVULATION,
        }
    }
}

fn default_cycle_length_days() -> i64 {
    DEFAULT_CYCLE_LENGTH_DAYS
}

fn default_luteal_phase_days() -> i64 {
    LUTEAL_PHASE_DAYS
}

fn default_fertile_days_before_ovulation() -> i64 {
    FERTILE_DAYS_BEFORE_OVULATION
}

fn default_fertile_days_after_ovulation() -> i64 {
    FERTILE_DAYS_AFTER_OVULATION
}

impl CycleParams {
    /// Mean start-to-start gap in days, rounded half-up.
    ///
    /// Input order does not matter; start dates are sorted internally.
    pub fn average_cycle_length(&self, history: &[PeriodRecord]) -> i64 {
        if history.len() < 2 {
            return self.default_cycle_length_days;
        }

        let mut starts: Vec<NaiveDate> = history.iter().map(|p| p.start_date).collect();
        starts.sort();

        let gaps: Vec<i64> = starts
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days())
            .collect();

        let total: i64 = gaps.iter().sum();
        let count = gaps.len() as i64;

        // floor(total / count + 1/2) without leaving integers
        let average = (2 * total + count).div_euclid(2 * count);

        tracing::debug!(
            "Average cycle length {} days over {} cycles",
            average,
            count
        );
        average
    }

    pub fn next_period(&self, history: &[PeriodRecord]) -> Option<NaiveDate> {
        let last_start = history.iter().map(|p| p.start_date).max()?;
        shift(last_start, self.average_cycle_length(history))
    }

    pub fn ovulation(&self, history: &[PeriodRecord]) -> Option<NaiveDate> {
        self.next_period(history)
            .and_then(|next| shift_back(next, self.luteal_phase_days))
    }

    pub fn fertile_window(&self, history: &[PeriodRecord]) -> Option<FertileWindow> {
        self.ovulation(history)
            .and_then(|ovulation| self.window_around(ovulation))
    }

    fn window_around(&self, ovulation: NaiveDate) -> Option<FertileWindow> {
        Some(FertileWindow {
            start: shift_back(ovulation, self.fertile_days_before_ovulation)?,
            end: shift(ovulation, self.fertile_days_after_ovulation)?,
        })
    }

    /// All predictions at once, or `None` for an empty history
    pub fn predict(&self, history: &[PeriodRecord]) -> Option<CyclePrediction> {
        let average_cycle_length_days = self.average_cycle_length(history);
        let last_start = history.iter().map(|p| p.start_date).max()?;

        let next_period_start = shift(last_start, average_cycle_length_days)?;
        let ovulation_date = shift_back(next_period_start, self.luteal_phase_days)?;

        Some(CyclePrediction {
            average_cycle_length_days,
            next_period_start,
            ovulation_date,
            fertile_window: self.window_around(ovulation_date)?,
        })
    }

    /// Period, fertility and ovulation flags for a calendar day
    pub fn day_markers(&self, date: NaiveDate, history: &[PeriodRecord]) -> DayMarkers {
        let ovulation = self.ovulation(history);

        DayMarkers {
            period: is_date_in_period(date, history),
            flow: flow_on(date, history),
            fertile: ovulation
                .and_then(|o| self.window_around(o))
                .map(|window| window.contains(date))
                .unwrap_or(false),
            ovulation: ovulation == Some(date),
        }
    }
}

/// `date` moved by `days`, or `None` outside the representable calendar
fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let delta = Duration::try_days(days);
    if delta.is_none() {
        tracing::debug!("Shift of {} days is out of range", days);
    }
    date.checked_add_signed(delta?)
}

fn shift_back(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    shift(date, days.checked_neg()?)
}

/// Mean cycle length in days; 28 with fewer than two records
pub fn average_cycle_length(history: &[PeriodRecord]) -> i64 {
    CycleParams::default().average_cycle_length(history)
}

/// Expected start of the next period, if any period has been logged
pub fn predict_next_period(history: &[PeriodRecord]) -> Option<NaiveDate> {
    CycleParams::default().next_period(history)
}

/// Expected ovulation day preceding the next period
pub fn predict_ovulation(history: &[PeriodRecord]) -> Option<NaiveDate> {
    CycleParams::default().ovulation(history)
}

/// Inclusive 7-day fertile window around the predicted ovulation
pub fn fertile_window(history: &[PeriodRecord]) -> Option<FertileWindow> {
    CycleParams::default().fertile_window(history)
}

pub fn predict(history: &[PeriodRecord]) -> Option<CyclePrediction> {
    CycleParams::default().predict(history)
}

pub fn day_markers(date: NaiveDate, history: &[PeriodRecord]) -> DayMarkers {
    CycleParams::default().day_markers(date, history)
}

/// Whether any logged period covers `date`
pub fn is_date_in_period(date: NaiveDate, history: &[PeriodRecord]) -> bool {
    history.iter().any(|p| p.covers(date))
}

/// Flow recorded for the first period (in history order) covering `date`
pub fn flow_on(date: NaiveDate, history: &[PeriodRecord]) -> Option<FlowIntensity> {
    history
        .iter()
        .find(|p| p.covers(date))
        .and_then(|p| p.flow_intensity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Jan 15, Feb 12, Mar 10 2024, five days each
    fn sample_history() -> Vec<PeriodRecord> {
        vec![
            PeriodRecord::spanning(date(2024, 1, 15), date(2024, 1, 19))
                .with_flow(FlowIntensity::Medium),
            PeriodRecord::spanning(date(2024, 2, 12), date(2024, 2, 16))
                .with_flow(FlowIntensity::Heavy),
            PeriodRecord::spanning(date(2024, 3, 10), date(2024, 3, 14))
                .with_flow(FlowIntensity::Light),
        ]
    }

    #[test]
    fn test_average_rounds_half_up() {
        // Gaps of 28 and 27 days average to 27.5
        assert_eq!(average_cycle_length(&sample_history()), 28);
    }

    #[test]
    fn test_average_ignores_input_order() {
        let mut history = sample_history();
        history.reverse();
        history.swap(0, 1);
        assert_eq!(average_cycle_length(&history), 28);
    }

    #[test]
    fn test_average_rounds_down_below_half() {
        // Gaps of 30, 30, 31 -> 30.33
        let history = vec![
            PeriodRecord::starting(date(2024, 1, 1)),
            PeriodRecord::starting(date(2024, 1, 31)),
            PeriodRecord::starting(date(2024, 3, 1)),
            PeriodRecord::starting(date(2024, 4, 1)),
        ];
        assert_eq!(average_cycle_length(&history), 30);
    }

    #[test]
    fn test_average_defaults_with_short_history() {
        assert_eq!(average_cycle_length(&[]), DEFAULT_CYCLE_LENGTH_DAYS);
        assert_eq!(
            average_cycle_length(&[PeriodRecord::starting(date(2024, 1, 1))]),
            28
        );
    }

    #[test]
    fn test_empty_history_has_no_predictions() {
        assert_eq!(predict_next_period(&[]), None);
        assert_eq!(predict_ovulation(&[]), None);
        assert_eq!(fertile_window(&[]), None);
        assert_eq!(predict(&[]), None);
    }

    #[test]
    fn test_single_record_uses_default_length() {
        let history = vec![PeriodRecord::starting(date(2024, 5, 1))];
        assert_eq!(predict_next_period(&history), Some(date(2024, 5, 29)));
    }

    #[test]
    fn test_worked_example() {
        let history = sample_history();

        assert_eq!(predict_next_period(&history), Some(date(2024, 4, 7)));
        assert_eq!(predict_ovulation(&history), Some(date(2024, 3, 24)));
        assert_eq!(
            fertile_window(&history),
            Some(FertileWindow {
                start: date(2024, 3, 19),
                end: date(2024, 3, 25),
            })
        );
    }

    #[test]
    fn test_predict_matches_individual_operations() {
        let history = sample_history();
        let prediction = predict(&history).unwrap();

        assert_eq!(prediction.average_cycle_length_days, 28);
        assert_eq!(Some(prediction.next_period_start), predict_next_period(&history));
        assert_eq!(Some(prediction.ovulation_date), predict_ovulation(&history));
        assert_eq!(Some(prediction.fertile_window), fertile_window(&history));
    }

    #[test]
    fn test_fertile_window_spans_six_days() {
        let history = sample_history();
        let window = fertile_window(&history).unwrap();
        assert_eq!((window.end - window.start).num_days(), 6);
    }

    #[test]
    fn test_predictions_are_repeatable() {
        let history = sample_history();
        assert_eq!(predict(&history), predict(&history));
    }

    #[test]
    fn test_custom_params() {
        let params = CycleParams {
            luteal_phase_days: 12,
            ..CycleParams::default()
        };
        assert_eq!(params.ovulation(&sample_history()), Some(date(2024, 3, 26)));
    }

    #[test]
    fn test_end_of_calendar_yields_no_prediction() {
        let history = vec![PeriodRecord::starting(NaiveDate::MAX)];

        assert_eq!(predict_next_period(&history), None);
        assert_eq!(predict_ovulation(&history), None);
        assert_eq!(fertile_window(&history), None);
        assert_eq!(predict(&history), None);

        let markers = day_markers(NaiveDate::MAX, &history);
        assert!(markers.period);
        assert!(!markers.fertile);
        assert!(!markers.ovulation);
    }

    #[test]
    fn test_start_of_calendar_yields_no_window() {
        // Ovulation lands on MIN, so the window start underflows
        let params = CycleParams {
            default_cycle_length_days: 14,
            ..CycleParams::default()
        };
        let history = vec![PeriodRecord::starting(NaiveDate::MIN)];

        assert_eq!(params.ovulation(&history), Some(NaiveDate::MIN));
        assert_eq!(params.fertile_window(&history), None);
        assert_eq!(params.predict(&history), None);
    }

    #[test]
    fn test_oversized_params_yield_no_prediction() {
        let params = CycleParams {
            luteal_phase_days: i64::MAX,
            ..CycleParams::default()
        };
        assert_eq!(params.ovulation(&sample_history()), None);
        assert_eq!(params.predict(&sample_history()), None);
    }

    #[test]
    fn test_is_date_in_period_inclusive_bounds() {
        let history = sample_history();
        assert!(is_date_in_period(date(2024, 2, 12), &history));
        assert!(is_date_in_period(date(2024, 2, 16), &history));
        assert!(!is_date_in_period(date(2024, 2, 17), &history));
        assert!(!is_date_in_period(date(2024, 2, 11), &history));
    }

    #[test]
    fn test_is_date_in_period_single_day_record() {
        let history = vec![PeriodRecord::starting(date(2024, 6, 3))];
        assert!(is_date_in_period(date(2024, 6, 3), &history));
        assert!(!is_date_in_period(date(2024, 6, 4), &history));
    }

    #[test]
    fn test_flow_on() {
        let history = sample_history();
        assert_eq!(flow_on(date(2024, 2, 14), &history), Some(FlowIntensity::Heavy));
        assert_eq!(flow_on(date(2024, 2, 20), &history), None);
    }

    #[test]
    fn test_day_markers() {
        let history = sample_history();

        let ovulation_day = day_markers(date(2024, 3, 24), &history);
        assert!(ovulation_day.ovulation);
        assert!(ovulation_day.fertile);
        assert!(!ovulation_day.period);

        let window_edge = day_markers(date(2024, 3, 19), &history);
        assert!(window_edge.fertile);
        assert!(!window_edge.ovulation);

        let period_day = day_markers(date(2024, 3, 12), &history);
        assert!(period_day.period);
        assert_eq!(period_day.flow, Some(FlowIntensity::Light));
        assert!(!period_day.fertile);
    }
}
