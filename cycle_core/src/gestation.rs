//! Gestational age, trimester and milestone lookup.
//!
//! Weeks are counted from the pregnancy start (usually the last menstrual
//! period) and always floored, never rounded.

use crate::milestones::MilestoneTable;
use crate::{GestationStatus, MilestoneEntry, PregnancyUpdate, Trimester, WeightChange};
use chrono::NaiveDate;

/// Length of a full-term pregnancy in weeks
pub const FULL_TERM_WEEKS: i64 = 40;

pub const FIRST_TRIMESTER_LAST_WEEK: i64 = 12;
pub const SECOND_TRIMESTER_LAST_WEEK: i64 = 27;

/// Completed weeks between `pregnancy_start` and `today`.
///
/// Negative when `today` precedes the start; callers decide how to clamp.
pub fn current_week(pregnancy_start: NaiveDate, today: NaiveDate) -> i64 {
    (today - pregnancy_start).num_days().div_euclid(7)
}

pub fn trimester(week: i64) -> Trimester {
    if week <= FIRST_TRIMESTER_LAST_WEEK {
        Trimester::First
    } else if week <= SECOND_TRIMESTER_LAST_WEEK {
        Trimester::Second
    } else {
        Trimester::Third
    }
}

/// Share of a full-term pregnancy elapsed, capped at 100
pub fn progress_percent(week: i64) -> f64 {
    (week as f64 / FULL_TERM_WEEKS as f64 * 100.0).min(100.0)
}

/// Most recent milestone reached by `week`.
///
/// Weeks before the first entry resolve to the first entry. This is not a
/// nearest-week match: week 19 resolves to week 16, not week 20.
pub fn milestone_for(week: i64, table: &MilestoneTable) -> &MilestoneEntry {
    table
        .entries()
        .iter()
        .rev()
        .find(|entry| entry.week <= week)
        .unwrap_or_else(|| table.first())
}

/// Days left until the due date; negative once overdue
pub fn days_until_due(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (due_date - today).num_days()
}

/// Week, trimester and progress for a pregnancy on `today`.
///
/// A start date in the future counts as week zero.
pub fn gestation_status(pregnancy_start: NaiveDate, today: NaiveDate) -> GestationStatus {
    let raw_week = current_week(pregnancy_start, today);
    if raw_week < 0 {
        tracing::debug!(
            "Pregnancy start {} is after {}, treating as week 0",
            pregnancy_start,
            today
        );
    }
    let current_week = raw_week.max(0);

    GestationStatus {
        current_week,
        trimester: trimester(current_week),
        progress_percent: progress_percent(current_week),
    }
}

/// Weight change across the updates that recorded a weight.
///
/// Updates may arrive in any order; the earliest and latest weeks are
/// compared. `None` until at least two weighed updates exist.
pub fn weight_change(updates: &[PregnancyUpdate]) -> Option<WeightChange> {
    let mut weighed: Vec<(i64, f64)> = updates
        .iter()
        .filter_map(|u| u.weight.map(|w| (u.week, w)))
        .collect();
    if weighed.len() < 2 {
        return None;
    }
    weighed.sort_by_key(|&(week, _)| week);

    let (first_week, first_weight) = *weighed.first()?;
    let (latest_week, latest_weight) = *weighed.last()?;
    tracing::debug!(
        "Weight {} at week {} -> {} at week {}",
        first_weight,
        first_week,
        latest_weight,
        latest_week
    );

    Some(WeightChange {
        first_week,
        first_weight,
        latest_week,
        latest_weight,
        change: latest_weight - first_weight,
    })
}
