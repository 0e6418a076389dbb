//! Summaries over logged symptoms.

use crate::{MoodCount, SymptomCount, SymptomLog, SymptomSummary};
use std::collections::HashMap;

/// Number of symptoms reported by `summarize`
pub const MOST_COMMON_SYMPTOM_LIMIT: usize = 5;

/// Physical symptoms ranked by how many times they were logged.
///
/// Ties keep the order in which symptoms first appear.
pub fn most_common_symptoms(logs: &[SymptomLog], limit: usize) -> Vec<SymptomCount> {
    let mut counts: Vec<SymptomCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for symptom in logs.iter().flat_map(|log| log.physical_symptoms.iter()) {
        match index.get(symptom.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(symptom.as_str(), counts.len());
                counts.push(SymptomCount {
                    symptom: symptom.clone(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort preserves first-appearance order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Mean sleep over the logs that recorded it, 0.0 if none did
pub fn average_sleep_hours(logs: &[SymptomLog]) -> f64 {
    let hours: Vec<f64> = logs.iter().filter_map(|log| log.sleep_hours).collect();
    if hours.is_empty() {
        return 0.0;
    }
    hours.iter().sum::<f64>() / hours.len() as f64
}

/// How often each mood was logged, in first-appearance order
pub fn mood_distribution(logs: &[SymptomLog]) -> Vec<MoodCount> {
    let mut counts: Vec<MoodCount> = Vec::new();

    for mood in logs.iter().filter_map(|log| log.mood) {
        match counts.iter_mut().find(|c| c.mood == mood) {
            Some(existing) => existing.count += 1,
            None => counts.push(MoodCount { mood, count: 1 }),
        }
    }

    counts
}

pub fn summarize(logs: &[SymptomLog]) -> SymptomSummary {
    summarize_with_limit(logs, MOST_COMMON_SYMPTOM_LIMIT)
}

pub fn summarize_with_limit(logs: &[SymptomLog], limit: usize) -> SymptomSummary {
    tracing::debug!("Summarizing {} symptom logs", logs.len());

    SymptomSummary {
        total_logs: logs.len(),
        most_common: most_common_symptoms(logs, limit),
        average_sleep_hours: average_sleep_hours(logs),
        mood_distribution: mood_distribution(logs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mood;
    use chrono::NaiveDate;

    fn log(day: u32, mood: Option<Mood>, symptoms: &[&str], sleep: Option<f64>) -> SymptomLog {
        SymptomLog {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            mood,
            physical_symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            sleep_hours: sleep,
            sleep_quality: None,
            energy_level: None,
            notes: None,
        }
    }

    fn sample_logs() -> Vec<SymptomLog> {
        vec![
            log(1, Some(Mood::Happy), &["Cramps", "Bloating"], Some(7.0)),
            log(2, Some(Mood::Neutral), &["Headache", "Fatigue"], Some(6.0)),
            log(3, Some(Mood::Anxious), &["Breast Tenderness"], Some(8.0)),
            log(4, Some(Mood::Happy), &["Cramps", "Fatigue"], None),
            log(5, None, &["Cramps"], Some(7.5)),
        ]
    }

    #[test]
    fn test_most_common_symptoms_ranked() {
        let top = most_common_symptoms(&sample_logs(), 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].symptom, "Cramps");
        assert_eq!(top[0].count, 3);
        assert_eq!(top[1].symptom, "Fatigue");
        assert_eq!(top[1].count, 2);
        // Bloating appears before Headache
        assert_eq!(top[2].symptom, "Bloating");
    }

    #[test]
    fn test_most_common_symptoms_empty() {
        assert!(most_common_symptoms(&[], 5).is_empty());
    }

    #[test]
    fn test_average_sleep_skips_missing() {
        assert_eq!(average_sleep_hours(&sample_logs()), 7.125);
        assert_eq!(average_sleep_hours(&[]), 0.0);
    }

    #[test]
    fn test_mood_distribution() {
        let moods = mood_distribution(&sample_logs());
        assert_eq!(
            moods,
            vec![
                MoodCount { mood: Mood::Happy, count: 2 },
                MoodCount { mood: Mood::Neutral, count: 1 },
                MoodCount { mood: Mood::Anxious, count: 1 },
            ]
        );
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&sample_logs());
        assert_eq!(summary.total_logs, 5);
        assert_eq!(summary.most_common.len(), MOST_COMMON_SYMPTOM_LIMIT);
    }
}
