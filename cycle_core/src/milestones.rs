//! Fetal development milestone table.
//!
//! The built-in table covers ten reference weeks from conception to full
//! term. Lookups resolve a gestational week to the most recent milestone
//! reached, so the table must stay ordered by week.

use crate::{Error, MilestoneEntry, Result};
use once_cell::sync::Lazy;

/// Cached default table - built once and only ever read
static DEFAULT_MILESTONES: Lazy<MilestoneTable> = Lazy::new(|| MilestoneTable {
    entries: default_entries(),
});

/// Get a reference to the built-in milestone table
pub fn default_milestones() -> &'static MilestoneTable {
    &DEFAULT_MILESTONES
}

/// Builds a fresh copy of the built-in milestone table
///
/// **Note**: prefer `default_milestones()` outside of tests.
pub fn build_default_milestones() -> Result<MilestoneTable> {
    MilestoneTable::new(default_entries())
}

/// Non-empty milestone entries with strictly increasing weeks
#[derive(Clone, Debug, PartialEq)]
pub struct MilestoneTable {
    entries: Vec<MilestoneEntry>,
}

impl MilestoneTable {
    /// Build a table, rejecting entries that would make lookups ambiguous
    pub fn new(entries: Vec<MilestoneEntry>) -> Result<Self> {
        let errors = Self::validate(&entries);
        if !errors.is_empty() {
            return Err(Error::MilestoneTable(errors.join("; ")));
        }
        Ok(Self { entries })
    }

    /// Validate entries for ordering and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(entries: &[MilestoneEntry]) -> Vec<String> {
        let mut errors = Vec::new();

        if entries.is_empty() {
            errors.push("Milestone table has no entries".to_string());
        }

        for entry in entries {
            if entry.size.trim().is_empty() {
                errors.push(format!("Week {} has empty size", entry.week));
            }
            if entry.weight.trim().is_empty() {
                errors.push(format!("Week {} has empty weight", entry.week));
            }
        }

        for pair in entries.windows(2) {
            if pair[1].week <= pair[0].week {
                errors.push(format!(
                    "Week {} listed after week {}; weeks must strictly increase",
                    pair[1].week, pair[0].week
                ));
            }
        }

        errors
    }

    pub fn entries(&self) -> &[MilestoneEntry] {
        &self.entries
    }

    /// Entry with the smallest week, used for weeks before the table starts
    pub fn first(&self) -> &MilestoneEntry {
        // Construction rejects empty tables
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(week: i64, size: &str, weight: &str, developments: &[&str], tips: &[&str]) -> MilestoneEntry {
    MilestoneEntry {
        week,
        size: size.into(),
        weight: weight.into(),
        developments: developments.iter().map(|s| s.to_string()).collect(),
        tips: tips.iter().map(|s| s.to_string()).collect(),
    }
}

fn default_entries() -> Vec<MilestoneEntry> {
    vec![
        entry(
            1,
            "Poppy seed",
            "0.0 oz",
            &["Conception occurs", "Fertilized egg implants in uterus"],
            &["Start taking prenatal vitamins", "Maintain healthy lifestyle"],
        ),
        entry(
            8,
            "Kidney bean",
            "0.1 oz",
            &["Major organs forming", "Fingers and toes appear", "Heart beating"],
            &["Schedule first prenatal visit", "Stay hydrated"],
        ),
        entry(
            12,
            "Lime",
            "0.5 oz",
            &["All organs formed", "Fingers and toes separated", "Can make fists"],
            &["Consider announcing pregnancy", "Start pregnancy exercises"],
        ),
        entry(
            16,
            "Avocado",
            "3.5 oz",
            &["Skeleton hardening", "Can hear sounds", "Facial muscles developing"],
            &["Feel first movements soon", "Sleep on your side"],
        ),
        entry(
            20,
            "Banana",
            "10.6 oz",
            &["Hair growing", "Vernix coating skin", "Practice breathing"],
            &["Anatomy scan ultrasound", "Track fetal movements"],
        ),
        entry(
            24,
            "Ear of corn",
            "1.3 lbs",
            &["Lungs developing", "Taste buds forming", "Sleep cycles established"],
            &["Monitor for contractions", "Take childbirth classes"],
        ),
        entry(
            28,
            "Eggplant",
            "2.2 lbs",
            &["Eyes can open", "Brain developing rapidly", "Bones fully developed"],
            &["Start kick counts", "Plan maternity leave"],
        ),
        entry(
            32,
            "Squash",
            "3.8 lbs",
            &["Practicing breathing", "Gaining weight rapidly", "Moving less"],
            &["Pack hospital bag", "Install car seat"],
        ),
        entry(
            36,
            "Romaine lettuce",
            "5.8 lbs",
            &["Almost fully developed", "Gaining fat", "Head may engage"],
            &["Watch for labor signs", "Rest frequently"],
        ),
        entry(
            40,
            "Watermelon",
            "7.5 lbs",
            &["Full term", "Ready for birth", "Strong immune system"],
            &["Know labor signs", "Have birth plan ready"],
        ),
    ]
}
