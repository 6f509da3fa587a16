//! The fixed milestone curriculum.
//!
//! Each entry pairs a canonical [`TaskKey`] with its category and recommended
//! age window. Display text is never stored here; it is looked up from the
//! localization table by key, so the catalog is the same for every language.

use serde::{Deserialize, Serialize};

use crate::fields::{Category, Language};
use crate::task::Task;

/// Language-independent identity of a catalog milestone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKey {
    IepParticipation,
    DisabilityUnderstanding,
    IndividualTransitionPlan,
    SelfCareRoutines,
    HighSchoolPlanning,
    PostHighSchoolPlanning,
    LegalDocuments,
    DecisionMakingAssessment,
    HealthcareTransition,
    LetterOfIntent,
    AdultOptions,
    PublicBenefits,
    FinancialPlanning,
    RegionalCenterServices,
    IndependenceSkills,
    TransportationStrategies,
    SelfAdvocacySkills,
    AssistiveTechnology,
    HealthEducation,
    DisabilityRights,
    WorkPrograms,
    CareerPlanning,
    WorkExperience,
    EmploymentServices,
}

/// One milestone definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: TaskKey,
    pub category: Category,
    pub start_age: u32,
    pub end_age: u32,
}

const fn entry(key: TaskKey, category: Category, start_age: u32, end_age: u32) -> CatalogEntry {
    CatalogEntry { key, category, start_age, end_age }
}

/// Milestones grouped by category, ascending start age within each group.
pub const CATALOG: &[CatalogEntry] = &[
    // Transition Planning
    entry(TaskKey::IepParticipation, Category::TransitionPlanning, 8, 22),
    entry(TaskKey::DisabilityUnderstanding, Category::TransitionPlanning, 8, 16),
    entry(TaskKey::IndividualTransitionPlan, Category::TransitionPlanning, 8, 16),
    entry(TaskKey::SelfCareRoutines, Category::TransitionPlanning, 8, 14),
    entry(TaskKey::HighSchoolPlanning, Category::TransitionPlanning, 12, 16),
    entry(TaskKey::PostHighSchoolPlanning, Category::TransitionPlanning, 16, 18),
    entry(TaskKey::LegalDocuments, Category::TransitionPlanning, 18, 22),
    // Education and Training
    entry(TaskKey::DecisionMakingAssessment, Category::EducationTraining, 12, 16),
    entry(TaskKey::HealthcareTransition, Category::EducationTraining, 16, 18),
    // Adult Life
    entry(TaskKey::LetterOfIntent, Category::AdultLife, 12, 22),
    entry(TaskKey::AdultOptions, Category::AdultLife, 12, 22),
    entry(TaskKey::PublicBenefits, Category::AdultLife, 12, 22),
    entry(TaskKey::FinancialPlanning, Category::AdultLife, 12, 22),
    entry(TaskKey::RegionalCenterServices, Category::AdultLife, 16, 18),
    // Self-Advocacy
    entry(TaskKey::IndependenceSkills, Category::SelfAdvocacy, 8, 22),
    entry(TaskKey::TransportationStrategies, Category::SelfAdvocacy, 12, 18),
    entry(TaskKey::SelfAdvocacySkills, Category::SelfAdvocacy, 12, 22),
    entry(TaskKey::AssistiveTechnology, Category::SelfAdvocacy, 12, 22),
    entry(TaskKey::HealthEducation, Category::SelfAdvocacy, 12, 16),
    entry(TaskKey::DisabilityRights, Category::SelfAdvocacy, 16, 22),
    // Work Preparation
    entry(TaskKey::WorkPrograms, Category::WorkPreparation, 12, 22),
    entry(TaskKey::CareerPlanning, Category::WorkPreparation, 16, 18),
    entry(TaskKey::WorkExperience, Category::WorkPreparation, 16, 18),
    entry(TaskKey::EmploymentServices, Category::WorkPreparation, 16, 22),
];

impl TaskKey {
    /// Catalog entry for this key.
    pub fn entry(self) -> &'static CatalogEntry {
        // Variants are declared in catalog order.
        &CATALOG[self as usize]
    }

    /// Zero-based catalog position.
    pub fn position(self) -> usize {
        self as usize
    }
}

/// Build a fresh task list from the catalog with text in `lang`.
///
/// Used both for first-run seeding and for resets.
pub fn seed_tasks(lang: Language) -> Vec<Task> {
    CATALOG.iter().map(|e| Task::seed(e, lang)).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::fields::Status;

    #[test]
    fn test_catalog_well_formed() {
        for e in CATALOG {
            assert!(e.start_age <= e.end_age, "{:?} has inverted ages", e.key);
            assert!(e.end_age <= 99);
            assert!(Category::ALL.contains(&e.category));
        }
    }

    #[test]
    fn test_keys_unique_and_entry_lookup_consistent() {
        let keys: HashSet<TaskKey> = CATALOG.iter().map(|e| e.key).collect();
        assert_eq!(keys.len(), CATALOG.len());
        for (i, e) in CATALOG.iter().enumerate() {
            assert_eq!(e.key.entry(), e);
            assert_eq!(e.key.position(), i);
        }
    }

    #[test]
    fn test_grouped_by_category_with_ascending_start_age() {
        let mut last_category_pos = 0;
        let mut last: Option<&CatalogEntry> = None;
        for e in CATALOG {
            let pos = Category::ALL.iter().position(|c| *c == e.category).unwrap();
            assert!(pos >= last_category_pos, "{:?} out of category order", e.key);
            if let Some(prev) = last {
                if prev.category == e.category {
                    assert!(prev.start_age <= e.start_age, "{:?} out of age order", e.key);
                }
            }
            last_category_pos = pos;
            last = Some(e);
        }
        for c in Category::ALL {
            assert!(CATALOG.iter().any(|e| e.category == c), "{:?} is empty", c);
        }
    }

    #[test]
    fn test_seed_tasks_defaults() {
        let tasks = seed_tasks(Language::English);
        assert_eq!(tasks.len(), CATALOG.len());
        let ids: HashSet<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), tasks.len());
        for (t, e) in tasks.iter().zip(CATALOG) {
            assert_eq!(t.key, e.key);
            assert_eq!(t.category, e.category);
            assert_eq!((t.start_age, t.end_age), (e.start_age, e.end_age));
            assert_eq!(t.status, Status::NotStarted);
            assert!(!t.is_work_in_progress);
            assert!(t.notes.is_empty());
        }
        assert_eq!(tasks[0].title, "IEP Participation");
    }
}
