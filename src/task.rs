//! Task data structure and related functionality.
//!
//! A `Task` is one catalog milestone combined with the caregiver's own state
//! for it: status, notes and the work-in-progress marker.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{CatalogEntry, TaskKey};
use crate::fields::*;
use crate::i18n::task_text;

/// A milestone with its mutable tracking state.
///
/// `title` and `description` are the currently displayed text and are always
/// derived from `key`; they are kept on the record so saved data stays
/// readable on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub key: TaskKey,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub start_age: u32,
    pub end_age: u32,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub is_work_in_progress: bool,
    #[serde(default)]
    pub notes: String,
}

impl Task {
    /// Fresh task for a catalog entry, text in `lang`.
    pub fn seed(entry: &CatalogEntry, lang: Language) -> Self {
        let text = task_text(entry.key, lang);
        Task {
            id: Uuid::new_v4(),
            key: entry.key,
            title: text.title.to_string(),
            description: text.description.to_string(),
            category: entry.category,
            start_age: entry.start_age,
            end_age: entry.end_age,
            status: Status::NotStarted,
            is_work_in_progress: false,
            notes: String::new(),
        }
    }

    /// Replace displayed text with the `lang` variant.
    pub fn localize(&mut self, lang: Language) {
        let text = task_text(self.key, lang);
        if self.title != text.title {
            self.title = text.title.to_string();
        }
        if self.description != text.description {
            self.description = text.description.to_string();
        }
    }

    /// True when `age` falls inside the recommended window.
    pub fn is_applicable_at(&self, age: u32) -> bool {
        self.start_age <= age && age <= self.end_age
    }

    /// True when the child has not reached the window yet.
    pub fn is_upcoming_at(&self, age: u32) -> bool {
        age < self.start_age
    }

    /// True when the child is past the window.
    pub fn is_past_at(&self, age: u32) -> bool {
        age > self.end_age
    }

    /// "8-22" style age range.
    pub fn age_range(&self) -> String {
        format!("{}-{}", self.start_age, self.end_age)
    }
}
