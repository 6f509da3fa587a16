//! Enumerations and field types for milestone tracking.
//!
//! This module defines the fixed value sets used on every task: the five life
//! categories, the three-state completion status, and the supported display
//! languages.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::i18n::{label, Label};

/// Life-domain grouping for a milestone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[serde(alias = "Transition Planning")]
    TransitionPlanning,
    #[serde(alias = "Education and Training")]
    EducationTraining,
    #[serde(alias = "Adult Life")]
    AdultLife,
    #[serde(alias = "Self-Advocacy")]
    SelfAdvocacy,
    #[serde(alias = "Work Preparation")]
    WorkPreparation,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::TransitionPlanning,
        Category::EducationTraining,
        Category::AdultLife,
        Category::SelfAdvocacy,
        Category::WorkPreparation,
    ];

    /// SF Symbols icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Category::TransitionPlanning => "gear",
            Category::EducationTraining => "book.fill",
            Category::AdultLife => "person.2.fill",
            Category::SelfAdvocacy => "person.fill.viewfinder",
            Category::WorkPreparation => "briefcase.fill",
        }
    }

    pub fn label(self) -> Label {
        match self {
            Category::TransitionPlanning => Label::TransitionPlanning,
            Category::EducationTraining => Label::EducationTraining,
            Category::AdultLife => Label::AdultLife,
            Category::SelfAdvocacy => Label::SelfAdvocacy,
            Category::WorkPreparation => Label::WorkPreparation,
        }
    }

    /// Localized display name.
    pub fn name(self, lang: Language) -> &'static str {
        label(self.label(), lang)
    }
}

/// Task completion status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    #[serde(alias = "Not Started")]
    NotStarted,
    #[serde(alias = "In Progress")]
    InProgress,
    #[serde(alias = "Completed")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    /// SF Symbols icon name.
    pub fn icon(self) -> &'static str {
        match self {
            Status::NotStarted => "circle",
            Status::InProgress => "arrow.triangle.2.circlepath",
            Status::Completed => "checkmark.circle.fill",
        }
    }

    pub fn label(self) -> Label {
        match self {
            Status::NotStarted => Label::NotStarted,
            Status::InProgress => Label::InProgress,
            Status::Completed => Label::Completed,
        }
    }

    /// Localized display name.
    pub fn name(self, lang: Language) -> &'static str {
        label(self.label(), lang)
    }

    /// The next status in picker order, wrapping around.
    pub fn next(self) -> Status {
        match self {
            Status::NotStarted => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::NotStarted,
        }
    }

    /// The previous status in picker order, wrapping around.
    pub fn prev(self) -> Status {
        match self {
            Status::NotStarted => Status::Completed,
            Status::InProgress => Status::NotStarted,
            Status::Completed => Status::InProgress,
        }
    }
}

/// Display language.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en", alias = "english")]
    English,
    #[serde(rename = "es")]
    #[value(name = "es", alias = "spanish")]
    Spanish,
    #[serde(rename = "vi")]
    #[value(name = "vi", alias = "vietnamese")]
    Vietnamese,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Spanish, Language::Vietnamese];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::Vietnamese => "vi",
        }
    }

    /// The language's own name for itself, as shown in the language picker.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::Vietnamese => "Tiếng Việt",
        }
    }

    /// Cycle to the next language in picker order.
    pub fn next(self) -> Language {
        match self {
            Language::English => Language::Spanish,
            Language::Spanish => Language::Vietnamese,
            Language::Vietnamese => Language::English,
        }
    }

    /// Index into per-language string tables.
    pub(crate) fn index(self) -> usize {
        match self {
            Language::English => 0,
            Language::Spanish => 1,
            Language::Vietnamese => 2,
        }
    }
}
