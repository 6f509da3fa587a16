//! # Transition Planner
//!
//! A milestone checklist for caregivers planning a child's transition to
//! adulthood, with a full CLI and an interactive terminal timeline.
//!
//! ## Key Features
//!
//! - **Fixed Milestone Catalog**: 24 milestones across five categories, each
//!   with a recommended age window
//! - **Per-Milestone Progress**: status, a "working on it" marker and free-form notes
//! - **Age-Aware Timeline**: bars laid over five age bands with the child's current age marked
//! - **Three Languages**: English, Spanish and Vietnamese, switchable at any time
//! - **Local File Storage**: one small JSON file per saved entry
//!
//! ## Quick Start
//!
//! ```bash
//! # Set the child's birthday
//! tp birthday 2012-05-01
//!
//! # What should we be working on now?
//! tp list --applicable
//!
//! # Mark progress
//! tp status "Letter of Intent" in-progress
//! tp notes 10 "Draft started with the case worker"
//!
//! # Browse the timeline
//! tp ui
//! ```
//!
//! Data is stored in `~/.transition_planner/` unless `--data-dir` or
//! `$TP_DATA_DIR` points elsewhere.

pub mod catalog;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod i18n;
pub mod kv;
pub mod store;
pub mod task;
pub mod timeline;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}
