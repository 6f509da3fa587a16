//! Age-band timeline geometry.
//!
//! The timeline splits childhood into five fixed display bands. A task's bar
//! covers every band its age window overlaps; bands share boundary ages, so a
//! 12-16 window touches "Under 12", "12 - 16" and "16 - 18".

use crate::fields::{Language, Status};
use crate::i18n::{label, Label};
use crate::task::Task;

/// One display band, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBand {
    pub lower: u32,
    pub upper: u32,
    header: Label,
}

pub const AGE_BANDS: [AgeBand; 5] = [
    AgeBand { lower: 0, upper: 12, header: Label::Under12 },
    AgeBand { lower: 12, upper: 16, header: Label::Ages12To16 },
    AgeBand { lower: 16, upper: 18, header: Label::Ages16To18 },
    AgeBand { lower: 18, upper: 22, header: Label::Ages18To22 },
    AgeBand { lower: 22, upper: 99, header: Label::Ages22Plus },
];

impl AgeBand {
    pub fn header(&self, lang: Language) -> &'static str {
        label(self.header, lang)
    }

    /// True when the age window `start..=end` touches this band.
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        start <= self.upper && end >= self.lower
    }

    pub fn contains(&self, age: u32) -> bool {
        self.lower <= age && age <= self.upper
    }
}

/// Index of the band a child of `age` sits in. Boundary ages belong to the
/// later band, matching the header a caregiver would read.
pub fn band_for_age(age: u32) -> usize {
    AGE_BANDS
        .iter()
        .rposition(|b| b.contains(age))
        .unwrap_or(AGE_BANDS.len() - 1)
}

/// First and last band indices covered by the task, `(0, 0)` when none.
pub fn band_span(task: &Task) -> (usize, usize) {
    let first = AGE_BANDS
        .iter()
        .position(|b| b.overlaps(task.start_age, task.end_age));
    let last = AGE_BANDS
        .iter()
        .rposition(|b| b.overlaps(task.start_age, task.end_age));
    (first.unwrap_or(0), last.unwrap_or(0))
}

/// How one band cell of a task's bar is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Empty,
    Plain,
    /// In-progress bars taper where the window starts and ends.
    Tapered { left: bool, right: bool },
}

pub fn segment(band: &AgeBand, task: &Task) -> Segment {
    if !band.overlaps(task.start_age, task.end_age) {
        return Segment::Empty;
    }
    if task.status != Status::InProgress {
        return Segment::Plain;
    }
    let left = band.contains(task.start_age);
    let right = band.contains(task.end_age);
    if left || right {
        Segment::Tapered { left, right }
    } else {
        Segment::Plain
    }
}
