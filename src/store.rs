//! The task store: single source of truth for milestone state.
//!
//! `TaskStore` owns the task list, the child's birthdate and the active
//! display language. Every mutation writes through to the backing
//! [`KeyValueStore`] immediately. Persistence problems never surface as
//! errors: unreadable data falls back to catalog defaults and failed writes
//! are logged while the in-memory state carries on.

use std::collections::{HashMap, HashSet};

use chrono::{Local, Months, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{seed_tasks, TaskKey, CATALOG};
use crate::error::{PlannerError, Result};
use crate::fields::*;
use crate::kv::{KeyValueStore, SAVED_BIRTHDAY, SAVED_LANGUAGE, SAVED_TASKS};
use crate::task::Task;

/// Age assumed for the child until a birthdate is entered.
pub const DEFAULT_AGE_YEARS: u32 = 12;

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole years between `birthdate` and `today`, floored, never negative.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(birthdate).unwrap_or(0)
}

/// Birthdate used when none has been saved.
pub fn default_birthdate(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(DEFAULT_AGE_YEARS * 12))
        .unwrap_or(today)
}

/// Per-status task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl Progress {
    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.completed
    }

    fn add(&mut self, status: Status) {
        match status {
            Status::NotStarted => self.not_started += 1,
            Status::InProgress => self.in_progress += 1,
            Status::Completed => self.completed += 1,
        }
    }
}

/// A saved task record as found on disk.
///
/// Older saves carry no `key` and may hold the title in any language.
/// Category and age window are always re-read from the catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedTask {
    id: Uuid,
    #[serde(default)]
    key: Option<TaskKey>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    is_work_in_progress: bool,
    #[serde(default)]
    notes: String,
}

/// Owner of all mutable milestone state.
#[derive(Debug)]
pub struct TaskStore<S: KeyValueStore> {
    kv: S,
    tasks: Vec<Task>,
    birthdate: NaiveDate,
    language: Language,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load saved state from `kv`, seeding from the catalog where nothing
    /// usable was saved.
    ///
    /// The result always holds exactly one task per catalog entry, in catalog
    /// order, with text in `language`.
    pub fn initialize(mut kv: S, language: Language) -> Self {
        let birthdate = match load_birthdate(&kv) {
            Ok(Some(date)) => date,
            Ok(None) => default_birthdate(today()),
            Err(e) => {
                warn!(error = %e, "falling back to default birthdate");
                default_birthdate(today())
            }
        };

        let (tasks, needs_save) = match load_saved_tasks(&kv) {
            Ok(Some(saved)) => reconcile(saved, language),
            Ok(None) => {
                info!("no saved tasks, seeding from catalog");
                (seed_tasks(language), true)
            }
            Err(e) => {
                warn!(error = %e, "saved tasks unusable, reseeding from catalog");
                (seed_tasks(language), true)
            }
        };

        if needs_save {
            // Keep ids stable across launches.
            write_json(&mut kv, SAVED_TASKS, &tasks);
        }

        let mut store = TaskStore { kv, tasks, birthdate, language };
        store.apply_age_rules();
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_by_key(&self, key: TaskKey) -> Option<&Task> {
        self.tasks.iter().find(|t| t.key == key)
    }

    /// Tasks of one category in catalog order.
    pub fn tasks_in(&self, category: Category) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.category == category)
    }

    /// Tasks whose age window contains the child's current age.
    pub fn applicable_tasks(&self) -> Vec<&Task> {
        let age = self.current_age();
        self.tasks.iter().filter(|t| t.is_applicable_at(age)).collect()
    }

    /// Status counts for one category.
    pub fn progress(&self, category: Category) -> Progress {
        let mut p = Progress::default();
        for t in self.tasks_in(category) {
            p.add(t.status);
        }
        p
    }

    pub fn birthdate(&self) -> NaiveDate {
        self.birthdate
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The child's age today. Recomputed on every call.
    pub fn current_age(&self) -> u32 {
        age_on(self.birthdate, today())
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_kv(self) -> S {
        self.kv
    }

    /// Replace the birthdate. Dates after today are rejected.
    pub fn set_birthdate(&mut self, date: NaiveDate) -> Result<()> {
        if date > today() {
            return Err(PlannerError::InvalidDate { date });
        }
        self.birthdate = date;
        debug!(%date, age = self.current_age(), "birthdate updated");
        self.apply_age_rules();
        write_json(&mut self.kv, SAVED_BIRTHDAY, &self.birthdate);
        self.save_tasks();
        Ok(())
    }

    /// Switch the display language, re-deriving every task's text.
    pub fn set_language(&mut self, lang: Language) {
        self.language = lang;
        for t in &mut self.tasks {
            t.localize(lang);
        }
        debug!(lang = lang.code(), "language changed");
        self.save_tasks();
        write_json(&mut self.kv, SAVED_LANGUAGE, &self.language);
    }

    pub fn update_status(&mut self, id: Uuid, status: Status) -> Result<()> {
        let task = self.task_mut(id)?;
        task.status = status;
        debug!(%id, ?status, "status updated");
        self.save_tasks();
        Ok(())
    }

    /// Replace a task's notes verbatim.
    pub fn update_notes(&mut self, id: Uuid, notes: impl Into<String>) -> Result<()> {
        let task = self.task_mut(id)?;
        task.notes = notes.into();
        debug!(%id, len = task.notes.len(), "notes updated");
        self.save_tasks();
        Ok(())
    }

    /// Set the work-in-progress flag, or toggle it when `value` is `None`.
    /// Returns the new value.
    pub fn set_work_in_progress(&mut self, id: Uuid, value: Option<bool>) -> Result<bool> {
        let task = self.task_mut(id)?;
        task.is_work_in_progress = value.unwrap_or(!task.is_work_in_progress);
        let now = task.is_work_in_progress;
        debug!(%id, wip = now, "work-in-progress updated");
        self.save_tasks();
        Ok(now)
    }

    /// Throw away all task state and reseed from the catalog.
    ///
    /// Saved tasks are cleared; the birthdate and language are kept.
    pub fn reset_to_default(&mut self) {
        self.tasks = seed_tasks(self.language);
        self.apply_age_rules();
        if let Err(e) = self.kv.remove(SAVED_TASKS) {
            warn!(error = %e, "could not clear saved tasks");
        }
        info!("tasks reset to defaults");
    }

    /// Re-evaluate statuses against the child's age.
    ///
    /// Tasks the child has not reached yet are only ever pinned to
    /// `NotStarted` when already `NotStarted`; progress made early is kept.
    fn apply_age_rules(&mut self) {
        let age = self.current_age();
        for t in &mut self.tasks {
            if t.is_upcoming_at(age) && t.status == Status::NotStarted {
                t.status = Status::NotStarted;
            }
        }
    }

    fn task_mut(&mut self, id: Uuid) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(PlannerError::NotFound { id })
    }

    fn save_tasks(&mut self) {
        write_json(&mut self.kv, SAVED_TASKS, &self.tasks);
    }
}

/// Serialize and store `value`, logging instead of failing.
fn write_json<S, T>(kv: &mut S, key: &'static str, value: &T)
where
    S: KeyValueStore,
    T: serde::Serialize + ?Sized,
{
    let bytes = match serde_json::to_vec_pretty(value) {
        Ok(b) => b,
        Err(e) => {
            warn!(key, error = %e, "could not encode entry");
            return;
        }
    };
    if let Err(e) = kv.set(key, &bytes) {
        warn!(key, error = %e, "could not save entry, keeping in-memory state");
    }
}

/// Language previously chosen with [`TaskStore::set_language`], if any.
pub fn saved_language<S: KeyValueStore>(kv: &S) -> Option<Language> {
    let bytes = kv.get(SAVED_LANGUAGE)?;
    match serde_json::from_slice(&bytes) {
        Ok(lang) => Some(lang),
        Err(source) => {
            let e = PlannerError::DecodeFailure { key: SAVED_LANGUAGE, source };
            warn!(error = %e, "ignoring saved language");
            None
        }
    }
}

fn load_birthdate<S: KeyValueStore>(kv: &S) -> Result<Option<NaiveDate>> {
    let Some(bytes) = kv.get(SAVED_BIRTHDAY) else {
        return Ok(None);
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| PlannerError::DecodeFailure { key: SAVED_BIRTHDAY, source })
}

/// Decode the saved list. A malformed list is an error; a malformed record
/// inside a well-formed list is skipped.
fn load_saved_tasks<S: KeyValueStore>(kv: &S) -> Result<Option<Vec<SavedTask>>> {
    let Some(bytes) = kv.get(SAVED_TASKS) else {
        return Ok(None);
    };
    let raw: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
        .map_err(|source| PlannerError::DecodeFailure { key: SAVED_TASKS, source })?;
    let mut saved = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<SavedTask>(value) {
            Ok(t) => saved.push(t),
            Err(e) => warn!(error = %e, "skipping unreadable saved task"),
        }
    }
    Ok(Some(saved))
}

/// Line saved records up with the catalog.
///
/// Returns the task list and whether it differs from what was saved.
fn reconcile(saved: Vec<SavedTask>, lang: Language) -> (Vec<Task>, bool) {
    let mut changed = false;
    let mut by_key: HashMap<TaskKey, SavedTask> = HashMap::new();
    let mut seen_ids = HashSet::new();

    for mut s in saved {
        let Some(key) = s.key.or_else(|| TaskKey::from_title(&s.title)) else {
            warn!(title = %s.title, "dropping saved task with no matching milestone");
            changed = true;
            continue;
        };
        if by_key.contains_key(&key) {
            warn!(?key, "dropping duplicate saved task");
            changed = true;
            continue;
        }
        if !seen_ids.insert(s.id) {
            s.id = Uuid::new_v4();
            changed = true;
        }
        if s.key.is_none() {
            changed = true;
        }
        by_key.insert(key, s);
    }

    let tasks = CATALOG
        .iter()
        .map(|e| match by_key.remove(&e.key) {
            Some(s) => {
                let mut t = Task {
                    id: s.id,
                    key: e.key,
                    title: s.title,
                    description: s.description,
                    category: e.category,
                    start_age: e.start_age,
                    end_age: e.end_age,
                    status: s.status,
                    is_work_in_progress: s.is_work_in_progress,
                    notes: s.notes,
                };
                t.localize(lang);
                t
            }
            None => {
                changed = true;
                Task::seed(e, lang)
            }
        })
        .collect();

    (tasks, changed)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::kv::MemoryStore;

    fn years_ago(n: u32) -> NaiveDate {
        today().checked_sub_months(Months::new(n * 12)).unwrap()
    }

    fn fresh() -> TaskStore<MemoryStore> {
        TaskStore::initialize(MemoryStore::new(), Language::English)
    }

    fn id_of(store: &TaskStore<MemoryStore>, key: TaskKey) -> Uuid {
        store.task_by_key(key).unwrap().id
    }

    /// Accepts reads, fails every write.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<Vec<u8>> {
            self.0.get(key)
        }
        fn set(&mut self, _key: &str, _bytes: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
        fn remove(&mut self, _key: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_initialize_without_saved_data() {
        let store = fresh();
        assert_eq!(store.tasks().len(), CATALOG.len());
        for t in store.tasks() {
            assert_eq!(t.status, Status::NotStarted);
            assert!(!t.is_work_in_progress);
            assert_eq!(t.notes, "");
        }
        assert_eq!(store.birthdate(), years_ago(12));
        assert_eq!(store.current_age(), 12);
        assert_eq!(store.language(), Language::English);
        // Seeded ids are saved straight away.
        assert!(store.kv().contains(SAVED_TASKS));
        assert!(!store.kv().contains(SAVED_BIRTHDAY));
    }

    #[test]
    fn test_persist_and_reload_roundtrip() {
        let mut kv = MemoryStore::new();
        let before = {
            let mut store = TaskStore::initialize(&mut kv, Language::English);
            let a = store.task_by_key(TaskKey::LetterOfIntent).unwrap().id;
            let b = store.task_by_key(TaskKey::WorkPrograms).unwrap().id;
            store.update_status(a, Status::Completed).unwrap();
            store.update_notes(b, "Asked the counselor about WorkAbility\nfollow up in May").unwrap();
            store.set_work_in_progress(b, Some(true)).unwrap();
            store.set_birthdate(years_ago(15)).unwrap();
            (store.tasks().to_vec(), store.birthdate())
        };

        let store = TaskStore::initialize(&mut kv, Language::English);
        assert_eq!(store.tasks(), &before.0[..]);
        assert_eq!(store.birthdate(), before.1);
    }

    #[test]
    fn test_language_roundtrip_restores_text() {
        let mut store = fresh();
        let original: Vec<(String, String)> = store
            .tasks()
            .iter()
            .map(|t| (t.title.clone(), t.description.clone()))
            .collect();

        store.set_language(Language::Spanish);
        assert_eq!(store.tasks()[0].title, "Participación en el IEP");
        store.set_language(Language::Vietnamese);
        assert_eq!(store.tasks()[0].title, "Tham Gia IEP");
        store.set_language(Language::English);

        let after: Vec<(String, String)> = store
            .tasks()
            .iter()
            .map(|t| (t.title.clone(), t.description.clone()))
            .collect();
        assert_eq!(original, after);
    }

    #[test]
    fn test_set_language_is_saved() {
        let mut kv = MemoryStore::new();
        {
            let mut store = TaskStore::initialize(&mut kv, Language::English);
            store.set_language(Language::Vietnamese);
        }
        assert_eq!(saved_language(&kv), Some(Language::Vietnamese));
        let store = TaskStore::initialize(&mut kv, Language::Vietnamese);
        assert_eq!(store.tasks()[0].title, "Tham Gia IEP");
    }

    #[test]
    fn test_initialize_localizes_saved_text() {
        let mut kv = MemoryStore::new();
        {
            let mut store = TaskStore::initialize(&mut kv, Language::English);
            store.set_language(Language::Spanish);
        }
        let store = TaskStore::initialize(&mut kv, Language::English);
        assert_eq!(store.tasks()[0].title, "IEP Participation");
    }

    #[test]
    fn test_status_update_is_isolated() {
        let mut store = fresh();
        let id = id_of(&store, TaskKey::HealthEducation);
        let others: Vec<Task> = store.tasks().iter().filter(|t| t.id != id).cloned().collect();

        store.update_status(id, Status::Completed).unwrap();
        assert_eq!(store.task(id).unwrap().status, Status::Completed);
        store.update_status(id, Status::NotStarted).unwrap();

        let after: Vec<Task> = store.tasks().iter().filter(|t| t.id != id).cloned().collect();
        assert_eq!(others, after);
    }

    #[test]
    fn test_reset_restores_seed_state() {
        let mut store = fresh();
        store.set_birthdate(years_ago(17)).unwrap();
        for (i, t) in store.tasks().to_vec().iter().enumerate() {
            store.update_status(t.id, Status::ALL[i % 3]).unwrap();
            store.update_notes(t.id, format!("note {i}")).unwrap();
            store.set_work_in_progress(t.id, None).unwrap();
        }

        store.reset_to_default();

        let seeds = seed_tasks(Language::English);
        assert_eq!(store.tasks().len(), seeds.len());
        for (t, s) in store.tasks().iter().zip(&seeds) {
            assert_eq!(Task { id: s.id, ..t.clone() }, *s);
        }
        assert_eq!(store.birthdate(), years_ago(17));
        assert!(!store.kv().contains(SAVED_TASKS));
        assert!(store.kv().contains(SAVED_BIRTHDAY));
    }

    #[test]
    fn test_reset_respects_language() {
        let mut store = fresh();
        store.set_language(Language::Spanish);
        store.reset_to_default();
        assert_eq!(store.tasks()[0].title, "Participación en el IEP");
    }

    #[test]
    fn test_fourteen_year_old_scenario() {
        let mut store = fresh();
        store.set_birthdate(years_ago(14)).unwrap();
        assert_eq!(store.current_age(), 14);

        let in_range = store.task_by_key(TaskKey::HighSchoolPlanning).unwrap();
        assert_eq!((in_range.start_age, in_range.end_age), (12, 16));
        assert!(in_range.is_applicable_at(14));

        let later = id_of(&store, TaskKey::PostHighSchoolPlanning);
        assert!(store.task(later).unwrap().is_upcoming_at(14));
        store.update_status(later, Status::Completed).unwrap();
        // Re-evaluating ages must not undo early progress.
        store.set_birthdate(years_ago(14)).unwrap();
        assert_eq!(store.task(later).unwrap().status, Status::Completed);

        let applicable = store.applicable_tasks();
        assert!(applicable.iter().any(|t| t.key == TaskKey::HighSchoolPlanning));
        assert!(!applicable.iter().any(|t| t.key == TaskKey::PostHighSchoolPlanning));
    }

    #[test]
    fn test_work_in_progress_toggle_and_set() {
        let mut store = fresh();
        let id = id_of(&store, TaskKey::AssistiveTechnology);
        assert!(store.set_work_in_progress(id, None).unwrap());
        assert!(!store.set_work_in_progress(id, None).unwrap());
        assert!(store.set_work_in_progress(id, Some(true)).unwrap());
        assert!(store.set_work_in_progress(id, Some(true)).unwrap());
        // Independent of status.
        assert_eq!(store.task(id).unwrap().status, Status::NotStarted);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut store = fresh();
        let missing = Uuid::new_v4();
        assert!(matches!(
            store.update_status(missing, Status::Completed),
            Err(PlannerError::NotFound { id }) if id == missing
        ));
        assert!(store.update_notes(missing, "x").is_err());
        assert!(store.set_work_in_progress(missing, None).is_err());
    }

    #[test]
    fn test_future_birthdate_rejected() {
        let mut store = fresh();
        let before = store.birthdate();
        let tomorrow = today().succ_opt().unwrap();
        assert!(matches!(
            store.set_birthdate(tomorrow),
            Err(PlannerError::InvalidDate { date }) if date == tomorrow
        ));
        assert_eq!(store.birthdate(), before);
        // Born today is fine.
        store.set_birthdate(today()).unwrap();
        assert_eq!(store.current_age(), 0);
    }

    #[test]
    fn test_garbage_bytes_reseed() {
        let mut kv = MemoryStore::new();
        kv.set(SAVED_TASKS, b"{not json").unwrap();
        kv.set(SAVED_BIRTHDAY, b"\"yesterday-ish\"").unwrap();
        let store = TaskStore::initialize(kv, Language::English);
        assert_eq!(store.tasks().len(), CATALOG.len());
        assert_eq!(store.birthdate(), years_ago(12));
        // The reseeded list replaced the garbage.
        let bytes = store.kv().get(SAVED_TASKS).unwrap();
        assert!(serde_json::from_slice::<Vec<Task>>(&bytes).is_ok());
    }

    #[test]
    fn test_legacy_records_match_by_title() {
        let id = Uuid::new_v4();
        let legacy = format!(
            r#"[{{
                "id": "{}",
                "title": "Carta de Intención",
                "description": "Comience una Carta de Intención; revísela anualmente",
                "category": "Adult Life",
                "startAge": 12,
                "endAge": 22,
                "status": "In Progress",
                "isWorkInProgress": true
            }},
            {{ "id": "{}", "title": "Walk the dog", "description": "" }}]"#,
            id.to_string().to_uppercase(),
            Uuid::new_v4(),
        );
        let mut kv = MemoryStore::new();
        kv.set(SAVED_TASKS, legacy.as_bytes()).unwrap();

        let store = TaskStore::initialize(kv, Language::English);
        assert_eq!(store.tasks().len(), CATALOG.len());
        let t = store.task(id).unwrap();
        assert_eq!(t.key, TaskKey::LetterOfIntent);
        assert_eq!(t.title, "Letter of Intent");
        assert_eq!(t.status, Status::InProgress);
        assert!(t.is_work_in_progress);
        assert_eq!(t.notes, "");
        assert!(!store.tasks().iter().any(|t| t.title == "Walk the dog"));
    }

    #[test]
    fn test_duplicate_and_bad_records_are_dropped() {
        let seeded = seed_tasks(Language::English);
        let mut records: Vec<serde_json::Value> =
            seeded.iter().map(|t| serde_json::to_value(t).unwrap()).collect();
        let mut dup = records[3].clone();
        dup["notes"] = "second copy".into();
        records.push(dup);
        records.push(serde_json::json!({ "title": "no id" }));

        let mut kv = MemoryStore::new();
        kv.set(SAVED_TASKS, &serde_json::to_vec(&records).unwrap()).unwrap();
        let store = TaskStore::initialize(kv, Language::English);
        assert_eq!(store.tasks(), &seeded[..]);
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let mut store = TaskStore::initialize(ReadOnlyStore::default(), Language::English);
        let id = store.tasks()[0].id;
        store.update_status(id, Status::InProgress).unwrap();
        store.set_language(Language::Spanish);
        store.reset_to_default();
        assert_eq!(store.tasks()[0].status, Status::NotStarted);
        assert_eq!(store.tasks()[0].title, "Participación en el IEP");
    }

    #[test]
    fn test_progress_counts() {
        let mut store = fresh();
        let ids: Vec<Uuid> = store.tasks_in(Category::EducationTraining).map(|t| t.id).collect();
        assert_eq!(ids.len(), 2);
        store.update_status(ids[0], Status::Completed).unwrap();
        let p = store.progress(Category::EducationTraining);
        assert_eq!(p, Progress { not_started: 1, in_progress: 0, completed: 1 });
        assert_eq!(p.total(), 2);
    }

    #[test]
    fn test_age_on_birthday_boundaries() {
        let birth = NaiveDate::from_ymd_opt(2010, 6, 15).unwrap();
        let on = |y, m, d| age_on(birth, NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(on(2024, 6, 14), 13);
        assert_eq!(on(2024, 6, 15), 14);
        assert_eq!(on(2024, 12, 31), 14);
        assert_eq!(on(2009, 1, 1), 0);
        assert_eq!(on(2010, 6, 15), 0);
        assert_eq!(on(2011, 6, 14), 0);
        assert_eq!(on(2011, 6, 15), 1);

        let leap = NaiveDate::from_ymd_opt(2008, 2, 29).unwrap();
        assert_eq!(age_on(leap, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()), 17);
        assert_eq!(age_on(leap, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), 18);
    }
}
