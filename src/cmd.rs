//! Command implementations for the CLI interface.
//!
//! Each handler takes the loaded task store, performs one operation and
//! prints the outcome. Failures are reported on stderr with exit code 1.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use clap::Subcommand;
use clap_complete::{generate, Shell};
use uuid::Uuid;

use crate::catalog::TaskKey;
use crate::error::PlannerError;
use crate::fields::*;
use crate::i18n::{label, Label};
use crate::kv::KeyValueStore;
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive timeline interface.
    Ui,

    /// List milestones with optional filters.
    List {
        /// Only show this category.
        #[arg(long, value_enum)]
        category: Option<Category>,
        /// Only show milestones recommended for the child's current age.
        #[arg(long)]
        applicable: bool,
        /// Only show milestones with this status.
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Show one milestone in full.
    View {
        /// List position, id (or id prefix), or title in any language.
        task: String,
    },

    /// Set a milestone's status.
    Status {
        /// List position, id (or id prefix), or title in any language.
        task: String,
        /// not-started | in-progress | completed.
        #[arg(value_enum)]
        status: Status,
    },

    /// Replace a milestone's notes.
    Notes {
        /// List position, id (or id prefix), or title in any language.
        task: String,
        /// New notes text. Pass "" to clear.
        text: String,
    },

    /// Set or toggle the "working on it" marker.
    Wip {
        /// List position, id (or id prefix), or title in any language.
        task: String,
        /// Turn the marker on.
        #[arg(long, conflicts_with = "off")]
        on: bool,
        /// Turn the marker off.
        #[arg(long)]
        off: bool,
    },

    /// Show the child's birthday and age, or set a new birthday.
    Birthday {
        /// New birthday as YYYY-MM-DD.
        date: Option<String>,
    },

    /// Change the display language.
    Lang {
        /// en | es | vi.
        #[arg(value_enum)]
        language: Language,
    },

    /// Reset every milestone to its default state.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Progress per category.
    Summary,

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui<S: KeyValueStore>(store: TaskStore<S>) {
    if let Err(e) = run_tui(store) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// List milestones with optional filtering.
pub fn cmd_list<S: KeyValueStore>(
    store: &TaskStore<S>,
    category: Option<Category>,
    applicable: bool,
    status: Option<Status>,
) {
    let age = store.current_age();
    let rows: Vec<(usize, &Task)> = store
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            if let Some(c) = category {
                if t.category != c {
                    return false;
                }
            }
            if applicable && !t.is_applicable_at(age) {
                return false;
            }
            if let Some(s) = status {
                if t.status != s {
                    return false;
                }
            }
            true
        })
        .map(|(i, t)| (i + 1, t))
        .collect();

    if rows.is_empty() {
        println!("{}", label(Label::NoMatchingTasks, store.language()));
        return;
    }
    print_table(&rows, age, store.language());
}

/// Show every field of one milestone.
pub fn cmd_view<S: KeyValueStore>(store: &TaskStore<S>, task: String) {
    let id = resolve_or_exit(&task, store);
    let Some(t) = store.task(id) else {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    };
    let lang = store.language();
    let field = |l: Label| format!("{}:", label(l, lang));

    println!("{:<22} {}", field(Label::Id), t.id);
    println!("{:<22} {}", field(Label::Title), t.title);
    println!("{:<22} {}", field(Label::Category), t.category.name(lang));
    println!("{:<22} {}", field(Label::AgeRange), t.age_range());
    println!("{:<22} {}", field(Label::Status), t.status.name(lang));
    println!(
        "{:<22} {}",
        field(Label::WorkInProgress),
        label(if t.is_work_in_progress { Label::Yes } else { Label::No }, lang)
    );
    println!("{}\n{}\n", field(Label::TaskDetails), t.description);
    println!(
        "{}\n{}",
        field(Label::Notes),
        if t.notes.is_empty() { "-" } else { t.notes.as_str() }
    );
}

/// Set a milestone's status.
pub fn cmd_status<S: KeyValueStore>(store: &mut TaskStore<S>, task: String, status: Status) {
    let id = resolve_or_exit(&task, store);
    exit_on_err(store.update_status(id, status));
    println!("{} -> {}", title_of(store, id), status.name(store.language()));
}

/// Replace a milestone's notes.
pub fn cmd_notes<S: KeyValueStore>(store: &mut TaskStore<S>, task: String, text: String) {
    let id = resolve_or_exit(&task, store);
    let cleared = text.is_empty();
    exit_on_err(store.update_notes(id, text));
    let done = if cleared { Label::NotesCleared } else { Label::NotesUpdated };
    println!("{}: {}", label(done, store.language()), title_of(store, id));
}

/// Set or toggle the work-in-progress marker.
pub fn cmd_wip<S: KeyValueStore>(store: &mut TaskStore<S>, task: String, on: bool, off: bool) {
    let id = resolve_or_exit(&task, store);
    let value = match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let now = match store.set_work_in_progress(id, value) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let lang = store.language();
    println!(
        "{} {}: {}",
        title_of(store, id),
        label(Label::WorkInProgress, lang),
        label(if now { Label::Yes } else { Label::No }, lang)
    );
}

/// Show or set the child's birthday.
pub fn cmd_birthday<S: KeyValueStore>(store: &mut TaskStore<S>, date: Option<String>) {
    if let Some(raw) = date {
        let Some(date) = parse_birthdate(&raw) else {
            eprintln!("Invalid date '{}'. Use YYYY-MM-DD.", raw);
            std::process::exit(1);
        };
        exit_on_err(store.set_birthdate(date));
    }
    let lang = store.language();
    println!("{}: {}", label(Label::Birthday, lang), store.birthdate());
    println!(
        "{}: {} {}",
        label(Label::CurrentAge, lang),
        store.current_age(),
        label(Label::YearsOld, lang)
    );
}

/// Change and remember the display language.
pub fn cmd_lang<S: KeyValueStore>(store: &mut TaskStore<S>, language: Language) {
    store.set_language(language);
    println!("{}: {}", label(Label::Language, language), language.native_name());
}

/// Reset all milestones, asking first unless `yes` is set.
pub fn cmd_reset<S: KeyValueStore>(store: &mut TaskStore<S>, yes: bool) {
    let lang = store.language();
    if !yes {
        print!("{} [y/N] ", label(Label::ResetConfirmation, lang));
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() || !is_yes(&answer) {
            println!("{}", label(Label::Cancel, lang));
            return;
        }
    }
    store.reset_to_default();
    println!("{}", label(Label::TasksReset, lang));
}

/// Print completed/in-progress counts for each category.
pub fn cmd_summary<S: KeyValueStore>(store: &TaskStore<S>) {
    let lang = store.language();
    let open_now = store
        .applicable_tasks()
        .iter()
        .filter(|t| t.status != Status::Completed)
        .count();
    println!(
        "{} - {}: {} {}",
        label(Label::AppTitle, lang),
        label(Label::CurrentAge, lang),
        store.current_age(),
        label(Label::YearsOld, lang)
    );
    println!("{}: {}\n", label(Label::OpenForAge, lang), open_now);
    for c in Category::ALL {
        let p = store.progress(c);
        println!(
            "{:<30} {:>2}/{:<2} {}  {:>2} {}",
            c.name(lang),
            p.completed,
            p.total(),
            Status::Completed.name(lang),
            p.in_progress,
            Status::InProgress.name(lang),
        );
    }
}

/// Write shell completions to stdout.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

/// Resolve a task identifier to a task id.
///
/// Accepts, in order: a 1-based list position, a full id, an id prefix of at
/// least four characters, or a title in any supported language.
pub fn resolve_task_identifier<S: KeyValueStore>(identifier: &str, store: &TaskStore<S>) -> Result<Uuid, String> {
    let identifier = identifier.trim();
    let tasks = store.tasks();

    // All-digit input is a position when in range, otherwise maybe an id prefix.
    let position = identifier.parse::<usize>().ok();
    if let Some(t) = position.and_then(|p| p.checked_sub(1)).and_then(|i| tasks.get(i)) {
        return Ok(t.id);
    }

    if let Ok(id) = Uuid::parse_str(identifier) {
        return match store.task(id) {
            Some(t) => Ok(t.id),
            None => Err(format!("Task with ID {} not found", id)),
        };
    }

    let looks_like_prefix =
        identifier.len() >= 4 && identifier.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
    if looks_like_prefix {
        let prefix = identifier.to_ascii_lowercase();
        let matches: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.id.to_string().starts_with(&prefix))
            .collect();
        match matches.len() {
            1 => return Ok(matches[0].id),
            n if n > 1 => {
                return Err(format!(
                    "ID prefix '{}' matches {} tasks. Please use more characters.",
                    identifier, n
                ))
            }
            _ => {}
        }
    }

    TaskKey::from_title(identifier)
        .and_then(|key| store.task_by_key(key))
        .map(|t| t.id)
        .ok_or_else(|| match position {
            Some(pos) => format!(
                "No task at position {} (1-{}) and no ID starts with '{}'",
                pos,
                tasks.len(),
                identifier
            ),
            None => format!("No task found with identifier '{}'", identifier),
        })
}

/// Parse a YYYY-MM-DD birthday.
pub fn parse_birthdate(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí" | "có")
}

/// Print rows in a table. `*` marks milestones recommended at `age`.
pub fn print_table(rows: &[(usize, &Task)], age: u32, lang: Language) {
    for line in table_lines(rows, age, lang) {
        println!("{line}");
    }
}

/// Header plus one line per row. `★` marks the work-in-progress column.
fn table_lines(rows: &[(usize, &Task)], age: u32, lang: Language) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<3} {:<1} {:<16} {:<1} {:<11} {:<28} {}",
        "#",
        "",
        truncate(label(Label::Status, lang), 16),
        "★",
        truncate(label(Label::AgeRange, lang), 11),
        truncate(label(Label::Category, lang), 28),
        label(Label::Title, lang)
    )];
    for (pos, t) in rows {
        lines.push(format!(
            "{:<3} {:<1} {:<16} {:<1} {:<11} {:<28} {}",
            pos,
            if t.is_applicable_at(age) { "*" } else { "" },
            truncate(t.status.name(lang), 16),
            if t.is_work_in_progress { "★" } else { "" },
            t.age_range(),
            truncate(t.category.name(lang), 28),
            t.title,
        ));
    }
    lines
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

fn resolve_or_exit<S: KeyValueStore>(identifier: &str, store: &TaskStore<S>) -> Uuid {
    match resolve_task_identifier(identifier, store) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error resolving task: {}", e);
            std::process::exit(1);
        }
    }
}

fn exit_on_err(result: Result<(), PlannerError>) {
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn title_of<S: KeyValueStore>(store: &TaskStore<S>, id: Uuid) -> String {
    store.task(id).map(|t| t.title.clone()).unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn store() -> TaskStore<MemoryStore> {
        TaskStore::initialize(MemoryStore::new(), Language::English)
    }

    /// A store whose fourth task has a fixed id made of digits.
    fn store_with_digit_id() -> (TaskStore<MemoryStore>, Uuid) {
        let id = Uuid::parse_str("12345678-aaaa-4aaa-8aaa-aaaaaaaaaaaa").unwrap();
        let mut tasks = crate::catalog::seed_tasks(Language::English);
        tasks[3].id = id;
        let mut kv = MemoryStore::new();
        kv.set(crate::kv::SAVED_TASKS, &serde_json::to_vec(&tasks).unwrap()).unwrap();
        (TaskStore::initialize(kv, Language::English), id)
    }

    #[test]
    fn test_digit_only_id_prefix_falls_through_position() {
        let (s, id) = store_with_digit_id();
        assert_eq!(resolve_task_identifier("12345", &s), Ok(id));
        assert_eq!(resolve_task_identifier("12345678", &s), Ok(id));
        assert_eq!(resolve_task_identifier("12345678-aa", &s), Ok(id));
        // In-range positions still win.
        assert_eq!(resolve_task_identifier("4", &s), Ok(id));
        assert_eq!(resolve_task_identifier("1", &s), Ok(s.tasks()[0].id));
        let err = resolve_task_identifier("99999", &s).unwrap_err();
        assert!(err.contains("position 99999"), "{err}");
    }

    #[test]
    fn test_table_lines_are_localized() {
        let mut s = store();
        s.set_language(Language::Spanish);
        let id = s.tasks()[0].id;
        s.set_work_in_progress(id, Some(true)).unwrap();
        let rows: Vec<(usize, &Task)> = s.tasks().iter().take(1).map(|t| (1, t)).collect();
        let lines = table_lines(&rows, s.current_age(), s.language());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Estado"));
        assert!(lines[0].contains("Categoría"));
        assert!(lines[0].ends_with("Título"));
        assert!(!lines[0].contains("Status"));
        assert!(lines[1].contains("★"));
        assert!(lines[1].ends_with("Participación en el IEP"));
    }

    #[test]
    fn test_resolve_by_position() {
        let s = store();
        assert_eq!(resolve_task_identifier("1", &s), Ok(s.tasks()[0].id));
        assert_eq!(resolve_task_identifier(" 24 ", &s), Ok(s.tasks()[23].id));
        assert!(resolve_task_identifier("0", &s).is_err());
        assert!(resolve_task_identifier("25", &s).is_err());
    }

    #[test]
    fn test_resolve_by_id_and_prefix() {
        let s = store();
        let t = &s.tasks()[5];
        let full = t.id.to_string();
        assert_eq!(resolve_task_identifier(&full, &s), Ok(t.id));
        assert_eq!(resolve_task_identifier(&full.to_uppercase(), &s), Ok(t.id));
        // A 13-character prefix is unique among 24 random ids in practice.
        assert_eq!(resolve_task_identifier(&full[..13], &s), Ok(t.id));
        assert!(resolve_task_identifier(&Uuid::new_v4().to_string(), &s).is_err());
    }

    #[test]
    fn test_resolve_by_title_in_any_language() {
        let s = store();
        let id = s.task_by_key(TaskKey::PublicBenefits).unwrap().id;
        assert_eq!(resolve_task_identifier("public benefits", &s), Ok(id));
        assert_eq!(resolve_task_identifier("Beneficios Públicos", &s), Ok(id));
        assert_eq!(resolve_task_identifier("Phúc Lợi Công Cộng", &s), Ok(id));
        assert!(resolve_task_identifier("Tax returns", &s).is_err());
    }

    #[test]
    fn test_parse_birthdate() {
        assert_eq!(parse_birthdate("2012-03-04"), NaiveDate::from_ymd_opt(2012, 3, 4));
        assert_eq!(parse_birthdate(" 2012-03-04\n"), NaiveDate::from_ymd_opt(2012, 3, 4));
        assert_eq!(parse_birthdate("03/04/2012"), None);
        assert_eq!(parse_birthdate("2012-02-30"), None);
    }

    #[test]
    fn test_is_yes_accepts_each_language() {
        for a in ["y", "YES\n", "sí", "Có"] {
            assert!(is_yes(a), "{a}");
        }
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Hoàn Thành", 20), "Hoàn Thành");
        assert_eq!(truncate("Planificación de Transición", 8), "Planifi…");
    }
}
