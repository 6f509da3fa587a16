use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use transition_planner::cli::Cli;
use transition_planner::cmd::*;
use transition_planner::config::Config;
use transition_planner::store::TaskStore;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "transition_planner=debug"
    } else {
        "transition_planner=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Completions need no data directory.
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    let (config, kv) = match Config::from_env(cli.data_dir.as_deref(), cli.lang) {
        Ok(opened) => opened,
        Err(e) => {
            eprintln!("Failed to open data directory: {}", e);
            std::process::exit(1);
        }
    };
    debug!(data_dir = %config.data_dir.display(), lang = config.language.code(), "configuration resolved");

    let mut store = TaskStore::initialize(kv, config.language);

    match cli.command {
        Commands::Ui => cmd_ui(store),
        Commands::List { category, applicable, status } => cmd_list(&store, category, applicable, status),
        Commands::View { task } => cmd_view(&store, task),
        Commands::Status { task, status } => cmd_status(&mut store, task, status),
        Commands::Notes { task, text } => cmd_notes(&mut store, task, text),
        Commands::Wip { task, on, off } => cmd_wip(&mut store, task, on, off),
        Commands::Birthday { date } => cmd_birthday(&mut store, date),
        Commands::Lang { language } => cmd_lang(&mut store, language),
        Commands::Reset { yes } => cmd_reset(&mut store, yes),
        Commands::Summary => cmd_summary(&store),
        Commands::Completions { .. } => unreachable!("completions handled above"),
    }
}
