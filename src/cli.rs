use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::Language;

/// Milestone checklist for transition-to-adulthood planning.
/// Data lives in ~/.transition_planner unless --data-dir or $TP_DATA_DIR says otherwise.
#[derive(Parser)]
#[command(name = "tp", version, about = "Transition planning milestone tracker")]
pub struct Cli {
    /// Directory holding the saved planner data.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Display language: en | es | vi. Defaults to the last language chosen.
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Status;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tp", "status", "3", "completed", "--lang", "vietnamese"]).unwrap();
        assert_eq!(cli.lang, Some(Language::Vietnamese));
        match cli.command {
            Commands::Status { task, status } => {
                assert_eq!(task, "3");
                assert_eq!(status, Status::Completed);
            }
            _ => panic!("expected status command"),
        }
    }

    #[test]
    fn test_wip_flags_conflict() {
        assert!(Cli::try_parse_from(["tp", "wip", "1", "--on", "--off"]).is_err());
        let cli = Cli::try_parse_from(["tp", "wip", "1"]).unwrap();
        assert!(matches!(cli.command, Commands::Wip { on: false, off: false, .. }));
    }
}
