//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::infrastructure::traits::IdStyle;

/// Editable outline trees: replay edit scripts against an outline and inspect the result
#[derive(Parser, Debug)]
#[command(name = "menutree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the starting outline
    Show {
        /// Show node ids next to the text
        #[arg(long)]
        ids: bool,
    },

    /// Replay a command script and print the resulting outline
    Run {
        /// Script with one command per line
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Fail on the first command that changes nothing
        #[arg(long)]
        strict: bool,
        /// Start from an empty outline instead of the sample
        #[arg(long)]
        empty: bool,
        /// Verify tree invariants after every command
        #[arg(long)]
        check: bool,
        /// Show node ids next to the text
        #[arg(long)]
        ids: bool,
        /// Override the configured id generator
        #[arg(long, value_enum)]
        id_style: Option<IdStyle>,
    },

    /// Replay a script verifying invariants after every command
    Check {
        /// Script with one command per line
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Start from an empty outline instead of the sample
        #[arg(long)]
        empty: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective configuration as TOML
    Show,
    /// Print the global config file location
    Path,
    /// Print a commented config template
    Template,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_run_flags_when_parsing_then_fields_set() {
        let cli = Cli::try_parse_from([
            "menutree", "-dd", "run", "edits.txt", "--strict", "--empty", "--id-style", "sequential",
        ])
        .unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Run {
                script,
                strict,
                empty,
                check,
                id_style,
                ..
            }) => {
                assert_eq!(script, PathBuf::from("edits.txt"));
                assert!(strict && empty && !check);
                assert_eq!(id_style, Some(IdStyle::Sequential));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
