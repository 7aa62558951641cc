use crate::config::MethodPlacement;
use crate::formatting::ColorMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gomsort")]
#[command(about = "Sorts Go methods for readability", long_about = None)]
#[command(
    after_help = "Methods are sorted by:\n  1. Receiver type (grouped together)\n  2. Exported methods first\n  3. Entry points (low call depth) first\n  4. Helper methods (high in-degree) last"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sort methods in Go files and directories, rewriting files in place
    Sort {
        /// Files or directories to process
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Show what would be changed without modifying files
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,

        /// Only print the names of files whose method order changed
        #[arg(short, long)]
        list: bool,

        /// Descend into subdirectories
        #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
        recursive: bool,

        /// Configuration file (defaults to .msort.toml discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0", env = "GOMSORT_JOBS")]
        jobs: usize,

        /// Where to place the sorted methods (overrides the config file)
        #[arg(long, value_enum)]
        placement: Option<MethodPlacement>,

        /// Print the metrics behind each file's method order
        #[arg(long)]
        explain: bool,

        /// Color output
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorMode,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        /// -v: Report every processed file
        /// -vv: Debug logging
        /// -vvv: Trace pipeline stages
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Report files whose methods are not sorted, without modifying them
    Check {
        /// Files or directories to check
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Configuration file (defaults to .msort.toml discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0", env = "GOMSORT_JOBS")]
        jobs: usize,

        /// Color output
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorMode,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Sort { verbosity, .. } | Commands::Check { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_sort_defaults() {
        let cli = Cli::parse_from(["gomsort", "sort"]);
        match cli.command {
            Commands::Sort {
                paths,
                dry_run,
                recursive,
                jobs,
                placement,
                verbosity,
                ..
            } => {
                assert_eq!(paths, vec![PathBuf::from(".")]);
                assert!(!dry_run);
                assert!(recursive);
                assert_eq!(jobs, 0);
                assert_eq!(placement, None);
                assert_eq!(verbosity, 0);
            }
            _ => panic!("Expected Sort command"),
        }
    }

    #[test]
    fn test_cli_parsing_sort_flags() {
        let cli = Cli::parse_from([
            "gomsort",
            "sort",
            "-n",
            "--recursive=false",
            "--placement",
            "first-method",
            "-vv",
            "pkg",
            "main.go",
        ]);
        match cli.command {
            Commands::Sort {
                paths,
                dry_run,
                recursive,
                placement,
                verbosity,
                ..
            } => {
                assert_eq!(paths, vec![PathBuf::from("pkg"), PathBuf::from("main.go")]);
                assert!(dry_run);
                assert!(!recursive);
                assert_eq!(placement, Some(MethodPlacement::FirstMethod));
                assert_eq!(verbosity, 2);
            }
            _ => panic!("Expected Sort command"),
        }
    }

    #[test]
    fn test_cli_parsing_check_command() {
        let cli = Cli::parse_from(["gomsort", "check", "--color", "never", "src"]);
        match cli.command {
            Commands::Check { paths, color, .. } => {
                assert_eq!(paths, vec![PathBuf::from("src")]);
                assert_eq!(color, ColorMode::Never);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(["gomsort", "init", "--force"]);
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }
}
