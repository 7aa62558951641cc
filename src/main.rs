use clap::Parser;
use gomsort::cli::{Cli, Commands};
use gomsort::commands::{
    check_files, init_config, sort_files, CheckConfig, SortConfig, EXIT_ERROR,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Sort {
            paths,
            dry_run,
            list,
            recursive,
            config,
            jobs,
            placement,
            explain,
            color,
            quiet,
            verbosity,
        } => sort_files(SortConfig {
            paths,
            dry_run,
            list,
            recursive,
            config,
            jobs,
            placement,
            explain,
            color,
            quiet,
            verbosity,
        }),
        Commands::Check {
            paths,
            config,
            jobs,
            color,
            verbosity,
        } => check_files(CheckConfig {
            paths,
            config,
            jobs,
            color,
            verbosity,
        }),
        Commands::Init { force } => {
            init_config(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// RUST_LOG wins over -v flags
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gomsort={level},warn")));

    // try_init also bridges `log` records into the subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
