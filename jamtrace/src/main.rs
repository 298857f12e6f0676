use clap::{Parser, Subcommand};
use jamtrace_core::cli;
use jamtrace_core::cli::analyze::AnalyzeArgs;
use jamtrace_core::cli::stamps::StampsArgs;
use jamtrace_core::logging::init_logging;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "jamtrace",
    version,
    about = "jamtrace: post-run analyzer for JammerNetz remote-control logs",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Used when no subcommand is given
    #[command(flatten)]
    analyze: AnalyzeArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the logs of one run (default)
    Analyze(AnalyzeArgs),

    /// List the run stamps found in a logs directory
    Stamps(StampsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();

    match cli.command {
        Some(Command::Analyze(args)) => run_analyze(&args),

        Some(Command::Stamps(args)) => ExitCode::from(cli::stamps::run(&args)),

        None => run_analyze(&cli.analyze),
    }
}

fn run_analyze(args: &AnalyzeArgs) -> ExitCode {
    match cli::analyze::run(args) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("analyze error: {e:#}");
            ExitCode::from(cli::EXIT_UNRESOLVED)
        }
    }
}
