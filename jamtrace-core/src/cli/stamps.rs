use crate::analysis::{DEFAULT_LOGS_DIR, list_stamps};
use crate::cli::{EXIT_OK, EXIT_UNRESOLVED, print_error};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct StampsArgs {
    /// Directory containing run logs
    #[arg(long, default_value = DEFAULT_LOGS_DIR)]
    pub logs_dir: PathBuf,
}

/// Prints every run stamp in the logs directory, newest last.
pub fn run(args: &StampsArgs) -> u8 {
    match list_stamps(&args.logs_dir) {
        Ok(stamps) if stamps.is_empty() => {
            println!("no runs found in {}", args.logs_dir.display());
            EXIT_UNRESOLVED
        }
        Ok(stamps) => {
            for stamp in stamps {
                println!("{stamp}");
            }
            EXIT_OK
        }
        Err(err) => {
            print_error(&err);
            EXIT_UNRESOLVED
        }
    }
}
