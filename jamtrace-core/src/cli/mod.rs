pub mod analyze;
pub mod stamps;

/// Exit status when a run was analyzed (strict mode not triggered).
pub const EXIT_OK: u8 = 0;
/// Exit status in strict mode when anomalies were found.
pub const EXIT_ANOMALIES: u8 = 1;
/// Exit status when the logs directory, run stamp or config cannot be resolved.
pub const EXIT_UNRESOLVED: u8 = 2;

fn print_error(err: &dyn std::fmt::Display) {
    use owo_colors::OwoColorize;
    use std::io::{IsTerminal, stderr};

    if stderr().is_terminal() {
        eprintln!("{} {err}", "ERROR:".red().bold());
    } else {
        eprintln!("ERROR: {err}");
    }
}
