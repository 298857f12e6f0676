use crate::analysis::{
    AnalyzeError, DEFAULT_LOGS_DIR, RunReport, RunStamp, analyze_run, render_json, render_report,
    resolve_run,
};
use crate::cli::{EXIT_ANOMALIES, EXIT_OK, EXIT_UNRESOLVED, print_error};
use crate::conf::{AnalyzerConfig, load_optional_config};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory containing run logs
    #[arg(long, default_value = DEFAULT_LOGS_DIR)]
    pub logs_dir: PathBuf,

    /// Run stamp (e.g. 20260215-112804). Defaults to the latest run.
    #[arg(long)]
    pub stamp: Option<String>,

    /// Exit with code 1 if anomalies are detected
    #[arg(long)]
    pub strict: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// List the verbatim drop lines of each client
    #[arg(long)]
    pub show_drops: bool,

    /// Path to an HCL analyzer config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            stamp: None,
            strict: false,
            json: false,
            show_drops: false,
            config: None,
        }
    }
}

/// Resolves, loads and analyzes one run without printing anything.
pub fn analyze(args: &AnalyzeArgs) -> Result<(RunReport, AnalyzerConfig), AnalyzeError> {
    let config = load_optional_config(args.config.as_deref())?;
    let stamp = args.stamp.as_deref().map(RunStamp::parse).transpose()?;

    let files = resolve_run(&args.logs_dir, stamp)?;
    let report = analyze_run(&files, &config.analysis_options()?);

    Ok((report, config))
}

pub fn render(report: &RunReport, config: &AnalyzerConfig, args: &AnalyzeArgs) -> Result<String> {
    if args.json {
        let mut json = render_json(report)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_report(report, &config.render_options(args.show_drops)))
    }
}

/// Runs the `analyze` command and returns the process exit status.
pub fn run(args: &AnalyzeArgs) -> Result<u8> {
    let (report, config) = match analyze(args) {
        Ok(analyzed) => analyzed,
        Err(err) => {
            print_error(&err);
            return Ok(EXIT_UNRESOLVED);
        }
    };

    print!("{}", render(&report, &config, args)?);

    Ok(exit_status(&report, args.strict))
}

pub fn exit_status(report: &RunReport, strict: bool) -> u8 {
    if strict && report.has_anomalies() {
        EXIT_ANOMALIES
    } else {
        EXIT_OK
    }
}
