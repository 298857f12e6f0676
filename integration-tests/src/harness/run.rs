use jamtrace_core::analysis::RunReport;
use jamtrace_core::cli::analyze::{AnalyzeArgs, analyze, exit_status, render};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A logs directory holding the files of one (or more) test runs.
///
/// Files are written the way the JammerNetz test launcher names them, so the
/// analyzer resolves them exactly as it would after a real run.
pub struct TestRun {
    dir: TempDir,
    stamp: String,
}

impl TestRun {
    pub fn new(stamp: &str) -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create logs dir"),
            stamp: stamp.to_string(),
        }
    }

    pub fn logs_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// Switches to another run stamp in the same directory.
    pub fn with_stamp(mut self, stamp: &str) -> Self {
        self.stamp = stamp.to_string();
        self
    }

    fn write(&self, name: String, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("failed to write fixture log");
        path
    }

    pub fn server_stdout(&self, text: &str) -> PathBuf {
        self.write(format!("server-{}.stdout.log", self.stamp), text)
    }

    pub fn server_remote(&self, lines: &[String]) -> PathBuf {
        self.write(
            format!("server-remote-{}.log", self.stamp),
            &remote_log(lines),
        )
    }

    /// Writes `<client>-remote-<stamp>.log`, e.g. `client = "client1"`.
    pub fn client_remote(&self, client: &str, lines: &[String]) -> PathBuf {
        self.write(
            format!("{client}-remote-{}.log", self.stamp),
            &remote_log(lines),
        )
    }

    pub fn client_file_name(&self, client: &str) -> String {
        format!("{client}-remote-{}.log", self.stamp)
    }

    pub fn args(&self) -> AnalyzeArgs {
        AnalyzeArgs {
            logs_dir: self.logs_dir().to_path_buf(),
            ..AnalyzeArgs::default()
        }
    }

    /// Analyzes with `args`, returning the report, its rendered text and the exit status.
    pub fn analyze_with(&self, args: &AnalyzeArgs) -> (RunReport, String, u8) {
        let (report, config) = analyze(args).expect("run should resolve");
        let text = render(&report, &config, args).expect("report should render");
        let status = exit_status(&report, args.strict);
        (report, text, status)
    }

    pub fn analyze(&self) -> (RunReport, String, u8) {
        self.analyze_with(&self.args())
    }
}

/// Header lines as written by the remote-control log writer, then `lines`.
fn remote_log(lines: &[String]) -> String {
    let mut out = String::from("# Remote control diagnostics\n# Sun 15 Feb 2026 11:28:04\n");
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn clock(ms: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        11 + ms / 3_600_000,
        (ms / 60_000) % 60,
        (ms / 1000) % 60,
        ms % 1000
    )
}

pub fn send_line(seq: u64) -> String {
    format!(
        "{} [client.send] SetRemoteVolume targetClientId=2 targetChannel=0 vol=0.75 seq={seq}",
        clock(seq * 10)
    )
}

pub fn apply_line(seq: u64) -> String {
    format!(
        "{} [client.apply] accept ApplyLocalVolume sourceClientId=1 targetChannel=-1 controllerIndex=0 vol=0.75 seq={seq}",
        clock(seq * 10 + 5)
    )
}

pub fn revision_line(revision: u64) -> String {
    format!(
        "{} [server.session] session revision={revision}",
        clock(revision * 10)
    )
}
