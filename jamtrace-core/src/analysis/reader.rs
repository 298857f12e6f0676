use crate::analysis::constants::{SERVER_STDOUT_PREFIX, SERVER_STDOUT_SUFFIX};
use crate::analysis::discover::discover;
use crate::analysis::error::AnalyzeError;
use crate::analysis::types::RunStamp;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The closed set of log files belonging to one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunFiles {
    pub stamp: RunStamp,
    pub server_stdout: PathBuf,
    pub server_remote: PathBuf,
    /// Sorted by path.
    pub client_remotes: Vec<PathBuf>,
}

impl RunFiles {
    /// Builds the file set for `stamp`. The server paths are returned whether or not
    /// they exist; client logs are whatever matches `client*-remote-<stamp>.log`.
    pub fn for_stamp(logs_dir: &Path, stamp: RunStamp) -> Result<Self, AnalyzeError> {
        let server_stdout =
            logs_dir.join(format!("{SERVER_STDOUT_PREFIX}{stamp}{SERVER_STDOUT_SUFFIX}"));
        let server_remote = logs_dir.join(format!("server-remote-{stamp}.log"));
        let client_remotes = discover(logs_dir, &format!("client*-remote-{stamp}.log"))?;

        debug!(
            stamp = %stamp,
            clients = client_remotes.len(),
            "resolved run files"
        );

        Ok(Self {
            stamp,
            server_stdout,
            server_remote,
            client_remotes,
        })
    }
}

/// Resolves the files of one run.
///
/// Without an explicit `stamp` the most recent run in `logs_dir` is used.
pub fn resolve_run(logs_dir: &Path, stamp: Option<RunStamp>) -> Result<RunFiles, AnalyzeError> {
    if !logs_dir.is_dir() {
        return Err(AnalyzeError::LogsDirNotFound {
            path: logs_dir.to_path_buf(),
        });
    }

    let stamp = match stamp {
        Some(stamp) => stamp,
        None => find_latest_stamp(logs_dir)?.ok_or_else(|| AnalyzeError::NoRunStamp {
            path: logs_dir.to_path_buf(),
        })?,
    };

    RunFiles::for_stamp(logs_dir, stamp)
}

/// All run stamps that have a server stdout log in `logs_dir`, oldest first.
pub fn list_stamps(logs_dir: &Path) -> Result<Vec<RunStamp>, AnalyzeError> {
    let entries = fs::read_dir(logs_dir).map_err(|e| AnalyzeError::read_dir(logs_dir, e))?;

    let mut stamps: Vec<RunStamp> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| stamp_from_server_stdout(&entry.file_name().to_string_lossy()))
        .collect();

    stamps.sort();
    stamps.dedup();
    Ok(stamps)
}

pub fn find_latest_stamp(logs_dir: &Path) -> Result<Option<RunStamp>, AnalyzeError> {
    Ok(list_stamps(logs_dir)?.pop())
}

fn stamp_from_server_stdout(file_name: &str) -> Option<RunStamp> {
    let raw = file_name
        .strip_prefix(SERVER_STDOUT_PREFIX)?
        .strip_suffix(SERVER_STDOUT_SUFFIX)?;
    RunStamp::parse(raw).ok()
}

/// Reads a whole log file.
///
/// Never fails: a missing or unreadable file reads as empty, and bytes that are not
/// valid UTF-8 are replaced.
pub fn read_text(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "log file unavailable, reading as empty");
            String::new()
        }
    }
}
