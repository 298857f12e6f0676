/// Directory searched for run logs when none is given.
pub const DEFAULT_LOGS_DIR: &str = "logs";

/// How many values / lines a report section shows before summarizing the rest.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

pub(crate) const SERVER_STDOUT_PREFIX: &str = "server-";
pub(crate) const SERVER_STDOUT_SUFFIX: &str = ".stdout.log";
