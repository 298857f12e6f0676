mod run;
pub mod tracing;

pub use run::{TestRun, apply_line, revision_line, send_line};
pub use tracing::{CapturedEvent, init_test_tracing};
