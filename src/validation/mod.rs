pub mod content;
pub mod http;
pub mod ledger;
pub mod runner;
pub mod table;
pub mod verdict;

pub use content::*;
pub use http::*;
pub use ledger::ValidityLedger;
pub use runner::*;
pub use table::*;
pub use verdict::*;

use std::path::PathBuf;
use std::time::Duration;

/// Default wait before every page fetch
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(15);
/// Default per-request timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for one run of the validity checker
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Scraped school CSV, rewritten in place with the annotations
    pub input_path: PathBuf,
    /// Confirmed-output CSV, appended across runs
    pub output_path: PathBuf,
    /// Directory receiving the per-run log file
    pub log_dir: PathBuf,
    pub fetch_delay: Duration,
    pub fetch_timeout: Duration,
    pub credentials: Option<Credentials>,
}

impl CheckerConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            log_dir: PathBuf::from("."),
            fetch_delay: DEFAULT_FETCH_DELAY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            credentials: None,
        }
    }
}
