pub mod logging;
pub mod output;
pub mod progress;
pub mod run_log;
pub mod types;
pub mod utils;

pub use logging::*;
pub use output::*;
pub use progress::create_count_progress_bar;
pub use run_log::RunLog;
pub use types::*;
pub use utils::*;
