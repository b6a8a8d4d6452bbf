use log::{debug, error, info};
use std::process::Command;

/// Crawl command handed to the runner; the school list path is appended
pub const CRAWL_COMMAND_PREFIX: &str = "crawl schoolspider -a school_list=";

/// Default crawl runner program
pub const DEFAULT_RUNNER: &str = "scrapy";

/// Exit code reported when the crawl was dispatched and finished cleanly
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code reported for any dispatch failure
pub const EXIT_FAILURE: i32 = 1;

/// Launches the schoolspider crawl through an external runner process
#[derive(Debug, Clone)]
pub struct CrawlLauncher {
    runner: String,
}

impl CrawlLauncher {
    pub fn new(runner: impl Into<String>) -> Self {
        Self {
            runner: runner.into(),
        }
    }

    /// Build the crawl command for a school list file
    pub fn build_command(&self, file_path: &str) -> String {
        format!("{}{}", CRAWL_COMMAND_PREFIX, file_path)
    }

    /// Run the crawl once and report 0 on success, 1 on any failure.
    ///
    /// The command is split on whitespace, so paths containing spaces are
    /// passed to the runner as several arguments.
    pub fn launch(&self, file_path: &str) -> i32 {
        let command = self.build_command(file_path);
        println!("{} {}", self.runner, command);

        let tokens: Vec<&str> = command.split_whitespace().collect();
        debug!("Dispatching {} with args {:?}", self.runner, tokens);

        match Command::new(&self.runner).args(&tokens).status() {
            Ok(status) if status.success() => {
                info!("Crawl finished for {}", file_path);
                EXIT_SUCCESS
            }
            Ok(status) => {
                error!("Crawl runner exited with {}", status);
                EXIT_FAILURE
            }
            Err(e) => {
                error!("Failed to start crawl runner '{}': {}", self.runner, e);
                EXIT_FAILURE
            }
        }
    }
}

impl Default for CrawlLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_RUNNER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_command() {
        let launcher = CrawlLauncher::default();
        assert_eq!(
            launcher.build_command("lists/schools.csv"),
            "crawl schoolspider -a school_list=lists/schools.csv"
        );
        assert_eq!(launcher.runner, "scrapy");
    }

    #[test]
    fn test_launch_missing_runner_returns_failure() {
        let launcher = CrawlLauncher::new("definitely-not-a-crawl-runner-4f1c");
        assert_eq!(launcher.launch("schools.csv"), EXIT_FAILURE);
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_successful_runner() {
        let launcher = CrawlLauncher::new("true");
        assert_eq!(launcher.launch("schools.csv"), EXIT_SUCCESS);
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_failing_runner() {
        let launcher = CrawlLauncher::new("false");
        assert_eq!(launcher.launch("schools.csv"), EXIT_FAILURE);
    }
}
