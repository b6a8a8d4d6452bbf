use anyhow::Result;
use log::info;

use crate::cli::CrawlArgs;
use crate::common::setup_logging;
use crate::crawl::CrawlLauncher;

/// Launch the crawl and return the process exit code (0 or 1)
pub fn run_crawl(args: CrawlArgs) -> Result<i32> {
    setup_logging(&args.log_level)?;

    info!("Starting schoolspider crawl");
    info!("School list: {}", args.file);
    info!("Runner: {}", args.runner);

    let launcher = CrawlLauncher::new(args.runner);
    Ok(launcher.launch(&args.file))
}
