use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CheckArgs;
use crate::common::{setup_logging, CheckStats};
use crate::validation::{check_urls, CheckerConfig, Credentials, HttpFetcher};

fn checker_config(args: &CheckArgs) -> CheckerConfig {
    let credentials = match (&args.auth_user, &args.auth_password) {
        (Some(user), Some(password)) => Some(Credentials {
            user: user.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    CheckerConfig {
        input_path: PathBuf::from(&args.input),
        output_path: PathBuf::from(&args.output),
        log_dir: PathBuf::from(&args.log_dir),
        fetch_delay: Duration::from_secs(args.delay_secs),
        fetch_timeout: Duration::from_secs(args.timeout),
        credentials,
    }
}

pub async fn run_check_async(args: CheckArgs) -> Result<CheckStats> {
    setup_logging(&args.log_level)?;

    let config = checker_config(&args);

    info!("Starting school URL validity check");
    info!("Input: {}", config.input_path.display());
    info!("Output: {}", config.output_path.display());
    info!("Log directory: {}", config.log_dir.display());
    info!("Delay before each fetch: {}s", args.delay_secs);
    info!("Timeout: {}s", args.timeout);

    let fetcher = HttpFetcher::new(config.fetch_timeout, config.credentials.clone())
        .context("Failed to build HTTP client")?;

    check_urls(&config, fetcher).await
}

pub fn run_check(args: CheckArgs) -> Result<CheckStats> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_check_async(args))
}
