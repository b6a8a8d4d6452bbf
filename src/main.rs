use anyhow::Result;
use clap::Parser;

use school_url_checker::cli::{Cli, Commands};
use school_url_checker::commands::{run_check, run_crawl};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(args) => {
            let code = run_crawl(args)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Check(args) => {
            run_check(args)?;
        }
    }

    Ok(())
}
