use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "school-url-checker")]
#[command(about = "Launch the school crawler and confirm the validity of scraped school URLs")]
#[command(version = "1.0.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the schoolspider crawl for a school list file
    Crawl(CrawlArgs),

    /// Check scraped URLs against query ranking and page content
    Check(CheckArgs),
}

#[derive(Parser, Clone)]
pub struct CrawlArgs {
    /// School list file handed to the spider
    pub file: String,

    /// Crawl runner program that receives the crawl command
    #[arg(long, default_value = "scrapy")]
    pub runner: String,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct CheckArgs {
    /// Scraped school CSV; rewritten in place with validity columns
    #[arg(short, long, default_value = "./data/trial_output.csv")]
    pub input: String,

    /// CSV collecting rows with confirmed URLs (appended across runs)
    #[arg(short, long, default_value = "./data/trial_final_output.csv")]
    pub output: String,

    /// Directory for the per-run log file
    #[arg(long, default_value = ".")]
    pub log_dir: String,

    /// Seconds to wait before every page fetch
    #[arg(long, default_value = "15")]
    pub delay_secs: u64,

    /// Timeout in seconds per request
    #[arg(short, long, default_value = "5")]
    pub timeout: u64,

    /// Basic auth user sent with every request
    #[arg(long, requires = "auth_password")]
    pub auth_user: Option<String>,

    /// Basic auth password sent with every request
    #[arg(long, requires = "auth_user")]
    pub auth_password: Option<String>,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}
