pub mod check;
pub mod crawl;

pub use check::run_check;
pub use crawl::run_crawl;
