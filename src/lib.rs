pub mod cli;
pub mod commands;
pub mod common;
pub mod crawl;
pub mod validation;
