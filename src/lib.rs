pub mod batch;
pub mod config;
pub mod report;
pub mod rewrite;
pub mod rules;

pub use config::Config;
