use anyhow::Result;
use chrono::Utc;
use quizsmith::Config;
use quizsmith::batch;
use quizsmith::config::OutputFormat;
use quizsmith::report::{build_json, build_text};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_cli()?;
    let report = batch::run(&config)?;
    match config.format {
        OutputFormat::Text => println!("{}", build_text(&report)),
        OutputFormat::Json => println!("{}", build_json(&report, Utc::now())?),
    }
    Ok(())
}
