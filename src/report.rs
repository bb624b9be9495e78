use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::batch::{BatchReport, FileError, FileOutcome, FileReport};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    command: &'a str,
    directory: String,
    dry_run: bool,
    finished_at: DateTime<Utc>,
    processed: usize,
    updated: usize,
    unchanged: usize,
    skipped: usize,
    failed: usize,
    files: Vec<JsonFile<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonFile<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn build_text(report: &BatchReport) -> String {
    let mut lines: Vec<String> = report
        .files
        .iter()
        .map(|file| file_line(file, report.dry_run))
        .collect();
    lines.push(String::new());
    lines.push(summary_line(report));
    lines.join("\n")
}

pub fn build_json(report: &BatchReport, finished_at: DateTime<Utc>) -> Result<String> {
    let files = report
        .files
        .iter()
        .map(|file| JsonFile {
            file: &file.name,
            title: file.title.as_deref(),
            status: status(&file.outcome),
            error: match &file.outcome {
                FileOutcome::Failed(err) => Some(failure(err)),
                _ => None,
            },
        })
        .collect();

    let body = JsonReport {
        command: report.command,
        directory: report.directory.display().to_string(),
        dry_run: report.dry_run,
        finished_at,
        processed: report.processed(),
        updated: report.updated(),
        unchanged: report.unchanged(),
        skipped: report.skipped(),
        failed: report.failed(),
        files,
    };
    Ok(serde_json::to_string_pretty(&body)?)
}

fn status(outcome: &FileOutcome) -> &'static str {
    match outcome {
        FileOutcome::Updated => "updated",
        FileOutcome::Unchanged => "unchanged",
        FileOutcome::Skipped => "skipped",
        FileOutcome::Failed(_) => "failed",
    }
}

fn file_line(file: &FileReport, dry_run: bool) -> String {
    let name = match &file.title {
        Some(title) => format!("{} ({title})", file.name),
        None => file.name.clone(),
    };
    match &file.outcome {
        FileOutcome::Updated if dry_run => format!("~ Would update {name}"),
        FileOutcome::Updated => format!("✓ Updated {name}"),
        FileOutcome::Unchanged => format!("- No changes needed for {name}"),
        FileOutcome::Skipped => format!("⊘ Skipping {name}"),
        FileOutcome::Failed(err) => format!("✗ {}", failure(err)),
    }
}

fn failure(err: &FileError) -> String {
    format!("{err}: {}", err.io_error())
}

fn summary_line(report: &BatchReport) -> String {
    let suffix = if report.dry_run { " (dry run)" } else { "" };
    if report.command == "inject-css" {
        return format!(
            "Injected responsive CSS into {} HTML files.{suffix}",
            report.updated()
        );
    }
    format!(
        "Done! Processed {} files: {} updated, {} unchanged, {} skipped, {} failed.{suffix}",
        report.processed(),
        report.updated(),
        report.unchanged(),
        report.skipped(),
        report.failed()
    )
}
