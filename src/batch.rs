use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use glob::GlobError;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Config, Mode};
use crate::rewrite::{BaselayerStripper, CssInjector, PathRewriter, Rewriter};

#[derive(Debug, Error)]
pub enum FileError {
    #[error("Error reading {name}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("Error writing {name}")]
    Write {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    pub fn io_error(&self) -> &io::Error {
        match self {
            FileError::Read { source, .. } | FileError::Write { source, .. } => source,
        }
    }
}

#[derive(Debug)]
pub enum FileOutcome {
    Updated,
    Unchanged,
    Skipped,
    Failed(FileError),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub name: String,
    /// Display title, when the rewriter provides one.
    pub title: Option<String>,
    pub outcome: FileOutcome,
}

#[derive(Debug)]
pub struct BatchReport {
    pub command: &'static str,
    pub directory: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.files.len()
    }

    pub fn updated(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Updated))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Unchanged))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files
            .iter()
            .filter(|file| predicate(&file.outcome))
            .count()
    }
}

/// Runs the rewriter selected by `config.mode`.
pub fn run(config: &Config) -> Result<BatchReport> {
    let rewriter: Box<dyn Rewriter> = match config.mode {
        Mode::UpdatePaths => Box::new(PathRewriter::new(&config.rules)?),
        Mode::InjectCss => Box::new(CssInjector),
        Mode::StripBaselayers => Box::new(BaselayerStripper::new(config.rules.clone())?),
    };
    run_batch(&config.quiz_dir, rewriter.as_ref(), config.dry_run)
}

/// `*.html` files directly inside `dir`, in sorted order. Entries glob
/// could not read are kept as errors.
pub fn discover(dir: &Path) -> Result<Vec<Result<PathBuf, GlobError>>> {
    if !dir.is_dir() {
        return Err(anyhow!("quiz directory {} does not exist", dir.display()));
    }

    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*.html");
    let pattern_str = pattern.to_string_lossy();
    debug!(pattern = %pattern_str, "scanning for quiz pages");

    let mut files = Vec::new();
    for entry in glob::glob(&pattern_str).with_context(|| format!("bad glob {pattern_str}"))? {
        match entry {
            Ok(path) if path.is_file() => files.push(Ok(path)),
            Ok(_) => {}
            Err(err) => files.push(Err(err)),
        }
    }
    files.sort_by(|a, b| entry_path(a).cmp(entry_path(b)));
    Ok(files)
}

fn entry_path(entry: &Result<PathBuf, GlobError>) -> &Path {
    match entry {
        Ok(path) => path,
        Err(err) => err.path(),
    }
}

/// Runs `rewriter` over every page in `dir`. Per-file IO errors are
/// recorded in the report and never abort the batch.
pub fn run_batch(dir: &Path, rewriter: &dyn Rewriter, dry_run: bool) -> Result<BatchReport> {
    let files = discover(dir)?;
    info!(
        command = rewriter.command(),
        directory = %dir.display(),
        count = files.len(),
        dry_run,
        "starting batch"
    );

    let files = files
        .into_iter()
        .map(|entry| match entry {
            Ok(path) => process_file(path, rewriter, dry_run),
            Err(err) => unreadable_entry(err, rewriter),
        })
        .collect();

    Ok(BatchReport {
        command: rewriter.command(),
        directory: dir.to_path_buf(),
        dry_run,
        files,
    })
}

pub fn process_file(path: PathBuf, rewriter: &dyn Rewriter, dry_run: bool) -> FileReport {
    let name = file_name(&path);
    let outcome = rewrite_file(&path, &name, rewriter, dry_run);
    file_report(path, name, rewriter, outcome)
}

fn unreadable_entry(err: GlobError, rewriter: &dyn Rewriter) -> FileReport {
    let path = err.path().to_path_buf();
    let name = file_name(&path);
    let outcome = FileOutcome::Failed(FileError::Read {
        name: name.clone(),
        source: err.into_error(),
    });
    file_report(path, name, rewriter, outcome)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_report(
    path: PathBuf,
    name: String,
    rewriter: &dyn Rewriter,
    outcome: FileOutcome,
) -> FileReport {
    match &outcome {
        FileOutcome::Failed(err) => warn!(file = %name, error = %err.io_error(), "{err}"),
        other => debug!(file = %name, outcome = ?other, "processed"),
    }

    FileReport {
        path,
        title: rewriter.describe(&name),
        name,
        outcome,
    }
}

fn rewrite_file(path: &Path, name: &str, rewriter: &dyn Rewriter, dry_run: bool) -> FileOutcome {
    if rewriter.skips(name) {
        return FileOutcome::Skipped;
    }

    let original = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(source) => {
            return FileOutcome::Failed(FileError::Read {
                name: name.to_string(),
                source,
            });
        }
    };

    let updated = rewriter.rewrite(name, &original);
    if updated == original {
        return FileOutcome::Unchanged;
    }
    if dry_run {
        return FileOutcome::Updated;
    }

    match fs::write(path, updated) {
        Ok(()) => FileOutcome::Updated,
        Err(source) => FileOutcome::Failed(FileError::Write {
            name: name.to_string(),
            source,
        }),
    }
}
