use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::rules::RuleSet;

const DEFAULT_QUIZ_DIR: &str = "quizzes";

#[derive(Debug, Parser)]
#[command(
    name = "quizsmith",
    version,
    about = "Batch maintenance for the static quiz pages: asset paths, back buttons and shared styles."
)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Directory holding the quiz pages.
    #[arg(long, env = "QUIZSMITH_DIR", default_value = DEFAULT_QUIZ_DIR)]
    pub dir: PathBuf,

    /// TOML file appending entries to the built-in lookup tables.
    #[arg(long, env = "QUIZSMITH_RULES")]
    pub rules: Option<PathBuf>,

    /// Report what would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Link the shared stylesheet, move script/data paths and replace the back button (default).
    Paths,
    /// Inject the mobile responsiveness overrides before </head>.
    InjectCss,
    /// Remove Leaflet tile layers from every quiz except the world ones.
    Baselayers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub quiz_dir: PathBuf,
    pub rules: RuleSet,
    pub dry_run: bool,
    pub format: OutputFormat,
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    UpdatePaths,
    InjectCss,
    StripBaselayers,
}

impl Config {
    pub fn from_cli() -> Result<Self> {
        let cli = Cli::parse();
        Config::from_parts(cli.common, cli.command)
    }

    pub fn from_parts(common: CommonArgs, command: Option<Command>) -> Result<Self> {
        if common.dir.as_os_str().is_empty() {
            return Err(anyhow!("quiz directory must not be empty"));
        }

        let rules = match &common.rules {
            Some(path) => RuleSet::load(path)?,
            None => RuleSet::builtin(),
        };

        let mode = match command {
            None | Some(Command::Paths) => Mode::UpdatePaths,
            Some(Command::InjectCss) => Mode::InjectCss,
            Some(Command::Baselayers) => Mode::StripBaselayers,
        };

        Ok(Self {
            quiz_dir: common.dir,
            rules,
            dry_run: common.dry_run,
            format: common.format,
            mode,
        })
    }
}
