//! Text rewriters applied to a single quiz page.
//!
//! Every rewriter is a pure `&str -> String` transform. Reading, comparing
//! and writing files is left to [`crate::batch`].

mod baselayer;
mod css;
mod paths;

use anyhow::{Context, Result};
use regex::Regex;

pub use baselayer::BaselayerStripper;
pub use css::{CssInjector, RESPONSIVE_MARKER, RESPONSIVE_OVERRIDES};
pub use paths::{PathRewriter, SHARED_STYLESHEET};

/// A single substitution.
#[derive(Debug, Clone)]
pub enum Rule {
    Literal { from: String, to: String },
    Pattern { regex: Regex, to: String },
}

impl Rule {
    pub fn literal(from: impl Into<String>, to: impl Into<String>) -> Self {
        Rule::Literal {
            from: from.into(),
            to: to.into(),
        }
    }

    /// `to` may reference capture groups (`${1}`).
    pub fn pattern(pattern: &str, to: impl Into<String>) -> Result<Self> {
        let regex =
            Regex::new(pattern).with_context(|| format!("invalid rewrite pattern: {pattern}"))?;
        Ok(Rule::Pattern {
            regex,
            to: to.into(),
        })
    }

    pub fn matches(&self, content: &str) -> bool {
        match self {
            Rule::Literal { from, .. } => content.contains(from.as_str()),
            Rule::Pattern { regex, .. } => regex.is_match(content),
        }
    }

    /// Replaces every occurrence.
    pub fn apply(&self, content: &str) -> String {
        match self {
            Rule::Literal { from, to } => content.replace(from.as_str(), to),
            Rule::Pattern { regex, to } => regex.replace_all(content, to.as_str()).into_owned(),
        }
    }
}

/// Applies `rules` in order.
pub fn apply_all(rules: &[Rule], content: &str) -> String {
    rules
        .iter()
        .fold(content.to_string(), |text, rule| rule.apply(&text))
}

pub trait Rewriter {
    /// Subcommand name, used in reports.
    fn command(&self) -> &'static str;

    /// Files that must not be read at all.
    fn skips(&self, _file_name: &str) -> bool {
        false
    }

    fn rewrite(&self, file_name: &str, content: &str) -> String;

    /// Extra context shown next to a file name in text reports.
    fn describe(&self, _file_name: &str) -> Option<String> {
        None
    }
}
