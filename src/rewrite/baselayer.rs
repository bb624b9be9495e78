use anyhow::Result;

use super::{Rewriter, Rule};
use crate::rules::RuleSet;

const TILE_LAYER: &str = r"(?s)\s*L\.tileLayer\([^)]+\)\.[^;]+;?\s*";

/// Removes Leaflet tile layers from non-world quizzes.
#[derive(Debug, Clone)]
pub struct BaselayerStripper {
    rules: RuleSet,
    tile_layer: Rule,
}

impl BaselayerStripper {
    pub fn new(rules: RuleSet) -> Result<Self> {
        Ok(Self {
            rules,
            tile_layer: Rule::pattern(TILE_LAYER, "")?,
        })
    }
}

impl Rewriter for BaselayerStripper {
    fn command(&self) -> &'static str {
        "baselayers"
    }

    fn skips(&self, file_name: &str) -> bool {
        self.rules.is_skipped(file_name)
    }

    fn rewrite(&self, file_name: &str, content: &str) -> String {
        if self.rules.keeps_baselayer(file_name) {
            return content.to_string();
        }
        self.tile_layer.apply(content)
    }

    fn describe(&self, file_name: &str) -> Option<String> {
        Some(self.rules.quiz_title(file_name))
    }
}
