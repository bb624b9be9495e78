use anyhow::Result;
use tracing::debug;

use super::{Rewriter, Rule, apply_all};
use crate::rules::RuleSet;

/// Presence of this name means the shared stylesheet is already linked.
pub const SHARED_STYLESHEET: &str = "quiz-shared.css";

const LEAFLET_LINK: &str =
    r#"<link rel="stylesheet" href="https://unpkg.com/leaflet/dist/leaflet.css" />"#;
const SHARED_LINK: &str = r#"<link rel="stylesheet" href="../css/quiz-shared.css" />"#;

/// `back-btn` as a class token in any attribute spelling; `.back-btn` selectors don't count.
const BACK_BUTTON_MARKER: &str = r#"class\s*=\s*["'][^"']*\bback-btn\b"#;
const SCORE_DIV: &str = r#"<div id="score""#;
const BACK_ICON: &str = r#"<svg viewBox="0 0 24 24"><path d="M19 12H5M12 19l-7-7 7-7"/></svg>"#;

const STATUS_SCRIPT: &str = "quiz_status.js";
const COMMON_SCRIPT_SRC: &str = r#"src="../js/quiz_common.js""#;

/// Score and question divs sit next to each other in the quiz header.
const QUESTION_ANCHOR: &str = r#"</div>(\r?\n[ \t]*)<div id="question""#;
const INLINE_BACK_BUTTON_CSS: &str =
    r"\n\s*\.back-btn\s*\{[^}]*\}\s*\n\s*\.back-btn:hover\s*\{[^}]*\}";

/// Moves a quiz page onto the shared `css/`, `js/` and `data/` layout.
#[derive(Debug, Clone)]
pub struct PathRewriter {
    shared_link: Rule,
    asset_paths: Vec<Rule>,
    old_back_buttons: Vec<Rule>,
    index_href: Rule,
    back_button_marker: Rule,
    header_back_button: Rule,
    fallback_back_button: Rule,
    inline_back_button_css: Rule,
    status_script: Rule,
}

impl PathRewriter {
    pub fn new(rules: &RuleSet) -> Result<Self> {
        let mut asset_paths = Vec::new();
        for script in &rules.script_files {
            asset_paths.push(Rule::literal(
                format!(r#"src="{script}""#),
                format!(r#"src="../js/{script}""#),
            ));
        }
        for csv in &rules.csv_files {
            asset_paths.extend(quoted_prefix(csv, "../data/csv/"));
        }
        for geojson in &rules.geojson_files {
            asset_paths.extend(quoted_prefix(geojson, "../data/geojson/"));
        }

        let old_back_buttons = rules
            .old_back_buttons
            .iter()
            .map(|snippet| Rule::literal(snippet.as_str(), ""))
            .collect();

        let header_button =
            format!(r#"<a href="../index.html" class="back-btn">{BACK_ICON} Back</a>"#);
        let fixed_button = format!(
            r#"<a href="../index.html" class="back-btn" style="position:fixed;bottom:20px;left:20px;z-index:1000;">{BACK_ICON} Back</a>"#
        );

        Ok(Self {
            shared_link: Rule::literal(LEAFLET_LINK, format!("{LEAFLET_LINK}\n    {SHARED_LINK}")),
            asset_paths,
            old_back_buttons,
            index_href: Rule::literal(r#"href="index.html""#, r#"href="../index.html""#),
            back_button_marker: Rule::pattern(BACK_BUTTON_MARKER, "")?,
            header_back_button: Rule::pattern(
                QUESTION_ANCHOR,
                format!(r#"</div>${{1}}{header_button}${{1}}<div id="question""#),
            )?,
            fallback_back_button: Rule::literal("</body>", format!("    {fixed_button}\n</body>")),
            inline_back_button_css: Rule::pattern(INLINE_BACK_BUTTON_CSS, "")?,
            status_script: Rule::literal(
                COMMON_SCRIPT_SRC,
                format!(
                    "{COMMON_SCRIPT_SRC}>\n    </script>\n    <script src=\"../js/{STATUS_SCRIPT}\""
                ),
            ),
        })
    }

    fn insert_back_button(&self, file_name: &str, content: String) -> String {
        if self.back_button_marker.matches(&content) {
            return content;
        }
        if content.contains(SCORE_DIV) && self.header_back_button.matches(&content) {
            debug!(file = file_name, "adding back button to quiz header");
            self.header_back_button.apply(&content)
        } else {
            debug!(file = file_name, "adding fixed back button before </body>");
            self.fallback_back_button.apply(&content)
        }
    }
}

fn quoted_prefix(file: &str, prefix: &str) -> [Rule; 2] {
    [
        Rule::literal(format!("\"{file}\""), format!("\"{prefix}{file}\"")),
        Rule::literal(format!("'{file}'"), format!("'{prefix}{file}'")),
    ]
}

impl Rewriter for PathRewriter {
    fn command(&self) -> &'static str {
        "paths"
    }

    fn rewrite(&self, file_name: &str, content: &str) -> String {
        let mut text = content.to_string();

        if !text.contains(SHARED_STYLESHEET) {
            text = self.shared_link.apply(&text);
        }

        text = apply_all(&self.asset_paths, &text);
        text = apply_all(&self.old_back_buttons, &text);
        text = self.index_href.apply(&text);
        text = self.insert_back_button(file_name, text);

        // Only drop inline rules once the shared sheet provides them.
        if text.contains(SHARED_STYLESHEET) {
            text = self.inline_back_button_css.apply(&text);
        }

        if !text.contains(STATUS_SCRIPT) {
            text = self.status_script.apply(&text);
        }

        text
    }
}
