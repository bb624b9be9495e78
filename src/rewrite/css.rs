use super::Rewriter;

/// Marker comment inside the bundled block.
pub const RESPONSIVE_MARKER: &str = "Mobile responsiveness overrides";

/// Mobile overrides `<style>` block, bundled by `build.rs`.
pub static RESPONSIVE_OVERRIDES: &str =
    include_str!(concat!(env!("OUT_DIR"), "/responsive_overrides.html"));

/// Injects [`RESPONSIVE_OVERRIDES`] right before `</head>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssInjector;

impl Rewriter for CssInjector {
    fn command(&self) -> &'static str {
        "inject-css"
    }

    fn rewrite(&self, _file_name: &str, content: &str) -> String {
        if content.contains(RESPONSIVE_MARKER) {
            return content.to_string();
        }
        content.replace("</head>", &format!("\n{RESPONSIVE_OVERRIDES}</head>"))
    }
}
