use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use quizsmith::batch::{self, FileOutcome, run_batch};
use quizsmith::config::{Config, Mode, OutputFormat};
use quizsmith::report;
use quizsmith::rewrite::{BaselayerStripper, CssInjector, PathRewriter, RESPONSIVE_MARKER};
use quizsmith::rules::RuleSet;

const SCORE_PAGE: &str = r#"<html>
<head>
    <link rel="stylesheet" href="https://unpkg.com/leaflet/dist/leaflet.css" />
</head>
<body>
<div id="score">Score: 0</div>
<div id="question">Find the lake</div>
<script src="quiz_common.js"></script>
<script>
    Papa.parse("lakes_india.csv", { download: true });
    fetch('india_states.geojson');
</script>
</body>
</html>
"#;

const FALLBACK_PAGE: &str = r#"<html>
<head>
    <style>
        .back-btn { position: fixed; }
        .back-btn:hover { opacity: 0.8; }
    </style>
</head>
<body>
<a href="index.html" class="back-btn">&#8592; Back</a>
<script src="quiz_engine.js"></script>
</body>
</html>
"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

fn snapshot(dir: &Path) -> Vec<(String, String)> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            (
                path.file_name().unwrap().to_string_lossy().to_string(),
                fs::read_to_string(&path).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}

#[test]
fn path_update_rewrites_quiz_header() {
    let temp = tempfile::tempdir().unwrap();
    write(temp.path(), "lakes_quiz.html", SCORE_PAGE);

    let rewriter = PathRewriter::new(&RuleSet::builtin()).unwrap();
    let report = run_batch(temp.path(), &rewriter, false).unwrap();
    assert_eq!(report.updated(), 1);

    let page = read(temp.path(), "lakes_quiz.html");
    assert!(page.contains(r#"src="../js/quiz_common.js""#));
    assert!(page.contains(r#""../data/csv/lakes_india.csv""#));
    assert!(page.contains(r#"'../data/geojson/india_states.geojson'"#));
    assert!(page.contains(r#"<script src="../js/quiz_status.js"></script>"#));
    assert!(page.contains(
        "<div id=\"score\">Score: 0</div>\n<a href=\"../index.html\" class=\"back-btn\"><svg viewBox=\"0 0 24 24\"><path d=\"M19 12H5M12 19l-7-7 7-7\"/></svg> Back</a>\n<div id=\"question\""
    ));
    assert_eq!(page.matches("quiz-shared.css").count(), 1);
}

#[test]
fn path_update_uses_fixed_button_and_drops_inline_css() {
    let temp = tempfile::tempdir().unwrap();
    write(temp.path(), "monuments.html", FALLBACK_PAGE);

    let rewriter = PathRewriter::new(&RuleSet::builtin()).unwrap();
    run_batch(temp.path(), &rewriter, false).unwrap();

    // No Leaflet link, so the shared sheet isn't linked and the inline CSS stays.
    let page = read(temp.path(), "monuments.html");
    assert!(page.contains(".back-btn:hover"));
    assert!(!page.contains("&#8592; Back"));
    assert!(page.contains(r#"class="back-btn" style="position:fixed;"#));
    assert!(page.contains(r#"<script src="../js/quiz_engine.js"></script>"#));
}

#[test]
fn path_update_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    write(temp.path(), "lakes_quiz.html", SCORE_PAGE);
    write(temp.path(), "monuments.html", FALLBACK_PAGE);
    write(temp.path(), "index.html", "<html><body>menu</body></html>");

    let rewriter = PathRewriter::new(&RuleSet::builtin()).unwrap();
    run_batch(temp.path(), &rewriter, false).unwrap();
    let first = snapshot(temp.path());

    let second_report = run_batch(temp.path(), &rewriter, false).unwrap();
    assert_eq!(second_report.updated(), 0);
    assert_eq!(second_report.unchanged(), 3);
    assert_eq!(snapshot(temp.path()), first);
}

#[test]
fn css_injection_skips_marked_pages() {
    let temp = tempfile::tempdir().unwrap();
    let marked = "<html><head><!-- Mobile responsiveness overrides --></head></html>";
    write(temp.path(), "a_quiz.html", "<html><head><title>A</title></head></html>");
    write(temp.path(), "b_quiz.html", marked);

    let report = run_batch(temp.path(), &CssInjector, false).unwrap();

    assert_eq!(report.updated(), 1);
    assert_eq!(read(temp.path(), "b_quiz.html"), marked);
    assert!(read(temp.path(), "a_quiz.html").contains(RESPONSIVE_MARKER));
    assert!(
        report::build_text(&report).ends_with("Injected responsive CSS into 1 HTML files.")
    );
}

#[test]
fn baselayers_respect_skip_and_world_lists() {
    let temp = tempfile::tempdir().unwrap();
    let map = "var map = L.map('map');\nL.tileLayer('https://tile.osm.org/{z}/{x}/{y}.png').addTo(map);\n";
    write(temp.path(), "lakes_quiz.html", map);
    write(temp.path(), "world_lakes_quiz.html", map);
    write(temp.path(), "custom_quiz.html", map);

    let stripper = BaselayerStripper::new(RuleSet::builtin()).unwrap();
    let report = run_batch(temp.path(), &stripper, false).unwrap();

    assert_eq!(read(temp.path(), "lakes_quiz.html"), "var map = L.map('map');");
    assert_eq!(read(temp.path(), "world_lakes_quiz.html"), map);
    assert_eq!(read(temp.path(), "custom_quiz.html"), map);

    let outcomes: Vec<_> = report
        .files
        .iter()
        .map(|file| (file.name.as_str(), file.title.as_deref(), &file.outcome))
        .collect();
    assert!(matches!(
        outcomes[0],
        ("custom_quiz.html", Some("Custom Quiz"), FileOutcome::Skipped)
    ));
    assert!(matches!(
        outcomes[1],
        ("lakes_quiz.html", Some("India Lakes"), FileOutcome::Updated)
    ));
    assert!(matches!(
        outcomes[2],
        ("world_lakes_quiz.html", _, FileOutcome::Unchanged)
    ));
}

#[test]
fn config_driven_run_honours_dry_run() {
    let temp = tempfile::tempdir().unwrap();
    write(temp.path(), "lakes_quiz.html", SCORE_PAGE);

    let config = Config {
        quiz_dir: temp.path().to_path_buf(),
        rules: RuleSet::builtin(),
        dry_run: true,
        format: OutputFormat::Text,
        mode: Mode::UpdatePaths,
    };
    let report = batch::run(&config).unwrap();

    assert_eq!(report.updated(), 1);
    assert_eq!(read(temp.path(), "lakes_quiz.html"), SCORE_PAGE);
}

#[test]
fn overlay_data_files_are_rewritten() {
    let temp = tempfile::tempdir().unwrap();
    write(
        temp.path(),
        "deserts_quiz.html",
        r#"<a class="back-btn"></a><script>fetch("deserts_india.csv")</script>"#,
    );

    let rules = RuleSet::from_toml("csv_files = [\"deserts_india.csv\"]").unwrap();
    let config = Config {
        quiz_dir: temp.path().to_path_buf(),
        rules,
        dry_run: false,
        format: OutputFormat::Json,
        mode: Mode::UpdatePaths,
    };
    batch::run(&config).unwrap();

    assert_eq!(
        read(temp.path(), "deserts_quiz.html"),
        r#"<a class="back-btn"></a><script>fetch("../data/csv/deserts_india.csv")</script>"#
    );
}
