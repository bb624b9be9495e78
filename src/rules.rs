use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// CSV files that live under `data/csv/`.
pub const CSV_FILES: &[&str] = &[
    "India_water_falls.csv",
    "current_affairs_india.csv",
    "current_affairs_world.csv",
    "india_festivals.csv",
    "india_minerals.csv",
    "india_monuments.csv",
    "india_nuclear_power_plants.csv",
    "india_renewable_energy_projects.csv",
    "india_state_capitals.csv",
    "india_unesco.csv",
    "lakes_india.csv",
    "lakes_rajasthan.csv",
    "mountain_india.csv",
    "mountain_rajasthan.csv",
    "national_parks_india.csv",
    "rajasthan_minerals.csv",
    "rajasthan_monuments.csv",
    "ramsar_wetlands_india.csv",
    "wildlife_sanctuaries_rajasthan.csv",
    "world_active_volcanos.csv",
    "world_capitals.csv",
    "world_lakes.csv",
    "world_mountain_peaks.csv",
    "world_waterfalls.csv",
];

/// GeoJSON files that live under `data/geojson/`.
pub const GEOJSON_FILES: &[&str] = &[
    "Rivers_compressed.geojson",
    "india_districts.geojson",
    "india_states.geojson",
    "india_with_districts.geojson",
    "lakes_data.geojson",
    "national_parks.geojson",
    "oceans.geojson",
    "world_countries.geojson",
    "world_rivers.geojson",
];

/// Scripts that moved into `js/`.
pub const SCRIPT_FILES: &[&str] = &["quiz_common.js", "quiz_config.js", "quiz_engine.js"];

/// Floating back buttons replaced by the header-integrated one.
pub const OLD_BACK_BUTTONS: &[&str] = &[
    r#"<a href="index.html" class="back-btn">← Back</a>"#,
    r#"<a href="index.html" class="back-btn">← Back to Menu</a>"#,
    r#"<a href="index.html" class="back-btn">&#8592; Back</a>"#,
];

/// World quizzes keep their tile layers.
pub const WORLD_QUIZZES: &[&str] = &[
    "world_lakes_quiz.html",
    "world_mountains_quiz.html",
    "world_volcanoes_quiz.html",
    "world_waterfalls_quiz.html",
    "world_rivers_quiz.html",
    "world_countries_quiz.html",
    "world_capitals_quiz.html",
    "oceans_quiz.html",
];

/// Pages that are already up to date or are not quizzes at all.
pub const SKIP_FILES: &[&str] = &[
    "india_states.html",
    "quiz.html",
    "custom_quiz.html",
    "plot_river.html",
    "topographic_leaflet.html",
    "rivers_quiz_without_symbol.html",
    "current_affairs_quiz.html",
];

/// Display titles for quizzes whose file name doesn't read well.
pub const QUIZ_TITLES: &[(&str, &str)] = &[
    ("lakes_quiz.html", "India Lakes"),
    ("mountains_quiz.html", "Mountain Peaks"),
    ("rivers_quiz.html", "Rivers of India"),
    ("national_parks_quiz.html", "National Parks"),
    ("wetlands_quiz.html", "Ramsar Wetlands"),
    ("india_waterfalls_quiz.html", "Waterfalls of India"),
    ("india_monuments.html", "Monuments of India"),
    ("india_renewable_energy_quiz.html", "Renewable Energy Projects"),
    ("india_festivals_quiz.html", "Famous Festivals"),
    ("india_nuclear_power_plants_quiz.html", "Nuclear Power Plants"),
    ("india_mining_quiz.html", "Mining Operations"),
    ("rajasthan_districts.html", "Districts of Rajasthan"),
    ("rajasthan_mountains.html", "Mountain Peaks of Rajasthan"),
    ("rajasthan_lakes.html", "Lakes of Rajasthan"),
    ("rajasthan_minerals_quiz.html", "Minerals of Rajasthan"),
    ("wls_rajasthan.html", "Wildlife Sanctuaries"),
    (
        "wildlife_century_rajasthan_quiz.html",
        "Wildlife Century Rajasthan",
    ),
    ("bihar_districts.html", "Districts of Bihar"),
    ("uttar_pradesh_districts.html", "Districts of Uttar Pradesh"),
];

/// Optional TOML overlay. Every table only appends to the built-in lists.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RulesFile {
    csv_files: Vec<String>,
    geojson_files: Vec<String>,
    world_quizzes: Vec<String>,
    skip_files: Vec<String>,
    titles: BTreeMap<String, String>,
}

/// Lookup tables consulted by the rewriters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub csv_files: Vec<String>,
    pub geojson_files: Vec<String>,
    pub script_files: Vec<String>,
    pub old_back_buttons: Vec<String>,
    pub world_quizzes: Vec<String>,
    pub skip_files: Vec<String>,
    pub titles: BTreeMap<String, String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    pub fn builtin() -> Self {
        Self {
            csv_files: owned(CSV_FILES),
            geojson_files: owned(GEOJSON_FILES),
            script_files: owned(SCRIPT_FILES),
            old_back_buttons: owned(OLD_BACK_BUTTONS),
            world_quizzes: owned(WORLD_QUIZZES),
            skip_files: owned(SKIP_FILES),
            titles: QUIZ_TITLES
                .iter()
                .map(|(file, title)| (file.to_string(), title.to_string()))
                .collect(),
        }
    }

    /// Built-in tables extended with the overlay at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read rules file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid rules file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let overlay: RulesFile = toml::from_str(raw)?;
        let mut rules = Self::builtin();
        rules.extend(overlay);
        Ok(rules)
    }

    fn extend(&mut self, overlay: RulesFile) {
        append_unique(&mut self.csv_files, overlay.csv_files);
        append_unique(&mut self.geojson_files, overlay.geojson_files);
        append_unique(&mut self.world_quizzes, overlay.world_quizzes);
        append_unique(&mut self.skip_files, overlay.skip_files);
        self.titles.extend(overlay.titles);
    }

    pub fn keeps_baselayer(&self, file_name: &str) -> bool {
        self.world_quizzes.iter().any(|name| name == file_name)
    }

    pub fn is_skipped(&self, file_name: &str) -> bool {
        self.skip_files.iter().any(|name| name == file_name)
    }

    /// Configured title, or the file stem in title case.
    pub fn quiz_title(&self, file_name: &str) -> String {
        if let Some(title) = self.titles.get(file_name) {
            return title.clone();
        }

        file_name
            .replace(".html", "")
            .replace(['_', '-'], " ")
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn append_unique(target: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}
