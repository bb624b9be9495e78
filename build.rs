use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=assets/responsive_overrides.html");
    println!("cargo:rerun-if-changed=assets/responsive_overrides.css");

    let template = fs::read_to_string("assets/responsive_overrides.html")
        .expect("failed to read assets/responsive_overrides.html");
    let styles = fs::read_to_string("assets/responsive_overrides.css")
        .expect("failed to read responsive_overrides.css");

    let bundled = template.replace("{{STYLE}}", styles.trim());

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR missing"));
    let out_path = out_dir.join("responsive_overrides.html");
    fs::write(&out_path, bundled).expect("failed to write bundled responsive overrides");
}
