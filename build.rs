use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.lock");

    let build_time = chrono::Utc::now().to_rfc3339();

    let axum_version = fs::read_to_string("Cargo.lock")
        .ok()
        .and_then(|cargo_lock| {
            cargo_lock
                .lines()
                .collect::<Vec<_>>()
                .windows(3)
                .find(|window| {
                    window[0].trim() == "[[package]]"
                        && window[1].trim() == "name = \"axum\""
                        && window[2].trim().starts_with("version = ")
                })
                .and_then(|window| {
                    window[2]
                        .trim()
                        .strip_prefix("version = ")
                        .map(|v| v.trim_matches('"').to_string())
                })
        })
        .unwrap_or_else(|| "unknown".to_string());

    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let mut file = File::create(Path::new(&out_dir).join("build_info.rs"))
        .expect("could not create build_info.rs");

    writeln!(file, "pub const BUILD_TIME: &str = \"{}\";", build_time).unwrap();
    writeln!(
        file,
        "pub const AXUM_VERSION: &str = \"axum {}\";",
        axum_version
    )
    .unwrap();
}
