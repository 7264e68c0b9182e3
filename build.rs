//! Build script for mealplan
//!
//! Embeds a build number, the build profile and a UTC timestamp.
//!
//! The build number comes from `MEALPLAN_BUILD_NUMBER` when set (release
//! pipelines pin it); otherwise a local counter in `build_number.txt` is
//! bumped on each recompilation.

use std::env;
use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";
const NUMBER_OVERRIDE: &str = "MEALPLAN_BUILD_NUMBER";

fn read_counter(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .unwrap_or(0)
}

fn next_build_number() -> u64 {
    if let Some(pinned) = env::var(NUMBER_OVERRIDE).ok().and_then(|v| v.trim().parse().ok()) {
        return pinned;
    }

    let path = Path::new(COUNTER_FILE);
    let next = read_counter(path) + 1;
    if let Err(e) = fs::write(path, next.to_string()) {
        // Read-only checkouts still build; the number just stops advancing
        println!("cargo:warning=could not update {}: {}", COUNTER_FILE, e);
    }
    next
}

fn main() {
    // Only rerun when src/ files change (not on every cargo build)
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-env-changed={}", NUMBER_OVERRIDE);

    let build_number = next_build_number();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=MEALPLAN_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=MEALPLAN_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=MEALPLAN_BUILD_TIMESTAMP={}", timestamp);
}
