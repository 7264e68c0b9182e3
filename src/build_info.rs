//! Build metadata embedded by `build.rs`
//!
//! Every value falls back to a placeholder when the crate is compiled
//! without the build script (e.g. by tooling that skips it).

use serde::Serialize;

const BANNER_RULE: &str = "===============================================";

pub const BUILD_NUMBER: u64 = match option_env!("MEALPLAN_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// `debug` or `release`
pub const BUILD_PROFILE: &str = match option_env!("MEALPLAN_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

/// UTC, `%Y-%m-%dT%H:%M:%SZ`
pub const BUILD_TIMESTAMP: &str = match option_env!("MEALPLAN_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Decimal digits only; empty input or overflow is `None`
const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        if !digit.is_ascii_digit() {
            return None;
        }
        result = match result.checked_mul(10) {
            Some(shifted) => match shifted.checked_add((digit - b'0') as u64) {
                Some(next) => next,
                None => return None,
            },
            None => return None,
        };
        i += 1;
    }
    Some(result)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_profile: &'static str,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_profile: BUILD_PROFILE,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }

    /// `mealplan 1.0.0 (build 42)`, with the profile appended for non-release builds
    pub fn label(&self) -> String {
        if self.build_profile == "release" {
            format!("{} {} (build {})", self.name, self.version, self.build_number)
        } else {
            format!(
                "{} {} (build {}, {})",
                self.name, self.version, self.build_number, self.build_profile
            )
        }
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("{}", BANNER_RULE);
    eprintln!("  Family Meal Planner");
    eprintln!("  {}", info.label());
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!("{}", BANNER_RULE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64(""), None);
        assert_eq!(parse_u64("4x"), None);
        assert_eq!(parse_u64("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_u64("18446744073709551616"), None);
    }

    #[test]
    fn test_label_marks_non_release_builds() {
        let mut info = BuildInfo::current();
        info.build_number = 7;

        info.build_profile = "release";
        assert_eq!(info.label(), format!("mealplan {} (build 7)", VERSION));

        info.build_profile = "debug";
        assert_eq!(info.label(), format!("mealplan {} (build 7, debug)", VERSION));
    }
}
