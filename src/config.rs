// Runtime configuration. Everything has a default, so the program runs with
// no setup at all; environment variables only override.

use crate::report::ReportOptions;
use std::path::PathBuf;

/// Environment variable holding the snapshot path.
pub const DATA_FILE_ENV: &str = "UNI_TRACKER_DATA";
/// Environment variable switching per-course grades in the report.
pub const COURSE_GRADES_ENV: &str = "UNI_TRACKER_COURSE_GRADES";
/// Snapshot file used when `UNI_TRACKER_DATA` is unset.
pub const DEFAULT_DATA_FILE: &str = "data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub data_file: PathBuf,
    pub report: ReportOptions,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            report: ReportOptions::default(),
        }
    }
}

impl TrackerConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset or blank values keep the
    /// default; an unrecognised flag value also keeps the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = TrackerConfig::default();
        if let Some(path) = lookup(DATA_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            config.data_file = PathBuf::from(path.trim());
        }
        if let Some(flag) = lookup(COURSE_GRADES_ENV).as_deref().and_then(parse_flag) {
            config.report.show_course_grades = flag;
        }
        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = TrackerConfig::from_lookup(|_| None);
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.data_file, PathBuf::from("data.json"));
        assert!(config.report.show_course_grades);
    }

    #[test]
    fn overrides_are_applied() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (DATA_FILE_ENV, " /tmp/grades.json "),
            (COURSE_GRADES_ENV, "off"),
        ]));
        assert_eq!(config.data_file, PathBuf::from("/tmp/grades.json"));
        assert!(!config.report.show_course_grades);
    }

    #[test]
    fn blank_or_unknown_values_keep_defaults() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (DATA_FILE_ENV, "   "),
            (COURSE_GRADES_ENV, "maybe"),
        ]));
        assert_eq!(config, TrackerConfig::default());
    }
}
