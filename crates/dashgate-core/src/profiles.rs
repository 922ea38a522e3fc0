//! Quality profile registry.
//!
//! Maps caller-facing labels such as `720p` to the pipeline's preset ids,
//! one table per [`OutputFormat`]. The registry is built once at startup
//! from the base tables below and the configured overrides, then shared
//! read-only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::format::OutputFormat;

/// Labels requested when the caller does not name any.
pub const DEFAULT_LABELS: [&str; 3] = ["720p", "480p", "360p"];

const BASE_DASH: &[(&str, &str)] = &[
    ("1080p", "1653913357100-ikb9ew"),
    ("720p", "1351620000001-500020"),
    ("480p", "1351620000001-500030"),
    ("360p", "1351620000001-500040"),
    ("240p", "1351620000001-500050"),
    ("180p", "1619779551954-u1rt32"),
];

const BASE_HLS: &[(&str, &str)] = &[
    ("720p", "1351620000001-200015"),
    ("480p", "1351620000001-200035"),
    ("360p", "1351620000001-200045"),
];

/// A single label-to-preset mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityProfile {
    pub label: String,
    pub preset_id: String,
}

/// Externally supplied label-to-preset entries, keyed by format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOverrides {
    pub dash: BTreeMap<String, String>,
    pub hls: BTreeMap<String, String>,
}

impl ProfileOverrides {
    fn for_format(&self, format: OutputFormat) -> &BTreeMap<String, String> {
        match format {
            OutputFormat::Dash => &self.dash,
            OutputFormat::Hls => &self.hls,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dash.is_empty() && self.hls.is_empty()
    }
}

/// Read-only label-to-preset lookup for every output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRegistry {
    dash: BTreeMap<String, String>,
    hls: BTreeMap<String, String>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::with_overrides(&ProfileOverrides::default())
    }
}

impl ProfileRegistry {
    /// Build the registry: base table first, then overrides on top.
    pub fn with_overrides(overrides: &ProfileOverrides) -> Self {
        let build = |format: OutputFormat, base: &[(&str, &str)]| {
            let mut table: BTreeMap<String, String> = base
                .iter()
                .map(|(label, preset)| (label.to_string(), preset.to_string()))
                .collect();

            for (label, preset) in overrides.for_format(format) {
                if let Some(previous) = table.insert(label.clone(), preset.clone()) {
                    tracing::debug!(
                        %format,
                        label = %label,
                        previous = %previous,
                        preset = %preset,
                        "Profile override replaces base preset"
                    );
                }
            }

            table
        };

        Self {
            dash: build(OutputFormat::Dash, BASE_DASH),
            hls: build(OutputFormat::Hls, BASE_HLS),
        }
    }

    fn table(&self, format: OutputFormat) -> &BTreeMap<String, String> {
        match format {
            OutputFormat::Dash => &self.dash,
            OutputFormat::Hls => &self.hls,
        }
    }

    /// Look up the preset for `label`. Unknown labels yield `None`.
    pub fn resolve(&self, format: OutputFormat, label: &str) -> Option<&str> {
        self.table(format).get(label).map(String::as_str)
    }

    /// All profiles for `format`, ordered by label.
    pub fn profiles(&self, format: OutputFormat) -> Vec<QualityProfile> {
        self.table(format)
            .iter()
            .map(|(label, preset_id)| QualityProfile {
                label: label.clone(),
                preset_id: preset_id.clone(),
            })
            .collect()
    }

    /// Raw label-to-preset map for `format`.
    pub fn presets(&self, format: OutputFormat) -> &BTreeMap<String, String> {
        self.table(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_tables_resolve() {
        let registry = ProfileRegistry::default();
        assert_eq!(
            registry.resolve(OutputFormat::Dash, "720p"),
            Some("1351620000001-500020")
        );
        assert_eq!(
            registry.resolve(OutputFormat::Dash, "1080p"),
            Some("1653913357100-ikb9ew")
        );
        assert_eq!(
            registry.resolve(OutputFormat::Hls, "360p"),
            Some("1351620000001-200045")
        );
    }

    #[test]
    fn unknown_label_is_absent() {
        let registry = ProfileRegistry::default();
        assert_eq!(registry.resolve(OutputFormat::Dash, "999p"), None);
        assert_eq!(registry.resolve(OutputFormat::Hls, "1080p"), None);
    }

    #[test]
    fn default_labels_exist_in_every_format() {
        let registry = ProfileRegistry::default();
        for format in OutputFormat::ALL {
            for label in DEFAULT_LABELS {
                assert!(registry.resolve(format, label).is_some(), "{format} {label}");
            }
        }
    }

    #[test]
    fn overrides_win_and_extend() {
        let mut overrides = ProfileOverrides::default();
        overrides.dash.insert("720p".into(), "custom-720".into());
        overrides.dash.insert("2160p".into(), "custom-2160".into());
        overrides.hls.insert("1080p".into(), "custom-hls-1080".into());

        let registry = ProfileRegistry::with_overrides(&overrides);

        assert_eq!(registry.resolve(OutputFormat::Dash, "720p"), Some("custom-720"));
        assert_eq!(registry.resolve(OutputFormat::Dash, "2160p"), Some("custom-2160"));
        assert_eq!(
            registry.resolve(OutputFormat::Dash, "480p"),
            Some("1351620000001-500030")
        );
        assert_eq!(
            registry.resolve(OutputFormat::Hls, "1080p"),
            Some("custom-hls-1080")
        );
        // Overrides stay within their own format.
        assert_eq!(registry.resolve(OutputFormat::Hls, "2160p"), None);
    }

    #[test]
    fn profiles_are_sorted_by_label() {
        let registry = ProfileRegistry::default();
        let labels: Vec<String> = registry
            .profiles(OutputFormat::Hls)
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec!["360p", "480p", "720p"]);
    }

    #[test]
    fn overrides_deserialize_with_missing_sections() {
        let overrides: ProfileOverrides =
            serde_json::from_str(r#"{"dash": {"4k": "preset-4k"}}"#).unwrap();
        assert_eq!(overrides.dash.get("4k").map(String::as_str), Some("preset-4k"));
        assert!(overrides.hls.is_empty());
        assert!(!overrides.is_empty());
    }
}
