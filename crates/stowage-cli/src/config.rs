//! # Voyage Configuration
//!
//! Capacity parameters for a new manifest, read from a YAML or JSON file
//! (chosen by extension). Missing fields fall back to the defaults of a
//! small three-stack deck.
//!
//! ```yaml
//! stacks: 6
//! max_height: 4
//! max_weight: 400
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use stowage_manifest::{Manifest, ManifestError};

/// Default number of stacks.
pub const DEFAULT_STACKS: i32 = 3;
/// Default maximum stack height.
pub const DEFAULT_MAX_HEIGHT: i32 = 2;
/// Default weight limit in tonnes.
pub const DEFAULT_MAX_WEIGHT: i32 = 120;

/// Capacity parameters for one voyage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoyageConfig {
    /// Number of stacks on deck.
    pub stacks: i32,
    /// Maximum containers per stack.
    pub max_height: i32,
    /// Weight limit in tonnes.
    pub max_weight: i32,
}

impl Default for VoyageConfig {
    fn default() -> Self {
        Self {
            stacks: DEFAULT_STACKS,
            max_height: DEFAULT_MAX_HEIGHT,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

impl VoyageConfig {
    /// Build an empty manifest with these parameters.
    pub fn build_manifest(&self) -> Result<Manifest, ManifestError> {
        Manifest::new(self.stacks, self.max_height, self.max_weight)
    }
}

/// Read a voyage configuration file.
pub fn load_config(path: &Path) -> Result<VoyageConfig> {
    read_document(path).with_context(|| format!("failed to load config {}", path.display()))
}

/// Deserialize a YAML (`.yaml`/`.yml`) or JSON (`.json`) document.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).context("invalid YAML document")
        }
        Some("json") => serde_json::from_str(&content).context("invalid JSON document"),
        _ => bail!(
            "unsupported file extension for {} (expected .yaml, .yml or .json)",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_manifest() {
        let manifest = VoyageConfig::default().build_manifest().unwrap();
        assert_eq!(manifest.stack_count(), 3);
        assert_eq!(manifest.max_height(), 2);
        assert_eq!(manifest.max_weight(), 120);
    }

    #[test]
    fn load_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voyage.yaml");
        std::fs::write(&path, "stacks: 6\nmax_height: 4\nmax_weight: 400\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config,
            VoyageConfig {
                stacks: 6,
                max_height: 4,
                max_weight: 400,
            }
        );
    }

    #[test]
    fn load_json_config_with_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voyage.json");
        std::fs::write(&path, r#"{"max_weight": 90}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.stacks, DEFAULT_STACKS);
        assert_eq!(config.max_height, DEFAULT_MAX_HEIGHT);
        assert_eq!(config.max_weight, 90);
    }

    #[test]
    fn unsupported_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voyage.toml");
        std::fs::write(&path, "stacks = 2").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported file extension"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/voyage.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/voyage.yaml"));
    }

    #[test]
    fn non_positive_parameters_rejected_at_build() {
        let config = VoyageConfig {
            stacks: 0,
            ..VoyageConfig::default()
        };
        assert!(config.build_manifest().is_err());
    }
}
