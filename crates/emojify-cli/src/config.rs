//! Configuration file support for emojify.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/emojify/config.toml` (lowest priority)
//! - Project-local: `.emojify.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = ".emojify.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Expression classifier settings.
    pub classifier: ClassifierConfig,
    /// Sticker artwork settings.
    pub assets: AssetsConfig,
    /// Face manifest settings.
    pub faces: FacesConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Expression classifier configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Smiling probability threshold (0.0-1.0).
    pub smiling_threshold: Option<f32>,
    /// Eye-open probability threshold (0.0-1.0).
    pub eye_open_threshold: Option<f32>,
}

/// Sticker artwork configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding `<stem>.png` stickers.
    pub dir: Option<PathBuf>,
}

/// Face manifest configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FacesConfig {
    /// Directory holding `<stem>.faces.json` manifests. Sidecars when unset.
    pub dir: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for emojified images. Next to the source when unset.
    pub dir: Option<PathBuf>,
    /// Report format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/emojify/config.toml`
    /// 2. Project-local: `.emojify.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.classifier.smiling_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!(
                    "classifier.smiling_threshold must be 0.0-1.0, got {t}"
                ));
            }
        }
        if let Some(t) = self.classifier.eye_open_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!(
                    "classifier.eye_open_threshold must be 0.0-1.0, got {t}"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.classifier.smiling_threshold = other
            .classifier
            .smiling_threshold
            .or(self.classifier.smiling_threshold);
        self.classifier.eye_open_threshold = other
            .classifier
            .eye_open_threshold
            .or(self.classifier.eye_open_threshold);

        self.assets.dir = other.assets.dir.or_else(|| self.assets.dir.take());
        self.faces.dir = other.faces.dir.or_else(|| self.faces.dir.take());

        self.output.dir = other.output.dir.or_else(|| self.output.dir.take());
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("emojify").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.emojify.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.classifier.smiling_threshold.is_none());
        assert!(config.assets.dir.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.general.recursive.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[classifier]
smiling_threshold = 0.3
eye_open_threshold = 0.4

[assets]
dir = '/usr/share/emojify'

[faces]
dir = '/tmp/manifests'

[output]
dir = '/tmp/out'
format = 'json'
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.classifier.smiling_threshold, Some(0.3));
        assert_eq!(config.classifier.eye_open_threshold, Some(0.4));
        assert_eq!(config.assets.dir, Some(PathBuf::from("/usr/share/emojify")));
        assert_eq!(config.faces.dir, Some(PathBuf::from("/tmp/manifests")));
        assert_eq!(config.output.dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.pretty, Some(true));
        assert_eq!(config.output.progress, Some(false));
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[classifier]
smiling_threshold = 0.2

[assets]
dir = '/base/assets'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[classifier]
smiling_threshold = 0.4
eye_open_threshold = 0.6
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.classifier.smiling_threshold, Some(0.4));
        assert_eq!(base.classifier.eye_open_threshold, Some(0.6));
        assert_eq!(base.assets.dir, Some(PathBuf::from("/base/assets")));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[output]
format = 'json'
pretty = true
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.output.format, Some("json".to_string()));
        assert_eq!(base.output.pretty, Some(true));
    }

    #[test]
    fn test_merge_all_sections() {
        let mut base: AppConfig = toml::from_str(
            r"
[general]
recursive = false

[faces]
dir = '/a'

[output]
format = 'json'
dir = '/out/a'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[general]
recursive = true

[faces]
dir = '/b'

[output]
format = 'jsonl'
dir = '/out/b'
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.general.recursive, Some(true));
        assert_eq!(base.faces.dir, Some(PathBuf::from("/b")));
        assert_eq!(base.output.format, Some("jsonl".to_string()));
        assert_eq!(base.output.dir, Some(PathBuf::from("/out/b")));
    }

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let toml = r"
[classifier
smiling_threshold = 0.5
";
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let toml = r#"
[classifier]
smiling_threshold = "high"
"#;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_validate_threshold_out_of_range() {
        let mut config = AppConfig::default();
        config.classifier.smiling_threshold = Some(1.5);
        let result = config.validate();
        assert!(result.unwrap_err().contains("classifier.smiling_threshold"));

        let mut config = AppConfig::default();
        config.classifier.eye_open_threshold = Some(-0.1);
        let result = config.validate();
        assert!(result.unwrap_err().contains("classifier.eye_open_threshold"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());

        let result = config.validate();
        assert!(result.unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_find_config_in_parents() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(PROJECT_CONFIG_FILE), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, temp.path().join(PROJECT_CONFIG_FILE));
    }
}
