//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/menutree/menutree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `MENUTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::infrastructure::traits::IdStyle;

/// Unified configuration for menutree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Text given to children created without explicit text
    pub default_child_text: String,
    /// Text given to roots created without explicit text
    pub default_root_text: String,
    /// Generator used for new node ids
    pub id_style: IdStyle,
    /// Treat commands that change nothing as errors
    pub strict: bool,
    /// Start sessions from the sample outline instead of an empty one
    pub seed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_child_text: "New Child Item".into(),
            default_root_text: "New Parent Item".into(),
            id_style: IdStyle::default(),
            strict: false,
            seed: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_child_text: Option<String>,
    pub default_root_text: Option<String>,
    pub id_style: Option<IdStyle>,
    pub strict: Option<bool>,
    pub seed: Option<bool>,
}

/// Get the XDG config directory for menutree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "menutree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("menutree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a path, leaving it as is on failure.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_child_text: overlay
                .default_child_text
                .clone()
                .unwrap_or_else(|| self.default_child_text.clone()),
            default_root_text: overlay
                .default_root_text
                .clone()
                .unwrap_or_else(|| self.default_root_text.clone()),
            id_style: overlay.id_style.unwrap_or(self.id_style),
            strict: overlay.strict.unwrap_or(self.strict),
            seed: overlay.seed.unwrap_or(self.seed),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Config file named on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit file, required
        if let Some(path) = explicit {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply MENUTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(Environment::with_prefix("MENUTREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_child_text") {
            settings.default_child_text = val;
        }
        if let Ok(val) = config.get_string("default_root_text") {
            settings.default_root_text = val;
        }
        if let Ok(val) = config.get::<IdStyle>("id_style") {
            settings.id_style = val;
        }
        if let Ok(val) = config.get_bool("strict") {
            settings.strict = val;
        }
        if let Ok(val) = config.get_bool("seed") {
            settings.seed = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# menutree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/menutree/menutree.toml
#   Explicit: menutree --config <file>
#   Env:      MENUTREE_* environment variables

# Text for children created without explicit text
# default_child_text = "New Child Item"

# Text for roots created without explicit text
# default_root_text = "New Parent Item"

# Node id generator: "short" (9 base36 chars), "uuid", or "sequential"
# id_style = "short"

# Fail on commands that leave the outline unchanged (unknown id, cycle)
# strict = false

# Start from the sample outline instead of an empty one
# seed = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert!(!settings.default_child_text.is_empty());
        assert!(!settings.default_root_text.is_empty());
    }

    #[test]
    fn given_explicit_file_when_loading_then_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("menutree.toml");
        std::fs::write(
            &path,
            "default_child_text = \"Leaf\"\nid_style = \"sequential\"\nstrict = true\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.default_child_text, "Leaf");
        assert_eq!(settings.id_style, IdStyle::Sequential);
        assert!(settings.strict);
    }

    #[test]
    fn given_missing_explicit_file_when_loading_then_config_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/menutree.toml"))).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_invalid_toml_when_loading_then_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "id_style = \"galaxy\"\n").unwrap();
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified() {
        let base = Settings::default();
        let overlay = RawSettings {
            seed: Some(false),
            ..RawSettings::default()
        };
        let merged = base.merge_with(&overlay);
        assert!(!merged.seed);
        assert_eq!(merged.default_root_text, base.default_root_text);
        assert_eq!(merged.id_style, base.id_style);
    }

    #[test]
    fn given_settings_when_serialized_then_template_keys_match() {
        let toml = Settings::default().to_toml().unwrap();
        for key in ["default_child_text", "default_root_text", "id_style", "strict", "seed"] {
            assert!(toml.contains(key), "missing {key}");
            assert!(Settings::template().contains(key), "template missing {key}");
        }
    }

    #[test]
    fn given_tilde_path_when_expanding_then_home_substituted() {
        let expanded = expand_path(Path::new("~/x.toml"));
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
