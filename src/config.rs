// File: src/config.rs
use crate::color_utils::{self, Color};
use crate::itemtypes::Category;
use anyhow::{Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Plugin-side settings, kept in a TOML file the admin edits by hand.
///
/// `extra_itemtypes` adds itemtypes to a menu section by its label,
/// `excluded_itemtypes` prunes itemtypes from every section, and
/// `default_tag_color` overrides the per-name generated fallback color.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub excluded_itemtypes: Vec<String>,
    pub default_tag_color: Option<String>,
    pub extra_itemtypes: HashMap<String, Vec<String>>,
}

impl Config {
    fn get_path() -> Option<PathBuf> {
        // ISOLATION: Check env var first
        if let Ok(test_dir) = env::var("ETIQ_TEST_DIR") {
            let path = PathBuf::from(test_dir);
            if !path.exists() {
                let _ = fs::create_dir_all(&path);
            }
            return Some(path.join("config.toml"));
        }

        if let Some(proj) = ProjectDirs::from("com", "trougnouf", "etiquette") {
            let config_dir = proj.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            return Some(config_dir.join("config.toml"));
        }
        None
    }

    /// A missing file yields defaults; a present but broken file is an
    /// error the caller should see rather than silently losing settings.
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::get_path()
            && path.exists()
        {
            let content = fs::read_to_string(&path)?;
            let config = toml::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::get_path() {
            let content = toml::to_string_pretty(self)?;
            atomic_write(&path, &content)?;
        }
        Ok(())
    }

    /// Rejects settings the bootstrap would otherwise have to skip over.
    pub fn validate(&self) -> Result<()> {
        if let Some(color) = &self.default_tag_color
            && let Err(e) = color.parse::<Color>()
        {
            bail!("default_tag_color {color:?}: {e}");
        }
        for label in self.extra_itemtypes.keys() {
            if Category::from_label(label).is_none() {
                bail!("extra_itemtypes references unknown section {label:?}");
            }
        }
        Ok(())
    }

    /// Color for a tag whose record carries none: the configured default
    /// when it parses, otherwise one derived from the tag name.
    pub fn effective_tag_color(&self, tag: &str) -> Color {
        if let Some(raw) = &self.default_tag_color {
            match raw.parse::<Color>() {
                Ok(color) => return color,
                Err(e) => tracing::warn!("ignoring default_tag_color {raw:?}: {e}"),
            }
        }
        color_utils::generate_color(tag)
    }
}

/// Atomic write: write to .tmp file then rename
fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_broken_color_and_unknown_section() {
        let mut config = Config::default();
        config.default_tag_color = Some("#12345g".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config
            .extra_itemtypes
            .insert("Accounting".to_string(), vec!["Invoice".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn effective_tag_color_prefers_the_configured_default() {
        let mut config = Config::default();
        config.default_tag_color = Some("#336699".to_string());
        let color = config.effective_tag_color("urgent");
        assert_eq!(color.to_string(), "#336699");
    }

    #[test]
    fn effective_tag_color_falls_back_when_unset_or_broken() {
        let config = Config::default();
        let derived = config.effective_tag_color("urgent");
        assert_eq!(derived, color_utils::generate_color("urgent"));

        let mut broken = Config::default();
        broken.default_tag_color = Some("not-a-color".to_string());
        assert_eq!(broken.effective_tag_color("urgent"), derived);
    }
}
