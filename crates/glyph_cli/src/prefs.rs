//! Persisted render preferences.
//!
//! Stored as TOML in the user config directory. Missing keys fall back to
//! their defaults and a broken file is ignored with a warning, so a bad edit
//! never blocks rendering.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use glyph_render::RenderRequest;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WITH_BORDER: bool = true;
pub const DEFAULT_INNER_GLYPH: &str = "🟥";
pub const DEFAULT_OUTER_GLYPH: &str = "🤍";
pub const DEFAULT_INPUT_TEXT: &str = "HELLO";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub with_border: bool,
    pub inner_glyph: String,
    pub outer_glyph: String,
    pub input_text: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            with_border: DEFAULT_WITH_BORDER,
            inner_glyph: DEFAULT_INNER_GLYPH.to_owned(),
            outer_glyph: DEFAULT_OUTER_GLYPH.to_owned(),
            input_text: DEFAULT_INPUT_TEXT.to_owned(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrefKey {
    /// Frame the output with a border (true/false)
    #[value(alias = "with-border")]
    Border,
    /// Glyph painted on "on" cells
    #[value(alias = "inner-glyph")]
    Inner,
    /// Glyph painted on "off" cells
    #[value(alias = "outer-glyph")]
    Outer,
    /// Text rendered when none is given
    #[value(alias = "input-text")]
    Text,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrefsError {
    #[error("{0} glyph must not be empty")]
    EmptyGlyph(&'static str),
    #[error("invalid border value {0:?}, expected on/off, true/false or yes/no")]
    InvalidBool(String),
}

impl Preferences {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glyph").join("preferences.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no preferences at {}, using defaults", path.display());
                return Ok(Self::default());
            },
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read preferences {:?}", path));
            },
        };

        let mut prefs: Preferences = match toml::from_str(&content) {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!("ignoring malformed preferences {}: {err}", path.display());
                return Ok(Self::default());
            },
        };

        if prefs.inner_glyph.is_empty() {
            warn!("empty inner glyph in {}, using default", path.display());
            prefs.inner_glyph = DEFAULT_INNER_GLYPH.to_owned();
        }
        if prefs.outer_glyph.is_empty() {
            warn!("empty outer glyph in {}, using default", path.display());
            prefs.outer_glyph = DEFAULT_OUTER_GLYPH.to_owned();
        }

        Ok(prefs)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("failed to encode preferences")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write preferences {:?}", path))?;
        debug!("saved preferences to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), PrefsError> {
        if self.inner_glyph.is_empty() {
            return Err(PrefsError::EmptyGlyph("inner"));
        }
        if self.outer_glyph.is_empty() {
            return Err(PrefsError::EmptyGlyph("outer"));
        }
        Ok(())
    }

    pub fn set(&mut self, key: PrefKey, value: &str) -> Result<(), PrefsError> {
        match key {
            PrefKey::Border => self.with_border = parse_switch(value)?,
            PrefKey::Inner => self.inner_glyph = non_empty_glyph("inner", value)?,
            PrefKey::Outer => self.outer_glyph = non_empty_glyph("outer", value)?,
            PrefKey::Text => self.input_text = value.to_owned(),
        }
        Ok(())
    }

    pub fn request(&self) -> RenderRequest {
        RenderRequest::new(
            self.input_text.clone(),
            self.inner_glyph.clone(),
            self.outer_glyph.clone(),
            self.with_border,
        )
    }
}

fn non_empty_glyph(which: &'static str, value: &str) -> Result<String, PrefsError> {
    if value.is_empty() {
        Err(PrefsError::EmptyGlyph(which))
    } else {
        Ok(value.to_owned())
    }
}

pub fn parse_switch(value: &str) -> Result<bool, PrefsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(PrefsError::InvalidBool(value.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(prefs, Preferences::default());
        assert!(prefs.with_border);
        assert_eq!(prefs.input_text, "HELLO");
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let prefs = Preferences {
            with_border: false,
            inner_glyph: "#".into(),
            outer_glyph: " ".into(),
            input_text: "rust".into(),
        };
        prefs.save(&path).unwrap();

        assert_eq!(Preferences::load(&path).unwrap(), prefs);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "input_text = \"abc\"\n").unwrap();

        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.input_text, "abc");
        assert_eq!(prefs.inner_glyph, DEFAULT_INNER_GLYPH);
        assert!(prefs.with_border);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "with_border = \"sometimes\"\n[[[").unwrap();

        assert_eq!(Preferences::load(&path).unwrap(), Preferences::default());
    }

    #[test]
    fn empty_glyphs_are_repaired_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "inner_glyph = \"\"\nouter_glyph = \"o\"\n").unwrap();

        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.inner_glyph, DEFAULT_INNER_GLYPH);
        assert_eq!(prefs.outer_glyph, "o");
    }

    #[test]
    fn set_validates_values() {
        let mut prefs = Preferences::default();

        prefs.set(PrefKey::Border, "off").unwrap();
        assert!(!prefs.with_border);
        prefs.set(PrefKey::Text, "").unwrap();
        assert_eq!(prefs.input_text, "");

        assert_eq!(prefs.set(PrefKey::Inner, ""), Err(PrefsError::EmptyGlyph("inner")));
        assert_eq!(
            prefs.set(PrefKey::Border, "maybe"),
            Err(PrefsError::InvalidBool("maybe".into()))
        );
    }

    #[test]
    fn save_refuses_empty_glyph() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences { outer_glyph: String::new(), ..Preferences::default() };
        assert!(prefs.save(&dir.path().join("preferences.toml")).is_err());
    }

    #[test]
    fn request_carries_all_fields() {
        let request = Preferences::default().request();
        assert_eq!(request, RenderRequest::new("HELLO", "🟥", "🤍", true));
    }
}
