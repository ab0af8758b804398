use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::conjugation::{Bab, Mood, Tense};
use crate::display::FormatMode;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "conjugator.toml";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatSetting {
    #[default]
    Auto,
    Logical,
    Reshaped,
}

impl FormatSetting {
    /// `None` means "let the environment decide".
    pub fn as_override(self) -> Option<FormatMode> {
        match self {
            FormatSetting::Auto => None,
            FormatSetting::Logical => Some(FormatMode::LogicalOnly),
            FormatSetting::Reshaped => Some(FormatMode::ReshapedAndReordered),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_tense: Tense,
    pub default_bab: u8,
    pub default_mood: Mood,
    pub format: FormatSetting,
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tense: Tense::Past,
            default_bab: 1,
            default_mood: Mood::Indicative,
            format: FormatSetting::Auto,
            font_path: None,
            font_size: 18.0,
        }
    }
}

impl Config {
    pub fn default_bab(&self) -> Bab {
        // Checked in `validate`, so this only falls back for hand-built configs.
        Bab::from_number(self.default_bab).unwrap_or(Bab::FathaFatha)
    }

    fn validate(self, file_path: &str) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::Invalid { path: file_path.to_string(), message };
        if Bab::from_number(self.default_bab).is_err() {
            return Err(invalid(format!("default_bab must be 1 to 6, got {}", self.default_bab)));
        }
        if self.default_mood == Mood::Jussive {
            return Err(invalid("default_mood cannot be jussive, it is not supported yet".to_string()));
        }
        if !(8.0..=96.0).contains(&self.font_size) {
            return Err(invalid(format!("font_size must be between 8 and 96, got {}", self.font_size)));
        }
        if let Some(font) = &self.font_path {
            if !font.is_file() {
                return Err(invalid(format!("font_path '{}' is not a file", font.display())));
            }
        }
        Ok(self)
    }
}

pub fn parse_config(file_path: &str, contents: &str) -> Result<Config, ConfigError> {
    let loaded_config = toml::from_str::<Config>(contents).map_err(|source| ConfigError::Parse {
        path: file_path.to_string(),
        source,
    })?;
    loaded_config.validate(file_path)
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config, ConfigError> {
    let display_path = file_path.display().to_string();
    let contents = fs::read_to_string(file_path).map_err(|source| ConfigError::Read {
        path: display_path.clone(),
        source,
    })?;
    parse_config(&display_path, &contents)
}

/// An explicitly named file must exist. The default file is optional and its
/// absence just means built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config_from_file(path),
        None => match load_config_from_file(Path::new(DEFAULT_CONFIG_FILE)) {
            Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(Config::default())
            }
            other => other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("c.toml", "").unwrap(), Config::default());
    }

    #[test]
    fn reads_every_field() {
        let config = parse_config(
            "c.toml",
            r#"
                default_tense = "present"
                default_bab = 2
                default_mood = "subjunctive"
                format = "reshaped"
                font_size = 24.0
            "#,
        )
        .unwrap();
        assert_eq!(config.default_tense, Tense::Present);
        assert_eq!(config.default_bab(), Bab::FathaDamma);
        assert_eq!(config.default_mood, Mood::Subjunctive);
        assert_eq!(config.format.as_override(), Some(FormatMode::ReshapedAndReordered));
        assert_eq!(config.font_size, 24.0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(parse_config("c.toml", "default_bab = 9"), Err(ConfigError::Invalid { .. })));
        assert!(matches!(parse_config("c.toml", "default_mood = \"jussive\""), Err(ConfigError::Invalid { .. })));
        assert!(matches!(parse_config("c.toml", "font_size = 2.0"), Err(ConfigError::Invalid { .. })));
        assert!(matches!(
            parse_config("c.toml", "font_path = \"/definitely/not/here.ttf\""),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_unknown_keys_and_values() {
        assert!(matches!(parse_config("c.toml", "format = \"sideways\""), Err(ConfigError::Parse { .. })));
        assert!(matches!(parse_config("c.toml", "colour = \"red\""), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/definitely/not/here/conjugator.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("Please ensure it exists"));
    }
}
