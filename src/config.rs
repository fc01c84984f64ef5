//! Configuration handling for the form

use crate::state::{FormSettings, LanguageOptions, ValidationMode};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration, every key optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FormConfig {
    /// Selectable languages, first one is preselected
    pub languages: Option<Vec<String>>,
    /// When field errors are shown
    pub validation_mode: Option<ValidationMode>,
    /// Clear the form after a successful submit
    pub reset_after_submit: Option<bool>,
    /// Allow submitting unchanged data again
    pub allow_resubmit: Option<bool>,
    /// Append submissions to this JSON-lines file instead of only showing them
    pub submissions_file: Option<PathBuf>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("cz", "kontakt", "contact-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config dir
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, defaults when the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: FormConfig = serde_json::from_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the form behaviour this config describes
    pub fn form_settings(&self) -> Result<FormSettings> {
        let languages = match &self.languages {
            Some(list) => LanguageOptions::new(list.clone())?,
            None => LanguageOptions::default(),
        };

        Ok(FormSettings {
            languages,
            mode: self.validation_mode.unwrap_or_default(),
            reset_after_submit: self.reset_after_submit.unwrap_or(false),
            allow_resubmit: self.allow_resubmit.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert!(config.languages.is_none());
        assert!(config.validation_mode.is_none());
        assert!(config.reset_after_submit.is_none());
        assert!(config.allow_resubmit.is_none());
        assert!(config.submissions_file.is_none());
    }

    #[test]
    fn test_default_settings() {
        let settings = FormConfig::default().form_settings().unwrap();
        assert_eq!(settings, FormSettings::default());
        assert_eq!(settings.languages.default_option(), "Čeština");
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "languages": ["Angličtina", "Němčina"],
            "validation_mode": "on_submit",
            "reset_after_submit": true,
            "allow_resubmit": true,
            "submissions_file": "/tmp/out.jsonl"
        }"#;
        let config: FormConfig = serde_json::from_str(json).unwrap();
        let settings = config.form_settings().unwrap();

        assert_eq!(settings.languages.as_slice(), ["Angličtina", "Němčina"]);
        assert_eq!(settings.mode, ValidationMode::OnSubmit);
        assert!(settings.reset_after_submit);
        assert!(settings.allow_resubmit);
        assert_eq!(
            config.submissions_file,
            Some(PathBuf::from("/tmp/out.jsonl"))
        );
    }

    #[test]
    fn test_empty_languages_rejected() {
        let config = FormConfig {
            languages: Some(vec![]),
            ..Default::default()
        };
        assert!(config.form_settings().is_err());
    }

    #[test]
    fn test_blank_language_rejected() {
        for blank in ["", "  "] {
            let config = FormConfig {
                languages: Some(vec!["Čeština".to_string(), blank.to_string()]),
                ..Default::default()
            };
            assert!(config.form_settings().is_err());
        }
    }

    #[test]
    fn test_duplicate_language_rejected() {
        let config = FormConfig {
            languages: Some(vec!["Čeština".to_string(), "Čeština".to_string()]),
            ..Default::default()
        };
        let err = config.form_settings().unwrap_err();
        assert!(err.to_string().contains("Čeština"));
    }

    #[test]
    fn test_unknown_validation_mode_rejected() {
        let json = r#"{"validation_mode": "on_blur"}"#;
        assert!(serde_json::from_str::<FormConfig>(json).is_err());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"reset_after_submit": true, "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.reset_after_submit, Some(true));
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = FormConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"allow_resubmit": true}"#).unwrap();
        let config = FormConfig::load_from(&path).unwrap();
        assert_eq!(config.allow_resubmit, Some(true));
    }

    #[test]
    fn test_load_from_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(FormConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_config_path_points_at_config_json() {
        if let Some(path) = FormConfig::config_path() {
            assert!(path.ends_with("config.json"));
            assert!(path.to_string_lossy().contains("contact-form"));
        }
    }
}
