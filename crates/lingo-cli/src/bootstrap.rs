//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where settings are resolved and
//! infrastructure is chosen for the CLI adapter:
//! - Settings from the JSON file and `LINGO_*` environment variables
//! - The paced speech engine and its pacing
//!
//! Command handlers receive the composed [`CliContext`].

use std::path::{Path, PathBuf};

use lingo_core::{CoreError, LanguageCode, Settings, SettingsUpdate, validate_settings};
use lingo_speech::PacedEngineConfig;

use crate::error::CliError;

/// Speaking rate override.
pub const ENV_WORDS_PER_MINUTE: &str = "LINGO_WORDS_PER_MINUTE";
/// Gap between sentences override.
pub const ENV_UTTERANCE_GAP_MS: &str = "LINGO_UTTERANCE_GAP_MS";
/// Translation target override.
pub const ENV_TRANSLATE_TO: &str = "LINGO_TRANSLATE_TO";
/// Default input language override.
pub const ENV_DEFAULT_LANGUAGE: &str = "LINGO_DEFAULT_LANGUAGE";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Settings file the values were read from, if any.
    pub config_path: Option<PathBuf>,
    /// Resolved settings.
    pub settings: Settings,
}

impl CliConfig {
    /// Built-in defaults only.
    pub fn with_defaults() -> Self {
        Self {
            config_path: None,
            settings: Settings::with_defaults(),
        }
    }

    /// Resolve settings from `config_path` and the process environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self, CliError> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Resolve settings from `config_path` and an environment lookup.
    ///
    /// Precedence: environment, then file, then built-in defaults.
    pub fn load_with_env(
        config_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        let mut settings = Settings::with_defaults();

        if let Some(path) = config_path {
            let file = read_settings_file(path)?;
            settings.merge(&present_fields(&file));
            tracing::debug!(path = %path.display(), "Loaded settings file");
        }

        settings.merge(&env_overrides(&env)?);

        Ok(Self {
            config_path: config_path.map(Path::to_path_buf),
            settings,
        })
    }
}

/// Fully composed context for CLI commands.
#[derive(Debug, Clone)]
pub struct CliContext {
    settings: Settings,
}

impl CliContext {
    /// Resolved, validated settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Engine pacing, optionally overriding the speaking rate.
    pub fn engine_config(&self, words_per_minute: Option<u32>) -> Result<PacedEngineConfig, CliError> {
        let mut settings = self.settings.clone();
        if let Some(wpm) = words_per_minute {
            settings.words_per_minute = Some(wpm);
            validate_settings(&settings).map_err(CoreError::from)?;
        }
        Ok(PacedEngineConfig::from_settings(&settings))
    }

    /// Translation target: the explicit override, else the configured one.
    pub fn translation_target(&self, explicit: Option<&str>) -> Result<Option<LanguageCode>, CliError> {
        match explicit.or(self.settings.translate_to.as_deref()) {
            None => Ok(None),
            Some(tag) => LanguageCode::new(tag)
                .map(Some)
                .ok_or_else(|| CliError::Arguments("translation target cannot be empty".to_string())),
        }
    }
}

/// Bootstrap the CLI application.
///
/// Validates the resolved settings and builds the context handlers use.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    validate_settings(&config.settings).map_err(CoreError::from)?;

    tracing::debug!(
        config = ?config.config_path,
        wpm = config.settings.effective_words_per_minute(),
        gap_ms = config.settings.effective_utterance_gap_ms(),
        "CLI bootstrapped"
    );

    Ok(CliContext {
        settings: config.settings,
    })
}

fn read_settings_file(path: &Path) -> Result<Settings, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Config(format!("invalid settings in {}: {e}", path.display())))
}

/// An update that sets exactly the fields present in `file`.
fn present_fields(file: &Settings) -> SettingsUpdate {
    SettingsUpdate {
        words_per_minute: file.words_per_minute.map(Some),
        utterance_gap_ms: file.utterance_gap_ms.map(Some),
        translate_to: file.translate_to.clone().map(Some),
        default_language: file.default_language.clone().map(Some),
    }
}

fn env_overrides(env: &impl Fn(&str) -> Option<String>) -> Result<SettingsUpdate, CliError> {
    Ok(SettingsUpdate {
        words_per_minute: parse_env(env, ENV_WORDS_PER_MINUTE)?.map(Some),
        utterance_gap_ms: parse_env(env, ENV_UTTERANCE_GAP_MS)?.map(Some),
        translate_to: env(ENV_TRANSLATE_TO).map(Some),
        default_language: env(ENV_DEFAULT_LANGUAGE).map(Some),
    })
}

fn parse_env<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, CliError> {
    env(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| CliError::Config(format!("{key} must be a number, got `{raw}`")))
        })
        .transpose()
}
