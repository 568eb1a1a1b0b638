use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;

use crate::domain::errors::ConfigError;
use crate::domain::models::Config;

/// Project config file name
pub const CONFIG_FILE: &str = "docqa.yaml";

/// Uncommitted local overrides
pub const LOCAL_CONFIG_FILE: &str = "docqa.local.yaml";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the current directory
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `docqa.yaml` in `dir`
    /// 3. `docqa.local.yaml` in `dir` (optional)
    /// 4. `GROQ_API_KEY` mapped onto `generation.api_key`
    /// 5. Environment variables (`DOCQA_*` prefix, `__` for nesting)
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
        let config: Config = Self::env_layers(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Yaml::file(dir.join(CONFIG_FILE)))
                .merge(Yaml::file(dir.join(LOCAL_CONFIG_FILE))),
        )
        .extract()
        .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring the environment
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Self::env_layers(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Yaml::file(path)),
        )
        .extract()
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn env_layers(figment: Figment) -> Figment {
        figment
            .merge(
                Env::raw()
                    .only(&["GROQ_API_KEY"])
                    .map(|_| "generation.api_key".into()),
            )
            .merge(Env::prefixed("DOCQA_").split("__"))
    }

    /// Validate configuration after loading
    ///
    /// The completion credential is not checked here; commands that never
    /// call the completion service run without one.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.chunking.max_chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(config.chunking.max_chunk_size));
        }

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.retrieval.top_k));
        }

        if config.generation.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.generation.max_tokens));
        }

        if !(0.0..=2.0).contains(&config.generation.temperature) {
            return Err(ConfigError::InvalidTemperature(config.generation.temperature));
        }

        if config.generation.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.generation.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{EmbeddingModel, LogFormat};
    use std::fs;

    const CLEAN_ENV: [(&str, Option<&str>); 5] = [
        ("GROQ_API_KEY", None),
        ("DOCQA_GENERATION__API_KEY", None),
        ("DOCQA_RETRIEVAL__TOP_K", None),
        ("DOCQA_CHUNKING__MAX_CHUNK_SIZE", None),
        ("DOCQA_LOGGING__FORMAT", None),
    ];

    #[test]
    fn test_default_config_is_valid() {
        ConfigLoader::validate(&Config::default()).expect("Default config should be valid");
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_vars(CLEAN_ENV, || {
            let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
            assert_eq!(config.chunking.max_chunk_size, 500);
            assert_eq!(config.retrieval.top_k, 3);
            assert!(config.generation.api_key.is_none());
        });
    }

    #[test]
    fn test_yaml_then_local_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "retrieval:\n  top_k: 5\nembedding:\n  model: all-minilm-l12-v2\nlogging:\n  format: json\n",
        )
        .unwrap();
        fs::write(dir.path().join(LOCAL_CONFIG_FILE), "retrieval:\n  top_k: 7\n").unwrap();

        temp_env::with_vars(CLEAN_ENV, || {
            let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
            assert_eq!(config.retrieval.top_k, 7);
            assert_eq!(config.embedding.model, EmbeddingModel::AllMiniLmL12V2);
            assert_eq!(config.logging.format, LogFormat::Json);
        });
    }

    #[test]
    fn test_env_overrides_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "chunking:\n  max_chunk_size: 300\n").unwrap();

        temp_env::with_vars(
            [
                ("GROQ_API_KEY", None),
                ("DOCQA_GENERATION__API_KEY", None),
                ("DOCQA_RETRIEVAL__TOP_K", None),
                ("DOCQA_CHUNKING__MAX_CHUNK_SIZE", Some("120")),
                ("DOCQA_LOGGING__FORMAT", None),
            ],
            || {
                let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
                assert_eq!(config.chunking.max_chunk_size, 120);
            },
        );
    }

    #[test]
    fn test_groq_api_key_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_vars(
            [
                ("GROQ_API_KEY", Some("gsk_from_env")),
                ("DOCQA_GENERATION__API_KEY", None),
            ],
            || {
                let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
                assert_eq!(config.generation.api_key.as_deref(), Some("gsk_from_env"));
            },
        );
    }

    #[test]
    fn test_prefixed_api_key_wins_over_groq_api_key() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_vars(
            [
                ("GROQ_API_KEY", Some("gsk_conventional")),
                ("DOCQA_GENERATION__API_KEY", Some("gsk_explicit")),
            ],
            || {
                let config = ConfigLoader::load_from_dir(dir.path()).unwrap();
                assert_eq!(config.generation.api_key.as_deref(), Some("gsk_explicit"));
            },
        );
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load_from_file(dir.path().join("nope.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "retrieval:\n  top_k: 0\n").unwrap();

        temp_env::with_vars(CLEAN_ENV, || {
            let err = ConfigLoader::load_from_file(&path).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::InvalidTopK(0))
            ));
        });
    }

    #[test]
    fn test_validate_zero_chunk_size() {
        let mut config = Config::default();
        config.chunking.max_chunk_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidChunkSize(0))
        ));
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = Config::default();
        config.generation.temperature = 2.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTemperature(_))
        ));

        config.generation.temperature = 0.0;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = Config::default();
        config.generation.model = "  ".to_string();
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::EmptyModel)));
    }
}
