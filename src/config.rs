use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::args::ParseArgs;

/// Environment variable holding the bearer credential for the completion
/// endpoint. There is no default and no fallback.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Resolve the endpoint credential from the process environment. Called
/// before any file or network traffic so a missing token aborts the run
/// without side effects.
pub fn resolve_token() -> Result<String> {
    token_from_env(std::env::var(TOKEN_ENV_VAR).ok())
}

fn token_from_env(value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("{TOKEN_ENV_VAR} not set"))
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ResumexConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ExtractionConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub verbosity: u8,

    #[serde(default)]
    pub debug: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    1500
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            verbosity: 0,
            debug: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: None }
    }
}

impl Default for ResumexConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid range in {field}: {value} (valid range: {valid_range})")]
    InvalidRange {
        field: String,
        value: String,
        valid_range: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ResumexConfig {
    /// Merge another config into this one (other takes precedence for set
    /// values).
    pub fn merge(&mut self, other: &ResumexConfig) {
        if other.extraction.model != default_model() {
            self.extraction.model = other.extraction.model.clone();
        }
        if other.extraction.temperature != default_temperature() {
            self.extraction.temperature = other.extraction.temperature;
        }
        if other.extraction.max_tokens != default_max_tokens() {
            self.extraction.max_tokens = other.extraction.max_tokens;
        }
        if other.extraction.verbosity > 0 {
            self.extraction.verbosity = other.extraction.verbosity;
        }
        if other.extraction.debug {
            self.extraction.debug = other.extraction.debug;
        }

        if other.api.base_url.is_some() {
            self.api.base_url = other.api.base_url.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.extraction.temperature) {
            return Err(ConfigError::InvalidRange {
                field: "extraction.temperature".to_string(),
                value: self.extraction.temperature.to_string(),
                valid_range: "0.0-2.0".to_string(),
            });
        }

        if self.extraction.max_tokens == 0 {
            return Err(ConfigError::InvalidRange {
                field: "extraction.max_tokens".to_string(),
                value: self.extraction.max_tokens.to_string(),
                valid_range: "1 or more".to_string(),
            });
        }

        if self.extraction.verbosity > 5 {
            return Err(ConfigError::InvalidRange {
                field: "extraction.verbosity".to_string(),
                value: self.extraction.verbosity.to_string(),
                valid_range: "0-5".to_string(),
            });
        }

        Ok(())
    }

    pub fn generate_default_config() -> String {
        let default_config = Self::default();
        toml::to_string_pretty(&default_config).unwrap_or_else(|_| {
            r#"# Resumex Configuration File

[extraction]
model = "openai/gpt-4o-mini"
temperature = 0.2
max_tokens = 1500
verbosity = 0
debug = false

[api]
# base_url = "https://models.github.ai/inference"
"#
            .to_string()
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ResumexConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the user config file path (~/.config/resumex/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/resumex/config.toml"))
    }

    /// Get the system config file path (/etc/resumex/config.toml)
    pub fn get_system_config_path() -> PathBuf {
        PathBuf::from("/etc/resumex/config.toml")
    }

    /// Get the current directory config file path (./resumex.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./resumex.toml")
    }

    /// Load and merge configs from all sources with priority:
    /// 1. User config (~/.config/resumex/config.toml) - lowest priority (base)
    /// 2. Current directory (./resumex.toml)
    /// 3. System config (/etc/resumex/config.toml) - highest priority
    pub fn load_with_merged_configs() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_path) = Self::get_user_config_path() {
            if user_path.exists() {
                if let Ok(user_config) = Self::load_from_file(&user_path) {
                    config.merge(&user_config);
                    tracing::debug!("Loaded user config from: {}", user_path.display());
                }
            }
        }

        let current_path = Self::get_current_config_path();
        if current_path.exists() {
            if let Ok(current_config) = Self::load_from_file(&current_path) {
                config.merge(&current_config);
                tracing::debug!(
                    "Loaded current directory config from: {}",
                    current_path.display()
                );
            }
        }

        let system_path = Self::get_system_config_path();
        if system_path.exists() {
            if let Ok(system_config) = Self::load_from_file(&system_path) {
                config.merge(&system_config);
                tracing::debug!("Loaded system config from: {}", system_path.display());
            }
        }

        Ok(config)
    }

    pub fn apply_env_vars(&mut self, env_vars: &HashMap<String, String>) -> Result<()> {
        for (key, value) in env_vars {
            if let Some(config_key) = key.strip_prefix("RESUMEX_") {
                match config_key {
                    "EXTRACTION_MODEL" => self.extraction.model = value.clone(),
                    "EXTRACTION_TEMPERATURE" => {
                        self.extraction.temperature = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid temperature value: {}", value))?;
                    }
                    "EXTRACTION_MAX_TOKENS" => {
                        self.extraction.max_tokens = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid max_tokens value: {}", value))?;
                    }
                    "EXTRACTION_VERBOSITY" => {
                        self.extraction.verbosity = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid verbosity value: {}", value))?;
                    }
                    "EXTRACTION_DEBUG" => {
                        self.extraction.debug = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid debug value: {}", value))?;
                    }
                    "API_BASE_URL" => self.api.base_url = Some(value.clone()),
                    _ => {} // Ignore unknown environment variables
                }
            }
        }
        Ok(())
    }

    pub fn apply_parse_args(&mut self, args: &ParseArgs) -> Result<()> {
        if let Some(ref model) = args.model {
            self.extraction.model = model.clone();
        }

        if args.verbosity > 0 {
            self.extraction.verbosity = args.verbosity;
        }

        if args.debug {
            self.extraction.debug = args.debug;
        }

        if let Some(ref base_url) = args.api_base_url {
            self.api.base_url = Some(base_url.clone());
        }

        Ok(())
    }

    /// Load configuration with full precedence chain:
    /// 1. Default values (lowest)
    /// 2. User config (~/.config/resumex/config.toml)
    /// 3. Current directory (./resumex.toml)
    /// 4. System config (/etc/resumex/config.toml) - highest file priority
    /// 5. Environment variables (RESUMEX_*)
    /// 6. CLI arguments (highest)
    ///
    /// If config_path is explicitly provided, it's loaded and merged after
    /// step 4.
    pub fn load_with_precedence(
        config_path: Option<PathBuf>,
        cli_args: &ParseArgs,
        env_vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut config = Self::load_with_merged_configs().unwrap_or_else(|_| Self::default());

        if let Some(path) = config_path {
            let explicit_config = Self::load_from_file(&path)
                .map_err(|e| anyhow!("Failed to load config file {}: {}", path.display(), e))?;
            config.merge(&explicit_config);
        }

        config.apply_env_vars(env_vars)?;
        config.apply_parse_args(cli_args)?;
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ResumexConfig::default();
        assert_eq!(config.extraction.model, "openai/gpt-4o-mini");
        assert_eq!(config.extraction.temperature, 0.2);
        assert_eq!(config.extraction.max_tokens, 1500);
        assert_eq!(config.extraction.verbosity, 0);
        assert!(!config.extraction.debug);
        assert_eq!(config.api.base_url, None);
    }

    #[test]
    fn test_toml_parsing() {
        let toml_content = r#"
[extraction]
model = "openai/gpt-4o"
temperature = 0.7
max_tokens = 2000
debug = true

[api]
base_url = "http://localhost:8080"
"#;

        let config: ResumexConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.extraction.model, "openai/gpt-4o");
        assert_eq!(config.extraction.temperature, 0.7);
        assert_eq!(config.extraction.max_tokens, 2000);
        assert!(config.extraction.debug);
        assert_eq!(
            config.api.base_url,
            Some("http://localhost:8080".to_string())
        );
    }

    #[test]
    fn test_env_var_application() {
        let mut config = ResumexConfig::default();
        let mut env_vars = HashMap::new();
        env_vars.insert(
            "RESUMEX_EXTRACTION_MODEL".to_string(),
            "openai/gpt-4o".to_string(),
        );
        env_vars.insert(
            "RESUMEX_EXTRACTION_MAX_TOKENS".to_string(),
            "800".to_string(),
        );
        env_vars.insert("RESUMEX_EXTRACTION_DEBUG".to_string(), "true".to_string());

        config.apply_env_vars(&env_vars).unwrap();

        assert_eq!(config.extraction.model, "openai/gpt-4o");
        assert_eq!(config.extraction.max_tokens, 800);
        assert!(config.extraction.debug);
    }

    #[test]
    fn test_env_var_rejects_garbage() {
        let mut config = ResumexConfig::default();
        let mut env_vars = HashMap::new();
        env_vars.insert(
            "RESUMEX_EXTRACTION_TEMPERATURE".to_string(),
            "hot".to_string(),
        );

        assert!(config.apply_env_vars(&env_vars).is_err());
    }

    #[test]
    fn test_config_file_loading() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[extraction]
model = "openai/gpt-4.1"
max_tokens = 3000
"#
        )
        .unwrap();

        let config = ResumexConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.extraction.model, "openai/gpt-4.1");
        assert_eq!(config.extraction.max_tokens, 3000);
    }

    #[test]
    fn test_generate_default_config() {
        let config_string = ResumexConfig::generate_default_config();
        assert!(config_string.contains("[extraction]"));
        assert!(config_string.contains("model = \"openai/gpt-4o-mini\""));
        assert!(config_string.contains("max_tokens = 1500"));

        let parsed: ResumexConfig = toml::from_str(&config_string).unwrap();
        assert_eq!(parsed.extraction.temperature, 0.2);
    }

    #[test]
    fn test_validation() {
        let mut config = ResumexConfig::default();

        config.extraction.temperature = 3.5;
        assert!(config.validate().is_err());

        config.extraction.temperature = 0.2;
        assert!(config.validate().is_ok());

        config.extraction.max_tokens = 0;
        assert!(config.validate().is_err());

        config.extraction.max_tokens = 1500;
        config.extraction.verbosity = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = ResumexConfig::default();

        let override_config: ResumexConfig = toml::from_str(
            r#"
[extraction]
model = "openai/gpt-4o"
max_tokens = 900

[api]
base_url = "http://localhost:9999"
"#,
        )
        .unwrap();

        base.merge(&override_config);

        assert_eq!(base.extraction.model, "openai/gpt-4o");
        assert_eq!(base.extraction.max_tokens, 900);
        assert_eq!(base.api.base_url, Some("http://localhost:9999".to_string()));

        // Values not overridden keep their defaults
        assert_eq!(base.extraction.temperature, 0.2);
        assert!(!base.extraction.debug);
    }

    #[test]
    fn test_config_merge_priority() {
        let mut config = ResumexConfig::default();

        let user_config: ResumexConfig = toml::from_str(
            r#"
[extraction]
model = "user-model"
max_tokens = 600
"#,
        )
        .unwrap();
        config.merge(&user_config);

        let current_config: ResumexConfig = toml::from_str(
            r#"
[extraction]
model = "current-model"
"#,
        )
        .unwrap();
        config.merge(&current_config);

        // Later merge wins for overridden fields, earlier values survive
        // where not overridden.
        assert_eq!(config.extraction.model, "current-model");
        assert_eq!(config.extraction.max_tokens, 600);
    }

    #[test]
    fn test_cli_args_take_precedence() {
        let mut config = ResumexConfig::default();
        let args = ParseArgs {
            model: Some("openai/gpt-4o".to_string()),
            api_base_url: Some("http://localhost:1234".to_string()),
            verbosity: 2,
            debug: false,
            config: None,
            generate_config: false,
        };

        config.apply_parse_args(&args).unwrap();

        assert_eq!(config.extraction.model, "openai/gpt-4o");
        assert_eq!(config.api.base_url, Some("http://localhost:1234".to_string()));
        assert_eq!(config.extraction.verbosity, 2);
    }

    #[test]
    fn test_get_user_config_path() {
        let path = ResumexConfig::get_user_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with(".config/resumex/config.toml"));
    }

    #[test]
    fn test_get_system_config_path() {
        assert_eq!(
            ResumexConfig::get_system_config_path(),
            PathBuf::from("/etc/resumex/config.toml")
        );
    }

    #[test]
    fn test_get_current_config_path() {
        assert_eq!(
            ResumexConfig::get_current_config_path(),
            PathBuf::from("./resumex.toml")
        );
    }

    #[test]
    fn test_token_from_env() {
        assert_eq!(
            token_from_env(Some("ghp_abc".to_string())).unwrap(),
            "ghp_abc"
        );

        let missing = token_from_env(None);
        assert!(missing.is_err());
        assert!(missing.unwrap_err().to_string().contains("GITHUB_TOKEN"));

        // An empty value is treated the same as an unset variable.
        assert!(token_from_env(Some(String::new())).is_err());
    }
}
