use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{self, Validate};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DELAY_SECONDS: f64 = 1.0;
pub const DEFAULT_ZIP_PASSWORD: &str = "infected";
pub const DEFAULT_LOG_FILE: &str = "crits_import.log";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImporterConfig {
    #[serde(default)]
    pub crits: CritsSection,
    #[serde(default)]
    pub importer: ImporterSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CritsSection {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub source: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImporterSection {
    #[serde(default = "default_delay")]
    pub delay: f64,
    /// 逗號分隔的 MIME 類型
    pub blacklist: Option<String>,
    pub zip_password: Option<String>,
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_file")]
    pub filename: String,
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_delay() -> f64 {
    DEFAULT_DELAY_SECONDS
}

fn default_log_file() -> String {
    DEFAULT_LOG_FILE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ImporterSection {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY_SECONDS,
            blacklist: None,
            zip_password: None,
            scratch_dir: None,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filename: default_log_file(),
            level: default_log_level(),
        }
    }
}

impl ImporterConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ImportError::ConfigError {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 key = "${CRITS_API_KEY}")
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ImportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/api/v1/{}/",
            self.crits.url.trim().trim_end_matches('/'),
            resource
        )
    }

    pub fn domains_url(&self) -> String {
        self.endpoint("domains")
    }

    pub fn samples_url(&self) -> String {
        self.endpoint("samples")
    }

    pub fn delay(&self) -> Result<Duration> {
        validation::delay_duration("importer.delay", self.importer.delay)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.crits.timeout_seconds.map(Duration::from_secs)
    }

    pub fn blacklist(&self) -> Vec<String> {
        self.importer
            .blacklist
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|mime| mime.trim().to_ascii_lowercase())
            .filter(|mime| !mime.is_empty())
            .collect()
    }

    pub fn zip_password(&self) -> &str {
        self.importer
            .zip_password
            .as_deref()
            .unwrap_or(DEFAULT_ZIP_PASSWORD)
    }

    pub fn scratch_dir(&self) -> Option<&Path> {
        self.importer.scratch_dir.as_deref()
    }
}

impl Validate for ImporterConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("url", &self.crits.url)?;
        validation::validate_required_setting("user", &self.crits.user)?;
        validation::validate_required_setting("API key", &self.crits.key)?;
        validation::validate_required_setting("source", &self.crits.source)?;
        validation::validate_delay("importer.delay", self.importer.delay)?;
        validation::validate_path("logging.filename", &self.logging.filename)?;
        Ok(())
    }
}
