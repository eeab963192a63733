use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Submission to {url} was rejected with HTTP {status}")]
    RejectedError { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid arguments: {message}")]
    InvalidArgumentsError { message: String },
}

impl ImportError {
    /// 設定或參數錯誤：任何單位都不可能成功，應直接結束
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ImportError::ConfigError { .. }
                | ImportError::MissingConfigError { .. }
                | ImportError::InvalidConfigValueError { .. }
                | ImportError::InvalidArgumentsError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::MissingConfigError { field } => {
                format!("Must supply CRITs {} in the configuration file", field)
            }
            ImportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            ImportError::InvalidArgumentsError { message } => message.clone(),
            ImportError::ConfigError { message } => message.clone(),
            ImportError::RejectedError { status, .. } => {
                format!("CRITs rejected the submission (HTTP {})", status)
            }
            ImportError::HttpError(e) if e.is_connect() => {
                "Could not connect to CRITs".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::MissingConfigError { .. } | ImportError::InvalidConfigValueError { .. } => {
                "Replace the <placeholder> values in the configuration file with real settings"
            }
            ImportError::ConfigError { .. } => {
                "Make sure the configuration file exists and is valid TOML"
            }
            ImportError::InvalidArgumentsError { .. } => {
                "Use either --list or --folder (folders are only supported for samples)"
            }
            ImportError::IoError(_) | ImportError::WalkError(_) | ImportError::CsvError(_) => {
                "Check that the input path exists and is readable"
            }
            ImportError::HttpError(_) => "Check the CRITs URL and network connectivity",
            ImportError::RejectedError { .. } => "Check the API key, username and source",
            ImportError::ZipError(_) => "Check the archive and the configured zip_password",
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
