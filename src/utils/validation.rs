use crate::utils::error::{ImportError, Result};
use std::time::Duration;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 範本中的 `<api_key>`、`<https://127.0.0.1>` 之類佔位值
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.len() >= 2 && value.starts_with('<') && value.ends_with('>')
}

/// 必填欄位：空值或佔位值都視為未設定
pub fn validate_required_setting(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() || is_placeholder(value) {
        return Err(ImportError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_required_setting(field_name, url_str)?;

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ImportError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ImportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 秒數轉成 Duration；負數、NaN 或超出 Duration 範圍都是錯誤
pub fn delay_duration(field_name: &str, seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|e| ImportError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: seconds.to_string(),
        reason: format!("Delay must be a non-negative number of seconds ({})", e),
    })
}

pub fn validate_delay(field_name: &str, seconds: f64) -> Result<()> {
    delay_duration(field_name, seconds).map(|_| ())
}
