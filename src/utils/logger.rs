use crate::config::LoggingSection;
use crate::utils::error::{ImportError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 把 `INFO`、`debug` 等設定值轉成 EnvFilter 指令，未知的等級回傳錯誤
fn level_directive(level: &str, verbose: bool) -> Result<String> {
    let directive = match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" | "" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        _ => {
            return Err(ImportError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: level.to_string(),
                reason: "Expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL".to_string(),
            })
        }
    };

    if verbose {
        return Ok("crits_import=debug,info".to_string());
    }
    Ok(directive.to_string())
}

/// 依照 [logging] 設定把日誌寫到檔案 (無 ANSI 顏色)
pub fn init_file_logger(logging: &LoggingSection, verbose: bool) -> Result<()> {
    let directive = level_directive(&logging.level, verbose)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logging.filename)?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&directive).map_err(|e| {
            ImportError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: logging.level.clone(),
                reason: e.to_string(),
            }
        })
    })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();

    Ok(())
}

/// 設定檔還無法讀取時使用的 stderr logger
pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("crits_import=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crits_import=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
