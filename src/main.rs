use clap::Parser;
use crits_import::core::resolver;
use crits_import::utils::{logger, validation::Validate};
use crits_import::{ArchiveExpander, CliConfig, CritsClient, ImportError, Importer, ImporterConfig};

/// 致命錯誤：記錄後以狀態碼 1 結束，不會送出任何請求
fn exit_with(context: &str, e: &ImportError) -> ! {
    tracing::error!("❌ {}: {}", context, e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();
    println!("Starting up CRITs import");

    // 載入設定檔；此時還沒有檔案日誌，錯誤寫到 stderr
    let config = match ImporterConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with("Failed to load configuration", &e);
        }
    };

    if let Err(e) = logger::init_file_logger(&config.logging, cli.verbose) {
        logger::init_cli_logger(cli.verbose);
        exit_with(
            &format!("Could not set up logging to '{}'", config.logging.filename),
            &e,
        );
    }
    println!(
        "Writing to log file {} at level {}.",
        config.logging.filename, config.logging.level
    );
    tracing::info!("Starting crits-import");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置與旗標組合
    if let Err(e) = config.validate() {
        exit_with("Configuration validation failed", &e);
    }
    let request = match cli.input_request().and_then(|request| {
        request.validate()?;
        Ok(request)
    }) {
        Ok(request) => request,
        Err(e) => exit_with("Invalid arguments", &e),
    };
    tracing::info!("✅ Configuration successfully validated");
    println!("Configuration successfully validated");

    let units = match resolver::resolve(&request) {
        Ok(units) => units,
        Err(e) => exit_with("Could not read input", &e),
    };
    tracing::info!(
        "Processing {} input {} ({:?} mode): {} units",
        request.kind,
        request.argument,
        request.mode,
        units.len()
    );

    let client = match CritsClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => exit_with("Could not create HTTP client", &e),
    };
    let delay = match config.delay() {
        Ok(delay) => delay,
        Err(e) => exit_with("Configuration validation failed", &e),
    };
    let importer = Importer::new(client, ArchiveExpander::from_config(&config), delay);

    // Ctrl-C 會丟棄進行中的匯入 future，解壓用的暫存資料夾隨之刪除
    let summary = tokio::select! {
        summary = importer.run(&units) => Some(summary),
        _ = tokio::signal::ctrl_c() => None,
    };

    match summary {
        Some(Err(e)) => exit_with("Import aborted", &e),
        Some(Ok(summary)) => {
            println!(
                "✅ Import finished: {} accepted, {} failed, {} skipped",
                summary.accepted, summary.failed, summary.skipped
            );
        }
        None => {
            tracing::warn!("Interrupted by operator");
            eprintln!("Interrupted");
            std::process::exit(130);
        }
    }

    Ok(())
}
