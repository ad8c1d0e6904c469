use clap::Parser;
use order_normalizer::utils::{logger, preview::render_preview, validation::Validate};
use order_normalizer::{CliConfig, EtlEngine, LocalStorage, NormalizerPipeline};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting order-normalizer");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = config.monitor;
    let preview_rows = config.preview_rows;

    let pipeline = NormalizerPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(outcome) => {
            println!("✅ Clean file created successfully: {}", outcome.output_path);
            println!(
                "{} invoices -> {} product rows",
                outcome.rows_read,
                outcome.records.len()
            );
            if preview_rows > 0 {
                println!("Preview of cleaned data:");
                println!("{}", render_preview(&outcome.records, preview_rows));
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Normalization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
