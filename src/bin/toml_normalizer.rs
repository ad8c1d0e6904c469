use clap::Parser;
use order_normalizer::core::{ConfigProvider, Pipeline};
use order_normalizer::utils::{logger, preview::render_preview, validation::Validate};
use order_normalizer::{
    EtlEngine, LocalStorage, NormalizerError, NormalizerPipeline, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-normalizer")]
#[command(about = "Order normalizer driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "normalizer.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Parse and preview without writing the output file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    let preview_rows = config.preview_rows();
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = NormalizerPipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - output will not be written");
        if let Err(e) = perform_dry_run(&pipeline, preview_rows).await {
            fail(e);
        }
        return;
    }

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
    match engine.run().await {
        Ok(outcome) => {
            println!("✅ Clean file created successfully: {}", outcome.output_path);
            if preview_rows > 0 {
                println!("Preview of cleaned data:");
                println!("{}", render_preview(&outcome.records, preview_rows));
            }
        }
        Err(e) => fail(e),
    }
}

fn fail(e: NormalizerError) -> ! {
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Pipeline: {}", config.pipeline_name());
    println!("  Source: {}", config.input_file());
    if let Some(sheet) = config.sheet_name() {
        println!("  Sheet: {}", sheet);
    }
    println!("  Output: {}/{}", config.output_path(), config.output_file());
    println!("  Missing products: {:?}", config.missing_products());
    println!("  BOM: {}", config.write_bom());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run<P: Pipeline>(
    pipeline: &P,
    preview_rows: usize,
) -> Result<(), NormalizerError> {
    let rows = pipeline.extract().await?;
    let result = pipeline.transform(rows).await?;

    println!("🔍 Dry Run Analysis:");
    println!("  Invoices read: {}", result.rows_read);
    println!("  Invoices without products: {}", result.rows_skipped);
    println!("  Product rows: {}", result.records.len());
    println!();
    println!("{}", render_preview(&result.records, preview_rows));

    Ok(())
}
