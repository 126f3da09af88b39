use anyhow::Context;
use clap::Parser;
use store_roi::config::toml_config::{DisplayConfig, TomlConfig};
use store_roi::core::ConfigProvider;
use store_roi::utils::format::{fmt_amount, fmt_percent};
use store_roi::utils::{logger, validation::Validate};
use store_roi::{LocalStorage, RoiEngine, RoiPipeline};

#[derive(Parser)]
#[command(name = "toml-roi")]
#[command(about = "ROI simulator driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "roi-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the monthly view setting from config
    #[arg(long)]
    monthly: Option<bool>,

    /// Dry run - show the merged assumptions without writing reports
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 先載入配置才知道要用哪種日誌格式
    let loaded = TomlConfig::from_file(&args.config);
    let json_logs = matches!(&loaded, Ok(c) if c.log_format() == Some("json"));
    if json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based ROI simulator");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(monthly) = args.monthly {
        let display = config.display.get_or_insert(DisplayConfig {
            monthly: None,
            log_format: None,
        });
        display.monthly = Some(monthly);
        tracing::info!("🔧 Monthly view overridden to: {}", monthly);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No reports will be written");
        let assumptions = toml::to_string_pretty(&config.assumptions())
            .context("failed to render assumptions")?;
        println!("[assumptions]\n{}", assumptions);
        println!("ramp = {:?}", config.ramp());
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = RoiPipeline::new(storage, config);
    let engine = RoiEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            let v = &summary.report.valuation;
            let currency = summary.report.currency.as_str();
            let factor = summary.report.view_period.factor();
            println!("✅ Simulation completed");
            println!("   ROI:            {}", fmt_percent(v.roi));
            println!("   IRR:            {}", fmt_percent(v.irr));
            println!("   NPV per store:  {}", fmt_amount(v.npv * factor, currency));
            println!("   NPV chain:      {}", fmt_amount(v.chain_npv * factor, currency));
            for s in &summary.report.scenarios {
                println!(
                    "   {:<12} NPV {}  IRR {}",
                    s.name.to_string(),
                    fmt_amount(s.npv, currency),
                    fmt_percent(s.irr)
                );
            }
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Simulation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let a = config.assumptions();
    tracing::info!("📋 Simulation: {}", config.simulation.name);
    if let Some(description) = &config.simulation.description {
        tracing::info!("   {}", description);
    }
    tracing::info!(
        "   {} stores, fee {} per store/year, discount rate {}",
        a.stores,
        fmt_amount(a.fee_per_store_per_year, &a.currency),
        fmt_percent(a.discount_rate)
    );
    tracing::info!(
        "   Output: {} ({})",
        config.output_path(),
        config.output_formats().join(", ")
    );
    if let Some(archive) = config.archive_name() {
        tracing::info!("   Bundled into: {}", archive);
    }
}
