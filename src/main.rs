use clap::Parser;
use store_roi::core::engine::RunSummary;
use store_roi::utils::format::{fmt_amount, fmt_percent, fmt_years};
use store_roi::utils::{logger, validation::Validate};
use store_roi::{CliConfig, LocalStorage, RoiEngine, RoiPipeline};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting store-roi CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = RoiPipeline::new(storage, config);
    let engine = RoiEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            print_summary(&summary);
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
}

fn print_summary(summary: &RunSummary) {
    let report = &summary.report;
    let valuation = &report.valuation;
    let currency = report.currency.as_str();
    let factor = report.view_period.factor();
    let years = report.projection.rows.len();

    println!("\n=== Chain ROI overview ({} stores) ===", report.stores);
    println!("ROI (full effect):      {}", fmt_percent(valuation.roi));
    println!("Payback (years):        {}", fmt_years(valuation.payback_years));
    println!(
        "NPV, chain ({} years):   {}",
        years,
        fmt_amount(valuation.chain_npv * factor, currency)
    );
    println!(
        "NPV, per store:         {}",
        fmt_amount(valuation.npv * factor, currency)
    );
    println!("IRR ({} years):          {}", years, fmt_percent(valuation.irr));

    println!("\nIncremental cash flow per store:");
    for point in &report.chart {
        println!(
            "  {:<8} {}",
            point.label,
            fmt_amount(point.incremental_cash_flow as f64, currency)
        );
    }

    println!(
        "\n{:<12} {:>8} {:>8} {:>22} {:>8}",
        "Scenario", "ROI", "Payback", "NPV per store", "IRR"
    );
    for s in &report.scenarios {
        println!(
            "{:<12} {:>8} {:>8} {:>22} {:>8}",
            s.name.to_string(),
            fmt_percent(s.roi),
            fmt_years(s.payback_years),
            fmt_amount(s.npv, currency),
            fmt_percent(s.irr)
        );
    }
    println!();
}
