use clap::Parser;
use store_roi::config::toml_config::TomlConfig;
use store_roi::core::pipeline::{PROJECTION_FILE, SCENARIOS_FILE, SUMMARY_FILE};
use store_roi::{CliConfig, LocalStorage, RoiEngine, RoiPipeline};
use std::io::Read;
use tempfile::TempDir;

#[test]
fn test_end_to_end_cli_run_writes_reports() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = CliConfig::parse_from(["store-roi", "--output-path", &output_path]);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = RoiPipeline::new(storage, config);
    let engine = RoiEngine::new(pipeline);

    let summary = engine.run()?;
    assert_eq!(summary.output_path, output_path);
    assert_eq!(summary.report.projection.rows.len(), 3);
    assert_eq!(summary.report.scenarios.len(), 3);
    assert!(summary.report.valuation.irr.is_nan());

    let projection = std::fs::read_to_string(temp_dir.path().join(PROJECTION_FILE))?;
    let mut lines = projection.lines();
    assert_eq!(
        lines.next(),
        Some("Year,Scale,Revenue,GrossProfit,LaborCost,Shrink,OperatingProfit,BaselineOp,Compliance,Fee,IncrementalCF")
    );
    assert!(lines.next().unwrap().starts_with("Year 1,0.7,"));
    assert_eq!(projection.lines().count(), 4);

    let scenarios = std::fs::read_to_string(temp_dir.path().join(SCENARIOS_FILE))?;
    assert!(scenarios.starts_with("Scenario,NPV,ChainNPV,IRR,ROI,PaybackYears"));
    assert!(scenarios.contains("\npessimistic,"));
    assert!(scenarios.contains("\noptimistic,"));

    let summary_json = std::fs::read_to_string(temp_dir.path().join(SUMMARY_FILE))?;
    let json: serde_json::Value = serde_json::from_str(&summary_json)?;
    assert_eq!(json["currency"], "NOK");
    assert_eq!(json["stores"], 100);
    // 無定義的 IRR 在 JSON 中為 null
    assert!(json["valuation"]["irr"].is_null());
    assert_eq!(json["chart"].as_array().map(|a| a.len()), Some(3));

    Ok(())
}

#[test]
fn test_compressed_run_bundles_requested_formats() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = CliConfig::parse_from([
        "store-roi",
        "--output-path",
        &output_path,
        "--formats",
        "csv",
        "--compress",
    ]);
    let storage = LocalStorage::new(output_path.clone());
    let engine = RoiEngine::new(RoiPipeline::new(storage, config));

    let summary = engine.run()?;
    assert!(summary.output_path.ends_with("roi_output.zip"));

    let zip_path = temp_dir.path().join("roi_output.zip");
    assert!(zip_path.exists());
    assert!(!temp_dir.path().join(PROJECTION_FILE).exists());

    let zip_data = std::fs::read(&zip_path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 2);

    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec![PROJECTION_FILE, SCENARIOS_FILE]);

    let mut content = String::new();
    archive.by_name(SCENARIOS_FILE)?.read_to_string(&mut content)?;
    assert!(content.starts_with("Scenario,"));

    Ok(())
}

#[test]
fn test_monthly_view_scales_chart_only() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = CliConfig::parse_from([
        "store-roi",
        "--output-path",
        &output_path,
        "--formats",
        "json",
        "--monthly",
    ]);
    let storage = LocalStorage::new(output_path);
    let summary = RoiEngine::new(RoiPipeline::new(storage, config)).run()?;

    let report = &summary.report;
    assert_eq!(report.chart[2].label, "Year 3");
    assert_eq!(report.chart[2].incremental_cash_flow, -36_018);
    // 年度數值本身不受顯示週期影響
    assert!((report.projection.cash_flows[2] + 432_212.0).abs() < 1e-6);

    Ok(())
}

#[test]
fn test_toml_driven_run() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let toml_content = format!(
        r#"
ramp = [0.5, 1.0, 1.0, 1.0, 1.0]

[simulation]
name = "five-year"

[assumptions]
stores = 40
fee_per_store_per_year = 150000

[scenarios.best]
sales_uplift_pct = 0.05

[output]
output_path = "{}"
output_formats = ["json"]

[output.compression]
enabled = true
filename = "five_year.zip"
"#,
        output_path.replace('\\', "\\\\")
    );

    let config = TomlConfig::from_toml_str(&toml_content)?;
    let storage = LocalStorage::new(output_path.clone());
    let summary = RoiEngine::new(RoiPipeline::new(storage, config)).run()?;

    let report = &summary.report;
    assert_eq!(report.stores, 40);
    assert_eq!(report.projection.cash_flows.len(), 5);
    assert!(report.valuation.irr.is_finite());
    assert!((report.valuation.chain_npv - report.valuation.npv * 40.0).abs() < 1e-6);

    let optimistic = report.scenarios.last().unwrap();
    let base = &report.scenarios[1];
    assert!(optimistic.npv > base.npv);

    let zip_path = temp_dir.path().join("five_year.zip");
    let zip_data = std::fs::read(&zip_path)?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 1);
    assert!(archive.by_name(SUMMARY_FILE).is_ok());

    Ok(())
}
