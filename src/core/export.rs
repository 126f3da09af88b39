//! 報表輸出：逐年 CSV、情境 CSV、JSON 摘要與圖表資料。

use crate::domain::model::{ChartPoint, RoiReport, ScenarioResult, ViewPeriod, YearRow};
use crate::utils::error::{RoiError, Result};

/// 欄位順序固定，匯出端依此讀取
pub const PROJECTION_HEADERS: [&str; 11] = [
    "Year",
    "Scale",
    "Revenue",
    "GrossProfit",
    "LaborCost",
    "Shrink",
    "OperatingProfit",
    "BaselineOp",
    "Compliance",
    "Fee",
    "IncrementalCF",
];

pub const SCENARIO_HEADERS: [&str; 6] = ["Scenario", "NPV", "ChainNPV", "IRR", "ROI", "PaybackYears"];

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| RoiError::IoError(e.into_error()))?;
    let text = String::from_utf8(bytes).map_err(|e| RoiError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })?;
    Ok(text.trim_end_matches('\n').to_string())
}

pub fn projection_csv(rows: &[YearRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(PROJECTION_HEADERS)?;

    for row in rows {
        let e = &row.improved;
        writer.write_record([
            row.label(),
            row.scale.to_string(),
            e.revenue.to_string(),
            e.gross_profit.to_string(),
            e.labor_cost.to_string(),
            e.shrink.to_string(),
            e.operating_profit.to_string(),
            row.baseline_operating_profit.to_string(),
            row.compliance.to_string(),
            row.fee.to_string(),
            row.incremental_cash_flow.to_string(),
        ])?;
    }

    finish(writer)
}

pub fn scenarios_csv(results: &[ScenarioResult]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(SCENARIO_HEADERS)?;

    for result in results {
        writer.write_record([
            result.name.to_string(),
            result.npv.to_string(),
            result.chain_npv.to_string(),
            result.irr.to_string(),
            result.roi.to_string(),
            result.payback_years.to_string(),
        ])?;
    }

    finish(writer)
}

/// NaN 會被序列化成 null
pub fn summary_json(report: &RoiReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// 每年增量現金流，依顯示週期換算後取整。.5 一律往正無限大進位。
pub fn chart_series(rows: &[YearRow], period: ViewPeriod) -> Vec<ChartPoint> {
    rows.iter()
        .map(|row| ChartPoint {
            label: row.label(),
            incremental_cash_flow: round_half_up(row.incremental_cash_flow * period.factor()),
        })
        .collect()
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::project;
    use crate::core::scenario::{compose, default_presets};
    use crate::domain::model::{Assumptions, IrrSettings};

    #[test]
    fn test_projection_csv_header_and_rows() {
        let a = Assumptions::default();
        let projection = project(&a, &a.ramp());
        let csv = projection_csv(&projection.rows).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Year,Scale,Revenue,GrossProfit,LaborCost,Shrink,OperatingProfit,BaselineOp,Compliance,Fee,IncrementalCF"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Year 1,0.7,"));
        assert!(lines[2].starts_with("Year 2,1,"));
        assert!(lines[3].ends_with(",600000,-432212"));
        assert_eq!(lines[1].split(',').count(), PROJECTION_HEADERS.len());
    }

    #[test]
    fn test_projection_csv_empty_rows_has_header_only() {
        let csv = projection_csv(&[]).unwrap();
        assert_eq!(csv, PROJECTION_HEADERS.join(","));
    }

    #[test]
    fn test_scenarios_csv_renders_undefined_as_nan() {
        let a = Assumptions::default();
        let results = compose(&a, &default_presets(), &a.ramp(), &IrrSettings::default());
        let csv = scenarios_csv(&results).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Scenario,NPV,ChainNPV,IRR,ROI,PaybackYears");
        assert!(lines[1].starts_with("pessimistic,"));
        assert!(lines[2].starts_with("base,"));
        assert!(lines[3].starts_with("optimistic,"));
        // 預設假設下各情境現金流全為負，IRR 與回收期無定義
        assert!(lines[1].contains("NaN"));
    }

    #[test]
    fn test_chart_series_monthly_factor() {
        let a = Assumptions::default();
        let projection = project(&a, &a.ramp());

        let annual = chart_series(&projection.rows, ViewPeriod::Annual);
        assert_eq!(annual[2].label, "Year 3");
        assert_eq!(annual[2].incremental_cash_flow, -432_212);

        let monthly = chart_series(&projection.rows, ViewPeriod::Monthly);
        assert_eq!(monthly[2].incremental_cash_flow, -36_018);
    }

    #[test]
    fn test_chart_series_rounds_halves_up() {
        let a = Assumptions::default();
        let mut rows = project(&a, &[1.0, 1.0, 1.0]).rows;
        rows[0].incremental_cash_flow = -2.5;
        rows[1].incremental_cash_flow = 2.5;
        rows[2].incremental_cash_flow = -2.4;

        let chart = chart_series(&rows, ViewPeriod::Annual);
        let values: Vec<i64> = chart.iter().map(|p| p.incremental_cash_flow).collect();
        assert_eq!(values, vec![-2, 3, -2]);
    }
}
