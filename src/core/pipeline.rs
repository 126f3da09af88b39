use crate::core::export::{chart_series, projection_csv, scenarios_csv, summary_json};
use crate::core::scenario::compose;
use crate::core::{simulate, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{RoiReport, SimulationInput, TransformResult};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const PROJECTION_FILE: &str = "roi_projection.csv";
pub const SCENARIOS_FILE: &str = "roi_scenarios.csv";
pub const SUMMARY_FILE: &str = "roi_summary.json";

pub struct RoiPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RoiPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }

    /// 依設定的輸出格式挑出要寫入的檔案
    fn output_files<'a>(&self, result: &'a TransformResult) -> Vec<(&'static str, &'a str)> {
        let mut files = Vec::new();
        if self.wants("csv") {
            files.push((PROJECTION_FILE, result.projection_csv.as_str()));
            files.push((SCENARIOS_FILE, result.scenarios_csv.as_str()));
        }
        if self.wants("json") {
            files.push((SUMMARY_FILE, result.summary_json.as_str()));
        }
        files
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for RoiPipeline<S, C> {
    fn extract(&self) -> Result<SimulationInput> {
        let assumptions = self.config.assumptions();
        let ramp = self.config.ramp();

        tracing::debug!(
            "Assumptions: {} stores, fee {} {}, ramp {:?}",
            assumptions.stores,
            assumptions.fee_per_store_per_year,
            assumptions.currency,
            ramp
        );
        if assumptions.fee_per_store_per_year == 0.0 {
            tracing::warn!("Fee is zero, ROI and payback will be undefined");
        }

        Ok(SimulationInput {
            assumptions,
            ramp,
            irr_settings: self.config.irr_settings(),
            presets: self.config.presets(),
            view_period: self.config.view_period(),
        })
    }

    fn transform(&self, input: SimulationInput) -> Result<TransformResult> {
        let simulation = simulate(&input.assumptions, &input.ramp, &input.irr_settings);

        if simulation.valuation.irr.is_finite() && !simulation.valuation.irr_converged {
            tracing::warn!(
                "IRR did not converge within {} iterations, reporting last estimate {}",
                input.irr_settings.max_iterations,
                simulation.valuation.irr
            );
        }

        let scenarios = compose(
            &input.assumptions,
            &input.presets,
            &input.ramp,
            &input.irr_settings,
        );
        tracing::debug!("Evaluated {} scenarios", scenarios.len());

        let report = RoiReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            currency: input.assumptions.currency.clone(),
            stores: input.assumptions.stores,
            view_period: input.view_period,
            chart: chart_series(&simulation.projection.rows, input.view_period),
            assumptions: input.assumptions,
            projection: simulation.projection,
            valuation: simulation.valuation,
            scenarios,
        };

        Ok(TransformResult {
            projection_csv: projection_csv(&report.projection.rows)?,
            scenarios_csv: scenarios_csv(&report.scenarios)?,
            summary_json: summary_json(&report)?,
            report,
        })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let files = self.output_files(&result);

        if let Some(archive) = self.config.archive_name() {
            tracing::debug!("Creating ZIP file with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, content) in &files {
                    zip.start_file::<_, ()>(*name, FileOptions::default())?;
                    zip.write_all(content.as_bytes())?;
                }
                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(archive, &zip_data)?;
            return Ok(format!("{}/{}", self.config.output_path(), archive));
        }

        for (name, content) in &files {
            tracing::debug!("Writing {} ({} bytes)", name, content.len());
            self.storage.write_file(name, content.as_bytes())?;
        }
        Ok(self.config.output_path().to_string())
    }
}
