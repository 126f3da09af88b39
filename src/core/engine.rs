use crate::core::Pipeline;
use crate::domain::model::RoiReport;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub report: RoiReport,
}

pub struct RoiEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RoiEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting ROI simulation");

        // Extract
        let input = self.pipeline.extract()?;
        tracing::info!(
            "Loaded assumptions for {} stores over {} years",
            input.assumptions.stores,
            input.ramp.len()
        );

        // Transform
        let result = self.pipeline.transform(input)?;
        let valuation = &result.report.valuation;
        tracing::info!(
            "Store NPV {:.0}, chain NPV {:.0}, IRR {}, ROI {}",
            valuation.npv,
            valuation.chain_npv,
            valuation.irr,
            valuation.roi
        );
        let report = result.report.clone();

        // Load
        let output_path = self.pipeline.load(result)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            report,
        })
    }
}
