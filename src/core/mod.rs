pub mod economics;
pub mod engine;
pub mod export;
pub mod pipeline;
pub mod projection;
pub mod scenario;
pub mod valuation;

pub use crate::domain::model::{
    Assumptions, IrrSettings, Projection, RoiReport, SimulationInput, TransformResult,
    ValuationResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

/// 單一假設的完整計算結果
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub projection: Projection,
    pub valuation: ValuationResult,
}

/// 假設 → 逐年現金流 → 估值。純函式，每次都重新計算。
pub fn simulate(assumptions: &Assumptions, ramp: &[f64], settings: &IrrSettings) -> Simulation {
    let projection = projection::project(assumptions, ramp);
    let valuation = valuation::value(assumptions, &projection.cash_flows, settings);
    Simulation {
        projection,
        valuation,
    }
}
