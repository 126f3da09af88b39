use crate::core::simulate;
use crate::domain::model::{
    Assumptions, IrrSettings, ScenarioName, ScenarioOverrides, ScenarioPreset, ScenarioResult,
};

impl ScenarioOverrides {
    /// 以情境值覆寫基準假設的改善欄位，其餘欄位沿用基準。
    pub fn apply(&self, base: &Assumptions) -> Assumptions {
        let mut merged = base.clone();
        if let Some(v) = self.sales_uplift_pct {
            merged.sales_uplift_pct = v;
        }
        if let Some(v) = self.gm_improvement_pp {
            merged.gm_improvement_pp = v;
        }
        if let Some(v) = self.labor_efficiency_pct {
            merged.labor_efficiency_pct = v;
        }
        if let Some(v) = self.shrink_reduction_pct {
            merged.shrink_reduction_pct = v;
        }
        if let Some(v) = self.compliance_savings_per_store {
            merged.compliance_savings_per_store = v;
        }
        merged
    }

    /// 以 `other` 中有值的欄位覆蓋自己
    pub fn merge(&self, other: &ScenarioOverrides) -> ScenarioOverrides {
        ScenarioOverrides {
            sales_uplift_pct: other.sales_uplift_pct.or(self.sales_uplift_pct),
            gm_improvement_pp: other.gm_improvement_pp.or(self.gm_improvement_pp),
            labor_efficiency_pct: other.labor_efficiency_pct.or(self.labor_efficiency_pct),
            shrink_reduction_pct: other.shrink_reduction_pct.or(self.shrink_reduction_pct),
            compliance_savings_per_store: other
                .compliance_savings_per_store
                .or(self.compliance_savings_per_store),
        }
    }
}

pub fn preset(name: ScenarioName) -> ScenarioPreset {
    let overrides = match name {
        ScenarioName::Pessimistic => ScenarioOverrides {
            sales_uplift_pct: Some(0.004),
            gm_improvement_pp: Some(0.001),
            labor_efficiency_pct: Some(0.005),
            shrink_reduction_pct: Some(0.05),
            compliance_savings_per_store: Some(0.0),
        },
        ScenarioName::Base => ScenarioOverrides {
            sales_uplift_pct: Some(0.015),
            gm_improvement_pp: Some(0.005),
            labor_efficiency_pct: Some(0.02),
            shrink_reduction_pct: Some(0.20),
            compliance_savings_per_store: Some(10_000.0),
        },
        ScenarioName::Optimistic => ScenarioOverrides {
            sales_uplift_pct: Some(0.03),
            gm_improvement_pp: Some(0.01),
            labor_efficiency_pct: Some(0.04),
            shrink_reduction_pct: Some(0.35),
            compliance_savings_per_store: Some(30_000.0),
        },
    };
    ScenarioPreset { name, overrides }
}

/// 固定的三個情境，依 pessimistic、base、optimistic 排序
pub fn default_presets() -> Vec<ScenarioPreset> {
    ScenarioName::ALL.iter().map(|&name| preset(name)).collect()
}

pub fn run_scenario(
    base: &Assumptions,
    preset: &ScenarioPreset,
    ramp: &[f64],
    settings: &IrrSettings,
) -> ScenarioResult {
    let assumptions = preset.overrides.apply(base);
    let simulation = simulate(&assumptions, ramp, settings);
    ScenarioResult {
        name: preset.name,
        npv: simulation.valuation.npv,
        chain_npv: simulation.valuation.chain_npv,
        irr: simulation.valuation.irr,
        roi: simulation.valuation.roi,
        payback_years: simulation.valuation.payback_years,
    }
}

/// 每個情境各自獨立跑完整模型。
pub fn compose(
    base: &Assumptions,
    presets: &[ScenarioPreset],
    ramp: &[f64],
    settings: &IrrSettings,
) -> Vec<ScenarioResult> {
    presets
        .iter()
        .map(|p| run_scenario(base, p, ramp, settings))
        .collect()
}
