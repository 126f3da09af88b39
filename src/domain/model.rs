use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 單店業務假設。模型本身不檢查數值範圍，檢查請呼叫 `Validate`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// 幣別標籤，只用於顯示
    pub currency: String,
    /// 連鎖店數 (>= 1)
    pub stores: u32,
    pub fee_per_store_per_year: f64,
    pub annual_revenue_per_store: f64,
    /// 毛利率 [0,1]
    pub gross_margin_pct: f64,
    /// 人事成本佔營收比例 [0,1]
    pub labor_cost_pct_of_revenue: f64,
    /// 損耗佔銷貨成本比例 [0,1]
    pub shrink_pct_of_cogs: f64,
    pub sales_uplift_pct: f64,
    /// 毛利率提升 (百分點，以小數表示)
    pub gm_improvement_pp: f64,
    pub labor_efficiency_pct: f64,
    pub shrink_reduction_pct: f64,
    pub compliance_savings_per_store: f64,
    pub discount_rate: f64,
    /// 各年導入程度 [0,1]，不做截斷
    pub ramp_y1: f64,
    pub ramp_y2: f64,
    pub ramp_y3: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            currency: "NOK".to_string(),
            stores: 100,
            fee_per_store_per_year: 600_000.0,
            annual_revenue_per_store: 12_000_000.0,
            gross_margin_pct: 0.32,
            labor_cost_pct_of_revenue: 0.12,
            shrink_pct_of_cogs: 0.02,
            sales_uplift_pct: 0.015,
            gm_improvement_pp: 0.005,
            labor_efficiency_pct: 0.02,
            shrink_reduction_pct: 0.20,
            compliance_savings_per_store: 10_000.0,
            discount_rate: 0.10,
            ramp_y1: 0.70,
            ramp_y2: 1.0,
            ramp_y3: 1.0,
        }
    }
}

impl Assumptions {
    /// 預設三年導入曲線
    pub fn ramp(&self) -> [f64; 3] {
        [self.ramp_y1, self.ramp_y2, self.ramp_y3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreEconomics {
    pub revenue: f64,
    pub gross_profit: f64,
    pub cogs: f64,
    pub labor_cost: f64,
    pub shrink: f64,
    pub operating_profit: f64,
}

/// 導入期間中的一年。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearRow {
    /// 從 1 開始
    pub year: usize,
    pub scale: f64,
    pub improved: StoreEconomics,
    pub baseline_operating_profit: f64,
    pub compliance: f64,
    pub fee: f64,
    pub incremental_cash_flow: f64,
}

impl YearRow {
    pub fn label(&self) -> String {
        format!("Year {}", self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub rows: Vec<YearRow>,
    pub cash_flows: Vec<f64>,
}

/// Newton-Raphson IRR 求解參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrSettings {
    pub initial_guess: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for IrrSettings {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            max_iterations: 100,
            tolerance: 1e-7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrrSolution {
    /// 無法定義時為 NaN
    pub rate: f64,
    pub converged: bool,
    pub iterations: usize,
}

/// 估值結果。無定義的值以 NaN 表示，不是錯誤。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuationResult {
    pub npv: f64,
    pub chain_npv: f64,
    pub irr: f64,
    pub irr_converged: bool,
    pub roi: f64,
    pub payback_years: f64,
    pub full_effect_cash_flow: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ScenarioName {
    #[cfg_attr(feature = "cli", value(alias = "worst"))]
    Pessimistic,
    Base,
    #[cfg_attr(feature = "cli", value(alias = "best"))]
    Optimistic,
}

impl ScenarioName {
    pub const ALL: [ScenarioName; 3] = [
        ScenarioName::Pessimistic,
        ScenarioName::Base,
        ScenarioName::Optimistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioName::Pessimistic => "pessimistic",
            ScenarioName::Base => "base",
            ScenarioName::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for ScenarioName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioName {
    type Err = crate::utils::error::RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pessimistic" | "worst" => Ok(ScenarioName::Pessimistic),
            "base" => Ok(ScenarioName::Base),
            "optimistic" | "best" => Ok(ScenarioName::Optimistic),
            _ => Err(crate::utils::error::RoiError::UnknownScenario {
                name: s.to_string(),
            }),
        }
    }
}

/// 情境只覆寫改善相關欄位，不會動到費用、營收或導入曲線。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioOverrides {
    pub sales_uplift_pct: Option<f64>,
    pub gm_improvement_pp: Option<f64>,
    pub labor_efficiency_pct: Option<f64>,
    pub shrink_reduction_pct: Option<f64>,
    pub compliance_savings_per_store: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioPreset {
    pub name: ScenarioName,
    pub overrides: ScenarioOverrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub name: ScenarioName,
    pub npv: f64,
    pub chain_npv: f64,
    pub irr: f64,
    pub roi: f64,
    pub payback_years: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPeriod {
    #[default]
    Annual,
    Monthly,
}

impl ViewPeriod {
    pub fn from_monthly(monthly: bool) -> Self {
        if monthly {
            ViewPeriod::Monthly
        } else {
            ViewPeriod::Annual
        }
    }

    /// 顯示用的金額係數
    pub fn factor(&self) -> f64 {
        match self {
            ViewPeriod::Annual => 1.0,
            ViewPeriod::Monthly => 1.0 / 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub incremental_cash_flow: i64,
}

/// 萃取階段的輸出：一次模擬所需的全部輸入。
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationInput {
    pub assumptions: Assumptions,
    pub ramp: Vec<f64>,
    pub irr_settings: IrrSettings,
    pub presets: Vec<ScenarioPreset>,
    pub view_period: ViewPeriod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiReport {
    pub generated_at: String,
    pub currency: String,
    pub stores: u32,
    pub view_period: ViewPeriod,
    pub assumptions: Assumptions,
    pub projection: Projection,
    pub valuation: ValuationResult,
    pub scenarios: Vec<ScenarioResult>,
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub report: RoiReport,
    pub projection_csv: String,
    pub scenarios_csv: String,
    pub summary_json: String,
}
