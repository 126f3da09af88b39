//! 單店損益模型：導入前 (baseline) 與導入後 (improved)。

use crate::domain::model::{Assumptions, StoreEconomics};

/// 導入後毛利率上限。只截斷毛利率，人事與損耗的改善係數不截斷。
pub const MAX_GROSS_MARGIN: f64 = 0.99;

fn economics(
    a: &Assumptions,
    revenue: f64,
    gross_margin: f64,
    labor_factor: f64,
    shrink_factor: f64,
) -> StoreEconomics {
    let gross_profit = revenue * gross_margin;
    let cogs = revenue - gross_profit;
    let labor_cost = a.labor_cost_pct_of_revenue * revenue * labor_factor;
    let shrink = a.shrink_pct_of_cogs * cogs * shrink_factor;
    StoreEconomics {
        revenue,
        gross_profit,
        cogs,
        labor_cost,
        shrink,
        operating_profit: gross_profit - labor_cost - shrink,
    }
}

/// 現況損益，各年相同。
pub fn baseline(a: &Assumptions) -> StoreEconomics {
    economics(a, a.annual_revenue_per_store, a.gross_margin_pct, 1.0, 1.0)
}

pub fn effective_gross_margin(a: &Assumptions, scale: f64) -> f64 {
    (a.gross_margin_pct + a.gm_improvement_pp * scale).clamp(0.0, MAX_GROSS_MARGIN)
}

/// 導入程度為 `scale` 時的損益。`scale` 不做截斷。
pub fn improved(a: &Assumptions, scale: f64) -> StoreEconomics {
    let revenue = a.annual_revenue_per_store * (1.0 + a.sales_uplift_pct * scale);
    economics(
        a,
        revenue,
        effective_gross_margin(a, scale),
        1.0 - a.labor_efficiency_pct * scale,
        1.0 - a.shrink_reduction_pct * scale,
    )
}
