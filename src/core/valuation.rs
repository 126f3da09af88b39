//! NPV、IRR、ROI 與回收期。
//!
//! 現金流都發生在年底，沒有第 0 年的期初投資 (年費已逐年扣除)。
//! 數學上無定義的結果以 `f64::NAN` 回傳，由呼叫端決定如何顯示。

use crate::core::projection::full_effect_cash_flow;
use crate::domain::model::{Assumptions, IrrSettings, IrrSolution, ValuationResult};

/// `Σ cf[t] / (1+rate)^t`，t 從 1 開始
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(i, cf)| cf / (1.0 + rate).powi(i as i32 + 1))
        .sum()
}

fn has_sign_change(cash_flows: &[f64]) -> bool {
    let all_non_negative = cash_flows.iter().all(|&c| c >= 0.0);
    let all_non_positive = cash_flows.iter().all(|&c| c <= 0.0);
    !(all_non_negative || all_non_positive)
}

/// Newton-Raphson 求 IRR。
///
/// 現金流沒有正負號變化時無解，回傳 NaN。更新量非有限值或小於
/// `tolerance` 時停止；達到 `max_iterations` 仍未收斂則直接回傳最後的估計值，
/// `converged` 為 false。
pub fn solve_irr(cash_flows: &[f64], settings: &IrrSettings) -> IrrSolution {
    if !has_sign_change(cash_flows) {
        return IrrSolution {
            rate: f64::NAN,
            converged: false,
            iterations: 0,
        };
    }

    let mut rate = settings.initial_guess;
    let mut converged = false;
    let mut iterations = 0;

    for _ in 0..settings.max_iterations {
        iterations += 1;

        let mut f = 0.0;
        let mut df = 0.0;
        for (i, &cf) in cash_flows.iter().enumerate() {
            let t = i as i32 + 1;
            f += cf / (1.0 + rate).powi(t);
            df += -(t as f64) * cf / (1.0 + rate).powi(t + 1);
        }

        let next = rate - f / df;
        if !next.is_finite() {
            rate = next;
            break;
        }
        if (next - rate).abs() < settings.tolerance {
            rate = next;
            converged = true;
            break;
        }
        rate = next;
    }

    IrrSolution {
        rate,
        converged,
        iterations,
    }
}

/// 使用預設參數 (起始 10%、最多 100 次、容差 1e-7) 的 IRR
pub fn irr(cash_flows: &[f64]) -> f64 {
    solve_irr(cash_flows, &IrrSettings::default()).rate
}

/// 完全導入年度的 ROI；年費為 0 時無定義。
pub fn roi(a: &Assumptions) -> f64 {
    if a.fee_per_store_per_year == 0.0 {
        return f64::NAN;
    }
    full_effect_cash_flow(a) / a.fee_per_store_per_year
}

/// 回收年數。年費為 0 或完全導入現金流不為正時無定義。
pub fn payback_years(a: &Assumptions) -> f64 {
    let full = full_effect_cash_flow(a);
    if a.fee_per_store_per_year == 0.0 || full <= 0.0 {
        return f64::NAN;
    }
    a.fee_per_store_per_year / full
}

/// 假設各店同質，直接按店數線性放大。
pub fn chain_npv(store_npv: f64, stores: u32) -> f64 {
    store_npv * stores as f64
}

pub fn value(a: &Assumptions, cash_flows: &[f64], settings: &IrrSettings) -> ValuationResult {
    let store_npv = npv(a.discount_rate, cash_flows);
    let irr = solve_irr(cash_flows, settings);
    ValuationResult {
        npv: store_npv,
        chain_npv: chain_npv(store_npv, a.stores),
        irr: irr.rate,
        irr_converged: irr.converged,
        roi: roi(a),
        payback_years: payback_years(a),
        full_effect_cash_flow: full_effect_cash_flow(a),
    }
}
