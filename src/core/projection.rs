use crate::core::economics::{baseline, improved};
use crate::domain::model::{Assumptions, Projection, YearRow};

/// 逐年計算增量現金流。合規節省隨導入程度放大，年費則每年全額收取。
pub fn project(a: &Assumptions, ramp: &[f64]) -> Projection {
    let baseline_op = baseline(a).operating_profit;
    let fee = a.fee_per_store_per_year;

    let rows: Vec<YearRow> = ramp
        .iter()
        .enumerate()
        .map(|(i, &scale)| {
            let improved = improved(a, scale);
            let compliance = a.compliance_savings_per_store * scale;
            YearRow {
                year: i + 1,
                scale,
                improved,
                baseline_operating_profit: baseline_op,
                compliance,
                fee,
                incremental_cash_flow: (improved.operating_profit - baseline_op) + compliance
                    - fee,
            }
        })
        .collect();

    let cash_flows = rows.iter().map(|r| r.incremental_cash_flow).collect();
    Projection { rows, cash_flows }
}

/// 完全導入 (scale = 1.0) 時的年度增量現金流
pub fn full_effect_cash_flow(a: &Assumptions) -> f64 {
    (improved(a, 1.0).operating_profit - baseline(a).operating_profit)
        + a.compliance_savings_per_store
        - a.fee_per_store_per_year
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_default_ramp() {
        let a = Assumptions::default();
        let projection = project(&a, &a.ramp());

        assert_eq!(projection.rows.len(), 3);
        assert_eq!(projection.cash_flows.len(), 3);
        assert_eq!(projection.rows[0].year, 1);
        assert_eq!(projection.rows[2].label(), "Year 3");

        let y1 = &projection.rows[0];
        assert!((y1.compliance - 7_000.0).abs() < 1e-9);
        assert_eq!(y1.fee, 600_000.0);
        assert!((y1.incremental_cash_flow - (-482_883.030_8)).abs() < 1e-3);

        for (row, cf) in projection.rows.iter().zip(&projection.cash_flows) {
            assert_eq!(row.incremental_cash_flow, *cf);
            assert!((row.baseline_operating_profit - 2_236_800.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fee_is_not_scaled_by_ramp() {
        let a = Assumptions::default();
        let projection = project(&a, &[0.0, 0.5]);
        assert_eq!(projection.rows[0].fee, a.fee_per_store_per_year);
        assert_eq!(projection.rows[1].fee, a.fee_per_store_per_year);
        // 導入程度 0 時只剩年費
        assert!((projection.cash_flows[0] + a.fee_per_store_per_year).abs() < 1e-6);
    }

    #[test]
    fn test_project_generalizes_to_n_years() {
        let a = Assumptions::default();
        let projection = project(&a, &[0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(projection.rows.len(), 5);
        assert!((projection.cash_flows[4] - full_effect_cash_flow(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_empty_ramp_yields_empty_projection() {
        let projection = project(&Assumptions::default(), &[]);
        assert!(projection.rows.is_empty());
        assert!(projection.cash_flows.is_empty());
    }

    #[test]
    fn test_full_effect_cash_flow_default() {
        let cf = full_effect_cash_flow(&Assumptions::default());
        assert!((cf - (-432_212.0)).abs() < 1e-3);
    }
}
