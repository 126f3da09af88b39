use crate::domain::model::{Assumptions, IrrSettings};
use crate::utils::error::{RoiError, Result};

pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value < 0.0 {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 比較永遠為 false，要用否定式才擋得住
    if !(value >= min && value <= max) {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }

    for format in formats {
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            return Err(RoiError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

pub fn validate_ramp(field_name: &str, ramp: &[f64]) -> Result<()> {
    if ramp.is_empty() {
        return Err(RoiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "Ramp must cover at least one year".to_string(),
        });
    }
    for (i, scale) in ramp.iter().enumerate() {
        validate_range(&format!("{}[{}]", field_name, i), *scale, 0.0, 1.0)?;
    }
    Ok(())
}

/// 可選的輸入檢查；模型計算本身從不呼叫。
impl Validate for Assumptions {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("currency", &self.currency)?;
        validate_positive_number("stores", self.stores as usize, 1)?;

        validate_non_negative("fee_per_store_per_year", self.fee_per_store_per_year)?;
        validate_non_negative("annual_revenue_per_store", self.annual_revenue_per_store)?;
        validate_non_negative(
            "compliance_savings_per_store",
            self.compliance_savings_per_store,
        )?;

        let ratios = [
            ("gross_margin_pct", self.gross_margin_pct),
            ("labor_cost_pct_of_revenue", self.labor_cost_pct_of_revenue),
            ("shrink_pct_of_cogs", self.shrink_pct_of_cogs),
            ("sales_uplift_pct", self.sales_uplift_pct),
            ("gm_improvement_pp", self.gm_improvement_pp),
            ("labor_efficiency_pct", self.labor_efficiency_pct),
            ("shrink_reduction_pct", self.shrink_reduction_pct),
            ("discount_rate", self.discount_rate),
        ];
        for (field, value) in ratios {
            validate_range(field, value, 0.0, 1.0)?;
        }

        validate_ramp("ramp", &self.ramp())
    }
}

impl Validate for IrrSettings {
    fn validate(&self) -> Result<()> {
        validate_finite("solver.initial_guess", self.initial_guess)?;
        validate_positive_number("solver.max_iterations", self.max_iterations, 1)?;
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(RoiError::InvalidConfigValueError {
                field: "solver.tolerance".to_string(),
                value: self.tolerance.to_string(),
                reason: "Tolerance must be a positive finite number".to_string(),
            });
        }
        Ok(())
    }
}
