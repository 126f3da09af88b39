use crate::config::DEFAULT_ARCHIVE_NAME;
use crate::core::scenario::default_presets;
use crate::core::ConfigProvider;
use crate::domain::model::{
    Assumptions, IrrSettings, ScenarioName, ScenarioOverrides, ScenarioPreset, ViewPeriod,
};
use crate::utils::error::{RoiError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// 自訂多年導入曲線；未設定時使用 assumptions 的 ramp_y1..ramp_y3
    pub ramp: Option<Vec<f64>>,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub assumptions: Assumptions,
    #[serde(default)]
    pub solver: IrrSettings,
    /// 以情境名稱 (pessimistic/base/optimistic) 調整預設情境值
    #[serde(default)]
    pub scenarios: HashMap<String, ScenarioOverrides>,
    pub output: OutputConfig,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub monthly: Option<bool>,
    /// "compact" 或 "json"
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RoiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RoiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROI_OUTPUT_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RoiError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("simulation.name", &self.simulation.name)?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_output_formats("output.output_formats", &self.output.output_formats)?;

        if let Some(ramp) = &self.ramp {
            validation::validate_ramp("ramp", ramp)?;
        }

        self.resolved_scenarios()?;

        if let Some(format) = self.log_format() {
            if format != "compact" && format != "json" {
                return Err(RoiError::InvalidConfigValueError {
                    field: "display.log_format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }

        self.solver.validate()?;
        self.assumptions.validate()
    }

    /// 將 `[scenarios.<name>]` 對應到情境。別名 (worst/best) 與正式名稱
    /// 指向同一情境時視為重複設定。
    pub fn resolved_scenarios(&self) -> Result<BTreeMap<ScenarioName, &ScenarioOverrides>> {
        let mut resolved = BTreeMap::new();
        for (key, overrides) in &self.scenarios {
            let name = key.parse::<ScenarioName>()?;
            if resolved.insert(name, overrides).is_some() {
                return Err(RoiError::InvalidConfigValueError {
                    field: format!("scenarios.{}", key),
                    value: key.clone(),
                    reason: format!("Scenario '{}' is configured more than once", name),
                });
            }
        }
        Ok(resolved)
    }

    pub fn monthly(&self) -> bool {
        self.display
            .as_ref()
            .and_then(|d| d.monthly)
            .unwrap_or(false)
    }

    pub fn log_format(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.log_format.as_deref())
    }

    pub fn compression_enabled(&self) -> bool {
        self.output
            .compression
            .as_ref()
            .map(|c| c.enabled)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn assumptions(&self) -> Assumptions {
        self.assumptions.clone()
    }

    fn ramp(&self) -> Vec<f64> {
        match &self.ramp {
            Some(ramp) => ramp.clone(),
            None => self.assumptions.ramp().to_vec(),
        }
    }

    fn irr_settings(&self) -> IrrSettings {
        self.solver
    }

    fn presets(&self) -> Vec<ScenarioPreset> {
        let mut presets = default_presets();
        // 無效的情境設定在 validate_config 已擋下
        if let Ok(resolved) = self.resolved_scenarios() {
            for preset in presets.iter_mut() {
                if let Some(overrides) = resolved.get(&preset.name) {
                    preset.overrides = preset.overrides.merge(overrides);
                }
            }
        }
        presets
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.output_formats
    }

    fn archive_name(&self) -> Option<&str> {
        if !self.compression_enabled() {
            return None;
        }
        let filename = self.output.compression.as_ref()?.filename.as_deref();
        Some(filename.unwrap_or(DEFAULT_ARCHIVE_NAME))
    }

    fn view_period(&self) -> ViewPeriod {
        ViewPeriod::from_monthly(self.monthly())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
ramp = [0.5, 0.9, 1.0, 1.0]

[simulation]
name = "nordic-rollout"
description = "Five-year rollout"

[assumptions]
stores = 40
fee_per_store_per_year = 450000
currency = "SEK"

[solver]
max_iterations = 50

[output]
output_path = "./test-output"
output_formats = ["csv", "json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.simulation.name, "nordic-rollout");
        let a = config.assumptions();
        assert_eq!(a.stores, 40);
        assert_eq!(a.fee_per_store_per_year, 450_000.0);
        assert_eq!(a.currency, "SEK");
        // 未設定的欄位沿用預設值
        assert_eq!(a.gross_margin_pct, 0.32);
        assert_eq!(config.ramp(), vec![0.5, 0.9, 1.0, 1.0]);
        assert_eq!(config.irr_settings().max_iterations, 50);
        assert_eq!(config.irr_settings().tolerance, 1e-7);
        assert!(config.archive_name().is_none());
        assert_eq!(config.view_period(), ViewPeriod::Annual);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ramp_defaults_to_assumptions() {
        let toml_content = r#"
[simulation]
name = "test"

[assumptions]
ramp_y1 = 0.4

[output]
output_path = "./output"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.ramp(), vec![0.4, 1.0, 1.0]);
    }

    #[test]
    fn test_scenario_overrides_merge_into_presets() {
        let toml_content = r#"
[simulation]
name = "test"

[scenarios.worst]
compliance_savings_per_store = 2500

[scenarios.optimistic]
sales_uplift_pct = 0.05

[output]
output_path = "./output"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let presets = config.presets();
        assert_eq!(presets.len(), 3);
        assert_eq!(presets[0].name, ScenarioName::Pessimistic);
        assert_eq!(presets[0].overrides.compliance_savings_per_store, Some(2500.0));
        assert_eq!(presets[0].overrides.sales_uplift_pct, Some(0.004));
        assert_eq!(presets[2].overrides.sales_uplift_pct, Some(0.05));
        assert_eq!(presets[2].overrides.shrink_reduction_pct, Some(0.35));
    }

    #[test]
    fn test_scenario_cannot_override_fee() {
        let toml_content = r#"
[simulation]
name = "test"

[scenarios.base]
fee_per_store_per_year = 0

[output]
output_path = "./output"
output_formats = ["csv"]
"#;

        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        let toml_content = r#"
[simulation]
name = "test"

[scenarios.stretch]
sales_uplift_pct = 0.1

[output]
output_path = "./output"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, RoiError::UnknownScenario { .. }));
    }

    #[test]
    fn test_alias_and_name_for_same_scenario_rejected() {
        let toml_content = r#"
[simulation]
name = "test"

[scenarios.worst]
sales_uplift_pct = 0.001

[scenarios.pessimistic]
sales_uplift_pct = 0.002

[output]
output_path = "./output"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, RoiError::InvalidConfigValueError { .. }));
        assert!(err.to_string().contains("more than once"));
        // 未通過驗證時不套用任何覆寫，結果不受 HashMap 走訪順序影響
        assert_eq!(config.presets(), default_presets());
    }

    #[test]
    fn test_compression_disabled_ignores_filename() {
        let toml_content = r#"
[simulation]
name = "test"

[output]
output_path = "./output"
output_formats = ["csv"]

[output.compression]
enabled = false
filename = "bundle.zip"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.compression_enabled());
        assert!(config.archive_name().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STORE_ROI_TEST_OUTPUT", "/tmp/roi-reports");

        let toml_content = r#"
[simulation]
name = "test"

[output]
output_path = "${STORE_ROI_TEST_OUTPUT}"
output_formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/roi-reports");

        std::env::remove_var("STORE_ROI_TEST_OUTPUT");
    }

    #[test]
    fn test_compression_and_display() {
        let toml_content = r#"
[simulation]
name = "test"

[output]
output_path = "./output"
output_formats = ["csv", "json"]

[output.compression]
enabled = true

[display]
monthly = true
log_format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.compression_enabled());
        assert_eq!(config.archive_name(), Some(DEFAULT_ARCHIVE_NAME));
        assert_eq!(config.view_period(), ViewPeriod::Monthly);
        assert_eq!(config.log_format(), Some("json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[simulation]
name = "test"

[assumptions]
gross_margin_pct = 1.5

[output]
output_path = "./output"
output_formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[simulation]
name = "file-test"

[output]
output_path = "./output"
output_formats = ["csv"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.simulation.name, "file-test");
    }
}
