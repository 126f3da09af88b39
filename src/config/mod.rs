pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::scenario::{default_presets, preset};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{Assumptions, IrrSettings, ScenarioName, ScenarioPreset, ViewPeriod};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_ARCHIVE_NAME: &str = "roi_output.zip";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "store-roi")]
#[command(about = "NPV / IRR / ROI simulator for a store chain adopting a subscription platform")]
pub struct CliConfig {
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Output formats: csv, json
    #[arg(long, value_delimiter = ',', default_values_t = ["csv".to_string(), "json".to_string()])]
    pub formats: Vec<String>,

    #[arg(long)]
    pub stores: Option<u32>,

    /// Platform fee per store per year
    #[arg(long)]
    pub fee: Option<f64>,

    /// Annual revenue per store
    #[arg(long)]
    pub revenue: Option<f64>,

    #[arg(long)]
    pub discount_rate: Option<f64>,

    /// Currency label (display only)
    #[arg(long)]
    pub currency: Option<String>,

    /// Apply a scenario preset to the headline run
    #[arg(long, value_enum)]
    pub preset: Option<ScenarioName>,

    /// Adoption scale per year, e.g. 0.7,1,1
    #[arg(long, value_delimiter = ',')]
    pub ramp: Vec<f64>,

    #[arg(long, help = "Show money values per month")]
    pub monthly: bool,

    #[arg(long, help = "Bundle the report files into a zip archive")]
    pub compress: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn assumptions(&self) -> Assumptions {
        let mut a = Assumptions::default();
        if let Some(stores) = self.stores {
            a.stores = stores;
        }
        if let Some(fee) = self.fee {
            a.fee_per_store_per_year = fee;
        }
        if let Some(revenue) = self.revenue {
            a.annual_revenue_per_store = revenue;
        }
        if let Some(rate) = self.discount_rate {
            a.discount_rate = rate;
        }
        if let Some(currency) = &self.currency {
            a.currency = currency.clone();
        }
        match self.preset {
            Some(name) => preset(name).overrides.apply(&a),
            None => a,
        }
    }

    fn ramp(&self) -> Vec<f64> {
        if self.ramp.is_empty() {
            Assumptions::default().ramp().to_vec()
        } else {
            self.ramp.clone()
        }
    }

    fn irr_settings(&self) -> IrrSettings {
        IrrSettings::default()
    }

    fn presets(&self) -> Vec<ScenarioPreset> {
        default_presets()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn archive_name(&self) -> Option<&str> {
        self.compress.then_some(DEFAULT_ARCHIVE_NAME)
    }

    fn view_period(&self) -> ViewPeriod {
        ViewPeriod::from_monthly(self.monthly)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        if !self.ramp.is_empty() {
            validation::validate_ramp("ramp", &self.ramp)?;
        }
        self.assumptions().validate()
    }
}
