use crate::domain::model::{
    Assumptions, IrrSettings, ScenarioPreset, SimulationInput, TransformResult, ViewPeriod,
};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn assumptions(&self) -> Assumptions;
    /// 各年導入程度，長度即專案年數
    fn ramp(&self) -> Vec<f64>;
    fn irr_settings(&self) -> IrrSettings;
    fn presets(&self) -> Vec<ScenarioPreset>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// 有值時輸出打包成 zip
    fn archive_name(&self) -> Option<&str>;
    fn view_period(&self) -> ViewPeriod;
}

pub trait Pipeline {
    fn extract(&self) -> Result<SimulationInput>;
    fn transform(&self, input: SimulationInput) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
