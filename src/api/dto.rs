// ==========================================
// 水泥熟料系数模拟系统 - API 数据传输对象
// ==========================================
// 展示约定: 综合熟料系数保留 2 位小数, CO₂ 保留 0 位小数
// ==========================================

use crate::domain::cement::CementTypeRow;
use crate::domain::types::{DataType, SimulationMode};
use crate::engine::co2::{Co2Estimate, Co2Parameters};
use crate::engine::reallocation::AllocationBreakdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 数据集选择条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub month: String,
    pub period: String,
    pub data_type: DataType,
}

impl SelectionRequest {
    pub fn new(month: impl Into<String>, period: impl Into<String>, data_type: DataType) -> Self {
        Self {
            month: month.into(),
            period: period.into(),
            data_type,
        }
    }
}

/// 可选项（月份 / 期间 / 口径）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub months: Vec<String>,
    pub periods: Vec<String>,
    pub data_types: Vec<DataType>,
}

/// 基准数据集
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineResponse {
    pub selection: SelectionRequest,
    pub rows: Vec<CementTypeRow>,
    pub consolidated_factor: f64,
    pub consolidated_factor_display: String,
    pub generated_at: DateTime<Utc>,
}

/// 分品种系数输入默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideDefault {
    pub cement_type: String,
    pub clinker_factor: f64,
}

/// 模拟结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub selection: SelectionRequest,
    pub mode: SimulationMode,
    pub selected_types: Vec<String>,
    pub before: Vec<CementTypeRow>,
    pub after: Vec<CementTypeRow>,
    pub baseline_consolidated_factor: f64,
    pub consolidated_factor: f64,
    pub consolidated_factor_display: String,
    /// 综合系数变化（百分点）
    pub consolidated_delta: f64,
    /// 选中品种熟料合计变化（吨）
    pub clinker_delta: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation: Option<AllocationBreakdown>,
    pub generated_at: DateTime<Utc>,
}

/// CO₂ 估算所用熟料系数的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorSource {
    /// 基准综合系数
    Baseline,
    /// 目标综合系数模拟结果
    TargetSimulation,
    /// 分品种系数模拟结果
    PerTypeSimulation,
    /// 手工输入
    Manual,
}

impl From<SimulationMode> for FactorSource {
    fn from(mode: SimulationMode) -> Self {
        match mode {
            SimulationMode::TargetConsolidated => FactorSource::TargetSimulation,
            SimulationMode::PerTypeOverride => FactorSource::PerTypeSimulation,
        }
    }
}

/// CO₂ 常数覆写（None 取配置默认值）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Co2Input {
    pub stec: Option<f64>,
    pub tsr: Option<f64>,
    pub fuel_emission_factor: Option<f64>,
    pub calcination_factor: Option<f64>,
    pub adjustment_factor: Option<f64>,
}

/// CO₂ 估算结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Co2Response {
    pub factor_source: FactorSource,
    pub parameters: Co2Parameters,
    pub estimate: Co2Estimate,
    pub co2_total_display: String,
    pub generated_at: DateTime<Utc>,
}

/// 综合熟料系数展示格式
pub fn format_factor(value: f64) -> String {
    format!("{:.2}", value)
}

/// 变化量展示格式（带符号）
pub fn format_delta(value: f64) -> String {
    format!("{:+.2}", value)
}

/// CO₂ 展示格式
pub fn format_co2(value: f64) -> String {
    format!("{:.0}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        assert_eq!(format_factor(76.666_666), "76.67");
        assert_eq!(format_co2(653.975_517), "654");
        assert_eq!(format_delta(-1.818_18), "-1.82");
        assert_eq!(format_delta(0.5), "+0.50");
    }
}
