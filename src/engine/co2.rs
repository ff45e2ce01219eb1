// ==========================================
// 水泥熟料系数模拟系统 - CO₂ 排放估算
// ==========================================
// co2_process = (cf/100) * 煅烧系数 * 1000
// co2_fuel    = STEC * 燃料排放因子 * (1 - TSR/100) * (cf/100)
// co2_total   = (co2_process + co2_fuel) * 调整系数
// ==========================================
// 注: 不做范围校验,异常输入按算术结果传播
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_STEC: f64 = 3340.0;
pub const DEFAULT_TSR: f64 = 13.0;
pub const DEFAULT_FUEL_EMISSION_FACTOR: f64 = 0.0958;
pub const DEFAULT_CALCINATION_FACTOR: f64 = 0.531;
pub const DEFAULT_ADJUSTMENT_FACTOR: f64 = 1.01;

/// 物理常数（可由配置覆写）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Co2Constants {
    /// 单位熟料热耗 STEC（MJ/t 熟料）
    #[serde(default = "default_stec")]
    pub stec: f64,

    /// 替代燃料热替代率 TSR（%）
    #[serde(default = "default_tsr")]
    pub tsr: f64,

    /// 燃料排放因子（kg CO₂/MJ）
    #[serde(default = "default_fuel_ef")]
    pub fuel_emission_factor: f64,

    /// 煅烧排放系数（kg CO₂/kg 熟料）
    #[serde(default = "default_calcination")]
    pub calcination_factor: f64,

    /// 调整系数
    #[serde(default = "default_adjustment")]
    pub adjustment_factor: f64,
}

fn default_stec() -> f64 {
    DEFAULT_STEC
}
fn default_tsr() -> f64 {
    DEFAULT_TSR
}
fn default_fuel_ef() -> f64 {
    DEFAULT_FUEL_EMISSION_FACTOR
}
fn default_calcination() -> f64 {
    DEFAULT_CALCINATION_FACTOR
}
fn default_adjustment() -> f64 {
    DEFAULT_ADJUSTMENT_FACTOR
}

impl Default for Co2Constants {
    fn default() -> Self {
        Self {
            stec: DEFAULT_STEC,
            tsr: DEFAULT_TSR,
            fuel_emission_factor: DEFAULT_FUEL_EMISSION_FACTOR,
            calcination_factor: DEFAULT_CALCINATION_FACTOR,
            adjustment_factor: DEFAULT_ADJUSTMENT_FACTOR,
        }
    }
}

/// 估算输入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Co2Parameters {
    /// 综合熟料系数（%）
    pub clinker_factor: f64,

    #[serde(flatten)]
    pub constants: Co2Constants,
}

impl Co2Parameters {
    pub fn new(clinker_factor: f64, constants: Co2Constants) -> Self {
        Self {
            clinker_factor,
            constants,
        }
    }
}

/// 估算结果（kg CO₂ / t 水泥当量）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Co2Estimate {
    pub co2_process: f64,
    pub co2_fuel: f64,
    pub co2_subtotal: f64,
    pub co2_total: f64,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Co2Estimator;

impl Co2Estimator {
    pub fn new() -> Self {
        Self
    }

    pub fn estimate(&self, params: &Co2Parameters) -> Co2Estimate {
        let c = &params.constants;
        let clinker_ratio = params.clinker_factor / 100.0;

        let co2_process = clinker_ratio * c.calcination_factor * 1000.0;
        let co2_fuel = c.stec * c.fuel_emission_factor * (1.0 - c.tsr / 100.0) * clinker_ratio;
        let co2_subtotal = co2_process + co2_fuel;
        let co2_total = co2_subtotal * c.adjustment_factor;

        debug!(
            clinker_factor = params.clinker_factor,
            co2_process,
            co2_fuel,
            co2_total,
            "CO₂ 估算完成"
        );

        Co2Estimate {
            co2_process,
            co2_fuel,
            co2_subtotal,
            co2_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        let estimate = Co2Estimator::new().estimate(&Co2Parameters::new(80.0, Co2Constants::default()));

        assert!((estimate.co2_process - 424.8).abs() < 1e-9);
        // 3340 * 0.0958 * 0.87 * 0.8
        assert!((estimate.co2_fuel - 222.700_512).abs() < 1e-9);
        assert!((estimate.co2_total - 653.975_517_12).abs() < 1e-6);
        assert_eq!(format!("{:.0}", estimate.co2_total), "654");
    }

    #[test]
    fn test_zero_clinker_factor_gives_zero() {
        let estimate = Co2Estimator::new().estimate(&Co2Parameters::new(0.0, Co2Constants::default()));
        assert_eq!(estimate.co2_total, 0.0);
    }

    #[test]
    fn test_out_of_range_inputs_propagate() {
        let constants = Co2Constants {
            tsr: 150.0,
            ..Co2Constants::default()
        };
        let estimate = Co2Estimator::new().estimate(&Co2Parameters::new(80.0, constants));
        // TSR > 100 使燃料项为负,不报错
        assert!(estimate.co2_fuel < 0.0);
    }

    #[test]
    fn test_constants_deserialize_with_defaults() {
        let constants: Co2Constants = serde_json::from_str(r#"{"tsr": 20.0}"#).unwrap();
        assert_eq!(constants.tsr, 20.0);
        assert_eq!(constants.stec, DEFAULT_STEC);
        assert_eq!(constants.adjustment_factor, DEFAULT_ADJUSTMENT_FACTOR);
    }
}
