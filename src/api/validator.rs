// ==========================================
// 水泥熟料系数模拟系统 - 输入校验器
// ==========================================
// 职责: 展示层数值边界校验（与界面输入控件一致）
//   目标综合系数 ≥ 0
//   分品种系数 ∈ [0, 100]
//   CO₂ 熟料系数 / TSR ∈ [0, 100]
// 引擎本身不做范围校验
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ==========================================
// ValidationMode - 校验模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationMode {
    /// 严格模式：越界即返回错误
    #[default]
    Strict,
    /// 自动修复模式：越界值截断到边界
    AutoFix,
}

// ==========================================
// InputValidator
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator {
    mode: ValidationMode,
}

impl InputValidator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// 目标综合熟料系数（≥ 0，无上限）
    pub fn validate_target_factor(&self, value: f64) -> ApiResult<f64> {
        self.check_range("target_factor", value, 0.0, f64::INFINITY)
    }

    /// 分品种熟料系数 [0, 100]
    pub fn validate_override_factor(&self, cement_type: &str, value: f64) -> ApiResult<f64> {
        self.check_range(&format!("clinker_factor[{}]", cement_type), value, 0.0, 100.0)
    }

    /// 百分比类输入 [0, 100]（CO₂ 熟料系数、TSR）
    pub fn validate_percentage(&self, field: &str, value: f64) -> ApiResult<f64> {
        self.check_range(field, value, 0.0, 100.0)
    }

    /// 无范围限制,仅要求为有限数
    pub fn validate_finite(&self, field: &str, value: f64) -> ApiResult<f64> {
        if !value.is_finite() {
            return Err(ApiError::InvalidInput(format!("{} 不是有效数值: {}", field, value)));
        }
        Ok(value)
    }

    fn check_range(&self, field: &str, value: f64, min: f64, max: f64) -> ApiResult<f64> {
        let value = self.validate_finite(field, value)?;
        if value >= min && value <= max {
            return Ok(value);
        }

        match self.mode {
            ValidationMode::Strict => {
                warn!(field, value, min, max, "输入超出范围");
                Err(ApiError::InvalidInput(format!(
                    "{} = {} 超出范围 [{}, {}]",
                    field, value, min, max
                )))
            }
            ValidationMode::AutoFix => {
                let fixed = value.clamp(min, max);
                warn!(field, value, fixed, "AutoFix模式: 输入截断到边界");
                Ok(fixed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_rejects_out_of_range() {
        let v = InputValidator::new(ValidationMode::Strict);
        assert_eq!(v.validate_override_factor("OPC", 55.0).unwrap(), 55.0);
        assert!(v.validate_override_factor("OPC", 100.5).is_err());
        assert!(v.validate_target_factor(-0.1).is_err());
        assert_eq!(v.validate_target_factor(250.0).unwrap(), 250.0);
        assert!(v.validate_percentage("tsr", f64::NAN).is_err());
    }

    #[test]
    fn test_autofix_clamps() {
        let v = InputValidator::new(ValidationMode::AutoFix);
        assert_eq!(v.validate_override_factor("OPC", 120.0).unwrap(), 100.0);
        assert_eq!(v.validate_target_factor(-5.0).unwrap(), 0.0);
        // 非有限数不可修复
        assert!(v.validate_percentage("clinker_factor", f64::INFINITY).is_err());
    }
}
