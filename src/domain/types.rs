// ==========================================
// 水泥熟料系数模拟系统 - 领域类型定义
// ==========================================
// 数据口径 / 模拟模式 / 负分配策略
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 数据口径 (Data Type)
// ==========================================
// 决定取用 Actual 还是 Budget 列对
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Actual, // 实绩
    Budget, // 预算
}

impl DataType {
    /// 熟料消耗列名
    pub const fn clinker_column(self) -> &'static str {
        match self {
            DataType::Actual => "Actual Clinker Consumption",
            DataType::Budget => "Budget Clinker Consumption",
        }
    }

    /// 水泥产量列名
    pub const fn production_column(self) -> &'static str {
        match self {
            DataType::Actual => "Actual Cement Production",
            DataType::Budget => "Budget Cement Production",
        }
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Actual
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Actual => write!(f, "Actual"),
            DataType::Budget => write!(f, "Budget"),
        }
    }
}

impl std::str::FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "actual" => Ok(DataType::Actual),
            "budget" => Ok(DataType::Budget),
            other => Err(format!("未知数据口径: {}", other)),
        }
    }
}

// ==========================================
// 模拟模式 (Simulation Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    TargetConsolidated, // 目标综合熟料系数
    PerTypeOverride,    // 分品种熟料系数
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationMode::TargetConsolidated => write!(f, "Target Consolidated Factor"),
            SimulationMode::PerTypeOverride => write!(f, "Target Per-Type Factor"),
        }
    }
}

// ==========================================
// 负分配策略 (Allocation Policy)
// ==========================================
// 目标综合系数过低时，可调品种的熟料总量可能为负
// Allow: 原样输出（默认）
// Reject: 拒绝计算
// Clamp: 可调品种熟料消耗置 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    Allow,
    Reject,
    Clamp,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        AllocationPolicy::Allow
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationPolicy::Allow => write!(f, "allow"),
            AllocationPolicy::Reject => write!(f, "reject"),
            AllocationPolicy::Clamp => write!(f, "clamp"),
        }
    }
}

impl std::str::FromStr for AllocationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allow" => Ok(AllocationPolicy::Allow),
            "reject" => Ok(AllocationPolicy::Reject),
            "clamp" => Ok(AllocationPolicy::Clamp),
            other => Err(format!("未知负分配策略: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_columns() {
        assert_eq!(DataType::Actual.clinker_column(), "Actual Clinker Consumption");
        assert_eq!(DataType::Budget.production_column(), "Budget Cement Production");
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!(" Budget ".parse::<DataType>().unwrap(), DataType::Budget);
        assert!("forecast".parse::<DataType>().is_err());
        assert_eq!("CLAMP".parse::<AllocationPolicy>().unwrap(), AllocationPolicy::Clamp);
        assert_eq!(AllocationPolicy::default(), AllocationPolicy::Allow);
    }
}
