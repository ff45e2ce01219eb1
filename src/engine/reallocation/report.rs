// ==========================================
// 配比调整结果
// ==========================================

use crate::domain::cement::{CementTypeRow, RowSet};
use crate::domain::types::SimulationMode;
use serde::{Deserialize, Serialize};

/// 目标综合系数模式的分配明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    /// 全部品种总产量
    pub total_production: f64,

    /// 固定品种熟料合计（不调整）
    pub fixed_clinker_sum: f64,

    /// 可调品种产量合计
    pub variable_production_sum: f64,

    /// 目标熟料总量 = 目标系数 / 100 * 总产量
    pub target_clinker_total: f64,

    /// 可调品种熟料总量 = 目标熟料总量 - 固定品种熟料合计
    pub variable_clinker_total: f64,

    /// 是否因负分配被截断为 0
    pub clamped: bool,
}

/// 一次模拟的输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub mode: SimulationMode,

    /// 参与调整的品种（按输入顺序去重）
    pub selected_types: Vec<String>,

    /// 调整后的完整行集
    pub result: RowSet,

    /// 调整前（仅选中品种）
    pub before: Vec<CementTypeRow>,

    /// 调整后（仅选中品种）
    pub after: Vec<CementTypeRow>,

    pub baseline_consolidated_factor: f64,
    pub consolidated_factor: f64,

    /// 仅目标综合系数模式有值
    pub allocation: Option<AllocationBreakdown>,
}

impl SimulationOutcome {
    /// 综合系数变化量（百分点）
    pub fn consolidated_delta(&self) -> f64 {
        self.consolidated_factor - self.baseline_consolidated_factor
    }

    /// 熟料总量变化（吨）
    pub fn clinker_delta(&self) -> f64 {
        let before: f64 = self.before.iter().map(|r| r.clinker_consumption).sum();
        let after: f64 = self.after.iter().map(|r| r.clinker_consumption).sum();
        after - before
    }
}
