// ==========================================
// 水泥熟料系数模拟系统 - 配比调整引擎
// ==========================================
// 模式 A: 目标综合熟料系数
//   固定品种熟料不变,可调品种按产量占比分摊
//   可调熟料总量 = 目标系数/100 * 总产量 - 固定熟料合计
// 模式 B: 分品种熟料系数覆写
//   熟料消耗 = 产量 * 新系数 / 100,未覆写品种原样保留
// ==========================================
// 红线: 输入行集不可修改,所有结果为新行集
// ==========================================

use crate::domain::cement::{clinker_factor, CementTypeRow, RowSet};
use crate::domain::types::{AllocationPolicy, SimulationMode};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::selector::consolidated_factor;
use tracing::{debug, info, warn};

use super::report::{AllocationBreakdown, SimulationOutcome};

/// 模式 A 的最少可调品种数
pub const MIN_VARIABLE_TYPES: usize = 2;

// ==========================================
// ReallocationEngine
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ReallocationEngine {
    policy: AllocationPolicy,
}

impl ReallocationEngine {
    pub fn new(policy: AllocationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    // ==========================================
    // 模式 A: 目标综合熟料系数
    // ==========================================

    /// 按目标综合熟料系数在选中品种间重新分配熟料
    ///
    /// # 参数
    /// - `row_set`: 当前行集（不修改）
    /// - `target_factor`: 目标综合熟料系数（%）
    /// - `selected_types`: 可调品种,去重后至少 2 个
    ///
    /// # 错误
    /// - `InsufficientSelection`: 可调品种不足 2 个（不做任何计算）
    /// - `UnknownCementType`: 选中品种不在行集中
    /// - `DivisionHazard`: 某行水泥产量非正或可调产量合计为 0
    /// - `NegativeAllocation`: 策略为 Reject 且可调熟料总量为负
    pub fn reallocate_to_target(
        &self,
        row_set: &RowSet,
        target_factor: f64,
        selected_types: &[String],
    ) -> EngineResult<SimulationOutcome> {
        let selected = ensure_enough_variable_types(selected_types)?;
        ensure_known(row_set, &selected)?;
        ensure_positive_production(row_set)?;

        let baseline = consolidated_factor(row_set)?;

        // 1. 固定 / 可调划分 + 汇总
        let is_variable = |row: &CementTypeRow| selected.iter().any(|t| t == &row.cement_type);
        let total_production = row_set.total_production();
        let fixed_clinker_sum: f64 = row_set
            .rows()
            .iter()
            .filter(|r| !is_variable(r))
            .map(|r| r.clinker_consumption)
            .sum();
        let variable_production_sum: f64 = row_set
            .rows()
            .iter()
            .filter(|r| is_variable(r))
            .map(|r| r.cement_production)
            .sum();

        if variable_production_sum == 0.0 {
            return Err(EngineError::DivisionHazard("可调品种产量合计为 0".to_string()));
        }

        // 2. 目标熟料总量 → 可调熟料总量
        let target_clinker_total = target_factor / 100.0 * total_production;
        let mut variable_clinker_total = target_clinker_total - fixed_clinker_sum;
        let mut clamped = false;

        debug!(
            total_production,
            fixed_clinker_sum,
            variable_production_sum,
            target_clinker_total,
            variable_clinker_total,
            "目标综合系数分配汇总"
        );

        if variable_clinker_total < 0.0 {
            match self.policy {
                AllocationPolicy::Allow => {
                    warn!(variable_clinker_total, "可调熟料总量为负,按原值分配");
                }
                AllocationPolicy::Reject => {
                    warn!(variable_clinker_total, "可调熟料总量为负,拒绝分配");
                    return Err(EngineError::NegativeAllocation { variable_clinker_total });
                }
                AllocationPolicy::Clamp => {
                    warn!(variable_clinker_total, "可调熟料总量为负,截断为 0");
                    variable_clinker_total = 0.0;
                    clamped = true;
                }
            }
        }

        // 3. 按产量占比分摊
        let rows: Vec<CementTypeRow> = row_set
            .rows()
            .iter()
            .map(|row| {
                if is_variable(row) {
                    let share = row.cement_production / variable_production_sum;
                    row.with_consumption(variable_clinker_total * share)
                } else {
                    row.clone()
                }
            })
            .collect();

        let result = RowSet::new(rows).map_err(EngineError::DuplicateCementType)?;
        let new_factor = clinker_factor(result.total_clinker(), total_production);

        info!(
            target_factor,
            baseline,
            consolidated_factor = new_factor,
            variable_types = selected.len(),
            "目标综合系数模拟完成"
        );

        Ok(SimulationOutcome {
            mode: SimulationMode::TargetConsolidated,
            before: row_set.restrict_to(&selected),
            after: result.restrict_to(&selected),
            selected_types: selected,
            result,
            baseline_consolidated_factor: baseline,
            consolidated_factor: new_factor,
            allocation: Some(AllocationBreakdown {
                total_production,
                fixed_clinker_sum,
                variable_production_sum,
                target_clinker_total,
                variable_clinker_total,
                clamped,
            }),
        })
    }

    // ==========================================
    // 模式 B: 分品种熟料系数覆写
    // ==========================================

    /// 按分品种熟料系数覆写熟料消耗
    ///
    /// # 参数
    /// - `overrides`: (品种, 新系数%) 列表；同一品种多次出现时以最后一次为准
    ///
    /// # 错误
    /// - `EmptyOverrides`: 未指定任何品种
    /// - `UnknownCementType`: 品种不在行集中
    /// - `DivisionHazard`: 某行水泥产量非正
    pub fn reallocate_by_type(
        &self,
        row_set: &RowSet,
        overrides: &[(String, f64)],
    ) -> EngineResult<SimulationOutcome> {
        if overrides.is_empty() {
            return Err(EngineError::EmptyOverrides);
        }

        let mut merged: Vec<(String, f64)> = Vec::with_capacity(overrides.len());
        for (cement_type, factor) in overrides {
            match merged.iter_mut().find(|(t, _)| t == cement_type) {
                Some(entry) => entry.1 = *factor,
                None => merged.push((cement_type.clone(), *factor)),
            }
        }
        let selected: Vec<String> = merged.iter().map(|(t, _)| t.clone()).collect();
        ensure_known(row_set, &selected)?;
        ensure_positive_production(row_set)?;

        let baseline = consolidated_factor(row_set)?;

        let rows: Vec<CementTypeRow> = row_set
            .rows()
            .iter()
            .map(|row| match merged.iter().find(|(t, _)| t == &row.cement_type) {
                Some((_, factor)) => row.with_factor(*factor),
                None => row.clone(),
            })
            .collect();

        let result = RowSet::new(rows).map_err(EngineError::DuplicateCementType)?;
        let new_factor = consolidated_factor(&result)?;

        info!(
            baseline,
            consolidated_factor = new_factor,
            overridden_types = selected.len(),
            "分品种系数模拟完成"
        );

        Ok(SimulationOutcome {
            mode: SimulationMode::PerTypeOverride,
            before: row_set.restrict_to(&selected),
            after: result.restrict_to(&selected),
            selected_types: selected,
            result,
            baseline_consolidated_factor: baseline,
            consolidated_factor: new_factor,
            allocation: None,
        })
    }
}

/// 覆写输入的默认值: 当前分品种系数保留 2 位小数
pub fn override_defaults(row_set: &RowSet, cement_types: &[String]) -> EngineResult<Vec<(String, f64)>> {
    dedup(cement_types)
        .into_iter()
        .map(|t| {
            let row = row_set
                .get(&t)
                .ok_or_else(|| EngineError::UnknownCementType(t.clone()))?;
            Ok((t, round2(row.clinker_factor)))
        })
        .collect()
}

/// 保留 2 位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 模式 A 可调品种数量检查（去重后至少 `MIN_VARIABLE_TYPES` 个）
///
/// # 返回
/// - Ok(Vec<String>): 按输入顺序去重后的品种
/// - Err(InsufficientSelection): 数量不足
pub fn ensure_enough_variable_types(selected_types: &[String]) -> EngineResult<Vec<String>> {
    let selected = dedup(selected_types);
    if selected.len() < MIN_VARIABLE_TYPES {
        warn!(selected = selected.len(), "可调品种不足,拒绝模拟");
        return Err(EngineError::InsufficientSelection {
            selected: selected.len(),
            required: MIN_VARIABLE_TYPES,
        });
    }
    Ok(selected)
}

fn dedup(types: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(types.len());
    for t in types {
        if !out.contains(t) {
            out.push(t.clone());
        }
    }
    out
}

fn ensure_known(row_set: &RowSet, types: &[String]) -> EngineResult<()> {
    match types.iter().find(|t| !row_set.contains(t)) {
        Some(missing) => {
            warn!(cement_type = %missing, "选中品种不在当前数据集中");
            Err(EngineError::UnknownCementType(missing.clone()))
        }
        None => Ok(()),
    }
}

// 每行水泥产量须为正的有限值,否则该行熟料系数无定义
fn ensure_positive_production(row_set: &RowSet) -> EngineResult<()> {
    match row_set
        .rows()
        .iter()
        .find(|r| !(r.cement_production.is_finite() && r.cement_production > 0.0))
    {
        Some(row) => {
            warn!(cement_type = %row.cement_type, production = row.cement_production, "水泥产量无效");
            Err(EngineError::DivisionHazard(format!(
                "{} 的水泥产量无效: {}",
                row.cement_type, row.cement_production
            )))
        }
        None => Ok(()),
    }
}
