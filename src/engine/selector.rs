// ==========================================
// 水泥熟料系数模拟系统 - 数据集选择器
// ==========================================
// 输入: 生产月报表 + (月份, 期间, 口径)
// 输出: RowSet（含分品种熟料系数）
// 红线: 空筛选 / 零产量必须报错,不得产生 NaN
// ==========================================

use crate::domain::cement::{CementTypeRow, RowSet};
use crate::domain::production::ProductionTable;
use crate::domain::types::DataType;
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, info, warn};

// ==========================================
// DatasetSelector - 无状态
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetSelector;

impl DatasetSelector {
    pub fn new() -> Self {
        Self
    }

    /// 按 (月份, 期间) 精确筛选并投影到指定口径
    ///
    /// # 返回
    /// - Ok(RowSet): 每行已计算熟料系数
    /// - Err(EmptySelection): 无匹配行
    /// - Err(DivisionHazard): 某行水泥产量为 0
    /// - Err(DuplicateCementType): 同一品种出现多次
    pub fn select(
        &self,
        table: &ProductionTable,
        month: &str,
        period: &str,
        data_type: DataType,
    ) -> EngineResult<RowSet> {
        let month = month.trim();
        let period = period.trim();

        let mut rows = Vec::new();
        for record in table
            .records
            .iter()
            .filter(|r| r.month.trim() == month && r.period.trim() == period)
        {
            let (clinker, production) = record.pair(data_type);
            if production == 0.0 {
                warn!(
                    cement_type = %record.cement_type,
                    row = record.row_number,
                    "水泥产量为 0,无法计算熟料系数"
                );
                return Err(EngineError::DivisionHazard(format!(
                    "{} 的 {} 为 0（源文件第 {} 行）",
                    record.cement_type,
                    data_type.production_column(),
                    record.row_number
                )));
            }
            rows.push(CementTypeRow::new(record.cement_type.clone(), clinker, production));
        }

        if rows.is_empty() {
            warn!(month, period, %data_type, "筛选结果为空");
            return Err(EngineError::EmptySelection {
                month: month.to_string(),
                period: period.to_string(),
                data_type,
            });
        }

        let row_set = RowSet::new(rows).map_err(EngineError::DuplicateCementType)?;

        debug!(
            total_clinker = row_set.total_clinker(),
            total_production = row_set.total_production(),
            "数据集汇总"
        );
        info!(
            month,
            period,
            %data_type,
            rows = row_set.len(),
            "数据集选择完成"
        );

        Ok(row_set)
    }

    /// 选择并同时返回综合熟料系数
    pub fn select_with_baseline(
        &self,
        table: &ProductionTable,
        month: &str,
        period: &str,
        data_type: DataType,
    ) -> EngineResult<(RowSet, f64)> {
        let row_set = self.select(table, month, period, data_type)?;
        let baseline = consolidated_factor(&row_set)?;
        Ok((row_set, baseline))
    }
}

/// 综合熟料系数（总产量为 0 时报除零风险）
pub fn consolidated_factor(row_set: &RowSet) -> EngineResult<f64> {
    row_set
        .consolidated_factor()
        .ok_or_else(|| EngineError::DivisionHazard("总水泥产量为 0".to_string()))
}
