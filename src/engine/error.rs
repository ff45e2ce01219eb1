// ==========================================
// 水泥熟料系数模拟系统 - 引擎层错误类型
// ==========================================
// 红线: 除零必须显式拦截,不得输出 NaN/∞
// ==========================================

use crate::domain::types::DataType;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 选择类错误（边界处以警告呈现）=====
    #[error("筛选结果为空: month={month}, period={period}, data_type={data_type}")]
    EmptySelection {
        month: String,
        period: String,
        data_type: DataType,
    },

    #[error("可调品种数量不足: 已选 {selected} 个, 至少需要 {required} 个")]
    InsufficientSelection { selected: usize, required: usize },

    #[error("未指定任何分品种熟料系数")]
    EmptyOverrides,

    // ===== 数据错误 =====
    #[error("除零风险: {0}")]
    DivisionHazard(String),

    #[error("水泥品种不存在: {0}")]
    UnknownCementType(String),

    #[error("水泥品种重复: {0}")]
    DuplicateCementType(String),

    // ===== 策略错误 =====
    #[error("可调品种熟料总量为负: {variable_clinker_total:.4}t（当前策略拒绝负分配）")]
    NegativeAllocation { variable_clinker_total: f64 },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
