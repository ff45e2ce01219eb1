// ==========================================
// 水泥熟料系数模拟系统 - 配比调整引擎
// ==========================================
// 职责: 目标综合系数分摊 / 分品种系数覆写
// 输入: RowSet + 用户参数
// 输出: 新 RowSet + 新综合熟料系数 + 前后对比
// ==========================================

mod core;
mod report;


pub use self::core::{
    ensure_enough_variable_types, override_defaults, round2, ReallocationEngine, MIN_VARIABLE_TYPES,
};
pub use report::{AllocationBreakdown, SimulationOutcome};
