// ==========================================
// 水泥熟料系数模拟系统 - 引擎层
// ==========================================
// 职责: 数据集选择、配比调整、CO₂ 估算
// 红线: 引擎均为纯函数,不读文件,不修改输入
// ==========================================

pub mod co2;
pub mod error;
pub mod reallocation;
pub mod selector;

// 重导出核心引擎
pub use co2::{Co2Constants, Co2Estimate, Co2Estimator, Co2Parameters};
pub use error::{EngineError, EngineResult};
pub use reallocation::{
    ensure_enough_variable_types, override_defaults, round2, AllocationBreakdown,
    ReallocationEngine, SimulationOutcome, MIN_VARIABLE_TYPES,
};
pub use selector::{consolidated_factor, DatasetSelector};
