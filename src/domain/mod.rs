// ==========================================
// 水泥熟料系数模拟系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod cement;
pub mod production;
pub mod types;

// 重导出核心类型
pub use cement::{clinker_factor, CementTypeRow, RowSet};
pub use production::{ProductionRecord, ProductionTable};
pub use types::{AllocationPolicy, DataType, SimulationMode};
