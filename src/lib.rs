// ==========================================
// 水泥熟料系数模拟系统 - 核心库
// ==========================================
// 功能: 按月/期间/口径选取生产数据,
//       模拟熟料系数调整并估算 CO₂ 排放
// 技术栈: Rust + calamine/csv + clap
// 系统定位: 决策支持工具 (只读,不回写报表)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部报表
pub mod importer;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态与终端输出
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AllocationPolicy, DataType, SimulationMode};

// 领域实体
pub use domain::{CementTypeRow, ProductionRecord, ProductionTable, RowSet};

// 引擎
pub use engine::{Co2Estimator, DatasetSelector, EngineError, ReallocationEngine};

// 导入
pub use importer::{ProductionTableImporter, TableCache};

// API
pub use api::{ApiError, SimulationApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "clinker-factor-sim";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "clinker-factor-sim");
    }
}
