// ==========================================
// 水泥熟料系数模拟系统 - 配置层
// ==========================================
// 职责: 系统配置管理（数据源、策略、CO₂ 常数）
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod error;
pub mod simulator_profile;

// 重导出核心配置管理器
pub use config_manager::{
    apply_value, config_keys, config_snapshot, get_default_config_path, ConfigManager,
    CONFIG_PATH_ENV,
};
pub use error::{ConfigError, ConfigResult};
pub use simulator_profile::{SimulatorProfile, DEFAULT_LOCALE, DEFAULT_SHEET_NAME};
