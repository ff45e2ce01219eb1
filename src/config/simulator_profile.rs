use crate::domain::types::AllocationPolicy;
use crate::engine::co2::Co2Constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认工作表名
pub const DEFAULT_SHEET_NAME: &str = "MTD";

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

/// 模拟器配置（持久化对象）
///
/// 存储位置：JSON 文件，见 `config_manager::get_default_config_path`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorProfile {
    /// 生产月报表路径（.xlsx/.xls/.csv）
    #[serde(default)]
    pub data_path: Option<PathBuf>,

    /// Excel 工作表名
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// 界面语言（en / zh-CN）
    #[serde(default = "default_locale")]
    pub locale: String,

    /// 可调熟料总量为负时的处理策略
    #[serde(default)]
    pub allocation_policy: AllocationPolicy,

    /// CO₂ 估算常数默认值
    #[serde(default)]
    pub co2: Co2Constants,
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for SimulatorProfile {
    fn default() -> Self {
        Self {
            data_path: None,
            sheet_name: default_sheet_name(),
            locale: default_locale(),
            allocation_policy: AllocationPolicy::default(),
            co2: Co2Constants::default(),
        }
    }
}
