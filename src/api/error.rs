// ==========================================
// 水泥熟料系数模拟系统 - API层错误类型
// ==========================================
// 职责: 汇总各层错误,区分"警告"(不运行模拟) 与 "失败"
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use crate::i18n::t_with_args;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("未配置数据源: 请通过 --data 或配置项 data_path 指定生产月报表")]
    DataSourceNotConfigured,

    // ==========================================
    // 各层错误
    // ==========================================
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 是否为警告级错误
    ///
    /// 警告: 用户选择/输入不满足条件,模拟不运行,进程正常结束
    pub fn is_warning(&self) -> bool {
        match self {
            ApiError::InvalidInput(_) => true,
            ApiError::Engine(e) => matches!(
                e,
                EngineError::EmptySelection { .. }
                    | EngineError::InsufficientSelection { .. }
                    | EngineError::EmptyOverrides
                    | EngineError::UnknownCementType(_)
                    | EngineError::NegativeAllocation { .. }
            ),
            _ => false,
        }
    }

    /// 面向用户的本地化消息
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidInput(reason) => {
                t_with_args("warning.invalid_input", &[("reason", reason.as_str())])
            }
            ApiError::Engine(EngineError::InsufficientSelection { selected, required }) => {
                let required = required.to_string();
                let selected = selected.to_string();
                t_with_args(
                    "warning.insufficient_selection",
                    &[("required", required.as_str()), ("selected", selected.as_str())],
                )
            }
            ApiError::Engine(EngineError::EmptySelection {
                month,
                period,
                data_type,
            }) => {
                let data_type = data_type.to_string();
                t_with_args(
                    "warning.empty_selection",
                    &[
                        ("month", month.as_str()),
                        ("period", period.as_str()),
                        ("data_type", data_type.as_str()),
                    ],
                )
            }
            ApiError::Engine(EngineError::EmptyOverrides) => t_with_args("warning.empty_overrides", &[]),
            other => other.to_string(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
