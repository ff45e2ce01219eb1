// ==========================================
// 水泥熟料系数模拟系统 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置写入失败 ({path}): {message}")]
    WriteError { path: String, message: String },

    #[error("配置格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("未知配置项: {0}")]
    UnknownKey(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
