// ==========================================
// 水泥熟料系数模拟系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写、保存
// 存储: JSON 文件（不存在时使用默认值）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::simulator_profile::SimulatorProfile;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "CLINKER_SIM_CONFIG";

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const DATA_PATH: &str = "data_path";
    pub const SHEET_NAME: &str = "sheet_name";
    pub const LOCALE: &str = "locale";
    pub const ALLOCATION_POLICY: &str = "allocation_policy";
    pub const CO2_STEC: &str = "co2.stec";
    pub const CO2_TSR: &str = "co2.tsr";
    pub const CO2_FUEL_EMISSION_FACTOR: &str = "co2.fuel_emission_factor";
    pub const CO2_CALCINATION_FACTOR: &str = "co2.calcination_factor";
    pub const CO2_ADJUSTMENT_FACTOR: &str = "co2.adjustment_factor";

    pub const ALL: [&str; 9] = [
        DATA_PATH,
        SHEET_NAME,
        LOCALE,
        ALLOCATION_POLICY,
        CO2_STEC,
        CO2_TSR,
        CO2_FUEL_EMISSION_FACTOR,
        CO2_CALCINATION_FACTOR,
        CO2_ADJUSTMENT_FACTOR,
    ];
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - path: 配置文件路径（可不存在）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 使用默认配置路径
    pub fn from_default_location() -> Self {
        Self::new(get_default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载配置
    ///
    /// # 返回
    /// - Ok(SimulatorProfile): 文件不存在时返回默认配置
    /// - Err: 读取或解析失败
    pub fn load(&self) -> ConfigResult<SimulatorProfile> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "配置文件不存在,使用默认配置");
            return Ok(SimulatorProfile::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| ConfigError::ReadError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let profile: SimulatorProfile =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %self.path.display(), "配置加载完成");
        Ok(profile)
    }

    /// 保存配置（自动创建父目录）
    pub fn save(&self, profile: &SimulatorProfile) -> ConfigResult<()> {
        let write_err = |e: &dyn std::fmt::Display| ConfigError::WriteError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_err(&e))?;
            }
        }

        let content = serde_json::to_string_pretty(profile).map_err(|e| write_err(&e))?;
        fs::write(&self.path, content).map_err(|e| write_err(&e))?;

        info!(path = %self.path.display(), "配置已保存");
        Ok(())
    }

    /// 更新单个配置项并保存
    ///
    /// # 返回
    /// - Ok(SimulatorProfile): 更新后的配置
    pub fn update(&self, key: &str, value: &str) -> ConfigResult<SimulatorProfile> {
        let mut profile = self.load()?;
        apply_value(&mut profile, key, value)?;
        self.save(&profile)?;
        Ok(profile)
    }
}

/// 将 `key = value` 写入配置对象
pub fn apply_value(profile: &mut SimulatorProfile, key: &str, value: &str) -> ConfigResult<()> {
    let value = value.trim();
    let value_err = |message: String| ConfigError::ValueError {
        key: key.to_string(),
        value: value.to_string(),
        message,
    };
    let parse_f64 = |v: &str| {
        v.parse::<f64>()
            .map_err(|_| value_err(format!("无法解析为浮点数: {}", v)))
    };

    match key {
        config_keys::DATA_PATH => {
            profile.data_path = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        config_keys::SHEET_NAME => {
            if value.is_empty() {
                return Err(value_err("工作表名不能为空".to_string()));
            }
            profile.sheet_name = value.to_string();
        }
        config_keys::LOCALE => {
            if !crate::i18n::SUPPORTED_LOCALES.contains(&value) {
                return Err(value_err(format!(
                    "仅支持: {}",
                    crate::i18n::SUPPORTED_LOCALES.join(", ")
                )));
            }
            profile.locale = value.to_string();
        }
        config_keys::ALLOCATION_POLICY => {
            profile.allocation_policy = value.parse().map_err(value_err)?;
        }
        config_keys::CO2_STEC => profile.co2.stec = parse_f64(value)?,
        config_keys::CO2_TSR => profile.co2.tsr = parse_f64(value)?,
        config_keys::CO2_FUEL_EMISSION_FACTOR => profile.co2.fuel_emission_factor = parse_f64(value)?,
        config_keys::CO2_CALCINATION_FACTOR => profile.co2.calcination_factor = parse_f64(value)?,
        config_keys::CO2_ADJUSTMENT_FACTOR => profile.co2.adjustment_factor = parse_f64(value)?,
        other => return Err(ConfigError::UnknownKey(other.to_string())),
    }

    Ok(())
}

/// 配置快照（扁平 key → value，供展示）
pub fn config_snapshot(profile: &SimulatorProfile) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(
        config_keys::DATA_PATH.to_string(),
        json!(profile.data_path.as_ref().map(|p| p.display().to_string())),
    );
    map.insert(config_keys::SHEET_NAME.to_string(), json!(profile.sheet_name));
    map.insert(config_keys::LOCALE.to_string(), json!(profile.locale));
    map.insert(
        config_keys::ALLOCATION_POLICY.to_string(),
        json!(profile.allocation_policy.to_string()),
    );
    map.insert(config_keys::CO2_STEC.to_string(), json!(profile.co2.stec));
    map.insert(config_keys::CO2_TSR.to_string(), json!(profile.co2.tsr));
    map.insert(
        config_keys::CO2_FUEL_EMISSION_FACTOR.to_string(),
        json!(profile.co2.fuel_emission_factor),
    );
    map.insert(
        config_keys::CO2_CALCINATION_FACTOR.to_string(),
        json!(profile.co2.calcination_factor),
    );
    map.insert(
        config_keys::CO2_ADJUSTMENT_FACTOR.to_string(),
        json!(profile.co2.adjustment_factor),
    );
    serde_json::Value::Object(map)
}

/// 获取默认配置文件路径
///
/// 优先级: 环境变量 CLINKER_SIM_CONFIG > 用户配置目录 > 当前目录
pub fn get_default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(config_dir) => config_dir.join("clinker-factor-sim").join("config.json"),
        None => PathBuf::from("./clinker_factor_sim.json"),
    }
}
