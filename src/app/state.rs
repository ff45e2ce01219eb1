// ==========================================
// 水泥熟料系数模拟系统 - 应用状态
// ==========================================
// 职责: 管理进程级共享状态（配置 + 报表缓存 + API 实例）
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{ApiError, ApiResult, SimulationApi, ValidationMode};
use crate::config::SimulatorProfile;
use crate::importer::TableCache;

/// 应用状态
pub struct AppState {
    /// 生效配置（已合并命令行覆写）
    pub profile: SimulatorProfile,

    /// 报表缓存（进程内只加载一次）
    pub table_cache: Arc<TableCache>,

    /// 模拟API
    pub simulation_api: Arc<SimulationApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - profile: 已合并命令行覆写的配置
    /// - validation_mode: 输入校验模式
    ///
    /// # 返回
    /// - Err(DataSourceNotConfigured): 未指定报表路径
    pub fn new(profile: SimulatorProfile, validation_mode: ValidationMode) -> ApiResult<Self> {
        let data_path: PathBuf = profile
            .data_path
            .clone()
            .ok_or(ApiError::DataSourceNotConfigured)?;

        tracing::info!(
            data_path = %data_path.display(),
            sheet = %profile.sheet_name,
            policy = %profile.allocation_policy,
            "初始化AppState"
        );

        crate::i18n::set_locale(&profile.locale);

        let table_cache = Arc::new(TableCache::new(data_path, Some(profile.sheet_name.clone())));
        let simulation_api = Arc::new(
            SimulationApi::new(Arc::clone(&table_cache), &profile).with_validation_mode(validation_mode),
        );

        Ok(Self {
            profile,
            table_cache,
            simulation_api,
        })
    }
}
