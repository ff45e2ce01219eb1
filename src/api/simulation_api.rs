// ==========================================
// 水泥熟料系数模拟系统 - 模拟 API
// ==========================================
// 职责: 串联 报表缓存 → 数据集选择 → 配比调整 / CO₂ 估算
// 边界: 输入范围校验在此完成,引擎只接收已校验参数
// ==========================================

use crate::api::dto::{
    format_co2, format_factor, BaselineResponse, Co2Input, Co2Response, FactorSource,
    OptionsResponse, OverrideDefault, SelectionRequest, SimulationResponse,
};
use crate::api::error::ApiResult;
use crate::api::validator::{InputValidator, ValidationMode};
use crate::config::simulator_profile::SimulatorProfile;
use crate::domain::cement::RowSet;
use crate::domain::types::DataType;
use crate::engine::co2::{Co2Constants, Co2Estimator, Co2Parameters};
use crate::engine::reallocation::{
    ensure_enough_variable_types, override_defaults, ReallocationEngine, SimulationOutcome,
};
use crate::engine::selector::DatasetSelector;
use crate::importer::table_cache::TableCache;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

pub struct SimulationApi {
    cache: Arc<TableCache>,
    selector: DatasetSelector,
    engine: ReallocationEngine,
    estimator: Co2Estimator,
    co2_defaults: Co2Constants,
    validator: InputValidator,
}

impl SimulationApi {
    /// 创建新的SimulationApi实例
    pub fn new(cache: Arc<TableCache>, profile: &SimulatorProfile) -> Self {
        Self {
            cache,
            selector: DatasetSelector::new(),
            engine: ReallocationEngine::new(profile.allocation_policy),
            estimator: Co2Estimator::new(),
            co2_defaults: profile.co2,
            validator: InputValidator::default(),
        }
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validator = InputValidator::new(mode);
        self
    }

    // ==========================================
    // 数据集
    // ==========================================

    /// 列出可选月份/期间/口径
    pub fn list_options(&self) -> ApiResult<OptionsResponse> {
        let table = self.cache.get()?;
        Ok(OptionsResponse {
            months: table.months(),
            periods: table.periods(),
            data_types: vec![DataType::Actual, DataType::Budget],
        })
    }

    /// 基准数据集与初始综合熟料系数
    pub fn get_baseline(&self, selection: &SelectionRequest) -> ApiResult<BaselineResponse> {
        let (row_set, baseline) = self.select(selection)?;
        Ok(BaselineResponse {
            selection: selection.clone(),
            rows: row_set.rows().to_vec(),
            consolidated_factor: baseline,
            consolidated_factor_display: format_factor(baseline),
            generated_at: Utc::now(),
        })
    }

    // ==========================================
    // 模式 A: 目标综合熟料系数
    // ==========================================

    /// # 参数
    /// - target_factor: None 时取当前综合系数
    /// - cement_types: 可调品种（至少 2 个）
    pub fn simulate_target(
        &self,
        selection: &SelectionRequest,
        target_factor: Option<f64>,
        cement_types: &[String],
    ) -> ApiResult<SimulationResponse> {
        let (row_set, baseline) = self.select(selection)?;
        // 品种数量不足优先于目标值校验
        ensure_enough_variable_types(cement_types)?;
        let target = self
            .validator
            .validate_target_factor(target_factor.unwrap_or(baseline))?;

        let outcome = self.engine.reallocate_to_target(&row_set, target, cement_types)?;
        Ok(to_response(selection, outcome))
    }

    // ==========================================
    // 模式 B: 分品种熟料系数
    // ==========================================

    /// 分品种输入默认值（当前系数, 2 位小数）
    pub fn get_override_defaults(
        &self,
        selection: &SelectionRequest,
        cement_types: &[String],
    ) -> ApiResult<Vec<OverrideDefault>> {
        let (row_set, _) = self.select(selection)?;
        Ok(override_defaults(&row_set, cement_types)?
            .into_iter()
            .map(|(cement_type, clinker_factor)| OverrideDefault {
                cement_type,
                clinker_factor,
            })
            .collect())
    }

    /// # 参数
    /// - overrides: (品种, 新系数)；新系数为 None 时取默认值
    pub fn simulate_per_type(
        &self,
        selection: &SelectionRequest,
        overrides: &[(String, Option<f64>)],
    ) -> ApiResult<SimulationResponse> {
        let (row_set, _) = self.select(selection)?;

        let resolved = self.resolve_overrides(&row_set, overrides)?;
        let outcome = self.engine.reallocate_by_type(&row_set, &resolved)?;
        Ok(to_response(selection, outcome))
    }

    fn resolve_overrides(
        &self,
        row_set: &RowSet,
        overrides: &[(String, Option<f64>)],
    ) -> ApiResult<Vec<(String, f64)>> {
        let missing: Vec<String> = overrides
            .iter()
            .filter(|(_, v)| v.is_none())
            .map(|(t, _)| t.clone())
            .collect();
        let defaults = override_defaults(row_set, &missing)?;

        overrides
            .iter()
            .map(|(cement_type, value)| {
                let value = match value {
                    Some(v) => *v,
                    None => defaults
                        .iter()
                        .find(|(t, _)| t == cement_type)
                        .map(|(_, v)| *v)
                        .unwrap_or_default(),
                };
                let value = self.validator.validate_override_factor(cement_type, value)?;
                Ok((cement_type.clone(), value))
            })
            .collect()
    }

    // ==========================================
    // CO₂ 估算
    // ==========================================

    /// 以指定熟料系数估算 CO₂
    pub fn estimate_co2(
        &self,
        clinker_factor: f64,
        factor_source: FactorSource,
        input: &Co2Input,
    ) -> ApiResult<Co2Response> {
        let v = &self.validator;
        let clinker_factor = v.validate_percentage("clinker_factor", clinker_factor)?;
        let defaults = &self.co2_defaults;
        let constants = Co2Constants {
            stec: v.validate_finite("stec", input.stec.unwrap_or(defaults.stec))?,
            tsr: v.validate_percentage("tsr", input.tsr.unwrap_or(defaults.tsr))?,
            fuel_emission_factor: v.validate_finite(
                "fuel_emission_factor",
                input.fuel_emission_factor.unwrap_or(defaults.fuel_emission_factor),
            )?,
            calcination_factor: v.validate_finite(
                "calcination_factor",
                input.calcination_factor.unwrap_or(defaults.calcination_factor),
            )?,
            adjustment_factor: v.validate_finite(
                "adjustment_factor",
                input.adjustment_factor.unwrap_or(defaults.adjustment_factor),
            )?,
        };

        let parameters = Co2Parameters::new(clinker_factor, constants);
        let estimate = self.estimator.estimate(&parameters);

        info!(
            ?factor_source,
            clinker_factor,
            co2_total = estimate.co2_total,
            "CO₂ 估算完成"
        );

        Ok(Co2Response {
            factor_source,
            parameters,
            estimate,
            co2_total_display: format_co2(estimate.co2_total),
            generated_at: Utc::now(),
        })
    }

    /// 以基准综合系数估算 CO₂
    pub fn estimate_co2_for_baseline(
        &self,
        selection: &SelectionRequest,
        input: &Co2Input,
    ) -> ApiResult<Co2Response> {
        let (_, baseline) = self.select(selection)?;
        self.estimate_co2(baseline, FactorSource::Baseline, input)
    }

    /// 以模拟结果的综合系数估算 CO₂
    pub fn estimate_co2_for_simulation(
        &self,
        simulation: &SimulationResponse,
        input: &Co2Input,
    ) -> ApiResult<Co2Response> {
        self.estimate_co2(
            simulation.consolidated_factor,
            FactorSource::from(simulation.mode),
            input,
        )
    }

    fn select(&self, selection: &SelectionRequest) -> ApiResult<(RowSet, f64)> {
        let table = self.cache.get()?;
        let result = self.selector.select_with_baseline(
            &table,
            &selection.month,
            &selection.period,
            selection.data_type,
        )?;
        debug!(baseline = result.1, "基准综合系数");
        Ok(result)
    }
}

fn to_response(selection: &SelectionRequest, outcome: SimulationOutcome) -> SimulationResponse {
    let consolidated_delta = outcome.consolidated_delta();
    let clinker_delta = outcome.clinker_delta();
    SimulationResponse {
        selection: selection.clone(),
        mode: outcome.mode,
        selected_types: outcome.selected_types,
        before: outcome.before,
        after: outcome.after,
        baseline_consolidated_factor: outcome.baseline_consolidated_factor,
        consolidated_factor: outcome.consolidated_factor,
        consolidated_factor_display: format_factor(outcome.consolidated_factor),
        consolidated_delta,
        clinker_delta,
        allocation: outcome.allocation,
        generated_at: Utc::now(),
    }
}
