// ==========================================
// 水泥熟料系数模拟系统 - 品种行与行集
// ==========================================
// 熟料系数 = 熟料消耗 / 水泥产量 * 100
// 综合熟料系数 = Σ熟料消耗 / Σ水泥产量 * 100
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 计算熟料系数（百分比）
///
/// 调用方负责保证 `cement_production` 非零
pub fn clinker_factor(clinker_consumption: f64, cement_production: f64) -> f64 {
    clinker_consumption / cement_production * 100.0
}

// ==========================================
// CementTypeRow - 单个水泥品种
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CementTypeRow {
    /// 水泥品种（行集内唯一）
    pub cement_type: String,

    /// 熟料消耗（吨）
    pub clinker_consumption: f64,

    /// 水泥产量（吨）
    pub cement_production: f64,

    /// 熟料系数（%）
    pub clinker_factor: f64,
}

impl CementTypeRow {
    /// 由消耗与产量构造，系数由两者派生
    pub fn new(cement_type: impl Into<String>, clinker_consumption: f64, cement_production: f64) -> Self {
        Self {
            cement_type: cement_type.into(),
            clinker_consumption,
            cement_production,
            clinker_factor: clinker_factor(clinker_consumption, cement_production),
        }
    }

    /// 替换熟料消耗并重算系数
    pub fn with_consumption(&self, clinker_consumption: f64) -> Self {
        Self::new(self.cement_type.clone(), clinker_consumption, self.cement_production)
    }

    /// 以系数为输入反推熟料消耗，系数原样保留
    pub fn with_factor(&self, factor: f64) -> Self {
        Self {
            cement_type: self.cement_type.clone(),
            clinker_consumption: self.cement_production * factor / 100.0,
            cement_production: self.cement_production,
            clinker_factor: factor,
        }
    }
}

// ==========================================
// RowSet - 一个 (月份, 期间, 口径) 选择下的品种集合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    rows: Vec<CementTypeRow>,
}

impl RowSet {
    /// 构造行集
    ///
    /// # 返回
    /// - Err(String): 重复的水泥品种名
    pub fn new(rows: Vec<CementTypeRow>) -> Result<Self, String> {
        let mut seen = HashSet::new();
        for row in &rows {
            if !seen.insert(row.cement_type.as_str()) {
                return Err(row.cement_type.clone());
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[CementTypeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, cement_type: &str) -> Option<&CementTypeRow> {
        self.rows.iter().find(|r| r.cement_type == cement_type)
    }

    pub fn contains(&self, cement_type: &str) -> bool {
        self.get(cement_type).is_some()
    }

    /// 品种名列表（保持原顺序）
    pub fn cement_types(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.cement_type.clone()).collect()
    }

    pub fn total_clinker(&self) -> f64 {
        self.rows.iter().map(|r| r.clinker_consumption).sum()
    }

    pub fn total_production(&self) -> f64 {
        self.rows.iter().map(|r| r.cement_production).sum()
    }

    /// 综合熟料系数
    ///
    /// 总产量为 0 时返回 None
    pub fn consolidated_factor(&self) -> Option<f64> {
        let total_production = self.total_production();
        if total_production == 0.0 {
            return None;
        }
        Some(clinker_factor(self.total_clinker(), total_production))
    }

    /// 按给定品种筛选（保持行集顺序），用于前后对比展示
    pub fn restrict_to(&self, cement_types: &[String]) -> Vec<CementTypeRow> {
        self.rows
            .iter()
            .filter(|r| cement_types.iter().any(|t| t == &r.cement_type))
            .cloned()
            .collect()
    }
}
