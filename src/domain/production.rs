// ==========================================
// 水泥熟料系数模拟系统 - 生产月报表
// ==========================================
// 源表结构: Month / Periode / Cement Type
//          Actual Clinker Consumption / Actual Cement Production
//          Budget Clinker Consumption / Budget Cement Production
// ==========================================

use crate::domain::types::DataType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 源表单行（一个品种在某月某期间的数据）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub month: String,
    pub period: String,
    pub cement_type: String,
    pub actual_clinker_consumption: f64,
    pub actual_cement_production: f64,
    pub budget_clinker_consumption: f64,
    pub budget_cement_production: f64,

    /// 源文件行号（含表头，从 2 起）
    pub row_number: usize,
}

impl ProductionRecord {
    /// 按口径取 (熟料消耗, 水泥产量)
    pub fn pair(&self, data_type: DataType) -> (f64, f64) {
        match data_type {
            DataType::Actual => (self.actual_clinker_consumption, self.actual_cement_production),
            DataType::Budget => (self.budget_clinker_consumption, self.budget_cement_production),
        }
    }
}

/// 已加载的生产月报表（进程内只读）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductionTable {
    pub source: Option<PathBuf>,
    pub records: Vec<ProductionRecord>,
}

impl ProductionTable {
    pub fn new(source: Option<PathBuf>, records: Vec<ProductionRecord>) -> Self {
        Self { source, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 可选月份（去空去重，保持首次出现顺序）
    pub fn months(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.month.as_str()))
    }

    /// 可选期间（去空去重，保持首次出现顺序）
    pub fn periods(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.period.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        let v = v.trim();
        if v.is_empty() || out.iter().any(|o| o == v) {
            continue;
        }
        out.push(v.to_string());
    }
    out
}
