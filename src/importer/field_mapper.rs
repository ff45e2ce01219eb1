// ==========================================
// 水泥熟料系数模拟系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → ProductionRecord 映射 + 类型转换
// ==========================================

use crate::domain::production::ProductionRecord;
use crate::domain::types::DataType;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

// ===== 源表列名 =====
pub const COL_MONTH: &str = "Month";
pub const COL_PERIOD: &str = "Periode";
pub const COL_CEMENT_TYPE: &str = "Cement Type";
pub const COL_ACTUAL_CLINKER: &str = DataType::Actual.clinker_column();
pub const COL_ACTUAL_PRODUCTION: &str = DataType::Actual.production_column();
pub const COL_BUDGET_CLINKER: &str = DataType::Budget.clinker_column();
pub const COL_BUDGET_PRODUCTION: &str = DataType::Budget.production_column();

/// 必需列
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_MONTH,
    COL_PERIOD,
    COL_CEMENT_TYPE,
    COL_ACTUAL_CLINKER,
    COL_ACTUAL_PRODUCTION,
    COL_BUDGET_CLINKER,
    COL_BUDGET_PRODUCTION,
];

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn check_headers(&self, headers: &[String]) -> ImportResult<()> {
        for column in REQUIRED_COLUMNS {
            let present = aliases(column)
                .iter()
                .any(|alias| headers.iter().any(|h| h == alias));
            if !present {
                return Err(ImportError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }

    fn map_to_record(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<ProductionRecord> {
        let cement_type =
            self.get_string(row, COL_CEMENT_TYPE)
                .ok_or_else(|| ImportError::MissingValue {
                    row: row_number,
                    field: COL_CEMENT_TYPE.to_string(),
                })?;

        Ok(ProductionRecord {
            month: self.get_string(row, COL_MONTH).unwrap_or_default(),
            period: self.get_string(row, COL_PERIOD).unwrap_or_default(),
            cement_type,
            actual_clinker_consumption: self.parse_f64(row, COL_ACTUAL_CLINKER, row_number)?,
            actual_cement_production: self.parse_f64(row, COL_ACTUAL_PRODUCTION, row_number)?,
            budget_clinker_consumption: self.parse_f64(row, COL_BUDGET_CLINKER, row_number)?,
            budget_cement_production: self.parse_f64(row, COL_BUDGET_PRODUCTION, row_number)?,
            row_number,
        })
    }
}

/// 列名别名
fn aliases(key: &str) -> Vec<&str> {
    match key {
        COL_PERIOD => vec![COL_PERIOD, "Period"],
        _ => vec![key],
    }
}

impl FieldMapper {
    /// 提取字符串字段，支持别名；空白视为缺失
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        for alias in aliases(key) {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析浮点数；空白按 0 处理
    ///
    /// 小数点只接受 `.`；逗号仅作千分位（如 `1,234.5`），`85,5` 之类按错误处理
    fn parse_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<f64> {
        let value = match self.get_string(row, key) {
            None => return Ok(0.0),
            Some(value) => value,
        };
        let conversion_err = |message: String| ImportError::TypeConversionError {
            row: row_number,
            field: key.to_string(),
            message,
        };

        let normalized = strip_thousands_separators(&value)
            .ok_or_else(|| conversion_err(format!("逗号不是千分位分隔（小数点须为 '.'）: {}", value)))?;
        normalized
            .parse::<f64>()
            .map_err(|_| conversion_err(format!("无法解析为浮点数: {}", value)))
    }
}

/// 去除千分位逗号
///
/// 整数部分按逗号切分后，首段 1-3 位数字、其余各段恰为 3 位数字；否则返回 None
fn strip_thousands_separators(value: &str) -> Option<String> {
    if !value.contains(',') {
        return Some(value.to_string());
    }

    let (integer, fraction) = match value.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (value, None),
    };
    if fraction.map_or(false, |f| f.contains(',')) {
        return None;
    }

    let digits = integer.trim_start_matches(['+', '-']);
    let mut groups = digits.split(',');
    let first = groups.next()?;
    let is_digits = |g: &str| g.chars().all(|c| c.is_ascii_digit());
    if first.is_empty() || first.len() > 3 || !is_digits(first) {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && is_digits(g)) {
        return None;
    }

    Some(value.replace(',', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> HashMap<String, String> {
        let mut row = HashMap::new();
        row.insert(COL_MONTH.to_string(), "Jan".to_string());
        row.insert(COL_PERIOD.to_string(), "MTD".to_string());
        row.insert(COL_CEMENT_TYPE.to_string(), "OPC".to_string());
        row.insert(COL_ACTUAL_CLINKER.to_string(), "1,234.5".to_string());
        row.insert(COL_ACTUAL_PRODUCTION.to_string(), "2000".to_string());
        row.insert(COL_BUDGET_CLINKER.to_string(), "".to_string());
        row.insert(COL_BUDGET_PRODUCTION.to_string(), "1800".to_string());
        row
    }

    #[test]
    fn test_map_full_row() {
        let record = FieldMapper.map_to_record(&full_row(), 2).unwrap();
        assert_eq!(record.cement_type, "OPC");
        assert_eq!(record.actual_clinker_consumption, 1234.5);
        assert_eq!(record.budget_clinker_consumption, 0.0);
        assert_eq!(record.row_number, 2);
    }

    #[test]
    fn test_bad_number_reports_row_and_field() {
        let mut row = full_row();
        row.insert(COL_ACTUAL_PRODUCTION.to_string(), "n/a".to_string());
        let err = FieldMapper.map_to_record(&row, 7).unwrap_err();
        match err {
            ImportError::TypeConversionError { row, field, .. } => {
                assert_eq!(row, 7);
                assert_eq!(field, COL_ACTUAL_PRODUCTION);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(strip_thousands_separators("9,100").as_deref(), Some("9100"));
        assert_eq!(strip_thousands_separators("-1,234,567.25").as_deref(), Some("-1234567.25"));
        assert_eq!(strip_thousands_separators("85.5").as_deref(), Some("85.5"));
        assert_eq!(strip_thousands_separators("85,5"), None);
        assert_eq!(strip_thousands_separators("1,2345"), None);
        assert_eq!(strip_thousands_separators("1234,567"), None);
        assert_eq!(strip_thousands_separators("1.234,5"), None);
    }

    #[test]
    fn test_decimal_comma_rejected() {
        let mut row = full_row();
        row.insert(COL_ACTUAL_CLINKER.to_string(), "85,5".to_string());
        match FieldMapper.map_to_record(&row, 4) {
            Err(ImportError::TypeConversionError { row, field, .. }) => {
                assert_eq!(row, 4);
                assert_eq!(field, COL_ACTUAL_CLINKER);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_cement_type() {
        let mut row = full_row();
        row.insert(COL_CEMENT_TYPE.to_string(), "  ".to_string());
        assert!(matches!(
            FieldMapper.map_to_record(&row, 3),
            Err(ImportError::MissingValue { row: 3, .. })
        ));
    }

    #[test]
    fn test_check_headers_accepts_period_alias() {
        let mut headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers[1] = "Period".to_string();
        assert!(FieldMapper.check_headers(&headers).is_ok());

        headers.retain(|h| h != COL_BUDGET_PRODUCTION);
        assert!(matches!(
            FieldMapper.check_headers(&headers),
            Err(ImportError::MissingColumn(c)) if c == COL_BUDGET_PRODUCTION
        ));
    }
}
