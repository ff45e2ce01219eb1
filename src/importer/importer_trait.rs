// ==========================================
// 水泥熟料系数模拟系统 - 导入 Trait
// ==========================================
// 职责: 定义报表导入管道接口（不包含实现）
// 管道: 文件解析 → 表头校验 → 字段映射
// ==========================================

use crate::domain::production::{ProductionRecord, ProductionTable};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 解析后的原始工作表
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    /// 表头（已 trim）
    pub headers: Vec<String>,

    /// 数据行（列名 → 原始文本），行号从 2 开始
    pub rows: Vec<(usize, HashMap<String, String>)>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始工作表
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头与行记录
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_sheet(&self, file_path: &Path) -> ImportResult<RawSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 校验必需列是否齐全
    fn check_headers(&self, headers: &[String]) -> ImportResult<()>;

    /// 将原始行记录映射为 ProductionRecord
    ///
    /// # 参数
    /// - row: 原始行记录（列名 → 值）
    /// - row_number: 源文件行号
    fn map_to_record(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<ProductionRecord>;
}

// ==========================================
// TableImporter Trait
// ==========================================
// 用途: 报表导入主接口
// 实现者: ProductionTableImporter
pub trait TableImporter: Send + Sync {
    /// 加载生产月报表
    fn load(&self, file_path: &Path) -> ImportResult<ProductionTable>;
}
