// ==========================================
// 水泥熟料系数模拟系统 - 生产月报表导入器
// ==========================================
// 流程:
// 1. 文件读取与解析（Excel / CSV）
// 2. 必需列校验
// 3. 字段映射与类型转换
// ==========================================

use crate::domain::production::ProductionTable;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper as FieldMapperTrait, FileParser, TableImporter};
use std::path::Path;
use std::time::Instant;
use tracing::info;

pub struct ProductionTableImporter {
    parser: Box<dyn FileParser>,
    mapper: Box<dyn FieldMapperTrait>,
}

impl ProductionTableImporter {
    /// 创建导入器
    ///
    /// # 参数
    /// - sheet_name: Excel 工作表名（CSV 忽略）
    pub fn new(sheet_name: Option<String>) -> Self {
        Self::with_components(
            Box::new(UniversalFileParser::new(sheet_name)),
            Box::new(FieldMapper),
        )
    }

    /// 使用自定义解析器/映射器
    pub fn with_components(parser: Box<dyn FileParser>, mapper: Box<dyn FieldMapperTrait>) -> Self {
        Self { parser, mapper }
    }
}

impl TableImporter for ProductionTableImporter {
    fn load(&self, file_path: &Path) -> ImportResult<ProductionTable> {
        let started = Instant::now();

        // 阶段 1: 解析
        let sheet = self.parser.parse_to_raw_sheet(file_path)?;

        // 阶段 2: 表头校验
        self.mapper.check_headers(&sheet.headers)?;

        // 阶段 3: 字段映射
        let records = sheet
            .rows
            .iter()
            .map(|(row_number, row)| self.mapper.map_to_record(row, *row_number))
            .collect::<ImportResult<Vec<_>>>()?;

        info!(
            path = %file_path.display(),
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "生产月报表加载完成"
        );

        Ok(ProductionTable::new(Some(file_path.to_path_buf()), records))
    }
}
