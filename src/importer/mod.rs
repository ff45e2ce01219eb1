// ==========================================
// 水泥熟料系数模拟系统 - 导入层
// ==========================================
// 职责: 外部生产月报表导入,生成内部数据
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod table_cache;
pub mod table_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper as FieldMapperImpl, REQUIRED_COLUMNS};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use table_cache::TableCache;
pub use table_importer::ProductionTableImporter;

// 重导出 Trait 接口
pub use importer_trait::{FieldMapper, FileParser, RawSheet, TableImporter};
