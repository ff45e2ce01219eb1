// ==========================================
// 报表导入集成测试
// ==========================================
// 测试目标: 验证 CSV → ProductionTable 完整导入流程与缓存
// ==========================================


use clinker_factor_sim::importer::{
    ImportError, ProductionTableImporter, TableCache, TableImporter,
};
use clinker_factor_sim::logging;
use std::sync::Arc;
use test_helpers::{fixture_path, write_temp_csv};

#[test]
fn test_import_fixture_csv() {
    logging::init_test();

    let importer = ProductionTableImporter::new(None);
    let table = importer.load(&fixture_path()).expect("导入应成功");

    assert_eq!(table.len(), 10);
    assert_eq!(table.months(), vec!["Jan", "Feb", "Mar"]);
    assert_eq!(table.periods(), vec!["MTD", "YTD"]);

    let first = &table.records[0];
    assert_eq!(first.cement_type, "OPC");
    assert_eq!(first.row_number, 2);
    assert_eq!(first.actual_clinker_consumption, 9000.0);
    assert_eq!(first.budget_cement_production, 10000.0);
}

#[test]
fn test_import_strips_thousand_separators() {
    logging::init_test();

    let importer = ProductionTableImporter::new(None);
    let table = importer.load(&fixture_path()).expect("导入应成功");

    let feb_opc = table
        .records
        .iter()
        .find(|r| r.month == "Feb" && r.cement_type == "OPC")
        .expect("应包含 Feb/OPC");
    assert_eq!(feb_opc.actual_clinker_consumption, 9100.0);
    assert_eq!(feb_opc.actual_cement_production, 10000.0);
}

#[test]
fn test_import_missing_column() {
    logging::init_test();

    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("创建临时文件失败");
    std::io::Write::write_all(
        &mut file,
        b"Month,Periode,Cement Type,Actual Clinker Consumption\nJan,MTD,OPC,9000\n",
    )
    .expect("写入失败");

    let importer = ProductionTableImporter::new(None);
    let result = importer.load(file.path());
    assert!(matches!(result, Err(ImportError::MissingColumn(_))));
}

#[test]
fn test_import_bad_number_reports_row() {
    logging::init_test();

    let file = write_temp_csv("Jan,MTD,OPC,9000,10000,8800,10000\nJan,MTD,PCC,abc,30000,20000,30000\n")
        .expect("创建夹具失败");

    let importer = ProductionTableImporter::new(None);
    match importer.load(file.path()) {
        Err(ImportError::TypeConversionError { row, field, .. }) => {
            assert_eq!(row, 3);
            assert_eq!(field, "Actual Clinker Consumption");
        }
        other => panic!("应为类型转换错误: {:?}", other),
    }
}

#[test]
fn test_import_missing_file() {
    let importer = ProductionTableImporter::new(None);
    let result = importer.load(std::path::Path::new("/nonexistent/production.csv"));
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_import_unsupported_extension() {
    let file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("创建临时文件失败");

    let importer = ProductionTableImporter::new(None);
    let result = importer.load(file.path());
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_table_cache_shares_loaded_table() {
    logging::init_test();

    let cache = TableCache::new(fixture_path(), None);
    assert!(!cache.is_loaded());

    let first = cache.get().expect("首次加载应成功");
    let second = cache.get().expect("再次获取应成功");
    assert!(cache.is_loaded());
    assert!(Arc::ptr_eq(&first, &second));

    let reloaded = cache.reload().expect("重新加载应成功");
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(first.len(), reloaded.len());
}

#[test]
fn test_table_cache_sees_file_changes_only_after_reload() {
    logging::init_test();

    let file = write_temp_csv("Jan,MTD,OPC,9000,10000,8800,10000\n").expect("创建夹具失败");
    let cache = TableCache::new(file.path(), None);
    assert_eq!(cache.get().expect("加载失败").len(), 1);

    let mut handle = std::fs::OpenOptions::new()
        .append(true)
        .open(file.path())
        .expect("打开文件失败");
    std::io::Write::write_all(&mut handle, b"Jan,MTD,PCC,21000,30000,20000,30000\n").expect("追加失败");

    assert_eq!(cache.get().expect("获取失败").len(), 1);
    assert_eq!(cache.reload().expect("重新加载失败").len(), 2);
}
