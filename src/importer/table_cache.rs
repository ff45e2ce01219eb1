// ==========================================
// 水泥熟料系数模拟系统 - 报表缓存
// ==========================================
// 首次访问时加载,进程内常驻,只读共享
// 提供 reload / invalidate 以便源文件更新后刷新
// ==========================================

use crate::domain::production::ProductionTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::TableImporter;
use crate::importer::table_importer::ProductionTableImporter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::info;

pub struct TableCache {
    source: PathBuf,
    importer: Box<dyn TableImporter>,
    table: RwLock<Option<Arc<ProductionTable>>>,
}

impl TableCache {
    /// 创建缓存（不立即加载）
    ///
    /// # 参数
    /// - source: 报表文件路径
    /// - sheet_name: Excel 工作表名
    pub fn new(source: impl Into<PathBuf>, sheet_name: Option<String>) -> Self {
        Self::with_importer(source, Box::new(ProductionTableImporter::new(sheet_name)))
    }

    pub fn with_importer(source: impl Into<PathBuf>, importer: Box<dyn TableImporter>) -> Self {
        Self {
            source: source.into(),
            importer,
            table: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// 获取报表（未加载时加载）
    pub fn get(&self) -> ImportResult<Arc<ProductionTable>> {
        {
            let guard = self
                .table
                .read()
                .map_err(|e| lock_error(&e.to_string()))?;
            if let Some(table) = guard.as_ref() {
                return Ok(Arc::clone(table));
            }
        }

        let mut guard = self
            .table
            .write()
            .map_err(|e| lock_error(&e.to_string()))?;
        // 等待写锁期间可能已被其他调用方加载
        if let Some(table) = guard.as_ref() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(self.importer.load(&self.source)?);
        *guard = Some(Arc::clone(&table));
        Ok(table)
    }

    /// 强制重新加载
    pub fn reload(&self) -> ImportResult<Arc<ProductionTable>> {
        let table = Arc::new(self.importer.load(&self.source)?);
        let mut guard = self
            .table
            .write()
            .map_err(|e| lock_error(&e.to_string()))?;
        *guard = Some(Arc::clone(&table));
        info!(path = %self.source.display(), "报表缓存已刷新");
        Ok(table)
    }

    /// 清空缓存,下次访问时重新加载
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.table.write() {
            *guard = None;
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.table.read().map(|g| g.is_some()).unwrap_or(false)
    }
}

fn lock_error(message: &str) -> ImportError {
    ImportError::Other(anyhow::anyhow!("报表缓存锁获取失败: {}", message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingImporter {
        loads: Arc<AtomicUsize>,
    }

    impl TableImporter for CountingImporter {
        fn load(&self, _file_path: &Path) -> ImportResult<ProductionTable> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(ProductionTable::default())
        }
    }

    fn counting_cache() -> (TableCache, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        let cache = TableCache::with_importer(
            "unused.csv",
            Box::new(CountingImporter {
                loads: Arc::clone(&loads),
            }),
        );
        (cache, loads)
    }

    #[test]
    fn test_loads_once() {
        let (cache, loads) = counting_cache();
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_reload_and_invalidate() {
        let (cache, loads) = counting_cache();
        cache.get().unwrap();
        cache.reload().unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);

        cache.invalidate();
        assert!(!cache.is_loaded());
        cache.get().unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_load_failure_not_cached() {
        let cache = TableCache::new("missing_production_table.csv", None);
        assert!(matches!(cache.get(), Err(ImportError::FileNotFound(_))));
        assert!(!cache.is_loaded());
    }
}
