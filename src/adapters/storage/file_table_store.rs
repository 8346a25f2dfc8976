//! File-based Table Store Adapter
//!
//! Stores the stock table as a single YAML document on disk. Each save writes
//! a uniquely named temporary file next to the original and renames it into
//! place, so readers see either the old table or the new one. Writers going
//! through the same store are serialized.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::table::{CellWrite, StockTable};
use crate::ports::{BackingStore, StoreError};

/// On-disk shape of the table.
#[derive(Debug, Serialize, Deserialize)]
struct TableDocument {
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

/// File-based storage for the stock table
///
/// Clones share the write lock; separate stores on the same path do not.
#[derive(Debug, Clone)]
pub struct FileTableStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileTableStore {
    /// Create a new file store for the given YAML file
    ///
    /// # Example
    /// ```ignore
    /// let store = FileTableStore::new("./data/stock.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the table file
    fn parent_dir(&self) -> PathBuf {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    }

    /// Write the table through a fresh temporary file renamed over the
    /// original. Callers must hold `write_lock`.
    async fn write_table(&self, table: &StockTable) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        let mut rows = table.to_rows();
        let columns = rows.remove(0);
        let document = TableDocument { columns, rows };

        let yaml = serde_yaml::to_string(&document)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut temp = NamedTempFile::new_in(&dir)?;
            temp.write_all(yaml.as_bytes())?;
            temp.as_file().sync_all()?;
            temp.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::IoError(e.to_string()))?
        .map_err(|e| StoreError::IoError(e.to_string()))?;

        debug!(path = %self.path.display(), records = table.len(), "Saved stock table");
        Ok(())
    }
}

#[async_trait]
impl BackingStore for FileTableStore {
    async fn load(&self) -> Result<StockTable, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.display().to_string()));
        }

        let yaml = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        let document: TableDocument = serde_yaml::from_str(&yaml)
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;

        let rows = std::iter::once(document.columns)
            .chain(document.rows)
            .collect();
        let table = StockTable::from_rows(rows)?;

        debug!(path = %self.path.display(), records = table.len(), "Loaded stock table");
        Ok(table)
    }

    async fn save(&self, table: &StockTable) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_table(table).await
    }

    async fn write_cells(&self, writes: &[CellWrite]) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }
        // Held across load and write so concurrent partial writes all land.
        let _guard = self.write_lock.lock().await;
        let mut table = self.load().await?;
        table.apply_writes(writes);
        self.write_table(&table).await
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::TableError;
    use tempfile::TempDir;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn test_table() -> StockTable {
        StockTable::from_rows(vec![
            row(&["Material", "Code", "KPark_Rolls Jan"]),
            row(&["M1", "C1", "1,250"]),
            row(&["M2", "C2", ""]),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_file_store_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTableStore::new(temp_dir.path().join("stock.yaml"));

        store.save(&test_table()).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, test_table());
    }

    #[tokio::test]
    async fn test_file_store_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTableStore::new(temp_dir.path().join("absent.yaml"));

        let result = store.load().await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTableStore::new(temp_dir.path().join("nested/dir/stock.yaml"));

        store.save(&test_table()).await.unwrap();

        assert!(store.path().exists());
        let entries = std::fs::read_dir(temp_dir.path().join("nested/dir"))
            .unwrap()
            .count();
        assert_eq!(entries, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_file_store_concurrent_saves_all_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTableStore::new(temp_dir.path().join("stock.yaml"));

        let tasks: Vec<_> = (0..40)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.save(&test_table()).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.load().await.unwrap(), test_table());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_file_store_concurrent_cell_writes_keep_every_cell() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTableStore::new(temp_dir.path().join("stock.yaml"));
        let mut rows = vec![row(&["Material", "KPark_Rolls Jan"])];
        rows.extend((0..20).map(|i| row(&[format!("M{}", i).as_str(), ""])));
        store.save(&StockTable::from_rows(rows).unwrap()).await.unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .write_cells(&[CellWrite {
                            row: i,
                            column: 1,
                            value: i.to_string(),
                        }])
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let loaded = store.load().await.unwrap();
        let rolls = loaded.column("KPark_Rolls Jan");
        for i in 0..20 {
            assert_eq!(loaded.value(i, rolls), i.to_string());
        }
    }

    #[tokio::test]
    async fn test_file_store_write_cells() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTableStore::new(temp_dir.path().join("stock.yaml"));
        store.save(&test_table()).await.unwrap();

        store
            .write_cells(&[CellWrite {
                row: 1,
                column: 2,
                value: "9".to_string(),
            }])
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.value(1, loaded.column("KPark_Rolls Jan")), "9");
        assert_eq!(loaded.value(0, loaded.column("KPark_Rolls Jan")), "1,250");
    }

    #[tokio::test]
    async fn test_file_store_pads_ragged_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stock.yaml");
        std::fs::write(
            &path,
            "columns: [Material, Code, KPark_Rolls Jan]\nrows:\n  - [M1]\n",
        )
        .unwrap();

        let loaded = FileTableStore::new(&path).load().await.unwrap();

        assert_eq!(loaded.records()[0].cells().len(), 3);
    }

    #[tokio::test]
    async fn test_file_store_rejects_table_without_material() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stock.yaml");
        std::fs::write(&path, "columns: [Laminate]\n").unwrap();

        let result = FileTableStore::new(&path).load().await;

        assert!(matches!(
            result,
            Err(StoreError::InvalidTable(TableError::MissingIdentityColumn(_)))
        ));
    }

    #[tokio::test]
    async fn test_file_store_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stock.yaml");
        std::fs::write(&path, ": : not yaml [").unwrap();

        let result = FileTableStore::new(&path).load().await;

        assert!(matches!(result, Err(StoreError::DeserializationFailed(_))));
    }
}
