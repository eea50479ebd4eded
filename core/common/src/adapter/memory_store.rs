//! メモリ上の追記専用 RecordStore（--dry-run とテスト用）

use crate::error::Error;
use crate::ports::outbound::RecordStore;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の行を持った状態で作る
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryRecordStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn append_row(&self, row: &[String]) -> Result<(), Error> {
        self.rows
            .lock()
            .map_err(|_| Error::io_msg("memory store lock poisoned"))?
            .push(row.to_vec());
        Ok(())
    }

    fn read_rows(&self) -> Result<Vec<Vec<String>>, Error> {
        Ok(self
            .rows
            .lock()
            .map_err(|_| Error::io_msg("memory store lock poisoned"))?
            .clone())
    }
}
