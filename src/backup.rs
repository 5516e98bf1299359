//! JSON file holding every completed sale, kept apart from the database.
//! Also reads the format of the old browser backups (see the serde aliases on `Sale`).

use crate::error::PosResult;
use crate::models::Sale;
use crate::store::sales;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub struct SalesBackup {
    path: PathBuf,
}

impl SalesBackup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SalesBackup { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All backed-up sales; a missing or blank file is an empty backup.
    pub fn load(&self) -> PosResult<Vec<Sale>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn append(&self, sale: &Sale) -> PosResult<()> {
        let mut all = self.load()?;
        all.push(sale.clone());
        self.write(&all)
    }

    pub fn last(&self) -> PosResult<Option<Sale>> {
        Ok(self.load()?.pop())
    }

    fn write(&self, all: &[Sale]) -> PosResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        // Temp file + rename: the target is never left half-written
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(all)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Insert backed-up sales the database does not have yet. Returns how many were added.
    pub fn import_into(&self, conn: &Connection) -> PosResult<usize> {
        let mut imported = 0;
        for sale in self.load()? {
            if sales::sale_exists(conn, sale.id)? {
                continue;
            }
            sales::insert_sale(conn, &sale)?;
            imported += 1;
        }

        tracing::info!(imported, path = %self.path.display(), "imported sales backup");
        Ok(imported)
    }
}
