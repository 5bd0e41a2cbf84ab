use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    domain::{PeriodState, Transaction},
    errors::{BudgetError, Result},
    utils::paths::{self, ensure_dir, tmp_path},
};

use super::{PeriodStore, TransactionStore};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "transactions_";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
pub const DEFAULT_RETENTION: usize = 5;

pub const TRANSACTIONS_SCHEMA_VERSION: u8 = 1;

/// On-disk envelope around the transaction records.
#[derive(Debug, Serialize, Deserialize)]
struct TransactionFile {
    schema_version: u8,
    transactions: Vec<Transaction>,
}

/// File-backed store writing `transactions.json` and `period.json` under a
/// data directory. Every save stages to a temp file and renames it into
/// place; the previous transaction file is copied into `backups/` first.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    transactions_file: PathBuf,
    period_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = paths::resolve_base(root);
        ensure_dir(&root)?;
        let backups_dir = paths::backup_dir_in(&root);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            transactions_file: paths::transactions_file_in(&root),
            period_file: paths::period_file_in(&root),
            backups_dir,
            root,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn transactions_path(&self) -> &Path {
        &self.transactions_file
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                if name.starts_with(BACKUP_PREFIX) {
                    entries.push(name.to_string());
                }
            }
        }
        // Timestamps are zero-padded, so lexical order is chronological.
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }

    /// Copies the current transaction file into `backups/`. Pruning is left
    /// to the caller so a failed save never rotates out an older backup.
    fn backup_existing_file(&self) -> Result<bool> {
        if !self.transactions_file.exists() {
            return Ok(false);
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup_path = self
            .backups_dir
            .join(format!("{BACKUP_PREFIX}{timestamp}.{BACKUP_EXTENSION}"));
        fs::copy(&self.transactions_file, &backup_path)?;
        Ok(true)
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for name in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(self.backups_dir.join(name)) {
                tracing::warn!(backup = %name, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl TransactionStore for JsonStorage {
    fn load(&self) -> Result<Vec<Transaction>> {
        if !self.transactions_file.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.transactions_file)?;
        let file: TransactionFile = serde_json::from_str(&data)?;
        if file.schema_version > TRANSACTIONS_SCHEMA_VERSION {
            return Err(BudgetError::storage(format!(
                "transaction file schema v{} is newer than supported v{}",
                file.schema_version, TRANSACTIONS_SCHEMA_VERSION
            )));
        }
        tracing::debug!(
            count = file.transactions.len(),
            path = %self.transactions_file.display(),
            "loaded transactions"
        );
        Ok(file.transactions)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let backed_up = self.backup_existing_file()?;
        let file = TransactionFile {
            schema_version: TRANSACTIONS_SCHEMA_VERSION,
            transactions: transactions.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        write_replace(&self.transactions_file, &json)?;
        if backed_up {
            self.prune_backups()?;
        }
        tracing::debug!(
            count = transactions.len(),
            path = %self.transactions_file.display(),
            "saved transactions"
        );
        Ok(())
    }
}

impl PeriodStore for JsonStorage {
    fn load_period(&self) -> Result<Option<PeriodState>> {
        if !self.period_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.period_file)?;
        let state: PeriodState = serde_json::from_str(&data)?;
        state.validate().map_err(|err| {
            BudgetError::storage(format!("{}: {}", self.period_file.display(), err))
        })?;
        Ok(Some(state))
    }

    fn save_period(&self, state: &PeriodState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        write_replace(&self.period_file, &json)?;
        tracing::debug!(path = %self.period_file.display(), "saved period state");
        Ok(())
    }
}

fn write_replace(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
