use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".bucket_budget";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";
const TRANSACTIONS_FILE: &str = "transactions.json";
const PERIOD_FILE: &str = "period.json";

/// Returns the application data directory, defaulting to `~/.bucket_budget`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BUCKET_BUDGET_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(app_data_dir)
}

pub fn transactions_file_in(base: &Path) -> PathBuf {
    base.join(TRANSACTIONS_FILE)
}

pub fn period_file_in(base: &Path) -> PathBuf {
    base.join(PERIOD_FILE)
}

pub fn backup_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Path of the staging file used for atomic writes (`foo.json` -> `foo.json.tmp`).
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
