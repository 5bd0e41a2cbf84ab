use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    currency::DEFAULT_SYMBOL,
    domain::{
        period::{DEFAULT_GOAL_NAME, DEFAULT_GOAL_TARGET},
        SavingsGoal,
    },
    errors::{BudgetError, Result},
    storage::json_backend::DEFAULT_RETENTION,
    utils::paths::{self, ensure_dir, tmp_path},
};

/// User preferences persisted as `config.json` in the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_goal_name")]
    pub default_goal_name: String,
    #[serde(default = "Config::default_goal_target")]
    pub default_goal_target: Decimal,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    /// Where ledger data lives. Defaults to the directory holding the config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            default_goal_name: Self::default_goal_name(),
            default_goal_target: Self::default_goal_target(),
            backup_retention: Self::default_backup_retention(),
            data_dir: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "currency_symbol",
        "default_goal_name",
        "default_goal_target",
        "backup_retention",
        "data_dir",
    ];

    fn default_currency_symbol() -> String {
        DEFAULT_SYMBOL.into()
    }

    fn default_goal_name() -> String {
        DEFAULT_GOAL_NAME.into()
    }

    fn default_goal_target() -> Decimal {
        DEFAULT_GOAL_TARGET
    }

    fn default_backup_retention() -> usize {
        DEFAULT_RETENTION
    }

    /// Goal a reset session starts from.
    pub fn default_goal(&self) -> Result<SavingsGoal> {
        SavingsGoal::new(
            self.default_goal_name.clone(),
            self.default_goal_target,
            Decimal::ZERO,
        )
        .map_err(|err| BudgetError::Config(err.to_string()))
    }

    pub fn resolve_data_dir(&self, config_base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| config_base.to_path_buf())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "currency_symbol" => Some(self.currency_symbol.clone()),
            "default_goal_name" => Some(self.default_goal_name.clone()),
            "default_goal_target" => Some(self.default_goal_target.to_string()),
            "backup_retention" => Some(self.backup_retention.to_string()),
            "data_dir" => Some(
                self.data_dir
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "(default)".into()),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(BudgetError::validation("currency symbol cannot be empty"));
                }
                self.currency_symbol = value.to_string();
            }
            "default_goal_name" => {
                if value.is_empty() {
                    return Err(BudgetError::validation("goal name cannot be empty"));
                }
                self.default_goal_name = value.to_string();
            }
            "default_goal_target" => {
                let target: Decimal = value.parse().map_err(|_| {
                    BudgetError::validation(format!("`{}` is not a valid amount", value))
                })?;
                SavingsGoal::new(self.default_goal_name.clone(), target, Decimal::ZERO)?;
                self.default_goal_target = target;
            }
            "backup_retention" => {
                let retention: usize = value.parse().map_err(|_| {
                    BudgetError::validation(format!("`{}` is not a valid count", value))
                })?;
                self.backup_retention = retention.max(1);
            }
            "data_dir" => {
                self.data_dir = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            other => {
                return Err(BudgetError::validation(format!(
                    "unknown config key `{}` (expected one of: {})",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

/// Loads and atomically saves [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            BudgetError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
