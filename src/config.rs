use crate::error::{CalorieCamError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// デフォルトのカロリーテーブルJSONパス
    pub table_path: Option<PathBuf>,
    /// 分類ラベルの取得件数
    pub top_k: usize,
    /// AI呼び出しのタイムアウト（秒）
    pub timeout_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CalorieCamError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("calorie-cam").join("config.json"))
    }

    pub fn set_table(&mut self, path: PathBuf) -> Result<()> {
        self.table_path = Some(path);
        self.save()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_path: None,
            top_k: 5,
            timeout_seconds: 60,
        }
    }
}
