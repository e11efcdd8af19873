//! カロリーテーブルモジュール
//!
//! 食品名→カロリー表記（"436 kcal" など）のマッピングを管理する。
//! 起動時に一度だけJSONから読み込み、以降はセッション中不変。
//! 読み込み失敗時はハードコードのフォールバックテーブルで縮退運転する。
//!
//! 照合が先勝ちのため、キーの列挙順はデータファイルの記載順を
//! そのまま保持する必要がある（IndexMapを使用）。

use crate::error::{CalorieCamError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// テーブルJSONの形状ゆれ
///
/// 直接オブジェクト形式と、オブジェクトを1要素だけ持つ配列形式の
/// 両方が実在するため、どちらも受け付けてアンラップする。
#[derive(Deserialize)]
#[serde(untagged)]
enum TableFile {
    Direct(IndexMap<String, String>),
    Wrapped(Vec<IndexMap<String, String>>),
}

/// どのソースからテーブルが得られたか
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    File(PathBuf),
    Fallback,
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSource::File(path) => write!(f, "{}", path.display()),
            TableSource::Fallback => write!(f, "フォールバック（内蔵3品目）"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    entries: IndexMap<String, String>,
}

impl FoodTable {
    pub fn from_entries(entries: IndexMap<String, String>) -> Self {
        Self { entries }
    }

    /// JSONファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json_str(content: &str) -> Result<Self> {
        let parsed: TableFile = serde_json::from_str(content)
            .map_err(|e| CalorieCamError::InvalidTable(format!("JSONパースエラー: {}", e)))?;

        let entries = match parsed {
            TableFile::Direct(map) => map,
            TableFile::Wrapped(mut list) => {
                if list.is_empty() {
                    return Err(CalorieCamError::InvalidTable(
                        "配列形式だが要素がありません".into(),
                    ));
                }
                list.remove(0)
            }
        };

        Ok(Self { entries })
    }

    /// 読み込み失敗時はフォールバックテーブルに差し替える
    ///
    /// 失敗してもセッションは継続する。戻り値のTableSourceで
    /// 縮退運転かどうかを呼び出し側に伝える。
    pub fn load_or_fallback(path: &Path) -> (Self, TableSource) {
        match Self::load(path) {
            Ok(table) => (table, TableSource::File(path.to_path_buf())),
            Err(_) => (Self::fallback(), TableSource::Fallback),
        }
    }

    /// 内蔵フォールバックテーブル（3品目）
    pub fn fallback() -> Self {
        let mut entries = IndexMap::new();
        entries.insert("ramen".to_string(), "436 kcal".to_string());
        entries.insert("pizza".to_string(), "266 kcal".to_string());
        entries.insert("beef".to_string(), "250 kcal".to_string());
        Self { entries }
    }

    /// テーブルの記載順でキーと値を列挙する
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }
}

/// テーブルパスの解決順: CLI引数 → 設定 → カレントのfoodData.json
pub fn resolve_table_path(cli_path: Option<&Path>, config_path: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_path {
        return path.to_path_buf();
    }
    if let Some(path) = config_path {
        return path.to_path_buf();
    }
    PathBuf::from("foodData.json")
}
