//! 分類結果キャッシュモジュール
//!
//! 画像のSHA-256ハッシュをキーにして分類結果をキャッシュし、
//! 同じ画像の再分類をスキップする。照合は毎回計算し直す
//! （キャッシュするのは分類器の出力だけ）。

use super::types::Prediction;
use crate::error::Result;
use crate::scanner::ImageInfo;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".classify-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// ファイルハッシュ → 分類結果のマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    pub predictions: Vec<Prediction>,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み
    ///
    /// 読めない・バージョン不一致の場合は黙って空から作り直す。
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                eprintln!("キャッシュバージョン不一致、再生成します");
                Self::default()
            }
            Err(_) => Self::default(),
        }
    }

    /// キャッシュファイルを保存
    pub fn save(&self, folder: &Path) -> Result<()> {
        let cache_path = Self::cache_path(folder);
        let file = File::create(cache_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除（存在した場合true）
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn get(&self, hash: &str) -> Option<&Vec<Prediction>> {
        self.entries.get(hash).map(|e| &e.predictions)
    }

    pub fn insert(
        &mut self,
        hash: String,
        file_name: String,
        file_size: u64,
        predictions: Vec<Prediction>,
    ) {
        self.entries.insert(
            hash,
            CacheEntry {
                file_name,
                file_size,
                predictions,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像ファイルのSHA-256ハッシュ（hex）
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(digest))
}

/// キャッシュ済みとそれ以外に振り分ける
///
/// 戻り値は (キャッシュヒットした結果, 未キャッシュの画像とハッシュ)。
pub fn filter_cached_images(
    images: &[ImageInfo],
    cache: &CacheFile,
) -> (Vec<(ImageInfo, Vec<Prediction>)>, Vec<(ImageInfo, String)>) {
    let mut cached = Vec::new();
    let mut uncached = Vec::new();

    for img in images {
        let hash = match compute_file_hash(&img.path) {
            Ok(h) => h,
            Err(_) => {
                // ハッシュ計算失敗時は未キャッシュとして扱う
                uncached.push((img.clone(), String::new()));
                continue;
            }
        };

        if let Some(predictions) = cache.get(&hash) {
            cached.push((img.clone(), predictions.clone()));
        } else {
            uncached.push((img.clone(), hash));
        }
    }

    (cached, uncached)
}
