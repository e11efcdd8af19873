mod exif;

use crate::error::{CalorieCamError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub date: Option<String>,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

/// 単一ファイルが画像かどうかを検証する
///
/// 拡張子ではなくファイル先頭のマジックバイトで判定する。
/// 画像でないファイルは分類に回さず、受付時点で弾く。
pub fn validate_image(path: &Path) -> Result<ImageInfo> {
    if !path.exists() {
        return Err(CalorieCamError::FileNotFound(path.display().to_string()));
    }

    // 拡張子は信用せず、先頭バイトから形式を判定する
    let bytes = std::fs::read(path)?;
    if image::guess_format(&bytes).is_err() {
        return Err(CalorieCamError::NotAnImage(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(ImageInfo {
        path: path.to_path_buf(),
        file_name,
        date: exif::extract_date(path).ok(),
    })
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(CalorieCamError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy();
            if IMAGE_EXTENSIONS.iter().any(|&e| e == ext_str) {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                let date = exif::extract_date(path).ok();

                images.push(ImageInfo {
                    path: path.to_path_buf(),
                    file_name,
                    date,
                });
            }
        }
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}
