mod ai_cli;
pub mod cache;
mod types;

pub use types::Prediction;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use crate::scanner::ImageInfo;
use std::path::Path;

/// 1枚の画像を分類する
pub async fn classify(
    image: &ImageInfo,
    provider: AiProvider,
    config: &Config,
    top_k: Option<usize>,
    verbose: bool,
) -> Result<Vec<Prediction>> {
    let top_k = top_k.unwrap_or(config.top_k);
    ai_cli::classify_image(&image.path, provider, top_k, config.timeout_seconds, verbose).await
}

/// フォルダ内画像の分類（キャッシュ利用）
///
/// キャッシュヒット分は再分類せず、新規分のみAIに投げて
/// キャッシュを更新する。順序は入力の画像順を保つ。
pub async fn classify_with_cache(
    images: &[ImageInfo],
    folder: &Path,
    provider: AiProvider,
    config: &Config,
    top_k: Option<usize>,
    verbose: bool,
) -> Result<Vec<(ImageInfo, Result<Vec<Prediction>>)>> {
    let mut cache_file = cache::CacheFile::load(folder);
    let (cached, uncached) = cache::filter_cached_images(images, &cache_file);

    if verbose {
        println!(
            "  キャッシュ: {}件ヒット / {}件新規",
            cached.len(),
            uncached.len()
        );
    }

    let mut by_name: std::collections::HashMap<String, Result<Vec<Prediction>>> = cached
        .into_iter()
        .map(|(img, preds)| (img.file_name, Ok(preds)))
        .collect();

    for (img, hash) in uncached {
        let result = classify(&img, provider, config, top_k, verbose).await;

        if let Ok(predictions) = &result {
            if !hash.is_empty() {
                let file_size = std::fs::metadata(&img.path).map(|m| m.len()).unwrap_or(0);
                cache_file.insert(hash, img.file_name.clone(), file_size, predictions.clone());
            }
        }

        by_name.insert(img.file_name, result);
    }

    cache_file.save(folder)?;

    // 入力順で返す
    Ok(images
        .iter()
        .filter_map(|img| {
            by_name
                .remove(&img.file_name)
                .map(|result| (img.clone(), result))
        })
        .collect())
}
