//! AI CLI連携モジュール
//!
//! 画像分類は外部AI CLI（claude/codex/gemini）をブラックボックスとして
//! 呼び出す。プロンプトで信頼度降順のJSON配列を要求し、レスポンスから
//! JSON部分を抽出してパースする。

use super::types::Prediction;
use crate::ai_provider::AiProvider;
use crate::error::{CalorieCamError, Result};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// 分類プロンプトを構築
fn build_prompt(image_path: &str, top_k: usize) -> String {
    format!(
        "Look at the image file {} and identify the food shown. \
         Respond with ONLY a JSON array of up to {} guesses, ordered by \
         confidence descending, each shaped as \
         {{\"label\": \"<food name, synonyms comma-separated>\", \"confidence\": <0.0-1.0>}}. \
         No prose, no markdown outside the JSON.",
        image_path, top_k
    )
}

/// 1枚の画像を分類する
///
/// 外部CLIの完了を待つ非同期呼び出し。タイムアウト超過はAI呼び出し
/// エラーとして返す（リトライはしない）。
pub async fn classify_image(
    image_path: &Path,
    provider: AiProvider,
    top_k: usize,
    timeout_seconds: u64,
    verbose: bool,
) -> Result<Vec<Prediction>> {
    let abs_path = std::fs::canonicalize(image_path)?;
    let path_str = abs_path.display().to_string().replace('\\', "/");
    let prompt = build_prompt(&path_str, top_k);

    if verbose {
        println!("  プロンプト長: {} chars", prompt.len());
    }

    let response = run_ai_cli(provider, &prompt, timeout_seconds).await?;

    if verbose {
        let preview: String = response.chars().take(500).collect();
        println!("  レスポンス: {}", preview);
    }

    parse_predictions(&response)
}

async fn run_ai_cli(provider: AiProvider, prompt: &str, timeout_seconds: u64) -> Result<String> {
    let command_name = provider.command_name();

    // Windowsではcmd /c経由で呼び出す
    #[cfg(windows)]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/c", command_name, "-p", prompt, "--output-format", "text"]);
        c
    };

    #[cfg(not(windows))]
    let mut command = {
        let mut c = Command::new(command_name);
        c.args(["-p", prompt, "--output-format", "text"]);
        c
    };

    let output = tokio::time::timeout(
        Duration::from_secs(timeout_seconds),
        command.output(),
    )
    .await
    .map_err(|_| {
        CalorieCamError::ClassifierCall(format!("{}がタイムアウト（{}秒）", command_name, timeout_seconds))
    })?
    .map_err(|e| CalorieCamError::ClassifierCall(format!("{}実行エラー: {}", command_name, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CalorieCamError::ClassifierCall(format!(
            "{} failed (code {:?}): {}",
            command_name,
            output.status.code(),
            stderr
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// レスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
/// 3. エラー
fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(CalorieCamError::ClassifierParse("JSONが見つかりません".into()))
}

/// レスポンスをパースし、信頼度降順に整える
///
/// 空の配列は「分類成功なら長さ1以上」の前提に反するためエラー。
pub fn parse_predictions(response: &str) -> Result<Vec<Prediction>> {
    let json_str = extract_json(response)?;
    let mut predictions: Vec<Prediction> = serde_json::from_str(json_str.trim())
        .map_err(|e| CalorieCamError::ClassifierParse(format!("JSONパースエラー: {}", e)))?;

    if predictions.is_empty() {
        return Err(CalorieCamError::EmptyClassification);
    }

    predictions.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(predictions)
}
