use calorie_cam_rust::{classifier, cli, config, error, matcher, report, scanner, table};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Estimate { image, table: table_path, policy, top_k } => {
            println!("🍜 calorie-cam - カロリー推定\n");

            // 1. 受付チェック（画像でなければここで弾く）
            let image_info = scanner::validate_image(&image)?;

            // 2. カロリーテーブル読み込み（失敗時はフォールバック）
            let resolved = table::resolve_table_path(
                table_path.as_deref(),
                config.table_path.as_deref(),
            );
            let (food_table, source) = table::FoodTable::load_or_fallback(&resolved);
            if source == table::TableSource::Fallback {
                eprintln!("⚠ テーブル読み込み失敗、内蔵フォールバックで続行: {}", resolved.display());
            } else if cli.verbose {
                println!("テーブル: {}（{}品目）", source, food_table.len());
            }

            // 3. AI分類（スキャン中表示を出してから待つ）
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("スキャン中...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let classified = classifier::classify(
                &image_info,
                cli.ai_provider,
                &config,
                top_k,
                cli.verbose,
            )
            .await;
            spinner.finish_and_clear();
            let predictions = classified?;

            // 4. 照合
            let outcome = matcher::match_outcome(&predictions, &food_table, policy)?;

            println!("食品名: {}", outcome.display_label);
            println!("カロリー: {}", outcome.calorie_text());

            if cli.verbose {
                println!("\nAIラベル（信頼度降順）:");
                for p in &predictions {
                    println!("  {:.2}  {}", p.confidence, p.label);
                }
            }
        }

        Commands::Run { folder, output, table: table_path, policy, top_k, use_cache } => {
            println!("🚀 calorie-cam - 一括解析\n");

            // 1. 画像スキャン
            println!("[1/3] 写真をスキャン中...");
            let images = scanner::scan_folder(&folder)?;
            println!("✔ {}枚の写真を検出\n", images.len());

            if images.is_empty() {
                return Err(error::CalorieCamError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }

            // 2. テーブル読み込みとAI分類
            println!("[2/3] AI分類中...{}", if use_cache { " (キャッシュ有効)" } else { "" });
            let resolved = table::resolve_table_path(
                table_path.as_deref(),
                config.table_path.as_deref(),
            );
            let (food_table, source) = table::FoodTable::load_or_fallback(&resolved);
            if source == table::TableSource::Fallback {
                eprintln!("⚠ テーブル読み込み失敗、内蔵フォールバックで続行: {}", resolved.display());
            }

            let progress = ProgressBar::new(images.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let classified = if use_cache {
                let results = classifier::classify_with_cache(
                    &images,
                    &folder,
                    cli.ai_provider,
                    &config,
                    top_k,
                    cli.verbose,
                )
                .await?;
                progress.inc(images.len() as u64);
                results
            } else {
                let mut results = Vec::new();
                for image in &images {
                    progress.set_message(image.file_name.clone());
                    let result = classifier::classify(
                        image,
                        cli.ai_provider,
                        &config,
                        top_k,
                        cli.verbose,
                    )
                    .await;
                    results.push((image.clone(), result));
                    progress.inc(1);
                }
                results
            };
            progress.finish_and_clear();
            println!("✔ 分類完了\n");

            // 3. 照合とレポート出力
            println!("[3/3] 照合と結果保存中...");
            let mut records = Vec::new();
            for (image, result) in classified {
                let record = match result {
                    Ok(predictions) => {
                        let outcome = matcher::match_outcome(&predictions, &food_table, policy)?;
                        report::EstimateRecord {
                            file_name: image.file_name,
                            file_path: image.path.display().to_string(),
                            date: image.date.unwrap_or_default(),
                            outcome: Some(outcome),
                            predictions,
                            error: String::new(),
                        }
                    }
                    Err(e) => {
                        // 分類に失敗した画像は報告して続行する
                        eprintln!("⚠ {}: {}", image.file_name, e);
                        report::EstimateRecord {
                            file_name: image.file_name,
                            file_path: image.path.display().to_string(),
                            date: image.date.unwrap_or_default(),
                            outcome: None,
                            predictions: Vec::new(),
                            error: e.to_string(),
                        }
                    }
                };
                records.push(record);
            }

            let report = report::Report::new(source.to_string(), policy.to_string(), records);
            let output_path = output.unwrap_or_else(|| folder.join("result.json"));
            let json = serde_json::to_string_pretty(&report)?;
            std::fs::write(&output_path, json)?;
            println!("✔ 結果を保存: {}", output_path.display());

            println!("\n✅ 一括解析完了");
        }

        Commands::Table { table: table_path, limit } => {
            let resolved = table::resolve_table_path(
                table_path.as_deref(),
                config.table_path.as_deref(),
            );
            let (food_table, source) = table::FoodTable::load_or_fallback(&resolved);

            println!("カロリーテーブル:");
            println!("  ソース: {}", source);
            println!("  品目数: {}", food_table.len());

            for (key, calories) in food_table.iter().take(limit) {
                println!("  {} → {}", key, calories);
            }
            if food_table.len() > limit {
                println!("  ... 他{}件", food_table.len() - limit);
            }
        }

        Commands::Config { set_table, show } => {
            let mut config = config;

            if let Some(path) = set_table {
                config.set_table(path)?;
                println!("✔ カロリーテーブルを設定しました");
            }

            if show {
                println!("設定:");
                println!(
                    "  テーブル: {}",
                    config
                        .table_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定（カレントのfoodData.json）".into())
                );
                println!("  取得ラベル数: {}", config.top_k);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| std::path::PathBuf::from("."));
            let cache_path = classifier::cache::CacheFile::cache_path(&target);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = classifier::cache::CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match classifier::cache::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}
