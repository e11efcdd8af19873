//! calorie-cam-rust
//!
//! 食品写真をAI分類し、カロリーテーブルと照合して推定カロリーを表示する。

pub mod ai_provider;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod table;
