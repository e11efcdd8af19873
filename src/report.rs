//! 一括解析の結果レポート
//!
//! `run` サブコマンドの出力JSON。1画像につき1レコード。

use crate::classifier::Prediction;
use crate::matcher::MatchOutcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRecord {
    pub file_name: String,

    #[serde(default)]
    pub file_path: String,

    /// 撮影日時（EXIFから取得できた場合）
    #[serde(default)]
    pub date: String,

    /// 分類エラー時はNone、成功時は照合結果
    #[serde(default)]
    pub outcome: Option<MatchOutcome>,

    /// 分類器の生ラベル（信頼度降順）
    #[serde(default)]
    pub predictions: Vec<Prediction>,

    /// 分類エラーの内容（成功時は空）
    #[serde(default)]
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: String,
    /// 使用したカロリーテーブル（パスまたはフォールバック表記）
    pub table_source: String,
    pub policy: String,
    pub results: Vec<EstimateRecord>,
}

impl Report {
    pub fn new(table_source: String, policy: String, results: Vec<EstimateRecord>) -> Self {
        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            table_source,
            policy,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::CalorieMatch;

    #[test]
    fn test_report_json_roundtrip() {
        let record = EstimateRecord {
            file_name: "pizza.jpg".into(),
            file_path: "/photos/pizza.jpg".into(),
            date: "2026-08-01 12:00:00".into(),
            outcome: Some(MatchOutcome {
                display_label: "pepperoni pizza".into(),
                calorie_match: CalorieMatch::Found {
                    key: "pizza".into(),
                    calories: "266 kcal".into(),
                },
            }),
            predictions: vec![Prediction {
                label: "pepperoni pizza".into(),
                confidence: 0.92,
            }],
            error: String::new(),
        };

        let report = Report::new("foodData.json".into(), "forward".into(), vec![record]);
        let json = serde_json::to_string_pretty(&report).unwrap();
        let loaded: Report = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.results.len(), 1);
        assert_eq!(loaded.table_source, "foodData.json");
        let outcome = loaded.results[0].outcome.as_ref().unwrap();
        assert_eq!(outcome.display_label, "pepperoni pizza");
    }
}
