use serde::{Deserialize, Serialize};

/// 分類器が返す1件の推定
///
/// ラベルは "pizza, pizza pie, za" のようなカンマ区切りの
/// 同義語リストを含むフリーテキスト。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub label: String,

    /// 信頼度 (0.0-1.0)
    #[serde(default)]
    pub confidence: f32,
}
