use serde::{Deserialize, Serialize};

/// 照合ポリシー
///
/// 順方向（テーブルキーがAIラベル連結文字列の部分文字列）のみが既定。
/// `Reversed` は加えて「キーがトップラベルを含む」逆方向照合も許す
/// 別系統の挙動で、結果が食い違うことがあるため明示的に選択させる。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    #[default]
    Forward,
    Reversed,
}

impl std::str::FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" | "f" => Ok(MatchPolicy::Forward),
            "reversed" | "r" => Ok(MatchPolicy::Reversed),
            _ => Err(format!("Unknown policy: {}. Use forward or reversed", s)),
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPolicy::Forward => write!(f, "forward"),
            MatchPolicy::Reversed => write!(f, "reversed"),
        }
    }
}

/// カロリー照合の結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalorieMatch {
    /// テーブルのキーにヒットした
    Found {
        /// ヒットしたテーブルキー（元の表記のまま）
        key: String,
        /// カロリー表記（"266 kcal" など）
        calories: String,
    },
    /// 食品は検出したがテーブルに該当なし
    Unknown,
}

/// 1回の分類リクエストに対する最終結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    /// 表示用の食品名（元の大文字小文字のまま）
    pub display_label: String,
    pub calorie_match: CalorieMatch,
}

impl MatchOutcome {
    /// ユーザー向けのカロリー表示文字列
    pub fn calorie_text(&self) -> String {
        match &self.calorie_match {
            CalorieMatch::Found { calories, .. } => {
                format!("{} (est. per 100g)", calories)
            }
            CalorieMatch::Unknown => "Food detected, but calories unknown.".to_string(),
        }
    }
}
