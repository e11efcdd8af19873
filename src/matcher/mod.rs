//! ラベル照合モジュール
//!
//! 画像分類器が返すノイズ混じりのフリーテキストラベルと、
//! カロリーテーブルの固定語彙を突き合わせる。
//!
//! - 表示名: トップラベルをカンマで切り詰め、汎用語（plate/dish）なら
//!   2位ラベルに差し替える
//! - カロリー: 全ラベルを小文字連結した文字列に対し、テーブルキーを
//!   記載順に部分文字列照合して先勝ちで決める
//!
//! テーブルと分類結果が決まれば純粋関数であり、副作用はない。

mod types;

pub use types::{CalorieMatch, MatchOutcome, MatchPolicy};

use crate::classifier::Prediction;
use crate::error::{CalorieCamError, Result};
use crate::table::FoodTable;

/// 食品名として意味を持たない汎用語
const GENERIC_TERMS: &[&str] = &["plate", "dish"];

/// カンマ区切りの同義語リストから先頭だけを残す
///
/// 分類器は "pizza, pizza pie, za" のような表記を返すことがある。
fn truncate_at_comma(label: &str) -> &str {
    label.split(',').next().unwrap_or(label).trim()
}

fn is_generic(label: &str) -> bool {
    let lower = label.to_lowercase();
    GENERIC_TERMS.iter().any(|term| lower.contains(term))
}

/// 表示用ラベルを選ぶ
///
/// トップラベルが汎用語を含み、かつ2位ラベルが存在する場合のみ
/// 2位に差し替える。2位も汎用語かどうかは見ない（先勝ち1回のみ）。
/// 返す文字列の大文字小文字は元のまま。
pub fn select_display_label(predictions: &[Prediction]) -> Result<String> {
    let top = predictions
        .first()
        .ok_or(CalorieCamError::EmptyClassification)?;

    let mut label = truncate_at_comma(&top.label);
    if is_generic(label) {
        if let Some(second) = predictions.get(1) {
            label = truncate_at_comma(&second.label);
        }
    }

    Ok(label.to_string())
}

/// 全ラベルを小文字・スペース連結した照合用テキストを作る
///
/// トップだけでなく全順位のラベルを使う。ラベル内のカンマは残す。
fn joined_label_text(predictions: &[Prediction]) -> String {
    predictions
        .iter()
        .map(|p| p.label.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// カロリーを検索する
///
/// テーブルキーを記載順に走査し、最初に部分文字列ヒットしたキーの
/// カロリー表記を返す。同点はテーブル順で決まり、特定度や信頼度は
/// 見ない（短い汎用キーが先にあれば後続の具体的なキーを隠す）。
///
/// `MatchPolicy::Reversed` では、キー側がトップラベル（カンマ切り詰め
/// 済み・小文字）を含む場合もヒット扱いにする。
pub fn lookup_calories(
    predictions: &[Prediction],
    table: &FoodTable,
    policy: MatchPolicy,
) -> Result<CalorieMatch> {
    if predictions.is_empty() {
        return Err(CalorieCamError::EmptyClassification);
    }

    let full_text = joined_label_text(predictions);
    let top_label = truncate_at_comma(&predictions[0].label).to_lowercase();

    for (key, calories) in table.iter() {
        let lower_key = key.to_lowercase();

        if full_text.contains(&lower_key) {
            return Ok(CalorieMatch::Found {
                key: key.clone(),
                calories: calories.clone(),
            });
        }

        if policy == MatchPolicy::Reversed && lower_key.contains(&top_label) {
            return Ok(CalorieMatch::Found {
                key: key.clone(),
                calories: calories.clone(),
            });
        }
    }

    Ok(CalorieMatch::Unknown)
}

/// 表示ラベル選択とカロリー検索をまとめて行う
pub fn match_outcome(
    predictions: &[Prediction],
    table: &FoodTable,
    policy: MatchPolicy,
) -> Result<MatchOutcome> {
    let display_label = select_display_label(predictions)?;
    let calorie_match = lookup_calories(predictions, table, policy)?;

    Ok(MatchOutcome {
        display_label,
        calorie_match,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn preds(labels: &[&str]) -> Vec<Prediction> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| Prediction {
                label: label.to_string(),
                confidence: 1.0 - i as f32 * 0.1,
            })
            .collect()
    }

    fn table_of(entries: &[(&str, &str)]) -> FoodTable {
        let mut map = IndexMap::new();
        for (k, v) in entries {
            map.insert(k.to_string(), v.to_string());
        }
        FoodTable::from_entries(map)
    }

    #[test]
    fn test_display_label_truncates_at_comma() {
        let p = preds(&["Pizza, pizza pie, za"]);
        assert_eq!(select_display_label(&p).unwrap(), "Pizza");
    }

    #[test]
    fn test_display_label_keeps_original_casing() {
        let p = preds(&["Granny Smith, apple"]);
        assert_eq!(select_display_label(&p).unwrap(), "Granny Smith");
    }

    #[test]
    fn test_display_label_generic_plate_falls_back_to_second() {
        let p = preds(&["plate", "pizza, food"]);
        assert_eq!(select_display_label(&p).unwrap(), "pizza");
    }

    #[test]
    fn test_display_label_generic_dish_falls_back_to_second() {
        let p = preds(&["Petri dish", "ramen"]);
        assert_eq!(select_display_label(&p).unwrap(), "ramen");
    }

    #[test]
    fn test_display_label_generic_without_second_stays() {
        // 2位が無ければ汎用語でもそのまま表示する
        let p = preds(&["plate"]);
        assert_eq!(select_display_label(&p).unwrap(), "plate");
    }

    #[test]
    fn test_display_label_empty_is_error() {
        let result = select_display_label(&[]);
        assert!(matches!(result, Err(CalorieCamError::EmptyClassification)));
    }

    #[test]
    fn test_lookup_uses_all_ranked_labels() {
        // トップ以外のラベルにだけ含まれるキーでもヒットする
        let p = preds(&["soup bowl", "miso ramen"]);
        let t = table_of(&[("ramen", "436 kcal")]);
        let m = lookup_calories(&p, &t, MatchPolicy::Forward).unwrap();
        assert_eq!(
            m,
            CalorieMatch::Found {
                key: "ramen".into(),
                calories: "436 kcal".into()
            }
        );
    }

    #[test]
    fn test_lookup_first_table_key_wins() {
        // 先勝ち: 先に記載された汎用キーが後の具体キーを隠す
        let p = preds(&["apple pie"]);
        let t = table_of(&[("pie", "237 kcal"), ("apple pie", "265 kcal")]);
        let m = lookup_calories(&p, &t, MatchPolicy::Forward).unwrap();
        assert_eq!(
            m,
            CalorieMatch::Found {
                key: "pie".into(),
                calories: "237 kcal".into()
            }
        );
    }

    #[test]
    fn test_lookup_key_casing_is_ignored() {
        let p = preds(&["grilled Beef steak"]);
        let t = table_of(&[("Beef", "250 kcal")]);
        let m = lookup_calories(&p, &t, MatchPolicy::Forward).unwrap();
        assert_eq!(
            m,
            CalorieMatch::Found {
                key: "Beef".into(),
                calories: "250 kcal".into()
            }
        );
    }

    #[test]
    fn test_lookup_no_match_is_unknown_not_error() {
        let p = preds(&["sushi"]);
        let t = table_of(&[("ramen", "436 kcal")]);
        let m = lookup_calories(&p, &t, MatchPolicy::Forward).unwrap();
        assert_eq!(m, CalorieMatch::Unknown);
    }

    #[test]
    fn test_forward_policy_rejects_reversed_containment() {
        // ラベル "pie" はキー "apple pie" の部分文字列だが、
        // 順方向ポリシーではヒットしない
        let p = preds(&["pie"]);
        let t = table_of(&[("apple pie", "265 kcal")]);
        let m = lookup_calories(&p, &t, MatchPolicy::Forward).unwrap();
        assert_eq!(m, CalorieMatch::Unknown);
    }

    #[test]
    fn test_reversed_policy_accepts_key_containing_top_label() {
        let p = preds(&["pie"]);
        let t = table_of(&[("apple pie", "265 kcal")]);
        let m = lookup_calories(&p, &t, MatchPolicy::Reversed).unwrap();
        assert_eq!(
            m,
            CalorieMatch::Found {
                key: "apple pie".into(),
                calories: "265 kcal".into()
            }
        );
    }

    #[test]
    fn test_reversed_policy_uses_truncated_top_label_only() {
        // 逆方向照合に使うのはカンマ切り詰め後のトップラベルだけ
        let p = preds(&["pie, pastry", "cake"]);
        let t = table_of(&[("apple pie", "265 kcal")]);
        let m = lookup_calories(&p, &t, MatchPolicy::Reversed).unwrap();
        assert!(matches!(m, CalorieMatch::Found { .. }));
    }

    #[test]
    fn test_scenario_pepperoni_pizza() {
        // labels = ["pepperoni pizza", "plate", "dish"], table = {"pizza": "266 kcal"}
        let p = preds(&["pepperoni pizza", "plate", "dish"]);
        let t = table_of(&[("pizza", "266 kcal")]);
        let outcome = match_outcome(&p, &t, MatchPolicy::Forward).unwrap();
        assert_eq!(outcome.display_label, "pepperoni pizza");
        assert_eq!(outcome.calorie_text(), "266 kcal (est. per 100g)");
    }

    #[test]
    fn test_scenario_generic_top_label() {
        // labels = ["plate", "pizza, food"], table = {"pizza": "266 kcal"}
        let p = preds(&["plate", "pizza, food"]);
        let t = table_of(&[("pizza", "266 kcal")]);
        let outcome = match_outcome(&p, &t, MatchPolicy::Forward).unwrap();
        assert_eq!(outcome.display_label, "pizza");
        assert_eq!(outcome.calorie_text(), "266 kcal (est. per 100g)");
    }

    #[test]
    fn test_scenario_unknown_food_message() {
        // labels = ["sushi"], table = {"ramen": "436 kcal"}
        let p = preds(&["sushi"]);
        let t = table_of(&[("ramen", "436 kcal")]);
        let outcome = match_outcome(&p, &t, MatchPolicy::Forward).unwrap();
        assert_eq!(outcome.display_label, "sushi");
        assert_eq!(outcome.calorie_text(), "Food detected, but calories unknown.");
    }
}
