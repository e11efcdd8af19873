//! カロリーテーブル読み込みテスト
//!
//! ファイル形状ゆれの吸収とフォールバック動作を検証

use calorie_cam_rust::table::{FoodTable, TableSource};
use tempfile::tempdir;

/// 直接オブジェクト形式のファイル読み込み
#[test]
fn test_load_direct_object_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("foodData.json");
    std::fs::write(&path, r#"{"ramen": "436 kcal", "sushi": "145 kcal"}"#).unwrap();

    let (table, source) = FoodTable::load_or_fallback(&path);
    assert_eq!(source, TableSource::File(path));
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("sushi").unwrap(), "145 kcal");
}

/// 配列ラップ形式は直接形式と同一の挙動になる
#[test]
fn test_wrapped_array_behaves_like_direct() {
    let dir = tempdir().expect("Failed to create temp dir");

    let direct = dir.path().join("direct.json");
    std::fs::write(&direct, r#"{"ramen": "436 kcal", "pizza": "266 kcal"}"#).unwrap();

    let wrapped = dir.path().join("wrapped.json");
    std::fs::write(&wrapped, r#"[{"ramen": "436 kcal", "pizza": "266 kcal"}]"#).unwrap();

    let (table_a, _) = FoodTable::load_or_fallback(&direct);
    let (table_b, _) = FoodTable::load_or_fallback(&wrapped);

    assert_eq!(table_a.len(), table_b.len());
    let keys_a: Vec<&String> = table_a.iter().map(|(k, _)| k).collect();
    let keys_b: Vec<&String> = table_b.iter().map(|(k, _)| k).collect();
    assert_eq!(keys_a, keys_b);
}

/// ファイル欠落時はちょうど3品目のフォールバック
#[test]
fn test_missing_file_yields_exact_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nonexistent.json");

    let (table, source) = FoodTable::load_or_fallback(&path);
    assert_eq!(source, TableSource::Fallback);
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("ramen").unwrap(), "436 kcal");
    assert_eq!(table.get("pizza").unwrap(), "266 kcal");
    assert_eq!(table.get("beef").unwrap(), "250 kcal");
}

/// 壊れたJSONもフォールバックになる（空テーブルにはならない）
#[test]
fn test_malformed_file_yields_fallback_not_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not valid json").unwrap();

    let (table, source) = FoodTable::load_or_fallback(&path);
    assert_eq!(source, TableSource::Fallback);
    assert!(!table.is_empty());
}

/// 小文字化で重複するキーも記載順のまま保持される
#[test]
fn test_duplicate_keys_by_casing_kept_in_order() {
    let table =
        FoodTable::from_json_str(r#"{"Pizza": "266 kcal", "pizza slice": "272 kcal"}"#).unwrap();
    let keys: Vec<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["Pizza", "pizza slice"]);
}
