use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalorieCamError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像ファイルではありません: {0}")]
    NotAnImage(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("カロリーテーブルが不正: {0}")]
    InvalidTable(String),

    #[error("分類結果が空です（少なくとも1件のラベルが必要）")]
    EmptyClassification,

    #[error("AI呼び出しエラー: {0}")]
    ClassifierCall(String),

    #[error("AIレスポンスのパースに失敗: {0}")]
    ClassifierParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalorieCamError>;
