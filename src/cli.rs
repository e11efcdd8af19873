use crate::ai_provider::AiProvider;
use crate::matcher::MatchPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "calorie-cam")]
#[command(about = "食品写真AIカロリー推定ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (claude/codex/gemini)
    #[arg(long, default_value = "claude", global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 食品写真1枚を解析してカロリーを推定
    Estimate {
        /// 食品写真のパス
        #[arg(required = true)]
        image: PathBuf,

        /// カロリーテーブルJSONファイル（省略時は設定→カレントのfoodData.json）
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// 照合ポリシー (forward/reversed)
        #[arg(short, long, default_value = "forward")]
        policy: MatchPolicy,

        /// 分類ラベルの取得件数
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// フォルダ内の写真を一括解析してJSONを出力
    Run {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力JSONファイル（デフォルト: 入力フォルダ/result.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// カロリーテーブルJSONファイル
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// 照合ポリシー (forward/reversed)
        #[arg(short, long, default_value = "forward")]
        policy: MatchPolicy,

        /// 分類ラベルの取得件数
        #[arg(long)]
        top_k: Option<usize>,

        /// キャッシュを使用（再分類をスキップ）
        #[arg(long)]
        use_cache: bool,
    },

    /// カロリーテーブルの読み込み結果を表示
    Table {
        /// カロリーテーブルJSONファイル
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// 先頭から表示する件数
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// 設定を表示/編集
    Config {
        /// デフォルトのカロリーテーブルを設定
        #[arg(long)]
        set_table: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 分類キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
