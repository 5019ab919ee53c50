use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roomatcher")]
#[command(about = "チャネル房型名を参照カタログに照合するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// カタログを照合して結果を出力
    Match {
        /// 入力ファイル（xlsx/xls/ods/csv）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（デフォルト: 入力ファイル名_result.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (excel/csv/json)
        #[arg(short, long, default_value = "excel")]
        format: ExportFormat,

        /// 類似度の閾値 (0-100)
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<i64>,

        /// 書き換えルール（PATTERN=>REPLACEMENT、複数指定可・指定順に適用）
        #[arg(short, long = "rule")]
        rules: Vec<String>,

        /// 書き換えルールのJSONファイル
        #[arg(long = "rules")]
        rules_file: Option<PathBuf>,

        /// 特殊ルールのキーワードを追加（複数指定可）
        #[arg(short, long, num_args = 1..)]
        special: Vec<String>,

        /// 既定の特殊ルールを使わない
        #[arg(long)]
        no_default_special: bool,

        /// 評価する候補数
        #[arg(long)]
        limit: Option<usize>,

        /// 単一スレッドで処理
        #[arg(long)]
        sequential: bool,
    },

    /// CSVをExcelに変換
    Convert {
        /// 入力CSVファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（デフォルト: 拡張子を.xlsxに変更）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 区切り文字（1文字、タブは \t）
        #[arg(long, default_value = ",")]
        separator: String,
    },

    /// 任意の区切り文字をカンマ区切りに変換
    Split {
        /// 入力文字列（省略時は --file または標準入力）
        text: Option<String>,

        /// 入力ファイル
        #[arg(long)]
        file: Option<PathBuf>,

        /// 重複を除去
        #[arg(long)]
        dedup: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定の閾値を設定
        #[arg(long, allow_negative_numbers = true)]
        set_threshold: Option<i64>,

        /// 書き換えルールを追加（PATTERN=>REPLACEMENT）
        #[arg(long)]
        add_rule: Vec<String>,

        /// 書き換えルールを番号で削除（--show の表示番号）
        #[arg(long)]
        remove_rule: Option<usize>,

        /// 特殊ルールを追加
        #[arg(long, num_args = 1..)]
        add_special: Vec<String>,

        /// 特殊ルールを削除
        #[arg(long, num_args = 1..)]
        remove_special: Vec<String>,

        /// 既定値に戻す
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum ExportFormat {
    #[default]
    Excel,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown format: {}. Use excel, csv, or json", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}
