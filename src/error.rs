use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomatcherError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}")]
    UnsupportedFormat(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("ワークシートがありません: {0}")]
    EmptyWorkbook(String),

    #[error("区切り文字は1バイトの文字で指定してください: {0:?}")]
    InvalidSeparator(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] roomatcher_common::Error),
}

pub type Result<T> = std::result::Result<T, RoomatcherError>;
