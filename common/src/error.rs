//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid rewrite pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid threshold: {0} (expected an integer between 0 and 100)")]
    InvalidThreshold(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
