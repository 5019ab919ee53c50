//! 房型照合ツール
//!
//! 照合ロジックは `roomatcher-common` に置き、このクレートは入出力・設定・CLIを担当する。

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod input;
pub mod pipeline;
pub mod split;
