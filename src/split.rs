//! 任意区切り → カンマ区切り変換
//!
//! 英数字（と `_`）以外の連続をすべて区切りとみなす。

use regex::Regex;

/// 変換結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResult {
    pub items: Vec<String>,
}

impl SplitResult {
    /// カンマ区切りの文字列
    pub fn joined(&self) -> String {
        self.items.join(",")
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

/// 文字列を分割する（`dedup` 指定時は最初の出現を残して重複除去）
pub fn split_items(input: &str, dedup: bool) -> SplitResult {
    lazy_static::lazy_static! {
        static ref SEPARATOR_RE: Regex = Regex::new(r"\W+").unwrap();
    }

    let mut items: Vec<String> = SEPARATOR_RE
        .split(input.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if dedup {
        let mut seen = std::collections::HashSet::new();
        items.retain(|item| seen.insert(item.clone()));
    }

    SplitResult { items }
}
