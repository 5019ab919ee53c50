//! 特殊ルール検証
//!
//! スコアが高くても業務上ありえない候補を棄却する。
//! 1. キーワード（double, twin など）の有無がチャネル名と候補名で一致すること
//! 2. 先頭の数字列（部屋番号など）が両方にある場合は一致すること

use crate::types::ReferenceEntry;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 既定の特殊ルール
pub const DEFAULT_SPECIAL_RULES: &[&str] = &[
    "double",
    "single",
    "twin",
    "executive",
    "deluxe",
    "junior",
    "superior",
    "premier",
];

/// 特殊ルール（小文字化・重複除去済みのキーワード集合）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SpecialRules {
    keywords: Vec<String>,
}

impl SpecialRules {
    /// キーワード一覧から構築（空文字は無視、登録順を保持）
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self { keywords: Vec::new() };
        for keyword in keywords {
            rules.insert(keyword.as_ref());
        }
        rules
    }

    pub fn empty() -> Self {
        Self { keywords: Vec::new() }
    }

    /// 追加（既に存在する場合は false）
    pub fn insert(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || self.keywords.contains(&keyword) {
            return false;
        }
        self.keywords.push(keyword);
        true
    }

    /// 削除（存在しなかった場合は false）
    pub fn remove(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        let before = self.keywords.len();
        self.keywords.retain(|k| *k != keyword);
        self.keywords.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for SpecialRules {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIAL_RULES.iter().copied())
    }
}

impl From<Vec<String>> for SpecialRules {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<SpecialRules> for Vec<String> {
    fn from(rules: SpecialRules) -> Self {
        rules.keywords
    }
}

/// 候補を棄却した理由
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// キーワードの有無が一致しない
    Keyword(String),
    /// 先頭の数字列が一致しない
    NumberMismatch { original: String, candidate: String },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Keyword(keyword) => write!(f, "keyword '{}' differs", keyword),
            Rejection::NumberMismatch { original, candidate } => {
                write!(f, "number {} != {}", original, candidate)
            }
        }
    }
}

/// 最初の数字列を取り出す
pub fn leading_number(s: &str) -> Option<&str> {
    lazy_static::lazy_static! {
        static ref DIGITS_RE: Regex = Regex::new(r"\d+").unwrap();
    }
    DIGITS_RE.find(s).map(|m| m.as_str())
}

/// 特殊ルールで検証し、最初に失敗した理由を返す
pub fn validate(
    original_name: &str,
    candidate_name: &str,
    rules: &SpecialRules,
) -> Result<(), Rejection> {
    let original_lower = original_name.to_lowercase();
    let candidate_lower = candidate_name.to_lowercase();

    for keyword in rules.iter() {
        if original_lower.contains(keyword) != candidate_lower.contains(keyword) {
            return Err(Rejection::Keyword(keyword.to_string()));
        }
    }

    if let (Some(original), Some(candidate)) =
        (leading_number(original_name), leading_number(candidate_name))
    {
        if original != candidate {
            return Err(Rejection::NumberMismatch {
                original: original.to_string(),
                candidate: candidate.to_string(),
            });
        }
    }

    Ok(())
}

/// 候補を採用できるか
pub fn accepts(original_name: &str, candidate: &ReferenceEntry, rules: &SpecialRules) -> bool {
    validate(original_name, &candidate.en_name, rules).is_ok()
}
