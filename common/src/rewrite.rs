//! 書き換えルール
//!
//! ユーザー定義の 正規表現 → 置換文字列 を登録順に適用する。
//! 後のルールは前のルールの出力を受け取るため、順序に意味がある。

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 書き換えルール（未コンパイル）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub pattern: String,
    /// 置換文字列（`$1` / `${name}` でグループ参照）
    pub replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl std::str::FromStr for RewriteRule {
    type Err = Error;

    /// `PATTERN=>REPLACEMENT` 形式を解析する（置換文字列は空でもよい）
    fn from_str(s: &str) -> Result<Self> {
        let (pattern, replacement) = s
            .split_once("=>")
            .ok_or_else(|| Error::InvalidRule(format!("'{}' is not PATTERN=>REPLACEMENT", s)))?;
        if pattern.is_empty() {
            return Err(Error::InvalidRule(format!("'{}' has an empty pattern", s)));
        }
        Ok(Self::new(pattern, replacement))
    }
}

impl std::fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.replacement)
    }
}

/// コンパイル済みのルール列
///
/// 不正なパターンは構築時にエラーにする（黙ってスキップしない）。
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(Regex, String)>,
}

impl RuleSet {
    pub fn compile(rules: &[RewriteRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|re| (re, rule.replacement.clone()))
                    .map_err(|source| Error::InvalidPattern {
                        pattern: rule.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 文字列全体に各ルールを順番に適用する
    pub fn apply(&self, s: &str) -> String {
        self.rules
            .iter()
            .fold(s.to_string(), |text, (re, replacement)| {
                re.replace_all(&text, replacement.as_str()).into_owned()
            })
    }
}

/// 書き換えを適用する
pub fn rewrite(s: &str, rules: &RuleSet) -> String {
    rules.apply(s)
}
