//! 類似度スコアリング
//!
//! トークン順序に依存しない類似度（token sort ratio）で参照セットを評価し、
//! 上位K件の候補を返す。参照セットは構築時に一度だけ正規化しておく。

use crate::normalize::normalize;
use crate::types::{RawEntry, ReferenceEntry};
use std::collections::HashSet;
use strsim::normalized_levenshtein;

/// 候補（参照セット内の位置とスコア）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub score: u8,
}

/// 重複除去・正規化済みの参照セット
#[derive(Debug, Clone, Default)]
pub struct ReferencePool {
    entries: Vec<ReferenceEntry>,
}

impl ReferencePool {
    /// 入力行から (rid, en_name) の重複を除いて構築する（最初の出現順を保持）
    pub fn from_rows(rows: &[RawEntry]) -> Self {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut entries = Vec::new();

        for row in rows {
            if !seen.insert((row.rid.as_str(), row.en_name.as_str())) {
                continue;
            }
            entries.push(ReferenceEntry {
                rid: row.rid.clone(),
                en_name: row.en_name.clone(),
                standardized_en_name: normalize(&row.en_name),
            });
        }

        tracing::debug!("参照セット構築: {}行 -> {}件", rows.len(), entries.len());
        let pool = Self { entries };
        if !rows.is_empty() && !pool.has_searchable_names() {
            tracing::warn!("参照名がすべて空です。全行が自己参照になります");
        }
        pool
    }

    /// 正規化後も空でない参照名を1件以上持つか
    pub fn has_searchable_names(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| !entry.standardized_en_name.is_empty())
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }
}

/// 比較用キー: 英数字トークンに分解し、小文字化・ソートして空白で連結
fn token_sort_key(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// キー同士の類似度（0-100）。どちらかが空なら0
fn key_ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// トークン順序に依存しない類似度（0-100）
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    key_ratio(&token_sort_key(a), &token_sort_key(b))
}

/// 上位候補を取得する
///
/// 参照セットを一度だけ走査し、スコア降順で最大 `limit` 件を返す。
/// 同点の場合は参照セットの順序を保つ（安定ソート）。
pub fn top_candidates(query: &str, pool: &ReferencePool, limit: usize) -> Vec<Candidate> {
    if limit == 0 {
        return Vec::new();
    }

    // 参照側の standardized_en_name は正規化済み（単一トークン）なのでそのままキーになる
    let query_key = token_sort_key(query);

    let mut candidates: Vec<Candidate> = pool
        .iter()
        .enumerate()
        .map(|(index, entry)| Candidate {
            index,
            score: key_ratio(&query_key, &entry.standardized_en_name),
        })
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(limit);
    candidates
}
