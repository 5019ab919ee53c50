//! 照合データの型定義
//!
//! - RawEntry: 入力カタログの1行
//! - ReferenceEntry: 参照セット（rid, en_name の重複除去済み）
//! - MatchRecord: 照合結果（1行につき1件）

use crate::validator::Rejection;
use serde::{Deserialize, Serialize};

/// 入力カタログの1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    pub room_id: String,
    /// 参照カタログ側のID（照合できなかった場合の自己参照に使う）
    pub rid: String,
    /// 参照カタログ側の正式名称
    pub en_name: String,
    /// チャネルから来た房型名（照合対象）
    pub channel_room_en_name: String,
}

impl RawEntry {
    /// 全フィールドが空か
    pub fn is_empty(&self) -> bool {
        self.room_id.trim().is_empty()
            && self.rid.trim().is_empty()
            && self.en_name.trim().is_empty()
            && self.channel_room_en_name.trim().is_empty()
    }
}

/// 参照セットの1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub rid: String,
    pub en_name: String,
    /// 正規化済みの名称（バッチ実行中は再計算しない）
    pub standardized_en_name: String,
}

/// 照合の結末
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// 閾値以上かつ特殊ルールを通過した候補を採用
    Matched,
    /// すべての候補が閾値未満
    BelowThreshold,
    /// 閾値以上の候補はあったが特殊ルールで棄却された（最初の棄却理由）
    Rejected(Rejection),
    /// 参照セットが空で候補なし
    NoCandidates,
}

impl MatchOutcome {
    /// 出力用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Matched => "matched",
            MatchOutcome::BelowThreshold => "below_threshold",
            MatchOutcome::Rejected(_) => "rejected",
            MatchOutcome::NoCandidates => "no_candidates",
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched)
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::Rejected(reason) => write!(f, "rejected ({})", reason),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// 照合結果
///
/// 照合できなかった行は `matched_rid` / `matched_en_name` が行自身の rid / en_name になる。
/// `similarity` は考慮した最良候補のスコアで、候補が1件もない場合のみ `None`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub room_id: String,
    pub matched_rid: String,
    /// 書き換え前のチャネル名
    pub original_name: String,
    pub matched_en_name: String,
    pub similarity: Option<u8>,
    pub outcome: MatchOutcome,
}

impl MatchRecord {
    /// 自己参照のフォールバック結果を作る
    pub fn fallback(row: &RawEntry, similarity: Option<u8>, outcome: MatchOutcome) -> Self {
        Self {
            room_id: row.room_id.clone(),
            matched_rid: row.rid.clone(),
            original_name: row.channel_room_en_name.clone(),
            matched_en_name: row.en_name.clone(),
            similarity,
            outcome,
        }
    }
}
