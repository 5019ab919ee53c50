//! 1行単位の照合
//!
//! 書き換え → 正規化 → 上位候補抽出 → 閾値・特殊ルール判定 の順に処理し、
//! 必ず1件の MatchRecord を返す。

use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::rewrite::RuleSet;
use crate::scorer::{top_candidates, ReferencePool};
use crate::types::{MatchOutcome, MatchRecord, RawEntry};
use crate::validator::{validate, SpecialRules};
use serde::{Deserialize, Serialize};

/// バッチで評価する候補数の既定値
pub const DEFAULT_CANDIDATE_LIMIT: usize = 5;

/// 類似度の閾値（0-100）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const MAX: u8 = 100;

    pub fn new(value: i64) -> Result<Self> {
        if (0..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(Error::InvalidThreshold(value.to_string()))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// スコアが閾値を満たすか
    pub fn accepts(self, score: u8) -> bool {
        score >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(80)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for u8 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

impl std::str::FromStr for Threshold {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidThreshold(s.to_string()))?;
        Self::new(value)
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 照合設定（バッチ実行前に組み立て、実行中は変更しない）
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub threshold: Threshold,
    pub rewrite_rules: RuleSet,
    pub special_rules: SpecialRules,
    pub candidate_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            rewrite_rules: RuleSet::default(),
            special_rules: SpecialRules::default(),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

/// 1行を照合する
pub fn match_row(row: &RawEntry, pool: &ReferencePool, config: &MatchConfig) -> MatchRecord {
    let original_name = row.channel_room_en_name.as_str();
    let modified = normalize(&config.rewrite_rules.apply(original_name));

    let candidates = top_candidates(&modified, pool, config.candidate_limit);
    let mut first_rejection = None;

    for candidate in &candidates {
        if !config.threshold.accepts(candidate.score) {
            // 降順なので以降も閾値未満
            break;
        }
        let Some(entry) = pool.get(candidate.index) else {
            continue;
        };

        match validate(original_name, &entry.en_name, &config.special_rules) {
            Ok(()) => {
                return MatchRecord {
                    room_id: row.room_id.clone(),
                    matched_rid: entry.rid.clone(),
                    original_name: original_name.to_string(),
                    matched_en_name: entry.en_name.clone(),
                    similarity: Some(candidate.score),
                    outcome: MatchOutcome::Matched,
                };
            }
            Err(reason) => {
                tracing::trace!(
                    "候補棄却: {:?} -> {:?} ({})",
                    original_name,
                    entry.en_name,
                    reason
                );
                first_rejection.get_or_insert(reason);
            }
        }
    }

    let best = candidates.first().map(|c| c.score);
    let outcome = match (best, first_rejection) {
        (None, _) => MatchOutcome::NoCandidates,
        (Some(_), Some(reason)) => MatchOutcome::Rejected(reason),
        (Some(_), None) => MatchOutcome::BelowThreshold,
    };

    tracing::debug!(
        "照合なし: room_id={} {:?} best={:?} ({})",
        row.room_id,
        original_name,
        best,
        outcome
    );
    MatchRecord::fallback(row, best, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::RewriteRule;
    use crate::validator::Rejection;

    fn row(room_id: &str, rid: &str, en_name: &str, channel: &str) -> RawEntry {
        RawEntry {
            room_id: room_id.to_string(),
            rid: rid.to_string(),
            en_name: en_name.to_string(),
            channel_room_en_name: channel.to_string(),
        }
    }

    fn config(threshold: i64) -> MatchConfig {
        MatchConfig {
            threshold: Threshold::new(threshold).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_threshold_range() {
        assert!(Threshold::new(0).is_ok());
        assert!(Threshold::new(100).is_ok());
        assert!(Threshold::new(-1).is_err());
        assert!(Threshold::new(101).is_err());
        assert!("abc".parse::<Threshold>().is_err());
        assert_eq!(" 75 ".parse::<Threshold>().unwrap().value(), 75);
    }

    #[test]
    fn test_threshold_deserialize_validates() {
        let ok: Threshold = serde_json::from_str("70").unwrap();
        assert_eq!(ok.value(), 70);
        assert!(serde_json::from_str::<Threshold>("150").is_err());
    }

    #[test]
    fn test_match_row_accepts_best_candidate() {
        let rows = vec![
            row("1", "10", "Deluxe King Room", "Deluxe King Rm"),
            row("2", "20", "Deluxe Twin Room", "Deluxe Twin"),
        ];
        let pool = ReferencePool::from_rows(&rows);
        let record = match_row(&rows[0], &pool, &config(70));

        assert_eq!(record.outcome, MatchOutcome::Matched);
        assert_eq!(record.matched_rid, "10");
        assert_eq!(record.matched_en_name, "Deluxe King Room");
        assert_eq!(record.original_name, "Deluxe King Rm");
        assert!(record.similarity.unwrap() >= 70);
    }

    #[test]
    fn test_match_row_skips_rejected_top_candidate() {
        // 最上位は "twin" のキーワードで棄却され、次点が採用される
        let rows = vec![
            row("1", "10", "Superior Twin Room", "a"),
            row("2", "20", "Superior Room City View", "b"),
        ];
        let pool = ReferencePool::from_rows(&rows);
        let probe = row("3", "99", "Unknown", "Superior Room");
        let record = match_row(&probe, &pool, &config(50));

        assert_eq!(record.outcome, MatchOutcome::Matched);
        assert_eq!(record.matched_rid, "20");
    }

    #[test]
    fn test_match_row_skips_number_mismatch() {
        let rows = vec![
            row("1", "10", "Room 102", "a"),
            row("2", "20", "Room 101 Garden", "b"),
        ];
        let pool = ReferencePool::from_rows(&rows);
        let probe = row("3", "99", "Unknown", "Room 101");
        let mut cfg = config(50);
        cfg.special_rules = SpecialRules::empty();
        let record = match_row(&probe, &pool, &cfg);

        assert_eq!(record.outcome, MatchOutcome::Matched);
        assert_eq!(record.matched_rid, "20");
        assert_eq!(record.matched_en_name, "Room 101 Garden");
    }

    #[test]
    fn test_match_row_fallback_below_threshold() {
        let rows = vec![row("1", "10", "Deluxe King Room", "Zzyzx Qwv")];
        let pool = ReferencePool::from_rows(&rows);
        let record = match_row(&rows[0], &pool, &config(80));

        assert_eq!(record.outcome, MatchOutcome::BelowThreshold);
        assert_eq!(record.matched_rid, "10");
        assert_eq!(record.matched_en_name, "Deluxe King Room");
        assert!(record.similarity.unwrap() < 80);
    }

    #[test]
    fn test_match_row_fallback_reports_rejection() {
        let rows = vec![
            row("1", "10", "Room 201", "Room 201"),
            row("2", "11", "Own Name", "Room 101"),
        ];
        let pool = ReferencePool::from_rows(&rows);
        let mut cfg = config(80);
        cfg.special_rules = SpecialRules::empty();
        let record = match_row(&rows[1], &pool, &cfg);

        assert_eq!(record.matched_rid, "11");
        assert_eq!(
            record.outcome,
            MatchOutcome::Rejected(Rejection::NumberMismatch {
                original: "101".to_string(),
                candidate: "201".to_string(),
            })
        );
        // 棄却された候補でもスコアは報告する
        assert!(record.similarity.unwrap() >= 80);
    }

    #[test]
    fn test_match_row_empty_pool() {
        let pool = ReferencePool::default();
        let probe = row("1", "10", "Deluxe", "Deluxe");
        let record = match_row(&probe, &pool, &config(0));

        assert_eq!(record.outcome, MatchOutcome::NoCandidates);
        assert_eq!(record.similarity, None);
        assert_eq!(record.matched_rid, "10");
    }

    #[test]
    fn test_match_row_applies_rewrite_rules() {
        let rows = vec![
            row("1", "10", "Deluxe King Room", "x"),
            row("2", "20", "Standard Room", "y"),
        ];
        let pool = ReferencePool::from_rows(&rows);
        let probe = row("3", "99", "Unknown", "DLX KNG");

        let without = match_row(&probe, &pool, &config(90));
        assert!(!without.outcome.is_matched());

        let mut cfg = config(90);
        cfg.rewrite_rules = RuleSet::compile(&[
            RewriteRule::new("DLX", "Deluxe"),
            RewriteRule::new("KNG", "King Room"),
        ])
        .unwrap();

        // 特殊ルールは書き換え前の名前で判定される（"deluxe" が元の名前にない）
        let rejected = match_row(&probe, &pool, &cfg);
        assert_eq!(
            rejected.outcome,
            MatchOutcome::Rejected(Rejection::Keyword("deluxe".to_string()))
        );
        assert_eq!(rejected.similarity, Some(100));

        cfg.special_rules = SpecialRules::empty();
        let with = match_row(&probe, &pool, &cfg);
        assert_eq!(with.outcome, MatchOutcome::Matched);
        assert_eq!(with.matched_rid, "10");
        assert_eq!(with.original_name, "DLX KNG");
    }
}
