//! 要確認行の判定
//!
//! 出力側（Excelのハイライト等）が使う判定ロジック。書式には依存しない。

use crate::matcher::Threshold;
use crate::types::MatchRecord;
use crate::validator::leading_number;

/// 行ごとの確認フラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewFlags {
    /// 照合に採用されなかった（棄却・閾値未満・候補なし）、照合IDが空、スコアなし、または閾値未満
    pub needs_review: bool,
    /// チャネル名と照合名の先頭数字列が食い違う
    pub number_mismatch: bool,
}

/// 照合結果を判定する
pub fn assess(record: &MatchRecord, threshold: Threshold) -> ReviewFlags {
    let needs_review = !record.outcome.is_matched()
        || record.matched_rid.trim().is_empty()
        || record
            .similarity
            .map_or(true, |score| !threshold.accepts(score));

    let number_mismatch = matches!(
        (
            leading_number(&record.original_name),
            leading_number(&record.matched_en_name),
        ),
        (Some(a), Some(b)) if a != b
    );

    ReviewFlags {
        needs_review,
        number_mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::run_batch;
    use crate::matcher::MatchConfig;
    use crate::types::{MatchOutcome, RawEntry};
    use crate::validator::{Rejection, SpecialRules};

    fn record(rid: &str, original: &str, matched: &str, similarity: Option<u8>) -> MatchRecord {
        MatchRecord {
            room_id: "1".to_string(),
            matched_rid: rid.to_string(),
            original_name: original.to_string(),
            matched_en_name: matched.to_string(),
            similarity,
            outcome: MatchOutcome::Matched,
        }
    }

    #[test]
    fn test_confident_match_needs_no_review() {
        let flags = assess(&record("10", "Room 101", "Room 101", Some(95)), Threshold::default());
        assert_eq!(flags, ReviewFlags::default());
    }

    #[test]
    fn test_below_threshold_needs_review() {
        let flags = assess(&record("10", "A", "B", Some(79)), Threshold::default());
        assert!(flags.needs_review);
        assert!(!flags.number_mismatch);
    }

    #[test]
    fn test_rejected_with_high_score_needs_review() {
        // 棄却された候補のスコアが閾値以上でも自己参照のままなので要確認
        let mut rejected = record("11", "Room 101", "Own Name", Some(86));
        rejected.outcome = MatchOutcome::Rejected(Rejection::NumberMismatch {
            original: "101".to_string(),
            candidate: "201".to_string(),
        });
        let flags = assess(&rejected, Threshold::default());
        assert!(flags.needs_review);
        assert!(!flags.number_mismatch);

        let mut below = record("11", "Suite", "Suite", Some(80));
        below.outcome = MatchOutcome::BelowThreshold;
        assert!(assess(&below, Threshold::default()).needs_review);
    }

    #[test]
    fn test_rejected_row_from_batch_needs_review() {
        let rows = vec![
            RawEntry {
                room_id: "1".to_string(),
                rid: "10".to_string(),
                en_name: "Room 201".to_string(),
                channel_room_en_name: "Room 201".to_string(),
            },
            RawEntry {
                room_id: "2".to_string(),
                rid: "11".to_string(),
                en_name: "Own Name".to_string(),
                channel_room_en_name: "Room 101".to_string(),
            },
        ];
        let config = MatchConfig {
            special_rules: SpecialRules::empty(),
            ..MatchConfig::default()
        };

        let records = run_batch(&rows, &config);
        assert!(matches!(records[1].outcome, MatchOutcome::Rejected(_)));
        assert_eq!(records[1].matched_rid, "11");
        assert!(records[1].similarity.is_some_and(|s| config.threshold.accepts(s)));
        assert!(assess(&records[1], config.threshold).needs_review);
        assert!(!assess(&records[0], config.threshold).needs_review);
    }

    #[test]
    fn test_missing_rid_or_score_needs_review() {
        assert!(assess(&record("", "A", "A", Some(100)), Threshold::default()).needs_review);
        assert!(assess(&record("10", "A", "A", None), Threshold::new(0).unwrap()).needs_review);
    }

    #[test]
    fn test_number_mismatch_flag() {
        let flags = assess(&record("10", "Room 101", "Room 201", Some(50)), Threshold::default());
        assert!(flags.needs_review);
        assert!(flags.number_mismatch);

        let flags = assess(&record("10", "Room 101", "Suite", Some(50)), Threshold::default());
        assert!(!flags.number_mismatch);
    }
}
