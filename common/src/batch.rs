//! バッチ照合
//!
//! 参照セットを一度だけ構築し、全行を入力順に照合する。

use crate::matcher::{match_row, MatchConfig};
use crate::scorer::ReferencePool;
use crate::types::{MatchRecord, RawEntry};

/// 全行を照合する（入力順を保持、行は落とさない）
pub fn run_batch(rows: &[RawEntry], config: &MatchConfig) -> Vec<MatchRecord> {
    let pool = ReferencePool::from_rows(rows);
    run_batch_with_pool(rows, &pool, config)
}

/// 構築済みの参照セットで全行を照合する
pub fn run_batch_with_pool(
    rows: &[RawEntry],
    pool: &ReferencePool,
    config: &MatchConfig,
) -> Vec<MatchRecord> {
    rows.iter().map(|row| match_row(row, pool, config)).collect()
}
