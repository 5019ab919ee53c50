//! 照合パイプライン
//!
//! 参照セットを一度だけ構築し、行単位で並列に照合する。
//! 結果は入力順に並ぶ。

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use roomatcher_common::batch::run_batch_with_pool;
use roomatcher_common::{match_row, MatchConfig, MatchOutcome, MatchRecord, RawEntry, ReferencePool};

/// 実行オプション
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// 単一スレッドで処理する
    pub sequential: bool,
    /// 進捗バーを表示する
    pub show_progress: bool,
}

/// 照合結果の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub below_threshold: usize,
    pub rejected: usize,
    pub no_candidates: usize,
    /// 参照セットの件数
    pub reference_count: usize,
}

impl BatchSummary {
    fn from_records(records: &[MatchRecord], reference_count: usize) -> Self {
        let mut summary = Self {
            total: records.len(),
            reference_count,
            ..Default::default()
        };
        for record in records {
            match record.outcome {
                MatchOutcome::Matched => summary.matched += 1,
                MatchOutcome::BelowThreshold => summary.below_threshold += 1,
                MatchOutcome::Rejected(_) => summary.rejected += 1,
                MatchOutcome::NoCandidates => summary.no_candidates += 1,
            }
        }
        summary
    }

    /// 要確認の行数
    pub fn unmatched(&self) -> usize {
        self.total - self.matched
    }
}

/// 全行を照合する
pub fn run(
    rows: &[RawEntry],
    config: &MatchConfig,
    options: RunOptions,
) -> (Vec<MatchRecord>, BatchSummary) {
    let pool = ReferencePool::from_rows(rows);

    let records = if options.sequential {
        run_batch_with_pool(rows, &pool, config)
    } else {
        let progress = progress_bar(rows.len() as u64, options.show_progress);
        let records: Vec<MatchRecord> = rows
            .par_iter()
            .map(|row| {
                let record = match_row(row, &pool, config);
                progress.inc(1);
                record
            })
            .collect();
        progress.finish_and_clear();
        records
    };

    let summary = BatchSummary::from_records(&records, pool.len());
    tracing::info!(
        "照合完了: {}行 (一致 {}, 閾値未満 {}, 特殊ルール棄却 {}, 候補なし {})",
        summary.total,
        summary.matched,
        summary.below_threshold,
        summary.rejected,
        summary.no_candidates
    );
    (records, summary)
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("  [{bar:40}] {pos}/{len} ({eta})") {
        bar.set_style(style.progress_chars("=>-"));
    }
    bar
}
