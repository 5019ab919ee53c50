//! Roomatcher Common Library
//!
//! 房型照合のコアロジック。スプレッドシートやUIには依存しない。
//!
//! ## 処理フロー
//! 1. 書き換えルール適用（rewrite）
//! 2. 正規化（normalize）
//! 3. 類似度で上位候補を抽出（scorer）
//! 4. 特殊ルール検証（validator）
//! 5. 照合結果の生成（matcher / batch）

pub mod types;
pub mod error;
pub mod normalize;
pub mod rewrite;
pub mod scorer;
pub mod validator;
pub mod matcher;
pub mod batch;
pub mod review;

pub use types::{MatchOutcome, MatchRecord, RawEntry, ReferenceEntry};
pub use error::{Error, Result};
pub use normalize::normalize;
pub use rewrite::{rewrite, RewriteRule, RuleSet};
pub use scorer::{top_candidates, token_sort_ratio, Candidate, ReferencePool};
pub use validator::{accepts, leading_number, validate, Rejection, SpecialRules};
pub use matcher::{match_row, MatchConfig, Threshold, DEFAULT_CANDIDATE_LIMIT};
pub use batch::run_batch;
pub use review::{assess, ReviewFlags};
