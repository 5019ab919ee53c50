//! 房型名の正規化
//!
//! 英数字以外の連続を区切りとして取り除き、小文字化して連結する。

/// 比較用に正規化する
///
/// 小文字化してから英数字のみを残す。小文字化で結合文字が生じても
/// 後段のフィルタで除かれるため、結果は冪等になる。
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
