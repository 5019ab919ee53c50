//! CSV → Excel 変換
//!
//! UTF-8で読めなければWindows-1252として読み込み、不正な行はスキップする。
//! 数値として解釈できるセルは数値で書き込む。

use crate::error::{Result, RoomatcherError};
use crate::input::{read_csv_table, read_file_as_utf8};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// 区切り文字を1バイトに変換（`\t` も受け付ける）
pub fn parse_separator(separator: &str) -> Result<u8> {
    match separator {
        "\\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => Err(RoomatcherError::InvalidSeparator(s.to_string())),
    }
}

/// 既定の出力先（拡張子を .xlsx に変更）
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("xlsx")
}

/// 変換結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub rows: usize,
    pub columns: usize,
}

/// CSVファイルをExcelに変換する
pub fn convert_csv_to_excel(input: &Path, output: &Path, separator: u8) -> Result<ConvertSummary> {
    if !input.exists() {
        return Err(RoomatcherError::FileNotFound(input.display().to_string()));
    }

    let content = read_file_as_utf8(input)?;
    let table = read_csv_table(&content, separator)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let mut columns = 0;

    for (r, row) in table.iter().enumerate() {
        columns = columns.max(row.len());
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            // ヘッダー行は常に文字列
            let written = match value.trim().parse::<f64>() {
                Ok(n) if r > 0 && n.is_finite() && !has_leading_zero(value.trim()) => {
                    worksheet.write_number(r as u32, c as u16, n)
                }
                _ => worksheet.write_string(r as u32, c as u16, value),
            };
            written.map_err(|e| {
                RoomatcherError::ExcelGeneration(format!("{}行{}列: {}", r + 1, c + 1, e))
            })?;
        }
    }

    workbook
        .save(output)
        .map_err(|e| RoomatcherError::ExcelGeneration(format!("保存エラー: {}", e)))?;

    Ok(ConvertSummary {
        rows: table.len(),
        columns,
    })
}

/// "007" のようなゼロ埋めはIDとして文字列のまま残す
fn has_leading_zero(s: &str) -> bool {
    let digits = s.trim_start_matches(['-', '+']);
    digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.")
}
