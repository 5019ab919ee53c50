//! Excel出力
//!
//! 要確認行（未採用・照合IDなし・スコアなし・閾値未満）を黄色で塗り、
//! 先頭の数字列が食い違う場合はチャネル名と照合名を赤字にする。

use super::OUTPUT_COLUMNS;
use crate::error::{Result, RoomatcherError};
use roomatcher_common::{assess, MatchRecord, ReviewFlags, Threshold};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet, XlsxError};
use std::path::Path;

const REVIEW_FILL: u32 = 0xFFFF00;
const MISMATCH_FONT: u32 = 0xFF0000;

/// 列幅（文字数）
const COLUMN_WIDTHS: &[f64] = &[12.0, 12.0, 40.0, 40.0, 10.0, 16.0];

/// 行の強調方法
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RowStyle {
    /// 全列を黄色で塗る
    fill: bool,
    /// C/D列を赤字にする
    red_names: bool,
}

fn row_style(flags: ReviewFlags) -> RowStyle {
    RowStyle {
        fill: flags.needs_review,
        red_names: flags.number_mismatch,
    }
}

/// 行ごとのセル書式
struct RowFormats {
    plain: Format,
    review: Format,
    review_mismatch: Format,
    mismatch: Format,
}

impl RowFormats {
    fn new() -> Self {
        let review = Format::new()
            .set_background_color(Color::RGB(REVIEW_FILL))
            .set_pattern(FormatPattern::Solid);
        Self {
            plain: Format::new(),
            review_mismatch: review.clone().set_font_color(Color::RGB(MISMATCH_FONT)),
            review,
            mismatch: Format::new().set_font_color(Color::RGB(MISMATCH_FONT)),
        }
    }

    /// (A/B/E/F列の書式, C/D列の書式)
    fn select(&self, style: RowStyle) -> (&Format, &Format) {
        let base = if style.fill { &self.review } else { &self.plain };
        let names = match (style.fill, style.red_names) {
            (true, true) => &self.review_mismatch,
            (false, true) => &self.mismatch,
            (true, false) => &self.review,
            (false, false) => &self.plain,
        };
        (base, names)
    }
}

/// 照合結果をExcelに保存
pub fn write_report(records: &[MatchRecord], threshold: Threshold, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    fill_worksheet(worksheet, records, threshold)
        .map_err(|e| RoomatcherError::ExcelGeneration(format!("シート書き込みエラー: {}", e)))?;

    workbook
        .save(path)
        .map_err(|e| RoomatcherError::ExcelGeneration(format!("保存エラー: {}", e)))?;
    Ok(())
}

fn fill_worksheet(
    worksheet: &mut Worksheet,
    records: &[MatchRecord],
    threshold: Threshold,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name("result")?;

    let header = Format::new().set_bold();
    for (col, name) in OUTPUT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
        if let Some(width) = COLUMN_WIDTHS.get(col) {
            worksheet.set_column_width(col as u16, *width)?;
        }
    }
    worksheet.set_freeze_panes(1, 0)?;

    let formats = RowFormats::new();

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        let (base, name_format) = formats.select(row_style(assess(record, threshold)));

        worksheet.write_string_with_format(row, 0, &record.room_id, base)?;
        worksheet.write_string_with_format(row, 1, &record.matched_rid, base)?;
        worksheet.write_string_with_format(row, 2, &record.original_name, name_format)?;
        worksheet.write_string_with_format(row, 3, &record.matched_en_name, name_format)?;
        match record.similarity {
            Some(score) => {
                worksheet.write_number_with_format(row, 4, score as f64, base)?;
            }
            None => {
                worksheet.write_blank(row, 4, base)?;
            }
        }
        worksheet.write_string_with_format(row, 5, record.outcome.label(), base)?;
    }

    Ok(())
}
