pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use roomatcher_common::{MatchRecord, Threshold};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 出力列（この順序で出力する）
pub const OUTPUT_COLUMNS: &[&str] = &[
    "room_id",
    "rid",
    "channel_room_en_name",
    "matched_en_name",
    "similarity",
    "match_status",
];

/// 入力ファイルから既定の出力パスを作る（`<stem>_result.<ext>`）
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "roomatcher".to_string());
    parent.join(format!("{}_result.{}", stem, extension))
}

fn output_path_for_format(output: Option<&Path>, input: &Path, extension: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => {
            let name = default_output_path(input, extension);
            path.join(name.file_name().unwrap_or_default())
        }
        Some(path) => path.to_path_buf(),
        None => default_output_path(input, extension),
    }
}

/// 照合結果を指定形式で保存し、保存先を返す
pub fn export_records(
    records: &[MatchRecord],
    format: &ExportFormat,
    input: &Path,
    output: Option<&Path>,
    threshold: Threshold,
) -> Result<PathBuf> {
    let path = output_path_for_format(output, input, format.extension());
    match format {
        ExportFormat::Excel => excel::write_report(records, threshold, &path)?,
        ExportFormat::Csv => write_csv(records, &path)?,
        ExportFormat::Json => write_json(records, &path)?,
    }
    Ok(path)
}

/// 出力行（列順は OUTPUT_COLUMNS と同じ）
#[derive(Serialize)]
struct OutputRow<'a> {
    room_id: &'a str,
    rid: &'a str,
    channel_room_en_name: &'a str,
    matched_en_name: &'a str,
    similarity: Option<u8>,
    match_status: &'static str,
}

impl<'a> From<&'a MatchRecord> for OutputRow<'a> {
    fn from(record: &'a MatchRecord) -> Self {
        Self {
            room_id: &record.room_id,
            rid: &record.matched_rid,
            channel_room_en_name: &record.original_name,
            matched_en_name: &record.matched_en_name,
            similarity: record.similarity,
            match_status: record.outcome.label(),
        }
    }
}

/// CSVで保存（候補なしのスコアは空欄）
pub fn write_csv(records: &[MatchRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        writer.write_record(OUTPUT_COLUMNS)?;
    }
    for record in records {
        writer.serialize(OutputRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// JSONで保存（棄却理由を含む完全な結果）
pub fn write_json(records: &[MatchRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
