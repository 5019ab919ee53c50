//! 入力カタログの読み込み
//!
//! xlsx/xls/ods は calamine、csv は csv クレートで読み込み、
//! ヘッダー行の列名から必要な列を特定する。

use crate::error::{Result, RoomatcherError};
use calamine::{open_workbook_auto, Data, Reader};
use roomatcher_common::RawEntry;
use std::path::Path;

/// 必須列
pub const REQUIRED_COLUMNS: &[&str] = &["room_id", "rid", "en_name", "channel_room_en_name"];

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 文字列化したセルの表（1行目がヘッダー）
pub type Table = Vec<Vec<String>>;

/// カタログファイルを読み込む（全セルが空の行は除外）
pub fn read_catalog(path: &Path) -> Result<Vec<RawEntry>> {
    let table = read_table(path)?;
    catalog_from_table(&table)
}

/// ファイル形式に応じて表を読み込む
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(RoomatcherError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        let content = read_file_as_utf8(path)?;
        read_csv_table(&content, b',')
    } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        read_spreadsheet_table(path)
    } else {
        Err(RoomatcherError::UnsupportedFormat(path.display().to_string()))
    }
}

/// 先頭のワークシートを読み込む
fn read_spreadsheet_table(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| RoomatcherError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RoomatcherError::EmptyWorkbook(path.display().to_string()))?
        .map_err(|e| RoomatcherError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// セルを文字列化（整数値の小数は付けない）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// ファイルを読み込み、UTF-8でなければWindows-1252として解釈する
pub fn read_file_as_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            tracing::debug!("UTF-8ではないためWindows-1252で読み込み: {}", path.display());
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// CSV文字列を表に変換する（不正な行はスキップ）
pub fn read_csv_table(content: &str, delimiter: u8) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut table = Vec::new();
    for (line, record) in reader.records().enumerate() {
        match record {
            Ok(record) => table.push(record.iter().map(str::to_string).collect()),
            Err(e) => tracing::warn!("CSV {}行目をスキップ: {}", line + 1, e),
        }
    }
    Ok(table)
}

/// 表から入力行を組み立てる
pub fn catalog_from_table(table: &[Vec<String>]) -> Result<Vec<RawEntry>> {
    let Some((header, body)) = table.split_first() else {
        return Err(missing_columns(REQUIRED_COLUMNS.iter().copied()));
    };

    let position = |name: &str| {
        header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| position(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(missing_columns(missing.into_iter()));
    }

    // 上で存在を確認済み
    let column = |name: &str| position(name).unwrap_or_default();
    let (room_id, rid, en_name, channel) = (
        column("room_id"),
        column("rid"),
        column("en_name"),
        column("channel_room_en_name"),
    );

    let cell = |row: &[String], index: usize| {
        row.get(index).map(|s| s.trim().to_string()).unwrap_or_default()
    };

    let entries: Vec<RawEntry> = body
        .iter()
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .map(|row| RawEntry {
            room_id: cell(row, room_id),
            rid: cell(row, rid),
            en_name: cell(row, en_name),
            channel_room_en_name: cell(row, channel),
        })
        .collect();

    tracing::info!("{}行を読み込み（空行 {}行を除外）", entries.len(), body.len() - entries.len());
    Ok(entries)
}

fn missing_columns<'a>(names: impl Iterator<Item = &'a str>) -> RoomatcherError {
    roomatcher_common::Error::MissingColumns(names.map(str::to_string).collect()).into()
}
