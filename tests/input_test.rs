//! 入力読み込みの統合テスト
//!
//! rust_xlsxwriter で作成したブックを calamine で読み込む

use roomatcher::error::RoomatcherError;
use roomatcher::input;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

fn write_workbook(path: &Path, rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            match value.parse::<f64>() {
                Ok(n) => worksheet.write_number(r as u32, c as u16, n).unwrap(),
                Err(_) => worksheet.write_string(r as u32, c as u16, *value).unwrap(),
            };
        }
    }
    workbook.save(path).expect("ブック保存失敗");
}

#[test]
fn test_read_xlsx_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rooms.xlsx");
    write_workbook(
        &path,
        &[
            vec!["room_id", "rid", "en_name", "channel_room_en_name"],
            vec!["1", "10", "Deluxe King Room", "Deluxe King Rm"],
            vec!["", "", "", ""],
            vec!["2", "11", "Superior Twin Room", "Sup Twin"],
        ],
    );

    let rows = input::read_catalog(&path).expect("読み込み失敗");
    assert_eq!(rows.len(), 2);
    // 数値セルは小数なしで文字列化
    assert_eq!(rows[0].room_id, "1");
    assert_eq!(rows[0].rid, "10");
    assert_eq!(rows[1].channel_room_en_name, "Sup Twin");
}

#[test]
fn test_read_xlsx_missing_columns() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("bad.xlsx");
    write_workbook(&path, &[vec!["room_id", "name"], vec!["1", "Twin"]]);

    let err = input::read_catalog(&path).unwrap_err();
    assert!(matches!(
        err,
        RoomatcherError::Common(roomatcher_common::Error::MissingColumns(_))
    ));
}

#[test]
fn test_read_xlsx_only_header() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("header.xlsx");
    write_workbook(
        &path,
        &[vec!["room_id", "rid", "en_name", "channel_room_en_name"]],
    );

    let rows = input::read_catalog(&path).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_read_csv_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rooms.csv");
    std::fs::write(
        &path,
        "\u{feff}room_id,rid,en_name,channel_room_en_name\n1,10,\"Deluxe King Room\",\"Deluxe, King\"\n,,,\n",
    )
    .unwrap();

    let rows = input::read_catalog(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].channel_room_en_name, "Deluxe, King");
}

#[test]
fn test_read_csv_windows_1252() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("latin.csv");
    let mut bytes = b"room_id,rid,en_name,channel_room_en_name\n1,10,Caf".to_vec();
    bytes.push(0xE9); // é (Windows-1252)
    bytes.extend_from_slice(b" Suite,Cafe Suite\n");
    std::fs::write(&path, bytes).unwrap();

    let rows = input::read_catalog(&path).unwrap();
    assert_eq!(rows[0].en_name, "Café Suite");
}

#[test]
fn test_read_missing_file() {
    let err = input::read_catalog(Path::new("/nonexistent/rooms.xlsx")).unwrap_err();
    assert!(matches!(err, RoomatcherError::FileNotFound(_)));
}

#[test]
fn test_read_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rooms.txt");
    std::fs::write(&path, "room_id").unwrap();

    let err = input::read_catalog(&path).unwrap_err();
    assert!(matches!(err, RoomatcherError::UnsupportedFormat(_)));
}
