use chrono::{Local, TimeZone};

use storage_copilot::export::{ExportError, export_filename, write_export};

#[test]
fn writes_timestamped_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let at = Local.with_ymd_and_hms(2025, 11, 30, 23, 59, 1).unwrap();

    let path = write_export(dir.path(), "# RCA\nRoot cause: failed SFP", at).unwrap();
    assert_eq!(path, dir.path().join("storage_20251130_235901.txt"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "# RCA\nRoot cause: failed SFP"
    );
}

#[test]
fn filename_is_sortable() {
    let earlier = export_filename(Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
    let later = export_filename(Local.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap());
    assert!(earlier < later);
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = write_export(&missing, "text", Local::now()).unwrap_err();
    assert!(matches!(err, ExportError::Io { .. }));
    assert!(err.to_string().contains("nope"));
}
