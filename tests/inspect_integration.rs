use std::path::Path;
use std::process::{Command, Output};
use tile_meta::record::DRAW_OBJ_C0;
use tile_meta::{MetaTable, MetaUpdate};

fn inspect(path: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_meta_inspect"))
        .arg("--input")
        .arg(path)
        .args(extra)
        .output()
        .unwrap()
}

fn write_table(dir: &Path) -> std::path::PathBuf {
    let mut table = MetaTable::new();
    table.upsert(100, MetaUpdate { bg_color: Some([0x11, 0x22, 0x33, 0xff]), ..Default::default() });
    table.upsert(200, MetaUpdate { obj_z: Some(7), ..Default::default() });
    table.upsert(300, MetaUpdate::default());
    table.get_mut(200).unwrap().add_flags(DRAW_OBJ_C0);
    let path = dir.join("tiles.meta");
    std::fs::write(&path, table.to_bytes().unwrap()).unwrap();
    path
}

#[test]
fn lists_count_and_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(dir.path());
    let out = inspect(&path, &[]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "version 0_1_0 | 3 records | 134 bytes");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].contains("bg=#112233ff"));
    assert!(lines[2].contains("flags=0x00000001"));
    assert!(!stdout.contains("more"));
}

#[test]
fn top_truncates_listing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(dir.path());
    let out = inspect(&path, &["--top", "1"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "... 2 more");
}

#[test]
fn tile_lookup_hit_and_miss() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(dir.path());

    let out = inspect(&path, &["--tile", "200"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("   1: tile=       200"));
    assert!(stdout.contains("z=[0 0 0 7 0]"));

    let out = inspect(&path, &["--tile", "999"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no meta for tile 999"));
}

#[test]
fn rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_table(dir.path());
    let mut bytes = std::fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 1);
    std::fs::write(&path, &bytes).unwrap();
    let out = inspect(&path, &[]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("expected 134"));
}
