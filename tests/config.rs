// パス: tests/config.rs
// 役割: ランタイム名設定ファイルの読み込みを検証
// 意図: 部分上書き・既定値・不正な設定の扱いが回帰しないようにする
// 関連ファイル: src/namer.rs, src/errors.rs, src/bin/intrinsify.rs
use std::io::Write;

use intrinsify::namer::{CollectionKind, KeyClass};
use intrinsify::{ConfigError, RuntimeNames};

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
/// ファイルから読み込んだ名前は上書き分だけ変わり、残りは既定値。
fn load_overrides_selected_names() {
    let file = write_temp(r#"{"primitive_hash_map": "FastMap", "complex_hash_set": "IdentitySet"}"#);
    let names = RuntimeNames::load(file.path()).expect("load names");
    assert_eq!(names.hash_collection(CollectionKind::Map, KeyClass::Primitive), "FastMap");
    assert_eq!(names.hash_collection(CollectionKind::Set, KeyClass::Complex), "IdentitySet");
    assert_eq!(names.hash_collection(CollectionKind::Map, KeyClass::Complex), "ComplexHashMap");
    assert_eq!(names.runtime_object, "Kotlin");
}

#[test]
/// 壊れた JSON は JSON エラーとして報告される。
fn malformed_json_is_reported() {
    let file = write_temp("{ not json");
    let err = RuntimeNames::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("[CONFIG003]"));
}

#[test]
/// 存在しないファイルは IO エラー。
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = RuntimeNames::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.to_string().starts_with("[CONFIG002]"));
}

#[test]
/// 標準出力パスを空にする設定は拒否される。
fn empty_system_out_is_rejected() {
    let err = RuntimeNames::from_json_str(r#"{"system_out": []}"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyName { field: "system_out" }));
}

#[test]
/// 既定値は JSON を経由しても変わらない。
fn defaults_survive_serialization() {
    let json = serde_json::to_string(&RuntimeNames::default()).expect("serialize");
    assert_eq!(RuntimeNames::from_json_str(&json).expect("parse"), RuntimeNames::default());
}
