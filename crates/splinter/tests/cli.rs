//! Runs the `splinter` binary against temporary files.

use std::path::Path;
use std::process::{Command, Output};

fn splinter(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_splinter"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_encode_writes_shard_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hello.txt");
    std::fs::write(&input, b"hello!").unwrap();

    let out = splinter(&["encode", path_str(&input)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let expected: [&[u8]; 4] = [b"he", b"ll", b"o!", b"\0\0"];
    for (i, want) in expected.iter().enumerate() {
        let got = std::fs::read(dir.path().join(format!("hello.txt.{i}"))).unwrap();
        assert_eq!(&got, want);
    }
    for i in 4..6 {
        let parity = std::fs::read(dir.path().join(format!("hello.txt.{i}"))).unwrap();
        assert_eq!(parity.len(), 2);
    }
    assert!(!dir.path().join("hello.txt.6").exists());
}

#[test]
fn test_encode_to_out_dir_with_native_backend() {
    let src = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let input = src.path().join("blob.bin");
    std::fs::write(&input, vec![0xAB; 10_000]).unwrap();

    let out = splinter(&[
        "encode",
        path_str(&input),
        "--data",
        "5",
        "--parity",
        "3",
        "--shard-size",
        "2000",
        "--backend",
        "native",
        "--out",
        path_str(out_dir.path()),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    for i in 0..8 {
        let shard = std::fs::read(out_dir.path().join(format!("blob.bin.{i}"))).unwrap();
        assert_eq!(shard.len(), 2000);
    }
    assert!(!src.path().join("blob.bin.0").exists());
}

#[test]
fn test_single_byte_file_with_native_backend() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("one");
    std::fs::write(&input, b"z").unwrap();

    let out = splinter(&["encode", path_str(&input), "--backend", "native"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    assert_eq!(std::fs::read(dir.path().join("one.0")).unwrap(), b"z");
    for i in 1..6 {
        let shard = std::fs::read(dir.path().join(format!("one.{i}"))).unwrap();
        assert_eq!(shard.len(), 1);
    }
}

#[test]
fn test_config_file_sets_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("splinter.toml");
    std::fs::write(&config, "[erasure]\ndata = 2\nparity = 1\nshard_size = 4\n").unwrap();
    let input = dir.path().join("abc");
    std::fs::write(&input, b"abcdefgh").unwrap();

    let out = splinter(&["-c", path_str(&config), "encode", path_str(&input)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    assert_eq!(std::fs::read(dir.path().join("abc.0")).unwrap(), b"abcd");
    assert_eq!(std::fs::read(dir.path().join("abc.1")).unwrap(), b"efgh");
    assert!(dir.path().join("abc.2").exists());
    assert!(!dir.path().join("abc.3").exists());
}

#[test]
fn test_too_many_shards_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("f");
    std::fs::write(&input, b"data").unwrap();

    let out = splinter(&["encode", path_str(&input), "-d", "200", "-p", "57"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("Error: "));
    assert!(!dir.path().join("f.0").exists());
}

#[test]
fn test_missing_input_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let out = splinter(&["encode", path_str(&dir.path().join("missing"))]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to read"));
}
