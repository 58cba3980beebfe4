//! Round-trip tests: open, edit, save, reopen.

mod common;

use common::{build_container, build_lz11_container, open_bytes, payload, sample_data, save_to_vec};
use dslz::{CodecMethod, EntryState, WriteOptions};

#[test]
fn test_unmodified_save_reproduces_input() {
    let a = sample_data(300, 1);
    let b = sample_data(5000, 2);
    let c = sample_data(17, 3);
    let data = build_lz11_container(&[a.as_slice(), b.as_slice(), c.as_slice()]);

    let mut archive = open_bytes(data.clone());
    assert_eq!(archive.len(), 3);
    let out = save_to_vec(&mut archive, &WriteOptions::default());
    assert_eq!(out, data);
}

#[test]
fn test_unmodified_save_preserves_fill_bytes() {
    let data = build_container(
        &[payload(b"BCWV", &[1; 10]), payload(b"BCWV", &[2; 10])],
        0xFF,
    );
    let mut archive = open_bytes(data.clone());
    let out = save_to_vec(&mut archive, &WriteOptions::new().padding_byte(0));
    assert_eq!(out, data);
}

#[test]
fn test_replace_and_reopen() {
    let originals: Vec<Vec<u8>> = (0..4).map(|i| sample_data(200 + i * 50, i as u8)).collect();
    let refs: Vec<&[u8]> = originals.iter().map(Vec::as_slice).collect();
    let mut archive = open_bytes(build_lz11_container(&refs));

    let replacement = sample_data(4000, 99);
    archive.replace(2, replacement.clone()).unwrap();
    assert_eq!(archive.entries()[2].state(), EntryState::Modified);

    let out = save_to_vec(&mut archive, &WriteOptions::default());
    let mut reopened = open_bytes(out);
    assert_eq!(reopened.len(), 4);

    let codec = CodecMethod::Lz11.codec();
    for (index, original) in originals.iter().enumerate() {
        let decoded = reopened.decompress_entry(index, &*codec).unwrap();
        if index == 2 {
            assert_eq!(decoded, replacement);
        } else {
            assert_eq!(&decoded, original);
        }
    }
}

#[test]
fn test_every_entry_replaced() {
    let mut archive = open_bytes(build_lz11_container(&[b"first entry", b"second entry"]));
    archive.replace(0, b"one".repeat(40)).unwrap();
    archive.replace(1, b"two".repeat(40)).unwrap();

    let out = save_to_vec(&mut archive, &WriteOptions::default());
    let mut reopened = open_bytes(out);
    let codec = CodecMethod::Lz11.codec();
    assert_eq!(reopened.decompress_entry(0, &*codec).unwrap(), b"one".repeat(40));
    assert_eq!(reopened.decompress_entry(1, &*codec).unwrap(), b"two".repeat(40));
}

#[test]
fn test_copy_codec_writes_raw_content() {
    let mut archive = open_bytes(build_container(
        &[payload(b"AAAA", b"x"), payload(b"BBBB", b"y")],
        0,
    ));
    let raw = payload(b"TEXT", b"stored uncompressed");
    archive.replace(1, raw.clone()).unwrap();

    let out = save_to_vec(&mut archive, &WriteOptions::new().codec(CodecMethod::Copy));
    let mut reopened = open_bytes(out);
    assert_eq!(reopened.read_entry(1).unwrap(), raw);
    assert_eq!(reopened.entries()[1].file_name, "File_000001.TEXT");
}

#[test]
fn test_renamed_entries_do_not_affect_output() {
    let data = build_lz11_container(&[b"alpha alpha", b"beta beta beta"]);
    let mut archive = open_bytes(data.clone());
    archive.entry_mut(0).unwrap().file_name = "model.bcmdl".into();

    let out = save_to_vec(&mut archive, &WriteOptions::default());
    assert_eq!(out, data);
}

#[test]
fn test_save_path_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.3dslz");
    let target = dir.path().join("out.3dslz");
    let data = build_lz11_container(&[b"file on disk", b"another file on disk"]);
    std::fs::write(&source, &data).unwrap();

    let mut archive = dslz::Archive::open_path(&source).unwrap();
    let result = archive.save_path(&target).unwrap();
    assert_eq!(result.entries_written, 2);
    assert_eq!(result.bytes_written, data.len() as u64);
    assert_eq!(std::fs::read(&target).unwrap(), data);
}

#[test]
fn test_short_last_entry_reopens_with_defaults() {
    let mut archive = open_bytes(build_lz11_container(&[b"first payload", b"second payload"]));
    archive.replace(1, b"abc".to_vec()).unwrap();

    let out = save_to_vec(&mut archive, &WriteOptions::default());
    // Marker plus an 8-byte LZ11 stream: reading the record header runs past the end.
    assert_eq!(out.len(), 64 + 8 + 8);

    let mut reopened = dslz::Archive::open(std::io::Cursor::new(out)).unwrap();
    assert_eq!(reopened.len(), 2);
    let codec = CodecMethod::Lz11.codec();
    assert_eq!(reopened.decompress_entry(1, &*codec).unwrap(), b"abc");
}
