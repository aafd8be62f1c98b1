use std::fs;
use std::path::PathBuf;

use gsi_proto::{decode_snapshot, Snapshot};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = fixture_path(name);
    fs::read(&path).unwrap_or_else(|err| panic!("missing fixture {}: {err}", path.display()))
}

#[allow(dead_code)]
pub fn decode_fixture(name: &str) -> Snapshot {
    decode_snapshot(&fixture_bytes(name))
        .unwrap_or_else(|err| panic!("fixture {name} should decode: {err}"))
}
