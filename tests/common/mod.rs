#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use contigcall::SequenceRecord;

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("CONTIGCALL_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set CONTIGCALL_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

pub fn record(name: &str, sequence: &str) -> SequenceRecord {
    SequenceRecord::new(name, sequence.as_bytes().to_vec())
}

/// Aligner stand-in that replays encodings keyed by (target, query) name.
pub fn scripted_aligner(
    targets: &[SequenceRecord],
    queries: &[SequenceRecord],
    script: &[(&str, &str, &str)],
) -> impl FnMut(&[u8], &[u8]) -> String {
    let mut table = Vec::new();
    for &(target, query, cigar) in script {
        let t = targets.iter().find(|r| &*r.name == target).expect("scripted target");
        let q = queries.iter().find(|r| &*r.name == query).expect("scripted query");
        table.push((t.sequence.clone(), q.sequence.clone(), cigar.to_string()));
    }
    move |target: &[u8], query: &[u8]| {
        table
            .iter()
            .find(|(t, q, _)| &t[..] == target && &q[..] == query)
            .map(|(_, _, cigar)| cigar.clone())
            .expect("pair missing from alignment script")
    }
}
