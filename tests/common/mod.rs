#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Entry modification time used when a test does not care.
pub const OLD_MTIME: u64 = 1_000_000_000;

/// Writes a `templates.tar.gz` into `dir` holding `entries` with `OLD_MTIME`.
pub fn write_archive(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    let timed: Vec<(&str, &[u8], u64)> =
        entries.iter().map(|(path, data)| (*path, *data, OLD_MTIME)).collect();
    write_timed_archive(dir, &timed)
}

pub fn write_timed_archive(dir: &Path, entries: &[(&str, &[u8], u64)]) -> PathBuf {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, data, mtime) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(*mtime);
        header.set_cksum();
        builder.append_data(&mut header, *path, *data).unwrap();
    }
    let bytes = builder.into_inner().unwrap().finish().unwrap();

    let archive = dir.join("templates.tar.gz");
    fs::write(&archive, bytes).unwrap();
    archive
}

/// Every file below `root`, keyed by its path relative to `root`.
pub fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_string_lossy().into_owned();
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect()
}

pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}
