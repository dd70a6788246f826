//! Read access to the template archive.
//! Templates ship as a single gzip-compressed tar file whose entries are laid
//! out as `<build>/<kind>/...`, plus dot-directories shared by every kind.

use crate::constants::{TEMPLATES_ARCHIVE, TEMPLATES_ENV};
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// One regular file read out of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Archive-relative path using `/` separators, without a leading `./`
    pub path: String,
    /// Modification time in seconds since the epoch; 0 when the entry carries none
    pub mtime: u64,
    pub data: Vec<u8>,
}

/// An open template archive. Dropping it releases the underlying reader.
pub struct TemplateArchive<R: Read> {
    origin: PathBuf,
    archive: tar::Archive<GzDecoder<R>>,
}

impl TemplateArchive<File> {
    /// Opens the archive at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening template archive '{}'.", path.display());
        let file = File::open(path).map_err(|e| Error::at_path("open", path, e))?;
        Ok(Self::from_reader(path, file))
    }
}

impl<R: Read> TemplateArchive<R> {
    /// Wraps an already opened gzip stream; `origin` is only used in error messages.
    pub fn from_reader<P: Into<PathBuf>>(origin: P, reader: R) -> Self {
        Self { origin: origin.into(), archive: tar::Archive::new(GzDecoder::new(reader)) }
    }

    /// Visits every regular file in archive order.
    ///
    /// Stops at the first error returned by `visit`.
    pub fn for_each_entry<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(ArchiveEntry) -> Result<()>,
    {
        let origin = self.origin.clone();
        let archive_error = |e: std::io::Error| Error::ArchiveError {
            archive: origin.clone(),
            reason: e.to_string(),
        };

        for entry in self.archive.entries().map_err(archive_error)? {
            let mut entry = entry.map_err(archive_error)?;
            if !entry.header().entry_type().is_file() {
                continue;
            }

            let raw_path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let path = normalize_entry_path(&raw_path);
            let mtime = entry.header().mtime().unwrap_or(0);

            // header sizes are not trusted for preallocation
            let mut data = Vec::new();
            entry.read_to_end(&mut data).map_err(archive_error)?;

            visit(ArchiveEntry { path, mtime, data })?;
        }
        Ok(())
    }
}

fn normalize_entry_path(raw: &str) -> String {
    let mut path = raw;
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path.to_string()
}

/// Finds the template archive.
///
/// Lookup order: `explicit`, then the `BLADE_TEMPLATES` environment variable,
/// then `configured`, then `templates.tar.gz` next to the running executable.
/// Returns `None` when the chosen candidate does not exist.
pub fn locate_archive(explicit: Option<&Path>, configured: Option<&Path>) -> Option<PathBuf> {
    let env = std::env::var_os(TEMPLATES_ENV).map(PathBuf::from);
    let candidate = archive_candidate(explicit, env, configured).or_else(bundled_archive)?;

    if candidate.is_file() {
        debug!("Using template archive '{}'.", candidate.display());
        Some(candidate)
    } else {
        debug!("Template archive '{}' does not exist.", candidate.display());
        None
    }
}

fn archive_candidate(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    configured: Option<&Path>,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or(env)
        .or_else(|| configured.map(Path::to_path_buf))
}

fn bundled_archive() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(TEMPLATES_ARCHIVE))
}
