//! # permasync-archive
//!
//! Deterministic, in-memory archiving of a repository working tree.
//!
//! [`archive`] walks the requested subtree in sorted order, optionally
//! honoring the project's `.gitignore`, and produces a gzip-compressed tar
//! with normalized headers. Two runs over an unchanged tree yield
//! byte-identical output, and nothing is ever written inside the tree being
//! archived.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

/// All errors that can arise while building an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The requested root or include path does not exist or is not a directory.
    #[error("archive root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// An I/O failure while reading the tree or writing the in-memory blob.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory walk itself failed (unreadable directory, loop, etc.).
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.into(),
        source,
    }
}

/// Produce a gzip-compressed tar archive of `root/include`.
///
/// Entry paths inside the archive are relative to `root`, so restricting
/// `include` to a subtree (for example `.git`) still yields entries under
/// that prefix. When `use_ignore_file` is true, patterns from the project's
/// `.gitignore` are honored so secrets and build output stay out of the
/// blob; the walk never follows symlinks.
///
/// All-or-nothing: any read failure aborts the whole archive rather than
/// returning a partial blob.
pub fn archive(
    root: &Path,
    include: &Path,
    use_ignore_file: bool,
) -> Result<Vec<u8>, ArchiveError> {
    let base = root.join(include);
    if !base.is_dir() {
        return Err(ArchiveError::RootNotFound { path: base });
    }

    let mut entries = collect_entries(&base, use_ignore_file)?;
    // Sorted walk order is what makes the archive reproducible.
    entries.sort();

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    for path in &entries {
        let rel = path
            .strip_prefix(root)
            .map_err(|_| io_err(path, std::io::Error::other("path escapes archive root")))?;
        let rel = normalize_entry_path(rel);

        let metadata = std::fs::symlink_metadata(path).map_err(|e| io_err(path, e))?;
        let mut header = tar::Header::new_gnu();
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);

        if metadata.is_dir() {
            header.set_entry_type(tar::EntryType::Directory);
            header.set_mode(0o755);
            header.set_size(0);
            builder
                .append_data(&mut header, Path::new(&rel), std::io::empty())
                .map_err(|e| io_err(path, e))?;
        } else if metadata.is_file() {
            header.set_entry_type(tar::EntryType::Regular);
            header.set_mode(if is_executable(&metadata) { 0o755 } else { 0o644 });
            header.set_size(metadata.len());
            let file = File::open(path).map_err(|e| io_err(path, e))?;
            builder
                .append_data(&mut header, Path::new(&rel), file)
                .map_err(|e| io_err(path, e))?;
        } else {
            log::debug!("skipping non-regular entry: {}", path.display());
        }
    }

    let encoder = builder
        .into_inner()
        .map_err(|e| io_err(root, e))?;
    let blob = encoder.finish().map_err(|e| io_err(root, e))?;
    log::info!(
        "archived {} entries from {} ({} bytes compressed)",
        entries.len(),
        base.display(),
        blob.len()
    );
    Ok(blob)
}

/// Walk `base` and return every entry path, honoring `.gitignore` when asked.
fn collect_entries(base: &Path, use_ignore_file: bool) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut walker = ignore::WalkBuilder::new(base);
    walker
        .standard_filters(false)
        .git_ignore(use_ignore_file)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_path(|a, b| a.cmp(b));

    let mut entries = Vec::new();
    for entry in walker.build() {
        let entry = entry?;
        let path = entry.path();
        if path == base {
            continue;
        }
        // Permission errors on individual entries are fatal: a silently
        // incomplete snapshot is worse than no snapshot.
        if let Err(err) = std::fs::symlink_metadata(path) {
            if err.kind() == ErrorKind::NotFound {
                continue;
            }
            return Err(io_err(path, err));
        }
        entries.push(path.to_path_buf());
    }
    Ok(entries)
}

/// Archive entry paths always use forward slashes and are never absolute.
fn normalize_entry_path(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    false
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
