//! Zip archiver for a finished pack tree.
//!
//! Entry names are relative to the tree's parent, so every entry starts with
//! `module_pack_<slug>/`. Directories get their own entries (the reserved
//! `cases/charts/` is empty). Entries are written in file-name order and
//! carry the zip format's default timestamp, so identical trees produce
//! identical archives.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{io_err, BuildError};

/// What was written to the archive.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Entry names in write order; directories end with `/`.
    pub entries: Vec<String>,
}

fn entry_name(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn write_entries(
    tree_root: &Path,
    base: &Path,
    file: File,
) -> Result<Vec<String>, BuildError> {
    let mut zip = ZipWriter::new(file);
    let file_opts = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    let dir_opts = SimpleFileOptions::default().unix_permissions(0o755);

    let mut entries = Vec::new();
    for entry in WalkDir::new(tree_root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let rel = path.strip_prefix(base).unwrap_or(path);
        let name = entry_name(rel);

        if entry.file_type().is_dir() {
            zip.add_directory(name.as_str(), dir_opts)?;
            entries.push(format!("{name}/"));
        } else if entry.file_type().is_file() {
            zip.start_file(name.as_str(), file_opts)?;
            let mut src = File::open(path).map_err(|e| io_err(path, e))?;
            std::io::copy(&mut src, &mut zip).map_err(|e| io_err(path, e))?;
            tracing::debug!("archived: {name}");
            entries.push(name);
        }
    }
    zip.finish()?;
    Ok(entries)
}

/// Archive every entry under `tree_root` into `zip_path`.
///
/// The archive is written to `<zip_path>.packforge.tmp` and renamed into
/// place, so a failed run never leaves a truncated zip at `zip_path`.
pub fn archive_tree(tree_root: &Path, zip_path: &Path) -> Result<ArchiveSummary, BuildError> {
    let base = tree_root.parent().unwrap_or_else(|| Path::new(""));

    if let Some(parent) = zip_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.packforge.tmp", zip_path.display()));
    let file = File::create(&tmp).map_err(|e| io_err(&tmp, e))?;

    let entries = match write_entries(tree_root, base, file) {
        Ok(entries) => entries,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }
    };

    if let Err(e) = std::fs::rename(&tmp, zip_path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(zip_path, e));
    }

    tracing::info!("archived {} entries to {}", entries.len(), zip_path.display());
    Ok(ArchiveSummary {
        path: zip_path.to_path_buf(),
        entries,
    })
}
