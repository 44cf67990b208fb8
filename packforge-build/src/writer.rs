//! Staged tree writer.
//!
//! ## `write_tree` — swap protocol
//!
//! 1. Create a staging directory `.module_pack_<slug>.XXXXXX` inside the
//!    work root.
//! 2. Create the fixed subdirectories and write every rendered document.
//! 3. Move any existing `module_pack_<slug>` aside to
//!    `.module_pack_<slug>.previous`.
//! 4. Rename the staging directory to `module_pack_<slug>`.
//! 5. Delete the previous tree (or restore it if step 4 failed).
//!
//! A failure before step 3 leaves the existing tree untouched and removes
//! the staging directory.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use packforge_core::Slug;
use packforge_renderer::{engine::PACK_DIRECTORIES, RenderedDocument};

use crate::error::{io_err, BuildError};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A document written into the pack tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Path relative to the pack root.
    pub rel_path: PathBuf,
    pub bytes: usize,
    /// SHA-256 hex digest of the written content.
    pub sha256: String,
}

/// A finished pack tree on disk.
#[derive(Debug, Clone)]
pub struct PackTree {
    /// `<work_root>/module_pack_<slug>`.
    pub root: PathBuf,
    pub files: Vec<WrittenFile>,
}

/// `module_pack_<slug>`
pub fn pack_dir_name(slug: &Slug) -> String {
    format!("module_pack_{slug}")
}

// ---------------------------------------------------------------------------
// write_tree
// ---------------------------------------------------------------------------

fn write_document(root: &Path, doc: &RenderedDocument) -> Result<WrittenFile, BuildError> {
    let path = root.join(&doc.rel_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(&path, &doc.content).map_err(|e| io_err(&path, e))?;

    let digest = {
        let mut h = Sha256::new();
        h.update(doc.content.as_bytes());
        hex::encode(h.finalize())
    };
    tracing::debug!("wrote: {}", doc.rel_path.display());
    Ok(WrittenFile {
        rel_path: doc.rel_path.clone(),
        bytes: doc.content.len(),
        sha256: digest,
    })
}

fn remove_path(path: &Path) -> Result<(), BuildError> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| io_err(path, e))
}

/// Rename `staged` onto `target`, replacing whatever is there.
fn swap_into_place(staged: &Path, target: &Path, previous: &Path) -> Result<(), BuildError> {
    if previous.symlink_metadata().is_ok() {
        remove_path(previous)?;
    }

    let had_previous = target.symlink_metadata().is_ok();
    if had_previous {
        std::fs::rename(target, previous).map_err(|e| io_err(target, e))?;
    }

    if let Err(e) = std::fs::rename(staged, target) {
        if had_previous {
            let _ = std::fs::rename(previous, target);
        }
        return Err(io_err(target, e));
    }

    if had_previous {
        tracing::debug!("removing previous tree: {}", previous.display());
        remove_path(previous)?;
    }
    Ok(())
}

/// Write `docs` into a fresh `module_pack_<slug>` under `work_root`.
///
/// Stale files from an earlier build never survive: the tree is always
/// replaced as a whole.
pub fn write_tree(
    work_root: &Path,
    slug: &Slug,
    docs: &[RenderedDocument],
) -> Result<PackTree, BuildError> {
    std::fs::create_dir_all(work_root).map_err(|e| io_err(work_root, e))?;

    let dir_name = pack_dir_name(slug);
    let staging = tempfile::Builder::new()
        .prefix(&format!(".{dir_name}."))
        .tempdir_in(work_root)
        .map_err(|e| io_err(work_root, e))?;

    for dir in PACK_DIRECTORIES {
        let path = staging.path().join(dir);
        std::fs::create_dir_all(&path).map_err(|e| io_err(&path, e))?;
    }

    let mut files = Vec::with_capacity(docs.len());
    for doc in docs {
        files.push(write_document(staging.path(), doc)?);
    }

    let target = work_root.join(&dir_name);
    let previous = work_root.join(format!(".{dir_name}.previous"));
    swap_into_place(staging.path(), &target, &previous)?;
    // The staging path no longer exists; stop the guard from cleaning it up.
    let _ = staging.keep();

    tracing::info!("wrote {} files to {}", files.len(), target.display());
    Ok(PackTree {
        root: target,
        files,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
