//! Build pipeline entrypoint: load → render → write tree → archive.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use packforge_core::{load_spec, RunId, Slug};
use packforge_renderer::Renderer;

use crate::archive::archive_tree;
use crate::error::BuildError;
use crate::writer::{write_tree, WrittenFile};

/// Knobs for a single build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory that receives `module_pack_<slug>/`.
    pub work_root: PathBuf,
    /// Timestamp stamped into the dashboard, case studies and `hash.txt`.
    pub generated_at: DateTime<Utc>,
}

impl BuildOptions {
    /// Options that build next to `out_zip`, stamped with the current time.
    pub fn for_output(out_zip: &Path) -> Self {
        let work_root = out_zip
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        BuildOptions {
            work_root,
            generated_at: Utc::now(),
        }
    }
}

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub pack_name: String,
    pub slug: Slug,
    pub run_id: RunId,
    /// `<work_root>/module_pack_<slug>`.
    pub tree_dir: PathBuf,
    pub zip_path: PathBuf,
    pub files: Vec<WrittenFile>,
    pub archive_entries: Vec<String>,
}

/// Build the pack described by `spec_path` and archive it to `out_zip`.
///
/// Every document is rendered before anything touches the disk, so a spec
/// that fails to render leaves an existing tree and zip untouched.
pub fn build_pack(
    spec_path: &Path,
    out_zip: &Path,
    opts: &BuildOptions,
) -> Result<BuildReport, BuildError> {
    let loaded = load_spec(spec_path)?;

    let renderer = Renderer::new()?;
    let docs = renderer.render(&loaded, opts.generated_at)?;
    tracing::info!("rendered {} documents for '{}'", docs.len(), loaded.spec.name);

    let tree = write_tree(&opts.work_root, &loaded.slug, &docs)?;
    let archive = archive_tree(&tree.root, out_zip)?;

    Ok(BuildReport {
        pack_name: loaded.spec.name,
        slug: loaded.slug,
        run_id: loaded.run_id,
        tree_dir: tree.root,
        zip_path: archive.path,
        files: tree.files,
        archive_entries: archive.entries,
    })
}
