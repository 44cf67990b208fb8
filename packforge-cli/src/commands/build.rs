//! `packforge <spec.json> <output.zip>` — build and archive a pack.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use packforge_build::{build_pack, BuildOptions};

/// Positional arguments for a pack build.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the pack spec (JSON).
    #[arg(value_name = "SPEC_JSON")]
    pub spec: PathBuf,

    /// Path of the zip archive to produce.
    #[arg(value_name = "OUTPUT_ZIP")]
    pub output: PathBuf,

    /// Extra positional arguments are accepted and ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<OsString>,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        if !self.ignored.is_empty() {
            tracing::debug!("ignoring {} extra argument(s)", self.ignored.len());
        }
        let opts = BuildOptions::for_output(&self.output);
        let report = build_pack(&self.spec, &self.output, &opts).with_context(|| {
            format!(
                "failed to build pack from '{}' into '{}'",
                self.spec.display(),
                self.output.display()
            )
        })?;

        tracing::info!(
            pack = %report.pack_name,
            slug = %report.slug,
            run_id = %report.run_id,
            files = report.files.len(),
            tree = %report.tree_dir.display(),
            "pack built"
        );
        println!("{}", report.zip_path.display());
        Ok(())
    }
}
