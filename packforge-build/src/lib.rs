//! # packforge-build
//!
//! Staged tree writer, zip archiver and the build pipeline.
//!
//! Call [`build_pack`] to turn a spec file into `module_pack_<slug>/` plus a
//! zip archive of it.

pub mod archive;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use archive::{archive_tree, ArchiveSummary};
pub use error::BuildError;
pub use pipeline::{build_pack, BuildOptions, BuildReport};
pub use writer::{pack_dir_name, write_tree, PackTree, WrittenFile};
