//! # packforge-renderer
//!
//! Tera-based template engine that renders the fixed document catalog of a
//! module pack from a loaded spec.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use chrono::Utc;
//! use packforge_core::load_spec;
//! use packforge_renderer::Renderer;
//!
//! fn render_pack(path: &Path) {
//!     let (Ok(loaded), Ok(renderer)) = (load_spec(path), Renderer::new()) else {
//!         return;
//!     };
//!     if let Ok(docs) = renderer.render(&loaded, Utc::now()) {
//!         for doc in docs {
//!             println!("{}: {} bytes", doc.rel_path.display(), doc.content.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::TemplateContext;
pub use engine::{DocumentKind, RenderedDocument, Renderer, TemplateEngine};
pub use error::RenderError;
