//! Packforge core library — spec model, loader, identifiers, errors.
//!
//! Public API surface:
//! - [`types`] — pack spec structs and newtypes
//! - [`spec`] — [`load_spec`] / [`parse_spec`]
//! - [`ident`] — [`slugify`] and [`RunId`] derivation
//! - [`error`] — [`SpecError`]

pub mod error;
pub mod ident;
pub mod spec;
pub mod types;

pub use error::SpecError;
pub use ident::{canonical_json, slugify, RunId};
pub use spec::{load_spec, parse_spec, LoadedSpec};
pub use types::{Case, Kpi, Module, ModuleId, PackSpec, ScalarValue, Slug};
