//! Spec loader.
//!
//! The file is parsed once into a raw [`serde_json::Value`], which is kept
//! for run-id derivation, then converted into a typed [`PackSpec`]. Missing
//! required fields surface as [`SpecError::Parse`] before anything is
//! written to disk.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SpecError;
use crate::ident::RunId;
use crate::types::{PackSpec, Slug};

/// A parsed spec together with the identifiers derived from it.
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    /// Path the spec was read from.
    pub path: PathBuf,
    /// The document exactly as parsed (all fields, including unknown ones).
    pub raw: Value,
    /// Typed view used for rendering.
    pub spec: PackSpec,
    pub slug: Slug,
    pub run_id: RunId,
}

/// Read and parse the spec at `path`.
pub fn load_spec(path: &Path) -> Result<LoadedSpec, SpecError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = parse_spec(&contents, path)?;
    tracing::info!(
        pack = %loaded.spec.name,
        slug = %loaded.slug,
        run_id = %loaded.run_id,
        modules = loaded.spec.modules.len(),
        cases = loaded.spec.cases.len(),
        "loaded spec"
    );
    Ok(loaded)
}

/// Parse spec text. `origin` is only used to annotate errors.
pub fn parse_spec(contents: &str, origin: &Path) -> Result<LoadedSpec, SpecError> {
    let parse_err = |source| SpecError::Parse {
        path: origin.to_path_buf(),
        source,
    };
    let raw: Value = serde_json::from_str(contents).map_err(parse_err)?;
    let spec: PackSpec = serde_json::from_value(raw.clone()).map_err(parse_err)?;
    let run_id = RunId::derive(&raw)?;
    let slug = spec.slug();
    Ok(LoadedSpec {
        path: origin.to_path_buf(),
        raw,
        spec,
        slug,
        run_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<LoadedSpec, SpecError> {
        parse_spec(text, Path::new("pack.json"))
    }

    #[test]
    fn minimal_spec_defaults_collections() {
        let loaded = parse(r#"{"name":"Mini","scope":"s"}"#).unwrap();
        assert!(loaded.spec.modules.is_empty());
        assert!(loaded.spec.cases.is_empty());
        assert!(loaded.spec.audience.is_empty());
        assert_eq!(loaded.slug.as_str(), "mini");
    }

    #[test]
    fn missing_scope_is_parse_error_naming_field() {
        let err = parse(r#"{"name":"Mini"}"#).unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
        assert!(err.to_string().contains("scope"), "got: {err}");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, SpecError::Parse { .. }));
    }

    #[test]
    fn unknown_fields_affect_run_id() {
        let a = parse(r#"{"name":"p","scope":"s"}"#).unwrap();
        let b = parse(r#"{"name":"p","scope":"s","owner":"team-a"}"#).unwrap();
        assert_ne!(a.run_id, b.run_id);
    }
}
