//! Domain types for a module pack spec.
//!
//! Only `name` and `scope` are required at the top level; every collection
//! defaults to empty so the renderer can substitute its placeholders.
//! Unknown fields are accepted and ignored here, but they still feed the
//! run identifier (see [`crate::ident::RunId`]).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a module inside a pack, e.g. `"M01"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub String);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ModuleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Filesystem-safe pack identifier. Always produced by [`crate::slugify`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(pub String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A JSON scalar shown verbatim in generated documents.
///
/// Strings display without quotes; numbers, booleans and `null` display in
/// their JSON form (`5`, `2.5`, `true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScalarValue(pub Value);

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_owned()))
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

// ---------------------------------------------------------------------------
// Spec structs
// ---------------------------------------------------------------------------

/// One prompt-generation unit, rendered to its own document under `prompts/`.
///
/// `id` names the prompt file; `name` and `purpose` are display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: ScalarValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<ScalarValue>,
}

/// A named metric with a comparison operator and a target value.
/// All fields are display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub metric: ScalarValue,
    pub op: ScalarValue,
    pub target: ScalarValue,
}

/// A case study entry. All fields are display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub title: ScalarValue,
    pub metric: ScalarValue,
    pub baseline: ScalarValue,
    pub actual: ScalarValue,
    pub uplift: ScalarValue,
}

impl Case {
    /// The case rendered when a spec lists none.
    pub fn placeholder() -> Self {
        Case {
            title: ScalarValue::from("Case 01"),
            metric: ScalarValue::from("CR"),
            baseline: ScalarValue::from("-"),
            actual: ScalarValue::from("-"),
            uplift: ScalarValue::from("-"),
        }
    }
}

/// Root of a pack spec document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub scope: String,
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub kpi_targets: Vec<Kpi>,
    #[serde(default)]
    pub integrations: Vec<String>,
    #[serde(default)]
    pub cases: Vec<Case>,
}

impl PackSpec {
    /// Effective slug: the explicit `slug` when present and non-empty,
    /// otherwise derived from `name`. Both paths go through
    /// [`crate::slugify`]; an empty result becomes `pack`.
    pub fn slug(&self) -> Slug {
        let source = match self.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => self.name.as_str(),
        };
        let slug = crate::slugify(source);
        if slug.is_empty() {
            Slug("pack".to_string())
        } else {
            Slug(slug)
        }
    }

    /// Cases to render: the spec's own, or exactly one placeholder case.
    pub fn cases_or_placeholder(&self) -> Vec<Case> {
        if self.cases.is_empty() {
            vec![Case::placeholder()]
        } else {
            self.cases.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, slug: Option<&str>) -> PackSpec {
        PackSpec {
            name: name.to_string(),
            slug: slug.map(str::to_string),
            scope: "scope".to_string(),
            audience: vec![],
            modules: vec![],
            kpi_targets: vec![],
            integrations: vec![],
            cases: vec![],
        }
    }

    #[test]
    fn slug_derived_from_name_when_absent() {
        assert_eq!(spec("Retail Growth", None).slug().as_str(), "retail_growth");
    }

    #[test]
    fn explicit_slug_is_sanitised() {
        assert_eq!(spec("x", Some("../Evil Slug")).slug().as_str(), "evil_slug");
    }

    #[test]
    fn blank_slug_falls_back_to_name() {
        assert_eq!(spec("Edu Pack", Some("  ")).slug().as_str(), "edu_pack");
    }

    #[test]
    fn all_symbol_name_yields_pack() {
        assert_eq!(spec("!!!", None).slug().as_str(), "pack");
    }

    #[test]
    fn scalar_display_strips_string_quotes() {
        assert_eq!(ScalarValue::from("12%").to_string(), "12%");
        assert_eq!(ScalarValue::from(5).to_string(), "5");
        assert_eq!(ScalarValue(serde_json::json!(2.5)).to_string(), "2.5");
    }

    #[test]
    fn placeholder_case_used_only_when_empty() {
        let mut s = spec("p", None);
        let cases = s.cases_or_placeholder();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].title.to_string(), "Case 01");

        s.cases = vec![Case::placeholder(), Case::placeholder()];
        assert_eq!(s.cases_or_placeholder().len(), 2);
    }
}
