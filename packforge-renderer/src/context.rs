//! Template context — serializable rendering payload built from a
//! [`LoadedSpec`].
//!
//! Fallback placeholders for empty collections are applied here, so every
//! template can iterate its list unconditionally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use packforge_core::{Case, Kpi, LoadedSpec, Module, ModuleId, Slug};

use crate::error::RenderError;

/// Timestamp layout embedded in dashboard, case and hash documents.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Integrations line used when the spec lists none.
pub const DEFAULT_INTEGRATIONS: &str = "CRM/LMS/Shopify";

/// Rendering payload shared by every document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    pub pack: PackCtx,
    pub modules: Vec<ModuleCtx>,
    /// Cases to render; holds the placeholder case when the spec has none.
    pub cases: Vec<CaseCtx>,
    /// Pre-formatted list lines with placeholders already applied.
    pub lists: ListsCtx,
    pub quickstart: QuickstartCtx,
    /// Module id named in `specs/output_templates.json`.
    pub output_module: String,
    pub dashboard_metrics: Vec<DashboardMetricCtx>,
}

/// Pack identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackCtx {
    pub name: String,
    pub slug: String,
    pub scope: String,
    pub run_id: String,
    pub generated_at: String,
    /// Comma-joined integrations, or [`DEFAULT_INTEGRATIONS`].
    pub integrations: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCtx {
    pub id: String,
    pub name: String,
    pub purpose: String,
    /// File name under `prompts/`.
    pub prompt_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseCtx {
    /// File name under `cases/`.
    pub file_name: String,
    pub title: String,
    pub metric: String,
    pub baseline: String,
    pub actual: String,
    pub uplift: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsCtx {
    pub audience: Vec<String>,
    pub modules: Vec<String>,
    pub kpis: Vec<String>,
    pub kpi_rows: Vec<String>,
    pub cases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickstartCtx {
    pub first_prompt: String,
    pub kpi_inline: String,
}

/// One entry of the `metrics` array in `kpi/kpi_dashboard.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetricCtx {
    pub metric: String,
    pub op: String,
    /// Target kept in its JSON form (number stays a number).
    pub target: Value,
    pub unit: String,
    pub frequency: String,
    pub method: String,
    pub source: String,
    pub baseline: i64,
    pub current: i64,
    pub uplift: i64,
    pub status: String,
}

// ---------------------------------------------------------------------------
// File naming
// ---------------------------------------------------------------------------

/// `prompts/` file name for a module: `m` + id without its first character,
/// zero-padded to two places, then `_<slug>.md`.
///
/// `M01` → `m01_<slug>.md`, `M7` → `m07_<slug>.md`. Characters other than
/// alphanumerics are replaced with `_` so the name stays inside `prompts/`.
pub fn prompt_file_name(id: &ModuleId, slug: &Slug) -> String {
    let number: String = id
        .0
        .chars()
        .skip(1)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("m{number:0>2}_{slug}.md")
}

/// `cases/` file name for the 1-based case `number`.
pub fn case_file_name(number: usize) -> String {
    format!("case_{number:02}.md")
}

fn or_placeholder(lines: Vec<String>, placeholder: &str) -> Vec<String> {
    if lines.is_empty() {
        vec![placeholder.to_string()]
    } else {
        lines
    }
}

fn module_ctx(module: &Module, slug: &Slug) -> ModuleCtx {
    ModuleCtx {
        id: module.id.0.clone(),
        name: module.name.to_string(),
        purpose: module
            .purpose
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        prompt_file: prompt_file_name(&module.id, slug),
    }
}

/// `metric op target`, as written in the spec.
fn kpi_line(kpi: &Kpi) -> String {
    format!("{} {} {}", kpi.metric, kpi.op, kpi.target)
}

fn case_ctx(number: usize, case: &Case) -> CaseCtx {
    CaseCtx {
        file_name: case_file_name(number),
        title: case.title.to_string(),
        metric: case.metric.to_string(),
        baseline: case.baseline.to_string(),
        actual: case.actual.to_string(),
        uplift: case.uplift.to_string(),
    }
}

fn dashboard_metric(kpi: &Kpi) -> DashboardMetricCtx {
    DashboardMetricCtx {
        metric: kpi.metric.to_string(),
        op: kpi.op.to_string(),
        target: kpi.target.0.clone(),
        unit: "ratio".to_string(),
        frequency: "weekly".to_string(),
        method: "standard".to_string(),
        source: "system".to_string(),
        baseline: 0,
        current: 0,
        uplift: 0,
        status: "n/a".to_string(),
    }
}

impl TemplateContext {
    /// Build a [`TemplateContext`] for `loaded`, stamped with `generated_at`.
    pub fn from_spec(loaded: &LoadedSpec, generated_at: DateTime<Utc>) -> Self {
        let spec = &loaded.spec;
        let slug = &loaded.slug;

        let modules: Vec<ModuleCtx> = spec.modules.iter().map(|m| module_ctx(m, slug)).collect();
        let kpis = &spec.kpi_targets;
        // Summary lines reflect the spec's own cases; documents use the
        // placeholder when there are none.
        let spec_cases: Vec<CaseCtx> = spec
            .cases
            .iter()
            .enumerate()
            .map(|(i, c)| case_ctx(i + 1, c))
            .collect();
        let cases: Vec<CaseCtx> = spec
            .cases_or_placeholder()
            .iter()
            .enumerate()
            .map(|(i, c)| case_ctx(i + 1, c))
            .collect();

        let integrations = if spec.integrations.is_empty() {
            DEFAULT_INTEGRATIONS.to_string()
        } else {
            spec.integrations.join(", ")
        };

        let lists = ListsCtx {
            audience: or_placeholder(
                spec.audience.iter().map(|a| format!("- {a}")).collect(),
                "- [audience]",
            ),
            modules: or_placeholder(
                modules
                    .iter()
                    .map(|m| format!("- {} – {} → {}", m.id, m.name, m.purpose))
                    .collect(),
                "- [module]",
            ),
            kpis: or_placeholder(
                kpis.iter()
                    .map(|k| format!("- {}: {} {}", k.metric, k.op, k.target))
                    .collect(),
                "- [KPI]",
            ),
            kpi_rows: or_placeholder(
                kpis.iter()
                    .map(|k| {
                        format!(
                            "| {} | {} {} | standard definition | weekly/monthly |",
                            k.metric, k.op, k.target
                        )
                    })
                    .collect(),
                "| [metric] | [target] | [method] | [frequency] |",
            ),
            cases: or_placeholder(
                spec_cases
                    .iter()
                    .map(|c| {
                        format!(
                            "- {} – {}: {} → {} ({})",
                            c.title, c.metric, c.baseline, c.actual, c.uplift
                        )
                    })
                    .collect(),
                "- [Case 01]",
            ),
        };

        let kpi_inline = if kpis.is_empty() {
            "[KPI]".to_string()
        } else {
            kpis.iter().map(kpi_line).collect::<Vec<_>>()
                .join("; ")
        };

        let quickstart = QuickstartCtx {
            first_prompt: modules
                .first()
                .map(|m| m.prompt_file.clone())
                .unwrap_or_else(|| "mXX_[name].md".to_string()),
            kpi_inline,
        };

        let output_module = modules
            .first()
            .map(|m| m.id.clone())
            .unwrap_or_else(|| "MXX".to_string());

        TemplateContext {
            pack: PackCtx {
                name: spec.name.clone(),
                slug: slug.0.clone(),
                scope: spec.scope.clone(),
                run_id: loaded.run_id.to_string(),
                generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
                integrations,
            },
            dashboard_metrics: spec.kpi_targets.iter().map(dashboard_metric).collect(),
            modules,
            cases,
            lists,
            quickstart,
            output_module,
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
