//! Tera rendering engine — [`DocumentKind`] catalog and [`Renderer`].
//!
//! # Path mapping (relative to `module_pack_<slug>/`)
//!
//! | Document                | Output path                                |
//! |-------------------------|--------------------------------------------|
//! | Overview                | `overview.md`                              |
//! | Quickstart              | `quickstart.md`                            |
//! | ModulePrompt            | `prompts/m<NN>_<slug>.md` (one per module) |
//! | KpiMatrix               | `kpi/kpi_matrix.md`                        |
//! | KpiDashboard            | `kpi/kpi_dashboard.json`                   |
//! | ImplementationChecklist | `checklists/implementation_checklist.md`   |
//! | CaseStudy               | `cases/case_<NN>.md` (one per case)        |
//! | OutputTemplates         | `specs/output_templates.json`              |
//! | Guardrails              | `specs/guardrails.md`                      |
//! | License                 | `license.md`                               |
//! | AuditSummary            | `hash.txt`                                 |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tera::Tera;

use packforge_core::LoadedSpec;

use crate::context::TemplateContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("overview.md.tera", include_str!("templates/overview.md.tera")),
    ("quickstart.md.tera", include_str!("templates/quickstart.md.tera")),
    ("prompt.md.tera", include_str!("templates/prompt.md.tera")),
    ("kpi_matrix.md.tera", include_str!("templates/kpi_matrix.md.tera")),
    (
        "kpi_dashboard.json.tera",
        include_str!("templates/kpi_dashboard.json.tera"),
    ),
    (
        "implementation_checklist.md.tera",
        include_str!("templates/implementation_checklist.md.tera"),
    ),
    ("case_study.md.tera", include_str!("templates/case_study.md.tera")),
    (
        "output_templates.json.tera",
        include_str!("templates/output_templates.json.tera"),
    ),
    ("guardrails.md.tera", include_str!("templates/guardrails.md.tera")),
    ("license.md.tera", include_str!("templates/license.md.tera")),
    ("hash.txt.tera", include_str!("templates/hash.txt.tera")),
];

fn build_tera() -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TPLS.iter().copied())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// Every document a pack contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Overview,
    Quickstart,
    ModulePrompt,
    KpiMatrix,
    KpiDashboard,
    ImplementationChecklist,
    CaseStudy,
    OutputTemplates,
    Guardrails,
    License,
    AuditSummary,
}

impl DocumentKind {
    /// All document kinds in render order.
    pub fn all() -> &'static [DocumentKind] {
        &[
            DocumentKind::Overview,
            DocumentKind::Quickstart,
            DocumentKind::ModulePrompt,
            DocumentKind::KpiMatrix,
            DocumentKind::KpiDashboard,
            DocumentKind::ImplementationChecklist,
            DocumentKind::CaseStudy,
            DocumentKind::OutputTemplates,
            DocumentKind::Guardrails,
            DocumentKind::License,
            DocumentKind::AuditSummary,
        ]
    }

    /// Name of the template this kind renders.
    pub fn template_name(&self) -> &'static str {
        match self {
            DocumentKind::Overview                => "overview.md.tera",
            DocumentKind::Quickstart              => "quickstart.md.tera",
            DocumentKind::ModulePrompt            => "prompt.md.tera",
            DocumentKind::KpiMatrix               => "kpi_matrix.md.tera",
            DocumentKind::KpiDashboard            => "kpi_dashboard.json.tera",
            DocumentKind::ImplementationChecklist => "implementation_checklist.md.tera",
            DocumentKind::CaseStudy               => "case_study.md.tera",
            DocumentKind::OutputTemplates         => "output_templates.json.tera",
            DocumentKind::Guardrails              => "guardrails.md.tera",
            DocumentKind::License                 => "license.md.tera",
            DocumentKind::AuditSummary            => "hash.txt.tera",
        }
    }

    /// Directory the document lives in, relative to the pack root.
    pub fn directory(&self) -> &'static str {
        match self {
            DocumentKind::ModulePrompt => "prompts",
            DocumentKind::KpiMatrix | DocumentKind::KpiDashboard => "kpi",
            DocumentKind::ImplementationChecklist => "checklists",
            DocumentKind::CaseStudy => "cases",
            DocumentKind::OutputTemplates | DocumentKind::Guardrails => "specs",
            DocumentKind::Overview
            | DocumentKind::Quickstart
            | DocumentKind::License
            | DocumentKind::AuditSummary => "",
        }
    }

    /// Fixed file name, or `None` for kinds rendered once per spec entry.
    pub fn file_name(&self) -> Option<&'static str> {
        match self {
            DocumentKind::Overview                => Some("overview.md"),
            DocumentKind::Quickstart              => Some("quickstart.md"),
            DocumentKind::ModulePrompt            => None,
            DocumentKind::KpiMatrix               => Some("kpi_matrix.md"),
            DocumentKind::KpiDashboard            => Some("kpi_dashboard.json"),
            DocumentKind::ImplementationChecklist => Some("implementation_checklist.md"),
            DocumentKind::CaseStudy               => None,
            DocumentKind::OutputTemplates         => Some("output_templates.json"),
            DocumentKind::Guardrails              => Some("guardrails.md"),
            DocumentKind::License                 => Some("license.md"),
            DocumentKind::AuditSummary            => Some("hash.txt"),
        }
    }

    /// Path relative to the pack root for a document called `file_name`.
    pub fn rel_path(&self, file_name: &str) -> PathBuf {
        let dir = self.directory();
        if dir.is_empty() {
            PathBuf::from(file_name)
        } else {
            Path::new(dir).join(file_name)
        }
    }
}

/// Directories every pack contains, including the reserved empty
/// `cases/charts`.
pub const PACK_DIRECTORIES: &[&str] = &["prompts", "kpi", "checklists", "cases/charts", "specs"];

/// A rendered document ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    /// Path relative to `module_pack_<slug>/`.
    pub rel_path: PathBuf,
    pub content: String,
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Fail when two modules would be written to the same `prompts/` file.
fn check_prompt_files(ctx: &TemplateContext) -> Result<(), RenderError> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for module in &ctx.modules {
        if let Some(first) = seen.insert(&module.prompt_file, &module.id) {
            return Err(RenderError::PromptCollision {
                file: module.prompt_file.clone(),
                first: first.to_string(),
                second: module.id.clone(),
            });
        }
    }
    Ok(())
}

/// Tera engine over the embedded template catalog.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`] with every embedded template
    /// registered.
    pub fn new() -> Result<Self, RenderError> {
        Ok(TemplateEngine { tera: build_tera()? })
    }

    fn render_one(
        &self,
        kind: DocumentKind,
        file_name: &str,
        tera_ctx: &tera::Context,
    ) -> Result<RenderedDocument, RenderError> {
        let content = self.tera.render(kind.template_name(), tera_ctx)?;
        Ok(RenderedDocument {
            kind,
            rel_path: kind.rel_path(file_name),
            content: content.replace("\r\n", "\n"),
        })
    }

    /// Render every document of the pack described by `ctx`.
    ///
    /// Module prompts are rendered once per module, case studies once per
    /// entry of `ctx.cases`; every other kind exactly once.
    pub fn render(&self, ctx: &TemplateContext) -> Result<Vec<RenderedDocument>, RenderError> {
        check_prompt_files(ctx)?;
        let tera_ctx = ctx.to_tera_context()?;
        let mut docs = Vec::new();

        for kind in DocumentKind::all() {
            match kind {
                DocumentKind::ModulePrompt => {
                    for module in &ctx.modules {
                        let mut entry_ctx = tera_ctx.clone();
                        entry_ctx.insert("module", module);
                        docs.push(self.render_one(*kind, &module.prompt_file, &entry_ctx)?);
                    }
                }
                DocumentKind::CaseStudy => {
                    for case in &ctx.cases {
                        let mut entry_ctx = tera_ctx.clone();
                        entry_ctx.insert("case", case);
                        docs.push(self.render_one(*kind, &case.file_name, &entry_ctx)?);
                    }
                }
                other => {
                    let file_name = other.file_name().unwrap_or_default();
                    docs.push(self.render_one(*other, file_name, &tera_ctx)?);
                }
            }
        }
        Ok(docs)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renderer over the embedded template catalog.
///
/// Create once with [`Renderer::new`] and reuse.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new()? })
    }

    /// Render every document for `loaded`, stamped with `generated_at`.
    pub fn render(
        &self,
        loaded: &LoadedSpec,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<RenderedDocument>, RenderError> {
        let ctx = TemplateContext::from_spec(loaded, generated_at);
        self.render_with_context(&ctx)
    }

    /// Render documents using a caller-provided [`TemplateContext`].
    pub fn render_with_context(
        &self,
        ctx: &TemplateContext,
    ) -> Result<Vec<RenderedDocument>, RenderError> {
        self.engine.render(ctx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
