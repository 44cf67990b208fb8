use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use packforge_core::{parse_spec, LoadedSpec};
use packforge_renderer::{
    DocumentKind, RenderError, RenderedDocument, Renderer, TemplateContext, TemplateEngine,
};

const SHOP_SPEC: &str = r#"{
  "name": "Shop Boost",
  "scope": "online retail conversion",
  "audience": ["marketers", "store owners"],
  "modules": [
    {"id": "M01", "name": "Product pages", "purpose": "lift CR"},
    {"id": "M02", "name": "Cart recovery"},
    {"id": "M10", "name": "Loyalty", "purpose": "retention"}
  ],
  "kpi_targets": [
    {"metric": "CR", "op": ">=", "target": 5},
    {"metric": "AOV", "op": ">", "target": "60 EUR"}
  ],
  "integrations": ["Shopify", "Klaviyo"],
  "cases": [
    {"title": "Spring sale", "metric": "CR", "baseline": "2.1%", "actual": "3.4%", "uplift": "+62%"},
    {"title": "Newsletter", "metric": "CTR", "baseline": 1.2, "actual": 2.0, "uplift": "+67%"}
  ]
}"#;

fn shop() -> LoadedSpec {
    parse_spec(SHOP_SPEC, Path::new("shop.json")).expect("spec")
}

fn render(loaded: &LoadedSpec) -> Vec<RenderedDocument> {
    let at = Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap();
    Renderer::new().unwrap().render(loaded, at).expect("render")
}

fn doc<'a>(docs: &'a [RenderedDocument], rel: &str) -> &'a str {
    &docs
        .iter()
        .find(|d| d.rel_path == Path::new(rel))
        .unwrap_or_else(|| panic!("missing {rel}; have {:?}", docs.iter().map(|d| &d.rel_path).collect::<Vec<_>>()))
        .content
}

// ---------------------------------------------------------------------------
// 1. Catalog shape
// ---------------------------------------------------------------------------

#[test]
fn one_prompt_per_module() {
    let docs = render(&shop());
    let prompts: Vec<&PathBuf> = docs
        .iter()
        .filter(|d| d.kind == DocumentKind::ModulePrompt)
        .map(|d| &d.rel_path)
        .collect();
    assert_eq!(
        prompts,
        vec![
            &PathBuf::from("prompts/m01_shop_boost.md"),
            &PathBuf::from("prompts/m02_shop_boost.md"),
            &PathBuf::from("prompts/m10_shop_boost.md"),
        ]
    );
}

#[test]
fn one_case_per_spec_case() {
    let docs = render(&shop());
    let cases = docs.iter().filter(|d| d.kind == DocumentKind::CaseStudy).count();
    assert_eq!(cases, 2);
    assert!(doc(&docs, "cases/case_02.md").contains("Baseline: 1.2 → Actual: 2.0 → Uplift: +67%"));
}

#[test]
fn empty_cases_render_single_default_case() {
    let loaded = parse_spec(r#"{"name":"Solo","scope":"s","cases":[]}"#, Path::new("s.json")).unwrap();
    let docs = render(&loaded);
    let cases: Vec<_> = docs.iter().filter(|d| d.kind == DocumentKind::CaseStudy).collect();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].rel_path, PathBuf::from("cases/case_01.md"));
    assert!(cases[0].content.contains("# Case Study – Case 01"));
    assert!(cases[0].content.contains("- Metric: CR"));
    assert!(cases[0].content.contains("Baseline: - → Actual: - → Uplift: -"));
}

// ---------------------------------------------------------------------------
// 2. Content
// ---------------------------------------------------------------------------

#[test]
fn kpi_metric_and_operator_appear_verbatim() {
    let docs = render(&shop());
    let matrix = doc(&docs, "kpi/kpi_matrix.md");
    assert!(matrix.contains("| CR | >= 5 |"), "matrix:\n{matrix}");
    assert!(matrix.contains("| AOV | > 60 EUR |"));

    let dashboard = doc(&docs, "kpi/kpi_dashboard.json");
    assert!(dashboard.contains(r#""metric": "CR""#), "dashboard:\n{dashboard}");
    assert!(dashboard.contains(r#""op": ">=""#));
}

#[test]
fn overview_lists_spec_fields() {
    let loaded = shop();
    let docs = render(&loaded);
    let overview = doc(&docs, "overview.md");
    assert!(overview.starts_with("# Shop Boost – Overview\n"));
    assert!(overview.contains("## 1. Scope\nonline retail conversion\n"));
    assert!(overview.contains("- marketers\n- store owners\n"));
    assert!(overview.contains("- M01 – Product pages → lift CR\n"));
    assert!(overview.contains("- M02 – Cart recovery → \n"));
    assert!(overview.contains("- CR: >= 5\n"));
    assert!(overview.contains("Integrate into Shopify, Klaviyo"));
    assert!(overview.contains("- Spring sale – CR: 2.1% → 3.4% (+62%)\n"));
}

#[test]
fn overview_placeholders_for_empty_spec() {
    let loaded = parse_spec(r#"{"name":"Blank","scope":"s"}"#, Path::new("b.json")).unwrap();
    let docs = render(&loaded);
    let overview = doc(&docs, "overview.md");
    for placeholder in ["- [audience]\n", "- [module]\n", "- [KPI]\n", "- [Case 01]\n"] {
        assert!(overview.contains(placeholder), "missing {placeholder:?}");
    }
    assert!(overview.contains("Integrate into CRM/LMS/Shopify"));
    let matrix = doc(&docs, "kpi/kpi_matrix.md");
    assert!(matrix.contains("| [metric] | [target] | [method] | [frequency] |"));
    let quickstart = doc(&docs, "quickstart.md");
    assert!(quickstart.contains("`mXX_[name].md`"));
    assert!(quickstart.contains("target: [KPI]."));
}

#[test]
fn quickstart_names_first_prompt_and_inline_kpis() {
    let docs = render(&shop());
    let quickstart = doc(&docs, "quickstart.md");
    assert!(quickstart.contains("`m01_shop_boost.md`"));
    assert!(quickstart.contains("CR >= 5; AOV > 60 EUR"));
}

#[test]
fn prompt_heading_uses_module_id_and_name() {
    let docs = render(&shop());
    assert!(doc(&docs, "prompts/m02_shop_boost.md").starts_with("# Module M02 – Cart recovery\n"));
}

#[test]
fn run_id_and_timestamp_embedded_in_audit_documents() {
    let loaded = shop();
    let docs = render(&loaded);
    let run_id = loaded.run_id.to_string();

    let hash = doc(&docs, "hash.txt");
    assert_eq!(
        hash,
        format!("Pack: Shop Boost\nSlug: shop_boost\nRun ID: {run_id}\nTimestamp: 2026-05-04T08:00:00Z\n")
    );
    assert!(doc(&docs, "cases/case_01.md").contains(&format!("Run ID: {run_id} | Timestamp: 2026-05-04T08:00:00Z")));
    let dash: serde_json::Value = serde_json::from_str(doc(&docs, "kpi/kpi_dashboard.json")).unwrap();
    assert_eq!(dash["run_id"], run_id.as_str());
    assert_eq!(dash["metrics"].as_array().unwrap().len(), 2);
    assert_eq!(dash["metrics"][1]["status"], "n/a");
}

#[test]
fn same_inputs_render_identical_output() {
    let a = render(&shop());
    let b = render(&shop());
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// 3. Engine and prompt file names
// ---------------------------------------------------------------------------

#[test]
fn engine_renders_caller_built_context() {
    let engine = TemplateEngine::new().unwrap();
    let at = Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap();
    let ctx = TemplateContext::from_spec(&shop(), at);
    let docs = engine.render(&ctx).unwrap();
    assert_eq!(docs, render(&shop()));
}

#[test]
fn sanitised_ids_that_meet_are_rejected() {
    let loaded = parse_spec(
        r#"{"name":"Clash","scope":"s","modules":[
            {"id":"M-1","name":"Dash"},{"id":"M_1","name":"Underscore"}]}"#,
        Path::new("pack.json"),
    )
    .unwrap();
    let err = Renderer::new()
        .unwrap()
        .render(&loaded, Utc::now())
        .unwrap_err();
    assert!(matches!(err, RenderError::PromptCollision { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("M-1") && msg.contains("M_1") && msg.contains("m_1_clash.md"), "{msg}");
}
