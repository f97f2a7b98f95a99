use crate::domain::model::ChartDescription;
use crate::utils::error::Result;
use handlebars::Handlebars;
use std::path::Path;

const PAGE_TEMPLATE: &str = "index";
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/index.html");

/// HTML page renderer. Templates receive a single variable, `graph_json`,
/// which should be embedded unescaped: `{{{graph_json}}}`.
pub struct ChartRenderer {
    registry: Handlebars<'static>,
}

impl ChartRenderer {
    pub fn new() -> Result<Self> {
        Self::from_template_str(DEFAULT_TEMPLATE)
    }

    pub fn from_template_str(template: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(PAGE_TEMPLATE, template)?;
        Ok(Self { registry })
    }

    pub fn from_template_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let template = std::fs::read_to_string(path.as_ref())?;
        tracing::info!("Using page template {}", path.as_ref().display());
        Self::from_template_str(&template)
    }

    /// Falls back to the built-in page when no path is configured.
    pub fn from_optional_file(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_template_file(path),
            None => Self::new(),
        }
    }

    pub fn render(&self, chart: &ChartDescription) -> Result<String> {
        let graph_json = chart_payload(chart)?;
        let page = self
            .registry
            .render(PAGE_TEMPLATE, &serde_json::json!({ "graph_json": graph_json }))?;
        Ok(page)
    }
}

/// Serializes the chart for inline embedding in a `<script>` element.
pub fn chart_payload(chart: &ChartDescription) -> Result<String> {
    let json = serde_json::to_string(chart)?;
    Ok(json.replace("</", "<\\/"))
}
