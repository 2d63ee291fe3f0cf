use serde::Serialize;
use tera::{Context, Tera};

use proforma_report::{Progress, Report};

use crate::error::ExportError;
use crate::markup::strip_markup;

/// Template used when the host configures none.
pub const DEFAULT_TEMPLATE: &str = "\
{{ title }}
{% for line in lines %}{{ line }}
{% endfor %}";

/// Context handed to report templates. Every field is addressable by name.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub title: String,
    /// Report lines with markup, conclusion block included.
    pub lines: Vec<String>,
    pub conclusion: Vec<String>,
    /// Markup-free report text.
    pub plain_text: String,
    pub reachable: usize,
    pub answered: usize,
    pub percent: u8,
}

impl ReportDocument {
    pub fn new(title: impl Into<String>, report: &Report, progress: Progress) -> Self {
        Self {
            title: title.into(),
            lines: report.lines.clone(),
            conclusion: report.conclusion.clone(),
            plain_text: strip_markup(&report.text()),
            reachable: progress.reachable,
            answered: progress.answered,
            percent: progress.percent(),
        }
    }
}

/// Render a Tera template with a ReportDocument.
///
/// The `template_content` is the raw template string (Jinja2 syntax). The
/// template name decides autoescaping: `.html` names escape the report
/// markup, anything else passes it through.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    document: &ReportDocument,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    // Convert the document to a Tera context via serde_json
    let value = serde_json::to_value(document)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}
