use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::markup::{parse_line, Segment};
use crate::styles::DocumentStyles;

/// Generate a DOCX document from assembled report text.
///
/// Each report line becomes one paragraph; blank lines become empty
/// paragraphs, which reproduces the report's paragraph breaks. Inline
/// `<strong>` and `<u>` wrappers become bold and underlined runs. A
/// non-empty `title` is added as a Title-styled first paragraph.
pub fn generate_docx(
    report_text: &str,
    title: Option<&str>,
    styles: &DocumentStyles,
) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new().add_style(title_style(styles));

    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        docx = docx.add_paragraph(
            Paragraph::new()
                .style("Title")
                .add_run(
                    Run::new()
                        .add_text(title)
                        .bold()
                        .fonts(RunFonts::new().ascii(&styles.heading_font)),
                ),
        );
    }

    for line in report_text.split('\n') {
        if line.trim().is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
            continue;
        }
        docx = docx.add_paragraph(body_paragraph(line, styles));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    tracing::debug!(bytes = buf.get_ref().len(), "docx generated");
    Ok(buf.into_inner())
}

fn title_style(styles: &DocumentStyles) -> Style {
    Style::new("Title", StyleType::Paragraph)
        .name("Title")
        .size(styles.title_size * 2) // OOXML uses half-points
}

fn body_paragraph(line: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for segment in parse_line(line) {
        para = para.add_run(segment_run(&segment, styles));
    }
    para
}

fn segment_run(segment: &Segment, styles: &DocumentStyles) -> Run {
    let mut run = Run::new()
        .add_text(&segment.text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font));
    if segment.bold {
        run = run.bold();
    }
    if segment.underline {
        run = run.underline("single");
    }
    run
}
