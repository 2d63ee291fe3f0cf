use proforma_core::{Question, QuestionOption, QuestionTree, QuestionType, SelectionState};
use proforma_export::docx::generate_docx;
use proforma_export::render::{render_template, ReportDocument, DEFAULT_TEMPLATE};
use proforma_export::styles::DocumentStyles;
use proforma_report::{assemble_report, estimate_progress};

fn document() -> ReportDocument {
    let tree = QuestionTree::new([
        Question::new("t", "TECHNIQUE", QuestionType::Multiple)
            .with_options([QuestionOption::new("ct", "CT")]),
        Question::new("f", "Finding", QuestionType::Single)
            .with_options([QuestionOption::new("m", "Mass").in_conclusion()]),
        Question::new("n", "Note", QuestionType::Text),
    ]);
    let mut state = SelectionState::new();
    state.toggle_option(&tree.questions()[0], 0).unwrap();
    state.toggle_option(&tree.questions()[1], 0).unwrap();
    state.set_report_text("f", 0, "Hepatic mass.");

    ReportDocument::new(
        "Abdomen CT",
        &assemble_report(&tree, &state),
        estimate_progress(&tree, &state),
    )
}

#[test]
fn document_context_carries_progress_and_plain_text() {
    let doc = document();
    assert_eq!(doc.percent, 67);
    assert_eq!(doc.conclusion, ["Hepatic mass."]);
    assert_eq!(
        doc.plain_text,
        "\nTECHNIQUE :\nCT.\nHepatic mass.\n\nCONCLUSION :\nHepatic mass."
    );
}

#[test]
fn default_template_renders_title_and_lines() {
    let rendered = render_template("report.txt", DEFAULT_TEMPLATE, &document()).unwrap();
    assert!(rendered.starts_with("Abdomen CT\n"));
    assert!(rendered.contains("<strong>TECHNIQUE :</strong>\nCT.\n"));
}

#[test]
fn custom_template_sees_every_field() {
    let template = "{{ title }} ({{ percent }}%, {{ answered }}/{{ reachable }})\n\
                    {% for line in conclusion %}* {{ line }}\n{% endfor %}";
    let rendered = render_template("summary.txt", template, &document()).unwrap();
    assert_eq!(rendered, "Abdomen CT (67%, 2/3)\n* Hepatic mass.\n");
}

#[test]
fn html_templates_escape_markup() {
    let rendered = render_template("report.html", "{{ lines.1 }}", &document()).unwrap();
    assert_eq!(rendered, "&lt;strong&gt;TECHNIQUE :&lt;&#x2F;strong&gt;");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_template("bad.txt", "{% for %}", &document()).unwrap_err();
    assert!(matches!(err, proforma_export::error::ExportError::TemplateParse(_)));
}

#[test]
fn docx_is_a_zip_package() {
    let doc = document();
    let bytes = generate_docx(&doc.lines.join("\n"), Some(doc.title.as_str()), &DocumentStyles::default())
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}
