use proforma_cli::commands::Session;
use proforma_cli::config::CliConfig;
use proforma_core::store::{InstanceStore, JsonDirStore};
use proforma_core::{
    Question, QuestionOption, QuestionTree, QuestionType, QuestionnaireInstance, SelectionState,
};

fn seed(dir: &std::path::Path) -> Session {
    let tree = QuestionTree::new([Question::new("q", "Finding", QuestionType::Single)
        .with_options([QuestionOption::new("o", "Foo option")])]);
    let mut state = SelectionState::new();
    let question = tree.find_question("q").unwrap();
    state.toggle_option(question, 0).unwrap();
    state.set_report_text("q", 0, "Foo <strong>bar</strong>");

    let instance = QuestionnaireInstance::from_parts("Knee MRI", &tree, &state);
    JsonDirStore::new(dir).save("knee", &instance).unwrap();

    Session::new(CliConfig {
        instances_dir: dir.to_path_buf(),
        ..CliConfig::default()
    })
}

#[test]
fn report_text_reads_the_stored_instance() {
    let dir = tempfile::tempdir().unwrap();
    let session = seed(dir.path());

    assert_eq!(session.report_text("knee", false).unwrap(), "Foo <strong>bar</strong>");
    assert_eq!(session.report_text("knee", true).unwrap(), "Foo bar");
}

#[test]
fn set_conclusion_persists_the_flag() {
    let dir = tempfile::tempdir().unwrap();
    let session = seed(dir.path());

    session.set_conclusion("knee", "0.options.0", true).unwrap();

    let text = session.report_text("knee", false).unwrap();
    assert!(text.ends_with("<strong>CONCLUSION :</strong>\nFoo <strong>bar</strong>"));

    let stored = JsonDirStore::new(dir.path()).load("knee").unwrap();
    assert!(stored.questions[0].options[0].include_in_conclusion);
    assert!(stored.saved_at.is_some());
}

#[test]
fn set_conclusion_rejects_question_paths() {
    let dir = tempfile::tempdir().unwrap();
    let session = seed(dir.path());

    assert!(session.set_conclusion("knee", "0", true).is_err());
}

#[test]
fn plain_text_export_strips_markup() {
    let dir = tempfile::tempdir().unwrap();
    let session = seed(dir.path());
    let out = dir.path().join("knee.txt");

    session.export("knee", &out, true).unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "Foo bar");
}

#[test]
fn docx_export_writes_a_zip_container() {
    let dir = tempfile::tempdir().unwrap();
    let session = seed(dir.path());
    let out = dir.path().join("knee.docx");

    session.export("knee", &out, true).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn render_uses_default_template() {
    let dir = tempfile::tempdir().unwrap();
    let session = seed(dir.path());

    let rendered = session.render_report("knee", None).unwrap();
    assert_eq!(rendered, "Knee MRI\nFoo <strong>bar</strong>\n");
}

#[test]
fn render_reads_custom_template_file() {
    let dir = tempfile::tempdir().unwrap();
    let session = seed(dir.path());
    let template = dir.path().join("summary.txt");
    std::fs::write(&template, "{{ title }}: {{ answered }}/{{ reachable }} ({{ percent }}%)").unwrap();

    let rendered = session.render_report("knee", Some(&template)).unwrap();
    assert_eq!(rendered, "Knee MRI: 1/1 (100%)");
}

#[test]
fn unknown_instance_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let session = seed(dir.path());

    assert!(session.report_text("missing", false).is_err());
    assert!(session.report_text("../escape", false).is_err());
}

#[test]
fn directory_override_leaves_config_untouched() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let configured = CliConfig {
        instances_dir: "/srv/proforma/instances".into(),
        ..CliConfig::default()
    };

    let session = Session::new(configured.clone()).with_instances_dir(dir.path().to_path_buf());

    assert_eq!(session.config(), &configured);
    assert_eq!(session.instances_dir(), dir.path());
    assert_eq!(session.report_text("knee", false).unwrap(), "Foo <strong>bar</strong>");
}
