use std::sync::Arc;

use proforma_core::{
    CoreError, NodeRef, Question, QuestionOption, QuestionTree, QuestionType, TreeNode, TreePath,
};

fn sample_tree() -> QuestionTree {
    QuestionTree::new([
        Question::new("q1", "Liver", QuestionType::Single).with_options([
            QuestionOption::new("o1", "Normal"),
            QuestionOption::new("o2", "Lesion").with_sub_questions([
                Question::new("q1a", "Segment", QuestionType::Multiple).with_options([
                    QuestionOption::new("s1", "IV"),
                    QuestionOption::new("s2", "VII"),
                ]),
                Question::new("q1b", "Size (mm)", QuestionType::Number),
            ]),
        ]),
        Question::new("q2", "Comment", QuestionType::Text),
    ])
}

#[test]
fn parses_dotted_paths() {
    let path: TreePath = "0.options.1.subQuestions.0".parse().unwrap();
    assert_eq!(path, TreePath::question(0).option(1).sub_question(0));
    assert_eq!(path.to_string(), "0.options.1.subQuestions.0");
}

#[test]
fn rejects_unknown_path_steps() {
    let err = "0.choices.1".parse::<TreePath>().unwrap_err();
    assert!(matches!(err, CoreError::InvalidPath { .. }));
}

#[test]
fn json_array_paths_deserialize() {
    let path: TreePath = serde_json::from_str(r#"[0, "options", 1, "subQuestions", 1]"#).unwrap();
    assert_eq!(path, TreePath::question(0).option(1).sub_question(1));
}

#[test]
fn get_resolves_questions_and_options() {
    let tree = sample_tree();

    let NodeRef::Question(q) = tree.get(&TreePath::question(0).option(1).sub_question(1)).unwrap()
    else {
        panic!("expected a question");
    };
    assert_eq!(q.id, "q1b");

    let NodeRef::Option(o) = tree.get(&TreePath::question(0).option(1).sub_question(0).option(1)).unwrap()
    else {
        panic!("expected an option");
    };
    assert_eq!(o.id, "s2");
}

#[test]
fn update_replaces_only_the_addressed_node() {
    let tree = sample_tree();
    let path = TreePath::question(0).option(1).sub_question(0).option(0);
    let replacement = QuestionOption::new("s1", "IVa").in_conclusion();

    let edited = tree.update_at_path(&path, TreeNode::Option(replacement.clone())).unwrap();

    let NodeRef::Option(o) = edited.get(&path).unwrap() else {
        panic!("expected an option");
    };
    assert_eq!(*o, replacement);

    // The original snapshot is untouched.
    let NodeRef::Option(o) = tree.get(&path).unwrap() else {
        panic!("expected an option");
    };
    assert_eq!(o.text, "IV");
    assert!(!o.include_in_conclusion);
}

#[test]
fn update_shares_untouched_subtrees() {
    let tree = sample_tree();
    let path = TreePath::question(0).option(1).sub_question(0);
    let edited = tree
        .update_at_path(&path, TreeNode::Question(Question::new("q1a", "Segments", QuestionType::Multiple)))
        .unwrap();

    // Sibling top-level question is the same allocation.
    assert!(Arc::ptr_eq(&tree.questions()[1], &edited.questions()[1]));
    // Sibling option along the spine is shared too.
    assert!(Arc::ptr_eq(&tree.questions()[0].options[0], &edited.questions()[0].options[0]));
    // Sibling sub-question of the replaced node is shared.
    assert!(Arc::ptr_eq(
        &tree.questions()[0].options[1].sub_questions[1],
        &edited.questions()[0].options[1].sub_questions[1],
    ));
    // The spine itself was copied.
    assert!(!Arc::ptr_eq(&tree.questions()[0], &edited.questions()[0]));
}

#[test]
fn update_rejects_missing_nodes() {
    let tree = sample_tree();
    let node = TreeNode::Option(QuestionOption::new("x", "x"));

    for path in [
        TreePath::question(5),
        TreePath::question(0).option(7),
        TreePath::question(1).option(0),
        TreePath::question(0).option(0).sub_question(0),
    ] {
        let err = tree.update_at_path(&path, node.clone()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPath { .. }), "{path}: {err}");
    }
}

#[test]
fn update_rejects_empty_and_malformed_paths() {
    let tree = sample_tree();
    let node = TreeNode::Question(Question::new("x", "x", QuestionType::Text));

    assert!(tree.update_at_path(&TreePath::default(), node.clone()).is_err());
    let dangling: TreePath = "0.options".parse().unwrap();
    assert!(tree.update_at_path(&dangling, node.clone()).is_err());
    let doubled: TreePath = "0.0".parse().unwrap();
    assert!(tree.update_at_path(&doubled, node).is_err());
}

#[test]
fn update_rejects_node_kind_mismatch() {
    let tree = sample_tree();
    let err = tree
        .update_at_path(&TreePath::question(0), TreeNode::Option(QuestionOption::new("x", "x")))
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidPath { .. }));
}

#[test]
fn set_include_in_conclusion_flips_leaf_flag() {
    let tree = sample_tree();
    let path = TreePath::question(0).option(1);

    let edited = tree.set_include_in_conclusion(&path, true).unwrap();
    assert!(edited.questions()[0].options[1].include_in_conclusion);
    assert!(!tree.questions()[0].options[1].include_in_conclusion);
    // Sub-questions of the edited option are carried over, not rebuilt.
    assert!(Arc::ptr_eq(
        &tree.questions()[0].options[1].sub_questions[0],
        &edited.questions()[0].options[1].sub_questions[0],
    ));

    assert!(tree.set_include_in_conclusion(&TreePath::question(0), true).is_err());
}

#[test]
fn iter_is_depth_first_in_declaration_order() {
    let ids: Vec<_> = sample_tree().iter().map(|q| q.id.clone()).collect();
    assert_eq!(ids, ["q1", "q1a", "q1b", "q2"]);
}

#[test]
fn find_question_searches_nested_levels() {
    let tree = sample_tree();
    assert_eq!(tree.find_question("q1b").map(|q| q.kind), Some(QuestionType::Number));
    assert!(tree.find_question("nope").is_none());
}

#[test]
fn roles_follow_literal_marker_text() {
    use proforma_core::QuestionRole;

    let role = |text: &str| Question::new("q", text, QuestionType::Text).role();
    assert_eq!(role("TECHNIQUE"), QuestionRole::Technique);
    assert_eq!(role("INDICATION"), QuestionRole::Indication);
    assert_eq!(role("CONCLUSION"), QuestionRole::Conclusion);
    assert_eq!(role("Conclusion"), QuestionRole::Conclusion);
    assert_eq!(role("Technique"), QuestionRole::General);
}
