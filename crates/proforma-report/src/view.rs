use std::sync::Arc;

use proforma_core::{Question, QuestionTree, QuestionType, SelectionState, TreePath};

/// One row of the filled-in view.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleQuestion<'a> {
    pub question: &'a Question,
    pub depth: usize,
    pub path: TreePath,
}

/// Reachable questions the author has not hidden, in traversal order.
///
/// Hiding a question hides its sub-questions with it.
pub fn visible_questions<'a>(
    tree: &'a QuestionTree,
    state: &SelectionState,
) -> Vec<VisibleQuestion<'a>> {
    let mut rows = Vec::new();
    for (index, question) in tree.questions().iter().enumerate() {
        collect(question, TreePath::question(index), 0, state, &mut rows);
    }
    rows
}

fn collect<'a>(
    question: &'a Arc<Question>,
    path: TreePath,
    depth: usize,
    state: &SelectionState,
    rows: &mut Vec<VisibleQuestion<'a>>,
) {
    if question.kind == QuestionType::Unsupported || state.is_hidden(&question.id) {
        return;
    }

    rows.push(VisibleQuestion {
        question: &**question,
        depth,
        path: path.clone(),
    });

    for (option_index, option) in question.options.iter().enumerate() {
        if !state.is_selected(&question.id, option_index) {
            continue;
        }
        for (sub_index, sub) in option.sub_questions.iter().enumerate() {
            let sub_path = path.clone().option(option_index).sub_question(sub_index);
            collect(sub, sub_path, depth + 1, state, rows);
        }
    }
}
