use std::sync::Arc;

use proforma_core::{Question, QuestionType, SelectionState};

/// Visit every reachable question in depth-first order.
///
/// A question is reachable when each option on its ancestor chain is
/// selected. Sub-questions of unselected options are never visited, whatever
/// their own state holds.
pub(crate) fn for_each_reachable<'a, F>(
    questions: &'a [Arc<Question>],
    state: &SelectionState,
    visit: &mut F,
) where
    F: FnMut(&'a Question),
{
    for question in questions {
        if question.kind == QuestionType::Unsupported {
            continue;
        }
        visit(&**question);

        if !state.has_selection(&question.id) {
            continue;
        }
        for (index, option) in question.options.iter().enumerate() {
            if !option.sub_questions.is_empty() && state.is_selected(&question.id, index) {
                for_each_reachable(&option.sub_questions, state, visit);
            }
        }
    }
}
