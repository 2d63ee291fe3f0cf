//! Progress over the currently navigable part of the tree.

use std::sync::Arc;

use proforma_core::{Question, QuestionTree, SelectionState};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::reachable::for_each_reachable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Progress {
    pub reachable: usize,
    pub answered: usize,
}

impl Progress {
    /// Rounded percentage answered; 0 when nothing is reachable.
    pub fn percent(&self) -> u8 {
        if self.reachable == 0 {
            return 0;
        }
        (100.0 * self.answered as f64 / self.reachable as f64).round() as u8
    }
}

pub fn estimate_progress(tree: &QuestionTree, state: &SelectionState) -> Progress {
    let mut progress = Progress::default();
    for_each_reachable(tree.questions(), state, &mut |question| {
        progress.reachable += 1;
        if state.is_answered(question) {
            progress.answered += 1;
        }
    });
    progress
}

/// Questions whose whole ancestor chain of options is selected.
pub fn count_reachable(questions: &[Arc<Question>], state: &SelectionState) -> usize {
    let mut count = 0;
    for_each_reachable(questions, state, &mut |_| count += 1);
    count
}

/// Reachable questions with a selection or non-blank free text.
pub fn count_answered(questions: &[Arc<Question>], state: &SelectionState) -> usize {
    let mut count = 0;
    for_each_reachable(questions, state, &mut |question| {
        if state.is_answered(question) {
            count += 1;
        }
    });
    count
}
