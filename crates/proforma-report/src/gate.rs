//! Pre-export confirmation gate.
//!
//! Unanswered important questions never block an export; they only require
//! the user to confirm before the report text is released.

use proforma_core::{QuestionTree, SelectionState};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::assemble::{assemble_report, Report};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnansweredQuestion {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    Cancel,
}

/// Important questions anywhere in the tree that have no answer.
///
/// Questions under unselected options are included: the author flagged
/// them, and the user decides whether their branch matters.
pub fn unanswered_important(tree: &QuestionTree, state: &SelectionState) -> Vec<UnansweredQuestion> {
    tree.iter()
        .filter(|question| question.important && !state.is_answered(question))
        .map(|question| UnansweredQuestion {
            id: question.id.clone(),
            text: question.text.clone(),
        })
        .collect()
}

/// A report waiting to be handed to the export collaborator.
#[derive(Debug, Clone)]
pub struct PendingExport {
    report: Report,
    unanswered: Vec<UnansweredQuestion>,
}

pub fn prepare_export(tree: &QuestionTree, state: &SelectionState) -> PendingExport {
    PendingExport {
        report: assemble_report(tree, state),
        unanswered: unanswered_important(tree, state),
    }
}

impl PendingExport {
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn unanswered(&self) -> &[UnansweredQuestion] {
        &self.unanswered
    }

    pub fn needs_confirmation(&self) -> bool {
        !self.unanswered.is_empty()
    }

    /// Confirmation message naming the unanswered questions, if one is due.
    pub fn prompt(&self) -> Option<String> {
        if !self.needs_confirmation() {
            return None;
        }
        let names: Vec<&str> = self.unanswered.iter().map(|q| q.text.as_str()).collect();
        Some(format!(
            "The following important questions are unanswered: {}. Export anyway?",
            names.join(", ")
        ))
    }

    /// Release the report text. A cancel only matters when confirmation was
    /// due.
    pub fn release(self, confirmation: Confirmation) -> Option<String> {
        if self.needs_confirmation() && confirmation == Confirmation::Cancel {
            tracing::info!(unanswered = self.unanswered.len(), "export cancelled");
            return None;
        }
        Some(self.report.text())
    }
}
