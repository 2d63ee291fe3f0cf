//! Report assembly.
//!
//! Walks the tree depth-first, left to right, guided by the selection state,
//! and renders each reachable answer into report lines. Lines from options
//! flagged `includeInConclusion` are collected a second time and replayed
//! under a synthesized conclusion heading at the end.

use std::sync::Arc;

use proforma_core::{Question, QuestionRole, QuestionTree, QuestionType, SelectionState};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::markup::{opens_section, section_title};

pub const TECHNIQUE_LABEL: &str = "TECHNIQUE";
pub const INDICATION_LABEL: &str = "INDICATION";
pub const CONCLUSION_LABEL: &str = "CONCLUSION";

/// An assembled report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    /// Final report lines, conclusion block included.
    pub lines: Vec<String>,
    /// Conclusion lines in collection order, without the heading.
    pub conclusion: Vec<String>,
}

impl Report {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Render `state` against `tree`.
///
/// Pure and deterministic: identical inputs give byte-identical output.
/// Selections pointing at options that no longer exist are skipped.
pub fn assemble_report(tree: &QuestionTree, state: &SelectionState) -> Report {
    let mut writer = ReportWriter::default();
    writer.questions(tree.questions(), state);
    writer.finish()
}

#[derive(Default)]
struct ReportWriter {
    lines: Vec<String>,
    conclusion: Vec<String>,
}

impl ReportWriter {
    /// Append a line, opening a paragraph first if the line is a section
    /// opener.
    fn push(&mut self, line: String) {
        if opens_section(&line) {
            self.lines.push(String::new());
        }
        self.lines.push(line);
    }

    fn questions(&mut self, questions: &[Arc<Question>], state: &SelectionState) {
        for question in questions {
            self.question(question, state);
        }
    }

    fn question(&mut self, question: &Question, state: &SelectionState) {
        match question.role() {
            // The conclusion is always synthesized, never copied from a field.
            QuestionRole::Conclusion => return,
            QuestionRole::Technique => {
                self.technique(question, state);
                return;
            }
            QuestionRole::General | QuestionRole::Indication => {}
        }

        match question.kind {
            QuestionType::Text | QuestionType::Number => self.free_text(question, state),
            QuestionType::Single | QuestionType::Multiple => self.options(question, state),
            QuestionType::ImageMap => self.areas(question, state),
            QuestionType::Unsupported => {}
        }
    }

    fn free_text(&mut self, question: &Question, state: &SelectionState) {
        let Some(value) = state.free_text(&question.id).filter(|v| !v.trim().is_empty()) else {
            return;
        };
        if question.role() == QuestionRole::Indication {
            self.push(section_title(INDICATION_LABEL));
        }
        self.push(value.to_string());
    }

    /// Technique items are summarized on one line from their plain labels.
    fn technique(&mut self, question: &Question, state: &SelectionState) {
        let labels: Vec<&str> = state
            .selected_unique(&question.id)
            .filter_map(|index| question.option(index))
            .map(|option| option.text.as_str())
            .collect();

        if !labels.is_empty() {
            self.push(section_title(TECHNIQUE_LABEL));
            self.push(format!("{}.", labels.join(", ")));
        }

        for index in state.selected_unique(&question.id) {
            if let Some(option) = question.option(index) {
                self.questions(&option.sub_questions, state);
            }
        }
    }

    fn options(&mut self, question: &Question, state: &SelectionState) {
        for index in state.selected_unique(&question.id) {
            let Some(option) = question.option(index) else {
                tracing::debug!(question = %question.id, index, "skipping stale option index");
                continue;
            };

            // Only an explicit override is rendered for a general option.
            match state.report_text(&question.id, index).filter(|t| !t.trim().is_empty()) {
                Some(line) => {
                    self.push(line.to_string());
                    if option.include_in_conclusion {
                        self.conclusion.push(line.to_string());
                    }
                }
                None => {
                    tracing::trace!(question = %question.id, index, "option has no report text");
                }
            }

            self.questions(&option.sub_questions, state);
        }
    }

    fn areas(&mut self, question: &Question, state: &SelectionState) {
        for index in state.selected_unique(&question.id) {
            let Some(area) = question.area(index) else {
                tracing::debug!(question = %question.id, index, "skipping stale area index");
                continue;
            };

            let line = state
                .report_text(&question.id, index)
                .or(area.cr_text.as_deref())
                .filter(|t| !t.trim().is_empty());
            match line {
                Some(line) => self.push(line.to_string()),
                None => tracing::trace!(question = %question.id, index, "area has no report text"),
            }
        }
    }

    fn finish(mut self) -> Report {
        if !self.conclusion.is_empty() {
            self.push(section_title(CONCLUSION_LABEL));
            let conclusion = std::mem::take(&mut self.conclusion);
            for line in &conclusion {
                self.push(line.clone());
            }
            self.conclusion = conclusion;
        }

        Report {
            lines: self.lines,
            conclusion: self.conclusion,
        }
    }
}
