//! Per-instance answer state.
//!
//! Entries are keyed by question id and are never pruned when an ancestor
//! option is deselected: stale entries are masked by the traversals instead,
//! so re-selecting the option restores everything that was entered beneath
//! it.

use std::collections::{BTreeMap, HashMap};

use proforma_geometry::{hit_test, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::question::{Question, QuestionType};
use crate::tree::QuestionTree;

pub type SelectedOptions = BTreeMap<String, Vec<usize>>;
pub type FreeTexts = BTreeMap<String, String>;
pub type ReportTexts = BTreeMap<String, BTreeMap<usize, String>>;
pub type HiddenQuestions = BTreeMap<String, bool>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected_options: SelectedOptions,
    free_texts: FreeTexts,
    report_texts: ReportTexts,
    hidden_questions: HiddenQuestions,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        selected_options: SelectedOptions,
        free_texts: FreeTexts,
        report_texts: ReportTexts,
        hidden_questions: HiddenQuestions,
    ) -> Self {
        Self {
            selected_options,
            free_texts,
            report_texts,
            hidden_questions,
        }
    }

    pub fn selected_options(&self) -> &SelectedOptions {
        &self.selected_options
    }

    pub fn free_texts(&self) -> &FreeTexts {
        &self.free_texts
    }

    pub fn report_texts(&self) -> &ReportTexts {
        &self.report_texts
    }

    pub fn hidden_questions(&self) -> &HiddenQuestions {
        &self.hidden_questions
    }

    /// Chosen indices for a question, in the order they were chosen.
    pub fn selected(&self, question_id: &str) -> &[usize] {
        self.selected_options
            .get(question_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Chosen indices with repeats dropped, first occurrence wins.
    ///
    /// Loaded documents are not trusted to keep the set property.
    pub fn selected_unique(&self, question_id: &str) -> impl Iterator<Item = usize> + '_ {
        let mut seen = Vec::new();
        self.selected(question_id).iter().copied().filter(move |index| {
            if seen.contains(index) {
                false
            } else {
                seen.push(*index);
                true
            }
        })
    }

    pub fn is_selected(&self, question_id: &str, index: usize) -> bool {
        self.selected(question_id).contains(&index)
    }

    pub fn has_selection(&self, question_id: &str) -> bool {
        !self.selected(question_id).is_empty()
    }

    /// Flip one choice of a `single`, `multiple` or `imageMap` question.
    ///
    /// On a `single` question choosing a new option replaces the previous
    /// one and choosing the current one clears it. Returns whether the
    /// choice is selected afterwards.
    pub fn toggle_option(&mut self, question: &Question, index: usize) -> Result<bool, CoreError> {
        if !question.kind.is_choice() {
            return Err(CoreError::NotChoiceQuestion(question.id.clone()));
        }
        let len = question.choice_count();
        if index >= len {
            return Err(CoreError::OptionOutOfRange {
                question_id: question.id.clone(),
                index,
                len,
            });
        }

        let was_selected = self.is_selected(&question.id, index);
        let entry = self.selected_options.entry(question.id.clone()).or_default();

        match (question.kind, was_selected) {
            (QuestionType::Single, true) => entry.clear(),
            (QuestionType::Single, false) => *entry = vec![index],
            (_, true) => entry.retain(|&i| i != index),
            (_, false) => entry.push(index),
        }
        if entry.is_empty() {
            self.selected_options.remove(&question.id);
        }

        if !was_selected && question.kind == QuestionType::ImageMap {
            self.prefill_area_text(question, index);
        }

        tracing::trace!(question = %question.id, index, selected = !was_selected, "choice toggled");
        Ok(!was_selected)
    }

    /// Toggle whichever area of an image-map question lies under `point`.
    ///
    /// Returns the toggled area index, or `None` when the point hits no area.
    pub fn toggle_area_at(
        &mut self,
        question: &Question,
        point: Point,
    ) -> Result<Option<usize>, CoreError> {
        if question.kind != QuestionType::ImageMap {
            return Err(CoreError::NotChoiceQuestion(question.id.clone()));
        }
        let Some(index) = hit_test(&question.areas, point) else {
            return Ok(None);
        };
        self.toggle_option(question, index)?;
        Ok(Some(index))
    }

    pub fn clear_selection(&mut self, question_id: &str) {
        self.selected_options.remove(question_id);
    }

    pub fn free_text(&self, question_id: &str) -> Option<&str> {
        self.free_texts.get(question_id).map(String::as_str)
    }

    pub fn set_free_text(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.free_texts.insert(question_id.into(), value.into());
    }

    pub fn clear_free_text(&mut self, question_id: &str) {
        self.free_texts.remove(question_id);
    }

    /// Report-text override for one choice of a question.
    pub fn report_text(&self, question_id: &str, index: usize) -> Option<&str> {
        self.report_texts
            .get(question_id)
            .and_then(|texts| texts.get(&index))
            .map(String::as_str)
    }

    pub fn set_report_text(
        &mut self,
        question_id: impl Into<String>,
        index: usize,
        text: impl Into<String>,
    ) {
        self.report_texts
            .entry(question_id.into())
            .or_default()
            .insert(index, text.into());
    }

    pub fn clear_report_text(&mut self, question_id: &str, index: usize) {
        if let Some(texts) = self.report_texts.get_mut(question_id) {
            texts.remove(&index);
            if texts.is_empty() {
                self.report_texts.remove(question_id);
            }
        }
    }

    pub fn is_hidden(&self, question_id: &str) -> bool {
        self.hidden_questions.get(question_id).copied().unwrap_or(false)
    }

    pub fn set_hidden(&mut self, question_id: impl Into<String>, hidden: bool) {
        self.hidden_questions.insert(question_id.into(), hidden);
    }

    /// A question is answered once it has a choice or non-blank free text.
    pub fn is_answered(&self, question: &Question) -> bool {
        self.has_selection(&question.id)
            || self
                .free_text(&question.id)
                .is_some_and(|text| !text.trim().is_empty())
    }

    /// Check the state against a tree without modifying either.
    ///
    /// Issues are informational: traversals already skip everything
    /// reported here.
    pub fn validate(&self, tree: &QuestionTree) -> Vec<SelectionIssue> {
        let questions: HashMap<&str, &Question> =
            tree.iter().map(|q| (q.id.as_str(), q)).collect();

        let mut issues = Vec::new();
        for (question_id, indices) in &self.selected_options {
            let Some(question) = questions.get(question_id.as_str()) else {
                issues.push(SelectionIssue::UnknownQuestion {
                    question_id: question_id.clone(),
                });
                continue;
            };

            let len = question.choice_count();
            for (pos, &index) in indices.iter().enumerate() {
                if index >= len {
                    issues.push(SelectionIssue::IndexOutOfRange {
                        question_id: question_id.clone(),
                        index,
                        len,
                    });
                }
                if indices[..pos].contains(&index) {
                    issues.push(SelectionIssue::DuplicateIndex {
                        question_id: question_id.clone(),
                        index,
                    });
                }
            }

            if question.kind == QuestionType::Single && indices.len() > 1 {
                issues.push(SelectionIssue::MultipleOnSingle {
                    question_id: question_id.clone(),
                    count: indices.len(),
                });
            }
        }
        issues
    }

    fn prefill_area_text(&mut self, question: &Question, index: usize) {
        if self.report_text(&question.id, index).is_some() {
            return;
        }
        if let Some(cr_text) = question.area(index).and_then(|a| a.cr_text.as_deref()) {
            self.set_report_text(question.id.clone(), index, cr_text);
        }
    }
}

/// A selection entry that does not fit the current tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum SelectionIssue {
    #[error("selection for unknown question `{question_id}`")]
    UnknownQuestion { question_id: String },

    #[error("question `{question_id}`: index {index} out of range ({len} choices)")]
    IndexOutOfRange {
        question_id: String,
        index: usize,
        len: usize,
    },

    #[error("question `{question_id}`: index {index} selected more than once")]
    DuplicateIndex { question_id: String, index: usize },

    #[error("single-choice question `{question_id}` has {count} selections")]
    MultipleOnSingle { question_id: String, count: usize },
}
