//! The persisted questionnaire instance: tree snapshot plus answer state.
//!
//! This is the document handed to and received from storage. Every field
//! except `questions` is optional on load and defaults to empty.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::question::Question;
use crate::models::selection::{
    FreeTexts, HiddenQuestions, ReportTexts, SelectedOptions, SelectionState,
};
use crate::tree::QuestionTree;

/// Current document version. Bump this when changing the shape, and add a
/// step to [`migrate`].
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportData {
    #[serde(default)]
    pub report_texts: ReportTexts,
    #[serde(default)]
    pub free_texts: FreeTexts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionnaireInstance {
    /// Missing or 0 = legacy document.
    #[serde(default)]
    pub format_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    pub questions: Vec<Arc<Question>>,
    #[serde(default)]
    pub selected_options: SelectedOptions,
    #[serde(default)]
    pub report_data: ReportData,
    #[serde(default)]
    pub hidden_questions: HiddenQuestions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<jiff::Timestamp>,
}

impl QuestionnaireInstance {
    /// Start a fresh instance with empty answer state.
    pub fn new(title: impl Into<String>, tree: &QuestionTree) -> Self {
        Self::from_parts(title, tree, &SelectionState::default())
    }

    pub fn from_parts(title: impl Into<String>, tree: &QuestionTree, state: &SelectionState) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            id: None,
            title: title.into(),
            questions: tree.questions().to_vec(),
            selected_options: state.selected_options().clone(),
            report_data: ReportData {
                report_texts: state.report_texts().clone(),
                free_texts: state.free_texts().clone(),
            },
            hidden_questions: state.hidden_questions().clone(),
            saved_at: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn tree(&self) -> QuestionTree {
        QuestionTree::from_shared(self.questions.clone())
    }

    pub fn selection(&self) -> SelectionState {
        SelectionState::from_parts(
            self.selected_options.clone(),
            self.report_data.free_texts.clone(),
            self.report_data.report_texts.clone(),
            self.hidden_questions.clone(),
        )
    }

    /// Replace the answer state, keeping the tree snapshot.
    pub fn set_selection(&mut self, state: &SelectionState) {
        self.selected_options = state.selected_options().clone();
        self.report_data = ReportData {
            report_texts: state.report_texts().clone(),
            free_texts: state.free_texts().clone(),
        };
        self.hidden_questions = state.hidden_questions().clone();
    }

    /// Replace the tree snapshot, keeping the answer state.
    pub fn set_tree(&mut self, tree: &QuestionTree) {
        self.questions = tree.questions().to_vec();
    }

    /// Parse a document, migrating older versions first.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(json)?;
        let on_disk_version = stored_version(&value)?;

        let migrated = migrate(value, on_disk_version)?;
        Ok(serde_json::from_value(migrated)?)
    }

    /// Serialize, always stamped with the current version.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        let mut stamped = self.clone();
        stamped.format_version = FORMAT_VERSION;
        Ok(serde_json::to_string_pretty(&stamped)?)
    }
}

/// `formatVersion` as written, 0 when absent. Anything but a non-negative
/// integer is malformed.
fn stored_version(json: &Value) -> Result<u64, CoreError> {
    match json.get("formatVersion") {
        None | Some(Value::Null) => Ok(0),
        Some(version) => version.as_u64().ok_or_else(|| {
            CoreError::MalformedDocument(format!(
                "formatVersion must be a non-negative integer, got {version}"
            ))
        }),
    }
}

/// Run sequential migrations from `from_version` up to [`FORMAT_VERSION`].
fn migrate(mut json: Value, from_version: u64) -> Result<Value, CoreError> {
    if from_version > u64::from(FORMAT_VERSION) {
        return Err(CoreError::UnsupportedVersion {
            found: from_version,
            supported: FORMAT_VERSION,
        });
    }

    // v0 → v1: report overrides moved from `reportData.crTexts` to
    // `reportData.reportTexts`.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| CoreError::MalformedDocument("document is not a JSON object".into()))?;

        if let Some(report_data) = obj.get_mut("reportData").and_then(Value::as_object_mut)
            && let Some(legacy) = report_data.remove("crTexts")
        {
            report_data.entry("reportTexts").or_insert(legacy);
        }
        obj.insert("formatVersion".to_string(), Value::Number(1.into()));
        tracing::info!("migrated instance document v0 → v1 (crTexts → reportTexts)");
    }

    Ok(json)
}
