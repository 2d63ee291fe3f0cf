use std::sync::Arc;

use proforma_geometry::Area;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Question text values the report engine treats as section markers.
pub const TECHNIQUE_MARKER: &str = "TECHNIQUE";
pub const INDICATION_MARKER: &str = "INDICATION";
pub const CONCLUSION_MARKERS: [&str; 2] = ["CONCLUSION", "Conclusion"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum QuestionType {
    /// Exactly one option may be chosen.
    Single,
    /// Any subset of options may be chosen.
    Multiple,
    Text,
    Number,
    /// Answer is a set of areas drawn over the question's image.
    ImageMap,
    /// Any type this build does not know. Never reachable, never rendered.
    #[serde(other)]
    Unsupported,
}

impl QuestionType {
    /// Types answered by picking options or areas.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Single | Self::Multiple | Self::ImageMap)
    }

    /// Types answered with a scalar free-text value.
    pub fn is_free_text(self) -> bool {
        matches!(self, Self::Text | Self::Number)
    }
}

/// Report role of a question, derived from its literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionRole {
    General,
    Technique,
    Indication,
    Conclusion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Image {
    pub src: String,
    #[serde(default)]
    pub caption: String,
}

/// One node of the questionnaire tree.
///
/// Children are reference-counted so that an edited tree shares every
/// untouched subtree with the snapshot it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub options: Vec<Arc<QuestionOption>>,
    /// Selectable regions of an `imageMap` question.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub areas: Vec<Area>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default)]
    pub important: bool,
    /// UI pagination only; ignored by every traversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            options: Vec::new(),
            areas: Vec::new(),
            image: None,
            important: false,
            page: None,
        }
    }

    pub fn with_options(mut self, options: impl IntoIterator<Item = QuestionOption>) -> Self {
        self.options = options.into_iter().map(Arc::new).collect();
        self
    }

    pub fn with_areas(mut self, areas: impl IntoIterator<Item = Area>) -> Self {
        self.areas = areas.into_iter().collect();
        self
    }

    pub fn with_image(mut self, src: impl Into<String>, caption: impl Into<String>) -> Self {
        self.image = Some(Image {
            src: src.into(),
            caption: caption.into(),
        });
        self
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn role(&self) -> QuestionRole {
        let text = self.text.as_str();
        if text == TECHNIQUE_MARKER {
            QuestionRole::Technique
        } else if text == INDICATION_MARKER {
            QuestionRole::Indication
        } else if CONCLUSION_MARKERS.contains(&text) {
            QuestionRole::Conclusion
        } else {
            QuestionRole::General
        }
    }

    /// Number of selectable choices: areas for image maps, options otherwise.
    pub fn choice_count(&self) -> usize {
        match self.kind {
            QuestionType::ImageMap => self.areas.len(),
            _ => self.options.len(),
        }
    }

    pub fn option(&self, index: usize) -> Option<&QuestionOption> {
        self.options.get(index).map(Arc::as_ref)
    }

    pub fn area(&self, index: usize) -> Option<&Area> {
        self.areas.get(index)
    }
}

/// A candidate answer to a question, possibly opening a nested subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Repeat this option's report line in the conclusion block.
    #[serde(default)]
    pub include_in_conclusion: bool,
    /// Only reachable while this option is selected.
    #[serde(default)]
    pub sub_questions: Vec<Arc<Question>>,
}

impl QuestionOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            image: None,
            include_in_conclusion: false,
            sub_questions: Vec::new(),
        }
    }

    pub fn in_conclusion(mut self) -> Self {
        self.include_in_conclusion = true;
        self
    }

    pub fn with_image(mut self, src: impl Into<String>, caption: impl Into<String>) -> Self {
        self.image = Some(Image {
            src: src.into(),
            caption: caption.into(),
        });
        self
    }

    pub fn with_sub_questions(mut self, questions: impl IntoIterator<Item = Question>) -> Self {
        self.sub_questions = questions.into_iter().map(Arc::new).collect();
        self
    }
}
