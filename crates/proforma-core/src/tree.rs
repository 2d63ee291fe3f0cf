//! The questionnaire tree and its path-addressed edit primitive.
//!
//! A [`TreePath`] alternates between indices and the `options` /
//! `subQuestions` tokens, starting with an index into the top-level
//! question list: `0.options.1.subQuestions.0` names the first sub-question
//! of the second option of the first question.
//!
//! Edits never mutate a tree in place. [`QuestionTree::update_at_path`]
//! returns a new tree that copies only the spine from the root to the
//! replaced node; every other subtree is shared with the original.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::question::{Question, QuestionOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathToken {
    #[serde(rename = "options")]
    Options,
    #[serde(rename = "subQuestions")]
    SubQuestions,
}

impl PathToken {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::SubQuestions => "subQuestions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    Index(usize),
    Token(PathToken),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreePath(Vec<PathStep>);

impl TreePath {
    /// Path to a top-level question.
    pub fn question(index: usize) -> Self {
        Self(vec![PathStep::Index(index)])
    }

    /// Extend a question path to one of its options.
    pub fn option(mut self, index: usize) -> Self {
        self.0.push(PathStep::Token(PathToken::Options));
        self.0.push(PathStep::Index(index));
        self
    }

    /// Extend an option path to one of its sub-questions.
    pub fn sub_question(mut self, index: usize) -> Self {
        self.0.push(PathStep::Token(PathToken::SubQuestions));
        self.0.push(PathStep::Index(index));
        self
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn invalid(&self, reason: impl Into<String>) -> CoreError {
        CoreError::InvalidPath {
            path: self.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<Vec<PathStep>> for TreePath {
    fn from(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match step {
                PathStep::Index(index) => write!(f, "{index}")?,
                PathStep::Token(token) => f.write_str(token.as_str())?,
            }
        }
        Ok(())
    }
}

impl FromStr for TreePath {
    type Err = CoreError;

    /// Parse the dotted form, e.g. `2.options.0.subQuestions.1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split('.')
            .map(|part| match part {
                "options" => Ok(PathStep::Token(PathToken::Options)),
                "subQuestions" => Ok(PathStep::Token(PathToken::SubQuestions)),
                digits => digits.parse().map(PathStep::Index).map_err(|_| {
                    CoreError::InvalidPath {
                        path: s.to_string(),
                        reason: format!("unexpected step `{part}`"),
                    }
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(steps))
    }
}

/// A replacement node for [`QuestionTree::update_at_path`].
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Question(Question),
    Option(QuestionOption),
}

/// A borrowed node returned by [`QuestionTree::get`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Question(&'a Question),
    Option(&'a QuestionOption),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionTree {
    questions: Vec<Arc<Question>>,
}

impl QuestionTree {
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            questions: questions.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_shared(questions: Vec<Arc<Question>>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Every question in depth-first, declaration order, regardless of
    /// selection state.
    pub fn iter(&self) -> Questions<'_> {
        Questions {
            stack: self.questions.iter().rev().map(Arc::as_ref).collect(),
        }
    }

    pub fn find_question(&self, id: &str) -> Option<&Question> {
        self.iter().find(|q| q.id == id)
    }

    pub fn get(&self, path: &TreePath) -> Result<NodeRef<'_>, CoreError> {
        let mut steps = path.steps().iter();
        let mut questions = self.questions.as_slice();

        loop {
            let question = match steps.next() {
                Some(PathStep::Index(i)) => questions
                    .get(*i)
                    .ok_or_else(|| path.invalid(format!("no question at index {i}")))?,
                Some(PathStep::Token(t)) => {
                    return Err(path.invalid(format!("expected an index, found `{}`", t.as_str())));
                }
                None => return Err(path.invalid("path is empty")),
            };

            match steps.next() {
                None => return Ok(NodeRef::Question(&**question)),
                Some(PathStep::Token(PathToken::Options)) => {}
                Some(other) => return Err(path.invalid(unexpected(other, PathToken::Options))),
            }

            let option = match steps.next() {
                Some(PathStep::Index(i)) => question
                    .options
                    .get(*i)
                    .ok_or_else(|| path.invalid(format!("no option at index {i}")))?,
                _ => return Err(path.invalid("`options` must be followed by an index")),
            };

            match steps.next() {
                None => return Ok(NodeRef::Option(&**option)),
                Some(PathStep::Token(PathToken::SubQuestions)) => {}
                Some(other) => {
                    return Err(path.invalid(unexpected(other, PathToken::SubQuestions)));
                }
            }

            questions = option.sub_questions.as_slice();
        }
    }

    /// Replace exactly the node at `path`, returning the edited tree.
    ///
    /// `self` is left untouched, so readers holding it keep a consistent
    /// snapshot. Fails with [`CoreError::InvalidPath`] if the path does not
    /// address an existing node of the replacement's kind.
    pub fn update_at_path(&self, path: &TreePath, node: TreeNode) -> Result<QuestionTree, CoreError> {
        let questions = replace_in_questions(&self.questions, path.steps(), path, node)?;
        tracing::debug!(path = %path, "tree node replaced");
        Ok(QuestionTree { questions })
    }

    /// Toggle the conclusion flag on the option at `path`.
    pub fn set_include_in_conclusion(
        &self,
        path: &TreePath,
        include: bool,
    ) -> Result<QuestionTree, CoreError> {
        let NodeRef::Option(option) = self.get(path)? else {
            return Err(path.invalid("path addresses a question, not an option"));
        };
        let mut option = option.clone();
        option.include_in_conclusion = include;
        self.update_at_path(path, TreeNode::Option(option))
    }
}

impl From<Vec<Question>> for QuestionTree {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}

/// Depth-first iterator over every question in a tree.
pub struct Questions<'a> {
    stack: Vec<&'a Question>,
}

impl<'a> Iterator for Questions<'a> {
    type Item = &'a Question;

    fn next(&mut self) -> Option<Self::Item> {
        let question = self.stack.pop()?;
        let children = question
            .options
            .iter()
            .flat_map(|o| o.sub_questions.iter())
            .map(Arc::as_ref);
        let mark = self.stack.len();
        self.stack.extend(children);
        self.stack[mark..].reverse();
        Some(question)
    }
}

fn unexpected(step: &PathStep, wanted: PathToken) -> String {
    match step {
        PathStep::Index(i) => format!("expected `{}`, found index {i}", wanted.as_str()),
        PathStep::Token(t) => format!("expected `{}`, found `{}`", wanted.as_str(), t.as_str()),
    }
}

fn replace_in_questions(
    questions: &[Arc<Question>],
    steps: &[PathStep],
    path: &TreePath,
    node: TreeNode,
) -> Result<Vec<Arc<Question>>, CoreError> {
    let Some((PathStep::Index(index), rest)) = steps.split_first() else {
        return Err(path.invalid("expected a question index"));
    };
    let current = questions
        .get(*index)
        .ok_or_else(|| path.invalid(format!("no question at index {index}")))?;

    let replacement = match rest.split_first() {
        None => match node {
            TreeNode::Question(question) => question,
            TreeNode::Option(_) => {
                return Err(path.invalid("path addresses a question, got an option"));
            }
        },
        Some((PathStep::Token(PathToken::Options), rest)) => {
            let mut question = Question::clone(current);
            question.options = replace_in_options(&current.options, rest, path, node)?;
            question
        }
        Some((other, _)) => return Err(path.invalid(unexpected(other, PathToken::Options))),
    };

    let mut spine = questions.to_vec();
    spine[*index] = Arc::new(replacement);
    Ok(spine)
}

fn replace_in_options(
    options: &[Arc<QuestionOption>],
    steps: &[PathStep],
    path: &TreePath,
    node: TreeNode,
) -> Result<Vec<Arc<QuestionOption>>, CoreError> {
    let Some((PathStep::Index(index), rest)) = steps.split_first() else {
        return Err(path.invalid("`options` must be followed by an index"));
    };
    let current = options
        .get(*index)
        .ok_or_else(|| path.invalid(format!("no option at index {index}")))?;

    let replacement = match rest.split_first() {
        None => match node {
            TreeNode::Option(option) => option,
            TreeNode::Question(_) => {
                return Err(path.invalid("path addresses an option, got a question"));
            }
        },
        Some((PathStep::Token(PathToken::SubQuestions), rest)) => {
            let mut option = QuestionOption::clone(current);
            option.sub_questions = replace_in_questions(&current.sub_questions, rest, path, node)?;
            option
        }
        Some((other, _)) => return Err(path.invalid(unexpected(other, PathToken::SubQuestions))),
    };

    let mut spine = options.to_vec();
    spine[*index] = Arc::new(replacement);
    Ok(spine)
}
