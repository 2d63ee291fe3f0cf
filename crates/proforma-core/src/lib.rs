//! proforma-core
//!
//! Questionnaire domain types: the recursive question tree, path-addressed
//! copy-on-write edits, the per-instance selection state, and the persisted
//! instance document exchanged with storage.

pub mod error;
pub mod models;
pub mod store;
pub mod tree;

pub use error::CoreError;
pub use models::instance::{QuestionnaireInstance, ReportData};
pub use models::question::{Image, Question, QuestionOption, QuestionRole, QuestionType};
pub use models::selection::{SelectionIssue, SelectionState};
pub use tree::{NodeRef, PathStep, PathToken, QuestionTree, TreeNode, TreePath};
