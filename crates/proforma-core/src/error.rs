use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid tree path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("question `{0}` does not take option selections")]
    NotChoiceQuestion(String),

    #[error("option index {index} out of range for question `{question_id}` ({len} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        len: usize,
    },

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("invalid instance identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("document format version {found} is newer than supported ({supported})")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
