//! Storage boundary for questionnaire instances.
//!
//! The engine never talks to storage itself; hosts hand it the result of a
//! load and hand the result of an edit back to a save. One call per user
//! action, no retries and no de-duplication, so concurrent saves of the same
//! instance are last-write-wins.

use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::models::instance::QuestionnaireInstance;

pub trait InstanceStore {
    fn load(&self, id: &str) -> Result<QuestionnaireInstance, CoreError>;

    fn save(&self, id: &str, instance: &QuestionnaireInstance) -> Result<(), CoreError>;
}

/// Stores each instance as `<root>/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &str) -> Result<PathBuf, CoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
        if !valid {
            return Err(CoreError::InvalidIdentifier(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

impl InstanceStore for JsonDirStore {
    fn load(&self, id: &str) -> Result<QuestionnaireInstance, CoreError> {
        let path = self.path_for(id)?;
        let contents = std::fs::read_to_string(&path)?;
        let instance = QuestionnaireInstance::from_json(&contents)?;
        tracing::info!(path = %path.display(), questions = instance.questions.len(), "instance loaded");
        Ok(instance)
    }

    fn save(&self, id: &str, instance: &QuestionnaireInstance) -> Result<(), CoreError> {
        let path = self.path_for(id)?;
        std::fs::create_dir_all(&self.root)?;

        let mut stamped = instance.clone();
        stamped.saved_at = Some(jiff::Timestamp::now());
        let json = stamped.to_json_pretty()?;

        // Write to a temp file then rename for atomicity
        let tmp_path = self.root.join(format!("{id}.json.tmp"));
        std::fs::write(&tmp_path, json.as_bytes())?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::info!(path = %path.display(), "instance saved");
        Ok(())
    }
}
