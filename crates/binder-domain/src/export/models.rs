//! Export data models.

use crate::task::{Task, TaskId};
use binder_core::{BinderResult, IdIssuer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A task as found in an import file. `id` may be absent, in which case a
/// fresh one is issued when the record becomes a [`Task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskRecord {
    pub fn into_task(self, ids: &mut IdIssuer) -> BinderResult<Task> {
        let id = match self.id {
            Some(id) => id,
            None => TaskId(ids.next_id()?),
        };
        Ok(Task {
            id,
            title: self.title,
            extra: self.extra,
        })
    }
}

/// The downloadable export: a named JSON blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Object URL token the export link points at.
    pub fn object_url(&self) -> String {
        format!("blob:binder/{}", self.file_name)
    }
}

/// Why a file was refused before any read was issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportRejection {
    #[error("no file chosen")]
    NoFile,
    #[error("{0} is not an exported task file")]
    WrongName(String),
}
