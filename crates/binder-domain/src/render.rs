//! View descriptions.
//!
//! Pure functions from model snapshots to the structures a front end draws.
//! Nothing here knows about markup or terminals.

use crate::export::ExportArtifact;
use crate::preview::PreviewFile;
use crate::task::{Task, TaskId};
use serde::Serialize;

/// One rendered row of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskItem {
    pub element_id: String,
    pub task_id: TaskId,
    pub title: String,
}

impl TaskItem {
    pub fn element_id_for(id: TaskId) -> String {
        format!("task-{}", id)
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            element_id: Self::element_id_for(task.id),
            task_id: task.id,
            title: task.title.clone(),
        }
    }
}

/// State of the export control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExportLink {
    Disabled,
    Enabled {
        download: String,
        href: String,
        #[serde(skip)]
        artifact: ExportArtifact,
    },
}

impl ExportLink {
    pub fn for_artifact(artifact: ExportArtifact) -> Self {
        ExportLink::Enabled {
            download: artifact.file_name.clone(),
            href: artifact.object_url(),
            artifact,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, ExportLink::Disabled)
    }

    pub fn artifact(&self) -> Option<&ExportArtifact> {
        match self {
            ExportLink::Disabled => None,
            ExportLink::Enabled { artifact, .. } => Some(artifact),
        }
    }
}

/// One gallery entry of the preview widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewCard {
    pub src: String,
    pub name: String,
    pub size: u64,
}

impl PreviewCard {
    /// `None` until the file has been read.
    pub fn from_preview(item: &PreviewFile) -> Option<Self> {
        let src = item.data_url.as_ref()?;
        if !item.is_ready() {
            return None;
        }
        Some(Self {
            src: src.clone(),
            name: item.file.name.clone(),
            size: item.file.size,
        })
    }

    pub fn caption(&self) -> [String; 2] {
        [
            format!("name: {}", self.name),
            format!("size: {}(byte)", self.size),
        ]
    }
}
