//! Task list export.
//!
//! Converts the task collection into the portable JSON format.

use super::models::ExportArtifact;
use super::EXPORT_PREFIX;
use crate::collection::Collection;
use crate::task::Task;
use binder_core::BinderResult;
use chrono::{DateTime, Utc};

pub struct TaskExporter;

impl TaskExporter {
    /// Serialize the collection to a compact JSON array.
    pub fn to_json(tasks: &Collection<Task>) -> BinderResult<String> {
        tasks.to_json()
    }

    /// `mytask` + epoch milliseconds + `.json`.
    pub fn file_name(now: DateTime<Utc>) -> String {
        format!("{}{}.json", EXPORT_PREFIX, now.timestamp_millis())
    }

    /// Snapshot the collection as it is right now.
    pub fn artifact(tasks: &Collection<Task>, now: DateTime<Utc>) -> BinderResult<ExportArtifact> {
        let json = Self::to_json(tasks)?;
        Ok(ExportArtifact {
            file_name: Self::file_name(now),
            content_type: "application/json",
            bytes: json.into_bytes(),
        })
    }
}
