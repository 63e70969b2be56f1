use super::models::{ImportRejection, TaskRecord};
use super::EXPORT_PREFIX;
use crate::file::FileHandle;
use crate::task::Task;
use binder_core::{BinderError, BinderResult, IdIssuer};
use std::collections::HashSet;

pub struct TaskImporter;

impl TaskImporter {
    /// Name check only; content is not inspected until [`TaskImporter::parse`].
    pub fn validate(file: Option<&FileHandle>) -> Result<&FileHandle, ImportRejection> {
        let file = file.ok_or(ImportRejection::NoFile)?;
        if !Self::has_export_prefix(&file.name) {
            return Err(ImportRejection::WrongName(file.name.clone()));
        }
        Ok(file)
    }

    pub fn has_export_prefix(name: &str) -> bool {
        name.starts_with(EXPORT_PREFIX)
    }

    /// Parse an export file. Anything but a JSON array of task objects fails.
    pub fn parse(json: &str) -> BinderResult<Vec<TaskRecord>> {
        serde_json::from_str(json).map_err(|err| {
            BinderError::Serialization(format!(
                "Invalid task file. Expected a JSON array of tasks. Error: {}",
                err
            ))
        })
    }

    /// Turn parsed records into tasks.
    ///
    /// Imported ids are kept and `ids` is advanced past the largest one. A
    /// record without an id, or repeating an id already used earlier in the
    /// file, gets a fresh id. Fails when no id can follow the imported ones.
    pub fn into_tasks(records: Vec<TaskRecord>, ids: &mut IdIssuer) -> BinderResult<Vec<Task>> {
        if let Some(max) = records.iter().filter_map(|r| r.id).max() {
            ids.reserve_through(max.0)?;
        }

        let mut seen = HashSet::new();
        records
            .into_iter()
            .map(|mut record| {
                if record.id.is_some_and(|id| !seen.insert(id)) {
                    record.id = None;
                }
                record.into_task(ids)
            })
            .collect()
    }
}
