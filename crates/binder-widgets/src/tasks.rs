//! Task list widget.
//!
//! Form submit adds a task, each row's remove button deletes it, "clear"
//! resets the list. The export link is recomputed from the collection on
//! every notification, so it always reflects the current tasks. Import
//! accepts only files whose name carries the export prefix.

use crate::alerts::AlertSink;
use crate::clock::Clock;
use binder_core::{BinderResult, IdIssuer};
use binder_domain::{
    Collection, CollectionEvent, ExportLink, FileHandle, ImportRejection, Observer, Task,
    TaskExporter, TaskId, TaskImporter, TaskItem,
};
use binder_loader::{ContentLoader, ExportWriter, LoadRequest, ReadMode};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

pub const NO_IMPORT_FILE: &str = "Choose a file to import";
pub const WRONG_IMPORT_FILE: &str = "Choose a file exported from this list";
pub const CORRUPTED_IMPORT: &str = "The file is corrupted; import failed";

/// What happened to an import attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(usize),
    Rejected(ImportRejection),
    ReadFailed(String),
    Corrupted(String),
    Failed(String),
}

/// Rendered task list plus the export link.
pub struct TaskListRenderer {
    items: RefCell<Vec<TaskItem>>,
    export_link: RefCell<ExportLink>,
    clock: Rc<dyn Clock>,
}

impl TaskListRenderer {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            export_link: RefCell::new(ExportLink::Disabled),
            clock,
        }
    }

    pub fn items(&self) -> Vec<TaskItem> {
        self.items.borrow().clone()
    }

    pub fn export_link(&self) -> ExportLink {
        self.export_link.borrow().clone()
    }

    fn render_task(&self, task: &Task) {
        self.items.borrow_mut().push(TaskItem::from_task(task));
    }

    fn remove_element(&self, element_id: &str) {
        let mut items = self.items.borrow_mut();
        if let Some(index) = items.iter().position(|i| i.element_id == element_id) {
            items.remove(index);
        }
    }

    fn refresh_export_link(&self, tasks: &Collection<Task>) {
        let link = if tasks.is_empty() {
            ExportLink::Disabled
        } else {
            match TaskExporter::artifact(tasks, self.clock.now()) {
                Ok(artifact) => ExportLink::for_artifact(artifact),
                Err(e) => {
                    tracing::warn!("Could not build export: {}", e);
                    ExportLink::Disabled
                }
            }
        };
        *self.export_link.borrow_mut() = link;
    }
}

impl Observer<Task> for TaskListRenderer {
    fn observe(&self, event: &CollectionEvent<Task>, collection: &Collection<Task>) {
        match event {
            CollectionEvent::Added(model) => self.render_task(model.get()),
            CollectionEvent::Removed(model) => {
                self.remove_element(&TaskItem::element_id_for(model.get().id))
            }
            CollectionEvent::Reset(models) => {
                self.items.borrow_mut().clear();
                for model in models {
                    self.render_task(model.get());
                }
            }
            CollectionEvent::Changed(model) => {
                let task = model.get();
                let element_id = TaskItem::element_id_for(task.id);
                let mut items = self.items.borrow_mut();
                if let Some(item) = items.iter_mut().find(|i| i.element_id == element_id) {
                    *item = TaskItem::from_task(task);
                }
            }
        }
        self.refresh_export_link(collection);
    }
}

pub struct TaskListWidget<L: ContentLoader + ?Sized + 'static> {
    collection: Collection<Task>,
    ids: IdIssuer,
    renderer: Rc<TaskListRenderer>,
    loader: Arc<L>,
    alerts: Rc<dyn AlertSink>,
}

impl<L: ContentLoader + ?Sized + 'static> TaskListWidget<L> {
    /// `ids` issues task ids; it is separate from the collection's cids.
    pub fn new(
        ids: IdIssuer,
        loader: Arc<L>,
        clock: Rc<dyn Clock>,
        alerts: Rc<dyn AlertSink>,
    ) -> Self {
        let collection = Collection::new();
        let renderer = Rc::new(TaskListRenderer::new(clock));
        collection.subscribe(&renderer);

        Self {
            collection,
            ids,
            renderer,
            loader,
            alerts,
        }
    }

    pub fn collection(&self) -> &Collection<Task> {
        &self.collection
    }

    pub fn items(&self) -> Vec<TaskItem> {
        self.renderer.items()
    }

    pub fn export_link(&self) -> ExportLink {
        self.renderer.export_link()
    }

    /// Form submitted with the title input's current value.
    pub fn on_submit(&mut self, title: &str) -> BinderResult<TaskId> {
        let id = TaskId(self.ids.next_id()?);
        self.collection.add(Task::new(id, title.to_string()))?;
        Ok(id)
    }

    /// A row's remove button was clicked.
    pub fn on_remove(&mut self, id: TaskId) -> bool {
        let removed = self.collection.remove_where(|task| task.id == id).is_some();
        if !removed {
            tracing::debug!("No task with id {} to remove", id);
        }
        removed
    }

    pub fn on_clear(&mut self) -> BinderResult<()> {
        self.collection.reset(Vec::new())
    }

    /// Save the export link's current artifact into `dir`. Inert while the
    /// link is disabled.
    pub async fn on_export_click(&self, dir: &Path) -> BinderResult<Option<PathBuf>> {
        let link = self.renderer.export_link();
        let Some(artifact) = link.artifact() else {
            tracing::debug!("Export clicked while disabled");
            return Ok(None);
        };
        let path = ExportWriter::write(dir, artifact).await?;
        Ok(Some(path))
    }

    /// Import button clicked with the file input's current file.
    pub async fn on_import(&mut self, file: Option<FileHandle>) -> ImportOutcome {
        let file = match TaskImporter::validate(file.as_ref()) {
            Ok(file) => file.clone(),
            Err(rejection) => {
                let message = match rejection {
                    ImportRejection::NoFile => NO_IMPORT_FILE,
                    ImportRejection::WrongName(_) => WRONG_IMPORT_FILE,
                };
                self.alerts.alert(message);
                return ImportOutcome::Rejected(rejection);
            }
        };

        let request = LoadRequest::spawn(self.loader.clone(), file, ReadMode::Text);
        let name = request.file_name().to_string();
        let text = match request.wait().await {
            Ok(content) => content.into_string(),
            Err(e) => {
                tracing::warn!("Import read failed for {}: {}", name, e);
                self.alerts.alert(&format!("Could not read {}", name));
                return ImportOutcome::ReadFailed(e.to_string());
            }
        };

        let records = match TaskImporter::parse(&text) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Import of {} rejected: {}", name, e);
                self.alerts.alert(CORRUPTED_IMPORT);
                return ImportOutcome::Corrupted(e.to_string());
            }
        };

        // Work on a copy so a rejected file leaves the issuer untouched.
        let mut ids = self.ids.clone();
        let tasks = match TaskImporter::into_tasks(records, &mut ids) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("Import of {} rejected: {}", name, e);
                self.alerts.alert(CORRUPTED_IMPORT);
                return ImportOutcome::Corrupted(e.to_string());
            }
        };
        let count = tasks.len();

        if let Err(e) = self.collection.reset(tasks) {
            tracing::warn!("Import of {} failed: {}", name, e);
            self.alerts.alert(&format!("Could not import {}", name));
            return ImportOutcome::Failed(e.to_string());
        }
        self.ids = ids;
        tracing::info!("Imported {} task(s) from {}", count, name);
        ImportOutcome::Imported(count)
    }
}
