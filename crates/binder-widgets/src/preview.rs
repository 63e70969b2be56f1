//! Image preview widget.
//!
//! The picker resets the collection to the selected JPEG files; "show
//! preview" reads all of them at once and the gallery grows one card per
//! completed read, in completion order.

use crate::alerts::AlertSink;
use binder_core::BinderResult;
use binder_domain::{
    select_jpegs, Collection, CollectionEvent, FileHandle, Observer, PreviewCard, PreviewFile,
};
use binder_loader::{load_all, ContentLoader, ReadMode};
use futures::StreamExt;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub const SELECT_FILES_FIRST: &str = "Select files first";

/// Rendered gallery region.
#[derive(Debug, Default)]
pub struct Gallery {
    cards: RefCell<Vec<PreviewCard>>,
}

impl Gallery {
    pub fn cards(&self) -> Vec<PreviewCard> {
        self.cards.borrow().clone()
    }

    pub fn clear(&self) {
        self.cards.borrow_mut().clear();
    }
}

impl Observer<PreviewFile> for Gallery {
    fn observe(&self, event: &CollectionEvent<PreviewFile>, _: &Collection<PreviewFile>) {
        match event {
            CollectionEvent::Reset(_) => self.clear(),
            CollectionEvent::Changed(model) => {
                if let Some(card) = PreviewCard::from_preview(model.get()) {
                    self.cards.borrow_mut().push(card);
                }
            }
            CollectionEvent::Added(_) | CollectionEvent::Removed(_) => {}
        }
    }
}

pub struct PreviewWidget<L: ContentLoader + ?Sized + 'static> {
    collection: Collection<PreviewFile>,
    gallery: Rc<Gallery>,
    loader: Arc<L>,
    alerts: Rc<dyn AlertSink>,
}

impl<L: ContentLoader + ?Sized + 'static> PreviewWidget<L> {
    pub fn new(loader: Arc<L>, alerts: Rc<dyn AlertSink>) -> Self {
        let collection = Collection::new();
        let gallery = Rc::new(Gallery::default());
        collection.subscribe(&gallery);

        Self {
            collection,
            gallery,
            loader,
            alerts,
        }
    }

    pub fn collection(&self) -> &Collection<PreviewFile> {
        &self.collection
    }

    pub fn cards(&self) -> Vec<PreviewCard> {
        self.gallery.cards()
    }

    /// File picker changed: keep the JPEGs and replace the selection.
    pub fn on_file_change(&mut self, files: Vec<FileHandle>) -> BinderResult<()> {
        let offered = files.len();
        let selected = select_jpegs(files);
        if selected.len() < offered {
            tracing::debug!(
                "Ignored {} non-JPEG file(s) of {}",
                offered - selected.len(),
                offered
            );
        }
        self.collection
            .reset(selected.into_iter().map(PreviewFile::new).collect())
    }

    /// "Show preview" clicked. Returns the number of reads issued.
    pub async fn on_show_preview(&mut self) -> BinderResult<usize> {
        if self.collection.is_empty() {
            self.alerts.alert(SELECT_FILES_FIRST);
            return Ok(0);
        }

        self.gallery.clear();

        let mut requests = Vec::with_capacity(self.collection.len());
        for cid in self.collection.cids() {
            let mut started = false;
            self.collection
                .update(cid, |item| started = item.begin_loading())?;
            if !started {
                tracing::debug!("Skipping {}: read already in flight", cid);
                continue;
            }
            if let Some(model) = self.collection.get(cid) {
                requests.push((cid, model.get().file.clone()));
            }
        }

        let issued = requests.len();
        let mut pending = load_all(&self.loader, requests, ReadMode::DataUrl);

        while let Some((cid, result)) = pending.next().await {
            match result {
                Ok(content) => {
                    let data_url = content.into_string();
                    self.collection
                        .update(cid, move |item| item.complete(data_url))?;
                }
                Err(err) => {
                    let name = self
                        .collection
                        .get(cid)
                        .map(|m| m.get().file.name.clone())
                        .unwrap_or_default();
                    tracing::warn!("Preview read failed for {}: {}", name, err);
                    self.collection
                        .update(cid, |item| item.fail(err.to_string()))?;
                    self.alerts.alert(&format!("Could not read {}", name));
                }
            }
        }

        Ok(issued)
    }
}
