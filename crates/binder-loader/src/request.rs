//! One-shot load requests.
//!
//! A [`LoadRequest`] is spawned onto the runtime immediately and completes
//! exactly once. [`load_all`] issues every read up front and yields results
//! in completion order, not request order.

use crate::traits::{ContentLoader, FileContent, ReadMode};
use binder_core::{BinderError, BinderResult};
use binder_domain::FileHandle;
use futures::stream::FuturesUnordered;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;

pub struct LoadRequest {
    file_name: String,
    rx: oneshot::Receiver<BinderResult<FileContent>>,
}

impl LoadRequest {
    /// Start reading `file`. Must be called inside a tokio runtime.
    pub fn spawn<L>(loader: Arc<L>, file: FileHandle, mode: ReadMode) -> Self
    where
        L: ContentLoader + ?Sized + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let file_name = file.name.clone();

        tokio::spawn(async move {
            let result = loader.load(&file, mode).await;
            if tx.send(result).is_err() {
                tracing::debug!("Load result for {} dropped: requester gone", file.name);
            }
        });

        Self { file_name, rx }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Wait for the single completion of this request.
    pub async fn wait(self) -> BinderResult<FileContent> {
        let Self { file_name, rx } = self;
        match rx.await {
            Ok(result) => result,
            Err(_) => Err(BinderError::Abandoned(file_name)),
        }
    }
}

/// Issue a read for every `(key, file)` pair and collect completions as they
/// arrive.
pub fn load_all<K, L>(
    loader: &Arc<L>,
    files: Vec<(K, FileHandle)>,
    mode: ReadMode,
) -> FuturesUnordered<impl Future<Output = (K, BinderResult<FileContent>)>>
where
    L: ContentLoader + ?Sized + 'static,
{
    files
        .into_iter()
        .map(|(key, file)| {
            let request = LoadRequest::spawn(loader.clone(), file, mode);
            async move { (key, request.wait().await) }
        })
        .collect()
}
