use crate::cli::PreviewArgs;
use crate::output;
use binder_domain::{FileHandle, PreviewCard};
use binder_loader::FileReader;
use binder_widgets::{PreviewWidget, RecordingAlerts};
use serde::Serialize;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Serialize)]
struct CardOutput {
    name: String,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    src: Option<String>,
    caption: [String; 2],
}

impl CardOutput {
    fn from_card(card: PreviewCard, omit_data: bool) -> Self {
        let caption = card.caption();
        Self {
            name: card.name,
            size: card.size,
            src: (!omit_data).then_some(card.src),
            caption,
        }
    }
}

pub async fn handle(args: PreviewArgs) -> anyhow::Result<()> {
    let alerts = Rc::new(RecordingAlerts::new());
    let mut widget = PreviewWidget::new(Arc::new(FileReader::new()), alerts.clone());

    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match FileHandle::from_path(path) {
            Ok(file) => files.push(file),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                output::output_alert(&format!("Could not open {}", path.display()));
            }
        }
    }

    widget.on_file_change(files)?;
    let issued = widget.on_show_preview().await?;

    let messages = alerts.take();
    if issued == 0 {
        let message = messages
            .first()
            .map(String::as_str)
            .unwrap_or(binder_widgets::preview::SELECT_FILES_FIRST);
        output::output_error(message);
    }
    for message in &messages {
        output::output_alert(message);
    }

    let cards: Vec<CardOutput> = widget
        .cards()
        .into_iter()
        .map(|card| CardOutput::from_card(card, args.omit_data))
        .collect();
    output::output_list(cards)
}
