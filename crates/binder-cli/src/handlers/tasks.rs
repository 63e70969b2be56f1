use crate::cli::TasksArgs;
use crate::output;
use binder_core::{AppConfig, IdIssuer};
use binder_domain::{ExportLink, FileHandle, TaskId, TaskItem};
use binder_loader::FileReader;
use binder_widgets::{ImportOutcome, RecordingAlerts, SystemClock, TaskListWidget};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

/// One line of a tasks script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add(String),
    Remove(TaskId),
    Clear,
    Export,
    Import(PathBuf),
    List,
}

/// Parse one script line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "add" => ScriptCommand::Add(rest.to_string()),
        "remove" => {
            let id = rest
                .parse::<u64>()
                .map_err(|_| format!("remove expects a numeric id, got '{}'", rest))?;
            ScriptCommand::Remove(TaskId(id))
        }
        "clear" => ScriptCommand::Clear,
        "export" => ScriptCommand::Export,
        "import" => {
            if rest.is_empty() {
                return Err("import expects a path".to_string());
            }
            ScriptCommand::Import(PathBuf::from(rest))
        }
        "list" => ScriptCommand::List,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Some(command))
}

#[derive(Serialize)]
struct TasksReport {
    items: Vec<TaskItem>,
    count: usize,
    export_link: ExportLink,
    exported: Vec<PathBuf>,
    listings: Vec<Vec<TaskItem>>,
    alerts: Vec<String>,
    skipped: Vec<String>,
}

fn read_script(script: Option<&Path>) -> anyhow::Result<String> {
    match script {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read script {}: {}", path.display(), e)),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub async fn handle(args: TasksArgs) -> anyhow::Result<()> {
    let export_dir = match args.export_dir {
        Some(dir) => dir,
        None => AppConfig::load().effective_export_dir().to_path_buf(),
    };
    let script = read_script(args.script.as_deref())?;

    let alerts = Rc::new(RecordingAlerts::new());
    let mut widget = TaskListWidget::new(
        IdIssuer::new(),
        Arc::new(FileReader::new()),
        Rc::new(SystemClock),
        alerts.clone(),
    );

    let mut exported = Vec::new();
    let mut listings = Vec::new();
    let mut skipped = Vec::new();

    for (number, line) in script.lines().enumerate() {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(reason) => {
                tracing::debug!("Line {} skipped: {}", number + 1, reason);
                skipped.push(format!("line {}: {}", number + 1, reason));
                continue;
            }
        };

        match command {
            ScriptCommand::Add(title) => {
                widget.on_submit(&title)?;
            }
            ScriptCommand::Remove(id) => {
                if !widget.on_remove(id) {
                    skipped.push(format!("line {}: no task with id {}", number + 1, id));
                }
            }
            ScriptCommand::Clear => widget.on_clear()?,
            ScriptCommand::Export => {
                if let Some(path) = widget.on_export_click(&export_dir).await? {
                    exported.push(path);
                }
            }
            ScriptCommand::Import(path) => {
                let file = match FileHandle::from_path(&path) {
                    Ok(file) => file,
                    Err(e) => {
                        tracing::warn!("Import of {} failed: {}", path.display(), e);
                        skipped.push(format!("line {}: cannot open {}", number + 1, path.display()));
                        continue;
                    }
                };
                if let ImportOutcome::Imported(count) = widget.on_import(Some(file)).await {
                    tracing::debug!("Line {} imported {} task(s)", number + 1, count);
                }
            }
            ScriptCommand::List => listings.push(widget.items()),
        }
    }

    let alerts = alerts.take();
    for message in &alerts {
        output::output_alert(message);
    }

    let items = widget.items();
    let report = TasksReport {
        count: items.len(),
        items,
        export_link: widget.export_link(),
        exported,
        listings,
        alerts,
        skipped,
    };
    output::output_success(report)
}
