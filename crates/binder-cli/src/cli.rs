use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "binder")]
#[command(about = "Image preview and task list widgets on the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview JPEG files as data-URL cards
    Preview(PreviewArgs),
    /// Drive the task list from a script of line commands
    Tasks(TasksArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Files offered to the picker; anything that is not a JPEG is ignored
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
    /// Leave the data URL out of each card
    #[arg(long)]
    pub omit_data: bool,
}

#[derive(Args)]
pub struct TasksArgs {
    /// Directory exports are written to (or set BINDER_EXPORT_DIR)
    #[arg(long, value_name = "DIR", env = "BINDER_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,
    /// Script to run; reads stdin when omitted
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,
}
