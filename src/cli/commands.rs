use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::model::task::{Priority, Status};
use crate::model::theme::ThemeChoice;

#[derive(Parser)]
#[command(name = "td", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - a three-column task board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run against a different store directory
    #[arg(short = 'C', long = "store-dir", global = true)]
    pub store_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to the To Do column
    Add(AddArgs),
    /// List tasks by column
    List(ListArgs),
    /// Move a task to another column
    Mv(MvArgs),
    /// Edit a task's fields
    Edit(EditArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Delete every task on the board
    Clear(ClearArgs),
    /// Show or set the color theme
    Theme(ThemeArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Description
    #[arg(long, short = 'd')]
    pub desc: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,
    /// Priority (P1/high, P2/medium, P3/low)
    #[arg(long, short = 'p')]
    pub prio: Option<Priority>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only this column (todo, in-progress, done)
    #[arg(long, short = 's')]
    pub status: Option<Status>,
    /// Only tasks whose title or description contains this text
    #[arg(long, short = 'q')]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task id (any unique prefix)
    pub id: String,
    /// Target column (todo, in-progress, done)
    pub column: Status,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id (any unique prefix)
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long, short = 'd')]
    pub desc: Option<String>,
    /// New due date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
    /// New priority
    #[arg(long, short = 'p')]
    pub prio: Option<Priority>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task id (any unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// Theme to switch to (light or dark); omit to show the current one
    pub theme: Option<ThemeChoice>,
}
