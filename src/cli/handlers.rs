use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::board::edit::{CommitOutcome, EditSession};
use crate::board::repo::Board;
use crate::board::search::visible;
use crate::cli::commands::*;
use crate::io::config_io;
use crate::io::store::Store;
use crate::model::task::{Status, Task, TaskDraft};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = open_board(cli.store_dir.as_deref())?;

    match cli.command {
        None => {
            // No subcommand → TUI; handled in main.rs
            Ok(())
        }
        Some(cmd) => match cmd {
            Commands::Add(args) => cmd_add(&mut board, args),
            Commands::List(args) => cmd_list(&board, args),
            Commands::Mv(args) => cmd_mv(&mut board, args),
            Commands::Edit(args) => cmd_edit(&mut board, args),
            Commands::Rm(args) => cmd_rm(&mut board, args),
            Commands::Clear(args) => cmd_clear(&mut board, args),
            Commands::Theme(args) => cmd_theme(&mut board, args),
        },
    }
}

/// Open the board over the effective store directory
/// (flag > config > platform default).
pub fn open_board(store_dir: Option<&Path>) -> Result<Board, Box<dyn std::error::Error>> {
    let config = config_io::load_config();
    let dir = config_io::resolve_store_dir(store_dir, &config);
    let store = Store::open(&dir)?;
    Ok(Board::open(store))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_add(board: &mut Board, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let task = board.create(TaskDraft {
        title: args.title,
        desc: args.desc.unwrap_or_default(),
        due: args.due,
        prio: args.prio.unwrap_or_default(),
    })?;
    println!("Added {}  {}", short_id(&task.id), task.title);
    Ok(())
}

fn cmd_list(board: &Board, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let query = args.search.as_deref().unwrap_or("");
    let columns: Vec<Status> = match args.status {
        Some(s) => vec![s],
        None => Status::ALL.to_vec(),
    };

    let mut first = true;
    for status in columns {
        let tasks = visible(board.tasks(), status, query);
        if !first {
            println!();
        }
        first = false;
        println!("{} ({})", status.label(), tasks.len());
        for task in tasks {
            print_task_line(task);
        }
    }
    Ok(())
}

fn print_task_line(task: &Task) {
    let mut line = format!("  {}  [{}]  {}", short_id(&task.id), task.prio.label(), task.title);
    if let Some(due) = task.due {
        line.push_str(&format!("  (due {})", due.format("%Y-%m-%d")));
    }
    println!("{}", line);
    if !task.desc.is_empty() {
        println!("            {}", task.desc);
    }
}

fn cmd_mv(board: &mut Board, args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = resolve_id(board, &args.id)?;
    if board.set_status(&id, args.column)? {
        println!("Moved {} to {}", short_id(&id), args.column.label());
    } else {
        println!("{} is already in {}", short_id(&id), args.column.label());
    }
    Ok(())
}

fn cmd_edit(board: &mut Board, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = resolve_id(board, &args.id)?;
    let mut session = EditSession::default();
    if !session.open(board, &id) {
        return Err(format!("no task matches id '{}'", args.id).into());
    }
    if let Some(draft) = session.draft_mut() {
        if let Some(title) = args.title {
            draft.title = title;
        }
        if let Some(desc) = args.desc {
            draft.desc = desc;
        }
        if args.clear_due {
            draft.due = None;
        } else if let Some(due) = args.due {
            draft.due = Some(due);
        }
        if let Some(prio) = args.prio {
            draft.prio = prio;
        }
    }
    match session.commit(board)? {
        CommitOutcome::Updated => println!("Updated {}", short_id(&id)),
        CommitOutcome::TaskGone => println!("Task {} no longer exists", short_id(&id)),
        CommitOutcome::RejectedEmptyTitle => {
            return Err("task title cannot be empty".into());
        }
        CommitOutcome::NotEditing => {}
    }
    Ok(())
}

fn cmd_rm(board: &mut Board, args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = resolve_id(board, &args.id)?;
    if board.delete(&id)? {
        println!("Deleted {}", short_id(&id));
    }
    Ok(())
}

fn cmd_clear(board: &mut Board, args: ClearArgs) -> Result<(), Box<dyn std::error::Error>> {
    if board.is_empty() {
        println!("The board is already empty.");
        return Ok(());
    }
    if !args.force && !confirm(&format!("Clear all {} tasks? This cannot be undone.", board.len()))? {
        println!("Aborted.");
        return Ok(());
    }
    board.clear_all()?;
    println!("All tasks cleared.");
    Ok(())
}

fn cmd_theme(board: &mut Board, args: ThemeArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.theme {
        Some(theme) => {
            board.store_mut().save_theme(theme)?;
            println!("Theme set to {}", theme.as_str());
        }
        None => {
            let current = board
                .store()
                .load_theme()
                .unwrap_or(config_io::load_config().default_theme);
            println!("{}", current.as_str());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// First 8 characters of an id, enough to disambiguate in practice
fn short_id(id: &str) -> &str {
    let end = id
        .char_indices()
        .nth(8)
        .map(|(i, _)| i)
        .unwrap_or(id.len());
    &id[..end]
}

/// Resolve a unique id prefix to a full task id.
fn resolve_id(board: &Board, prefix: &str) -> Result<String, Box<dyn std::error::Error>> {
    let matches: Vec<&Task> = board
        .tasks()
        .filter(|t| t.id.starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [one] => Ok(one.id.clone()),
        [] => Err(format!("no task matches id '{}'", prefix).into()),
        many => Err(format!("id '{}' is ambiguous ({} matches)", prefix, many.len()).into()),
    }
}

fn confirm(prompt: &str) -> Result<bool, io::Error> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn board(dir: &TempDir) -> Board {
        Board::open(Store::open(dir.path()).unwrap())
    }

    #[test]
    fn id_prefix_resolution() {
        let dir = TempDir::new().unwrap();
        let mut b = board(&dir);
        let task = b
            .create(TaskDraft {
                title: "Alpha".into(),
                ..Default::default()
            })
            .unwrap();

        let prefix = &task.id[..6];
        assert_eq!(resolve_id(&b, prefix).unwrap(), task.id);
        assert!(resolve_id(&b, "zzzzzz").is_err());
        // Every id starts with the empty prefix; two tasks make it ambiguous
        b.create(TaskDraft {
            title: "Beta".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(resolve_id(&b, "").is_err());
    }

    #[test]
    fn short_id_handles_short_input() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789abcdef"), "01234567");
    }
}
