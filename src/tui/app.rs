use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::board::drag::DragGesture;
use crate::board::edit::EditSession;
use crate::board::repo::Board;
use crate::board::search::visible;
use crate::board::sync::{Reconciler, SyncOutcome};
use crate::io::config_io;
use crate::io::store::Store;
use crate::model::task::{Priority, Status, Task, TaskDraft};
use crate::model::theme::ThemeChoice;

use super::input;
use super::render;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Create,
    Edit,
    MoveTask,
    ConfirmClear,
}

/// Which form row has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Desc,
    Due,
    Prio,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Desc,
            FormField::Desc => FormField::Due,
            FormField::Due => FormField::Prio,
            FormField::Prio => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Prio,
            FormField::Desc => FormField::Title,
            FormField::Due => FormField::Desc,
            FormField::Prio => FormField::Due,
        }
    }
}

/// Text buffers behind the create/edit popup
#[derive(Debug, Clone)]
pub struct FormState {
    pub title: String,
    pub desc: String,
    /// Raw text; parsed as YYYY-MM-DD on submit, empty means no due date
    pub due: String,
    pub prio: Priority,
    pub focus: FormField,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            title: String::new(),
            desc: String::new(),
            due: String::new(),
            prio: Priority::default(),
            focus: FormField::Title,
        }
    }
}

impl FormState {
    pub fn from_draft(draft: &TaskDraft) -> Self {
        FormState {
            title: draft.title.clone(),
            desc: draft.desc.clone(),
            due: draft
                .due
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            prio: draft.prio,
            focus: FormField::Title,
        }
    }

    /// Build a draft from the buffers; a malformed due date is the only
    /// way this can fail.
    pub fn to_draft(&self) -> Result<TaskDraft, String> {
        let due = match self.due.trim() {
            "" => None,
            raw => Some(
                raw.parse()
                    .map_err(|_| format!("invalid due date '{}' (expected YYYY-MM-DD)", raw))?,
            ),
        };
        Ok(TaskDraft {
            title: self.title.clone(),
            desc: self.desc.clone(),
            due,
            prio: self.prio,
        })
    }

    /// The focused text buffer, if the focused row is a text field
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Desc => Some(&mut self.desc),
            FormField::Due => Some(&mut self.due),
            FormField::Prio => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// Transient status message, rendered in the footer until it expires
#[derive(Debug, Clone)]
pub struct Toast {
    pub msg: String,
    pub kind: ToastKind,
    expires: Instant,
}

/// Main application state
pub struct App {
    pub board: Board,
    reconciler: Option<Reconciler>,
    pub mode: Mode,
    /// Live search text; filters all three columns
    pub query: String,
    pub drag: DragGesture,
    pub edit: EditSession,
    pub form: FormState,
    /// Selected column index into `Status::ALL`
    pub column: usize,
    /// Selected card within the visible cards of the selected column
    pub cursor: usize,
    pub theme: ThemeChoice,
    default_theme: ThemeChoice,
    pub toast: Option<Toast>,
    pub should_quit: bool,
}

impl App {
    pub fn new(board: Board, reconciler: Option<Reconciler>, default_theme: ThemeChoice) -> Self {
        let theme = board.store().load_theme().unwrap_or(default_theme);
        App {
            board,
            reconciler,
            mode: Mode::Normal,
            query: String::new(),
            drag: DragGesture::default(),
            edit: EditSession::default(),
            form: FormState::default(),
            column: 0,
            cursor: 0,
            theme,
            default_theme,
            toast: None,
            should_quit: false,
        }
    }

    /// The selected column's status
    pub fn status(&self) -> Status {
        Status::ALL[self.column.min(Status::ALL.len() - 1)]
    }

    /// Visible cards for a column under the current query
    pub fn visible_in(&self, status: Status) -> Vec<&Task> {
        visible(self.board.tasks(), status, &self.query)
    }

    /// Id of the card under the cursor
    pub fn selected_id(&self) -> Option<String> {
        self.visible_in(self.status())
            .get(self.cursor)
            .map(|t| t.id.clone())
    }

    /// Keep the cursor inside the selected column after any change
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_in(self.status()).len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn notify(&mut self, msg: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            msg: msg.into(),
            kind,
            expires: Instant::now() + Duration::from_millis(1800),
        });
    }

    /// Flip the theme and persist the preference.
    pub fn toggle_theme(&mut self) {
        let next = self.theme.toggled();
        if let Err(e) = self.board.store_mut().save_theme(next) {
            self.notify(format!("Could not save theme: {}", e), ToastKind::Error);
            return;
        }
        self.theme = next;
    }

    /// Per-frame upkeep: expire the toast and pick up foreign writes.
    pub fn tick(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.expires <= Instant::now())
        {
            self.toast = None;
        }

        let outcomes = match &self.reconciler {
            Some(reconciler) => reconciler.poll(&mut self.board),
            None => Vec::new(),
        };
        for outcome in outcomes {
            match outcome {
                SyncOutcome::TasksReloaded => {
                    self.clamp_cursor();
                    self.notify("Board updated in another window", ToastKind::Info);
                }
                SyncOutcome::ThemeChanged => {
                    self.theme = self.board.store().load_theme().unwrap_or(self.default_theme);
                }
            }
        }
    }
}

/// Launch the TUI over the effective store directory.
pub fn run(store_dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config();
    let dir = config_io::resolve_store_dir(store_dir, &config);
    let store = Store::open(&dir)?;
    let board = Board::open(store);
    // A failed watcher start degrades to a board without live sync
    let reconciler = Reconciler::start(&dir).ok();
    let mut app = App::new(board, reconciler, config.default_theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    while !app.should_quit {
        terminal.draw(|frame| render::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
        {
            input::handle_key(app, key);
        }

        app.tick();
    }
    Ok(())
}
