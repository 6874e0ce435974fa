use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::config_io::read_config;
use crate::io::lock::StoreLock;
use crate::io::storage::{FileStore, KeyValueStore};
use crate::io::store::{StoreError, ToDoStore};
use crate::io::watcher::StoreWatcher;
use crate::model::item::{ItemId, Mode};
use crate::model::Config;
use crate::ops::search;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Navigate,
    /// Typing into the input line
    Edit,
    /// Delete prompt is open
    Confirm,
    /// Typing a filter pattern
    Filter,
}

/// What the input line will do on Enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    NewItem,
    Existing(ItemId),
}

/// Pending delete prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub id: ItemId,
    pub text: String,
}

/// Main application state
pub struct App {
    pub store: ToDoStore<Box<dyn KeyValueStore>>,
    /// Backing directory; None for in-memory stores (no locking or reloads)
    pub data_dir: Option<PathBuf>,
    pub input_mode: InputMode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Cursor index into the visible rows
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    pub edit_buffer: String,
    /// Byte offset into `edit_buffer`
    pub edit_cursor: usize,
    pub edit_target: Option<EditTarget>,
    pub confirm_state: Option<ConfirmState>,
    pub filter_input: String,
    pub filter: Option<Regex>,
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(store: ToDoStore<Box<dyn KeyValueStore>>, config: &Config) -> Self {
        App {
            store,
            data_dir: None,
            input_mode: InputMode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            cursor: 0,
            scroll_offset: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            edit_target: None,
            confirm_state: None,
            filter_input: String::new(),
            filter: None,
            status_message: None,
            status_is_error: false,
        }
    }

    /// Ids shown in the list: the active mode's items, narrowed by the filter
    pub fn visible_ids(&self) -> Vec<ItemId> {
        match &self.filter {
            Some(re) => search::search_items(self.store.items(), re, Some(self.mode()))
                .into_iter()
                .map(|hit| hit.id)
                .collect(),
            None => self.store.visible_items().map(|(id, _)| id).collect(),
        }
    }

    /// Item under the cursor
    pub fn cursor_id(&self) -> Option<ItemId> {
        self.visible_ids().get(self.cursor).copied()
    }

    pub fn mode(&self) -> Mode {
        self.store.mode()
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.visible_ids().len();
        if count == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(count - 1);
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::warn!("{msg}");
        self.status_message = Some(msg);
        self.status_is_error = true;
    }

    /// Run a store operation under the data-directory lock, on freshly
    /// loaded state. Failures land in the status row.
    pub fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut ToDoStore<Box<dyn KeyValueStore>>) -> Result<T, StoreError>,
    ) -> Option<T> {
        let lock = self
            .data_dir
            .as_deref()
            .map(StoreLock::acquire_default)
            .transpose();
        let _lock = match lock {
            Ok(lock) => lock,
            Err(e) => {
                self.set_error(e.to_string());
                return None;
            }
        };
        if self.data_dir.is_some()
            && let Err(e) = self.store.load()
        {
            self.set_error(e.to_string());
            return None;
        }
        let result = op(&mut self.store);
        self.clamp_cursor();
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.set_error(e.to_string());
                None
            }
        }
    }

    /// Re-read storage after an outside change.
    pub fn reload(&mut self) {
        match self.store.load() {
            Ok(()) => {
                self.clamp_cursor();
                if let Some(ConfirmState { id, .. }) = &self.confirm_state
                    && self.store.get(*id).is_none()
                {
                    self.confirm_state = None;
                    self.input_mode = InputMode::Navigate;
                }
            }
            Err(e) => self.set_error(format!("reload failed: {}", e)),
        }
    }

    /// Switch lists, persisting the choice.
    pub fn switch_mode(&mut self, mode: Mode) {
        if self.apply(|store| store.set_mode(mode)).is_some() {
            self.cursor = 0;
            self.scroll_offset = 0;
        }
    }
}

/// Run the TUI against the store in `data_dir`.
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let storage = FileStore::open(data_dir)?;
    let data_dir = std::fs::canonicalize(storage.dir())?;
    let config = read_config(&data_dir)?;
    let store = ToDoStore::open(Box::new(storage) as Box<dyn KeyValueStore>)?;

    let mut app = App::new(store, &config);
    app.data_dir = Some(data_dir.clone());

    let watcher = match StoreWatcher::start(&data_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!("file watcher unavailable: {e}");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if let Some(change) = watcher.and_then(StoreWatcher::poll) {
            tracing::debug!(keys = ?change.keys, "store changed on disk, reloading");
            app.reload();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
