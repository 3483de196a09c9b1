use crate::app::session::Session;
use crate::bingo::board::{BOARD_SIZE, TOTAL_CELLS};
use crate::config::AppConfig;
use chrono::Local;
use ratatui::layout::Rect;
use std::fmt::Write;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a status message stays in the status bar.
pub const STATUS_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Board,
    Presenter,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Board => "Board",
            View::Presenter => "Presenter",
        }
    }

    pub fn other(self) -> Self {
        match self {
            View::Board => View::Presenter,
            View::Presenter => View::Board,
        }
    }
}

/// In-progress edit of one cell's text. `cursor` is a byte offset.
#[derive(Debug, Clone)]
pub struct CellEdit {
    pub index: usize,
    pub text: String,
    pub cursor: usize,
}

impl CellEdit {
    pub fn new(index: usize, text: &str) -> Self {
        Self {
            index,
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub timestamp: String,
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub view: View,
    /// Board cell under the keyboard cursor.
    pub cursor: usize,
    pub editing: Option<CellEdit>,
    /// Shown in place of the current item after an exhausted draw.
    pub presenter_notice: Option<&'static str>,
    pub status: Option<StatusMessage>,
    /// Last known terminal size, used to map mouse clicks to cells.
    pub area: Rect,
    pub dirty: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, session: Session) -> Self {
        Self {
            config,
            session,
            view: View::Board,
            cursor: 0,
            editing: None,
            presenter_notice: None,
            status: None,
            area: Rect::default(),
            dirty: true,
            should_quit: false,
        }
    }

    /// Move the board cursor, clamped to the grid.
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let max = BOARD_SIZE as isize - 1;
        let row = (self.cursor / BOARD_SIZE) as isize;
        let col = (self.cursor % BOARD_SIZE) as isize;
        let row = (row + d_row).clamp(0, max) as usize;
        let col = (col + d_col).clamp(0, max) as usize;
        self.cursor = (row * BOARD_SIZE + col).min(TOTAL_CELLS - 1);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), StatusKind::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), StatusKind::Error);
    }

    fn set_status(&mut self, text: String, kind: StatusKind) {
        // An invalid timestamp_format fails the write instead of panicking
        let mut timestamp = String::new();
        let now = Local::now();
        if write!(timestamp, "{}", now.format(&self.config.ui.timestamp_format)).is_err() {
            timestamp.clear();
        }
        self.status = Some(StatusMessage {
            timestamp,
            text,
            kind,
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.dirty = true;
    }

    /// Drop the status message once it has expired. Returns true if the
    /// screen needs repainting.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        match &self.status {
            Some(status) if now >= status.expires_at => {
                self.status = None;
                true
            }
            _ => false,
        }
    }

    /// Drain the session's change notifications into the status bar and mark
    /// the view for repaint.
    pub fn absorb_changes(&mut self) {
        for change in self.session.drain_changes() {
            debug!(?change, "state changed");
            self.info(change.describe());
        }
    }
}
