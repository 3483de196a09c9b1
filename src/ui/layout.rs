use crate::bingo::board::BOARD_SIZE;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

pub struct AppLayout {
    pub tabs: Rect,
    pub body: Rect,
    pub help: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect, show_help: bool) -> AppLayout {
    let help_height = if show_help { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // View tabs
            Constraint::Min(5),              // Board or presenter
            Constraint::Length(help_height), // Key help
            Constraint::Length(1),           // Status bar
        ])
        .split(area);

    AppLayout {
        tabs: chunks[0],
        body: chunks[1],
        help: chunks[2],
        status_bar: chunks[3],
    }
}

/// The block that frames the board grid.
pub fn board_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

/// Screen rectangles of the 25 cells, row-major, inside the board frame.
pub fn board_cells(body: Rect) -> Vec<Rect> {
    let grid = board_block().inner(body);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, BOARD_SIZE as u32); BOARD_SIZE])
        .split(grid);

    let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, BOARD_SIZE as u32); BOARD_SIZE])
            .split(*row);
        cells.extend(cols.iter().copied());
    }
    cells
}

/// Map a screen position to the board cell under it.
pub fn cell_at(area: Rect, show_help: bool, column: u16, row: u16) -> Option<usize> {
    let body = compute_layout(area, show_help).body;
    board_cells(body).iter().position(|cell| {
        column >= cell.x
            && column < cell.x.saturating_add(cell.width)
            && row >= cell.y
            && row < cell.y.saturating_add(cell.height)
    })
}
