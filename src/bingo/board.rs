//! Board manager: the shuffled 5x5 grid and its highlight overlay.
//!
//! The layout is regenerated on every load and never persisted. Only the
//! highlight overlay is stored, under [`BOARD_STATE_KEY`], and restored onto
//! whatever layout the load produced.

use super::error::{BingoError, StoreError};
use super::pool::Pool;
use super::store::StateStore;
use super::StateChange;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const BOARD_SIZE: usize = 5;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
/// Middle of the grid, always holds [`FREE_LABEL`] after a shuffle.
pub const FREE_INDEX: usize = 12;
pub const FREE_LABEL: &str = "FREE";
pub const BOARD_STATE_KEY: &str = "bingoState";

/// Number of pool items a shuffled board consumes.
pub const ITEMS_PER_BOARD: usize = TOTAL_CELLS - 1;

/// Convert a row/column pair to a flat cell index.
pub fn index_of(row: usize, col: usize) -> Result<usize, BingoError> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(BingoError::OutOfRange {
            index: row.saturating_mul(BOARD_SIZE).saturating_add(col),
        });
    }
    Ok(row * BOARD_SIZE + col)
}

fn check_index(index: usize) -> Result<(), BingoError> {
    if index >= TOTAL_CELLS {
        return Err(BingoError::OutOfRange { index });
    }
    Ok(())
}

/// The 25 cell values, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<String>,
}

impl Board {
    /// A board with every cell empty except the FREE cell.
    pub fn blank() -> Self {
        let mut cells = vec![String::new(); TOTAL_CELLS];
        cells[FREE_INDEX] = FREE_LABEL.to_string();
        Self { cells }
    }

    pub fn from_cells(cells: Vec<String>) -> Result<Self, BingoError> {
        if cells.len() != TOTAL_CELLS {
            return Err(BingoError::InvalidShape {
                reason: format!("expected {} cells, got {}", TOTAL_CELLS, cells.len()),
            });
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.cells.chunks(BOARD_SIZE)
    }
}

/// Programmatic board contents: either 25 cells or a 5x5 grid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BoardData {
    Flat(Vec<String>),
    Grid(Vec<Vec<String>>),
}

impl BoardData {
    pub fn into_board(self) -> Result<Board, BingoError> {
        match self {
            BoardData::Flat(cells) => Board::from_cells(cells),
            BoardData::Grid(rows) => {
                let well_formed =
                    rows.len() == BOARD_SIZE && rows.iter().all(|r| r.len() == BOARD_SIZE);
                if !well_formed {
                    let shape: Vec<usize> = rows.iter().map(Vec::len).collect();
                    return Err(BingoError::InvalidShape {
                        reason: format!(
                            "expected a {0}x{0} grid, got rows of lengths {1:?}",
                            BOARD_SIZE, shape
                        ),
                    });
                }
                Board::from_cells(rows.into_iter().flatten().collect())
            }
        }
    }
}

/// Per-cell selection flags and their running count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightState {
    flags: [bool; TOTAL_CELLS],
    selected: usize,
}

impl Default for HighlightState {
    fn default() -> Self {
        Self {
            flags: [false; TOTAL_CELLS],
            selected: 0,
        }
    }
}

impl HighlightState {
    pub fn from_flags(flags: [bool; TOTAL_CELLS]) -> Self {
        let selected = flags.iter().filter(|f| **f).count();
        Self { flags, selected }
    }

    pub fn flags(&self) -> &[bool; TOTAL_CELLS] {
        &self.flags
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    pub fn selected_count(&self) -> usize {
        self.selected
    }

    /// Flip one cell, returning its new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, BingoError> {
        check_index(index)?;
        let flag = &mut self.flags[index];
        *flag = !*flag;
        if *flag {
            self.selected += 1;
        } else {
            self.selected -= 1;
        }
        Ok(*flag)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Wire format of the `bingoState` record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedBoard {
    highlighted: Vec<bool>,
    #[serde(default)]
    selected_count: Option<i64>,
}

fn encode_highlights(state: &HighlightState) -> Result<String, StoreError> {
    let record = PersistedBoard {
        highlighted: state.flags.to_vec(),
        selected_count: Some(state.selected as i64),
    };
    Ok(serde_json::to_string(&record)?)
}

fn decode_highlights(raw: &str) -> Result<HighlightState, BingoError> {
    let parse_error = |reason: String| BingoError::PersistenceParse {
        key: BOARD_STATE_KEY.to_string(),
        reason,
    };
    let record: PersistedBoard =
        serde_json::from_str(raw).map_err(|e| parse_error(e.to_string()))?;
    let flags: [bool; TOTAL_CELLS] = record.highlighted.try_into().map_err(|v: Vec<bool>| {
        parse_error(format!(
            "expected {} highlight flags, got {}",
            TOTAL_CELLS,
            v.len()
        ))
    })?;
    let state = HighlightState::from_flags(flags);
    if let Some(stored) = record.selected_count {
        if stored != state.selected as i64 {
            warn!(
                stored,
                actual = state.selected,
                "stored selected count disagrees with highlights, using actual"
            );
        }
    }
    Ok(state)
}

/// Shuffle the pool with Fisher-Yates and lay the first 24 items out around
/// the FREE cell.
pub fn shuffle_board<R: RngExt + ?Sized>(pool: &Pool, rng: &mut R) -> Result<Board, BingoError> {
    pool.require("bingo board", ITEMS_PER_BOARD)?;

    let mut shuffled = pool.items().to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }

    let mut picked = shuffled.into_iter().take(ITEMS_PER_BOARD);
    let cells = (0..TOTAL_CELLS)
        .map(|i| {
            if i == FREE_INDEX {
                FREE_LABEL.to_string()
            } else {
                picked.next().unwrap_or_default()
            }
        })
        .collect();
    Ok(Board { cells })
}

/// Owns the board, its highlight overlay and the store they persist to.
///
/// Every mutation queues a [`StateChange`]; the caller drains them with
/// [`BoardManager::drain_changes`] and re-renders.
pub struct BoardManager<S: StateStore> {
    pool: Pool,
    board: Board,
    highlights: HighlightState,
    store: S,
    changes: Vec<StateChange>,
}

impl<S: StateStore> BoardManager<S> {
    /// Fails with a configuration error if the pool cannot fill a board.
    /// The board starts blank; call [`load_state`](Self::load_state) to
    /// shuffle it and restore highlights.
    pub fn new(pool: Pool, store: S) -> Result<Self, BingoError> {
        pool.require("bingo board", ITEMS_PER_BOARD)?;
        Ok(Self {
            pool,
            board: Board::blank(),
            highlights: HighlightState::default(),
            store,
            changes: Vec::new(),
        })
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Deep copy of the current board.
    pub fn board_data(&self) -> Board {
        self.board.clone()
    }

    pub fn highlights(&self) -> &HighlightState {
        &self.highlights
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlights.is_highlighted(index)
    }

    pub fn selected_count(&self) -> usize {
        self.highlights.selected_count()
    }

    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn toggle_cell(&mut self, index: usize) -> Result<bool, BingoError> {
        let highlighted = self.highlights.toggle(index)?;
        debug!(index, highlighted, "cell toggled");
        self.persist();
        self.changes.push(StateChange::CellToggled { index, highlighted });
        Ok(highlighted)
    }

    /// Clear every highlight. The layout is kept.
    pub fn reset_highlights(&mut self) {
        self.highlights.clear();
        debug!("highlights reset");
        self.persist();
        self.changes.push(StateChange::HighlightsReset);
    }

    /// Generate a fresh layout. Highlights stay where they are.
    pub fn reshuffle<R: RngExt + ?Sized>(&mut self, rng: &mut R) -> Result<(), BingoError> {
        self.board = shuffle_board(&self.pool, rng)?;
        self.changes.push(StateChange::BoardShuffled);
        Ok(())
    }

    pub fn update_cell_content(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), BingoError> {
        check_index(index)?;
        self.board.cells[index] = text.into();
        self.changes.push(StateChange::CellUpdated { index });
        Ok(())
    }

    /// Replace the whole layout. Malformed data is logged and rejected
    /// without touching the current board.
    pub fn replace_board(&mut self, data: BoardData) -> Result<(), BingoError> {
        match data.into_board() {
            Ok(board) => {
                self.board = board;
                self.changes.push(StateChange::BoardReplaced);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "rejected board update");
                Err(e)
            }
        }
    }

    pub fn save_state(&mut self) -> Result<(), StoreError> {
        let encoded = encode_highlights(&self.highlights)?;
        self.store.set(BOARD_STATE_KEY, &encoded)
    }

    /// Reshuffle the layout and restore the persisted highlight overlay.
    ///
    /// A missing or unreadable record falls back to no highlights. The
    /// resulting state is always written back, which also replaces a corrupt
    /// record with a valid one.
    pub fn load_state<R: RngExt + ?Sized>(&mut self, rng: &mut R) -> Result<(), BingoError> {
        self.board = shuffle_board(&self.pool, rng)?;

        let restored = match self.store.get(BOARD_STATE_KEY) {
            Ok(Some(raw)) => match decode_highlights(&raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!(error = %e, "discarding board state");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read board state");
                None
            }
        };
        let was_restored = restored.is_some();
        self.highlights = restored.unwrap_or_default();
        self.persist();

        debug!(
            restored = was_restored,
            selected = self.highlights.selected_count(),
            "board loaded"
        );
        self.changes.push(StateChange::BoardLoaded {
            restored: was_restored,
            selected: self.highlights.selected_count(),
        });
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.save_state() {
            warn!(error = %e, "failed to persist board state");
        }
    }
}
