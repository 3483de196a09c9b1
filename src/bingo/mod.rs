//! Bingo core: the item pool, the board manager, the presenter sequencer and
//! the key/value store they persist to.
//!
//! None of this touches the terminal. Components mutate their own state and
//! queue a [`StateChange`] for each mutation; the UI drains the queue and
//! re-renders.

pub mod board;
pub mod error;
pub mod pool;
pub mod presenter;
pub mod store;

pub use board::{Board, BoardData, BoardManager, HighlightState};
pub use error::{BingoError, StoreError};
pub use pool::Pool;
pub use presenter::{Draw, Presenter, PresenterPhase};
pub use store::{FileStore, MemoryStore, StateStore};

/// Notification emitted after a component changed its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    BoardLoaded { restored: bool, selected: usize },
    BoardShuffled,
    BoardReplaced,
    CellToggled { index: usize, highlighted: bool },
    CellUpdated { index: usize },
    HighlightsReset,
    PresenterRestored { shown: usize },
    ItemDrawn { item: String, shown: usize, total: usize },
    PresenterExhausted,
    PresenterReset,
}

impl StateChange {
    /// One-line description for the status bar.
    pub fn describe(&self) -> String {
        match self {
            StateChange::BoardLoaded { restored: true, selected } => {
                format!("New board dealt, {} selections restored", selected)
            }
            StateChange::BoardLoaded { restored: false, .. } => "New board dealt".to_string(),
            StateChange::BoardShuffled => "Board reshuffled".to_string(),
            StateChange::BoardReplaced => "Board replaced".to_string(),
            StateChange::CellToggled { index, highlighted } => {
                let verb = if *highlighted { "Marked" } else { "Unmarked" };
                format!("{} cell {}", verb, index + 1)
            }
            StateChange::CellUpdated { index } => format!("Edited cell {}", index + 1),
            StateChange::HighlightsReset => "Selections cleared".to_string(),
            StateChange::PresenterRestored { shown: 0 } => "Presenter ready".to_string(),
            StateChange::PresenterRestored { shown } => {
                format!("Presenter resumed, {} items already shown", shown)
            }
            StateChange::ItemDrawn { shown, total, .. } => {
                format!("Revealed item {} of {}", shown, total)
            }
            StateChange::PresenterExhausted => "All items have been shown!".to_string(),
            StateChange::PresenterReset => "Presenter reset".to_string(),
        }
    }
}
