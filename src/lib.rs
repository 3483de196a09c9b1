//! A terminal bingo board with a presenter mode.
//!
//! The [`bingo`] module holds the state logic: a shuffled 5x5 board with a
//! persisted highlight overlay, and a presenter that reveals pool items
//! without repeats. [`app`] and [`ui`] wrap it in a ratatui front end.

pub mod app;
pub mod bingo;
pub mod config;
pub mod logging;
pub mod ui;

pub use bingo::{
    BingoError, Board, BoardData, BoardManager, Draw, FileStore, MemoryStore, Pool, Presenter,
    PresenterPhase, StateChange, StateStore,
};
