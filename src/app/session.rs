//! The top-level session: one board manager and one presenter sharing a pool
//! and a store.

use crate::bingo::board::BoardManager;
use crate::bingo::presenter::{Draw, Presenter};
use crate::bingo::{BingoError, Pool, StateChange, StateStore};
use rand::rngs::ThreadRng;
use tracing::error;

pub type BoxedStore = Box<dyn StateStore>;

/// A component that either started, or was disabled by a configuration
/// error whose message is shown in its place.
pub enum Component<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> Component<T> {
    fn start(result: Result<T, BingoError>) -> Self {
        match result {
            Ok(component) => Component::Ready(component),
            Err(e) => {
                error!(error = %e, "component disabled");
                Component::Unavailable(e.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Component::Ready(c) => Some(c),
            Component::Unavailable(_) => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Component::Ready(c) => Some(c),
            Component::Unavailable(_) => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Component::Ready(_) => None,
            Component::Unavailable(reason) => Some(reason.as_str()),
        }
    }
}

pub struct Session {
    pub board: Component<BoardManager<BoxedStore>>,
    pub presenter: Component<Presenter<BoxedStore>>,
    rng: ThreadRng,
}

impl Session {
    /// Build both components from the pool and load their persisted state.
    /// `store` is cloned so each component owns a handle to the same backing
    /// storage.
    pub fn start<S>(pool: Pool, store: S) -> Self
    where
        S: StateStore + Clone + 'static,
    {
        let mut rng = rand::rng();

        let board_store: BoxedStore = Box::new(store.clone());
        let board = Component::start(BoardManager::new(pool.clone(), board_store).and_then(
            |mut mgr| {
                mgr.load_state(&mut rng)?;
                Ok(mgr)
            },
        ));

        let presenter_store: BoxedStore = Box::new(store);
        let mut presenter = Component::start(Presenter::new(pool, presenter_store));
        if let Some(p) = presenter.ready_mut() {
            p.load_state();
        }

        Self {
            board,
            presenter,
            rng,
        }
    }

    pub fn board(&self) -> Option<&BoardManager<BoxedStore>> {
        self.board.ready()
    }

    pub fn presenter(&self) -> Option<&Presenter<BoxedStore>> {
        self.presenter.ready()
    }

    pub fn toggle_cell(&mut self, index: usize) -> Result<bool, BingoError> {
        self.board_mut()?.toggle_cell(index)
    }

    pub fn reset_highlights(&mut self) -> Result<(), BingoError> {
        self.board_mut()?.reset_highlights();
        Ok(())
    }

    pub fn reshuffle(&mut self) -> Result<(), BingoError> {
        let Session { board, rng, .. } = self;
        match board {
            Component::Ready(mgr) => mgr.reshuffle(rng),
            Component::Unavailable(reason) => Err(unavailable("bingo board", reason)),
        }
    }

    pub fn edit_cell(&mut self, index: usize, text: String) -> Result<(), BingoError> {
        self.board_mut()?.update_cell_content(index, text)
    }

    pub fn draw_next(&mut self) -> Result<Draw, BingoError> {
        let Session { presenter, rng, .. } = self;
        match presenter {
            Component::Ready(p) => Ok(p.draw_next(rng)),
            Component::Unavailable(reason) => Err(unavailable("presenter", reason)),
        }
    }

    pub fn reset_presenter(&mut self) -> Result<(), BingoError> {
        match &mut self.presenter {
            Component::Ready(p) => {
                p.reset();
                Ok(())
            }
            Component::Unavailable(reason) => Err(unavailable("presenter", reason)),
        }
    }

    /// Collect the notifications queued by both components since the last
    /// call.
    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        let mut changes = Vec::new();
        if let Some(mgr) = self.board.ready_mut() {
            changes.extend(mgr.drain_changes());
        }
        if let Some(p) = self.presenter.ready_mut() {
            changes.extend(p.drain_changes());
        }
        changes
    }

    fn board_mut(&mut self) -> Result<&mut BoardManager<BoxedStore>, BingoError> {
        match &mut self.board {
            Component::Ready(mgr) => Ok(mgr),
            Component::Unavailable(reason) => Err(unavailable("bingo board", reason)),
        }
    }
}

fn unavailable(component: &'static str, reason: &str) -> BingoError {
    BingoError::Configuration {
        component,
        reason: reason.to_string(),
    }
}
