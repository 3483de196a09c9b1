//! Presenter sequencer: reveals pool items one at a time without repeats.
//!
//! ```text
//! Empty --draw--> Partial --draw (last item)--> Exhausted
//!   ^                |                              |
//!   +------reset-----+-------------reset------------+
//! ```
//!
//! Drawing from an exhausted presenter returns [`Draw::Exhausted`] and
//! changes nothing.

use super::error::{BingoError, StoreError};
use super::pool::Pool;
use super::store::StateStore;
use super::StateChange;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

pub const PRESENTER_STATE_KEY: &str = "bingoPresenterState";

/// Result of asking for the next item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    Item(String),
    /// Every pool item has already been shown.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterPhase {
    Empty,
    Partial,
    Exhausted,
}

/// Items already revealed, in reveal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShownSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ShownSet {
    /// Returns false if the item was already present.
    pub fn insert(&mut self, item: String) -> bool {
        if !self.members.insert(item.clone()) {
            return false;
        }
        self.order.push(item);
        true
    }

    pub fn contains(&self, item: &str) -> bool {
        self.members.contains(item)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedPresenter {
    shown_items: Vec<String>,
}

fn decode_shown(raw: &str) -> Result<Vec<String>, BingoError> {
    let record: PersistedPresenter =
        serde_json::from_str(raw).map_err(|e| BingoError::PersistenceParse {
            key: PRESENTER_STATE_KEY.to_string(),
            reason: e.to_string(),
        })?;
    Ok(record.shown_items)
}

pub struct Presenter<S: StateStore> {
    pool: Pool,
    shown: ShownSet,
    current: Option<String>,
    store: S,
    changes: Vec<StateChange>,
}

impl<S: StateStore> Presenter<S> {
    /// Fails with a configuration error if the pool is empty.
    pub fn new(pool: Pool, store: S) -> Result<Self, BingoError> {
        pool.require("presenter", 1)?;
        Ok(Self {
            pool,
            shown: ShownSet::default(),
            current: None,
            store,
            changes: Vec::new(),
        })
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn shown(&self) -> &ShownSet {
        &self.shown
    }

    pub fn shown_count(&self) -> usize {
        self.shown.len()
    }

    pub fn total(&self) -> usize {
        self.pool.len()
    }

    pub fn remaining(&self) -> usize {
        self.total() - self.shown_count()
    }

    /// The item revealed by the latest draw in this session. Restored
    /// sessions start with nothing on display.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn phase(&self) -> PresenterPhase {
        if self.shown.is_empty() {
            PresenterPhase::Empty
        } else if self.remaining() == 0 {
            PresenterPhase::Exhausted
        } else {
            PresenterPhase::Partial
        }
    }

    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        std::mem::take(&mut self.changes)
    }

    /// Pick one not-yet-shown item uniformly at random.
    pub fn draw_next<R: RngExt + ?Sized>(&mut self, rng: &mut R) -> Draw {
        let available: Vec<&String> = self
            .pool
            .items()
            .iter()
            .filter(|item| !self.shown.contains(item))
            .collect();
        if available.is_empty() {
            debug!("presenter exhausted");
            self.changes.push(StateChange::PresenterExhausted);
            return Draw::Exhausted;
        }

        let item = available[rng.random_range(0..available.len())].clone();
        self.shown.insert(item.clone());
        self.current = Some(item.clone());
        debug!(shown = self.shown.len(), total = self.pool.len(), "item drawn");
        self.persist();
        self.changes.push(StateChange::ItemDrawn {
            item: item.clone(),
            shown: self.shown.len(),
            total: self.pool.len(),
        });
        Draw::Item(item)
    }

    pub fn reset(&mut self) {
        self.shown.clear();
        self.current = None;
        debug!("presenter reset");
        self.persist();
        self.changes.push(StateChange::PresenterReset);
    }

    pub fn save_state(&mut self) -> Result<(), StoreError> {
        let record = PersistedPresenter {
            shown_items: self.shown.iter().cloned().collect(),
        };
        let encoded = serde_json::to_string(&record)?;
        self.store.set(PRESENTER_STATE_KEY, &encoded)
    }

    /// Restore the shown set. A missing record leaves the presenter empty; an
    /// unreadable or undecodable one resets it, overwriting the record.
    pub fn load_state(&mut self) {
        let raw = match self.store.get(PRESENTER_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.changes.push(StateChange::PresenterRestored { shown: 0 });
                return;
            }
            Err(e) => {
                warn!(error = %e, "could not read presenter state, starting over");
                self.reset();
                return;
            }
        };

        match decode_shown(&raw) {
            Ok(items) => {
                self.shown.clear();
                self.current = None;
                for item in items {
                    if !self.pool.contains(&item) {
                        warn!(item = %item, "ignoring shown item that is not in the pool");
                        continue;
                    }
                    self.shown.insert(item);
                }
                debug!(shown = self.shown.len(), "presenter state restored");
                self.changes.push(StateChange::PresenterRestored {
                    shown: self.shown.len(),
                });
            }
            Err(e) => {
                warn!(error = %e, "discarding presenter state");
                self.reset();
            }
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.save_state() {
            warn!(error = %e, "failed to persist presenter state");
        }
    }
}
