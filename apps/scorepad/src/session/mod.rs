//! Session root and phase transitions.
//!
//! A [`Session`] owns the [`App`] and the store it persists to. Callers get a
//! phase handle from [`Session::state`]; only the operations legal in that
//! phase exist on it. Every committed transition is written through the
//! store before the new handle is returned.

pub mod app;
pub mod states;

#[cfg(test)]
mod test_session_helpers;
#[cfg(test)]
mod tests_state_machine;

use std::fmt;

use tracing::{debug, info};

pub use app::{App, Phase};
pub use states::State;

use crate::codec;
use crate::domain::Game;
use crate::error::AppError;
use crate::store::SnapshotStore;

pub struct Session {
    pub(crate) app: App,
    store: Box<dyn SnapshotStore>,
}

impl Session {
    /// Fresh idle session. Nothing is written until the first transition.
    pub fn new(store: impl SnapshotStore + 'static) -> Self {
        Self {
            app: App::default(),
            store: Box::new(store),
        }
    }

    /// Session from the store's last snapshot, or a fresh idle one if it has none.
    pub fn restore(store: impl SnapshotStore + 'static) -> Result<Self, AppError> {
        let mut store: Box<dyn SnapshotStore> = Box::new(store);
        let app = match store.load()? {
            Some(blob) => codec::from_json(&blob)?,
            None => App::default(),
        };
        info!(
            phase = %app.current_state(),
            game_id = app.current_game().map_or("-", Game::id),
            "Session restored"
        );
        Ok(Self { app, store })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn phase(&self) -> Phase {
        self.app.current_state()
    }

    pub fn game(&self) -> Option<&Game> {
        self.app.current_game()
    }

    /// Handle for the current phase.
    pub fn state(&mut self) -> Result<State<'_>, AppError> {
        State::resolve(self)
    }

    /// Write the current app through the store.
    pub fn persist(&mut self) -> Result<(), AppError> {
        let blob = codec::to_json(&self.app)?;
        self.store.save(&blob)?;
        debug!(phase = %self.app.current_state(), bytes = blob.len(), "Session persisted");
        Ok(())
    }

    /// Move to `target`: the outgoing phase goes onto the history, then the
    /// snapshot is persisted.
    pub(crate) fn next_state(&mut self, target: Phase) -> Result<(), AppError> {
        let from = self.app.current_state;
        self.app.current_state = target;
        if let Err(err) = self.app.check_invariants() {
            self.app.current_state = from;
            return Err(err.into());
        }
        self.app.history.push(from);
        info!(
            from = %from,
            to = %target,
            game_id = self.app.current_game().map_or("-", Game::id),
            "Phase transition"
        );
        self.persist()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("app", &self.app)
            .field("store", &"<dyn SnapshotStore>")
            .finish()
    }
}
