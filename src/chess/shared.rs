//! [`SharedGame`] lets moves and clock expiry arrive from different threads.
//! Every operation that reads or decides the result runs under one lock, so
//! whichever terminal event is serialized first wins and the other one is
//! rejected.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, bail};

use crate::chess::core::Player;
use crate::chess::game::{GameResult, GameState};
use crate::chess::moves::Move;

/// Thread-safe handle to a game. Clones refer to the same game.
#[derive(Clone)]
pub struct SharedGame {
    state: Arc<Mutex<GameState>>,
}

impl SharedGame {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, GameState>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("game state lock is poisoned"))
    }

    /// See [`GameState::make_move`].
    ///
    /// # Errors
    ///
    /// If the move is rejected or the lock is poisoned.
    pub fn make_move(&self, next: Move) -> anyhow::Result<()> {
        self.lock()?.make_move(next)
    }

    /// Parses and plays the move in one step, so that no other event can get
    /// in between.
    ///
    /// # Errors
    ///
    /// If the game is over, the move is not legal or the lock is poisoned.
    pub fn play(&self, uci: &str) -> anyhow::Result<()> {
        let mut state = self.lock()?;
        if let Some(result) = state.result() {
            bail!("the game is over: {result}");
        }
        let next = state.parse_move(uci)?;
        state.make_move(next)
    }

    /// See [`GameState::time_out`].
    ///
    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn time_out(&self, loser: Player) -> anyhow::Result<bool> {
        Ok(self.lock()?.time_out(loser))
    }

    /// See [`GameState::poll_clock`].
    ///
    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn poll_clock(&self) -> anyhow::Result<Option<GameResult>> {
        Ok(self.lock()?.poll_clock())
    }

    /// Result of the game, if it is over.
    ///
    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn result(&self) -> anyhow::Result<Option<GameResult>> {
        Ok(self.lock()?.result())
    }

    /// Copy of the current state, without subscribers.
    ///
    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn snapshot(&self) -> anyhow::Result<GameState> {
        Ok(self.lock()?.clone())
    }

    /// Runs `action` with exclusive access to the game.
    ///
    /// # Errors
    ///
    /// If the lock is poisoned.
    pub fn with_state<T>(&self, action: impl FnOnce(&mut GameState) -> T) -> anyhow::Result<T> {
        Ok(action(&mut *self.lock()?))
    }

    /// Spawns a thread checking the clock every `period` until the game is
    /// over. The thread returns the final result.
    #[must_use]
    pub fn watch_clock(&self, period: Duration) -> JoinHandle<anyhow::Result<GameResult>> {
        let game = self.clone();
        thread::spawn(move || loop {
            if let Some(result) = game.poll_clock()? {
                return Ok(result);
            }
            thread::sleep(period);
        })
    }
}
