//! Two-sided game clock with an optional increment.
//!
//! Every method that looks at the wall clock has an `_at` counterpart taking
//! the current [`Instant`] explicitly: the plain versions call them with
//! [`Instant::now`].

use std::time::{Duration, Instant};

use crate::chess::core::Player;

/// Time each player starts with and the bonus added after each of their
/// moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeControl {
    #[allow(missing_docs)]
    pub initial: Duration,
    #[allow(missing_docs)]
    pub increment: Duration,
}

impl TimeControl {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn from_secs(initial: u64, increment: u64) -> Self {
        Self {
            initial: Duration::from_secs(initial),
            increment: Duration::from_secs(increment),
        }
    }
}

impl Default for TimeControl {
    /// Ten minutes per player, no increment.
    fn default() -> Self {
        Self::from_secs(600, 0)
    }
}

/// Counts down the time of the player whose clock is active.
///
/// The clock starts paused and without an active side. Once started, only
/// the active side's time runs; [`ChessClock::switch_to_next_player`] hands
/// the turn over.
#[derive(Clone, Debug)]
pub struct ChessClock {
    control: TimeControl,
    remaining: [Duration; 2],
    active: Option<Player>,
    /// Set while the clock is running.
    last_update: Option<Instant>,
    /// The first player whose time ran out. An increment does not bring them
    /// back.
    flagged: Option<Player>,
}

impl ChessClock {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(control: TimeControl) -> Self {
        Self {
            control,
            remaining: [control.initial; 2],
            active: None,
            last_update: None,
            flagged: None,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn time_control(&self) -> TimeControl {
        self.control
    }

    /// Restores the initial time for both players and stops the clock.
    pub fn reset(&mut self) {
        *self = Self::new(self.control);
    }

    /// Starts running the clock of `player`.
    pub fn start(&mut self, player: Player) {
        self.start_at(player, Instant::now());
    }

    #[allow(missing_docs)]
    pub fn start_at(&mut self, player: Player, now: Instant) {
        self.update_at(now);
        self.active = Some(player);
        self.last_update = Some(now);
    }

    /// Stops the clock, charging the time spent so far to the active player.
    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    #[allow(missing_docs)]
    pub fn pause_at(&mut self, now: Instant) {
        self.update_at(now);
        self.last_update = None;
    }

    /// Continues a paused clock. Does nothing if the clock was never started.
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    #[allow(missing_docs)]
    pub fn resume_at(&mut self, now: Instant) {
        if self.active.is_some() && self.last_update.is_none() {
            self.last_update = Some(now);
        }
    }

    /// Charges the elapsed time to the active player, adds the increment to
    /// them and activates the opponent's clock. Does nothing while the clock
    /// is paused.
    pub fn switch_to_next_player(&mut self) {
        self.switch_to_next_player_at(Instant::now());
    }

    #[allow(missing_docs)]
    pub fn switch_to_next_player_at(&mut self, now: Instant) {
        let Some(player) = self.active.filter(|_| self.is_running()) else {
            return;
        };
        self.update_at(now);
        if self.flagged.is_none() {
            let remaining = &mut self.remaining[player.index()];
            *remaining = remaining.saturating_add(self.control.increment);
        }
        self.active = Some(player.opponent());
    }

    /// Charges the time elapsed since the last update to the active player.
    /// Remaining time never goes below zero.
    pub fn update_at(&mut self, now: Instant) {
        let (Some(player), Some(since)) = (self.active, self.last_update) else {
            return;
        };
        let elapsed = now.saturating_duration_since(since);
        let remaining = &mut self.remaining[player.index()];
        *remaining = remaining.saturating_sub(elapsed);
        if remaining.is_zero() && self.flagged.is_none() {
            self.flagged = Some(player);
        }
        self.last_update = Some(now);
    }

    /// Returns the player who ran out of time first, if any. The answer does
    /// not change once a player has run out.
    #[must_use]
    pub fn timed_out(&mut self) -> Option<Player> {
        self.timed_out_at(Instant::now())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn timed_out_at(&mut self, now: Instant) -> Option<Player> {
        self.update_at(now);
        self.flagged
    }

    /// Time left for the player as of the latest update.
    #[must_use]
    pub const fn remaining(&self, player: Player) -> Duration {
        self.remaining[player.index()]
    }

    /// The player whose clock is ticking or would tick after resuming.
    #[must_use]
    pub const fn active(&self) -> Option<Player> {
        self.active
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.last_update.is_some()
    }
}

/// Formats the duration as "mm:ss", dropping fractions of a second.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
