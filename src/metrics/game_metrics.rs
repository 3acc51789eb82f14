//! Session statistics for the terminal frontend.
//!
//! The game clock only runs while a game is in progress and not paused, so
//! the time shown is time actually spent playing.

use std::time::{Duration, Instant};

/// Per-session statistics shown by the terminal frontend
pub struct GameMetrics {
    /// Play time of the current game, refreshed by [`update`](Self::update)
    pub elapsed_time: Duration,
    /// Engine updates in the current game
    pub ticks: u64,
    /// Best final score this session
    pub high_score: u32,
    /// Games that ended in a collision this session
    pub games_played: u32,
    /// Start of the current game, shifted forward by any time spent paused
    start_time: Instant,
    paused_at: Option<Instant>,
    finished: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            ticks: 0,
            high_score: 0,
            games_played: 0,
            start_time: Instant::now(),
            paused_at: None,
            finished: false,
        }
    }

    /// Refresh `elapsed_time`. Frozen while paused or after game over.
    pub fn update(&mut self) {
        if self.finished {
            return;
        }
        self.elapsed_time = match self.paused_at {
            Some(at) => at.saturating_duration_since(self.start_time),
            None => self.start_time.elapsed(),
        };
    }

    pub fn on_tick(&mut self) {
        self.ticks += 1;
    }

    /// Stop the clock. Repeated calls keep the first pause instant.
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    /// Restart the clock, discounting the time spent paused
    pub fn resume(&mut self) {
        if let Some(at) = self.paused_at.take() {
            self.start_time += at.elapsed();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Begin a new game. A paused clock stays paused at zero.
    pub fn on_game_start(&mut self) {
        let now = Instant::now();
        self.start_time = now;
        if self.paused_at.is_some() {
            self.paused_at = Some(now);
        }
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.finished = false;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.finished = true;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
