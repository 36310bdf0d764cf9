//! Running score plus the in-memory highscore table for this process.

use chrono::{DateTime, Local};

use crate::config::Config;

#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub score: u32,
    pub recorded_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct ScoreTracker {
    score: u32,
    increment: u32,
    retention: usize,
    history: Vec<RunRecord>,
}

impl ScoreTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            score: 0,
            increment: config.pipe_score,
            retention: config.highscore_count,
            history: Vec::with_capacity(config.highscore_count + 1),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_point(&mut self) {
        self.score += self.increment;
    }

    /// Zeroes the running score; the history is kept.
    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Best first.
    pub fn history(&self) -> &[RunRecord] {
        &self.history
    }

    pub fn best(&self) -> Option<u32> {
        self.history.first().map(|r| r.score)
    }

    /// Files a finished run and returns its rank if it made the table.
    ///
    /// Ordering is the same as appending and then stable-sorting by score,
    /// descending: a run ties below runs already holding the same score.
    pub fn record_run(&mut self, score: u32, recorded_at: DateTime<Local>) -> Option<usize> {
        let rank = self.history.partition_point(|r| r.score >= score);
        self.history.insert(rank, RunRecord { score, recorded_at });
        self.history.truncate(self.retention);
        (rank < self.retention).then_some(rank)
    }
}
