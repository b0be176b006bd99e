//! Outcome of a headless run.

use serde::{Deserialize, Serialize};

use skyshot_core::state::{ScoreView, WorldSnapshot};

/// Totals gathered while the game loop runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames: u64,
    pub sim_secs: f64,
    pub score: ScoreView,
    pub peak_live_airplanes: usize,
    pub peak_live_bullets: usize,
    pub final_snapshot: WorldSnapshot,
}

impl RunSummary {
    /// Fold one frame's snapshot into the totals.
    pub fn record(&mut self, snapshot: WorldSnapshot) {
        self.frames += 1;
        self.sim_secs = snapshot.time.elapsed_secs;
        self.score = snapshot.score;
        self.peak_live_airplanes = self.peak_live_airplanes.max(snapshot.airplanes.len());
        self.peak_live_bullets = self.peak_live_bullets.max(snapshot.bullets.len());
        self.final_snapshot = snapshot;
    }

    /// Fraction of fired shots that hit, or 0 when nothing was fired.
    pub fn accuracy(&self) -> f64 {
        if self.score.shots_fired == 0 {
            0.0
        } else {
            self.score.hits as f64 / self.score.shots_fired as f64
        }
    }
}
