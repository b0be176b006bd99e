//! Fixed-step game loop driving the engine headless.
//!
//! Each frame feeds the gunner's command (if any) to the engine and ticks it
//! by one fixed `dt`. With `realtime` set the loop sleeps against the wall
//! clock between frames; otherwise it runs flat out.

use std::time::{Duration, Instant};

use skyshot_core::constants::DEFAULT_FRAME_RATE;
use skyshot_sim::SimulationEngine;

use crate::gunner::Gunner;
use crate::state::RunSummary;

/// Loop pacing and length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    pub frame_rate: u32,
    pub duration_secs: f32,
    pub realtime: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            duration_secs: 30.0,
            realtime: false,
        }
    }
}

impl LoopSettings {
    /// Simulated seconds per frame. A zero frame rate falls back to the default.
    pub fn dt(&self) -> f32 {
        1.0 / self.effective_frame_rate() as f32
    }

    /// Wall-clock length of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.effective_frame_rate()))
    }

    /// Frames needed to cover `duration_secs`.
    pub fn total_frames(&self) -> u64 {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return 0;
        }
        (f64::from(self.duration_secs) * f64::from(self.effective_frame_rate())).ceil() as u64
    }

    fn effective_frame_rate(&self) -> u32 {
        if self.frame_rate == 0 {
            DEFAULT_FRAME_RATE
        } else {
            self.frame_rate
        }
    }
}

/// Run the loop to completion and return what happened.
pub fn run(
    engine: &mut SimulationEngine,
    settings: LoopSettings,
    mut gunner: Option<Gunner>,
) -> RunSummary {
    let dt = settings.dt();
    let frame_duration = settings.frame_duration();
    let total_frames = settings.total_frames();

    let mut summary = RunSummary::default();
    let mut last = engine.snapshot();
    let mut next_frame_time = Instant::now();

    log::info!(
        "running {total_frames} frames at {} fps (dt {dt:.4}s)",
        settings.effective_frame_rate()
    );

    for _ in 0..total_frames {
        if let Some(command) = gunner.as_mut().and_then(|g| g.command(&last, dt)) {
            engine.queue_command(command);
        }

        let snapshot = engine.tick(dt);
        for event in &snapshot.events {
            log::trace!("{event:?}");
        }
        last = snapshot.clone();
        summary.record(snapshot);

        if settings.realtime {
            next_frame_time += frame_duration;
            let now = Instant::now();
            if next_frame_time > now {
                std::thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > frame_duration * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_frame_time = now;
            }
        }
    }

    summary
}
