//! Fixed-timestep game loop
//!
//! Real elapsed time is accumulated and spent in whole simulation steps of a
//! fixed size, so the simulation sees the same `dt` regardless of frame rate.
//!
//! Each frame:
//!
//! 1. [`Game::process_events`] runs once, allowed to block until the next tick is due
//! 2. Unless the game is suspended, elapsed time is added to the accumulator and
//!    [`Game::tick`] runs once per whole step, up to `max_ticks_per_frame`
//! 3. [`Game::render`] runs exactly once
//!
//! Backlog beyond the per-frame cap is dropped (logged as `sim_clamp_triggered`).
//! Time spent suspended is discarded rather than caught up on resume.

use std::time::{Duration, Instant};

use crate::types::{DEFAULT_MAX_TICKS_PER_FRAME, DEFAULT_TICK_RATE_HZ};

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&mut self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub tick_rate_hz: u32,
    pub max_ticks_per_frame: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
        }
    }
}

impl LoopConfig {
    /// Length of one simulation step.
    pub fn step(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.tick_rate_hz.max(1) as u64)
    }
}

/// Ticks to run for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub ticks: u32,
    pub dropped_backlog: Duration,
}

/// Step accumulator with a per-frame tick cap.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(config: LoopConfig) -> Self {
        Self {
            step: config.step(),
            max_ticks_per_frame: config.max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Add `elapsed` and take out as many whole steps as the cap allows.
    ///
    /// If a whole step or more is still left after hitting the cap, the
    /// entire remainder is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> StepPlan {
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let mut ticks = 0u32;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }

        let mut dropped_backlog = Duration::ZERO;
        if self.accumulator >= self.step {
            dropped_backlog = self.accumulator;
            self.accumulator = Duration::ZERO;
        }

        StepPlan {
            ticks,
            dropped_backlog,
        }
    }

    /// How long until the accumulator holds one whole step.
    pub fn time_until_next_tick(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// What the loop drives.
pub trait Game {
    type Error;

    /// Handle pending input and window events, waiting at most `budget` for the first one.
    fn process_events(&mut self, budget: Duration) -> Result<LoopControl, Self::Error>;

    /// While true, no simulation time accumulates.
    fn suspended(&self) -> bool {
        false
    }

    /// Advance the simulation by exactly `dt` seconds.
    fn tick(&mut self, dt: f32) -> Result<(), Self::Error>;

    /// Present one frame.
    fn render(&mut self) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub ticks: u64,
    pub clamped_frames: u64,
}

pub struct GameLoop<C: Clock> {
    clock: C,
    timestep: FixedTimestep,
    last: Duration,
    stats: LoopStats,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(mut clock: C, config: LoopConfig) -> Self {
        let last = clock.now();
        Self {
            clock,
            timestep: FixedTimestep::new(config),
            last,
            stats: LoopStats::default(),
        }
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    /// Run one frame: events, ticks, render.
    pub fn frame<G: Game>(&mut self, game: &mut G) -> Result<LoopControl, G::Error> {
        let budget = self.timestep.time_until_next_tick();
        if game.process_events(budget)? == LoopControl::Stop {
            return Ok(LoopControl::Stop);
        }

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last);
        self.last = now;

        if !game.suspended() {
            let plan = self.timestep.advance(elapsed);
            if plan.dropped_backlog > Duration::ZERO {
                self.stats.clamped_frames += 1;
                tracing::warn!(
                    dropped_backlog_ms = plan.dropped_backlog.as_millis() as u64,
                    max_ticks_per_frame = self.timestep.max_ticks_per_frame,
                    "sim_clamp_triggered"
                );
            }

            let dt = self.timestep.step_secs();
            for _ in 0..plan.ticks {
                game.tick(dt)?;
            }
            self.stats.ticks += plan.ticks as u64;
        }

        game.render()?;
        self.stats.frames += 1;
        Ok(LoopControl::Continue)
    }

    /// Run frames until the game asks to stop.
    pub fn run<G: Game>(&mut self, game: &mut G) -> Result<LoopStats, G::Error> {
        tracing::info!(
            step_ms = self.timestep.step().as_secs_f64() * 1000.0,
            max_ticks_per_frame = self.timestep.max_ticks_per_frame,
            "game_loop_started"
        );
        while self.frame(game)? == LoopControl::Continue {}
        tracing::info!(
            frames = self.stats.frames,
            ticks = self.stats.ticks,
            clamped_frames = self.stats.clamped_frames,
            "game_loop_stopped"
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(hz: u32, cap: u32) -> LoopConfig {
        LoopConfig {
            tick_rate_hz: hz,
            max_ticks_per_frame: cap,
        }
    }

    #[test]
    fn advance_runs_whole_steps_and_keeps_remainder() {
        let mut ts = FixedTimestep::new(config(100, 5));
        let plan = ts.advance(Duration::from_millis(25));
        assert_eq!(plan.ticks, 2);
        assert_eq!(plan.dropped_backlog, Duration::ZERO);
        assert_eq!(ts.accumulator(), Duration::from_millis(5));
        assert_eq!(ts.time_until_next_tick(), Duration::from_millis(5));
    }

    #[test]
    fn advance_drops_backlog_past_cap() {
        let mut ts = FixedTimestep::new(config(100, 3));
        let plan = ts.advance(Duration::from_millis(75));
        assert_eq!(plan.ticks, 3);
        assert_eq!(plan.dropped_backlog, Duration::from_millis(45));
        assert_eq!(ts.accumulator(), Duration::ZERO);
    }

    #[test]
    fn zero_rate_is_treated_as_one_hz() {
        assert_eq!(config(0, 1).step(), Duration::from_secs(1));
    }
}
