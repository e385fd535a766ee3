//! Simulation lifecycle
//!
//! Wraps one `SimState` in the Idle -> Running <-> Paused -> Terminated
//! machine and measures how long it ran. The caller supplies wall-clock
//! milliseconds so the same code runs under `requestAnimationFrame` and in
//! headless tests.

use serde::{Deserialize, Serialize};

use crate::results::Outcome;
use crate::sim::{Bounds, KindCounts, SimState, StepReport};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Population placed, waiting for start
    Idle,
    /// Stepping once per frame
    Running,
    /// Frozen; resuming keeps the population
    Paused,
    /// One kind holds the whole population
    Terminated,
}

/// One simulation and its lifecycle
#[derive(Debug, Clone)]
pub struct Session {
    sim: SimState,
    phase: Phase,
    /// Counts used by (re)initialization
    counts: KindCounts,
    /// Timestamp of the last transition into Running
    running_since: Option<f64>,
    /// Running time accumulated before `running_since`
    elapsed_ms: f64,
    conversions: u64,
    outcome: Option<Outcome>,
}

impl Session {
    /// Create an idle session with a freshly placed population
    pub fn new(counts: KindCounts, bounds: Bounds, speed: f32, seed: u64) -> Self {
        let mut sim = SimState::new(bounds, speed, seed);
        sim.initialize(counts, bounds);
        Self::from_sim(sim, counts)
    }

    /// Create an idle session around an existing simulation
    pub fn from_sim(sim: SimState, counts: KindCounts) -> Self {
        Self {
            sim,
            phase: Phase::Idle,
            counts,
            running_since: None,
            elapsed_ms: 0.0,
            conversions: 0,
            outcome: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    /// Current per-kind counts (for the stats display)
    pub fn counts(&self) -> KindCounts {
        self.sim.counts()
    }

    /// Result of the last finished run, cleared on reset or restart
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Conversions since the population was placed
    pub fn conversions(&self) -> u64 {
        self.conversions
    }

    /// Running time in milliseconds, excluding paused intervals
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        let live = self
            .running_since
            .map(|since| (now_ms - since).max(0.0))
            .unwrap_or(0.0);
        self.elapsed_ms + live
    }

    /// Idle/Terminated -> Running. Returns false if the request was ignored.
    ///
    /// Starting after termination begins a new round with a fresh population.
    pub fn start(&mut self, now_ms: f64) -> bool {
        match self.phase {
            Phase::Idle | Phase::Terminated => {
                if self.phase == Phase::Terminated || self.sim.is_empty() {
                    self.reinitialize(self.counts, self.sim.bounds());
                }
                if self.sim.is_empty() {
                    log::warn!("Starting with an empty population; it will never terminate");
                }
                self.phase = Phase::Running;
                self.running_since = Some(now_ms);
                log::info!("Simulation started with {} entities", self.sim.len());
                true
            }
            phase => {
                log::debug!("Start ignored while {phase:?}");
                false
            }
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self, now_ms: f64) -> bool {
        if self.phase != Phase::Running {
            log::debug!("Pause ignored while {:?}", self.phase);
            return false;
        }
        self.stop_clock(now_ms);
        self.phase = Phase::Paused;
        log::info!("Simulation paused at step {}", self.sim.steps);
        true
    }

    /// Paused -> Running, keeping the population
    pub fn resume(&mut self, now_ms: f64) -> bool {
        if self.phase != Phase::Paused {
            log::debug!("Resume ignored while {:?}", self.phase);
            return false;
        }
        self.phase = Phase::Running;
        self.running_since = Some(now_ms);
        log::info!("Simulation resumed");
        true
    }

    /// Start/pause/resume as a single button. Returns the new phase.
    pub fn toggle(&mut self, now_ms: f64) -> Phase {
        match self.phase {
            Phase::Idle | Phase::Terminated => {
                self.start(now_ms);
            }
            Phase::Running => {
                self.pause(now_ms);
            }
            Phase::Paused => {
                self.resume(now_ms);
            }
        }
        self.phase
    }

    /// Any phase -> Idle with a new population
    pub fn reset(&mut self, counts: KindCounts, bounds: Bounds) {
        self.counts = counts;
        self.reinitialize(counts, bounds);
        self.phase = Phase::Idle;
        log::info!("Simulation reset");
    }

    /// Resample every heading for a new speed
    pub fn set_speed(&mut self, speed: f32) {
        self.sim.set_speed(speed);
    }

    /// Advance one frame if running. Moves to Terminated when a kind wins.
    pub fn frame(&mut self, now_ms: f64) -> Option<StepReport> {
        if self.phase != Phase::Running {
            return None;
        }

        let report = self.sim.step();
        self.conversions += report.conversions() as u64;

        if let Some(winner) = report.winner {
            self.stop_clock(now_ms);
            let outcome = Outcome {
                winner,
                seconds: self.elapsed_ms / 1000.0,
                steps: self.sim.steps,
                conversions: self.conversions,
            };
            log::info!("{}", outcome.message());
            self.outcome = Some(outcome);
            self.phase = Phase::Terminated;
        }

        Some(report)
    }

    fn reinitialize(&mut self, counts: KindCounts, bounds: Bounds) {
        self.sim.initialize(counts, bounds);
        self.running_since = None;
        self.elapsed_ms = 0.0;
        self.conversions = 0;
        self.outcome = None;
    }

    fn stop_clock(&mut self, now_ms: f64) {
        if let Some(since) = self.running_since.take() {
            self.elapsed_ms += (now_ms - since).max(0.0);
        }
    }
}
