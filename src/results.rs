//! Run outcomes and the win tally
//!
//! The tally survives page reloads; only the 10 newest outcomes are listed.

use serde::{Deserialize, Serialize};

use crate::renderer::glyph;
use crate::sim::{Kind, KindCounts};

/// Maximum number of outcomes to keep
pub const MAX_RECENT: usize = 10;

/// How a finished run ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// The kind that took over the population
    pub winner: Kind,
    /// Running time, paused intervals excluded
    pub seconds: f64,
    /// Steps taken
    pub steps: u64,
    /// Conversions resolved over the run
    pub conversions: u64,
}

impl Outcome {
    /// Banner shown when a run ends
    pub fn message(&self) -> String {
        format!(
            "Simulation ended! {} {} wins! Time: {:.2} seconds",
            glyph(self.winner),
            self.winner.name(),
            self.seconds
        )
    }
}

/// Recent outcomes and how often each kind has won
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunHistory {
    /// Newest first
    pub recent: Vec<Outcome>,
    /// Lifetime wins per kind
    pub wins: KindCounts,
}

impl RunHistory {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rps_arena_history";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run
    pub fn record(&mut self, outcome: Outcome) {
        self.wins.increment(outcome.winner);
        self.recent.insert(0, outcome);
        self.recent.truncate(MAX_RECENT);
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    pub fn total_runs(&self) -> u32 {
        self.wins.total()
    }

    /// Shortest run in the recent list
    pub fn fastest(&self) -> Option<&Outcome> {
        self.recent
            .iter()
            .min_by(|a, b| a.seconds.total_cmp(&b.seconds))
    }

    /// One-line tally for the page, e.g. `Wins: 🪨 2 📄 1 ✂️ 0 | Fastest: 📄 4.00s`
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "No finished runs yet".to_string();
        }
        let wins = Kind::ALL
            .iter()
            .map(|&kind| format!("{} {}", glyph(kind), self.wins.get(kind)))
            .collect::<Vec<_>>()
            .join(" ");
        match self.fastest() {
            Some(best) => format!(
                "Wins: {wins} | Fastest: {} {:.2}s",
                glyph(best.winner),
                best.seconds
            ),
            None => format!("Wins: {wins}"),
        }
    }

    /// Read the stored history, or start an empty one
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(history) = serde_json::from_str::<RunHistory>(&json) {
                    log::info!("Loaded {} past runs", history.total_runs());
                    return history;
                }
            }
        }

        log::info!("No stored run history");
        Self::new()
    }

    /// Write the history back after a run finishes
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Run history saved ({} runs)", self.total_runs());
            }
        }
    }

    /// Headless runs keep no history between processes
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
