//! Object kinds and the precedence cycle between them

use serde::{Deserialize, Serialize};

/// What an entity currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Rock,
    Paper,
    Scissors,
}

impl Kind {
    /// All kinds, in population creation order
    pub const ALL: [Kind; 3] = [Kind::Rock, Kind::Paper, Kind::Scissors];

    /// Returns true if `self` converts `other` on contact
    pub fn beats(self, other: Kind) -> bool {
        matches!(
            (self, other),
            (Kind::Rock, Kind::Scissors) | (Kind::Paper, Kind::Rock) | (Kind::Scissors, Kind::Paper)
        )
    }

    /// Capitalized display name
    pub fn name(self) -> &'static str {
        match self {
            Kind::Rock => "Rock",
            Kind::Paper => "Paper",
            Kind::Scissors => "Scissors",
        }
    }
}

/// Per-kind entity counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub rock: u32,
    pub paper: u32,
    pub scissors: u32,
}

impl KindCounts {
    pub fn new(rock: u32, paper: u32, scissors: u32) -> Self {
        Self {
            rock,
            paper,
            scissors,
        }
    }

    /// Tally the kinds of a population
    pub fn tally(kinds: impl IntoIterator<Item = Kind>) -> Self {
        let mut counts = Self::default();
        for kind in kinds {
            counts.increment(kind);
        }
        counts
    }

    pub fn get(&self, kind: Kind) -> u32 {
        match kind {
            Kind::Rock => self.rock,
            Kind::Paper => self.paper,
            Kind::Scissors => self.scissors,
        }
    }

    pub fn increment(&mut self, kind: Kind) {
        match kind {
            Kind::Rock => self.rock += 1,
            Kind::Paper => self.paper += 1,
            Kind::Scissors => self.scissors += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.rock + self.paper + self.scissors
    }

    /// The kind holding the whole (non-empty) population, if any
    pub fn sole_survivor(&self) -> Option<Kind> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Kind::ALL.into_iter().find(|&k| self.get(k) == total)
    }
}
