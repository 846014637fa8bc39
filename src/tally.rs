//! Score keeping
//!
//! This module counts played and correctly guessed rounds and keeps a
//! record of each completed round for the end-of-session summary.

use serde::{Deserialize, Serialize};

use crate::roster::RoundPlayers;

/// How a round ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The players guessed the answer
    Correct,
    /// The players did not guess the answer
    Incorrect,
}

/// Running totals for a session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTally {
    /// Rounds with a recorded outcome
    pub rounds_played: u32,
    /// Rounds recorded as correct
    pub rounds_correct: u32,
}

impl ScoreTally {
    /// Counts one completed round
    pub fn record(&mut self, outcome: Outcome) {
        self.rounds_played += 1;
        if outcome == Outcome::Correct {
            self.rounds_correct += 1;
        }
    }
}

/// A completed round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Category the pair was drawn from
    pub category: String,
    /// The pair that was played
    pub pair: String,
    /// The answer of the pair
    pub answer: String,
    /// Who smelled the jars
    pub players: Option<RoundPlayers>,
    /// How the round ended
    pub outcome: Outcome,
}

/// Totals plus the history they were computed from
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    tally: ScoreTally,
    history: Vec<RoundRecord>,
}

impl Scoreboard {
    /// Records a completed round and returns the updated totals
    pub fn record(&mut self, record: RoundRecord) -> ScoreTally {
        self.tally.record(record.outcome);
        self.history.push(record);
        self.tally
    }

    /// Returns the running totals
    pub fn tally(&self) -> ScoreTally {
        self.tally
    }

    /// Returns the completed rounds in play order
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }
}
