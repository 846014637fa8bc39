//! Player roster management
//!
//! This module holds the ordered list of participants and picks the two
//! players who receive the jars for each round. Names are trimmed and
//! blank entries dropped; identical names are allowed since players are
//! told apart by position.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::roster::{MAX_PLAYER_COUNT, MIN_PLAYER_COUNT};

/// Errors that can occur when managing the roster
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Fewer than two non-empty names were supplied
    #[error("please enter at least two player names")]
    InvalidRoster,
    /// More names were supplied than the roster can hold
    #[error("a game cannot have more than ten players")]
    TooManyPlayers,
    /// A round was requested before two players were registered
    #[error("please add at least two players before starting")]
    InsufficientPlayers,
}

/// The two players who receive the jars for a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPlayers {
    /// Player handed the first jar
    pub first: String,
    /// Player handed the second jar
    pub second: String,
}

/// Ordered list of participant names
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PlayerRoster {
    players: Vec<String>,
}

impl PlayerRoster {
    /// Replaces the roster with the given names
    ///
    /// Each name is trimmed and empty names are skipped.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidRoster` - Fewer than two names remain after trimming
    /// * `Error::TooManyPlayers` - More than ten names remain after trimming
    pub fn set_players<I, S>(&mut self, names: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let players = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect_vec();

        if players.len() < MIN_PLAYER_COUNT {
            return Err(Error::InvalidRoster);
        }
        if players.len() > MAX_PLAYER_COUNT {
            return Err(Error::TooManyPlayers);
        }

        self.players = players;
        Ok(())
    }

    /// Picks the two players for the next round
    ///
    /// With exactly two players they are returned in stored order. With
    /// more, two distinct positions are drawn uniformly at random.
    ///
    /// # Errors
    ///
    /// * `Error::InsufficientPlayers` - The roster holds fewer than two names
    pub fn pick_two_for_round(&self) -> Result<RoundPlayers, Error> {
        let count = self.players.len();
        if count < MIN_PLAYER_COUNT {
            return Err(Error::InsufficientPlayers);
        }

        let (first, second) = if count == MIN_PLAYER_COUNT {
            (0, 1)
        } else {
            let first = fastrand::usize(..count);
            let mut second = fastrand::usize(..count);
            while second == first {
                second = fastrand::usize(..count);
            }
            (first, second)
        };

        Ok(RoundPlayers {
            first: self.players[first].clone(),
            second: self.players[second].clone(),
        })
    }

    /// Returns the names in roster order
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Returns the number of players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Checks whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether enough players are registered to play a round
    pub fn is_ready(&self) -> bool {
        self.players.len() >= MIN_PLAYER_COUNT
    }

    /// Removes every player
    pub fn clear(&mut self) {
        self.players.clear();
    }
}
