//! Game data loading and validation
//!
//! This module defines the record supplied by the data source: the list
//! of categories and the round length. It parses that record from JSON,
//! validates it, and provides the built-in catalog used when no external
//! data is available.

use std::collections::HashSet;

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Category};

/// Built-in game data used as the fallback data source
const EMBEDDED_GAME: &str = include_str!("config/default_game.json");

fn default_round_duration() -> u32 {
    crate::constants::round::DEFAULT_DURATION_SECONDS
}

/// The complete record supplied by the data source
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Categories in display order
    #[garde(length(min = 1, max = crate::constants::catalog::MAX_CATEGORY_COUNT), dive)]
    categories: Vec<Category>,
    /// Length of every round in seconds
    #[serde(default = "default_round_duration")]
    #[garde(range(min = crate::constants::round::MIN_DURATION_SECONDS, max = crate::constants::round::MAX_DURATION_SECONDS))]
    round_duration_seconds: u32,
}

/// Errors that can occur while loading game data
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not well-formed game data
    #[error("malformed game data: {0}")]
    Json(#[from] serde_json::Error),
    /// A field is outside of its allowed bounds
    #[error("invalid game data: {0}")]
    Invalid(#[from] garde::Report),
    /// A pair has scent labels that do not line up with its jars
    #[error("pair {pair} in category {category} has a scent label count that differs from its jar count")]
    LabelMismatch {
        /// Category holding the offending pair
        category: String,
        /// The offending pair
        pair: String,
    },
    /// Two categories share an identifier
    #[error("category id {0} is used more than once")]
    DuplicateCategory(String),
    /// Two pairs in the same category share an identifier
    #[error("pair id {pair} is used more than once in category {category}")]
    DuplicatePair {
        /// Category holding the duplicated pair
        category: String,
        /// The duplicated pair id
        pair: String,
    },
}

impl GameConfig {
    /// Builds game data from already constructed categories
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`GameConfig::from_json`], minus
    /// [`Error::Json`].
    pub fn new(categories: Vec<Category>, round_duration_seconds: u32) -> Result<Self, Error> {
        let config = Self {
            categories,
            round_duration_seconds,
        };
        config.check()?;
        Ok(config)
    }

    /// Parses and validates game data from JSON
    ///
    /// # Errors
    ///
    /// * `Error::Json` - The text is not valid game data JSON
    /// * `Error::Invalid` - A length or range limit is violated
    /// * `Error::LabelMismatch` - A pair has labels but not one per jar
    /// * `Error::DuplicateCategory` / `Error::DuplicatePair` - Identifiers collide
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Returns the built-in game data
    ///
    /// # Panics
    ///
    /// This method panics if the embedded data fails to load, which the
    /// test suite rules out.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_GAME).expect("embedded game data is valid")
    }

    fn check(&self) -> Result<(), Error> {
        self.validate()?;
        self.validate_catalog()
    }

    /// Checks the cross-record rules that field validation cannot express
    ///
    /// # Errors
    ///
    /// Returns the first label mismatch or duplicate identifier found.
    pub fn validate_catalog(&self) -> Result<(), Error> {
        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(category.id()) {
                return Err(Error::DuplicateCategory(category.id().to_owned()));
            }
            let mut pair_ids = HashSet::new();
            for pair in category.pairs() {
                if !pair_ids.insert(pair.id()) {
                    return Err(Error::DuplicatePair {
                        category: category.id().to_owned(),
                        pair: pair.id().to_owned(),
                    });
                }
                if !pair.labels_match_jars() {
                    return Err(Error::LabelMismatch {
                        category: category.id().to_owned(),
                        pair: pair.id().to_owned(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the round length in seconds
    pub fn round_duration_seconds(&self) -> u32 {
        self.round_duration_seconds
    }

    /// Returns the categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Splits the record into the catalog and the round length
    pub fn into_parts(self) -> (Catalog, u32) {
        (Catalog::new(self.categories), self.round_duration_seconds)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_game_loads() {
        let config = GameConfig::embedded();
        assert_eq!(config.round_duration_seconds(), 120);
        assert_eq!(config.categories().len(), 3);
        assert_eq!(
            config
                .categories()
                .iter()
                .map(|c| c.pairs().len())
                .sum::<usize>(),
            14
        );
    }

    #[test]
    fn test_round_duration_defaults() {
        let config = GameConfig::from_json(
            r#"{"categories":[{"id":"c","name":"C","pairs":[{"id":"p","answer":"P","jars":[1]}]}]}"#,
        )
        .unwrap();
        assert_eq!(config.round_duration_seconds(), 120);
    }

    #[test]
    fn test_round_duration_out_of_range() {
        let result = GameConfig::from_json(
            r#"{"categories":[{"id":"c","name":"C","pairs":[]}],"roundDurationSeconds":1}"#,
        );
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_label_mismatch_rejected() {
        let result = GameConfig::from_json(
            r#"{"categories":[{"id":"c","name":"C","pairs":[
                {"id":"p","answer":"P","jars":[1,2],"scentLabels":["Only one"]}
            ]}]}"#,
        );
        match result {
            Err(Error::LabelMismatch { category, pair }) => {
                assert_eq!(category, "c");
                assert_eq!(pair, "p");
            }
            other => panic!("expected label mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_jarless_pair_rejected() {
        let result = GameConfig::from_json(
            r#"{"categories":[{"id":"c","name":"C","pairs":[{"id":"p","answer":"P","jars":[]}]}]}"#,
        );
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = GameConfig::from_json(
            r#"{"categories":[
                {"id":"c","name":"C","pairs":[]},
                {"id":"c","name":"Again","pairs":[]}
            ]}"#,
        );
        assert!(matches!(result, Err(Error::DuplicateCategory(id)) if id == "c"));

        let result = GameConfig::from_json(
            r#"{"categories":[{"id":"c","name":"C","pairs":[
                {"id":"p","answer":"P","jars":[1]},
                {"id":"p","answer":"Q","jars":[2]}
            ]}]}"#,
        );
        assert!(matches!(result, Err(Error::DuplicatePair { .. })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_into_parts() {
        let (catalog, duration) = GameConfig::embedded().into_parts();
        assert_eq!(duration, 120);
        assert!(catalog.category("food-drink").is_some());
    }
}
