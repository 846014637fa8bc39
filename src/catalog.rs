//! Scent catalog
//!
//! This module defines the immutable records a session plays from: a
//! catalog of categories, each holding the pairs (round definitions) that
//! can be drawn for that category. Records are validated when loaded
//! through [`crate::config::GameConfig`] and never change afterwards.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A single scent-matching challenge
///
/// Players receive the listed jars, smell them, and try to guess the
/// answer they represent together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    /// Identifier, unique within its category
    #[garde(length(min = 1, max = crate::constants::catalog::MAX_TEXT_LENGTH))]
    id: String,
    /// The thing the jars represent
    #[garde(length(min = 1, max = crate::constants::catalog::MAX_TEXT_LENGTH))]
    answer: String,
    /// Jar numbers handed out for this pair, in order
    #[garde(length(min = 1, max = crate::constants::catalog::MAX_JAR_COUNT))]
    jars: Vec<u32>,
    /// Scent of each jar, parallel to `jars`, possibly empty
    #[serde(default)]
    #[garde(length(max = crate::constants::catalog::MAX_JAR_COUNT), inner(length(max = crate::constants::catalog::MAX_TEXT_LENGTH)))]
    scent_labels: Vec<String>,
}

impl Pair {
    /// Creates a pair from its parts
    ///
    /// No validation happens here; callers building records by hand are
    /// expected to pass them through [`crate::config::GameConfig`].
    pub fn new(
        id: impl Into<String>,
        answer: impl Into<String>,
        jars: Vec<u32>,
        scent_labels: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            answer: answer.into(),
            jars,
            scent_labels,
        }
    }

    /// Returns the pair identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the answer players are trying to guess
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the jar numbers in hand-out order
    pub fn jars(&self) -> &[u32] {
        &self.jars
    }

    /// Returns the scent labels, empty when the pair has none
    pub fn scent_labels(&self) -> &[String] {
        &self.scent_labels
    }

    /// Whether the label list is usable alongside the jar list
    pub fn labels_match_jars(&self) -> bool {
        self.scent_labels.is_empty() || self.scent_labels.len() == self.jars.len()
    }

    /// Describes each jar for the reveal phase
    ///
    /// With labels: `Jar 1 (#2): Caramel • Jar 2 (#3): Vanilla`.
    /// Without labels: `Jars: Jar 1 #2 • Jar 2 #3`.
    pub fn jar_descriptions(&self) -> String {
        if self.scent_labels.is_empty() {
            format!(
                "Jars: {}",
                self.jars
                    .iter()
                    .enumerate()
                    .map(|(i, jar)| format!("Jar {} #{jar}", i + 1))
                    .join(" • ")
            )
        } else {
            self.scent_labels
                .iter()
                .zip(&self.jars)
                .enumerate()
                .map(|(i, (label, jar))| format!("Jar {} (#{jar}): {label}", i + 1))
                .join(" • ")
        }
    }
}

/// A themed group of pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Identifier, unique within the catalog
    #[garde(length(min = 1, max = crate::constants::catalog::MAX_TEXT_LENGTH))]
    id: String,
    /// Name shown on the category button
    #[garde(length(min = 1, max = crate::constants::catalog::MAX_TEXT_LENGTH))]
    name: String,
    /// Short explanation of what the category covers
    #[serde(default)]
    #[garde(length(max = crate::constants::catalog::MAX_TEXT_LENGTH))]
    description: String,
    /// The pairs that can be drawn in this category
    #[garde(length(max = crate::constants::catalog::MAX_PAIR_COUNT), dive)]
    pairs: Vec<Pair>,
}

impl Category {
    /// Creates a category from its parts
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        pairs: Vec<Pair>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            pairs,
        }
    }

    /// Returns the category identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the pairs in catalog order
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Looks up a pair by identifier
    pub fn pair(&self, pair_id: &str) -> Option<&Pair> {
        self.pairs.iter().find(|pair| pair.id == pair_id)
    }
}

/// The immutable collection of categories a session plays from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Wraps already validated categories
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Returns every category in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up a category by identifier
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
    }
}
