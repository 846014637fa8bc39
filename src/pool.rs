//! Per-category pair consumption tracking
//!
//! The pool remembers which pairs have already been played in each
//! category so they are never drawn again within a session. Drawing a
//! pair does not consume it; only recording a round outcome does.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde::Serialize;

use crate::catalog::{Catalog, Category, Pair};

/// Tracks which pairs of a catalog have been consumed
#[derive(Debug, Clone, Default)]
pub struct PairPool {
    /// The catalog pairs are drawn from
    catalog: Catalog,
    /// Consumed pair ids, keyed by category id
    consumed: HashMap<String, HashSet<String>>,
}

/// Remaining-pair summary for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListing {
    /// Category identifier
    pub id: String,
    /// Category display name
    pub name: String,
    /// Number of pairs in the category
    pub total: usize,
    /// Number of pairs not yet played
    pub remaining: usize,
    /// Whether every pair has been played
    pub exhausted: bool,
    /// Label for the category button, such as "5 pairs"
    pub pill: String,
}

impl PairPool {
    /// Creates a pool with nothing consumed
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            consumed: HashMap::new(),
        }
    }

    /// Returns the catalog backing this pool
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn is_consumed(&self, category_id: &str, pair_id: &str) -> bool {
        self.consumed
            .get(category_id)
            .is_some_and(|consumed| consumed.contains(pair_id))
    }

    fn unconsumed<'a>(&'a self, category: &'a Category) -> impl Iterator<Item = &'a Pair> {
        category
            .pairs()
            .iter()
            .filter(move |pair| !self.is_consumed(category.id(), pair.id()))
    }

    /// Number of pairs in the category that have not been consumed
    ///
    /// Unknown categories have nothing remaining.
    pub fn remaining_count(&self, category_id: &str) -> usize {
        self.catalog
            .category(category_id)
            .map_or(0, |category| self.unconsumed(category).count())
    }

    /// Draws a random pair that has not been consumed
    ///
    /// # Returns
    ///
    /// `None` when every pair in the category has been consumed or the
    /// category does not exist.
    pub fn pick_random(&self, category_id: &str) -> Option<&Pair> {
        let category = self.catalog.category(category_id)?;
        fastrand::choice(self.unconsumed(category).collect_vec())
    }

    /// Marks a pair as played
    ///
    /// Marking is idempotent and ignores pairs that are not part of the
    /// category.
    ///
    /// # Returns
    ///
    /// `true` if the pair was newly consumed, `false` otherwise
    pub fn mark_consumed(&mut self, category_id: &str, pair_id: &str) -> bool {
        let known = self
            .catalog
            .category(category_id)
            .is_some_and(|category| category.pair(pair_id).is_some());
        if !known {
            return false;
        }

        self.consumed
            .entry(category_id.to_owned())
            .or_default()
            .insert(pair_id.to_owned())
    }

    /// Forgets all consumption, for a full session restart
    pub fn reset(&mut self) {
        self.consumed.clear();
    }

    /// Summarizes every category for the category picker
    pub fn listings(&self) -> Vec<CategoryListing> {
        self.catalog
            .categories()
            .iter()
            .map(|category| {
                let total = category.pairs().len();
                let remaining = self.unconsumed(category).count();
                CategoryListing {
                    id: category.id().to_owned(),
                    name: category.name().to_owned(),
                    total,
                    remaining,
                    exhausted: remaining == 0,
                    pill: pluralizer::pluralize("pair", total as isize, true),
                }
            })
            .collect()
    }
}
