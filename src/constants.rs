//! Configuration constants for the scent-matching game
//!
//! This module contains the limits and defaults used throughout the
//! session controller and the catalog loader, grouped by the component
//! they constrain.

/// Player roster constants
pub mod roster {
    /// Minimum number of players needed before a round can be played
    pub const MIN_PLAYER_COUNT: usize = 2;
    /// Maximum number of players a roster may hold
    pub const MAX_PLAYER_COUNT: usize = 10;
}

/// Round timing constants
pub mod round {
    use std::time::Duration;

    /// Round length used when the data source does not provide one
    pub const DEFAULT_DURATION_SECONDS: u32 = 120;
    /// Shortest accepted round length in seconds
    pub const MIN_DURATION_SECONDS: u32 = 10;
    /// Longest accepted round length in seconds
    pub const MAX_DURATION_SECONDS: u32 = 600;
    /// Interval between two timer wake-ups
    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
}

/// Catalog constants
pub mod catalog {
    /// Maximum number of categories in a catalog
    pub const MAX_CATEGORY_COUNT: usize = 50;
    /// Maximum number of pairs inside a single category
    pub const MAX_PAIR_COUNT: usize = 200;
    /// Maximum number of jars used by a single pair
    pub const MAX_JAR_COUNT: usize = 8;
    /// Maximum length of identifiers, names, answers and labels
    pub const MAX_TEXT_LENGTH: usize = 200;
}
