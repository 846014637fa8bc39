//! Presentation layer boundary
//!
//! This module defines the trait through which the session controller
//! reports back to whatever renders the game, be it a web page, a
//! terminal or a test harness. The controller never reads anything back
//! from the presenter.

use crate::session::{Snapshot, UpdateMessage};

/// Trait for delivering session output to the presentation layer
pub trait Presenter {
    /// Sends a one-shot notification
    ///
    /// Notifications announce things that happened, such as a countdown
    /// tick or a rejected command, and are sent before the snapshot that
    /// reflects them.
    ///
    /// # Arguments
    ///
    /// * `message` - The notification to send
    fn send_message(&self, message: &UpdateMessage);

    /// Sends the full view of the session
    ///
    /// # Arguments
    ///
    /// * `state` - The snapshot to render
    fn send_state(&self, state: &Snapshot);
}
