//! # Scent Match Game Library
//!
//! This library provides the core logic for a scent matching party game.
//! A facilitator registers players, picks a category and hands two scent
//! jars to two players; they describe what they smell and guess the
//! object or place that connects the scents before the countdown ends.
//!
//! The [`session::Session`] controller owns all game state. The
//! presentation layer sends it [`session::Command`]s, delivers the
//! [`session::AlarmMessage`] wake-ups it asks for, and renders what it
//! reports through a [`presenter::Presenter`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::struct_field_names)]

pub mod catalog;
pub mod config;
pub mod constants;
pub mod pool;
pub mod presenter;
pub mod roster;
pub mod session;
pub mod tally;
pub mod timer;

pub use config::GameConfig;
pub use session::Session;
