//! Round and session state machine
//!
//! This module contains the session controller that drives a scent
//! matching game: registering players, choosing a category, drawing a
//! pair and two players for each round, running the countdown, revealing
//! the answer and recording the outcome. The presentation layer talks to
//! it only through [`Command`]s and receives [`UpdateMessage`]s and
//! [`Snapshot`]s back through a [`Presenter`].
//!
//! The countdown is driven by [`AlarmMessage::Tick`] wake-ups that the
//! host schedules on the controller's behalf. Each wake-up carries the
//! timer epoch it was scheduled in, and the epoch moves on with every
//! counted second. A wake-up delivered twice, or left over from a stopped
//! or replaced countdown, is dropped instead of counting against the
//! current one.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    catalog::{Catalog, Category, Pair},
    config::GameConfig,
    constants::round::{MAX_DURATION_SECONDS, MIN_DURATION_SECONDS, TICK_INTERVAL},
    pool::{CategoryListing, PairPool},
    presenter::Presenter,
    roster::{self, PlayerRoster, RoundPlayers},
    tally::{Outcome, RoundRecord, ScoreTally, Scoreboard},
    timer::{RoundTimer, TimerEvent, TimerPhase},
};

/// Stage of a round that has a pair assigned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStage {
    /// Jars handed out, timer armed but not started
    Idle,
    /// Timer counting down
    Running,
}

/// Stage of the reveal phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealStage {
    /// Guessing is over, answer still hidden
    Pending,
    /// Answer and scent labels visible, waiting for the outcome
    Revealed,
}

/// Current phase of the session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for at least two player names
    #[default]
    AwaitingPlayers,
    /// Waiting for a category or a new pair
    CategorySelection,
    /// A pair and two players are assigned
    RoundActive(RoundStage),
    /// The countdown ended
    Reveal(RevealStage),
}

/// Non-error results of a controller operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Signal {
    /// The session state changed
    Changed,
    /// The selected category has no pairs left to play
    CategoryExhausted,
    /// The operation is not valid in the current phase and was ignored
    InvalidTransition,
}

/// Errors that can occur when handling a command
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The roster rejected the operation
    #[error(transparent)]
    Roster(#[from] roster::Error),
    /// The requested category is not part of the catalog
    #[error("unknown category {0}")]
    UnknownCategory(String),
}

/// Intents sent by the presentation layer
#[derive(Debug, Clone, Deserialize)]
pub enum Command {
    /// Replace the roster
    SetPlayers(Vec<String>),
    /// Pick a category and draw a round from it
    SelectCategory(String),
    /// Draw another pair in the selected category
    NewPair,
    /// Start the countdown
    Start,
    /// Stop the countdown before it runs out
    StopEarly,
    /// Show the answer
    Reveal,
    /// Record how the round ended
    Record(Outcome),
    /// Abandon the current round and clear the category
    ChangeCategory,
    /// Start a brand new session
    Restart,
}

/// Wake-ups scheduled by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Count the running timer down by one second
    Tick {
        /// Timer epoch the wake-up was scheduled in
        epoch: u64,
    },
}

/// One-shot notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UpdateMessage {
    /// The countdown moved by one second
    Tick {
        /// Seconds left
        remaining: u32,
        /// Seconds left as `MM:SS`
        clock: String,
    },
    /// The countdown reached zero
    TimeUp,
    /// The countdown was stopped early
    StoppedEarly,
    /// A category has no pairs left
    CategoryExhausted {
        /// The exhausted category
        category: String,
    },
    /// A command was rejected
    Error(Error),
    /// A round outcome was recorded
    RoundRecorded {
        /// How the round ended
        outcome: Outcome,
        /// Totals after recording
        tally: ScoreTally,
    },
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Status line shown to the facilitator
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Status {
    /// No roster yet
    #[display("Add players to begin.")]
    AddPlayers,
    /// No category selected
    #[display("Select a category to start a round.")]
    SelectCategory,
    /// A round was drawn after picking a category
    #[display(
        "Playing in “{category}”. Hand out the jars to {first} and {second}, then start the timer."
    )]
    Playing {
        /// Category display name
        category: String,
        /// Player receiving the first jar
        first: String,
        /// Player receiving the second jar
        second: String,
    },
    /// A round was drawn inside the same category
    #[display("New pair selected. Jars go to {first} and {second}. Hand them out, then start the timer.")]
    NewPair {
        /// Player receiving the first jar
        first: String,
        /// Player receiving the second jar
        second: String,
    },
    /// The countdown is running
    #[display("Timer running. Describe your scents and guess together!")]
    Running,
    /// The countdown ran out
    #[display("Time is up! Stop smelling and lock in your guess, then reveal the answer.")]
    TimeUp,
    /// The countdown was stopped early
    #[display("Round stopped early. Lock in your guess, then reveal the answer.")]
    StoppedEarly,
    /// The answer is visible
    #[display("Answer revealed. Now mark whether your guess was correct or not.")]
    Revealed,
    /// The round was recorded as correct
    #[display("Nice! Marked as correct. Choose another pair or switch category.")]
    MarkedCorrect,
    /// The round was recorded as incorrect
    #[display("Marked as incorrect. Try another pair or switch category.")]
    MarkedIncorrect,
    /// The selected category has nothing left
    #[display("Every pair in “{category}” has been played. Pick another category.")]
    Exhausted {
        /// Category display name
        category: String,
    },
    /// A command failed
    #[display("Sorry, {_0}.")]
    Rejected(Error),
}

/// Selected category as shown to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    /// Category identifier
    pub id: String,
    /// Category display name
    pub name: String,
    /// Category description
    pub description: String,
}

/// Reveal prompt and, once revealed, the answer
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealView {
    /// Why guessing ended
    pub reason: TimerEvent,
    /// Heading of the reveal panel
    pub heading: String,
    /// Instruction under the heading
    pub prompt: String,
    /// `Answer: ...`, once revealed
    pub answer: Option<String>,
    /// Per-jar scent description, once revealed
    pub jars: Option<String>,
}

/// The round in flight
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundView {
    /// Jar numbers to hand out, in order
    pub jars: Vec<u32>,
    /// Present once the countdown has ended
    pub reveal: Option<RevealView>,
}

/// Everything the presentation layer needs to render the session
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Current phase
    pub phase: Phase,
    /// Status line
    pub status: String,
    /// Seconds left on the countdown
    pub remaining_seconds: u32,
    /// Full round length in seconds
    pub round_duration_seconds: u32,
    /// Seconds counted so far in the round in flight
    pub elapsed_seconds: u32,
    /// Seconds left as `MM:SS`
    pub clock: String,
    /// Selected category
    pub category: Option<CategoryView>,
    /// Round in flight
    pub round: Option<RoundView>,
    /// Players assigned to the round in flight
    pub players: Option<RoundPlayers>,
    /// Every category with its remaining pair count
    pub categories: Vec<CategoryListing>,
    /// Running totals
    pub tally: ScoreTally,
}

impl Snapshot {
    /// Converts the snapshot to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// The session controller
///
/// Owns every piece of mutable game state; the presentation layer never
/// touches it directly.
#[derive(Debug)]
pub struct Session {
    /// Catalog plus per-category consumption
    pool: PairPool,
    /// Registered players
    roster: PlayerRoster,
    /// Countdown for the round in flight
    timer: RoundTimer,
    /// Length of every round in seconds
    round_duration: u32,
    /// Current phase
    phase: Phase,
    /// Id of the selected category
    category: Option<String>,
    /// Pair of the round in flight
    pair: Option<Pair>,
    /// Players of the round in flight
    players: Option<RoundPlayers>,
    /// Totals and round history
    scoreboard: Scoreboard,
    /// Status line
    status: Status,
    /// Notifications waiting to be sent
    notifications: Vec<UpdateMessage>,
}

impl Session {
    /// Creates a session from loaded game data
    pub fn new(config: GameConfig) -> Self {
        let (catalog, round_duration) = config.into_parts();
        Self::with_catalog(catalog, round_duration)
    }

    /// Creates a session from a catalog and a round length
    ///
    /// The round length is clamped to the range accepted by
    /// [`GameConfig`].
    pub fn with_catalog(catalog: Catalog, round_duration_seconds: u32) -> Self {
        let round_duration =
            round_duration_seconds.clamp(MIN_DURATION_SECONDS, MAX_DURATION_SECONDS);
        Self {
            pool: PairPool::new(catalog),
            roster: PlayerRoster::default(),
            timer: RoundTimer::new(round_duration),
            round_duration,
            phase: Phase::AwaitingPlayers,
            category: None,
            pair: None,
            players: None,
            scoreboard: Scoreboard::default(),
            status: Status::AddPlayers,
            notifications: Vec::new(),
        }
    }

    /// Returns the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the status line
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Returns the pair pool
    pub fn pool(&self) -> &PairPool {
        &self.pool
    }

    /// Returns the roster
    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    /// Returns the countdown
    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    /// Returns the running totals
    pub fn tally(&self) -> ScoreTally {
        self.scoreboard.tally()
    }

    /// Returns every completed round
    pub fn history(&self) -> &[RoundRecord] {
        self.scoreboard.history()
    }

    /// Returns the selected category
    pub fn selected_category(&self) -> Option<&Category> {
        self.pool.catalog().category(self.category.as_deref()?)
    }

    /// Returns the pair of the round in flight
    pub fn current_pair(&self) -> Option<&Pair> {
        self.pair.as_ref()
    }

    /// Returns the players of the round in flight
    pub fn round_players(&self) -> Option<&RoundPlayers> {
        self.players.as_ref()
    }

    /// Takes the notifications produced since the last call
    pub fn drain_notifications(&mut self) -> Vec<UpdateMessage> {
        std::mem::take(&mut self.notifications)
    }

    fn reject(&mut self, error: Error) -> Error {
        warn!(%error, "command rejected");
        self.status = Status::Rejected(error.clone());
        error
    }

    /// Status line describing the current phase
    fn phase_status(&self) -> Status {
        match self.phase {
            Phase::AwaitingPlayers => Status::AddPlayers,
            Phase::CategorySelection => match self.selected_category() {
                Some(category) if self.pool.remaining_count(category.id()) == 0 => {
                    Status::Exhausted {
                        category: category.name().to_owned(),
                    }
                }
                _ => Status::SelectCategory,
            },
            Phase::RoundActive(RoundStage::Idle) => {
                match (self.selected_category(), self.players.as_ref()) {
                    (Some(category), Some(players)) => Status::Playing {
                        category: category.name().to_owned(),
                        first: players.first.clone(),
                        second: players.second.clone(),
                    },
                    _ => Status::SelectCategory,
                }
            }
            Phase::RoundActive(RoundStage::Running) => Status::Running,
            Phase::Reveal(RevealStage::Pending) => {
                if self.timer.phase() == TimerPhase::StoppedEarly {
                    Status::StoppedEarly
                } else {
                    Status::TimeUp
                }
            }
            Phase::Reveal(RevealStage::Revealed) => Status::Revealed,
        }
    }

    fn ignore(&self, operation: &'static str) -> Signal {
        debug!(operation, phase = ?self.phase, "ignoring operation outside its phase");
        Signal::InvalidTransition
    }

    /// Drops the round in flight without consuming its pair
    fn abandon_round(&mut self) {
        self.timer.reset(self.round_duration);
        self.pair = None;
        self.players = None;
    }

    /// Draws a pair and two players from the selected category
    fn draw_round(&mut self, same_category: bool) -> Result<Signal, Error> {
        let Some(category) = self.selected_category() else {
            return Ok(self.ignore("draw_round"));
        };
        let category_id = category.id().to_owned();
        let category_name = category.name().to_owned();

        let Some(pair) = self.pool.pick_random(&category_id).cloned() else {
            info!(category = %category_id, "category exhausted");
            self.phase = Phase::CategorySelection;
            self.status = Status::Exhausted {
                category: category_name,
            };
            self.notifications.push(UpdateMessage::CategoryExhausted {
                category: category_id,
            });
            return Ok(Signal::CategoryExhausted);
        };

        let players = self
            .roster
            .pick_two_for_round()
            .map_err(|e| self.reject(e.into()))?;

        debug!(
            category = %category_id,
            pair = pair.id(),
            first = %players.first,
            second = %players.second,
            "round drawn"
        );

        self.status = if same_category {
            Status::NewPair {
                first: players.first.clone(),
                second: players.second.clone(),
            }
        } else {
            Status::Playing {
                category: category_name,
                first: players.first.clone(),
                second: players.second.clone(),
            }
        };
        self.pair = Some(pair);
        self.players = Some(players);
        self.timer.reset(self.round_duration);
        self.phase = Phase::RoundActive(RoundStage::Idle);

        Ok(Signal::Changed)
    }

    /// Replaces the roster
    ///
    /// Leaves `AwaitingPlayers` on success; in later phases only the roster
    /// changes and the next round draws from it.
    ///
    /// # Errors
    ///
    /// * `Error::Roster(roster::Error::InvalidRoster)` - Fewer than two names
    /// * `Error::Roster(roster::Error::TooManyPlayers)` - More than ten names
    pub fn set_players<I, S>(&mut self, names: I) -> Result<Signal, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roster
            .set_players(names)
            .map_err(|e| self.reject(e.into()))?;

        debug!(players = self.roster.len(), "roster set");

        if self.phase == Phase::AwaitingPlayers {
            self.phase = Phase::CategorySelection;
        }
        self.status = self.phase_status();
        Ok(Signal::Changed)
    }

    /// Selects a category and draws a round from it
    ///
    /// Any round in flight is abandoned without consuming its pair.
    ///
    /// # Returns
    ///
    /// `Signal::CategoryExhausted` if the category has no pairs left, in
    /// which case the session stays in `CategorySelection`
    ///
    /// # Errors
    ///
    /// * `Error::Roster(roster::Error::InsufficientPlayers)` - Fewer than two players
    /// * `Error::UnknownCategory` - The category is not in the catalog
    pub fn select_category(&mut self, category_id: &str) -> Result<Signal, Error> {
        if !self.roster.is_ready() {
            return Err(self.reject(roster::Error::InsufficientPlayers.into()));
        }
        if self.pool.catalog().category(category_id).is_none() {
            return Err(self.reject(Error::UnknownCategory(category_id.to_owned())));
        }

        self.abandon_round();
        self.category = Some(category_id.to_owned());
        self.draw_round(false)
    }

    /// Draws another pair in the selected category
    ///
    /// Only valid before the countdown starts or between rounds.
    ///
    /// # Errors
    ///
    /// Only fails if the roster no longer holds two players.
    pub fn new_pair(&mut self) -> Result<Signal, Error> {
        let can_redraw = matches!(
            self.phase,
            Phase::CategorySelection | Phase::RoundActive(RoundStage::Idle)
        );
        if !can_redraw || self.category.is_none() {
            return Ok(self.ignore("new_pair"));
        }

        self.abandon_round();
        self.draw_round(true)
    }

    /// Starts the countdown and schedules the first wake-up
    pub fn start<S: FnMut(AlarmMessage, Duration)>(&mut self, mut schedule_message: S) -> Signal {
        if self.phase != Phase::RoundActive(RoundStage::Idle)
            || !self.timer.start(self.round_duration)
        {
            return self.ignore("start");
        }

        debug!(duration = self.round_duration, "countdown started");

        self.phase = Phase::RoundActive(RoundStage::Running);
        self.status = Status::Running;
        schedule_message(
            AlarmMessage::Tick {
                epoch: self.timer.epoch(),
            },
            TICK_INTERVAL,
        );

        Signal::Changed
    }

    /// Counts the running countdown down by one second
    ///
    /// Moves to the reveal prompt when the countdown reaches zero. A status
    /// line left by a rejected command is replaced by the running one.
    pub fn tick(&mut self) -> Signal {
        if self.phase != Phase::RoundActive(RoundStage::Running) {
            return self.ignore("tick");
        }

        match self.timer.tick() {
            Some(TimerEvent::TimeUp) => {
                debug!("time is up");
                self.phase = Phase::Reveal(RevealStage::Pending);
                self.status = Status::TimeUp;
                self.notifications.push(UpdateMessage::TimeUp);
            }
            Some(TimerEvent::StoppedEarly) | None => {
                if matches!(self.status, Status::Rejected(_)) {
                    self.status = self.phase_status();
                }
                self.notifications.push(UpdateMessage::Tick {
                    remaining: self.timer.remaining(),
                    clock: self.timer.clock(),
                });
            }
        }

        Signal::Changed
    }

    /// Stops the countdown before it runs out
    pub fn stop_early(&mut self) -> Signal {
        if self.phase != Phase::RoundActive(RoundStage::Running) {
            return self.ignore("stop_early");
        }
        let Some(event) = self.timer.stop_early() else {
            return self.ignore("stop_early");
        };

        debug!(remaining = self.timer.remaining(), "countdown stopped early");

        self.phase = Phase::Reveal(RevealStage::Pending);
        self.status = Status::StoppedEarly;
        self.notifications.push(match event {
            TimerEvent::StoppedEarly => UpdateMessage::StoppedEarly,
            TimerEvent::TimeUp => UpdateMessage::TimeUp,
        });

        Signal::Changed
    }

    /// Reveals the answer and the scent labels
    pub fn reveal(&mut self) -> Signal {
        if self.phase != Phase::Reveal(RevealStage::Pending) {
            return self.ignore("reveal");
        }

        self.phase = Phase::Reveal(RevealStage::Revealed);
        self.status = Status::Revealed;

        Signal::Changed
    }

    /// Records how the round ended and returns to category selection
    ///
    /// The pair is consumed and the tally updated; the category stays
    /// selected so another pair can be drawn from it.
    pub fn record(&mut self, outcome: Outcome) -> Signal {
        if self.phase != Phase::Reveal(RevealStage::Revealed) {
            return self.ignore("record");
        }
        let (Some(category), Some(pair)) = (self.category.clone(), self.pair.take()) else {
            return self.ignore("record");
        };

        self.pool.mark_consumed(&category, pair.id());
        let tally = self.scoreboard.record(RoundRecord {
            category: category.clone(),
            pair: pair.id().to_owned(),
            answer: pair.answer().to_owned(),
            players: self.players.take(),
            outcome,
        });

        info!(
            %category,
            pair = pair.id(),
            ?outcome,
            rounds_played = tally.rounds_played,
            rounds_correct = tally.rounds_correct,
            "round recorded"
        );

        self.notifications
            .push(UpdateMessage::RoundRecorded { outcome, tally });
        self.status = match outcome {
            Outcome::Correct => Status::MarkedCorrect,
            Outcome::Incorrect => Status::MarkedIncorrect,
        };
        self.abandon_round();
        self.phase = Phase::CategorySelection;

        Signal::Changed
    }

    /// Abandons the round in flight and clears the selected category
    ///
    /// Valid from any phase. Neither the tally nor pair consumption is
    /// affected, and a category still cannot be picked until two players
    /// are registered.
    pub fn change_category(&mut self) -> Signal {
        debug!(phase = ?self.phase, "category cleared");

        self.abandon_round();
        self.category = None;
        self.phase = Phase::CategorySelection;
        self.status = Status::SelectCategory;

        Signal::Changed
    }

    /// Starts over with an empty roster, fresh pool and zeroed tally
    pub fn restart(&mut self) -> Signal {
        info!(
            rounds_played = self.tally().rounds_played,
            "session restarted"
        );

        self.abandon_round();
        self.pool.reset();
        self.roster.clear();
        self.scoreboard = Scoreboard::default();
        self.category = None;
        self.phase = Phase::AwaitingPlayers;
        self.status = Status::AddPlayers;

        Signal::Changed
    }

    /// Applies a command
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation; see
    /// [`Session::set_players`], [`Session::select_category`] and
    /// [`Session::new_pair`].
    pub fn handle_command<S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        command: Command,
        schedule_message: S,
    ) -> Result<Signal, Error> {
        match command {
            Command::SetPlayers(names) => self.set_players(names),
            Command::SelectCategory(category_id) => self.select_category(&category_id),
            Command::NewPair => self.new_pair(),
            Command::Start => Ok(self.start(schedule_message)),
            Command::StopEarly => Ok(self.stop_early()),
            Command::Reveal => Ok(self.reveal()),
            Command::Record(outcome) => Ok(self.record(outcome)),
            Command::ChangeCategory => Ok(self.change_category()),
            Command::Restart => Ok(self.restart()),
        }
    }

    /// Applies a scheduled wake-up
    ///
    /// Wake-ups that were already counted or belong to an earlier countdown
    /// are dropped. While the countdown keeps running, the next wake-up is
    /// scheduled.
    pub fn handle_alarm<S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
    ) -> Signal {
        match message {
            AlarmMessage::Tick { epoch } => {
                if epoch != self.timer.epoch() {
                    debug!(epoch, current = self.timer.epoch(), "dropping stale wake-up");
                    return Signal::InvalidTransition;
                }

                let signal = self.tick();
                if self.timer.phase() == TimerPhase::Running {
                    schedule_message(
                        AlarmMessage::Tick {
                            epoch: self.timer.epoch(),
                        },
                        TICK_INTERVAL,
                    );
                }
                signal
            }
        }
    }

    /// Sends pending notifications followed by a fresh snapshot
    fn flush<P: Presenter>(&mut self, presenter: &P) {
        for message in self.drain_notifications() {
            presenter.send_message(&message);
        }
        presenter.send_state(&self.snapshot());
    }

    /// Handles a command from the presentation layer
    ///
    /// Failures are reported to the presenter as [`UpdateMessage::Error`]
    /// and never escape this method.
    pub fn receive_command<P: Presenter, S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        command: Command,
        schedule_message: S,
        presenter: &P,
    ) {
        if let Err(error) = self.handle_command(command, schedule_message) {
            self.notifications.push(UpdateMessage::Error(error));
        }
        self.flush(presenter);
    }

    /// Handles a scheduled wake-up and reports the result
    pub fn receive_alarm<P: Presenter, S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        message: AlarmMessage,
        schedule_message: S,
        presenter: &P,
    ) {
        if self.handle_alarm(message, schedule_message) == Signal::Changed {
            self.flush(presenter);
        }
    }

    fn reveal_view(&self, pair: &Pair) -> Option<RevealView> {
        let Phase::Reveal(stage) = self.phase else {
            return None;
        };
        let reason = match self.timer.phase() {
            TimerPhase::StoppedEarly => TimerEvent::StoppedEarly,
            _ => TimerEvent::TimeUp,
        };

        Some(match stage {
            RevealStage::Pending => match reason {
                TimerEvent::StoppedEarly => RevealView {
                    reason,
                    heading: "Round stopped".to_owned(),
                    prompt: "You chose to stop early. Lock in your guess, then press “Reveal Answer”."
                        .to_owned(),
                    answer: None,
                    jars: None,
                },
                TimerEvent::TimeUp => RevealView {
                    reason,
                    heading: "Time is up!".to_owned(),
                    prompt: "Talk it out and agree on your final guess. When you’re ready, press “Reveal Answer”."
                        .to_owned(),
                    answer: None,
                    jars: None,
                },
            },
            RevealStage::Revealed => RevealView {
                reason,
                heading: "Answer revealed".to_owned(),
                prompt: "Now mark whether your guess was correct or not.".to_owned(),
                answer: Some(format!("Answer: {}", pair.answer())),
                jars: Some(pair.jar_descriptions()),
            },
        })
    }

    /// Builds the full view of the session
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            status: self.status.to_string(),
            remaining_seconds: self.timer.remaining(),
            round_duration_seconds: self.round_duration,
            elapsed_seconds: self.timer.elapsed(),
            clock: self.timer.clock(),
            category: self.selected_category().map(|category| CategoryView {
                id: category.id().to_owned(),
                name: category.name().to_owned(),
                description: category.description().to_owned(),
            }),
            round: self.pair.as_ref().map(|pair| RoundView {
                jars: pair.jars().to_vec(),
                reveal: self.reveal_view(pair),
            }),
            players: self.players.clone(),
            categories: self.pool.listings(),
            tally: self.tally(),
        }
    }
}
