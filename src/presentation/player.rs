// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Presentation playback state machine.
//!
//! The player walks a read-only deck snapshot with an index cursor. It is
//! driven by two event sources only: host commands (keyboard and on-screen
//! buttons) and the auto-advance timer. Both go through the same
//! transition functions. Side effects the host must perform are queued as
//! [`PlayerEvent`]s and drained once per frame.
//!
//! Auto-advance holds on the last slide; only a manual "next" on the last
//! slide leaves the presentation.

use super::timer::{AdvanceTimer, TimerToken};
use crate::config::{seconds_to_duration, PresentationConfig};
use crate::models::deck::Deck;
use std::time::{Duration, Instant};

/// Where the player is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Playing { index: usize },
    Paused { index: usize },
    /// Terminal. The host has been told to close the presentation.
    Finished { index: usize },
}

impl PlayerState {
    pub fn index(self) -> usize {
        match self {
            PlayerState::Playing { index }
            | PlayerState::Paused { index }
            | PlayerState::Finished { index } => index,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, PlayerState::Playing { .. })
    }

    pub fn is_finished(self) -> bool {
        matches!(self, PlayerState::Finished { .. })
    }

    fn with_index(self, index: usize) -> Self {
        match self {
            PlayerState::Playing { .. } => PlayerState::Playing { index },
            PlayerState::Paused { .. } => PlayerState::Paused { index },
            PlayerState::Finished { .. } => PlayerState::Finished { index },
        }
    }
}

/// Why the presentation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The host asked to leave (exit button, Escape).
    Host,
    /// Manual next on the last slide.
    PastLastSlide,
    /// Nothing to show.
    EmptyDeck,
}

/// Host commands. Keyboard and buttons both map onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Next,
    Previous,
    TogglePause,
    Exit,
}

/// Side effects requested from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Best effort; refusal must not affect playback.
    FullscreenRequested,
    /// Best effort; a missing or blocked track leaves the presentation silent.
    AudioRequested { source: String, autoplay: bool },
    AudioStopped,
    /// A slide became the active one. `activation` increases on every activation.
    SlideActivated {
        index: usize,
        slide_id: String,
        activation: u64,
    },
    /// Fire a one-shot confetti burst for this activation.
    Confetti { slide_id: String, activation: u64 },
    /// Close the presentation surface. Emitted exactly once.
    Exited(ExitReason),
}

/// Timed, auto-advancing presentation of one deck.
pub struct Player {
    deck: Deck,
    config: PresentationConfig,
    state: PlayerState,
    timer: AdvanceTimer,
    activation: u64,
    events: Vec<PlayerEvent>,
}

impl Player {
    /// Start presenting `deck`. An empty deck finishes immediately.
    pub fn present(deck: Deck, config: PresentationConfig, now: Instant) -> Self {
        let mut player = Self {
            deck,
            config,
            state: PlayerState::Finished { index: 0 },
            timer: AdvanceTimer::new(),
            activation: 0,
            events: Vec::new(),
        };

        if player.deck.is_empty() {
            log::warn!("Deck has no slides, leaving presentation");
            player.events.push(PlayerEvent::Exited(ExitReason::EmptyDeck));
            return player;
        }

        log::info!("Presenting {} slides", player.deck.len());
        player.events.push(PlayerEvent::FullscreenRequested);
        let source = player
            .deck
            .audio
            .source(&player.config.fallback_audio_track)
            .to_string();
        player.events.push(PlayerEvent::AudioRequested {
            source,
            autoplay: player.deck.audio.autoplay,
        });
        player.state = PlayerState::Playing { index: 0 };
        player.activate(0, now);
        player
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.state.index()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    /// Deadline of the pending auto-advance, if one is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn armed_token(&self) -> Option<TimerToken> {
        self.timer.armed_token()
    }

    /// Full hold time of slide `index`: its own duration plus the inter-slide pause.
    ///
    /// Saturates instead of overflowing for absurdly long durations.
    pub fn slide_hold(&self, index: usize) -> Duration {
        let own = self
            .deck
            .slides()
            .get(index)
            .map(|slide| seconds_to_duration(slide.effective_duration()))
            .unwrap_or(Duration::ZERO);
        own.saturating_add(self.config.inter_slide_pause())
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a host command.
    pub fn dispatch(&mut self, command: PlayerCommand, now: Instant) {
        match command {
            PlayerCommand::Next => self.next(now),
            PlayerCommand::Previous => self.previous(now),
            PlayerCommand::TogglePause => self.toggle_pause(now),
            PlayerCommand::Exit => self.exit(),
        }
    }

    /// Poll the timer and deliver its firing once the deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(token) = self.timer.expired(now) {
            self.on_timer_fired(token, now);
        }
    }

    /// Deliver a firing from an external timer. Stale tokens are ignored.
    pub fn on_timer_fired(&mut self, token: TimerToken, now: Instant) {
        if self.timer.claim(token) {
            self.on_expiry(token, now);
        } else {
            log::debug!("Ignoring stale timer {:?}", token);
        }
    }

    /// Manual next: one slide forward keeping play/pause; exits on the last slide.
    pub fn next(&mut self, now: Instant) {
        if self.state.is_finished() {
            return;
        }
        let index = self.index();
        if index + 1 < self.deck.len() {
            self.move_to(index + 1, now);
        } else {
            self.finish(ExitReason::PastLastSlide);
        }
    }

    /// Manual previous: one slide back keeping play/pause; nothing at the first slide.
    pub fn previous(&mut self, now: Instant) {
        if self.state.is_finished() {
            return;
        }
        let index = self.index();
        if index > 0 {
            self.move_to(index - 1, now);
        }
    }

    /// Pause disarms the timer; resume arms a fresh full-length one.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state {
            PlayerState::Playing { index } => {
                self.timer.cancel();
                self.state = PlayerState::Paused { index };
                log::debug!("Paused on slide {}", index);
            }
            PlayerState::Paused { index } => {
                self.state = PlayerState::Playing { index };
                self.arm(now);
                log::debug!("Resumed slide {}", index);
            }
            PlayerState::Finished { .. } => {}
        }
    }

    /// Leave the presentation from any state.
    pub fn exit(&mut self) {
        self.finish(ExitReason::Host);
    }

    fn on_expiry(&mut self, token: TimerToken, now: Instant) {
        let PlayerState::Playing { index } = self.state else {
            log::debug!("Timer {:?} fired outside playback", token);
            return;
        };
        if index + 1 < self.deck.len() {
            self.move_to(index + 1, now);
        } else {
            // Hold on the last slide; never leave on our own.
            self.state = PlayerState::Paused { index };
            log::debug!("Holding on last slide {}", index);
        }
    }

    fn move_to(&mut self, index: usize, now: Instant) {
        self.timer.cancel();
        self.state = self.state.with_index(index);
        self.activate(index, now);
    }

    fn activate(&mut self, index: usize, now: Instant) {
        self.activation += 1;

        let Some(slide) = self.deck.slides().get(index) else {
            return;
        };
        let slide_id = slide.id().to_string();
        let confetti = slide.fire_confetti;
        log::debug!("Activated slide {} ({})", index, slide_id);

        self.events.push(PlayerEvent::SlideActivated {
            index,
            slide_id: slide_id.clone(),
            activation: self.activation,
        });
        if confetti {
            self.events.push(PlayerEvent::Confetti {
                slide_id,
                activation: self.activation,
            });
        }
        if self.state.is_playing() {
            self.arm(now);
        }
    }

    fn arm(&mut self, now: Instant) {
        let hold = self.slide_hold(self.index());
        self.timer.cancel();
        self.timer.arm(now, hold);
    }

    fn finish(&mut self, reason: ExitReason) {
        if self.state.is_finished() {
            return;
        }
        self.timer.cancel();
        self.state = PlayerState::Finished { index: self.index() };
        log::info!("Presentation finished: {:?}", reason);
        self.events.push(PlayerEvent::AudioStopped);
        self.events.push(PlayerEvent::Exited(reason));
    }
}
