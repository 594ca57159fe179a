//! Session state machine
//!
//! ```text
//!   Idle(start screen) <-> Idle(instructions)
//!        | start
//!        v
//!     Running --(death inside a tick)--> GameOver --restart--> Running
//! ```
//!
//! The session owns the [`GameState`] and the high-score store. Commands that
//! do not apply to the current phase are ignored and reported as `false`.

use glam::Vec2;

use crate::audio::{AudioCue, Track};
use crate::consts::MUSIC_VOLUME;
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::render::Frame;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::tuning::Tuning;

/// What the host UI should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Start button and how-to-play button
    Start,
    /// How-to-play text and a back button
    Instructions,
    /// The canvas, ticking
    Playing,
    /// Final score and restart button
    GameOver,
}

/// One player's game: simulation state plus everything around it
pub struct Session<S: KeyValueStore> {
    state: GameState,
    store: S,
    high_score: HighScore,
    showing_instructions: bool,
    /// Cues raised by commands, delivered with the next frame
    pending_audio: Vec<AudioCue>,
}

impl<S: KeyValueStore> Session<S> {
    /// Create an idle session, reading the stored high score
    pub fn new(tuning: Tuning, seed: u64, viewport: Vec2, store: S) -> Self {
        let high_score = HighScore::load(&store);
        Self {
            state: GameState::new(tuning, seed, high_score.best, viewport),
            store,
            high_score,
            showing_instructions: false,
            pending_audio: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts and tests that stage specific situations
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shared with the host so preferences land in the same store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn screen(&self) -> Screen {
        match self.state.phase {
            GamePhase::Idle if self.showing_instructions => Screen::Instructions,
            GamePhase::Idle => Screen::Start,
            GamePhase::Running => Screen::Playing,
            GamePhase::GameOver => Screen::GameOver,
        }
    }

    /// Idle -> Running
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            log::debug!("Ignoring start in {:?}", self.state.phase);
            return false;
        }
        self.begin_run();
        true
    }

    /// GameOver -> Running
    pub fn restart(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            log::debug!("Ignoring restart in {:?}", self.state.phase);
            return false;
        }
        self.begin_run();
        true
    }

    /// Idle: switch to the how-to-play screen
    pub fn show_instructions(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }
        self.showing_instructions = true;
        true
    }

    /// Idle: back to the start screen
    pub fn show_start(&mut self) -> bool {
        if self.state.phase != GamePhase::Idle {
            return false;
        }
        self.showing_instructions = false;
        true
    }

    /// Pointer or touch moved, in canvas coordinates
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        self.state.aim_at(pointer);
    }

    /// Canvas was resized
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.viewport = Vec2::new(width, height);
    }

    /// Run one simulation step. Persists the high score if the run just
    /// ended with a new best.
    pub fn step(&mut self) -> Frame {
        let mut frame = tick(&mut self.state);
        if !self.pending_audio.is_empty() {
            let mut audio = std::mem::take(&mut self.pending_audio);
            audio.append(&mut frame.audio);
            frame.audio = audio;
        }

        let ended = frame
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }));
        if ended {
            self.high_score.submit(self.state.score, &mut self.store);
        }
        frame
    }

    fn begin_run(&mut self) {
        self.showing_instructions = false;
        self.state.high_score = self.high_score.best;
        self.state.reset_run();
        self.pending_audio.push(AudioCue::Loop {
            track: Track::Background,
            volume: MUSIC_VOLUME,
        });
        log::info!("Run started (seed {})", self.state.seed);
    }
}
