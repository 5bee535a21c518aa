//! Session state machine sitting between the host's input and the world.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::info;

use crate::actors::{Bird, Pipe};
use crate::config::Config;
use crate::sound::Cue;
use crate::world::World;

/// Host input that affects the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    PrimaryAction,
    Quit,
}

/// What the host loop should do after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    GameOver,
}

/// Read-only view of everything needed to draw a frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub config: &'a Config,
    pub bird: &'a Bird,
    pub pipes: &'a VecDeque<Pipe>,
    pub score: u32,
    pub coins: u32,
    pub best: u32,
    pub state: SessionState,
}

pub struct Session<R = StdRng> {
    world: World<R>,
    best: u32,
    cues: Vec<Cue>,
}

impl Session<StdRng> {
    pub fn new(config: Config) -> Self {
        Self::from_world(World::new(config))
    }
}

impl<R: Rng> Session<R> {
    pub fn from_world(world: World<R>) -> Self {
        Self {
            world,
            best: 0,
            cues: Vec::new(),
        }
    }

    pub fn world(&self) -> &World<R> {
        &self.world
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn state(&self) -> SessionState {
        if self.world.is_over() {
            SessionState::GameOver
        } else if self.world.is_started() {
            SessionState::Running
        } else {
            SessionState::NotStarted
        }
    }

    pub fn handle(&mut self, input: Input) -> Control {
        if input == Input::Quit {
            info!(state = ?self.state(), "quit");
            return Control::Quit;
        }

        match self.state() {
            SessionState::NotStarted => {
                info!("session started");
                self.world.start();
            }
            SessionState::Running => {
                self.world.flap();
                self.cues.push(Cue::Flap);
            }
            SessionState::GameOver => {
                info!(best = self.best, "session restarted");
                self.world.reset();
                self.world.start();
            }
        }
        Control::Continue
    }

    /// Advances the world one tick while running.
    pub fn tick(&mut self) {
        let cues = self.world.tick();
        self.cues.extend(cues);
        if self.world.is_over() && self.world.score() > self.best {
            self.best = self.world.score();
            info!(best = self.best, "new best score");
        }
    }

    /// Takes the sounds queued since the last call.
    pub fn drain_cues(&mut self) -> impl Iterator<Item = Cue> + '_ {
        self.cues.drain(..)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            config: self.world.config(),
            bird: self.world.bird(),
            pipes: self.world.pipes(),
            score: self.world.score(),
            coins: self.world.coins(),
            best: self.best,
            state: self.state(),
        }
    }
}
