//! The simulation: one bird, a fixed ring of pipes, and the rules tying them
//! together.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::actors::{Bird, Pipe};
use crate::config::Config;
use crate::sound::Cue;

pub struct World<R = StdRng> {
    config: Config,
    bird: Bird,
    pipes: VecDeque<Pipe>,
    score: u32,
    coins: u32,
    started: bool,
    over: bool,
    rng: R,
}

impl World<StdRng> {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> World<R> {
    /// Builds a world drawing pipe gaps from `rng`.
    pub fn with_rng(config: Config, mut rng: R) -> Self {
        let bird = Bird::new(&config);
        let pipes = spawn_pipes(&config, &mut rng);
        Self {
            config,
            bird,
            pipes,
            score: 0,
            coins: 0,
            started: false,
            over: false,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &VecDeque<Pipe> {
        &self.pipes
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn flap(&mut self) {
        self.bird.flap();
    }

    /// Advances one tick and returns the sounds it triggered. Does nothing
    /// until started, and nothing once over.
    pub fn tick(&mut self) -> Vec<Cue> {
        let mut cues = Vec::new();
        if !self.started || self.over {
            return cues;
        }

        self.bird.update();
        if self.bird.y > self.config.floor_y() || self.bird.y < 0.0 {
            info!(y = self.bird.y, score = self.score, "bird left the sky");
            self.over = true;
            cues.push(Cue::Crash);
            return cues;
        }

        let bird_rect = self.bird.bounds();
        let mut crashed = false;
        for pipe in self.pipes.iter_mut() {
            pipe.update();

            if let Some(coin) = pipe.coin.as_mut() {
                if coin.bounds().overlaps(&bird_rect) && coin.collect() {
                    self.coins += 1;
                    debug!(coins = self.coins, "coin collected");
                    cues.push(Cue::Coin);
                }
            }

            if pipe
                .collision_rects()
                .iter()
                .any(|r| r.overlaps(&bird_rect))
            {
                crashed = true;
            }

            if !pipe.passed && pipe.trailing_edge() < self.bird.x {
                pipe.passed = true;
                self.score += 1;
                debug!(score = self.score, "pipe passed");
            }
        }

        if crashed {
            info!(score = self.score, coins = self.coins, "bird hit a pipe");
            self.over = true;
            cues.push(Cue::Crash);
        }

        self.recycle();
        cues
    }

    /// Replaces pipes that scrolled off the left edge with new ones one
    /// spacing past the current last pipe.
    fn recycle(&mut self) {
        let gone = self.pipes.iter().take_while(|p| p.is_off_screen()).count();
        for _ in 0..gone {
            let Some(last_x) = self.pipes.back().map(|p| p.x) else {
                break;
            };
            self.pipes.pop_front();
            let x = last_x + self.config.pipe_spacing;
            let pipe = Pipe::new(x, &self.config, &mut self.rng);
            self.pipes.push_back(pipe);
            debug!(x, "pipe recycled");
        }
    }

    /// Puts everything back to how a fresh world starts.
    pub fn reset(&mut self) {
        self.bird = Bird::new(&self.config);
        self.pipes = spawn_pipes(&self.config, &mut self.rng);
        self.score = 0;
        self.coins = 0;
        self.started = false;
        self.over = false;
    }
}

fn spawn_pipes<R: Rng>(config: &Config, rng: &mut R) -> VecDeque<Pipe> {
    (0..config.pipe_count)
        .map(|i| {
            let x = config.screen_width + i as f64 * config.pipe_spacing;
            Pipe::new(x, config, rng)
        })
        .collect()
}
