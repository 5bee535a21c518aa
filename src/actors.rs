//! The three things that move: the bird, the pipes and the coins they carry.

use crate::config::Config;
use rand::Rng;

/// Axis-aligned rectangle in logical units, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Bird ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub velocity: f64,
    pub width: f64,
    pub height: f64,
    gravity: f64,
    flap_strength: f64,
}

impl Bird {
    pub fn new(config: &Config) -> Self {
        Self {
            x: config.bird_x,
            y: config.bird_start_y(),
            velocity: 0.0,
            width: config.bird_width,
            height: config.bird_height,
            gravity: config.gravity,
            flap_strength: config.flap_strength,
        }
    }

    /// Overrides the current velocity with the upward flap impulse.
    pub fn flap(&mut self) {
        self.velocity = self.flap_strength;
    }

    /// One tick of gravity. No clamping: leaving the screen is the world's
    /// business.
    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Coin ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub collected: bool,
    pub phase: u32,
    speed: f64,
    frame_ticks: u32,
}

impl Coin {
    fn new(x: f64, y: f64, config: &Config) -> Self {
        Self {
            x,
            y,
            size: config.coin_size,
            collected: false,
            phase: 0,
            speed: config.pipe_speed,
            frame_ticks: config.coin_frame_ticks.max(1),
        }
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
        self.phase = self.phase.wrapping_add(1);
    }

    /// Which of the two animation frames to show.
    pub fn frame(&self) -> usize {
        ((self.phase / self.frame_ticks) % 2) as usize
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }

    /// Marks the coin collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

// ── Pipe ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub gap_y: f64,
    pub gap_height: f64,
    pub width: f64,
    pub passed: bool,
    pub coin: Option<Coin>,
    speed: f64,
    screen_height: f64,
}

impl Pipe {
    /// Spawns a pipe at `x` with its gap drawn uniformly from the config's
    /// allowed range.
    pub fn new<R: Rng>(x: f64, config: &Config, rng: &mut R) -> Self {
        let (lo, hi) = config.gap_range();
        let gap_y = rng.gen_range(lo..=hi);
        Self::with_gap(x, gap_y as f64, config)
    }

    /// Spawns a pipe with a known gap, carrying a coin in the middle of it.
    pub fn with_gap(x: f64, gap_y: f64, config: &Config) -> Self {
        let coin_x = x + (config.pipe_width - config.coin_size) / 2.0;
        let coin_y = gap_y + (config.pipe_gap - config.coin_size) / 2.0;
        Self {
            x,
            gap_y,
            gap_height: config.pipe_gap,
            width: config.pipe_width,
            passed: false,
            coin: Some(Coin::new(coin_x, coin_y, config)),
            speed: config.pipe_speed,
            screen_height: config.screen_height,
        }
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
        if let Some(coin) = &mut self.coin {
            coin.update();
        }
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_y + self.gap_height
    }

    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }

    /// Solid regions above and below the gap.
    pub fn collision_rects(&self) -> [Rect; 2] {
        let bottom = self.gap_bottom();
        [
            Rect::new(self.x, 0.0, self.width, self.gap_y),
            Rect::new(self.x, bottom, self.width, self.screen_height - bottom),
        ]
    }

    pub fn is_off_screen(&self) -> bool {
        self.trailing_edge() < 0.0
    }
}
