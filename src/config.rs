//! Tunable constants for the simulation, in logical screen units.

/// Every knob the game exposes. The simulation runs in a fixed logical space
/// (`screen_width` x `screen_height`); the terminal front end scales it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub screen_width: f64,
    pub screen_height: f64,
    pub fps: u32,

    pub gravity: f64,
    pub flap_strength: f64,
    pub bird_x: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    /// The bird dies once `y > screen_height - floor_margin`.
    pub floor_margin: f64,

    pub pipe_speed: f64,
    pub pipe_width: f64,
    pub pipe_gap: f64,
    pub pipe_spacing: f64,
    /// Minimum distance between the gap and the top or bottom edge.
    pub gap_margin: i32,
    pub pipe_count: usize,

    pub coin_size: f64,
    /// Phase ticks per coin animation frame.
    pub coin_frame_ticks: u32,

    pub sample_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            fps: 60,

            gravity: 0.5,
            flap_strength: -10.0,
            bird_x: 100.0,
            bird_width: 40.0,
            bird_height: 30.0,
            floor_margin: 30.0,

            pipe_speed: 3.0,
            pipe_width: 60.0,
            pipe_gap: 200.0,
            pipe_spacing: 300.0,
            gap_margin: 100,
            pipe_count: 3,

            coin_size: 20.0,
            coin_frame_ticks: 10,

            sample_rate: 22050,
        }
    }
}

impl Config {
    /// Inclusive range `gap_y` is drawn from.
    pub fn gap_range(&self) -> (i32, i32) {
        let lo = self.gap_margin;
        let hi = self.screen_height as i32 - self.gap_margin - self.pipe_gap as i32;
        (lo, hi.max(lo))
    }

    /// Bird y at the start of every session.
    pub fn bird_start_y(&self) -> f64 {
        self.screen_height / 2.0
    }

    /// Floor bound for the bird's top edge.
    pub fn floor_y(&self) -> f64 {
        self.screen_height - self.floor_margin
    }
}
