use crossterm::{
    cursor, queue,
    style::{self, Color},
};
use flappy_ascii::{SessionState, Snapshot};
use std::io::{self, Write};

// ── Colors ──────────────────────────────────────────────────────────────────

const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const GREEN: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const DARK_GREEN: Color = Color::Rgb { r: 0, g: 180, b: 0 };
const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const GOLD: Color = Color::Rgb { r: 255, g: 210, b: 40 };

// ── Glyphs ──────────────────────────────────────────────────────────────────

const BIRD_ART: [&str; 2] = [">o)", "(_>"];
const PIPE_CHAR: char = '\u{2551}'; // ║
const GROUND_CHAR: char = '=';
const COIN_FRAMES: [&str; 2] = ["(O)", "(|)"];

// ── Character grid ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell { ch: ' ', fg: GREEN };

pub struct CharGrid {
    w: usize,
    h: usize,
    cells: Vec<Cell>,
}

impl CharGrid {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![BLANK; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.cells.resize(w * h, BLANK);
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn set(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.cells[y as usize * self.w + x as usize] = Cell { ch, fg };
        }
    }

    fn put_str(&mut self, x: i32, y: i32, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg);
        }
    }

    fn put_centered(&mut self, y: i32, s: &str, fg: Color) {
        let x = (self.w as i32 - s.chars().count() as i32) / 2;
        self.put_str(x, y, s, fg);
    }

    #[cfg(test)]
    fn row_text(&self, y: usize) -> String {
        self.cells[y * self.w..(y + 1) * self.w]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0), style::SetBackgroundColor(BLACK))?;
        let mut prev_fg = None;

        for row in 0..self.h {
            for cell in &self.cells[row * self.w..(row + 1) * self.w] {
                if cell.ch != ' ' && prev_fg != Some(cell.fg) {
                    queue!(out, style::SetForegroundColor(cell.fg))?;
                    prev_fg = Some(cell.fg);
                }
                queue!(out, style::Print(cell.ch))?;
            }
            if row + 1 < self.h {
                queue!(out, style::Print("\r\n"))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

// ── Drawing ─────────────────────────────────────────────────────────────────

/// Maps logical coordinates onto grid cells.
struct Viewport {
    sx: f64,
    sy: f64,
}

impl Viewport {
    fn col(&self, x: f64) -> i32 {
        (x * self.sx).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.sy).floor() as i32
    }
}

/// Draws one frame of the session into `grid`.
pub fn draw(grid: &mut CharGrid, snap: &Snapshot<'_>) {
    grid.clear();
    if grid.w == 0 || grid.h == 0 {
        return;
    }
    let view = Viewport {
        sx: grid.w as f64 / snap.config.screen_width,
        sy: grid.h as f64 / snap.config.screen_height,
    };
    let ground = grid.h as i32 - 1;

    draw_pipes(grid, &view, snap, ground);
    for x in 0..grid.w as i32 {
        grid.set(x, ground, GROUND_CHAR, DARK_GREEN);
    }
    draw_bird(grid, &view, snap);
    draw_hud(grid, snap);

    let mid = grid.h as i32 / 2;
    match snap.state {
        SessionState::NotStarted => {
            grid.put_centered(mid, "PRESS SPACE", GREEN);
            grid.put_centered(mid + 2, "TO START", DARK_GREEN);
        }
        SessionState::GameOver => {
            grid.put_centered(mid, "GAME OVER", RED);
            grid.put_centered(mid + 2, "PRESS SPACE TO RESTART", GREEN);
            grid.put_centered(mid + 3, &format!("BEST: {}", snap.best), GOLD);
        }
        SessionState::Running => {}
    }
}

fn draw_pipes(grid: &mut CharGrid, view: &Viewport, snap: &Snapshot<'_>, ground: i32) {
    for pipe in snap.pipes {
        let left = view.col(pipe.x);
        let right = view.col(pipe.trailing_edge()).max(left + 1);
        let gap_top = view.row(pipe.gap_y);
        let gap_bot = view.row(pipe.gap_bottom());

        for x in left..right {
            for y in 0..gap_top {
                grid.set(x, y, PIPE_CHAR, DARK_GREEN);
            }
            for y in gap_bot..ground {
                grid.set(x, y, PIPE_CHAR, DARK_GREEN);
            }
        }

        if let Some(coin) = pipe.coin.as_ref().filter(|c| !c.collected) {
            let half = coin.size / 2.0;
            let glyph = COIN_FRAMES[coin.frame()];
            let x = view.col(coin.x + half) - 1;
            grid.put_str(x, view.row(coin.y + half), glyph, GOLD);
        }
    }
}

fn draw_bird(grid: &mut CharGrid, view: &Viewport, snap: &Snapshot<'_>) {
    let color = if snap.state == SessionState::GameOver {
        RED
    } else {
        GREEN
    };
    let x = view.col(snap.bird.x);
    let y = view.row(snap.bird.y);
    for (i, line) in BIRD_ART.iter().enumerate() {
        grid.put_str(x, y + i as i32, line, color);
    }
}

fn draw_hud(grid: &mut CharGrid, snap: &Snapshot<'_>) {
    grid.put_str(1, 0, &format!("SCORE: {}", snap.score), GREEN);
    grid.put_str(1, 1, &format!("COINS: {}", snap.coins), GOLD);
}
