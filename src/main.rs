mod audio;
mod render;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use flappy_ascii::{Config, Control, Input, Session, SoundBank};
use std::io::{self, Write, stdout};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::audio::Audio;
use crate::render::CharGrid;

fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Input::PrimaryAction),
        _ => None,
    }
}

/// Raw mode and the alternate screen, undone on drop. Unwinding out of the
/// frame loop drops it too.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        // From here on a failure drops the guard, which turns raw mode off.
        let mut guard = Self { out };
        execute!(
            guard.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )
        .context("failed to enter the alternate screen")?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(err) = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        ) {
            warn!(%err, "failed to leave the alternate screen");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            warn!(%err, "failed to disable raw mode");
        }
    }
}

fn run(out: &mut impl Write, audio: &Audio, config: Config) -> Result<()> {
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let mut grid = CharGrid::new(cols as usize, rows as usize);
    let frame_dur = Duration::from_secs_f64(1.0 / config.fps.max(1) as f64);
    let mut session = Session::new(config);

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(input) = map_key(key) {
                        if session.handle(input) == Control::Quit {
                            return Ok(());
                        }
                    }
                }
                Event::Resize(c, r) => grid.resize(c as usize, r as usize),
                _ => {}
            }
        }

        // Update
        session.tick();
        for cue in session.drain_cues() {
            audio.play(cue);
        }

        // Render
        render::draw(&mut grid, &session.snapshot());
        grid.render(out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::default();
    let audio = Audio::open(SoundBank::new(config.sample_rate))?;

    let mut term = TerminalGuard::enter(stdout())?;
    info!("terminal ready");

    // The guard restores the terminal after the result is taken, so an error
    // from the loop is reported on a sane screen.
    run(&mut term.out, &audio, config)
}
