//! ASCII Flappy Bird: the simulation core.
//!
//! Everything here is deterministic given a random source and knows nothing
//! about terminals or audio devices. The binary drives it one tick per frame.

pub mod actors;
pub mod config;
pub mod session;
pub mod sound;
pub mod world;

pub use config::Config;
pub use session::{Control, Input, Session, SessionState, Snapshot};
pub use sound::{Cue, SoundBank, Waveform};
pub use world::World;
