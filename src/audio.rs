use anyhow::{Context, Result};
use flappy_ascii::{Cue, SoundBank};
use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};
use tracing::warn;

/// Output device plus the precomputed effects it plays.
pub struct Audio {
    // Dropping the stream silences everything.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: SoundBank,
}

impl Audio {
    pub fn open(bank: SoundBank) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("failed to open audio output device")?;
        Ok(Self {
            _stream: stream,
            handle,
            bank,
        })
    }

    /// Fire and forget. A sound that fails to start is skipped.
    pub fn play(&self, cue: Cue) {
        let wave = self.bank.get(cue);
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!(?cue, %err, "could not start sound");
                return;
            }
        };
        sink.append(SamplesBuffer::new(
            wave.channels,
            wave.sample_rate,
            wave.samples.clone(),
        ));
        sink.detach(); // Play in background
    }
}
