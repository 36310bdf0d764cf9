//! Sound effects. Built with the `sound` feature; otherwise a silent stand-in.

#[cfg(feature = "sound")]
pub use synth::Sound;

#[cfg(not(feature = "sound"))]
pub use silent::Sound;

use flappy_arcade::GameEvent;

#[cfg_attr(not(feature = "sound"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Point,
    Death,
}

/// A run gets one death cue: `Struck` or `Crashed`, never both. `Landed` is silent.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn cue(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::Scored { .. } => Some(Cue::Point),
        GameEvent::Struck | GameEvent::Crashed => Some(Cue::Death),
        _ => None,
    }
}

#[cfg(feature = "sound")]
mod synth {
    use super::{Cue, cue};
    use flappy_arcade::GameEvent;
    use fundsp::{hpc::*, prelude::*};
    use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};
    use tracing::warn;

    const SAMPLE_RATE: u32 = 44_100;

    struct Output {
        // Dropping the stream stops playback.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        point: Vec<f32>,
        death: Vec<f32>,
    }

    pub struct Sound {
        output: Option<Output>,
    }

    impl Sound {
        /// Audio trouble is never fatal: the game just runs silent.
        pub fn open(mute: bool) -> Self {
            if mute {
                return Self { output: None };
            }
            match OutputStream::try_default() {
                Ok((stream, handle)) => Self {
                    output: Some(Output {
                        _stream: stream,
                        handle,
                        point: point_chirp(),
                        death: death_slide(),
                    }),
                },
                Err(err) => {
                    warn!(%err, "no audio output, running silent");
                    Self { output: None }
                }
            }
        }

        pub fn play(&self, event: &GameEvent) {
            let Some(out) = &self.output else {
                return;
            };
            let samples = match cue(event) {
                Some(Cue::Point) => &out.point,
                Some(Cue::Death) => &out.death,
                None => return,
            };
            match Sink::try_new(&out.handle) {
                Ok(sink) => {
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.clone()));
                    sink.detach(); // Play in background
                }
                Err(err) => warn!(%err, "cannot play sound"),
            }
        }
    }

    fn render(mut unit: Box<dyn AudioUnit>, seconds: f64) -> Vec<f32> {
        unit.set_sample_rate(SAMPLE_RATE as f64);
        (0..(SAMPLE_RATE as f64 * seconds) as usize)
            .map(|_| unit.get_mono())
            .collect()
    }

    /// Saw sweeping 400Hz down to 80Hz while fading out.
    fn death_slide() -> Vec<f32> {
        let freq = lfo(|t: f64| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
        let gain = lfo(|t: f64| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
        render(Box::new((freq >> saw()) * gain), 0.5)
    }

    /// Short rising blip.
    fn point_chirp() -> Vec<f32> {
        let freq = lfo(|t: f64| lerp(660.0, 990.0, (t / 0.08).min(1.0)));
        let gain = lfo(|t: f64| lerp(0.12, 0.0, (t / 0.12).min(1.0)));
        render(Box::new((freq >> sine()) * gain), 0.12)
    }
}

#[cfg(not(feature = "sound"))]
mod silent {
    use flappy_arcade::GameEvent;

    pub struct Sound;

    impl Sound {
        pub fn open(_mute: bool) -> Self {
            Self
        }

        pub fn play(&self, _event: &GameEvent) {}
    }
}
