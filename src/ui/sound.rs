/// Procedural sound effects via rodio.
///
/// Every effect is synthesised once at start-up into an in-memory WAV
/// buffer and played fire-and-forget on a detached sink. The simulation
/// never sees this module; `main` maps `GameEvent`s onto it.
///
/// Build without the `sound` feature to get a silent stub.

use crate::sim::event::GameEvent;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Sfx {
    Pickup,
    Rumble,
    Thud,
    Death,
    Sizzle,
    Door,
    Win,
}

impl Sfx {
    /// Which effect, if any, an event makes.
    pub fn for_event(event: &GameEvent) -> Option<Sfx> {
        match event {
            GameEvent::CollectiblePicked { .. } => Some(Sfx::Pickup),
            GameEvent::StalactiteTriggered { .. } => Some(Sfx::Rumble),
            GameEvent::StalactiteRested { .. } => Some(Sfx::Thud),
            GameEvent::PlayerKilled => Some(Sfx::Death),
            GameEvent::LavaStun => Some(Sfx::Sizzle),
            GameEvent::SceneChanged { .. } => Some(Sfx::Door),
            GameEvent::SceneReset { .. } => None,
            GameEvent::Won => Some(Sfx::Win),
        }
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Sfx;

    const SAMPLE_RATE: u32 = 22050;
    const TAU: f32 = std::f32::consts::TAU;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        buffers: HashMap<Sfx, Arc<Vec<u8>>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!("audio output unavailable: {e}");
                    return None;
                }
            };

            let buffers = [
                (Sfx::Pickup, gen_pickup()),
                (Sfx::Rumble, gen_rumble()),
                (Sfx::Thud, gen_thud()),
                (Sfx::Death, gen_death()),
                (Sfx::Sizzle, gen_sizzle()),
                (Sfx::Door, gen_door()),
                (Sfx::Win, gen_win()),
            ]
            .into_iter()
            .map(|(sfx, samples)| (sfx, Arc::new(make_wav(&samples))))
            .collect();

            Some(SoundEngine { _stream: stream, handle, buffers })
        }

        pub fn play(&self, sfx: Sfx) {
            let Some(buf) = self.buffers.get(&sfx) else {
                return;
            };
            let Ok(sink) = Sink::try_new(&self.handle) else {
                return;
            };
            if let Ok(src) = rodio::Decoder::new(Cursor::new(buf.as_ref().clone())) {
                sink.append(src);
                sink.detach();
            }
        }
    }

    // ── Generators (mono f32 samples) ──

    fn samples_for(duration: f32) -> usize {
        (SAMPLE_RATE as f32 * duration) as usize
    }

    /// Sine sweep from `f0` to `f1` with a linear fade.
    fn sweep(f0: f32, f1: f32, duration: f32, volume: f32) -> Vec<f32> {
        let n = samples_for(duration);
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                phase += (f0 + (f1 - f0) * t) / SAMPLE_RATE as f32;
                (phase * TAU).sin() * (1.0 - t) * volume
            })
            .collect()
    }

    /// Seeded LCG noise with a decay envelope.
    fn noise(duration: f32, volume: f32, decay: f32, seed: u32) -> Vec<f32> {
        let n = samples_for(duration);
        let mut rng = seed;
        (0..n)
            .map(|i| {
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let white = (rng >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0;
                let t = i as f32 / n as f32;
                white * (1.0 - t).powf(decay) * volume
            })
            .collect()
    }

    /// Notes played back to back, sine plus a little octave.
    fn arpeggio(notes: &[f32], note_dur: f32, volume: f32) -> Vec<f32> {
        let mut out = Vec::new();
        for &freq in notes {
            let n = samples_for(note_dur);
            for i in 0..n {
                let ts = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                let wave = (ts * freq * TAU).sin() * 0.75 + (ts * freq * 2.0 * TAU).sin() * 0.25;
                out.push(wave * env * volume);
            }
        }
        out
    }

    fn gen_pickup() -> Vec<f32> {
        arpeggio(&[988.0, 1319.0, 1760.0], 0.05, 0.25)
    }

    fn gen_rumble() -> Vec<f32> {
        let mut low = sweep(90.0, 60.0, 0.35, 0.3);
        for (s, n) in low.iter_mut().zip(noise(0.35, 0.15, 0.5, 77)) {
            *s += n;
        }
        low
    }

    fn gen_thud() -> Vec<f32> {
        let mut hit = sweep(140.0, 40.0, 0.12, 0.4);
        for (s, n) in hit.iter_mut().zip(noise(0.12, 0.25, 2.0, 4242)) {
            *s += n;
        }
        hit
    }

    fn gen_death() -> Vec<f32> {
        let mut out = arpeggio(&[494.0, 415.0, 349.0, 294.0], 0.1, 0.3);
        let fade = out.len() / 4;
        let total = out.len();
        for (k, s) in out[total - fade..].iter_mut().enumerate() {
            *s *= 1.0 - k as f32 / fade as f32;
        }
        out
    }

    fn gen_sizzle() -> Vec<f32> {
        noise(0.5, 0.3, 0.7, 9001)
    }

    fn gen_door() -> Vec<f32> {
        sweep(300.0, 700.0, 0.12, 0.25)
    }

    fn gen_win() -> Vec<f32> {
        let mut out = arpeggio(&[523.0, 659.0, 784.0, 1047.0, 1319.0], 0.09, 0.3);
        out.extend(sweep(1047.0, 1047.0, 0.35, 0.3));
        out
    }

    // ── WAV encoding (16-bit PCM mono) ──

    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let data_len = samples.len() as u32 * 2;
        let mut buf = Vec::with_capacity(44 + data_len as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_len).to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&1u16.to_le_bytes()); // channels
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
        buf.extend_from_slice(&2u16.to_le_bytes()); // block align
        buf.extend_from_slice(&16u16.to_le_bytes());

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_len.to_le_bytes());
        for &s in samples {
            let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

}

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _sfx: Sfx) {}
}
