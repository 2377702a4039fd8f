//! Procedural sound effects
//!
//! Each effect is a short list of enveloped oscillator tones; no audio files
//! are shipped. Playback uses the Web Audio API and only exists on wasm32.

use crate::sim::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator burst: starts at `gain`, decays exponentially to silence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    /// Frequency glide target, reached at the end of the tone
    pub glide_to: Option<f32>,
    pub wave: Waveform,
    pub gain: f32,
    /// Seconds after the effect starts
    pub delay: f64,
    /// Seconds until the gain has decayed
    pub duration: f64,
}

impl Tone {
    const fn new(freq: f32, wave: Waveform, gain: f32, delay: f64, duration: f64) -> Self {
        Self {
            freq,
            glide_to: None,
            wave,
            gain,
            delay,
            duration,
        }
    }

    const fn glide(mut self, to: f32) -> Self {
        self.glide_to = Some(to);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// Projectile hits a block that survives
    Hit,
    BlockDestroyed,
    LevelUp,
    LifeLost,
    GameOver,
    /// Run made the leaderboard
    HighScore,
    /// Bounce clicker scored
    BounceScore,
}

use Waveform::*;

const SHOOT: &[Tone] = &[Tone::new(880.0, Square, 0.15, 0.0, 0.08).glide(440.0)];
const HIT: &[Tone] = &[Tone::new(300.0, Triangle, 0.25, 0.0, 0.05)];
const BLOCK_DESTROYED: &[Tone] = &[
    Tone::new(100.0, Sawtooth, 0.4, 0.0, 0.3).glide(30.0),
    Tone::new(1500.0, Square, 0.15, 0.0, 0.1),
];
const LEVEL_UP: &[Tone] = &[
    Tone::new(400.0, Triangle, 0.3, 0.0, 0.4),
    Tone::new(500.0, Triangle, 0.3, 0.1, 0.4),
    Tone::new(600.0, Triangle, 0.3, 0.2, 0.4),
    Tone::new(800.0, Triangle, 0.3, 0.3, 0.4),
];
const LIFE_LOST: &[Tone] = &[Tone::new(300.0, Sine, 0.4, 0.0, 0.6).glide(40.0)];
const GAME_OVER: &[Tone] = &[
    Tone::new(400.0, Sine, 0.3, 0.0, 0.3),
    Tone::new(350.0, Sine, 0.3, 0.2, 0.3),
    Tone::new(300.0, Sine, 0.3, 0.4, 0.3),
    Tone::new(200.0, Sine, 0.3, 0.6, 0.3),
];
const HIGH_SCORE: &[Tone] = &[
    Tone::new(500.0, Triangle, 0.25, 0.0, 0.25),
    Tone::new(600.0, Triangle, 0.25, 0.08, 0.25),
    Tone::new(700.0, Triangle, 0.25, 0.16, 0.25),
    Tone::new(800.0, Triangle, 0.25, 0.24, 0.25),
    Tone::new(1000.0, Triangle, 0.25, 0.32, 0.25),
];
const BOUNCE_SCORE: &[Tone] = &[
    Tone::new(600.0, Sine, 0.25, 0.0, 0.15),
    Tone::new(900.0, Sine, 0.25, 0.08, 0.15),
];

impl SoundEffect {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Shoot => SHOOT,
            SoundEffect::Hit => HIT,
            SoundEffect::BlockDestroyed => BLOCK_DESTROYED,
            SoundEffect::LevelUp => LEVEL_UP,
            SoundEffect::LifeLost => LIFE_LOST,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::HighScore => HIGH_SCORE,
            SoundEffect::BounceScore => BOUNCE_SCORE,
        }
    }

    /// Sound for a shooter event
    pub fn for_event(event: &GameEvent) -> SoundEffect {
        match event {
            GameEvent::Shot => SoundEffect::Shoot,
            GameEvent::Hit => SoundEffect::Hit,
            GameEvent::BlockDestroyed { .. } => SoundEffect::BlockDestroyed,
            GameEvent::LevelUp { .. } => SoundEffect::LevelUp,
            GameEvent::LifeLost { .. } => SoundEffect::LifeLost,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};
    use crate::settings::Settings;

    /// Audio manager for the demos
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
                muted: false,
            }
        }

        /// Resume the context (browsers require a user gesture first)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn play(&self, effect: SoundEffect) {
            let vol = if self.muted { 0.0 } else { self.volume };
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let now = ctx.current_time();
            for tone in effect.tones() {
                play_tone(ctx, tone, now, vol);
            }
        }
    }

    fn create_osc(ctx: &AudioContext, freq: f32, wave: Waveform) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(match wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        });
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_tone(ctx: &AudioContext, tone: &Tone, now: f64, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, tone.freq, tone.wave) else {
            return;
        };
        let t = now + tone.delay;
        let end = t + tone.duration;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
        if let Some(to) = tone.glide_to {
            osc.frequency().set_value_at_time(tone.freq, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(to, end).ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end + 0.05).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SoundEffect; 8] = [
        SoundEffect::Shoot,
        SoundEffect::Hit,
        SoundEffect::BlockDestroyed,
        SoundEffect::LevelUp,
        SoundEffect::LifeLost,
        SoundEffect::GameOver,
        SoundEffect::HighScore,
        SoundEffect::BounceScore,
    ];

    #[test]
    fn test_tones_are_playable() {
        for effect in ALL {
            let tones = effect.tones();
            assert!(!tones.is_empty(), "{effect:?} is silent");
            for tone in tones {
                assert!(tone.freq > 0.0);
                // Exponential ramps cannot reach zero
                assert!(tone.glide_to.is_none_or(|f| f > 0.0));
                assert!(tone.gain > 0.01 && tone.gain <= 1.0);
                assert!(tone.duration > 0.0 && tone.delay >= 0.0);
            }
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Shot), SoundEffect::Shoot);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::LevelUp { level: 2 }),
            SoundEffect::LevelUp
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GameOver { score: 10, level: 1 }),
            SoundEffect::GameOver
        );
    }
}
