//! Short synthesized feedback tones (Web Audio oscillators).
//!
//! Playback is fire-and-forget: every failure is logged and swallowed so that
//! audio can never affect score, combo or beat timing.

use std::cell::RefCell;

use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::game::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Metronome click on every beat.
    Tick,
    Success,
    Celebration,
    Error,
}

impl Cue {
    /// Sound to play for a game event, if any.
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::BeatTicked { .. } => Some(Cue::Tick),
            GameEvent::ComboIncreased { .. } => Some(Cue::Success),
            GameEvent::ComboMilestone { .. } => Some(Cue::Celebration),
            GameEvent::ComboBroken { .. } => Some(Cue::Error),
            _ => None,
        }
    }

    fn voices(self) -> &'static [Voice] {
        match self {
            Cue::Tick => &TICK,
            Cue::Success => &SUCCESS,
            Cue::Celebration => &CELEBRATION,
            Cue::Error => &ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Wave {
    Sine,
    Square,
    Sawtooth,
}

impl Wave {
    fn oscillator_type(self) -> OscillatorType {
        match self {
            Wave::Sine => OscillatorType::Sine,
            Wave::Square => OscillatorType::Square,
            Wave::Sawtooth => OscillatorType::Sawtooth,
        }
    }
}

/// One oscillator: starts `delay` seconds from now, decays from `gain` to
/// 0.01 over `duration` seconds. `attack` > 0 fades in from silence first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Voice {
    freq: f32,
    wave: Wave,
    gain: f32,
    delay: f64,
    attack: f64,
    duration: f64,
}

const fn voice(freq: f32, wave: Wave, gain: f32, duration: f64) -> Voice {
    Voice { freq, wave, gain, delay: 0.0, attack: 0.0, duration }
}

const fn arpeggio_note(freq: f32, index: u8) -> Voice {
    Voice {
        freq,
        wave: Wave::Sine,
        gain: 0.2,
        delay: index as f64 * 0.1,
        attack: 0.05,
        duration: 0.4,
    }
}

const TICK: [Voice; 1] = [voice(800.0, Wave::Square, 0.1, 0.1)];
const SUCCESS: [Voice; 2] = [
    voice(1500.0, Wave::Sine, 0.3, 0.2),
    voice(2000.0, Wave::Sine, 0.15, 0.15),
];
// C major arpeggio.
const CELEBRATION: [Voice; 4] = [
    arpeggio_note(523.0, 0),
    arpeggio_note(659.0, 1),
    arpeggio_note(784.0, 2),
    arpeggio_note(1047.0, 3),
];
const ERROR: [Voice; 1] = [voice(200.0, Wave::Sawtooth, 0.15, 0.5)];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("audio context unavailable: {0}")]
    Context(String),

    #[error("audio node setup failed: {0}")]
    Node(String),
}

fn node_err(e: JsValue) -> AudioError {
    AudioError::Node(format!("{e:?}"))
}

/// Anything that can render a cue. Implementations must not fail loudly.
pub trait SoundSink {
    fn play(&self, cue: Cue);
}

/// Discards every cue (native builds, muted sessions).
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&self, _cue: Cue) {}
}

/// Web Audio synthesizer. The `AudioContext` is created on first use, since
/// browsers only allow it after a user gesture.
#[derive(Default)]
pub struct ToneSynth {
    ctx: RefCell<Option<AudioContext>>,
}

impl ToneSynth {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&self) -> Result<AudioContext, AudioError> {
        let mut slot = self.ctx.borrow_mut();
        if let Some(ctx) = slot.as_ref() {
            return Ok(ctx.clone());
        }
        let ctx = AudioContext::new().map_err(|e| AudioError::Context(format!("{e:?}")))?;
        *slot = Some(ctx.clone());
        Ok(ctx)
    }

    fn try_play(&self, cue: Cue) -> Result<(), AudioError> {
        let ctx = self.context()?;
        let t0 = ctx.current_time();
        for v in cue.voices() {
            let osc = ctx.create_oscillator().map_err(node_err)?;
            let amp = ctx.create_gain().map_err(node_err)?;
            osc.connect_with_audio_node(&amp).map_err(node_err)?;
            amp.connect_with_audio_node(&ctx.destination()).map_err(node_err)?;

            osc.set_type(v.wave.oscillator_type());
            osc.frequency().set_value(v.freq);

            let start = t0 + v.delay;
            let end = start + v.duration;
            let gain = amp.gain();
            if v.attack > 0.0 {
                gain.set_value_at_time(0.0, start).map_err(node_err)?;
                gain.linear_ramp_to_value_at_time(v.gain, start + v.attack)
                    .map_err(node_err)?;
            } else {
                gain.set_value_at_time(v.gain, start).map_err(node_err)?;
            }
            gain.exponential_ramp_to_value_at_time(0.01, end)
                .map_err(node_err)?;

            osc.start_with_when(start).map_err(node_err)?;
            osc.stop_with_when(end).map_err(node_err)?;
        }
        Ok(())
    }
}

impl SoundSink for ToneSynth {
    fn play(&self, cue: Cue) {
        if let Err(e) = self.try_play(cue) {
            log::warn!("audio playback failed for {cue:?}: {e}");
        }
    }
}
