//! Sound effects
//!
//! On wasm32 effects are synthesized with the Web Audio API - no asset files.
//! Native builds have no audio backend and report `NotReady`.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Named sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Collectible picked up
    Pickup,
    /// Player hit an obstacle
    GameOver,
    /// Finished run beat the stored best
    NewRecord,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Pickup => "pickup",
            SoundEffect::GameOver => "game_over",
            SoundEffect::NewRecord => "new_record",
        }
    }
}

/// Why a sound did not play
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    #[error("audio backend not ready")]
    NotReady,
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Something that can play named sound effects
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError>;
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volume and mute preferences from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl SoundSink for AudioManager {
    #[cfg(target_arch = "wasm32")]
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Ok(());
        }
        let Some(ctx) = &self.ctx else {
            return Err(AudioError::NotReady);
        };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            // Rising chime
            SoundEffect::Pickup => {
                play_arpeggio(ctx, vol, &[600.0, 800.0, 1000.0], 0.08, 0.15, OscillatorType::Sine)
            }
            // Falling tones
            SoundEffect::GameOver => play_arpeggio(
                ctx,
                vol,
                &[400.0, 350.0, 300.0, 200.0],
                0.2,
                0.3,
                OscillatorType::Sine,
            ),
            SoundEffect::NewRecord => play_arpeggio(
                ctx,
                vol,
                &[500.0, 600.0, 700.0, 800.0, 1000.0],
                0.08,
                0.25,
                OscillatorType::Triangle,
            ),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        if self.effective_volume() <= 0.0 {
            return Ok(());
        }
        log::trace!("No audio backend for {}", effect.as_str());
        Err(AudioError::NotReady)
    }
}

/// Create an oscillator with gain envelope
#[cfg(target_arch = "wasm32")]
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Result<(OscillatorNode, GainNode), AudioError> {
    let err = |e: wasm_bindgen::JsValue| AudioError::Playback(format!("{e:?}"));
    let osc = ctx.create_oscillator().map_err(err)?;
    let gain = ctx.create_gain().map_err(err)?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).map_err(err)?;
    gain.connect_with_audio_node(&ctx.destination()).map_err(err)?;

    Ok((osc, gain))
}

/// Short notes in sequence, each fading out over `decay` seconds
#[cfg(target_arch = "wasm32")]
fn play_arpeggio(
    ctx: &AudioContext,
    vol: f32,
    freqs: &[f32],
    spacing: f64,
    decay: f64,
    osc_type: OscillatorType,
) -> Result<(), AudioError> {
    for (i, freq) in freqs.iter().enumerate() {
        let (osc, gain) = create_osc(ctx, *freq, osc_type)?;
        let t = ctx.current_time() + i as f64 * spacing;
        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + decay)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + decay + 0.05).ok();
    }
    Ok(())
}
