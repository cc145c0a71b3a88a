//! Web Audio playback of [`SoundEffect`] cues

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::SoundEffect;

/// Base frequency of a pop before pitch scaling (Hz)
const POP_BASE_FREQ: f32 = 520.0;

/// Bomb boom frequency before pitch scaling (Hz)
const BOMB_BASE_FREQ: f32 = 90.0;

/// Owns the `AudioContext`; silent when the browser refuses one
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Change the cue volume (0 silences everything)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Pop { pitch } => self.play_pop(ctx, vol, pitch),
            SoundEffect::Bomb { pitch } => self.play_bomb(ctx, vol, pitch),
            SoundEffect::Miss => self.play_miss(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Pop - short upward blip, rate scaled like a sped-up sample
    fn play_pop(&self, ctx: &AudioContext, vol: f32, pitch: f32) {
        let freq = POP_BASE_FREQ * pitch;
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();
        let len = 0.08 / pitch as f64;

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + len)
            .ok();
        osc.frequency().set_value_at_time(freq, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(freq * 2.0, t + len)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + len + 0.02).ok();
    }

    /// Bomb - low boom with a noisy crack on top, boom scaled by `pitch`
    fn play_bomb(&self, ctx: &AudioContext, vol: f32, pitch: f32) {
        let t = ctx.current_time();
        let boom = BOMB_BASE_FREQ * pitch;

        if let Some((osc, gain)) = self.create_osc(ctx, boom, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.8, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(boom, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(boom / 3.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency().set_value_at_time(1800.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(1200.0, t + 0.08).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }
    }

    /// Miss - soft falling tone
    fn play_miss(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 330.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(180.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.22).ok();
    }

    /// Game over - descending three-note phrase
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [440.0, 349.0, 262.0].into_iter().enumerate() {
            let start = t + i as f64 * 0.18;
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) {
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.2, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.16)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.18).ok();
            }
        }
    }
}
