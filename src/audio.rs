//! Sound triggers
//!
//! The simulation never talks to audio directly. It queues [`GameEvent`]s,
//! and a [`SoundSink`] turns them into backend calls. Backend failures are
//! logged and swallowed so a missing device never interrupts play.

use thiserror::Error;

use crate::config::Config;
use crate::sim::{GameEvent, ResetCause};

/// Effects always play at full volume; only music has a level
const SFX_VOLUME: f32 = 1.0;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    /// Player left the ground
    Jump,
    /// Player died (enemy touch or fall)
    Hit,
    /// Menu button clicked
    MenuSelect,
}

impl SoundId {
    pub fn name(&self) -> &'static str {
        match self {
            SoundId::Jump => "jump",
            SoundId::Hit => "hit",
            SoundId::MenuSelect => "menu_select",
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Unavailable(String),
    #[error("failed to play {sound}: {reason}")]
    Playback { sound: &'static str, reason: String },
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, sound: SoundId, volume: f32) -> Result<(), AudioError>;
    fn start_music(&mut self, volume: f32) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
    fn set_music_volume(&mut self, volume: f32) -> Result<(), AudioError>;
}

/// Headless backend: logs directives instead of playing them
#[derive(Debug, Default)]
pub struct SilentBackend {
    pub music_playing: bool,
}

impl AudioBackend for SilentBackend {
    fn play(&mut self, sound: SoundId, volume: f32) -> Result<(), AudioError> {
        log::debug!("play {} at {:.2}", sound.name(), volume);
        Ok(())
    }

    fn start_music(&mut self, volume: f32) -> Result<(), AudioError> {
        log::debug!("music on at {:.2}", volume);
        self.music_playing = true;
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        log::debug!("music off");
        self.music_playing = false;
        Ok(())
    }

    fn set_music_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        log::debug!("music volume {:.2}", volume);
        Ok(())
    }
}

/// Non-failing front end over a backend
pub struct SoundSink<B: AudioBackend> {
    backend: B,
    sounds_enabled: bool,
    music_enabled: bool,
    music_volume: f32,
    failures: u32,
}

impl<B: AudioBackend> SoundSink<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        Self {
            backend,
            sounds_enabled: config.sounds_enabled,
            music_enabled: config.music_enabled,
            music_volume: config.music_volume.clamp(0.0, 1.0),
            failures: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Backend errors swallowed so far
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn try_play(&mut self, sound: SoundId) {
        if !self.sounds_enabled {
            return;
        }
        let result = self.backend.play(sound, SFX_VOLUME);
        self.absorb(result);
    }

    /// Start the music loop if music is enabled
    pub fn start_music(&mut self) {
        if !self.music_enabled {
            return;
        }
        let volume = self.music_volume;
        let result = self
            .backend
            .set_music_volume(volume)
            .and_then(|_| self.backend.start_music(volume));
        self.absorb(result);
    }

    pub fn stop_music(&mut self) {
        let result = self.backend.stop_music();
        self.absorb(result);
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        if enabled {
            self.start_music();
        } else {
            self.stop_music();
        }
    }

    /// Translate a tick's events into sound directives
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Jumped => self.try_play(SoundId::Jump),
                GameEvent::Reset(ResetCause::EnemyHit | ResetCause::Fell) => {
                    self.try_play(SoundId::Hit)
                }
                GameEvent::MenuSelect => self.try_play(SoundId::MenuSelect),
                GameEvent::MusicToggled { enabled } => self.set_music_enabled(*enabled),
                GameEvent::Reset(ResetCause::Started)
                | GameEvent::Climbed { .. }
                | GameEvent::ReturnedToMenu
                | GameEvent::ExitRequested => {}
            }
        }
    }

    fn absorb(&mut self, result: Result<(), AudioError>) {
        if let Err(e) = result {
            self.failures += 1;
            log::warn!("Audio error ignored: {}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioBackend;

/// Procedurally generated tones via the Web Audio API - no external files
#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioBackend, AudioError, SoundId};

    pub struct WebAudioBackend {
        ctx: AudioContext,
        music: Option<(OscillatorNode, GainNode)>,
        music_volume: f32,
    }

    impl WebAudioBackend {
        pub fn new() -> Result<Self, AudioError> {
            let ctx = AudioContext::new()
                .map_err(|e| AudioError::Unavailable(format!("{:?}", e)))?;
            Ok(Self {
                ctx,
                music: None,
                music_volume: 0.5,
            })
        }

        /// Resume audio context (browsers require a user gesture)
        fn resume(&self) {
            if self.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }
        }

        /// Oscillator wired through a gain envelope to the output
        fn create_osc(
            &self,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = self.ctx.create_oscillator().ok()?;
            let gain = self.ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn failed(sound: SoundId) -> AudioError {
            AudioError::Playback {
                sound: sound.name(),
                reason: "could not build oscillator".to_string(),
            }
        }

        /// Jump - quick rising chirp
        fn play_jump(&self, vol: f32) -> Option<()> {
            let (osc, gain) = self.create_osc(300.0, OscillatorType::Square)?;
            let t = self.ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok()?;
            osc.frequency().set_value_at_time(300.0, t).ok()?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.12)
                .ok()?;

            osc.start().ok()?;
            osc.stop_with_when(t + 0.18).ok()
        }

        /// Hit - falling buzz
        fn play_hit(&self, vol: f32) -> Option<()> {
            let (osc, gain) = self.create_osc(220.0, OscillatorType::Sawtooth)?;
            let t = self.ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok()?;
            osc.frequency().set_value_at_time(220.0, t).ok()?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.4)
                .ok()?;

            osc.start().ok()?;
            osc.stop_with_when(t + 0.45).ok()
        }

        /// Menu select - two-note blip
        fn play_menu_select(&self, vol: f32) -> Option<()> {
            for (i, freq) in [660.0, 880.0].iter().enumerate() {
                let (osc, gain) = self.create_osc(*freq, OscillatorType::Triangle)?;
                let t = self.ctx.current_time() + i as f64 * 0.06;
                gain.gain().set_value_at_time(vol * 0.25, t).ok()?;
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                    .ok()?;
                osc.start_with_when(t).ok()?;
                osc.stop_with_when(t + 0.12).ok()?;
            }
            Some(())
        }
    }

    impl AudioBackend for WebAudioBackend {
        fn play(&mut self, sound: SoundId, volume: f32) -> Result<(), AudioError> {
            self.resume();
            let played = match sound {
                SoundId::Jump => self.play_jump(volume),
                SoundId::Hit => self.play_hit(volume),
                SoundId::MenuSelect => self.play_menu_select(volume),
            };
            played.ok_or_else(|| Self::failed(sound))
        }

        fn start_music(&mut self, volume: f32) -> Result<(), AudioError> {
            if self.music.is_some() {
                return Ok(());
            }
            self.resume();
            self.music_volume = volume;
            // Low sustained drone standing in for a music track
            let (osc, gain) = self
                .create_osc(110.0, OscillatorType::Sine)
                .ok_or_else(|| AudioError::Unavailable("music oscillator".to_string()))?;
            gain.gain().set_value(self.music_volume * 0.1);
            osc.start()
                .map_err(|e| AudioError::Unavailable(format!("{:?}", e)))?;
            self.music = Some((osc, gain));
            Ok(())
        }

        fn stop_music(&mut self) -> Result<(), AudioError> {
            if let Some((osc, _)) = self.music.take() {
                osc.stop()
                    .map_err(|e| AudioError::Unavailable(format!("{:?}", e)))?;
            }
            Ok(())
        }

        fn set_music_volume(&mut self, volume: f32) -> Result<(), AudioError> {
            self.music_volume = volume;
            if let Some((_, gain)) = &self.music {
                gain.gain().set_value(volume * 0.1);
            }
            Ok(())
        }
    }
}
