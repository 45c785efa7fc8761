//! Audio cues
//!
//! The simulation emits events; this module turns them into sound cues with a
//! volume and hands them to a sink, alongside one looping background track.
//! Playback itself is the sink's business.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Jump started
    Jump,
    /// Collectible consumed
    Collect,
    /// Actor died
    Death,
}

impl SoundCue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(Self::Jump),
            GameEvent::Collected { .. } => Some(Self::Collect),
            GameEvent::Died => Some(Self::Death),
            _ => None,
        }
    }

    /// Mix level before master/effect scaling
    pub fn base_volume(self) -> f32 {
        match self {
            Self::Jump => 0.2,
            Self::Collect => 0.3,
            Self::Death => 1.0,
        }
    }
}

/// Something that can play a cue
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);

    /// Start (or restart) the looping background track; volume 0 stops it
    fn set_music(&mut self, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("Sound {:?} at {:.2}", cue, volume);
    }

    fn set_music(&mut self, volume: f32) {
        log::debug!("Music at {:.2}", volume);
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Background track requested
    music_on: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_on: false,
        }
    }

    /// Manager with volumes taken from settings
    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.sync_music();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music();
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Loop the background track for the rest of the session
    pub fn start_music(&mut self) {
        self.music_on = true;
        self.sync_music();
    }

    fn sync_music(&mut self) {
        if self.music_on {
            let vol = self.effective_music_volume();
            self.sink.set_music(vol);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume() * cue.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    /// Play the cue of every event that has one
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.play(cue);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
