//! Audio cues and playback
//!
//! The simulation only emits [`AudioCue`]s. A [`Mixer`] applies the player's
//! volume and mute preferences and forwards them to an [`AudioSink`]; the
//! browser build plays them through HTML audio elements.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Audio tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    /// Looping background music
    Background,
    /// Item picked up
    Collect,
    /// Player died (arena edge or bigger enemy)
    Collision,
}

impl Track {
    pub const ALL: [Track; 3] = [Track::Background, Track::Collect, Track::Collision];

    /// Asset path relative to the page
    pub fn asset_path(self) -> &'static str {
        match self {
            Track::Background => "assets/background.wav",
            Track::Collect => "assets/collect.wav",
            Track::Collision => "assets/collision.wav",
        }
    }
}

/// A request to play something
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AudioCue {
    /// Start looping a track at the given volume
    Loop { track: Track, volume: f32 },
    /// Play a track once from the start
    Once(Track),
}

/// Playback backend supplied by the host
pub trait AudioSink {
    fn play_loop(&mut self, track: Track, volume: f32);
    fn play_once(&mut self, track: Track, volume: f32);
    /// Mute applies to every track uniformly
    fn set_muted(&mut self, muted: bool);
}

/// Applies volume/mute preferences to cues
#[derive(Debug, Clone)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Mixer {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute on every track. Returns the new state.
    pub fn toggle_mute<S: AudioSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        self.muted = !self.muted;
        sink.set_muted(self.muted);
        self.muted
    }

    /// Push the current mute state to the sink
    pub fn sync_mute<S: AudioSink + ?Sized>(&self, sink: &mut S) {
        sink.set_muted(self.muted);
    }

    /// Volume a cue should be played at
    pub fn volume_for(&self, cue: &AudioCue) -> f32 {
        match cue {
            AudioCue::Loop { volume, .. } => volume * self.music_volume * self.master_volume,
            AudioCue::Once(_) => self.sfx_volume * self.master_volume,
        }
    }

    /// Forward cues to the sink. Muting is left to the sink so that looping
    /// tracks keep their place while muted.
    pub fn play<S: AudioSink + ?Sized>(&self, cues: &[AudioCue], sink: &mut S) {
        for cue in cues {
            let volume = self.volume_for(cue);
            match *cue {
                AudioCue::Loop { track, .. } => sink.play_loop(track, volume),
                AudioCue::Once(track) => sink.play_once(track, volume),
            }
        }
    }
}

/// HTML audio element backend
#[cfg(target_arch = "wasm32")]
pub mod web {
    use std::collections::HashMap;

    use web_sys::HtmlAudioElement;

    use super::{AudioSink, Track};

    pub struct HtmlAudio {
        elements: HashMap<Track, HtmlAudioElement>,
    }

    impl HtmlAudio {
        pub fn new() -> Self {
            let mut elements = HashMap::new();
            for track in Track::ALL {
                match HtmlAudioElement::new_with_src(track.asset_path()) {
                    Ok(el) => {
                        elements.insert(track, el);
                    }
                    Err(e) => log::warn!("Failed to load {}: {:?}", track.asset_path(), e),
                }
            }
            Self { elements }
        }
    }

    impl AudioSink for HtmlAudio {
        fn play_loop(&mut self, track: Track, volume: f32) {
            let Some(el) = self.elements.get(&track) else { return };
            el.set_loop(true);
            el.set_volume(volume as f64);
            // play() rejects until the page has seen a user gesture
            let _ = el.play();
        }

        fn play_once(&mut self, track: Track, volume: f32) {
            let Some(el) = self.elements.get(&track) else { return };
            el.set_current_time(0.0);
            el.set_volume(volume as f64);
            let _ = el.play();
        }

        fn set_muted(&mut self, muted: bool) {
            for el in self.elements.values() {
                el.set_muted(muted);
            }
        }
    }
}
