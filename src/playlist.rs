use std::path::Path;

use config_file::FromConfigFile;
use serde::Deserialize;

use crate::animation::{EffectError, EffectOptions};
use crate::chain::Direction;
use crate::effects::collider::Collider;
use crate::effects::comet::{Comet, CometConfig};
use crate::effects::fade::{Fade, FadeMode};
use crate::effects::larson::Larson;
use crate::effects::pulse::Pulse;
use crate::effects::sparkle::Sparkle;
use crate::effects::steady::{Alternate, On, Wait};
use crate::effects::wipe::{Wipe, WipeMode};
use crate::effects::ChainEffect;
use crate::palettes::Palette;

fn default_speed() -> f32 {
    1.0
}

fn default_palette() -> String {
    "rgb".to_string()
}

fn default_duty() -> u8 {
    25
}

fn default_size() -> usize {
    2
}

fn default_tail() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct PlaylistEntry {
    pub effect: String,
    /// Seconds this entry stays active.
    pub duration: f32,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default = "default_palette")]
    pub palette: String,
    /// Comet tail length; defaults to the palette length.
    #[serde(default)]
    pub tail: Option<usize>,
    #[serde(default)]
    pub multi_colored: bool,
    /// Pulse duty cycle in percent.
    #[serde(default = "default_duty")]
    pub duty: u8,
    /// Larson block divisor.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Collider tail length.
    #[serde(default = "default_tail")]
    pub collider_tail: usize,
}

#[derive(Debug, Deserialize)]
pub struct Playlist {
    pub entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn load(path: &Path) -> Result<Playlist, String> {
        Playlist::from_config_file(path).map_err(|error| error.to_string())
    }

    /// The shipped demo show, used when no playlist file is given.
    pub fn demo() -> Playlist {
        let entry = |effect: &str, duration: f32, speed: f32, palette: &str| PlaylistEntry {
            effect: effect.to_string(),
            duration,
            speed,
            palette: palette.to_string(),
            tail: None,
            multi_colored: false,
            duty: default_duty(),
            size: default_size(),
            collider_tail: default_tail(),
        };

        Playlist {
            entries: vec![
                entry("collider", 6.0, 0.5, "rgb"),
                entry("fade-in", 5.0, 1.0, "rgb"),
                entry("pulse", 6.0, 1.0, "red"),
                entry("wipe-right", 10.0, 1.0, "rgb"),
                entry("comets", 8.0, 1.0, "rainbow"),
                entry("sparkle", 5.0, 1.0, "rgb"),
                entry("larson", 8.0, 1.0, "red"),
            ],
        }
    }

    /// Builds the boxed effects for a chain of `chain_len` pixels at `fps`.
    pub fn build_effects(
        &self,
        fps: u32,
        chain_len: usize,
    ) -> Result<Vec<Box<dyn ChainEffect>>, EffectError> {
        self.entries
            .iter()
            .map(|entry| build_effect(entry, fps, chain_len))
            .collect()
    }
}

fn build_effect(
    entry: &PlaylistEntry,
    fps: u32,
    chain_len: usize,
) -> Result<Box<dyn ChainEffect>, EffectError> {
    let palette = Palette::by_name(&entry.palette).ok_or_else(|| {
        EffectError::Configuration(format!("unknown palette \"{}\"", entry.palette))
    })?;
    let options = EffectOptions {
        duration: entry.duration,
        speed: entry.speed,
        fps,
        palette,
    };

    let comet_config = |direction, filled| CometConfig {
        direction,
        filled,
        multi_colored: entry.multi_colored,
        tail: entry.tail,
    };

    let effect: Box<dyn ChainEffect> = match entry.effect.as_str() {
        "sparkle" => Box::new(Sparkle::new(&options)?),
        "sparkle-random" => Box::new(Sparkle::random(&options)?),
        "comet" | "comet-right" => Box::new(Comet::new(
            &options,
            chain_len,
            comet_config(Direction::Right, false),
        )?),
        "comet-left" => Box::new(Comet::new(
            &options,
            chain_len,
            comet_config(Direction::Left, false),
        )?),
        "comets" | "comets-right" => Box::new(Comet::new(
            &options,
            chain_len,
            comet_config(Direction::Right, true),
        )?),
        "comets-left" => Box::new(Comet::new(
            &options,
            chain_len,
            comet_config(Direction::Left, true),
        )?),
        "pulse" => Box::new(Pulse::new(&options, entry.duty)?),
        "fade-in" => Box::new(Fade::fade_in(&options)?),
        "fade-out" => Box::new(Fade::fade_out(&options)?),
        "fade-in-out" => Box::new(Fade::fade_in_out(&options)?),
        "collider" => Box::new(Collider::new(&options, chain_len, entry.collider_tail)?),
        "wipe-in" => Box::new(Wipe::new(&options, chain_len, WipeMode::In)?),
        "wipe-out" => Box::new(Wipe::new(&options, chain_len, WipeMode::Out)?),
        "wipe-left" => {
            let wipe = Wipe::new(&options, chain_len, WipeMode::Left)?;
            Box::new(if entry.multi_colored {
                wipe.multi_colored()
            } else {
                wipe
            })
        }
        "wipe-right" => {
            let wipe = Wipe::new(&options, chain_len, WipeMode::Right)?;
            Box::new(if entry.multi_colored {
                wipe.multi_colored()
            } else {
                wipe
            })
        }
        "larson" | "knight-rider" => Box::new(Larson::new(&options, chain_len, entry.size)?),
        "on" => Box::new(On::new(&options)?),
        "alternate" => Box::new(Alternate::new(&options)?),
        "wait" => Box::new(Wait::new(&options)?),
        other => {
            return Err(EffectError::Configuration(format!(
                "unknown effect \"{}\"",
                other
            )))
        }
    };

    Ok(effect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_playlist_builds() {
        let effects = Playlist::demo().build_effects(20, 50).unwrap();
        assert_eq!(effects.len(), 7);
        assert_eq!(effects[0].name(), "collider");
        assert_eq!(effects[6].name(), "larson");
    }

    #[test]
    fn unknown_effect_is_a_configuration_error() {
        let mut playlist = Playlist::demo();
        playlist.entries[0].effect = "disco".to_string();
        let err = playlist.build_effects(20, 50).unwrap_err();
        assert!(matches!(err, EffectError::Configuration(_)));
    }

    #[test]
    fn unknown_palette_is_a_configuration_error() {
        let mut playlist = Playlist::demo();
        playlist.entries[0].palette = "mauve".to_string();
        assert!(playlist.build_effects(20, 50).is_err());
    }

    #[test]
    fn bad_effect_parameters_surface_at_build_time() {
        let mut playlist = Playlist::demo();
        playlist.entries[0].collider_tail = 100;
        assert!(playlist.build_effects(20, 50).is_err());
    }
}
