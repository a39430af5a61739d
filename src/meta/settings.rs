use std::{
    fs::File,
    io::Read,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::{cinema::Timing, triggers::TriggerSource};

fn enabled() -> bool {
    true
}

/// The user's settings for the mod.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Options {
    /// Show the overlay when the player bonks into a wall.
    #[serde(default = "enabled")]
    pub cinema_on_bonk: bool,

    /// Show the overlay when the player dies.
    #[serde(default = "enabled")]
    pub cinema_on_death: bool,

    /// Show the overlay when the player is frozen.
    #[serde(default = "enabled")]
    pub cinema_on_frozen: bool,

    /// Fade speeds and hold time.
    #[serde(default)]
    pub timing: Timing,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            cinema_on_bonk: true,
            cinema_on_death: true,
            cinema_on_frozen: true,
            timing: Timing::default(),
        }
    }
}

impl Options {
    /// Whether the overlay should be shown for `source`.
    pub fn is_enabled(&self, source: TriggerSource) -> bool {
        match source {
            TriggerSource::Bonk => self.cinema_on_bonk,
            TriggerSource::Death => self.cinema_on_death,
            TriggerSource::Frozen => self.cinema_on_frozen,
        }
    }

    /// Attempts to parse the contents of `reader` to get an `Options` value.
    fn parse_json(reader: impl Read) -> Result<Options> {
        // Coerce with `?`.
        Ok(serde_json::from_reader(reader)?)
    }

    /// Returns a mutex guard around the global options value.
    fn global_mut() -> MutexGuard<'static, Option<Options>> {
        lazy_static::lazy_static! {
            static ref OPTIONS: Mutex<Option<Options>> = Mutex::new(None);
        }

        // Options are plain data, so a poisoned lock still holds a usable value.
        OPTIONS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the current settings. These are read once at startup, but every trigger check
    /// goes through here so that changes made with `set` apply straight away.
    pub fn get() -> Options {
        Options::global_mut().unwrap_or_else(|| {
            log::warn!("Settings haven't been loaded yet. Using defaults.");
            Options::default()
        })
    }

    /// Replaces the current settings and saves them.
    pub fn set(options: Options) {
        *Options::global_mut() = Some(options);
        Options::save();
    }

    /// Looks for a settings file at `path` and loads it.
    fn load_from(path: &Path) -> Result<Option<Options>> {
        if !path.exists() {
            // This isn't an error, but we didn't find any settings.
            return Ok(None);
        }

        let file = File::open(path).wrap_err("failed to open settings file")?;
        Ok(Some(Options::parse_json(file).wrap_err("invalid settings file")?))
    }

    /// Either loads the settings from `path` or generates default values for them.
    fn load_or_default(path: &Path) -> Options {
        match Options::load_from(path) {
            Ok(Some(options)) => return options,

            Ok(None) => log::info!("No settings file found. Defaults will be used."),

            Err(err) => {
                log::error!("Error loading settings file: {err:?}. Defaults will be used.")
            }
        };

        Options::default()
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;

        Ok(())
    }

    /// Saves the settings to a file. Errors will be logged.
    fn save() {
        let result =
            crate::meta::resources::get_data_path("settings.cinema.json").and_then(|path| {
                Options::get().save_to(&path)
            });

        if let Err(err) = result {
            log::error!("Error saving options to file: {err:?}.");
        } else {
            log::info!("Settings saved.");
        }
    }

    /// Loads the settings and stores them globally.
    fn init_global() {
        let options = match crate::meta::resources::get_data_path("settings.cinema.json") {
            Ok(path) => Options::load_or_default(&path),

            Err(err) => {
                log::error!("Unable to find settings path: {err:?}. Defaults will be used.");
                Options::default()
            }
        };

        *Options::global_mut() = Some(options);
    }
}

pub fn init() {
    Options::init_global();

    log::info!("Options: {:#?}", Options::get());
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn missing_fields_use_defaults() {
        let options = Options::parse_json(r#"{ "cinema_on_bonk": false }"#.as_bytes()).unwrap();

        assert!(!options.cinema_on_bonk);
        assert!(options.cinema_on_death);
        assert!(options.cinema_on_frozen);
        assert_eq!(options.timing, Timing::default());
    }

    #[test]
    fn partial_timing_uses_defaults() {
        let options =
            Options::parse_json(r#"{ "timing": { "hold_frames": 40 } }"#.as_bytes()).unwrap();

        assert_eq!(options.timing.hold_frames, 40);
        assert_eq!(options.timing.fade_in, 32);
        assert_eq!(options.timing.fade_out, 20);
    }

    #[test]
    fn everything_enabled_by_default() {
        let options = Options::default();
        assert!(TriggerSource::iter().all(|source| options.is_enabled(source)));
    }

    #[test]
    fn sources_map_to_flags() {
        let options = Options {
            cinema_on_death: false,
            ..Options::default()
        };

        assert!(options.is_enabled(TriggerSource::Bonk));
        assert!(!options.is_enabled(TriggerSource::Death));
        assert!(options.is_enabled(TriggerSource::Frozen));
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.cinema.json");

        let options = Options {
            cinema_on_frozen: false,
            timing: Timing {
                fade_in: 16,
                fade_out: 8,
                hold_frames: 60,
            },
            ..Options::default()
        };

        options.save_to(&path).unwrap();

        assert_eq!(Options::load_from(&path).unwrap(), Some(options));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nothing.json");

        assert_eq!(Options::load_from(&path).unwrap(), None);
        assert_eq!(Options::load_or_default(&path), Options::default());
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.cinema.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Options::load_from(&path).is_err());
        assert_eq!(Options::load_or_default(&path), Options::default());
    }
}
