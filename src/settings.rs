//! Game settings and preferences
//!
//! Read-only configuration: LocalStorage on the web, a JSON file on native.
//! Nothing is ever written back; in-game toggles last for the session.

use serde::Deserialize;

/// Default number of ticks a headless run lasts (5 minutes at 60 Hz)
pub const DEFAULT_MAX_TICKS: u64 = 5 * 60 * 60;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed for reproducible sessions (random when unset)
    pub seed: Option<u64>,
    /// Draw jump particles
    pub particles: bool,
    /// Start with the autopilot playing
    pub autopilot: bool,
    /// Tick budget for the headless native runner
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            particles: true,
            autopilot: false,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "leap_and_avoid_settings";

    /// Settings file name on native
    pub const FILE_NAME: &'static str = "leap_and_avoid.json";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Settings file location; `LEAP_SETTINGS` overrides the default
    #[cfg(not(target_arch = "wasm32"))]
    pub fn path() -> std::path::PathBuf {
        std::env::var_os("LEAP_SETTINGS")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(Self::FILE_NAME))
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.particles);
        assert!(!settings.autopilot);
        assert_eq!(settings.max_ticks, DEFAULT_MAX_TICKS);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ seed: ").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!(
            "leap_and_avoid_settings_{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{ "seed": 123, "particles": false, "autopilot": true, "max_ticks": 600 }"#,
        )
        .unwrap();
        let settings = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            settings,
            Settings {
                seed: Some(123),
                particles: false,
                autopilot: true,
                max_ticks: 600,
            }
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("leap_and_avoid_does_not_exist.json");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_loading_leaves_no_file_behind() {
        let path = std::env::temp_dir().join(format!(
            "leap_and_avoid_untouched_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut settings = Settings::load_from(&path);
        settings.autopilot = !settings.autopilot;
        assert!(settings.autopilot);

        // Neither loading nor a runtime toggle touches the file system
        assert!(!path.exists());
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
