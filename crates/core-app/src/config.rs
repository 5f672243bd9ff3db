//! Application configuration: the fields `App::run` reads before entering
//! the terminal, optionally loaded from a TOML file and falling back to
//! defaults exactly as the spec's external-interfaces section lists them.

use std::path::Path;

use serde::Deserialize;

/// Configuration for one `App` run. Every field has the default the
/// specification names; `target_fps` additionally substitutes 60 for any
/// non-positive value supplied in a config file (a zero or negative frame
/// rate would stall `FpsMonitor` forever).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub alternate_screen: bool,
    pub mouse_capture: bool,
    pub raw_mode: bool,
    pub window_mode: bool,
    pub target_fps: i32,
    pub bracketed_paste: bool,
    pub focus_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: String::new(),
            alternate_screen: true,
            mouse_capture: false,
            raw_mode: true,
            window_mode: false,
            target_fps: 60,
            bracketed_paste: false,
            focus_events: false,
        }
    }
}

impl Config {
    /// Parse `content` as TOML, then normalize `target_fps`. Missing fields
    /// fall back to [`Config::default`]; a malformed document is an error
    /// the caller decides how to handle (the teacher's own config loader
    /// instead swallows parse errors and returns defaults - a run-time tool
    /// silently starting with the wrong config is a worse failure mode for
    /// a library than a caller-visible error, so this one propagates).
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut cfg: Config = toml::from_str(content)?;
        cfg.normalize();
        Ok(cfg)
    }

    /// Load from a file if it exists, otherwise return the default
    /// configuration. A missing file is not an error - only a present but
    /// unparsable one is.
    pub fn load(path: &Path) -> Result<Self, toml::de::Error> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(_) => Ok(Self::default()),
        }
    }

    fn normalize(&mut self) {
        if self.target_fps <= 0 {
            self.target_fps = 60;
        }
    }

    pub fn target_fps_u32(&self) -> u32 {
        self.target_fps.max(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_spec_defaults() {
        let cfg = Config::default();
        assert!(cfg.alternate_screen);
        assert!(!cfg.mouse_capture);
        assert!(cfg.raw_mode);
        assert!(!cfg.window_mode);
        assert_eq!(cfg.target_fps, 60);
    }

    #[test]
    fn zero_or_negative_target_fps_substitutes_sixty() {
        let cfg = Config::from_toml_str("target_fps = 0\n").unwrap();
        assert_eq!(cfg.target_fps, 60);
        let cfg = Config::from_toml_str("target_fps = -5\n").unwrap();
        assert_eq!(cfg.target_fps, 60);
    }

    #[test]
    fn partial_toml_fills_remaining_fields_with_defaults() {
        let cfg = Config::from_toml_str("title = \"demo\"\nmouse_capture = true\n").unwrap();
        assert_eq!(cfg.title, "demo");
        assert!(cfg.mouse_capture);
        assert!(cfg.raw_mode);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load(Path::new("__definitely_missing_celina_config__.toml")).unwrap();
        assert_eq!(cfg.target_fps, 60);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("celina.toml");
        std::fs::write(&path, "this is not valid = = toml").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
