//! Game tuning and launcher settings.
//!
//! Every field has a default, so a RON file only needs to name what it
//! overrides, e.g. `(rules: (enemy_speed: 200.0))`.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SpaceShooter".into(),
            width: 800,
            height: 600,
            resizable: false,
            vsync: true,
            target_fps: 60,
        }
    }
}

/// Fixed rules of the arcade loop.  Sizes are in playfield pixels, speeds in
/// pixels per second, times in seconds.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_start_y: f32,
    pub player_speed: f32,
    pub max_health: u32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,
    pub spawn_interval: f32,
    pub score_per_kill: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            playfield_width: 800.0,
            playfield_height: 600.0,
            player_width: 64.0,
            player_height: 64.0,
            player_start_y: 30.0,
            player_speed: 300.0,
            max_health: 3,
            bullet_width: 8.0,
            bullet_height: 16.0,
            bullet_speed: 500.0,
            enemy_width: 64.0,
            enemy_height: 64.0,
            enemy_speed: 150.0,
            spawn_interval: 1.2,
            score_per_kill: 10,
        }
    }
}

impl RulesConfig {
    /// Player spawn point: horizontally centred, `player_start_y` up.
    pub fn player_start(&self) -> (f32, f32) {
        (
            self.playfield_width / 2.0 - self.player_width / 2.0,
            self.player_start_y,
        )
    }

    pub fn max_player_x(&self) -> f32 {
        (self.playfield_width - self.player_width).max(0.0)
    }

    pub fn max_enemy_x(&self) -> f32 {
        (self.playfield_width - self.enemy_width).max(0.0)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub rules: RulesConfig,
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        ron::from_str(&data).with_context(|| format!("parse RON {}", path.display()))
    }

    /// Falls back to defaults when the file is missing or malformed; the
    /// error is handed back so the caller can log it.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(format!("{e:#}"))),
        }
    }

    /// Human-readable warnings for tuning values the simulation cannot use
    /// sensibly.  An empty list means the config is fine.
    pub fn validate(&self) -> Vec<String> {
        let r = &self.rules;
        let mut warnings = Vec::new();

        let positive = [
            ("rules.playfield_width", r.playfield_width),
            ("rules.playfield_height", r.playfield_height),
            ("rules.player_width", r.player_width),
            ("rules.player_height", r.player_height),
            ("rules.player_speed", r.player_speed),
            ("rules.bullet_width", r.bullet_width),
            ("rules.bullet_height", r.bullet_height),
            ("rules.bullet_speed", r.bullet_speed),
            ("rules.enemy_width", r.enemy_width),
            ("rules.enemy_height", r.enemy_height),
            ("rules.enemy_speed", r.enemy_speed),
            ("rules.spawn_interval", r.spawn_interval),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                warnings.push(format!("{name} must be > 0 (got {value})"));
            }
        }
        if r.player_width > r.playfield_width {
            warnings.push(format!(
                "rules.player_width ({}) wider than playfield ({})",
                r.player_width, r.playfield_width
            ));
        }
        if r.enemy_width > r.playfield_width {
            warnings.push(format!(
                "rules.enemy_width ({}) wider than playfield ({})",
                r.enemy_width, r.playfield_width
            ));
        }
        if r.max_health == 0 {
            warnings.push("rules.max_health must be at least 1".into());
        }
        if self.window.target_fps == 0 {
            warnings.push("window.target_fps must be at least 1".into());
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_arcade_rules() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.window.title, "SpaceShooter");
        assert_eq!((cfg.window.width, cfg.window.height), (800, 600));
        assert!(!cfg.window.resizable);
        assert!(cfg.window.vsync);
        assert_eq!(cfg.window.target_fps, 60);
        assert_eq!(cfg.rules.player_start(), (368.0, 30.0));
        assert_eq!(cfg.rules.max_player_x(), 736.0);
        assert_eq!(cfg.rules.max_health, 3);
        assert_eq!(cfg.rules.score_per_kill, 10);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let sample = r#"(window: (title: "Custom"), rules: (enemy_speed: 200.0))"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let (cfg, err) = GameConfig::load_or_default(file.path());
        assert!(err.is_none(), "unexpected error: {err:?}");
        assert_eq!(cfg.window.title, "Custom");
        assert_eq!(cfg.rules.enemy_speed, 200.0);
        assert_eq!(cfg.rules.bullet_speed, RulesConfig::default().bullet_speed);
        assert_eq!(cfg.window.target_fps, 60);
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.ron");
        let err = err.expect("missing file must report an error");
        assert!(err.contains("read config"), "got: {err}");
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(rules: (enemy_speed: \"fast\"))").unwrap();
        let err = GameConfig::load_from_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parse RON"));
    }

    #[test]
    fn validate_flags_unusable_values() {
        let mut cfg = GameConfig::default();
        cfg.rules.spawn_interval = 0.0;
        cfg.rules.player_width = 900.0;
        cfg.rules.max_health = 0;
        let warnings = cfg.validate();
        let joined = warnings.join("\n");
        assert!(joined.contains("rules.spawn_interval"));
        assert!(joined.contains("wider than playfield"));
        assert!(joined.contains("max_health"));
        assert_eq!(warnings.len(), 3, "{joined}");
    }
}
