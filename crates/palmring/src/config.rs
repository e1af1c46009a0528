use crate::menu::{
    ACTIVATION_THRESHOLD, INDICATOR_GRIP_SCALE, INDICATOR_MIN_SCALE, INNER_RADIUS, MID_RADIUS,
    MIN_MENU_SCALE, OUTER_RADIUS, PALM_FACING_THRESHOLD, PLANE_TOLERANCE, RING_SEGMENTS,
    SMOOTHING_RATE,
};
use directories::ProjectDirs;
use handkit::Handed;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HandPreference {
    #[strum(serialize = "Left", serialize = "l")]
    Left,
    #[strum(serialize = "Right", serialize = "r")]
    Right,
    #[default]
    #[strum(serialize = "Either", serialize = "any", serialize = "both")]
    Either,
}

impl HandPreference {
    /// Hands worth looking at, in scan order.
    pub fn candidates(&self) -> &'static [Handed] {
        match self {
            Self::Left => &[Handed::Left],
            Self::Right => &[Handed::Right],
            Self::Either => &[Handed::Left, Handed::Right],
        }
    }
}

/// Interaction thresholds. Distances are meters, angles degrees.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuTuning {
    pub inner_radius: f32,
    pub mid_radius: f32,
    pub outer_radius: f32,
    pub plane_tolerance: f32,
    pub smoothing_rate: f32,
    pub activation_threshold: f32,
    pub palm_facing_threshold: f32,
    pub indicator_min_scale: f32,
    pub indicator_grip_scale: f32,
    pub ring_segments: usize,
    pub min_menu_scale: f32,
    pub hand: HandPreference,
    /// Cosine of the half-angle a hand must be within, seen from the head. Unset disables it.
    pub view_cone: Option<f32>,
}

impl Default for MenuTuning {
    fn default() -> Self {
        Self {
            inner_radius: INNER_RADIUS,
            mid_radius: MID_RADIUS,
            outer_radius: OUTER_RADIUS,
            plane_tolerance: PLANE_TOLERANCE,
            smoothing_rate: SMOOTHING_RATE,
            activation_threshold: ACTIVATION_THRESHOLD,
            palm_facing_threshold: PALM_FACING_THRESHOLD,
            indicator_min_scale: INDICATOR_MIN_SCALE,
            indicator_grip_scale: INDICATOR_GRIP_SCALE,
            ring_segments: RING_SEGMENTS,
            min_menu_scale: MIN_MENU_SCALE,
            hand: HandPreference::default(),
            view_cone: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HostConfig {
    pub fps: u32,
    pub socket_path: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            socket_path: PathBuf::from(handkit::SOCKET_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub menu: MenuTuning,
    pub host: HostConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "palmring").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PALMRING").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touched = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touched && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_preference_deserialization() {
        let cases = vec![
            ("\"left\"", HandPreference::Left),
            ("\"Left\"", HandPreference::Left),
            ("\"L\"", HandPreference::Left),
            ("\"r\"", HandPreference::Right),
            ("\"RIGHT\"", HandPreference::Right),
            ("\"either\"", HandPreference::Either),
            ("\"any\"", HandPreference::Either),
            ("\"both\"", HandPreference::Either),
        ];

        for (json, expected) in cases {
            let deserialized: HandPreference = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_hand_preference_candidates() {
        assert_eq!(HandPreference::Right.candidates(), &[Handed::Right]);
        assert_eq!(HandPreference::Left.candidates(), &[Handed::Left]);
        assert_eq!(
            HandPreference::Either.candidates(),
            &[Handed::Left, Handed::Right]
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            [menu]
            mid_radius = 0.07
            hand = "r"

            [host]
            fps = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.menu.mid_radius, 0.07);
        assert_eq!(config.menu.hand, HandPreference::Right);
        assert_eq!(config.menu.inner_radius, INNER_RADIUS);
        assert_eq!(config.menu.view_cone, None);
        assert_eq!(config.host.fps, 90);
        assert_eq!(config.host.socket_path, PathBuf::from(handkit::SOCKET_PATH));
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }
}
