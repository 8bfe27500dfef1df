//! Lab configuration
//!
//! [`LabConfig`] gathers every tunable of the scene: window, scene profile,
//! asset identifiers, pour choreography timings, substance defaults and input
//! thresholds. It is read from a JSON file (explicit path, or `lab.json` in
//! the platform config directory when present) and otherwise defaults to the
//! values of the classic lab setup.
//!
//! Reading the file is the only I/O; nothing is ever written back.

use super::error::{LabError, LabResult};
use super::window_config::WindowConfig;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config filename looked up in the platform config directory
const CONFIG_FILENAME: &str = "lab.json";

/// Default log filter handed to Bevy's `LogPlugin`
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu=error,naga=warn";

/// Top-level application configuration
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub window: WindowConfig,
    pub profile: SceneProfile,
    pub asset: AssetConfig,
    pub pour: PourSettings,
    pub substance: SubstanceDefaults,
    pub input: InputConfig,
    pub log_filter: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            profile: SceneProfile::default(),
            asset: AssetConfig::default(),
            pour: PourSettings::default(),
            substance: SubstanceDefaults::default(),
            input: InputConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl LabConfig {
    /// Parse a config from JSON text and validate it
    pub fn from_json(text: &str) -> LabResult<Self> {
        let config: LabConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> LabResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| LabError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::info!("[CONFIG] Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolve the effective config
    ///
    /// An explicit path must exist. Without one, `lab.json` in the platform
    /// config directory is used if present, otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>) -> LabResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                tracing::info!("[CONFIG] No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check value ranges that the rest of the app relies on
    pub fn validate(&self) -> LabResult<()> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.substance.tube_fill) {
            return Err(invalid("substance.tube_fill", "must be within [0, 1]"));
        }
        if !unit.contains(&self.substance.flask_fill) {
            return Err(invalid("substance.flask_fill", "must be within [0, 1]"));
        }
        if self.asset.flask_node == self.asset.tube_node {
            return Err(invalid(
                "asset.tube_node",
                "flask and tube must use different node names",
            ));
        }
        if self.pour.transfer_step <= 0.0 {
            return Err(invalid("pour.transfer_step", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.pour.tint_blend) {
            return Err(invalid("pour.tint_blend", "must be within [0, 1]"));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(invalid("window", "width and height must be non-zero"));
        }
        for (field, hex) in [
            ("substance.color", &self.substance.color),
            ("substance.flask_liquid_color", &self.substance.flask_liquid_color),
        ] {
            Srgba::hex(hex).map_err(|e| invalid(field, format!("{hex:?}: {e}")))?;
        }
        Ok(())
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> LabError {
    LabError::InvalidSetting {
        field,
        message: message.into(),
    }
}

/// `lab.json` inside the platform config directory
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "chemlab", "ChemLab")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// The two lab setups the scene bootstrap can reproduce
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SceneProfile {
    /// Close camera, shelf, point fill light, no tone mapping
    #[default]
    Classic,
    /// Wide table, ACES tone mapping, doubled asset scale
    Showcase,
}

/// Concrete constants derived from a [`SceneProfile`]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    pub background: Color,
    pub fov_degrees: f32,
    pub camera_position: Vec3,
    pub ambient_brightness: f32,
    pub key_light_position: Vec3,
    pub key_light_illuminance: f32,
    pub fill_light: FillLight,
    pub floor_size: Vec2,
    pub shelf: bool,
    pub tonemapping: Tonemapping,
    /// Brightness multiplier applied on top of the default camera exposure
    pub exposure: f32,
    pub asset_scale: f32,
    pub orbit_distance: (f32, f32),
    pub orbit_damping: f32,
}

/// Secondary light of the rig
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillLight {
    Point { position: Vec3, intensity: f32, range: f32 },
    Directional { position: Vec3, illuminance: f32 },
}

impl SceneProfile {
    pub fn settings(self) -> SceneSettings {
        match self {
            SceneProfile::Classic => SceneSettings {
                background: Color::srgb_u8(0xfa, 0xfa, 0xfa),
                fov_degrees: 75.0,
                camera_position: Vec3::new(0.0, 5.0, 10.0),
                ambient_brightness: 400.0,
                key_light_position: Vec3::new(5.0, 10.0, 5.0),
                key_light_illuminance: 6_000.0,
                fill_light: FillLight::Point {
                    position: Vec3::new(-5.0, 8.0, -5.0),
                    intensity: 150_000.0,
                    range: 50.0,
                },
                floor_size: Vec2::new(20.0, 20.0),
                shelf: true,
                tonemapping: Tonemapping::None,
                exposure: 1.0,
                asset_scale: 1.0,
                orbit_distance: (0.5, 200.0),
                orbit_damping: 0.05,
            },
            SceneProfile::Showcase => SceneSettings {
                background: Color::WHITE,
                fov_degrees: 60.0,
                camera_position: Vec3::new(0.0, 8.0, 20.0),
                ambient_brightness: 500.0,
                key_light_position: Vec3::new(10.0, 20.0, 10.0),
                key_light_illuminance: 8_000.0,
                fill_light: FillLight::Directional {
                    position: Vec3::new(-10.0, 15.0, -10.0),
                    illuminance: 4_000.0,
                },
                floor_size: Vec2::new(30.0, 20.0),
                shelf: false,
                tonemapping: Tonemapping::AcesFitted,
                exposure: 1.2,
                asset_scale: 2.0,
                orbit_distance: (5.0, 50.0),
                orbit_damping: 0.05,
            },
        }
    }
}

/// Where the lab asset lives and how its nodes are identified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Path relative to the asset directory
    pub path: String,
    pub flask_node: String,
    pub tube_node: String,
    pub flask_x: f32,
    pub tube_x: f32,
    pub flask_liquid_radius: f32,
    pub tube_liquid_radius: f32,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            path: "models/chemistry_bottles.glb".to_string(),
            flask_node: "Object_4".to_string(),
            tube_node: "Object_10".to_string(),
            flask_x: 2.0,
            tube_x: -2.0,
            flask_liquid_radius: 0.7,
            tube_liquid_radius: 0.3,
        }
    }
}

/// Timings and angles of the pour choreography
///
/// Angles are rotations about Z in radians; negative tilts toward +X.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PourSettings {
    pub approach_ms: u64,
    pub pour_ms: u64,
    pub settle_ms: u64,
    pub return_tilt_ms: u64,
    pub return_move_ms: u64,
    pub approach_tilt: f32,
    pub pour_tilt: f32,
    /// Tilt past which liquid starts flowing
    pub pour_threshold: f32,
    /// Fill ratio moved from tube to flask per animation step
    pub transfer_step: f32,
    /// Fraction of the remaining color distance blended per step
    pub tint_blend: f32,
    /// Horizontal offset of the tube mouth from the flask center
    pub approach_offset_x: f32,
    /// Height of the tube mouth above the flask rim
    pub approach_clearance: f32,
}

impl Default for PourSettings {
    fn default() -> Self {
        Self {
            approach_ms: 1500,
            pour_ms: 2500,
            settle_ms: 1000,
            return_tilt_ms: 1000,
            return_move_ms: 1500,
            approach_tilt: -PI / 6.0,
            pour_tilt: -PI * 0.85,
            pour_threshold: -PI / 2.0,
            transfer_step: 0.001,
            tint_blend: 0.005,
            approach_offset_x: -0.1,
            approach_clearance: 0.3,
        }
    }
}

impl PourSettings {
    pub fn approach(&self) -> Duration {
        Duration::from_millis(self.approach_ms)
    }

    pub fn pour(&self) -> Duration {
        Duration::from_millis(self.pour_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn return_tilt(&self) -> Duration {
        Duration::from_millis(self.return_tilt_ms)
    }

    pub fn return_move(&self) -> Duration {
        Duration::from_millis(self.return_move_ms)
    }
}

/// Initial substance parameters and fills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstanceDefaults {
    pub kind: crate::lab::SubstanceKind,
    /// Hex color, e.g. `#ff0055`
    pub color: String,
    pub particle_count: u32,
    pub tube_fill: f32,
    pub flask_fill: f32,
    pub flask_liquid_color: String,
}

impl Default for SubstanceDefaults {
    fn default() -> Self {
        Self {
            kind: crate::lab::SubstanceKind::Liquid,
            color: "#ff0055".to_string(),
            particle_count: 50,
            tube_fill: 0.5,
            flask_fill: 0.0,
            flask_liquid_color: "#00ccff".to_string(),
        }
    }
}

impl SubstanceDefaults {
    /// Substance color, falling back to white for an unparsable hex
    pub fn color(&self) -> Color {
        parse_hex_or_white(&self.color)
    }

    pub fn flask_liquid_color(&self) -> Color {
        parse_hex_or_white(&self.flask_liquid_color)
    }
}

fn parse_hex_or_white(hex: &str) -> Color {
    Srgba::hex(hex).map(Color::from).unwrap_or_else(|e| {
        tracing::warn!("[CONFIG] Invalid color {:?}: {}", hex, e);
        Color::WHITE
    })
}

/// Pointer input thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum gap between the two clicks of a double-click
    pub double_click_window_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_click_window_ms: 400,
        }
    }
}
