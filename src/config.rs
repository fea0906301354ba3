use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::locate::RoleMatcher;

pub const ROLE_TV: &str = "tv";
pub const ROLE_OUTLINES: &str = "outlines";

/// Scene, source, and timing configuration. Defaults reproduce the
/// living-room setup; a JSON file can override any part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub lights: LightConfig,
    pub roles: Vec<RoleMatcher>,
    pub timing: TimingConfig,
}

/// Camera pose handed to the renderer; not interpreted here
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub ambient_intensity: f32,
    pub directional_position: [f32; 3],
    pub directional_intensity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frame capture cadence
    pub capture_interval_ms: u64,
    /// Repeating live-refresh cadence
    pub refresh_interval_ms: u64,
    /// Delay before the first switch from the still image to live content
    pub first_refresh_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            lights: LightConfig::default(),
            roles: default_roles(),
            timing: TimingConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [30.0, 200.0, 300.0],
            target: [30.0, 100.0, -100.0],
            fov_deg: 45.0,
            near: 1.0,
            far: 2800.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.6,
            directional_position: [50.0, 30.0, 50.0],
            directional_intensity: 1.0,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            capture_interval_ms: 1000,
            refresh_interval_ms: 10_000,
            first_refresh_delay_ms: 5_000,
        }
    }
}

fn default_roles() -> Vec<RoleMatcher> {
    vec![
        RoleMatcher::singular(ROLE_TV, &["TV1_Black001_0"]),
        RoleMatcher::plural(ROLE_OUTLINES, &["Mesa_Wood_0", "Mesa_2_Wood_0"]),
    ]
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config = serde_json::from_str(&text)
            .context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }
}
