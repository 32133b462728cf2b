use crate::props::SensorLocation;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::error;

/// Sensor variant, resolved at startup from configuration rather than at
/// compile time so descriptor building is a single runtime path.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    #[default]
    Unknown,
    UnderDisplayOptical,
}

/// Raw sensor placement from the device configuration. Negative coordinates
/// mean the value was not provided.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SensorLayout {
    #[serde(default = "unset")]
    pub x: i32,
    #[serde(default = "unset")]
    pub y: i32,
    #[serde(default = "unset")]
    pub radius: i32,
}

fn unset() -> i32 {
    -1
}

impl Default for SensorLayout {
    fn default() -> Self {
        Self {
            x: -1,
            y: -1,
            radius: -1,
        }
    }
}

impl SensorLayout {
    /// A location is reported only when all three coordinates are usable;
    /// anything else is logged and the descriptor omits the field.
    pub fn resolve(&self) -> Option<SensorLocation> {
        if self.x >= 0 && self.y >= 0 && self.radius >= 0 {
            Some(SensorLocation {
                x: self.x,
                y: self.y,
                radius: self.radius,
            })
        } else {
            error!(
                "Failed to get sensor location: {}, {}, {}",
                self.x, self.y, self.radius
            );
            None
        }
    }
}

/// Startup configuration for the coordinator.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub sensor_kind: SensorKind,
    #[serde(default)]
    pub layout: SensorLayout,
}

impl ServiceConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        serde_yaml::from_str(&raw).with_context(|| format!("parsing config: {}", path.display()))
    }

    /// Convenience constructor for under-display variants.
    pub fn under_display(x: i32, y: i32, radius: i32) -> Self {
        Self {
            sensor_kind: SensorKind::UnderDisplayOptical,
            layout: SensorLayout { x, y, radius },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_resolves_when_all_coordinates_set() {
        let layout = SensorLayout {
            x: 540,
            y: 1910,
            radius: 90,
        };
        assert_eq!(
            layout.resolve(),
            Some(SensorLocation {
                x: 540,
                y: 1910,
                radius: 90
            })
        );
    }

    #[test]
    fn test_layout_absent_when_any_coordinate_negative() {
        let layout = SensorLayout {
            x: 540,
            y: 1910,
            radius: -1,
        };
        assert_eq!(layout.resolve(), None);
        assert_eq!(SensorLayout::default().resolve(), None);
    }

    #[test]
    fn test_yaml_config_parses() {
        let raw = "sensor_kind: under_display_optical\nlayout:\n  x: 540\n  y: 1910\n  radius: 90\n";
        let config: ServiceConfig = serde_yaml::from_str(raw).unwrap();
        assert_eq!(config, ServiceConfig::under_display(540, 1910, 90));
    }

    #[test]
    fn test_empty_config_defaults_to_unknown_sensor() {
        let config: ServiceConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.sensor_kind, SensorKind::Unknown);
        assert_eq!(config.layout.resolve(), None);
    }

    #[test]
    fn test_config_round_trips_through_file() {
        let path = std::env::temp_dir().join("fp-service-config-test.yaml");
        let config = ServiceConfig::under_display(120, 240, 60);
        std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();
        let loaded = ServiceConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
