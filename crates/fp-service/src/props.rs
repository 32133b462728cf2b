use crate::config::{SensorKind, ServiceConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const SENSOR_ID: i32 = 0;
pub const MAX_ENROLLMENTS_PER_USER: i32 = 7;
const SUPPORTS_NAVIGATION_GESTURES: bool = false;

const HW_COMPONENT_ID: &str = "fingerprintSensor";
const HW_VERSION: &str = "vendor/model/revision";
const FW_VERSION: &str = "1.01";
const SERIAL_NUMBER: &str = "00000001";
const SW_COMPONENT_ID: &str = "matchingAlgorithm";
const SW_VERSION: &str = "vendor/version/revision";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SensorStrength {
    Convenience,
    Weak,
    Strong,
}

/// Version info for one hardware or software component; fields that do not
/// apply stay empty.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub component_id: String,
    pub hardware_version: String,
    pub firmware_version: String,
    pub serial_number: String,
    pub software_version: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SensorLocation {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
}

/// Static capability descriptor for one sensor. Immutable after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorProps {
    pub sensor_id: i32,
    pub strength: SensorStrength,
    pub max_enrollments_per_user: i32,
    pub component_info: Vec<ComponentInfo>,
    pub sensor_kind: SensorKind,
    pub location: Option<SensorLocation>,
    pub supports_navigation_gestures: bool,
    pub supports_detect_interaction: bool,
    pub supports_display_touch: bool,
    pub supports_illumination: bool,
}

/// Build the capability descriptor. One sensor per service instance, so the
/// returned sequence always has exactly one element.
pub fn build_sensor_props(config: &ServiceConfig) -> Vec<SensorProps> {
    let component_info = vec![
        ComponentInfo {
            component_id: HW_COMPONENT_ID.to_string(),
            hardware_version: HW_VERSION.to_string(),
            firmware_version: FW_VERSION.to_string(),
            serial_number: SERIAL_NUMBER.to_string(),
            software_version: String::new(),
        },
        ComponentInfo {
            component_id: SW_COMPONENT_ID.to_string(),
            software_version: SW_VERSION.to_string(),
            ..ComponentInfo::default()
        },
    ];

    let location = config.layout.resolve();
    info!(
        "Sensor kind: {:?}, location: {:?}",
        config.sensor_kind, location
    );

    vec![SensorProps {
        sensor_id: SENSOR_ID,
        strength: SensorStrength::Strong,
        max_enrollments_per_user: MAX_ENROLLMENTS_PER_USER,
        component_info,
        sensor_kind: config.sensor_kind,
        location,
        supports_navigation_gestures: SUPPORTS_NAVIGATION_GESTURES,
        supports_detect_interaction: false,
        supports_display_touch: false,
        supports_illumination: false,
    }]
}
