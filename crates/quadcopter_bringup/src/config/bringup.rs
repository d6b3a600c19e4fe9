//! Bring-up configuration schema
//!
//! Every field defaults to the values of the X3 house-world simulation, so an
//! empty YAML document (or no file at all) yields the stock bring-up.
//!
//! ```yaml
//! octomap:
//!   resolution: 0.05
//! camera_transform:
//!   translation: [0.0, 0.0, 0.15]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root bring-up configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BringupConfig {
    /// Package holding the world, models, bridge and RViz configuration
    pub package: String,

    /// World description, relative to the package share directory
    pub world: String,

    /// Model directory, relative to the package share directory
    pub models: String,

    /// Bridge parameter file, relative to the package share directory
    pub bridge_config: String,

    /// RViz configuration, relative to the package share directory
    pub rviz_config: String,

    /// Environment variable the simulator reads its model search path from
    pub resource_path_var: String,

    /// Simulator launch settings
    pub simulator: SimulatorConfig,

    /// Fixed transform from the vehicle base to the camera
    pub camera_transform: TransformConfig,

    /// Occupancy mapping settings
    pub octomap: OctomapConfig,
}

/// Simulator launch inclusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Package providing the simulator launch file
    pub package: String,

    /// Launch file, relative to that package's share directory
    pub launch_file: String,

    /// Simulator console verbosity (`-v`)
    pub verbosity: u8,
}

/// Static transform between two frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// x, y, z in meters
    pub translation: [f64; 3],
    /// roll, pitch, yaw in radians
    pub rotation: [f64; 3],
    pub parent_frame: String,
    pub child_frame: String,
}

/// OctoMap server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctomapConfig {
    /// Voxel edge length in meters
    pub resolution: f64,
    /// Fixed frame the map is built in
    pub frame_id: String,
    /// Maximum sensor range in meters
    pub max_range: f64,
    /// Point cloud topic remapped onto `cloud_in`
    pub cloud_topic: String,
}

impl Default for BringupConfig {
    fn default() -> Self {
        Self {
            package: "easynav_quadcopter_example".to_string(),
            world: "worlds/house_world.sdf".to_string(),
            models: "models".to_string(),
            bridge_config: "config/ros_gz_x3_bridge.yaml".to_string(),
            rviz_config: "rviz/view.rviz".to_string(),
            resource_path_var: "IGN_GAZEBO_RESOURCE_PATH".to_string(),
            simulator: SimulatorConfig::default(),
            camera_transform: TransformConfig::default(),
            octomap: OctomapConfig::default(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            package: "ros_ign_gazebo".to_string(),
            launch_file: "launch/ign_gazebo.launch.py".to_string(),
            verbosity: 1,
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            // Camera 10 cm above the base link, no rotation
            translation: [0.0, 0.0, 0.1],
            rotation: [0.0, 0.0, 0.0],
            parent_frame: "x3/X3/base_link".to_string(),
            child_frame: "camera_frame_rgb".to_string(),
        }
    }
}

impl Default for OctomapConfig {
    fn default() -> Self {
        Self {
            resolution: 0.1,
            frame_id: "odom".to_string(),
            max_range: 5.0,
            cloud_topic: "/camera/points".to_string(),
        }
    }
}

impl TransformConfig {
    /// Positional arguments for `static_transform_publisher`:
    /// x y z roll pitch yaw parent child
    pub fn arguments(&self) -> Vec<String> {
        self.translation
            .iter()
            .chain(self.rotation.iter())
            .map(|v| format!("{:?}", v))
            .chain([self.parent_frame.clone(), self.child_frame.clone()])
            .collect()
    }
}

impl BringupConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // Empty and null documents deserialize to unit, not to a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str::<Option<BringupConfig>>(yaml)?.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("world", &self.world),
            ("models", &self.models),
            ("bridge_config", &self.bridge_config),
            ("rviz_config", &self.rviz_config),
            ("simulator.launch_file", &self.simulator.launch_file),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("'{}' must not be empty", field)));
            }
            if Path::new(value).is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "'{}' must be relative to the package share directory, got '{}'",
                    field, value
                )));
            }
        }

        if self.resource_path_var.is_empty() || self.resource_path_var.contains('=') {
            return Err(ConfigError::Validation(format!(
                "Invalid environment variable name '{}'",
                self.resource_path_var
            )));
        }

        for (field, value) in [
            ("octomap.resolution", self.octomap.resolution),
            ("octomap.max_range", self.octomap.max_range),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "'{}' must be positive, got {}",
                    field, value
                )));
            }
        }

        let transform = &self.camera_transform;
        if let Some(value) = transform
            .translation
            .iter()
            .chain(transform.rotation.iter())
            .find(|v| !v.is_finite())
        {
            return Err(ConfigError::Validation(format!(
                "Camera transform values must be finite, got {}",
                value
            )));
        }

        if self.camera_transform.parent_frame.is_empty()
            || self.camera_transform.child_frame.is_empty()
        {
            return Err(ConfigError::Validation(
                "Camera transform frames must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur when loading a bring-up configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
