//! Quadcopter Bring-up
//!
//! Launch description for the X3 quadcopter house-world simulation.
//!
//! # Overview
//!
//! The crate declares, without starting anything:
//! - the simulator model search path (`IGN_GAZEBO_RESOURCE_PATH`)
//! - the Ignition Gazebo launch file running the house world
//! - the ROS/Gazebo parameter bridge
//! - an OctoMap server fed by the camera point cloud
//! - RViz with the bundled view configuration
//! - the static transform from the vehicle base to the camera
//!
//! Package share directories are resolved through the ament resource index.
//! The resulting [`LaunchDescription`] can be printed as a plan, rendered as a
//! ROS 2 YAML launch file for `ros2 launch`, or serialized as JSON.
//!
//! # Example
//!
//! ```no_run
//! let description = quadcopter_bringup::generate_launch_description()?;
//! println!("{}", description.to_launch_yaml()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ament;
pub mod bringup;
pub mod cli;
pub mod config;
pub mod description;

pub use ament::{AmentIndex, IndexError, PackageIndex};
pub use bringup::{build_launch_description, generate_launch_description};
pub use cli::{BringupArgs, OutputFormat};
pub use config::{BringupConfig, ConfigError, OctomapConfig, SimulatorConfig, TransformConfig};
pub use description::{
    IncludeLaunch, LaunchDescription, LaunchEntity, LaunchFrontend, NodeDescription, OutputMode,
    ParameterValue, RenderError, SetEnvironment,
};
