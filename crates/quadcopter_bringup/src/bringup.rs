//! Declaration builder for the X3 house-world bring-up

use crate::ament::{AmentIndex, IndexError, PackageIndex};
use crate::config::BringupConfig;
use crate::description::{
    IncludeLaunch, LaunchDescription, LaunchEntity, NodeDescription, OutputMode, SetEnvironment,
};

/// Build the bring-up from `AMENT_PREFIX_PATH` and the stock configuration
pub fn generate_launch_description() -> Result<LaunchDescription, IndexError> {
    let index = AmentIndex::from_env()?;
    build_launch_description(&BringupConfig::default(), &index)
}

/// Build the bring-up declarations for `config`, resolving packages through `index`
///
/// Both share directories are resolved before any entity is built, so a
/// missing package yields an error and never a partial description.
pub fn build_launch_description(
    config: &BringupConfig,
    index: &impl PackageIndex,
) -> Result<LaunchDescription, IndexError> {
    let share = index.share_directory(&config.package)?;
    let simulator_share = index.share_directory(&config.simulator.package)?;
    log::info!(
        "Resolved '{}' -> {}, '{}' -> {}",
        config.package,
        share.display(),
        config.simulator.package,
        simulator_share.display()
    );

    let world_file = share.join(&config.world);
    let models_path = share.join(&config.models);
    let bridge_config = share.join(&config.bridge_config);
    let rviz_config = share.join(&config.rviz_config);
    let simulator_launch = simulator_share.join(&config.simulator.launch_file);

    // Lets the simulator locate the vehicle and house models
    let set_resource_path = SetEnvironment {
        name: config.resource_path_var.clone(),
        value: models_path.to_string_lossy().into_owned(),
    };

    let gazebo = IncludeLaunch::new(&simulator_launch).with_argument(
        "gz_args",
        format!(
            "-r -v {} {}",
            config.simulator.verbosity,
            world_file.display()
        ),
    );

    let bridge = NodeDescription::new("ros_gz_bridge", "parameter_bridge")
        .with_parameter("config_file", bridge_config.as_path())
        .with_output(OutputMode::Screen);

    let octomap = NodeDescription::new("octomap_server", "octomap_server_node")
        .with_name("octomap_server")
        .with_output(OutputMode::Screen)
        .with_parameter("resolution", config.octomap.resolution)
        .with_parameter("frame_id", config.octomap.frame_id.as_str())
        .with_parameter("sensor_model.max_range", config.octomap.max_range)
        .with_remapping("cloud_in", config.octomap.cloud_topic.as_str());

    let rviz = NodeDescription::new("rviz2", "rviz2")
        .with_name("rviz2")
        .with_arguments(["-d".to_string(), rviz_config.to_string_lossy().into_owned()])
        .with_output(OutputMode::Screen);

    let static_tf = NodeDescription::new("tf2_ros", "static_transform_publisher")
        .with_name("static_tf_camera")
        .with_arguments(config.camera_transform.arguments())
        .with_output(OutputMode::Screen);

    let entities = vec![
        LaunchEntity::SetEnvironment(set_resource_path),
        LaunchEntity::Include(gazebo),
        LaunchEntity::Node(bridge),
        LaunchEntity::Node(octomap),
        LaunchEntity::Node(rviz),
        LaunchEntity::Node(static_tf),
    ];

    for entity in &entities {
        log::debug!("Declared {}: {:?}", entity.kind(), entity);
    }

    let description = LaunchDescription::new(entities).with_resources(vec![
        world_file,
        models_path,
        bridge_config,
        rviz_config,
        simulator_launch,
    ]);

    log::info!("Built launch description with {} entities", description.len());
    Ok(description)
}
