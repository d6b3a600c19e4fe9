//! End-to-end tests for the bring-up description against a fake install tree

use quadcopter_bringup::{
    build_launch_description, generate_launch_description, AmentIndex, BringupConfig,
    IndexError, LaunchEntity, LaunchFrontend, OutputMode,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PACKAGE: &str = "easynav_quadcopter_example";
const SIMULATOR_PACKAGE: &str = "ros_ign_gazebo";

/// Register `package` in the prefix's ament index and return its share dir
fn install_package(prefix: &Path, package: &str) -> PathBuf {
    let marker_dir = prefix.join("share/ament_index/resource_index/packages");
    std::fs::create_dir_all(&marker_dir).unwrap();
    std::fs::write(marker_dir.join(package), "").unwrap();

    let share = prefix.join("share").join(package);
    std::fs::create_dir_all(&share).unwrap();
    share
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

/// Prefix with both packages and every resource installed
fn full_install() -> (TempDir, PathBuf, PathBuf) {
    let prefix = tempfile::tempdir().unwrap();
    let share = install_package(prefix.path(), PACKAGE);
    let simulator_share = install_package(prefix.path(), SIMULATOR_PACKAGE);

    touch(&share.join("worlds/house_world.sdf"));
    std::fs::create_dir_all(share.join("models")).unwrap();
    touch(&share.join("config/ros_gz_x3_bridge.yaml"));
    touch(&share.join("rviz/view.rviz"));
    touch(&simulator_share.join("launch/ign_gazebo.launch.py"));

    (prefix, share, simulator_share)
}

#[test]
fn test_build_is_deterministic() {
    let (prefix, _, _) = full_install();
    let index = AmentIndex::new([prefix.path()]);
    let config = BringupConfig::default();

    let first = build_launch_description(&config, &index).unwrap();
    let second = build_launch_description(&config, &index).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_launch_yaml().unwrap(), second.to_launch_yaml().unwrap());
}

#[test]
fn test_six_entities_in_fixed_order() {
    let (prefix, _, _) = full_install();
    let index = AmentIndex::new([prefix.path()]);
    let description = build_launch_description(&BringupConfig::default(), &index).unwrap();

    assert_eq!(description.len(), 6);
    assert!(matches!(description.entities[0], LaunchEntity::SetEnvironment(_)));
    assert!(matches!(description.entities[1], LaunchEntity::Include(_)));

    let nodes: Vec<_> = description
        .nodes()
        .map(|n| (n.package.as_str(), n.executable.as_str(), n.name.as_deref()))
        .collect();
    assert_eq!(
        nodes,
        vec![
            ("ros_gz_bridge", "parameter_bridge", None),
            ("octomap_server", "octomap_server_node", Some("octomap_server")),
            ("rviz2", "rviz2", Some("rviz2")),
            ("tf2_ros", "static_transform_publisher", Some("static_tf_camera")),
        ]
    );
    assert!(description.nodes().all(|n| n.output == OutputMode::Screen));
}

#[test]
fn test_paths_join_share_directory() {
    let (prefix, share, simulator_share) = full_install();
    let index = AmentIndex::new([prefix.path()]);
    let description = build_launch_description(&BringupConfig::default(), &index).unwrap();

    let LaunchEntity::SetEnvironment(env) = &description.entities[0] else {
        panic!("expected set_env");
    };
    assert_eq!(env.name, "IGN_GAZEBO_RESOURCE_PATH");
    assert_eq!(PathBuf::from(&env.value), share.join("models"));

    let LaunchEntity::Include(include) = &description.entities[1] else {
        panic!("expected include");
    };
    assert_eq!(include.source, simulator_share.join("launch/ign_gazebo.launch.py"));
    assert_eq!(include.arguments.len(), 1);
    assert_eq!(include.arguments[0].0, "gz_args");
    assert_eq!(
        include.arguments[0].1,
        format!("-r -v 1 {}", share.join("worlds/house_world.sdf").display())
    );

    let bridge = description.nodes().next().unwrap();
    assert_eq!(
        bridge.parameters["config_file"].to_string(),
        share.join("config/ros_gz_x3_bridge.yaml").display().to_string()
    );

    let rviz = description.node("rviz2").unwrap();
    assert_eq!(
        rviz.arguments,
        vec![
            "-d".to_string(),
            share.join("rviz/view.rviz").display().to_string()
        ]
    );

    assert!(description.missing_resources().is_empty());
}

#[test]
fn test_static_transform_arguments() {
    let (prefix, _, _) = full_install();
    let index = AmentIndex::new([prefix.path()]);
    let description = build_launch_description(&BringupConfig::default(), &index).unwrap();

    let static_tf = description.node("static_tf_camera").unwrap();
    assert_eq!(
        static_tf.arguments,
        vec![
            "0.0",
            "0.0",
            "0.1",
            "0.0",
            "0.0",
            "0.0",
            "x3/X3/base_link",
            "camera_frame_rgb"
        ]
    );
}

#[test]
fn test_octomap_remapping() {
    let (prefix, _, _) = full_install();
    let index = AmentIndex::new([prefix.path()]);
    let description = build_launch_description(&BringupConfig::default(), &index).unwrap();

    let octomap = description.node("octomap_server").unwrap();
    assert_eq!(
        octomap.remappings,
        vec![("cloud_in".to_string(), "/camera/points".to_string())]
    );

    let params: Vec<_> = octomap
        .parameters
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    assert_eq!(
        params,
        vec!["resolution=0.1", "frame_id=odom", "sensor_model.max_range=5.0"]
    );
}

#[test]
fn test_missing_either_package_fails() {
    for installed in [PACKAGE, SIMULATOR_PACKAGE] {
        let prefix = tempfile::tempdir().unwrap();
        install_package(prefix.path(), installed);
        let index = AmentIndex::new([prefix.path()]);

        let result = build_launch_description(&BringupConfig::default(), &index);
        let missing = if installed == PACKAGE {
            SIMULATOR_PACKAGE
        } else {
            PACKAGE
        };
        assert!(
            matches!(&result, Err(IndexError::PackageNotFound(p)) if p == missing),
            "expected '{}' to be missing, got {:?}",
            missing,
            result
        );
    }
}

#[test]
fn test_missing_resources_are_reported() {
    let prefix = tempfile::tempdir().unwrap();
    let share = install_package(prefix.path(), PACKAGE);
    install_package(prefix.path(), SIMULATOR_PACKAGE);
    touch(&share.join("rviz/view.rviz"));

    let index = AmentIndex::new([prefix.path()]);
    let description = build_launch_description(&BringupConfig::default(), &index).unwrap();

    let missing = description.missing_resources();
    assert_eq!(missing.len(), 4);
    assert!(!missing.contains(&share.join("rviz/view.rviz").as_path()));
}

#[test]
fn test_yaml_launch_file_round_trip() {
    let (prefix, _, _) = full_install();
    let index = AmentIndex::new([prefix.path()]);
    let description = build_launch_description(&BringupConfig::default(), &index).unwrap();

    let out = prefix.path().join("bringup_house_ign.launch.yaml");
    std::fs::write(&out, description.to_launch_yaml().unwrap()).unwrap();

    let frontend = LaunchFrontend::from_file(&out).unwrap();
    assert_eq!(frontend, LaunchFrontend::from(&description));
    assert_eq!(frontend.launch.len(), 6);

    let static_tf = frontend.launch[5].node.as_ref().unwrap();
    assert_eq!(
        static_tf.args.as_deref(),
        Some("0.0 0.0 0.1 0.0 0.0 0.0 x3/X3/base_link camera_frame_rgb")
    );
}

#[test]
fn test_generate_from_environment() {
    let (prefix, share, _) = full_install();
    let underlay = tempfile::tempdir().unwrap();
    let value = std::env::join_paths([prefix.path(), underlay.path()]).unwrap();
    std::env::set_var("AMENT_PREFIX_PATH", &value);

    let description = generate_launch_description().unwrap();
    let env = description.environment().next().unwrap();
    assert_eq!(PathBuf::from(&env.value), share.join("models"));
}
