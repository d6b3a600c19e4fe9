//! Launch entity definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Ordered sequence of launch entities handed to the launcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchDescription {
    /// Entities in declaration order (a startup hint for the launcher)
    pub entities: Vec<LaunchEntity>,

    /// Installed files and directories the entities refer to
    #[serde(default)]
    pub resources: Vec<PathBuf>,
}

/// A single launch declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LaunchEntity {
    /// Set an environment variable for every process started afterwards
    SetEnvironment(SetEnvironment),
    /// Include another launch file with forwarded arguments
    Include(IncludeLaunch),
    /// Start a ROS 2 node
    Node(NodeDescription),
}

/// Environment variable assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEnvironment {
    pub name: String,
    pub value: String,
}

/// Inclusion of another launch file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeLaunch {
    /// Path of the included launch file
    pub source: PathBuf,
    /// Launch arguments forwarded to the included file, in order
    #[serde(default)]
    pub arguments: Vec<(String, String)>,
}

/// Process descriptor for a ROS 2 node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Package providing the executable
    pub package: String,

    /// Executable name within the package
    pub executable: String,

    /// Node name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Where the node's output goes
    #[serde(default)]
    pub output: OutputMode,

    /// Parameters (ordered map for deterministic rendering)
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterValue>,

    /// Raw command line arguments
    #[serde(default)]
    pub arguments: Vec<String>,

    /// Topic remappings as (from, to) pairs
    #[serde(default)]
    pub remappings: Vec<(String, String)>,
}

/// Output destination for node stdout/stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Log files only
    #[default]
    Log,
    /// Log files and the launcher's terminal
    Screen,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Log => "log",
            OutputMode::Screen => "screen",
        }
    }
}

/// Parameter values can be booleans, integers, floats, or strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the decimal point on whole numbers (5.0, not 5)
            ParameterValue::Float(v) => write!(f, "{:?}", v),
            ParameterValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<&Path> for ParameterValue {
    fn from(value: &Path) -> Self {
        ParameterValue::String(value.to_string_lossy().into_owned())
    }
}

impl NodeDescription {
    /// Create a node descriptor for `package`/`executable`
    pub fn new(package: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            executable: executable.into(),
            name: None,
            output: OutputMode::default(),
            parameters: IndexMap::new(),
            arguments: Vec::new(),
            remappings: Vec::new(),
        }
    }

    /// Set the node name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the output mode
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Add a parameter
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Append command line arguments
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Add a topic remapping
    pub fn with_remapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.remappings.push((from.into(), to.into()));
        self
    }

    /// Name shown in logs and plans: the node name, or the executable
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.executable)
    }
}

impl IncludeLaunch {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            arguments: Vec::new(),
        }
    }

    /// Forward a launch argument to the included file
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }
}

impl LaunchEntity {
    /// Short tag used in plans and logs
    pub fn kind(&self) -> &'static str {
        match self {
            LaunchEntity::SetEnvironment(_) => "set_env",
            LaunchEntity::Include(_) => "include",
            LaunchEntity::Node(_) => "node",
        }
    }
}

impl LaunchDescription {
    pub fn new(entities: Vec<LaunchEntity>) -> Self {
        Self {
            entities,
            resources: Vec::new(),
        }
    }

    /// Record the installed resources the entities depend on
    pub fn with_resources(mut self, resources: Vec<PathBuf>) -> Self {
        self.resources = resources;
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LaunchEntity> {
        self.entities.iter()
    }

    /// All node descriptors, in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeDescription> {
        self.entities.iter().filter_map(|entity| match entity {
            LaunchEntity::Node(node) => Some(node),
            _ => None,
        })
    }

    /// Find a node by its name
    pub fn node(&self, name: &str) -> Option<&NodeDescription> {
        self.nodes().find(|node| node.name.as_deref() == Some(name))
    }

    /// Environment assignments, in declaration order
    pub fn environment(&self) -> impl Iterator<Item = &SetEnvironment> {
        self.entities.iter().filter_map(|entity| match entity {
            LaunchEntity::SetEnvironment(env) => Some(env),
            _ => None,
        })
    }

    /// Resources that do not exist on this host
    pub fn missing_resources(&self) -> Vec<&Path> {
        self.resources
            .iter()
            .map(PathBuf::as_path)
            .filter(|path| !path.exists())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_parameters_keep_decimal_point() {
        assert_eq!(ParameterValue::from(5.0).to_string(), "5.0");
        assert_eq!(ParameterValue::from(0.1).to_string(), "0.1");
        assert_eq!(ParameterValue::from(3_i64).to_string(), "3");
        assert_eq!(ParameterValue::from("odom").to_string(), "odom");
    }

    #[test]
    fn test_node_builder_preserves_parameter_order() {
        let node = NodeDescription::new("octomap_server", "octomap_server_node")
            .with_parameter("resolution", 0.1)
            .with_parameter("frame_id", "odom")
            .with_parameter("sensor_model.max_range", 5.0);

        let keys: Vec<_> = node.parameters.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["resolution", "frame_id", "sensor_model.max_range"]);
        assert_eq!(node.output, OutputMode::Log);
        assert_eq!(node.display_name(), "octomap_server_node");
    }

    #[test]
    fn test_node_lookup_by_name() {
        let description = LaunchDescription::new(vec![
            LaunchEntity::SetEnvironment(SetEnvironment {
                name: "FOO".to_string(),
                value: "bar".to_string(),
            }),
            LaunchEntity::Node(NodeDescription::new("rviz2", "rviz2").with_name("rviz2")),
        ]);

        assert_eq!(description.len(), 2);
        assert_eq!(description.nodes().count(), 1);
        assert!(description.node("rviz2").is_some());
        assert!(description.node("missing").is_none());
        assert_eq!(description.environment().next().unwrap().value, "bar");
    }

    #[test]
    fn test_missing_resources() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("view.rviz");
        std::fs::write(&present, "").unwrap();
        let absent = dir.path().join("house_world.sdf");

        let description =
            LaunchDescription::new(Vec::new()).with_resources(vec![present, absent.clone()]);

        assert_eq!(description.missing_resources(), vec![absent.as_path()]);
    }

    #[test]
    fn test_json_is_tagged_by_entity_type() {
        let entity = LaunchEntity::Include(
            IncludeLaunch::new("/opt/ros/share/ros_ign_gazebo/launch/ign_gazebo.launch.py")
                .with_argument("gz_args", "-r world.sdf"),
        );
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "include");
        assert_eq!(json["arguments"][0][0], "gz_args");
    }
}
