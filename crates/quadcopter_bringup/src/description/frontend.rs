//! ROS 2 YAML launch frontend
//!
//! Renders a [`LaunchDescription`] into the YAML launch format understood by
//! `ros2 launch`:
//!
//! ```yaml
//! launch:
//! - set_env:
//!     name: IGN_GAZEBO_RESOURCE_PATH
//!     value: /ws/install/easynav_quadcopter_example/share/easynav_quadcopter_example/models
//! - node:
//!     pkg: rviz2
//!     exec: rviz2
//!     name: rviz2
//!     output: screen
//!     args: -d /ws/install/.../rviz/view.rviz
//! ```

use super::entity::{LaunchDescription, LaunchEntity, NodeDescription, ParameterValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root of a YAML launch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchFrontend {
    pub launch: Vec<FrontendAction>,
}

/// One list item under `launch:`; exactly one field is set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontendAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_env: Option<SetEnvTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<IncludeTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEnvTag {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeTag {
    pub file: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arg: Vec<ArgTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgTag {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTag {
    pub pkg: String,
    pub exec: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Space separated argument string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub param: Vec<ParamTag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remap: Vec<RemapTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamTag {
    pub name: String,
    pub value: ParameterValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapTag {
    pub from: String,
    pub to: String,
}

impl FrontendAction {
    fn tag_count(&self) -> usize {
        [
            self.set_env.is_some(),
            self.include.is_some(),
            self.node.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

impl From<&NodeDescription> for NodeTag {
    fn from(node: &NodeDescription) -> Self {
        let args = if node.arguments.is_empty() {
            None
        } else {
            Some(
                node.arguments
                    .iter()
                    .map(|arg| quote_argument(arg))
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        };

        Self {
            pkg: node.package.clone(),
            exec: node.executable.clone(),
            name: node.name.clone(),
            output: Some(node.output.as_str().to_string()),
            args,
            param: node
                .parameters
                .iter()
                .map(|(name, value)| ParamTag {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            remap: node
                .remappings
                .iter()
                .map(|(from, to)| RemapTag {
                    from: from.clone(),
                    to: to.clone(),
                })
                .collect(),
        }
    }
}

impl From<&LaunchEntity> for FrontendAction {
    fn from(entity: &LaunchEntity) -> Self {
        match entity {
            LaunchEntity::SetEnvironment(env) => FrontendAction {
                set_env: Some(SetEnvTag {
                    name: env.name.clone(),
                    value: env.value.clone(),
                }),
                ..Default::default()
            },
            LaunchEntity::Include(include) => FrontendAction {
                include: Some(IncludeTag {
                    file: include.source.to_string_lossy().into_owned(),
                    arg: include
                        .arguments
                        .iter()
                        .map(|(name, value)| ArgTag {
                            name: name.clone(),
                            value: value.clone(),
                        })
                        .collect(),
                }),
                ..Default::default()
            },
            LaunchEntity::Node(node) => FrontendAction {
                node: Some(NodeTag::from(node)),
                ..Default::default()
            },
        }
    }
}

impl From<&LaunchDescription> for LaunchFrontend {
    fn from(description: &LaunchDescription) -> Self {
        Self {
            launch: description.iter().map(FrontendAction::from).collect(),
        }
    }
}

impl LaunchFrontend {
    /// Parse a YAML launch document
    pub fn parse(yaml: &str) -> Result<Self, RenderError> {
        let frontend: LaunchFrontend = serde_yaml::from_str(yaml)?;
        frontend.validate()?;
        Ok(frontend)
    }

    /// Load a YAML launch file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RenderError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Check that every action carries exactly one tag
    pub fn validate(&self) -> Result<(), RenderError> {
        for (index, action) in self.launch.iter().enumerate() {
            if action.tag_count() != 1 {
                return Err(RenderError::InvalidAction(index));
            }
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, RenderError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl LaunchDescription {
    /// Render as a ROS 2 YAML launch file
    pub fn to_launch_yaml(&self) -> Result<String, RenderError> {
        LaunchFrontend::from(self).to_yaml()
    }

    /// Serialize the description model as pretty JSON
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Single-quote arguments the launcher would otherwise split
fn quote_argument(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

/// Errors that can occur when rendering or reading launch documents
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read launch file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Launch action #{0} must contain exactly one of 'set_env', 'include' or 'node'")]
    InvalidAction(usize),
}
