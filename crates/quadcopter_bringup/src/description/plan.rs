//! Human-readable launch plan

use super::entity::{LaunchDescription, LaunchEntity, NodeDescription};
use std::fmt;

impl NodeDescription {
    /// Equivalent `ros2 run` command line for this node
    pub fn command_line(&self) -> Vec<String> {
        let mut cmd = vec![
            "ros2".to_string(),
            "run".to_string(),
            self.package.clone(),
            self.executable.clone(),
        ];
        cmd.extend(self.arguments.iter().cloned());

        if self.name.is_none() && self.remappings.is_empty() && self.parameters.is_empty() {
            return cmd;
        }

        cmd.push("--ros-args".to_string());
        if let Some(name) = &self.name {
            cmd.push("-r".to_string());
            cmd.push(format!("__node:={}", name));
        }
        for (from, to) in &self.remappings {
            cmd.push("-r".to_string());
            cmd.push(format!("{}:={}", from, to));
        }
        for (key, value) in &self.parameters {
            cmd.push("-p".to_string());
            cmd.push(format!("{}:={}", key, value));
        }

        cmd
    }
}

/// Display the launch description as a numbered plan
impl fmt::Display for LaunchDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Launch Plan")?;
        writeln!(f, "===========")?;
        writeln!(f)?;

        writeln!(f, "Entities (in declaration order):")?;
        for (i, entity) in self.entities.iter().enumerate() {
            writeln!(f)?;
            match entity {
                LaunchEntity::SetEnvironment(env) => {
                    writeln!(f, "  {}. {} {}", i + 1, entity.kind(), env.name)?;
                    writeln!(f, "     Value: {}", env.value)?;
                }
                LaunchEntity::Include(include) => {
                    writeln!(
                        f,
                        "  {}. {} {}",
                        i + 1,
                        entity.kind(),
                        include.source.display()
                    )?;
                    for (name, value) in &include.arguments {
                        writeln!(f, "     Argument: {}:={}", name, value)?;
                    }
                }
                LaunchEntity::Node(node) => {
                    writeln!(
                        f,
                        "  {}. {} {} [{}/{}]",
                        i + 1,
                        entity.kind(),
                        node.display_name(),
                        node.package,
                        node.executable
                    )?;
                    writeln!(f, "     Command: {}", node.command_line().join(" "))?;
                    writeln!(f, "     Output: {}", node.output.as_str())?;
                }
            }
        }

        if !self.resources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Resources:")?;
            for path in &self.resources {
                writeln!(f, "  {}", path.display())?;
            }
        }

        Ok(())
    }
}
