//! Command-line interface for quadcopter_bringup

use argh::FromArgs;
use std::path::PathBuf;

/// Launch description for the X3 quadcopter house-world simulation
#[derive(FromArgs, Debug)]
pub struct BringupArgs {
    /// bring-up configuration YAML (default: built-in house world)
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    /// install prefix to search for packages, repeatable (default: AMENT_PREFIX_PATH)
    #[argh(option, short = 'p')]
    pub prefix: Vec<PathBuf>,

    /// output format: plan, yaml, json (default: plan)
    #[argh(option, short = 'f', default = "OutputFormat::Plan", from_str_fn(parse_format))]
    pub format: OutputFormat,

    /// write output to this file instead of stdout
    #[argh(option, short = 'o')]
    pub output: Option<PathBuf>,

    /// check that every referenced resource is installed and exit
    #[argh(switch)]
    pub validate: bool,

    /// list packages registered in the install prefixes and exit
    #[argh(switch)]
    pub list_packages: bool,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    pub log_level: String,
}

/// Rendering of the launch description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable launch plan
    Plan,
    /// ROS 2 YAML launch file
    Yaml,
    /// Description model as JSON
    Json,
}

/// Parse output format name
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "plan" => Ok(OutputFormat::Plan),
        "yaml" | "yml" => Ok(OutputFormat::Yaml),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!(
            "Invalid format '{}'. Expected 'plan', 'yaml' or 'json'",
            other
        )),
    }
}

impl BringupArgs {
    /// Log filter for env_logger; unknown levels fall back to info
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.to_lowercase().as_str() {
            "error" => "error",
            "warn" => "warn",
            "debug" => "debug",
            "trace" => "trace",
            _ => "info",
        }
    }
}
