//! Quadcopter bring-up CLI
//!
//! Usage:
//!   quadcopter_bringup
//!   quadcopter_bringup -f yaml -o bringup_house_ign.launch.yaml
//!   quadcopter_bringup -c configs/house.yaml -p install/easynav_quadcopter_example --validate

use quadcopter_bringup::{
    build_launch_description, AmentIndex, BringupArgs, BringupConfig, LaunchDescription,
    OutputFormat,
};

fn main() {
    let args: BringupArgs = argh::from_env();

    // Initialize logging
    let env = env_logger::Env::default().default_filter_or(args.log_filter());
    env_logger::init_from_env(env);

    let index = if args.prefix.is_empty() {
        match AmentIndex::from_env() {
            Ok(index) => index,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
    } else {
        AmentIndex::new(args.prefix.iter().cloned())
    };

    // Package listing mode
    if args.list_packages {
        match index.packages() {
            Ok(packages) => {
                for package in packages {
                    println!("{}", package);
                }
            }
            Err(e) => {
                log::error!("Failed to list packages: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading bring-up config: {}", path.display());
            match BringupConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Failed to load config: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => BringupConfig::default(),
    };

    let description = match build_launch_description(&config, &index) {
        Ok(description) => description,
        Err(e) => {
            log::error!("Failed to build launch description: {}", e);
            std::process::exit(1);
        }
    };

    // Validate only mode
    if args.validate {
        validate(&description);
        return;
    }

    let rendered = match args.format {
        OutputFormat::Plan => Ok(description.to_string()),
        OutputFormat::Yaml => description.to_launch_yaml(),
        OutputFormat::Json => description.to_json(),
    };
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(e) => {
            log::error!("Failed to render launch description: {}", e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, rendered) {
                log::error!("Failed to write '{}': {}", path.display(), e);
                std::process::exit(1);
            }
            log::info!("Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }
}

fn validate(description: &LaunchDescription) {
    let missing = description.missing_resources();

    let verdict = if missing.is_empty() {
        "valid"
    } else {
        "incomplete"
    };

    println!("Launch description is {}", verdict);
    println!("  Entities: {}", description.len());
    println!("  Nodes: {}", description.nodes().count());
    println!(
        "  Resources: {} ({} missing)",
        description.resources.len(),
        missing.len()
    );

    if !missing.is_empty() {
        for path in missing {
            log::error!("Missing resource: {}", path.display());
        }
        std::process::exit(1);
    }
}
