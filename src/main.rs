use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::PathBuf;

mod config;
mod net;
mod provision;
mod topology;

use provision::{provision_topology, ManifestProvisioner};
use topology::TopologyAllocator;

/// Configuration utility for planning VPC subnet topologies
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Output directory for the subnet plan and resource manifest
    #[arg(short, long, default_value = "plan_output")]
    output: PathBuf,

    /// Emit the subnet plan only, without running the provisioning phase
    #[arg(long)]
    plan_only: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting VpcPlan");
    info!("Configuration file: {:?}", args.config);
    info!("Output directory: {:?}", args.output);

    let config = config::load_config(&args.config)?;
    let source = config.source_block()?;

    // Phase 1: pure planning.
    let allocator = TopologyAllocator::default();
    let plan = allocator.plan(source, &config.network.region)?;
    info!(
        "Planned {} subnets from {} in region {}",
        plan.len(),
        source,
        config.network.region
    );

    fs::create_dir_all(&args.output).wrap_err_with(|| {
        format!(
            "Failed to create output directory '{}'",
            args.output.display()
        )
    })?;

    let plan_path = args.output.join("subnet_plan.yaml");
    let plan_yaml = serde_yaml::to_string(&plan)?;
    fs::write(&plan_path, plan_yaml)
        .wrap_err_with(|| format!("Failed to write subnet plan '{}'", plan_path.display()))?;
    info!("Wrote subnet plan: {:?}", plan_path);

    if args.plan_only {
        info!("Plan-only mode, skipping provisioning phase");
        return Ok(());
    }

    // Phase 2: execution. The manifest provisioner records what a cloud
    // provisioner would create.
    let mut provisioner = ManifestProvisioner::new();
    let network = provision_topology(&mut provisioner, &config, &plan)?;
    info!(
        "Provisioned VPC {} with {} subnets",
        network.vpc,
        network.subnets.len()
    );

    let manifest_path = args.output.join("vpc_manifest.json");
    let manifest = provisioner.into_manifest();
    fs::write(&manifest_path, manifest.to_json()?).wrap_err_with(|| {
        format!(
            "Failed to write resource manifest '{}'",
            manifest_path.display()
        )
    })?;
    info!("Wrote resource manifest: {:?}", manifest_path);

    info!("Topology planning completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(&["vpcplan", "--config", "test.yaml"]);

        assert_eq!(args.config, PathBuf::from("test.yaml"));
        assert_eq!(args.output, PathBuf::from("plan_output"));
        assert!(!args.plan_only);
    }

    #[test]
    fn test_plan_only_flag() {
        let args = Args::parse_from(&[
            "vpcplan",
            "--config",
            "test.yaml",
            "--output",
            "out",
            "--plan-only",
        ]);

        assert!(args.plan_only);
        assert_eq!(args.output, PathBuf::from("out"));
    }
}
