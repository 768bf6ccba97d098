//! Configuration structures and YAML parsing.
//!
//! The config file carries the single top-level CIDR block, the target
//! region, and the names used for every provisioned resource. Naming and
//! routing sections are optional and fall back to defaults.

use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::net::{AddressBlock, MalformedAddressBlock};

/// Top-level configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// The network being planned: one CIDR block and one region
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NetworkConfig {
    /// Top-level CIDR block the whole topology is carved out of
    pub cidr_block: String,
    /// Region identifier, e.g. "us-east-1"
    pub region: String,
}

/// Names for the provisioned resources.
///
/// Subnet and association names get the per-role ordinal appended, so
/// `public-subnet-` becomes `public-subnet-0`, `public-subnet-1`, ...
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NamingConfig {
    pub vpc: String,
    pub internet_gateway: String,
    pub public_route_table: String,
    pub private_route_table: String,
    pub public_subnet_prefix: String,
    pub private_subnet_prefix: String,
    pub public_association_prefix: String,
    pub private_association_prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            vpc: "main-vpc".to_string(),
            internet_gateway: "main-igw".to_string(),
            public_route_table: "public-rt".to_string(),
            private_route_table: "private-rt".to_string(),
            public_subnet_prefix: "public-subnet-".to_string(),
            private_subnet_prefix: "private-subnet-".to_string(),
            public_association_prefix: "public-subnet-asso-".to_string(),
            private_association_prefix: "private-subnet-asso-".to_string(),
        }
    }
}

/// Routing settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RoutingConfig {
    /// Destination of the default route on the public route table
    pub destination_cidr_block: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            destination_cidr_block: "0.0.0.0/0".to_string(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid network configuration: {0}")]
    InvalidNetwork(String),
    #[error("Invalid naming configuration: {0}")]
    InvalidNaming(String),
    #[error("Invalid routing configuration: {0}")]
    InvalidRouting(String),
    #[error(transparent)]
    MalformedCidr(#[from] MalformedAddressBlock),
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.network.region.is_empty() {
            return Err(ValidationError::InvalidNetwork(
                "region cannot be empty".to_string(),
            ));
        }
        // Both CIDR fields must parse; the source block is parsed again by
        // the caller, this just surfaces the failure at load time.
        self.network.cidr_block.parse::<AddressBlock>()?;
        self.routing
            .destination_cidr_block
            .parse::<AddressBlock>()
            .map_err(|e| ValidationError::InvalidRouting(e.to_string()))?;

        let names = [
            ("vpc", &self.naming.vpc),
            ("internet_gateway", &self.naming.internet_gateway),
            ("public_route_table", &self.naming.public_route_table),
            ("private_route_table", &self.naming.private_route_table),
            ("public_subnet_prefix", &self.naming.public_subnet_prefix),
            ("private_subnet_prefix", &self.naming.private_subnet_prefix),
            (
                "public_association_prefix",
                &self.naming.public_association_prefix,
            ),
            (
                "private_association_prefix",
                &self.naming.private_association_prefix,
            ),
        ];
        for (field, value) in names {
            if value.is_empty() {
                return Err(ValidationError::InvalidNaming(format!(
                    "{} cannot be empty",
                    field
                )));
            }
        }

        Ok(())
    }

    /// Parse the source address block from the configured CIDR text
    pub fn source_block(&self) -> Result<AddressBlock, MalformedAddressBlock> {
        self.network.cidr_block.parse()
    }
}

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)?;
    let config: Config = serde_yaml::from_reader(file)?;

    config.validate()?;

    Ok(config)
}
