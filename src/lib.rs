//! # VpcPlan - Configuration utility for planning VPC subnet topologies
//!
//! This library plans a virtual network topology — one VPC, public and
//! private subnets spread across availability zones, route tables, and an
//! internet gateway — from a single top-level CIDR block and a small set of
//! named configuration values.
//!
//! ## Overview
//!
//! The hard part is the subnet-partitioning algorithm: given one address
//! block and a target subnet count, deterministically compute a set of
//! non-overlapping, correctly-sized subnet blocks, order them, and assign
//! them to availability zones and to public/private roles without
//! collision. Everything side-effecting sits behind the
//! [`provision::Provisioner`] trait, so planning is pure and testable in
//! isolation and resource creation is a separate execution phase.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: Type-safe configuration structures and YAML parsing
//! - `net`: Address block representation and the partitioning algorithm
//! - `topology`: Region profiles and the subnet plan allocator
//! - `provision`: The provisioner trait, plan executor, and recording
//!   manifest implementation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vpcplan::config::load_config;
//! use vpcplan::provision::{provision_topology, ManifestProvisioner};
//! use vpcplan::topology::TopologyAllocator;
//!
//! # fn main() -> color_eyre::Result<()> {
//! let config = load_config(Path::new("config.yaml"))?;
//! let source = config.source_block()?;
//!
//! // Phase 1: pure planning.
//! let allocator = TopologyAllocator::default();
//! let plan = allocator.plan(source, &config.network.region)?;
//!
//! // Phase 2: execution against a provisioner.
//! let mut provisioner = ManifestProvisioner::new();
//! provision_topology(&mut provisioner, &config, &plan)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Format
//!
//! Configurations use YAML format; only the network section is required:
//!
//! ```yaml
//! network:
//!   cidr_block: "10.0.0.0/16"
//!   region: "us-east-1"
//!
//! naming:
//!   vpc: "main-vpc"
//!   public_subnet_prefix: "public-subnet-"
//!
//! routing:
//!   destination_cidr_block: "0.0.0.0/0"
//! ```
//!
//! ## Error Handling
//!
//! Planning failures are typed (`MalformedAddressBlock`,
//! `InvalidPartitionRequest`, `InsufficientAddressSpace`) and all fatal:
//! re-running the same pure computation with the same input fails the same
//! way, so nothing is retried. Application entry points return
//! `color_eyre::Result` for consistent error reporting.

pub mod config;
pub mod net;
pub mod provision;
pub mod topology;
