//! # cheapswitch-adapter-shelly-rpc
//!
//! Device adapter for Shelly Plus switches, speaking the device's HTTP RPC
//! interface (`http://<host>/rpc/<Method>`).
//!
//! ## Responsibilities
//! - List, create, update and delete the device's schedule jobs
//! - Set the switch output
//! - Read the physical input that gates the schedule
//!
//! ## Dry run
//! A device opened with `dry_run` still performs reads, but only logs the
//! mutating calls it would have made.
//!
//! ## Dependency rule
//! Implements the `SwitchDevice` and `DeviceConnector` ports of
//! `cheapswitch-app`. Never leaks reqwest types past the port boundary.

pub mod client;
pub mod error;

pub use client::{ShellyConnector, ShellyRpc};
pub use error::ShellyError;
