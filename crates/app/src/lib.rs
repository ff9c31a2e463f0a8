//! # cheapswitch-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SwitchDevice` — trigger CRUD and switch control on one device
//!   - `DeviceConnector` — open a device by host, optionally as a dry run
//!   - `PriceSource` — the cheapest hours of a period
//! - Define the **driving/inbound** use-cases in `ScheduleService`:
//!   show, plan, enable, disable and renew the device schedule
//! - Provide the bounded retry used when the price source is unavailable
//!
//! ## Dependency rule
//! Depends on `cheapswitch-domain` only (plus `tokio::time` for retry pauses).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod net;
pub mod ports;
pub mod retry;
pub mod services;
