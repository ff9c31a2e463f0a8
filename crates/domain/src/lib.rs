//! # cheapswitch-domain
//!
//! Pure domain model for the cheapswitch price-driven switch scheduler.
//!
//! ## Responsibilities
//! - Foundational types: trigger identifiers, error conventions, the resolution day
//! - Define **Triggers** (device-resident cron jobs and their actions)
//! - Define **Intervals** (spans during which the switch should be on)
//! - Resolve a trigger's timespec to an instant on the resolution day
//! - Pair independently stored on/off triggers back into intervals
//! - Encode intervals into the device's trigger list, plus the daily refresh trigger
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Every operation is a pure function of its inputs; the caller supplies the
//! resolution day explicitly.

pub mod error;
pub mod id;
pub mod time;

pub mod assemble;
pub mod encode;
pub mod interval;
pub mod pairing;
pub mod price;
pub mod refresh;
pub mod timespec;
pub mod trigger;
