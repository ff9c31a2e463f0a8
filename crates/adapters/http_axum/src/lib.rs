//! # cheapswitch-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the control endpoints (`/enableSchedules`, `/disableSchedules`,
//!   `/renewSchedules`, `/showSchedules`, `/getInput`)
//! - Serve the renewal callback the device's refresh trigger hits every night
//! - Resolve which device a request addresses (`ip` query parameter or the
//!   configured default) and whether it is a dry run (`pretend`)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `cheapswitch-app` (for port traits and the schedule service)
//! and `cheapswitch-domain` (for response types). Never leaks axum types into
//! the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
