//! # cheapswitch-adapter-prices-http
//!
//! Price adapter asking an HTTP quote provider for the cheapest hours of a
//! period. The provider owns the selection; this crate only transports the
//! request and maps the answer onto [`HourPrice`](cheapswitch_domain::price::HourPrice)
//! values in the caller's timezone.
//!
//! ## Wire format
//! `GET <url>?from=<rfc3339>&to=<rfc3339>&hours=<n>&dark=<n>` answered by
//! `[{"start": "<rfc3339>", "price": <f64>}, ...]`.
//!
//! ## Dependency rule
//! Implements the `PriceSource` port of `cheapswitch-app`.

pub mod error;
pub mod source;

pub use error::PriceError;
pub use source::HttpPriceSource;
