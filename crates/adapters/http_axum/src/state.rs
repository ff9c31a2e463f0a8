//! Shared application state for axum handlers.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use cheapswitch_app::ports::{DeviceConnector, PriceSource};
use cheapswitch_app::retry::RetryPolicy;
use cheapswitch_app::services::schedule_service::ScheduleService;

/// Application state shared across all axum handlers.
///
/// Generic over the price source and device connector to avoid dynamic
/// dispatch. `Clone` is implemented manually so neither needs to be `Clone`.
pub struct AppState<P, C> {
    /// Schedule use-cases.
    pub schedule_service: Arc<ScheduleService<P>>,
    /// Opens the device a request addresses.
    pub connector: Arc<C>,
    /// Device addressed when a request names none.
    pub default_device: Option<String>,
    /// Background retry of renewals hit by a price provider outage.
    pub retry_policy: RetryPolicy,
    /// Set while a background renewal is retrying.
    pub retry_pending: Arc<AtomicBool>,
}

impl<P, C> Clone for AppState<P, C> {
    fn clone(&self) -> Self {
        Self {
            schedule_service: Arc::clone(&self.schedule_service),
            connector: Arc::clone(&self.connector),
            default_device: self.default_device.clone(),
            retry_policy: self.retry_policy,
            retry_pending: Arc::clone(&self.retry_pending),
        }
    }
}

impl<P, C> AppState<P, C>
where
    P: PriceSource + 'static,
    C: DeviceConnector + 'static,
{
    pub fn new(
        schedule_service: ScheduleService<P>,
        connector: C,
        default_device: Option<String>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            schedule_service: Arc::new(schedule_service),
            connector: Arc::new(connector),
            default_device,
            retry_policy,
            retry_pending: Arc::new(AtomicBool::new(false)),
        }
    }
}
