//! Price port — selection of the cheapest hours of a period.

use std::future::Future;

use cheapswitch_domain::error::CheapSwitchError;
use cheapswitch_domain::price::HourPrice;
use cheapswitch_domain::time::LocalTime;

/// Source of price-selected hours.
///
/// Which hours are chosen is entirely up to the implementation.
pub trait PriceSource: Send + Sync {
    /// The `hours` cheapest hours in `[from, to)`, with at most `dark_hours`
    /// of them falling in the night.
    ///
    /// Transient unavailability must be reported as
    /// [`CheapSwitchError::Prices`] with `transient: true`.
    fn cheapest_hours(
        &self,
        from: LocalTime,
        to: LocalTime,
        hours: u32,
        dark_hours: u32,
    ) -> impl Future<Output = Result<Vec<HourPrice>, CheapSwitchError>> + Send;
}

impl<T: PriceSource> PriceSource for std::sync::Arc<T> {
    fn cheapest_hours(
        &self,
        from: LocalTime,
        to: LocalTime,
        hours: u32,
        dark_hours: u32,
    ) -> impl Future<Output = Result<Vec<HourPrice>, CheapSwitchError>> + Send {
        (**self).cheapest_hours(from, to, hours, dark_hours)
    }
}
