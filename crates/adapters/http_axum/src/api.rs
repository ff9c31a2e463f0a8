//! Control endpoint handler modules.

pub mod input;
pub mod query;
#[allow(clippy::missing_errors_doc)]
pub mod schedules;

use axum::Router;
use axum::routing::get;

use cheapswitch_app::ports::{DeviceConnector, PriceSource};

use crate::error::ApiError;
use crate::state::AppState;
use query::ScheduleQuery;

/// Build the control routes.
pub fn routes<P, C>() -> Router<AppState<P, C>>
where
    P: PriceSource + 'static,
    C: DeviceConnector + 'static,
{
    Router::new()
        .route("/enableSchedules", get(schedules::enable::<P, C>))
        .route("/disableSchedules", get(schedules::disable::<P, C>))
        .route("/renewSchedules", get(schedules::renew::<P, C>))
        .route("/showSchedules", get(schedules::show::<P, C>))
        .route("/getInput", get(input::get::<P, C>))
}

/// Open the device `query` addresses.
pub(crate) fn connect<P, C: DeviceConnector>(
    state: &AppState<P, C>,
    query: &ScheduleQuery,
) -> Result<C::Device, ApiError> {
    let host = query.device_host(state.default_device.as_deref())?;
    let dry_run = query.dry_run();
    tracing::debug!(%host, dry_run, "addressing device");
    Ok(state.connector.connect(&host, dry_run))
}
