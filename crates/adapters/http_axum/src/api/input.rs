//! Device input handler.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use cheapswitch_app::ports::{DeviceConnector, PriceSource};

use crate::api::connect;
use crate::api::query::ScheduleQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the input endpoint.
pub enum InputResponse {
    Ok(bool),
}

impl IntoResponse for InputResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(state) => state.to_string().into_response(),
        }
    }
}

/// `GET /getInput`
///
/// # Errors
///
/// Fails when the device cannot be addressed or read.
pub async fn get<P, C>(
    State(state): State<AppState<P, C>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<InputResponse, ApiError>
where
    P: PriceSource + 'static,
    C: DeviceConnector + 'static,
{
    let device = connect(&state, &query)?;
    let input = state.schedule_service.input_state(&device).await?;
    Ok(InputResponse::Ok(input))
}
