//! Schedule control handlers.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use cheapswitch_app::ports::{DeviceConnector, PriceSource};
use cheapswitch_domain::interval::Interval;
use cheapswitch_domain::trigger::SwitchIntent;

use crate::api::connect;
use crate::api::query::ScheduleQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the enable endpoint.
pub enum EnableResponse {
    Enabled(SwitchIntent),
}

impl IntoResponse for EnableResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Enabled(intent) => format!("Schedule is on, switch is {intent}\n").into_response(),
        }
    }
}

/// Possible responses from the disable endpoint.
pub enum DisableResponse {
    Disabled,
}

impl IntoResponse for DisableResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Disabled => "Schedule is off\n".into_response(),
        }
    }
}

/// Possible responses from the renew endpoint.
pub enum RenewResponse {
    Renewed(Json<Vec<Interval>>),
    /// The price source is down; the renewal continues in the background.
    Retrying(String),
}

impl IntoResponse for RenewResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Renewed(json) => json.into_response(),
            Self::Retrying(reason) => (StatusCode::ACCEPTED, reason).into_response(),
        }
    }
}

/// Possible responses from the show endpoint.
pub enum ShowResponse {
    Ok(Json<Vec<Interval>>),
}

impl IntoResponse for ShowResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /enableSchedules`
pub async fn enable<P, C>(
    State(state): State<AppState<P, C>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<EnableResponse, ApiError>
where
    P: PriceSource + 'static,
    C: DeviceConnector + 'static,
{
    let device = connect(&state, &query)?;
    let service = &state.schedule_service;
    let intent = service.enable(&device, service.now()).await?;
    Ok(EnableResponse::Enabled(intent))
}

/// `GET /disableSchedules`
pub async fn disable<P, C>(
    State(state): State<AppState<P, C>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<DisableResponse, ApiError>
where
    P: PriceSource + 'static,
    C: DeviceConnector + 'static,
{
    let device = connect(&state, &query)?;
    state.schedule_service.disable(&device).await?;
    Ok(DisableResponse::Disabled)
}

/// `GET /renewSchedules`
///
/// Called nightly by the device's refresh trigger. When the price source is
/// transiently unavailable the renewal is retried in the background and the
/// request answers `202 Accepted`. At most one background retry runs at a time.
pub async fn renew<P, C>(
    State(state): State<AppState<P, C>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<RenewResponse, ApiError>
where
    P: PriceSource + 'static,
    C: DeviceConnector + 'static,
{
    let request = query.plan_request(false)?;
    let device = connect(&state, &query)?;
    let service = &state.schedule_service;

    match service
        .renew(&device, request, service.now(), query.override_window())
        .await
    {
        Ok(intervals) => Ok(RenewResponse::Renewed(Json(intervals))),
        Err(err) if err.is_transient() => {
            if state.retry_pending.swap(true, Ordering::AcqRel) {
                tracing::info!(error = %err, "background renewal already pending");
                return Ok(RenewResponse::Retrying(format!("{err}, already retrying")));
            }
            tracing::warn!(error = %err, "price source unavailable, retrying in background");
            let service = Arc::clone(&state.schedule_service);
            let pending = Arc::clone(&state.retry_pending);
            let policy = state.retry_policy;
            tokio::spawn(async move {
                match service.apply_with_retry(&device, request, policy).await {
                    Ok(intervals) => {
                        tracing::info!(intervals = intervals.len(), "schedule renewed after retry");
                    }
                    Err(err) => tracing::error!(error = %err, "giving up on schedule renewal"),
                }
                pending.store(false, Ordering::Release);
            });
            Ok(RenewResponse::Retrying(format!("{err}, retrying")))
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /showSchedules`
///
/// Decodes the device's schedule, or computes one without touching the device
/// when `tomorrow` or `recalc` is set.
pub async fn show<P, C>(
    State(state): State<AppState<P, C>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<ShowResponse, ApiError>
where
    P: PriceSource + 'static,
    C: DeviceConnector + 'static,
{
    let service = &state.schedule_service;
    let intervals = if query.tomorrow() || query.recalc() {
        let request = query.plan_request(query.tomorrow())?;
        service.plan(request, service.now()).await?
    } else {
        let device = connect(&state, &query)?;
        service.show(&device, service.now()).await?
    };
    Ok(ShowResponse::Ok(Json(intervals)))
}
