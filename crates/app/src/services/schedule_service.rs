//! Schedule service — use-cases driving the device from price-selected hours.

use std::net::{IpAddr, SocketAddr};

use chrono::{Duration, Timelike};
use chrono_tz::Tz;
use tokio::sync::Mutex;

use cheapswitch_domain::error::CheapSwitchError;
use cheapswitch_domain::id::TriggerId;
use cheapswitch_domain::interval::{self, Interval};
use cheapswitch_domain::time::{self, LocalDay, LocalTime};
use cheapswitch_domain::trigger::{SwitchIntent, Trigger};
use cheapswitch_domain::{assemble, encode, price, refresh};

use crate::net;
use crate::ports::{PriceSource, SwitchDevice};
use crate::retry::{RetryPolicy, retry};

/// Explicit configuration of the schedule service.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Timezone every timespec is resolved in.
    pub tz: Tz,
    /// Port the refresh trigger calls back on.
    pub callback_port: u16,
    /// Address the refresh trigger calls back on; discovered when absent.
    pub advertise_host: Option<IpAddr>,
    /// Number of hours to schedule when the request does not say.
    pub default_hours: u32,
    /// Maximum night hours when the request does not say.
    pub default_dark_hours: u32,
}

impl ServiceSettings {
    #[must_use]
    pub fn new(tz: Tz, callback_port: u16) -> Self {
        Self {
            tz,
            callback_port,
            advertise_host: None,
            default_hours: 12,
            default_dark_hours: 3,
        }
    }
}

/// Parameters of a schedule computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanRequest {
    /// Hours to select; `None` or zero uses the default.
    pub hours: Option<u32>,
    /// Night hours allowed; `None` uses the default.
    pub dark_hours: Option<u32>,
    /// Shift of the priced day relative to now, in hours.
    pub offset_hours: i64,
}

/// Application service for the device schedule.
///
/// Operations writing to the device hold an exclusive lock for their whole
/// read/delete/create/sync sequence, so two renewals never interleave their
/// calls on the device.
pub struct ScheduleService<P> {
    prices: P,
    settings: ServiceSettings,
    device_lock: Mutex<()>,
}

impl<P: PriceSource> ScheduleService<P> {
    /// Create a new service backed by the given price source.
    pub fn new(prices: P, settings: ServiceSettings) -> Self {
        Self {
            prices,
            settings,
            device_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// The current time in the configured timezone.
    #[must_use]
    pub fn now(&self) -> LocalTime {
        time::now(self.settings.tz)
    }

    /// Decode the schedule currently stored on the device.
    ///
    /// # Errors
    ///
    /// Returns a device error, or a schedule error if the stored triggers do
    /// not pair up.
    #[tracing::instrument(skip(self, device))]
    pub async fn show(
        &self,
        device: &impl SwitchDevice,
        now: LocalTime,
    ) -> Result<Vec<Interval>, CheapSwitchError> {
        let triggers = device.list_triggers().await?;
        Ok(assemble::schedule(&triggers, &LocalDay::of(&now))?)
    }

    /// Compute the intervals for the priced day containing `now + offset`.
    ///
    /// # Errors
    ///
    /// Returns the price source's error, or a schedule error for an
    /// unrepresentable day.
    #[tracing::instrument(skip(self))]
    pub async fn plan(
        &self,
        request: PlanRequest,
        now: LocalTime,
    ) -> Result<Vec<Interval>, CheapSwitchError> {
        let hours = request
            .hours
            .filter(|h| *h > 0)
            .unwrap_or(self.settings.default_hours);
        let dark_hours = request
            .dark_hours
            .unwrap_or(self.settings.default_dark_hours);
        let shifted = now + Duration::hours(request.offset_hours);
        let from = LocalDay::of(&shifted).midnight()?;
        let to = from + Duration::hours(24);

        let selected = self
            .prices
            .cheapest_hours(from, to, hours, dark_hours)
            .await?;
        tracing::info!(hours, dark_hours, selected = selected.len(), "selected hours");
        Ok(price::intervals_from_hours(&selected)?)
    }

    /// Set the switch to what the stored schedule demands, then enable every
    /// switch trigger.
    ///
    /// # Errors
    ///
    /// Returns a device error, or a schedule error if the stored triggers are
    /// not ordered on/off pairs.
    #[tracing::instrument(skip(self, device))]
    pub async fn enable(
        &self,
        device: &impl SwitchDevice,
        now: LocalTime,
    ) -> Result<SwitchIntent, CheapSwitchError> {
        let _guard = self.device_lock.lock().await;
        let triggers = device.list_triggers().await?;
        let intent = sync_switch(device, &triggers, now).await?;
        set_switch_triggers_enabled(device, &triggers, true).await?;
        Ok(intent)
    }

    /// Switch on permanently: turn the switch on and disable every switch trigger.
    ///
    /// # Errors
    ///
    /// Returns a device error.
    #[tracing::instrument(skip(self, device))]
    pub async fn disable(&self, device: &impl SwitchDevice) -> Result<(), CheapSwitchError> {
        let _guard = self.device_lock.lock().await;
        device.set_switch(SwitchIntent::On).await?;
        let triggers = device.list_triggers().await?;
        set_switch_triggers_enabled(device, &triggers, false).await
    }

    /// Replace the device schedule, but only during the first hour of the day
    /// unless `override_window` is set.
    ///
    /// # Errors
    ///
    /// Returns [`CheapSwitchError::OutsideRenewalWindow`] outside the window,
    /// otherwise any error of [`Self::apply`].
    #[tracing::instrument(skip(self, device))]
    pub async fn renew(
        &self,
        device: &impl SwitchDevice,
        request: PlanRequest,
        now: LocalTime,
        override_window: bool,
    ) -> Result<Vec<Interval>, CheapSwitchError> {
        if !override_window && now.hour() != 0 {
            return Err(CheapSwitchError::OutsideRenewalWindow);
        }
        self.apply(device, request, now).await
    }

    /// Compute a fresh schedule and write it to the device.
    ///
    /// The device's input state decides whether the new triggers are enabled.
    /// When they are, the switch is turned off before the old triggers are
    /// dropped and re-synced to the new schedule afterwards. The refresh
    /// trigger is installed last. Waits for any other device write in
    /// progress to finish first.
    ///
    /// # Errors
    ///
    /// Returns the first price, device, codec or address error.
    #[tracing::instrument(skip(self, device))]
    pub async fn apply(
        &self,
        device: &impl SwitchDevice,
        request: PlanRequest,
        now: LocalTime,
    ) -> Result<Vec<Interval>, CheapSwitchError> {
        let _guard = self.device_lock.lock().await;
        let intervals = self.plan(request, now).await?;
        let enabled = device.input_state().await?;
        let schedule = encode::device_schedule(&intervals, enabled);
        tracing::info!(
            hours = interval::total_hours(&intervals),
            jobs = schedule.jobs.len(),
            enabled,
            "encoded schedule"
        );

        if enabled {
            device.set_switch(SwitchIntent::Off).await?;
        }
        device.delete_all_triggers().await?;
        for job in &schedule.jobs {
            device.create_trigger(job).await?;
        }
        if enabled {
            sync_switch(device, &schedule.jobs, now).await?;
        }
        device
            .create_trigger(&refresh::refresh_trigger(self.callback_addr()?))
            .await?;
        Ok(intervals)
    }

    /// [`Self::apply`], retried while the price source is transiently unavailable.
    ///
    /// Later attempts use the time at which they run.
    ///
    /// # Errors
    ///
    /// Returns the last error once retries are exhausted or on a permanent error.
    pub async fn apply_with_retry(
        &self,
        device: &impl SwitchDevice,
        request: PlanRequest,
        policy: RetryPolicy,
    ) -> Result<Vec<Interval>, CheapSwitchError> {
        retry(policy, || self.apply(device, request, self.now())).await
    }

    /// Read the device input that gates the schedule.
    ///
    /// # Errors
    ///
    /// Returns a device error.
    pub async fn input_state(&self, device: &impl SwitchDevice) -> Result<bool, CheapSwitchError> {
        device.input_state().await
    }

    fn callback_addr(&self) -> Result<SocketAddr, CheapSwitchError> {
        let ip = match self.settings.advertise_host {
            Some(ip) => ip,
            None => net::outbound_ip().map_err(CheapSwitchError::OutboundAddress)?,
        };
        Ok(SocketAddr::new(ip, self.settings.callback_port))
    }
}

/// Set the switch to what the on/off-ordered `triggers` demand at `now`.
async fn sync_switch(
    device: &impl SwitchDevice,
    triggers: &[Trigger],
    now: LocalTime,
) -> Result<SwitchIntent, CheapSwitchError> {
    let intervals = assemble::paired(triggers, &LocalDay::of(&now))?;
    for i in &intervals {
        tracing::debug!(on = %i.start().format("%H:%M"), off = %i.stop().format("%H:%M"), "interval");
    }
    let intent = SwitchIntent::from(interval::demands_on(&intervals, &now));
    tracing::info!(%intent, "setting switch to schedule");
    device.set_switch(intent).await?;
    Ok(intent)
}

async fn set_switch_triggers_enabled(
    device: &impl SwitchDevice,
    triggers: &[Trigger],
    enabled: bool,
) -> Result<(), CheapSwitchError> {
    let ids: Vec<TriggerId> = triggers
        .iter()
        .filter(|t| t.is_switch_trigger())
        .map(|t| t.id)
        .collect();
    for id in ids {
        device.set_trigger_enabled(id, enabled).await?;
    }
    Ok(())
}
