//! HTTP RPC client for a single Shelly device.

use reqwest::{Client, StatusCode};
use serde::Serialize;

use cheapswitch_app::ports::{DeviceConnector, SwitchDevice};
use cheapswitch_domain::encode::DeviceSchedule;
use cheapswitch_domain::error::CheapSwitchError;
use cheapswitch_domain::id::TriggerId;
use cheapswitch_domain::trigger::{SwitchIntent, Trigger};

use crate::error::ShellyError;

const SCHEDULE_LIST: &str = "Schedule.List";
const SCHEDULE_CREATE: &str = "Schedule.Create";
const SCHEDULE_UPDATE: &str = "Schedule.Update";
const SCHEDULE_DELETE_ALL: &str = "Schedule.DeleteAll";
const SWITCH_SET: &str = "Switch.Set";
const GET_STATUS: &str = "Shelly.GetStatus";

/// The switch channel every call addresses.
const SWITCH_CHANNEL: &str = "0";

/// Opens [`ShellyRpc`] clients sharing one connection pool.
#[derive(Debug, Clone, Default)]
pub struct ShellyConnector {
    client: Client,
}

impl ShellyConnector {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl DeviceConnector for ShellyConnector {
    type Device = ShellyRpc;

    fn connect(&self, host: &str, dry_run: bool) -> ShellyRpc {
        ShellyRpc::new(self.client.clone(), host, dry_run)
    }
}

/// RPC client bound to one device.
#[derive(Debug, Clone)]
pub struct ShellyRpc {
    client: Client,
    base: String,
    dry_run: bool,
}

impl ShellyRpc {
    /// Client for the device at `host` (an address, optionally with a port).
    #[must_use]
    pub fn new(client: Client, host: &str, dry_run: bool) -> Self {
        Self {
            client,
            base: format!("http://{host}/rpc/"),
            dry_run,
        }
    }

    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn url(&self, method: &str) -> String {
        format!("{}{method}", self.base)
    }

    async fn read(&self, method: &'static str) -> Result<String, ShellyError> {
        let response = self
            .client
            .get(self.url(method))
            .send()
            .await
            .map_err(|source| ShellyError::Transport { method, source })?;
        body_of(method, response).await
    }

    async fn call(
        &self,
        method: &'static str,
        query: &[(&str, String)],
    ) -> Result<(), ShellyError> {
        if self.dry_run {
            tracing::info!(method, ?query, "dry run, skipping rpc");
            return Ok(());
        }
        let response = self
            .client
            .get(self.url(method))
            .query(query)
            .send()
            .await
            .map_err(|source| ShellyError::Transport { method, source })?;
        body_of(method, response).await.map(|_| ())
    }

    async fn post<T: Serialize>(&self, method: &'static str, body: &T) -> Result<(), ShellyError> {
        let body = serde_json::to_string(body)
            .map_err(|source| ShellyError::Encode { method, source })?;
        if self.dry_run {
            tracing::info!(method, %body, "dry run, skipping rpc");
            return Ok(());
        }
        let response = self
            .client
            .post(self.url(method))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| ShellyError::Transport { method, source })?;
        body_of(method, response).await.map(|_| ())
    }
}

async fn body_of(method: &'static str, response: reqwest::Response) -> Result<String, ShellyError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ShellyError::Transport { method, source })?;
    if status != StatusCode::OK {
        return Err(ShellyError::Status {
            method,
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

fn input_state_of(status: &str) -> Result<bool, ShellyError> {
    let value: serde_json::Value = serde_json::from_str(status).map_err(|source| {
        ShellyError::Decode {
            method: GET_STATUS,
            source,
        }
    })?;
    Ok(value
        .get("input:0")
        .and_then(|input| input.get("state"))
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false))
}

impl SwitchDevice for ShellyRpc {
    async fn list_triggers(&self) -> Result<Vec<Trigger>, CheapSwitchError> {
        let body = self.read(SCHEDULE_LIST).await?;
        let schedule: DeviceSchedule =
            serde_json::from_str(&body).map_err(|source| ShellyError::Decode {
                method: SCHEDULE_LIST,
                source,
            })?;
        tracing::debug!(jobs = schedule.jobs.len(), "listed schedule");
        Ok(schedule.jobs)
    }

    async fn create_trigger(&self, trigger: &Trigger) -> Result<(), CheapSwitchError> {
        tracing::debug!(timespec = %trigger.timespec, enabled = trigger.enabled, "creating job");
        Ok(self.post(SCHEDULE_CREATE, trigger).await?)
    }

    async fn delete_all_triggers(&self) -> Result<(), CheapSwitchError> {
        Ok(self.call(SCHEDULE_DELETE_ALL, &[]).await?)
    }

    async fn set_trigger_enabled(
        &self,
        id: TriggerId,
        enabled: bool,
    ) -> Result<(), CheapSwitchError> {
        Ok(self
            .call(
                SCHEDULE_UPDATE,
                &[("id", id.to_string()), ("enable", enabled.to_string())],
            )
            .await?)
    }

    async fn set_switch(&self, intent: SwitchIntent) -> Result<(), CheapSwitchError> {
        Ok(self
            .call(
                SWITCH_SET,
                &[
                    ("id", SWITCH_CHANNEL.to_string()),
                    ("on", intent.is_on().to_string()),
                ],
            )
            .await?)
    }

    async fn input_state(&self) -> Result<bool, CheapSwitchError> {
        let body = self.read(GET_STATUS).await?;
        Ok(input_state_of(&body)?)
    }
}
