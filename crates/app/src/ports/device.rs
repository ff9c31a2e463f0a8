//! Device port — the remote switch and its trigger collection.

use std::future::Future;

use cheapswitch_domain::error::CheapSwitchError;
use cheapswitch_domain::id::TriggerId;
use cheapswitch_domain::trigger::{SwitchIntent, Trigger};

/// A switching device storing cron-style triggers.
///
/// Implementations talk to one device. Mutations are not serialized here;
/// callers must avoid concurrent writers.
pub trait SwitchDevice: Send + Sync {
    /// List every trigger stored on the device.
    fn list_triggers(&self) -> impl Future<Output = Result<Vec<Trigger>, CheapSwitchError>> + Send;

    /// Store a new trigger.
    fn create_trigger(
        &self,
        trigger: &Trigger,
    ) -> impl Future<Output = Result<(), CheapSwitchError>> + Send;

    /// Remove every trigger from the device.
    fn delete_all_triggers(&self) -> impl Future<Output = Result<(), CheapSwitchError>> + Send;

    /// Enable or disable one trigger.
    fn set_trigger_enabled(
        &self,
        id: TriggerId,
        enabled: bool,
    ) -> impl Future<Output = Result<(), CheapSwitchError>> + Send;

    /// Switch the output on or off right now.
    fn set_switch(
        &self,
        intent: SwitchIntent,
    ) -> impl Future<Output = Result<(), CheapSwitchError>> + Send;

    /// State of the device's physical input, used as the "schedules enabled" flag.
    fn input_state(&self) -> impl Future<Output = Result<bool, CheapSwitchError>> + Send;
}

/// Opens a [`SwitchDevice`] for a device host.
///
/// With `dry_run` set, the returned device must not perform mutations.
pub trait DeviceConnector: Send + Sync {
    type Device: SwitchDevice + 'static;

    fn connect(&self, host: &str, dry_run: bool) -> Self::Device;
}
