//! Action — what a trigger does when it fires.
//!
//! On the wire an action is a `{ "method": ..., "params": {...} }` record with
//! free-form parameters. Only the two operations cheapswitch itself issues are
//! interpreted; anything else is carried through untouched, and so are
//! parameters of a switch-set call that cheapswitch does not read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SwitchIntent;

const SWITCH_SET: &str = "Switch.Set";
const HTTP_GET: &str = "HTTP.Get";

/// An operation the device performs when a trigger fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCall", into = "RawCall")]
pub enum Action {
    /// Set switch channel `switch_id` on or off.
    SwitchSet {
        switch_id: u32,
        on: bool,
        /// Price annotation written on "on" actions.
        cost: Option<f64>,
        /// Remaining parameters, as the device stored them.
        extra: Map<String, Value>,
    },
    /// Perform an HTTP GET against `url`.
    HttpGet { url: String },
    /// Any other device method, kept verbatim.
    Other {
        method: String,
        params: Option<Map<String, Value>>,
    },
}

impl Action {
    /// Switch channel 0 on or off.
    #[must_use]
    pub fn switch(intent: SwitchIntent, cost: Option<f64>) -> Self {
        Self::SwitchSet {
            switch_id: 0,
            on: intent.is_on(),
            cost,
            extra: Map::new(),
        }
    }

    /// The device method name this action calls.
    #[must_use]
    pub fn method(&self) -> &str {
        match self {
            Self::SwitchSet { .. } => SWITCH_SET,
            Self::HttpGet { .. } => HTTP_GET,
            Self::Other { method, .. } => method,
        }
    }

    /// The switch intent, if this is a switch-set action.
    #[must_use]
    pub fn switch_intent(&self) -> Option<SwitchIntent> {
        match self {
            Self::SwitchSet { on, .. } => Some(SwitchIntent::from(*on)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SwitchSet { switch_id, on, .. } => {
                write!(f, "switch_set({switch_id}, {})", SwitchIntent::from(*on))
            }
            Self::HttpGet { url } => write!(f, "http_get({url})"),
            Self::Other { method, .. } => write!(f, "{method}"),
        }
    }
}

/// Wire shape of a single call.
#[derive(Serialize, Deserialize)]
struct RawCall {
    method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<Map<String, Value>>,
}

/// Remove `key` from `params` if `read` accepts its value.
fn take<T>(
    params: &mut Map<String, Value>,
    key: &str,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = params.get(key).and_then(read)?;
    params.remove(key);
    Some(value)
}

impl From<RawCall> for Action {
    fn from(raw: RawCall) -> Self {
        let params = raw.params.as_ref();
        if raw.method.eq_ignore_ascii_case(SWITCH_SET) {
            if let Some(mut extra) = params
                .filter(|p| p.get("on").is_some_and(Value::is_boolean))
                .cloned()
            {
                let on = take(&mut extra, "on", Value::as_bool).unwrap_or_default();
                let switch_id = take(&mut extra, "id", |v| {
                    v.as_u64().and_then(|id| u32::try_from(id).ok())
                })
                .unwrap_or(0);
                let cost = take(&mut extra, "cost", Value::as_f64);
                return Self::SwitchSet {
                    switch_id,
                    on,
                    cost,
                    extra,
                };
            }
        } else if raw.method.eq_ignore_ascii_case(HTTP_GET) {
            let url_only = params.is_some_and(|p| p.len() == 1);
            if let Some(url) = params
                .filter(|_| url_only)
                .and_then(|p| p.get("url"))
                .and_then(Value::as_str)
            {
                return Self::HttpGet {
                    url: url.to_string(),
                };
            }
        }
        Self::Other {
            method: raw.method,
            params: raw.params,
        }
    }
}

impl From<Action> for RawCall {
    fn from(action: Action) -> Self {
        match action {
            Action::SwitchSet {
                switch_id,
                on,
                cost,
                extra,
            } => {
                let mut params = extra;
                params.insert("id".to_string(), Value::from(switch_id));
                params.insert("on".to_string(), Value::from(on));
                if let Some(cost) = cost {
                    params.insert("cost".to_string(), Value::from(cost));
                }
                Self {
                    method: SWITCH_SET.to_string(),
                    params: Some(params),
                }
            }
            Action::HttpGet { url } => {
                let mut params = Map::new();
                params.insert("url".to_string(), Value::from(url));
                Self {
                    method: HTTP_GET.to_string(),
                    params: Some(params),
                }
            }
            Action::Other { method, params } => Self { method, params },
        }
    }
}
