//! [`PriceSource`] backed by an HTTP quote provider.

use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::Deserialize;

use cheapswitch_app::ports::PriceSource;
use cheapswitch_domain::error::CheapSwitchError;
use cheapswitch_domain::price::HourPrice;
use cheapswitch_domain::time::LocalTime;

use crate::error::PriceError;

/// One hour as the provider reports it.
#[derive(Debug, Deserialize)]
struct QuoteDto {
    start: DateTime<FixedOffset>,
    price: f64,
}

/// HTTP price provider client.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpPriceSource {
    /// Client for the provider endpoint at `url`, authenticating with `token`
    /// as a bearer token when given.
    #[must_use]
    pub fn new(client: Client, url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            token,
        }
    }

    async fn fetch(
        &self,
        from: LocalTime,
        to: LocalTime,
        hours: u32,
        dark_hours: u32,
    ) -> Result<Vec<HourPrice>, PriceError> {
        let mut request = self.client.get(&self.url).query(&[
            ("from", from.to_rfc3339()),
            ("to", to.to_rfc3339()),
            ("hours", hours.to_string()),
            ("dark", dark_hours.to_string()),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(PriceError::Unreachable)?;
        let status = response.status();
        let body = response.text().await.map_err(PriceError::Unreachable)?;
        if status.is_server_error() {
            return Err(PriceError::Unavailable {
                status: status.as_u16(),
                body,
            });
        }
        if !status.is_success() {
            return Err(PriceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let quotes: Vec<QuoteDto> = serde_json::from_str(&body).map_err(PriceError::Decode)?;
        let tz = from.timezone();
        Ok(quotes
            .into_iter()
            .map(|q| HourPrice {
                start: q.start.with_timezone(&tz),
                price: q.price,
            })
            .collect())
    }
}

impl PriceSource for HttpPriceSource {
    async fn cheapest_hours(
        &self,
        from: LocalTime,
        to: LocalTime,
        hours: u32,
        dark_hours: u32,
    ) -> Result<Vec<HourPrice>, CheapSwitchError> {
        tracing::debug!(url = %self.url, %from, %to, hours, dark_hours, "requesting cheapest hours");
        match self.fetch(from, to, hours, dark_hours).await {
            Ok(selected) => Ok(selected),
            Err(err) => {
                tracing::warn!(error = %err, transient = err.is_transient(), "price request failed");
                Err(err.into())
            }
        }
    }
}
