use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::warn;

use crate::{
    config::Config,
    error::{Result, SkycastError},
    model::{Coordinates, ForecastResponse},
};

use super::{Provider, ProviderId};

pub const BASE_URL: &str = "https://www.7timer.info/bin/astro.php";

/// Client for the 7timer `astro` product (astronomical seeing forecast).
#[derive(Debug, Clone)]
pub struct SevenTimerProvider {
    base_url: Url,
    http: Client,
}

impl SevenTimerProvider {
    pub fn new(base_url: Url) -> Self {
        Self { base_url, http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ProviderId::SevenTimer.base_url(config)?))
    }
}

/// Query: coordinates, no "forecast ahead" shift, metric units, JSON output, UTC.
pub fn forecast_url(base: &Url, coords: &Coordinates) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("lat", &coords.latitude)
        .append_pair("lng", &coords.longitude)
        .append_pair("ac", "0")
        .append_pair("unit", "metric")
        .append_pair("output", "json")
        .append_pair("tzshift", "0");
    url
}

/// 7timer has no status field, so an empty series is the only failure signal.
pub fn decode_forecast(body: &str) -> Result<ForecastResponse> {
    let provider = ProviderId::SevenTimer;

    let parsed: ForecastResponse =
        serde_json::from_str(body).map_err(|source| SkycastError::Decode { provider, source })?;

    if parsed.dataseries.is_empty() {
        warn!(%provider, product = %parsed.product, "response contained no forecast entries");
        return Err(SkycastError::Provider {
            provider,
            message: "response contained no forecast entries".to_string(),
        });
    }

    Ok(parsed)
}

#[async_trait]
impl Provider for SevenTimerProvider {
    type Response = ForecastResponse;

    fn id(&self) -> ProviderId {
        ProviderId::SevenTimer
    }

    fn http(&self) -> &Client {
        &self.http
    }

    fn request_url(&self, coords: &Coordinates) -> Url {
        forecast_url(&self.base_url, coords)
    }

    fn decode(&self, body: &str) -> Result<ForecastResponse> {
        decode_forecast(body)
    }
}
