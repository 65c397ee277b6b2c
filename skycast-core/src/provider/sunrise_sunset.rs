use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::warn;

use crate::{
    config::Config,
    error::{Result, SkycastError},
    model::{Coordinates, SunTimes, SunTimesResponse},
};

use super::{Provider, ProviderId};

pub const BASE_URL: &str = "https://api.sunrise-sunset.org/json";

const STATUS_OK: &str = "OK";

/// Client for sunrise-sunset.org.
#[derive(Debug, Clone)]
pub struct SunriseSunsetProvider {
    base_url: Url,
    http: Client,
}

impl SunriseSunsetProvider {
    pub fn new(base_url: Url) -> Self {
        Self { base_url, http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ProviderId::SunriseSunset.base_url(config)?))
    }
}

pub fn sun_times_url(base: &Url, coords: &Coordinates) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("lat", &coords.latitude)
        .append_pair("lng", &coords.longitude);
    url
}

// Error responses carry `"results": ""`, so `results` is only interpreted once
// the status says OK.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    results: serde_json::Value,
    #[serde(default)]
    tzid: String,
}

pub fn decode_sun_times(body: &str) -> Result<SunTimesResponse> {
    let provider = ProviderId::SunriseSunset;

    let envelope: Envelope =
        serde_json::from_str(body).map_err(|source| SkycastError::Decode { provider, source })?;

    if envelope.status != STATUS_OK {
        warn!(%provider, status = %envelope.status, "provider rejected request");
        return Err(SkycastError::Provider {
            provider,
            message: format!("API returned error status: {}", envelope.status),
        });
    }

    let results: SunTimes = serde_json::from_value(envelope.results)
        .map_err(|source| SkycastError::Decode { provider, source })?;

    Ok(SunTimesResponse { results, status: envelope.status, tzid: envelope.tzid })
}

#[async_trait]
impl Provider for SunriseSunsetProvider {
    type Response = SunTimesResponse;

    fn id(&self) -> ProviderId {
        ProviderId::SunriseSunset
    }

    fn http(&self) -> &Client {
        &self.http
    }

    fn request_url(&self, coords: &Coordinates) -> Url {
        sun_times_url(&self.base_url, coords)
    }

    fn decode(&self, body: &str) -> Result<SunTimesResponse> {
        decode_sun_times(body)
    }
}
