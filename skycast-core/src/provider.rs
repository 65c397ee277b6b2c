use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{Result, SkycastError},
    model::Coordinates,
};

pub mod seven_timer;
pub mod sunrise_sunset;

pub use seven_timer::SevenTimerProvider;
pub use sunrise_sunset::SunriseSunsetProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    SevenTimer,
    SunriseSunset,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::SevenTimer => "7timer",
            ProviderId::SunriseSunset => "sunrise-sunset",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::SevenTimer, ProviderId::SunriseSunset]
    }

    /// Endpoint used when the config file does not override it.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderId::SevenTimer => seven_timer::BASE_URL,
            ProviderId::SunriseSunset => sunrise_sunset::BASE_URL,
        }
    }

    /// Parses the base URL configured for this provider.
    pub fn base_url(&self, config: &Config) -> Result<Url> {
        let raw = config.provider_base_url(*self);
        Url::parse(raw).map_err(|e| {
            SkycastError::Config(format!("base URL '{raw}' for provider '{self}' is invalid: {e}"))
        })
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "7timer" => Ok(ProviderId::SevenTimer),
            "sunrise-sunset" => Ok(ProviderId::SunriseSunset),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: 7timer, sunrise-sunset."
            )),
        }
    }
}

/// A provider answers one GET per coordinate pair with a JSON body.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    type Response: Send;

    fn id(&self) -> ProviderId;

    fn http(&self) -> &Client;

    /// Full query URL for `coords`. Coordinates are forwarded unvalidated.
    fn request_url(&self, coords: &Coordinates) -> Url;

    fn decode(&self, body: &str) -> Result<Self::Response>;

    async fn fetch(&self, coords: &Coordinates) -> Result<Self::Response> {
        let url = self.request_url(coords);
        let body = fetch_body(self.http(), self.id(), url).await?;
        self.decode(&body)
    }
}

/// Sends the GET and returns the full body of a successful response.
pub(crate) async fn fetch_body(http: &Client, provider: ProviderId, url: Url) -> Result<String> {
    debug!(%provider, %url, "sending request");

    let res = http
        .get(url)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .map_err(|source| SkycastError::Request { provider, source })?;

    let status = res.status();
    let body = res.text().await.map_err(|source| SkycastError::Request { provider, source })?;

    debug!(%provider, %status, bytes = body.len(), "received response");

    if !status.is_success() {
        warn!(%provider, %status, "request failed");
        return Err(SkycastError::Status { provider, status, body: truncate_body(&body) });
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
