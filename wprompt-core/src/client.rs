//! Remote fetches: Weather Underground conditions/astronomy and ipinfo.io
//! IP geolocation.
//!
//! Every fetch is a single blocking-style GET with a short fixed timeout and
//! no retries; any failure (transport, non-2xx status, undecodable body) is
//! an error for the caller to treat as fatal. The next status-bar tick is
//! the retry.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const WUNDERGROUND_URL: &str = "http://api.wunderground.com/api";
const IPINFO_URL: &str = "https://ipinfo.io";
const FETCH_TIMEOUT_SECS: u64 = 3;

/// Provider data section, selecting which document to fetch for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Conditions,
    Astronomy,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Conditions => "conditions",
            Section::Astronomy => "astronomy",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current observation at a station.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub station_id: String,
    /// Free-text condition description, e.g. "Light Rain Showers".
    pub weather: String,
    pub temp_f: f64,
}

/// A local wall-clock time as the provider reports it: hour and minute as
/// decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockTime {
    pub hour: String,
    pub minute: String,
}

/// Moon phase text plus the day's sun times.
///
/// `sunrise` is decoded but currently unused: the night gate is sunset-only.
#[derive(Debug, Clone)]
pub struct Astronomy {
    pub moon_phase: String,
    pub sunrise: ClockTime,
    pub sunset: ClockTime,
}

#[derive(Debug, Deserialize)]
struct ConditionsEnvelope {
    current_observation: Observation,
}

#[derive(Debug, Deserialize)]
struct MoonPhase {
    #[serde(rename = "phaseofMoon")]
    phaseof_moon: String,
}

#[derive(Debug, Deserialize)]
struct SunPhase {
    sunrise: ClockTime,
    sunset: ClockTime,
}

#[derive(Debug, Deserialize)]
struct AstronomyEnvelope {
    moon_phase: MoonPhase,
    sun_phase: SunPhase,
}

#[derive(Debug, Deserialize)]
struct IpInfo {
    postal: Option<String>,
}

/// Client for the Weather Underground JSON API.
#[derive(Debug, Clone)]
pub struct WundergroundClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl WundergroundClient {
    pub fn new(api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, api_key, base_url: WUNDERGROUND_URL.to_string() })
    }

    /// Point the client at a different base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    fn url_for(&self, section: Section, zip: &str) -> String {
        // The "zmw" query form pins the lookup to a US zip code.
        format!("{}/{}/{}/q/zmw:{}.1.99999.json", self.base_url, self.api_key, section, zip)
    }

    /// Fetch the current observation for a zip code.
    pub async fn conditions(&self, zip: &str) -> Result<Observation> {
        let url = self.url_for(Section::Conditions, zip);
        tracing::debug!(%url, "fetching conditions");

        let body = fetch(&self.http, &url, "conditions").await?;
        let parsed: ConditionsEnvelope =
            serde_json::from_str(&body).context("Failed to parse conditions JSON")?;

        Ok(parsed.current_observation)
    }

    /// Fetch moon phase and sun times for a zip code.
    pub async fn astronomy(&self, zip: &str) -> Result<Astronomy> {
        let url = self.url_for(Section::Astronomy, zip);
        tracing::debug!(%url, "fetching astronomy");

        let body = fetch(&self.http, &url, "astronomy").await?;
        let parsed: AstronomyEnvelope =
            serde_json::from_str(&body).context("Failed to parse astronomy JSON")?;

        Ok(Astronomy {
            moon_phase: parsed.moon_phase.phaseof_moon,
            sunrise: parsed.sun_phase.sunrise,
            sunset: parsed.sun_phase.sunset,
        })
    }
}

/// Resolve the caller's postal code from their public IP.
pub async fn geolocate(http: &Client, base_url: &str) -> Result<String> {
    let url = format!("{base_url}/json");
    tracing::debug!(%url, "geolocating by IP");

    let body = fetch(http, &url, "geolocation").await?;
    let parsed: IpInfo =
        serde_json::from_str(&body).context("Failed to parse geolocation JSON")?;

    match parsed.postal {
        Some(postal) if !postal.is_empty() => Ok(postal),
        _ => Err(anyhow!("Geolocation response did not include a postal code")),
    }
}

/// Default geolocation endpoint.
pub fn geolocate_url() -> &'static str {
    IPINFO_URL
}

async fn fetch(http: &Client, url: &str, what: &str) -> Result<String> {
    let res = http
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to send {what} request"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {what} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "{what} request failed with status {status}: {}",
            truncate_body(&body),
        ));
    }

    Ok(body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
