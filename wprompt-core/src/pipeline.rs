//! The conditions pipeline: check the cache, maybe fetch, classify, persist,
//! render.
//!
//! The flow is linear with no back-edges. A fresh-enough snapshot
//! short-circuits straight to rendering; otherwise the pipeline resolves a
//! location, pulls conditions (and astronomy when the moon is wanted),
//! classifies the free text into glyphs, writes the new snapshot through the
//! store, and renders the same line the cached path would have.

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDateTime, Utc};

use crate::cache::{CacheStore, Snapshot, is_stale};
use crate::client::{ClockTime, WundergroundClient, geolocate, geolocate_url};
use crate::emoji;

/// Run configuration, built once by the CLI from its flags and passed in.
/// Nothing below the top-level driver reads ambient state.
#[derive(Debug, Clone)]
pub struct Options {
    /// Minutes a snapshot stays fresh.
    pub wait_minutes: i64,
    /// Explicit zip code; `None` means geolocate by IP.
    pub zip: Option<String>,
    /// Refresh even when the snapshot is fresh.
    pub force: bool,
    pub show_moon: bool,
    pub show_temp: bool,
}

/// Wires a cache store and provider client into the refresh flow.
#[derive(Debug)]
pub struct Pipeline {
    store: CacheStore,
    client: WundergroundClient,
    geolocation_url: String,
}

impl Pipeline {
    pub fn new(store: CacheStore, client: WundergroundClient) -> Self {
        Self { store, client, geolocation_url: geolocate_url().to_string() }
    }

    /// Point geolocation at a different endpoint (tests).
    pub fn with_geolocation_url(mut self, url: impl Into<String>) -> Self {
        self.geolocation_url = url.into();
        self
    }

    /// Produce the output line, from cache when possible.
    pub async fn run(&self, options: &Options) -> Result<String> {
        let cached = self.store.load();
        let now = Utc::now().timestamp();

        if !should_refresh(options.force, cached.last, options.wait_minutes, now) {
            tracing::debug!(last = cached.last, "snapshot is fresh, skipping fetch");
            return Ok(render(&cached, options));
        }

        let zip = match &options.zip {
            Some(zip) => zip.clone(),
            None => geolocate(self.client.http(), &self.geolocation_url).await?,
        };
        tracing::debug!(%zip, "resolved location");

        let observation = self.client.conditions(&zip).await?;
        tracing::debug!(station = %observation.station_id, weather = %observation.weather,
            temp_f = observation.temp_f, "got conditions");

        let moon_emoji = if options.show_moon {
            let astronomy = self.client.astronomy(&zip).await?;
            let now_local = Local::now().naive_local();
            if is_night(now_local, &astronomy.sunset)? {
                emoji::moon_emoji(&astronomy.moon_phase).to_string()
            } else {
                tracing::debug!("before sunset, suppressing moon phase");
                String::new()
            }
        } else {
            String::new()
        };

        let snapshot = Snapshot {
            last: Utc::now().timestamp(),
            emoji: emoji::condition_emoji(&observation.weather).to_string(),
            station: observation.station_id,
            condition: observation.weather,
            moon_emoji,
            temp: format_temp(observation.temp_f),
        };
        self.store.save(&snapshot)?;

        Ok(render(&snapshot, options))
    }
}

/// Refresh when forced, when no prior snapshot exists, or when the snapshot
/// has gone stale.
pub fn should_refresh(force: bool, last: i64, wait_minutes: i64, now: i64) -> bool {
    force || last == 0 || is_stale(last, wait_minutes, now)
}

/// Night gate: true once `now` is strictly past today's sunset. The gate is
/// sunset-only; sunrise does not bound it.
pub fn is_night(now: NaiveDateTime, sunset: &ClockTime) -> Result<bool> {
    let hour: u32 = sunset.hour.trim().parse().context("Non-numeric sunset hour")?;
    let minute: u32 = sunset.minute.trim().parse().context("Non-numeric sunset minute")?;

    let sunset_at = now
        .date()
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| anyhow!("Sunset time out of range: {hour}:{minute}"))?;

    Ok(now > sunset_at)
}

/// Integer-rounded Fahrenheit, no decimal point.
pub fn format_temp(temp_f: f64) -> String {
    format!("{temp_f:.0}")
}

/// One output line: condition glyph, then `" " + moon` when the moon was
/// requested, then `"  " + temp + "°"` when the temperature was requested.
pub fn render(snapshot: &Snapshot, options: &Options) -> String {
    let mut out = snapshot.emoji.clone();
    if options.show_moon {
        out.push(' ');
        out.push_str(&snapshot.moon_emoji);
    }
    if options.show_temp {
        out.push_str("  ");
        out.push_str(&snapshot.temp);
        out.push('°');
    }
    out
}
