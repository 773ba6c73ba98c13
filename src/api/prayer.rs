use std::time::Duration;

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{DailyPrayerTimes, MonthlyPrayerDay};

const BASE_URL: &str = "https://api.aladhan.com/v1";
/// Aladhan calculation method 2 (ISNA), pinned for every request.
const METHOD: &str = "2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Failure of a daily or monthly fetch. Surfaces to the UI as a single
/// message; never retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not reach the prayer-time service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Api(String),
    #[error("unexpected response from the prayer-time service: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only client for the Aladhan prayer-time API.
#[derive(Clone)]
pub struct PrayerApi {
    client: reqwest::blocking::Client,
}

impl PrayerApi {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    pub fn http_client(&self) -> reqwest::blocking::Client {
        self.client.clone()
    }

    /// Today's timings for a city, as the API understands "today".
    pub fn fetch_daily(&self, city: &str, country: &str) -> Result<DailyPrayerTimes, FetchError> {
        debug!("fetching daily timings for {}, {}", city, country);
        let body = self
            .client
            .get(format!("{}/timingsByCity", BASE_URL))
            .query(&[("city", city), ("country", country), ("method", METHOD)])
            .send()?
            .error_for_status()?
            .text()?;
        let data: DailyData = decode_envelope(&body)?;
        Ok(data.timings)
    }

    /// One entry per calendar day of the requested month.
    pub fn fetch_monthly(
        &self,
        city: &str,
        country: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<MonthlyPrayerDay>, FetchError> {
        debug!(
            "fetching calendar for {}, {} ({}-{})",
            city, country, month, year
        );
        let month = month.to_string();
        let year = year.to_string();
        let body = self
            .client
            .get(format!("{}/calendarByCity", BASE_URL))
            .query(&[
                ("city", city),
                ("country", country),
                ("method", METHOD),
                ("month", month.as_str()),
                ("year", year.as_str()),
            ])
            .send()?
            .error_for_status()?
            .text()?;
        let days: Vec<MonthlyEntry> = decode_envelope(&body)?;
        Ok(days
            .into_iter()
            .map(|day| MonthlyPrayerDay {
                date: day.date.readable,
                timings: day.timings,
            })
            .collect())
    }
}

/// Every Aladhan response wraps its payload in `{code, data}`. On success
/// `data` holds the payload; on failure it is a bare message string.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    timings: DailyPrayerTimes,
}

#[derive(Debug, Deserialize)]
struct MonthlyEntry {
    date: DateInfo,
    timings: DailyPrayerTimes,
}

#[derive(Debug, Deserialize)]
struct DateInfo {
    readable: String,
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.code != 200 {
        let message = envelope
            .data
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("prayer-time service returned code {}", envelope.code));
        return Err(FetchError::Api(message));
    }
    Ok(serde_json::from_value(envelope.data)?)
}
