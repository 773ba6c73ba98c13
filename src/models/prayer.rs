use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Every timing key the Aladhan API reports that we display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerName {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Midnight,
}

impl PrayerName {
    /// Display order for the daily grid.
    pub const ALL: [PrayerName; 8] = [
        PrayerName::Imsak,
        PrayerName::Fajr,
        PrayerName::Sunrise,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
        PrayerName::Midnight,
    ];

    /// The five canonical prayers, in order. Only these count for the
    /// next-prayer countdown and the alarm.
    pub const CANONICAL: [PrayerName; 5] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerName::Imsak => "Imsak",
            PrayerName::Fajr => "Fajr",
            PrayerName::Sunrise => "Sunrise",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
            PrayerName::Midnight => "Midnight",
        }
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Today's timings as returned by the API, each an "HH:MM" string in the
/// requested location's civil time (sometimes suffixed, e.g. "04:23 (+06)").
/// Keys the API adds beyond these are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyPrayerTimes {
    pub imsak: String,
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    pub midnight: String,
}

impl DailyPrayerTimes {
    pub fn get(&self, name: PrayerName) -> &str {
        match name {
            PrayerName::Imsak => &self.imsak,
            PrayerName::Fajr => &self.fajr,
            PrayerName::Sunrise => &self.sunrise,
            PrayerName::Dhuhr => &self.dhuhr,
            PrayerName::Asr => &self.asr,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isha => &self.isha,
            PrayerName::Midnight => &self.midnight,
        }
    }
}

/// One calendar day of the monthly view. `date` is the API's readable
/// form ("DD-MM-YYYY").
#[derive(Debug, Clone)]
pub struct MonthlyPrayerDay {
    pub date: String,
    pub timings: DailyPrayerTimes,
}

/// Derived every tick, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NextPrayerInfo {
    pub name: PrayerName,
    pub time: String,
    pub remaining: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}
