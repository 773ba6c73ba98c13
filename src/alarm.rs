use std::collections::HashSet;
use std::io::Write;

use chrono::NaiveDate;
use log::warn;

use crate::models::{NextPrayerInfo, PrayerName};

/// The detection window in milliseconds. The countdown is recomputed once
/// per second, so the only reliable trigger point is the tick where the
/// remaining time first drops into (0, 1000].
const TRIGGER_WINDOW_MS: i64 = 1000;

/// Tracks whether the alarm is on and which prayers already rang today.
#[derive(Debug)]
pub struct AlarmState {
    pub enabled: bool,
    fired_for: HashSet<PrayerName>,
    fired_date: NaiveDate,
}

impl AlarmState {
    pub fn new(enabled: bool, today: NaiveDate) -> Self {
        Self {
            enabled,
            fired_for: HashSet::new(),
            fired_date: today,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Run one alarm check. Returns true when the bell should ring now.
    ///
    /// A prayer rings at most once per calendar day; the fired set empties
    /// when the local date rolls over, so the same prayer can ring again
    /// tomorrow. The name is recorded whether or not the bell write later
    /// succeeds, so a broken terminal never causes repeat attempts.
    pub fn check(&mut self, today: NaiveDate, next: Option<&NextPrayerInfo>) -> bool {
        if today != self.fired_date {
            self.fired_for.clear();
            self.fired_date = today;
        }

        if !self.enabled {
            return false;
        }

        let Some(next) = next else {
            return false;
        };

        let remaining_ms = next.remaining.num_milliseconds();
        if remaining_ms > 0 && remaining_ms <= TRIGGER_WINDOW_MS {
            return self.fired_for.insert(next.name);
        }
        false
    }
}

/// Ring the terminal bell. Failure is logged and otherwise ignored.
pub fn ring_bell() {
    let mut out = std::io::stdout();
    if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
        warn!("alarm bell failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn info(name: PrayerName, remaining_ms: i64) -> NextPrayerInfo {
        NextPrayerInfo {
            name,
            time: "18:20".into(),
            remaining: Duration::milliseconds(remaining_ms),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    #[test]
    fn fires_once_inside_window() {
        let mut alarm = AlarmState::new(true, day(10));
        assert!(alarm.check(day(10), Some(&info(PrayerName::Maghrib, 900))));
        // Same prayer, still in the window on the next tick: no repeat.
        assert!(!alarm.check(day(10), Some(&info(PrayerName::Maghrib, 400))));
    }

    #[test]
    fn window_is_half_open() {
        let mut alarm = AlarmState::new(true, day(10));
        assert!(!alarm.check(day(10), Some(&info(PrayerName::Fajr, 0))));
        assert!(!alarm.check(day(10), Some(&info(PrayerName::Fajr, 1001))));
        assert!(alarm.check(day(10), Some(&info(PrayerName::Fajr, 1000))));
    }

    #[test]
    fn disabled_alarm_never_fires() {
        let mut alarm = AlarmState::new(false, day(10));
        assert!(!alarm.check(day(10), Some(&info(PrayerName::Isha, 500))));
    }

    #[test]
    fn fired_set_resets_on_date_change() {
        let mut alarm = AlarmState::new(true, day(10));
        assert!(alarm.check(day(10), Some(&info(PrayerName::Isha, 800))));
        assert!(!alarm.check(day(10), Some(&info(PrayerName::Isha, 200))));
        // Next day, same prayer rings again.
        assert!(alarm.check(day(11), Some(&info(PrayerName::Isha, 800))));
    }

    #[test]
    fn distinct_prayers_fire_independently() {
        let mut alarm = AlarmState::new(true, day(10));
        assert!(alarm.check(day(10), Some(&info(PrayerName::Dhuhr, 700))));
        assert!(alarm.check(day(10), Some(&info(PrayerName::Asr, 700))));
    }
}
