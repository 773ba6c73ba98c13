use chrono::{Duration, NaiveDateTime};

use crate::models::{DailyPrayerTimes, NextPrayerInfo, PrayerName};
use crate::utils::format::parse_hhmm;

/// Find the next canonical prayer after `now`.
///
/// Walks Fajr..Isha in order and picks the first whose time today is
/// strictly after `now` — a prayer whose time equals `now` exactly has
/// already started and is treated as passed. If all five have passed,
/// wraps to Fajr on the following day. Returns `None` only when Fajr
/// cannot be parsed (timings not loaded or garbage from the API).
///
/// Callers re-run this every second against a freshly sampled clock;
/// the result is never cached.
pub fn next_prayer(times: &DailyPrayerTimes, now: NaiveDateTime) -> Option<NextPrayerInfo> {
    for name in PrayerName::CANONICAL {
        let raw = times.get(name);
        let Some(time) = parse_hhmm(raw) else {
            continue;
        };
        let candidate = now.date().and_time(time);
        if candidate > now {
            return Some(NextPrayerInfo {
                name,
                time: raw.to_string(),
                remaining: candidate - now,
            });
        }
    }

    // All five passed today: next is tomorrow's Fajr.
    let raw = times.get(PrayerName::Fajr);
    let fajr = parse_hhmm(raw)?;
    let tomorrow = now.date() + Duration::days(1);
    let candidate = tomorrow.and_time(fajr);
    Some(NextPrayerInfo {
        name: PrayerName::Fajr,
        time: raw.to_string(),
        remaining: candidate - now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_times() -> DailyPrayerTimes {
        DailyPrayerTimes {
            imsak: "04:50".into(),
            fajr: "05:00".into(),
            sunrise: "06:15".into(),
            dhuhr: "12:10".into(),
            asr: "15:45".into(),
            maghrib: "18:20".into(),
            isha: "19:40".into(),
            midnight: "00:15".into(),
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn picks_first_prayer_strictly_after_now() {
        let next = next_prayer(&sample_times(), at(18, 19, 30)).unwrap();
        assert_eq!(next.name, PrayerName::Maghrib);
        assert_eq!(next.time, "18:20");
        assert_eq!(next.remaining.num_milliseconds(), 30_000);
    }

    #[test]
    fn exact_prayer_time_counts_as_passed() {
        let next = next_prayer(&sample_times(), at(12, 10, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Asr);
    }

    #[test]
    fn before_fajr_returns_fajr_today() {
        let next = next_prayer(&sample_times(), at(3, 0, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Fajr);
        assert_eq!(next.remaining, Duration::hours(2));
    }

    #[test]
    fn after_isha_wraps_to_tomorrow_fajr() {
        let next = next_prayer(&sample_times(), at(23, 50, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Fajr);
        assert_eq!(
            next.remaining,
            Duration::hours(5) + Duration::minutes(10)
        );
    }

    #[test]
    fn suffixed_timing_strings_still_parse() {
        let mut times = sample_times();
        times.maghrib = "18:20 (+06)".into();
        let next = next_prayer(&times, at(18, 19, 30)).unwrap();
        assert_eq!(next.name, PrayerName::Maghrib);
        assert_eq!(next.remaining.num_milliseconds(), 30_000);
    }

    #[test]
    fn unparseable_entry_is_skipped() {
        let mut times = sample_times();
        times.maghrib = "--:--".into();
        let next = next_prayer(&times, at(18, 19, 30)).unwrap();
        assert_eq!(next.name, PrayerName::Isha);
    }

    #[test]
    fn missing_fajr_yields_none_after_isha() {
        let mut times = sample_times();
        times.fajr = String::new();
        assert!(next_prayer(&times, at(23, 50, 0)).is_none());
    }

    proptest::proptest! {
        // Whatever the wall clock says, there is always an upcoming canonical
        // prayer, strictly in the future, and `now + remaining` lands exactly
        // on that prayer's wall-clock minute.
        #[test]
        fn always_finds_an_upcoming_canonical_prayer(
            h in 0u32..24,
            m in 0u32..60,
            s in 0u32..60,
        ) {
            use proptest::prelude::*;

            let now = at(h, m, s);
            let next = next_prayer(&sample_times(), now).unwrap();

            prop_assert!(PrayerName::CANONICAL.contains(&next.name));
            prop_assert!(next.remaining > Duration::zero());
            prop_assert!(next.remaining < Duration::hours(24));

            let target = now + next.remaining;
            prop_assert_eq!(target.time(), parse_hhmm(&next.time).unwrap());
        }
    }
}
