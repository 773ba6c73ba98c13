pub mod prayer;
pub mod quote;

pub use prayer::{DailyPrayerTimes, Location, MonthlyPrayerDay, NextPrayerInfo, PrayerName};
pub use quote::Quote;
