pub mod prayer;
pub mod quotes;

pub use prayer::{FetchError, PrayerApi};
pub use quotes::QuoteApi;
