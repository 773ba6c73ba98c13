use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};

use crate::api::FetchError;
use crate::models::{DailyPrayerTimes, Location, MonthlyPrayerDay, Quote};

/// Parameters a daily fetch was issued with, echoed back with its result.
/// The app compares the echo against its pending tag and drops responses
/// that no longer match, so an old in-flight fetch can never overwrite a
/// newer location's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRequest {
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRequest {
    pub location: Location,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    DailyLoaded(DailyRequest, Result<DailyPrayerTimes, FetchError>),
    MonthlyLoaded(MonthlyRequest, Result<Vec<MonthlyPrayerDay>, FetchError>),
    QuotesLoaded(Vec<Quote>),
}

/// Funnels terminal input, the 1-second tick, and fetch completions into
/// one channel consumed by the event loop. The input thread dies with the
/// channel when the loop returns.
pub struct EventHandler {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        let input_tx = tx.clone();
        thread::spawn(move || {
            let mut last_tick = std::time::Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(CEvent::Key(key)) => {
                            if input_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = std::time::Instant::now();
                }
            }
        });

        Self { tx, rx }
    }

    /// A handle for background fetch threads to report back through.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
