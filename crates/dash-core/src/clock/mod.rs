//! Displayable wall clock kept in step with an unreliable network time source
//!
//! The [`ClockService`] owns the displayed fields and decides, once per
//! refresh cycle, whether to resynchronize, read the authoritative time,
//! or advance the seconds locally.

mod service;

pub use service::ClockService;

use core::fmt::Write;

use heapless::String;
use thiserror_no_std::Error;

use crate::telemetry::Timestamp;

/// Three-letter month names, index 0 = January.
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Date line shown before the first successful sync.
const DATE_PLACEHOLDER: &str = "DD Mmm 'YY";

/// Length of the rendered date line, e.g. `18 Oct '26`.
pub const DATE_TEXT_LEN: usize = 10;

/// Authoritative local calendar time as reported by a [`TimeSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTime {
    pub year: u16,
    /// 1 = January
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CalendarTime {
    pub const fn wall_time(&self) -> WallTime {
        WallTime {
            hour: self.hour,
            minute: self.minute,
            second: self.second,
        }
    }

    pub const fn date(&self) -> CalendarDate {
        CalendarDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }
}

/// Time-of-day part of the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallTime {
    /// Advance one second with carry into minutes and hours.
    ///
    /// The hour wraps from 23 to 0 without touching any date: rolling the
    /// date over is left to the next authoritative refresh.
    pub fn increment(&mut self) {
        self.second += 1;
        if self.second >= 60 {
            self.second = 0;
            self.minute += 1;
            if self.minute >= 60 {
                self.minute = 0;
                self.hour = (self.hour + 1) % 24;
            }
        }
    }
}

/// Date part of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub fn month_abbreviation(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|idx| MONTH_ABBREVIATIONS.get(idx as usize))
            .copied()
            .unwrap_or("???")
    }
}

/// Fields rendered by the clock panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockState {
    pub time: WallTime,
    /// Unknown until the first successful read of the time source
    pub date: Option<CalendarDate>,
}

impl ClockState {
    pub fn hour_text(&self) -> String<2> {
        two_digits(self.time.hour)
    }

    pub fn minute_text(&self) -> String<2> {
        two_digits(self.time.minute)
    }

    pub fn second_text(&self) -> String<2> {
        two_digits(self.time.second)
    }

    /// `DD Mon 'YY`, or a placeholder while the date is unknown.
    pub fn date_text(&self) -> String<DATE_TEXT_LEN> {
        let mut s = String::new();
        match self.date {
            Some(date) => {
                let _ = write!(
                    s,
                    "{:02} {} '{:02}",
                    date.day,
                    date.month_abbreviation(),
                    date.year % 100
                );
            }
            None => {
                let _ = s.push_str(DATE_PLACEHOLDER);
            }
        }
        s
    }

    /// `HH:MM:SS` stamp used for min/max events.
    pub fn timestamp(&self) -> Timestamp {
        let mut s = Timestamp::new();
        let _ = write!(
            s,
            "{:02}:{:02}:{:02}",
            self.time.hour, self.time.minute, self.time.second
        );
        s
    }

    /// Overwrite every field from an authoritative reading.
    pub(crate) fn apply(&mut self, now: &CalendarTime) {
        self.time = now.wall_time();
        self.date = Some(now.date());
    }
}

fn two_digits(value: u8) -> String<2> {
    let mut s = String::new();
    let _ = write!(s, "{:02}", value % 100);
    s
}

/// External wall-clock provider (e.g. SNTP on top of the chip's RTC).
pub trait TimeSource {
    type Error: core::fmt::Debug;

    /// Ask the source to resynchronize against `server`, applying
    /// `utc_offset_secs` to subsequent local readings.
    ///
    /// Implementations must return within a bounded time.
    fn synchronize(&mut self, server: &str, utc_offset_secs: i32) -> Result<(), Self::Error>;

    /// Current local time if the source can provide it right now.
    fn local_time(&mut self) -> Option<CalendarTime>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Time sync failed: {0}")]
    SyncFailed(String<64>),
    #[error("Time source reported no local time")]
    TimeUnavailable,
}
