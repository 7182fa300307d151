//! Wall-clock snapshot, timezone adjustment, and redraw gating
//!
//! The hardware RTC keeps UTC; the timezone offset is applied only at
//! render time so a resync never has to care about local time.

use core::fmt::Write;

use heapless::String;

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970)
pub const NTP_UNIX_OFFSET: u64 = 2_208_988_800;

/// A date/time tuple as kept by the hardware RTC (UTC)
///
/// `weekday` is 0 = Sunday through 6 = Saturday, matching the RP2040
/// RTC's day-of-week register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallClock {
    /// Hour of day after applying a signed UTC offset, wrapped into [0,24)
    ///
    /// The offset magnitude is below 24, so at most one ±24 adjustment
    /// is ever needed.
    pub fn local_hour(&self, utc_offset_hours: i8) -> u8 {
        debug_assert!(self.hour < 24);
        debug_assert!(utc_offset_hours > -24 && utc_offset_hours < 24);

        let mut hour = self.hour as i16 + utc_offset_hours as i16;
        if hour < 0 {
            hour += 24;
        } else if hour >= 24 {
            hour -= 24;
        }
        hour as u8
    }

    /// Zero-padded `HH:MM:SS` in local time
    pub fn hhmmss(&self, utc_offset_hours: i8) -> String<8> {
        let mut text = String::new();
        // Cannot overflow: 8 bytes exactly
        let _ = write!(
            text,
            "{:02}:{:02}:{:02}",
            self.local_hour(utc_offset_hours),
            self.minute,
            self.second
        );
        text
    }

    /// Convert a Unix timestamp (seconds, UTC) to a civil date/time
    pub fn from_unix(unix_secs: u64) -> Self {
        let mut days = (unix_secs / 86_400) as u32;
        let secs_of_day = (unix_secs % 86_400) as u32;

        // 1970-01-01 was a Thursday; weekday 0 = Sunday
        let weekday = ((days + 4) % 7) as u8;

        let mut year: u16 = 1970;
        loop {
            let days_in_year = if is_leap_year(year) { 366 } else { 365 };
            if days < days_in_year {
                break;
            }
            days -= days_in_year;
            year += 1;
        }

        let mut month: u8 = 1;
        for &month_days in month_lengths(year).iter() {
            if days < month_days as u32 {
                break;
            }
            days -= month_days as u32;
            month += 1;
        }

        Self {
            year,
            month,
            day: (days + 1) as u8,
            weekday,
            hour: (secs_of_day / 3600) as u8,
            minute: ((secs_of_day % 3600) / 60) as u8,
            second: (secs_of_day % 60) as u8,
        }
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn month_lengths(year: u16) -> [u8; 12] {
    if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    }
}

/// Gates redraws to one per elapsed wall-clock second
///
/// The render loop ticks far faster than 1 Hz; this bounds the actual
/// redraw rate and avoids flicker and wasted CPU.
#[derive(Debug, Default)]
pub struct RedrawGate {
    last_second: Option<u8>,
}

impl RedrawGate {
    pub const fn new() -> Self {
        Self { last_second: None }
    }

    /// True exactly once per distinct observed second value
    pub fn should_redraw(&mut self, second: u8) -> bool {
        if self.last_second == Some(second) {
            false
        } else {
            self.last_second = Some(second);
            true
        }
    }
}
