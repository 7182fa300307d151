//! Shared access to the hardware real-time clock
//!
//! The render task reads the RTC every tick while the network task
//! writes it after an NTP sync. Both accesses are short register
//! operations, so a blocking critical-section mutex is enough.

use core::cell::RefCell;

use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc, RtcError};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use cheerclock_core::clock::WallClock;

pub struct SharedRtc {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Rtc<'static, RTC>>>,
}

impl SharedRtc {
    pub fn new(rtc: Rtc<'static, RTC>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(rtc)),
        }
    }

    /// Current RTC time (UTC)
    pub fn read(&self) -> Result<WallClock, RtcError> {
        self.inner
            .lock(|rtc| rtc.borrow().now().map(wall_from_datetime))
    }

    /// Step the RTC to a new time (UTC)
    pub fn write(&self, clock: WallClock) -> Result<(), RtcError> {
        self.inner
            .lock(|rtc| rtc.borrow_mut().set_datetime(datetime_from_wall(clock)))
    }
}

fn wall_from_datetime(dt: DateTime) -> WallClock {
    WallClock {
        year: dt.year,
        month: dt.month,
        day: dt.day,
        weekday: weekday_num(dt.day_of_week),
        hour: dt.hour,
        minute: dt.minute,
        second: dt.second,
    }
}

pub fn datetime_from_wall(clock: WallClock) -> DateTime {
    DateTime {
        year: clock.year,
        month: clock.month,
        day: clock.day,
        day_of_week: day_of_week(clock.weekday),
        hour: clock.hour,
        minute: clock.minute,
        second: clock.second,
    }
}

// Weekday 0 = Sunday, matching the RTC's day-of-week register
fn day_of_week(weekday: u8) -> DayOfWeek {
    match weekday {
        0 => DayOfWeek::Sunday,
        1 => DayOfWeek::Monday,
        2 => DayOfWeek::Tuesday,
        3 => DayOfWeek::Wednesday,
        4 => DayOfWeek::Thursday,
        5 => DayOfWeek::Friday,
        _ => DayOfWeek::Saturday,
    }
}

fn weekday_num(day: DayOfWeek) -> u8 {
    match day {
        DayOfWeek::Sunday => 0,
        DayOfWeek::Monday => 1,
        DayOfWeek::Tuesday => 2,
        DayOfWeek::Wednesday => 3,
        DayOfWeek::Thursday => 4,
        DayOfWeek::Friday => 5,
        DayOfWeek::Saturday => 6,
    }
}
