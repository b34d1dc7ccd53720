//! Pure calendar arithmetic used by festival rules.
//!
//! Everything here is a free function over plain numbers or over the
//! [`MonthDay`] view, so the same weekday arithmetic serves Gregorian months
//! and lunar months (29 or 30 days).

use crate::date::Date;
use crate::weekday::Weekday;

/// A day positioned within its month.
///
/// Implemented by Gregorian [`Date`]s and by evaluation dates of either
/// calendar.
pub trait MonthDay {
    /// Day of the month (1-based).
    fn day(&self) -> u8;

    /// Day of the week.
    fn weekday(&self) -> Weekday;

    /// Length of the month containing this day.
    fn days_in_month(&self) -> u8;
}

impl MonthDay for Date {
    fn day(&self) -> u8 {
        self.day_of_month()
    }

    fn weekday(&self) -> Weekday {
        Date::weekday(self)
    }

    fn days_in_month(&self) -> u8 {
        Date::days_in_month(self)
    }
}

/// Whether a given year is a Gregorian leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given Gregorian month.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Day of April on which Qingming falls in `year`.
///
/// Uses the closed-form approximation
/// `floor(d * 0.2422 + c - floor(d / 4))` with `d = year mod 100` and
/// `c = 4.81` from 2000 onwards (`5.59` before).  This is not an ephemeris
/// calculation and can be off by a day in rare years.
///
/// # Example
/// ```
/// use fest_time::date_math::qingming_day;
///
/// assert_eq!(qingming_day(2024), 4);
/// assert_eq!(qingming_day(1999), 5);
/// ```
pub fn qingming_day(year: i32) -> u8 {
    let c = if year >= 2000 { 4.81 } else { 5.59 };
    let d = year.rem_euclid(100);
    let day = d as f64 * 0.2422 + c - (d / 4) as f64;
    day.floor() as u8
}

/// Day of April on which Hanshi (the day before Qingming) falls in `year`.
pub fn hanshi_day(year: i32) -> u8 {
    qingming_day(year) - 1
}

/// Report whether `date` is the `ordinal`-th occurrence of `weekday` in its
/// month.
///
/// * `ordinal > 0`: counting begins at the first day of the month.
/// * `ordinal == 0`: always `false`.
/// * `ordinal < 0`: counting begins at the last day of the month, so `-1`
///   is the last occurrence.
pub fn is_nth_weekday(date: &impl MonthDay, weekday: Weekday, ordinal: i32) -> bool {
    if date.weekday() != weekday || ordinal == 0 {
        return false;
    }
    let day = date.day() as i32;
    if ordinal > 0 {
        return (day - 1) / 7 == ordinal - 1;
    }

    let wanted = -ordinal;
    let mut count = 0;
    let mut d = date.days_in_month() as i32;
    while d >= 1 {
        if date.weekday().shifted(d - day) == weekday {
            count += 1;
            if count == wanted {
                return d == day;
            }
        }
        d -= 1;
    }
    false
}

/// Report whether a lunar date is New Year's Eve.
///
/// Day 30 of the twelfth month always is.  Day 29 is only when the month
/// has 29 days, i.e. when `next_day_month` (the lunar month of the following
/// calendar day) is no longer 12.
pub fn lunar_year_end_fires(month: u8, day: u8, next_day_month: u8) -> bool {
    month == 12 && (day == 30 || (day == 29 && next_day_month != 12))
}
