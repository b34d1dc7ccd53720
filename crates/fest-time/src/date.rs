//! `Date` type — a Gregorian calendar date stored as a day serial number.
//!
//! Serial 1 is January 1, 1900.  Any proleptic Gregorian date from
//! 0001-01-01 to 9999-12-31 is representable; earlier dates have zero or
//! negative serials.

use crate::date_math::{days_in_month, is_leap_year};
use crate::weekday::Weekday;
use fest_core::errors::{Error, Result};

/// A Gregorian calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

impl Date {
    /// Minimum valid date: January 1, 0001.
    pub const MIN: Date = Date(-693_594);

    /// Maximum valid date: December 31, 9999.
    pub const MAX: Date = Date(2_958_464);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [{MIN_YEAR}, {MAX_YEAR}]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// Parse a strict ISO 8601 calendar date (`YYYY-MM-DD`).
    ///
    /// Exactly four year digits and two month and day digits are required;
    /// the date must also be valid and within the supported range.
    ///
    /// # Example
    /// ```
    /// use fest_time::Date;
    ///
    /// let d = Date::parse_iso("2024-04-04").unwrap();
    /// assert_eq!((d.year(), d.month(), d.day_of_month()), (2024, 4, 4));
    /// assert!(Date::parse_iso("2024-4-4").is_err());
    /// ```
    pub fn parse_iso(s: &str) -> Result<Self> {
        let b = s.as_bytes();
        let well_formed = b.len() == 10
            && b[4] == b'-'
            && b[7] == b'-'
            && b
                .iter()
                .enumerate()
                .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
        if !well_formed {
            return Err(Error::Date(format!("`{s}` is not a YYYY-MM-DD date")));
        }
        // All slices are ASCII digits, so the integer parses cannot fail.
        let year: u16 = s[0..4].parse().map_err(|_| Error::Date(s.to_string()))?;
        let month: u8 = s[5..7].parse().map_err(|_| Error::Date(s.to_string()))?;
        let day: u8 = s[8..10].parse().map_err(|_| Error::Date(s.to_string()))?;
        Self::from_ymd(year, month, day)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year (1–9999).
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return `(year, month, day)`.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Return the number of days in this date's month.
    pub fn days_in_month(&self) -> u8 {
        let (y, m, _) = ymd_from_serial(self.0);
        days_in_month(y, m)
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // 1900-01-01 was a Monday.
        Weekday::Monday.shifted(self.0 - 1)
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self.0 + n;
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::Date(format!(
                "date arithmetic: result {serial} out of range"
            )));
        }
        Ok(Date(serial))
    }

    /// Return the date following this one.
    pub fn next_day(self) -> Result<Self> {
        self.add_days(1)
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_iso(s)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

const MIN_YEAR: u16 = 1;
const MAX_YEAR: u16 = 9999;

/// Day ordinal (0001-01-01 = 1) of 1899-12-31, i.e. serial 0.
const SERIAL_OFFSET: i32 = 693_595;

/// Number of days in the proleptic Gregorian calendar before `year`.
fn days_before_year(year: i32) -> i32 {
    let p = year - 1;
    p * 365 + p / 4 - p / 100 + p / 400
}

/// Convert (year, month, day) to a serial number.  Serial 1 = 1900-01-01.
fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let mut ordinal =
        days_before_year(year as i32) + MONTH_OFFSET[month as usize - 1] as i32 + day as i32;
    if month > 2 && is_leap_year(year) {
        ordinal += 1;
    }
    ordinal - SERIAL_OFFSET
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let ordinal = serial + SERIAL_OFFSET;
    // 146 097 days per 400 years.
    let mut y = (i64::from(ordinal) * 400 / 146_097 + 1).clamp(1, MAX_YEAR as i64) as i32;
    while y > 1 && ordinal <= days_before_year(y) {
        y -= 1;
    }
    while ordinal > days_before_year(y + 1) {
        y += 1;
    }
    let year = y as u16;
    let mut remaining = ordinal - days_before_year(y);
    let mut m = 1u8;
    loop {
        let days = days_in_month(year, m) as i32;
        if remaining <= days {
            break;
        }
        remaining -= days;
        m += 1;
    }
    (year, m, remaining as u8)
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let d = Date::from_ymd(1900, 1, 1).unwrap();
        assert_eq!(d.serial(), 1);
        assert_eq!(Date::from_ymd(2024, 2, 15).unwrap().days_in_month(), 29);
        assert_eq!(Date::from_ymd(1, 1, 1).unwrap(), Date::MIN);
        assert_eq!(Date::from_ymd(9999, 12, 31).unwrap(), Date::MAX);
        assert_eq!(Date::from_ymd(1970, 1, 1).unwrap().serial(), 25_568);
    }

    #[test]
    fn test_roundtrip() {
        let dates = [
            (1900, 1, 1),
            (1900, 12, 31),
            (2000, 2, 29),
            (2100, 2, 28),
            (2024, 2, 10),
            (2199, 12, 31),
            (1, 1, 1),
            (400, 2, 29),
            (1582, 10, 4),
            (1899, 12, 31),
            (2200, 1, 1),
            (9999, 12, 31),
        ];
        for (y, m, d) in dates {
            let date = Date::from_ymd(y, m, d).unwrap();
            assert_eq!(date.ymd(), (y, m, d), "mismatch for {y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn test_weekday() {
        assert_eq!(Date::from_ymd(2024, 1, 1).unwrap().weekday(), Weekday::Monday);
        assert_eq!(Date::from_ymd(2024, 4, 4).unwrap().weekday(), Weekday::Thursday);
        assert_eq!(Date::from_ymd(2025, 1, 28).unwrap().weekday(), Weekday::Tuesday);
        assert_eq!(Date::from_ymd(1899, 12, 31).unwrap().weekday(), Weekday::Sunday);
        assert_eq!(Date::from_ymd(2200, 1, 1).unwrap().weekday(), Weekday::Wednesday);
        assert_eq!(Date::MIN.weekday(), Weekday::Monday);
    }

    #[test]
    fn test_parse_iso() {
        let d = Date::parse_iso("2024-01-01").unwrap();
        assert_eq!(d.to_string(), "2024-01-01");
        assert!(Date::parse_iso("2024-1-01").is_err());
        assert!(Date::parse_iso("2024/01/01").is_err());
        assert!(Date::parse_iso("2023-02-29").is_err());
        assert!(Date::parse_iso("0000-01-01").is_err());
        assert_eq!(Date::parse_iso("1899-12-31").unwrap().serial(), 0);
        assert_eq!(Date::parse_iso("2200-01-01").unwrap().to_string(), "2200-01-01");
        assert!(Date::parse_iso("").is_err());
        assert!(Date::parse_iso("２０２４-01-01").is_err());
        assert_eq!("2024-02-29".parse::<Date>(), Date::from_ymd(2024, 2, 29));
    }

    #[test]
    fn test_next_day_crosses_month() {
        let d = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(d.next_day().unwrap(), Date::from_ymd(2024, 3, 1).unwrap());
        assert!(Date::MAX.next_day().is_err());
        assert!(Date::MIN.add_days(-1).is_err());
        assert_eq!(
            Date::from_ymd(1899, 12, 31).unwrap().next_day().unwrap(),
            Date::from_ymd(1900, 1, 1).unwrap()
        );
    }
}
