//! Chinese lunisolar calendar conversion.
//!
//! [`LunarConverter`] is the seam through which the resolver turns a solar
//! date into its lunar counterpart.  Its output is deliberately textual
//! (`YYYY-MM-DD` plus a leap-month flag) so that third-party converters can be
//! plugged in without sharing our date types; [`LunarDate::parse`] reads it
//! back.
//!
//! [`ChineseLunarConverter`] is the bundled implementation, driven by the
//! well-known month-length table for lunar years 1900–2100.

use fest_core::errors::{Error, Result};

use crate::date::Date;

/// A lunar calendar date.  Leap-month information is carried separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LunarDate {
    /// Lunar year (the Gregorian year in which it begins).
    pub year: i32,
    /// Lunar month number (1–12).
    pub month: u8,
    /// Day of the lunar month (1–30).
    pub day: u8,
}

impl LunarDate {
    /// Parse a lunar date from converter output.
    ///
    /// The strict `YYYY-MM-DD` form is tried first; otherwise the text is
    /// split on `-` into three integers (`"2024-1-5"` is accepted).  Month and
    /// day are range-checked against lunar limits (1–12, 1–30).
    ///
    /// # Example
    /// ```
    /// use fest_time::LunarDate;
    ///
    /// let d = LunarDate::parse("2023-12-30").unwrap();
    /// assert_eq!((d.year, d.month, d.day), (2023, 12, 30));
    /// assert_eq!(LunarDate::parse("2024-1-5").unwrap().day, 5);
    /// assert!(LunarDate::parse("2024-13-01").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (year, month, day) = match split_strict(s) {
            Some(ymd) => ymd,
            None => split_loose(s).ok_or_else(|| {
                Error::Conversion(format!("`{s}` is not a year-month-day lunar date"))
            })?,
        };
        Self::new(year, month, day)
    }

    /// Create a lunar date, checking month and day ranges.
    pub fn new(year: i32, month: i64, day: i64) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::Conversion(format!("lunar month {month} out of range")));
        }
        if !(1..=30).contains(&day) {
            return Err(Error::Conversion(format!("lunar day {day} out of range")));
        }
        Ok(Self {
            year,
            month: month as u8,
            day: day as u8,
        })
    }
}

impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn split_strict(s: &str) -> Option<(i32, i64, i64)> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    if !b
        .iter()
        .enumerate()
        .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
    {
        return None;
    }
    Some((
        s[0..4].parse().ok()?,
        s[5..7].parse().ok()?,
        s[8..10].parse().ok()?,
    ))
}

fn split_loose(s: &str) -> Option<(i32, i64, i64)> {
    let parts: Vec<&str> = s.trim().split('-').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parts[0].trim().parse().ok()?,
        parts[1].trim().parse().ok()?,
        parts[2].trim().parse().ok()?,
    ))
}

/// Raw output of a solar-to-lunar conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunarConversion {
    /// Lunar date in textual `year-month-day` form.
    pub date: String,
    /// `true` if the date falls in an intercalary (leap) month.
    pub is_leap_month: bool,
}

/// Converts Gregorian dates into lunar dates.
///
/// Implementations must be pure: the same input always yields the same
/// output and no state is mutated.
pub trait LunarConverter: std::fmt::Debug + Send + Sync {
    /// Convert a solar date to its lunar counterpart.
    fn solar_to_lunar(&self, date: Date) -> Result<LunarConversion>;
}

// ── Table-driven converter ────────────────────────────────────────────────────

/// First lunar year covered by [`LUNAR_INFO`].
pub const FIRST_LUNAR_YEAR: i32 = 1900;

/// Last lunar year covered by [`LUNAR_INFO`].
pub const LAST_LUNAR_YEAR: i32 = 2100;

/// Lunar 1900-01-01 fell on solar 1900-01-31 (serial 31).
const EPOCH_SERIAL: i32 = 31;

/// Month layout of each lunar year from 1900 to 2100.
///
/// * bits 0–3: leap month number, 0 if the year has none;
/// * bits 4–15: months 12 down to 1, set for a 30-day month, clear for 29;
/// * bit 16: set if the leap month has 30 days.
const LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06aa0, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520, // 2100
];

/// A structured lunar date with its leap-month flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDay {
    /// The lunar date.
    pub date: LunarDate,
    /// `true` if the month is intercalary.
    pub is_leap_month: bool,
}

/// Table-driven Chinese lunisolar converter for lunar years 1900–2100.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChineseLunarConverter;

impl ChineseLunarConverter {
    /// Create a converter.
    pub fn new() -> Self {
        Self
    }

    /// Convert a solar date into a structured lunar day.
    ///
    /// # Errors
    /// Returns [`Error::Conversion`] for dates before 1900-01-31 or after the
    /// end of lunar year 2100.
    ///
    /// # Example
    /// ```
    /// use fest_time::{ChineseLunarConverter, Date};
    ///
    /// let conv = ChineseLunarConverter::new();
    /// let eve = conv.lunar_day(Date::from_ymd(2024, 2, 9).unwrap()).unwrap();
    /// assert_eq!(eve.date.to_string(), "2023-12-30");
    /// assert!(!eve.is_leap_month);
    /// ```
    pub fn lunar_day(&self, date: Date) -> Result<LunarDay> {
        let mut offset = date.serial() - EPOCH_SERIAL;
        if offset < 0 {
            return Err(Error::Conversion(format!(
                "{date} precedes lunar year {FIRST_LUNAR_YEAR}"
            )));
        }

        let mut year = FIRST_LUNAR_YEAR;
        loop {
            if year > LAST_LUNAR_YEAR {
                return Err(Error::Conversion(format!(
                    "{date} is beyond lunar year {LAST_LUNAR_YEAR}"
                )));
            }
            let days = year_length(year);
            if offset < days {
                break;
            }
            offset -= days;
            year += 1;
        }

        let leap = leap_month(year);
        for month in 1..=12u8 {
            let days = month_length(year, month, false).unwrap_or(29) as i32;
            if offset < days {
                return Ok(lunar_day(year, month, offset, false));
            }
            offset -= days;
            if month == leap {
                let days = leap_month_length(year) as i32;
                if offset < days {
                    return Ok(lunar_day(year, month, offset, true));
                }
                offset -= days;
            }
        }
        Err(Error::Conversion(format!(
            "{date} does not fall within lunar year {year}"
        )))
    }
}

impl LunarConverter for ChineseLunarConverter {
    fn solar_to_lunar(&self, date: Date) -> Result<LunarConversion> {
        let day = self.lunar_day(date)?;
        Ok(LunarConversion {
            date: day.date.to_string(),
            is_leap_month: day.is_leap_month,
        })
    }
}

fn lunar_day(year: i32, month: u8, offset: i32, is_leap_month: bool) -> LunarDay {
    LunarDay {
        date: LunarDate {
            year,
            month,
            day: (offset + 1) as u8,
        },
        is_leap_month,
    }
}

fn info(year: i32) -> Option<u32> {
    if (FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR).contains(&year) {
        Some(LUNAR_INFO[(year - FIRST_LUNAR_YEAR) as usize])
    } else {
        None
    }
}

/// Return the leap month of lunar `year`, or 0 if it has none (or is not
/// covered by the table).
pub fn leap_month(year: i32) -> u8 {
    info(year).map_or(0, |i| (i & 0xf) as u8)
}

fn leap_month_length(year: i32) -> u8 {
    match info(year) {
        Some(i) if i & 0xf != 0 => {
            if i & 0x10000 != 0 {
                30
            } else {
                29
            }
        }
        _ => 0,
    }
}

/// Return the number of days (29 or 30) in a lunar month.
///
/// Returns `None` if the year is outside the table, the month is out of
/// range, or a leap month is requested for a month that has none.
pub fn month_length(year: i32, month: u8, is_leap_month: bool) -> Option<u8> {
    let i = info(year)?;
    if !(1..=12).contains(&month) {
        return None;
    }
    if is_leap_month {
        return (leap_month(year) == month).then(|| leap_month_length(year));
    }
    Some(if i & (0x10000 >> month) != 0 { 30 } else { 29 })
}

fn year_length(year: i32) -> i32 {
    (1..=12u8)
        .map(|m| month_length(year, m, false).unwrap_or(29) as i32)
        .sum::<i32>()
        + leap_month_length(year) as i32
}
