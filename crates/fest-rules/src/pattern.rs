//! Rule pattern grammar.
//!
//! A pattern reads `calendar(mMONTH:VARIANT)`:
//!
//! | variant | meaning |
//! |---|---|
//! | `ld` | last day of the twelfth lunar month |
//! | `d<day>` | fixed day of the month |
//! | `w<ordinal>n<weekday>` | `ordinal`-th `weekday` of the month |
//! | `fwn<weekday>` | first `weekday` of the month |
//! | `lwn<weekday>`, `lw<weekday>` | last `weekday` of the month |
//! | `s456`, `s345` | Qingming, and the day before it (Hanshi) |
//!
//! Weekday digits run from 1 (Sunday) to 7 (Saturday).  A pattern is
//! matched whole against one regular expression; anything else is rejected
//! rather than partially interpreted.

use std::str::FromStr;
use std::sync::LazyLock;

use fest_core::errors::{Error, Result};
use fest_core::CalendarKind;
use fest_time::Weekday;
use regex::{Captures, Regex};

use crate::recurrence::{Recurrence, SolarTermCode};

// Longer prefixes precede the ones they overlap: `ld` before `d`, `lw` and
// `fwn` before `w`.
static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(solar|lunar)\(m(\d{1,2}):(?:(ld)|lwn?(\d)|fwn(\d)|s(\d{3})|d(\d{1,2})|w(\d)n(\d))\)$",
    )
    .expect("pattern grammar is a valid regex")
});

/// A parsed rule pattern: calendar, month, and recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    /// Calendar the pattern is evaluated against.
    pub calendar: CalendarKind,
    /// Month (1–12) the pattern belongs to.
    pub month: u8,
    /// Day-spec within the month.
    pub recurrence: Recurrence,
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = PATTERN
            .captures(s)
            .ok_or_else(|| Error::Pattern(format!("`{s}` does not match the rule grammar")))?;

        let calendar = CalendarKind::from_keyword(&caps[1])
            .ok_or_else(|| Error::Pattern(format!("unknown calendar in `{s}`")))?;
        let month: u8 = number(&caps, 2, s)?;
        if !(1..=12).contains(&month) {
            return Err(Error::Pattern(format!("month {month} out of range in `{s}`")));
        }

        let recurrence = if caps.get(3).is_some() {
            Recurrence::LunarYearEnd
        } else if caps.get(4).is_some() {
            Recurrence::LastWeekday(weekday(&caps, 4, s)?)
        } else if caps.get(5).is_some() {
            Recurrence::NthWeekday {
                ordinal: 1,
                weekday: weekday(&caps, 5, s)?,
            }
        } else if let Some(code) = caps.get(6) {
            let term = SolarTermCode::from_code(code.as_str()).ok_or_else(|| {
                Error::Pattern(format!("unknown solar term `s{}` in `{s}`", code.as_str()))
            })?;
            Recurrence::SolarTerm(term)
        } else if caps.get(7).is_some() {
            let day: u8 = number(&caps, 7, s)?;
            if !(1..=31).contains(&day) {
                return Err(Error::Pattern(format!("day {day} out of range in `{s}`")));
            }
            Recurrence::FixedDay(day)
        } else {
            let ordinal: u8 = number(&caps, 8, s)?;
            if !(1..=5).contains(&ordinal) {
                return Err(Error::Pattern(format!("ordinal {ordinal} out of range in `{s}`")));
            }
            Recurrence::NthWeekday {
                ordinal,
                weekday: weekday(&caps, 9, s)?,
            }
        };

        match (calendar, month, recurrence) {
            (CalendarKind::Lunar, _, Recurrence::SolarTerm(_)) => Err(Error::Pattern(format!(
                "solar-term days are only defined on the solar calendar: `{s}`"
            ))),
            (CalendarKind::Solar, _, Recurrence::LunarYearEnd) | (_, 1..=11, Recurrence::LunarYearEnd) => {
                Err(Error::Pattern(format!(
                    "`ld` is only valid as lunar(m12:ld): `{s}`"
                )))
            }
            _ => Ok(Pattern {
                calendar,
                month,
                recurrence,
            }),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(m{}:{})", self.calendar, self.month, self.recurrence)
    }
}

fn number(caps: &Captures<'_>, group: usize, s: &str) -> Result<u8> {
    caps[group]
        .parse()
        .map_err(|_| Error::Pattern(format!("bad number in `{s}`")))
}

fn weekday(caps: &Captures<'_>, group: usize, s: &str) -> Result<Weekday> {
    let digit: u8 = number(caps, group, s)?;
    digit
        .checked_sub(1)
        .and_then(Weekday::from_sunday_index)
        .ok_or_else(|| Error::Pattern(format!("weekday {digit} out of range [1, 7] in `{s}`")))
}

/// Parse the pattern half of a rule.
///
/// Returns `None` for anything outside the grammar.
///
/// # Example
/// ```
/// use fest_core::CalendarKind;
/// use fest_rules::{parse_pattern, Recurrence};
///
/// assert_eq!(
///     parse_pattern("solar(m1:d1)"),
///     Some((CalendarKind::Solar, 1, Recurrence::FixedDay(1)))
/// );
/// assert_eq!(parse_pattern("solar(m1:x1)"), None);
/// ```
pub fn parse_pattern(pattern: &str) -> Option<(CalendarKind, u8, Recurrence)> {
    pattern
        .parse::<Pattern>()
        .ok()
        .map(|p| (p.calendar, p.month, p.recurrence))
}
