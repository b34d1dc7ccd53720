//! `Recurrence` — the day-spec half of a festival rule.

use fest_time::Weekday;

/// Solar terms that festival rules can be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolarTermCode {
    /// Qingming day itself (`s456`).
    Qingming,
    /// Hanshi, the day before Qingming (`s345`).
    Hanshi,
}

impl SolarTermCode {
    /// Look up a solar term by its three-digit pattern code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "456" => Some(SolarTermCode::Qingming),
            "345" => Some(SolarTermCode::Hanshi),
            _ => None,
        }
    }

    /// Return the three-digit pattern code.
    pub fn code(&self) -> &'static str {
        match self {
            SolarTermCode::Qingming => "456",
            SolarTermCode::Hanshi => "345",
        }
    }
}

/// How a festival recurs within its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recurrence {
    /// A fixed day of the month.
    FixedDay(u8),
    /// The `ordinal`-th `weekday` of the month, counted from the start.
    NthWeekday {
        /// 1-based occurrence number.
        ordinal: u8,
        /// Day of the week.
        weekday: Weekday,
    },
    /// The last `weekday` of the month.
    LastWeekday(Weekday),
    /// A day fixed relative to a solar term (solar calendar only).
    SolarTerm(SolarTermCode),
    /// The last day of the twelfth lunar month (lunar calendar only).
    LunarYearEnd,
}

impl std::fmt::Display for Recurrence {
    /// Formats the recurrence in pattern notation (the part after `:`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recurrence::FixedDay(d) => write!(f, "d{d}"),
            Recurrence::NthWeekday { ordinal, weekday } => {
                write!(f, "w{ordinal}n{}", weekday.sunday_index() + 1)
            }
            Recurrence::LastWeekday(weekday) => write!(f, "lwn{}", weekday.sunday_index() + 1),
            Recurrence::SolarTerm(code) => write!(f, "s{}", code.code()),
            Recurrence::LunarYearEnd => f.write_str("ld"),
        }
    }
}
