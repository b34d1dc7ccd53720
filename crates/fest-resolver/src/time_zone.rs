//! Time-zone lookup and "today" in a named zone.

use fest_core::config::LOCAL_TIME_ZONE;
use fest_core::errors::{Error, Result};
use fest_time::Date;
use jiff::tz::TimeZone;
use jiff::Zoned;

/// Look up a time zone by IANA name.  `"Local"` is the system zone.
///
/// # Example
/// ```
/// use fest_resolver::time_zone::resolve_time_zone;
///
/// assert!(resolve_time_zone("Asia/Shanghai").is_ok());
/// assert!(resolve_time_zone("Mars/Olympus_Mons").is_err());
/// ```
pub fn resolve_time_zone(name: &str) -> Result<TimeZone> {
    if name == LOCAL_TIME_ZONE {
        return TimeZone::try_system()
            .map_err(|e| Error::TimeZone(format!("system time zone unavailable: {e}")));
    }
    TimeZone::get(name).map_err(|e| Error::TimeZone(format!("unknown time zone `{name}`: {e}")))
}

/// Return the civil date of `now` in `tz`.
pub fn date_in(now: &Zoned, tz: &TimeZone) -> Result<Date> {
    let civil = now.with_time_zone(tz.clone()).date();
    let year = u16::try_from(civil.year())
        .map_err(|_| Error::Date(format!("year {} out of range", civil.year())))?;
    Date::from_ymd(year, civil.month() as u8, civil.day() as u8)
}

/// Return today's date in `tz`.
pub fn today_in(tz: &TimeZone) -> Result<Date> {
    date_in(&Zoned::now(), tz)
}
