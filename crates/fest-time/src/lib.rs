//! # fest-time
//!
//! Date, weekday, calendar arithmetic, and Chinese lunar conversion types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type.
pub mod date;

/// Leap years, month lengths, Qingming, nth-weekday and year-end tests.
pub mod date_math;

/// Solar-to-lunar conversion.
pub mod lunar;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::Date;
pub use date_math::MonthDay;
pub use lunar::{ChineseLunarConverter, LunarConversion, LunarConverter, LunarDate, LunarDay};
pub use weekday::Weekday;
