//! `FestivalResolver` — answers "which festivals fall on this day?".
//!
//! A query evaluates the solar rules against the Gregorian date, converts the
//! date to the lunar calendar, and evaluates the lunar rules against the
//! result.  Solar names come first, then lunar names, each in declaration
//! order.  Every failure degrades to a partial result: a lunar conversion
//! that goes wrong still leaves the solar festivals.

use std::sync::Arc;

use fest_core::errors::Result;
use fest_core::CalendarKind;
use fest_rules::{evaluate, EvaluationDate, Recurrence, RuleSet};
use fest_time::{ChineseLunarConverter, Date, LunarConverter, LunarDate};
use jiff::tz::TimeZone;
use tracing::{debug, warn};

use crate::time_zone::{resolve_time_zone, today_in};

/// Longest possible lunar month.
const MAX_LUNAR_MONTH_DAYS: u8 = 30;

/// Resolves festival names for solar dates.
///
/// The resolver holds an immutable rule set, a lunar converter and the name
/// of the time zone input dates are interpreted in.  It is `Send + Sync` and
/// can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct FestivalResolver {
    rules: Arc<RuleSet>,
    converter: Arc<dyn LunarConverter>,
    time_zone: String,
}

impl FestivalResolver {
    /// Create a resolver from its collaborators.
    pub fn new(
        rules: Arc<RuleSet>,
        converter: Arc<dyn LunarConverter>,
        time_zone: impl Into<String>,
    ) -> Self {
        Self {
            rules,
            converter,
            time_zone: time_zone.into(),
        }
    }

    /// Create a resolver using the bundled [`ChineseLunarConverter`].
    pub fn with_chinese_calendar(rules: RuleSet, time_zone: impl Into<String>) -> Self {
        Self::new(
            Arc::new(rules),
            Arc::new(ChineseLunarConverter::new()),
            time_zone,
        )
    }

    /// Return the rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Return the configured time-zone name.
    pub fn time_zone_name(&self) -> &str {
        &self.time_zone
    }

    /// Look up the configured time zone.
    pub fn time_zone(&self) -> Result<TimeZone> {
        resolve_time_zone(&self.time_zone)
    }

    /// Return the festivals on `solar_date` (`YYYY-MM-DD`).
    ///
    /// An unknown time zone or a malformed date yields an empty list; both
    /// are logged.
    ///
    /// # Example
    /// ```
    /// use fest_resolver::FestivalResolver;
    /// use fest_rules::RuleSet;
    ///
    /// let rules = RuleSet::from_strings(["solar(m1:d1)=New Year", "lunar(m1:d1)=Spring Festival"]);
    /// let resolver = FestivalResolver::with_chinese_calendar(rules, "UTC");
    /// assert_eq!(resolver.resolve("2024-01-01"), ["New Year"]);
    /// assert_eq!(resolver.resolve("2024-02-10"), ["Spring Festival"]);
    /// assert!(resolver.resolve("2024-1-1").is_empty());
    /// ```
    pub fn resolve(&self, solar_date: &str) -> Vec<String> {
        self.try_resolve(solar_date).unwrap_or_else(|e| {
            warn!(date = solar_date, error = %e, "festival query failed");
            Vec::new()
        })
    }

    /// Like [`FestivalResolver::resolve`], but reports an unknown time zone
    /// or a malformed date as an error.
    ///
    /// Lunar conversion failures are still absorbed: the solar festivals are
    /// returned on their own.
    pub fn try_resolve(&self, solar_date: &str) -> Result<Vec<String>> {
        self.time_zone()?;
        let date = Date::parse_iso(solar_date)?;
        Ok(self.festivals_on(date))
    }

    /// Return the festivals on the current date in the configured zone.
    pub fn resolve_today(&self) -> Vec<String> {
        self.try_resolve_today().unwrap_or_else(|e| {
            warn!(time_zone = %self.time_zone, error = %e, "festival query for today failed");
            Vec::new()
        })
    }

    /// Like [`FestivalResolver::resolve_today`], but reports failures.
    pub fn try_resolve_today(&self) -> Result<Vec<String>> {
        let today = today_in(&self.time_zone()?)?;
        Ok(self.festivals_on(today))
    }

    /// Return the festivals on an already parsed date.
    pub fn festivals_on(&self, date: Date) -> Vec<String> {
        let mut names = evaluate(&EvaluationDate::solar(date), &self.rules, None);
        match self.lunar_festivals(date) {
            Ok(lunar) => names.extend(lunar),
            Err(e) => warn!(%date, error = %e, "lunar evaluation skipped"),
        }
        names
    }

    fn lunar_festivals(&self, date: Date) -> Result<Vec<String>> {
        let conversion = self.converter.solar_to_lunar(date)?;
        if conversion.is_leap_month {
            debug!(%date, lunar = %conversion.date, "leap month, no lunar festivals");
            return Ok(Vec::new());
        }
        let lunar = LunarDate::parse(&conversion.date)?;
        let rules = self.rules.rules_for(CalendarKind::Lunar, lunar.month);
        // Only the 29th of month 12 can be New Year's Eve without being the 30th.
        let next_day_month = if lunar.month == 12
            && lunar.day == MAX_LUNAR_MONTH_DAYS - 1
            && rules.iter().any(|r| r.recurrence == Recurrence::LunarYearEnd)
        {
            self.next_day_lunar_month(date)
        } else {
            None
        };
        let days_in_month = if rules
            .iter()
            .any(|r| matches!(r.recurrence, Recurrence::LastWeekday(_)))
        {
            self.lunar_month_length(date, &lunar)
        } else {
            MAX_LUNAR_MONTH_DAYS
        };
        let eval = EvaluationDate::lunar(lunar, date.weekday(), days_in_month);
        Ok(evaluate(&eval, &self.rules, next_day_month))
    }

    /// Lunar month of the day after `date`, or `None` if it cannot be
    /// determined.
    fn next_day_lunar_month(&self, date: Date) -> Option<u8> {
        let lookup = || -> Result<u8> {
            let next = date.next_day()?;
            Ok(LunarDate::parse(&self.converter.solar_to_lunar(next)?.date)?.month)
        };
        match lookup() {
            Ok(month) => Some(month),
            Err(e) => {
                debug!(%date, error = %e, "next-day lunar month unavailable");
                None
            }
        }
    }

    /// Length of the (non-leap) lunar month containing `lunar`.
    ///
    /// Converts the solar day that would be day 30 of the month: the month
    /// has 30 days exactly when that day is still day 30 of the same
    /// non-leap month.  If that day cannot be converted the month is taken
    /// to have 30 days.
    fn lunar_month_length(&self, date: Date, lunar: &LunarDate) -> u8 {
        if lunar.day == MAX_LUNAR_MONTH_DAYS {
            return MAX_LUNAR_MONTH_DAYS;
        }
        let has_day_30 = || -> Result<bool> {
            let day_30 = date.add_days(i32::from(MAX_LUNAR_MONTH_DAYS - lunar.day))?;
            let conversion = self.converter.solar_to_lunar(day_30)?;
            let later = LunarDate::parse(&conversion.date)?;
            Ok(!conversion.is_leap_month
                && later.month == lunar.month
                && later.day == MAX_LUNAR_MONTH_DAYS)
        };
        match has_day_30() {
            Ok(true) => MAX_LUNAR_MONTH_DAYS,
            Ok(false) => MAX_LUNAR_MONTH_DAYS - 1,
            Err(e) => {
                debug!(%date, error = %e, "lunar month length unavailable");
                MAX_LUNAR_MONTH_DAYS
            }
        }
    }
}
