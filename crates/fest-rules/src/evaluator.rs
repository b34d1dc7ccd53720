//! Rule evaluation against a concrete date.

use fest_core::CalendarKind;
use fest_time::date_math::{hanshi_day, is_nth_weekday, lunar_year_end_fires, qingming_day};
use fest_time::{Date, LunarDate, MonthDay, Weekday};

use crate::recurrence::{Recurrence, SolarTermCode};
use crate::rule::FestivalRule;
use crate::rule_set::RuleSet;

/// A date prepared for rule evaluation in one calendar.
///
/// `weekday` is always the real day of the week of the underlying solar
/// day, and `days_in_month` is the length of the month in the tagged
/// calendar (28–31 for solar, 29 or 30 for lunar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvaluationDate {
    /// Calendar the fields below are expressed in.
    pub calendar: CalendarKind,
    /// Year.
    pub year: i32,
    /// Month (1–12).
    pub month: u8,
    /// Day of the month.
    pub day: u8,
    /// Day of the week.
    pub weekday: Weekday,
    /// Length of the month.
    pub days_in_month: u8,
}

impl EvaluationDate {
    /// Evaluation view of a Gregorian date.
    pub fn solar(date: Date) -> Self {
        let (year, month, day) = date.ymd();
        Self {
            calendar: CalendarKind::Solar,
            year: year as i32,
            month,
            day,
            weekday: date.weekday(),
            days_in_month: date.days_in_month(),
        }
    }

    /// Evaluation view of a lunar date.
    ///
    /// `weekday` comes from the solar day the lunar date was converted from.
    pub fn lunar(date: LunarDate, weekday: Weekday, days_in_month: u8) -> Self {
        Self {
            calendar: CalendarKind::Lunar,
            year: date.year,
            month: date.month,
            day: date.day,
            weekday,
            days_in_month,
        }
    }
}

impl MonthDay for EvaluationDate {
    fn day(&self) -> u8 {
        self.day
    }

    fn weekday(&self) -> Weekday {
        self.weekday
    }

    fn days_in_month(&self) -> u8 {
        self.days_in_month
    }
}

impl Recurrence {
    /// Report whether this recurrence fires on `date`.
    ///
    /// `next_day_lunar_month` is the lunar month of the following calendar
    /// day; it is only consulted by [`Recurrence::LunarYearEnd`], and when it
    /// is unknown only day 30 counts as New Year's Eve.
    pub fn matches(&self, date: &EvaluationDate, next_day_lunar_month: Option<u8>) -> bool {
        match *self {
            Recurrence::FixedDay(day) => date.day == day,
            Recurrence::NthWeekday { ordinal, weekday } => {
                is_nth_weekday(date, weekday, ordinal as i32)
            }
            Recurrence::LastWeekday(weekday) => is_nth_weekday(date, weekday, -1),
            Recurrence::SolarTerm(code) => {
                if date.calendar != CalendarKind::Solar {
                    return false;
                }
                let term_day = match code {
                    SolarTermCode::Qingming => qingming_day(date.year),
                    SolarTermCode::Hanshi => hanshi_day(date.year),
                };
                date.day == term_day
            }
            Recurrence::LunarYearEnd => {
                date.calendar == CalendarKind::Lunar
                    && match next_day_lunar_month {
                        Some(next) => lunar_year_end_fires(date.month, date.day, next),
                        None => date.month == 12 && date.day == 30,
                    }
            }
        }
    }
}

impl FestivalRule {
    /// Report whether this rule fires on `date`.
    pub fn matches(&self, date: &EvaluationDate, next_day_lunar_month: Option<u8>) -> bool {
        self.calendar == date.calendar
            && self.month == date.month
            && self.recurrence.matches(date, next_day_lunar_month)
    }
}

/// Return the names of every rule in `rules` that fires on `date`.
///
/// Only rules filed under `(date.calendar, date.month)` are consulted.
/// Names come back in declaration order, duplicates included.
///
/// # Example
/// ```
/// use fest_rules::{evaluate, EvaluationDate, RuleSet};
/// use fest_time::Date;
///
/// let rules = RuleSet::from_strings(["solar(m4:s456)=Qingming", "solar(m4:s345)=Hanshi"]);
/// let date = EvaluationDate::solar(Date::from_ymd(2024, 4, 4).unwrap());
/// assert_eq!(evaluate(&date, &rules, None), vec!["Qingming".to_string()]);
/// ```
pub fn evaluate(
    date: &EvaluationDate,
    rules: &RuleSet,
    next_day_lunar_month: Option<u8>,
) -> Vec<String> {
    rules
        .rules_for(date.calendar, date.month)
        .iter()
        .filter(|rule| rule.matches(date, next_day_lunar_month))
        .map(|rule| rule.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar(y: u16, m: u8, d: u8) -> EvaluationDate {
        EvaluationDate::solar(Date::from_ymd(y, m, d).unwrap())
    }

    fn lunar(y: i32, m: u8, d: u8, len: u8) -> EvaluationDate {
        EvaluationDate::lunar(
            LunarDate {
                year: y,
                month: m,
                day: d,
            },
            Weekday::Monday,
            len,
        )
    }

    #[test]
    fn fixed_day() {
        let rules = RuleSet::from_strings(["solar(m1:d1)=New Year"]);
        assert_eq!(evaluate(&solar(2024, 1, 1), &rules, None), ["New Year"]);
        assert!(evaluate(&solar(2024, 1, 2), &rules, None).is_empty());
        assert!(evaluate(&solar(2024, 2, 1), &rules, None).is_empty());
    }

    #[test]
    fn nth_and_last_weekday() {
        let rules = RuleSet::from_strings([
            "solar(m5:w2n1)=Mother's Day",
            "solar(m5:lwn2)=Memorial Day",
            "solar(m9:fwn2)=Labor Day",
        ]);
        assert_eq!(evaluate(&solar(2024, 5, 12), &rules, None), ["Mother's Day"]);
        assert_eq!(evaluate(&solar(2024, 5, 27), &rules, None), ["Memorial Day"]);
        assert!(evaluate(&solar(2024, 5, 20), &rules, None).is_empty());
        assert_eq!(evaluate(&solar(2024, 9, 2), &rules, None), ["Labor Day"]);
    }

    #[test]
    fn qingming_and_hanshi() {
        let rules = RuleSet::from_strings(["solar(m4:s456)=Qingming", "solar(m4:s345)=Hanshi"]);
        assert_eq!(evaluate(&solar(2024, 4, 4), &rules, None), ["Qingming"]);
        assert_eq!(evaluate(&solar(2024, 4, 3), &rules, None), ["Hanshi"]);
        assert!(evaluate(&solar(2024, 4, 5), &rules, None).is_empty());
        assert_eq!(evaluate(&solar(2026, 4, 5), &rules, None), ["Qingming"]);
        assert_eq!(evaluate(&solar(2026, 4, 4), &rules, None), ["Hanshi"]);
        // Far outside the lunar table the solar terms still resolve.
        assert_eq!(evaluate(&solar(2300, 4, 4), &rules, None), ["Qingming"]);
        assert_eq!(evaluate(&solar(2300, 4, 3), &rules, None), ["Hanshi"]);
    }

    #[test]
    fn solar_term_never_fires_on_lunar_dates() {
        let rule: FestivalRule = "solar(m4:s456)=Qingming".parse().unwrap();
        assert!(!rule.recurrence.matches(&lunar(2024, 4, 4, 30), None));
    }

    #[test]
    fn lunar_year_end() {
        let rules = RuleSet::from_strings(["lunar(m12:ld)=New Year's Eve"]);
        // 29-day month: the 29th is followed by month 1.
        assert_eq!(evaluate(&lunar(2024, 12, 29, 29), &rules, Some(1)), ["New Year's Eve"]);
        // 30-day month: the 29th is followed by the 30th.
        assert!(evaluate(&lunar(2023, 12, 29, 30), &rules, Some(12)).is_empty());
        assert_eq!(evaluate(&lunar(2023, 12, 30, 30), &rules, Some(1)), ["New Year's Eve"]);
        // Without the next-day month only the 30th can be recognised.
        assert!(evaluate(&lunar(2024, 12, 29, 29), &rules, None).is_empty());
        assert_eq!(evaluate(&lunar(2023, 12, 30, 30), &rules, None), ["New Year's Eve"]);
    }

    #[test]
    fn lunar_last_weekday_uses_lunar_month_length() {
        let rules = RuleSet::from_strings(["lunar(m3:lwn2)=Last Monday"]);
        // A week after day 24 is past the end of a 30-day month.
        assert_eq!(evaluate(&lunar(2024, 3, 24, 30), &rules, None), ["Last Monday"]);
        assert!(evaluate(&lunar(2024, 3, 22, 29), &rules, None).is_empty());
        assert_eq!(evaluate(&lunar(2024, 3, 23, 29), &rules, None), ["Last Monday"]);
    }

    #[test]
    fn keeps_declaration_order_and_duplicates() {
        let rules = RuleSet::from_strings([
            "lunar(m1:d1)=Spring Festival",
            "lunar(m1:d15)=Lantern Festival",
            "lunar(m1:d1)=春节",
            "lunar(m1:d1)=Spring Festival",
        ]);
        assert_eq!(
            evaluate(&lunar(2024, 1, 1, 30), &rules, None),
            ["Spring Festival", "春节", "Spring Festival"]
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let rules = RuleSet::from_strings(["solar(m1:d1)=A", "solar(m1:fwn2)=B"]);
        let date = solar(2024, 1, 1);
        assert_eq!(evaluate(&date, &rules, None), evaluate(&date, &rules, None));
        assert_eq!(evaluate(&date, &rules, None), ["A", "B"]);
    }
}
