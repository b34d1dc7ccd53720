//! `FestivalRule` — a named pattern (`pattern=name`).

use std::str::FromStr;

use fest_core::errors::{Error, Result};
use fest_core::CalendarKind;

use crate::pattern::Pattern;
use crate::recurrence::Recurrence;

/// A festival declaration: where and when it recurs, and what it is called.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FestivalRule {
    /// Calendar the rule is evaluated against.
    pub calendar: CalendarKind,
    /// Month (1–12).
    pub month: u8,
    /// Day-spec within the month.
    pub recurrence: Recurrence,
    /// Festival name, verbatim from the rule text.
    pub name: String,
}

impl FestivalRule {
    /// Build a rule from an already parsed pattern.
    pub fn new(pattern: Pattern, name: impl Into<String>) -> Self {
        Self {
            calendar: pattern.calendar,
            month: pattern.month,
            recurrence: pattern.recurrence,
            name: name.into(),
        }
    }

    /// Return the pattern half of the rule.
    pub fn pattern(&self) -> Pattern {
        Pattern {
            calendar: self.calendar,
            month: self.month,
            recurrence: self.recurrence,
        }
    }
}

impl FromStr for FestivalRule {
    type Err = Error;

    /// Parse `pattern=name`.  Only the first `=` separates the halves, so
    /// names may themselves contain `=`.
    fn from_str(s: &str) -> Result<Self> {
        let (pattern, name) = s
            .split_once('=')
            .ok_or_else(|| Error::Pattern(format!("`{s}` has no `=name` part")))?;
        if name.is_empty() {
            return Err(Error::Pattern(format!("`{s}` has an empty festival name")));
        }
        Ok(Self::new(pattern.parse()?, name))
    }
}

impl std::fmt::Display for FestivalRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.pattern(), self.name)
    }
}

/// Parse a complete rule string, returning `None` if it is not a rule.
pub fn parse_rule(rule: &str) -> Option<FestivalRule> {
    rule.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fest_time::Weekday;

    #[test]
    fn parses_name_verbatim() {
        let rule: FestivalRule = "solar(m1:d1)=元旦".parse().unwrap();
        assert_eq!(rule.calendar, CalendarKind::Solar);
        assert_eq!(rule.month, 1);
        assert_eq!(rule.recurrence, Recurrence::FixedDay(1));
        assert_eq!(rule.name, "元旦");
    }

    #[test]
    fn splits_at_first_equals_only() {
        let rule = parse_rule("solar(m6:w3n1)=Father's Day=Dad").unwrap();
        assert_eq!(rule.name, "Father's Day=Dad");
        assert_eq!(
            rule.recurrence,
            Recurrence::NthWeekday {
                ordinal: 3,
                weekday: Weekday::Sunday
            }
        );
    }

    #[test]
    fn keeps_surrounding_whitespace_in_name() {
        let rule = parse_rule("lunar(m1:d1)= Spring Festival ").unwrap();
        assert_eq!(rule.name, " Spring Festival ");
    }

    #[test]
    fn rejects_non_rules() {
        assert!(parse_rule("solar(m1:d1)").is_none());
        assert!(parse_rule("solar(m1:d1)=").is_none());
        assert!(parse_rule("=New Year").is_none());
        assert!(parse_rule("solar(m1:q1)=New Year").is_none());
        assert!(parse_rule("").is_none());
    }

    #[test]
    fn display_roundtrip() {
        let text = "lunar(m12:ld)=除夕";
        assert_eq!(parse_rule(text).unwrap().to_string(), text);
    }
}
