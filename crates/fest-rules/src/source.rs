//! JSON rule source.
//!
//! The file holds two optional sections keyed by month number:
//!
//! ```json
//! {
//!   "solar": { "1": ["solar(m1:d1)=New Year"], "4": ["solar(m4:s456)=Qingming"] },
//!   "lunar": { "12": ["lunar(m12:ld)=New Year's Eve"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use fest_core::errors::{Error, Result};
use fest_core::CalendarKind;
use serde::Deserialize;

/// One entry of a month list.  Anything that is not a string is kept as
/// [`RawRule::Other`] so that a stray number or object does not invalidate
/// the whole file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawRule {
    /// A `pattern=name` string (not yet validated).
    Text(String),
    /// Any other JSON value.
    Other(serde_json::Value),
}

/// Raw rule strings grouped by calendar and month key, as read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuleSource {
    /// Solar rules by month key (`"1"` … `"12"`).
    pub solar: BTreeMap<String, Vec<RawRule>>,
    /// Lunar rules by month key (`"1"` … `"12"`).
    pub lunar: BTreeMap<String, Vec<RawRule>>,
}

impl RuleSource {
    /// Decode a rule source from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::RuleSource(e.to_string()))
    }

    /// Read and decode a rule source file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::RuleSource(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::RuleSource(format!("{}: {e}", path.display())))
    }

    /// Append a rule string under the given calendar section and month key.
    pub fn push(&mut self, calendar: CalendarKind, month: u8, rule: impl Into<String>) {
        self.section_mut(calendar)
            .entry(month.to_string())
            .or_default()
            .push(RawRule::Text(rule.into()));
    }

    /// Builder-style variant of [`RuleSource::push`].
    pub fn with_rule(mut self, calendar: CalendarKind, month: u8, rule: impl Into<String>) -> Self {
        self.push(calendar, month, rule);
        self
    }

    /// Return the section for a calendar.
    pub fn section(&self, calendar: CalendarKind) -> &BTreeMap<String, Vec<RawRule>> {
        match calendar {
            CalendarKind::Solar => &self.solar,
            CalendarKind::Lunar => &self.lunar,
        }
    }

    fn section_mut(&mut self, calendar: CalendarKind) -> &mut BTreeMap<String, Vec<RawRule>> {
        match calendar {
            CalendarKind::Solar => &mut self.solar,
            CalendarKind::Lunar => &mut self.lunar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_sections() {
        let src = RuleSource::from_json_str(
            r#"{"solar": {"1": ["solar(m1:d1)=New Year"]},
                "lunar": {"12": ["lunar(m12:ld)=Eve", 42]}}"#,
        )
        .unwrap();
        assert_eq!(
            src.solar["1"],
            vec![RawRule::Text("solar(m1:d1)=New Year".into())]
        );
        assert_eq!(src.lunar["12"].len(), 2);
        assert!(matches!(src.lunar["12"][1], RawRule::Other(_)));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let src = RuleSource::from_json_str("{}").unwrap();
        assert!(src.solar.is_empty());
        assert!(src.lunar.is_empty());
    }

    #[test]
    fn malformed_json_is_a_rule_source_error() {
        let err = RuleSource::from_json_str("{\"solar\": ").unwrap_err();
        assert!(matches!(err, Error::RuleSource(_)));
        let err = RuleSource::from_json_str(r#"{"solar": {"1": "not a list"}}"#).unwrap_err();
        assert!(matches!(err, Error::RuleSource(_)));
    }

    #[test]
    fn missing_file_is_a_rule_source_error() {
        let err = RuleSource::load("/nonexistent/festival.json").unwrap_err();
        assert!(matches!(err, Error::RuleSource(msg) if msg.contains("/nonexistent/festival.json")));
    }

    #[test]
    fn push_groups_by_month() {
        let src = RuleSource::default()
            .with_rule(CalendarKind::Solar, 5, "solar(m5:w2n1)=Mother's Day")
            .with_rule(CalendarKind::Solar, 5, "solar(m5:d1)=Labour Day");
        assert_eq!(src.section(CalendarKind::Solar)["5"].len(), 2);
        assert!(src.section(CalendarKind::Lunar).is_empty());
    }
}
