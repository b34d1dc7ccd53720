//! `RuleSet` — parsed festival rules grouped by calendar and month.
//!
//! A rule set is built once and never mutated afterwards, so it can be shared
//! between any number of concurrent queries.  Rule strings that do not
//! satisfy the grammar are dropped while building; they are not errors.

use std::collections::BTreeMap;
use std::path::Path;

use fest_core::errors::Result;
use fest_core::CalendarKind;
use tracing::{debug, warn};

use crate::rule::FestivalRule;
use crate::source::{RawRule, RuleSource};

/// Immutable collection of festival rules keyed by `(calendar, month)`.
///
/// Rules keep their declaration order within each month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: BTreeMap<(CalendarKind, u8), Vec<FestivalRule>>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from already parsed rules.
    pub fn from_rules(rules: impl IntoIterator<Item = FestivalRule>) -> Self {
        let mut set = Self::new();
        for rule in rules {
            set.insert(rule);
        }
        set
    }

    /// Build a rule set from raw `pattern=name` strings, silently skipping
    /// anything that is not a valid rule.
    ///
    /// # Example
    /// ```
    /// use fest_core::CalendarKind;
    /// use fest_rules::RuleSet;
    ///
    /// let set = RuleSet::from_strings(["solar(m1:d1)=New Year", "garbage"]);
    /// assert_eq!(set.len(), 1);
    /// assert_eq!(set.rules_for(CalendarKind::Solar, 1)[0].name, "New Year");
    /// ```
    pub fn from_strings<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_rules(rules.into_iter().filter_map(|text| {
            let text = text.as_ref();
            match text.parse::<FestivalRule>() {
                Ok(rule) => Some(rule),
                Err(e) => {
                    debug!(rule = text, error = %e, "skipping non-rule entry");
                    None
                }
            }
        }))
    }

    /// Build a rule set from a decoded rule source.
    ///
    /// Besides grammar failures, entries are dropped when they sit in the
    /// wrong calendar section or under a month key different from their
    /// pattern's month, since such rules could never fire where they were
    /// declared.
    pub fn from_source(source: &RuleSource) -> Self {
        let mut set = Self::new();
        for calendar in [CalendarKind::Solar, CalendarKind::Lunar] {
            for (key, entries) in source.section(calendar) {
                let key_month = key.trim().parse::<u8>().ok();
                for entry in entries {
                    let text = match entry {
                        RawRule::Text(text) => text,
                        RawRule::Other(value) => {
                            warn!(%calendar, month = %key, %value, "ignoring non-string rule entry");
                            continue;
                        }
                    };
                    let rule = match text.parse::<FestivalRule>() {
                        Ok(rule) => rule,
                        Err(e) => {
                            debug!(%calendar, month = %key, rule = %text, error = %e, "skipping non-rule entry");
                            continue;
                        }
                    };
                    if rule.calendar != calendar {
                        warn!(%calendar, rule = %text, "rule declared in the wrong calendar section");
                        continue;
                    }
                    if key_month != Some(rule.month) {
                        warn!(%calendar, month = %key, rule = %text, "rule month does not match its month key");
                        continue;
                    }
                    set.insert(rule);
                }
            }
        }
        debug!(rules = set.len(), "rule set built");
        set
    }

    /// Read a JSON rule file and build a rule set from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_source(&RuleSource::load(path)?))
    }

    fn insert(&mut self, rule: FestivalRule) {
        self.rules
            .entry((rule.calendar, rule.month))
            .or_default()
            .push(rule);
    }

    /// Return the rules declared for a calendar and month, in declaration
    /// order.
    pub fn rules_for(&self, calendar: CalendarKind, month: u8) -> &[FestivalRule] {
        self.rules
            .get(&(calendar, month))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Return the total number of rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Return `true` if the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over all rules, grouped by calendar then month.
    pub fn iter(&self) -> impl Iterator<Item = &FestivalRule> {
        self.rules.values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Recurrence;

    #[test]
    fn groups_by_calendar_and_month() {
        let set = RuleSet::from_strings([
            "solar(m1:d1)=New Year",
            "lunar(m1:d1)=Spring Festival",
            "lunar(m1:d15)=Lantern Festival",
        ]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.rules_for(CalendarKind::Solar, 1).len(), 1);
        let lunar: Vec<_> = set
            .rules_for(CalendarKind::Lunar, 1)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(lunar, ["Spring Festival", "Lantern Festival"]);
        assert!(set.rules_for(CalendarKind::Solar, 2).is_empty());
    }

    #[test]
    fn drops_unparsable_strings() {
        let set = RuleSet::from_strings(["solar(m1:d1)", "solar(m13:d1)=X", "", "lunar(m12:ld)=Eve"]);
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.rules_for(CalendarKind::Lunar, 12)[0].recurrence,
            Recurrence::LunarYearEnd
        );
    }

    #[test]
    fn from_source_checks_section_and_key() {
        let source = RuleSource::default()
            .with_rule(CalendarKind::Solar, 1, "solar(m1:d1)=New Year")
            .with_rule(CalendarKind::Solar, 2, "solar(m3:d8)=Misfiled")
            .with_rule(CalendarKind::Solar, 12, "lunar(m12:ld)=Wrong Section")
            .with_rule(CalendarKind::Lunar, 12, "lunar(m12:ld)=Eve");
        let set = RuleSet::from_source(&source);
        let names: Vec<_> = set.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["New Year", "Eve"]);
    }

    #[test]
    fn empty_set() {
        let set = RuleSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.rules_for(CalendarKind::Lunar, 12).is_empty());
    }
}
