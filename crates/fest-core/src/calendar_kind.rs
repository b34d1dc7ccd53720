//! `CalendarKind` — which calendar system a rule or date belongs to.

use serde::{Deserialize, Serialize};

/// Calendar system of a festival rule or evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    /// Gregorian calendar.
    Solar,
    /// Chinese lunisolar calendar.
    Lunar,
}

impl CalendarKind {
    /// Parse the keyword used in rule patterns (`"solar"` / `"lunar"`).
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "solar" => Some(CalendarKind::Solar),
            "lunar" => Some(CalendarKind::Lunar),
            _ => None,
        }
    }

    /// Return the keyword used in rule patterns.
    pub fn keyword(&self) -> &'static str {
        match self {
            CalendarKind::Solar => "solar",
            CalendarKind::Lunar => "lunar",
        }
    }
}

impl std::fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
