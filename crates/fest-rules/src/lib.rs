//! # fest-rules
//!
//! Festival rule grammar, rule sets, and evaluation.
//!
//! A rule reads `calendar(mMONTH:VARIANT)=Name`, e.g. `solar(m5:w2n1)=Mother's
//! Day`.  Rules are collected into an immutable [`RuleSet`] keyed by calendar
//! and month, and [`evaluate`] returns the names of the rules that fire on an
//! [`EvaluationDate`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Matching rules against a date.
pub mod evaluator;

/// The pattern grammar.
pub mod pattern;

/// `Recurrence` and `SolarTermCode`.
pub mod recurrence;

/// `FestivalRule` — `pattern=name`.
pub mod rule;

/// Rules grouped by calendar and month.
pub mod rule_set;

/// JSON rule source.
pub mod source;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use evaluator::{evaluate, EvaluationDate};
pub use pattern::{parse_pattern, Pattern};
pub use recurrence::{Recurrence, SolarTermCode};
pub use rule::{parse_rule, FestivalRule};
pub use rule_set::RuleSet;
pub use source::{RawRule, RuleSource};
