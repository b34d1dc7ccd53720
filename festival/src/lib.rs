//! # festival
//!
//! Rule-driven lookup of solar (Gregorian) and Chinese lunar festivals.
//!
//! This crate is a **façade** that re-exports the workspace crates and adds
//! the [`Festival`] entry type.  Application code should depend on this crate
//! rather than the individual `fest-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use festival::rules::RuleSet;
//! use festival::{Festival, FestivalConfig};
//!
//! let rules = RuleSet::from_strings([
//!     "solar(m1:d1)=New Year",
//!     "lunar(m1:d1)=Spring Festival",
//!     "lunar(m12:ld)=New Year's Eve",
//! ]);
//! let festival = Festival::with_rules(FestivalConfig::default().with_time_zone("UTC"), rules);
//!
//! assert_eq!(festival.get_festivals("2024-01-01"), ["New Year"]);
//! assert_eq!(festival.get_festivals("2024-02-09"), ["New Year's Eve"]);
//! assert_eq!(festival.get_festivals("2024-02-10"), ["Spring Festival"]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, configuration, and error definitions.
pub use fest_core as core;

/// Dates, weekdays, date math, and lunar conversion.
pub use fest_time as time;

/// Rule grammar, rule sets, and evaluation.
pub use fest_rules as rules;

/// Festival resolution.
pub use fest_resolver as resolver;

/// `Festival` — the entry type.
pub mod festival;

/// Logging setup.
pub mod logging;

pub use crate::festival::Festival;
pub use fest_core::{Error, FestivalConfig, Result};
