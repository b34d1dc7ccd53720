//! # fest-resolver
//!
//! Resolves the festival names of a solar date by evaluating solar rules
//! directly and lunar rules after conversion to the Chinese calendar.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `FestivalResolver`.
pub mod resolver;

/// Time-zone lookup.
pub mod time_zone;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use resolver::FestivalResolver;
