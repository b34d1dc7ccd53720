//! # fest-core
//!
//! Core types, configuration, and error definitions for festival-rs.
//!
//! This crate provides the building blocks shared across the other crates
//! in the workspace: the error hierarchy, the calendar-kind tag, and the
//! resolver configuration value.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// `CalendarKind` — solar or lunar.
pub mod calendar_kind;

/// Resolver configuration (rule-source path, time zone).
pub mod config;

/// Error types.
pub mod errors;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use calendar_kind::CalendarKind;
pub use config::FestivalConfig;
pub use errors::{Error, Result};
