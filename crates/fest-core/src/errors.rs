//! Error types for festival-rs.
//!
//! Every fallible boundary in the workspace (rule parsing, date parsing,
//! calendar conversion, rule-source loading) reports through a single
//! `thiserror`-derived enum.  None of these errors is fatal: callers at the
//! query level log them and fall back to a partial result.

use thiserror::Error;

/// The top-level error type used throughout festival-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The rule source could not be read or decoded.
    #[error("rule source error: {0}")]
    RuleSource(String),

    /// A rule string does not satisfy the pattern grammar.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// Date-related error (malformed input, out of range).
    #[error("date error: {0}")]
    Date(String),

    /// The configured time zone is unknown to the system.
    #[error("time zone error: {0}")]
    TimeZone(String),

    /// Solar-to-lunar conversion failed or produced unusable output.
    #[error("conversion error: {0}")]
    Conversion(String),
}

/// Shorthand `Result` type used throughout festival-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;
