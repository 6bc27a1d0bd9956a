//! Transpiler traits and utilities.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Quote an identifier with double quotes, doubling any embedded quote.
pub fn quote_double(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string literal with single quotes, doubling any embedded quote.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Trait for dialect-specific SQL generation.
pub trait SqlGenerator {
    /// Quote an identifier (column or constraint name).
    fn quote_identifier(&self, name: &str) -> String {
        quote_double(name)
    }
    /// Quote a string literal.
    fn string_literal(&self, s: &str) -> String {
        quote_string(s)
    }
    /// Get the boolean literal (true/false vs 1/0).
    fn bool_literal(&self, val: bool) -> String;
    /// Date literal, e.g. `date '2024-01-31'`.
    fn date_literal(&self, date: &NaiveDate) -> String;
    /// Timestamp literal, e.g. `timestamp '2024-01-31 10:00:00'`.
    fn datetime_literal(&self, datetime: &NaiveDateTime) -> String;
    /// Time-of-day literal, e.g. `time '10:00:00'`.
    fn time_literal(&self, time: &NaiveTime) -> String;
    /// Whether the engine folds unquoted identifiers to upper case.
    fn folds_identifiers_upper(&self) -> bool {
        false
    }
}
