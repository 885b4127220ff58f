//! # Recur Core Library
//!
//! A recurrence-rule evaluator: given a rule in a compact textual grammar, a
//! task's last scheduled date, and the current date, compute the next
//! calendar date on which the task is due.
//!
//! ## Features
//!
//! - **Four rule families**: day intervals (`d 7`), yearly (`y`), weekday
//!   sets (`w 1,5`), and day-of-month sets with optional month restrictions
//!   (`m -1,15 3,6`)
//! - **Pure evaluation**: "now" is an explicit argument, so every call is
//!   deterministic and testable without clock mocking
//! - **Strict validation**: out-of-range parameters and empty selector
//!   groups are parse errors, surfaced verbatim, never corrected
//! - **Type Safety**: rules are a tagged union, so family handling is
//!   exhaustiveness-checked at compile time
//!
//! ## Core Modules
//!
//! - [`rule`]: the rule grammar, parser, and canonical encoding
//! - [`recurrence`]: the evaluator and the `YYYYMMDD` wire boundary
//! - [`error`]: parse and evaluation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use recur_core::{next_occurrence, Rule};
//!
//! fn main() -> Result<(), recur_core::CoreError> {
//!     let rule: Rule = "d 3".parse()?;
//!     let now = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//!     let last = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
//!
//!     let next = next_occurrence(now, last, &rule)?;
//!     assert_eq!(next, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod recurrence;
pub mod rule;

pub use error::{CoreError, EvalError, ParseError};
pub use recurrence::{format_wire_date, next_date, next_occurrence, parse_wire_date, DATE_FORMAT};
pub use rule::{MonthDay, Rule, MAX_DAY_INTERVAL};
