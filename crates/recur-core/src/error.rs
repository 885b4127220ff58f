use thiserror::Error;

/// Rejection of a malformed repeat rule or wire date.
///
/// Parse errors are surfaced verbatim to the caller as validation failures;
/// they are never retried or silently corrected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized repeat rule: '{0}'")]
    UnrecognizedFamily(String),

    #[error("repeat rule '{0}' is missing its parameter list")]
    MissingParameter(char),

    #[error("invalid day interval '{0}': expected a number between 1 and 399")]
    DayIntervalOutOfRange(String),

    #[error("invalid day of week '{0}': expected 1 (Monday) through 7 (Sunday)")]
    InvalidWeekday(String),

    #[error("invalid day of month '{0}': expected 1 through 31, -1 or -2")]
    InvalidMonthDay(String),

    #[error("invalid month '{0}': expected 1 through 12")]
    InvalidMonthNumber(String),

    #[error("invalid date '{0}': expected YYYYMMDD")]
    InvalidDate(String),
}

/// Failure while advancing a candidate date.
///
/// The evaluator terminates for every rule the parser accepts, so hitting
/// the iteration bound indicates a parser/evaluator contract violation and
/// is treated as an internal fault rather than user error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error("no matching date within {0} steps")]
    NoConvergence(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
