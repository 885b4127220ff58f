use chrono::{Datelike, Days, NaiveDate};

use crate::error::{CoreError, EvalError, ParseError};
use crate::rule::Rule;

/// Wire format for dates: 8 digits, no separators (e.g. `20240115`).
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Defensive bound on candidate advancement. Every rule the parser accepts
/// converges in far fewer steps; exhausting the bound means the parser and
/// evaluator disagree about what a valid rule is.
const MAX_STEPS: u32 = 500_000;

/// Computes the next due date for a task, string-in string-out.
///
/// This is the boundary the surrounding system calls: `date_str` is the
/// task's last scheduled date and `repeat` its rule encoding, both exactly
/// as stored; the result is the next date re-encoded in the wire format.
/// An empty or malformed rule is rejected, never defaulted.
pub fn next_date(now: NaiveDate, date_str: &str, repeat: &str) -> Result<String, CoreError> {
    let last = parse_wire_date(date_str)?;
    let rule: Rule = repeat.parse::<Rule>()?;
    let next = next_occurrence(now, last, &rule)?;
    Ok(format_wire_date(next))
}

/// Parses an 8-digit `YYYYMMDD` wire date.
///
/// The width check comes first: chrono's `%Y` accepts variable-width years,
/// but the wire format is exactly eight digits.
pub fn parse_wire_date(s: &str) -> Result<NaiveDate, ParseError> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ParseError::InvalidDate(s.to_string()))
}

/// Encodes a date in the 8-digit `YYYYMMDD` wire format.
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Computes the first date on or after `now` (daily/yearly rules) or
/// strictly after `now` (weekly/monthly rules) that the rule produces when
/// advancing from `last`.
///
/// Pure and deterministic: `now` is an explicit argument, never read from a
/// wall clock, and no state outlives the call.
///
/// The two stopping conditions must not be conflated: daily and yearly
/// rules always apply at least one step and then accept the first candidate
/// with `candidate >= now`, while weekly and monthly rules consider the
/// start candidate itself but require `candidate > now`, so a task due
/// today rolls to its next matching day rather than staying put.
pub fn next_occurrence(now: NaiveDate, last: NaiveDate, rule: &Rule) -> Result<NaiveDate, EvalError> {
    match rule {
        Rule::EveryNDays(n) => {
            let n = u64::from(*n);
            step_until_not_before(now, last, |date| date.checked_add_days(Days::new(n)))
        }
        Rule::Yearly => step_until_not_before(now, last, add_year),
        Rule::Weekly(days) => advance_to_match(now, last, |date| {
            days.contains(&(date.weekday().num_days_from_sunday() as u8))
        }),
        Rule::Monthly { days, months } => {
            // Two sequential phases, never re-synchronized: phase 2 continues
            // from wherever phase 1 stopped and may overshoot the selected
            // month. That overshoot is observable behavior, not an accident.
            let mut candidate = last;
            if !months.is_empty() {
                candidate = advance_to_match(now, candidate, |date| {
                    months.contains(&(date.month() as u8))
                })?;
            }
            advance_to_match(now, candidate, |date| {
                let last_day = last_day_of_month(date);
                days.iter().any(|sel| sel.matches(date.day(), last_day))
            })
        }
    }
}

/// Applies `step` once, then keeps applying it while the candidate is still
/// before `now`. Returns the first candidate with `candidate >= now`.
fn step_until_not_before(
    now: NaiveDate,
    start: NaiveDate,
    step: impl Fn(NaiveDate) -> Option<NaiveDate>,
) -> Result<NaiveDate, EvalError> {
    let overrun = EvalError::NoConvergence(MAX_STEPS);
    let mut candidate = step(start).ok_or(overrun)?;
    let mut steps = 1;
    while candidate < now {
        if steps >= MAX_STEPS {
            return Err(overrun);
        }
        candidate = step(candidate).ok_or(overrun)?;
        steps += 1;
    }
    Ok(candidate)
}

/// Walks forward one day at a time, starting from `start` itself, until the
/// candidate satisfies `matches` and is strictly after `now`.
fn advance_to_match(
    now: NaiveDate,
    start: NaiveDate,
    matches: impl Fn(NaiveDate) -> bool,
) -> Result<NaiveDate, EvalError> {
    let mut candidate = start;
    for _ in 0..MAX_STEPS {
        if matches(candidate) && candidate > now {
            return Ok(candidate);
        }
        candidate = candidate
            .succ_opt()
            .ok_or(EvalError::NoConvergence(MAX_STEPS))?;
    }
    Err(EvalError::NoConvergence(MAX_STEPS))
}

/// Adds one calendar year. Feb 29 on a non-leap target year folds forward
/// to Mar 1, the overflow behavior of Go-style date addition; chrono's own
/// month arithmetic clamps backward instead, so the fold is explicit here.
fn add_year(date: NaiveDate) -> Option<NaiveDate> {
    let year = date.year() + 1;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// The last calendar day (28..=31) of the month containing `date`.
fn last_day_of_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    match NaiveDate::from_ymd_opt(year, month, 1).and_then(|first| first.pred_opt()) {
        Some(last) => last.day(),
        None => 31,
    }
}
