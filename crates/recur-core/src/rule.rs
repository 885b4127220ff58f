use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Largest accepted day interval for `d <n>` rules.
pub const MAX_DAY_INTERVAL: u16 = 399;

/// Internal weekday numbering: 0 = Sunday through 6 = Saturday, matching
/// chrono's `num_days_from_sunday`. The grammar's 1..7 (Monday-first, 7 =
/// Sunday) is remapped at the parser boundary so the evaluator only ever
/// sees this convention.
const SUNDAY: u8 = 0;
const SUNDAY_ISO: u8 = 7;

/// A day-of-month selector for `m` rules.
///
/// The wire grammar encodes the positional selectors as the sentinels -1
/// ("last day of the month") and -2 ("second-to-last day"); they are wrapped
/// in named variants here so the sentinels never reach comparison logic.
///
/// Variant order is chosen so a sorted set iterates in canonical wire order:
/// -2, -1, then exact days ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonthDay {
    /// The day before the last calendar day of the month (wire value -2).
    SecondToLast,
    /// The last calendar day of the month (wire value -1).
    Last,
    /// An exact day number, 1..=31.
    Day(u8),
}

impl MonthDay {
    fn from_wire(raw: i32) -> Option<Self> {
        match raw {
            -2 => Some(MonthDay::SecondToLast),
            -1 => Some(MonthDay::Last),
            1..=31 => Some(MonthDay::Day(raw as u8)),
            _ => None,
        }
    }

    /// Whether a candidate's day-of-month satisfies this selector, given the
    /// last calendar day of the candidate's month (28..=31).
    pub fn matches(self, day: u32, last_day: u32) -> bool {
        match self {
            MonthDay::Day(d) => u32::from(d) == day,
            MonthDay::Last => day == last_day,
            MonthDay::SecondToLast => day + 1 == last_day,
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthDay::SecondToLast => f.write_str("-2"),
            MonthDay::Last => f.write_str("-1"),
            MonthDay::Day(d) => write!(f, "{}", d),
        }
    }
}

/// A parsed recurrence rule.
///
/// The four families are mutually exclusive with disjoint parameter sets;
/// day-of-month and day-of-week selectors never combine in one rule. A
/// `Rule` is immutable once parsed and carries no persisted identity: tasks
/// store only the string encoding, and the rule is reconstructed from it on
/// every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// `d <n>`: repeat every `n` days, 1..=399.
    EveryNDays(u16),
    /// `y`: repeat every calendar year.
    Yearly,
    /// `w <days>`: repeat on a fixed set of weekdays, stored in the
    /// 0 = Sunday convention.
    Weekly(BTreeSet<u8>),
    /// `m <days> [<months>]`: repeat on a set of day-of-month selectors,
    /// optionally restricted to a set of months (empty = every month).
    Monthly {
        days: BTreeSet<MonthDay>,
        months: BTreeSet<u8>,
    },
}

impl FromStr for Rule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let (tag, rest) = match s.split_once(' ') {
            Some((tag, rest)) => (tag, Some(rest)),
            None => (s, None),
        };

        match tag.to_ascii_lowercase().as_str() {
            "d" => parse_day_interval(rest.ok_or(ParseError::MissingParameter('d'))?),
            "y" => Ok(Rule::Yearly),
            "w" => parse_weekdays(rest.ok_or(ParseError::MissingParameter('w'))?),
            "m" => parse_month_rule(rest.ok_or(ParseError::MissingParameter('m'))?),
            _ => Err(ParseError::UnrecognizedFamily(s.to_string())),
        }
    }
}

fn parse_day_interval(rest: &str) -> Result<Rule, ParseError> {
    let out_of_range = || ParseError::DayIntervalOutOfRange(rest.to_string());
    let n: i64 = rest.parse().map_err(|_| out_of_range())?;
    // A 0-day interval would never advance the candidate; rejecting it here
    // keeps the evaluator free of non-terminating inputs.
    if n < 1 || n > i64::from(MAX_DAY_INTERVAL) {
        return Err(out_of_range());
    }
    Ok(Rule::EveryNDays(n as u16))
}

fn parse_weekdays(rest: &str) -> Result<Rule, ParseError> {
    let mut days = BTreeSet::new();
    for token in rest.split(',') {
        let day = match token.as_bytes() {
            [c @ b'1'..=b'7'] => c - b'0',
            _ => return Err(ParseError::InvalidWeekday(token.to_string())),
        };
        days.insert(if day == SUNDAY_ISO { SUNDAY } else { day });
    }
    Ok(Rule::Weekly(days))
}

fn parse_month_rule(rest: &str) -> Result<Rule, ParseError> {
    let (day_group, month_group) = match rest.split_once(' ') {
        Some((days, months)) => (days, Some(months)),
        None => (rest, None),
    };

    let mut days = BTreeSet::new();
    for token in day_group.split(',') {
        let raw: i32 = token
            .parse()
            .map_err(|_| ParseError::InvalidMonthDay(token.to_string()))?;
        let selector =
            MonthDay::from_wire(raw).ok_or_else(|| ParseError::InvalidMonthDay(token.to_string()))?;
        days.insert(selector);
    }

    let mut months = BTreeSet::new();
    if let Some(month_group) = month_group {
        for token in month_group.split(',') {
            if token.is_empty() {
                continue;
            }
            let month: i32 = token
                .parse()
                .map_err(|_| ParseError::InvalidMonthNumber(token.to_string()))?;
            if !(1..=12).contains(&month) {
                return Err(ParseError::InvalidMonthNumber(token.to_string()));
            }
            months.insert(month as u8);
        }
    }

    Ok(Rule::Monthly { days, months })
}

impl fmt::Display for Rule {
    /// Re-emits the rule in canonical grammar form: weekly days Monday-first
    /// with Sunday as 7, month days ascending with sentinels first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::EveryNDays(n) => write!(f, "d {}", n),
            Rule::Yearly => f.write_str("y"),
            Rule::Weekly(days) => {
                f.write_str("w ")?;
                let mut iso: Vec<u8> = days
                    .iter()
                    .map(|&d| if d == SUNDAY { SUNDAY_ISO } else { d })
                    .collect();
                iso.sort_unstable();
                write_joined(f, iso.iter())
            }
            Rule::Monthly { days, months } => {
                f.write_str("m ")?;
                write_joined(f, days.iter())?;
                if !months.is_empty() {
                    f.write_str(" ")?;
                    write_joined(f, months.iter())?;
                }
                Ok(())
            }
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Rule, ParseError> {
        s.parse()
    }

    #[test]
    fn test_day_interval_bounds() {
        assert_eq!(parse("d 1"), Ok(Rule::EveryNDays(1)));
        assert_eq!(parse("d 399"), Ok(Rule::EveryNDays(399)));
        assert!(matches!(
            parse("d 400"),
            Err(ParseError::DayIntervalOutOfRange(_))
        ));
        assert!(matches!(
            parse("d 0"),
            Err(ParseError::DayIntervalOutOfRange(_))
        ));
        assert!(matches!(
            parse("d -3"),
            Err(ParseError::DayIntervalOutOfRange(_))
        ));
        assert!(matches!(
            parse("d seven"),
            Err(ParseError::DayIntervalOutOfRange(_))
        ));
        assert_eq!(parse("d"), Err(ParseError::MissingParameter('d')));
    }

    #[test]
    fn test_family_tag_case_insensitive() {
        assert_eq!(parse("D 7"), Ok(Rule::EveryNDays(7)));
        assert_eq!(parse("Y"), Ok(Rule::Yearly));
    }

    #[test]
    fn test_yearly_ignores_remainder() {
        assert_eq!(parse("y"), Ok(Rule::Yearly));
        assert_eq!(parse("y whatever"), Ok(Rule::Yearly));
    }

    #[test]
    fn test_unrecognized_family() {
        assert!(matches!(parse(""), Err(ParseError::UnrecognizedFamily(_))));
        assert!(matches!(parse("x 1"), Err(ParseError::UnrecognizedFamily(_))));
        assert!(matches!(
            parse("dd 3"),
            Err(ParseError::UnrecognizedFamily(_))
        ));
    }

    #[test]
    fn test_weekday_normalization() {
        // 7 and Sunday fold to the internal 0 value.
        let rule = parse("w 7").unwrap();
        assert_eq!(rule, Rule::Weekly(BTreeSet::from([0])));

        let rule = parse("w 1,3,7").unwrap();
        assert_eq!(rule, Rule::Weekly(BTreeSet::from([0, 1, 3])));
    }

    #[test]
    fn test_weekday_rejections() {
        for bad in ["w 0", "w 8", "w 10", "w 1,8", "w mon", "w 1,,3", "w "] {
            assert!(
                matches!(parse(bad), Err(ParseError::InvalidWeekday(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(parse("w"), Err(ParseError::MissingParameter('w')));
    }

    #[test]
    fn test_month_day_selectors() {
        let rule = parse("m 1,15,-1,-2").unwrap();
        assert_eq!(
            rule,
            Rule::Monthly {
                days: BTreeSet::from([
                    MonthDay::SecondToLast,
                    MonthDay::Last,
                    MonthDay::Day(1),
                    MonthDay::Day(15),
                ]),
                months: BTreeSet::new(),
            }
        );
    }

    #[test]
    fn test_month_day_rejections() {
        for bad in ["m 0", "m 32", "m -3", "m 1,0", "m x", "m "] {
            assert!(
                matches!(parse(bad), Err(ParseError::InvalidMonthDay(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(parse("m"), Err(ParseError::MissingParameter('m')));
    }

    #[test]
    fn test_month_list() {
        let rule = parse("m 15 1,6,12").unwrap();
        assert_eq!(
            rule,
            Rule::Monthly {
                days: BTreeSet::from([MonthDay::Day(15)]),
                months: BTreeSet::from([1, 6, 12]),
            }
        );

        assert!(matches!(
            parse("m 15 0"),
            Err(ParseError::InvalidMonthNumber(_))
        ));
        assert!(matches!(
            parse("m 15 13"),
            Err(ParseError::InvalidMonthNumber(_))
        ));
        assert!(matches!(
            parse("m 15 jan"),
            Err(ParseError::InvalidMonthNumber(_))
        ));
    }

    #[test]
    fn test_canonical_display() {
        for (input, canonical) in [
            ("d 7", "d 7"),
            ("y", "y"),
            ("w 7,1,3", "w 1,3,7"),
            ("m 15,-1,-2,3", "m -2,-1,3,15"),
            ("m 31 12,1", "m 31 1,12"),
        ] {
            let rule: Rule = input.parse().unwrap();
            assert_eq!(rule.to_string(), canonical);
        }
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["d 3", "y", "w 1,3,7", "m -2,-1,15", "m 1 2,3"] {
            let rule: Rule = input.parse().unwrap();
            let reparsed: Rule = rule.to_string().parse().unwrap();
            assert_eq!(rule, reparsed);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        for input in ["d 3", "y", "w 1,3,7", "m -2,-1,15", "m 1 2,3"] {
            let rule: Rule = input.parse().unwrap();
            let json = serde_json::to_string(&rule).unwrap();
            let back: Rule = serde_json::from_str(&json).unwrap();
            assert_eq!(rule, back, "{input:?} should survive serde");
        }
    }

    #[test]
    fn test_parse_errors_are_stable() {
        let first = parse("w 8");
        for _ in 0..3 {
            assert_eq!(parse("w 8"), first);
        }
    }
}
