use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A compact duration string such as `15m`, `1h`, `24h` or `1h30m`,
/// used to postpone a `Reminder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnoozeDuration {
    millis: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDurationError {
    #[error("Invalid duration: `{0}`. Use formats like `30m`, `2h`, `1d` or `1h30m`")]
    Malformed(String),
}

impl SnoozeDuration {
    pub fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    pub fn as_millis(&self) -> i64 {
        self.millis
    }
}

impl Display for SnoozeDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.millis / 1000)
    }
}

fn unit_in_millis(unit: char) -> Option<i64> {
    let secs = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 60 * 60 * 24,
        'w' => 60 * 60 * 24 * 7,
        _ => return None,
    };
    Some(secs * 1000)
}

impl FromStr for SnoozeDuration {
    type Err = InvalidDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidDurationError::Malformed(s.to_string());
        let normalized = s.trim().to_lowercase();

        let mut total: i64 = 0;
        let mut current_number = String::new();
        for c in normalized.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if current_number.is_empty() {
                return Err(malformed());
            }
            let value: i64 = current_number.parse().map_err(|_| malformed())?;
            current_number.clear();

            let unit = unit_in_millis(c).ok_or_else(malformed)?;
            total = value
                .checked_mul(unit)
                .and_then(|millis| total.checked_add(millis))
                .ok_or_else(malformed)?;
        }

        // A trailing number without a unit is ambiguous
        if !current_number.is_empty() || total == 0 {
            return Err(malformed());
        }

        Ok(Self { millis: total })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const MINUTE: i64 = 1000 * 60;

    #[test]
    fn parses_valid_durations() {
        let cases = vec![
            ("30s", 30 * 1000),
            ("15m", 15 * MINUTE),
            ("1h", 60 * MINUTE),
            ("24h", 24 * 60 * MINUTE),
            ("1d", 24 * 60 * MINUTE),
            ("1w", 7 * 24 * 60 * MINUTE),
            ("1h30m", 90 * MINUTE),
            (" 2H ", 120 * MINUTE),
        ];
        for (input, expected) in cases {
            assert_eq!(
                input.parse::<SnoozeDuration>().map(|d| d.as_millis()),
                Ok(expected),
                "Parsing: {}",
                input
            );
        }
    }

    #[test]
    fn rejects_invalid_durations() {
        for input in ["", "abc", "15", "m", "10x", "0m", "1.5h", "-5m", "h15"] {
            assert_eq!(
                input.parse::<SnoozeDuration>(),
                Err(InvalidDurationError::Malformed(input.to_string())),
                "Parsing: {}",
                input
            );
        }
    }

    #[test]
    fn rejects_overflowing_durations() {
        assert!("99999999999999999w".parse::<SnoozeDuration>().is_err());
    }
}
