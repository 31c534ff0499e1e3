//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

use chrono::TimeDelta;

/// Duration value (RFC 5545 §3.3.6).
///
/// Either week-based (`P1W`) or day/time-based (`P1DT2H30M`). Year and
/// month designators do not exist in iCalendar durations because months
/// have variable lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    /// Whether this duration is negative.
    pub negative: bool,
    /// Number of weeks (mutually exclusive with the other components).
    pub weeks: u32,
    /// Number of days.
    pub days: u32,
    /// Number of hours.
    pub hours: u32,
    /// Number of minutes.
    pub minutes: u32,
    /// Number of seconds.
    pub seconds: u32,
}

impl Duration {
    /// Creates a zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Creates a duration of whole weeks.
    #[must_use]
    pub const fn weeks(weeks: u32) -> Self {
        Self { weeks, ..Self::zero() }
    }

    /// Creates a duration of whole days.
    #[must_use]
    pub const fn days(days: u32) -> Self {
        Self { days, ..Self::zero() }
    }

    /// Creates a duration of whole hours.
    #[must_use]
    pub const fn hours(hours: u32) -> Self {
        Self { hours, ..Self::zero() }
    }

    /// Creates a duration of whole minutes.
    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self { minutes, ..Self::zero() }
    }

    /// Negates this duration.
    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    /// Parses a DURATION value such as `PT1H15M`, `P1DT2H30M`, `P1W`, or
    /// `-PT30M`.
    ///
    /// Returns `None` when the text does not follow the RFC 5545 grammar.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut rest = text.trim();

        let negative = match rest.as_bytes().first() {
            Some(b'-') => {
                rest = &rest[1..];
                true
            }
            Some(b'+') => {
                rest = &rest[1..];
                false
            }
            _ => false,
        };
        rest = rest.strip_prefix(['P', 'p'])?;

        let mut out = Self { negative, ..Self::zero() };
        let mut in_time = false;
        let mut seen_component = false;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix(['T', 't']) {
                if in_time {
                    return None;
                }
                in_time = true;
                rest = after;
                continue;
            }

            let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                return None;
            }
            let value: u32 = rest[..digits].parse().ok()?;
            let designator = rest[digits..].chars().next()?;
            rest = &rest[digits + designator.len_utf8()..];
            seen_component = true;

            match (designator.to_ascii_uppercase(), in_time) {
                ('W', false) => out.weeks = value,
                ('D', false) => out.days = value,
                ('H', true) => out.hours = value,
                ('M', true) => out.minutes = value,
                ('S', true) => out.seconds = value,
                _ => return None,
            }
        }

        if !seen_component {
            return None;
        }
        // A week duration stands alone.
        if out.weeks > 0 && (out.days | out.hours | out.minutes | out.seconds) > 0 {
            return None;
        }
        Some(out)
    }

    /// Returns the total duration in seconds.
    #[must_use]
    pub const fn as_seconds(&self) -> i64 {
        let total = (self.weeks as i64 * 7 * 24 * 3600)
            + (self.days as i64 * 24 * 3600)
            + (self.hours as i64 * 3600)
            + (self.minutes as i64 * 60)
            + (self.seconds as i64);

        if self.negative { -total } else { total }
    }

    /// Converts to a chrono [`TimeDelta`].
    #[must_use]
    pub fn to_delta(self) -> TimeDelta {
        TimeDelta::seconds(self.as_seconds())
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.weeks > 0 {
            return write!(f, "{}W", self.weeks);
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        } else if self.days == 0 {
            write!(f, "0D")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_only() {
        let d = Duration::parse("PT1H15M").unwrap();
        assert_eq!(d.hours, 1);
        assert_eq!(d.minutes, 15);
        assert_eq!(d.as_seconds(), 3600 + 15 * 60);
    }

    #[test]
    fn parse_day_and_time() {
        let d = Duration::parse("P1DT2H30M").unwrap();
        assert_eq!(d.days, 1);
        assert_eq!(d.hours, 2);
        assert_eq!(d.minutes, 30);
    }

    #[test]
    fn parse_weeks() {
        assert_eq!(Duration::parse("P2W").unwrap(), Duration::weeks(2));
    }

    #[test]
    fn parse_negative() {
        let d = Duration::parse("-PT30M").unwrap();
        assert!(d.negative);
        assert_eq!(d.as_seconds(), -30 * 60);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Duration::parse(""), None);
        assert_eq!(Duration::parse("P"), None);
        assert_eq!(Duration::parse("PT"), None);
        assert_eq!(Duration::parse("P1H"), None);
        assert_eq!(Duration::parse("P1W2D"), None);
        assert_eq!(Duration::parse("1H"), None);
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(Duration::parse("PT15M").unwrap().to_string(), "PT15M");
        assert_eq!(Duration::parse("P1DT2H30M").unwrap().to_string(), "P1DT2H30M");
        assert_eq!(Duration::parse("P2W").unwrap().to_string(), "P2W");
        assert_eq!(Duration::zero().to_string(), "P0D");
        assert_eq!(Duration::minutes(15).negate().to_string(), "-PT15M");
    }

    #[test]
    fn delta_conversion() {
        assert_eq!(
            Duration::parse("PT1H").unwrap().to_delta(),
            TimeDelta::hours(1)
        );
    }
}
