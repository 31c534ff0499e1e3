//! TZID resolution (RFC 5545 §3.2.19).
//!
//! Calendar producers put almost anything into TZID parameters: IANA names,
//! Windows zone identifiers, localized display labels, bare offset strings,
//! and Exchange's `tzone://Microsoft/…` markers. [`resolve`] normalizes all
//! of them into a [`ZoneId`] without ever failing; inputs nobody can
//! interpret come back as [`ZoneId::Unresolved`] and are treated as UTC
//! downstream.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;

pub mod windows;

/// A normalized time zone descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneId {
    /// A canonical IANA zone.
    Iana(Tz),
    /// A fixed offset from UTC, in minutes (positive = east).
    Fixed {
        /// Signed minutes from UTC, within ±14 hours.
        minutes: i32,
    },
    /// A TZID nobody could interpret, kept verbatim for diagnostics.
    ///
    /// Consumers fall back to UTC for these.
    Unresolved(String),
}

impl ZoneId {
    /// UTC as a canonical zone.
    pub const UTC: Self = Self::Iana(Tz::UTC);

    /// Creates a fixed-offset zone from signed minutes.
    #[must_use]
    pub const fn fixed(minutes: i32) -> Self {
        Self::Fixed { minutes }
    }

    /// Returns the normalized label: the IANA name, a `±HH:MM` offset
    /// label, or the original unresolved text.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Iana(tz) => tz.name().to_string(),
            Self::Fixed { minutes } => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let total = minutes.abs();
                format!("{sign}{:02}:{:02}", total / 60, total % 60)
            }
            Self::Unresolved(original) => original.clone(),
        }
    }

    /// Returns the IANA zone this descriptor is equivalent to, if any.
    ///
    /// Whole-hour fixed offsets map to the `Etc/GMT±N` family. Note the
    /// inverted sign convention there: zones east of Greenwich carry a
    /// minus (`+02:00` is `Etc/GMT-2`).
    #[must_use]
    pub fn iana_equivalent(&self) -> Option<Tz> {
        match self {
            Self::Iana(tz) => Some(*tz),
            Self::Fixed { minutes } if minutes % 60 == 0 => {
                let hours = minutes / 60;
                let name = if hours == 0 {
                    "Etc/GMT".to_string()
                } else if hours > 0 {
                    format!("Etc/GMT-{hours}")
                } else {
                    format!("Etc/GMT+{}", -hours)
                };
                Tz::from_str(&name).ok()
            }
            _ => None,
        }
    }

    /// The calendar date of `instant` on this zone's local clock.
    ///
    /// Unresolved zones read the UTC calendar.
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Iana(tz) => instant.with_timezone(tz).date_naive(),
            Self::Fixed { minutes } => match FixedOffset::east_opt(minutes * 60) {
                Some(offset) => instant.with_timezone(&offset).date_naive(),
                None => instant.date_naive(),
            },
            Self::Unresolved(_) => instant.date_naive(),
        }
    }
}

/// Process-wide TZID resolver.
///
/// Holds the memoized IANA validity cache, the configurable alias table,
/// and the host-zone override. All three tolerate concurrent readers; the
/// alias table and host zone are written at configuration time only.
pub struct ZoneResolver {
    validity: RwLock<HashMap<String, Option<Tz>>>,
    aliases: RwLock<HashMap<String, String>>,
    host_zone: RwLock<Option<Tz>>,
}

static RESOLVER: OnceLock<ZoneResolver> = OnceLock::new();

impl ZoneResolver {
    fn new() -> Self {
        Self {
            validity: RwLock::new(HashMap::new()),
            aliases: RwLock::new(HashMap::new()),
            host_zone: RwLock::new(None),
        }
    }

    /// Returns the process-wide resolver.
    pub fn global() -> &'static Self {
        RESOLVER.get_or_init(Self::new)
    }

    /// Registers a zone-name alias applied before IANA validation.
    ///
    /// Intended for configuration time, e.g. equating `Etc/Unknown` with
    /// `Etc/GMT` when a producer is known to emit it.
    ///
    /// ## Panics
    /// Panics if the alias lock is poisoned.
    pub fn register_alias(&self, from: impl Into<String>, to: impl Into<String>) {
        self.aliases
            .write()
            .expect("alias table lock poisoned")
            .insert(from.into(), to.into());
    }

    /// Overrides the host zone substituted for Microsoft custom TZIDs.
    ///
    /// ## Panics
    /// Panics if the host-zone lock is poisoned.
    pub fn set_host_zone(&self, tz: Tz) {
        *self.host_zone.write().expect("host zone lock poisoned") = Some(tz);
    }

    /// The zone substituted for Microsoft "customized" TZIDs: the
    /// configured override, else the `TZ` environment variable when it
    /// names a known zone, else UTC.
    #[must_use]
    pub fn host_zone(&self) -> Tz {
        if let Some(tz) = *self.host_zone.read().expect("host zone lock poisoned") {
            return tz;
        }
        std::env::var("TZ")
            .ok()
            .and_then(|name| Tz::from_str(&name).ok())
            .unwrap_or(Tz::UTC)
    }

    /// Normalizes a TZID string. Total; never fails.
    #[must_use]
    pub fn resolve(&self, tzid: &str) -> ZoneId {
        if is_microsoft_custom(tzid) {
            return ZoneId::Iana(self.host_zone());
        }

        let value = strip_quotes(tzid.trim());

        let mapped = if value.contains(char::is_whitespace) || value.contains(',') {
            windows::lookup(value)
        } else {
            None
        };

        if mapped.is_none() {
            if value.starts_with('(') {
                if let Some(minutes) = embedded_offset(value) {
                    return ZoneId::fixed(minutes);
                }
            }
            if let Some(minutes) = parse_offset_label(value) {
                return ZoneId::fixed(minutes);
            }
        }

        if let Some(tz) = self.validate_iana(mapped.unwrap_or(value)) {
            return ZoneId::Iana(tz);
        }

        tracing::warn!(tzid = %tzid, "TZID unresolved, falling back to UTC");
        ZoneId::Unresolved(tzid.to_string())
    }

    /// Checks whether the zone database knows `name`, applying the alias
    /// table first. Outcomes are memoized per input string.
    fn validate_iana(&self, name: &str) -> Option<Tz> {
        if let Some(cached) = self
            .validity
            .read()
            .expect("validity cache lock poisoned")
            .get(name)
        {
            return *cached;
        }

        let target = self
            .aliases
            .read()
            .expect("alias table lock poisoned")
            .get(name)
            .cloned();
        let target = target.as_deref().unwrap_or(name);

        let result = Tz::from_str(target).ok();
        if result.is_none() {
            tracing::warn!(zone = %name, "Zone validation failed");
        }
        self.validity
            .write()
            .expect("validity cache lock poisoned")
            .insert(name.to_string(), result);
        result
    }
}

/// Normalizes a TZID string using the process-wide resolver.
#[must_use]
pub fn resolve(tzid: &str) -> ZoneId {
    ZoneResolver::global().resolve(tzid)
}

/// Exchange emits these for zones the organizer customized locally; the
/// only sensible reading is the host's own zone.
fn is_microsoft_custom(tzid: &str) -> bool {
    tzid == "tzone://Microsoft/Custom"
        || tzid.starts_with("Customized Time Zone")
        || tzid.starts_with("tzone://Microsoft/")
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

/// Extracts a `±HH:MM` fragment from inside a parenthesized label, e.g.
/// `(UTC+05:30) Somewhere Unmapped`.
fn embedded_offset(value: &str) -> Option<i32> {
    let bytes = value.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i] != b'+' && bytes[i] != b'-' {
            continue;
        }
        // Sign, two digits, colon, two digits.
        if i + 6 <= bytes.len()
            && bytes[i + 1].is_ascii_digit()
            && bytes[i + 2].is_ascii_digit()
            && bytes[i + 3] == b':'
            && bytes[i + 4].is_ascii_digit()
            && bytes[i + 5].is_ascii_digit()
        {
            let sign = if bytes[i] == b'-' { "-" } else { "+" };
            return offset_minutes(sign, &value[i + 1..i + 3], &value[i + 4..i + 6]);
        }
    }
    None
}

/// Parses a whole value as an offset label: optional surrounding
/// parentheses, optional `UTC`/`GMT` prefix, then `±H`, `±HH`, `±HH:MM`,
/// or `±HHMM`.
fn parse_offset_label(value: &str) -> Option<i32> {
    let mut s = value.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        s = inner.trim();
    }
    let upper = s.to_ascii_uppercase();
    if let Some(rest) = upper.strip_prefix("UTC").or_else(|| upper.strip_prefix("GMT")) {
        s = &s[s.len() - rest.len()..];
        s = s.trim_start();
    }

    let (sign, digits) = match s.as_bytes().first() {
        Some(b'+') => ("+", &s[1..]),
        Some(b'-') => ("-", &s[1..]),
        _ => return None,
    };

    match digits.len() {
        1 | 2 if digits.bytes().all(|b| b.is_ascii_digit()) => {
            offset_minutes(sign, digits, "0")
        }
        5 if digits.as_bytes()[2] == b':' => {
            offset_minutes(sign, &digits[..2], &digits[3..])
        }
        4 if digits.bytes().all(|b| b.is_ascii_digit()) => {
            offset_minutes(sign, &digits[..2], &digits[2..])
        }
        _ => None,
    }
}

/// Validates and combines offset components into signed minutes.
///
/// Rejects hours over 14, exactly 14 hours with any minutes, and minutes
/// of 60 or more.
fn offset_minutes(sign: &str, hours: &str, minutes: &str) -> Option<i32> {
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || (hours == 14 && minutes != 0) || minutes >= 60 {
        return None;
    }
    let total = hours * 60 + minutes;
    Some(if sign == "-" { -total } else { total })
}
