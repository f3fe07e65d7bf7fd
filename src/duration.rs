// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Go-style duration values for CRD fields.
//!
//! Driver webhook timeouts are expressed on the wire the way Kubernetes
//! expresses `metav1.Duration`: a Go duration string such as `"10s"`, `"1m30s"`,
//! or `"2h"`. [`GoDuration`] wraps `std::time::Duration` and handles parsing,
//! canonical formatting, and serde integration for that format.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3600;

/// A duration serialized as a Go duration string (e.g., `"10s"`).
///
/// Only whole-second resolution is supported; the units accepted are
/// `h` (hours), `m` (minutes), and `s` (seconds). Formatting is canonical:
/// largest units first, zero components omitted, and `"0s"` for the zero
/// duration.
///
/// # Examples
///
/// ```
/// use lbfo::duration::GoDuration;
/// use std::time::Duration;
///
/// let timeout: GoDuration = "1m30s".parse().unwrap();
/// assert_eq!(timeout.as_duration(), Duration::from_secs(90));
/// assert_eq!(timeout.to_string(), "1m30s");
///
/// // Formatting is canonical regardless of the input spelling
/// let verbose: GoDuration = "90s".parse().unwrap();
/// assert_eq!(verbose.to_string(), "1m30s");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoDuration(Duration);

impl GoDuration {
    /// Construct a duration from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// The wrapped `std::time::Duration`.
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    /// Total number of whole seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0.as_secs()
    }
}

impl From<Duration> for GoDuration {
    fn from(d: Duration) -> Self {
        Self(d)
    }
}

/// Parse a Go-style duration string into a `Duration`.
///
/// Accepts one or more `<value><unit>` pairs where `<unit>` is `h`, `m`,
/// or `s` (e.g., `"10s"`, `"2h"`, `"1m30s"`). Sub-second units are not
/// supported; webhook timeouts are whole seconds.
///
/// # Errors
///
/// Returns an error if:
/// - The string is empty
/// - A value has no trailing unit, or a unit has no leading value
/// - A unit other than `h`, `m`, or `s` is used
/// - The total number of seconds overflows `u64`
pub fn parse_duration(duration_str: &str) -> Result<Duration> {
    if duration_str.is_empty() {
        bail!("duration string cannot be empty");
    }

    let mut total_secs: u64 = 0;
    let mut rest = duration_str;

    while !rest.is_empty() {
        // Find where digits end and the unit begins
        let split_pos = rest
            .chars()
            .position(|c| !c.is_ascii_digit())
            .with_context(|| {
                format!("duration '{duration_str}' must end with a unit (h, m, or s)")
            })?;

        if split_pos == 0 {
            bail!("duration '{duration_str}' has a unit with no value");
        }

        let (value_str, tail) = rest.split_at(split_pos);
        let value: u64 = value_str
            .parse()
            .with_context(|| format!("invalid value '{value_str}' in duration '{duration_str}'"))?;

        let (unit, remainder) = tail.split_at(1);
        let unit_secs = match unit {
            "h" => SECONDS_PER_HOUR,
            "m" => SECONDS_PER_MINUTE,
            "s" => 1,
            _ => bail!(
                "unsupported duration unit '{unit}' in '{duration_str}'. \
                 Use 'h' (hours), 'm' (minutes), or 's' (seconds)"
            ),
        };

        total_secs = value
            .checked_mul(unit_secs)
            .and_then(|secs| total_secs.checked_add(secs))
            .with_context(|| format!("duration '{duration_str}' is too large (overflow)"))?;

        rest = remainder;
    }

    Ok(Duration::from_secs(total_secs))
}

impl FromStr for GoDuration {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_duration(s).map(GoDuration)
    }
}

impl fmt::Display for GoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        if secs == 0 {
            return write!(f, "0s");
        }

        let hours = secs / SECONDS_PER_HOUR;
        let minutes = (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = secs % SECONDS_PER_MINUTE;

        if hours > 0 {
            write!(f, "{hours}h")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        if seconds > 0 {
            write!(f, "{seconds}s")?;
        }
        Ok(())
    }
}

impl Serialize for GoDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GoDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
