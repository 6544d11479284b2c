//! Time-window predicate injected into readers.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::ConfigError;

/// Accepts or rejects an item by its `created_at`.
///
/// Captured once at reader construction so fixtures can pin a fixed cutoff.
pub type AcceptFn = Arc<dyn Fn(&DateTime<FixedOffset>) -> bool + Send + Sync>;

/// Earliest timestamp a record may carry and still be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    /// Relative window: `now - days`.
    DaysBack(u32),
    /// Fixed instant.
    Absolute(DateTime<FixedOffset>),
}

impl Cutoff {
    /// The cutoff instant relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the window reaches past the
    /// range chrono can represent.
    pub fn resolve(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>, ConfigError> {
        match *self {
            Cutoff::DaysBack(days) => TimeDelta::try_days(i64::from(days))
                .and_then(|window| now.checked_sub_signed(window))
                .ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "cutoff of {days} days before {} is out of range",
                        now.to_rfc3339()
                    ))
                }),
            Cutoff::Absolute(at) => Ok(at),
        }
    }

    /// Builds a predicate accepting timestamps at or after the resolved cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the cutoff cannot be resolved.
    pub fn predicate(&self, now: DateTime<FixedOffset>) -> Result<AcceptFn, ConfigError> {
        let cutoff = self.resolve(now)?;
        Ok(Arc::new(move |created_at: &DateTime<FixedOffset>| {
            *created_at >= cutoff
        }))
    }
}

impl std::fmt::Display for Cutoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cutoff::DaysBack(days) => write!(f, "last {days} days"),
            Cutoff::Absolute(at) => write!(f, "since {}", at.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn days_back_subtracts_from_now() {
        let now = at("2013-11-28T00:00:00-08:00");
        assert_eq!(
            Cutoff::DaysBack(14).resolve(now).unwrap(),
            at("2013-11-14T00:00:00-08:00")
        );
    }

    #[test]
    fn days_back_past_representable_range_is_an_error() {
        let now = at("2013-11-28T00:00:00+00:00");
        let result = Cutoff::DaysBack(200_000_000).predicate(now);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("200000000 days")),
            "expected Validation error, got: {:?}",
            result.err()
        );
    }

    #[test]
    fn largest_configurable_window_resolves() {
        let now = at("2013-11-28T00:00:00+00:00");
        assert!(Cutoff::DaysBack(crate::MAX_DAYS_BACK).resolve(now).is_ok());
    }

    #[test]
    fn absolute_ignores_now() {
        let fixed = at("2013-11-14T00:00:00+00:00");
        let now = at("2020-01-01T00:00:00+00:00");
        assert_eq!(Cutoff::Absolute(fixed).resolve(now).unwrap(), fixed);
    }

    #[test]
    fn predicate_is_inclusive_at_the_boundary() {
        let accept = Cutoff::Absolute(at("2013-11-14T00:00:00+00:00"))
            .predicate(at("2013-11-28T00:00:00+00:00"))
            .unwrap();
        assert!(accept(&at("2013-11-14T00:00:00+00:00")));
        assert!(accept(&at("2013-11-20T12:00:00+00:00")));
        assert!(!accept(&at("2013-11-13T23:59:59+00:00")));
    }

    #[test]
    fn predicate_compares_instants_across_offsets() {
        // 2013-11-13T20:00:00-08:00 is 2013-11-14T04:00:00Z.
        let accept = Cutoff::Absolute(at("2013-11-14T00:00:00+00:00"))
            .predicate(at("2013-11-28T00:00:00+00:00"))
            .unwrap();
        assert!(accept(&at("2013-11-13T20:00:00-08:00")));
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Cutoff::DaysBack(7).to_string(), "last 7 days");
        assert_eq!(
            Cutoff::Absolute(at("2013-11-14T00:00:00+00:00")).to_string(),
            "since 2013-11-14T00:00:00+00:00"
        );
    }
}
