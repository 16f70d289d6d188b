//! Polling timeout resolution
//!
//! An explicit finite timeout is used as-is; the sentinel `-1` disables the
//! deadline entirely; when no timeout is given it is derived from the credit
//! budget as `2 * max_credits + 300` seconds.

use std::fmt;
use std::time::Duration;

use crate::{Error, Result};

/// Seconds of deadline granted per credit when deriving the default timeout
pub const TIMEOUT_PER_CREDIT_SECS: u64 = 2;

/// Flat buffer added to the derived default timeout, in seconds
pub const TIMEOUT_BUFFER_SECS: u64 = 300;

/// Timeout value that disables the deadline entirely
pub const INFINITE_TIMEOUT_SENTINEL: f64 = -1.0;

/// Deadline configuration for the poll loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollTimeout {
    /// No deadline; poll until the task reaches a terminal state
    Infinite,
    /// Fail with a timeout error once polling has taken longer than this
    After(Duration),
}

impl PollTimeout {
    /// Resolve the effective timeout from an optional explicit value
    ///
    /// Explicit values go through [`PollTimeout::from_secs`]; absent values
    /// fall back to [`PollTimeout::default_for_credits`].
    pub fn resolve(explicit_secs: Option<f64>, max_credits: Option<u32>) -> Result<Self> {
        match explicit_secs {
            Some(secs) => Self::from_secs(secs),
            None => Self::default_for_credits(max_credits),
        }
    }

    /// Parse an explicit timeout value in seconds
    ///
    /// `-1` means infinite; anything else must be a positive finite number.
    pub fn from_secs(secs: f64) -> Result<Self> {
        if secs == INFINITE_TIMEOUT_SENTINEL {
            return Ok(PollTimeout::Infinite);
        }
        if !secs.is_finite() || secs <= 0.0 {
            return Err(Error::Config(
                "timeout must be -1 for infinite wait or a positive number of seconds".to_string(),
            ));
        }
        let deadline = Duration::try_from_secs_f64(secs)
            .map_err(|_| Error::Config(format!("timeout of {} seconds is out of range", secs)))?;
        Ok(PollTimeout::After(deadline))
    }

    /// Derive the default timeout from the credit budget
    pub fn default_for_credits(max_credits: Option<u32>) -> Result<Self> {
        let credits = max_credits.ok_or_else(|| {
            Error::Config(
                "max_credits configuration is required to derive the default invoke timeout"
                    .to_string(),
            )
        })?;

        let secs = TIMEOUT_PER_CREDIT_SECS * u64::from(credits) + TIMEOUT_BUFFER_SECS;
        Ok(PollTimeout::After(Duration::from_secs(secs)))
    }

    /// The finite deadline, if one is configured
    pub fn deadline(&self) -> Option<Duration> {
        match self {
            PollTimeout::Infinite => None,
            PollTimeout::After(deadline) => Some(*deadline),
        }
    }
}

impl fmt::Display for PollTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollTimeout::Infinite => write!(f, "infinite"),
            PollTimeout::After(deadline) => write!(f, "{}", format_secs(*deadline)),
        }
    }
}

/// Format a duration as seconds for logs and error messages
///
/// Whole seconds render without a fraction (`340s`), anything else with two
/// decimal places (`2.50s`).
pub fn format_secs(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{}s", secs as u64)
    } else {
        format!("{:.2}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_two_per_credit_plus_buffer() {
        let timeout = PollTimeout::default_for_credits(Some(20)).unwrap();
        assert_eq!(timeout.deadline().unwrap().as_secs_f64(), 340.0);

        let timeout = PollTimeout::default_for_credits(Some(0)).unwrap();
        assert_eq!(timeout.deadline().unwrap().as_secs_f64(), 300.0);

        let timeout = PollTimeout::default_for_credits(Some(50)).unwrap();
        assert_eq!(timeout.deadline().unwrap().as_secs_f64(), 400.0);
    }

    #[test]
    fn test_default_timeout_requires_credit_budget() {
        let err = PollTimeout::default_for_credits(None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("max_credits"));
    }

    #[test]
    fn test_sentinel_disables_deadline() {
        let timeout = PollTimeout::from_secs(-1.0).unwrap();
        assert_eq!(timeout, PollTimeout::Infinite);
        assert_eq!(timeout.deadline(), None);
    }

    #[test]
    fn test_explicit_timeout_used_as_is() {
        let timeout = PollTimeout::resolve(Some(1200.0), Some(10)).unwrap();
        assert_eq!(timeout.deadline().unwrap().as_secs_f64(), 1200.0);
    }

    #[test]
    fn test_zero_and_negative_timeouts_rejected() {
        assert!(matches!(PollTimeout::from_secs(0.0), Err(Error::Config(_))));
        assert!(matches!(PollTimeout::from_secs(-5.0), Err(Error::Config(_))));
        assert!(matches!(PollTimeout::from_secs(f64::NAN), Err(Error::Config(_))));
        assert!(matches!(
            PollTimeout::from_secs(f64::INFINITY),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_out_of_range_timeout_rejected() {
        // Positive and finite, but beyond what a Duration can represent
        let err = PollTimeout::from_secs(1e30).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_resolve_prefers_explicit_over_derived() {
        let timeout = PollTimeout::resolve(Some(-1.0), Some(10)).unwrap();
        assert_eq!(timeout, PollTimeout::Infinite);

        let timeout = PollTimeout::resolve(None, Some(10)).unwrap();
        assert_eq!(timeout.deadline().unwrap().as_secs_f64(), 320.0);
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(Duration::from_secs(340)), "340s");
        assert_eq!(format_secs(Duration::from_secs_f64(2.5)), "2.50s");
        assert_eq!(format_secs(Duration::from_secs(0)), "0s");
    }

    #[test]
    fn test_display() {
        assert_eq!(PollTimeout::Infinite.to_string(), "infinite");
        assert_eq!(
            PollTimeout::After(Duration::from_secs(1200)).to_string(),
            "1200s"
        );
    }
}
