//! License activation state.
//!
//! Purely informational: nothing is gated on the license.

use crate::AuthError;
use chrono::{DateTime, Duration, Utc};
use pos_store::{Cache, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Store key holding the license.
pub const LICENSE_KEY: &str = "license";

/// Days a fresh activation lasts.
pub const LICENSE_TERM_DAYS: i64 = 365;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct License {
    pub name: String,
    pub key: String,
    pub activated: bool,
    #[serde(rename = "expiryDate")]
    pub expires_at: DateTime<Utc>,
}

/// Countdown until a license expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRemaining {
    Expired,
    Remaining { days: i64, hours: i64 },
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRemaining::Expired => f.write_str("Licencia expirada"),
            TimeRemaining::Remaining { days, hours } => write!(f, "{} días, {} horas", days, hours),
        }
    }
}

impl License {
    /// Activate a license for [`LICENSE_TERM_DAYS`] from `now` and store it.
    pub fn activate<S: KeyValueStore>(
        cache: &Cache<S>,
        name: &str,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, AuthError> {
        if name.trim().is_empty() || key.trim().is_empty() {
            return Err(AuthError::MissingLicenseFields);
        }

        let license = License {
            name: name.to_string(),
            key: key.to_string(),
            activated: true,
            expires_at: now + Duration::days(LICENSE_TERM_DAYS),
        };
        cache.set(LICENSE_KEY, &license)?;
        info!(name = %license.name, expires = %license.expires_at, "license activated");
        Ok(license)
    }

    /// Remove the stored license.
    pub fn deactivate<S: KeyValueStore>(cache: &Cache<S>) -> Result<(), AuthError> {
        cache.delete(LICENSE_KEY)?;
        info!("license deactivated");
        Ok(())
    }

    pub fn load<S: KeyValueStore>(cache: &Cache<S>) -> Result<Option<Self>, AuthError> {
        Ok(cache.get(LICENSE_KEY)?)
    }

    /// Whole days and leftover hours until expiry, truncated.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> TimeRemaining {
        let diff = self.expires_at - now;
        if diff <= Duration::zero() {
            return TimeRemaining::Expired;
        }
        let days = diff.num_days();
        let hours = (diff - Duration::days(days)).num_hours();
        TimeRemaining::Remaining { days, hours }
    }

    /// Activated and not yet expired at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.activated && self.time_remaining(now) != TimeRemaining::Expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_activate_sets_one_year() {
        let cache = Cache::memory();
        let license = License::activate(&cache, "Mi Tienda", "ABCD-1234", now()).unwrap();

        assert_eq!(
            license.time_remaining(now()),
            TimeRemaining::Remaining { days: 365, hours: 0 }
        );
        assert_eq!(License::load(&cache).unwrap(), Some(license));
    }

    #[test]
    fn test_time_remaining_truncates() {
        let license = License {
            name: "Mi Tienda".into(),
            key: "K".into(),
            activated: true,
            expires_at: now() + Duration::hours(50) + Duration::minutes(59),
        };
        let remaining = license.time_remaining(now());
        assert_eq!(remaining, TimeRemaining::Remaining { days: 2, hours: 2 });
        assert_eq!(remaining.to_string(), "2 días, 2 horas");

        assert_eq!(
            license.time_remaining(license.expires_at),
            TimeRemaining::Expired
        );
        assert!(!license.is_active(license.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_activate_requires_fields_and_deactivate_removes() {
        let cache = Cache::memory();
        assert!(matches!(
            License::activate(&cache, "", "KEY", now()),
            Err(AuthError::MissingLicenseFields)
        ));

        License::activate(&cache, "Mi Tienda", "KEY", now()).unwrap();
        License::deactivate(&cache).unwrap();
        assert_eq!(License::load(&cache).unwrap(), None);
    }

    #[test]
    fn test_stored_shape() {
        let cache = Cache::memory();
        License::activate(&cache, "Mi Tienda", "KEY", now()).unwrap();
        let raw: serde_json::Value = cache.get(LICENSE_KEY).unwrap().unwrap();
        assert_eq!(raw["activated"], true);
        assert!(raw["expiryDate"].is_string());
    }
}
