// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observing sites.

use chrono_tz::Tz;
use qtty::{Degrees, Meters};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lowest accepted site elevation.
pub const MIN_ELEVATION: Meters = Meters::new(-500.0);

/// Highest accepted site elevation; the tropospheric pressure model holds
/// below this.
pub const MAX_ELEVATION: Meters = Meters::new(11_000.0);

/// Standard air temperature assumed for refraction, in °C.
pub const STANDARD_TEMPERATURE_C: f64 = 15.0;

/// A validated observing site.
///
/// Longitude is east-positive.  Immutable once built; the timezone is parsed
/// up front so every later conversion is infallible.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "LocationRecord", into = "LocationRecord")
)]
pub struct Location {
    latitude: Degrees,
    longitude: Degrees,
    elevation: Meters,
    timezone: Tz,
}

impl Location {
    /// Validates and builds a site from raw degrees, metres and an IANA zone.
    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        timezone: &str,
    ) -> Result<Self, ConfigError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ConfigError::InvalidLongitude(longitude));
        }
        if !(MIN_ELEVATION.value()..=MAX_ELEVATION.value()).contains(&elevation) {
            return Err(ConfigError::InvalidElevation(elevation));
        }
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(timezone.to_string()))?;
        Ok(Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
            elevation: Meters::new(elevation),
            timezone,
        })
    }

    #[inline]
    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    #[inline]
    pub fn elevation(&self) -> Meters {
        self.elevation
    }

    #[inline]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Station pressure in hPa from the 1976 standard atmosphere.
    pub fn pressure_hpa(&self) -> f64 {
        1013.25 * (1.0 - 2.255_77e-5 * self.elevation.value()).powf(5.255_88)
    }

    /// Scale factor applied to sea-level refraction for this site.
    pub(crate) fn refraction_scale(&self) -> f64 {
        (self.pressure_hpa() / 1010.0) * (283.0 / (273.0 + STANDARD_TEMPERATURE_C))
    }
}

/// Plain record form of a [`Location`], as supplied by site storage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timezone: String,
}

impl TryFrom<LocationRecord> for Location {
    type Error = ConfigError;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Location::new(
            record.latitude,
            record.longitude,
            record.elevation,
            &record.timezone,
        )
    }
}

impl From<Location> for LocationRecord {
    fn from(location: Location) -> Self {
        LocationRecord {
            latitude: location.latitude.value(),
            longitude: location.longitude.value(),
            elevation: location.elevation.value(),
            timezone: location.timezone.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_site() {
        let site = Location::new(32.9033, -106.9606, 2225.0, "US/Mountain").unwrap();
        assert_eq!(site.latitude().value(), 32.9033);
        assert_eq!(site.timezone().name(), "US/Mountain");
    }

    #[test]
    fn rejects_bad_fields() {
        assert_eq!(
            Location::new(91.0, 0.0, 0.0, "UTC"),
            Err(ConfigError::InvalidLatitude(91.0))
        );
        assert_eq!(
            Location::new(0.0, 181.0, 0.0, "UTC"),
            Err(ConfigError::InvalidLongitude(181.0))
        );
        assert_eq!(
            Location::new(0.0, 0.0, -600.0, "UTC"),
            Err(ConfigError::InvalidElevation(-600.0))
        );
        assert!(Location::new(f64::NAN, 0.0, 0.0, "UTC").is_err());
        assert!(Location::new(0.0, 0.0, f64::INFINITY, "UTC").is_err());
        assert_eq!(
            Location::new(0.0, 0.0, 50_000.0, "UTC"),
            Err(ConfigError::InvalidElevation(50_000.0))
        );
        assert_eq!(
            Location::new(0.0, 0.0, 0.0, "Mars/Olympus_Mons"),
            Err(ConfigError::UnknownTimezone("Mars/Olympus_Mons".into()))
        );
    }

    #[test]
    fn pressure_falls_with_elevation() {
        let sea = Location::new(0.0, 0.0, 0.0, "UTC").unwrap();
        let high = Location::new(0.0, 0.0, 2225.0, "UTC").unwrap();
        assert!((sea.pressure_hpa() - 1013.25).abs() < 1e-9);
        assert!((high.pressure_hpa() - 773.0).abs() < 5.0, "{}", high.pressure_hpa());
        assert!(high.refraction_scale() < sea.refraction_scale());

        let ceiling = Location::new(0.0, 0.0, MAX_ELEVATION.value(), "UTC").unwrap();
        assert!(ceiling.pressure_hpa().is_finite() && ceiling.pressure_hpa() > 0.0);
    }

    #[test]
    fn record_roundtrip() {
        let record = LocationRecord {
            latitude: -31.2733,
            longitude: 149.0644,
            elevation: 1165.0,
            timezone: "Australia/Melbourne".into(),
        };
        let site = Location::try_from(record.clone()).unwrap();
        assert_eq!(LocationRecord::from(site), record);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates() {
        let bad = r#"{"latitude":95.0,"longitude":0.0,"elevation":0.0,"timezone":"UTC"}"#;
        assert!(serde_json::from_str::<Location>(bad).is_err());
        let ok = r#"{"latitude":38.15,"longitude":-2.31,"elevation":1650.0,"timezone":"Europe/Madrid"}"#;
        let site: Location = serde_json::from_str(ok).unwrap();
        assert_eq!(site.timezone().name(), "Europe/Madrid");
    }
}
