// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! [`ConfigError`] is fatal: nothing is computed.  [`EphemerisError`] is
//! scoped to a single (body, day) sample and is recovered by the calculator.

use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("latitude {0}° outside [-90°, 90°]")]
    InvalidLatitude(f64),

    #[error("longitude {0}° outside [-180°, 180°]")]
    InvalidLongitude(f64),

    #[error("elevation {0} m outside [-500 m, 11000 m]")]
    InvalidElevation(f64),

    #[error("unknown IANA timezone: {0:?}")]
    UnknownTimezone(String),

    #[error("target list is empty")]
    EmptyTargets,

    #[error("begin date {begin} is after end date {end}")]
    InvertedDateRange {
        begin: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("sampling period must be at least one day")]
    ZeroSamplingPeriod,

    #[error("{name} threshold is not finite: {value}")]
    NonFiniteThreshold { name: &'static str, value: f64 },

    #[error("{name} must lie in {range}, got {value}")]
    InvalidShift {
        name: &'static str,
        range: &'static str,
        value: f64,
    },
}

/// Failure of a single ephemeris evaluation or event search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("{event} search for {body} did not converge")]
    NoConvergence {
        body: String,
        event: &'static str,
    },

    #[error("Kepler equation did not converge for {0}")]
    Kepler(&'static str),

    #[error("instant outside the representable date range")]
    OutOfRange,
}
