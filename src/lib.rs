// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observability planning for ground-based sites.
//!
//! Given a site, a list of targets and a date range, `obsplan` computes for
//! every sample day when each target, the Sun and the Moon cross their
//! altitude thresholds, expresses those instants as shifted local hours, and
//! stitches the per-day windows into plottable bands.
//!
//! # Pipeline
//!
//! | Stage | Type |
//! |-------|------|
//! | rise/set/transit search | [`ephemeris::rise_set_transit`] |
//! | local hours with day shift | [`LocalTimeNormalizer`] |
//! | per-day series | [`ObservabilityWindowCalculator`] |
//! | band stitching | [`IntervalBander`] |
//! | moon shading | [`moon_phase::illumination`] |
//! | orchestration | [`ObservabilityPlot`] |
//!
//! # Time scales
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Date on the TT axis, used by the ephemerides |
//! | [`UT`] | Universal Time (Earth rotation), used by hour angles |
//!
//! ΔT = TT − UT is applied automatically when converting between the two;
//! the raw value is available via [`Time::<UT>::delta_t()`](Time::delta_t).
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use obsplan::{
//!     BandingConfig, DateRange, Location, ObservabilityPlot, Planet, Thresholds,
//! };
//!
//! let site = Location::new(32.9033, -106.9606, 2225.0, "US/Mountain")?;
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2021, 1, 29).unwrap(),
//! )?;
//! let plot = ObservabilityPlot::new(
//!     site,
//!     vec![Planet::Jupiter.into()],
//!     range,
//!     Thresholds::default(),
//!     BandingConfig::default(),
//! )?;
//! assert_eq!(plot.dates().len(), 5);
//! # Ok::<(), obsplan::ConfigError>(())
//! ```

pub mod bander;
pub mod bodies;
pub mod calculator;
pub mod config;
pub mod coords;
mod delta_t;
pub mod ephemeris;
pub mod error;
pub(crate) mod instant;
mod julian_date_ext;
pub mod location;
pub mod moon_phase;
pub mod normalize;
mod period;
pub mod plot;
pub(crate) mod scales;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use bander::{Band, IntervalBander};
pub use bodies::{Body, FixedTarget, Planet, Target};
pub use calculator::{DailyWindow, DateRange, ObservabilityWindowCalculator};
pub use config::{BandingConfig, Thresholds, DEFAULT_DAY_SHIFT, DEFAULT_JUMP_THRESHOLD};
pub use ephemeris::{ObserverQuery, RiseSetTransit, Window};
pub use error::{ConfigError, EphemerisError};
pub use instant::{Time, TimeScale};
pub use location::{Location, LocationRecord};
pub use normalize::LocalTimeNormalizer;
pub use period::{complement_within, intersect_spans, Interval};
pub use plot::{MoonSample, ObservabilityPlot};
pub use scales::{JD, UT};

/// Julian Date on the TT axis.
pub type JulianDate = Time<JD>;

/// Universal Time: Earth-rotation civil time scale.
pub type UniversalTime = Time<UT>;
