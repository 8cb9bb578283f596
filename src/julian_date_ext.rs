// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-specific extensions: Julian centuries on the TT axis and sidereal
//! time on the UT axis.

use qtty::*;

use super::instant::Time;
use super::scales::{JD, UT};

/// Sidereal rotation rate of the Earth in degrees per solar day.
pub(crate) const SIDEREAL_RATE_DEG_PER_DAY: f64 = 360.985_647_366_29;

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0 (ephemeris argument `T`).
    #[inline]
    pub fn julian_centuries(&self) -> f64 {
        (self.value() - Self::J2000.value()) / Self::JULIAN_CENTURY.value()
    }
}

impl Time<UT> {
    /// Greenwich mean sidereal time (Meeus eq. 12.4), wrapped to `[0°, 360°)`.
    pub fn gmst(&self) -> Degrees {
        let d = self.value() - Time::<JD>::J2000.value();
        let t = d / Time::<JD>::JULIAN_CENTURY.value();
        Degrees::new(
            280.460_618_37 + SIDEREAL_RATE_DEG_PER_DAY * d + 0.000_387_933 * t * t
                - t * t * t / 38_710_000.0,
        )
        .wrap_pos()
    }

    /// Local mean sidereal time for an east-positive longitude.
    #[inline]
    pub fn local_sidereal_time(&self, longitude: Degrees) -> Degrees {
        (self.gmst() + longitude).wrap_pos()
    }
}
