// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): UT↔TT correction
//!
//! Piecewise polynomials of Espenak & Meeus (2006), as published with the
//! NASA *Five Millennium Canon of Solar Eclipses*, for 1800–2150, and the
//! Morrison & Stephenson long-term parabola outside that span.
//!
//! The correction is applied automatically by the [`UT`](super::UT) scale;
//! callers only need [`delta_t_seconds`] for diagnostics.
//!
//! Accuracy is of order a second in the twentieth century and a few seconds
//! for present-day extrapolation, which moves the Moon by well under an
//! arcsecond and is invisible at rise/set resolution.

use super::instant::Time;
use super::scales::UT;
use qtty::Seconds;

/// JD(UT) of 2000-01-01T00:00.
const JD_YEAR_2000: f64 = 2_451_544.5;

/// Mean Gregorian year in days.
const GREGORIAN_YEAR: f64 = 365.2425;

/// Decimal year for a UT instant.
#[inline]
fn decimal_year(ut: Time<UT>) -> f64 {
    2000.0 + (ut.value() - JD_YEAR_2000) / GREGORIAN_YEAR
}

#[inline]
fn long_term(y: f64) -> f64 {
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// Horner evaluation, lowest order first.
#[inline]
fn poly(t: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

fn delta_t_for_year(y: f64) -> f64 {
    match y {
        y if y < 1800.0 => long_term(y),
        y if y < 1860.0 => poly(
            y - 1800.0,
            &[
                13.72,
                -0.332_447,
                0.006_861_2,
                0.004_111_6,
                -0.000_374_36,
                0.000_012_127_2,
                -0.000_000_169_9,
                0.000_000_000_875,
            ],
        ),
        y if y < 1900.0 => poly(
            y - 1860.0,
            &[
                7.62,
                0.573_7,
                -0.251_754,
                0.016_806_68,
                -0.000_447_362_4,
                1.0 / 233_174.0,
            ],
        ),
        y if y < 1920.0 => poly(
            y - 1900.0,
            &[-2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197],
        ),
        y if y < 1941.0 => poly(y - 1920.0, &[21.20, 0.844_93, -0.076_100, 0.002_093_6]),
        y if y < 1961.0 => poly(y - 1950.0, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0]),
        y if y < 1986.0 => poly(y - 1975.0, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0]),
        y if y < 2005.0 => poly(
            y - 2000.0,
            &[
                63.86,
                0.334_5,
                -0.060_374,
                0.001_727_5,
                0.000_651_814,
                0.000_023_735_99,
            ],
        ),
        y if y < 2050.0 => poly(y - 2000.0, &[62.92, 0.322_17, 0.005_589]),
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

/// Returns **ΔT = TT − UT** for an instant on the UT axis.
#[inline]
pub(crate) fn delta_t_seconds(ut: Time<UT>) -> Seconds {
    Seconds::new(delta_t_for_year(decimal_year(ut)))
}

impl Time<UT> {
    /// Returns **ΔT = TT − UT** in seconds for this UT epoch.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds(*self)
    }
}
