// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Spherical-astronomy helpers: equatorial and horizontal frames,
//! obliquity, precession, and atmospheric refraction.

use qtty::{Degree, Degrees, Radians};

/// Right ascension and declination.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equatorial {
    pub ra: Degrees,
    pub dec: Degrees,
}

impl Equatorial {
    pub const fn new(ra: Degrees, dec: Degrees) -> Self {
        Self { ra, dec }
    }
}

#[inline]
fn deg(rad: f64) -> Degrees {
    Radians::new(rad).to::<Degree>()
}

/// Mean obliquity of the ecliptic (IAU 1980, Meeus eq. 22.2).
pub fn mean_obliquity(t: f64) -> Degrees {
    Degrees::new(23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.000_59 - t * 0.001_813))) / 60.0) / 60.0)
}

/// Rotates ecliptic longitude/latitude into right ascension/declination.
pub fn ecliptic_to_equatorial(lon: Degrees, lat: Degrees, obliquity: Degrees) -> Equatorial {
    let (sin_l, cos_l) = lon.sin_cos();
    let (sin_b, cos_b) = lat.sin_cos();
    let (sin_e, cos_e) = obliquity.sin_cos();

    let ra = (sin_l * cos_e - (sin_b / cos_b) * sin_e).atan2(cos_l);
    let dec = (sin_b * cos_e + cos_b * sin_e * sin_l).clamp(-1.0, 1.0).asin();
    Equatorial::new(deg(ra).wrap_pos(), deg(dec))
}

/// Precesses J2000 mean coordinates to the equinox `t` Julian centuries
/// after J2000 (Meeus eq. 21.3–21.4).
pub fn precess_from_j2000(eq: Equatorial, t: f64) -> Equatorial {
    let arcsec = |x: f64| Degrees::new(x / 3600.0);
    let zeta = arcsec(t * (2306.2181 + t * (0.301_88 + t * 0.017_998)));
    let z = arcsec(t * (2306.2181 + t * (1.094_68 + t * 0.018_203)));
    let theta = arcsec(t * (2004.3109 - t * (0.426_65 + t * 0.041_833)));

    let (sin_d, cos_d) = eq.dec.sin_cos();
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_a, cos_a) = (eq.ra + zeta).sin_cos();

    let a = cos_d * sin_a;
    let b = cos_t * cos_d * cos_a - sin_t * sin_d;
    let c = sin_t * cos_d * cos_a + cos_t * sin_d;

    Equatorial::new(
        (deg(a.atan2(b)) + z).wrap_pos(),
        deg(c.clamp(-1.0, 1.0).asin()),
    )
}

/// Geometric altitude for a given local hour angle.
pub fn altitude(dec: Degrees, latitude: Degrees, hour_angle: Degrees) -> Degrees {
    let (sin_p, cos_p) = latitude.sin_cos();
    let (sin_d, cos_d) = dec.sin_cos();
    let sin_h = sin_p * sin_d + cos_p * cos_d * hour_angle.cos();
    deg(sin_h.clamp(-1.0, 1.0).asin())
}

/// Where a parallel of declination sits relative to an altitude circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourAngleCrossing {
    /// Crosses at `±H0`; rising at `-H0`, setting at `+H0`.
    At(Degrees),
    /// Never drops to the altitude over a full rotation.
    AlwaysAbove,
    /// Never climbs to the altitude over a full rotation.
    AlwaysBelow,
}

/// Semi-diurnal arc `H0` for altitude `h0` (Meeus eq. 15.1).
pub fn hour_angle_at_altitude(h0: Degrees, latitude: Degrees, dec: Degrees) -> HourAngleCrossing {
    let (sin_p, cos_p) = latitude.sin_cos();
    let (sin_d, cos_d) = dec.sin_cos();
    let denom = cos_p * cos_d;
    let num = h0.sin() - sin_p * sin_d;

    if denom.abs() < 1e-12 {
        // Pole or body at the pole: altitude is constant over the rotation.
        return if -num < 0.0 {
            HourAngleCrossing::AlwaysBelow
        } else {
            HourAngleCrossing::AlwaysAbove
        };
    }

    let cos_h0 = num / denom;
    if cos_h0 < -1.0 {
        HourAngleCrossing::AlwaysAbove
    } else if cos_h0 > 1.0 {
        HourAngleCrossing::AlwaysBelow
    } else {
        HourAngleCrossing::At(deg(cos_h0.acos()))
    }
}

/// Sea-level refraction for an *apparent* altitude (Bennett 1982).
///
/// Zero below −1°, where the formula stops being meaningful.
pub fn refraction_from_apparent(apparent: Degrees) -> Degrees {
    let h = apparent.value();
    if h < -1.0 {
        return Degrees::new(0.0);
    }
    let arcmin = 1.0 / Degrees::new(h + 7.31 / (h + 4.4)).tan();
    Degrees::new(arcmin / 60.0)
}

/// Sea-level refraction for a *true* altitude (Sæmundsson 1986).
pub fn refraction_from_true(true_alt: Degrees) -> Degrees {
    let h = true_alt.value();
    if h < -1.0 {
        return Degrees::new(0.0);
    }
    let arcmin = 1.02 / Degrees::new(h + 10.3 / (h + 5.11)).tan();
    Degrees::new(arcmin / 60.0)
}
