// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar coordinates, Meeus ch. 25 low-accuracy method (~0.01°).

use qtty::Degrees;

use super::ApparentPlace;
use crate::coords::{ecliptic_to_equatorial, mean_obliquity};

/// Solar semi-diameter at 1 au, in arcseconds.
const SEMIDIAMETER_1AU_ARCSEC: f64 = 959.63;

struct SolarTerms {
    /// Apparent longitude (aberration and nutation in longitude applied).
    lambda: Degrees,
    /// Longitude of the Moon's ascending node, used for the nutation terms.
    omega: Degrees,
    /// Radius vector, au.
    radius: f64,
}

fn terms(t: f64) -> SolarTerms {
    let l0 = Degrees::new(280.466_46 + t * (36_000.769_83 + t * 0.000_303_2));
    let m = Degrees::new(357.529_11 + t * (35_999.050_29 - t * 0.000_153_7));
    let e = 0.016_708_634 - t * (0.000_042_037 + t * 0.000_000_126_7);

    let c = Degrees::new(
        m.sin() * (1.914_602 - t * (0.004_817 + t * 0.000_014))
            + (m * 2.0).sin() * (0.019_993 - t * 0.000_101)
            + (m * 3.0).sin() * 0.000_289,
    );
    let true_lon = l0 + c;
    let nu = m + c;
    let radius = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    let omega = Degrees::new(125.04 - 1934.136 * t);
    let lambda = true_lon - Degrees::new(0.005_69 + 0.004_78 * omega.sin());

    SolarTerms {
        lambda: lambda.wrap_pos(),
        omega,
        radius,
    }
}

/// Apparent ecliptic longitude of the Sun, `t` in Julian centuries (TT).
pub(crate) fn apparent_longitude(t: f64) -> Degrees {
    terms(t).lambda
}

pub(crate) fn apparent_place(t: f64) -> ApparentPlace {
    let s = terms(t);
    let obliquity = mean_obliquity(t) + Degrees::new(0.002_56 * s.omega.cos());
    let position = ecliptic_to_equatorial(s.lambda, Degrees::new(0.0), obliquity);
    ApparentPlace {
        position,
        semidiameter: Degrees::new(SEMIDIAMETER_1AU_ARCSEC / s.radius / 3600.0),
        parallax: Degrees::new(8.794 / s.radius / 3600.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centuries(jd: f64) -> f64 {
        (jd - 2_451_545.0) / 36_525.0
    }

    #[test]
    fn meeus_example_25a() {
        // 1992 Oct 13.0 TD.
        let t = centuries(2_448_908.5);
        assert!((apparent_longitude(t).value() - 199.908_95).abs() < 0.01);
        let place = apparent_place(t);
        assert!((place.position.ra.value() - 198.380_83).abs() < 0.01);
        assert!((place.position.dec.value() + 7.785_07).abs() < 0.01);
    }

    #[test]
    fn semidiameter_tracks_distance() {
        // Perihelion early January, aphelion early July.
        let jan = apparent_place(centuries(2_459_218.5)).semidiameter.value() * 60.0;
        let jul = apparent_place(centuries(2_459_400.5)).semidiameter.value() * 60.0;
        assert!(jan > 16.2 && jan < 16.4, "{jan}");
        assert!(jul > 15.6 && jul < 15.8, "{jul}");
    }

    #[test]
    fn june_solstice_declination() {
        let place = apparent_place(centuries(2_459_386.5)); // 2021-06-21
        assert!((place.position.dec.value() - 23.43).abs() < 0.05);
    }
}
