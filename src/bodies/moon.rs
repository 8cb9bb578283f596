// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunar coordinates from the leading periodic terms of Meeus ch. 47.
//!
//! Twenty terms from each of Tables 47.A and 47.B keep the error near
//! 0.05° in longitude, plenty for rise/set at whole-degree thresholds.

use qtty::{Degree, Degrees, Radians};

use super::ApparentPlace;
use crate::coords::{ecliptic_to_equatorial, mean_obliquity};

const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.14;

/// `(D, M, M', F, Σl [1e-6 °], Σr [1e-3 km])`
const TERMS_LR: [(f64, f64, f64, f64, f64, f64); 20] = [
    (0.0, 0.0, 1.0, 0.0, 6_288_774.0, -20_905_355.0),
    (2.0, 0.0, -1.0, 0.0, 1_274_027.0, -3_699_111.0),
    (2.0, 0.0, 0.0, 0.0, 658_314.0, -2_955_968.0),
    (0.0, 0.0, 2.0, 0.0, 213_618.0, -569_925.0),
    (0.0, 1.0, 0.0, 0.0, -185_116.0, 48_888.0),
    (0.0, 0.0, 0.0, 2.0, -114_332.0, -3_149.0),
    (2.0, 0.0, -2.0, 0.0, 58_793.0, 246_158.0),
    (2.0, -1.0, -1.0, 0.0, 57_066.0, -152_138.0),
    (2.0, 0.0, 1.0, 0.0, 53_322.0, -170_733.0),
    (2.0, -1.0, 0.0, 0.0, 45_758.0, -204_586.0),
    (0.0, 1.0, -1.0, 0.0, -40_923.0, -129_620.0),
    (1.0, 0.0, 0.0, 0.0, -34_720.0, 108_743.0),
    (0.0, 1.0, 1.0, 0.0, -30_383.0, 104_755.0),
    (2.0, 0.0, 0.0, -2.0, 15_327.0, 10_321.0),
    (0.0, 0.0, 1.0, 2.0, -12_528.0, 0.0),
    (0.0, 0.0, 1.0, -2.0, 10_980.0, 79_661.0),
    (4.0, 0.0, -1.0, 0.0, 10_675.0, -34_782.0),
    (0.0, 0.0, 3.0, 0.0, 10_034.0, -23_210.0),
    (4.0, 0.0, -2.0, 0.0, 8_548.0, -21_636.0),
    (2.0, 1.0, -1.0, 0.0, -7_888.0, 24_208.0),
];

/// `(D, M, M', F, Σb [1e-6 °])`
const TERMS_B: [(f64, f64, f64, f64, f64); 20] = [
    (0.0, 0.0, 0.0, 1.0, 5_128_122.0),
    (0.0, 0.0, 1.0, 1.0, 280_602.0),
    (0.0, 0.0, 1.0, -1.0, 277_693.0),
    (2.0, 0.0, 0.0, -1.0, 173_237.0),
    (2.0, 0.0, -1.0, 1.0, 55_413.0),
    (2.0, 0.0, -1.0, -1.0, 46_271.0),
    (2.0, 0.0, 0.0, 1.0, 32_573.0),
    (0.0, 0.0, 2.0, 1.0, 17_198.0),
    (2.0, 0.0, 1.0, -1.0, 9_266.0),
    (0.0, 0.0, 2.0, -1.0, 8_822.0),
    (2.0, -1.0, 0.0, -1.0, 8_216.0),
    (2.0, 0.0, -2.0, -1.0, 4_324.0),
    (2.0, 0.0, 1.0, 1.0, 4_200.0),
    (2.0, 1.0, 0.0, -1.0, -3_359.0),
    (2.0, -1.0, -1.0, 1.0, 2_463.0),
    (2.0, -1.0, 0.0, 1.0, 2_211.0),
    (2.0, -1.0, -1.0, -1.0, 2_065.0),
    (0.0, 1.0, -1.0, -1.0, -1_870.0),
    (4.0, 0.0, -1.0, -1.0, 1_828.0),
    (0.0, 1.0, 0.0, 1.0, -1_794.0),
];

/// Geocentric ecliptic position, mean equinox of date.
struct LunarEcliptic {
    longitude: Degrees,
    latitude: Degrees,
    distance_km: f64,
}

fn polynomial(t: f64, c: [f64; 5]) -> Degrees {
    Degrees::new(c[0] + t * (c[1] + t * (c[2] + t * (c[3] + t * c[4])))).wrap_pos()
}

fn ecliptic(t: f64) -> LunarEcliptic {
    let lp = polynomial(t, [218.316_447_7, 481_267.881_234_21, -0.001_578_6, 1.0 / 538_841.0, -1.0 / 65_194_000.0]);
    let d = polynomial(t, [297.850_192_1, 445_267.111_403_4, -0.001_881_9, 1.0 / 545_868.0, -1.0 / 113_065_000.0]);
    let m = polynomial(t, [357.529_109_2, 35_999.050_290_9, -0.000_153_6, 1.0 / 24_490_000.0, 0.0]);
    let mp = polynomial(t, [134.963_396_4, 477_198.867_505_5, 0.008_741_4, 1.0 / 69_699.0, -1.0 / 14_712_000.0]);
    let f = polynomial(t, [93.272_095_0, 483_202.017_523_3, -0.003_653_9, -1.0 / 3_526_000.0, 1.0 / 863_310_000.0]);

    // Decreasing eccentricity of the Earth's orbit scales terms in M.
    let e = 1.0 - t * (0.002_516 + t * 0.000_007_4);
    let e_factor = |m_mult: f64| match m_mult.abs() as u8 {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };
    let argument = |cd: f64, cm: f64, cmp: f64, cf: f64| d * cd + m * cm + mp * cmp + f * cf;

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for &(cd, cm, cmp, cf, cl, cr) in &TERMS_LR {
        let (sin_a, cos_a) = argument(cd, cm, cmp, cf).sin_cos();
        sum_l += cl * e_factor(cm) * sin_a;
        sum_r += cr * e_factor(cm) * cos_a;
    }
    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, cb) in &TERMS_B {
        sum_b += cb * e_factor(cm) * argument(cd, cm, cmp, cf).sin();
    }

    // Venus, Jupiter and flattening corrections.
    let a1 = Degrees::new(119.75 + 131.849 * t);
    let a2 = Degrees::new(53.09 + 479_264.290 * t);
    let a3 = Degrees::new(313.45 + 481_266.484 * t);
    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    LunarEcliptic {
        longitude: (lp + Degrees::new(sum_l / 1e6)).wrap_pos(),
        latitude: Degrees::new(sum_b / 1e6),
        distance_km: 385_000.56 + sum_r / 1000.0,
    }
}

/// Geocentric ecliptic longitude of the Moon, `t` in Julian centuries (TT).
pub(crate) fn ecliptic_longitude(t: f64) -> Degrees {
    ecliptic(t).longitude
}

pub(crate) fn apparent_place(t: f64) -> ApparentPlace {
    let moon = ecliptic(t);
    let omega = Degrees::new(125.04 - 1934.136 * t);
    let obliquity = mean_obliquity(t) + Degrees::new(0.002_56 * omega.cos());
    let position = ecliptic_to_equatorial(moon.longitude, moon.latitude, obliquity);

    let parallax = Radians::new((EARTH_EQUATORIAL_RADIUS_KM / moon.distance_km).asin()).to::<Degree>();
    ApparentPlace {
        position,
        semidiameter: Degrees::new(358_473_400.0 / moon.distance_km / 3600.0),
        parallax,
    }
}
