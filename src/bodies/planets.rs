// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Major-body positions from JPL approximate Keplerian elements
//! (Standish, Table 1, valid 1800–2050).
//!
//! Heliocentric positions are built in the J2000 ecliptic, differenced
//! against the Earth–Moon barycentre, rotated to the J2000 equator and
//! finally precessed to the equinox of date.

use qtty::{Degree, Degrees, Radian, Radians};
use roots::{find_root_newton_raphson, SimpleConvergency};

use super::{ApparentPlace, Planet};
use crate::coords::{ecliptic_to_equatorial, precess_from_j2000};
use crate::error::EphemerisError;

/// Obliquity of the J2000 ecliptic.
const J2000_OBLIQUITY: Degrees = Degrees::new(23.439_28);

/// Light travel time across one au, in days.
const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// `[a (au), e, I, L, ϖ, Ω]` and their rates per Julian century.
type Elements = ([f64; 6], [f64; 6]);

const MERCURY: Elements = (
    [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
);
const VENUS: Elements = (
    [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
);
const EM_BARYCENTRE: Elements = (
    [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
);
const MARS: Elements = (
    [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
);
const JUPITER: Elements = (
    [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
);
const SATURN: Elements = (
    [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
);
const URANUS: Elements = (
    [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
    [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
);
const NEPTUNE: Elements = (
    [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
    [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
);
const PLUTO: Elements = (
    [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
    [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
);

fn elements(planet: Planet) -> &'static Elements {
    match planet {
        Planet::Mercury => &MERCURY,
        Planet::Venus => &VENUS,
        Planet::Mars => &MARS,
        Planet::Jupiter => &JUPITER,
        Planet::Saturn => &SATURN,
        Planet::Uranus => &URANUS,
        Planet::Neptune => &NEPTUNE,
        Planet::Pluto => &PLUTO,
    }
}

/// Solves `E − e·sin E = M` (radians) by Newton–Raphson.
fn solve_kepler(mean_anomaly: f64, e: f64) -> Result<f64, roots::SearchError> {
    let f = |ea: f64| ea - e * ea.sin() - mean_anomaly;
    let df = |ea: f64| 1.0 - e * ea.cos();
    let mut convergency = SimpleConvergency {
        eps: 1e-12,
        max_iter: 30,
    };
    find_root_newton_raphson(mean_anomaly + e * mean_anomaly.sin(), &f, &df, &mut convergency)
}

/// Heliocentric J2000 ecliptic rectangular coordinates, au.
fn heliocentric(elements: &Elements, t: f64, name: &'static str) -> Result<[f64; 3], EphemerisError> {
    let (base, rate) = elements;
    let at = |i: usize| base[i] + rate[i] * t;
    let (a, e) = (at(0), at(1));
    let inclination = Degrees::new(at(2));
    let mean_longitude = Degrees::new(at(3));
    let perihelion = Degrees::new(at(4));
    let node = Degrees::new(at(5));

    let arg_perihelion = perihelion - node;
    let mean_anomaly = (mean_longitude - perihelion).wrap_signed().to::<Radian>().value();

    let ecc_anomaly = solve_kepler(mean_anomaly, e).map_err(|err| {
        log::debug!("Kepler solve for {name} failed: {err:?}");
        EphemerisError::Kepler(name)
    })?;
    let xp = a * (ecc_anomaly.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sin_w, cos_w) = arg_perihelion.sin_cos();
    let (sin_o, cos_o) = node.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();

    Ok([
        (cos_w * cos_o - sin_w * sin_o * cos_i) * xp + (-sin_w * cos_o - cos_w * sin_o * cos_i) * yp,
        (cos_w * sin_o + sin_w * cos_o * cos_i) * xp + (-sin_w * sin_o + cos_w * cos_o * cos_i) * yp,
        (sin_w * sin_i) * xp + (cos_w * sin_i) * yp,
    ])
}

fn geocentric(planet: Planet, t: f64) -> Result<[f64; 3], EphemerisError> {
    let p = heliocentric(elements(planet), t, planet.name())?;
    let earth = heliocentric(&EM_BARYCENTRE, t, "Earth")?;
    Ok([p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]])
}

pub(crate) fn apparent_place(planet: Planet, t: f64) -> Result<ApparentPlace, EphemerisError> {
    // One light-time iteration: the planet is seen where it was Δ/c ago.
    let first = geocentric(planet, t)?;
    let distance = first.iter().map(|c| c * c).sum::<f64>().sqrt();
    let retarded = t - distance * LIGHT_TIME_DAYS_PER_AU / 36_525.0;
    let [x, y, z] = geocentric(planet, retarded)?;

    let lon = Radians::new(y.atan2(x)).to::<Degree>();
    let lat = Radians::new(z.atan2(x.hypot(y))).to::<Degree>();
    let j2000 = ecliptic_to_equatorial(lon, lat, J2000_OBLIQUITY);
    Ok(ApparentPlace::point(precess_from_j2000(j2000, t)))
}
