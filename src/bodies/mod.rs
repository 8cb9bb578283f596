// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Celestial bodies and their low-precision apparent places.
//!
//! | Body | Model | Frame |
//! |------|-------|-------|
//! | Sun | Meeus ch. 25, low accuracy | of date |
//! | Moon | Meeus ch. 47, leading terms | of date |
//! | [`Planet`] | JPL approximate Keplerian elements (1800–2050) | J2000, precessed |
//! | [`FixedTarget`] | catalogue J2000 RA/Dec | J2000, precessed |
//!
//! All of them are good to a few arcminutes, which is far below the
//! one-degree granularity of the horizon thresholds they feed.

mod moon;
mod planets;
mod sun;

use std::fmt;
use std::str::FromStr;

use qtty::Degrees;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coords::{precess_from_j2000, Equatorial};
use crate::error::EphemerisError;
use crate::scales::JD;
use crate::Time;

pub(crate) use moon::ecliptic_longitude as moon_longitude;
pub(crate) use sun::apparent_longitude as sun_longitude;

/// Major bodies with a built-in ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = String;

    /// Case-insensitive match on the English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Planet::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("not a major body: {s:?}"))
    }
}

/// A resolved catalogue position, mean J2000.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedTarget {
    pub name: String,
    pub ra: Degrees,
    pub dec: Degrees,
}

impl FixedTarget {
    pub fn new(name: impl Into<String>, ra: Degrees, dec: Degrees) -> Self {
        Self {
            name: name.into(),
            ra,
            dec,
        }
    }

    #[inline]
    pub fn j2000(&self) -> Equatorial {
        Equatorial::new(self.ra, self.dec)
    }
}

/// Anything the caller can ask the planner about.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Target {
    Fixed(FixedTarget),
    Planet(Planet),
}

impl Target {
    /// Caller-facing label.
    pub fn name(&self) -> &str {
        match self {
            Target::Fixed(t) => &t.name,
            Target::Planet(p) => p.name(),
        }
    }
}

impl From<FixedTarget> for Target {
    fn from(t: FixedTarget) -> Self {
        Target::Fixed(t)
    }
}

impl From<Planet> for Target {
    fn from(p: Planet) -> Self {
        Target::Planet(p)
    }
}

/// A body as seen by the ephemeris layer.
///
/// Fixed targets are reduced to their J2000 coordinates so the value stays
/// `Copy` and can be handed to every per-day query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    Sun,
    Moon,
    Planet(Planet),
    Fixed(Equatorial),
}

impl Body {
    pub fn label(&self) -> String {
        match self {
            Body::Sun => "Sun".to_string(),
            Body::Moon => "Moon".to_string(),
            Body::Planet(p) => p.name().to_string(),
            Body::Fixed(eq) => format!("RA {:.4}° Dec {:+.4}°", eq.ra.value(), eq.dec.value()),
        }
    }

    /// Apparent geocentric place at `jd` (TT).
    pub fn apparent_place(&self, jd: Time<JD>) -> Result<ApparentPlace, EphemerisError> {
        let t = jd.julian_centuries();
        Ok(match self {
            Body::Sun => sun::apparent_place(t),
            Body::Moon => moon::apparent_place(t),
            Body::Planet(p) => planets::apparent_place(*p, t)?,
            Body::Fixed(eq) => ApparentPlace::point(precess_from_j2000(*eq, t)),
        })
    }
}

impl From<&Target> for Body {
    fn from(target: &Target) -> Self {
        match target {
            Target::Fixed(t) => Body::Fixed(t.j2000()),
            Target::Planet(p) => Body::Planet(*p),
        }
    }
}

/// Position plus the disc geometry needed for rise/set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPlace {
    pub position: Equatorial,
    /// Angular radius; rise/set refer to the upper limb.
    pub semidiameter: Degrees,
    /// Equatorial horizontal parallax.
    pub parallax: Degrees,
}

impl ApparentPlace {
    pub(crate) fn point(position: Equatorial) -> Self {
        Self {
            position,
            semidiameter: Degrees::new(0.0),
            parallax: Degrees::new(0.0),
        }
    }
}
