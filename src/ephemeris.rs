// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rise, set and transit searches for one body and one observer.
//!
//! A search is a pure function of an [`ObserverQuery`] (site, reference
//! instant, horizon altitude) and a [`Body`].  Nothing is cached between
//! calls, so independent bodies can be evaluated from different threads.
//!
//! Circumpolar and never-up bodies are reported as explicit
//! [`Window::AlwaysUp`] / [`Window::AlwaysDown`] states, decided from the
//! declination at the reference instant.

use qtty::{Days, Degrees};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bodies::{ApparentPlace, Body};
use crate::coords::{
    altitude, hour_angle_at_altitude, refraction_from_apparent, refraction_from_true,
    HourAngleCrossing,
};
use crate::error::EphemerisError;
use crate::julian_date_ext::SIDEREAL_RATE_DEG_PER_DAY;
use crate::location::Location;
use crate::scales::{JD, UT};
use crate::Time;

/// Iteration cap for a single event search.
const MAX_ITERATIONS: usize = 20;

/// An event is settled once the correction drops under one second.
const TOLERANCE: Days = Days::new(1.0 / 86_400.0);

/// One sidereal turn of hour angle, in solar days.
const SIDEREAL_DAY: Days = Days::new(360.0 / SIDEREAL_RATE_DEG_PER_DAY);

/// Immutable inputs of a single search.
#[derive(Debug, Clone, Copy)]
pub struct ObserverQuery<'a> {
    pub location: &'a Location,
    /// Searches return the first event at or after this instant.
    pub reference: Time<UT>,
    /// Apparent altitude of the upper limb that counts as risen.
    pub horizon: Degrees,
}

impl<'a> ObserverQuery<'a> {
    /// Builds a query, truncating `horizon` toward zero to whole degrees.
    pub fn new(location: &'a Location, reference: Time<UT>, horizon: Degrees) -> Self {
        Self {
            location,
            reference,
            horizon: Degrees::new(horizon.value().trunc()),
        }
    }

    /// Geometric, geocentric altitude of the body's centre at which the
    /// upper limb appears on the horizon.
    fn geometric_horizon(&self, place: &ApparentPlace) -> Degrees {
        let refraction = refraction_from_apparent(self.horizon) * self.location.refraction_scale();
        self.horizon - refraction - place.semidiameter + place.parallax
    }
}

/// Rise/set state over one rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Window<T> {
    Crossing { rise: T, set: T },
    /// Above the horizon for the whole rotation.
    AlwaysUp,
    /// Below the horizon for the whole rotation.
    AlwaysDown,
}

impl<T> Window<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Window<U> {
        match self {
            Window::Crossing { rise, set } => {
                let rise = f(rise);
                Window::Crossing { rise, set: f(set) }
            }
            Window::AlwaysUp => Window::AlwaysUp,
            Window::AlwaysDown => Window::AlwaysDown,
        }
    }

    #[inline]
    pub fn is_always_up(&self) -> bool {
        matches!(self, Window::AlwaysUp)
    }

    #[inline]
    pub fn is_always_down(&self) -> bool {
        matches!(self, Window::AlwaysDown)
    }
}

/// Rise/set window plus the meridian transit, which always exists.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiseSetTransit<T> {
    pub window: Window<T>,
    pub transit: T,
}

impl<T> RiseSetTransit<T> {
    /// Maps every numeric value, leaving sentinels untouched.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> RiseSetTransit<U> {
        RiseSetTransit {
            window: self.window.map(&mut f),
            transit: f(self.transit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Rise,
    Set,
    Transit,
}

impl Event {
    const fn name(self) -> &'static str {
        match self {
            Event::Rise => "rise",
            Event::Set => "set",
            Event::Transit => "transit",
        }
    }
}

fn place_at(body: &Body, at: Time<UT>) -> Result<ApparentPlace, EphemerisError> {
    body.apparent_place(at.to::<JD>())
}

/// Refines the first `event` at or after the query's reference instant.
///
/// The first step always moves forward (hour-angle difference wrapped into
/// `[0°, 360°)`); later steps take the signed short way.
fn search(query: &ObserverQuery<'_>, body: &Body, event: Event) -> Result<Time<UT>, EphemerisError> {
    let latitude = query.location.latitude();
    let longitude = query.location.longitude();
    let no_convergence = || EphemerisError::NoConvergence {
        body: body.label(),
        event: event.name(),
    };

    let mut t = query.reference;
    let mut forward = true;
    for _ in 0..MAX_ITERATIONS {
        let place = place_at(body, t)?;
        let hour_angle = t.local_sidereal_time(longitude) - place.position.ra;

        let target = match event {
            Event::Transit => Degrees::new(0.0),
            Event::Rise | Event::Set => {
                let h0 = query.geometric_horizon(&place);
                match hour_angle_at_altitude(h0, latitude, place.position.dec) {
                    HourAngleCrossing::At(arc) if event == Event::Rise => -arc,
                    HourAngleCrossing::At(arc) => arc,
                    // Slipped past the circumpolar limit while refining.
                    _ => return Err(no_convergence()),
                }
            }
        };

        let delta = target - hour_angle;
        let delta = if forward {
            delta.wrap_pos()
        } else {
            delta.wrap_signed()
        };
        forward = false;

        let step = Days::new(delta.value() / SIDEREAL_RATE_DEG_PER_DAY);
        t += step;

        if step.abs() < TOLERANCE {
            if t < query.reference - TOLERANCE {
                t += SIDEREAL_DAY;
                continue;
            }
            return Ok(t);
        }
    }
    Err(no_convergence())
}

/// Next rise, set and transit of `body` after `query.reference`.
pub fn rise_set_transit(
    query: &ObserverQuery<'_>,
    body: &Body,
) -> Result<RiseSetTransit<Time<UT>>, EphemerisError> {
    let transit = search(query, body, Event::Transit)?;

    let place = place_at(body, query.reference)?;
    let h0 = query.geometric_horizon(&place);
    let window = match hour_angle_at_altitude(h0, query.location.latitude(), place.position.dec) {
        HourAngleCrossing::AlwaysAbove => Window::AlwaysUp,
        HourAngleCrossing::AlwaysBelow => Window::AlwaysDown,
        HourAngleCrossing::At(_) => Window::Crossing {
            rise: search(query, body, Event::Rise)?,
            set: search(query, body, Event::Set)?,
        },
    };

    Ok(RiseSetTransit { window, transit })
}

/// Apparent (refracted, topocentric) altitude of the body's centre.
pub fn altitude_at(location: &Location, body: &Body, at: Time<UT>) -> Result<Degrees, EphemerisError> {
    let place = place_at(body, at)?;
    let hour_angle = at.local_sidereal_time(location.longitude()) - place.position.ra;
    let geocentric = altitude(place.position.dec, location.latitude(), hour_angle);
    let topocentric = geocentric - place.parallax * geocentric.cos();
    Ok(topocentric + refraction_from_true(topocentric) * location.refraction_scale())
}
