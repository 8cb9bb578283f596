// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coarse lunar illumination for shading moon bands.
//!
//! The illuminated fraction is interpolated with a cosine between the next
//! full moon and the new moon that follows it.  Expect errors around 10%,
//! occasionally 20%: this is a rendering aid, not a photometric model.

use qtty::{Days, Degrees};

use crate::bodies::{moon_longitude, sun_longitude};
use crate::error::EphemerisError;
use crate::scales::{JD, UT};
use crate::Time;

/// Mean daily growth of the Moon–Sun elongation.
const ELONGATION_RATE_DEG_PER_DAY: f64 = 12.190_749;

const MAX_ITERATIONS: usize = 30;

/// Phase instants are refined to about a second.
const TOLERANCE: Days = Days::new(1e-5);

fn elongation(t: Time<JD>) -> Degrees {
    let c = t.julian_centuries();
    moon_longitude(c) - sun_longitude(c)
}

/// First instant after `after` at which the elongation equals `target`.
fn next_elongation(
    after: Time<UT>,
    target: Degrees,
    event: &'static str,
) -> Result<Time<UT>, EphemerisError> {
    let mut t = after.to::<JD>();
    for i in 0..MAX_ITERATIONS {
        let delta = target - elongation(t);
        let delta = if i == 0 {
            delta.wrap_pos()
        } else {
            delta.wrap_signed()
        };
        let step = Days::new(delta.value() / ELONGATION_RATE_DEG_PER_DAY);
        t += step;
        if step.abs() < TOLERANCE {
            return Ok(t.to::<UT>());
        }
    }
    Err(EphemerisError::NoConvergence {
        body: "Moon".to_string(),
        event,
    })
}

/// First full moon at or after `after`.
pub fn next_full_moon(after: Time<UT>) -> Result<Time<UT>, EphemerisError> {
    next_elongation(after, Degrees::new(180.0), "full moon")
}

/// First new moon at or after `after`.
pub fn next_new_moon(after: Time<UT>) -> Result<Time<UT>, EphemerisError> {
    next_elongation(after, Degrees::new(0.0), "new moon")
}

/// Approximate illuminated fraction in `[0, 1]` at `at`.
///
/// `0.5·cos(2π·(t − F)/P) + 0.5`, with `F` the next full moon and `P` twice
/// the span from `F` to the new moon after it.
pub fn illumination(at: Time<UT>) -> Result<f64, EphemerisError> {
    let full = next_full_moon(at)?;
    let new = next_new_moon(full)?;
    let period = (new - full).value() * 2.0;
    let phase = (at - full).value() / period;
    Ok((0.5 * (std::f64::consts::TAU * phase).cos() + 0.5).clamp(0.0, 1.0))
}
