// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale markers.
//!
//! | Marker | Axis | Used for |
//! |--------|------|----------|
//! | [`JD`] | Julian Date on TT | Sun, Moon and planet series |
//! | [`UT`] | Julian Date on UT | sidereal time, hour angles, civil time |

use super::instant::{Time, TimeScale};
use qtty::Days;

/// Julian Date on the uniform TT axis (the identity scale).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// Universal Time: Julian Date on the Earth-rotation axis.
///
/// Conversion to [`JD`] adds ΔT; the inverse is a short fixed-point
/// iteration since ΔT varies by well under a second per day.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut_value: Days) -> Days {
        let dt_secs = super::delta_t::delta_t_seconds(Time::<UT>::from_days(ut_value));
        ut_value + dt_secs.to::<qtty::Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        let mut ut = jd_tt;
        for _ in 0..3 {
            let dt_days = super::delta_t::delta_t_seconds(Time::<UT>::from_days(ut)).to::<qtty::Day>();
            ut = jd_tt - dt_days;
        }
        ut
    }
}

impl From<Time<JD>> for Time<UT> {
    #[inline]
    fn from(t: Time<JD>) -> Self {
        t.to::<UT>()
    }
}

impl From<Time<UT>> for Time<JD> {
    #[inline]
    fn from(t: Time<UT>) -> Self {
        t.to::<JD>()
    }
}
