// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Conversion of absolute instants into shifted local decimal hours.
//!
//! Hours are measured from local midnight in the site's timezone and then
//! moved forward by a fixed day shift, wrapping into `[0, 24)`.  With the
//! default 12 h shift the plotted day starts at local noon, so one night is
//! a single increasing interval.
//!
//! ```
//! use obsplan::normalize::{shift, unshift};
//! use qtty::Hours;
//!
//! let s = Hours::new(12.0);
//! assert_eq!(shift(Hours::new(22.0), s).value(), 10.0);
//! assert_eq!(unshift(Hours::new(10.0), s).value(), 22.0);
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike};
use chrono_tz::Tz;
use qtty::Hours;

use crate::ephemeris::{RiseSetTransit, Window};
use crate::error::EphemerisError;
use crate::scales::UT;
use crate::Time;

const HOURS_PER_DAY: f64 = 24.0;

#[inline]
fn wrap_day(h: f64) -> Hours {
    let r = h.rem_euclid(HOURS_PER_DAY);
    // rem_euclid rounds tiny negatives up to exactly 24.0.
    Hours::new(if r >= HOURS_PER_DAY { 0.0 } else { r })
}

/// Adds `amount` to `hour`, wrapping into `[0, 24)`.
pub fn shift(hour: Hours, amount: Hours) -> Hours {
    wrap_day(hour.value() + amount.value())
}

/// Inverse of [`shift`].
pub fn unshift(hour: Hours, amount: Hours) -> Hours {
    wrap_day(hour.value() - amount.value())
}

/// Localizes instants for one site with one day shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTimeNormalizer {
    timezone: Tz,
    shift: Hours,
}

impl LocalTimeNormalizer {
    pub fn new(timezone: Tz, shift: Hours) -> Self {
        Self { timezone, shift }
    }

    #[inline]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    #[inline]
    pub fn day_shift(&self) -> Hours {
        self.shift
    }

    fn localize(&self, instant: Time<UT>) -> Result<DateTime<Tz>, EphemerisError> {
        instant
            .to_utc()
            .map(|utc| utc.with_timezone(&self.timezone))
            .ok_or(EphemerisError::OutOfRange)
    }

    /// Hours elapsed since local midnight, `[0, 24)`, before shifting.
    pub fn local_decimal_hours(&self, instant: Time<UT>) -> Result<Hours, EphemerisError> {
        let local = self.localize(instant)?;
        let seconds = local.num_seconds_from_midnight() as f64 + local.nanosecond() as f64 * 1e-9;
        Ok(wrap_day(seconds / 3600.0))
    }

    /// Local calendar date of `instant`.
    pub fn local_date(&self, instant: Time<UT>) -> Result<NaiveDate, EphemerisError> {
        Ok(self.localize(instant)?.date_naive())
    }

    /// Shifted local hour of `instant`.
    pub fn hours(&self, instant: Time<UT>) -> Result<Hours, EphemerisError> {
        Ok(shift(self.local_decimal_hours(instant)?, self.shift))
    }

    pub fn shift(&self, hour: Hours) -> Hours {
        shift(hour, self.shift)
    }

    pub fn unshift(&self, hour: Hours) -> Hours {
        unshift(hour, self.shift)
    }

    /// Instant at which the shifted day labelled `date` begins.
    ///
    /// That is local midnight plus `(24 − shift) mod 24` hours, i.e. local
    /// noon for the default shift.  A wall-clock time swallowed by a DST
    /// gap is resolved one hour later.
    pub fn day_start(&self, date: NaiveDate) -> Result<Time<UT>, EphemerisError> {
        let offset_hours = unshift(Hours::new(0.0), self.shift).value();
        let offset = TimeDelta::milliseconds((offset_hours * 3_600_000.0).round() as i64);
        let wall = date.and_time(NaiveTime::MIN) + offset;

        let local = self
            .timezone
            .from_local_datetime(&wall)
            .earliest()
            .or_else(|| {
                self.timezone
                    .from_local_datetime(&(wall + TimeDelta::hours(1)))
                    .earliest()
            })
            .ok_or(EphemerisError::OutOfRange)?;
        Ok(Time::<UT>::from_utc(local.to_utc()))
    }

    /// Converts a search result to shifted local hours.
    ///
    /// Sentinels pass through untouched.
    pub fn normalize(
        &self,
        rst: RiseSetTransit<Time<UT>>,
    ) -> Result<RiseSetTransit<Hours>, EphemerisError> {
        let window = match rst.window {
            Window::Crossing { rise, set } => Window::Crossing {
                rise: self.hours(rise)?,
                set: self.hours(set)?,
            },
            Window::AlwaysUp => Window::AlwaysUp,
            Window::AlwaysDown => Window::AlwaysDown,
        };
        Ok(RiseSetTransit {
            window,
            transit: self.hours(rst.transit)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, Utc};

    fn mountain() -> LocalTimeNormalizer {
        LocalTimeNormalizer::new(chrono_tz::US::Mountain, Hours::new(12.0))
    }

    fn ut(s: &str) -> Time<UT> {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        Time::<UT>::from_utc(naive.and_utc())
    }

    #[test]
    fn shift_wraps() {
        let s = Hours::new(12.0);
        assert_eq!(shift(Hours::new(0.0), s).value(), 12.0);
        assert_eq!(shift(Hours::new(12.0), s).value(), 0.0);
        assert_eq!(shift(Hours::new(23.5), s).value(), 11.5);
        assert_eq!(shift(Hours::new(24.0), Hours::new(0.0)).value(), 0.0);
        assert_eq!(wrap_day(-1e-17).value(), 0.0);
    }

    #[test]
    fn unshift_inverts() {
        let s = Hours::new(7.25);
        for h in [0.0, 3.5, 16.75, 23.99] {
            let back = unshift(shift(Hours::new(h), s), s).value();
            assert!((back - h).abs() < 1e-9, "{h} -> {back}");
        }
    }

    #[test]
    fn local_hours_follow_the_timezone() {
        let n = mountain();
        // 2021-01-02 02:30 UT is 19:30 MST on Jan 1.
        let t = ut("2021-01-02 02:30:00");
        assert!((n.local_decimal_hours(t).unwrap().value() - 19.5).abs() < 1e-6);
        assert!((n.hours(t).unwrap().value() - 7.5).abs() < 1e-6);
        assert_eq!(
            n.local_date(t).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
        );
    }

    #[test]
    fn daylight_saving_is_applied() {
        let n = mountain();
        // July: MDT is UT−6.
        let t = ut("2021-07-01 04:00:00");
        assert!((n.local_decimal_hours(t).unwrap().value() - 22.0).abs() < 1e-6);
    }

    #[test]
    fn day_start_is_local_noon_for_default_shift() {
        let n = mountain();
        let start = n.day_start(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()).unwrap();
        assert!((start - ut("2021-01-01 19:00:00")).value().abs() < 1e-8);
        let h = n.hours(start).unwrap().value();
        assert!(h.min(24.0 - h) < 1e-6, "{h}");
    }

    #[test]
    fn day_start_without_shift_is_midnight() {
        let n = LocalTimeNormalizer::new(chrono_tz::UTC, Hours::new(0.0));
        let start = n.day_start(NaiveDate::from_ymd_opt(2021, 3, 14).unwrap()).unwrap();
        let expected = Time::<UT>::from_utc(Utc.with_ymd_and_hms(2021, 3, 14, 0, 0, 0).unwrap());
        assert!((start - expected).value().abs() < 1e-8);
    }

    #[test]
    fn day_start_skips_dst_gap() {
        // 2021-03-14 02:00 does not exist in US/Mountain.
        let n = LocalTimeNormalizer::new(chrono_tz::US::Mountain, Hours::new(22.0));
        let start = n.day_start(NaiveDate::from_ymd_opt(2021, 3, 14).unwrap());
        assert!(start.is_ok());
    }

    #[test]
    fn sentinels_pass_through() {
        let n = mountain();
        let t = ut("2021-01-02 02:30:00");
        for window in [Window::AlwaysUp, Window::AlwaysDown] {
            let out = n.normalize(RiseSetTransit { window, transit: t }).unwrap();
            assert_eq!(out.window, window.map(|_: Time<UT>| Hours::new(0.0)));
            assert!((out.transit.value() - 7.5).abs() < 1e-6);
        }
    }
}
