// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-parameterised instants.
//!
//! [`Time<S>`] stores a Julian-day count in [`Days`] whose axis is fixed at
//! compile time by the marker `S: TimeScale`.  Ephemerides are evaluated on
//! the uniform TT axis ([`JD`](crate::JD)); Earth rotation (sidereal time,
//! hour angles, rise/set searches) runs on the [`UT`](crate::UT) axis.
//! Crossing between the two goes through [`Time::to`], which applies ΔT.

use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// JD of the Unix epoch (1970-01-01T00:00:00Z).
pub(crate) const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

/// Marker trait for time scales.
///
/// A scale converts its native Julian-day count to and from the canonical
/// **Julian Date in TT**.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a quantity in this scale to an absolute JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert an absolute JD(TT) back to this scale.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

/// A point on time scale `S`.
///
/// `Time<S>` is layout-identical to a single `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw Julian-day count on this scale.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Re-express this instant on scale `T`, passing through JD(TT).
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_days(T::from_jd_tt(S::to_jd_tt(self.quantity)))
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// UTC is identified with UT, so leap seconds are ignored.  Returns `None`
    /// outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        use super::scales::UT;
        let jd_ut = self.to::<UT>().quantity();
        let seconds_since_epoch = (jd_ut - UNIX_EPOCH_JD).to::<Second>().value();
        if !seconds_since_epoch.is_finite() {
            return None;
        }
        let secs = seconds_since_epoch.floor() as i64;
        let nanos = ((seconds_since_epoch - secs as f64) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos.min(999_999_999))
    }

    /// Build an instant from a `chrono::DateTime<Utc>`, applying ΔT when `S`
    /// lives on the TT axis.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        use super::scales::UT;
        let seconds_since_epoch = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        let jd_ut = UNIX_EPOCH_JD + (seconds_since_epoch + nanos).to::<Day>();
        Time::<UT>::from_days(jd_ut).to::<S>()
    }
}

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::super::scales::{JD, UT};
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn jd_utc_roundtrip() {
        let datetime = Utc.with_ymd_and_hms(2021, 1, 1, 19, 0, 0).unwrap();
        let jd = Time::<JD>::from_utc(datetime);
        let back = jd.to_utc().expect("to_utc");
        let delta_ns =
            back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
        // An f64 JD near 2.46e6 resolves to roughly 40 µs.
        assert!(delta_ns.abs() < 100_000, "roundtrip error: {} ns", delta_ns);
    }

    #[test]
    fn ut_from_utc_is_plain_julian_day() {
        // 2000-01-01 12:00:00 UTC is JD(UT) 2451545.0 exactly.
        let datetime = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let ut = Time::<UT>::from_utc(datetime);
        assert!((ut.value() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn from_utc_on_tt_axis_adds_delta_t() {
        let datetime = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = Time::<JD>::from_utc(datetime);
        let delta_t = (jd.quantity() - Days::new(2_451_545.0)).to::<Second>();
        assert!(
            (delta_t - Seconds::new(63.86)).abs() < Seconds::new(1.0),
            "ΔT correction = {} s",
            delta_t
        );
    }

    #[test]
    fn arithmetic_with_days() {
        let mut t = Time::<UT>::new(2_459_215.5);
        t += Days::new(0.25);
        assert_eq!(t.value(), 2_459_215.75);
        let earlier = t - Days::new(1.0);
        assert_eq!((t - earlier).value(), 1.0);
        assert!(earlier < t);
    }

    #[test]
    fn display_carries_label() {
        let s = format!("{}", Time::<UT>::new(2_451_545.0));
        assert!(s.starts_with("UT"));
    }
}
