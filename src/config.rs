// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tunables for the window computation and the banding pass.

use qtty::{Degrees, Hours};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Hours added to every local time so the plotted day starts at local noon.
pub const DEFAULT_DAY_SHIFT: Hours = Hours::new(12.0);

/// Day-to-day rise jump above which a band is split.
pub const DEFAULT_JUMP_THRESHOLD: Hours = Hours::new(10.0);

/// Altitude thresholds and sampling cadence.
///
/// Defaults: targets above 45°, sun below −18° (astronomical twilight),
/// moon threshold −5°, one sample every 7 days.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// Altitude at which a target counts as risen.
    pub min_alt: Degrees,
    /// Altitude at which the sun counts as risen (twilight definition).
    pub min_alt_sun: Degrees,
    /// Altitude at which the moon counts as risen.
    pub min_alt_moon: Degrees,
    /// Days between consecutive samples.
    pub sampling_period_days: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_alt: Degrees::new(45.0),
            min_alt_sun: Degrees::new(-18.0),
            min_alt_moon: Degrees::new(-5.0),
            sampling_period_days: 7,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("min_alt", self.min_alt),
            ("min_alt_sun", self.min_alt_sun),
            ("min_alt_moon", self.min_alt_moon),
        ] {
            if !value.value().is_finite() {
                return Err(ConfigError::NonFiniteThreshold {
                    name,
                    value: value.value(),
                });
            }
        }
        if self.sampling_period_days == 0 {
            return Err(ConfigError::ZeroSamplingPeriod);
        }
        Ok(())
    }
}

/// Day-shift and discontinuity tunables shared by the normalizer and bander.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BandingConfig {
    /// Offset applied to local decimal hours, in `[0, 24)`.
    pub day_shift: Hours,
    /// Rise-to-rise jump that splits a band; must be positive.
    pub jump_threshold: Hours,
}

impl Default for BandingConfig {
    fn default() -> Self {
        Self {
            day_shift: DEFAULT_DAY_SHIFT,
            jump_threshold: DEFAULT_JUMP_THRESHOLD,
        }
    }
}

impl BandingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shift = self.day_shift.value();
        if !(0.0..24.0).contains(&shift) {
            return Err(ConfigError::InvalidShift {
                name: "day_shift",
                range: "[0, 24)",
                value: shift,
            });
        }
        let jump = self.jump_threshold.value();
        if !(jump.is_finite() && jump > 0.0) {
            return Err(ConfigError::InvalidShift {
                name: "jump_threshold",
                range: "(0, ∞)",
                value: jump,
            });
        }
        Ok(())
    }
}
