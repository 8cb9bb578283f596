// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Plot-ready view over one calculator run.
//!
//! [`ObservabilityPlot`] owns the computed series and hands out what a
//! renderer needs: target bands, moon bands shaded by illumination, the raw
//! sun series, and a per-day "observable" flag for summary grids.

use chrono::NaiveDate;
use qtty::Hours;

use crate::bander::{Band, IntervalBander};
use crate::bodies::Target;
use crate::calculator::{DailyWindow, DateRange, ObservabilityWindowCalculator};
use crate::config::{BandingConfig, Thresholds};
use crate::ephemeris::Window;
use crate::error::ConfigError;
use crate::location::Location;
use crate::moon_phase;
use crate::period::{complement_within, intersect_spans, Interval};
use crate::scales::UT;
use crate::Time;

/// Auxiliary column carried by moon bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonSample {
    /// Instant the day's searches started from.
    pub reference: Time<UT>,
    /// Coarse illuminated fraction; `None` if the phase search failed.
    pub illumination: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ObservabilityPlot {
    calculator: ObservabilityWindowCalculator,
    bander: IntervalBander,
}

impl ObservabilityPlot {
    /// Runs the calculator for one site and target list.
    pub fn new(
        location: Location,
        targets: Vec<Target>,
        range: DateRange,
        thresholds: Thresholds,
        banding: BandingConfig,
    ) -> Result<Self, ConfigError> {
        let calculator =
            ObservabilityWindowCalculator::new(location, targets, range, thresholds, banding)?;
        Ok(Self::from_calculator(calculator, IntervalBander::from(&banding)))
    }

    pub fn from_calculator(calculator: ObservabilityWindowCalculator, bander: IntervalBander) -> Self {
        Self { calculator, bander }
    }

    #[inline]
    pub fn calculator(&self) -> &ObservabilityWindowCalculator {
        &self.calculator
    }

    #[inline]
    pub fn dates(&self) -> &[NaiveDate] {
        self.calculator.dates()
    }

    /// Bands for the target at `index`, or `None` past the end.
    pub fn target_bands(&self, index: usize) -> Option<Vec<Band>> {
        let series = self.calculator.target_series().get(index)?;
        Some(self.bander.band(self.dates(), &windows(series)))
    }

    /// Bands for every target, in target order.
    pub fn all_target_bands(&self) -> Vec<Vec<Band>> {
        self.calculator
            .target_series()
            .iter()
            .map(|series| self.bander.band(self.dates(), &windows(series)))
            .collect()
    }

    /// Moon bands, each point tagged with its reference instant and
    /// estimated illumination.
    pub fn moon_bands(&self) -> Vec<Band<MoonSample>> {
        let samples: Vec<MoonSample> = self
            .calculator
            .references()
            .iter()
            .map(|&reference| MoonSample {
                reference,
                illumination: moon_phase::illumination(reference)
                    .map_err(|err| log::debug!("no illumination at {reference}: {err}"))
                    .ok(),
            })
            .collect();
        self.bander
            .band_with_aux(self.dates(), &windows(self.calculator.moon_series()), &samples)
    }

    /// Raw shifted sun series; a renderer fills `[0, set]` and `[rise, 24]`.
    #[inline]
    pub fn sun_series(&self) -> &[DailyWindow] {
        self.calculator.sun_series()
    }

    /// Dark spans of day `day`: the shifted day minus the sun-up spans.
    pub fn dark_window(&self, day: usize) -> Option<Vec<Interval<Hours>>> {
        let sun = self.calculator.sun_series().get(day)?;
        Some(complement_within(full_day(), &up_spans(sun.window)))
    }

    /// Whether target `target` is up while the sky is dark on day `day`.
    ///
    /// `None` for out-of-range indices.
    pub fn is_observable(&self, target: usize, day: usize) -> Option<bool> {
        let window = self.calculator.target_series().get(target)?.get(day)?.window;
        let dark = self.dark_window(day)?;
        Some(!intersect_spans(&up_spans(window), &dark).is_empty())
    }

    /// Sample dates on which target `target` is observable.
    pub fn observable_dates(&self, target: usize) -> Vec<NaiveDate> {
        self.dates()
            .iter()
            .enumerate()
            .filter(|&(day, _)| self.is_observable(target, day).unwrap_or(false))
            .map(|(_, &date)| date)
            .collect()
    }
}

fn windows(series: &[DailyWindow]) -> Vec<Window<Hours>> {
    series.iter().map(|rst| rst.window).collect()
}

fn full_day() -> Interval<Hours> {
    Interval::new(Hours::new(0.0), Hours::new(24.0))
}

/// Sorted spans of the shifted day during which a body is up.
fn up_spans(window: Window<Hours>) -> Vec<Interval<Hours>> {
    let spans = match window {
        Window::AlwaysUp => vec![full_day()],
        Window::AlwaysDown => Vec::new(),
        Window::Crossing { rise, set } if rise < set => vec![Interval::new(rise, set)],
        Window::Crossing { rise, set } => vec![
            Interval::new(Hours::new(0.0), set),
            Interval::new(rise, Hours::new(24.0)),
        ],
    };
    spans.into_iter().filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{FixedTarget, Planet};
    use qtty::Degrees;

    fn h(x: f64) -> Hours {
        Hours::new(x)
    }

    #[test]
    fn up_spans_cover_each_case() {
        assert_eq!(up_spans(Window::AlwaysUp), vec![full_day()]);
        assert!(up_spans(Window::AlwaysDown).is_empty());
        assert_eq!(
            up_spans(Window::Crossing { rise: h(3.0), set: h(9.0) }),
            vec![Interval::new(h(3.0), h(9.0))]
        );
        assert_eq!(
            up_spans(Window::Crossing { rise: h(20.0), set: h(2.0) }),
            vec![Interval::new(h(0.0), h(2.0)), Interval::new(h(20.0), h(24.0))]
        );
        // Set exactly at the day boundary leaves only the lead span.
        assert_eq!(
            up_spans(Window::Crossing { rise: h(20.0), set: h(0.0) }),
            vec![Interval::new(h(20.0), h(24.0))]
        );
    }

    fn plot(targets: Vec<Target>) -> ObservabilityPlot {
        let site = Location::new(32.9033, -106.9606, 2225.0, "US/Mountain").unwrap();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 15).unwrap(),
        )
        .unwrap();
        ObservabilityPlot::new(site, targets, range, Thresholds::default(), BandingConfig::default())
            .unwrap()
    }

    #[test]
    fn winter_target_is_observable_summer_target_is_not() {
        // Orion is a winter object; the galactic centre region is not.
        let m42 = FixedTarget::new("M42", Degrees::new(83.8221), Degrees::new(-5.3911));
        let m8 = FixedTarget::new("M8", Degrees::new(270.9042), Degrees::new(-24.3867));
        let plot = plot(vec![m42.into(), m8.into()]);
        assert_eq!(plot.observable_dates(0), plot.dates().to_vec());
        assert!(plot.observable_dates(1).is_empty());
        assert_eq!(plot.is_observable(5, 0), None);
        assert_eq!(plot.is_observable(0, 99), None);
    }

    #[test]
    fn dark_window_is_one_night() {
        let plot = plot(vec![Planet::Mars.into()]);
        for day in 0..plot.dates().len() {
            let dark = plot.dark_window(day).unwrap();
            assert_eq!(dark.len(), 1);
            let length = (dark[0].end - dark[0].start).value();
            assert!(length > 10.0 && length < 12.5, "{length}");
        }
    }

    #[test]
    fn moon_bands_carry_illumination() {
        let plot = plot(vec![Planet::Mars.into()]);
        let bands = plot.moon_bands();
        let points: usize = bands.iter().map(Band::len).sum();
        assert!(points >= plot.dates().len());
        for band in &bands {
            for sample in &band.aux {
                let f = sample.illumination.unwrap();
                assert!((0.0..=1.0).contains(&f));
            }
        }
    }

    #[test]
    fn target_bands_match_target_count() {
        let plot = plot(vec![Planet::Jupiter.into(), Planet::Saturn.into()]);
        assert_eq!(plot.all_target_bands().len(), 2);
        assert!(plot.target_bands(1).is_some());
        assert!(plot.target_bands(2).is_none());
    }
}
