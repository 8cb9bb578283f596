// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-day rise/set/transit series for one site, one date range and a set of
//! targets.
//!
//! Everything is computed eagerly in [`ObservabilityWindowCalculator::new`];
//! afterwards the calculator is a read-only bundle of parallel series, one
//! entry per sample date, in ascending date order.

use chrono::{NaiveDate, NaiveTime};
use qtty::{Degrees, Hours};

use crate::bodies::{Body, Target};
use crate::config::{BandingConfig, Thresholds};
use crate::ephemeris::{rise_set_transit, ObserverQuery, RiseSetTransit, Window};
use crate::error::{ConfigError, EphemerisError};
use crate::location::Location;
use crate::normalize::LocalTimeNormalizer;
use crate::scales::UT;
use crate::Time;

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    begin: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if begin > end {
            return Err(ConfigError::InvertedDateRange { begin, end });
        }
        Ok(Self { begin, end })
    }

    #[inline]
    pub fn begin(&self) -> NaiveDate {
        self.begin
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Steps from `begin` by `period_days`, never past `end`.
    ///
    /// A zero period yields `begin` alone.
    pub fn sample_dates(&self, period_days: u32) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut day = self.begin;
        while day <= self.end {
            dates.push(day);
            match day.checked_add_days(chrono::Days::new(u64::from(period_days))) {
                Some(next) if next > day => day = next,
                _ => break,
            }
        }
        dates
    }
}

/// One day's result in shifted local hours.
pub type DailyWindow = RiseSetTransit<Hours>;

/// Eagerly computed sun, moon and target series for one configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityWindowCalculator {
    location: Location,
    targets: Vec<Target>,
    range: DateRange,
    thresholds: Thresholds,
    normalizer: LocalTimeNormalizer,
    dates: Vec<NaiveDate>,
    references: Vec<Time<UT>>,
    sun: Vec<DailyWindow>,
    moon: Vec<DailyWindow>,
    target_series: Vec<Vec<DailyWindow>>,
    failed_samples: usize,
}

impl ObservabilityWindowCalculator {
    /// Validates the configuration and computes every series.
    pub fn new(
        location: Location,
        targets: Vec<Target>,
        range: DateRange,
        thresholds: Thresholds,
        banding: BandingConfig,
    ) -> Result<Self, ConfigError> {
        if targets.is_empty() {
            return Err(ConfigError::EmptyTargets);
        }
        thresholds.validate()?;
        banding.validate()?;

        let normalizer = LocalTimeNormalizer::new(location.timezone(), banding.day_shift);
        let dates = range.sample_dates(thresholds.sampling_period_days);
        let references = dates
            .iter()
            .map(|&date| reference_instant(&normalizer, date))
            .collect();

        let mut calc = Self {
            location,
            targets,
            range,
            thresholds,
            normalizer,
            dates,
            references,
            sun: Vec::new(),
            moon: Vec::new(),
            target_series: Vec::new(),
            failed_samples: 0,
        };
        calc.sun = calc.series(&Body::Sun, "Sun", thresholds.min_alt_sun);
        calc.moon = calc.series(&Body::Moon, "Moon", thresholds.min_alt_moon);
        let mut target_series = Vec::with_capacity(calc.targets.len());
        for i in 0..calc.targets.len() {
            let body = Body::from(&calc.targets[i]);
            let name = calc.targets[i].name().to_string();
            target_series.push(calc.series(&body, &name, thresholds.min_alt));
        }
        calc.target_series = target_series;

        log::debug!(
            "computed {} sample days for sun, moon and {} targets at ({}, {})",
            calc.dates.len(),
            calc.targets.len(),
            calc.location.latitude(),
            calc.location.longitude(),
        );
        if calc.failed_samples > 0 {
            log::warn!(
                "{} of {} samples failed to converge and were recorded as never up",
                calc.failed_samples,
                calc.dates.len() * (calc.targets.len() + 2),
            );
        }
        Ok(calc)
    }

    fn sample(
        &self,
        body: &Body,
        reference: Time<UT>,
        horizon: Degrees,
    ) -> Result<DailyWindow, EphemerisError> {
        let query = ObserverQuery::new(&self.location, reference, horizon);
        self.normalizer.normalize(rise_set_transit(&query, body)?)
    }

    fn series(&mut self, body: &Body, name: &str, horizon: Degrees) -> Vec<DailyWindow> {
        self.series_with(name, |calc, reference| calc.sample(body, reference, horizon))
    }

    /// One entry per sample date; failures degrade to a never-up sentinel
    /// whose transit is the reference hour.
    fn series_with(
        &mut self,
        name: &str,
        sample: impl Fn(&Self, Time<UT>) -> Result<DailyWindow, EphemerisError>,
    ) -> Vec<DailyWindow> {
        let mut out = Vec::with_capacity(self.dates.len());
        let mut failed = 0;
        for (&date, &reference) in self.dates.iter().zip(&self.references) {
            match sample(&*self, reference) {
                Ok(window) => out.push(window),
                Err(err) => {
                    log::debug!("{name} on {date}: {err}; recording never up");
                    failed += 1;
                    out.push(RiseSetTransit {
                        window: Window::AlwaysDown,
                        transit: self.normalizer.hours(reference).unwrap_or(Hours::new(0.0)),
                    });
                }
            }
        }
        self.failed_samples += failed;
        out
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[inline]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[inline]
    pub fn range(&self) -> DateRange {
        self.range
    }

    #[inline]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    #[inline]
    pub fn normalizer(&self) -> &LocalTimeNormalizer {
        &self.normalizer
    }

    /// Sample dates, ascending.
    #[inline]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Instant each sample's searches start from.
    #[inline]
    pub fn references(&self) -> &[Time<UT>] {
        &self.references
    }

    #[inline]
    pub fn sun_series(&self) -> &[DailyWindow] {
        &self.sun
    }

    #[inline]
    pub fn moon_series(&self) -> &[DailyWindow] {
        &self.moon
    }

    /// Series for every target, in the order the targets were given.
    #[inline]
    pub fn target_series(&self) -> &[Vec<DailyWindow>] {
        &self.target_series
    }

    /// Number of (body, day) samples recovered as never up.
    #[inline]
    pub fn failed_samples(&self) -> usize {
        self.failed_samples
    }
}

/// Start of the shifted day; falls back to UTC midnight plus the offset
/// when the local wall-clock time cannot be resolved.
fn reference_instant(normalizer: &LocalTimeNormalizer, date: NaiveDate) -> Time<UT> {
    normalizer.day_start(date).unwrap_or_else(|err| {
        log::debug!("no local day start for {date}: {err}; using UTC");
        let midnight = Time::<UT>::from_utc(date.and_time(NaiveTime::MIN).and_utc());
        let offset = normalizer.unshift(Hours::new(0.0));
        midnight + offset.to::<qtty::Day>()
    })
}
