// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Stitching of per-day windows into plottable bands.
//!
//! A [`Band`] is one contiguous polyline of `(date, rise, set)` points that
//! a renderer fills between the rise and set curves.  [`IntervalBander`]
//! walks a date-ordered series once and decides, day by day, whether the
//! point extends the open band, starts a new one, or is split across two:
//!
//! | Day | Contribution |
//! |-----|--------------|
//! | always down | nothing; the open band stays open |
//! | always up | `(date, 0, 24)` to the open band |
//! | `rise < set` | `(date, rise, set)` |
//! | `rise ≥ set` | tail `(date, 0, set)` closes the previous band, lead `(date, rise, 24)` opens the next |
//!
//! While consecutive days stay flipped, tails keep extending the band that
//! took the first tail and leads keep extending the lead band, so no band
//! joins one day's lead to the next day's tail.
//!
//! Before a numeric day is placed, its rise is compared with the last
//! numeric rise; a jump above the threshold starts a fresh band.

use chrono::NaiveDate;
use qtty::Hours;

use crate::config::{BandingConfig, DEFAULT_JUMP_THRESHOLD};
use crate::ephemeris::Window;

const START_OF_DAY: Hours = Hours::new(0.0);
const END_OF_DAY: Hours = Hours::new(24.0);

/// One plottable polyline: parallel date, rise, set and auxiliary columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Band<A = ()> {
    pub dates: Vec<NaiveDate>,
    pub rises: Vec<Hours>,
    pub sets: Vec<Hours>,
    pub aux: Vec<A>,
}

impl<A> Default for Band<A> {
    fn default() -> Self {
        Self {
            dates: Vec::new(),
            rises: Vec::new(),
            sets: Vec::new(),
            aux: Vec::new(),
        }
    }
}

impl<A> Band<A> {
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    fn push(&mut self, date: NaiveDate, rise: Hours, set: Hours, aux: A) {
        self.dates.push(date);
        self.rises.push(rise);
        self.sets.push(set);
        self.aux.push(aux);
    }

    /// `(date, rise, set)` triples in order.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, Hours, Hours)> + '_ {
        self.dates
            .iter()
            .zip(&self.rises)
            .zip(&self.sets)
            .map(|((&d, &r), &s)| (d, r, s))
    }
}

/// Splits a date-ordered window series into disjoint bands.
///
/// Stateless between calls; identical input always yields identical bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalBander {
    jump_threshold: Hours,
}

impl Default for IntervalBander {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_THRESHOLD)
    }
}

impl From<&BandingConfig> for IntervalBander {
    fn from(config: &BandingConfig) -> Self {
        Self::new(config.jump_threshold)
    }
}

impl IntervalBander {
    pub fn new(jump_threshold: Hours) -> Self {
        Self { jump_threshold }
    }

    #[inline]
    pub fn jump_threshold(&self) -> Hours {
        self.jump_threshold
    }

    /// Bands a series with no auxiliary column.
    pub fn band(&self, dates: &[NaiveDate], windows: &[Window<Hours>]) -> Vec<Band> {
        self.band_with_aux(dates, windows, &vec![(); windows.len()])
    }

    /// Bands a series, carrying `aux[i]` along with every point of day `i`.
    ///
    /// The three slices are parallel, one entry per day.  Always returns at
    /// least one band, which is empty when no day contributed.
    pub fn band_with_aux<A: Clone>(
        &self,
        dates: &[NaiveDate],
        windows: &[Window<Hours>],
        aux: &[A],
    ) -> Vec<Band<A>> {
        debug_assert_eq!(dates.len(), windows.len(), "one window per date");
        debug_assert_eq!(dates.len(), aux.len(), "one aux entry per date");

        let mut bands: Vec<Band<A>> = vec![Band::default()];
        let mut last_rise: Option<Hours> = None;
        // Band collecting tails while consecutive days stay flipped.
        let mut tails: Option<usize> = None;
        // Band that received the most recent lead.
        let mut leads: Option<usize> = None;

        for ((&date, window), extra) in dates.iter().zip(windows).zip(aux) {
            let (rise, set) = match *window {
                Window::AlwaysDown => continue,
                Window::AlwaysUp => {
                    current(&mut bands).push(date, START_OF_DAY, END_OF_DAY, extra.clone());
                    tails = None;
                    continue;
                }
                Window::Crossing { rise, set } => (rise, set),
            };

            if let Some(previous) = last_rise {
                if (rise - previous).abs() > self.jump_threshold && !current(&mut bands).is_empty() {
                    log::debug!(
                        "rise jumped {} -> {} on {date}; opening band {}",
                        previous,
                        rise,
                        bands.len()
                    );
                    bands.push(Band::default());
                    tails = None;
                }
            }
            last_rise = Some(rise);

            if rise < set {
                current(&mut bands).push(date, rise, set, extra.clone());
                tails = None;
                continue;
            }

            // Flipped: the window wraps past the end of the shifted day.
            let open = !current(&mut bands).is_empty();
            match tails {
                Some(index) => bands[index].push(date, START_OF_DAY, set, extra.clone()),
                None if open => {
                    current(&mut bands).push(date, START_OF_DAY, set, extra.clone());
                    tails = Some(bands.len() - 1);
                    bands.push(Band::default());
                }
                None => {
                    let previous = bands
                        .len()
                        .checked_sub(2)
                        .filter(|&i| !bands[i].is_empty() && Some(i) != leads);
                    match previous {
                        Some(index) => {
                            bands[index].push(date, START_OF_DAY, set, extra.clone());
                            tails = Some(index);
                        }
                        None => {
                            // Nowhere to close this tail; later tails of the
                            // run get their own band ahead of the leads.
                            let index = bands.len() - 1;
                            bands.insert(index, Band::default());
                            tails = Some(index);
                        }
                    }
                }
            }
            current(&mut bands).push(date, rise, END_OF_DAY, extra.clone());
            leads = Some(bands.len() - 1);
        }

        if bands.iter().any(|band| !band.is_empty()) {
            bands.retain(|band| !band.is_empty());
        } else {
            bands.truncate(1);
        }
        bands
    }
}

#[inline]
fn current<A>(bands: &mut [Band<A>]) -> &mut Band<A> {
    let last = bands.len() - 1;
    &mut bands[last]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        (0..n as u64)
            .map(|i| start + chrono::Days::new(i))
            .collect()
    }

    fn w(rise: f64, set: f64) -> Window<Hours> {
        Window::Crossing {
            rise: Hours::new(rise),
            set: Hours::new(set),
        }
    }

    fn triples(band: &Band) -> Vec<(f64, f64)> {
        band.points().map(|(_, r, s)| (r.value(), s.value())).collect()
    }

    #[test]
    fn normal_days_make_one_band() {
        let bands = IntervalBander::default().band(&days(3), &[w(5.0, 9.0), w(5.1, 9.1), w(5.2, 9.2)]);
        assert_eq!(bands.len(), 1);
        assert_eq!(triples(&bands[0]), vec![(5.0, 9.0), (5.1, 9.1), (5.2, 9.2)]);
    }

    #[test]
    fn never_up_is_skipped() {
        let series = [w(5.0, 9.0), Window::AlwaysDown, w(5.2, 9.2)];
        let bands = IntervalBander::default().band(&days(3), &series);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].len(), 2);
        assert_eq!(bands[0].dates, vec![days(3)[0], days(3)[2]]);
    }

    #[test]
    fn all_never_up_gives_one_empty_band() {
        let bands = IntervalBander::default().band(&days(4), &[Window::AlwaysDown; 4]);
        assert_eq!(bands.len(), 1);
        assert!(bands[0].is_empty());
    }

    #[test]
    fn circumpolar_is_full_height() {
        let bands = IntervalBander::default().band(&days(2), &[Window::AlwaysUp, w(3.0, 20.0)]);
        assert_eq!(bands.len(), 1);
        assert_eq!(triples(&bands[0]), vec![(0.0, 24.0), (3.0, 20.0)]);
    }

    #[test]
    fn flip_splits_into_two_bands() {
        let series = [w(22.0, 23.5), w(23.0, 0.5), w(23.2, 23.8)];
        let d = days(3);
        let bands = IntervalBander::default().band(&d, &series);
        assert_eq!(bands.len(), 2);
        assert_eq!(triples(&bands[0]), vec![(22.0, 23.5), (0.0, 0.5)]);
        assert_eq!(bands[0].dates, vec![d[0], d[1]]);
        assert_eq!(triples(&bands[1]), vec![(23.0, 24.0), (23.2, 23.8)]);
        assert_eq!(bands[1].dates, vec![d[1], d[2]]);
    }

    #[test]
    fn first_day_flipped_drops_tail() {
        let bands = IntervalBander::default().band(&days(1), &[w(20.0, 2.0)]);
        assert_eq!(bands.len(), 1);
        assert_eq!(triples(&bands[0]), vec![(20.0, 24.0)]);
    }

    #[test]
    fn flipped_run_from_first_day_keeps_later_tails() {
        let bands = IntervalBander::default().band(&days(3), &[w(20.0, 2.0), w(20.1, 2.1), w(20.2, 2.2)]);
        assert_eq!(bands.len(), 2);
        assert_eq!(triples(&bands[0]), vec![(0.0, 2.1), (0.0, 2.2)]);
        assert_eq!(triples(&bands[1]), vec![(20.0, 24.0), (20.1, 24.0), (20.2, 24.0)]);
    }

    #[test]
    fn consecutive_flips_never_join_lead_to_tail() {
        let series = [w(22.0, 23.5), w(22.5, 0.5), w(23.0, 1.0), w(23.5, 1.5), w(23.9, 2.0)];
        let d = days(5);
        let bands = IntervalBander::default().band(&d, &series);

        assert_eq!(bands.len(), 2);
        assert_eq!(
            triples(&bands[0]),
            vec![(22.0, 23.5), (0.0, 0.5), (0.0, 1.0), (0.0, 1.5), (0.0, 2.0)]
        );
        assert_eq!(bands[0].dates, d);
        assert_eq!(
            triples(&bands[1]),
            vec![(22.5, 24.0), (23.0, 24.0), (23.5, 24.0), (23.9, 24.0)]
        );
        assert_eq!(bands[1].dates, d[1..].to_vec());

        for band in &bands {
            let leads = band.points().filter(|&(_, _, s)| s == END_OF_DAY).count();
            let tails = band.points().filter(|&(_, r, _)| r == START_OF_DAY).count();
            assert!(leads == 0 || tails == 0, "band mixes leads and tails");
        }
    }

    #[test]
    fn flipped_run_ends_on_normal_day() {
        let series = [w(22.0, 23.5), w(23.0, 0.5), w(23.5, 1.0), w(23.6, 23.9), w(23.0, 0.4)];
        let d = days(5);
        let bands = IntervalBander::default().band(&d, &series);
        // A new run after a normal day closes its tail in the band holding
        // that day and opens a fresh lead band.
        assert_eq!(bands.len(), 3);
        assert_eq!(triples(&bands[0]), vec![(22.0, 23.5), (0.0, 0.5), (0.0, 1.0)]);
        assert_eq!(triples(&bands[1]), vec![(23.0, 24.0), (23.5, 24.0), (23.6, 23.9), (0.0, 0.4)]);
        assert_eq!(triples(&bands[2]), vec![(23.0, 24.0)]);
    }

    #[test]
    fn jump_opens_new_band() {
        let series = [w(2.0, 6.0), w(2.5, 6.5), w(14.0, 18.0), w(14.2, 18.2)];
        let bands = IntervalBander::default().band(&days(4), &series);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].len(), 2);
        assert_eq!(bands[1].len(), 2);
    }

    #[test]
    fn jump_threshold_is_tunable() {
        let series = [w(2.0, 6.0), w(7.0, 9.0)];
        assert_eq!(IntervalBander::new(Hours::new(10.0)).band(&days(2), &series).len(), 1);
        assert_eq!(IntervalBander::new(Hours::new(4.0)).band(&days(2), &series).len(), 2);
    }

    #[test]
    fn jump_after_never_up_compares_last_numeric_rise() {
        let series = [w(2.0, 6.0), Window::AlwaysDown, Window::AlwaysDown, w(13.0, 15.0)];
        let bands = IntervalBander::default().band(&days(4), &series);
        assert_eq!(bands.len(), 2);
    }

    #[test]
    fn aux_travels_with_points() {
        let series = [w(22.0, 23.5), w(23.0, 0.5)];
        let bands = IntervalBander::default().band_with_aux(&days(2), &series, &["a", "b"]);
        assert_eq!(bands[0].aux, vec!["a", "b"]);
        assert_eq!(bands[1].aux, vec!["b"]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one window per date")]
    fn mismatched_lengths_are_rejected() {
        IntervalBander::default().band(&days(3), &[w(1.0, 2.0), w(1.1, 2.1)]);
    }
}
