use chrono::NaiveDate;
use obsplan::normalize::{shift, unshift};
use obsplan::{DateRange, IntervalBander, LocalTimeNormalizer, RiseSetTransit, Time, Window, UT};
use proptest::prelude::*;
use qtty::Hours;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Distance on the 24 h circle.
fn circular_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(24.0);
    d.min(24.0 - d)
}

proptest! {
    #[test]
    fn prop_sample_dates_step_by_period(len in 0u64..800, period in 1u32..60) {
        let begin = base();
        let end = begin + chrono::Days::new(len);
        let dates = DateRange::new(begin, end).unwrap().sample_dates(period);

        prop_assert_eq!(dates[0], begin);
        prop_assert_eq!(dates.len() as u64, len / u64::from(period) + 1);
        prop_assert!(*dates.last().unwrap() <= end);
        for pair in dates.windows(2) {
            prop_assert_eq!((pair[1] - pair[0]).num_days(), i64::from(period));
        }
    }

    #[test]
    fn prop_shift_round_trip(hour in 0.0..24.0f64, amount in 0.0..24.0f64) {
        let shifted = shift(Hours::new(hour), Hours::new(amount));
        prop_assert!((0.0..24.0).contains(&shifted.value()));
        let back = unshift(shifted, Hours::new(amount)).value();
        prop_assert!((0.0..24.0).contains(&back));
        prop_assert!(circular_gap(back, hour) < 1e-9, "{} -> {}", hour, back);
    }

    #[test]
    fn prop_normalize_keeps_sentinels(jd in 2_440_000.0..2_470_000.0f64, up in any::<bool>()) {
        let normalizer = LocalTimeNormalizer::new(chrono_tz::UTC, Hours::new(12.0));
        let window = if up { Window::AlwaysUp } else { Window::AlwaysDown };
        let rst = RiseSetTransit { window, transit: Time::<UT>::new(jd) };
        let hours = normalizer.normalize(rst).unwrap();
        prop_assert_eq!(hours.window, window.map(|_| Hours::new(0.0)));
        prop_assert!((0.0..24.0).contains(&hours.transit.value()));
    }

    #[test]
    fn prop_ordered_windows_form_one_band(
        days in prop::collection::vec((1.0..10.0f64, 0.5..13.0f64, any::<bool>()), 1..40)
    ) {
        let dates: Vec<NaiveDate> = (0..days.len() as u64)
            .map(|i| base() + chrono::Days::new(i))
            .collect();
        let windows: Vec<Window<Hours>> = days
            .iter()
            .map(|&(rise, length, circumpolar)| {
                if circumpolar {
                    Window::AlwaysUp
                } else {
                    Window::Crossing { rise: Hours::new(rise), set: Hours::new(rise + length) }
                }
            })
            .collect();

        let bands = IntervalBander::default().band(&dates, &windows);
        prop_assert_eq!(bands.len(), 1);
        prop_assert_eq!(bands[0].len(), days.len());
        prop_assert_eq!(&bands[0].dates, &dates);
        for (rise, set) in bands[0].rises.iter().zip(&bands[0].sets) {
            prop_assert!(rise < set);
        }
    }
}
