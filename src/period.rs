// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open spans and the set operations used to combine visibility windows.
//!
//! [`Interval<T>`] works over any ordered, copyable coordinate: shifted local
//! hours for per-day windows, or absolute instants.

use std::fmt;

/// A half-open span `[start, end)`.
///
/// # Examples
///
/// ```
/// use obsplan::Interval;
/// use qtty::Hours;
///
/// let night = Interval::new(Hours::new(6.5), Hours::new(17.7));
/// let target = Interval::new(Hours::new(3.0), Hours::new(9.0));
/// let overlap = night.intersection(&target).unwrap();
/// assert_eq!(overlap.start.value(), 6.5);
/// assert_eq!(overlap.end.value(), 9.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

impl<T: PartialOrd + Copy> Interval<T> {
    /// Creates a new span between two coordinates.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// `true` when the span contains no coordinate.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns the overlapping sub-span between `self` and `other`.
    ///
    /// Spans that only touch at an endpoint do not overlap.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start >= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end <= other.end {
            self.end
        } else {
            other.end
        };

        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Returns the gaps of `spans` within the bounding `outer` span.
///
/// `spans` must be sorted by start and non-overlapping.  Single pass, O(n).
pub fn complement_within<T: PartialOrd + Copy>(
    outer: Interval<T>,
    spans: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    let mut cursor = outer.start;
    for s in spans {
        if s.start > cursor {
            gaps.push(Interval::new(cursor, s.start));
        }
        if s.end > cursor {
            cursor = s.end;
        }
    }
    if cursor < outer.end {
        gaps.push(Interval::new(cursor, outer.end));
    }
    gaps
}

/// Returns the intersection of two sorted, non-overlapping span lists.
///
/// O(n+m) merge.
pub fn intersect_spans<T: PartialOrd + Copy>(
    a: &[Interval<T>],
    b: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersection(&b[j]) {
            result.push(overlap);
        }
        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Hours;

    fn span(a: f64, b: f64) -> Interval<Hours> {
        Interval::new(Hours::new(a), Hours::new(b))
    }

    #[test]
    fn intersection_overlap() {
        let overlap = span(0.0, 5.0).intersection(&span(3.0, 8.0)).unwrap();
        assert_eq!(overlap, span(3.0, 5.0));
    }

    #[test]
    fn intersection_touching_edges_is_empty() {
        assert_eq!(span(0.0, 3.0).intersection(&span(3.0, 8.0)), None);
    }

    #[test]
    fn empty_span() {
        assert!(span(4.0, 4.0).is_empty());
        assert!(!span(4.0, 4.5).is_empty());
    }

    #[test]
    fn complement_of_daylight_is_night() {
        // Sun above threshold before 6.5 and after 17.7 (shifted hours).
        let day = span(0.0, 24.0);
        let sun_up = vec![span(0.0, 6.5), span(17.7, 24.0)];
        let night = complement_within(day, &sun_up);
        assert_eq!(night, vec![span(6.5, 17.7)]);
    }

    #[test]
    fn complement_within_empty_and_full() {
        let day = span(0.0, 24.0);
        assert_eq!(complement_within(day, &[]), vec![day]);
        assert!(complement_within(day, &[day]).is_empty());
    }

    #[test]
    fn intersect_lists() {
        let target = vec![span(0.0, 3.0), span(20.0, 24.0)];
        let night = vec![span(2.0, 21.0)];
        let both = intersect_spans(&target, &night);
        assert_eq!(both, vec![span(2.0, 3.0), span(20.0, 21.0)]);
    }

    #[test]
    fn intersect_disjoint_lists() {
        assert!(intersect_spans(&[span(0.0, 3.0)], &[span(5.0, 8.0)]).is_empty());
    }

    #[test]
    fn display() {
        let s = format!("{}", Interval::new(1, 2));
        assert_eq!(s, "1 to 2");
    }
}
