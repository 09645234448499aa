use std::collections::{VecDeque, vec_deque::Iter};

use crate::utils::format_g;

/// Bounded history of one metric with its running bounds.
///
/// `None` slots are ticks where the metric was not sampled. A tracked series
/// always holds at least one present value, so `min <= max`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    history: VecDeque<Option<f32>>,
    min: f32,
    max: f32,
}

impl MetricSeries {
    /// Creates a full-length series: `capacity - 1` missing slots, then `value`.
    pub(crate) fn new(value: f32, capacity: usize) -> Self {
        let mut history = VecDeque::with_capacity(capacity + 1);
        history.extend(std::iter::repeat_n(None, capacity.saturating_sub(1)));
        history.push_back(Some(value));

        Self {
            history,
            min: value,
            max: value,
        }
    }

    /// Appends the sample of the current tick and evicts the oldest slots
    /// beyond `capacity`.
    ///
    /// Returns `false` once no present value is left in the history.
    pub(crate) fn push(&mut self, sample: Option<f32>, capacity: usize) -> bool {
        self.history.push_back(sample);
        if let Some(value) = sample {
            self.max = self.max.max(value);
            self.min = self.min.min(value);
        }

        while self.history.len() > capacity {
            let Some(evicted) = self.history.pop_front() else {
                break;
            };
            let Some(evicted) = evicted else {
                continue;
            };
            if evicted == self.max {
                self.max = self.present().fold(f32::NEG_INFINITY, f32::max);
            }
            if evicted == self.min {
                self.min = self.present().fold(f32::INFINITY, f32::min);
            }
        }

        !self.is_exhausted()
    }

    fn present(&self) -> impl Iterator<Item = f32> + '_ {
        self.history.iter().flatten().copied()
    }

    /// Returns an iterator over the history, oldest first.
    pub fn history(&self) -> Iter<'_, Option<f32>> {
        self.history.iter()
    }

    /// Returns the number of slots, missing ones included.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if the history has no slot at all.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns `true` if every slot is missing.
    pub fn is_exhausted(&self) -> bool {
        self.history.iter().all(Option::is_none)
    }

    /// Returns the newest slot.
    pub fn last(&self) -> Option<f32> {
        self.history.back().copied().flatten()
    }

    /// Returns the smallest present value.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Returns the largest present value.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Plots consecutive samples as connected segments when the range does
    /// not start at zero, as bars otherwise.
    pub fn is_relative(&self) -> bool {
        self.min != 0.0 && self.min != self.max
    }

    /// Rescales `value` from `[min, max]` into `[0, 1]`; a flat range maps to `1`.
    pub fn scale(&self, value: f32) -> f32 {
        if self.max != self.min {
            (value - self.min) / (self.max - self.min)
        } else {
            1.0
        }
    }

    /// Text of the bounds label: max, an empty line, then min.
    pub fn bounds_label(&self) -> String {
        format!("{}\n\n{}", bound_label(self.max), bound_label(self.min))
    }
}

fn bound_label(value: f32) -> String {
    if value.floor() == value {
        format_g(value, 5)
    } else {
        format_g(value, 3)
    }
}

#[cfg(test)]
#[test]
fn new_series_is_right_aligned() {
    let series = MetricSeries::new(60.0, 8);
    assert_eq!(series.len(), 8);
    assert_eq!(series.last(), Some(60.0));
    assert_eq!(series.history().filter(|v| v.is_none()).count(), 7);
    assert_eq!(series.min(), 60.0);
    assert_eq!(series.max(), 60.0);
}

#[cfg(test)]
#[test]
fn single_slot_series() {
    let mut series = MetricSeries::new(5.0, 1);
    assert_eq!(series.history().collect::<Vec<_>>(), vec![&Some(5.0)]);
    assert!(!series.push(None, 1));
    assert!(series.is_exhausted());
}

#[cfg(test)]
#[test]
fn bounds_follow_samples() {
    let mut series = MetricSeries::new(5.0, 4);
    assert!(series.push(Some(-2.0), 4));
    assert!(series.push(None, 4));
    assert!(series.push(Some(9.0), 4));
    assert_eq!(series.min(), -2.0);
    assert_eq!(series.max(), 9.0);
}

#[cfg(test)]
#[test]
fn eviction_recomputes_bounds() {
    let mut series = MetricSeries::new(5.0, 3);
    series.push(Some(1.0), 3);
    series.push(Some(3.0), 3);
    assert_eq!((series.min(), series.max()), (1.0, 5.0));

    // 5 leaves the window
    series.push(Some(2.0), 3);
    assert_eq!((series.min(), series.max()), (1.0, 3.0));

    // 1 leaves the window
    series.push(Some(4.0), 3);
    assert_eq!((series.min(), series.max()), (2.0, 4.0));
    assert_eq!(series.len(), 3);
}

#[cfg(test)]
#[test]
fn eviction_of_negative_max() {
    let mut series = MetricSeries::new(-1.0, 2);
    series.push(Some(-5.0), 2);
    series.push(Some(-3.0), 2);
    assert_eq!((series.min(), series.max()), (-5.0, -3.0));
}

#[cfg(test)]
#[test]
fn scaling() {
    let mut series = MetricSeries::new(0.0, 4);
    series.push(Some(10.0), 4);
    assert_eq!(series.scale(5.0), 0.5);
    assert_eq!(series.scale(0.0), 0.0);
    assert_eq!(series.scale(10.0), 1.0);
    assert!(!series.is_relative());

    let flat = MetricSeries::new(7.0, 4);
    assert_eq!(flat.scale(7.0), 1.0);
    assert!(!flat.is_relative());
}

#[cfg(test)]
#[test]
fn relative_when_range_is_off_zero() {
    let mut series = MetricSeries::new(10.0, 4);
    series.push(Some(20.0), 4);
    assert!(series.is_relative());
}

#[cfg(test)]
#[test]
fn labels() {
    let series = MetricSeries::new(60.0, 2);
    assert_eq!(series.bounds_label(), "60\n\n60");

    let mut series = MetricSeries::new(16.666_666, 2);
    series.push(Some(8.333_333), 2);
    assert_eq!(series.bounds_label(), "16.7\n\n8.33");

    let mut series = MetricSeries::new(123_456.0, 2);
    series.push(Some(0.5), 2);
    assert_eq!(series.bounds_label(), "1.2346e+05\n\n0.5");
}
