//! Delta encoding of window values
//!
//! Each metric becomes a [`DeltaSequence`]: the first window's value
//! followed by the change from one window to the next. Direction is first
//! quantized to tens of degrees.

use crate::metric::Metric;
use crate::window::Window;

/// Quantize a direction in degrees to tens of degrees
///
/// Rounds half to even, so 95 and 105 both become 10 while 115 becomes 12.
pub fn quantize_direction(degrees: i32) -> i32 {
    let quotient = degrees.div_euclid(10);
    let remainder = degrees.rem_euclid(10);
    match remainder {
        0..=4 => quotient,
        5 if quotient % 2 == 0 => quotient,
        _ => quotient + 1,
    }
}

/// Undo [`quantize_direction`], up to its resolution
pub fn dequantize_direction(tens: i32) -> i32 {
    tens * 10
}

/// Value of `metric` in `window` as it is encoded
pub fn quantized(window: &Window, metric: Metric) -> i32 {
    let value = window.sample.get(metric);
    match metric {
        Metric::Direction => quantize_direction(value),
        Metric::Speed | Metric::Gusts => value,
    }
}

/// First value followed by successive differences, for one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaSequence {
    pub metric: Metric,
    pub values: Vec<i32>,
}

impl DeltaSequence {
    /// Prefix sums, giving back the quantized window values
    pub fn reconstruct(&self) -> Vec<i32> {
        self.values
            .iter()
            .scan(0i32, |acc, delta| {
                *acc += delta;
                Some(*acc)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Delta-encode one metric over a sequence of windows
pub fn encode_deltas(windows: &[Window], metric: Metric) -> DeltaSequence {
    let mut values = Vec::with_capacity(windows.len());
    let mut previous: Option<i32> = None;

    for window in windows {
        let current = quantized(window, metric);
        values.push(match previous {
            None => current,
            Some(prev) => current - prev,
        });
        previous = Some(current);
    }

    DeltaSequence { metric, values }
}

/// Delta sequences of every metric for one location and day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaSet {
    pub sequences: Vec<DeltaSequence>,
}

impl DeltaSet {
    /// Sequence for one metric
    pub fn get(&self, metric: Metric) -> Option<&DeltaSequence> {
        self.sequences.iter().find(|s| s.metric == metric)
    }
}

/// Delta-encode all metrics, in fragment order
pub fn encode_all(windows: &[Window]) -> DeltaSet {
    DeltaSet {
        sequences: Metric::ALL
            .iter()
            .map(|m| encode_deltas(windows, *m))
            .collect(),
    }
}
