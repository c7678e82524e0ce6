//! Moving average over a fixed window
//!
//! Circular buffer with an incrementally maintained sum: O(1) per sample,
//! O(N) memory. The buffer is allocated once in [`MovingAverage::new`] and
//! never grows.
//!
//! ## Phases
//!
//! - **Warm-up**: fewer than `N` samples seen. The average is taken over the
//!   filled slots only.
//! - **Steady state**: every slot holds a sample. Each push evicts the oldest
//!   one and the average is taken over all `N` slots.
//!
//! The running sum is rebuilt from the slots every time the cursor wraps, and
//! right after a non-finite sample is evicted, so rounding error and `inf`/NaN
//! never outlive the samples that caused them.

use alloc::boxed::Box;
use alloc::vec;

/// Fixed-window moving average.
///
/// A window of 0 disables smoothing: [`push`](Self::push) returns its input.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Past samples, oldest one at `cursor` once the buffer is full
    slots: Box<[f32]>,
    /// Sum of the filled slots
    sum: f64,
    /// Next slot to write
    cursor: usize,
    /// Number of slots holding a sample
    filled: usize,
}

impl MovingAverage {
    pub fn new(window: usize) -> Self {
        Self {
            slots: vec![0.0; window].into_boxed_slice(),
            sum: 0.0,
            cursor: 0,
            filled: 0,
        }
    }

    /// Add a sample and return the updated average.
    pub fn push(&mut self, value: f32) -> f32 {
        let window = self.slots.len();
        if window == 0 {
            return value;
        }

        let evicted = if self.filled < window {
            self.filled += 1;
            0.0
        } else {
            self.slots[self.cursor]
        };

        self.slots[self.cursor] = value;
        // Wraps to 0 exactly when the last slot is filled
        self.cursor = (self.cursor + 1) % window;

        if self.cursor == 0 || !evicted.is_finite() {
            self.sum = self.filled_slots().iter().map(|&v| v as f64).sum();
        } else {
            self.sum += value as f64 - evicted as f64;
        }

        (self.sum / self.filled as f64) as f32
    }

    fn filled_slots(&self) -> &[f32] {
        &self.slots[..self.filled]
    }

    /// Current average without adding a sample, `None` before the first push.
    pub fn average(&self) -> Option<f32> {
        (self.filled > 0).then(|| (self.sum / self.filled as f64) as f32)
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<f32> {
        let window = self.slots.len();
        (self.filled > 0).then(|| self.slots[(self.cursor + window - 1) % window])
    }

    /// Number of samples currently averaged
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Window size fixed at construction
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_enabled(&self) -> bool {
        !self.slots.is_empty()
    }

    /// All slots hold a sample (steady state).
    pub fn is_warm(&self) -> bool {
        self.filled == self.slots.len()
    }

    /// Forget every sample, keeping the allocation.
    pub fn reset(&mut self) {
        self.slots.fill(0.0);
        self.sum = 0.0;
        self.cursor = 0;
        self.filled = 0;
    }
}
