//! Fixed-length, shift-based FIFO of the most recent samples

use super::{Sample, VALUE_CAP};

/// Exactly `N` samples ordered oldest-first.
///
/// The window is always full: pushing a sample shifts every entry one slot
/// toward index 0 (dropping the oldest) and writes the new sample at index
/// `N - 1`. Readers therefore see left-to-right = oldest-to-newest without
/// tracking a rotation offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingWindow<const N: usize> {
    slots: [Sample; N],
}

impl<const N: usize> RollingWindow<N> {
    /// Window with every slot set to `value`.
    pub const fn filled(value: Sample) -> Self {
        Self { slots: [value; N] }
    }

    /// Startup window: zeros, with the newest slot seeded to `newest`.
    pub fn seeded(newest: Sample) -> Self {
        let mut window = Self::filled(0);
        if let Some(last) = window.slots.last_mut() {
            *last = newest;
        }
        window
    }

    /// Shift `sample` in at the tail, evicting the head.
    pub fn push(&mut self, sample: Sample) {
        if N == 0 {
            return;
        }
        self.slots.copy_within(1.., 0);
        self.slots[N - 1] = sample;
    }

    /// Positional access, 0 = oldest, `N - 1` = newest.
    pub fn get(&self, index: usize) -> Option<Sample> {
        self.slots.get(index).copied()
    }

    pub fn oldest(&self) -> Sample {
        self.slots.first().copied().unwrap_or(0)
    }

    pub fn newest(&self) -> Sample {
        self.slots.last().copied().unwrap_or(0)
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Sample> + '_ {
        self.slots.iter().copied()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.slots
    }

    /// Sum of all slots; `N * VALUE_CAP` always fits in a `u32`.
    pub fn sum(&self) -> u32 {
        self.slots.iter().map(|&s| s as u32).sum()
    }
}

impl<const N: usize> Default for RollingWindow<N> {
    fn default() -> Self {
        Self::seeded(VALUE_CAP / 2)
    }
}
