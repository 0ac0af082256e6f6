use std::num::NonZero;

/// Fixed-capacity buffer of the most recent values.
///
/// `push` evicts the oldest value once full; `replace` overwrites the newest
/// one in place, which is how a forming bar is updated. Storage grows with
/// the values pushed, so `capacity` bounds memory but is never allocated
/// upfront.
#[derive(Clone, Debug)]
pub(crate) struct RingBuffer {
    buffer: Vec<f64>,
    capacity: NonZero<usize>,
    /// Slot of the oldest value once full, `0` while filling.
    head: usize,
}

impl RingBuffer {
    #[must_use]
    pub(crate) fn new(capacity: NonZero<usize>) -> Self {
        Self {
            buffer: Vec::new(),
            capacity,
            head: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity.get()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub(crate) fn is_ready(&self) -> bool {
        self.buffer.len() == self.capacity()
    }

    /// Appends `value`, returning the evicted oldest value when full.
    #[inline]
    pub(crate) fn push(&mut self, value: f64) -> Option<f64> {
        if !self.is_ready() {
            self.buffer.push(value);
            return None;
        }

        let old = std::mem::replace(&mut self.buffer[self.head], value);

        self.head += 1;
        if self.head == self.capacity() {
            self.head = 0;
        }

        Some(old)
    }

    /// Overwrites the newest value, returning the previous one.
    #[inline]
    pub(crate) fn replace(&mut self, value: f64) -> f64 {
        debug_assert!(!self.is_empty(), "replace on an empty ring buffer");

        let newest = if self.head == 0 {
            self.buffer.len() - 1
        } else {
            self.head - 1
        };

        std::mem::replace(&mut self.buffer[newest], value)
    }

    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
        self.head = 0;
    }

    /// Values from oldest to newest.
    pub(crate) fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (wrapped, front) = self.buffer.split_at(self.head);
        front.iter().chain(wrapped).copied()
    }
}
