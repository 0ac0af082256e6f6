use std::fmt::Display;

/// Append-only sequence of computed values, one slot per bar index.
///
/// Slots are `None` where the producing engine had insufficient history.
/// Only the owning engine can write; everyone else gets read access.
#[derive(Clone, PartialEq, Debug)]
pub struct Series<T> {
    slots: Vec<Option<T>>,
}

impl<T: Copy> Series<T> {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Number of bar indices covered, defined or not.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Value at `index`, or `None` if the slot is undefined or out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.slots.get(index).copied().flatten()
    }

    /// Value at the newest index.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.slots.last().copied().flatten()
    }

    /// Index of the first defined slot.
    #[must_use]
    pub fn first_defined(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_some)
    }

    /// Number of defined slots.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Slots in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<T>> + '_ {
        self.slots.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Option<T>] {
        &self.slots
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Option<T>) {
        self.slots.push(value);
    }

    /// Overwrites the newest slot, used while a bar is still forming.
    #[inline]
    pub(crate) fn set_last(&mut self, value: Option<T>) {
        match self.slots.last_mut() {
            Some(slot) => *slot = value,
            None => self.slots.push(value),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T: Copy> Default for Series<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Display> Display for Series<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(value) => write!(f, "{value}")?,
                None => f.write_str("_")?,
            }
        }
        f.write_str("]")
    }
}
