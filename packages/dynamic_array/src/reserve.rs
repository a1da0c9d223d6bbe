/// A request to pre-size a [`DynamicArray`][crate::DynamicArray] without populating it.
///
/// Create one with [`reserve()`] and hand it to
/// [`DynamicArray::with_reserve()`][crate::DynamicArray::with_reserve] (or convert it with
/// `into()`). The resulting array is empty but has room for the requested number of elements.
///
/// # Examples
///
/// ```
/// use dynamic_array::{DynamicArray, reserve};
///
/// let array: DynamicArray<u32> = reserve(16).into();
///
/// assert!(array.is_empty());
/// assert_eq!(array.capacity(), 16);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReserveRequest {
    capacity: usize,
}

impl ReserveRequest {
    /// Creates a request for at least `capacity` elements of storage.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// The requested capacity, in elements.
    #[must_use]
    pub const fn capacity(self) -> usize {
        self.capacity
    }
}

impl From<usize> for ReserveRequest {
    fn from(capacity: usize) -> Self {
        Self::new(capacity)
    }
}

/// Shorthand for [`ReserveRequest::new()`].
#[must_use]
pub const fn reserve(capacity: usize) -> ReserveRequest {
    ReserveRequest::new(capacity)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn carries_capacity() {
        assert_eq!(reserve(42).capacity(), 42);
        assert_eq!(ReserveRequest::from(7).capacity(), 7);
        assert_eq!(ReserveRequest::default().capacity(), 0);
    }
}
