use std::any::type_name;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};

use crate::raw_buffer::expect_allocation;
use crate::{DynamicArrayBuilder, Error, RawBuffer, ReserveRequest, Result};

/// A growable array with explicit capacity management, built on a [`RawBuffer`].
///
/// The array tracks how many of the slots in its buffer hold live elements (its length) separately
/// from how many slots the buffer has (its capacity). Growing past the capacity replaces the
/// buffer with a larger one: a new buffer is fully built first, the live elements are moved into
/// it and only then is the old buffer swapped out and freed, so a failed growth leaves the array
/// exactly as it was.
///
/// When a push or insert finds the array full, the capacity doubles, except that an array with no
/// storage at all grows to a capacity of 1.
///
/// # Stale slots
///
/// Slots beyond the length hold valid but unspecified values. Shrinking the array (via
/// [`clear()`][Self::clear], [`resize()`][Self::resize] or [`pop_back()`][Self::pop_back]) does
/// not drop the values that fall off the end. They stay in their slots until overwritten by a
/// later push/insert or until the storage is freed. [`erase()`][Self::erase] is different: it
/// drops the erased element right away. No operation
/// ever reads or exposes them; a growing `resize()` overwrites them with `T::default()` first.
///
/// Operations that may need to create fresh slots (growth) require `T: Default`, as every slot of
/// the storage always holds an initialized value.
///
/// # Examples
///
/// ```
/// use dynamic_array::DynamicArray;
///
/// let mut array = DynamicArray::new();
///
/// array.push_back(1);
/// array.push_back(2);
/// array.push_back(3);
/// assert_eq!(array.capacity(), 4);
///
/// array.insert(1, 9);
/// assert_eq!(array, [1, 9, 2, 3]);
///
/// array.erase(0);
/// assert_eq!(array, [9, 2, 3]);
///
/// assert!(array.at(10).is_err());
/// ```
pub struct DynamicArray<T> {
    storage: RawBuffer<T>,

    /// Number of live elements, at the front of `storage`.
    len: usize,

    /// Number of slots in `storage`. Zero if and only if `storage` owns nothing.
    capacity: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array that owns no storage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: RawBuffer::new(),
            len: 0,
            capacity: 0,
        }
    }

    /// Creates a builder that can be used to customize the initial storage of the array.
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    pub fn builder() -> DynamicArrayBuilder<T> {
        DynamicArrayBuilder::new()
    }

    /// Creates an empty array with storage for the requested number of elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynamic_array::{DynamicArray, reserve};
    ///
    /// let array = DynamicArray::<u32>::with_reserve(reserve(10));
    ///
    /// assert_eq!(array.len(), 0);
    /// assert_eq!(array.capacity(), 10);
    /// ```
    #[must_use]
    pub fn with_reserve(request: ReserveRequest) -> Self
    where
        T: Default,
    {
        let mut array = Self::new();
        array.reserve(request.capacity());
        array
    }

    /// Creates an array of `len` default-valued elements, with no spare capacity.
    ///
    /// # Panics
    ///
    /// Panics if the storage would exceed the maximum allocation size.
    #[must_use]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_storage(RawBuffer::with_default(len))
    }

    /// Creates an array of `len` clones of `value`, with no spare capacity.
    ///
    /// # Panics
    ///
    /// Panics if the storage would exceed the maximum allocation size.
    #[must_use]
    pub fn from_elem(len: usize, value: &T) -> Self
    where
        T: Clone,
    {
        Self::from_storage(RawBuffer::with_value(len, value))
    }

    /// Creates an array holding clones of `items`, in order, with no spare capacity.
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_storage(RawBuffer::from_slice(items))
    }

    /// Wraps a fully populated buffer: every slot becomes a live element.
    fn from_storage(storage: RawBuffer<T>) -> Self {
        let capacity = storage.as_slice().len();

        Self {
            storage,
            len: capacity,
            capacity,
        }
    }

    /// The number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of elements the array can hold before it needs to replace its storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the array has no live elements. Says nothing about capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `len <= capacity` and the storage holds `capacity` initialized slots.
        unsafe { self.storage.as_slice().get_unchecked(..self.len) }
    }

    /// The live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;

        // SAFETY: `len <= capacity` and the storage holds `capacity` initialized slots.
        unsafe { self.storage.as_mut_slice().get_unchecked_mut(..len) }
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not less than the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynamic_array::{DynamicArray, Error};
    ///
    /// let array = DynamicArray::from([10, 20]);
    ///
    /// assert_eq!(array.at(1), Ok(&20));
    /// assert_eq!(array.at(2), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;

        self.as_slice()
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns the element at `index` for modification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not less than the length.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns the element at `index` without bounds checking.
    ///
    /// Plain indexing (`array[index]`) is also available and panics on an out of range index.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len()`][Self::len].
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: The caller guarantees `index < len <= capacity`.
        unsafe { self.storage.get_unchecked(index) }
    }

    /// Returns the element at `index` for modification, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than [`len()`][Self::len].
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: The caller guarantees `index < len <= capacity`.
        unsafe { self.storage.get_unchecked_mut(index) }
    }

    /// Sets the length to zero. Keeps the storage and does not drop any elements.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Removes the last element from the live range, if there is one.
    ///
    /// Calling this on an empty array does nothing.
    pub fn pop_back(&mut self) {
        self.len = self.len.saturating_sub(1);
    }

    /// Changes the length to `new_len`.
    ///
    /// Shrinking only changes the length. Growing exposes new elements that are all set to
    /// `T::default()`, replacing the storage with one of exactly `new_len` slots if the current
    /// capacity is not enough.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynamic_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([1, 2, 3]);
    ///
    /// array.resize(1);
    /// assert_eq!(array, [1]);
    ///
    /// array.resize(4);
    /// assert_eq!(array, [1, 0, 0, 0]);
    /// assert_eq!(array.capacity(), 4);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len <= self.len {
            self.len = new_len;
            return;
        }

        if new_len > self.capacity {
            self.reserve(new_len);
        }

        // The slots we are about to expose may hold stale values from before a shrink.
        let exposed = self
            .storage
            .as_mut_slice()
            .get_mut(self.len..new_len)
            .expect("guarded by new_len <= capacity after reserve");

        for slot in exposed {
            *slot = T::default();
        }

        self.len = new_len;
    }

    /// Ensures the array can hold at least `new_capacity` elements without replacing its storage.
    ///
    /// Does nothing if the capacity is already sufficient. Otherwise the storage is replaced with
    /// one of exactly `new_capacity` slots, the live elements are moved over in order and the old
    /// storage is freed. The length does not change.
    ///
    /// Every new slot is filled with `T::default()`, so this takes time proportional to
    /// `new_capacity` even for zero-sized `T`, which needs no memory.
    ///
    /// # Panics
    ///
    /// Panics if the storage would exceed the maximum allocation size. Allocation failure aborts
    /// via [`std::alloc::handle_alloc_error()`].
    pub fn reserve(&mut self, new_capacity: usize)
    where
        T: Default,
    {
        expect_allocation(self.try_reserve(new_capacity));
    }

    /// Fallible version of [`reserve()`][Self::reserve].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the storage would exceed the maximum allocation size
    /// and [`Error::AllocationFailed`] if the allocator could not provide the memory. The array
    /// is unchanged if an error is returned.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()>
    where
        T: Default,
    {
        if new_capacity <= self.capacity {
            return Ok(());
        }

        let mut replacement = RawBuffer::try_with_default(new_capacity).inspect_err(|error| {
            debug!(
                item_type = type_name::<T>(),
                capacity = self.capacity,
                new_capacity,
                %error,
                "failed to allocate replacement storage"
            );
        })?;

        trace!(
            item_type = type_name::<T>(),
            len = self.len,
            capacity = self.capacity,
            new_capacity,
            "replacing storage"
        );

        // Move the live elements over. The default values of the new slots end up in the old
        // storage, which is freed together with them below.
        replacement
            .as_mut_slice()
            .get_mut(..self.len)
            .expect("guarded by len <= capacity < new_capacity")
            .swap_with_slice(self.as_mut_slice());

        self.storage.swap(&mut replacement);
        self.capacity = new_capacity;

        Ok(())
    }

    /// Appends `value` after the last live element, growing the storage if the array is full.
    ///
    /// To append a copy of a value you want to keep, pass `value.clone()`.
    pub fn push_back(&mut self, value: T)
    where
        T: Default,
    {
        if self.len == self.capacity {
            self.grow();
        }

        // SAFETY: We just ensured `len < capacity`.
        let slot = unsafe { self.storage.get_unchecked_mut(self.len) };
        *slot = value;

        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by len < capacity <= usize::MAX");
    }

    /// Inserts `value` at `index`, shifting every element from `index` onward one slot to the
    /// right. An `index` equal to the length appends.
    ///
    /// Returns the index of the inserted element, which is always `index`. Positions are plain
    /// offsets, so the index stays meaningful even if the insertion replaced the storage.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the length.
    pub fn insert(&mut self, index: usize, value: T) -> usize
    where
        T: Default,
    {
        assert!(
            index <= self.len,
            "insert({index}) out of bounds in array of {} with length {}",
            type_name::<T>(),
            self.len
        );

        if self.len == self.capacity {
            self.grow();
        }

        let new_len = self
            .len
            .checked_add(1)
            .expect("guarded by len < capacity <= usize::MAX");

        // Place the value in the first free slot, then rotate it into position. The rotation moves
        // every element in between one slot to the right.
        let affected = self
            .storage
            .as_mut_slice()
            .get_mut(index..new_len)
            .expect("guarded by index <= len < capacity");

        *affected
            .last_mut()
            .expect("range ends past index so it is never empty") = value;
        affected.rotate_right(1);

        self.len = new_len;

        index
    }

    /// Removes the element at `index` from the live range, shifting every element after it one
    /// slot to the left.
    ///
    /// Returns the index of the element that now occupies the erased position, which is always
    /// `index` (equal to the new length if the last element was erased).
    ///
    /// The erased element is dropped before this returns. Its slot at the end of the storage is
    /// refilled with `T::default()`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than the length.
    pub fn erase(&mut self, index: usize) -> usize
    where
        T: Default,
    {
        assert!(
            index < self.len,
            "erase({index}) out of bounds in array of {} with length {}",
            type_name::<T>(),
            self.len
        );

        // The erased element travels to the end of the live range and drops out of it.
        self.as_mut_slice()
            .get_mut(index..)
            .expect("guarded by index < len")
            .rotate_left(1);

        self.len = self
            .len
            .checked_sub(1)
            .expect("guarded by index < len so len is non-zero");

        // The slot just past the new length holds the erased element. If `T::default()` panics
        // the array is already consistent and the element lingers as a stale value.
        let erased_slot = self
            .storage
            .as_mut_slice()
            .get_mut(self.len)
            .expect("guarded by new len < capacity");
        drop(mem::take(erased_slot));

        index
    }

    /// Exchanges the contents of two arrays. Never allocates.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Grows for one more element: double the capacity, or go from nothing to a single slot.
    fn grow(&mut self)
    where
        T: Default,
    {
        let new_capacity = if self.capacity == 0 {
            1
        } else {
            self.capacity.checked_mul(2).unwrap_or_else(|| {
                panic!(
                    "capacity overflow when growing array of {} beyond {} elements",
                    type_name::<T>(),
                    self.capacity
                )
            })
        };

        self.reserve(new_capacity);
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(test)]
    fn integrity_check(&self) {
        assert!(self.len <= self.capacity);
        assert_eq!(self.capacity, self.storage.as_slice().len());
        assert_eq!(self.capacity == 0, !self.storage.is_allocated());
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Copies the live elements into new storage of exactly the same length. The spare capacity
    /// of the original is not carried over.
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }

    /// Builds a copy first and then swaps it in, so `self` is untouched if cloning an element
    /// panics. The previous storage of `self` is freed along with the temporary.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap_with(&mut copy);
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        Self::from_storage(RawBuffer::from_exact_iter(items))
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T: Default> From<ReserveRequest> for DynamicArray<T> {
    fn from(request: ReserveRequest) -> Self {
        Self::with_reserve(request)
    }
}

impl<T: Default> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T: Default> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynamicArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynamicArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialOrd> PartialOrd for DynamicArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynamicArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
