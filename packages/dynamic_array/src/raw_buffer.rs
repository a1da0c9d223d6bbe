use std::alloc::{self, Layout};
use std::any::type_name;
use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};

use scopeguard::ScopeGuard;

use crate::{Error, Result};

/// Exclusive owner of a single heap-allocated block of `T`, or of nothing at all.
///
/// This is the backing storage of a [`DynamicArray`][crate::DynamicArray]. It knows whether it
/// owns a block and where that block lives, but it has no notion of which elements are "in use" -
/// that is tracked one level up. Every slot of an owned block always holds an initialized `T`.
///
/// A buffer created with zero elements owns nothing: it is null and makes no allocation. The
/// converse also holds - a non-null buffer always has at least one slot. Callers rely on
/// "null buffer if and only if zero length" so this must never be relaxed.
///
/// The buffer cannot be cloned, because a copy of a raw block is only meaningful to someone who
/// knows which slots matter. Moving it transfers ownership without touching the heap.
///
/// # Examples
///
/// ```
/// use dynamic_array::RawBuffer;
///
/// let empty = RawBuffer::<u32>::with_default(0);
/// assert!(!empty.is_allocated());
///
/// let mut buffer = RawBuffer::with_value(3, &7_u32);
/// assert!(buffer.is_allocated());
/// assert_eq!(buffer.as_slice(), &[7, 7, 7]);
///
/// buffer.as_mut_slice()[1] = 8;
/// assert_eq!(buffer.as_slice(), &[7, 8, 7]);
/// ```
pub struct RawBuffer<T> {
    /// The owned block, carrying its length as slice metadata. We need the length to rebuild the
    /// layout when freeing the block and to drop the elements in it; it is not used for any
    /// bounds checks on unchecked access.
    address: Option<NonNull<[T]>>,
}

impl<T> RawBuffer<T> {
    /// Creates a buffer that owns nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self { address: None }
    }

    /// Creates a buffer of `len` default-valued elements.
    ///
    /// If `len` is zero, the buffer owns nothing and no allocation is made.
    ///
    /// # Panics
    ///
    /// Panics if the block would exceed the maximum allocation size. Allocation failure aborts
    /// via [`std::alloc::handle_alloc_error()`].
    #[must_use]
    pub fn with_default(len: usize) -> Self
    where
        T: Default,
    {
        expect_allocation(Self::try_with_default(len))
    }

    /// Fallible version of [`with_default()`][Self::with_default].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the block would exceed the maximum allocation size
    /// and [`Error::AllocationFailed`] if the allocator could not provide the memory.
    pub fn try_with_default(len: usize) -> Result<Self>
    where
        T: Default,
    {
        Self::try_from_fn(len, |_| T::default())
    }

    /// Creates a buffer of `len` clones of `value`.
    ///
    /// If `len` is zero, the buffer owns nothing and no allocation is made.
    ///
    /// # Panics
    ///
    /// Panics if the block would exceed the maximum allocation size. Allocation failure aborts
    /// via [`std::alloc::handle_alloc_error()`].
    #[must_use]
    pub fn with_value(len: usize, value: &T) -> Self
    where
        T: Clone,
    {
        expect_allocation(Self::try_with_value(len, value))
    }

    /// Fallible version of [`with_value()`][Self::with_value].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the block would exceed the maximum allocation size
    /// and [`Error::AllocationFailed`] if the allocator could not provide the memory.
    pub fn try_with_value(len: usize, value: &T) -> Result<Self>
    where
        T: Clone,
    {
        Self::try_from_fn(len, |_| value.clone())
    }

    /// Creates a buffer holding clones of the items in `items`, in order.
    ///
    /// An empty slice produces a buffer that owns nothing.
    ///
    /// # Panics
    ///
    /// Allocation failure aborts via [`std::alloc::handle_alloc_error()`].
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        expect_allocation(Self::try_from_slice(items))
    }

    /// Fallible version of [`from_slice()`][Self::from_slice].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the allocator could not provide the memory.
    pub fn try_from_slice(items: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Self::try_from_fn(items.len(), |index| {
            items
                .get(index)
                .expect("guarded by len of the block matching len of the slice")
                .clone()
        })
    }

    /// Creates a buffer that takes ownership of every item yielded by `items`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the iterator yields a different number of items than it reports via
    /// [`ExactSizeIterator::len()`]. Allocation failure aborts via
    /// [`std::alloc::handle_alloc_error()`].
    #[must_use]
    pub fn from_exact_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut items = items.into_iter();
        let len = items.len();

        let buffer = expect_allocation(Self::try_from_fn(len, |_| {
            items
                .next()
                .expect("iterator yielded fewer items than its reported length")
        }));

        assert!(
            items.next().is_none(),
            "iterator yielded more items than its reported length of {len}"
        );

        buffer
    }

    /// Takes ownership of a block previously given up via [`release()`][Self::release].
    ///
    /// # Safety
    ///
    /// The caller must pass a block obtained from `release()` on a `RawBuffer<T>` of the same
    /// `T`, and must not have freed it or adopted it into another buffer since.
    #[must_use]
    pub unsafe fn from_raw(address: NonNull<[T]>) -> Self {
        Self {
            address: Some(address),
        }
    }

    /// Gives up ownership of the block, leaving this buffer null.
    ///
    /// Returns `None` if the buffer did not own anything. The caller becomes responsible for the
    /// block and the only way to free it correctly is to hand it back to
    /// [`from_raw()`][Self::from_raw].
    #[must_use = "dropping the released block leaks it"]
    pub fn release(&mut self) -> Option<NonNull<[T]>> {
        self.address.take()
    }

    /// Whether the buffer owns a block.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.address.is_some()
    }

    /// Exchanges the owned blocks of the two buffers. Never allocates.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.address, &mut other.address);
    }

    /// The whole block as a slice. Empty if the buffer owns nothing.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self.address {
            // SAFETY: The block is owned by us and every slot in it is initialized. The shared
            // borrow of `self` prevents any mutation for the lifetime of the slice.
            Some(address) => unsafe { address.as_ref() },
            None => &[],
        }
    }

    /// The whole block as a mutable slice. Empty if the buffer owns nothing.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.address {
            // SAFETY: The block is owned by us and every slot in it is initialized. The exclusive
            // borrow of `self` guarantees nobody else can observe the slice while it lives.
            Some(mut address) => unsafe { address.as_mut() },
            None => &mut [],
        }
    }

    /// Pointer to the first slot of the block, or a null pointer if the buffer owns nothing.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.address
            .map_or(ptr::null(), |address| address.cast::<T>().as_ptr().cast_const())
    }

    /// Mutable pointer to the first slot of the block, or a null pointer if the buffer owns
    /// nothing.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.address
            .map_or(ptr::null_mut(), |address| address.cast::<T>().as_ptr())
    }

    /// Returns a reference to the slot at `index` without any bounds checking.
    ///
    /// # Safety
    ///
    /// The buffer must own a block and `index` must be less than the length it was created with.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: Forwarding the caller's guarantee that `index` is inside the block.
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Returns a mutable reference to the slot at `index` without any bounds checking.
    ///
    /// # Safety
    ///
    /// The buffer must own a block and `index` must be less than the length it was created with.
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: Forwarding the caller's guarantee that `index` is inside the block.
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    /// Allocates a block of `len` slots and fills slot `i` with `init(i)`, in order.
    ///
    /// If `init` panics, the slots filled so far are dropped and the block is freed before the
    /// panic continues, so a failed construction neither leaks nor exposes a partial block.
    ///
    /// `init` runs once per slot even when `T` is zero-sized, as it may have side effects.
    fn try_from_fn(len: usize, mut init: impl FnMut(usize) -> T) -> Result<Self> {
        if len == 0 {
            return Ok(Self::new());
        }

        let layout = Layout::array::<T>(len)
            .map_err(|_layout_error| Error::CapacityOverflow { requested: len })?;

        let first = if layout.size() == 0 {
            // Zero-sized elements need no memory, just a well-aligned non-null address.
            NonNull::dangling()
        } else {
            // SAFETY: The layout describes `len` elements of `T` and we checked it is not
            // zero-sized.
            let raw = unsafe { alloc::alloc(layout) };

            NonNull::new(raw.cast::<T>()).ok_or(Error::AllocationFailed { layout })?
        };

        let mut initialized = scopeguard::guard(0_usize, move |initialized| {
            let written = NonNull::slice_from_raw_parts(first, initialized);

            // SAFETY: Exactly the first `initialized` slots have been written and nothing else
            // has seen them, so we are the only ones who can drop them.
            unsafe { written.as_ptr().drop_in_place() };

            // SAFETY: We allocated `first` with this exact layout just above.
            unsafe { Self::deallocate(first, layout) };
        });

        for index in 0..len {
            let value = init(index);

            // SAFETY: `index < len` and the block was allocated for `len` elements.
            let slot = unsafe { first.add(index) };

            // SAFETY: The slot is inside the block, properly aligned and not yet initialized,
            // so there is no old value we would be forgetting to drop.
            unsafe { slot.write(value) };

            *initialized = index.checked_add(1).expect("guarded by index < len");
        }

        // Every slot is initialized, so the block is now ours to keep.
        let initialized_count = ScopeGuard::into_inner(initialized);
        debug_assert_eq!(initialized_count, len);

        Ok(Self {
            address: Some(NonNull::slice_from_raw_parts(first, len)),
        })
    }

    /// # Safety
    ///
    /// `first` must be the start of a block allocated by `try_from_fn()` with `layout`, and the
    /// block must not be used after this call.
    unsafe fn deallocate(first: NonNull<T>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        // SAFETY: Forwarding the caller's guarantee that the block came from `alloc()` with this
        // layout and is not used afterwards.
        unsafe { alloc::dealloc(first.cast::<u8>().as_ptr(), layout) };
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        let Some(address) = self.address.take() else {
            return;
        };

        let layout = Layout::array::<T>(address.len())
            .expect("layout was valid when the block was allocated so it must still be valid");
        let first = address.cast::<T>();

        // The memory goes back to the allocator even if dropping an element panics.
        let _free_on_exit = scopeguard::guard((), move |()| {
            // SAFETY: We allocated the block with this exact layout and we are giving it up now.
            unsafe { Self::deallocate(first, layout) };
        });

        // SAFETY: Every slot holds an initialized `T` that we exclusively own, and the block is
        // no longer reachable through `self`.
        unsafe { address.as_ptr().drop_in_place() };
    }
}

impl<T> fmt::Debug for RawBuffer<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("address", &self.as_ptr())
            .field("len", &self.as_slice().len())
            .finish()
    }
}

// SAFETY: Yes, there are raw pointers involved here but the buffer is the sole owner of the block,
// so as long as T itself can move between threads, the buffer can do so, too.
unsafe impl<T: Send> Send for RawBuffer<T> {}

// SAFETY: Shared access only ever hands out `&T`, so sharing the buffer is as safe as sharing T.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

/// Unwraps the result of an allocating operation, treating allocation failure as fatal.
///
/// We do not intend to handle allocation failure as a real possibility in the infallible API -
/// out of memory goes to the global allocation error handler, a bad size is a panic.
pub(crate) fn expect_allocation<R>(result: Result<R>) -> R {
    match result {
        Ok(value) => value,
        Err(Error::AllocationFailed { layout }) => alloc::handle_alloc_error(layout),
        Err(error) => panic!("{error}"),
    }
}
