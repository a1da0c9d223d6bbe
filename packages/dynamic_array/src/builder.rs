use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{DynamicArray, ReserveRequest};

/// Builder for creating an instance of [`DynamicArray`].
///
/// You only need to use this builder if you want to customize the initial storage. An array
/// created via [`DynamicArray::new()`][1] starts with no storage at all and grows on demand.
///
/// # Examples
///
/// ```
/// use dynamic_array::DynamicArray;
///
/// let array = DynamicArray::<u32>::builder().capacity(100).build();
///
/// assert_eq!(array.len(), 0);
/// assert_eq!(array.capacity(), 100);
/// ```
///
/// [1]: DynamicArray::new
#[must_use]
pub struct DynamicArrayBuilder<T> {
    capacity: usize,

    _item: PhantomData<T>,
}

impl<T> fmt::Debug for DynamicArrayBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DynamicArrayBuilder<{}> {{ capacity: {} }}",
            type_name::<T>(),
            self.capacity
        )
    }
}

impl<T> DynamicArrayBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            capacity: 0,
            _item: PhantomData,
        }
    }

    /// Sets the number of elements to allocate storage for up front.
    ///
    /// Zero, the default, means no storage is allocated until the first element is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynamic_array::DynamicArray;
    ///
    /// let array = DynamicArray::<String>::builder().capacity(8).build();
    ///
    /// assert_eq!(array.capacity(), 8);
    /// ```
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the up-front storage from a [`ReserveRequest`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dynamic_array::{DynamicArray, reserve};
    ///
    /// let array = DynamicArray::<u8>::builder().reserve(reserve(4)).build();
    ///
    /// assert_eq!(array.capacity(), 4);
    /// ```
    pub fn reserve(self, request: ReserveRequest) -> Self {
        self.capacity(request.capacity())
    }

    /// Builds the array with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if the requested storage exceeds the maximum allocation size.
    #[must_use]
    pub fn build(self) -> DynamicArray<T>
    where
        T: Default,
    {
        let mut array = DynamicArray::new();
        array.reserve(self.capacity);
        array
    }
}
