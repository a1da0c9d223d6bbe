use std::alloc::Layout;

use thiserror::Error;

/// Errors that can occur when accessing or growing a [`DynamicArray`][crate::DynamicArray].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Checked access was attempted at an index that does not hold a live element.
    #[error("index {index} is out of range for an array of length {len}")]
    IndexOutOfRange {
        /// The index the caller asked for.
        index: usize,

        /// The number of live elements at the time of the access.
        len: usize,
    },

    /// The requested number of elements cannot be described by a valid memory layout,
    /// typically because the byte size would exceed `isize::MAX`.
    #[error("a block of {requested} elements exceeds the maximum allocation size")]
    CapacityOverflow {
        /// The number of elements that was requested.
        requested: usize,
    },

    /// The global allocator could not provide a block of the required layout.
    #[error("failed to allocate a block of {} bytes", .layout.size())]
    AllocationFailed {
        /// The layout of the block we tried to allocate.
        layout: Layout,
    },
}

/// A specialized `Result` type for array operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug, Clone);

    #[test]
    fn index_out_of_range_names_index_and_len() {
        let error = Error::IndexOutOfRange { index: 10, len: 3 };

        let message = error.to_string();
        assert!(message.contains("10"));
        assert!(message.contains('3'));
    }

    #[test]
    fn allocation_failed_reports_byte_size() {
        let layout = Layout::array::<u64>(4).unwrap();
        let error = Error::AllocationFailed { layout };

        assert!(error.to_string().contains("32 bytes"));
    }
}
