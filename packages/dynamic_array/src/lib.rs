#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A growable array built directly on manually managed heap storage.
//!
//! This crate provides [`DynamicArray`], a vector-like container with value semantics and explicit
//! capacity management, and [`RawBuffer`], the single-owner heap block it is built on.
//!
//! # Key Features
//!
//! - **Explicit capacity**: length and capacity are tracked separately; [`DynamicArray::reserve()`]
//!   pre-sizes storage and [`DynamicArray::clear()`] keeps it.
//! - **Predictable growth**: a full array doubles its capacity, starting from 1 when it owns no
//!   storage. An empty array never allocates.
//! - **Strong guarantee on growth**: replacement storage is fully built before the old storage is
//!   touched, so a failed growth leaves the array unchanged.
//! - **Exact-fit copies**: cloning an array allocates exactly as many slots as it has elements.
//! - **Checked and unchecked access**: [`DynamicArray::at()`] reports an out of range index as an
//!   [`Error`]; plain indexing panics and `get_unchecked()` skips the check entirely.
//!
//! # Examples
//!
//! ```
//! use dynamic_array::{DynamicArray, Error, reserve};
//!
//! let mut array = DynamicArray::with_reserve(reserve(2));
//! assert_eq!(array.capacity(), 2);
//!
//! array.push_back("first".to_string());
//! array.push_back("second".to_string());
//! array.insert(1, "middle".to_string());
//! assert_eq!(array.capacity(), 4);
//!
//! assert_eq!(array.at(1).map(String::as_str), Ok("middle"));
//! assert!(matches!(array.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 })));
//!
//! let copy = array.clone();
//! assert_eq!(copy, array);
//! assert_eq!(copy.capacity(), 3);
//! ```
//!
//! # Logging
//!
//! Storage replacement is logged at `trace` level and failed fallible allocations at `debug` level
//! via the [`tracing`](https://docs.rs/tracing) crate. Nothing is logged on the hot paths.

mod builder;
mod dynamic_array;
mod error;
mod macros;
mod raw_buffer;
mod reserve;

#[cfg(test)]
mod test_support;

pub use builder::*;
pub use dynamic_array::DynamicArray;
pub use error::Error;
pub(crate) use error::Result;
pub use raw_buffer::RawBuffer;
pub use reserve::*;
