#![no_std]

//! `GrowVec`: a contiguous growable vector with lazy materialization and an
//! injectable allocator.
//!
//! A `GrowVec<T>` is a `{size, capacity, data}` triple over plain-data elements
//! (`T: Copy`). Every operation that needs storage reports allocation failure
//! as an error and leaves the vector untouched, so a failed `append` never
//! loses data.
//!
//! This crate is `no_std` compatible and only needs the `alloc` crate.
//!
//! # Lifecycle
//!
//! - **Lazy**: `GrowVec::empty()` and `GrowVec::empty_with_capacity(n)` allocate
//!   nothing. The first insertion allocates exactly the requested capacity.
//! - **Materialized**: `GrowVec::new()` and `GrowVec::with_capacity(n)` allocate
//!   up front. Adopted buffers (`from_raw_parts`, `from_boxed_slice`) start here
//!   too, with `len() == capacity()`.
//! - **Released**: dropping the vector or calling `free()` returns the buffer to
//!   its allocator. Releasing a lazy vector does nothing.
//!
//! ```
//! # use growvec::{GrowVec, DEFAULT_CAPACITY};
//! let mut vec = GrowVec::<i32>::empty();
//! assert!(!vec.is_materialized());
//!
//! vec.append(10).unwrap();
//! assert_eq!(vec.capacity(), DEFAULT_CAPACITY);
//! assert_eq!(vec.len(), 1);
//! ```
//!
//! # Growth
//!
//! A full buffer grows to `floor(capacity * 1.5)` elements. When that does not
//! add room (capacities 0 and 1), the buffer grows by `DEFAULT_CAPACITY`
//! instead.
//!
//! ```
//! # use growvec::GrowVec;
//! let mut vec = GrowVec::<i32>::with_capacity(3).unwrap();
//! vec.append(10).unwrap();
//! vec.append(20).unwrap();
//! vec.append(30).unwrap();
//! assert_eq!(vec.capacity(), 3);
//!
//! vec.append(40).unwrap();
//! assert_eq!(vec.capacity(), 4);
//! assert_eq!(vec.as_slice(), &[10, 20, 30, 40]);
//! ```
//!
//! # Prepend and erase
//!
//! `prepend()` shifts the existing elements right, so repeated prepends come
//! out in reverse order. `erase()` shifts later elements left and never changes
//! the capacity.
//!
//! ```
//! # use growvec::GrowVec;
//! let mut vec = GrowVec::<u8>::empty();
//! for value in 0..4 {
//!     vec.prepend(value).unwrap();
//! }
//! assert_eq!(vec.as_slice(), &[3, 2, 1, 0]);
//!
//! vec.erase(1);
//! assert_eq!(vec.as_slice(), &[3, 1, 0]);
//! ```
//!
//! # Shrinking
//!
//! `shrink_to_fit()` reallocates down to `len()` elements. An empty vector
//! releases its buffer and goes back to the lazy state with `DEFAULT_CAPACITY`.
//!
//! # Custom allocators
//!
//! The allocation primitives come from the `RawAllocator` trait. `Global` uses
//! the process allocator; tests can substitute an allocator that fails on
//! demand. A reference to an allocator is itself an allocator, so the caller
//! can keep inspecting it while the vector uses it.
//!
//! ```
//! # use growvec::{GrowVec, Global};
//! let alloc = Global;
//! let mut vec = GrowVec::<u64, _>::new_in(&alloc).unwrap();
//! vec.append(1).unwrap();
//! assert_eq!(*vec.front(), 1);
//! ```
//!
//! # Iterator Support
//!
//! ```
//! # use growvec::GrowVec;
//! let vec = GrowVec::from(vec![1, 2, 3]);
//!
//! let total: i32 = vec.iter().sum();
//! assert_eq!(total, 6);
//!
//! for value in &vec {
//!     assert!(*value > 0);
//! }
//! ```

extern crate alloc;

mod error;
mod iter;
mod raw;
mod vec;

// Re-export public types and traits
pub use error::GrowVecError;
pub use iter::GrowVecIter;
pub use raw::{Global, RawAllocator};
pub use vec::{GrowVec, DEFAULT_CAPACITY};
