use alloc::boxed::Box;
use alloc::vec::Vec;
use core::alloc::Layout;
use core::fmt;
use core::mem;
use core::ptr::{self, NonNull};
use core::slice;

use crate::error::GrowVecError;
use crate::iter::GrowVecIter;
use crate::raw::{Global, RawAllocator};

/// Capacity used by the lazy constructors and after shrinking an empty vector.
pub const DEFAULT_CAPACITY: usize = 5;

/// Capacity after one growth step: `floor(capacity * 1.5)`.
fn grown_capacity(capacity: usize) -> Result<usize, GrowVecError> {
    capacity
        .checked_add(capacity / 2)
        .ok_or(GrowVecError::CapacityOverflow {
            capacity: usize::MAX,
        })
}

/// A contiguous growable vector of plain-data elements.
///
/// The buffer is either lazy (`data` is `None`, nothing allocated yet) or
/// materialized. Lazy vectors always have a size of 0, and their capacity is
/// the size of the first allocation.
pub struct GrowVec<T: Copy, A: RawAllocator = Global> {
    size: usize,
    capacity: usize,
    data: Option<NonNull<T>>,
    alloc: A,
}

// SAFETY: the buffer is exclusively owned, so moving the vector moves the
// elements and the allocator with it.
unsafe impl<T: Copy + Send, A: RawAllocator + Send> Send for GrowVec<T, A> {}

impl<T: Copy> GrowVec<T> {
    /// Creates a lazy vector with `DEFAULT_CAPACITY`. Nothing is allocated
    /// until the first insertion.
    #[must_use]
    pub const fn empty() -> Self {
        Self::empty_in(Global)
    }

    /// Creates a lazy vector whose first allocation holds `capacity` elements.
    #[must_use]
    pub const fn empty_with_capacity(capacity: usize) -> Self {
        Self::empty_with_capacity_in(capacity, Global)
    }

    /// Creates a vector with a buffer of `DEFAULT_CAPACITY` elements.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` if the buffer cannot be allocated.
    pub fn new() -> Result<Self, GrowVecError> {
        Self::new_in(Global)
    }

    /// Creates a vector with a buffer of `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` if the buffer cannot be allocated,
    /// or `GrowVecError::CapacityOverflow` if `capacity` elements do not fit in
    /// the address space.
    pub fn with_capacity(capacity: usize) -> Result<Self, GrowVecError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Takes ownership of a buffer of exactly `length` elements.
    ///
    /// # Safety
    ///
    /// `ptr` must come from the global allocator with the layout of
    /// `[T; length]` (or be dangling and aligned when that layout is
    /// zero-sized), and all `length` elements must be initialized. The buffer
    /// must not be used or released by anyone else afterwards.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, length: usize) -> Self {
        unsafe { Self::from_raw_parts_in(ptr, length, Global) }
    }

    /// Adopts the storage of a boxed slice without copying.
    #[must_use]
    pub fn from_boxed_slice(boxed: Box<[T]>) -> Self {
        let length = boxed.len();
        let ptr = NonNull::from(Box::leak(boxed)).cast::<T>();
        // SAFETY: a `Box<[T]>` owns a global allocation laid out as `[T; length]`.
        unsafe { Self::from_raw_parts(ptr, length) }
    }
}

impl<T: Copy, A: RawAllocator> GrowVec<T, A> {
    /// Creates a lazy vector with `DEFAULT_CAPACITY` that will use `alloc`.
    #[must_use]
    pub const fn empty_in(alloc: A) -> Self {
        Self::empty_with_capacity_in(DEFAULT_CAPACITY, alloc)
    }

    #[must_use]
    pub const fn empty_with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self {
            size: 0,
            capacity,
            data: None,
            alloc,
        }
    }

    /// Creates a vector with a buffer of `DEFAULT_CAPACITY` elements from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` if the buffer cannot be allocated.
    pub fn new_in(alloc: A) -> Result<Self, GrowVecError> {
        Self::with_capacity_in(DEFAULT_CAPACITY, alloc)
    }

    /// Creates a vector with a buffer of `capacity` elements from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` if the buffer cannot be allocated,
    /// or `GrowVecError::CapacityOverflow` if the layout cannot be computed.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, GrowVecError> {
        let mut vec = Self::empty_with_capacity_in(capacity, alloc);
        vec.resize(capacity)?;
        Ok(vec)
    }

    /// Takes ownership of a buffer of exactly `length` elements allocated by `alloc`.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live block of `alloc` with the layout of `[T; length]`
    /// (or dangling and aligned when that layout is zero-sized), holding
    /// `length` initialized elements. Growing, shrinking and dropping the
    /// vector hand this block back to `alloc`.
    #[must_use]
    pub unsafe fn from_raw_parts_in(ptr: NonNull<T>, length: usize, alloc: A) -> Self {
        Self {
            size: length,
            capacity: length,
            data: Some(ptr),
            alloc,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` once a buffer has been allocated or adopted.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.data.is_some()
    }

    /// Returns the buffer pointer, or null while the vector is lazy.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.data.map_or(ptr::null(), |data| data.as_ptr().cast_const())
    }

    /// Returns the mutable buffer pointer, or null while the vector is lazy.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    fn layout_for(capacity: usize) -> Result<Layout, GrowVecError> {
        Layout::array::<T>(capacity).map_err(|_| GrowVecError::CapacityOverflow { capacity })
    }

    /// The block currently owned by the vector, if it has one with a non-zero size.
    #[allow(clippy::expect_used)]
    fn block(&self) -> Option<(NonNull<u8>, Layout)> {
        let data = self.data?;
        let layout = Self::layout_for(self.capacity)
            .expect("Layout validated when the buffer was allocated");
        (layout.size() != 0).then_some((data.cast::<u8>(), layout))
    }

    /// Moves the buffer to a block of exactly `new_capacity` elements.
    ///
    /// On failure nothing changes: the old block stays valid and owned.
    fn resize(&mut self, new_capacity: usize) -> Result<(), GrowVecError> {
        let new_layout = Self::layout_for(new_capacity)?;

        let data = if new_layout.size() == 0 {
            if let Some((ptr, layout)) = self.block() {
                unsafe { self.alloc.deallocate(Some(ptr), layout) };
            }
            NonNull::dangling()
        } else {
            // SAFETY: `block` belongs to `self.alloc` and shares the alignment of `T`.
            unsafe { self.alloc.reallocate(self.block(), new_layout) }
                .ok_or(GrowVecError::AllocationFailed {
                    capacity: new_capacity,
                    bytes: new_layout.size(),
                })?
                .cast::<T>()
        };

        self.data = Some(data);
        self.capacity = new_capacity;
        Ok(())
    }

    /// Ensures there is room for one more element.
    fn grow_if_needed(&mut self) -> Result<(), GrowVecError> {
        let new_capacity = match self.data {
            Some(_) if self.size < self.capacity => return Ok(()),
            Some(_) => grown_capacity(self.capacity)?,
            // First materialization honours the requested capacity.
            None => self.capacity,
        };

        // Capacities of 0 and 1 do not grow under the factor.
        let new_capacity = if new_capacity <= self.size {
            self.size
                .checked_add(DEFAULT_CAPACITY)
                .ok_or(GrowVecError::CapacityOverflow {
                    capacity: usize::MAX,
                })?
        } else {
            new_capacity
        };

        self.resize(new_capacity)
    }

    /// Moves the live elements `[src, size)` so that they start at `dest`.
    fn shift(&mut self, dest: usize, src: usize) {
        let Some(data) = self.data else {
            return;
        };
        let bytes = (self.size - src) * mem::size_of::<T>();
        let base = data.as_ptr();
        // SAFETY: callers keep both ranges inside the allocated capacity.
        unsafe {
            self.alloc
                .block_move(base.add(src).cast::<u8>(), base.add(dest).cast::<u8>(), bytes);
        }
    }

    /// Appends `value` after the last element.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` or `GrowVecError::CapacityOverflow`
    /// if the buffer needed to grow and could not. The vector is left unchanged.
    pub fn append(&mut self, value: T) -> Result<(), GrowVecError> {
        self.grow_if_needed()?;
        // SAFETY: `grow_if_needed` guarantees a materialized buffer with `size < capacity`.
        unsafe { self.as_mut_ptr().add(self.size).write(value) };
        self.size += 1;
        Ok(())
    }

    /// Inserts `value` before the first element, shifting the rest right.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` or `GrowVecError::CapacityOverflow`
    /// if the buffer needed to grow and could not. The vector is left unchanged.
    pub fn prepend(&mut self, value: T) -> Result<(), GrowVecError> {
        self.grow_if_needed()?;
        self.shift(1, 0);
        // SAFETY: `grow_if_needed` guarantees a materialized buffer with `size < capacity`.
        unsafe { self.as_mut_ptr().write(value) };
        self.size += 1;
        Ok(())
    }

    /// Removes the element at `index`, shifting later elements left.
    /// Capacity is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn erase(&mut self, index: usize) {
        assert!(
            index < self.size,
            "Index {} out of bounds for vector of length {}",
            index,
            self.size
        );
        self.shift(index, index + 1);
        self.size -= 1;
    }

    /// Reduces the capacity to the current length.
    ///
    /// An empty vector releases its buffer and returns to the lazy state with
    /// `DEFAULT_CAPACITY`, so calling this repeatedly on an empty vector is
    /// harmless.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::AllocationFailed` if the allocator refuses the
    /// smaller block. The buffer, contents and capacity are left unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), GrowVecError> {
        if self.size == 0 {
            self.release();
            self.capacity = DEFAULT_CAPACITY;
            return Ok(());
        }
        if self.size == self.capacity {
            return Ok(());
        }
        self.resize(self.size)
    }

    /// Releases the buffer. Equivalent to dropping the vector.
    pub fn free(self) {
        drop(self);
    }

    fn release(&mut self) {
        if let Some((ptr, layout)) = self.block() {
            // SAFETY: the block is owned by this vector and forgotten right after.
            unsafe { self.alloc.deallocate(Some(ptr), layout) };
        }
        self.data = None;
        self.size = 0;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self.data {
            // SAFETY: the first `size` slots of the buffer are initialized.
            Some(data) => unsafe { slice::from_raw_parts(data.as_ptr(), self.size) },
            None => &[],
        }
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.data {
            // SAFETY: the first `size` slots of the buffer are initialized and uniquely borrowed.
            Some(data) => unsafe { slice::from_raw_parts_mut(data.as_ptr(), self.size) },
            None => &mut [],
        }
    }

    /// Gets the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn at(&self, index: usize) -> &T {
        assert!(
            index < self.size,
            "Index {} out of bounds for vector of length {}",
            index,
            self.size
        );
        &self.as_slice()[index]
    }

    /// Gets mutable access to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        assert!(
            index < self.size,
            "Index {} out of bounds for vector of length {}",
            index,
            self.size
        );
        &mut self.as_mut_slice()[index]
    }

    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[must_use]
    pub fn front(&self) -> &T {
        assert!(self.size > 0, "Cannot access front of empty vector");
        self.at(0)
    }

    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[must_use]
    pub fn front_mut(&mut self) -> &mut T {
        assert!(self.size > 0, "Cannot access front of empty vector");
        self.at_mut(0)
    }

    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[must_use]
    pub fn back(&self) -> &T {
        assert!(self.size > 0, "Cannot access back of empty vector");
        self.at(self.size - 1)
    }

    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[must_use]
    pub fn back_mut(&mut self) -> &mut T {
        assert!(self.size > 0, "Cannot access back of empty vector");
        let last = self.size - 1;
        self.at_mut(last)
    }

    /// Returns a forward iterator over the elements.
    #[must_use]
    pub fn iter(&self) -> GrowVecIter<'_, T> {
        GrowVecIter::new(self.as_slice())
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: Copy, A: RawAllocator> Drop for GrowVec<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: Copy> Default for GrowVec<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Copy> From<Vec<T>> for GrowVec<T> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_boxed_slice(vec.into_boxed_slice())
    }
}

impl<T: Copy + fmt::Debug, A: RawAllocator> fmt::Debug for GrowVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowVec")
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .field("data", &self.as_slice())
            .finish()
    }
}
