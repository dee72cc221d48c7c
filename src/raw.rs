use alloc::alloc::{alloc, dealloc, realloc};
use core::alloc::Layout;
use core::ptr::NonNull;

/// Allocation primitives used by `GrowVec` to manage its buffer.
///
/// The three operations mirror `realloc`, `free` and `memmove`. `GrowVec` only
/// ever passes layouts with a non-zero size and a block previously returned by
/// the same allocator.
///
/// # Safety
///
/// Implementations must uphold the contract of each method:
/// - `reallocate` returns a block valid for `new_layout`, holding the first
///   `min(old, new)` bytes of the old block. On failure it returns `None` and
///   leaves the old block valid and unmodified.
/// - `deallocate` releases a block obtained from `reallocate`, and does nothing
///   when given `None`.
/// - `block_move` copies bytes correctly even when the ranges overlap.
pub unsafe trait RawAllocator {
    /// Resizes `block`, or allocates a fresh one when `block` is `None`.
    ///
    /// # Safety
    ///
    /// `block`, when present, must be a live block of this allocator described
    /// by its layout, and `new_layout` must share that layout's alignment and
    /// have a non-zero size.
    unsafe fn reallocate(
        &self,
        block: Option<(NonNull<u8>, Layout)>,
        new_layout: Layout,
    ) -> Option<NonNull<u8>>;

    /// Releases a block.
    ///
    /// # Safety
    ///
    /// `ptr`, when present, must be a live block of this allocator allocated
    /// with `layout`. It must not be used afterwards.
    unsafe fn deallocate(&self, ptr: Option<NonNull<u8>>, layout: Layout);

    /// Copies `bytes` bytes from `src` to `dst`. The ranges may overlap.
    ///
    /// # Safety
    ///
    /// Both ranges must be valid for `bytes` bytes.
    unsafe fn block_move(&self, src: *const u8, dst: *mut u8, bytes: usize) {
        unsafe { core::ptr::copy(src, dst, bytes) }
    }
}

/// The process-wide allocator from the `alloc` crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

unsafe impl RawAllocator for Global {
    unsafe fn reallocate(
        &self,
        block: Option<(NonNull<u8>, Layout)>,
        new_layout: Layout,
    ) -> Option<NonNull<u8>> {
        let raw = match block {
            Some((ptr, old_layout)) => unsafe {
                realloc(ptr.as_ptr(), old_layout, new_layout.size())
            },
            None => unsafe { alloc(new_layout) },
        };
        NonNull::new(raw)
    }

    unsafe fn deallocate(&self, ptr: Option<NonNull<u8>>, layout: Layout) {
        if let Some(ptr) = ptr {
            unsafe { dealloc(ptr.as_ptr(), layout) }
        }
    }
}

unsafe impl<A: RawAllocator + ?Sized> RawAllocator for &A {
    unsafe fn reallocate(
        &self,
        block: Option<(NonNull<u8>, Layout)>,
        new_layout: Layout,
    ) -> Option<NonNull<u8>> {
        unsafe { (**self).reallocate(block, new_layout) }
    }

    unsafe fn deallocate(&self, ptr: Option<NonNull<u8>>, layout: Layout) {
        unsafe { (**self).deallocate(ptr, layout) }
    }

    unsafe fn block_move(&self, src: *const u8, dst: *mut u8, bytes: usize) {
        unsafe { (**self).block_move(src, dst, bytes) }
    }
}
