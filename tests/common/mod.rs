#![allow(dead_code)]

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use growvec::{Global, RawAllocator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Succeed,
    /// Let this many reallocations through, fail the next one, then succeed again
    FailAfter(usize),
    FailAlways,
}

/// Allocator that forwards to `Global` and fails on request.
///
/// Counts every call so tests can check how the vector used it. Releasing
/// more blocks than were handed out panics.
pub struct FailingAllocator {
    mode: Cell<Mode>,
    reallocations: Cell<usize>,
    failures: Cell<usize>,
    deallocations: Cell<usize>,
    block_moves: Cell<usize>,
    live_blocks: Cell<usize>,
}

impl FailingAllocator {
    pub fn new() -> Self {
        Self {
            mode: Cell::new(Mode::Succeed),
            reallocations: Cell::new(0),
            failures: Cell::new(0),
            deallocations: Cell::new(0),
            block_moves: Cell::new(0),
            live_blocks: Cell::new(0),
        }
    }

    pub fn fail_next(&self) {
        self.mode.set(Mode::FailAfter(0));
    }

    pub fn fail_after(&self, successes: usize) {
        self.mode.set(Mode::FailAfter(successes));
    }

    pub fn fail_always(&self) {
        self.mode.set(Mode::FailAlways);
    }

    pub fn succeed_always(&self) {
        self.mode.set(Mode::Succeed);
    }

    pub fn reallocations(&self) -> usize {
        self.reallocations.get()
    }

    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    pub fn block_moves(&self) -> usize {
        self.block_moves.get()
    }

    pub fn live_blocks(&self) -> usize {
        self.live_blocks.get()
    }

    fn should_fail(&self) -> bool {
        match self.mode.get() {
            Mode::Succeed => false,
            Mode::FailAlways => true,
            Mode::FailAfter(0) => {
                self.mode.set(Mode::Succeed);
                true
            }
            Mode::FailAfter(remaining) => {
                self.mode.set(Mode::FailAfter(remaining - 1));
                false
            }
        }
    }
}

unsafe impl RawAllocator for FailingAllocator {
    unsafe fn reallocate(
        &self,
        block: Option<(NonNull<u8>, Layout)>,
        new_layout: Layout,
    ) -> Option<NonNull<u8>> {
        self.reallocations.set(self.reallocations.get() + 1);
        if self.should_fail() {
            self.failures.set(self.failures.get() + 1);
            return None;
        }

        let fresh = block.is_none();
        let ptr = unsafe { Global.reallocate(block, new_layout) }?;
        if fresh {
            self.live_blocks.set(self.live_blocks.get() + 1);
        }
        Some(ptr)
    }

    unsafe fn deallocate(&self, ptr: Option<NonNull<u8>>, layout: Layout) {
        if ptr.is_some() {
            assert!(self.live_blocks.get() > 0, "Double free: no live blocks");
            self.live_blocks.set(self.live_blocks.get() - 1);
            self.deallocations.set(self.deallocations.get() + 1);
        }
        unsafe { Global.deallocate(ptr, layout) }
    }

    unsafe fn block_move(&self, src: *const u8, dst: *mut u8, bytes: usize) {
        self.block_moves.set(self.block_moves.get() + 1);
        unsafe { Global.block_move(src, dst, bytes) }
    }
}
