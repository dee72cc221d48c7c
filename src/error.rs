use thiserror::Error;

/// Error types for `GrowVec` operations
///
/// Both variants describe a failure to obtain backing storage. Operations that
/// return them leave the vector exactly as it was before the call.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowVecError {
    /// The allocator could not provide a block of the requested size
    #[error("Allocation failed: could not obtain {bytes} bytes for {capacity} elements")]
    AllocationFailed {
        /// Number of element slots requested
        capacity: usize,
        /// Size of the requested block in bytes
        bytes: usize,
    },
    /// The requested number of elements does not fit in the address space
    #[error("Capacity overflow: {capacity} elements exceed the maximum allocation size")]
    CapacityOverflow {
        /// Number of element slots requested
        capacity: usize,
    },
}
