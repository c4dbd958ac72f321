//! Scratch arena backing every buffer in the welding pipeline.
//!
//! The pipeline allocates each stage's worst-case buffer up front and never
//! frees anything individually, so all the arena tracks is a byte budget:
//! every allocation is charged at 32-byte granularity against a fixed
//! capacity and handed out zero-initialized. Exhausting the budget is a
//! recoverable [`WeldError::CapacityExceeded`], not an abort.

use bytemuck::Pod;

use crate::error::{WeldError, WeldResult};

/// Charge granularity for every allocation.
pub const ARENA_ALIGN: usize = 32;

/// Default budget, sized for meshes well past the 16-bit index limit.
pub const DEFAULT_ARENA_CAPACITY: usize = 128 * 1024 * 1024;

pub struct ScratchArena {
    capacity: usize,
    used: usize,
}

impl ScratchArena {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, used: 0 }
    }

    /// Allocates a zero-initialized buffer of `count` records.
    pub fn alloc_zeroed<T: Pod>(&mut self, count: usize) -> WeldResult<Vec<T>> {
        let bytes = count
            .checked_mul(std::mem::size_of::<T>())
            .ok_or_else(|| WeldError::MalformedInput(format!("allocation of {} records overflows", count)))?;
        self.charge(bytes)?;
        Ok(vec![T::zeroed(); count])
    }

    /// Charges `bytes` (rounded up to the arena alignment) against the budget
    /// without handing out a buffer. Used for side structures like the hash
    /// table's bucket array.
    pub fn charge(&mut self, bytes: usize) -> WeldResult<()> {
        let charged = bytes.div_ceil(ARENA_ALIGN) * ARENA_ALIGN;
        let remaining = self.capacity - self.used;
        if charged > remaining {
            return Err(WeldError::CapacityExceeded {
                requested: charged,
                remaining,
            });
        }
        self.used += charged;
        Ok(())
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    /// Releases the whole budget at once. Buffers already handed out stay
    /// valid; this only resets the accounting for a fresh batch.
    pub fn reset(&mut self) {
        self.used = 0;
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_charges_aligned_size() {
        let mut arena = ScratchArena::new(64);
        let buf = arena.alloc_zeroed::<u8>(1).unwrap();
        assert_eq!(buf.len(), 1);
        assert_eq!(arena.used(), ARENA_ALIGN);
    }

    #[test]
    fn alloc_is_zeroed() {
        let mut arena = ScratchArena::default();
        let buf = arena.alloc_zeroed::<u32>(16).unwrap();
        assert!(buf.iter().all(|&v| v == 0));
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let mut arena = ScratchArena::new(64);
        arena.alloc_zeroed::<u8>(64).unwrap();
        let err = arena.alloc_zeroed::<u8>(1).unwrap_err();
        match err {
            WeldError::CapacityExceeded {
                requested,
                remaining,
            } => {
                assert_eq!(requested, ARENA_ALIGN);
                assert_eq!(remaining, 0);
            }
            other => panic!("expected CapacityExceeded, got {}", other),
        }
    }

    #[test]
    fn reset_releases_budget() {
        let mut arena = ScratchArena::new(64);
        arena.alloc_zeroed::<u8>(40).unwrap();
        arena.reset();
        assert_eq!(arena.remaining(), 64);
        assert!(arena.alloc_zeroed::<u8>(40).is_ok());
    }
}
