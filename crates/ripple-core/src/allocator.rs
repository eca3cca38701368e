//! Byte accounting for pooled storage.
//!
//! Structures that grow a pool (list and grid slot pools) ask an
//! [`Allocator`] before growing and hand the bytes back when they shrink or
//! are destroyed. The default [`SystemAllocator`] always agrees; a
//! [`BudgetAllocator`] enforces a ceiling and tracks what is in use, which is
//! also how tests inject allocation failures.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{Error, Result};

pub trait Allocator {
    /// Asks for `bytes` more. Refusal is [`Error::OutOfMemory`].
    fn reserve(&self, bytes: usize) -> Result<()>;
    /// Returns `bytes` previously reserved.
    fn release(&self, bytes: usize);
}

pub type AllocatorRef = Rc<dyn Allocator>;

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn reserve(&self, _bytes: usize) -> Result<()> {
        Ok(())
    }

    fn release(&self, _bytes: usize) {}
}

pub fn system_allocator() -> AllocatorRef {
    Rc::new(SystemAllocator)
}

#[derive(Debug)]
pub struct BudgetAllocator {
    limit: usize,
    in_use: Cell<usize>,
    peak: Cell<usize>,
}

impl BudgetAllocator {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            in_use: Cell::new(0),
            peak: Cell::new(0),
        }
    }

    pub fn in_use(&self) -> usize {
        self.in_use.get()
    }

    pub fn peak(&self) -> usize {
        self.peak.get()
    }
}

impl Allocator for BudgetAllocator {
    fn reserve(&self, bytes: usize) -> Result<()> {
        let next = self.in_use.get().checked_add(bytes).ok_or(Error::Overflow)?;
        if next > self.limit {
            log::warn!(
                "allocator: refusing {bytes} bytes ({} of {} in use)",
                self.in_use.get(),
                self.limit
            );
            return Err(Error::OutOfMemory);
        }
        self.in_use.set(next);
        self.peak.set(self.peak.get().max(next));
        Ok(())
    }

    fn release(&self, bytes: usize) {
        self.in_use.set(self.in_use.get().saturating_sub(bytes));
    }
}

/// Bytes needed for `count` values of `T`.
pub fn bytes_for<T>(count: usize) -> Result<usize> {
    count
        .checked_mul(std::mem::size_of::<T>())
        .ok_or(Error::Overflow)
}
