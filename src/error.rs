//! Errors.
//!
//! The only runtime failure is a closure that does not fit the inline
//! storage, reported by `try_new`. `new` rejects the same closures when the
//! crate is built, so most code never sees this type.

use core::fmt;
use core::mem::{align_of, size_of};

use thiserror::Error;

use crate::storage::Storage;

/// A callable rejected for exceeding a delegate's inline storage.
///
/// Carries the callable back so nothing is lost:
///
/// ```
/// use tola_delegate::Delegate;
///
/// let table = [1usize; 16];
/// let err = Delegate::<fn() -> usize>::try_new(move || table.iter().sum()).unwrap_err();
/// assert!(err.size() > err.capacity());
///
/// let sum = err.into_inner();
/// assert_eq!(sum(), 16);
/// ```
#[derive(Error)]
#[error(
    "callable of {size} bytes (align {align}) exceeds the delegate's inline storage \
     of {capacity} bytes (align {max_align})"
)]
pub struct CapacityError<F> {
    size: usize,
    align: usize,
    capacity: usize,
    max_align: usize,
    callable: F,
}

impl<F> CapacityError<F> {
    pub(crate) fn new<const WORDS: usize>(callable: F) -> Self {
        Self {
            size: size_of::<F>(),
            align: align_of::<F>(),
            capacity: Storage::<WORDS>::CAPACITY,
            max_align: Storage::<WORDS>::ALIGN,
            callable,
        }
    }

    /// Size of the rejected callable in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alignment of the rejected callable.
    pub fn align(&self) -> usize {
        self.align
    }

    /// Bytes the delegate could have held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Gives the rejected callable back.
    pub fn into_inner(self) -> F {
        self.callable
    }
}

impl<F> fmt::Debug for CapacityError<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityError")
            .field("size", &self.size)
            .field("align", &self.align)
            .field("capacity", &self.capacity)
            .field("max_align", &self.max_align)
            .finish_non_exhaustive()
    }
}
