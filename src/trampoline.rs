//! Trampolines: the functions that know what the storage holds.
//!
//! A delegate never inspects its own bytes. Construction picks three
//! monomorphized functions (invoke, copy, drop) for the stored type and keeps
//! them next to the buffer; their presence is the only "tag" there is.

use core::mem::needs_drop;
use core::ptr::{self, NonNull};

use crate::signature::Signature;

/// Clones the value at `src` into the uninitialized slot at `dst`.
pub(crate) type CopyFn = unsafe fn(src: *const (), dst: *mut ());

/// Runs the destructor of the value at the given address.
pub(crate) type DropFn = unsafe fn(*mut ());

/// Invoke/copy/drop for one stored type, set and cleared as a unit.
pub(crate) struct Trampolines<S: Signature> {
    pub(crate) invoke: S::Thunk,
    pub(crate) copy: CopyFn,
    pub(crate) drop: Option<DropFn>,
}

impl<S: Signature> Clone for Trampolines<S> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Signature> Copy for Trampolines<S> {}

impl<S: Signature> Trampolines<S> {
    /// Trampolines for a stored `T` called through `invoke`.
    #[inline(always)]
    pub(crate) fn of<T: Clone>(invoke: S::Thunk) -> Self {
        Self {
            invoke,
            copy: copy_in_place::<T>,
            drop: drop_fn::<T>(),
        }
    }
}

/// # Safety
///
/// `src` points at a live `T`; `dst` is valid for writing a `T`.
unsafe fn copy_in_place<T: Clone>(src: *const (), dst: *mut ()) {
    // SAFETY: upheld by the caller.
    unsafe {
        let value = (*src.cast::<T>()).clone();
        dst.cast::<T>().write(value);
    }
}

/// # Safety
///
/// `data` points at a live `T` that is not used afterwards.
unsafe fn drop_in_place<T>(data: *mut ()) {
    // SAFETY: upheld by the caller.
    unsafe { ptr::drop_in_place(data.cast::<T>()) }
}

const fn drop_fn<T>() -> Option<DropFn> {
    if needs_drop::<T>() {
        Some(drop_in_place::<T>)
    } else {
        None
    }
}

// =============================================================================
// Bound Instance Methods
// =============================================================================

/// An instance address paired with the method to run on it.
///
/// The address is not owned: whoever builds a `Bound` guarantees the
/// instance outlives every call made through it.
pub(crate) struct Bound<T: ?Sized, M> {
    pub(crate) instance: NonNull<T>,
    pub(crate) method: M,
}

impl<T: ?Sized, M: Copy> Clone for Bound<T, M> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized, M: Copy> Copy for Bound<T, M> {}
