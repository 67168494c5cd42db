//! # Inline Storage
//!
//! A fixed number of machine words, aligned to 16 bytes, that holds the
//! erased callable. Nothing here knows what is stored; the trampolines do.
//!
//! ```text
//! Storage<4> on a 64-bit target
//! +--------+--------+--------+--------+
//! | word 0 | word 1 | word 2 | word 3 |   32 bytes, align 16
//! +--------+--------+--------+--------+
//!   fn ptr                                 from_fn
//!   instance method                        bind / bind_raw
//!   captured environment ...               new
//! ```
//!
//! The buffer sits in an `UnsafeCell`: a stored closure may mutate its own
//! captures (`Cell`, `RefCell`) while being called through `&Delegate`.

use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::mem::{align_of, size_of, MaybeUninit};

/// Inline buffer of `WORDS` machine words, aligned for any fundamental type
/// (`u128` included).
#[repr(C, align(16))]
pub(crate) struct Storage<const WORDS: usize> {
    words: UnsafeCell<[MaybeUninit<usize>; WORDS]>,
}

impl<const WORDS: usize> Storage<WORDS> {
    /// Usable bytes.
    pub(crate) const CAPACITY: usize = WORDS * size_of::<usize>();

    /// Strictest alignment a stored value may require.
    pub(crate) const ALIGN: usize = align_of::<Self>();

    #[inline(always)]
    pub(crate) const fn uninit() -> Self {
        Self { words: UnsafeCell::new([MaybeUninit::uninit(); WORDS]) }
    }

    /// Whether a `T` can live in this buffer.
    #[inline(always)]
    pub(crate) const fn fits<T>() -> bool {
        size_of::<T>() <= Self::CAPACITY && align_of::<T>() <= Self::ALIGN
    }

    /// Address of the buffer; writes through it are allowed.
    #[inline(always)]
    pub(crate) fn as_ptr(&self) -> *const () {
        self.words.get().cast_const().cast()
    }

    #[inline(always)]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut () {
        self.words.get().cast()
    }

    /// Moves `value` into the buffer.
    ///
    /// # Safety
    ///
    /// `T` must fit (see [`Storage::fits`]) and the previous content must
    /// already have been dropped or be trivially forgettable.
    #[inline(always)]
    pub(crate) unsafe fn write<T>(&mut self, value: T) {
        debug_assert!(Self::fits::<T>());
        // SAFETY: size and alignment are covered by the caller.
        unsafe { self.as_mut_ptr().cast::<T>().write(value) }
    }
}

// =============================================================================
// Capacity Check (post-monomorphization)
// =============================================================================

/// Build-time proof that `T` fits in `Storage<WORDS>`.
///
/// Naming `Fits::<T, WORDS>::ASSERT` in a function body makes every
/// instantiation with an oversized or over-aligned `T` fail to compile.
pub(crate) struct Fits<T, const WORDS: usize>(PhantomData<T>);

impl<T, const WORDS: usize> Fits<T, WORDS> {
    pub(crate) const ASSERT: () = {
        assert!(
            size_of::<T>() <= Storage::<WORDS>::CAPACITY,
            "callable does not fit in the delegate's inline storage: capture less or raise WORDS"
        );
        assert!(
            align_of::<T>() <= Storage::<WORDS>::ALIGN,
            "callable is over-aligned for the delegate's inline storage"
        );
    };
}
