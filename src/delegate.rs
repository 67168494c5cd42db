//! # The Delegate
//!
//! A fixed-signature callable value that stores what it calls inline.
//!
//! ```text
//! Delegate<'a, S, WORDS>
//! +---------------------------+------------------------------+
//! | storage: [usize; WORDS]   | trampolines: Option<{        |
//! |   fn ptr                  |     invoke: S::Thunk,        |
//! |   | (instance, method)    |     copy:   CopyFn,          |
//! |   | closure environment   |     drop:   Option<DropFn>,  |
//! |   | nothing               | }>        None == empty      |
//! +---------------------------+------------------------------+
//! ```
//!
//! The per-arity constructors and `call` are generated in `arity.rs`; this module
//! holds everything that does not depend on the argument count.

use core::fmt;
use core::marker::PhantomData;
use core::mem;

use crate::signature::Signature;
use crate::storage::{Fits, Storage};
use crate::trampoline::Trampolines;

/// Inline capacity, in machine words, used when `WORDS` is not spelled out.
///
/// Four words hold a fn pointer, a bound method on a trait object
/// (fat instance pointer plus method), or a closure capturing up to four
/// word-sized values.
pub const DEFAULT_WORDS: usize = 4;

/// A copyable, allocation-free, type-erased callable with signature `S`.
///
/// `S` is a function-pointer type such as `fn(i32, i32) -> i32`. `'a` bounds
/// every borrow held by the stored callable. `WORDS` is the inline capacity
/// in machine words; storing something larger fails to compile.
///
/// # Sources
///
/// | Constructor | Stores |
/// |-------------|--------|
/// | [`from_fn`](Delegate::from_fn) | a fn pointer (also capture-less closures) |
/// | [`new`](Delegate::new) | a closure, moved inline |
/// | [`bind`](Delegate::bind) | `&'a T` plus `fn(&T, ..) -> R` |
/// | [`bind_raw`](Delegate::bind_raw) | an unowned `NonNull<T>` plus `fn(&mut T, ..) -> R` |
/// | [`Default`], [`Null`] | nothing |
///
/// Because several signatures share one generic type, name the signature
/// before calling a constructor, usually through an alias:
///
/// ```
/// use tola_delegate::Delegate;
///
/// type Adder<'a> = Delegate<'a, fn(i32, i32) -> i32>;
///
/// let offset = 6;
/// let add = Adder::new(move |a, b| a + b + offset);
/// assert_eq!(add.call(1, 2), 9);
///
/// let empty = Adder::default();
/// assert_eq!(empty.call(1, 2), 0);
/// ```
///
/// # Threads
///
/// A delegate is neither `Send` nor `Sync`: the erased value may be neither.
pub struct Delegate<'a, S: Signature, const WORDS: usize = DEFAULT_WORDS> {
    pub(crate) storage: Storage<WORDS>,
    pub(crate) trampolines: Option<Trampolines<S>>,
    _marker: PhantomData<(&'a (), *const ())>,
}

impl<'a, S: Signature, const WORDS: usize> Delegate<'a, S, WORDS> {
    /// Bytes available to a stored callable.
    pub const CAPACITY: usize = Storage::<WORDS>::CAPACITY;

    /// An empty delegate.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            storage: Storage::uninit(),
            trampolines: None,
            _marker: PhantomData,
        }
    }

    /// Whether a value of type `T` fits the inline storage.
    #[inline]
    pub const fn fits<T>() -> bool {
        Storage::<WORDS>::fits::<T>()
    }

    /// Stores `value` and pairs it with `invoke`, checking the capacity at
    /// build time.
    ///
    /// # Safety
    ///
    /// `invoke` must read the storage as a `T`.
    #[inline]
    pub(crate) unsafe fn from_parts<T: Clone>(value: T, invoke: S::Thunk) -> Self {
        let () = Fits::<T, WORDS>::ASSERT;
        // SAFETY: the assertion above proves `T` fits; `invoke` is the caller's.
        unsafe { Self::from_parts_unchecked(value, invoke) }
    }

    /// # Safety
    ///
    /// `T` must fit and `invoke` must read the storage as a `T`.
    #[inline]
    pub(crate) unsafe fn from_parts_unchecked<T: Clone>(value: T, invoke: S::Thunk) -> Self {
        let mut storage = Storage::uninit();
        // SAFETY: fresh storage; fit is the caller's.
        unsafe { storage.write(value) };
        Self {
            storage,
            trampolines: Some(Trampolines::of::<T>(invoke)),
            _marker: PhantomData,
        }
    }

    /// `true` when something is stored.
    #[inline]
    pub const fn is_bound(&self) -> bool {
        self.trampolines.is_some()
    }

    /// `true` when nothing is stored.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.trampolines.is_none()
    }

    /// Drops the stored callable, leaving the delegate empty.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Moves the stored callable out, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Stores `other`, returning the previous content.
    #[inline]
    pub fn replace(&mut self, other: Self) -> Self {
        mem::replace(self, other)
    }

    /// Calls with the arguments packed in a tuple.
    ///
    /// An empty delegate returns `S::Output::default()`.
    #[inline]
    pub fn call_with(&self, args: S::Args) -> S::Output
    where
        S::Output: Default,
    {
        self.try_call_with(args).unwrap_or_default()
    }

    /// Calls with the arguments packed in a tuple; `None` when empty.
    #[inline]
    pub fn try_call_with(&self, args: S::Args) -> Option<S::Output> {
        let trampolines = self.trampolines.as_ref()?;
        // SAFETY: `invoke` was generated for what `storage` holds.
        Some(unsafe { S::invoke(trampolines.invoke, self.storage.as_ptr(), args) })
    }
}

impl<S: Signature, const WORDS: usize> Default for Delegate<'_, S, WORDS> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Signature, const WORDS: usize> Clone for Delegate<'_, S, WORDS> {
    fn clone(&self) -> Self {
        let mut storage = Storage::uninit();
        if let Some(trampolines) = &self.trampolines {
            // SAFETY: `copy` matches the stored type and `storage` is fresh.
            // If the clone panics nothing has been written and nothing drops.
            unsafe { (trampolines.copy)(self.storage.as_ptr(), storage.as_mut_ptr()) };
        }
        Self {
            storage,
            trampolines: self.trampolines,
            _marker: PhantomData,
        }
    }
}

impl<S: Signature, const WORDS: usize> Drop for Delegate<'_, S, WORDS> {
    fn drop(&mut self) {
        if let Some(drop) = self.trampolines.as_ref().and_then(|t| t.drop) {
            // SAFETY: `drop` matches the stored type, which is never read again.
            unsafe { drop(self.storage.as_mut_ptr()) };
        }
    }
}

impl<S: Signature, const WORDS: usize> fmt::Debug for Delegate<'_, S, WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("bound", &self.is_bound())
            .field("capacity", &Self::CAPACITY)
            .finish()
    }
}

// =============================================================================
// Null
// =============================================================================

/// The empty delegate, for construction, assignment and comparison.
///
/// ```
/// use tola_delegate::{Delegate, Null};
///
/// let mut task = Delegate::<fn()>::from_fn(|| {});
/// assert!(task != Null);
///
/// task = Null.into();
/// assert!(task == Null);
/// task.call(); // no-op
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

impl<S: Signature, const WORDS: usize> From<Null> for Delegate<'_, S, WORDS> {
    #[inline]
    fn from(_: Null) -> Self {
        Self::empty()
    }
}

impl<S: Signature, const WORDS: usize> PartialEq<Null> for Delegate<'_, S, WORDS> {
    #[inline]
    fn eq(&self, _: &Null) -> bool {
        self.is_empty()
    }
}

impl<S: Signature, const WORDS: usize> PartialEq<Delegate<'_, S, WORDS>> for Null {
    #[inline]
    fn eq(&self, other: &Delegate<'_, S, WORDS>) -> bool {
        other.is_empty()
    }
}
