//! Call signatures.
//!
//! A delegate's signature is spelled as a function-pointer type, exactly the
//! type a plain function of that shape coerces to:
//!
//! ```ignore
//! Delegate<fn()>
//! Delegate<fn(i32, i32) -> i32>
//! ```
//!
//! [`Signature`] is implemented for `fn(A0, .., An) -> R` with up to
//! [`MAX_ARITY`] arguments. Arguments are passed by value; a signature with a
//! borrowed argument needs a named lifetime (`Delegate<'a, fn(&'a str)>`),
//! since higher-ranked `for<'x> fn(&'x str)` types are not signatures.

/// Largest supported argument count.
pub const MAX_ARITY: usize = 8;

/// A function-pointer type usable as a delegate signature.
///
/// Sealed: implemented only for `fn(A0, .., An) -> R`.
pub trait Signature: sealed::Sealed {
    /// Arguments as a tuple, for [`Delegate::call_with`](crate::Delegate::call_with).
    type Args;

    /// Return type.
    type Output;

    /// `unsafe fn(*const (), A0, .., An) -> R`
    #[doc(hidden)]
    type Thunk: Copy;

    /// Runs `thunk` over the storage at `data`.
    ///
    /// # Safety
    ///
    /// `data` must hold the value `thunk` was generated for.
    #[doc(hidden)]
    unsafe fn invoke(thunk: Self::Thunk, data: *const (), args: Self::Args) -> Self::Output;
}

pub(crate) mod sealed {
    pub trait Sealed {}
}
