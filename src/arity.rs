//! Per-arity glue: `Signature` impls, constructors and `call`.
//!
//! Everything here is written once in `impl_arity!` and stamped out for
//! arities `0..=MAX_ARITY` by the `arities!` proc-macro, which supplies the
//! type/argument identifier pairs:
//!
//! ```text
//! arities!(impl_arity, 2)
//!   => impl_arity!();
//!      impl_arity!(A0 a0);
//!      impl_arity!(A0 a0, A1 a1);
//! ```
//!
//! Each trampoline is a nested `unsafe fn` monomorphized for the stored type,
//! so the storage pointer is the only thing erased.

use core::ptr::NonNull;

use crate::delegate::Delegate;
use crate::error::CapacityError;
use crate::signature::{sealed, Signature};
use crate::storage::Storage;
use crate::trampoline::Bound;

macro_rules! impl_arity {
    ($($A:ident $a:ident),*) => {
        impl<R, $($A,)*> sealed::Sealed for fn($($A),*) -> R {}

        impl<R, $($A,)*> Signature for fn($($A),*) -> R {
            type Args = ($($A,)*);
            type Output = R;
            type Thunk = unsafe fn(*const (), $($A),*) -> R;

            #[inline(always)]
            unsafe fn invoke(thunk: Self::Thunk, data: *const (), ($($a,)*): Self::Args) -> R {
                // SAFETY: forwarded to the caller.
                unsafe { thunk(data, $($a),*) }
            }
        }

        impl<'a, R, $($A,)* const WORDS: usize> Delegate<'a, fn($($A),*) -> R, WORDS> {
            /// Wraps a plain function, an associated function, or a closure
            /// that captures nothing.
            pub fn from_fn(f: fn($($A),*) -> R) -> Self {
                unsafe fn invoke<R, $($A,)*>(data: *const (), $($a: $A),*) -> R {
                    // SAFETY: `from_fn` stored exactly this fn pointer type.
                    let f = unsafe { *data.cast::<fn($($A),*) -> R>() };
                    f($($a),*)
                }
                // SAFETY: `invoke` reads back the fn pointer stored here.
                unsafe { Self::from_parts(f, invoke::<R, $($A,)*>) }
            }

            /// Moves a closure into the inline storage.
            ///
            /// Fails to compile when the closure's captures exceed
            /// [`Self::CAPACITY`] or need more than 16-byte alignment; see
            /// [`try_new`](Self::try_new) for a runtime check.
            pub fn new<F>(f: F) -> Self
            where
                F: Fn($($A),*) -> R + Clone + 'a,
            {
                // SAFETY: `invoke` reads back the closure stored here.
                unsafe { Self::from_parts(f, Self::closure_thunk::<F>()) }
            }

            /// Like [`new`](Self::new), but hands the closure back instead of
            /// failing to compile when it does not fit.
            pub fn try_new<F>(f: F) -> Result<Self, CapacityError<F>>
            where
                F: Fn($($A),*) -> R + Clone + 'a,
            {
                if !Storage::<WORDS>::fits::<F>() {
                    return Err(CapacityError::new::<WORDS>(f));
                }
                // SAFETY: the fit was checked above.
                Ok(unsafe { Self::from_parts_unchecked(f, Self::closure_thunk::<F>()) })
            }

            fn closure_thunk<F>() -> unsafe fn(*const (), $($A),*) -> R
            where
                F: Fn($($A),*) -> R,
            {
                unsafe fn invoke<F, R, $($A,)*>(data: *const (), $($a: $A),*) -> R
                where
                    F: Fn($($A),*) -> R,
                {
                    // SAFETY: `new`/`try_new` stored an `F` here.
                    let f = unsafe { &*data.cast::<F>() };
                    f($($a),*)
                }
                invoke::<F, R, $($A,)*>
            }

            /// Binds `method` to `instance` for as long as `'a`.
            pub fn bind<T: ?Sized>(instance: &'a T, method: fn(&T, $($A),*) -> R) -> Self {
                unsafe fn invoke<T: ?Sized, R, $($A,)*>(data: *const (), $($a: $A),*) -> R {
                    // SAFETY: `bind` stored this pair; `'a` keeps the instance alive.
                    let bound = unsafe { *data.cast::<Bound<T, fn(&T, $($A),*) -> R>>() };
                    (bound.method)(unsafe { bound.instance.as_ref() }, $($a),*)
                }
                let bound = Bound { instance: NonNull::from(instance), method };
                // SAFETY: `invoke` reads back the pair stored here.
                unsafe { Self::from_parts(bound, invoke::<T, R, $($A,)*>) }
            }

            /// Binds a `&mut self` method to an instance the delegate does not
            /// own.
            ///
            /// # Safety
            ///
            /// For every call made through this delegate or any clone of it:
            /// - `instance` must point at a live `T`;
            /// - no other reference to that `T` may be in use during the call.
            ///
            /// The delegate never extends or manages the instance's lifetime.
            pub unsafe fn bind_raw<T: ?Sized>(
                instance: NonNull<T>,
                method: fn(&mut T, $($A),*) -> R,
            ) -> Self {
                unsafe fn invoke<T: ?Sized, R, $($A,)*>(data: *const (), $($a: $A),*) -> R {
                    // SAFETY: `bind_raw` stored this pair; liveness and
                    // exclusivity are the binder's obligation.
                    let mut bound = unsafe { *data.cast::<Bound<T, fn(&mut T, $($A),*) -> R>>() };
                    (bound.method)(unsafe { bound.instance.as_mut() }, $($a),*)
                }
                let bound = Bound { instance, method };
                // SAFETY: `invoke` reads back the pair stored here.
                unsafe { Self::from_parts(bound, invoke::<T, R, $($A,)*>) }
            }

            /// Calls the stored callable; an empty delegate returns
            /// `R::default()` (a no-op for `()`).
            #[inline]
            pub fn call(&self, $($a: $A),*) -> R
            where
                R: Default,
            {
                self.try_call($($a),*).unwrap_or_default()
            }

            /// Calls the stored callable; `None` when empty.
            #[inline]
            pub fn try_call(&self, $($a: $A),*) -> Option<R> {
                let trampolines = self.trampolines.as_ref()?;
                // SAFETY: `invoke` was generated for what `storage` holds.
                Some(unsafe { (trampolines.invoke)(self.storage.as_ptr(), $($a),*) })
            }
        }

        impl<'a, R, $($A,)* const WORDS: usize> From<fn($($A),*) -> R>
            for Delegate<'a, fn($($A),*) -> R, WORDS>
        {
            #[inline]
            fn from(f: fn($($A),*) -> R) -> Self {
                Self::from_fn(f)
            }
        }
    };
}

macros::arities!(impl_arity, 8);

const _: () = assert!(crate::signature::MAX_ARITY == 8);
