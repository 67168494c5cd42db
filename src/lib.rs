#![cfg_attr(not(feature = "std"), no_std)]

// Feature flags handled:
// - std: default, enables std library
// - bindable: default, re-exports the #[bindable] attribute

//! # tola-delegate
//!
//! Copyable, allocation-free, type-erased callables.
//!
//! **One type for functions, closures and bound methods.**
//!
//! ## Architecture
//!
//! A [`Delegate`] is an inline buffer plus the functions that know how to read
//! it. There is no tag and no heap: the trampolines chosen at construction
//! *are* the discriminant.
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Storage                                                 |
//! |  - Storage<WORDS> (16-byte aligned inline buffer)                 |
//! |  - Fits<T, WORDS> (build-time size/alignment check)               |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Trampolines                                             |
//! |  - invoke (per signature), copy, drop (per stored type)           |
//! |  - Bound<T, M> (instance address + method)                        |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: User API                                                |
//! |  - Delegate<'a, fn(..) -> R, WORDS>, Null, CapacityError          |
//! |  - #[bindable]                                                    |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ## Features
//!
//! - **No allocation**: everything lives in `WORDS` machine words (default 4)
//! - **Value semantics**: `Clone` duplicates captured state; the source stays callable
//! - **Nullable**: an empty delegate is a no-op, or returns `R::default()`
//! - **Checked capacity**: oversized captures fail to compile
//!
//! ## Quick Start
//!
//! ```
//! use std::cell::Cell;
//! use tola_delegate::{Delegate, Null};
//!
//! type Callback<'a> = Delegate<'a, fn(i32, i32) -> i32>;
//!
//! fn second(_: i32, b: i32) -> i32 { b }
//!
//! struct Counter { last: Cell<i32> }
//! impl Counter {
//!     fn record(&self, a: i32, b: i32) -> i32 { self.last.set(a); b }
//! }
//!
//! // Plain function
//! let cb = Callback::from_fn(second);
//! assert_eq!(cb.call(42, 1), 1);
//!
//! // Capturing closure
//! let base = 6;
//! let cb = Callback::new(move |a, b| base + a + b);
//! assert_eq!(cb.call(1, 2), 9);
//!
//! // Bound method
//! let counter = Counter { last: Cell::new(0) };
//! let cb = Callback::bind(&counter, Counter::record);
//! assert_eq!(cb.call(50, 7), 7);
//! assert_eq!(counter.last.get(), 50);
//!
//! // Empty
//! let cb = Callback::from(Null);
//! assert!(cb == Null);
//! assert_eq!(cb.call(1, 2), 0);
//! ```
//!
//! Captures that do not fit are rejected when the crate is built:
//!
//! ```compile_fail
//! use tola_delegate::Delegate;
//!
//! let table = [0usize; 16];
//! let cb = Delegate::<fn() -> usize>::new(move || table.len());
//! cb.call();
//! ```

// =============================================================================
// Layer 0: Storage
// =============================================================================
mod storage;

// =============================================================================
// Layer 1: Trampolines
// =============================================================================
mod trampoline;
pub mod signature;

// =============================================================================
// Layer 2: User API
// =============================================================================
pub mod delegate;
pub mod error;
mod arity;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use delegate::{Delegate, Null, DEFAULT_WORDS};
pub use error::CapacityError;
pub use signature::{Signature, MAX_ARITY};

// Re-export proc-macros
#[cfg(feature = "bindable")]
pub use macros::bindable;

/// Common items for working with delegates.
pub mod prelude {
    pub use crate::delegate::{Delegate, Null};
    pub use crate::error::CapacityError;
    pub use crate::signature::Signature;
    #[cfg(feature = "bindable")]
    pub use macros::bindable;
}
