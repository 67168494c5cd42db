//! Procedural macros for tola-delegate
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `arities!` | - | Internal: stamp out per-arity impls |
//! | `#[bindable]` | inherent impl | Delegate constructors for `&self` methods |
//!
//! ## Example
//!
//! ```ignore
//! use std::cell::Cell;
//! use tola_delegate::bindable;
//!
//! struct Counter { hits: Cell<u32> }
//!
//! #[bindable]
//! impl Counter {
//!     pub fn hit(&self) -> u32 { self.hits.set(self.hits.get() + 1); self.hits.get() }
//! }
//!
//! let counter = Counter { hits: Cell::new(0) };
//! let on_click = counter.hit_delegate();
//! assert_eq!(on_click.call(), 1);
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations (Three-tier: inner / common / user)
// =============================================================================

mod inner;
mod common;
mod user;

// =============================================================================
// Internal Macros (inner/)
// =============================================================================

/// Invoke a declarative macro once per arity.
///
/// # Usage
/// ```ignore
/// arities!(impl_arity, 2);
/// // impl_arity!();
/// // impl_arity!(A0 a0);
/// // impl_arity!(A0 a0, A1 a1);
/// ```
#[proc_macro]
pub fn arities(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as inner::arities::AritiesInput);
    inner::arities::expand_arities(input).into()
}

// =============================================================================
// User-facing Macros (user/)
// =============================================================================

/// Generate a `<method>_delegate(&self)` constructor for every eligible
/// `&self` method of an inherent impl block.
///
/// Eligible methods take `&self` (no named lifetime), have no generic
/// parameters, are not `async`, `unsafe` or `extern`, and mention no
/// reference, lifetime or `impl Trait` in their arguments or return type.
/// Other methods are left alone; `#[bindable(skip)]` opts an eligible one out.
/// A method's own `where` clause is repeated on its constructor.
///
/// # Usage
/// ```ignore
/// #[bindable]
/// impl Player {
///     pub fn jump(&self, height: u32) { .. }
///     #[bindable(skip)]
///     pub fn debug_dump(&self) { .. }
/// }
/// let on_space = player.jump_delegate(); // Delegate<'_, fn(u32)>
///
/// // Custom suffix
/// #[bindable(suffix = "_cb")]
/// impl Player { .. } // player.jump_cb()
/// ```
#[proc_macro_attribute]
pub fn bindable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as user::BindableArgs);

    if let Ok(item_impl) = syn::parse::<syn::ItemImpl>(item) {
        return user::expand_bindable(args, item_impl).into();
    }

    syn::Error::new(
        proc_macro2::Span::call_site(),
        "bindable supports inherent impl blocks only",
    )
    .to_compile_error()
    .into()
}
