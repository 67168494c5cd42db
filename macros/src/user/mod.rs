//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[bindable]` | on inherent impl | Generate `<method>_delegate` constructors |

pub mod bindable;

pub use bindable::{expand_bindable, BindableArgs};
