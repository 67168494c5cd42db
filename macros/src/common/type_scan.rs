//! Signature scanning
//!
//! A delegate signature is a plain `fn(A..) -> R` type. Argument or return
//! types that borrow (`&T`, `Cow<'_, T>`) or hide their type (`impl Trait`)
//! would turn it into a higher-ranked or unnameable type, so such methods
//! cannot be bound automatically.

use syn::{
    visit::{self, Visit},
    Lifetime, Type, TypeImplTrait, TypeReference,
};

#[derive(Default)]
struct BorrowFinder {
    found: bool,
}

impl<'ast> Visit<'ast> for BorrowFinder {
    fn visit_type_reference(&mut self, _: &'ast TypeReference) {
        self.found = true;
    }

    fn visit_type_impl_trait(&mut self, _: &'ast TypeImplTrait) {
        self.found = true;
    }

    fn visit_lifetime(&mut self, lifetime: &'ast Lifetime) {
        self.found = true;
        visit::visit_lifetime(self, lifetime);
    }
}

/// Whether `ty` mentions a reference, a lifetime or `impl Trait`.
pub fn borrows_or_opaque(ty: &Type) -> bool {
    let mut finder = BorrowFinder::default();
    finder.visit_type(ty);
    finder.found
}
