//! `#[bindable]`: delegate constructors for `&self` methods.
//!
//! ```ignore
//! #[bindable]
//! impl Counter {
//!     pub fn add(&self, by: u32) -> u32 { .. }
//! }
//!
//! // Expands to the impl above plus:
//! impl Counter {
//!     pub fn add_delegate(&self) -> ::tola_delegate::Delegate<'_, fn(u32) -> u32> {
//!         <::tola_delegate::Delegate<'_, fn(u32) -> u32>>::bind(self, Self::add)
//!     }
//! }
//! ```

use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, ReturnType, Token, Type,
};

use crate::common::borrows_or_opaque;

const DEFAULT_SUFFIX: &str = "_delegate";

/// `#[bindable]` or `#[bindable(suffix = "_cb")]`
pub struct BindableArgs {
    pub suffix: String,
}

impl Parse for BindableArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut suffix = DEFAULT_SUFFIX.to_string();

        if !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            if key != "suffix" {
                return Err(syn::Error::new(key.span(), "expected `suffix = \"...\"`"));
            }
            input.parse::<Token![=]>()?;
            let lit: LitStr = input.parse()?;
            suffix = lit.value();
            if suffix.is_empty() {
                return Err(syn::Error::new(lit.span(), "suffix must not be empty"));
            }
        }

        Ok(BindableArgs { suffix })
    }
}

pub fn expand_bindable(args: BindableArgs, mut item: ItemImpl) -> TokenStream2 {
    if let Some((_, path, _)) = &item.trait_ {
        return syn::Error::new_spanned(path, "#[bindable] supports inherent impl blocks only")
            .to_compile_error();
    }

    let mut constructors = Vec::new();
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        match take_skip_marker(method) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(err) => return err.to_compile_error(),
        }

        if let Some(arg_types) = bindable_arg_types(method) {
            constructors.push(constructor(&args.suffix, method, &arg_types));
        }
    }

    let (impl_generics, _, where_clause) = item.generics.split_for_impl();
    let self_ty = &item.self_ty;

    quote! {
        #item

        impl #impl_generics #self_ty #where_clause {
            #(#constructors)*
        }
    }
}

/// Removes `#[bindable(skip)]` from `method`, reporting whether it was there.
fn take_skip_marker(method: &mut ImplItemFn) -> syn::Result<bool> {
    let mut skip = false;
    let mut error = None;

    method.attrs.retain(|attr| {
        if !attr.path().is_ident("bindable") {
            return true;
        }
        match attr.parse_args::<syn::Ident>() {
            Ok(ident) if ident == "skip" => skip = true,
            _ => {
                error = Some(syn::Error::new_spanned(
                    attr,
                    "only `#[bindable(skip)]` is allowed on methods",
                ))
            }
        }
        false
    });

    match error {
        Some(err) => Err(err),
        None => Ok(skip),
    }
}

/// Argument types of an eligible method (`&self` without a named lifetime,
/// non-generic, safe, sync, no borrowed or opaque types), `None` otherwise.
fn bindable_arg_types(method: &ImplItemFn) -> Option<Vec<Type>> {
    let sig = &method.sig;
    if !sig.generics.params.is_empty()
        || sig.asyncness.is_some()
        || sig.unsafety.is_some()
        || sig.abi.is_some()
        || sig.variadic.is_some()
    {
        return None;
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next()? {
        FnArg::Receiver(receiver)
            if matches!(receiver.reference, Some((_, None)))
                && receiver.mutability.is_none()
                && receiver.colon_token.is_none() => {}
        _ => return None,
    }

    let mut arg_types = Vec::new();
    for input in inputs {
        let FnArg::Typed(pat_type) = input else {
            return None;
        };
        if borrows_or_opaque(&pat_type.ty) {
            return None;
        }
        arg_types.push((*pat_type.ty).clone());
    }

    if let ReturnType::Type(_, ty) = &sig.output {
        if borrows_or_opaque(ty) {
            return None;
        }
    }

    Some(arg_types)
}

fn constructor(suffix: &str, method: &ImplItemFn, arg_types: &[Type]) -> TokenStream2 {
    let vis = &method.vis;
    let name = &method.sig.ident;
    let ctor = format_ident!("{}{}", name, suffix);
    let output = &method.sig.output;
    let where_clause = &method.sig.generics.where_clause;
    let doc = format!("A delegate bound to [`Self::{}`] on this instance.", name);

    quote! {
        #[doc = #doc]
        #[inline]
        #vis fn #ctor(&self) -> ::tola_delegate::Delegate<'_, fn(#(#arg_types),*) #output>
        #where_clause
        {
            <::tola_delegate::Delegate<'_, fn(#(#arg_types),*) #output>>::bind(self, Self::#name)
        }
    }
}
