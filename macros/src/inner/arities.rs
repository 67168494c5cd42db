//! Arity generation macro.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    Ident, LitInt, Token,
};

pub struct AritiesInput {
    pub callback: Ident,
    pub max: usize,
}

impl Parse for AritiesInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let callback: Ident = input.parse()?;
        input.parse::<Token![,]>()?;
        let lit: LitInt = input.parse()?;
        let max = lit.base10_parse::<usize>()?;
        Ok(AritiesInput { callback, max })
    }
}

/// `callback!(A0 a0, .., An an);` for every `n` in `0..=max`.
pub fn expand_arities(input: AritiesInput) -> TokenStream {
    let callback = &input.callback;

    let calls = (0..=input.max).map(|n| {
        let pairs = (0..n).map(|i| {
            let ty = format_ident!("A{}", i);
            let arg = format_ident!("a{}", i);
            quote! { #ty #arg }
        });
        quote! { #callback!(#(#pairs),*); }
    });

    quote! { #(#calls)* }
}
