// -----------------------------------------------------------------------------
// Modules

mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::AccessStruct;
use trait_typed::impl_trait_typed;

/// Provided for `#[derive(Typed)]`.
pub(crate) fn match_typed_impls(ast: &DeriveInput) -> TokenStream {
    // Parse attributes and members.
    let info = match AccessStruct::from_input(ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let typed_impl = impl_trait_typed(&info);

    TokenStream::from(quote! {
        const _: () = {
            #typed_impl
        };
    })
}
