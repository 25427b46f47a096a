//! Paths of the `vc_access` items named by generated code.
//!
//! Kept in one place so that moving an item in `vc_access` only requires a
//! change here.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_access` crate.
///
/// 1. For crates that depend on `vc_access`, `::vc_access` is returned.
/// 2. For crates that depend on `vc_compiled`, `::vc_compiled::access` is returned.
/// 3. For other situations, `::vc_access` is returned, but this may be incorrect.
///
/// Reading the manifest is not free, so the path is computed once per
/// derive and passed down.
pub(crate) fn vc_access() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_access"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn typed_(vc_access_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_access_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(vc_access_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_access_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_access_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_access_path::info::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn member_info_(vc_access_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_access_path::info::MemberInfo
    }
}

#[inline(always)]
pub(crate) fn member_handles_(vc_access_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_access_path::info::MemberHandles
    }
}

#[inline(always)]
pub(crate) fn accessibility_(vc_access_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_access_path::info::Accessibility
    }
}
