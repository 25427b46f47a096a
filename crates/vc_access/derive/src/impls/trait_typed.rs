use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::{AccessStruct, MemberField, PropertyDecl};

/// Generate implementation code for `Typed`.
///
/// Similar to following:
///
/// ```ignore
/// impl _path_::info::Typed for Foo {
///     fn type_info() -> &'static _path_::info::TypeInfo {
///         static CELL: _path_::info::NonGenericTypeInfoCell = ...;
///         CELL.get_or_init(|| {
///             _path_::info::TypeInfo::composite::<Self>([
///                 _path_::info::MemberInfo::field::<Self, i32>(...),
///                 ......
///             ])
///         })
///     }
/// }
/// ```
pub(crate) fn impl_trait_typed(info: &AccessStruct) -> TokenStream {
    let vc_access_path = &info.vc_access_path;
    let typed_ = crate::path::typed_(vc_access_path);
    let type_info_ = crate::path::type_info_(vc_access_path);
    let info_cell = crate::path::non_generic_type_info_cell_(vc_access_path);

    let fields = info.fields.iter().map(|field| field_tokens(info, field));
    let properties = info.properties.iter().map(|property| property_tokens(info, property));

    let ident = info.ident;

    quote! {
        impl #typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                static CELL: #info_cell = #info_cell::new();
                CELL.get_or_init(|| {
                    #type_info_::composite::<Self>([
                        #(#fields,)*
                        #(#properties,)*
                    ])
                })
            }
        }
    }
}

/// `_path_::MemberInfo::field::<Self, Ty>("name", vis, handles)`
fn field_tokens(info: &AccessStruct, field: &MemberField) -> TokenStream {
    let vc_access_path = &info.vc_access_path;
    let member_info_ = crate::path::member_info_(vc_access_path);
    let member_handles_ = crate::path::member_handles_(vc_access_path);

    let MemberField {
        ident, ty, name, ..
    } = field;
    let vis = field.vis.to_tokens(vc_access_path);

    let with_set = (!field.readonly).then(|| quote!(.with_set(|o, v| o.#ident = v)));

    quote! {
        #member_info_::field::<Self, #ty>(
            #name,
            #vis,
            #member_handles_::<Self, #ty>::new(|o| &o.#ident)
                .with_get_mut(|o| &mut o.#ident)
                #with_set
        )
    }
}

/// `_path_::MemberInfo::property::<Self, Ty>("name", vis, handles)`
///
/// Spanned to the attribute, so a method with a wrong signature is reported
/// there.
fn property_tokens(info: &AccessStruct, property: &PropertyDecl) -> TokenStream {
    let vc_access_path = &info.vc_access_path;
    let member_info_ = crate::path::member_info_(vc_access_path);
    let member_handles_ = crate::path::member_handles_(vc_access_path);

    let PropertyDecl {
        span,
        name,
        ty,
        get,
        get_mut,
        set,
        ..
    } = property;
    let vis = property.set_vis.to_tokens(vc_access_path);

    let with_get_mut = get_mut
        .as_ref()
        .map(|method| quote_spanned!(method.span()=> .with_get_mut(Self::#method)));
    let with_set = set
        .as_ref()
        .map(|method| quote_spanned!(method.span()=> .with_set(Self::#method)));

    quote_spanned! {*span=>
        #member_info_::property::<Self, #ty>(
            #name,
            #vis,
            #member_handles_::<Self, #ty>::new(Self::#get)
                #with_get_mut
                #with_set
        )
    }
}
