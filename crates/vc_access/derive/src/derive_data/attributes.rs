//! Parsing of `#[access(...)]` attributes.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Ident, LitStr, Type};

use crate::ACCESS_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Visibility

/// The accessibility of a member's setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberVis {
    Public,
    NonPublic,
}

impl MemberVis {
    /// Parse `"public"` or `"non_public"`.
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let lit: LitStr = meta.value()?.parse()?;
        match lit.value().as_str() {
            "public" => Ok(Self::Public),
            "non_public" => Ok(Self::NonPublic),
            _ => Err(syn::Error::new(
                lit.span(),
                "expected `\"public\"` or `\"non_public\"`",
            )),
        }
    }

    /// `_path_::Accessibility::Public` or `_path_::Accessibility::NonPublic`.
    pub fn to_tokens(self, vc_access_path: &syn::Path) -> TokenStream {
        let accessibility_ = crate::path::accessibility_(vc_access_path);
        match self {
            Self::Public => quote!(#accessibility_::Public),
            Self::NonPublic => quote!(#accessibility_::NonPublic),
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate `access` attribute"));
    }
    *slot = Some(value);
    Ok(())
}

// -----------------------------------------------------------------------------
// Field attributes

/// Attributes of a named field.
///
/// - `#[access(skip)]`: the field is not a member.
/// - `#[access(rename = "Name")]`: the member name used in paths.
/// - `#[access(readonly)]`: no setter is generated.
/// - `#[access(vis = "public")]`: overrides the accessibility inferred
///   from the field's visibility.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub readonly: bool,
    pub rename: Option<LitStr>,
    pub vis: Option<MemberVis>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(ACCESS_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                } else if meta.path.is_ident("readonly") {
                    this.readonly = true;
                } else if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    set_once(&mut this.rename, name, &meta)?;
                } else if meta.path.is_ident("vis") {
                    let vis = MemberVis::parse(&meta)?;
                    set_once(&mut this.vis, vis, &meta)?;
                } else {
                    return Err(meta.error("unsupported field attribute"));
                }
                Ok(())
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// Type attributes

/// A property declared on the type, backed by accessor methods.
///
/// Format: `property(name = "...", ty = Type, get = method, get_mut = method,
/// set = method, set_vis = "non_public")`
#[derive(Debug)]
pub(crate) struct PropertyDecl {
    pub span: Span,
    pub name: LitStr,
    pub ty: Type,
    pub get: Ident,
    pub get_mut: Option<Ident>,
    pub set: Option<Ident>,
    pub set_vis: MemberVis,
}

impl PropertyDecl {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let span = meta.path.get_ident().map_or_else(Span::call_site, Ident::span);

        let mut name: Option<LitStr> = None;
        let mut ty: Option<Type> = None;
        let mut get: Option<Ident> = None;
        let mut get_mut: Option<Ident> = None;
        let mut set: Option<Ident> = None;
        let mut set_vis: Option<MemberVis> = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                set_once(&mut name, inner.value()?.parse()?, &inner)
            } else if inner.path.is_ident("ty") {
                set_once(&mut ty, inner.value()?.parse()?, &inner)
            } else if inner.path.is_ident("get") {
                set_once(&mut get, inner.value()?.parse()?, &inner)
            } else if inner.path.is_ident("get_mut") {
                set_once(&mut get_mut, inner.value()?.parse()?, &inner)
            } else if inner.path.is_ident("set") {
                set_once(&mut set, inner.value()?.parse()?, &inner)
            } else if inner.path.is_ident("set_vis") {
                let vis = MemberVis::parse(&inner)?;
                set_once(&mut set_vis, vis, &inner)
            } else {
                Err(inner.error("unsupported property attribute"))
            }
        })?;

        let missing = |key: &str| syn::Error::new(span, format!("property requires `{key}`"));

        Ok(Self {
            span,
            name: name.ok_or_else(|| missing("name"))?,
            ty: ty.ok_or_else(|| missing("ty"))?,
            get: get.ok_or_else(|| missing("get"))?,
            get_mut,
            set,
            set_vis: set_vis.unwrap_or(MemberVis::Public),
        })
    }
}

/// Attributes of the type itself.
///
/// - `#[access(property(...))]`: see [`PropertyDecl`]; may be repeated.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub properties: Vec<PropertyDecl>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(ACCESS_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("property") {
                    this.properties.push(PropertyDecl::parse(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported type attribute"))
                }
            })?;
        }

        Ok(this)
    }
}
