use std::collections::BTreeMap;

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Type, Visibility};

use super::{FieldAttributes, MemberVis, PropertyDecl, TypeAttributes};

/// A named field that becomes a member.
pub(crate) struct MemberField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub name: String,
    pub vis: MemberVis,
    pub readonly: bool,
}

/// A struct with named fields, ready for code generation.
pub(crate) struct AccessStruct<'a> {
    pub vc_access_path: syn::Path,
    pub ident: &'a Ident,
    pub fields: Vec<MemberField<'a>>,
    pub properties: Vec<PropertyDecl>,
}

impl<'a> AccessStruct<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "`Typed` cannot be derived for generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Typed` cannot be derived for tuple structs",
                    ));
                }
                Fields::Unit => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Typed` cannot be derived for unit structs",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Typed` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Typed` cannot be derived for unions",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip {
                continue;
            }

            // Named fields always carry an ident.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };

            let inferred = match field.vis {
                Visibility::Public(_) => MemberVis::Public,
                _ => MemberVis::NonPublic,
            };

            fields.push(MemberField {
                ident,
                ty: &field.ty,
                name: attrs.rename.map_or_else(|| ident.unraw().to_string(), |lit| lit.value()),
                vis: attrs.vis.unwrap_or(inferred),
                readonly: attrs.readonly,
            });
        }

        let properties = TypeAttributes::parse_attrs(&ast.attrs)?.properties;

        let this = Self {
            vc_access_path: crate::path::vc_access(),
            ident: &ast.ident,
            fields,
            properties,
        };
        this.check_unique_names()?;

        Ok(this)
    }

    fn check_unique_names(&self) -> syn::Result<()> {
        let mut seen: BTreeMap<String, Span> = BTreeMap::new();

        let names = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.ident.span()))
            .chain(
                self.properties
                    .iter()
                    .map(|property| (property.name.value(), property.name.span())),
            );

        for (name, span) in names {
            if seen.insert(name.clone(), span).is_some() {
                return Err(syn::Error::new(
                    span,
                    format!("duplicate member name `{name}`"),
                ));
            }
        }

        Ok(())
    }
}
