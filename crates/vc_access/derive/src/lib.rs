//! See [`Typed`](derive_typed).
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static ACCESS_ATTRIBUTE_NAME: &str = "access";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Member Metadata Derivation
///
/// `#[derive(Typed)]` implements `vc_access::info::Typed` for a struct with
/// named fields, so that member paths rooted at it can be parsed and
/// compiled.
///
/// Every named field becomes a [field member] with the same name. Fields are
/// read and borrowed mutably in place, and written through a generated
/// setter. The member's accessibility follows the field: `pub` fields are
/// public, every other visibility (including `pub(crate)`) is non-public.
///
/// The field types must implement `Typed` themselves.
///
/// Generic structs, tuple structs, unit structs, enums and unions are
/// rejected.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Typed)]
/// struct Foo {
///     #[access(skip)]        // not a member
///     cache: Cache,
///     #[access(rename = "Id")] // the name used in paths
///     pub id: i32,
///     #[access(readonly)]    // no setter
///     pub created: u64,
///     #[access(vis = "public")] // overrides the inferred accessibility
///     name: String,
/// }
/// ```
///
/// `vis` accepts `"public"` and `"non_public"`.
///
/// ## Properties
///
/// A [property member] is backed by methods instead of a field, and declared
/// at the type level:
///
/// ```rust, ignore
/// #[derive(Typed)]
/// #[access(property(
///     name = "Count",
///     ty = u32,
///     get = count,          // fn(&self) -> &u32
///     get_mut = count_mut,  // fn(&mut self) -> &mut u32, optional
///     set = set_count,      // fn(&mut self, u32), optional
///     set_vis = "non_public", // accessibility of `set`, default "public"
/// ))]
/// struct Foo { count: u32 }
/// ```
///
/// A property without `set` is read-only, and one without `get_mut` cannot be
/// crossed by a setter reaching a deeper member.
///
/// Member names, from fields and properties, must be unique.
///
/// [field member]: https://docs.rs/vc_access/latest/vc_access/info/enum.MemberKind.html#variant.Field
/// [property member]: https://docs.rs/vc_access/latest/vc_access/info/enum.MemberKind.html#variant.Property
#[proc_macro_derive(Typed, attributes(access))]
pub fn derive_typed(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_typed_impls(&ast)
}
