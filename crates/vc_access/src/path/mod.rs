//! Resolution of lambdas into member chains.
//!
//! [`PathParser`] turns a [`PathSpec`](crate::expr::PathSpec) into an
//! [`AccessPath`]: the ordered [`MemberDescriptor`]s from the root type to the
//! accessed member, validated against the registry of
//! [`Typed`](crate::info::Typed) types. Nothing is compiled here, see
//! [`AccessorCompiler`](crate::AccessorCompiler).

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod parser;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::{AccessPath, MemberDescriptor};
pub use parser::{PathParser, full_name, member_names};
