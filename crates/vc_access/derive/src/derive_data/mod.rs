//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod access_struct;
mod attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use access_struct::{AccessStruct, MemberField};
pub(crate) use attributes::{FieldAttributes, MemberVis, PropertyDecl, TypeAttributes};
