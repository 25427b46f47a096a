//! Compilation of member paths into accessors.
//!
//! [`AccessorCompiler`] validates an [`AccessPath`](crate::path::AccessPath)
//! against the requested root and value types and the write policy, then
//! binds the member handles of the path into the get and set functions of a
//! [`CompiledAccessor`](crate::CompiledAccessor).

// -----------------------------------------------------------------------------
// Modules

mod chain;
mod compiler;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use compiler::{Getter, Setter};

pub use compiler::{AccessorCompiler, simple_assigner};
