//! Lambda expressions describing member paths.
//!
//! A path is written like a Rust closure over the root object, either
//! `|x| x.nested.text` or `x => x.nested.text`. The parser accepts a small
//! expression language (literals, calls, indexing, operators, `as` casts) so
//! that a rejected path can report *what* it contains, see [`NodeKind`].
//!
//! Trees can also be built directly:
//!
//! ```
//! use vc_access::expr::{Expr, Lambda, parse_lambda};
//!
//! let built = Lambda::new("x", Expr::param("x").member("nested").member("text"));
//! assert_eq!(parse_lambda("|x| x.nested.text").unwrap(), built);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod lexer;
mod node;
mod parser;
mod spec;

// -----------------------------------------------------------------------------
// Exports

pub use node::{BinaryOp, Expr, Lambda, Literal, NodeKind, UnaryOp};
pub use parser::parse_lambda;
pub use spec::PathSpec;
