//! Static member metadata that access paths are resolved against.
//!
//! Every type that can appear in a path implements [`Typed`], which returns a
//! lazily built, `'static` [`TypeInfo`]. Its [`TypeShape`] is one of:
//!
//! - [`TypeShape::Leaf`]: a plain value without accessible members
//!   (primitives, strings, collections);
//! - [`TypeShape::Composite`]: a struct whose [`MemberInfo`]s were generated
//!   by [`#[derive(Typed)]`](crate::derive::Typed);
//! - [`TypeShape::Wrapper`]: `Option<T>` or `Box<T>`, crossed transparently
//!   when it sits between two members of a path.
//!
//! # Examples
//!
//! ```
//! use vc_access::{derive::Typed, info::{Typed, MemberKind, Accessibility}};
//!
//! #[derive(Typed)]
//! struct Foo {
//!     pub id: i32,
//!     secret: u8,
//! }
//!
//! let info = Foo::type_info().as_composite().unwrap();
//! assert_eq!(info.member_names(), &["id", "secret"]);
//!
//! let secret = info.member("secret").unwrap();
//! assert_eq!(secret.kind(), MemberKind::Field);
//! assert_eq!(secret.accessibility(), Accessibility::NonPublic);
//! assert!(secret.value_is::<u8>());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod handles;
mod impls;
mod member_info;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use handles::{ErasedHandles, MemberHandles};
pub use member_info::{Accessibility, MemberInfo, MemberKind};
pub use type_info::{CompositeInfo, TypeInfo, TypeShape, Typed, WrapperInfo};
