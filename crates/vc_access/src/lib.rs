#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub(crate) mod cfg {
    /// Keeps the statements only in debug builds with the `debug` feature.
    macro_rules! debug {
        ($($stmt:tt)*) => {
            #[cfg(all(debug_assertions, feature = "debug"))]
            { $($stmt)* }
        };
    }

    pub(crate) use debug;
}

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_access::...` paths; this alias lets the
// crate's own tests and doctests use the derive on local types.
extern crate self as vc_access;

// no_std layout, but the type info cells need `std::sync`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod error;
mod hash;

pub mod compile;
pub mod expr;
pub mod info;
pub mod path;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use vc_access_derive as derive;

pub use accessor::{BoundAccessor, CompiledAccessor, SetStrategy};
pub use compile::{AccessorCompiler, simple_assigner};
pub use error::{AccessError, AccessorError, InaccessibleReason, InvalidPath};

use expr::PathSpec;
use info::Typed;

/// Parses `spec` against `T` and compiles an accessor for a value of type `V`,
/// with the default policy (non-public members are not writable).
///
/// # Examples
///
/// ```
/// use vc_access::{derive::Typed, create_accessor};
///
/// #[derive(Typed)]
/// struct Foo { pub id: i32 }
///
/// let mut foo = Foo { id: 0 };
/// let id = create_accessor::<Foo, i32>("|x| x.id").unwrap();
///
/// id.set(&mut foo, 42).unwrap();
/// assert_eq!(*id.get(&foo).unwrap(), 42);
/// ```
pub fn create_accessor<T: Typed, V: 'static>(
    spec: impl PathSpec,
) -> Result<CompiledAccessor<T, V>, AccessorError> {
    AccessorCompiler::new().compile_spec(spec)
}

/// Like [`create_accessor`], but writes through `setter` instead of a setter
/// derived from the path.
///
/// The path still defines the getter and the member names. The terminal
/// member's accessibility is not checked.
///
/// # Examples
///
/// ```
/// use vc_access::{derive::Typed, create_accessor_with_setter};
///
/// #[derive(Typed)]
/// struct Foo { pub text: String }
///
/// let mut foo = Foo { text: "abc".into() };
/// let text = create_accessor_with_setter::<Foo, String>(
///     "|x| x.text",
///     |x, val| x.text = val,
/// ).unwrap();
///
/// text.set(&mut foo, "def".into()).unwrap();
/// assert_eq!(foo.text, "def");
/// ```
pub fn create_accessor_with_setter<T: Typed, V: 'static>(
    spec: impl PathSpec,
    setter: impl Fn(&mut T, V) + Send + Sync + 'static,
) -> Result<CompiledAccessor<T, V>, AccessorError> {
    AccessorCompiler::new().compile_spec_with_setter(spec, setter)
}
