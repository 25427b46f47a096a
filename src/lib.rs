#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_access as access;

pub use vc_access::{BoundAccessor, CompiledAccessor};
pub use vc_access::{create_accessor, create_accessor_with_setter};
