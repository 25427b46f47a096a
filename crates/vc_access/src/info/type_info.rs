use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use crate::hash::NameMap;
use crate::info::MemberInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the member metadata of a type.
///
/// Implemented by [`#[derive(Typed)]`](crate::derive::Typed) for structs, and
/// by this crate for primitives, strings, collections, `Option<T>` and `Box<T>`.
///
/// # Manually Impl
///
/// It is not recommended to implement manually. [`NonGenericTypeInfoCell`]
/// and [`GenericTypeInfoCell`] keep the returned reference `'static`.
///
/// ```
/// use vc_access::info::{
///     Accessibility, MemberHandles, MemberInfo, NonGenericTypeInfoCell, TypeInfo, Typed,
/// };
///
/// struct Point { x: f32 }
///
/// impl Typed for Point {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::composite::<Self>(vec![
///             MemberInfo::field::<Self, f32>(
///                 "x",
///                 Accessibility::Public,
///                 MemberHandles::<Self, f32>::new(|o| &o.x)
///                     .with_get_mut(|o| &mut o.x)
///                     .with_set(|o, v| o.x = v),
///             ),
///         ]))
///     }
/// }
///
/// assert_eq!(Point::type_info().as_composite().unwrap().len(), 1);
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::info::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::info::GenericTypeInfoCell
pub trait Typed: Any {
    /// A static accessor to the type's member metadata.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information of a type, as seen by access paths.
#[derive(Debug)]
pub struct TypeInfo {
    type_id: TypeId,
    type_name: &'static str,
    shape: TypeShape,
}

/// What an access path can do with a value of a type.
#[derive(Debug)]
pub enum TypeShape {
    /// No members.
    Leaf,
    /// Named members, in declaration order.
    Composite(CompositeInfo),
    /// A container crossed transparently between two members.
    Wrapper(WrapperInfo),
}

impl TypeInfo {
    #[inline]
    fn new<T: Any>(shape: TypeShape) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
            shape,
        }
    }

    /// Creates the info of a type without members.
    #[inline]
    pub fn leaf<T: Any>() -> Self {
        Self::new::<T>(TypeShape::Leaf)
    }

    /// Creates the info of a struct from its members.
    ///
    /// The order of members is fixed, depends on the input order.
    #[inline]
    pub fn composite<T: Any>(members: impl IntoIterator<Item = MemberInfo>) -> Self {
        Self::new::<T>(TypeShape::Composite(CompositeInfo::new(
            members.into_iter().collect(),
        )))
    }

    /// Creates the info of a container, see [`WrapperInfo`].
    #[inline]
    pub fn wrapper<T: Any>(wrapper: WrapperInfo) -> Self {
        Self::new::<T>(TypeShape::Wrapper(wrapper))
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn shape(&self) -> &TypeShape {
        &self.shape
    }

    #[inline]
    pub const fn as_composite(&self) -> Option<&CompositeInfo> {
        match &self.shape {
            TypeShape::Composite(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_wrapper(&self) -> Option<&WrapperInfo> {
        match &self.shape {
            TypeShape::Wrapper(info) => Some(info),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// CompositeInfo

/// The members of a struct.
#[derive(Debug)]
pub struct CompositeInfo {
    members: Box<[MemberInfo]>,
    member_names: Box<[&'static str]>,
    indices: NameMap<usize>,
}

impl CompositeInfo {
    fn new(members: Vec<MemberInfo>) -> Self {
        let member_names: Box<[&'static str]> = members.iter().map(MemberInfo::name).collect();
        let indices = member_names
            .iter()
            .enumerate()
            .map(|(index, name)| (*name, index))
            .collect();

        Self {
            members: members.into_boxed_slice(),
            member_names,
            indices,
        }
    }

    /// Returns the [`MemberInfo`] for the given `name`, if present.
    #[inline]
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.get(*self.indices.get(name)?)
    }

    /// Returns the [`MemberInfo`] at the given index, if present.
    #[inline]
    pub fn member_at(&self, index: usize) -> Option<&MemberInfo> {
        self.members.get(index)
    }

    /// Returns the index for the given member `name`, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns an iterator over the members in **declaration order**.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MemberInfo> {
        self.members.iter()
    }

    /// Returns the member names in declaration order.
    #[inline]
    pub fn member_names(&self) -> &[&'static str] {
        &self.member_names
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }
}

// -----------------------------------------------------------------------------
// WrapperInfo

/// A container (`Option<T>`, `Box<T>`) that paths see through.
#[derive(Debug, Clone, Copy)]
pub struct WrapperInfo {
    nullable: bool,
    target: fn() -> &'static TypeInfo,
    unwrap: fn(&dyn Any) -> Option<&dyn Any>,
    unwrap_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
}

impl WrapperInfo {
    /// Creates the info of a wrapper around `T`.
    ///
    /// `unwrap` and `unwrap_mut` return `None` when the wrapper is empty.
    #[inline]
    pub fn new<T: Typed>(
        nullable: bool,
        unwrap: fn(&dyn Any) -> Option<&dyn Any>,
        unwrap_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
    ) -> Self {
        Self {
            nullable,
            target: T::type_info,
            unwrap,
            unwrap_mut,
        }
    }

    /// Whether the wrapper can be empty.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the [`TypeInfo`] of the wrapped type.
    #[inline]
    pub fn target(&self) -> &'static TypeInfo {
        (self.target)()
    }

    #[inline]
    pub fn unwrap<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.unwrap)(value)
    }

    #[inline]
    pub fn unwrap_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.unwrap_mut)(value)
    }
}
