use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{ErasedHandles, MemberHandles, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// Kind & accessibility

/// How a member is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A struct field, read and written in place.
    Field,
    /// A value exposed through accessor methods.
    Property,
}

/// Who may write a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    NonPublic,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Field => "field",
            Self::Property => "property",
        })
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::NonPublic => "non-public",
        })
    }
}

// -----------------------------------------------------------------------------
// MemberInfo

/// Information for a named member of a composite type.
///
/// The accessibility describes the member's *setter*: reading is always
/// allowed, since the handles were generated next to the type.
///
/// # Examples
///
/// ```
/// use vc_access::info::{Accessibility, MemberHandles, MemberInfo, MemberKind};
///
/// struct Foo { id: i32 }
///
/// let info = MemberInfo::field::<Foo, i32>(
///     "id",
///     Accessibility::Public,
///     MemberHandles::<Foo, i32>::new(|o| &o.id)
///         .with_get_mut(|o| &mut o.id)
///         .with_set(|o, v| o.id = v),
/// );
///
/// assert_eq!(info.kind(), MemberKind::Field);
/// assert!(info.is_writable());
/// assert!(info.value_is::<i32>());
/// ```
#[derive(Clone)]
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
    accessibility: Accessibility,
    owner_id: TypeId,
    value_id: TypeId,
    value_name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    value_info: fn() -> &'static TypeInfo,
    handles: Arc<dyn ErasedHandles>,
}

impl MemberInfo {
    fn new<O: Any, V: Typed>(
        name: &'static str,
        kind: MemberKind,
        accessibility: Accessibility,
        handles: MemberHandles<O, V>,
    ) -> Self {
        Self {
            name,
            kind,
            accessibility,
            owner_id: TypeId::of::<O>(),
            value_id: TypeId::of::<V>(),
            value_name: core::any::type_name::<V>(),
            value_info: V::type_info,
            handles: Arc::new(handles),
        }
    }

    /// Creates the info of a field `name` of `O` holding a `V`.
    ///
    /// A field without a setter handle is read-only.
    #[inline]
    pub fn field<O: Any, V: Typed>(
        name: &'static str,
        accessibility: Accessibility,
        handles: MemberHandles<O, V>,
    ) -> Self {
        Self::new(name, MemberKind::Field, accessibility, handles)
    }

    /// Creates the info of a property `name` of `O` exposing a `V`.
    ///
    /// `accessibility` is the accessibility of the property's setter.
    #[inline]
    pub fn property<O: Any, V: Typed>(
        name: &'static str,
        accessibility: Accessibility,
        handles: MemberHandles<O, V>,
    ) -> Self {
        Self::new(name, MemberKind::Property, accessibility, handles)
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub const fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    /// Whether the member has a setter, regardless of its accessibility.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.handles.has_set()
    }

    /// Whether the member can be borrowed mutably to reach deeper members.
    #[inline]
    pub fn is_mutably_traversable(&self) -> bool {
        self.handles.has_get_mut()
    }

    /// Returns the `TypeId` of the type declaring this member.
    #[inline]
    pub const fn owner_id(&self) -> TypeId {
        self.owner_id
    }

    /// Returns the `TypeId` of the member's value.
    #[inline]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    /// Check if the given type matches the member's value type.
    #[inline]
    pub fn value_is<T: Any>(&self) -> bool {
        self.value_id == TypeId::of::<T>()
    }

    #[inline]
    pub const fn value_name(&self) -> &'static str {
        self.value_name
    }

    /// Returns the [`TypeInfo`] of the member's value.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    #[inline]
    pub fn handles(&self) -> &dyn ErasedHandles {
        &*self.handles
    }

    /// Returns the typed handles if this member belongs to `O` and holds a `V`.
    #[inline]
    pub fn typed_handles<O: Any, V: Any>(&self) -> Option<&MemberHandles<O, V>> {
        self.handles.as_any().downcast_ref()
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("accessibility", &self.accessibility)
            .field("value", &self.value_name)
            .field("writable", &self.is_writable())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo {
        id: i32,
    }

    impl Foo {
        fn id(&self) -> &i32 {
            &self.id
        }
    }

    #[test]
    fn property_without_setter() {
        let info = MemberInfo::property::<Foo, i32>(
            "Id",
            Accessibility::Public,
            MemberHandles::new(Foo::id),
        );

        assert_eq!(info.kind(), MemberKind::Property);
        assert!(!info.is_writable());
        assert!(!info.is_mutably_traversable());
        assert!(info.typed_handles::<Foo, i32>().is_some());
        assert!(info.typed_handles::<Foo, u32>().is_none());
        assert_eq!(info.owner_id(), TypeId::of::<Foo>());
        assert!(info.value_info().as_composite().is_none());
    }
}
