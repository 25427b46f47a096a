use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::AccessError;
use crate::accessor::{BoundAccessor, SetStrategy};
use crate::compile::{Getter, Setter};

// -----------------------------------------------------------------------------
// CompiledAccessor

/// A compiled get/set pair for one member path of `T`, holding a `V`.
///
/// Created by [`AccessorCompiler`](crate::AccessorCompiler) or
/// [`create_accessor`](crate::create_accessor). Immutable, cloning shares the
/// compiled functions.
///
/// Invocations neither parse nor allocate. They only fail when an `Option`
/// between two members of the path is `None`.
///
/// # Examples
///
/// ```
/// use vc_access::{AccessError, derive::Typed, create_accessor};
///
/// #[derive(Typed)]
/// struct Inner { pub text: String }
///
/// #[derive(Typed)]
/// struct Outer { pub nested: Option<Inner> }
///
/// let text = create_accessor::<Outer, String>("|x| x.nested.text").unwrap();
/// assert_eq!(text.member_names(), &["nested", "text"]);
///
/// let mut outer = Outer { nested: Some(Inner { text: "a".into() }) };
/// text.set(&mut outer, "b".into()).unwrap();
/// assert_eq!(text.get(&outer).unwrap(), "b");
///
/// let mut empty = Outer { nested: None };
/// assert_eq!(
///     text.set(&mut empty, "c".into()),
///     Err(AccessError::MissingIntermediate { member: "nested", index: 0 }),
/// );
/// ```
pub struct CompiledAccessor<T, V> {
    inner: Arc<Inner<T, V>>,
}

struct Inner<T, V> {
    getter: Getter<T, V>,
    setter: Setter<T, V>,
    names: Box<[&'static str]>,
}

impl<T: Any, V: Any> CompiledAccessor<T, V> {
    #[inline]
    pub(crate) fn new(
        getter: Getter<T, V>,
        setter: Setter<T, V>,
        names: Box<[&'static str]>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                getter,
                setter,
                names,
            }),
        }
    }

    /// Reads the member from `root`.
    #[inline]
    pub fn get<'a>(&self, root: &'a T) -> Result<&'a V, AccessError> {
        self.inner.getter.get(root)
    }

    /// Reads a clone of the member from `root`.
    #[inline]
    pub fn get_cloned(&self, root: &T) -> Result<V, AccessError>
    where
        V: Clone,
    {
        self.get(root).cloned()
    }

    /// Writes `value` into the member of `root`, in place.
    ///
    /// Nothing is written if an error is returned.
    #[inline]
    pub fn set(&self, root: &mut T, value: V) -> Result<(), AccessError> {
        self.inner.setter.set(root, value)
    }

    /// Pairs this accessor with `root`.
    #[inline]
    pub fn with_instance<'a>(&self, root: &'a mut T) -> BoundAccessor<'a, T, V> {
        BoundAccessor::new(self.clone(), root)
    }
}

impl<T, V> CompiledAccessor<T, V> {
    /// Returns the member names of the path, root first.
    #[inline]
    pub fn member_names(&self) -> &[&'static str] {
        &self.inner.names
    }

    /// Returns the member names of the path joined with `.`.
    #[inline]
    pub fn full_name(&self) -> String {
        self.inner.names.join(".")
    }

    /// Returns how [`set`](Self::set) writes the member.
    #[inline]
    pub fn set_strategy(&self) -> SetStrategy {
        self.inner.setter.strategy()
    }

    /// Whether both accessors share the same compiled functions.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }
}

impl<T, V> Clone for CompiledAccessor<T, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, V> fmt::Debug for CompiledAccessor<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledAccessor")
            .field("root", &core::any::type_name::<T>())
            .field("value", &core::any::type_name::<V>())
            .field("path", &self.full_name())
            .field("set", &self.set_strategy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Typed;
    use crate::{AccessorCompiler, create_accessor, create_accessor_with_setter};
    use alloc::format;

    #[derive(Typed)]
    struct Foo {
        pub id: i32,
        pub name: String,
        count: u32,
    }

    fn foo() -> Foo {
        Foo {
            id: 1,
            name: "foo".into(),
            count: 0,
        }
    }

    #[test]
    fn direct_round_trip() {
        let id = create_accessor::<Foo, i32>("|x| x.id").unwrap();
        assert_eq!(id.set_strategy(), SetStrategy::Direct);
        assert_eq!(id.full_name(), "id");

        let mut foo = foo();
        id.set(&mut foo, 42).unwrap();
        assert_eq!(*id.get(&foo).unwrap(), 42);
        assert_eq!(foo.id, 42);
    }

    #[test]
    fn clones_share_functions() {
        let name = create_accessor::<Foo, String>("|x| x.name").unwrap();
        let copy = name.clone();
        assert!(CompiledAccessor::ptr_eq(&name, &copy));

        let other = create_accessor::<Foo, String>("|x| x.name").unwrap();
        assert!(!CompiledAccessor::ptr_eq(&name, &other));

        let foo = foo();
        assert_eq!(copy.get_cloned(&foo).unwrap(), "foo");
    }

    #[test]
    fn non_public_fallback() {
        let count = AccessorCompiler::new()
            .allow_non_public_write(true)
            .compile_spec::<Foo, u32>("|x| x.count")
            .unwrap();
        assert_eq!(count.set_strategy(), SetStrategy::Compound);

        let mut foo = foo();
        count.set(&mut foo, 7).unwrap();
        assert_eq!(foo.count, 7);
    }

    #[test]
    fn explicit_setter() {
        let count =
            create_accessor_with_setter::<Foo, u32>("|x| x.count", |x, v| x.count = v * 2)
                .unwrap();
        assert_eq!(count.set_strategy(), SetStrategy::Explicit);

        let mut foo = foo();
        count.set(&mut foo, 2).unwrap();
        assert_eq!(*count.get(&foo).unwrap(), 4);
    }

    #[test]
    fn send_sync_debug() {
        fn assert_send_sync<X: Send + Sync>(_: &X) {}

        let id = create_accessor::<Foo, i32>("|x| x.id").unwrap();
        assert_send_sync(&id);

        let debug = format!("{id:?}");
        assert!(debug.contains("path: \"id\""));
        assert!(debug.contains("set: Direct"));
    }
}
