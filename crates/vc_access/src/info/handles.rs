use core::any::Any;
use core::fmt;

// -----------------------------------------------------------------------------
// Typed handles

/// The functions that read and write one member of `O` holding a `V`.
///
/// Generated by [`#[derive(Typed)]`](crate::derive::Typed) from non-capturing
/// closures, so every handle is a plain function pointer.
///
/// # Examples
///
/// ```
/// use vc_access::info::MemberHandles;
///
/// struct Foo { id: i32 }
///
/// let handles = MemberHandles::<Foo, i32>::new(|o| &o.id)
///     .with_get_mut(|o| &mut o.id)
///     .with_set(|o, v| o.id = v);
///
/// let mut foo = Foo { id: 1 };
/// (handles.set.unwrap())(&mut foo, 5);
/// assert_eq!(*(handles.get)(&foo), 5);
/// ```
pub struct MemberHandles<O, V> {
    pub get: fn(&O) -> &V,
    pub get_mut: Option<fn(&mut O) -> &mut V>,
    pub set: Option<fn(&mut O, V)>,
}

impl<O, V> MemberHandles<O, V> {
    /// Creates read-only handles.
    #[inline]
    pub const fn new(get: fn(&O) -> &V) -> Self {
        Self {
            get,
            get_mut: None,
            set: None,
        }
    }

    #[inline]
    pub const fn with_get_mut(mut self, get_mut: fn(&mut O) -> &mut V) -> Self {
        self.get_mut = Some(get_mut);
        self
    }

    #[inline]
    pub const fn with_set(mut self, set: fn(&mut O, V)) -> Self {
        self.set = Some(set);
        self
    }
}

impl<O, V> Clone for MemberHandles<O, V> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<O, V> Copy for MemberHandles<O, V> {}

impl<O, V> fmt::Debug for MemberHandles<O, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberHandles")
            .field("owner", &core::any::type_name::<O>())
            .field("value", &core::any::type_name::<V>())
            .field("get_mut", &self.get_mut.is_some())
            .field("set", &self.set.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Erased handles

/// [`MemberHandles`] seen through `dyn Any`, used to walk chains whose
/// intermediate types are only known at runtime.
///
/// Owner and value types are checked when an accessor is compiled, so a
/// `None` returned while walking a compiled chain can only come from the
/// object's state.
pub trait ErasedHandles: Send + Sync + 'static {
    /// Reads the member of `owner`.
    fn read<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any>;

    /// Borrows the member of `owner` mutably, if the member allows it.
    fn read_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any>;

    /// Moves the value out of `slot` (an `Option<V>`) into the member of
    /// `owner` through its setter. Returns `None` if nothing was assigned.
    fn assign(&self, owner: &mut dyn Any, slot: &mut dyn Any) -> Option<()>;

    fn has_get_mut(&self) -> bool;

    fn has_set(&self) -> bool;

    /// The concrete [`MemberHandles`], for typed downcasts.
    fn as_any(&self) -> &dyn Any;
}

impl<O: Any, V: Any> ErasedHandles for MemberHandles<O, V> {
    #[inline]
    fn read<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        let owner = owner.downcast_ref::<O>()?;
        Some((self.get)(owner))
    }

    #[inline]
    fn read_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let get_mut = self.get_mut?;
        let owner = owner.downcast_mut::<O>()?;
        Some(get_mut(owner))
    }

    #[inline]
    fn assign(&self, owner: &mut dyn Any, slot: &mut dyn Any) -> Option<()> {
        let set = self.set?;
        let owner = owner.downcast_mut::<O>()?;
        let value = slot.downcast_mut::<Option<V>>()?.take()?;
        set(owner, value);
        Some(())
    }

    #[inline]
    fn has_get_mut(&self) -> bool {
        self.get_mut.is_some()
    }

    #[inline]
    fn has_set(&self) -> bool {
        self.set.is_some()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo {
        id: i32,
    }

    fn handles() -> MemberHandles<Foo, i32> {
        MemberHandles::<Foo, i32>::new(|o| &o.id)
            .with_get_mut(|o| &mut o.id)
            .with_set(|o, v| o.id = v)
    }

    #[test]
    fn erased_read_and_assign() {
        let handles = handles();
        let erased: &dyn ErasedHandles = &handles;
        let mut foo = Foo { id: 3 };

        let value = erased.read(&foo).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&3));

        let mut slot = Some(9_i32);
        assert_eq!(erased.assign(&mut foo, &mut slot), Some(()));
        assert_eq!(slot, None);
        assert_eq!(foo.id, 9);

        *erased.read_mut(&mut foo).unwrap().downcast_mut::<i32>().unwrap() = 11;
        assert_eq!(foo.id, 11);
    }

    #[test]
    fn erased_rejects_foreign_owner() {
        let handles = handles();
        let erased: &dyn ErasedHandles = &handles;

        assert!(erased.read(&1_u8).is_none());
        let mut slot = Some(1_i32);
        assert!(erased.assign(&mut 1_u8, &mut slot).is_none());
    }

    #[test]
    fn read_only_handles() {
        let handles = MemberHandles::<Foo, i32>::new(|o| &o.id);
        let mut foo = Foo { id: 1 };

        assert!(!handles.has_get_mut());
        assert!(!handles.has_set());
        assert!(handles.read_mut(&mut foo).is_none());
    }
}
