use alloc::string::String;
use core::any::Any;
use core::fmt;

use crate::AccessError;
use crate::accessor::CompiledAccessor;

/// A [`CompiledAccessor`] paired with one root instance.
///
/// Borrows the root mutably for `'a`; the two-argument forms
/// [`get_on`](Self::get_on) and [`set_on`](Self::set_on) work on other
/// instances through the same compiled functions.
///
/// # Examples
///
/// ```
/// use vc_access::{derive::Typed, create_accessor};
///
/// #[derive(Typed)]
/// struct Foo { pub id: i32 }
///
/// let id = create_accessor::<Foo, i32>("|x| x.id").unwrap();
///
/// let mut foo = Foo { id: 1 };
/// let mut bound = id.with_instance(&mut foo);
/// bound.set(2).unwrap();
/// assert_eq!(*bound.get().unwrap(), 2);
///
/// let other = Foo { id: 3 };
/// assert_eq!(*bound.get_on(&other).unwrap(), 3);
/// assert_eq!(foo.id, 2);
/// ```
pub struct BoundAccessor<'a, T, V> {
    accessor: CompiledAccessor<T, V>,
    root: &'a mut T,
}

impl<'a, T: Any, V: Any> BoundAccessor<'a, T, V> {
    #[inline]
    pub(crate) fn new(accessor: CompiledAccessor<T, V>, root: &'a mut T) -> Self {
        Self { accessor, root }
    }

    /// Reads the member from the bound root.
    #[inline]
    pub fn get(&self) -> Result<&V, AccessError> {
        self.accessor.get(self.root)
    }

    #[inline]
    pub fn get_cloned(&self) -> Result<V, AccessError>
    where
        V: Clone,
    {
        self.accessor.get_cloned(self.root)
    }

    /// Writes `value` into the member of the bound root.
    #[inline]
    pub fn set(&mut self, value: V) -> Result<(), AccessError> {
        self.accessor.set(self.root, value)
    }

    /// Reads the member from `other` instead of the bound root.
    #[inline]
    pub fn get_on<'b>(&self, other: &'b T) -> Result<&'b V, AccessError> {
        self.accessor.get(other)
    }

    /// Writes `value` into the member of `other` instead of the bound root.
    #[inline]
    pub fn set_on(&self, other: &mut T, value: V) -> Result<(), AccessError> {
        self.accessor.set(other, value)
    }
}

impl<'a, T, V> BoundAccessor<'a, T, V> {
    #[inline]
    pub fn accessor(&self) -> &CompiledAccessor<T, V> {
        &self.accessor
    }

    #[inline]
    pub fn root(&self) -> &T {
        self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut T {
        self.root
    }

    /// Releases the root borrow.
    #[inline]
    pub fn into_root(self) -> &'a mut T {
        self.root
    }

    #[inline]
    pub fn member_names(&self) -> &[&'static str] {
        self.accessor.member_names()
    }

    #[inline]
    pub fn full_name(&self) -> String {
        self.accessor.full_name()
    }
}

impl<T, V> fmt::Debug for BoundAccessor<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundAccessor")
            .field("accessor", &self.accessor)
            .finish_non_exhaustive()
    }
}
