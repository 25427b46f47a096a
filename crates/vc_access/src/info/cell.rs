//! Containers for static storage of type information.
//!
//! This is usually used to implement [`Typed`](crate::info::Typed).
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`] around one [`TypeInfo`].
//! - [`GenericTypeInfoCell`]: the `static CELL` inside a generic function is
//!   shared by every instantiation, so the infos are kept in a map keyed by
//!   [`TypeId`] behind a [`RwLock`].
//!
//! Member infos refer to the infos of their value types through function
//! pointers, so building a recursive type never re-enters its own cell.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::TypeIdMap;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Container for static storage of non-generic type information.
///
/// ## Example
///
/// ```
/// use vc_access::info::{NonGenericTypeInfoCell, TypeInfo, Typed};
///
/// struct Meters(f64);
///
/// impl Typed for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(TypeInfo::leaf::<Self>)
///     }
/// }
///
/// assert!(core::ptr::eq(Meters::type_info(), Meters::type_info()));
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the info stored in the cell.
    ///
    /// If the cell is empty, the info is generated from the given function.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericTypeInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Container for static storage of type information with generics.
///
/// ## Example
///
/// ```
/// use vc_access::info::{GenericTypeInfoCell, TypeInfo, Typed};
///
/// struct Tagged<T>(T);
///
/// impl<T: 'static> Typed for Tagged<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(TypeInfo::leaf::<Self>)
///     }
/// }
///
/// assert!(<Tagged<u8>>::type_info().is::<Tagged<u8>>());
/// assert!(<Tagged<i64>>::type_info().is::<Tagged<i64>>());
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for the type `G`.
    ///
    /// If there is no entry found, a new one will be generated from the given function.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(
        &self,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            // `f` runs without holding the lock, it may resolve other types.
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &'static TypeInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl Default for GenericTypeInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn generic_cell_per_type() {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();

        let a = CELL.get_or_insert::<Vec<u8>>(TypeInfo::leaf::<Vec<u8>>);
        let b = CELL.get_or_insert::<Vec<u16>>(TypeInfo::leaf::<Vec<u16>>);
        let c = CELL.get_or_insert::<Vec<u8>>(|| unreachable!("already stored"));

        assert!(a.is::<Vec<u8>>());
        assert!(b.is::<Vec<u16>>());
        assert!(core::ptr::eq(a, c));
        assert_eq!(CELL.0.read().unwrap().len(), 2);
    }
}
