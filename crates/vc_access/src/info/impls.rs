//! [`Typed`] for foreign types.
//!
//! - leaves: `bool`, `char`, `i8`-`i128`, `u8`-`u128`, `isize`, `usize`,
//!   `f32`, `f64`, `()`, `String`, `&'static str`, `Duration`,
//!   `Vec<T>`, `VecDeque<T>`, `BTreeMap<K, V>`, `HashMap<K, V, S>`
//! - wrappers: `Option<T>` (nullable), `Box<T>`

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::time::Duration;
use std::collections::HashMap;

use crate::info::{GenericTypeInfoCell, NonGenericTypeInfoCell, TypeInfo, Typed, WrapperInfo};

// -----------------------------------------------------------------------------
// Leaves

macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(TypeInfo::leaf::<Self>)
            }
        }
    )*};
}

impl_leaf!(
    bool, char, (),
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    String, &'static str, Duration,
);

macro_rules! impl_generic_leaf {
    ($($ty:ident < $($param:ident),+ >),* $(,)?) => {$(
        impl<$($param: 'static),+> Typed for $ty<$($param),+> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(TypeInfo::leaf::<Self>)
            }
        }
    )*};
}

impl_generic_leaf!(Vec<T>, VecDeque<T>, BTreeMap<K, V>, HashMap<K, V, S>);

// -----------------------------------------------------------------------------
// Wrappers

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::wrapper::<Self>(WrapperInfo::new::<T>(
                true,
                |value| Some(value.downcast_ref::<Option<T>>()?.as_ref()? as &dyn Any),
                |value| Some(value.downcast_mut::<Option<T>>()?.as_mut()? as &mut dyn Any),
            ))
        })
    }
}

impl<T: Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::wrapper::<Self>(WrapperInfo::new::<T>(
                false,
                |value| Some(&**value.downcast_ref::<Box<T>>()? as &dyn Any),
                |value| Some(&mut **value.downcast_mut::<Box<T>>()? as &mut dyn Any),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::TypeShape;

    #[test]
    fn leaves() {
        assert!(matches!(i32::type_info().shape(), TypeShape::Leaf));
        assert!(matches!(String::type_info().shape(), TypeShape::Leaf));
        assert!(<Vec<u8>>::type_info().is::<Vec<u8>>());
        assert!(<Vec<i8>>::type_info().is::<Vec<i8>>());
        assert!(!core::ptr::eq(
            <Vec<u8>>::type_info(),
            <Vec<i8>>::type_info()
        ));
    }

    #[test]
    fn option_is_nullable() {
        let info = <Option<String>>::type_info().as_wrapper().unwrap();
        assert!(info.is_nullable());
        assert!(info.target().is::<String>());

        let mut some = Some(String::from("a"));
        let inner = info.unwrap(&some).unwrap();
        assert_eq!(inner.downcast_ref::<String>().unwrap(), "a");

        info.unwrap_mut(&mut some)
            .unwrap()
            .downcast_mut::<String>()
            .unwrap()
            .push('b');
        assert_eq!(some.as_deref(), Some("ab"));

        let none: Option<String> = None;
        assert!(info.unwrap(&none).is_none());
    }

    #[test]
    fn box_is_not_nullable() {
        let info = <Box<u32>>::type_info().as_wrapper().unwrap();
        assert!(!info.is_nullable());

        let boxed = Box::new(7_u32);
        let inner = info.unwrap(&boxed).unwrap();
        assert!(core::ptr::eq(
            inner.downcast_ref::<u32>().unwrap(),
            &*boxed
        ));
    }
}
