//! Hash states and the [`TypeIdMap`] used by the registry.
//!
//! - [`FixedHashState`]: `foldhash` with a fixed seed, for member names.
//! - [`NoOpHashState`]: passes a written `u64` through, for [`TypeId`] keys
//!   which are already hashes.

use core::any::TypeId;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};
use hashbrown::hash_map::{Entry, HashMap};

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6A09E667F3BCC908);

/// `foldhash` state with a fixed seed.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// Map keyed by member names.
pub(crate) type NameMap<V> = HashMap<&'static str, V, FixedHashState>;

// -----------------------------------------------------------------------------
// NoOpHashState

/// Keeps the last `u64` written as the hash.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // rotate left so that `write_u32(10)` hashes like `write_u64(10)`.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map with [`TypeId`] as the fixed key type.
pub(crate) struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    #[inline]
    pub(crate) fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns the value for `type_id`, inserting the result of `f` if absent.
    ///
    /// `f` is only called when the key is not present.
    #[inline]
    pub(crate) fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_op_hasher() {
        let mut hasher = NoOpHashState.build_hasher();
        hasher.write_u64(1234);
        assert_eq!(hasher.finish(), 1234);

        let mut hasher = NoOpHashState.build_hasher();
        hasher.write_u32(1234);
        assert_eq!(hasher.finish(), 1234);
    }

    #[test]
    fn fixed_hash_is_stable() {
        assert_eq!(FixedHashState.hash_one("id"), FixedHashState.hash_one("id"));
        assert_ne!(FixedHashState.hash_one("id"), FixedHashState.hash_one("text"));
    }

    #[test]
    fn type_id_map() {
        let mut map = TypeIdMap::<&str>::new();
        assert_eq!(*map.get_or_insert(TypeId::of::<u8>(), || "u8"), "u8");
        assert_eq!(*map.get_or_insert(TypeId::of::<u8>(), || "other"), "u8");
        map.get_or_insert(TypeId::of::<i64>(), || "i64");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&TypeId::of::<i64>()), Some(&"i64"));
        assert_eq!(map.get(&TypeId::of::<u16>()), None);
    }
}
