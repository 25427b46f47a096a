use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use super::chain::{Chain, mismatched_owner};
use crate::accessor::{CompiledAccessor, SetStrategy};
use crate::expr::PathSpec;
use crate::info::{Accessibility, MemberInfo, MemberKind, Typed};
use crate::path::{AccessPath, MemberDescriptor, PathParser};
use crate::{AccessError, AccessorError, InaccessibleReason, InvalidPath};

// -----------------------------------------------------------------------------
// Getter

/// The compiled read of a path.
pub(crate) enum Getter<T, V> {
    /// A single member with typed handles.
    Direct(fn(&T) -> &V),
    Chain(Chain),
}

impl<T: Any, V: Any> Getter<T, V> {
    #[inline]
    pub(crate) fn get<'a>(&self, root: &'a T) -> Result<&'a V, AccessError> {
        match self {
            Self::Direct(get) => Ok(get(root)),
            Self::Chain(chain) => {
                let value = chain.read(root)?;
                Ok(downcast_ref(value))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Setter

/// How the terminal member is written once its owner is reached.
pub(crate) enum Assign {
    /// Through the mutable slot of a field.
    Slot(&'static MemberInfo),
    /// Through the setter of a property.
    Setter(&'static MemberInfo),
}

/// The compiled write of a path.
pub(crate) enum Setter<T, V> {
    Direct(fn(&mut T, V)),
    Compound { parents: Chain, assign: Assign },
    Explicit(Arc<dyn Fn(&mut T, V) + Send + Sync>),
}

impl<T: Any, V: Any> Setter<T, V> {
    pub(crate) fn set(&self, root: &mut T, value: V) -> Result<(), AccessError> {
        match self {
            Self::Direct(set) => set(root, value),
            Self::Compound { parents, assign } => {
                let owner = parents.read_mut(root)?;
                match *assign {
                    Assign::Slot(member) => match member.handles().read_mut(owner) {
                        Some(slot) => *downcast_mut::<V>(slot) = value,
                        None => mismatched_owner(member.name()),
                    },
                    Assign::Setter(member) => {
                        let mut slot = Some(value);
                        if member.handles().assign(owner, &mut slot).is_none() {
                            mismatched_owner(member.name());
                        }
                    }
                }
            }
            Self::Explicit(set) => set(root, value),
        }
        Ok(())
    }
}

impl<T, V> Setter<T, V> {
    #[inline]
    pub(crate) fn strategy(&self) -> SetStrategy {
        match self {
            Self::Direct(_) => SetStrategy::Direct,
            Self::Compound { .. } => SetStrategy::Compound,
            Self::Explicit(_) => SetStrategy::Explicit,
        }
    }
}

impl<T, V> fmt::Debug for Setter<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(_) => f.write_str("Direct"),
            Self::Compound { parents, assign } => {
                let (how, member) = match assign {
                    Assign::Slot(member) => ("slot", member),
                    Assign::Setter(member) => ("setter", member),
                };
                f.debug_struct("Compound")
                    .field("parents", parents)
                    .field(how, &member.name())
                    .finish()
            }
            Self::Explicit(_) => f.write_str("Explicit"),
        }
    }
}

#[inline]
fn downcast_ref<V: Any>(value: &dyn Any) -> &V {
    match value.downcast_ref::<V>() {
        Some(value) => value,
        // the terminal value type is checked when compiling
        None => unreachable!("path value is not a `{}`", core::any::type_name::<V>()),
    }
}

#[inline]
fn downcast_mut<V: Any>(value: &mut dyn Any) -> &mut V {
    match value.downcast_mut::<V>() {
        Some(value) => value,
        None => unreachable!("path value is not a `{}`", core::any::type_name::<V>()),
    }
}

// -----------------------------------------------------------------------------
// AccessorCompiler

/// Compiles [`AccessPath`]s into [`CompiledAccessor`]s.
///
/// All validation happens here, once: a compiled accessor can only fail
/// when an `Option` along the path is `None`.
///
/// # Set Strategies
///
/// - a public, writable member of the root is written through its typed
///   setter directly ([`SetStrategy::Direct`]);
/// - nested members, and non-public members when
///   [`allow_non_public_write`](Self::allow_non_public_write) is set, borrow
///   the parent of the terminal member mutably and assign it in place
///   ([`SetStrategy::Compound`]);
/// - a setter supplied by the caller is used as is
///   ([`SetStrategy::Explicit`]).
///
/// # Examples
///
/// ```
/// use vc_access::{AccessorCompiler, AccessorError, InaccessibleReason, derive::Typed};
///
/// #[derive(Typed)]
/// struct Foo { secret: i32 }
///
/// let err = AccessorCompiler::new()
///     .compile_spec::<Foo, i32>("|x| x.secret")
///     .unwrap_err();
/// assert!(matches!(
///     err,
///     AccessorError::InaccessibleMember { reason: InaccessibleReason::NonPublic, .. }
/// ));
///
/// let secret = AccessorCompiler::new()
///     .allow_non_public_write(true)
///     .compile_spec::<Foo, i32>("|x| x.secret")
///     .unwrap();
///
/// let mut foo = Foo { secret: 1 };
/// secret.set(&mut foo, 2).unwrap();
/// assert_eq!(foo.secret, 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessorCompiler {
    allow_non_public_write: bool,
}

impl AccessorCompiler {
    /// Creates a compiler that refuses to write non-public members.
    #[inline]
    pub const fn new() -> Self {
        Self {
            allow_non_public_write: false,
        }
    }

    /// Sets whether members with a non-public setter may be written.
    #[inline]
    pub const fn allow_non_public_write(mut self, allow: bool) -> Self {
        self.allow_non_public_write = allow;
        self
    }

    #[inline]
    pub const fn allows_non_public_write(&self) -> bool {
        self.allow_non_public_write
    }

    /// Parses `spec` against `T`, then compiles it, see [`compile`](Self::compile).
    pub fn compile_spec<T: Typed, V: Any>(
        &self,
        spec: impl PathSpec,
    ) -> Result<CompiledAccessor<T, V>, AccessorError> {
        let path = PathParser::parse::<T>(spec)?;
        self.compile(&path)
    }

    /// Parses `spec` against `T`, then compiles it with an explicit setter,
    /// see [`compile_with_setter`](Self::compile_with_setter).
    pub fn compile_spec_with_setter<T: Typed, V: Any>(
        &self,
        spec: impl PathSpec,
        setter: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Result<CompiledAccessor<T, V>, AccessorError> {
        let path = PathParser::parse::<T>(spec)?;
        self.compile_with_setter(&path, setter)
    }

    /// Compiles the getter and the setter of `path`.
    ///
    /// `path` must be rooted at `T` and end at a member of type `V`.
    pub fn compile<T: Any, V: Any>(
        &self,
        path: &AccessPath,
    ) -> Result<CompiledAccessor<T, V>, AccessorError> {
        check_types::<T, V>(path)?;
        let getter = compile_getter(path);
        let setter = self.compile_setter(path)?;
        Ok(finish(path, getter, setter))
    }

    /// Compiles the getter of `path`, and uses `setter` to write.
    ///
    /// The accessibility of the terminal member is not checked.
    pub fn compile_with_setter<T: Any, V: Any>(
        &self,
        path: &AccessPath,
        setter: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Result<CompiledAccessor<T, V>, AccessorError> {
        check_types::<T, V>(path)?;
        let getter = compile_getter(path);
        Ok(finish(path, getter, Setter::Explicit(Arc::new(setter))))
    }

    fn compile_setter<T: Any, V: Any>(
        &self,
        path: &AccessPath,
    ) -> Result<Setter<T, V>, AccessorError> {
        let (terminal, parents) = path.split_last();
        let info = terminal.info();

        if !info.is_writable() {
            return Err(inaccessible(terminal, InaccessibleReason::ReadOnly));
        }

        let public = info.accessibility() == Accessibility::Public;
        if !public && !self.allow_non_public_write {
            return Err(inaccessible(terminal, InaccessibleReason::NonPublic));
        }

        if path.is_simple()
            && public
            && let Some(set) = info.typed_handles::<T, V>().and_then(|h| h.set)
        {
            return Ok(Setter::Direct(set));
        }

        if let Some(parent) = parents.iter().find(|p| !p.info().is_mutably_traversable()) {
            return Err(inaccessible(
                parent,
                InaccessibleReason::NotMutablyTraversable,
            ));
        }

        if path.is_simple() {
            log::debug!(
                "writing non-public member `{}` of `{}` through the compound path",
                info.name(),
                path.root().type_name(),
            );
        }

        let assign = if info.kind() == MemberKind::Field && info.is_mutably_traversable() {
            Assign::Slot(info)
        } else {
            Assign::Setter(info)
        };

        Ok(Setter::Compound {
            parents: Chain::new(parents),
            assign,
        })
    }
}

fn check_types<T: Any, V: Any>(path: &AccessPath) -> Result<(), InvalidPath> {
    if path.root().type_id() != TypeId::of::<T>() {
        return Err(InvalidPath::RootTypeMismatch {
            expected: core::any::type_name::<T>(),
            found: path.root().type_name(),
        });
    }

    let terminal = path.terminal().info();
    if terminal.value_id() != TypeId::of::<V>() {
        return Err(InvalidPath::ValueTypeMismatch {
            member: terminal.name(),
            expected: core::any::type_name::<V>(),
            found: terminal.value_name(),
        });
    }

    Ok(())
}

fn compile_getter<T: Any, V: Any>(path: &AccessPath) -> Getter<T, V> {
    if path.is_simple()
        && let Some(handles) = path.terminal().info().typed_handles::<T, V>()
    {
        return Getter::Direct(handles.get);
    }
    Getter::Chain(Chain::new(path.descriptors()))
}

#[inline]
fn inaccessible(member: &MemberDescriptor, reason: InaccessibleReason) -> AccessorError {
    AccessorError::InaccessibleMember {
        member: member.name(),
        reason,
    }
}

fn finish<T: Any, V: Any>(
    path: &AccessPath,
    getter: Getter<T, V>,
    setter: Setter<T, V>,
) -> CompiledAccessor<T, V> {
    log::trace!(
        "compiled accessor `{}` of `{}` with {:?} setter",
        path.full_name(),
        path.root().type_name(),
        setter.strategy(),
    );

    crate::cfg::debug! {
        if let Getter::Chain(chain) = &getter {
            log::trace!("getter links of `{}`: {chain:?}", path.full_name());
        }
        log::trace!("setter of `{}`: {setter:?}", path.full_name());
    }

    CompiledAccessor::new(getter, setter, path.member_names().into())
}

// -----------------------------------------------------------------------------
// Simple assigner

/// Returns the name and the typed setter of a public, writable member of `T`.
///
/// Only a single member access is accepted, `|x| x.a.b` fails with
/// [`InvalidPath::NotSimple`].
///
/// # Examples
///
/// ```
/// use vc_access::{derive::Typed, simple_assigner};
///
/// #[derive(Typed)]
/// struct Foo { pub id: i32 }
///
/// let (name, set) = simple_assigner::<Foo, i32>("|x| x.id").unwrap();
/// assert_eq!(name, "id");
///
/// let mut foo = Foo { id: 0 };
/// set(&mut foo, 3);
/// assert_eq!(foo.id, 3);
/// ```
pub fn simple_assigner<T: Typed, V: Any>(
    spec: impl PathSpec,
) -> Result<(&'static str, fn(&mut T, V)), AccessorError> {
    let path = PathParser::parse::<T>(spec)?;
    if !path.is_simple() {
        return Err(InvalidPath::NotSimple(path.full_name()).into());
    }
    check_types::<T, V>(&path)?;

    let terminal = path.terminal();
    if !terminal.is_writable() {
        return Err(inaccessible(terminal, InaccessibleReason::ReadOnly));
    }
    if terminal.accessibility() != Accessibility::Public {
        return Err(inaccessible(terminal, InaccessibleReason::NonPublic));
    }

    match terminal.info().typed_handles::<T, V>().and_then(|h| h.set) {
        Some(set) => Ok((terminal.name(), set)),
        None => Err(inaccessible(terminal, InaccessibleReason::ReadOnly)),
    }
}
