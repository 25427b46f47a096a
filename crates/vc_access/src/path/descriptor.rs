use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{Accessibility, MemberInfo, MemberKind, TypeInfo, WrapperInfo};

// -----------------------------------------------------------------------------
// MemberDescriptor

/// One resolved step of an [`AccessPath`].
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    info: &'static MemberInfo,
    owner: &'static TypeInfo,
    // Wrappers between this member's value and the owner of the next member.
    unwraps: Vec<&'static WrapperInfo>,
}

impl MemberDescriptor {
    #[inline]
    pub(crate) fn new(info: &'static MemberInfo, owner: &'static TypeInfo) -> Self {
        Self {
            info,
            owner,
            unwraps: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn push_unwrap(&mut self, wrapper: &'static WrapperInfo) {
        self.unwraps.push(wrapper);
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.info.name()
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.info.kind()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.info.is_writable()
    }

    #[inline]
    pub fn accessibility(&self) -> Accessibility {
        self.info.accessibility()
    }

    /// Returns the registry entry this step was resolved to.
    #[inline]
    pub fn info(&self) -> &'static MemberInfo {
        self.info
    }

    /// Returns the type declaring this member.
    #[inline]
    pub fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    /// Returns the wrappers crossed after reading this member, outermost first.
    #[inline]
    pub fn unwraps(&self) -> &[&'static WrapperInfo] {
        &self.unwraps
    }
}

// -----------------------------------------------------------------------------
// AccessPath

/// A member chain resolved against a root type, root first.
///
/// Never empty. Created by [`PathParser`](crate::path::PathParser).
///
/// # Examples
///
/// ```
/// use vc_access::{derive::Typed, path::PathParser};
///
/// #[derive(Typed)]
/// struct Inner { pub text: String }
///
/// #[derive(Typed)]
/// struct Outer { pub nested: Option<Inner> }
///
/// let path = PathParser::parse::<Outer>("|x| x.nested.text").unwrap();
/// assert_eq!(path.member_names(), &["nested", "text"]);
/// assert_eq!(path.full_name(), "nested.text");
/// assert_eq!(path.descriptors()[0].unwraps().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AccessPath {
    root: &'static TypeInfo,
    members: Box<[MemberDescriptor]>,
    names: Box<[&'static str]>,
}

impl AccessPath {
    /// `members` must not be empty.
    pub(crate) fn new(root: &'static TypeInfo, members: Vec<MemberDescriptor>) -> Self {
        debug_assert!(!members.is_empty());
        let names = members.iter().map(MemberDescriptor::name).collect();
        Self {
            root,
            members: members.into_boxed_slice(),
            names,
        }
    }

    /// Returns the type the path starts from.
    #[inline]
    pub fn root(&self) -> &'static TypeInfo {
        self.root
    }

    /// Returns the type of the terminal member's value.
    #[inline]
    pub fn value(&self) -> &'static TypeInfo {
        self.terminal().info().value_info()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the path accesses a member of the root directly.
    #[inline]
    pub fn is_simple(&self) -> bool {
        self.members.len() == 1
    }

    #[inline]
    pub fn descriptors(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Returns the last member of the path.
    #[inline]
    pub fn terminal(&self) -> &MemberDescriptor {
        &self.members[self.members.len() - 1]
    }

    /// Returns the terminal member and the members leading to it.
    #[inline]
    pub fn split_last(&self) -> (&MemberDescriptor, &[MemberDescriptor]) {
        let (parents, last) = self.members.split_at(self.members.len() - 1);
        (&last[0], parents)
    }

    /// Returns the member names, root first.
    #[inline]
    pub fn member_names(&self) -> &[&'static str] {
        &self.names
    }

    /// Returns the member names joined with `.`.
    #[inline]
    pub fn full_name(&self) -> String {
        self.names.join(".")
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.names.iter();
        if let Some(first) = names.next() {
            f.write_str(first)?;
        }
        names.try_for_each(|name| write!(f, ".{name}"))
    }
}
