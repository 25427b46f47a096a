use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::InvalidPath;
use crate::expr::{Expr, Lambda, PathSpec};
use crate::info::{TypeInfo, TypeShape, Typed};
use crate::path::{AccessPath, MemberDescriptor};

// -----------------------------------------------------------------------------
// PathParser

/// Decomposes a lambda into the member chain it accesses.
///
/// The body is walked from the outermost node toward the parameter:
///
/// - a member access records its name and continues on its target;
/// - a cast continues on its operand, recording nothing;
/// - the lambda parameter ends the walk;
/// - any other node fails with [`InvalidPath::UnsupportedNode`].
///
/// The names are then resolved root first against the registry, crossing
/// `Option` and `Box` values that sit between two members.
///
/// # Examples
///
/// ```
/// use vc_access::{InvalidPath, derive::Typed, expr::NodeKind, path::PathParser};
///
/// #[derive(Typed)]
/// struct Foo { pub id: i32 }
///
/// let path = PathParser::parse::<Foo>("|x| x.id").unwrap();
/// assert_eq!(path.full_name(), "id");
///
/// let err = PathParser::parse::<Foo>("|x| x.id + 1").unwrap_err();
/// assert_eq!(err, InvalidPath::UnsupportedNode(NodeKind::Binary));
/// ```
pub struct PathParser;

impl PathParser {
    /// Parses `spec` as a member path of `T`.
    #[inline]
    pub fn parse<T: Typed>(spec: impl PathSpec) -> Result<AccessPath, InvalidPath> {
        Self::parse_in(T::type_info(), spec)
    }

    /// Parses `spec` as a member path of the type described by `root`.
    pub fn parse_in(
        root: &'static TypeInfo,
        spec: impl PathSpec,
    ) -> Result<AccessPath, InvalidPath> {
        let lambda = spec.into_lambda()?;
        let names = collect_names(&lambda)?;
        let path = resolve(root, &names)?;

        log::trace!(
            "parsed member path `{}` of `{}`",
            path.full_name(),
            root.type_name()
        );

        Ok(path)
    }
}

/// Returns the member names of `spec`, root first, without resolving them.
///
/// # Examples
///
/// ```
/// let names = vc_access::path::member_names("|x| x.nested.text").unwrap();
/// assert_eq!(names, ["nested", "text"]);
/// ```
pub fn member_names(spec: impl PathSpec) -> Result<Vec<String>, InvalidPath> {
    let lambda = spec.into_lambda()?;
    let names = collect_names(&lambda)?;
    Ok(names.into_iter().map(ToString::to_string).collect())
}

/// Returns the member names of `spec` joined with `.`, without resolving them.
///
/// # Examples
///
/// ```
/// assert_eq!(vc_access::path::full_name("|x| x.nested.text").unwrap(), "nested.text");
/// ```
pub fn full_name(spec: impl PathSpec) -> Result<String, InvalidPath> {
    let lambda = spec.into_lambda()?;
    Ok(collect_names(&lambda)?.join("."))
}

// -----------------------------------------------------------------------------
// Walk

/// Collects member names from the leaf to the parameter, then reverses them.
fn collect_names(lambda: &Lambda) -> Result<Vec<&str>, InvalidPath> {
    let mut names = Vec::new();
    let mut node = lambda.body();

    loop {
        match node {
            Expr::Member { target, name } => {
                names.push(name.as_str());
                node = target;
            }
            Expr::Cast { operand, .. } => node = operand,
            Expr::Parameter(name) if name == lambda.param() => break,
            Expr::Parameter(name) => return Err(InvalidPath::UnboundParameter(name.clone())),
            other => return Err(InvalidPath::UnsupportedNode(other.kind())),
        }
    }

    if names.is_empty() {
        return Err(InvalidPath::Empty);
    }

    names.reverse();
    Ok(names)
}

fn resolve(root: &'static TypeInfo, names: &[&str]) -> Result<AccessPath, InvalidPath> {
    let mut members: Vec<MemberDescriptor> = Vec::with_capacity(names.len());
    let mut owner = root;

    for name in names {
        let composite = loop {
            match owner.shape() {
                TypeShape::Composite(info) => break info,
                // Wrappers are only crossed between two members, never at the root.
                TypeShape::Wrapper(wrapper) if !members.is_empty() => {
                    if let Some(last) = members.last_mut() {
                        last.push_unwrap(wrapper);
                    }
                    owner = wrapper.target();
                }
                _ => {
                    return Err(InvalidPath::NoMembers {
                        owner: owner.type_name(),
                        member: name.to_string(),
                    });
                }
            }
        };

        let Some(info) = composite.member(name) else {
            return Err(InvalidPath::UnknownMember {
                owner: owner.type_name(),
                member: name.to_string(),
            });
        };

        // Hand-written infos may list a member of another type.
        if info.owner_id() != owner.type_id() {
            return Err(InvalidPath::MemberOwnerMismatch {
                owner: owner.type_name(),
                member: info.name(),
            });
        }

        members.push(MemberDescriptor::new(info, owner));
        owner = info.value_info();
    }

    Ok(AccessPath::new(root, members))
}
