use alloc::string::String;

use thiserror::Error;

use crate::expr::NodeKind;

// -----------------------------------------------------------------------------
// Path errors

/// The path specification can not describe a member chain of the root type.
///
/// Raised while parsing or compiling, never by a compiled accessor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidPath {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("unsupported {0} node in member path")]
    UnsupportedNode(NodeKind),

    #[error("`{0}` is not the path's root parameter")]
    UnboundParameter(String),

    #[error("the path does not access any member")]
    Empty,

    #[error("`{owner}` has no member named `{member}`")]
    UnknownMember {
        owner: &'static str,
        member: String,
    },

    #[error("`{owner}` has no members, can not access `{member}`")]
    NoMembers {
        owner: &'static str,
        member: String,
    },

    #[error("member `{member}` is listed by `{owner}` but belongs to another type")]
    MemberOwnerMismatch {
        owner: &'static str,
        member: &'static str,
    },

    #[error("the path is rooted at `{found}`, expected `{expected}`")]
    RootTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("member `{member}` has type `{found}`, expected `{expected}`")]
    ValueTypeMismatch {
        member: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected a single member access, found `{0}`")]
    NotSimple(String),
}

// -----------------------------------------------------------------------------
// Compile errors

/// Why the terminal member of a path can not be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InaccessibleReason {
    /// The member has no setter at all.
    ReadOnly,
    /// The setter is not public and non-public writes were not allowed.
    NonPublic,
    /// A member before the terminal one only offers shared access.
    NotMutablyTraversable,
}

impl core::fmt::Display for InaccessibleReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::ReadOnly => "it has no setter",
            Self::NonPublic => "its setter is not public",
            Self::NotMutablyTraversable => "it can not be borrowed mutably",
        })
    }
}

/// An error returned when an accessor can not be compiled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessorError {
    #[error(transparent)]
    InvalidPath(#[from] InvalidPath),

    #[error("member `{member}` is not accessible for writing: {reason}")]
    InaccessibleMember {
        member: &'static str,
        reason: InaccessibleReason,
    },
}

// -----------------------------------------------------------------------------
// Invocation errors

/// An error returned by a compiled accessor at invocation time.
///
/// Only the state of the target object can cause it, the path itself has
/// been validated when compiling.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    /// The member at position `index` of the path holds no value.
    #[error("member `{member}` (position {index} in the path) holds no value")]
    MissingIntermediate { member: &'static str, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        let err = AccessorError::from(InvalidPath::UnsupportedNode(NodeKind::Constant));
        assert_eq!(err.to_string(), "unsupported constant node in member path");

        let err = AccessorError::InaccessibleMember {
            member: "id",
            reason: InaccessibleReason::NonPublic,
        };
        assert_eq!(
            err.to_string(),
            "member `id` is not accessible for writing: its setter is not public"
        );

        let err = InvalidPath::MemberOwnerMismatch {
            owner: "Outer",
            member: "text",
        };
        assert_eq!(
            err.to_string(),
            "member `text` is listed by `Outer` but belongs to another type"
        );

        let err = AccessError::MissingIntermediate {
            member: "nested",
            index: 0,
        };
        assert_eq!(
            err.to_string(),
            "member `nested` (position 0 in the path) holds no value"
        );
    }
}
