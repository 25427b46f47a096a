use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::AccessError;
use crate::info::{MemberInfo, WrapperInfo};
use crate::path::MemberDescriptor;

// -----------------------------------------------------------------------------
// Step

/// One member read, followed by the wrappers crossed to reach the next owner.
struct Step {
    member: &'static MemberInfo,
    index: usize,
    unwraps: Box<[&'static WrapperInfo]>,
}

impl Step {
    #[inline]
    fn missing(&self) -> AccessError {
        AccessError::MissingIntermediate {
            member: self.member.name(),
            index: self.index,
        }
    }
}

/// Owner types are checked when compiling, so the erased handles always
/// receive the type they were generated for.
#[cold]
#[inline(never)]
pub(crate) fn mismatched_owner(member: &str) -> ! {
    unreachable!("member `{member}` received a value of another type")
}

// -----------------------------------------------------------------------------
// Chain

/// A sequence of erased member reads, starting at the root.
pub(crate) struct Chain {
    steps: Box<[Step]>,
}

impl Chain {
    /// Builds the chain reading `descriptors`, which must start at the root.
    pub(crate) fn new(descriptors: &[MemberDescriptor]) -> Self {
        let steps = descriptors
            .iter()
            .enumerate()
            .map(|(index, desc)| Step {
                member: desc.info(),
                index,
                unwraps: desc.unwraps().into(),
            })
            .collect();
        Self { steps }
    }

    /// Reads the value at the end of the chain.
    pub(crate) fn read<'a>(&self, root: &'a dyn Any) -> Result<&'a dyn Any, AccessError> {
        let mut value = root;
        for step in &self.steps {
            value = match step.member.handles().read(value) {
                Some(value) => value,
                None => mismatched_owner(step.member.name()),
            };
            for wrapper in &step.unwraps {
                value = wrapper.unwrap(value).ok_or_else(|| step.missing())?;
            }
        }
        Ok(value)
    }

    /// Borrows the value at the end of the chain mutably.
    ///
    /// Every member of the chain must be mutably traversable.
    pub(crate) fn read_mut<'a>(
        &self,
        root: &'a mut dyn Any,
    ) -> Result<&'a mut dyn Any, AccessError> {
        let mut value = root;
        for step in &self.steps {
            value = match step.member.handles().read_mut(value) {
                Some(value) => value,
                None => mismatched_owner(step.member.name()),
            };
            for wrapper in &step.unwraps {
                value = wrapper.unwrap_mut(value).ok_or_else(|| step.missing())?;
            }
        }
        Ok(value)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for step in &self.steps {
            list.entry(&format_args!(
                "{} {}: {}",
                step.member.kind(),
                step.member.name(),
                step.member.value_name()
            ));
            for wrapper in &step.unwraps {
                list.entry(&format_args!(
                    "unwrap {}",
                    wrapper.target().type_name()
                ));
            }
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{
        Accessibility, MemberHandles, NonGenericTypeInfoCell, TypeInfo, Typed,
    };
    use crate::path::PathParser;
    use alloc::string::String;
    use alloc::vec;

    struct Leaf {
        text: String,
    }

    struct Node {
        next: Option<Box<Leaf>>,
    }

    impl Typed for Leaf {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::composite::<Self>(vec![MemberInfo::field::<Self, String>(
                    "text",
                    Accessibility::Public,
                    MemberHandles::<Self, String>::new(|o| &o.text)
                        .with_get_mut(|o| &mut o.text),
                )])
            })
        }
    }

    impl Typed for Node {
        fn type_info() -> &'static TypeInfo {
            static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                TypeInfo::composite::<Self>(vec![MemberInfo::field::<Self, Option<Box<Leaf>>>(
                    "next",
                    Accessibility::Public,
                    MemberHandles::<Self, Option<Box<Leaf>>>::new(|o| &o.next)
                        .with_get_mut(|o| &mut o.next),
                )])
            })
        }
    }

    fn chain() -> Chain {
        let path = PathParser::parse::<Node>("|x| x.next.text").unwrap();
        Chain::new(path.descriptors())
    }

    #[test]
    fn walks_through_wrappers() {
        let chain = chain();
        let mut node = Node {
            next: Some(Box::new(Leaf { text: "a".into() })),
        };
        let text = chain.read(&node).unwrap();
        assert_eq!(text.downcast_ref::<String>().unwrap(), "a");

        chain
            .read_mut(&mut node)
            .unwrap()
            .downcast_mut::<String>()
            .unwrap()
            .push('b');
        assert_eq!(node.next.unwrap().text, "ab");
    }

    #[test]
    fn reports_missing_value() {
        let node = Node { next: None };
        assert_eq!(
            chain().read(&node).unwrap_err(),
            AccessError::MissingIntermediate {
                member: "next",
                index: 0
            }
        );
    }

    #[test]
    fn debug_layout() {
        let layout = alloc::format!("{:?}", chain());
        assert!(layout.starts_with("[field next: "));
        assert!(layout.contains("unwrap alloc::boxed::Box<"));
        assert!(layout.ends_with("field text: alloc::string::String]"));
    }
}
