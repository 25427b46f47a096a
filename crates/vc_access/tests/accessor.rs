use std::thread;

use vc_access::derive::Typed;
use vc_access::expr::{Expr, Lambda, NodeKind};
use vc_access::path::PathParser;
use vc_access::{AccessError, AccessorError, InaccessibleReason, InvalidPath, SetStrategy};
use vc_access::{AccessorCompiler, create_accessor, create_accessor_with_setter, simple_assigner};

#[derive(Typed, Default)]
#[access(property(
    name = "PrivateGetId",
    ty = i32,
    get = private_get_id,
    set = set_private_get_id,
    set_vis = "non_public",
))]
#[access(property(name = "Label", ty = String, get = label))]
#[access(property(name = "NestedRef", ty = Option<Box<TestClass>>, get = nested_ref))]
struct TestClass {
    #[access(rename = "Id")]
    pub id: i32,
    #[access(rename = "Text")]
    pub text: String,
    #[access(rename = "Nested")]
    pub nested: Option<Box<TestClass>>,
    #[access(rename = "Version", readonly)]
    pub version: u32,
    #[access(rename = "Hidden")]
    hidden: i64,
    #[access(skip)]
    _cache: Vec<u8>,
}

impl TestClass {
    fn private_get_id(&self) -> &i32 {
        &self.id
    }

    fn set_private_get_id(&mut self, value: i32) {
        self.id = value;
    }

    fn label(&self) -> &String {
        &self.text
    }

    fn nested_ref(&self) -> &Option<Box<TestClass>> {
        &self.nested
    }

    fn with_nested(text: &str) -> Self {
        Self {
            nested: Some(Box::new(Self {
                text: text.into(),
                ..Self::default()
            })),
            ..Self::default()
        }
    }
}

#[derive(Typed, Default)]
struct Keywords {
    pub r#type: i32,
    pub größe: u32,
}

// -----------------------------------------------------------------------------
// Names

#[test]
fn member_names() {
    let id = create_accessor::<TestClass, i32>("|x| x.Id").unwrap();
    assert_eq!(id.member_names(), &["Id"]);
    assert_eq!(id.full_name(), "Id");

    let text = create_accessor::<TestClass, String>("|x| x.Nested.Text").unwrap();
    assert_eq!(text.member_names(), &["Nested", "Text"]);
    assert_eq!(text.full_name(), "Nested.Text");

    let deep = create_accessor::<TestClass, i32>("x => x.Nested.Nested.Id").unwrap();
    assert_eq!(deep.full_name(), "Nested.Nested.Id");
}

#[test]
fn raw_and_unicode_names() {
    let mut obj = Keywords::default();

    let ty = create_accessor::<Keywords, i32>("|x| x.type").unwrap();
    assert_eq!(ty.full_name(), "type");
    ty.set(&mut obj, 3).unwrap();
    assert_eq!(obj.r#type, 3);

    let raw = create_accessor::<Keywords, i32>("|x| x.r#type").unwrap();
    assert_eq!(*raw.get(&obj).unwrap(), 3);

    let size = create_accessor::<Keywords, u32>("|x| x.größe").unwrap();
    size.set(&mut obj, 7).unwrap();
    assert_eq!(obj.größe, 7);
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn public_round_trip() {
    let mut obj = TestClass::default();
    let id = create_accessor::<TestClass, i32>("|x| x.Id").unwrap();
    assert_eq!(id.set_strategy(), SetStrategy::Direct);

    id.set(&mut obj, 42).unwrap();
    assert_eq!(*id.get(&obj).unwrap(), 42);
    assert_eq!(obj.id, 42);
}

#[test]
fn nested_round_trip_in_place() {
    let mut obj = TestClass::with_nested("a");
    let text = create_accessor::<TestClass, String>("|x| x.Nested.Text").unwrap();
    assert_eq!(text.set_strategy(), SetStrategy::Compound);

    let before: *const TestClass = &**obj.nested.as_ref().unwrap();
    text.set(&mut obj, "b".into()).unwrap();
    let after: *const TestClass = &**obj.nested.as_ref().unwrap();

    assert_eq!(text.get(&obj).unwrap(), "b");
    assert!(core::ptr::eq(before, after));
}

#[test]
fn missing_intermediate() {
    let mut obj = TestClass::default();
    let text = create_accessor::<TestClass, String>("|x| x.Nested.Text").unwrap();

    let missing = AccessError::MissingIntermediate {
        member: "Nested",
        index: 0,
    };
    assert_eq!(text.set(&mut obj, "hi".into()), Err(missing));
    assert_eq!(text.get(&obj), Err(missing));
    assert!(obj.nested.is_none());

    let mut obj = TestClass::with_nested("a");
    let deep = create_accessor::<TestClass, i32>("|x| x.Nested.Nested.Id").unwrap();
    assert_eq!(
        deep.set(&mut obj, 1),
        Err(AccessError::MissingIntermediate {
            member: "Nested",
            index: 1,
        })
    );
}

// -----------------------------------------------------------------------------
// Accessibility

#[test]
fn non_public_property() {
    let err = create_accessor::<TestClass, i32>("|x| x.PrivateGetId").unwrap_err();
    assert_eq!(
        err,
        AccessorError::InaccessibleMember {
            member: "PrivateGetId",
            reason: InaccessibleReason::NonPublic,
        }
    );

    let accessor = AccessorCompiler::new()
        .allow_non_public_write(true)
        .compile_spec::<TestClass, i32>("|x| x.PrivateGetId")
        .unwrap();
    assert_eq!(accessor.set_strategy(), SetStrategy::Compound);

    let mut obj = TestClass::default();
    accessor.set(&mut obj, 5).unwrap();
    assert_eq!(obj.id, 5);
    assert_eq!(*accessor.get(&obj).unwrap(), 5);
}

#[test]
fn non_public_field() {
    let err = create_accessor::<TestClass, i64>("|x| x.Hidden").unwrap_err();
    assert!(matches!(
        err,
        AccessorError::InaccessibleMember {
            reason: InaccessibleReason::NonPublic,
            ..
        }
    ));

    let hidden = AccessorCompiler::new()
        .allow_non_public_write(true)
        .compile_spec::<TestClass, i64>("|x| x.Hidden")
        .unwrap();

    let mut obj = TestClass::default();
    hidden.set(&mut obj, -3).unwrap();
    assert_eq!(obj.hidden, -3);
}

#[test]
fn fast_path_kept_when_non_public_allowed() {
    let id = AccessorCompiler::new()
        .allow_non_public_write(true)
        .compile_spec::<TestClass, i32>("|x| x.Id")
        .unwrap();
    assert_eq!(id.set_strategy(), SetStrategy::Direct);
}

#[test]
fn read_only_members() {
    let compiler = AccessorCompiler::new().allow_non_public_write(true);

    for (spec, member) in [("|x| x.Version", "Version"), ("|x| x.Label", "Label")] {
        let err = if member == "Label" {
            compiler.compile_spec::<TestClass, String>(spec).unwrap_err()
        } else {
            compiler.compile_spec::<TestClass, u32>(spec).unwrap_err()
        };
        assert_eq!(
            err,
            AccessorError::InaccessibleMember {
                member,
                reason: InaccessibleReason::ReadOnly,
            }
        );
    }
}

#[test]
fn getter_only_intermediates() {
    let id = create_accessor::<TestClass, i32>("|x| x.NestedRef.Id");
    assert_eq!(
        id.unwrap_err(),
        AccessorError::InaccessibleMember {
            member: "NestedRef",
            reason: InaccessibleReason::NotMutablyTraversable,
        }
    );

    // Reading through it is still fine.
    let obj = TestClass::with_nested("a");
    let text = create_accessor_with_setter::<TestClass, String>("|x| x.NestedRef.Text", |x, v| {
        if let Some(nested) = &mut x.nested {
            nested.text = v;
        }
    })
    .unwrap();
    assert_eq!(text.get(&obj).unwrap(), "a");
}

#[test]
fn root_type_mismatch() {
    let path = PathParser::parse::<Keywords>("|x| x.type").unwrap();
    assert_eq!(
        AccessorCompiler::new()
            .compile::<TestClass, i32>(&path)
            .unwrap_err(),
        AccessorError::InvalidPath(InvalidPath::RootTypeMismatch {
            expected: core::any::type_name::<TestClass>(),
            found: core::any::type_name::<Keywords>(),
        })
    );
}

#[test]
fn explicit_setter_skips_checks() {
    let version = create_accessor_with_setter::<TestClass, u32>("|x| x.Version", |x, v| {
        x.version = v + 1;
    })
    .unwrap();
    assert_eq!(version.set_strategy(), SetStrategy::Explicit);

    let mut obj = TestClass::default();
    version.set(&mut obj, 1).unwrap();
    assert_eq!(*version.get(&obj).unwrap(), 2);
}

// -----------------------------------------------------------------------------
// Invalid paths

#[test]
fn computed_bodies_are_rejected() {
    let invalid = |spec: &str| match create_accessor::<TestClass, i32>(spec) {
        Err(AccessorError::InvalidPath(err)) => err,
        other => panic!("expected an invalid path, got {other:?}"),
    };

    assert_eq!(invalid("|x| 42"), InvalidPath::UnsupportedNode(NodeKind::Constant));
    assert_eq!(invalid("|x| x.Id + 1"), InvalidPath::UnsupportedNode(NodeKind::Binary));
    assert_eq!(
        invalid("|x| x.Text.len()"),
        InvalidPath::UnsupportedNode(NodeKind::MethodCall)
    );
    assert_eq!(invalid("|x| x"), InvalidPath::Empty);
    assert!(matches!(invalid("|x| x.Id +"), InvalidPath::Syntax { .. }));
    assert!(matches!(invalid("|x| x.Missing"), InvalidPath::UnknownMember { .. }));
    assert!(matches!(invalid("|x| x.Text"), InvalidPath::ValueTypeMismatch { .. }));
}

#[test]
fn casts_are_transparent() {
    let plain = create_accessor::<TestClass, String>("|x| x.Nested.Text").unwrap();
    let cast =
        create_accessor::<TestClass, String>("|x| (x.Nested as TestClass).Text as String")
            .unwrap();
    assert_eq!(plain.member_names(), cast.member_names());

    let mut obj = TestClass::with_nested("a");
    cast.set(&mut obj, "c".into()).unwrap();
    assert_eq!(plain.get(&obj).unwrap(), "c");
}

#[test]
fn expression_trees() {
    let lambda = Lambda::new("x", Expr::param("x").member("Nested").member("Text"));
    let text = create_accessor::<TestClass, String>(&lambda).unwrap();
    assert_eq!(text.full_name(), "Nested.Text");

    let unbound = Lambda::new("x", Expr::param("y").member("Id"));
    assert_eq!(
        create_accessor::<TestClass, i32>(unbound).unwrap_err(),
        AccessorError::InvalidPath(InvalidPath::UnboundParameter("y".into()))
    );
}

#[test]
fn simple_assigners() {
    let (name, set) = simple_assigner::<TestClass, i32>("|x| x.Id").unwrap();
    assert_eq!(name, "Id");

    let mut obj = TestClass::default();
    set(&mut obj, 9);
    assert_eq!(obj.id, 9);

    assert_eq!(
        simple_assigner::<TestClass, String>("|x| x.Nested.Text").unwrap_err(),
        AccessorError::InvalidPath(InvalidPath::NotSimple("Nested.Text".into()))
    );
}

// -----------------------------------------------------------------------------
// Sharing

#[test]
fn bound_accessors() {
    let text = create_accessor::<TestClass, String>("|x| x.Nested.Text").unwrap();

    let mut obj = TestClass::with_nested("a");
    let mut other = TestClass::with_nested("z");

    let mut bound = text.with_instance(&mut obj);
    bound.set("b".into()).unwrap();
    assert_eq!(bound.get().unwrap(), "b");

    bound.set_on(&mut other, "y".into()).unwrap();
    assert_eq!(bound.get_on(&other).unwrap(), "y");
    assert_eq!(bound.get_cloned().unwrap(), "b");

    assert_eq!(obj.nested.unwrap().text, "b");
}

#[test]
fn shared_across_threads() {
    let id = create_accessor::<TestClass, i32>("|x| x.Nested.Id").unwrap();

    let mut objects: Vec<TestClass> = (0..4).map(|_| TestClass::with_nested("")).collect();
    thread::scope(|scope| {
        for (value, obj) in objects.iter_mut().enumerate() {
            let id = id.clone();
            scope.spawn(move || id.set(obj, value as i32).unwrap());
        }
    });

    for (value, obj) in objects.iter().enumerate() {
        assert_eq!(*id.get(obj).unwrap(), value as i32);
    }
}
