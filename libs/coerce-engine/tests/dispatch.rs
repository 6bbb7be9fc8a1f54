//! End-to-end behavior of the dispatcher over the built-in handlers.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use coerce_api::{
    Class, ConversionRequest, ConvertError, ConverterHandler, ErrorKind, Object, Primitive,
    TypeDesc, Value,
};
use coerce_engine::bootstrap::{build_dispatcher, default_dispatcher};
use coerce_engine::config::EngineConfig;
use coerce_engine::handlers::{ConstructorTable, IdentityHandler, StringHandler};
use coerce_engine::{Dispatcher, HandlerRegistry, TypeCatalog};

fn int() -> TypeDesc {
    TypeDesc::Scalar(Class::Primitive(Primitive::Int))
}

fn string() -> TypeDesc {
    TypeDesc::Scalar(Class::String)
}

fn strings(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| Value::str(*s)).collect())
}

// ═══════════════════════════════════════════════════════════════
//  Scalar conversions
// ═══════════════════════════════════════════════════════════════

#[test]
fn identity_law_returns_value_unchanged() {
    let dispatcher = default_dispatcher();
    let cases = [
        (Value::Int(5), Class::Boxed(Primitive::Int)),
        (Value::Int(5), Class::Primitive(Primitive::Int)),
        (Value::Int(5), Class::Number),
        (Value::str("abc"), Class::String),
        (Value::str("abc"), Class::Object),
        (strings(&["a"]), Class::Collection),
    ];
    for (value, dest) in cases {
        assert!(dispatcher.can_convert_value(&value, &dest), "{value:?} -> {dest}");
        assert_eq!(dispatcher.convert_value(&value, &dest), Ok(value.clone()));
    }
}

#[test]
fn subtypes_of_container_classes_are_returned_unchanged() {
    let config = EngineConfig::parse(
        r#"
        [[types]]
        name = "Circle"
        supertypes = ["Shape"]

        [[types]]
        name = "History"
        supertypes = ["List"]
        "#,
    )
    .unwrap();
    let dispatcher = build_dispatcher(&config, ConstructorTable::new()).unwrap();

    let set = Value::set_from([Value::str("a"), Value::str("b")]);
    let circles = Value::Array {
        element: Class::named("Circle"),
        items: vec![Value::Object(Object::new("Circle"))],
    };
    let history = Value::Object(Object::new("History").with_field("size", Value::Int(0)));
    let cases = [
        (set, Class::Collection),
        (circles, Class::array_of(Class::named("Shape"))),
        (history, Class::List),
    ];
    for (value, dest) in cases {
        assert!(dispatcher.can_convert_value(&value, &dest), "{value:?} -> {dest}");
        assert_eq!(dispatcher.convert_value(&value, &dest), Ok(value.clone()));
    }
}

#[test]
fn every_value_renders_to_string() {
    let dispatcher = default_dispatcher();
    let circle = Value::Object(Object::new("Circle").with_field("r", Value::Double(1.5)));
    for (value, text) in [
        (Value::Long(-7), "-7"),
        (Value::Char('q'), "q"),
        (Value::Bool(false), "false"),
        (strings(&["a", "b"]), "[a, b]"),
        (circle, "Circle{r=1.5}"),
    ] {
        assert!(dispatcher.can_convert_value(&value, &Class::String));
        assert_eq!(dispatcher.convert_value(&value, &Class::String), Ok(Value::str(text)));
    }
}

#[test]
fn capability_does_not_guarantee_success() {
    let dispatcher = default_dispatcher();
    let int = Class::Primitive(Primitive::Int);

    let bad = Value::str("5.1");
    assert!(dispatcher.can_convert_value(&bad, &int));
    let err = dispatcher.convert_value(&bad, &int).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let good = Value::str("5");
    assert_eq!(dispatcher.convert_value(&good, &int), Ok(Value::Int(5)));
    assert_eq!(dispatcher.convert_to::<i32>(&good), Ok(5));
    assert_eq!(dispatcher.convert_to::<f64>(&bad), Ok(5.1));
}

#[test]
fn text_constructor_accepts_any_source_through_its_rendering() {
    let mut table = ConstructorTable::new();
    table.register(Class::named("Path"), Class::String, |arg| {
        Ok(Object::new("Path").with_field("value", arg.clone()).into())
    });
    let dispatcher = build_dispatcher(&EngineConfig::default(), table).unwrap();

    let five = Value::Int(5);
    assert!(dispatcher.can_convert_value(&five, &Class::named("Path")));
    assert_eq!(
        dispatcher.convert_value(&five, &Class::named("Path")),
        Ok(Value::Object(Object::new("Path").with_field("value", Value::str("5"))))
    );
}

#[test]
fn unconvertible_is_absent_untyped_and_mismatch_typed() {
    let dispatcher = default_dispatcher();
    let flag = Value::Bool(true);
    let circle = TypeDesc::Scalar(Class::named("Circle"));

    assert!(!dispatcher.can_convert_value_to_type(&flag, &circle));
    assert_eq!(dispatcher.convert_value_to_type(&flag, &circle), Ok(None));

    let err = dispatcher.convert_value(&flag, &Class::named("Circle")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(dispatcher.convert_to::<i32>(&flag).unwrap_err().kind(), ErrorKind::TypeMismatch);
}

#[test]
fn class_only_queries_mirror_value_queries() {
    let dispatcher = default_dispatcher();
    assert!(dispatcher.can_convert_class(&Class::String, &Class::Primitive(Primitive::Double)));
    assert!(dispatcher.can_convert_class(&Class::Boxed(Primitive::Int), &Class::String));
    assert!(!dispatcher.can_convert_class(&Class::Boxed(Primitive::Bool), &Class::Number));
    assert!(dispatcher.can_convert_class_to_type(&Class::List, &TypeDesc::array_of(int())));

    let request = ConversionRequest::from_class(Class::String, Class::Object);
    assert!(dispatcher.can_convert(&request));
    assert_eq!(
        dispatcher.convert(&request).unwrap_err().kind(),
        ErrorKind::InvalidRequest
    );
}

#[test]
fn null_source_semantics() {
    let dispatcher = default_dispatcher();
    let null = Value::Null;
    assert_eq!(dispatcher.convert_value(&null, &Class::String), Ok(Value::Null));
    assert_eq!(
        dispatcher.convert_value(&null, &Class::Primitive(Primitive::Int)),
        Ok(Value::Int(0))
    );
    assert_eq!(
        dispatcher.convert_value_to_type(&null, &TypeDesc::list_of(string())),
        Ok(Some(Value::Null))
    );
}

// ═══════════════════════════════════════════════════════════════
//  Multi-element conversions
// ═══════════════════════════════════════════════════════════════

#[test]
fn collection_to_int_array_preserves_order() {
    let dispatcher = default_dispatcher();
    let source = strings(&["3", "1", "2"]);
    let dest = TypeDesc::array_of(int());

    assert!(dispatcher.can_convert_value_to_type(&source, &dest));
    let converted = dispatcher.convert_value_to_type(&source, &dest).unwrap();
    assert_eq!(
        converted,
        Some(Value::Array {
            element: Class::Primitive(Primitive::Int),
            items: vec![Value::Int(3), Value::Int(1), Value::Int(2)],
        })
    );
}

#[test]
fn failing_element_aborts_with_its_index() {
    let dispatcher = default_dispatcher();
    let source = strings(&["1", "two", "3"]);
    let err = dispatcher
        .convert_value_to_type(&source, &TypeDesc::array_of(int()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.failing_index(), Some(1));
}

#[test]
fn unconvertible_element_aborts_too() {
    let dispatcher = default_dispatcher();
    let source = Value::List(vec![Value::Int(1), Value::Bool(true)]);
    let dest = TypeDesc::list_of(int());
    // Capability only needs one convertible element.
    assert!(dispatcher.can_convert_value_to_type(&source, &dest));
    let err = dispatcher.convert_value_to_type(&source, &dest).unwrap_err();
    assert_eq!(err.failing_index(), Some(1));
}

#[test]
fn single_value_becomes_one_element_list() {
    let dispatcher = default_dispatcher();
    let source = Value::str("x");
    let dest = TypeDesc::list_of(string());
    assert!(dispatcher.can_convert_value_to_type(&source, &dest));
    assert_eq!(
        dispatcher.convert_value_to_type(&source, &dest),
        Ok(Some(strings(&["x"])))
    );
    assert_eq!(dispatcher.convert_to::<Vec<String>>(&source), Ok(vec!["x".to_string()]));
}

#[test]
fn set_interface_gets_set_implementation() {
    let dispatcher = default_dispatcher();
    let source = strings(&["a", "b", "a"]);
    let converted = dispatcher
        .convert_value_to_type(&source, &TypeDesc::set_of(string()))
        .unwrap();
    assert_eq!(converted, Some(Value::Set(vec![Value::str("a"), Value::str("b")])));

    let typed: BTreeSet<String> = dispatcher.convert_to(&source).unwrap();
    assert_eq!(typed, BTreeSet::from(["a".to_string(), "b".to_string()]));
}

#[test]
fn interface_without_default_is_unconvertible() {
    let dispatcher = default_dispatcher();
    let source = strings(&["a"]);
    let queue: TypeDesc = "queue<String>".parse().unwrap();
    assert!(!dispatcher.can_convert_value_to_type(&source, &queue));
    assert!(!dispatcher.can_convert_class_to_type(&Class::List, &queue));
    let err = dispatcher.convert_value_to_type(&source, &queue).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn nested_containers_convert_recursively() {
    let dispatcher = default_dispatcher();
    let source = Value::List(vec![strings(&["1", "2"]), Value::str("3")]);
    let dest: TypeDesc = "list<int[]>".parse().unwrap();
    let converted = dispatcher.convert_value_to_type(&source, &dest).unwrap();
    let ints = |items: Vec<i32>| Value::Array {
        element: Class::Primitive(Primitive::Int),
        items: items.into_iter().map(Value::Int).collect(),
    };
    assert_eq!(converted, Some(Value::List(vec![ints(vec![1, 2]), ints(vec![3])])));
}

#[test]
fn raw_collection_classes_are_multi_element_destinations() {
    let dispatcher = default_dispatcher();
    let source = Value::Array {
        element: Class::Primitive(Primitive::Int),
        items: vec![Value::Int(1), Value::Int(2)],
    };
    assert_eq!(
        dispatcher.convert_value(&source, &Class::Set),
        Ok(Value::Set(vec![Value::Int(1), Value::Int(2)]))
    );
    assert_eq!(
        dispatcher.convert_value(&source, &Class::array_of(Class::String)),
        Ok(Value::Array {
            element: Class::String,
            items: vec![Value::str("1"), Value::str("2")],
        })
    );
}

// ═══════════════════════════════════════════════════════════════
//  Dispatch order
// ═══════════════════════════════════════════════════════════════

/// Accepts everything and answers with a fixed tag.
struct Tagged {
    tag: &'static str,
    calls: AtomicUsize,
}

impl ConverterHandler for Tagged {
    fn name(&self) -> &str {
        self.tag
    }

    fn can_handle(&self, _request: &ConversionRequest<'_>) -> bool {
        true
    }

    fn convert(&self, _request: &ConversionRequest<'_>) -> Result<Value, ConvertError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(Value::str(self.tag))
    }
}

#[test]
fn first_registered_handler_wins() {
    let first = Arc::new(Tagged { tag: "first", calls: AtomicUsize::new(0) });
    let second = Arc::new(Tagged { tag: "second", calls: AtomicUsize::new(0) });
    let registry = Arc::new(HandlerRegistry::new());
    registry.register(first.clone());
    registry.register(second.clone());
    let dispatcher = Dispatcher::new(registry);

    let value = Value::Int(1);
    for _ in 0..10 {
        assert_eq!(
            dispatcher.convert_value(&value, &Class::String),
            Ok(Value::str("first"))
        );
    }
    assert_eq!(first.calls.load(Ordering::Relaxed), 10);
    assert_eq!(second.calls.load(Ordering::Relaxed), 0);
}

#[test]
fn configured_order_changes_the_winner() {
    // With string ahead of identity, a String destination is rendered even
    // for sources that are already strings; Object destinations are unaffected.
    let config = EngineConfig::parse(r#"handlers = ["string", "identity"]"#).unwrap();
    let dispatcher = build_dispatcher(&config, ConstructorTable::new()).unwrap();
    assert_eq!(
        dispatcher.convert_value(&Value::Null, &Class::String),
        Ok(Value::str("null"))
    );
    assert_eq!(dispatcher.convert_value(&Value::Null, &Class::Object), Ok(Value::Null));
}

#[test]
fn handler_registered_mid_flight_is_seen_by_later_calls() {
    let registry = Arc::new(HandlerRegistry::new());
    registry.register(Arc::new(IdentityHandler::new(Arc::new(TypeCatalog::new()))));
    let dispatcher = Dispatcher::new(registry.clone());

    let value = Value::Int(1);
    assert!(!dispatcher.can_convert_value(&value, &Class::String));
    registry.register(Arc::new(StringHandler));
    assert!(dispatcher.can_convert_value(&value, &Class::String));
}

#[test]
fn concurrent_conversions_share_one_dispatcher() {
    let dispatcher = default_dispatcher();
    std::thread::scope(|scope| {
        for n in 0..8 {
            let dispatcher = &dispatcher;
            scope.spawn(move || {
                let source = Value::List(
                    (0..50)
                        .map(|i| Value::str((n * 100 + i).to_string()))
                        .collect(),
                );
                let converted: Vec<i64> = dispatcher.convert_to(&source).unwrap();
                assert_eq!(converted, (0..50).map(|i| n * 100 + i).collect::<Vec<i64>>());
            });
        }
    });
}
