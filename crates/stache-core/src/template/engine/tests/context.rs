//! Context lookup tests

use super::*;
use crate::view::Value;
use std::cell::Cell;
use std::rc::Rc;

fn parent_view() -> Value {
    Value::object([
        ("name", Value::from("parent")),
        ("message", Value::from("hi")),
        ("a", Value::object([("b", "b")])),
    ])
}

fn child_view() -> Value {
    Value::object([
        ("name", Value::from("child")),
        ("c", Value::object([("d", "d")])),
    ])
}

#[test]
fn test_lookup_own_property() {
    let context = Context::new(parent_view());
    assert_eq!(context.lookup("name"), Some(Value::from("parent")));
}

#[test]
fn test_lookup_nested_property() {
    let context = Context::new(parent_view());
    assert_eq!(context.lookup("a.b"), Some(Value::from("b")));
}

#[test]
fn test_push_links_parent() {
    let parent = Context::new(parent_view());
    let child = parent.push(child_view());

    assert_eq!(child.view().get("name"), Some(Value::from("child")));
    let up = child.parent().unwrap();
    assert_eq!(up.view().get("name"), Some(Value::from("parent")));
    assert!(up.parent().is_none());
}

#[test]
fn test_child_lookup_prefers_own_view() {
    let parent = Context::new(parent_view());
    let child = parent.push(child_view());
    assert_eq!(child.lookup("name"), Some(Value::from("child")));
}

#[test]
fn test_child_lookup_falls_back_to_parent() {
    let parent = Context::new(parent_view());
    let child = parent.push(child_view());
    assert_eq!(child.lookup("message"), Some(Value::from("hi")));
    assert_eq!(child.lookup("c.d"), Some(Value::from("d")));
    assert_eq!(child.lookup("a.b"), Some(Value::from("b")));
}

#[test]
fn test_lookup_dot_is_current_view() {
    let parent = Context::new(parent_view());
    let child = parent.push(Value::from("item"));
    assert_eq!(child.lookup("."), Some(Value::from("item")));
}

#[test]
fn test_lookup_missing_name() {
    let context = Context::new(parent_view());
    assert_eq!(context.lookup("missing"), None);
    assert_eq!(context.lookup("a.missing"), None);
    assert_eq!(context.lookup("missing.b"), None);
}

#[test]
fn test_lookup_explicit_null_is_a_hit() {
    let parent = Context::new(Value::object([("x", "outer")]));
    let child = parent.push(Value::object([("x", Value::Null)]));
    assert_eq!(child.lookup("x"), Some(Value::Null));
}

#[test]
fn test_dotted_lookup_reads_primitive_length() {
    let context = Context::new(Value::object([
        ("word", Value::from("héllo")),
        ("list", Value::array([1, 2, 3])),
    ]));
    assert_eq!(context.lookup("word.length"), Some(Value::from(5)));
    assert_eq!(context.lookup("list.length"), Some(Value::from(3)));
}

#[test]
fn test_plain_lookup_ignores_string_properties() {
    let parent = Context::new(Value::object([("length", "from parent")]));
    let child = parent.push(Value::from("abc"));
    assert_eq!(child.lookup("length"), Some(Value::from("from parent")));
}

#[test]
fn test_dotted_lookup_stops_at_null() {
    let context = Context::new(Value::object([("a", Value::Null)]));
    assert_eq!(context.lookup("a.b"), None);
}

#[test]
fn test_dotted_lookup_falls_through_to_parent() {
    let parent = Context::new(Value::object([("a", Value::object([("b", "outer")]))]));
    let child = parent.push(Value::object([("a", Value::object([("c", "inner")]))]));
    assert_eq!(child.lookup("a.b"), Some(Value::from("outer")));
}

#[test]
fn test_leading_dot_is_a_plain_name() {
    let context = Context::new(Value::object([(".x", "odd key")]));
    assert_eq!(context.lookup(".x"), Some(Value::from("odd key")));
}

#[test]
fn test_lookup_invokes_functions_with_frame_view() {
    let view = Value::object([("first", "Ada")]).with(
        "greeting",
        Value::func(|this| {
            let name = this.get("first").unwrap_or_default();
            Value::from(format!("Hello {}", name))
        }),
    );
    let context = Context::new(view);
    assert_eq!(context.lookup("greeting"), Some(Value::from("Hello Ada")));
}

#[test]
fn test_inherited_function_sees_the_looking_up_frame() {
    let root = Context::new(Value::object([(
        "whoami",
        Value::func(|this| this.get("name").unwrap_or_default()),
    )]));
    let child = root.push(Value::object([("name", "child")]));

    assert_eq!(child.lookup("whoami"), Some(Value::from("child")));
    assert_eq!(root.lookup("whoami"), Some(Value::Null));
}

#[test]
fn test_lookup_memoizes_resolution_but_not_calls() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let view = Value::object([(
        "next",
        Value::func(move |_| {
            counter.set(counter.get() + 1);
            Value::from(counter.get())
        }),
    )]);
    let context = Context::new(view);

    assert_eq!(context.lookup("next"), Some(Value::from(1)));
    assert_eq!(context.lookup("next"), Some(Value::from(2)));
    assert_eq!(calls.get(), 2);
}
