//! Partial inclusion tests

use super::helpers::{render_with_config, render_with_partials};
use super::*;
use crate::config::RenderConfig;
use crate::template::partials::from_fn;
use crate::view::Value;
use std::collections::HashMap;

fn partials(entries: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    entries.iter().copied().collect()
}

fn empty() -> Value {
    Value::object(Vec::<(&str, Value)>::new())
}

#[test]
fn test_partial_expands() {
    let result =
        render_with_partials("\"{{>text}}\"", &empty(), &partials(&[("text", "from partial")]));
    assert_eq!(result.unwrap(), "\"from partial\"");
}

#[test]
fn test_missing_partial_is_empty() {
    let result = render_with_partials("\"{{>text}}\"", &empty(), &partials(&[]));
    assert_eq!(result.unwrap(), "\"\"");
}

#[test]
fn test_no_partials_source() {
    let result = render_with_partials("\"{{>text}}\"", &empty(), &());
    assert_eq!(result.unwrap(), "\"\"");
}

#[test]
fn test_partial_uses_current_context() {
    let view = Value::object([("text", "content")]);
    let result = render_with_partials("\"{{>partial}}\"", &view, &partials(&[("partial", "*{{text}}*")]));
    assert_eq!(result.unwrap(), "\"*content*\"");
}

#[test]
fn test_inline_partial_not_indented() {
    let result = render_with_partials(
        "    <div>{{> partial}}</div>",
        &empty(),
        &partials(&[("partial", "This is a partial.")]),
    );
    assert_eq!(result.unwrap(), "    <div>This is a partial.</div>");
}

#[test]
fn test_inline_multiline_partial_continues_indentation() {
    let result = render_with_partials(
        "    <div>{{> partial}}</div>",
        &empty(),
        &partials(&[("partial", "This is a\npartial.")]),
    );
    assert_eq!(result.unwrap(), "    <div>This is a\n         partial.</div>");
}

#[test]
fn test_partial_recursion() {
    let view = Value::object([
        ("content", Value::from("X")),
        (
            "nodes",
            Value::array([Value::object([
                ("content", Value::from("Y")),
                ("nodes", Value::array(Vec::<Value>::new())),
            ])]),
        ),
    ]);
    let result = render_with_partials(
        "{{>node}}",
        &view,
        &partials(&[("node", "{{content}}<{{#nodes}}{{>node}}{{/nodes}}>")]),
    );
    assert_eq!(result.unwrap(), "X<Y<>>");
}

#[test]
fn test_partial_keeps_surrounding_whitespace() {
    let result = render_with_partials("| {{>partial}} |", &empty(), &partials(&[("partial", "\t|\t")]));
    assert_eq!(result.unwrap(), "| \t|\t |");
}

#[test]
fn test_standalone_partial_with_crlf() {
    let result = render_with_partials("|\r\n{{>partial}}\r\n|", &empty(), &partials(&[("partial", ">")]));
    assert_eq!(result.unwrap(), "|\r\n>|");
}

#[test]
fn test_standalone_partial_without_previous_line() {
    let result = render_with_partials("  {{>partial}}\n>", &empty(), &partials(&[("partial", ">\n>")]));
    assert_eq!(result.unwrap(), "  >\n  >>");
}

#[test]
fn test_standalone_partial_without_newline() {
    let result = render_with_partials(">\n  {{>partial}}", &empty(), &partials(&[("partial", ">\n>")]));
    assert_eq!(result.unwrap(), ">\n  >\n  >");
}

#[test]
fn test_standalone_partial_indents_every_line() {
    let view = Value::object([("content", "<\n->")]);
    let result = render_with_partials(
        "\\\n {{>partial}}\n/\n",
        &view,
        &partials(&[("partial", "|\n{{{content}}}\n|\n")]),
    );
    assert_eq!(result.unwrap(), "\\\n |\n <\n->\n |\n/\n");
}

#[test]
fn test_partial_after_other_tag_is_not_reindented() {
    let view = Value::object([("data", "|")]);
    let result =
        render_with_partials("  {{data}}  {{> partial}}\n", &view, &partials(&[("partial", ">\n>")]));
    assert_eq!(result.unwrap(), "  |  >\n>\n");
}

#[test]
fn test_partial_tag_whitespace_ignored() {
    let result = render_with_partials("|{{> partial }}|", &empty(), &partials(&[("partial", "[]")]));
    assert_eq!(result.unwrap(), "|[]|");
}

#[test]
fn test_partial_inherits_lambdas() {
    let view = Value::object([(
        "upper",
        Value::lambda(|_, text, _| Ok(Some(text.to_uppercase()))),
    )]);
    let source = partials(&[("partial", "aA-{{ #upper }}Input{{ /upper }}-Aa")]);

    let plain = render_with_partials("{{> partial }}", &view, &source).unwrap();
    assert_eq!(plain, "aA-INPUT-Aa");

    let indented = render_with_partials("  {{> partial }}", &view, &source).unwrap();
    assert_eq!(indented, "  aA-INPUT-Aa");
}

#[test]
fn test_nested_partials_use_configured_tags() {
    let source = partials(&[
        ("level1", "partial 1\n[[> level2]]"),
        ("level2", "partial 2\n[[> level3]]"),
        ("level3", "partial 3\n[[> level4]]"),
        ("level4", "partial 4\n[[> level5]]"),
        ("level5", "partial 5"),
    ]);
    let config = RenderConfig::from(["[[", "]]"]);
    let result = render_with_config("[[> level1 ]]", &empty(), &source, &config).unwrap();
    assert_eq!(result, "partial 1\npartial 2\npartial 3\npartial 4\npartial 5");
}

#[test]
fn test_partials_ignore_delimiter_change_in_parent() {
    let view = Value::object([("name", "Ada")]);
    let source = partials(&[("p", "{{name}}")]);
    let result = render_with_partials("{{=<% %>=}}<%> p %>", &view, &source).unwrap();
    assert_eq!(result, "Ada");
}

#[test]
fn test_partial_uses_custom_escape() {
    let view = Value::object([("name", "Ampersand &")]);
    let source = partials(&[("partial", "[[ name ]]")]);
    let config = RenderConfig::from(["[[", "]]"]).with_escape(|text| text.replacen('&', "&&", 1));
    let result = render_with_config("[[> partial ]]", &view, &source, &config).unwrap();
    assert_eq!(result, "Ampersand &&");
}

#[test]
fn test_partials_from_closure() {
    let source = from_fn(|name| Some(format!("<{}>", name)));
    let result = render_with_partials("{{>a}}{{>b}}", &empty(), &source).unwrap();
    assert_eq!(result, "<a><b>");
}
