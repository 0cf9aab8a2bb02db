//! Canonical text rendering.
//!
//! Two-space indentation, `=` aligned across consecutive attributes and a
//! blank line around every block. An attribute whose value spans several
//! lines closes its alignment group.

use std::fmt::Write as _;

use super::ident::is_identifier;
use super::structure::{Block, Body, Expression, Structure};
use super::value::Value;

const INDENT: &str = "  ";

/// Words that cannot appear as bare object keys without changing meaning.
const RESERVED_KEYS: [&str; 6] = ["for", "if", "in", "null", "true", "false"];

enum Rhs<'a> {
    Expr(&'a Expression),
    Value(&'a Value),
}

impl Rhs<'_> {
    fn is_multiline(&self) -> bool {
        match self {
            Rhs::Expr(expr) => expr.is_multiline(),
            Rhs::Value(value) => value.is_multiline(),
        }
    }

    fn write(&self, out: &mut String, depth: usize) {
        match self {
            Rhs::Expr(expr) => write_expression(out, expr, depth),
            Rhs::Value(value) => write_value(out, value, depth),
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

pub(crate) fn write_body(out: &mut String, body: &Body, depth: usize) {
    let mut pending: Vec<(String, Rhs<'_>)> = Vec::new();
    let mut previous_was_block = false;

    for (index, item) in body.items.iter().enumerate() {
        match item {
            Structure::Attribute(attr) => {
                if previous_was_block {
                    out.push('\n');
                }
                pending.push((attr.key.clone(), Rhs::Expr(&attr.expr)));
                previous_was_block = false;
            }
            Structure::Block(block) => {
                write_aligned(out, &mut pending, depth);
                if index > 0 {
                    out.push('\n');
                }
                write_block(out, block, depth);
                previous_was_block = true;
            }
        }
    }
    write_aligned(out, &mut pending, depth);
}

fn write_block(out: &mut String, block: &Block, depth: usize) {
    push_indent(out, depth);
    out.push_str(&block.ident);
    for label in &block.labels {
        out.push(' ');
        write_quoted(out, label);
    }
    if block.body.is_empty() {
        out.push_str(" {}\n");
        return;
    }
    out.push_str(" {\n");
    write_body(out, &block.body, depth + 1);
    push_indent(out, depth);
    out.push_str("}\n");
}

/// Write `key = value` lines, draining `entries`.
fn write_aligned(out: &mut String, entries: &mut Vec<(String, Rhs<'_>)>, depth: usize) {
    let mut start = 0;
    while start < entries.len() {
        let end = entries[start..]
            .iter()
            .position(|(_, rhs)| rhs.is_multiline())
            .map_or(entries.len(), |offset| start + offset + 1);
        let group = &entries[start..end];
        let width = group
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(0);

        for (key, rhs) in group {
            push_indent(out, depth);
            out.push_str(key);
            for _ in key.chars().count()..width {
                out.push(' ');
            }
            out.push_str(" = ");
            rhs.write(out, depth);
            out.push('\n');
        }
        start = end;
    }
    entries.clear();
}

fn write_expression(out: &mut String, expr: &Expression, depth: usize) {
    match expr {
        Expression::Literal(value) => write_value(out, value, depth),
        Expression::Traversal(traversal) => {
            out.push_str(&traversal.root);
            for attr in &traversal.attrs {
                out.push('.');
                out.push_str(attr);
            }
        }
        Expression::FuncCall(call) => {
            out.push_str(&call.name);
            out.push('(');
            for (i, arg) in call.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expression(out, arg, depth);
            }
            out.push(')');
        }
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_quoted(out, s),
        Value::EmptyList(_) => out.push_str("[]"),
        Value::EmptyMap(_) => out.push_str("{}"),
        Value::List(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(entries) if entries.is_empty() => out.push_str("{}"),
        Value::List(items) if !value.is_multiline() => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item, depth);
            }
            out.push(']');
        }
        Value::List(items) => {
            out.push_str("[\n");
            for item in items {
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(entries) => {
            out.push_str("{\n");
            let mut pending: Vec<(String, Rhs<'_>)> = entries
                .iter()
                .map(|(key, value)| (object_key(key), Rhs::Value(value)))
                .collect();
            write_aligned(out, &mut pending, depth + 1);
            push_indent(out, depth);
            out.push('}');
        }
    }
}

fn object_key(key: &str) -> String {
    if is_identifier(key) && !RESERVED_KEYS.contains(&key) {
        key.to_string()
    } else {
        let mut quoted = String::with_capacity(key.len() + 2);
        write_quoted(&mut quoted, key);
        quoted
    }
}

/// Write `s` as an HCL quoted string literal.
///
/// Template sequences (`${`, `%{`) are escaped so the text is taken literally.
fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::super::{FuncCall, Traversal, ValueType};
    use super::*;
    use serde_json::Number;

    fn quoted(s: &str) -> String {
        let mut out = String::new();
        write_quoted(&mut out, s);
        out
    }

    fn object(entries: &[(&str, Value)]) -> Value {
        Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn quotes_and_escapes_strings() {
        assert_eq!(quoted("plain"), r#""plain""#);
        assert_eq!(quoted(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quoted("a\\b"), r#""a\\b""#);
        assert_eq!(quoted("line\nnext\ttab"), r#""line\nnext\ttab""#);
        assert_eq!(quoted("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn escapes_template_sequences() {
        assert_eq!(quoted("${var.x}"), r#""$${var.x}""#);
        assert_eq!(quoted("%{ if x }"), r#""%%{ if x }""#);
        assert_eq!(quoted("cost $5 at 10%"), r#""cost $5 at 10%""#);
        assert_eq!(quoted("{{ $labels.instance }}"), r#""{{ $labels.instance }}""#);
    }

    #[test]
    fn renders_scalars() {
        let mut out = String::new();
        write_value(&mut out, &Value::Bool(true), 0);
        out.push(' ');
        write_value(&mut out, &Value::Number(Number::from(-3)), 0);
        out.push(' ');
        write_value(&mut out, &Value::Number(Number::from_f64(0.5).unwrap()), 0);
        assert_eq!(out, "true -3 0.5");
    }

    #[test]
    fn renders_empty_sentinels() {
        let mut out = String::new();
        write_value(&mut out, &Value::EmptyMap(ValueType::String), 0);
        write_value(&mut out, &Value::EmptyList(ValueType::String), 0);
        assert_eq!(out, "{}[]");
    }

    #[test]
    fn renders_inline_list() {
        let mut out = String::new();
        let list = Value::List(vec![Value::from("A"), Value::from(2i64)]);
        write_value(&mut out, &list, 0);
        assert_eq!(out, r#"["A", 2]"#);
    }

    #[test]
    fn renders_nested_object_with_alignment() {
        let value = object(&[
            ("refId", Value::from("A")),
            ("intervalMs", Value::from(1000i64)),
            ("datasource", object(&[("uid", Value::from("prom1"))])),
            ("expr", Value::from("up")),
        ]);
        let mut out = String::new();
        write_value(&mut out, &value, 0);
        assert_eq!(
            out,
            "{\n  datasource = {\n    uid = \"prom1\"\n  }\n  expr       = \"up\"\n  intervalMs = 1000\n  refId      = \"A\"\n}"
        );
    }

    #[test]
    fn quotes_keys_that_are_not_bare_identifiers() {
        let value = object(&[
            ("for", Value::from(1i64)),
            ("has space", Value::from(2i64)),
        ]);
        let mut out = String::new();
        write_value(&mut out, &value, 0);
        assert_eq!(out, "{\n  \"for\"       = 1\n  \"has space\" = 2\n}");
    }

    #[test]
    fn renders_multiline_list() {
        let value = Value::List(vec![object(&[("type", Value::from("gt"))])]);
        let mut out = String::new();
        write_value(&mut out, &value, 0);
        assert_eq!(out, "[\n  {\n    type = \"gt\"\n  },\n]");
    }

    #[test]
    fn renders_body_with_blocks_and_traversal() {
        let mut body = Body::new();
        let group = body.append_new_block("resource", ["grafana_rule_group", "alerts"]);
        group.body.set_attribute("org_id", 1i64);
        group.body.set_attribute(
            "folder_uid",
            Traversal::new("data", ["grafana_folder", "team-a", "uid"]),
        );
        let rule = group.body.append_new_block("rule", Vec::<String>::new());
        rule.body.set_attribute(
            "model",
            FuncCall::new(
                "jsonencode",
                vec![Expression::from(Value::EmptyMap(ValueType::String))],
            ),
        );

        assert_eq!(
            body.to_string(),
            "resource \"grafana_rule_group\" \"alerts\" {\n  org_id     = 1\n  folder_uid = data.grafana_folder.team-a.uid\n\n  rule {\n    model = jsonencode({})\n  }\n}\n"
        );
    }

    #[test]
    fn separates_top_level_blocks() {
        let mut body = Body::new();
        body.append_new_block("data", ["grafana_folder", "a"])
            .body
            .set_attribute("title", "a");
        body.append_new_block("data", ["grafana_folder", "b"])
            .body
            .set_attribute("title", "b");

        assert_eq!(
            body.to_string(),
            "data \"grafana_folder\" \"a\" {\n  title = \"a\"\n}\n\ndata \"grafana_folder\" \"b\" {\n  title = \"b\"\n}\n"
        );
    }

    #[test]
    fn multiline_attribute_closes_alignment_group() {
        let mut body = Body::new();
        body.set_attribute("a", 1i64);
        body.set_attribute("labels", object(&[("k", Value::from("v"))]));
        body.set_attribute("longer_key", 2i64);

        assert_eq!(
            body.to_string(),
            "a      = 1\nlabels = {\n  k = \"v\"\n}\nlonger_key = 2\n"
        );
    }

    #[test]
    fn renders_empty_block() {
        let mut body = Body::new();
        body.append_new_block("locals", Vec::<String>::new());
        assert_eq!(body.to_string(), "locals {}\n");
    }
}
