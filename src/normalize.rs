// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns raw form text into call arguments.
//!
//! Composite values are stored as JSON text by their containers, so JSON
//! arrays and objects are unwrapped recursively. A handful of literals are
//! read as booleans. Everything else, including numbers, is passed on as the
//! string that was typed; converting text to ABI values happens at encoding
//! time.
//!
//! The boolean literals include `"0"` and `"1"`, so an integer argument of
//! exactly zero or one, or a string argument of `"true"`, reaches the encoder
//! as a boolean. The normalizer never sees ABI types and cannot tell these
//! apart. [`coerced_literals`] lists the affected slots.

use crate::key::FormKey;
use crate::state::FlatFormState;

use serde_json::Value;

/// Call arguments, in parameter order.
pub type NormalizedArgs = Vec<Value>;

const TRUE_LITERALS: &[&str] = &["true", "1", "0x1", "0x01", "0x0001"];
const FALSE_LITERALS: &[&str] = &["false", "0", "0x0", "0x00", "0x0000"];

fn boolean_literal(text: &str) -> Option<bool> {
    if TRUE_LITERALS.contains(&text) {
        Some(true)
    } else if FALSE_LITERALS.contains(&text) {
        Some(false)
    } else {
        None
    }
}

fn parse_composite(text: &str) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value @ (Value::Array(_) | Value::Object(_))) => Some(value),
        _ => None,
    }
}

/// Normalize one raw form value.
///
/// ## Example
///
/// ```
/// use abi_form::normalize::normalize;
///
/// use serde_json::json;
///
/// assert_eq!(normalize("0x1"), json!(true));
/// assert_eq!(normalize("0x0000"), json!(false));
/// assert_eq!(normalize("hello"), json!("hello"));
/// assert_eq!(normalize("42"), json!("42"));
/// assert_eq!(normalize(r#"{"a":"true"}"#), json!({ "a": true }));
/// ```
pub fn normalize(raw: &str) -> Value {
    if let Some(value) = parse_composite(raw) {
        return normalize_value(value);
    }

    match boolean_literal(raw) {
        Some(b) => Value::Bool(b),
        None => Value::String(raw.to_string()),
    }
}

/// Normalize an already parsed value: strings are normalized as raw text,
/// arrays and objects recursively, and anything else is kept.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::String(text) => normalize(&text),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        Value::Object(members) => Value::Object(
            members
                .into_iter()
                .map(|(k, v)| (k, normalize_value(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Normalize every value of `form`, in insertion order.
///
/// ## Example
///
/// ```
/// use abi_form::abi::{Kind, Parameter};
/// use abi_form::normalize::parse_args;
/// use abi_form::state::FlatFormState;
///
/// use serde_json::json;
///
/// let inputs = [
///     Parameter::scalar("to", Kind::address()),
///     Parameter::scalar("amount", Kind::uint(256).unwrap()),
/// ];
///
/// let mut form = FlatFormState::for_parameter_list("transfer", &inputs);
/// let keys: Vec<_> = form.keys().cloned().collect();
///
/// form.set(keys[0].clone(), "0x1111111111111111111111111111111111111111");
/// form.set(keys[1].clone(), "42");
///
/// assert_eq!(
///     parse_args(&form),
///     [json!("0x1111111111111111111111111111111111111111"), json!("42")],
/// );
/// ```
pub fn parse_args(form: &FlatFormState) -> NormalizedArgs {
    form.values().map(normalize).collect()
}

/// Every string leaf of `form` that [`normalize`] reads as a boolean, other
/// than the words `true` and `false`, with the key of the top level slot it was
/// found under.
pub fn coerced_literals(form: &FlatFormState) -> Vec<(FormKey, String)> {
    let mut found = Vec::new();

    for (key, raw) in form.iter() {
        let mut leaves = Vec::new();
        collect_coerced(raw, &mut leaves);
        found.extend(leaves.into_iter().map(|leaf| (key.clone(), leaf)));
    }

    found
}

fn collect_coerced(raw: &str, found: &mut Vec<String>) {
    match parse_composite(raw) {
        Some(value) => collect_coerced_value(&value, found),
        None if boolean_literal(raw).is_some() && raw != "true" && raw != "false" => {
            found.push(raw.to_string())
        }
        None => (),
    }
}

fn collect_coerced_value(value: &Value, found: &mut Vec<String>) {
    match value {
        Value::String(text) => collect_coerced(text, found),
        Value::Array(items) => items.iter().for_each(|v| collect_coerced_value(v, found)),
        Value::Object(members) => members
            .values()
            .for_each(|v| collect_coerced_value(v, found)),
        _ => (),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::abi::{Kind, Parameter};

    use serde_json::json;

    #[crate::test]
    fn boolean_literals() {
        for literal in TRUE_LITERALS {
            assert_eq!(normalize(literal), json!(true), "{}", literal);
        }

        for literal in FALSE_LITERALS {
            assert_eq!(normalize(literal), json!(false), "{}", literal);
        }
    }

    #[crate::test]
    fn near_literals_are_strings() {
        assert_eq!(normalize("0x2"), json!("0x2"));
        assert_eq!(normalize("TRUE"), json!("TRUE"));
        assert_eq!(normalize("0x00000"), json!("0x00000"));
        assert_eq!(normalize(""), json!(""));
    }

    #[crate::test]
    fn json_scalars_stay_text() {
        assert_eq!(normalize("100"), json!("100"));
        assert_eq!(normalize("null"), json!("null"));
        assert_eq!(normalize(r#""quoted""#), json!(r#""quoted""#));
    }

    #[crate::test]
    fn broken_json_is_text() {
        assert_eq!(normalize(r#"{"a": "#), json!(r#"{"a": "#));
        assert_eq!(normalize("[1, 2"), json!("[1, 2"));
    }

    #[crate::test]
    fn arrays_keep_numbers() {
        assert_eq!(normalize("[1, 2, \"3\"]"), json!([1, 2, "3"]));
    }

    #[crate::test]
    fn big_numbers_keep_precision() {
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let value = normalize(&format!("[{}]", max));
        assert_eq!(
            value.to_string(),
            "[115792089237316195423570985008687907853269984665640564039457584007913129639935]"
        );
    }

    #[crate::test]
    fn nested_json_strings_unwrap() {
        let inner = json!({ "x": "7", "ok": "0x01" }).to_string();
        let outer = json!([inner.clone(), inner]).to_string();

        assert_eq!(
            normalize(&outer),
            json!([{ "x": "7", "ok": true }, { "x": "7", "ok": true }])
        );
    }

    #[crate::test]
    fn object_order_is_kept() {
        let value = normalize(r#"{"z":"a","a":"b","m":"c"}"#);
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();

        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[crate::test]
    fn coerced_literals_are_listed() {
        let inputs = [
            Parameter::scalar("amount", Kind::uint(256).unwrap()),
            Parameter::scalar("flag", "bool".parse().unwrap()),
            Parameter::scalar("ids", "uint8[]".parse().unwrap()),
        ];

        let mut form = FlatFormState::for_parameter_list("f", &inputs);
        let keys: Vec<_> = form.keys().cloned().collect();

        form.set(keys[0].clone(), "1");
        form.set(keys[1].clone(), "true");
        form.set(keys[2].clone(), r#"["0", "5"]"#);

        let coerced = coerced_literals(&form);

        assert_eq!(
            coerced,
            [(keys[0].clone(), "1".to_string()), (keys[2].clone(), "0".to_string())]
        );
    }
}
