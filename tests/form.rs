// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use abi_form::abi::{Kind, Parameter};
use abi_form::key::{derive_key, ScopePath, Segment};
use abi_form::normalize::{normalize, parse_args};
use abi_form::render::{FunctionForm, Path, View};
use abi_form::state::FlatFormState;
use abi_form::{ContractForm, Error, Locate, Reporter, Warning};

use proptest::prelude::*;

use serde_json::json;

use std::collections::HashSet;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

const TOKEN: &str = include_str!("abi/token.json");
const GEOMETRY: &str = include_str!("abi/geometry.json");
const BARE: &str = include_str!("abi/bare.json");

const ALICE: &str = "0x1111111111111111111111111111111111111111";

#[derive(Debug, Default)]
struct Collect {
    errors: Vec<Locate<Error>>,
    warnings: Vec<Locate<Warning>>,
}

impl Reporter for Collect {
    fn error(&mut self, error: Locate<Error>) {
        self.errors.push(error);
    }

    fn warning(&mut self, warning: Locate<Warning>) {
        self.warnings.push(warning);
    }
}

fn p(steps: &[usize]) -> Path {
    Path::new(steps)
}

fn geometry(name: &str) -> FunctionForm {
    ContractForm::<()>::new()
        .read_str(GEOMETRY)
        .unwrap()
        .form(name)
        .unwrap()
}

#[test]
fn transfer_end_to_end() {
    let mut contract = ContractForm::with_reporter(Collect::default())
        .read_str(TOKEN)
        .unwrap();

    let mut form = contract.form("transfer").unwrap();

    let initial: Vec<_> = form.form().iter().map(|(k, v)| (k.as_str(), v)).collect();
    assert_eq!(
        initial,
        [
            ("transfer_to_address_address", ""),
            ("transfer_amount_uint256_uint256", ""),
        ]
    );

    form.set(&p(&[0]), ALICE).unwrap();
    form.set(&p(&[1]), "42").unwrap();

    assert_eq!(contract.arguments(&form), [json!(ALICE), json!("42")]);
    assert!(contract.reporter().warnings.is_empty());
    assert!(contract.reporter().errors.is_empty());
}

#[test]
fn abi_without_internal_types() {
    let mut contract = ContractForm::<()>::new().read_str(BARE).unwrap();

    let mut form = contract.form("transfer").unwrap();
    let keys: Vec<_> = form.form().keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        [
            "transfer_to_address_address",
            "transfer_amount_uint256_uint256",
        ]
    );

    form.set(&p(&[0]), ALICE).unwrap();
    form.set(&p(&[1]), "42").unwrap();
    assert_eq!(contract.arguments(&form), [json!(ALICE), json!("42")]);

    let mut form = contract.form("schedule").unwrap();
    form.set(&p(&[1, 0, 1]), "-7").unwrap();
    assert_eq!(form.args()[1], json!([{ "x": "", "y": "-7" }]));
}

#[test]
fn flat_round_trip() {
    let contract = ContractForm::<()>::new().read_str(TOKEN).unwrap();
    let transfer = contract.function("transfer").unwrap();

    let mut form = FlatFormState::for_parameter_list("transfer", transfer.inputs());
    let keys: Vec<_> = form.keys().cloned().collect();

    form.set(keys[0].clone(), "0xabc");
    form.set(keys[1].clone(), "100");

    assert_eq!(parse_args(&form), [json!("0xabc"), json!("100")]);
}

#[test]
fn scalar_arrays_are_json_fields() {
    let mut contract = ContractForm::<()>::new().read_str(TOKEN).unwrap();
    let mut form = contract.form("batchTransfer").unwrap();

    form.set(&p(&[0]), format!(r#"["{}"]"#, ALICE)).unwrap();
    form.set(&p(&[1]), r#"["5"]"#).unwrap();
    form.set(&p(&[2]), "0xdeadbeef").unwrap();

    assert_eq!(
        contract.arguments(&form),
        [json!([ALICE]), json!(["5"]), json!("0xdeadbeef")]
    );

    match &form.view()[2] {
        View::Field { key, placeholder, .. } => {
            assert_eq!(key.as_str(), "batchTransfer_input_2__bytes_bytes");
            assert_eq!(placeholder, "bytes");
        }
        other => panic!("not a field: {:?}", other),
    }
}

#[test]
fn bool_argument() {
    let mut contract = ContractForm::with_reporter(Collect::default())
        .read_str(TOKEN)
        .unwrap();

    let mut form = contract.form("setPaused").unwrap();
    form.set(&p(&[0]), "true").unwrap();

    assert_eq!(contract.arguments(&form), [json!(true)]);
    assert!(contract.reporter().warnings.is_empty());
}

#[test]
fn nested_struct() {
    let mut form = geometry("place");

    form.set(&p(&[0, 0]), "triangle").unwrap();
    form.set(&p(&[0, 1, 0]), "-3").unwrap();
    form.set(&p(&[0, 1, 1]), "4").unwrap();
    form.set(&p(&[0, 2, 0, 0]), "0").unwrap();
    form.add_slot(&p(&[0, 2])).unwrap();
    form.set(&p(&[0, 2, 1, 1]), "9").unwrap();
    form.set(&p(&[1]), ALICE).unwrap();

    assert_eq!(
        form.args(),
        [
            json!({
                "label": "triangle",
                "input_1_": { "x": "-3", "y": "4" },
                "corners": [{ "x": false, "y": "" }, { "x": "", "y": "9" }],
            }),
            json!(ALICE),
        ]
    );
}

#[test]
fn nested_struct_keys() {
    let form = geometry("place");

    let keys: Vec<_> = form.form().keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        [
            "place_shape_struct Geometry.Shape_tuple",
            "place_owner_address_address",
        ]
    );
}

#[test]
fn add_remove_slot_restores_form() {
    let mut form = geometry("draw");
    let draw = p(&[0]);

    form.set(&p(&[0, 0, 0]), "1").unwrap();
    form.set(&p(&[0, 0, 1]), "2").unwrap();

    let before = form.form().clone();
    let before_view = form.view();

    form.add_slot(&draw).unwrap();
    form.set(&p(&[0, 1, 0]), "3").unwrap();
    assert_ne!(&before, form.form());

    form.remove_slot(&draw).unwrap();

    assert_eq!(&before, form.form());
    assert_eq!(before_view, form.view());
    assert_eq!(form.slot_count(&draw).unwrap(), 1);
}

#[test]
fn unnamed_tuple_array() {
    let mut form = geometry("area");

    form.set(&p(&[0, 0, 0]), "5").unwrap();

    assert_eq!(
        form.form().keys().next().unwrap().as_str(),
        "area_input_0__struct Geometry.Point[]_tuple[]"
    );
    assert_eq!(form.args(), [json!([{ "x": "5", "y": "" }])]);
}

#[test]
fn array_of_arrays_of_structs() {
    let mut form = geometry("trace");
    let outer = p(&[0]);
    let inner = p(&[0, 0, 0]);

    form.set(&p(&[0, 0, 0, 0, 0]), "1").unwrap();
    form.add_slot(&inner).unwrap();
    form.set(&p(&[0, 0, 0, 1, 0]), "2").unwrap();

    form.add_slot(&outer).unwrap();
    form.set(&p(&[0, 1, 0, 0, 1]), "7").unwrap();

    assert_eq!(
        form.args(),
        [json!([
            [{ "x": true, "y": "" }, { "x": "2", "y": "" }],
            [{ "x": "", "y": "7" }],
        ])]
    );
}

#[test]
fn coerced_numbers_are_warned() {
    let mut contract = ContractForm::with_reporter(Collect::default())
        .read_str(GEOMETRY)
        .unwrap();

    let mut form = contract.form("move").unwrap();
    form.set(&p(&[0, 0]), "0").unwrap();
    form.set(&p(&[0, 1]), "12").unwrap();
    form.set(&p(&[1]), "false").unwrap();

    let args = contract.arguments(&form);
    assert_eq!(args, [json!({ "x": false, "y": "12" }), json!(false)]);

    let warnings = &contract.reporter().warnings;
    assert_eq!(warnings.len(), 1);

    match warnings[0].inner() {
        Warning::BooleanCoercion { key, literal } => {
            assert_eq!(key, "move_to_struct Geometry.Point_tuple");
            assert_eq!(literal, "0");
        }
        other => panic!("unexpected warning: {:?}", other),
    }
}

#[test]
fn normalizer_examples() {
    assert_eq!(normalize("0x1"), json!(true));
    assert_eq!(normalize("0x0000"), json!(false));
    assert_eq!(normalize("hello"), json!("hello"));
    assert_eq!(normalize(r#"{"a":"true"}"#), json!({ "a": true }));
}

#[test]
fn view_serializes() {
    let form = geometry("draw");
    let view = serde_json::to_value(form.view()).unwrap();

    assert_eq!(view[0]["node"], "list");
    assert_eq!(view[0]["label"], "struct Geometry.Point[]");
    assert_eq!(view[0]["expanded"], false);
    assert_eq!(view[0]["canRemove"], true);
    assert_eq!(view[0]["slots"][0][1]["path"], "0.0.1");
    assert_eq!(view[0]["slots"][0][1]["editor"]["editor"], "integer");
    assert_eq!(view[0]["slots"][0][1]["editor"]["signed"], true);
}

#[test]
fn unknown_function_is_reported() {
    let mut contract = ContractForm::with_reporter(Collect::default())
        .read_str(GEOMETRY)
        .unwrap();

    assert!(contract.form("rotate").is_none());
    assert_eq!(contract.reporter().errors.len(), 1);
}

#[test]
fn tuple_scopes_are_isolated() {
    let form = FunctionForm::new(
        ContractForm::<()>::new()
            .read_str(GEOMETRY)
            .unwrap()
            .function("move")
            .unwrap(),
    )
    .unwrap();

    let point = &form.function().inputs()[0];

    let a = ScopePath::function("move").push(Segment::Name("to".into()));
    let b = ScopePath::function("place").push(Segment::Name("to".into()));

    let keys = |scope: &ScopePath| -> HashSet<_> {
        point
            .components()
            .iter()
            .enumerate()
            .map(|(i, c)| derive_key(scope, c, i))
            .collect()
    };

    assert!(keys(&a).is_disjoint(&keys(&b)));
}

fn kinds() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::address()),
        Just(Kind::uint(256).unwrap()),
        Just(Kind::uint(8).unwrap()),
        Just(Kind::string()),
        Just("bytes32".parse::<Kind>().unwrap()),
        Just("bool[]".parse::<Kind>().unwrap()),
    ]
}

fn parameters() -> impl Strategy<Value = Vec<Parameter>> {
    prop::collection::hash_set("[a-z][a-z0-9]{0,7}", 0..12)
        .prop_flat_map(|names| {
            let names: Vec<_> = names.into_iter().collect();
            let len = names.len();
            (Just(names), prop::collection::vec(kinds(), len))
        })
        .prop_map(|(names, kinds)| {
            names
                .into_iter()
                .zip(kinds)
                .map(|(name, kind)| Parameter::scalar(name, kind))
                .collect()
        })
}

proptest! {
    #[test]
    fn one_key_per_parameter(inputs in parameters()) {
        let form = FlatFormState::for_parameter_list("call", &inputs);
        let scope = ScopePath::function("call");

        let expected: Vec<_> = inputs
            .iter()
            .enumerate()
            .map(|(i, p)| derive_key(&scope, p, i))
            .collect();

        let actual: Vec<_> = form.keys().cloned().collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(form.len(), inputs.len());
    }

    #[test]
    fn slots_round_trip(extra in 1usize..5) {
        let mut form = geometry("draw");
        let draw = p(&[0]);

        form.set(&p(&[0, 0, 1]), "8").unwrap();
        let before = form.form().clone();

        for _ in 0..extra {
            form.add_slot(&draw).unwrap();
        }

        prop_assert_eq!(form.slot_count(&draw).unwrap(), extra + 1);

        for _ in 0..extra {
            form.remove_slot(&draw).unwrap();
        }

        prop_assert_eq!(&before, form.form());
    }
}
