// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use abi_form::abi::{self, Entry, Kind, StateMutability};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::wasm_bindgen_test as test;

const TOKEN: &[u8] = include_bytes!("abi/token.json");
const GEOMETRY: &[u8] = include_bytes!("abi/geometry.json");
const BARE: &[u8] = include_bytes!("abi/bare.json");

#[test]
fn token() {
    let token = abi::from_slice(TOKEN).unwrap();
    assert_eq!(8, token.len());

    assert!(matches!(token[0], Entry::Constructor(_)));
    assert!(matches!(token[1], Entry::Error(_)));
    assert!(matches!(token[7], Entry::Receive(_)));

    // event Transfer(address indexed from, address indexed to, uint256 value)
    let event = token[2].as_event().unwrap();
    assert_eq!(false, event.anonymous());
    assert_eq!("Transfer", event.name());

    let inputs = event.inputs();
    assert_eq!(3, inputs.len());
    assert_eq!(true, inputs[0].indexed());
    assert_eq!("from", inputs[0].parameter().name());
    assert_eq!(&Kind::address(), inputs[0].parameter().kind());
    assert_eq!(false, inputs[2].indexed());

    //
    // function balanceOf(address account) view
    //
    let func = token[3].as_function().unwrap();
    assert_eq!("balanceOf", func.name());
    assert_eq!(StateMutability::View, func.state_mutability());
    assert!(func.state_mutability().is_read());

    //
    // function transfer(address to, uint256 amount)
    //
    let func = token[4].as_function().unwrap();
    assert_eq!("transfer", func.name());
    assert_eq!(StateMutability::Nonpayable, func.state_mutability());

    let inputs = func.inputs();
    assert_eq!(2, inputs.len());
    assert_eq!("to", inputs[0].name());
    assert_eq!(&Kind::address(), inputs[0].kind());
    assert_eq!("amount", inputs[1].name());
    assert_eq!(&Kind::uint(256).unwrap(), inputs[1].kind());
    assert_eq!("uint256", inputs[1].internal_kind().to_string());

    //
    // function batchTransfer(address[], uint256[], bytes)
    //
    let func = token[5].as_function().unwrap();
    assert_eq!(1, func.inputs()[0].kind().depth());
    assert!(!func.inputs()[0].kind().is_tuple());
    assert_eq!("", func.inputs()[2].name());
}

#[test]
fn geometry() {
    let geometry = abi::from_slice(GEOMETRY).unwrap();
    let functions: Vec<_> = geometry.iter().filter_map(Entry::as_function).collect();
    assert_eq!(5, functions.len());

    let to = &functions[0].inputs()[0];
    assert!(to.kind().is_tuple());
    assert_eq!(0, to.kind().depth());
    assert_eq!("struct Geometry.Point", to.internal_kind().to_string());
    assert_eq!(2, to.components().len());
    assert!(to.malformed().is_none());

    let paths = &functions[2].inputs()[0];
    assert_eq!("tuple[][]", paths.kind().to_string());
    assert_eq!(2, paths.kind().depth());

    let shape = &functions[3].inputs()[0];
    assert_eq!("", shape.components()[1].name());
    assert_eq!("tuple[]", shape.components()[2].kind().to_string());
}

#[test]
fn missing_components() {
    let text = r#"[{
        "type": "function",
        "name": "broken",
        "stateMutability": "nonpayable",
        "inputs": [
            { "internalType": "struct Broken", "name": "b", "type": "tuple" }
        ],
        "outputs": []
    }]"#;

    let entries = abi::from_str(text).unwrap();
    let input = &entries[0].as_function().unwrap().inputs()[0];

    assert!(!input.has_components());
    assert_eq!(Some(input), input.malformed());
}

#[test]
fn unknown_type() {
    let text = r#"[{
        "type": "function",
        "name": "odd",
        "stateMutability": "nonpayable",
        "inputs": [{ "internalType": "uint7x", "name": "a", "type": "uint7x" }],
        "outputs": []
    }]"#;

    abi::from_str(text).unwrap_err();
}

#[test]
fn bare() {
    let bare = abi::from_slice(BARE).unwrap();
    assert_eq!(2, bare.len());

    // function transfer(address to, uint256 amount) returns (bool)
    let func = bare[0].as_function().unwrap();
    let inputs = func.inputs();
    assert_eq!("address", inputs[0].internal_kind().to_string());
    assert_eq!("uint256", inputs[1].internal_kind().to_string());
    assert_eq!("bool", func.outputs()[0].internal_kind().to_string());

    // function schedule(function callback, (int256, int256)[] points)
    let func = bare[1].as_function().unwrap();

    let callback = func.inputs()[0].internal_kind();
    assert_eq!("function (uint256) external returns (uint256)", callback.base());
    assert!(callback.array().is_empty());

    let points = &func.inputs()[1];
    assert_eq!("tuple[]", points.internal_kind().to_string());
    assert_eq!("int256", points.components()[1].internal_kind().to_string());
    assert!(points.malformed().is_none());
}

fn round_trip(bytes: &[u8]) {
    let expected: serde_json::Value = serde_json::from_slice(bytes).unwrap();

    let entries = abi::from_slice(bytes).unwrap();
    let actual = serde_json::to_value(entries).unwrap();

    if expected != actual {
        println!("Expected:");
        println!("{:#}", expected);
        println!();
        println!("Actual:");
        println!("{:#}", actual);
    }

    assert_eq!(expected, actual);
}

#[test]
fn token_to_token() {
    round_trip(TOKEN);
}

#[test]
fn geometry_to_geometry() {
    round_trip(GEOMETRY);
}

#[test]
fn bare_to_bare() {
    round_trip(BARE);
}
