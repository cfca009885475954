// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::render::{FunctionForm, LookupTicket, Path};
use crate::{Error, Locate, Warning};

use js_sys::{Array, Function};

use wasm_bindgen::prelude::*;

#[derive(Debug, Default)]
struct Reporter {
    error: Option<Function>,
    warning: Option<Function>,
}

impl crate::Reporter for Reporter {
    fn error(&mut self, error: Locate<Error>) {
        if let Some(ref mut handler) = self.error.as_mut() {
            handler
                .apply(
                    &JsValue::NULL,
                    &Array::of1(&JsValue::from_str(&error.inner().to_string())),
                )
                .ok();
        }
    }

    fn warning(&mut self, warn: Locate<Warning>) {
        if let Some(ref mut handler) = self.warning.as_mut() {
            handler
                .apply(
                    &JsValue::NULL,
                    &Array::of1(&JsValue::from_str(&warn.inner().to_string())),
                )
                .ok();
        }
    }
}

fn js_error<E: ToString>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn path(text: &str) -> Result<Path, JsValue> {
    text.parse().map_err(js_error)
}

#[wasm_bindgen]
pub struct Contract(crate::ContractForm<Reporter>);

#[wasm_bindgen]
impl Contract {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self(crate::ContractForm::new())
    }

    pub fn error(mut self, handler: Function) -> Self {
        self.0.reporter_mut().error = Some(handler);
        self
    }

    pub fn warning(mut self, handler: Function) -> Self {
        self.0.reporter_mut().warning = Some(handler);
        self
    }

    pub fn read_str(self, text: &str) -> Option<Contract> {
        self.0.read_str(text).map(Self)
    }

    /// Names of every function, in ABI order.
    pub fn functions(&self) -> Array {
        self.0
            .functions()
            .iter()
            .map(|f| JsValue::from_str(f.name()))
            .collect()
    }

    pub fn form(&mut self, name: &str) -> Option<Form> {
        self.0.form(name).map(Form)
    }

    /// Normalized arguments of `form`, as JSON.
    pub fn arguments(&mut self, form: &Form) -> Result<String, JsValue> {
        serde_json::to_string(&self.0.arguments(&form.0)).map_err(js_error)
    }
}

#[wasm_bindgen]
pub struct Form(FunctionForm);

#[wasm_bindgen]
impl Form {
    pub fn set(&mut self, at: &str, value: &str) -> Result<(), JsValue> {
        self.0.set(&path(at)?, value).map_err(js_error)
    }

    pub fn add_slot(&mut self, at: &str) -> Result<(), JsValue> {
        self.0.add_slot(&path(at)?).map_err(js_error)
    }

    pub fn remove_slot(&mut self, at: &str) -> Result<(), JsValue> {
        self.0.remove_slot(&path(at)?).map_err(js_error)
    }

    pub fn toggle(&mut self, at: &str) -> Result<(), JsValue> {
        self.0.toggle(&path(at)?).map_err(js_error)
    }

    pub fn begin_lookup(&mut self, at: &str) -> Result<Option<Ticket>, JsValue> {
        let ticket = self.0.begin_lookup(&path(at)?).map_err(js_error)?;
        Ok(ticket.map(Ticket))
    }

    pub fn complete_lookup(&mut self, ticket: &Ticket, address: Option<String>) -> bool {
        self.0.complete_lookup(&ticket.0, address.as_deref())
    }

    pub fn unmount(&mut self) {
        self.0.unmount()
    }

    /// Description of the form, as JSON.
    pub fn view(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.0.view()).map_err(js_error)
    }

    /// Normalized arguments, as JSON, without reporting warnings.
    pub fn args(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.0.args()).map_err(js_error)
    }
}

#[wasm_bindgen]
pub struct Ticket(LookupTicket);

#[wasm_bindgen]
impl Ticket {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.0.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> String {
        self.0.path().to_string()
    }
}
