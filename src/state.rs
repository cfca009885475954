// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Flat, insertion ordered form state and its initial values.

use crate::abi::Parameter;
use crate::key::{derive_key, FormKey, ScopePath};
use crate::{Error, MalformedParameterSnafu};

use indexmap::IndexMap;

use serde::Serialize;

use snafu::ensure;

/// Raw text entered for every slot of a form, in the order the slots were
/// created.
///
/// Values are kept exactly as typed. Containers store their own derived value
/// as JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatFormState {
    values: IndexMap<FormKey, String>,
}

impl FlatFormState {
    /// Seed an empty value for every parameter of `function_name`.
    ///
    /// ## Example
    ///
    /// ```
    /// use abi_form::abi::{Kind, Parameter};
    /// use abi_form::state::FlatFormState;
    ///
    /// let inputs = [
    ///     Parameter::scalar("to", Kind::address()),
    ///     Parameter::scalar("amount", Kind::uint(256).unwrap()),
    /// ];
    ///
    /// let form = FlatFormState::for_parameter_list("transfer", &inputs);
    /// let keys: Vec<_> = form.keys().map(|k| k.as_str()).collect();
    ///
    /// assert_eq!(
    ///     keys,
    ///     ["transfer_to_address_address", "transfer_amount_uint256_uint256"],
    /// );
    /// ```
    pub fn for_parameter_list(function_name: &str, parameters: &[Parameter]) -> Self {
        let mut form = Self::default();
        form.seed_scope(&ScopePath::function(function_name), parameters);
        form
    }

    /// Seed an empty value for every component of `tuple`.
    pub fn for_tuple(tuple: &Parameter) -> Result<Self, Error> {
        check_tuple(tuple)?;

        let mut form = Self::default();
        form.seed_scope(&ScopePath::tuple(tuple), tuple.components());
        Ok(form)
    }

    /// Seed an empty value for every component of the first element of the
    /// array of tuples `tuple`.
    pub fn for_tuple_array(tuple: &Parameter) -> Result<Self, Error> {
        check_tuple(tuple)?;

        let mut form = Self::default();
        form.seed_scope(&ScopePath::slot(0, tuple), tuple.components());
        Ok(form)
    }

    /// Append one block of empty values for element `slot` of `tuple`.
    ///
    /// Returns the keys that already existed.
    pub fn seed_slot(&mut self, tuple: &Parameter, slot: usize) -> Vec<FormKey> {
        self.seed_scope(&ScopePath::slot(slot, tuple), tuple.components())
    }

    /// Remove the block of values belonging to element `slot` of `tuple`.
    pub fn remove_slot(&mut self, tuple: &Parameter, slot: usize) {
        let scope = ScopePath::slot(slot, tuple);

        for (index, component) in tuple.components().iter().enumerate() {
            self.remove(derive_key(&scope, component, index).as_str());
        }
    }

    /// Seed an empty value for each of `parameters` within `scope`.
    ///
    /// Returns the keys that already existed.
    pub(crate) fn seed_scope(
        &mut self,
        scope: &ScopePath,
        parameters: &[Parameter],
    ) -> Vec<FormKey> {
        let mut collisions = Vec::new();

        for (index, parameter) in parameters.iter().enumerate() {
            let key = derive_key(scope, parameter, index);

            if self.values.contains_key(&key) {
                tracing::warn!(%key, "form key collision");
                collisions.push(key);
                continue;
            }

            self.values.insert(key, String::new());
        }

        collisions
    }

    /// Current value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Replace the value of `key`, keeping its position. New keys are appended.
    pub fn set<V: Into<String>>(&mut self, key: FormKey, value: V) {
        self.values.insert(key, value.into());
    }

    /// Remove `key`, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.shift_remove(key)
    }

    /// Whether `key` has a slot in this form.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &FormKey> {
        self.values.keys()
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.values().map(String::as_str)
    }

    /// Key and value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FormKey, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no slots.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn check_tuple(tuple: &Parameter) -> Result<(), Error> {
    ensure!(
        tuple.kind().is_tuple() && tuple.has_components(),
        MalformedParameterSnafu {
            name: tuple.name(),
            kind: tuple.kind().to_string(),
        }
    );

    Ok(())
}
