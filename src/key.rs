// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Deterministic keys for the slots of a flat form.
//!
//! A key has the shape `{scope}_{name}_{internalType}_{type}`, where `{scope}`
//! is a [`ScopePath`] printed with `_` between its segments, and `{name}` is
//! the parameter name or `input_{index}_` for unnamed parameters. For example
//! the `amount` argument of `transfer(address,uint256)` is keyed
//! `transfer_amount_uint256_uint256`, and the first field of the third element
//! of `orders` (a `struct Order[]`) is `2_orders_maker_address_address`.
//!
//! The separator is not escaped. Names containing `_` can, in principle,
//! produce two slots with the same key; such collisions are reported by the
//! synthesizer rather than prevented here.

use crate::abi::Parameter;

use serde::{Deserialize, Serialize};

use smallvec::SmallVec;

use std::borrow::Borrow;
use std::fmt;

/// Scope name used for tuples that have no name of their own.
pub const DEFAULT_TUPLE_NAME: &str = "tuple";

/// One step of a [`ScopePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A function or tuple name.
    Name(String),

    /// The index of an element in an array of tuples.
    Slot(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Slot(index) => write!(f, "{}", index),
        }
    }
}

/// The scope that keys are derived in.
///
/// ## Example
///
/// ```
/// use abi_form::key::ScopePath;
///
/// let scope = ScopePath::function("transfer");
/// assert_eq!(scope.to_string(), "transfer");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopePath(SmallVec<[Segment; 2]>);

impl ScopePath {
    /// Scope of the top level arguments of `function`.
    pub fn function<S: Into<String>>(function: S) -> Self {
        Self::default().push(Segment::Name(function.into()))
    }

    /// Scope of the components of a `tuple` parameter.
    pub fn tuple(tuple: &Parameter) -> Self {
        Self::default().push(Segment::Name(tuple_name(tuple).into()))
    }

    /// Scope of the components of element `slot` of a `tuple[]` parameter.
    ///
    /// ```
    /// use abi_form::abi::{Kind, Parameter};
    /// use abi_form::key::ScopePath;
    ///
    /// let orders = Parameter::new(
    ///     "struct Order[]".parse().unwrap(),
    ///     "orders",
    ///     Kind::tuple().with_variable_arrays(1),
    ///     Some(vec![]),
    /// );
    ///
    /// assert_eq!(ScopePath::slot(3, &orders).to_string(), "3_orders");
    /// ```
    pub fn slot(slot: usize, tuple: &Parameter) -> Self {
        Self::default()
            .push(Segment::Slot(slot))
            .push(Segment::Name(tuple_name(tuple).into()))
    }

    /// Append a segment.
    pub fn push(mut self, segment: Segment) -> Self {
        self.0.push(segment);
        self
    }

    /// The segments of this scope, outermost first.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut segments = self.0.iter();

        if let Some(first) = segments.next() {
            write!(f, "{}", first)?;
        }

        for segment in segments {
            write!(f, "_{}", segment)?;
        }

        Ok(())
    }
}

/// Key of one slot in a [`FlatFormState`](crate::state::FlatFormState).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormKey(String);

impl FormKey {
    /// The key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FormKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<FormKey> for String {
    fn from(key: FormKey) -> Self {
        key.0
    }
}

/// Name of a tuple's scope: its own name, or `tuple` when it has none.
pub fn tuple_name(tuple: &Parameter) -> &str {
    match tuple.name() {
        "" => DEFAULT_TUPLE_NAME,
        name => name,
    }
}

/// Name a container uses for its `index`th member: the parameter name, or
/// `input_{index}_` when it has none.
pub fn component_name(parameter: &Parameter, index: usize) -> String {
    match parameter.name() {
        "" => format!("input_{}_", index),
        name => name.to_string(),
    }
}

/// Derive the key of `parameter`, found at position `index`, within `scope`.
///
/// ## Example
///
/// ```
/// use abi_form::abi::{Kind, Parameter};
/// use abi_form::key::{derive_key, ScopePath};
///
/// let amount = Parameter::scalar("amount", Kind::uint(256).unwrap());
/// let unnamed = Parameter::scalar("", Kind::address());
///
/// let scope = ScopePath::function("transfer");
///
/// assert_eq!(
///     derive_key(&scope, &amount, 1).as_str(),
///     "transfer_amount_uint256_uint256",
/// );
/// assert_eq!(
///     derive_key(&scope, &unnamed, 0).as_str(),
///     "transfer_input_0__address_address",
/// );
/// ```
pub fn derive_key(scope: &ScopePath, parameter: &Parameter, index: usize) -> FormKey {
    FormKey(format!(
        "{}_{}_{}_{}",
        scope,
        component_name(parameter, index),
        parameter.internal_kind(),
        parameter.kind(),
    ))
}
