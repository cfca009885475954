// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rewrites multi-dimensional arrays of tuples into nested one-dimensional
//! ones.
//!
//! A form only knows how to repeat a block of fields, which is a single array
//! dimension. A `struct Point[][]` parameter named `paths` is therefore
//! rewritten into a `tuple[]` whose only component is another `tuple[]` (also
//! named `paths`, with internal type `struct Point[]`) holding the original
//! components:
//!
//! ```text
//! paths: tuple[][] { x, y }
//!   =>
//! paths: tuple[][] { paths: tuple[] { x, y } }
//! ```
//!
//! The outer parameter keeps its own type, so the renderer still knows it has
//! to unwrap one level when building its value.

use crate::abi::{Function, Parameter};
use crate::key::tuple_name;

/// Adjust every input of `function`.
pub fn adjust_function(function: &Function) -> Function {
    Function {
        inputs: function.inputs().iter().map(adjust_parameter).collect(),
        ..function.clone()
    }
}

/// Adjust a single parameter, and everything below it.
///
/// ## Example
///
/// ```
/// use abi_form::abi::{Kind, Parameter};
/// use abi_form::adjust::adjust_parameter;
///
/// let point = Parameter::new(
///     "struct Point[][]".parse().unwrap(),
///     "paths",
///     Kind::tuple().with_variable_arrays(2),
///     Some(vec![Parameter::scalar("x", Kind::uint(256).unwrap())]),
/// );
///
/// let adjusted = adjust_parameter(&point);
/// let wrapper = &adjusted.components()[0];
///
/// assert_eq!(adjusted.components().len(), 1);
/// assert_eq!(wrapper.kind().to_string(), "tuple[]");
/// assert_eq!(wrapper.internal_kind().to_string(), "struct Point[]");
/// assert_eq!(wrapper.components(), point.components());
/// ```
pub fn adjust_parameter(parameter: &Parameter) -> Parameter {
    if !parameter.kind().is_tuple() || !parameter.has_components() {
        return parameter.clone();
    }

    let depth = parameter.kind().depth();
    let components = adjust_components(parameter, parameter.components(), depth);

    parameter.with_components(components)
}

fn adjust_components(parent: &Parameter, components: &[Parameter], depth: usize) -> Vec<Parameter> {
    if depth <= 1 {
        return components.iter().map(adjust_parameter).collect();
    }

    let inner = depth - 1;

    let wrapper = Parameter::new(
        parent.internal_kind().with_variable_arrays(inner),
        tuple_name(parent),
        parent.kind().with_variable_arrays(inner),
        Some(adjust_components(parent, components, inner)),
    );

    vec![wrapper]
}

/// Largest number of array dimensions on any tuple in this tree.
///
/// After [`adjust_parameter`] every tuple below the root has at most as many
/// dimensions as its parent wrapper minus one, so repeated wrappers peel one
/// dimension each.
pub fn max_array_depth(parameter: &Parameter) -> usize {
    let own = if parameter.kind().is_tuple() {
        parameter.kind().depth()
    } else {
        0
    };

    parameter
        .components()
        .iter()
        .map(max_array_depth)
        .fold(own, usize::max)
}
