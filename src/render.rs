// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A headless, recursive form for one function.
//!
//! Every parameter becomes a [`Node`]: scalars and arrays of scalars are
//! leaves, `tuple` parameters are groups of nodes, and arrays of tuples are
//! lists of such groups. Each container owns a [`FlatFormState`] holding the
//! raw text of its direct children, and stores its own value in its parent's
//! state as JSON text.
//!
//! Nothing holds a reference to its parent. Changes are routed down by a
//! [`Path`], and each container that saw a child change answers with a single
//! update for its own key, which its parent writes in turn.
//!
//! ## Example
//!
//! ```
//! use abi_form::abi;
//! use abi_form::render::{FunctionForm, Path};
//!
//! use serde_json::json;
//!
//! let entries = abi::from_str(r#"[{
//!     "type": "function",
//!     "name": "transfer",
//!     "stateMutability": "nonpayable",
//!     "inputs": [
//!         { "name": "to", "type": "address", "internalType": "address" },
//!         { "name": "amount", "type": "uint256", "internalType": "uint256" }
//!     ],
//!     "outputs": []
//! }]"#).unwrap();
//!
//! let function = entries[0].as_function().unwrap();
//! let mut form = FunctionForm::new(function).unwrap();
//!
//! form.set(&Path::new(&[0]), "0x1111111111111111111111111111111111111111").unwrap();
//! form.set(&Path::new(&[1]), "1000").unwrap();
//!
//! assert_eq!(
//!     form.args(),
//!     [json!("0x1111111111111111111111111111111111111111"), json!("1000")],
//! );
//! ```

use crate::abi::{Function, Parameter};
use crate::adjust::adjust_function;
use crate::editor::{Editor, Lookup, NameResolver, Validity};
use crate::key::{component_name, derive_key, FormKey, ScopePath};
use crate::normalize::{parse_args, NormalizedArgs};
use crate::state::FlatFormState;
use crate::{Error, InvalidPathSnafu, MalformedParameterSnafu, NoSlotToRemoveSnafu};

use serde::Serialize;

use serde_json::{Map, Value};

use smallvec::SmallVec;

use snafu::{ResultExt, Snafu};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Errors that can arise while parsing a [`Path`].
#[derive(Debug, Snafu)]
pub enum PathFromStrError {
    /// A step was not a non-negative integer.
    #[snafu(display("invalid step `{step}`"))]
    Step {
        /// Text of the step.
        step: String,

        /// Underlying source of the error.
        source: ParseIntError,
    },
}

/// Location of a node within a [`FunctionForm`].
///
/// At the top level and within a tuple, a step is the index of a component.
/// Within an array of tuples, two steps are taken: the slot, then the
/// component within that slot. Paths print as their steps joined by `.`.
///
/// ```
/// use abi_form::render::Path;
///
/// let path: Path = "1.0.2".parse().unwrap();
/// assert_eq!(path.steps(), &[1, 0, 2]);
/// assert_eq!(path.to_string(), "1.0.2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(SmallVec<[usize; 4]>);

impl Path {
    /// Create a path from its steps.
    pub fn new(steps: &[usize]) -> Self {
        Self(steps.iter().copied().collect())
    }

    /// The steps of this path, outermost first.
    pub fn steps(&self) -> &[usize] {
        &self.0
    }

    /// A path one step below this one.
    pub fn child(&self, step: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut steps = self.0.iter();

        if let Some(first) = steps.next() {
            write!(f, "{}", first)?;
        }

        for step in steps {
            write!(f, ".{}", step)?;
        }

        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathFromStrError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Ok(Self::default());
        }

        text.split('.')
            .map(|step| step.parse().context(StepSnafu { step }))
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

/// Ticket for a name lookup started by [`FunctionForm::begin_lookup`].
///
/// A ticket only completes against the field that issued it, and only if the
/// field has not been edited, removed, or unmounted in the meantime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    path: Path,
    mount: u64,
    generation: u64,
    name: String,
}

impl LookupTicket {
    /// Field the lookup was started from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name to resolve.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Description of one node, for whatever draws the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum View {
    /// A single text field.
    #[serde(rename_all = "camelCase")]
    Field {
        /// Where to send edits.
        path: String,

        /// Key of the value in the parent's form.
        key: FormKey,

        /// Parameter name.
        label: String,

        /// Canonical ABI type.
        kind: String,

        /// Hint for an empty field.
        placeholder: String,

        /// How the field should be edited.
        editor: Editor,

        /// Current raw text.
        value: String,

        /// Whether the raw text looks acceptable.
        validity: Validity,

        /// Name the current address was resolved from.
        resolved_name: Option<String>,

        /// Whether a name lookup is in flight.
        lookup_pending: bool,
    },

    /// A `tuple` parameter.
    Group {
        /// Where to send toggles.
        path: String,

        /// Key of the value in the parent's form.
        key: FormKey,

        /// Internal type of the tuple.
        label: String,

        /// Whether the children are shown.
        expanded: bool,

        /// One view per component.
        children: Vec<View>,
    },

    /// An array of tuples.
    #[serde(rename_all = "camelCase")]
    List {
        /// Where to send toggles and slot changes.
        path: String,

        /// Key of the value in the parent's form.
        key: FormKey,

        /// Internal type of the array.
        label: String,

        /// Whether the slots are shown.
        expanded: bool,

        /// One list of component views per slot.
        slots: Vec<Vec<View>>,

        /// Whether there is a slot to remove.
        can_remove: bool,
    },
}

/// A container's answer to a change below it: write `value` under `key`.
#[derive(Debug)]
struct Update {
    key: FormKey,
    value: String,
}

#[derive(Debug)]
enum Action<'a> {
    Set(&'a str),
    AddSlot,
    RemoveSlot,
    Toggle,
    BeginLookup(Option<(u64, u64, String)>),
    CompleteLookup {
        mount: u64,
        generation: u64,
        address: Option<&'a str>,
        applied: bool,
    },
}

#[derive(Debug)]
enum Misroute {
    Path,
    NoSlot,
}

type Routed = Result<Option<Update>, Misroute>;

/// Hands out mount identifiers, and remembers key collisions seen while
/// seeding.
#[derive(Debug, Default)]
struct Builder {
    next_mount: u64,
    collisions: Vec<FormKey>,
}

impl Builder {
    fn mount(&mut self) -> u64 {
        self.next_mount += 1;
        self.next_mount
    }

    /// Seed `form` for `components` within `scope`, build their nodes, and
    /// store the initial value of every child container.
    fn children(
        &mut self,
        form: &mut FlatFormState,
        scope: &ScopePath,
        components: &[Parameter],
    ) -> Vec<Node> {
        self.collisions.extend(form.seed_scope(scope, components));

        let mut nodes = Vec::with_capacity(components.len());

        for (index, component) in components.iter().enumerate() {
            let node = Node::build(component, derive_key(scope, component, index), self);

            if let Some(Update { key, value }) = node.mounted() {
                tracing::debug!(%key, "mounted");
                form.set(key, value);
            }

            nodes.push(node);
        }

        nodes
    }
}

/// One parameter of a form.
#[derive(Debug)]
pub enum Node {
    /// A single text field.
    Leaf(LeafNode),

    /// A `tuple` parameter.
    Tuple(TupleNode),

    /// An array of tuples.
    TupleArray(TupleArrayNode),
}

/// A single text field. Its value lives in its parent's form.
#[derive(Debug)]
pub struct LeafNode {
    key: FormKey,
    parameter: Parameter,
    editor: Editor,
    lookup: Lookup,
    mount: u64,
}

/// A `tuple` parameter.
#[derive(Debug)]
pub struct TupleNode {
    key: FormKey,
    parameter: Parameter,
    form: FlatFormState,
    children: Vec<Node>,
    expanded: bool,
}

/// An array of tuples.
#[derive(Debug)]
pub struct TupleArrayNode {
    key: FormKey,
    parameter: Parameter,
    form: FlatFormState,
    slots: Vec<Vec<Node>>,
    expanded: bool,
}

impl Node {
    fn build(parameter: &Parameter, key: FormKey, builder: &mut Builder) -> Self {
        let kind = parameter.kind();

        if !kind.is_tuple() {
            return Self::Leaf(LeafNode {
                key,
                editor: Editor::for_kind(kind),
                parameter: parameter.clone(),
                lookup: Lookup::default(),
                mount: builder.mount(),
            });
        }

        if kind.depth() == 0 {
            let mut form = FlatFormState::default();
            let scope = ScopePath::tuple(parameter);
            let children = builder.children(&mut form, &scope, parameter.components());

            return Self::Tuple(TupleNode {
                key,
                parameter: parameter.clone(),
                form,
                children,
                expanded: false,
            });
        }

        let mut node = TupleArrayNode {
            key,
            parameter: parameter.clone(),
            form: FlatFormState::default(),
            slots: Vec::new(),
            expanded: false,
        };

        node.push_slot(builder);

        Self::TupleArray(node)
    }

    /// Key of this node's value in its parent's form.
    pub fn key(&self) -> &FormKey {
        match self {
            Self::Leaf(n) => &n.key,
            Self::Tuple(n) => &n.key,
            Self::TupleArray(n) => &n.key,
        }
    }

    /// Parameter this node was built from.
    pub fn parameter(&self) -> &Parameter {
        match self {
            Self::Leaf(n) => &n.parameter,
            Self::Tuple(n) => &n.parameter,
            Self::TupleArray(n) => &n.parameter,
        }
    }

    /// The value a container writes into its parent when it is created.
    fn mounted(&self) -> Option<Update> {
        match self {
            Self::Leaf(_) => None,
            Self::Tuple(n) => Some(n.update()),
            Self::TupleArray(n) => Some(n.update()),
        }
    }

    fn view(&self, parent: &FlatFormState, path: &Path) -> View {
        match self {
            Self::Leaf(n) => n.view(parent, path),
            Self::Tuple(n) => n.view(path),
            Self::TupleArray(n) => n.view(path),
        }
    }
}

impl LeafNode {
    fn act(&mut self, current: &str, action: &mut Action) -> Routed {
        match action {
            Action::Set(value) => {
                self.lookup.edited();
                Ok(Some(Update {
                    key: self.key.clone(),
                    value: value.to_string(),
                }))
            }
            Action::BeginLookup(ticket) => {
                if self.editor == Editor::Address {
                    *ticket = self
                        .lookup
                        .begin(current)
                        .map(|generation| (self.mount, generation, current.to_string()));
                }
                Ok(None)
            }
            Action::CompleteLookup {
                mount,
                generation,
                address,
                applied,
            } => {
                if *mount != self.mount {
                    return Ok(None);
                }

                let name = address.map(|_| current);
                *applied = self.lookup.complete(*generation, name);

                if !*applied {
                    return Ok(None);
                }

                Ok(address.map(|address| Update {
                    key: self.key.clone(),
                    value: address.to_string(),
                }))
            }
            Action::AddSlot | Action::RemoveSlot | Action::Toggle => Err(Misroute::Path),
        }
    }

    fn view(&self, parent: &FlatFormState, path: &Path) -> View {
        let value = parent.get(self.key.as_str()).unwrap_or_default();

        View::Field {
            path: path.to_string(),
            key: self.key.clone(),
            label: self.parameter.name().to_string(),
            kind: self.parameter.kind().to_string(),
            placeholder: Editor::placeholder(&self.parameter),
            editor: self.editor,
            value: value.to_string(),
            validity: self.editor.validate(value),
            resolved_name: self.lookup.name().map(str::to_string),
            lookup_pending: self.lookup.pending(),
        }
    }
}

/// Route `action` into `child`, whose value is stored in `form`. Returns true
/// if `form` changed.
fn route_child(
    form: &mut FlatFormState,
    child: &mut Node,
    rest: &[usize],
    action: &mut Action,
    builder: &mut Builder,
) -> Result<bool, Misroute> {
    let update = match child {
        Node::Leaf(leaf) => {
            if !rest.is_empty() {
                return Err(Misroute::Path);
            }

            let current = form.get(leaf.key.as_str()).unwrap_or_default();
            leaf.act(current, action)?
        }
        Node::Tuple(tuple) => tuple.route(rest, action, builder)?,
        Node::TupleArray(array) => array.route(rest, action, builder)?,
    };

    match update {
        Some(Update { key, value }) => {
            tracing::trace!(%key, %value, "updated");
            form.set(key, value);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Object of a container's component values, keyed by component name.
fn object(form: &FlatFormState, components: &[Parameter], nodes: &[Node]) -> Map<String, Value> {
    components
        .iter()
        .zip(nodes)
        .enumerate()
        .map(|(index, (component, node))| {
            let raw = form.get(node.key().as_str()).unwrap_or_default();
            (component_name(component, index), Value::String(raw.to_string()))
        })
        .collect()
}

fn label(parameter: &Parameter) -> String {
    parameter.internal_kind().to_string()
}

impl TupleNode {
    fn update(&self) -> Update {
        let object = object(&self.form, self.parameter.components(), &self.children);

        Update {
            key: self.key.clone(),
            value: Value::Object(object).to_string(),
        }
    }

    fn route(&mut self, steps: &[usize], action: &mut Action, builder: &mut Builder) -> Routed {
        let (first, rest) = match steps.split_first() {
            Some(split) => split,
            None if matches!(action, Action::Toggle) => {
                self.expanded = !self.expanded;
                return Ok(None);
            }
            None => return Err(Misroute::Path),
        };

        let child = self.children.get_mut(*first).ok_or(Misroute::Path)?;

        if route_child(&mut self.form, child, rest, action, builder)? {
            Ok(Some(self.update()))
        } else {
            Ok(None)
        }
    }

    fn view(&self, path: &Path) -> View {
        let children = self
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| child.view(&self.form, &path.child(index)))
            .collect();

        View::Group {
            path: path.to_string(),
            key: self.key.clone(),
            label: label(&self.parameter),
            expanded: self.expanded,
            children,
        }
    }
}

impl TupleArrayNode {
    /// Number of elements.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn push_slot(&mut self, builder: &mut Builder) {
        let slot = self.slots.len();
        let scope = ScopePath::slot(slot, &self.parameter);
        let nodes = builder.children(&mut self.form, &scope, self.parameter.components());

        tracing::debug!(key = %self.key, slot, "added slot");
        self.slots.push(nodes);
    }

    fn pop_slot(&mut self) -> Result<(), Misroute> {
        let slot = self.slots.len().checked_sub(1).ok_or(Misroute::NoSlot)?;

        self.slots.pop();
        self.form.remove_slot(&self.parameter, slot);

        tracing::debug!(key = %self.key, slot, "removed slot");
        Ok(())
    }

    fn update(&self) -> Update {
        let components = self.parameter.components();
        let unwrap = self.parameter.kind().depth() > 1;

        let items = self
            .slots
            .iter()
            .map(|nodes| {
                let object = object(&self.form, components, nodes);

                if unwrap {
                    object
                        .into_iter()
                        .next()
                        .map(|(_, value)| value)
                        .unwrap_or(Value::Null)
                } else {
                    Value::Object(object)
                }
            })
            .collect();

        Update {
            key: self.key.clone(),
            value: Value::Array(items).to_string(),
        }
    }

    fn route(&mut self, steps: &[usize], action: &mut Action, builder: &mut Builder) -> Routed {
        match steps {
            [] => match action {
                Action::AddSlot => {
                    self.push_slot(builder);
                    Ok(Some(self.update()))
                }
                Action::RemoveSlot => {
                    self.pop_slot()?;
                    Ok(Some(self.update()))
                }
                Action::Toggle => {
                    self.expanded = !self.expanded;
                    Ok(None)
                }
                _ => Err(Misroute::Path),
            },
            [slot, component, rest @ ..] => {
                let child = self
                    .slots
                    .get_mut(*slot)
                    .and_then(|nodes| nodes.get_mut(*component))
                    .ok_or(Misroute::Path)?;

                if route_child(&mut self.form, child, rest, action, builder)? {
                    Ok(Some(self.update()))
                } else {
                    Ok(None)
                }
            }
            [_] => Err(Misroute::Path),
        }
    }

    fn view(&self, path: &Path) -> View {
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(slot, nodes)| {
                let slot_path = path.child(slot);

                nodes
                    .iter()
                    .enumerate()
                    .map(|(index, node)| node.view(&self.form, &slot_path.child(index)))
                    .collect()
            })
            .collect();

        View::List {
            path: path.to_string(),
            key: self.key.clone(),
            label: label(&self.parameter),
            expanded: self.expanded,
            slots,
            can_remove: !self.slots.is_empty(),
        }
    }
}

/// The form for one function.
#[derive(Debug)]
pub struct FunctionForm {
    function: Function,
    form: FlatFormState,
    nodes: Vec<Node>,
    builder: Builder,
    mounted: bool,
}

impl FunctionForm {
    /// Build the form for `function`, with one empty slot for every array of
    /// tuples.
    pub fn new(function: &Function) -> Result<Self, Error> {
        if let Some(bad) = function.inputs().iter().find_map(Parameter::malformed) {
            return MalformedParameterSnafu {
                name: bad.name(),
                kind: bad.kind().to_string(),
            }
            .fail();
        }

        let function = adjust_function(function);

        let mut builder = Builder::default();
        let mut form = FlatFormState::default();
        let scope = ScopePath::function(function.name());
        let nodes = builder.children(&mut form, &scope, function.inputs());

        tracing::debug!(function = function.name(), fields = form.len(), "built form");

        Ok(Self {
            function,
            form,
            nodes,
            builder,
            mounted: true,
        })
    }

    /// The function, after array adjustment.
    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Raw values of the top level arguments.
    pub fn form(&self) -> &FlatFormState {
        &self.form
    }

    /// Top level nodes, in argument order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Arguments ready to hand to an encoder.
    pub fn args(&self) -> NormalizedArgs {
        parse_args(&self.form)
    }

    /// Keys that were derived more than once while building this form. Only
    /// the first of each has a slot.
    pub fn collisions(&self) -> &[FormKey] {
        &self.builder.collisions
    }

    /// Whether [`FunctionForm::unmount`] has been called.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Replace the raw text of the field at `path`.
    pub fn set<V: AsRef<str>>(&mut self, path: &Path, value: V) -> Result<(), Error> {
        self.route(path, &mut Action::Set(value.as_ref()))
    }

    /// Append an empty element to the array of tuples at `path`.
    pub fn add_slot(&mut self, path: &Path) -> Result<(), Error> {
        self.route(path, &mut Action::AddSlot)
    }

    /// Remove the last element of the array of tuples at `path`.
    pub fn remove_slot(&mut self, path: &Path) -> Result<(), Error> {
        self.route(path, &mut Action::RemoveSlot)
    }

    /// Show or hide the children of the container at `path`.
    pub fn toggle(&mut self, path: &Path) -> Result<(), Error> {
        self.route(path, &mut Action::Toggle)
    }

    /// Start resolving the name typed into the address field at `path`.
    ///
    /// Returns `None` if the field does not hold something that looks like a
    /// name.
    pub fn begin_lookup(&mut self, path: &Path) -> Result<Option<LookupTicket>, Error> {
        let mut action = Action::BeginLookup(None);
        self.route(path, &mut action)?;

        let ticket = match action {
            Action::BeginLookup(Some((mount, generation, name))) => LookupTicket {
                path: path.clone(),
                mount,
                generation,
                name,
            },
            _ => return Ok(None),
        };

        tracing::debug!(path = %ticket.path, name = %ticket.name, "lookup started");
        Ok(Some(ticket))
    }

    /// Finish the lookup described by `ticket`. `address` is `None` if the name
    /// did not resolve.
    ///
    /// Returns true if the result was applied. Results for fields that were
    /// edited, removed, or unmounted since the lookup started are dropped.
    pub fn complete_lookup(&mut self, ticket: &LookupTicket, address: Option<&str>) -> bool {
        if !self.mounted {
            tracing::debug!(path = %ticket.path, "lookup finished after unmount");
            return false;
        }

        let mut action = Action::CompleteLookup {
            mount: ticket.mount,
            generation: ticket.generation,
            address,
            applied: false,
        };

        if self.route(&ticket.path, &mut action).is_err() {
            tracing::debug!(path = %ticket.path, "lookup field is gone");
            return false;
        }

        match action {
            Action::CompleteLookup { applied: true, .. } => true,
            _ => {
                tracing::debug!(path = %ticket.path, "stale lookup dropped");
                false
            }
        }
    }

    /// Resolve the name at `path` right away with `resolver`.
    ///
    /// Returns true if the field now holds a resolved address.
    pub fn resolve_with<N>(&mut self, path: &Path, resolver: &N) -> Result<bool, Error>
    where
        N: NameResolver + ?Sized,
    {
        let ticket = match self.begin_lookup(path)? {
            Some(t) => t,
            None => return Ok(false),
        };

        let address = resolver.resolve(ticket.name());
        Ok(self.complete_lookup(&ticket, address.as_deref()) && address.is_some())
    }

    /// Stop accepting lookup results. The values entered so far are kept.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Number of elements of the array of tuples at `path`.
    pub fn slot_count(&self, path: &Path) -> Result<usize, Error> {
        match self.locate(path.steps()) {
            Some((_, Node::TupleArray(array))) => Ok(array.slot_count()),
            _ => InvalidPathSnafu { path: path.to_string() }.fail(),
        }
    }

    /// Raw text stored for the node at `path`.
    pub fn value(&self, path: &Path) -> Option<&str> {
        let (form, node) = self.locate(path.steps())?;
        form.get(node.key().as_str())
    }

    /// Description of every top level node.
    pub fn view(&self) -> Vec<View> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| node.view(&self.form, &Path::new(&[index])))
            .collect()
    }

    /// Find the node at `steps`, and the form its value is stored in.
    fn locate(&self, steps: &[usize]) -> Option<(&FlatFormState, &Node)> {
        let (first, mut rest) = steps.split_first()?;

        let mut form = &self.form;
        let mut node = self.nodes.get(*first)?;

        while !rest.is_empty() {
            match node {
                Node::Leaf(_) => return None,
                Node::Tuple(tuple) => {
                    form = &tuple.form;
                    node = tuple.children.get(rest[0])?;
                    rest = &rest[1..];
                }
                Node::TupleArray(array) => {
                    let (slot, component) = match rest {
                        [slot, component, ..] => (*slot, *component),
                        _ => return None,
                    };

                    form = &array.form;
                    node = array.slots.get(slot)?.get(component)?;
                    rest = &rest[2..];
                }
            }
        }

        Some((form, node))
    }

    fn route(&mut self, path: &Path, action: &mut Action) -> Result<(), Error> {
        let misroute = match path.steps().split_first() {
            Some((first, rest)) => match self.nodes.get_mut(*first) {
                Some(node) => {
                    match route_child(&mut self.form, node, rest, action, &mut self.builder) {
                        Ok(_) => return Ok(()),
                        Err(m) => m,
                    }
                }
                None => Misroute::Path,
            },
            None => Misroute::Path,
        };

        let path = path.to_string();

        match misroute {
            Misroute::Path => InvalidPathSnafu { path }.fail(),
            Misroute::NoSlot => NoSlotToRemoveSnafu { path }.fail(),
        }
    }
}
