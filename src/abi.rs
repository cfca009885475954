// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rust Representation of Solidity's [ABI].
//!
//! Only the parts of the JSON description that a form needs are modelled:
//! parameter trees (with their `type` and `internalType` strings) and the
//! entries that carry them.
//!
//! [ABI]: https://docs.soliditylang.org/en/v0.8.12/abi-spec.html

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};

use smallvec::SmallVec;

use snafu::{Backtrace, OptionExt, ResultExt, Snafu};

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Errors that can arise while parsing ABI descriptions.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// A problem with the input JSON (either the format itself, or its semantics.)
    Json {
        /// Underlying source of the error.
        source: JsonError,

        /// Location of the error.
        backtrace: Backtrace,
    },
}

/// Opaque wrapper type for JSON errors encountered while parsing ABI descriptions.
#[derive(Debug)]
pub struct JsonError(serde_json::Error);

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<serde_json::Error> for JsonError {
    fn from(e: serde_json::Error) -> Self {
        Self(e)
    }
}

impl std::error::Error for JsonError {}

/// Errors that can arise while parsing strings into [`Kind`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum KindFromStrError {
    /// A portion of the string should have been a number, but wasn't.
    #[snafu(context(false))]
    ParseInt {
        /// Underlying source of the error.
        source: std::num::ParseIntError,

        /// Location of the error.
        backtrace: Backtrace,
    },

    /// A character wasn't valid in the input string.
    InvalidCharacter {
        /// Location of the error.
        backtrace: Backtrace,
    },

    /// The input string was shorter than expected (ex. an unclosed array type.)
    Truncated {
        /// Location of the error.
        backtrace: Backtrace,
    },

    /// The named type wasn't understood.
    UnknownKind {
        /// Location of the error.
        backtrace: Backtrace,
    },
}

/// Error that can arise while parsing strings into [`StateMutability`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub struct StateMutabilityFromStrError {}

/// Describes how state can be accessed by a function.
///
/// See: [State Mutability].
///
/// [State Mutability]: https://docs.soliditylang.org/en/v0.8.12/contracts.html#state-mutability
#[derive(Debug, Serialize, Clone, Copy, Eq, PartialEq)]
#[serde(into = "String")]
pub enum StateMutability {
    /// Function does not read from or modify the state.
    Pure,

    /// Function may read from, but does not modify, the state.
    View,

    /// Function may read and modify the state, but does not receive funds.
    Nonpayable,

    /// Function may read and modify the state, and may receive funds.
    Payable,
}

impl StateMutability {
    /// Whether calling a function with this mutability only reads state.
    ///
    /// Read functions are usually called directly, while the others are sent
    /// as transactions.
    pub fn is_read(self) -> bool {
        matches!(self, Self::Pure | Self::View)
    }
}

impl<'de> Deserialize<'de> for StateMutability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let txt = String::deserialize(deserializer)?;
        let obj = Self::from_str(&txt).map_err(D::Error::custom)?;
        Ok(obj)
    }
}

impl From<StateMutability> for String {
    fn from(s: StateMutability) -> Self {
        s.to_string()
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let txt = match self {
            Self::Pure => "pure",
            Self::View => "view",
            Self::Nonpayable => "nonpayable",
            Self::Payable => "payable",
        };

        f.write_str(txt)
    }
}

impl FromStr for StateMutability {
    type Err = StateMutabilityFromStrError;

    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        let result = match txt {
            "pure" => Self::Pure,
            "view" => Self::View,
            "nonpayable" => Self::Nonpayable,
            "payable" => Self::Payable,
            _ => return Err(StateMutabilityFromStrError {}),
        };

        Ok(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Base {
    Uint(u16),
    Int(u16),
    Address,
    Bool,
    Fixed(u16, u8),
    Ufixed(u16, u8),
    BytesSized(u8),
    Function,
    Bytes,
    String,
    Tuple,
}

impl Base {
    fn parse_fixed(txt: &str) -> Result<(u16, u8), KindFromStrError> {
        let (l, r) = txt.split_once('x').context(InvalidCharacterSnafu {})?;
        Ok((l.parse()?, r.parse()?))
    }

    fn parse_width(txt: &str) -> Result<u16, KindFromStrError> {
        // `uint` and `int` are aliases for their 256 bit versions.
        if txt.is_empty() {
            Ok(256)
        } else {
            Ok(txt.parse()?)
        }
    }
}

impl FromStr for Base {
    type Err = KindFromStrError;

    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        match txt {
            "address" => return Ok(Base::Address),
            "bool" => return Ok(Base::Bool),
            "function" => return Ok(Base::Function),
            "bytes" => return Ok(Base::Bytes),
            "string" => return Ok(Base::String),
            "tuple" => return Ok(Base::Tuple),
            _ => (),
        }

        if let Some(num) = txt.strip_prefix("uint") {
            Ok(Self::Uint(Self::parse_width(num)?))
        } else if let Some(num) = txt.strip_prefix("int") {
            Ok(Self::Int(Self::parse_width(num)?))
        } else if let Some(f) = txt.strip_prefix("fixed") {
            let (l, r) = Self::parse_fixed(f)?;
            Ok(Self::Fixed(l, r))
        } else if let Some(f) = txt.strip_prefix("ufixed") {
            let (l, r) = Self::parse_fixed(f)?;
            Ok(Self::Ufixed(l, r))
        } else if let Some(num) = txt.strip_prefix("bytes") {
            Ok(Self::BytesSized(num.parse()?))
        } else {
            UnknownKindSnafu.fail()
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Uint(sz) => write!(f, "uint{}", sz),
            Self::Int(sz) => write!(f, "int{}", sz),
            Self::Address => write!(f, "address"),
            Self::Bool => write!(f, "bool"),
            Self::Fixed(l, r) => write!(f, "fixed{}x{}", l, r),
            Self::Ufixed(l, r) => write!(f, "ufixed{}x{}", l, r),
            Self::BytesSized(sz) => write!(f, "bytes{}", sz),
            Self::Function => write!(f, "function"),
            Self::Bytes => write!(f, "bytes"),
            Self::String => write!(f, "string"),
            Self::Tuple => write!(f, "tuple"),
        }
    }
}

/// Represents an array dimension.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Array {
    /// Array with a fixed size: `uint8[5]`.
    Fixed(NonZeroU32),

    /// Array with a variable size: `uint8[]`.
    Variable,
}

fn write_arrays(f: &mut fmt::Formatter, array: &[Array]) -> fmt::Result {
    for array in array {
        match array {
            Array::Fixed(sz) => write!(f, "[{}]", sz)?,
            Array::Variable => write!(f, "[]")?,
        }
    }
    Ok(())
}

/// Represents a Solidity type, like `uint256[98][][3]`.
#[derive(Debug, Serialize, Clone, Eq, PartialEq, Hash)]
#[serde(into = "String")]
pub struct Kind {
    base: Base,
    array: SmallVec<[Array; 2]>,
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let txt = String::deserialize(deserializer)?;
        let obj = Self::from_str(&txt).map_err(D::Error::custom)?;
        Ok(obj)
    }
}

impl Kind {
    #[inline]
    pub(crate) const fn base(&self) -> Base {
        self.base
    }

    /// Array dimensions, outermost last (`uint8[2][]` is `[Fixed(2), Variable]`.)
    #[inline]
    pub fn array(&self) -> &[Array] {
        &self.array
    }

    /// Number of array dimensions following the base type.
    ///
    /// ```
    /// use abi_form::abi::Kind;
    ///
    /// let kind: Kind = "tuple[][]".parse().unwrap();
    ///
    /// assert_eq!(kind.depth(), 2);
    /// ```
    #[inline]
    pub fn depth(&self) -> usize {
        self.array.len()
    }

    /// True if the base type is `tuple`, with or without arrays.
    #[inline]
    pub fn is_tuple(&self) -> bool {
        self.base == Base::Tuple
    }

    /// The base type followed by `depth` variable sized array dimensions.
    ///
    /// ```
    /// use abi_form::abi::Kind;
    ///
    /// let kind = Kind::tuple().with_variable_arrays(2);
    ///
    /// assert_eq!(kind.to_string(), "tuple[][]");
    /// ```
    pub fn with_variable_arrays(&self, depth: usize) -> Self {
        Self {
            base: self.base,
            array: core::iter::repeat(Array::Variable).take(depth).collect(),
        }
    }

    /// Create a new [`Kind`] representing a Solidity `tuple`.
    #[inline]
    pub const fn tuple() -> Self {
        Self {
            base: Base::Tuple,
            array: SmallVec::new_const(),
        }
    }

    /// Create a new [`Kind`] representing an unsigned integer of size `sz`.
    ///
    /// Returns `None` if `sz` does not correspond to a valid Solidity type.
    ///
    /// ## Example
    ///
    /// ```
    /// use abi_form::abi::Kind;
    ///
    /// let kind = Kind::uint(32).unwrap();
    ///
    /// assert_eq!(kind.to_string(), "uint32");
    /// ```
    #[inline]
    pub const fn uint(sz: u16) -> Option<Self> {
        if sz == 0 || sz > 256 || sz % 8 != 0 {
            None
        } else {
            Some(Self {
                base: Base::Uint(sz),
                array: SmallVec::new_const(),
            })
        }
    }

    /// Create a new [`Kind`] representing a Solidity `address`.
    #[inline]
    pub const fn address() -> Self {
        Self {
            base: Base::Address,
            array: SmallVec::new_const(),
        }
    }

    /// Create a new [`Kind`] representing a Solidity `string`.
    #[inline]
    pub const fn string() -> Self {
        Self {
            base: Base::String,
            array: SmallVec::new_const(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.base)?;
        write_arrays(f, &self.array)
    }
}

impl From<Kind> for String {
    fn from(k: Kind) -> Self {
        k.to_string()
    }
}

fn parse_kind(txt: &str) -> Result<(&str, SmallVec<[Array; 2]>), KindFromStrError> {
    #[derive(Clone, Copy)]
    enum Mode {
        Base,
        Array(usize),
        Between,
    }

    let mut mode = Mode::Base;
    let mut base = txt;
    let mut array = SmallVec::new();

    for (idx, chr) in txt.char_indices() {
        match (mode, chr) {
            (Mode::Base, '[') => {
                base = &txt[..idx];
                mode = Mode::Array(idx);
            }
            (Mode::Base, c) if c.is_alphanumeric() => (),
            (Mode::Base, ' ' | '.' | '_' | '$') => (),
            (Mode::Base, _) => return InvalidCharacterSnafu.fail(),

            (Mode::Array(start), ']') => {
                let arr = if start == idx - 1 {
                    Array::Variable
                } else {
                    Array::Fixed(txt[start + 1..idx].parse()?)
                };

                array.push(arr);
                mode = Mode::Between;
            }
            (Mode::Array(_), c) if c.is_numeric() => (),
            (Mode::Array(_), _) => return InvalidCharacterSnafu.fail(),

            (Mode::Between, '[') => mode = Mode::Array(idx),
            (Mode::Between, _) => return InvalidCharacterSnafu.fail(),
        }
    }

    match mode {
        Mode::Base | Mode::Between => (),
        _ => return TruncatedSnafu.fail(),
    }

    Ok((base, array))
}

impl FromStr for Kind {
    type Err = KindFromStrError;

    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        let (base, array) = parse_kind(txt)?;

        Ok(Self {
            base: base.parse()?,
            array,
        })
    }
}

/// Represents a user-defined Solidity type, like `struct Foo.Bar[][4]`.
#[derive(Debug, Serialize, Clone, Eq, PartialEq, Hash)]
#[serde(into = "String")]
pub struct InternalKind {
    base: String,
    array: SmallVec<[Array; 2]>,
}

impl<'de> Deserialize<'de> for InternalKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let txt = String::deserialize(deserializer)?;
        let obj = Self::from_str(&txt).map_err(D::Error::custom)?;
        Ok(obj)
    }
}

impl InternalKind {
    /// String representation of the base type.
    ///
    /// ## Example
    ///
    /// ```
    /// use abi_form::abi::InternalKind;
    ///
    /// let kind: InternalKind = "struct Foo.Bar[4][][4]".parse().unwrap();
    ///
    /// assert_eq!(kind.base(), "struct Foo.Bar");
    /// ```
    #[inline]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Array dimensions of this internal type.
    #[inline]
    pub fn array(&self) -> &[Array] {
        &self.array
    }

    /// The base type with every array dimension replaced by `depth` variable
    /// sized dimensions.
    ///
    /// ```
    /// use abi_form::abi::InternalKind;
    ///
    /// let kind: InternalKind = "struct Foo.Bar[][3]".parse().unwrap();
    ///
    /// assert_eq!(kind.with_variable_arrays(1).to_string(), "struct Foo.Bar[]");
    /// ```
    pub fn with_variable_arrays(&self, depth: usize) -> Self {
        Self {
            base: self.base.clone(),
            array: core::iter::repeat(Array::Variable).take(depth).collect(),
        }
    }
}

impl From<Kind> for InternalKind {
    fn from(kind: Kind) -> Self {
        Self {
            base: kind.base.to_string(),
            array: kind.array,
        }
    }
}

impl FromStr for InternalKind {
    type Err = KindFromStrError;

    /// Only trailing `[..]` groups are parsed, so bases like
    /// `function (uint256) external returns (uint256)` are kept verbatim.
    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        let mut base = txt;
        let mut array: SmallVec<[Array; 2]> = SmallVec::new();

        while let Some(rest) = base.strip_suffix(']') {
            let open = rest.rfind('[').context(TruncatedSnafu)?;
            let size = &rest[open + 1..];

            let dimension = if size.is_empty() {
                Array::Variable
            } else {
                Array::Fixed(size.parse()?)
            };

            array.push(dimension);
            base = &rest[..open];
        }

        array.reverse();

        Ok(Self {
            base: base.to_string(),
            array,
        })
    }
}

impl fmt::Display for InternalKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.base)?;
        write_arrays(f, &self.array)
    }
}

impl From<InternalKind> for String {
    fn from(k: InternalKind) -> Self {
        k.to_string()
    }
}

/// Description of an input or output parameter.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "RawParameter", into = "RawParameter")]
pub struct Parameter {
    internal_kind: InternalKind,

    /// `false` when `internalType` was absent and `internal_kind` mirrors
    /// `kind`.
    declared: bool,

    name: String,
    kind: Kind,
    components: Option<Vec<Self>>,
}

/// Wire shape of [`Parameter`]. Older compilers, Vyper, and hand-written ABIs
/// omit `internalType`.
#[derive(Serialize, Deserialize)]
struct RawParameter {
    #[serde(
        rename = "internalType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    internal_kind: Option<InternalKind>,

    #[serde(default)]
    name: String,

    #[serde(rename = "type")]
    kind: Kind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    components: Option<Vec<Parameter>>,
}

impl From<RawParameter> for Parameter {
    fn from(raw: RawParameter) -> Self {
        let declared = raw.internal_kind.is_some();
        let internal_kind = match raw.internal_kind {
            Some(k) => k,
            None => raw.kind.clone().into(),
        };

        Self {
            internal_kind,
            declared,
            name: raw.name,
            kind: raw.kind,
            components: raw.components,
        }
    }
}

impl From<Parameter> for RawParameter {
    fn from(p: Parameter) -> Self {
        Self {
            internal_kind: p.declared.then(|| p.internal_kind),
            name: p.name,
            kind: p.kind,
            components: p.components,
        }
    }
}

impl Parameter {
    /// Create a new parameter.
    ///
    /// `components` should be `Some` exactly when `kind` is a tuple, otherwise
    /// forms built from this parameter will be rejected.
    pub fn new<S: Into<String>>(
        internal_kind: InternalKind,
        name: S,
        kind: Kind,
        components: Option<Vec<Self>>,
    ) -> Self {
        Self {
            internal_kind,
            declared: true,
            name: name.into(),
            kind,
            components,
        }
    }

    /// Shorthand for a parameter without components whose internal type is the
    /// same as its ABI type.
    pub fn scalar<S: Into<String>>(name: S, kind: Kind) -> Self {
        Self::new(kind.clone().into(), name, kind, None)
    }

    /// Internal type of this parameter.
    ///
    /// This is where information about structs and other complex data types can
    /// be found. When the ABI omits `internalType`, this is the ABI type.
    #[inline]
    pub fn internal_kind(&self) -> &InternalKind {
        &self.internal_kind
    }

    /// Name of this parameter. Possibly empty.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Actual ABI type of this parameter.
    ///
    /// For structs, this will be `tuple`.
    #[inline]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// For complex data types, the parameters that describe the structure of this
    /// parameter. Empty when there are none.
    #[inline]
    pub fn components(&self) -> &[Self] {
        self.components.as_deref().unwrap_or_default()
    }

    /// Whether the `components` field was present at all.
    #[inline]
    pub fn has_components(&self) -> bool {
        self.components.is_some()
    }

    pub(crate) fn with_components(&self, components: Vec<Self>) -> Self {
        Self {
            internal_kind: self.internal_kind.clone(),
            declared: self.declared,
            name: self.name.clone(),
            kind: self.kind.clone(),
            components: Some(components),
        }
    }

    /// Find the first parameter in this tree whose `components` disagree with
    /// its type: a tuple without components, or components on anything else.
    pub fn malformed(&self) -> Option<&Self> {
        if self.kind.is_tuple() != self.has_components() {
            return Some(self);
        }

        self.components().iter().find_map(Self::malformed)
    }
}

/// Description of a function exposed in the ABI.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub(crate) inputs: Vec<Parameter>,
    #[serde(default)]
    pub(crate) outputs: Vec<Parameter>,
    pub(crate) name: String,
    pub(crate) state_mutability: StateMutability,
}

impl Function {
    /// Parameters this function accepts as arguments.
    #[inline]
    pub fn inputs(&self) -> &[Parameter] {
        self.inputs.as_slice()
    }

    /// Parameters this function returns.
    #[inline]
    pub fn outputs(&self) -> &[Parameter] {
        self.outputs.as_slice()
    }

    /// Name of this function.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of how this function may modify state.
    #[inline]
    pub fn state_mutability(&self) -> StateMutability {
        self.state_mutability
    }
}

/// Description of an argument to an event.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventParameter {
    indexed: bool,

    #[serde(flatten)]
    parameter: Parameter,
}

impl EventParameter {
    /// Whether this event parameter is included as part of the topic.
    pub fn indexed(&self) -> bool {
        self.indexed
    }

    /// The parameter description itself.
    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }
}

/// Description of an event specified by an ABI.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    anonymous: bool,
    inputs: Vec<EventParameter>,
    name: String,
}

impl Event {
    /// False if this event has a name, true otherwise.
    #[inline]
    pub fn anonymous(&self) -> bool {
        self.anonymous
    }

    /// Parameters captured by this event.
    #[inline]
    pub fn inputs(&self) -> &[EventParameter] {
        self.inputs.as_slice()
    }

    /// Name of this event.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Description of a contract's constructor.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    inputs: Vec<Parameter>,
    state_mutability: StateMutability,
}

impl Constructor {
    /// Parameters passed at deployment.
    #[inline]
    pub fn inputs(&self) -> &[Parameter] {
        self.inputs.as_slice()
    }
}

/// Description of a custom error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CustomError {
    inputs: Vec<Parameter>,
    name: String,
}

impl CustomError {
    /// Name of this error.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values carried by this error.
    #[inline]
    pub fn inputs(&self) -> &[Parameter] {
        self.inputs.as_slice()
    }
}

/// The `fallback` or `receive` function.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Special {
    state_mutability: StateMutability,
}

/// An ABI item.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Entry {
    /// Function described by the ABI.
    Function(Function),

    /// Event described by the ABI.
    Event(Event),

    /// Constructor described by the ABI.
    Constructor(Constructor),

    /// Custom error described by the ABI.
    Error(CustomError),

    /// Fallback function.
    Fallback(Special),

    /// Receive function.
    Receive(Special),
}

impl Entry {
    /// If this entry is an event, return it. Otherwise return `None`.
    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }

    /// If this entry is function, return it. Otherwise return `None`.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

/// Parse an ABI description from text.
pub fn from_str(text: &str) -> Result<Vec<Entry>, Error> {
    let result = serde_json::from_str(text)
        .map_err(JsonError::from)
        .context(JsonSnafu)?;
    Ok(result)
}

/// Parse an ABI description from a reader.
pub fn from_reader<R>(reader: R) -> Result<Vec<Entry>, Error>
where
    R: std::io::Read,
{
    let result = serde_json::from_reader(reader)
        .map_err(JsonError::from)
        .context(JsonSnafu)?;
    Ok(result)
}

/// Parse an ABI description from a byte slice.
pub fn from_slice(bytes: &[u8]) -> Result<Vec<Entry>, Error> {
    let result = serde_json::from_slice(bytes)
        .map_err(JsonError::from)
        .context(JsonSnafu)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[crate::test]
    fn parse_uint_alias() {
        let actual: Kind = "uint".parse().unwrap();
        assert_eq!(actual, Kind::uint(256).unwrap());
    }

    #[crate::test]
    fn parse_int8() {
        let actual: Kind = "int8".parse().unwrap();
        let expected = Kind {
            base: Base::Int(8),
            array: SmallVec::new(),
        };

        assert_eq!(actual, expected);
    }

    #[crate::test]
    fn parse_addr() {
        "addr".parse::<Kind>().unwrap_err();
    }

    #[crate::test]
    fn parse_ufixed8x1x1() {
        "ufixed8x1x1".parse::<Kind>().unwrap_err();
    }

    #[crate::test]
    fn parse_tuple_nested_arrays() {
        let actual: Kind = "tuple[][3]".parse().unwrap();
        let expected = Kind {
            base: Base::Tuple,
            array: From::from(&[Array::Variable, Array::Fixed(3.try_into().unwrap())] as &[_]),
        };

        assert_eq!(actual, expected);
        assert_eq!(2, actual.depth());
        assert!(actual.is_tuple());
    }

    #[crate::test]
    fn parse_unclosed_array() {
        "tuple[][".parse::<Kind>().unwrap_err();
    }

    #[crate::test]
    fn internal_kind_with_underscores() {
        let kind: InternalKind = "struct Mission_Vault.Enroll_Req[]".parse().unwrap();
        assert_eq!(kind.base(), "struct Mission_Vault.Enroll_Req");
        assert_eq!(kind.array(), [Array::Variable]);
    }

    #[crate::test]
    fn internal_kind_function_pointer() {
        let kind: InternalKind = "function (uint256) external returns (uint256)[2][]"
            .parse()
            .unwrap();

        assert_eq!(kind.base(), "function (uint256) external returns (uint256)");
        assert_eq!(
            kind.array(),
            [Array::Fixed(2.try_into().unwrap()), Array::Variable]
        );
    }

    #[crate::test]
    fn internal_kind_unopened_array() {
        "struct Foo]".parse::<InternalKind>().unwrap_err();
    }

    #[crate::test]
    fn missing_internal_type_mirrors_type() {
        let input = r#"{ "name": "to", "type": "address[]" }"#;

        let param: Parameter = serde_json::from_str(input).unwrap();
        assert_eq!(param.internal_kind().to_string(), "address[]");

        let json = serde_json::to_value(&param).unwrap();
        assert!(json.get("internalType").is_none());
    }

    #[crate::test]
    fn malformed_tuple_without_components() {
        let input = r#"{
            "internalType": "struct Foo.Bar",
            "name": "bar",
            "type": "tuple"
        }"#;

        let param: Parameter = serde_json::from_str(input).unwrap();
        assert_eq!(param.malformed(), Some(&param));
    }

    #[crate::test]
    fn malformed_nested_component() {
        let input = r#"{
            "internalType": "struct Foo.Bar",
            "name": "bar",
            "type": "tuple",
            "components": [
                {
                    "internalType": "uint256",
                    "name": "x",
                    "type": "uint256",
                    "components": []
                }
            ]
        }"#;

        let param: Parameter = serde_json::from_str(input).unwrap();
        assert_eq!(param.malformed().unwrap().name(), "x");
    }

    #[crate::test]
    fn empty_components_are_well_formed() {
        let input = r#"{
            "internalType": "struct Foo.Empty",
            "name": "",
            "type": "tuple",
            "components": []
        }"#;

        let param: Parameter = serde_json::from_str(input).unwrap();
        assert!(param.malformed().is_none());
        assert!(param.components().is_empty());
    }
}
