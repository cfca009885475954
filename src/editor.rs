// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Editors for single (non-tuple) parameters.
//!
//! Editors never reject input. [`Editor::validate`] only describes the text so
//! a front end can highlight it; whatever was typed is what gets submitted.

use crate::abi::{Base, Kind, Parameter};

use alloy_primitives::utils::parse_ether;
use alloy_primitives::{Address, U256};

use serde::Serialize;

/// The control used to edit a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "editor", rename_all = "camelCase")]
pub enum Editor {
    /// Signed or unsigned integer of the given width.
    Integer {
        /// Whether negative values are allowed.
        signed: bool,

        /// Width in bits.
        bits: u16,
    },

    /// Account or contract address, with name lookups.
    Address,

    /// Fixed size byte array (`bytes1` to `bytes32`.)
    FixedBytes {
        /// Size in bytes.
        size: u8,
    },

    /// Variable size byte array.
    Bytes,

    /// UTF-8 string.
    String,

    /// Plain text for everything else: booleans, arrays of scalars, etc.
    Default,
}

/// What an editor thinks of its current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Validity {
    /// Nothing entered yet.
    Empty,

    /// Looks acceptable for the parameter's type.
    Valid,

    /// Will probably fail to encode.
    Invalid,
}

impl Editor {
    /// Pick the editor for a scalar type. Arrays always use [`Editor::Default`],
    /// where values are typed as JSON.
    ///
    /// ## Example
    ///
    /// ```
    /// use abi_form::editor::Editor;
    ///
    /// let editor = Editor::for_kind(&"int24".parse().unwrap());
    /// assert_eq!(editor, Editor::Integer { signed: true, bits: 24 });
    ///
    /// let editor = Editor::for_kind(&"uint8[]".parse().unwrap());
    /// assert_eq!(editor, Editor::Default);
    /// ```
    pub fn for_kind(kind: &Kind) -> Self {
        if kind.depth() > 0 {
            return Self::Default;
        }

        match kind.base() {
            Base::Uint(bits) => Self::Integer {
                signed: false,
                bits,
            },
            Base::Int(bits) => Self::Integer { signed: true, bits },
            Base::Address => Self::Address,
            Base::BytesSized(size) => Self::FixedBytes { size },
            Base::Bytes => Self::Bytes,
            Base::String => Self::String,
            Base::Bool | Base::Fixed(..) | Base::Ufixed(..) | Base::Function | Base::Tuple => {
                Self::Default
            }
        }
    }

    /// Hint shown in an empty editor: `"{type} {name}"`, or just the type for
    /// unnamed parameters.
    pub fn placeholder(parameter: &Parameter) -> String {
        match parameter.name() {
            "" => parameter.kind().to_string(),
            name => format!("{} {}", parameter.kind(), name),
        }
    }

    /// Check `text` against the editor's type.
    pub fn validate(&self, text: &str) -> Validity {
        if text.is_empty() {
            return Validity::Empty;
        }

        let valid = match self {
            Self::Integer { signed, bits } => integer_fits(text, *signed, *bits),
            Self::Address => is_address(text) || looks_like_name(text),
            Self::FixedBytes { size } => {
                decode_hex(text).map_or(false, |b| b.len() <= usize::from(*size))
            }
            Self::Bytes => decode_hex(text).is_some(),
            Self::String | Self::Default => true,
        };

        if valid {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }

    /// The integer editor's "times 10^18" button: read `text` as an amount of
    /// ether (decimals allowed) and return it in wei.
    ///
    /// ## Example
    ///
    /// ```
    /// use abi_form::editor::Editor;
    ///
    /// let editor = Editor::Integer { signed: false, bits: 256 };
    ///
    /// assert_eq!(editor.scale_by_ether("1.5").as_deref(), Some("1500000000000000000"));
    /// assert_eq!(Editor::Address.scale_by_ether("1"), None);
    /// ```
    pub fn scale_by_ether(&self, text: &str) -> Option<String> {
        let signed = match self {
            Self::Integer { signed, .. } => *signed,
            _ => return None,
        };

        let (sign, amount) = match text.strip_prefix('-') {
            Some(rest) if signed => ("-", rest),
            Some(_) => return None,
            None => ("", text),
        };

        let wei = parse_ether(amount).ok()?;
        Some(format!("{}{}", sign, wei))
    }

    /// The byte editors' conversion button: hex becomes text, and text becomes
    /// hex. Fixed size values are padded with zeros on the right, and the
    /// padding is dropped again on the way back.
    ///
    /// ## Example
    ///
    /// ```
    /// use abi_form::editor::Editor;
    ///
    /// let editor = Editor::FixedBytes { size: 4 };
    ///
    /// assert_eq!(editor.toggle_hex("hi").as_deref(), Some("0x68690000"));
    /// assert_eq!(editor.toggle_hex("0x68690000").as_deref(), Some("hi"));
    /// ```
    pub fn toggle_hex(&self, text: &str) -> Option<String> {
        let size = match self {
            Self::FixedBytes { size } => Some(usize::from(*size)),
            Self::Bytes => None,
            _ => return None,
        };

        if text.is_empty() {
            return None;
        }

        if let Some(mut bytes) = decode_hex(text) {
            if size.is_some() {
                let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
                bytes.truncate(end);
            }

            return String::from_utf8(bytes).ok();
        }

        let mut bytes = text.as_bytes().to_vec();

        if let Some(size) = size {
            if bytes.len() > size {
                return None;
            }

            bytes.resize(size, 0);
        }

        Some(format!("0x{}", hex::encode(bytes)))
    }
}

fn decode_hex(text: &str) -> Option<Vec<u8>> {
    hex::decode(text.strip_prefix("0x")?).ok()
}

fn integer_fits(text: &str, signed: bool, bits: u16) -> bool {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) if signed => (true, rest),
        Some(_) => return false,
        None => (false, text),
    };

    let parsed = match digits.strip_prefix("0x") {
        Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16),
        Some(_) => return false,
        None if !digits.is_empty() => U256::from_str_radix(digits, 10),
        None => return false,
    };

    let value = match parsed {
        Ok(v) => v,
        Err(_) => return false,
    };

    let bits = usize::from(bits);

    if bits == 0 {
        return false;
    }

    if !signed {
        return value.bit_len() <= bits;
    }

    let limit = U256::from(1u8) << (bits - 1);

    if negative {
        value <= limit
    } else {
        value < limit
    }
}

/// Hex address with `0x` prefix, checksummed if it uses mixed case.
pub(crate) fn is_address(text: &str) -> bool {
    let hex = match text.strip_prefix("0x") {
        Some(hex) => hex,
        None => return false,
    };

    let address: Address = match text.parse() {
        Ok(a) => a,
        Err(_) => return false,
    };

    let lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let upper = hex.chars().any(|c| c.is_ascii_uppercase());

    !(lower && upper) || address.to_checksum(None) == text
}

/// Whether `text` should be resolved as a name rather than used as an address.
pub fn looks_like_name(text: &str) -> bool {
    text.len() > 4 && (text.ends_with(".eth") || text.ends_with(".xyz"))
}

/// Resolves human readable names to addresses.
///
/// Resolution happens outside of the form (usually asynchronously); see
/// [`FunctionForm::begin_lookup`](crate::render::FunctionForm::begin_lookup).
pub trait NameResolver {
    /// The address `name` currently points to, if any.
    fn resolve(&self, name: &str) -> Option<String>;
}

impl NameResolver for std::collections::BTreeMap<String, String> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Name lookup state of one address editor.
///
/// Every edit starts a new generation. A lookup result is only accepted for the
/// generation it was requested in, so the newest keystroke always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookup {
    generation: u64,
    pending: bool,
    name: Option<String>,
}

impl Lookup {
    pub(crate) fn edited(&mut self) {
        self.generation += 1;
        self.pending = false;
        self.name = None;
    }

    /// Start a lookup for `text`, returning the generation it belongs to.
    pub(crate) fn begin(&mut self, text: &str) -> Option<u64> {
        if !looks_like_name(text) {
            return None;
        }

        self.pending = true;
        Some(self.generation)
    }

    /// Accept a result for `generation`; `name` is what was resolved, or
    /// `None` if resolution failed. Returns false if the result is stale.
    pub(crate) fn complete(&mut self, generation: u64, name: Option<&str>) -> bool {
        if !self.pending || generation != self.generation {
            return false;
        }

        self.pending = false;
        self.name = name.map(str::to_string);
        true
    }

    /// Whether a lookup is in flight.
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Name the current value was resolved from.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
