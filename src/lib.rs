// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! # abi-form
//!
//! Builds editable forms for calling contract functions, from a JSON
//! description of the contract's [ABI].
//!
//! Each function argument gets one slot in a flat, ordered form state. Struct
//! arguments (`tuple`) and arrays of structs (`tuple[]`) get nested forms of
//! their own, which store their value in the parent as JSON text. When the
//! user is done, the form's raw text is normalized into a list of arguments
//! that can be handed to an ABI encoder.
//!
//! ## Example
//!
//! ```
//! use abi_form::ContractForm;
//! use abi_form::render::Path;
//!
//! use serde_json::json;
//!
//! # let abi = include_str!("../tests/abi/token.json");
//! let mut contract = ContractForm::<()>::new().read_str(abi).unwrap();
//!
//! let mut form = contract.form("transfer").unwrap();
//!
//! form.set(&Path::new(&[0]), "0x1111111111111111111111111111111111111111").unwrap();
//! form.set(&Path::new(&[1]), "1000").unwrap();
//!
//! assert_eq!(
//!     contract.arguments(&form),
//!     [json!("0x1111111111111111111111111111111111111111"), json!("1000")],
//! );
//! ```
//!
//! [ABI]: https://docs.soliditylang.org/en/v0.8.12/abi-spec.html
//!
//! ## Features
//!
//!  - `backtraces`: Collect backtraces on error types.

#![deny(unsafe_code)]
#![warn(missing_docs, unused_qualifications)]

pub mod abi;
pub mod adjust;
pub mod editor;
pub mod key;
pub mod normalize;
pub mod render;
pub mod state;
#[cfg(target_arch = "wasm32")]
mod wasm;

use crate::normalize::{coerced_literals, parse_args, NormalizedArgs};
use crate::render::FunctionForm;

use snafu::{Backtrace, Snafu};

#[cfg(all(target_arch = "wasm32", test))]
#[doc(hidden)]
use wasm_bindgen_test::wasm_bindgen_test as test;

#[cfg(all(not(target_arch = "wasm32"), test))]
#[doc(hidden)]
use core::prelude::v1::test;

/// Errors that can arise while building or editing a form.
#[derive(Debug, Snafu)]
pub enum Error {
    /// Problem encountered while decoding the ABI.
    #[snafu(context(false))]
    Abi {
        /// Underlying source of the error.
        #[snafu(backtrace)]
        source: abi::Error,
    },

    /// Problem encountered while interacting with the file system.
    FileSystem {
        /// Underlying source of the error.
        source: std::io::Error,

        /// Location of the file or directory.
        path: std::path::PathBuf,
    },

    /// A `tuple` without components, or components on something else.
    #[snafu(display("parameter `{name}` of type `{kind}` does not match its components"))]
    MalformedParameter {
        /// Location where the error was generated.
        backtrace: Backtrace,

        /// Name of the offending parameter.
        name: String,

        /// Type of the offending parameter.
        kind: String,
    },

    /// The ABI has no function with the requested name.
    #[snafu(display("no function named `{name}`"))]
    UnknownFunction {
        /// Location where the error was generated.
        backtrace: Backtrace,

        /// The requested name.
        name: String,
    },

    /// A path that does not lead to a node that can handle the request.
    #[snafu(display("nothing at `{path}` can handle this request"))]
    InvalidPath {
        /// Location where the error was generated.
        backtrace: Backtrace,

        /// The path, as text.
        path: String,
    },

    /// Removing a slot from an array that has none.
    #[snafu(display("array at `{path}` has no slot to remove"))]
    NoSlotToRemove {
        /// Location where the error was generated.
        backtrace: Backtrace,

        /// The path, as text.
        path: String,
    },
}

/// Warnings that can arise while building a form or collecting its arguments.
///
/// Unlike [`Error`], these warnings do not stop anything.
#[derive(Debug, Snafu)]
pub enum Warning {
    /// A value that will reach the encoder as a boolean, which is almost
    /// certainly wrong for anything but a `bool` parameter.
    #[snafu(display("`{literal}` under `{key}` will be submitted as a boolean"))]
    BooleanCoercion {
        /// Top level form key the value was found under.
        key: String,

        /// The raw text.
        literal: String,
    },

    /// Two fields derived the same key, so only the first has a slot.
    #[snafu(display("more than one field of `{function}` has the key `{key}`"))]
    KeyCollision {
        /// Name of the function.
        function: String,

        /// The shared key.
        key: String,
    },
}

/// Wrapper for [`Error`] and [`Warning`] that provides the source location.
#[derive(Debug, Snafu)]
pub struct Locate<E>
where
    E: 'static + snafu::ErrorCompat + snafu::AsErrorSource + core::fmt::Display,
{
    #[snafu(backtrace, source)]
    inner: E,

    #[snafu(source(false))]
    source: String,
}

impl<E> Locate<E>
where
    E: 'static + snafu::ErrorCompat + snafu::AsErrorSource + core::fmt::Display,
{
    /// Get a reference to the inner error.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Consume this instance and return the inner error.
    pub fn into_inner(self) -> E {
        self.inner
    }

    /// Source location causing the error: the ABI source while reading, or
    /// the function name while building and collecting forms.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A trait that handles errors and warnings.
pub trait Reporter {
    /// Report that a fatal error has occurred.
    fn error(&mut self, _error: Locate<Error>) {}

    /// Report that a non-fatal warning has occurred.
    fn warning(&mut self, _warning: Locate<Warning>) {}
}

impl Reporter for () {}

/// Forms for the functions of one contract.
///
/// See the crate for an example.
#[derive(Debug)]
pub struct ContractForm<R> {
    reporter: R,
    source: Option<String>,
    functions: Vec<abi::Function>,
}

impl<R> Default for ContractForm<R>
where
    R: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ContractForm<R>
where
    R: Default,
{
    /// Create a new `ContractForm` with no functions.
    pub fn new() -> Self {
        Self {
            reporter: Default::default(),
            source: None,
            functions: Default::default(),
        }
    }
}

impl<R> ContractForm<R> {
    /// Consume this instance and return its associated reporter.
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Return a reference to the reporter associated with this instance.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Return a mutable reference to the reporter associated with this instance.
    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Every function read so far, in ABI order.
    pub fn functions(&self) -> &[abi::Function] {
        &self.functions
    }

    /// Functions that only read state (`view` and `pure`).
    pub fn read_functions(&self) -> impl Iterator<Item = &abi::Function> {
        self.functions
            .iter()
            .filter(|f| f.state_mutability().is_read())
    }

    /// Functions that may change state.
    pub fn write_functions(&self) -> impl Iterator<Item = &abi::Function> {
        self.functions
            .iter()
            .filter(|f| !f.state_mutability().is_read())
    }

    /// First function called `name`.
    pub fn function(&self, name: &str) -> Option<&abi::Function> {
        self.functions.iter().find(|f| f.name() == name)
    }
}

impl<R> ContractForm<R>
where
    R: Reporter,
{
    /// Create a new `ContractForm`, using `reporter` to handle warnings and
    /// errors.
    pub fn with_reporter(reporter: R) -> Self {
        Self {
            reporter,
            source: None,
            functions: Default::default(),
        }
    }

    fn locate(&self, at: Option<&str>) -> String {
        at.map(str::to_string)
            .or_else(|| self.source.clone())
            .unwrap_or_else(|| "<unknown>".into())
    }

    #[must_use]
    fn require<T, E>(&mut self, at: Option<&str>, result: Result<T, E>) -> Option<T>
    where
        E: snafu::Error + snafu::ErrorCompat + Into<Error>,
    {
        let inner = match result {
            Ok(v) => return Some(v),
            Err(e) => e.into(),
        };

        let wrapper = Locate {
            source: self.locate(at),
            inner,
        };

        self.reporter.error(wrapper);

        None
    }

    fn warn(&mut self, at: Option<&str>, warning: Warning) {
        let wrapper = Locate {
            source: self.locate(at),
            inner: warning,
        };

        self.reporter.warning(wrapper);
    }

    fn read(mut self, entries: &[abi::Entry]) -> Option<Self> {
        let functions = entries.iter().filter_map(abi::Entry::as_function).cloned();

        self.functions.extend(functions);

        tracing::debug!(
            source = self.source.as_deref().unwrap_or("<unknown>"),
            functions = self.functions.len(),
            "read abi"
        );

        self.source = None; // Always clear the source after reading.
        Some(self)
    }

    /// Read an ABI description from a slice.
    ///
    /// ## Example
    ///
    /// ```
    /// use abi_form::ContractForm;
    ///
    /// # let abi = include_bytes!("../tests/abi/token.json");
    /// let contract = ContractForm::<()>::new()
    ///     .read_slice(abi.as_slice())
    ///     .unwrap();
    ///
    /// assert!(contract.function("transfer").is_some());
    /// ```
    pub fn read_slice(mut self, bytes: &[u8]) -> Option<Self> {
        let entries = self.require(None, abi::from_slice(bytes))?;
        self.read(entries.as_slice())
    }

    /// Read an ABI description from a file.
    ///
    /// ## Example
    ///
    /// ```
    /// use abi_form::ContractForm;
    ///
    /// # use std::path::PathBuf;
    /// #
    /// # let path: PathBuf = [
    /// #     env!("CARGO_MANIFEST_DIR"),
    /// #     "tests",
    /// #     "abi",
    /// #     "token.json"
    /// # ].into_iter().collect();
    ///
    /// let contract = ContractForm::<()>::new()
    ///     .read_file(path)
    ///     .unwrap();
    ///
    /// assert!(contract.read_functions().any(|f| f.name() == "balanceOf"));
    /// ```
    pub fn read_file<P>(mut self, path: P) -> Option<Self>
    where
        P: AsRef<std::path::Path>,
    {
        use snafu::ResultExt;

        use std::fs::File;

        let path = path.as_ref();

        if self.source.is_none() {
            self.source = Some(path.display().to_string());
        }

        let file = self.require(None, File::open(path).context(FileSystemSnafu { path }))?;

        let reader = std::io::BufReader::new(file);

        let entries = self.require(None, abi::from_reader(reader))?;
        self.read(entries.as_slice())
    }

    /// Read an ABI description from a string slice.
    pub fn read_str(mut self, text: &str) -> Option<Self> {
        let entries = self.require(None, abi::from_str(text))?;
        self.read(entries.as_slice())
    }

    /// Build the form for the first function called `name`.
    ///
    /// Overloaded functions can be reached through [`ContractForm::form_for`].
    pub fn form(&mut self, name: &str) -> Option<FunctionForm> {
        let function = match self.function(name) {
            Some(f) => f.clone(),
            None => {
                let result = UnknownFunctionSnafu { name }.fail();
                return self.require(Some(name), result);
            }
        };

        self.form_for(&function)
    }

    /// Build the form for `function`, reporting any key collisions.
    pub fn form_for(&mut self, function: &abi::Function) -> Option<FunctionForm> {
        let name = function.name();
        let form = self.require(Some(name), FunctionForm::new(function))?;

        for key in form.collisions() {
            let warning = Warning::KeyCollision {
                function: name.to_string(),
                key: key.to_string(),
            };
            self.warn(Some(name), warning);
        }

        Some(form)
    }

    /// Normalize the arguments of `form`, warning about every value that
    /// will be read as a boolean without being `true` or `false`.
    pub fn arguments(&mut self, form: &FunctionForm) -> NormalizedArgs {
        let name = form.function().name();

        for (key, literal) in coerced_literals(form.form()) {
            let warning = Warning::BooleanCoercion {
                key: key.into(),
                literal,
            };
            self.warn(Some(name), warning);
        }

        parse_args(form.form())
    }
}
