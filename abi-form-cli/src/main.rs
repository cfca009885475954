// Copyright (c) 2022 Sam Wilson.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use abi_form::editor::looks_like_name;
use abi_form::render::{Path, PathFromStrError};
use abi_form::{ContractForm, Error, Locate, Warning};

use clap::{ArgEnum, Parser};

use snafu::{ErrorCompat, OptionExt, ResultExt, Snafu};

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Snafu)]
enum AssignmentFromStrError {
    /// No `=` between the left and right hand sides.
    #[snafu(display("expected `LEFT=RIGHT`"))]
    MissingEquals,

    #[snafu(display("invalid path"))]
    InvalidPath { source: PathFromStrError },
}

/// `PATH=VALUE`, from `--set`.
#[derive(Debug)]
struct Assignment {
    path: Path,
    value: String,
}

impl FromStr for Assignment {
    type Err = AssignmentFromStrError;

    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        let (path, value) = txt.split_once('=').context(MissingEqualsSnafu)?;

        Ok(Self {
            path: path.parse().context(InvalidPathSnafu)?,
            value: value.to_string(),
        })
    }
}

/// `NAME=ADDRESS`, from `--ens`.
#[derive(Debug)]
struct NamedAddress {
    name: String,
    address: String,
}

impl FromStr for NamedAddress {
    type Err = AssignmentFromStrError;

    fn from_str(txt: &str) -> Result<Self, Self::Err> {
        let (name, address) = txt.split_once('=').context(MissingEqualsSnafu)?;

        Ok(Self {
            name: name.to_string(),
            address: address.to_string(),
        })
    }
}

#[derive(Debug, Clone, ArgEnum)]
enum Output {
    /// Normalized call arguments.
    Args,

    /// Raw form state.
    Form,

    /// Description of every field.
    View,
}

#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    /// ABI JSON file.
    source: PathBuf,

    /// Function to fill in. Lists the functions when omitted.
    function: Option<String>,

    /// Append an element to the array of structs at PATH.
    #[clap(long, value_name = "PATH")]
    add_slot: Vec<Path>,

    /// Set the field at PATH (steps joined by `.`) to VALUE.
    #[clap(short, long, value_name = "PATH=VALUE")]
    set: Vec<Assignment>,

    /// Resolve NAME to ADDRESS in address fields.
    #[clap(long, value_name = "NAME=ADDRESS")]
    ens: Vec<NamedAddress>,

    #[clap(short, long, arg_enum, default_value = "args")]
    output: Output,
}

#[derive(Default)]
struct ConsoleReporter;

impl ConsoleReporter {
    fn report<I>(e: I)
    where
        I: 'static + snafu::Error + ErrorCompat,
    {
        eprintln!("{}", e);

        #[cfg(feature = "backtraces")]
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("{}", bt);
        }

        for item in ErrorCompat::iter_chain(&e).skip(1) {
            eprintln!();
            eprintln!("--- Caused by:");
            eprintln!();

            eprintln!("{}", item);
        }
    }
}

impl abi_form::Reporter for ConsoleReporter {
    fn error(&mut self, error: Locate<Error>) {
        eprint!("ERROR ({}): ", error.source());
        Self::report(error.into_inner());
    }

    fn warning(&mut self, warning: Locate<Warning>) {
        eprint!("WARN ({}): ", warning.source());
        Self::report(warning.into_inner());
    }
}

fn check<T>(result: Result<T, Error>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            eprint!("ERROR: ");
            ConsoleReporter::report(e);
            None
        }
    }
}

fn list(contract: &ContractForm<ConsoleReporter>) {
    for function in contract.read_functions() {
        println!("read  {}", function.name());
    }

    for function in contract.write_functions() {
        println!("write {}", function.name());
    }
}

fn print<T: serde::Serialize>(value: &T) -> Option<()> {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            Some(())
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            None
        }
    }
}

fn run() -> Option<()> {
    let args = Args::parse();

    let mut contract = ContractForm::<ConsoleReporter>::new().read_file(&args.source)?;

    let name = match args.function {
        Some(n) => n,
        None => {
            list(&contract);
            return Some(());
        }
    };

    let mut form = contract.form(&name)?;

    for path in &args.add_slot {
        check(form.add_slot(path))?;
    }

    let names: BTreeMap<_, _> = args
        .ens
        .into_iter()
        .map(|n| (n.name, n.address))
        .collect();

    for assignment in &args.set {
        check(form.set(&assignment.path, &assignment.value))?;

        if looks_like_name(&assignment.value) {
            let resolved = check(form.resolve_with(&assignment.path, &names))?;
            tracing::info!(path = %assignment.path, resolved, "name lookup");
        }
    }

    match args.output {
        Output::Args => print(&contract.arguments(&form)),
        Output::Form => print(form.form()),
        Output::View => print(&form.view()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        None => std::process::exit(1),
        Some(_) => (),
    }
}
