// This file is part of mash, a small POSIX shell.
// Copyright (C) 2026 WATANABE Yuki
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Shell startup: command-line argument parsing.
//!
//! The shell runs in one of three modes:
//!
//! - `mash` — read commands from standard input, interactively if it is a
//!   terminal
//! - `mash -c command [arg0 [args…]]` — execute `command`
//! - `mash script [args…]` — execute the named file

use thiserror::Error;

/// Where the shell reads commands from
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Source {
    /// Standard input
    Stdin,
    /// The operand of the `-c` option
    CommandString {
        /// The command text
        command: String,
        /// Optional override for `$0`
        arg0: Option<String>,
    },
    /// A script file
    File {
        /// Path of the script, which also becomes `$0`
        path: String,
    },
}

/// Result of argument parsing
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Run {
    /// Where command text comes from
    pub source: Source,
    /// Initial positional parameters
    pub positional_params: Vec<String>,
}

/// Error in command-line arguments
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ArgsError {
    /// `-c` appeared without a command string after it.
    #[error("option -c requires an argument")]
    MissingCommandString,
    /// An option other than `-c` was given.
    #[error("unknown option {0}")]
    UnknownOption(String),
}

/// Parses the command-line arguments, including the leading program name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Run, ArgsError> {
    let mut args = args.into_iter().skip(1);

    match args.next() {
        None => Ok(Run {
            source: Source::Stdin,
            positional_params: vec![],
        }),

        Some(option) if option == "-c" => {
            let command = args.next().ok_or(ArgsError::MissingCommandString)?;
            let arg0 = args.next();
            Ok(Run {
                source: Source::CommandString { command, arg0 },
                positional_params: args.collect(),
            })
        }

        Some(option) if option.starts_with('-') && option.len() > 1 => {
            Err(ArgsError::UnknownOption(option))
        }

        Some(path) => Ok(Run {
            source: Source::File { path },
            positional_params: args.collect(),
        }),
    }
}
