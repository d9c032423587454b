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

//! This crate implements the semantics of the shell language: [word
//! expansion](expansion), [redirection](redir), and [command
//! execution](command).
//!
//! Execution is synchronous. The shell process never runs more than one
//! thread; all concurrency comes from forked child processes, which the
//! parent waits for with a blocking `waitpid`.
//!
//! # Error handling
//!
//! Expansion and runtime errors travel as [`Error`] values up to the
//! enclosing command list, where they are printed to standard error and
//! turned into exit status 1. An error therefore aborts the current
//! command, not the shell. In a forked child, the error is printed and the
//! child exits with status 1.

pub mod builtin;
pub mod command;
pub mod expansion;
pub mod redir;
pub mod runner;

use mash_env::system::Errno;
use mash_syntax::parser::SyntaxError;
use thiserror::Error;

pub use command::Command;

/// Types of errors that may occur in expansion and execution
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Error in parsing the program of a command substitution.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// `${name?}` or `${name:?}` found the parameter missing.
    #[error("{param}: {message}")]
    EmptyOrUnset {
        /// Name of the parameter
        param: String,
        /// Message expanded from the word in the expansion
        message: String,
    },

    /// A parameter expansion contains a modifier this shell does not know.
    #[error("${{{0}}}: invalid parameter expansion")]
    InvalidParam(String),

    /// An arithmetic expansion was asked to evaluate.
    #[error("arithmetic expansion is not supported")]
    ArithmeticUnsupported,

    /// An asynchronous list was asked to execute.
    #[error("asynchronous lists are not supported")]
    AsyncUnsupported,

    /// A redirection target did not expand to exactly one field.
    #[error("{0}: ambiguous redirect")]
    AmbiguousRedirect(String),

    /// The operand of `<&` or `>&` is not a file descriptor or `-`.
    #[error("{0}: not a valid file descriptor")]
    BadFdOperand(String),

    /// A redirection target could not be opened.
    #[error("cannot open {target}: {errno}")]
    OpenRedirect {
        /// The expanded target word
        target: String,
        /// Reason of the failure
        errno: Errno,
    },

    /// A file descriptor could not be duplicated.
    #[error("cannot duplicate file descriptor: {0}")]
    Dup(Errno),

    /// A pipe could not be created.
    #[error("cannot create a pipe: {0}")]
    Pipe(Errno),

    /// A child process could not be created.
    #[error("cannot fork: {0}")]
    Fork(Errno),

    /// Waiting for a child process failed.
    #[error("cannot wait for the child process: {0}")]
    Wait(Errno),

    /// Reading the output of a command substitution failed.
    #[error("cannot read command substitution output: {0}")]
    CommandSubstitution(Errno),

    /// A command name or argument contains a NUL byte and cannot be passed
    /// to the system.
    #[error("command name or argument contains a NUL byte")]
    NulByte,
}

/// Entire result of expansion and execution
pub type Result<T> = std::result::Result<T, Error>;
