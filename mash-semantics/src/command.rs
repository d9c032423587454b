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

//! Command execution.
//!
//! Every syntactic construct implements the [`Command`] trait. Execution
//! updates `env.exit_status`; the `Result` carries expansion and runtime
//! errors upward until the enclosing [`List`] consumes them, prints the
//! diagnostic, and sets the exit status to 1. Lists therefore never fail,
//! which is what lets a script keep running after a broken command.

pub mod compound_command;
pub mod function_definition;
pub mod pipeline;
pub mod simple_command;

use crate::{Error, Result};
use mash_env::semantics::ExitStatus;
use mash_env::Env;
use mash_syntax::syntax;
use mash_syntax::syntax::{AndOr, AndOrList, List};

/// Executable command
pub trait Command {
    /// Executes the command, updating `env.exit_status`.
    fn execute(&self, env: &mut Env) -> Result<()>;
}

impl Command for List {
    fn execute(&self, env: &mut Env) -> Result<()> {
        for item in &self.0 {
            if item.is_async {
                report(env, &Error::AsyncUnsupported);
                continue;
            }
            if let Err(error) = item.and_or.execute(env) {
                report(env, &error);
            }
        }
        Ok(())
    }
}

/// Prints an error and turns it into exit status 1.
fn report(env: &mut Env, error: &Error) {
    env.print_error(&error.to_string());
    env.exit_status = ExitStatus::FAILURE;
}

impl Command for AndOrList {
    /// Executes the pipelines, left to right.
    ///
    /// Each `&&`-connected pipeline runs only if the status so far is zero,
    /// and each `||`-connected pipeline only if it is non-zero. The status
    /// of the list is that of the last pipeline that actually ran.
    fn execute(&self, env: &mut Env) -> Result<()> {
        self.first.execute(env)?;
        for (condition, pipeline) in &self.rest {
            let run = match condition {
                AndOr::AndThen => env.exit_status.is_successful(),
                AndOr::OrElse => !env.exit_status.is_successful(),
            };
            if run {
                pipeline.execute(env)?;
            }
        }
        Ok(())
    }
}

impl Command for syntax::Command {
    fn execute(&self, env: &mut Env) -> Result<()> {
        match self {
            syntax::Command::Simple(command) => command.execute(env),
            syntax::Command::Compound(command) => command.execute(env),
            syntax::Command::Function(command) => command.execute(env),
        }
    }
}

/// Finishes a forked child process.
///
/// On success the child exits with the current exit status; on error the
/// diagnostic is printed and the child exits with status 1. This function
/// never returns, so nothing of the parent's control flow runs in the
/// child.
pub(crate) fn exit_child(env: &mut Env, result: Result<()>) -> ! {
    let status = match result {
        Ok(()) => env.exit_status,
        Err(error) => {
            env.print_error(&error.to_string());
            ExitStatus::FAILURE
        }
    };
    std::process::exit(status.0)
}
