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

//! Implementation of simple command semantics.
//!
//! After the command words expand to fields, the command falls into one of
//! four classes, each with its own assignment and redirection scoping:
//!
//! - **No fields**: assignments modify the current environment;
//!   redirections happen in a forked child so no descriptor leaks.
//! - **Intrinsic utility**: assignments modify the current environment;
//!   redirections are scoped to the invocation.
//! - **Function call**: like an intrinsic, plus a fresh positional
//!   parameter frame for the duration of the call.
//! - **External utility**: the shell forks; redirections and exported
//!   assignments happen in the child, which then `exec`s the utility. The
//!   parent waits and takes the child's exit status.

use super::{exit_child, Command};
use crate::builtin;
use crate::expansion::{expand_word, expand_words};
use crate::redir::{perform_redirs, restore_fds, SavedFds};
use crate::{Error, Result};
use mash_env::function::Function;
use mash_env::semantics::ExitStatus;
use mash_env::system::{Errno, ForkResult};
use mash_env::variable::Variable;
use mash_env::Env;
use mash_syntax::syntax::{Assign, SimpleCommand};
use std::ffi::CString;
use std::rc::Rc;

impl Command for SimpleCommand {
    fn execute(&self, env: &mut Env) -> Result<()> {
        let fields = expand_words(env, &self.words)?;

        let Some(name) = fields.first() else {
            return execute_absent_command(env, self);
        };

        if let Some(main) = builtin::special(name) {
            return execute_builtin(env, self, main, &fields[1..]);
        }
        if let Some(function) = env.functions.get(name) {
            let function = Rc::clone(function);
            return execute_function(env, self, &function, &fields[1..]);
        }
        if let Some(main) = builtin::regular(name) {
            return execute_builtin(env, self, main, &fields[1..]);
        }
        execute_external_utility(env, self, &fields)
    }
}

/// Performs the assignments of a simple command.
///
/// The value expands without field splitting. With `export`, the variables
/// additionally become environment variables, which is how assignments
/// reach an external utility.
fn perform_assignments(env: &mut Env, assigns: &[Assign], export: bool) -> Result<()> {
    for assign in assigns {
        let value = expand_word(env, &assign.value)?;
        if export {
            env.variables
                .insert(assign.name.clone(), Variable::new(value).export());
        } else {
            env.variables.assign(assign.name.clone(), value);
        }
    }
    Ok(())
}

/// Executes a simple command that has no command word.
fn execute_absent_command(env: &mut Env, command: &SimpleCommand) -> Result<()> {
    perform_assignments(env, &command.assigns, false)?;

    if command.redirs.is_empty() {
        env.exit_status = ExitStatus::SUCCESS;
        return Ok(());
    }

    // Perform the redirections in a forked child so that the descriptors
    // do not leak into the current shell environment.
    match env.system.fork().map_err(Error::Fork)? {
        ForkResult::Child => {
            env.exit_status = ExitStatus::SUCCESS;
            let result = perform_redirs(env, &command.redirs, None);
            exit_child(env, result)
        }
        ForkResult::Parent { child } => {
            let status = env.system.wait(child).map_err(Error::Wait)?;
            env.exit_status = status.into();
            Ok(())
        }
    }
}

/// Executes an intrinsic utility.
fn execute_builtin(
    env: &mut Env,
    command: &SimpleCommand,
    main: builtin::Main,
    args: &[String],
) -> Result<()> {
    perform_assignments(env, &command.assigns, false)?;

    let mut saved = SavedFds::default();
    let result = perform_redirs(env, &command.redirs, Some(&mut saved));
    let result = result.map(|()| env.exit_status = main(env, args));
    restore_fds(env, saved);
    result
}

/// Executes a function call.
fn execute_function(
    env: &mut Env,
    command: &SimpleCommand,
    function: &Function,
    args: &[String],
) -> Result<()> {
    perform_assignments(env, &command.assigns, false)?;

    let mut saved = SavedFds::default();
    if let Err(error) = perform_redirs(env, &command.redirs, Some(&mut saved)) {
        restore_fds(env, saved);
        return Err(error);
    }

    env.push_positional_params(args.to_vec());
    let result = function.body.execute(env);
    env.pop_positional_params();

    restore_fds(env, saved);
    result
}

/// Executes an external utility.
fn execute_external_utility(env: &mut Env, command: &SimpleCommand, fields: &[String]) -> Result<()> {
    match env.system.fork().map_err(Error::Fork)? {
        ForkResult::Child => {
            let result = execute_in_child(env, command, fields);
            exit_child(env, result)
        }
        ForkResult::Parent { child } => {
            let status = env.system.wait(child).map_err(Error::Wait)?;
            env.exit_status = status.into();
            Ok(())
        }
    }
}

/// Prepares the child process and execs the utility. Only returns on error.
fn execute_in_child(env: &mut Env, command: &SimpleCommand, fields: &[String]) -> Result<()> {
    perform_redirs(env, &command.redirs, None)?;
    perform_assignments(env, &command.assigns, true)?;

    let args = fields
        .iter()
        .map(|field| CString::new(field.as_str()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::NulByte)?;
    let envs = env.variables.environ();

    let errno = match env.system.execvpe(&args[0], &args, &envs) {
        Ok(infallible) => match infallible {},
        Err(errno) => errno,
    };

    let (message, status) = match errno {
        Errno::ENOENT => (format!("{}: not found", fields[0]), ExitStatus::NOT_FOUND),
        errno => (
            format!("{}: {errno}", fields[0]),
            ExitStatus::NOT_EXECUTABLE,
        ),
    };
    env.print_error(&message);
    std::process::exit(status.0)
}
