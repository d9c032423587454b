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

//! Implementation of compound command semantics.

use super::{exit_child, Command};
use crate::expansion::{expand_word, expand_words};
use crate::{Error, Result};
use mash_env::semantics::ExitStatus;
use mash_env::system::ForkResult;
use mash_env::Env;
use mash_syntax::syntax::{CaseItem, CompoundCommand, ElifThen, List, Word};

impl Command for CompoundCommand {
    fn execute(&self, env: &mut Env) -> Result<()> {
        use CompoundCommand::*;
        match self {
            Grouping(body) => body.execute(env),
            Subshell(body) => execute_subshell(env, body),
            For { name, values, body } => execute_for(env, name, values.as_deref(), body),
            Case { subject, items } => execute_case(env, subject, items),
            If {
                condition,
                body,
                elifs,
                r#else,
            } => execute_if(env, condition, body, elifs, r#else.as_ref()),
            While { condition, body } => execute_loop(env, condition, body, false),
            Until { condition, body } => execute_loop(env, condition, body, true),
        }
    }
}

/// Executes the body in a forked child.
///
/// The fork snapshots the whole execution environment, so assignments,
/// function definitions, redirections, and directory changes in the body
/// are invisible to the parent. The subshell's status is the child's exit
/// status.
fn execute_subshell(env: &mut Env, body: &List) -> Result<()> {
    match env.system.fork().map_err(Error::Fork)? {
        ForkResult::Child => {
            let result = body.execute(env);
            exit_child(env, result)
        }
        ForkResult::Parent { child } => {
            let status = env.system.wait(child).map_err(Error::Wait)?;
            env.exit_status = status.into();
            Ok(())
        }
    }
}

/// Executes a for loop.
///
/// Without an `in` clause the loop iterates over the current positional
/// parameters.
fn execute_for(env: &mut Env, name: &Word, values: Option<&[Word]>, body: &List) -> Result<()> {
    let fields = match values {
        Some(words) => expand_words(env, words)?,
        None => env.positional_params().to_vec(),
    };

    env.exit_status = ExitStatus::SUCCESS;
    for field in fields {
        env.variables.assign(name.as_str(), field);
        body.execute(env)?;
    }
    Ok(())
}

/// Executes a case command.
///
/// The subject and the patterns expand without field splitting, and
/// patterns match by literal string equality. The first item with a
/// matching pattern runs its body and ends the case.
fn execute_case(env: &mut Env, subject: &Word, items: &[CaseItem]) -> Result<()> {
    let subject = expand_word(env, subject)?;

    for item in items {
        for pattern in &item.patterns {
            if expand_word(env, pattern)? == subject {
                env.exit_status = ExitStatus::SUCCESS;
                return item.body.execute(env);
            }
        }
    }

    env.exit_status = ExitStatus::SUCCESS;
    Ok(())
}

fn execute_if(
    env: &mut Env,
    condition: &List,
    body: &List,
    elifs: &[ElifThen],
    r#else: Option<&List>,
) -> Result<()> {
    condition.execute(env)?;
    if env.exit_status.is_successful() {
        return body.execute(env);
    }

    for elif in elifs {
        elif.condition.execute(env)?;
        if env.exit_status.is_successful() {
            return elif.body.execute(env);
        }
    }

    match r#else {
        Some(body) => body.execute(env),
        None => {
            env.exit_status = ExitStatus::SUCCESS;
            Ok(())
        }
    }
}

/// Executes a while or until loop.
///
/// The loop's status is the status of the last body execution, or zero if
/// the body never ran.
fn execute_loop(env: &mut Env, condition: &List, body: &List, until: bool) -> Result<()> {
    let mut status = ExitStatus::SUCCESS;
    loop {
        condition.execute(env)?;
        if env.exit_status.is_successful() == until {
            break;
        }
        body.execute(env)?;
        status = env.exit_status;
    }
    env.exit_status = status;
    Ok(())
}
