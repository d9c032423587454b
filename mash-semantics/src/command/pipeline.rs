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

//! Implementation of pipeline semantics.
//!
//! A one-command pipeline runs in the current shell environment, so
//! assignments and function calls in it take effect. A longer pipeline
//! forks one child per command and connects each child's standard output to
//! the next child's standard input with a pipe. The parent closes its
//! copies of every pipe end as soon as the relevant children hold them,
//! then waits for all children; the status of the pipeline is that of the
//! last command, inverted if the pipeline starts with `!`.

use super::{exit_child, Command};
use crate::{Error, Result};
use mash_env::io::Fd;
use mash_env::semantics::ExitStatus;
use mash_env::system::{self, ForkResult};
use mash_env::Env;
use mash_syntax::syntax::{self, Pipeline};

impl Command for Pipeline {
    fn execute(&self, env: &mut Env) -> Result<()> {
        if !self.negation {
            return execute_commands_in_pipeline(env, &self.commands);
        }

        execute_commands_in_pipeline(env, &self.commands)?;
        env.exit_status = if env.exit_status.is_successful() {
            ExitStatus::FAILURE
        } else {
            ExitStatus::SUCCESS
        };
        Ok(())
    }
}

fn execute_commands_in_pipeline(env: &mut Env, commands: &[syntax::Command]) -> Result<()> {
    match commands.len() {
        0 => {
            env.exit_status = ExitStatus::SUCCESS;
            Ok(())
        }
        1 => commands[0].execute(env),
        _ => execute_multi_command_pipeline(env, commands),
    }
}

fn execute_multi_command_pipeline(env: &mut Env, commands: &[syntax::Command]) -> Result<()> {
    let mut pipes = PipeSet::default();
    let mut pids = Vec::with_capacity(commands.len());

    for (index, command) in commands.iter().enumerate() {
        let has_next = index + 1 < commands.len();
        pipes.shift(env, has_next).map_err(Error::Pipe)?;

        match env.system.fork().map_err(Error::Fork)? {
            ForkResult::Child => {
                let result = pipes
                    .move_to_stdin_stdout(env)
                    .map_err(Error::Dup)
                    .and_then(|()| command.execute(env));
                exit_child(env, result)
            }
            ForkResult::Parent { child } => pids.push(child),
        }
    }

    // close the parent's copy of the last pipe
    pipes.shift(env, false).map_err(Error::Pipe)?;

    for pid in pids {
        let status = env.system.wait(pid).map_err(Error::Wait)?;
        env.exit_status = ExitStatus::from(status);
    }
    Ok(())
}

/// Set of pipe file descriptors that connect commands
#[derive(Clone, Copy, Debug, Default)]
struct PipeSet {
    /// Reader connected to the previous command's output
    read_previous: Option<Fd>,
    /// Reader and writer to the next command
    next: Option<(Fd, Fd)>,
}

impl PipeSet {
    /// Updates the pipe set for the next command.
    ///
    /// Closes the descriptors that are no longer necessary in this process
    /// and opens a new pipe if there is a next command.
    fn shift(&mut self, env: &mut Env, has_next: bool) -> system::Result<()> {
        if let Some(fd) = self.read_previous.take() {
            let _ = env.system.close(fd);
        }

        if let Some((reader, writer)) = self.next.take() {
            let _ = env.system.close(writer);
            self.read_previous = Some(reader);
        }

        if has_next {
            self.next = Some(env.system.pipe()?);
        }
        Ok(())
    }

    /// Moves the pipe ends to standard input and output in a forked child
    /// and closes every descriptor the child does not consume.
    fn move_to_stdin_stdout(self, env: &mut Env) -> system::Result<()> {
        if let Some((reader, writer)) = self.next {
            let _ = env.system.close(reader);
            if writer != Fd::STDOUT {
                env.system.dup2(writer, Fd::STDOUT)?;
                let _ = env.system.close(writer);
            }
        }
        if let Some(reader) = self.read_previous {
            if reader != Fd::STDIN {
                env.system.dup2(reader, Fd::STDIN)?;
                let _ = env.system.close(reader);
            }
        }
        Ok(())
    }
}
