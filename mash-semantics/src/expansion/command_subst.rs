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

//! Command substitution
//!
//! A command substitution forks a child that executes the inner program
//! with its standard output connected to a pipe. The parent drains the pipe
//! to the end of file, then waits for the child. The value of the
//! substitution is the captured output with trailing newlines removed.

use crate::command::{exit_child, Command};
use crate::{Error, Result};
use mash_env::io::Fd;
use mash_env::system::ForkResult;
use mash_env::Env;
use mash_syntax::syntax::List;

/// Executes the inner program of a command substitution and returns its
/// output.
pub fn command_substitution(env: &mut Env, program: &str) -> Result<String> {
    let (reader, writer) = env.system.pipe().map_err(Error::Pipe)?;

    match env.system.fork().map_err(Error::Fork)? {
        ForkResult::Child => {
            let result = (|| {
                let _ = env.system.close(reader);
                if writer != Fd::STDOUT {
                    env.system.dup2(writer, Fd::STDOUT).map_err(Error::Dup)?;
                    let _ = env.system.close(writer);
                }
                let list: List = program.parse()?;
                list.execute(env)
            })();
            exit_child(env, result)
        }
        ForkResult::Parent { child } => {
            let _ = env.system.close(writer);

            let mut output = Vec::new();
            let mut buffer = [0; 1024];
            let result = loop {
                match env.system.read(reader, &mut buffer) {
                    Ok(0) => break Ok(()),
                    Ok(count) => output.extend_from_slice(&buffer[..count]),
                    Err(errno) => break Err(Error::CommandSubstitution(errno)),
                }
            };
            let _ = env.system.close(reader);
            env.system.wait(child).map_err(Error::Wait)?;
            result?;

            let mut value = String::from_utf8_lossy(&output).into_owned();
            while value.ends_with('\n') {
                value.pop();
            }
            Ok(value)
        }
    }
}
