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

//! Top-level drivers that parse and execute command text.
//!
//! [`run_program`] executes one complete program and is the whole story for
//! `-c` strings and script files. [`read_eval_loop`] feeds lines from an
//! [`Input`] to `run_program` one at a time, which is the interactive mode:
//! a lexical or syntax error discards the offending line and the loop goes
//! on with the next one.

use crate::command::Command;
use mash_env::input::Input;
use mash_env::semantics::ExitStatus;
use mash_env::Env;
use mash_syntax::parser::SyntaxError;
use mash_syntax::syntax::List;

/// Parses and executes a whole program.
///
/// On a lexical or syntax error, the diagnostic is printed, the exit
/// status becomes 2, and the error is returned so a non-interactive caller
/// can stop reading.
pub fn run_program(env: &mut Env, source: &str) -> Result<(), SyntaxError> {
    match source.parse::<List>() {
        Ok(list) => {
            let _ = list.execute(env);
            Ok(())
        }
        Err(error) => {
            env.print_error(&error.to_string());
            env.exit_status = ExitStatus::ERROR;
            Err(error)
        }
    }
}

/// Reads and executes lines until the input ends.
///
/// Errors of any kind only abort the current line; the loop continues with
/// the next one. The final exit status is that of the last command
/// executed.
pub fn read_eval_loop(env: &mut Env, input: &mut dyn Input) {
    loop {
        match input.next_line() {
            Ok(Some(line)) => {
                let _ = run_program(env, &line);
            }
            Ok(None) => break,
            Err(error) => {
                env.print_error(&format!("cannot read commands: {error}"));
                env.exit_status = ExitStatus::FAILURE;
                break;
            }
        }
    }
}
