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

//! Startup of the mash shell.
//!
//! This crate ties the pieces together: it parses the command-line
//! arguments, builds the execution environment from the host environment,
//! reads command text from the chosen source, and hands it to the
//! read-eval machinery. The process exit status is the exit status of the
//! last command executed.

pub mod input;
pub mod startup;

use mash_env::io::Fd;
use mash_env::semantics::ExitStatus;
use mash_env::{Env, RealSystem};
use mash_semantics::runner::{read_eval_loop, run_program};
use self::startup::Source;

/// Name the shell reports in diagnostics and in `$0` when no better name
/// is available.
const SHELL_NAME: &str = "mash";

/// Runs the shell and returns its exit status.
pub fn bin_main() -> ExitStatus {
    let run = match startup::parse_args(std::env::args()) {
        Ok(run) => run,
        Err(error) => {
            eprintln!("{SHELL_NAME}: {error}");
            return ExitStatus::ERROR;
        }
    };

    // SAFETY: this is the only RealSystem in the process, and the process
    // stays single-threaded.
    let system = unsafe { RealSystem::new() };
    let mut env = Env::with_system(system);
    env.init_variables();
    env.set_positional_params(run.positional_params);

    match run.source {
        Source::CommandString { command, arg0 } => {
            env.arg0 = arg0.unwrap_or_else(|| SHELL_NAME.to_string());
            let _ = run_program(&mut env, &command);
        }

        Source::File { path } => {
            env.arg0 = path.clone();
            match std::fs::read_to_string(&path) {
                Ok(source) => {
                    let _ = run_program(&mut env, &source);
                }
                Err(error) => {
                    env.print_error(&format!("cannot read {path}: {error}"));
                    env.exit_status = ExitStatus::NOT_FOUND;
                }
            }
        }

        Source::Stdin => {
            env.arg0 = SHELL_NAME.to_string();
            if env.system.isatty(Fd::STDIN) {
                // interactive: line at a time, with a prompt; an error only
                // kills the offending line
                let mut input = input::Stdin::new(true);
                read_eval_loop(&mut env, &mut input);
            } else {
                // non-interactive: the whole input is one program
                match std::io::read_to_string(std::io::stdin()) {
                    Ok(source) => {
                        let _ = run_program(&mut env, &source);
                    }
                    Err(error) => {
                        env.print_error(&format!("cannot read commands: {error}"));
                        env.exit_status = ExitStatus::FAILURE;
                    }
                }
            }
        }
    }

    env.exit_status
}
