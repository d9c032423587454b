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

//! This crate defines the shell execution environment.
//!
//! A shell execution environment, [`Env`], is a collection of data that may
//! affect or be affected by the execution of commands. Application-managed
//! parts — [variables](variable), [functions](function), positional
//! parameters, and the last exit status — are plain Rust data owned by the
//! `Env`. System-managed parts are reached through [`RealSystem`], a thin
//! wrapper over the host's process, pipe, file, and user-database
//! facilities.
//!
//! The environment is created once at shell startup and mutated in place by
//! the executor. A subshell never clones the `Env`: forking the process
//! snapshots it, and the child's mutations die with the child.

pub mod function;
pub mod input;
pub mod io;
pub mod semantics;
pub mod system;
pub mod variable;

use self::function::FunctionSet;
use self::io::Fd;
use self::semantics::ExitStatus;
use self::variable::VariableSet;
pub use self::system::RealSystem;
use nix::unistd::Pid;

/// Whole shell execution environment
#[derive(Debug)]
pub struct Env {
    /// Name of the current shell executable or shell script
    ///
    /// Special parameter `0` expands to this value.
    pub arg0: String,

    /// Exit status of the last executed command
    pub exit_status: ExitStatus,

    /// Functions defined in the environment
    pub functions: FunctionSet,

    /// Process ID of the main shell process
    ///
    /// This PID represents the value of the `$` special parameter. It is
    /// not updated in a subshell, so `$$` keeps expanding to the main
    /// shell's PID there.
    pub main_pid: Pid,

    /// Variables defined in the environment
    pub variables: VariableSet,

    /// Interface to the system-managed parts of the environment
    pub system: RealSystem,

    /// Stack of positional parameter frames
    ///
    /// The top frame supplies `$1`, `$2`, …, and `$#`. A new frame is
    /// pushed for every function call and popped when the call returns.
    /// The stack is never empty.
    positional_params: Vec<Vec<String>>,
}

impl Env {
    /// Creates a new environment with the given system.
    ///
    /// The positional parameter stack contains one empty frame, and
    /// `main_pid` is initialized from `system.getpid()`. Variables are not
    /// imported from the host environment; call
    /// [`init_variables`](Self::init_variables) for that.
    #[must_use]
    pub fn with_system(system: RealSystem) -> Env {
        Env {
            arg0: String::new(),
            exit_status: ExitStatus::default(),
            functions: FunctionSet::default(),
            main_pid: system.getpid(),
            variables: VariableSet::default(),
            system,
            positional_params: vec![Vec::new()],
        }
    }

    /// Initializes variables from the host process environment.
    ///
    /// Every `NAME=value` pair in the host environment becomes an exported
    /// variable, so a plain `PATH` lookup or `$HOME` expansion works
    /// without any setup.
    pub fn init_variables(&mut self) {
        self.variables.import_environ();
    }

    /// Returns the current positional parameters.
    #[must_use]
    pub fn positional_params(&self) -> &[String] {
        self.positional_params
            .last()
            .expect("the positional parameter stack is never empty")
    }

    /// Replaces the parameters of the current positional frame.
    pub fn set_positional_params(&mut self, params: Vec<String>) {
        *self
            .positional_params
            .last_mut()
            .expect("the positional parameter stack is never empty") = params;
    }

    /// Pushes a new positional parameter frame for a function call.
    pub fn push_positional_params(&mut self, params: Vec<String>) {
        self.positional_params.push(params);
    }

    /// Pops the positional parameter frame pushed for a function call.
    ///
    /// # Panics
    ///
    /// If the pop would empty the stack. The executor only pops frames it
    /// pushed, so the initial frame stays.
    pub fn pop_positional_params(&mut self) {
        self.positional_params.pop();
        assert!(
            !self.positional_params.is_empty(),
            "the initial positional parameter frame must not be popped"
        );
    }

    /// Prints an error message to the standard error of this environment.
    ///
    /// The message is prefixed with the shell name and terminated with a
    /// newline. Any error from writing is ignored.
    pub fn print_error(&mut self, message: &str) {
        let message = format!("mash: {message}\n");
        let _ = self.system.write_all(Fd::STDERR, message.as_bytes());
    }
}
