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

//! Types used in command execution.

use nix::sys::wait::WaitStatus;
use std::fmt;

/// Result of command execution
///
/// The value is the conventional shell exit status: zero for success, and a
/// value in `1..=255` for failure. A command killed by a signal reports
/// 128 plus the signal number.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ExitStatus(pub i32);

impl ExitStatus {
    /// Exit status of successful executions
    pub const SUCCESS: ExitStatus = ExitStatus(0);

    /// Default exit status of failed executions
    pub const FAILURE: ExitStatus = ExitStatus(1);

    /// Exit status of a command that was found but could not be executed
    pub const NOT_EXECUTABLE: ExitStatus = ExitStatus(126);

    /// Exit status of a command that was not found
    pub const NOT_FOUND: ExitStatus = ExitStatus(127);

    /// Exit status for syntax and lexical errors in a non-interactive shell
    pub const ERROR: ExitStatus = ExitStatus(2);

    /// Returns true if the status is zero.
    #[must_use]
    pub const fn is_successful(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Converts a wait status into the exit status the shell reports.
impl From<WaitStatus> for ExitStatus {
    fn from(status: WaitStatus) -> ExitStatus {
        match status {
            WaitStatus::Exited(_, code) => ExitStatus(code),
            WaitStatus::Signaled(_, signal, _) => ExitStatus(128 + signal as i32),
            _ => ExitStatus::FAILURE,
        }
    }
}
