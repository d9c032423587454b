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

//! File descriptors.

use std::fmt;
use std::os::unix::io::RawFd;

/// File descriptor
///
/// This is the integer the host kernel uses to identify an open file in the
/// current process. Redirections address file descriptors by these small
/// integers.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fd(pub RawFd);

impl Fd {
    /// File descriptor of the standard input
    pub const STDIN: Fd = Fd(0);
    /// File descriptor of the standard output
    pub const STDOUT: Fd = Fd(1);
    /// File descriptor of the standard error
    pub const STDERR: Fd = Fd(2);
}

/// Lowest file descriptor the shell uses to save descriptors it must
/// restore after a redirection scoped to a function call.
///
/// POSIX reserves descriptors 0 through 9 for the user; the shell keeps its
/// internal descriptors at or above this value.
pub const MIN_INTERNAL_FD: Fd = Fd(10);

impl From<RawFd> for Fd {
    fn from(raw_fd: RawFd) -> Fd {
        Fd(raw_fd)
    }
}

impl fmt::Display for Fd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
