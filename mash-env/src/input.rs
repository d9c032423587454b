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

//! Input for the interactive read-eval loop.
//!
//! The line-at-a-time input the interactive loop reads from is a seam: the
//! shell core only needs the [`Input`] trait, and the frontend decides how
//! a line is actually obtained — plain standard input, a line editor with
//! history, or a canned sequence in tests.

/// Line-at-a-time source of command text
pub trait Input {
    /// Reads the next line, without its terminating newline.
    ///
    /// Returns `Ok(None)` at the end of input.
    fn next_line(&mut self) -> std::io::Result<Option<String>>;
}

/// Input that yields a fixed sequence of lines, for tests.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    lines: std::collections::VecDeque<String>,
}

impl Memory {
    /// Creates an input yielding the lines of the given text.
    #[must_use]
    pub fn new(text: &str) -> Memory {
        Memory {
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

impl Input for Memory {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}
