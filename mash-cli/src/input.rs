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

//! Line input from standard input.

use mash_env::input::Input;
use std::io::{BufRead, Write};

/// Input that reads lines from standard input.
///
/// With `prompt` enabled, `$ ` is written to standard error before each
/// read. There is no line editing or history; the terminal's own line
/// discipline provides what little editing an interactive session gets.
#[derive(Clone, Debug)]
pub struct Stdin {
    prompt: bool,
}

impl Stdin {
    /// Creates an input, with a prompt iff `prompt` is true.
    #[must_use]
    pub fn new(prompt: bool) -> Stdin {
        Stdin { prompt }
    }
}

impl Input for Stdin {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        if self.prompt {
            let mut stderr = std::io::stderr().lock();
            stderr.write_all(b"$ ")?;
            stderr.flush()?;
        }

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(Some(line))
    }
}
