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

//! Implementations of [`FromStr`] for syntax types.
//!
//! Parsing a `&str` runs the real parser, so `"a && b".parse::<List>()` is
//! the easiest way to get an AST in tests and in command substitution.

use super::error::SyntaxError;
use super::Parser;
use crate::syntax::List;
use std::str::FromStr;

impl FromStr for List {
    type Err = SyntaxError;

    /// Parses a whole program.
    fn from_str(s: &str) -> Result<List, SyntaxError> {
        Parser::from_memory(s).program()
    }
}
