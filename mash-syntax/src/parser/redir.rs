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

//! Syntax parser for redirections

use super::error::{Result, SyntaxError};
use super::lex::TokenId;
use super::Parser;
use crate::syntax::{Redir, RedirOp};

impl Parser {
    /// Parses a redirection if the current token starts one.
    ///
    /// Returns `Ok(None)` if the current token is neither an IO_NUMBER nor
    /// a redirection operator. An IO_NUMBER not followed by a redirection
    /// operator this shell supports (a here-document operator, say) is a
    /// syntax error.
    pub fn redirection(&mut self) -> Result<Option<Redir>> {
        let fd = if self.stream.at(TokenId::IoNumber)? {
            match self.stream.take()?.value.parse() {
                Ok(fd) => Some(fd),
                Err(_) => return Err(SyntaxError::FdOutOfRange),
            }
        } else {
            None
        };

        let op = match self.stream.peek()?.id() {
            TokenId::Operator(op) => RedirOp::try_from(op).ok(),
            _ => None,
        };
        let Some(op) = op else {
            return match fd {
                None => Ok(None),
                Some(_) => Err(self.stream.unexpected()),
            };
        };
        self.stream.take()?;

        if !self.stream.at(TokenId::Word)? {
            return Err(SyntaxError::MissingRedirOperand);
        }
        let operand = self.stream.take_word()?;

        Ok(Some(Redir { fd, op, operand }))
    }
}
