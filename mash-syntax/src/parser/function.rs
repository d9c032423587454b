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

//! Syntax parser for function definitions

use super::error::{Result, SyntaxError};
use super::lex::Keyword::OpenBrace;
use super::lex::Operator::CloseParen;
use super::lex::TokenId;
use super::Parser;
use crate::syntax::FunctionDefinition;
use std::rc::Rc;

impl Parser {
    /// Parses a function definition: `name ( ) body`.
    ///
    /// The current token must be a word and the next token must be a `(`,
    /// which the caller established with two-token lookahead.
    pub fn function_definition(&mut self) -> Result<FunctionDefinition> {
        let name = self.stream.take_word()?;

        let paren = self.stream.take()?;
        debug_assert_eq!(paren.value, "(");

        if !self.stream.eat(TokenId::Operator(CloseParen))? {
            return Err(SyntaxError::UnmatchedParenthesis);
        }

        self.linebreak()?;

        if !self.stream.at_reserved(TokenId::Reserved(OpenBrace))? {
            return Err(SyntaxError::InvalidFunctionBody);
        }
        let body = self.grouping()?;

        Ok(FunctionDefinition {
            name,
            body: Rc::new(body),
        })
    }
}
