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

//! Syntax parser for grouping and subshell

use super::error::{Result, SyntaxError};
use super::lex::Keyword::CloseBrace;
use super::lex::Operator::CloseParen;
use super::lex::TokenId;
use super::Parser;
use crate::syntax::CompoundCommand;

impl Parser {
    /// Parses a brace grouping.
    ///
    /// The current token must be the `{` reserved word.
    pub fn grouping(&mut self) -> Result<CompoundCommand> {
        let open = self.stream.take()?;
        debug_assert_eq!(open.value, "{");

        let list = self.compound_list()?;
        if list.0.is_empty() {
            return Err(SyntaxError::EmptyGrouping);
        }
        if !self.stream.eat_reserved(TokenId::Reserved(CloseBrace))? {
            return Err(SyntaxError::UnclosedGrouping);
        }

        Ok(CompoundCommand::Grouping(list))
    }

    /// Parses a subshell.
    ///
    /// The current token must be the `(` operator.
    pub fn subshell(&mut self) -> Result<CompoundCommand> {
        let open = self.stream.take()?;
        debug_assert_eq!(open.value, "(");

        let list = self.compound_list()?;
        if list.0.is_empty() {
            return Err(SyntaxError::EmptySubshell);
        }
        if !self.stream.eat(TokenId::Operator(CloseParen))? {
            return Err(SyntaxError::UnclosedSubshell);
        }

        Ok(CompoundCommand::Subshell(list))
    }
}
