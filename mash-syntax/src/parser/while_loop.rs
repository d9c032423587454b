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

//! Syntax parser for while and until loops

use super::error::{Result, SyntaxError};
use super::Parser;
use crate::syntax::CompoundCommand;

impl Parser {
    /// Parses a while or until loop.
    ///
    /// The current token must be the `while` or `until` reserved word,
    /// matching the `until` argument.
    pub fn while_clause(&mut self, until: bool) -> Result<CompoundCommand> {
        let open = self.stream.take()?;
        debug_assert_eq!(open.value, if until { "until" } else { "while" });

        let condition = self.compound_list()?;
        if condition.0.is_empty() {
            return Err(if until {
                SyntaxError::EmptyUntilCondition
            } else {
                SyntaxError::EmptyWhileCondition
            });
        }

        let body = self.do_clause()?;

        Ok(if until {
            CompoundCommand::Until { condition, body }
        } else {
            CompoundCommand::While { condition, body }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parser_while_loop_minimum() {
        let result = Parser::from_memory("while a; do b; done")
            .while_clause(false)
            .unwrap();
        assert_matches!(result, CompoundCommand::While { condition, body } => {
            assert_eq!(condition.to_string(), "a");
            assert_eq!(body.to_string(), "b");
        });
    }

    #[test]
    fn parser_until_loop_minimum() {
        let result = Parser::from_memory("until a; do b; done")
            .while_clause(true)
            .unwrap();
        assert_matches!(result, CompoundCommand::Until { condition, body } => {
            assert_eq!(condition.to_string(), "a");
            assert_eq!(body.to_string(), "b");
        });
    }

    #[test]
    fn parser_while_loop_multi_command_condition() {
        let result = Parser::from_memory("while a; b; do c; done")
            .while_clause(false)
            .unwrap();
        assert_matches!(result, CompoundCommand::While { condition, .. } => {
            assert_eq!(condition.to_string(), "a; b");
        });
    }

    #[test]
    fn parser_while_loop_errors() {
        let e = Parser::from_memory("while do b; done")
            .while_clause(false)
            .unwrap_err();
        assert_eq!(e, SyntaxError::EmptyWhileCondition);

        let e = Parser::from_memory("until do b; done")
            .while_clause(true)
            .unwrap_err();
        assert_eq!(e, SyntaxError::EmptyUntilCondition);

        let e = Parser::from_memory("while a; b; done")
            .while_clause(false)
            .unwrap_err();
        assert_eq!(e, SyntaxError::MissingDoClause);

        let e = Parser::from_memory("while a; do done")
            .while_clause(false)
            .unwrap_err();
        assert_eq!(e, SyntaxError::EmptyDoClause);

        let e = Parser::from_memory("while a; do b; fi")
            .while_clause(false)
            .unwrap_err();
        assert_eq!(e, SyntaxError::UnclosedDoClause);
    }
}
