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

//! Syntax parser for if command

use super::error::{Result, SyntaxError};
use super::lex::Keyword::{Elif, Else, Fi, Then};
use super::lex::TokenId::Reserved;
use super::Parser;
use crate::syntax::{CompoundCommand, ElifThen};

impl Parser {
    /// Parses an elif-then clause.
    ///
    /// Returns `Ok(None)` if the current token is not `elif`.
    fn elif_then_clause(&mut self) -> Result<Option<ElifThen>> {
        if !self.stream.eat_reserved(Reserved(Elif))? {
            return Ok(None);
        }

        let condition = self.compound_list()?;
        if condition.0.is_empty() {
            return Err(SyntaxError::EmptyElifCondition);
        }
        if !self.stream.eat_reserved(Reserved(Then))? {
            return Err(SyntaxError::ElifMissingThen);
        }

        let body = self.compound_list()?;
        if body.0.is_empty() {
            return Err(SyntaxError::EmptyElifBody);
        }

        Ok(Some(ElifThen { condition, body }))
    }

    /// Parses an if conditional construct.
    ///
    /// The current token must be the `if` reserved word.
    pub fn if_command(&mut self) -> Result<CompoundCommand> {
        let open = self.stream.take()?;
        debug_assert_eq!(open.value, "if");

        let condition = self.compound_list()?;
        if condition.0.is_empty() {
            return Err(SyntaxError::EmptyIfCondition);
        }
        if !self.stream.eat_reserved(Reserved(Then))? {
            return Err(SyntaxError::IfMissingThen);
        }

        let body = self.compound_list()?;
        if body.0.is_empty() {
            return Err(SyntaxError::EmptyIfBody);
        }

        let mut elifs = Vec::new();
        while let Some(elif) = self.elif_then_clause()? {
            elifs.push(elif);
        }

        let r#else = if self.stream.eat_reserved(Reserved(Else))? {
            let content = self.compound_list()?;
            if content.0.is_empty() {
                return Err(SyntaxError::EmptyElse);
            }
            Some(content)
        } else {
            None
        };

        if !self.stream.eat_reserved(Reserved(Fi))? {
            return Err(SyntaxError::UnclosedIf);
        }

        Ok(CompoundCommand::If {
            condition,
            body,
            elifs,
            r#else,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(source: &str) -> CompoundCommand {
        Parser::from_memory(source).if_command().unwrap()
    }

    fn parse_err(source: &str) -> SyntaxError {
        Parser::from_memory(source).if_command().unwrap_err()
    }

    #[test]
    fn parser_if_command_minimum() {
        let result = parse("if a; then b; fi");
        assert_matches!(result, CompoundCommand::If { condition, body, elifs, r#else } => {
            assert_eq!(condition.to_string(), "a");
            assert_eq!(body.to_string(), "b");
            assert_eq!(elifs, []);
            assert_eq!(r#else, None);
        });
    }

    #[test]
    fn parser_if_command_newline_form() {
        let result = parse("if\ntrue\nthen\nfalse\n\nfi");
        assert_matches!(result, CompoundCommand::If { condition, body, .. } => {
            assert_eq!(condition.to_string(), "true");
            assert_eq!(body.to_string(), "false");
        });
    }

    #[test]
    fn parser_if_command_many_elifs() {
        let result = parse("if a; then b; elif c; then d; elif e; then f; fi");
        assert_matches!(result, CompoundCommand::If { elifs, r#else, .. } => {
            assert_eq!(elifs.len(), 2);
            assert_eq!(elifs[0].condition.to_string(), "c");
            assert_eq!(elifs[1].body.to_string(), "f");
            assert_eq!(r#else, None);
        });
    }

    #[test]
    fn parser_if_command_else() {
        let result = parse("if a; then b; else c; d; fi");
        assert_matches!(result, CompoundCommand::If { r#else, .. } => {
            assert_eq!(r#else.unwrap().to_string(), "c; d");
        });
    }

    #[test]
    fn parser_if_command_without_then() {
        assert_eq!(parse_err("if :; fi"), SyntaxError::IfMissingThen);
    }

    #[test]
    fn parser_if_command_without_then_after_elif() {
        assert_eq!(
            parse_err("if a; then b; elif c; fi"),
            SyntaxError::ElifMissingThen
        );
    }

    #[test]
    fn parser_if_command_without_fi() {
        assert_eq!(parse_err("if :; then :; }"), SyntaxError::UnclosedIf);
    }

    #[test]
    fn parser_if_command_empty_parts() {
        assert_eq!(parse_err("if then :; fi"), SyntaxError::EmptyIfCondition);
        assert_eq!(parse_err("if :; then fi"), SyntaxError::EmptyIfBody);
        assert_eq!(
            parse_err("if :; then :; elif then :; fi"),
            SyntaxError::EmptyElifCondition
        );
        assert_eq!(
            parse_err("if :; then :; elif :; then fi"),
            SyntaxError::EmptyElifBody
        );
        assert_eq!(parse_err("if :; then :; else fi"), SyntaxError::EmptyElse);
    }
}
