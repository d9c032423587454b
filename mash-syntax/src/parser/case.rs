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

//! Syntax parser for case command

use super::error::{Result, SyntaxError};
use super::lex::Keyword::{Esac, In};
use super::lex::Operator::{Bar, CloseParen, OpenParen, SemicolonSemicolon};
use super::lex::TokenId;
use super::Parser;
use crate::syntax::{CaseItem, CompoundCommand};

impl Parser {
    /// Parses one item of a case command.
    fn case_item(&mut self) -> Result<CaseItem> {
        self.stream.eat(TokenId::Operator(OpenParen))?;

        let mut patterns = Vec::new();
        loop {
            if !self.stream.at(TokenId::Word)? {
                return Err(SyntaxError::MissingPattern);
            }
            patterns.push(self.stream.take_word()?);
            if !self.stream.eat(TokenId::Operator(Bar))? {
                break;
            }
        }

        if !self.stream.eat(TokenId::Operator(CloseParen))? {
            return Err(SyntaxError::UnclosedPatternList);
        }

        let body = self.compound_list()?;

        Ok(CaseItem { patterns, body })
    }

    /// Parses a case conditional construct.
    ///
    /// The current token must be the `case` reserved word.
    pub fn case_command(&mut self) -> Result<CompoundCommand> {
        let open = self.stream.take()?;
        debug_assert_eq!(open.value, "case");

        if !self.stream.at(TokenId::Word)? {
            return Err(SyntaxError::MissingCaseSubject);
        }
        let subject = self.stream.take_word()?;

        self.linebreak()?;
        if !self.stream.eat_reserved(TokenId::Reserved(In))? {
            return Err(SyntaxError::MissingIn);
        }
        self.linebreak()?;

        let mut items = Vec::new();
        loop {
            if self.stream.eat_reserved(TokenId::Reserved(Esac))? {
                break;
            }
            if self.stream.at(TokenId::EndOfInput)? {
                return Err(SyntaxError::UnclosedCase);
            }

            items.push(self.case_item()?);

            if self.stream.eat(TokenId::Operator(SemicolonSemicolon))? {
                self.linebreak()?;
            } else if self.stream.eat_reserved(TokenId::Reserved(Esac))? {
                break;
            } else {
                return Err(SyntaxError::UnclosedCase);
            }
        }

        Ok(CompoundCommand::Case { subject, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(source: &str) -> CompoundCommand {
        Parser::from_memory(source).case_command().unwrap()
    }

    fn parse_err(source: &str) -> SyntaxError {
        Parser::from_memory(source).case_command().unwrap_err()
    }

    #[test]
    fn parser_case_command_minimum() {
        let result = parse("case x in esac");
        assert_matches!(result, CompoundCommand::Case { subject, items } => {
            assert_eq!(subject.0, "x");
            assert_eq!(items, []);
        });
    }

    #[test]
    fn parser_case_command_one_item() {
        let result = parse("case $x in (a) echo a;; esac");
        assert_matches!(result, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].patterns.len(), 1);
            assert_eq!(items[0].body.to_string(), "echo a");
        });
    }

    #[test]
    fn parser_case_command_without_open_paren() {
        let result = parse("case x in a) echo a;; esac");
        assert_matches!(result, CompoundCommand::Case { items, .. } => {
            assert_eq!(items[0].patterns[0].0, "a");
        });
    }

    #[test]
    fn parser_case_command_multiple_patterns_and_items() {
        let result = parse("case x in (a | b) echo ab;; (c) echo c;; esac");
        assert_matches!(result, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].patterns.len(), 2);
            assert_eq!(items[1].patterns.len(), 1);
        });
    }

    #[test]
    fn parser_case_command_last_item_without_double_semicolon() {
        let result = parse("case x in (a) echo a esac");
        // `esac` here closes the case because the body list ends at it.
        assert_matches!(result, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 1);
        });
    }

    #[test]
    fn parser_case_command_empty_item_body() {
        let result = parse("case x in (a) ;; (b) ;; esac");
        assert_matches!(result, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].body.0, []);
        });
    }

    #[test]
    fn parser_case_command_newlines_between_items() {
        let result = parse("case x in\n(a) echo a;;\n\n(b) echo b;;\nesac");
        assert_matches!(result, CompoundCommand::Case { items, .. } => {
            assert_eq!(items.len(), 2);
        });
    }

    #[test]
    fn parser_case_command_errors() {
        assert_eq!(parse_err("case"), SyntaxError::MissingCaseSubject);
        assert_eq!(parse_err("case x do"), SyntaxError::MissingIn);
        assert_eq!(parse_err("case x in (a) echo"), SyntaxError::UnclosedCase);
        assert_eq!(parse_err("case x in (a"), SyntaxError::MissingPattern);
        assert_eq!(
            parse_err("case x in (a echo;; esac"),
            SyntaxError::UnclosedPatternList
        );
        assert_eq!(parse_err("case x in"), SyntaxError::UnclosedCase);
    }
}
