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

//! Syntax parser for for loops

use super::error::{Result, SyntaxError};
use super::lex::Keyword::In;
use super::lex::Operator::Semicolon;
use super::lex::TokenId;
use super::Parser;
use crate::syntax::{is_name, CompoundCommand};

impl Parser {
    /// Parses a for loop.
    ///
    /// The current token must be the `for` reserved word.
    ///
    /// Whether the loop has an `in` clause is preserved in the result: a
    /// loop without one iterates over the positional parameters, which is
    /// not the same thing as a loop over zero words.
    pub fn for_loop(&mut self) -> Result<CompoundCommand> {
        let open = self.stream.take()?;
        debug_assert_eq!(open.value, "for");

        if !self.stream.at(TokenId::Word)? {
            return Err(SyntaxError::InvalidForName);
        }
        let name = self.stream.take_word()?;
        if !is_name(name.as_str()) {
            return Err(SyntaxError::InvalidForName);
        }

        self.linebreak()?;

        let values = if self.stream.eat_reserved(TokenId::Reserved(In))? {
            let mut values = Vec::new();
            while self.stream.at(TokenId::Word)? {
                values.push(self.stream.take_word()?);
            }
            // The word list must be closed by a `;` or a newline before
            // `do`.
            if self.stream.eat(TokenId::Operator(Semicolon))? {
                self.linebreak()?;
            } else if self.stream.at(TokenId::Newline)? {
                self.linebreak()?;
            } else {
                return Err(self.stream.unexpected());
            }
            Some(values)
        } else {
            self.stream.eat(TokenId::Operator(Semicolon))?;
            self.linebreak()?;
            None
        };

        let body = self.do_clause()?;

        Ok(CompoundCommand::For { name, values, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn parse(source: &str) -> CompoundCommand {
        Parser::from_memory(source).for_loop().unwrap()
    }

    #[test]
    fn parser_for_loop_with_words() {
        let result = parse("for i in 1 2 3; do echo $i; done");
        assert_matches!(result, CompoundCommand::For { name, values, body } => {
            assert_eq!(name.0, "i");
            let values = values.unwrap();
            assert_eq!(values.len(), 3);
            assert_eq!(values[2].0, "3");
            assert_eq!(body.to_string(), "echo $i");
        });
    }

    #[test]
    fn parser_for_loop_with_empty_word_list() {
        let result = parse("for i in; do echo $i; done");
        assert_matches!(result, CompoundCommand::For { values, .. } => {
            assert_eq!(values, Some(vec![]));
        });
    }

    #[test]
    fn parser_for_loop_without_in_clause() {
        let result = parse("for i; do echo $i; done");
        assert_matches!(result, CompoundCommand::For { values, .. } => {
            assert_eq!(values, None);
        });

        let result = parse("for i do echo $i; done");
        assert_matches!(result, CompoundCommand::For { values, .. } => {
            assert_eq!(values, None);
        });
    }

    #[test]
    fn parser_for_loop_newline_separated() {
        let result = parse("for i in a b\ndo echo $i\ndone");
        assert_matches!(result, CompoundCommand::For { values, .. } => {
            assert_eq!(values.unwrap().len(), 2);
        });
    }

    #[test]
    fn parser_for_loop_expansions_in_words() {
        let result = parse("for x in 1$(echo 1 2 3)3; do echo $x; done");
        assert_matches!(result, CompoundCommand::For { values, .. } => {
            let values = values.unwrap();
            assert_eq!(values.len(), 1);
            assert_eq!(values[0].0, "1$(echo 1 2 3)3");
        });
    }

    #[test]
    fn parser_for_loop_invalid_name() {
        let e = Parser::from_memory("for 1x in; do :; done")
            .for_loop()
            .unwrap_err();
        assert_eq!(e, SyntaxError::InvalidForName);

        let e = Parser::from_memory("for; do :; done").for_loop().unwrap_err();
        assert_eq!(e, SyntaxError::InvalidForName);
    }

    #[test]
    fn parser_for_loop_word_list_must_be_terminated() {
        let e = Parser::from_memory("for i in a && b; do :; done")
            .for_loop()
            .unwrap_err();
        assert_eq!(e, SyntaxError::UnexpectedToken("&&".to_string()));
    }

    #[test]
    fn parser_for_loop_do_is_a_word_in_the_list() {
        // `do` is only recognized after a separator, so here it is a word.
        let result = parse("for i in do\ndo echo $i; done");
        assert_matches!(result, CompoundCommand::For { values, .. } => {
            assert_eq!(values.unwrap()[0].0, "do");
        });
    }
}
