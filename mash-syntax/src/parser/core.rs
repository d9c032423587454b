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

//! Buffered token stream feeding the parser.
//!
//! The stream keeps up to two tokens read ahead of the parser. One token of
//! lookahead drives all of the grammar except function definitions, which
//! need a second token to recognize `name (` before committing to a simple
//! command.

use super::error::{Result, SyntaxError};
use super::lex::{Lexer, Token, TokenId};
use crate::syntax::Word;
use std::collections::VecDeque;

/// One- and two-token lookahead over the lexer
#[derive(Clone, Debug)]
pub struct TokenStream {
    lexer: Lexer,
    tokens: VecDeque<Token>,
}

impl TokenStream {
    /// Creates a stream over the given lexer.
    #[must_use]
    pub fn new(lexer: Lexer) -> TokenStream {
        TokenStream {
            lexer,
            tokens: VecDeque::with_capacity(2),
        }
    }

    /// Reads tokens from the lexer until `count` tokens are buffered.
    fn fill(&mut self, count: usize) -> Result<()> {
        while self.tokens.len() < count {
            let token = self.lexer.next_token()?;
            self.tokens.push_back(token);
        }
        Ok(())
    }

    /// Returns a reference to the current token.
    pub fn peek(&mut self) -> Result<&Token> {
        self.fill(1)?;
        Ok(&self.tokens[0])
    }

    /// Returns a reference to the token after the current token.
    ///
    /// This is used exclusively to detect a function definition.
    pub fn peek_second(&mut self) -> Result<&Token> {
        self.fill(2)?;
        Ok(&self.tokens[1])
    }

    /// Consumes and returns the current token.
    pub fn take(&mut self) -> Result<Token> {
        self.fill(1)?;
        Ok(self.tokens.pop_front().expect("the buffer was just filled"))
    }

    /// Tests if the current token has the given identifier, without
    /// reserved-word classification.
    pub fn at(&mut self, id: TokenId) -> Result<bool> {
        Ok(self.peek()?.id() == id)
    }

    /// Tests if the current token has the given identifier, with
    /// reserved-word classification.
    pub fn at_reserved(&mut self, id: TokenId) -> Result<bool> {
        Ok(self.peek()?.id_reserved() == id)
    }

    /// Consumes the current token if it has the given identifier, without
    /// reserved-word classification.
    pub fn eat(&mut self, id: TokenId) -> Result<bool> {
        let hit = self.at(id)?;
        if hit {
            self.take()?;
        }
        Ok(hit)
    }

    /// Consumes the current token if it has the given identifier, with
    /// reserved-word classification.
    pub fn eat_reserved(&mut self, id: TokenId) -> Result<bool> {
        let hit = self.at_reserved(id)?;
        if hit {
            self.take()?;
        }
        Ok(hit)
    }

    /// Consumes the current token, which must be an ordinary word.
    pub fn take_word(&mut self) -> Result<Word> {
        if self.at(TokenId::Word)? {
            Ok(Word(self.take()?.value))
        } else {
            Err(self.unexpected())
        }
    }

    /// Builds the syntax error for an unexpected current token.
    ///
    /// The token must have been peeked already; otherwise the error reports
    /// an unexpected end of input.
    #[must_use]
    pub fn unexpected(&self) -> SyntaxError {
        match self.tokens.front() {
            Some(token) if !token.value.is_empty() => {
                SyntaxError::UnexpectedToken(token.value.clone())
            }
            _ => SyntaxError::UnexpectedEndOfInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lex::{Keyword, Operator};

    fn stream(source: &str) -> TokenStream {
        TokenStream::new(Lexer::from_memory(source))
    }

    #[test]
    fn peek_does_not_consume() {
        let mut s = stream("a b");
        assert_eq!(s.peek().unwrap().value, "a");
        assert_eq!(s.peek().unwrap().value, "a");
        assert_eq!(s.take().unwrap().value, "a");
        assert_eq!(s.peek().unwrap().value, "b");
    }

    #[test]
    fn two_token_lookahead() {
        let mut s = stream("f ( )");
        assert_eq!(s.peek_second().unwrap().value, "(");
        assert_eq!(s.peek().unwrap().value, "f");
        assert_eq!(s.take().unwrap().value, "f");
        assert_eq!(s.peek_second().unwrap().value, ")");
    }

    #[test]
    fn end_of_input_repeats() {
        let mut s = stream("a");
        s.take().unwrap();
        assert!(s.at(TokenId::EndOfInput).unwrap());
        s.take().unwrap();
        assert!(s.at(TokenId::EndOfInput).unwrap());
    }

    #[test]
    fn classification_accessors() {
        let mut s = stream("if ;");
        assert!(s.at(TokenId::Word).unwrap());
        assert!(!s.at_reserved(TokenId::Word).unwrap());
        assert!(s
            .at_reserved(TokenId::Reserved(Keyword::If))
            .unwrap());
        assert!(!s.eat(TokenId::Operator(Operator::Semicolon)).unwrap());
        assert!(s.eat_reserved(TokenId::Reserved(Keyword::If)).unwrap());
        assert!(s.eat(TokenId::Operator(Operator::Semicolon)).unwrap());
        assert!(s.at(TokenId::EndOfInput).unwrap());
    }

    #[test]
    fn take_word_rejects_operators() {
        let mut s = stream("| x");
        assert_eq!(
            s.take_word().unwrap_err(),
            SyntaxError::UnexpectedToken("|".to_string())
        );
    }

    #[test]
    fn unexpected_at_end_of_input() {
        let mut s = stream("");
        s.peek().unwrap();
        assert_eq!(s.unexpected(), SyntaxError::UnexpectedEndOfInput);
    }
}
