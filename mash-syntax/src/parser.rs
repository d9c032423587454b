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

//! Syntax parser for the shell language.
//!
//! The parser is a recursive-descent parser over the [token
//! stream](TokenStream). Each syntactic construct is parsed by a method on
//! [`Parser`]; the methods for compound commands live in submodules, one
//! construct per file.
//!
//! The parser is strictly one-pass and consumes the token stream in order.
//! Two tokens of lookahead are enough for the whole grammar: the second
//! token is examined only to tell a function definition `name ( )` from a
//! simple command starting with `name`.

mod case;
mod core;
pub mod error;
mod for_loop;
mod from_str;
mod function;
mod grouping;
mod r#if;
pub mod lex;
mod redir;
mod simple_command;
mod while_loop;

pub use self::core::TokenStream;
pub use self::error::{Result, SyntaxError};

use self::lex::Keyword::*;
use self::lex::Lexer;
use self::lex::Operator::*;
use self::lex::TokenId;
use crate::syntax::*;

/// The shell syntax parser
#[derive(Clone, Debug)]
pub struct Parser {
    stream: TokenStream,
}

impl Parser {
    /// Creates a parser over the given lexer.
    #[must_use]
    pub fn new(lexer: Lexer) -> Parser {
        Parser {
            stream: TokenStream::new(lexer),
        }
    }

    /// Creates a parser over the given source text.
    #[must_use]
    pub fn from_memory(source: &str) -> Parser {
        Parser::new(Lexer::from_memory(source))
    }

    /// Skips zero or more newline tokens.
    fn linebreak(&mut self) -> Result<()> {
        while self.stream.eat(TokenId::Newline)? {}
        Ok(())
    }

    /// Tests if the current token ends a compound list.
    ///
    /// The end tokens are the end of input, `)`, `;;`, and the reserved
    /// words that close or continue an enclosing compound command.
    fn at_compound_list_end(&mut self) -> Result<bool> {
        Ok(match self.stream.peek()?.id_reserved() {
            TokenId::EndOfInput => true,
            TokenId::Operator(CloseParen | SemicolonSemicolon) => true,
            TokenId::Reserved(Then | Else | Elif | Fi | Do | Done | Esac | CloseBrace) => true,
            _ => false,
        })
    }

    /// Parses a whole program: an optional compound list followed by the
    /// end of input.
    pub fn program(&mut self) -> Result<List> {
        self.linebreak()?;
        let list = self.compound_list()?;
        if self.stream.at(TokenId::EndOfInput)? {
            Ok(list)
        } else {
            Err(self.stream.unexpected())
        }
    }

    /// Parses a possibly empty sequence of items up to an end token.
    fn compound_list(&mut self) -> Result<List> {
        let mut items = Vec::new();
        loop {
            self.linebreak()?;
            if self.at_compound_list_end()? {
                return Ok(List(items));
            }
            items.push(self.item()?);
        }
    }

    /// Parses one item: an and-or list with its optional `;` or `&`
    /// terminator.
    fn item(&mut self) -> Result<Item> {
        let first = self.pipeline()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.stream.eat(TokenId::Operator(AndAnd))? {
                AndOr::AndThen
            } else if self.stream.eat(TokenId::Operator(BarBar))? {
                AndOr::OrElse
            } else {
                break;
            };
            self.linebreak()?;
            if self.at_compound_list_end()? {
                return Err(SyntaxError::MissingCommand(op.to_string()));
            }
            rest.push((op, self.pipeline()?));
        }

        let is_async = if self.stream.eat(TokenId::Operator(Semicolon))? {
            false
        } else {
            self.stream.eat(TokenId::Operator(And))?
        };

        Ok(Item {
            and_or: AndOrList { first, rest },
            is_async,
        })
    }

    /// Parses a pipeline: an optional `!` followed by commands separated by
    /// `|`.
    fn pipeline(&mut self) -> Result<Pipeline> {
        let negation = self.stream.eat_reserved(TokenId::Reserved(Bang))?;

        let mut commands = vec![self.command()?];
        while self.stream.eat(TokenId::Operator(Bar))? {
            self.linebreak()?;
            if self.at_compound_list_end()? {
                return Err(SyntaxError::MissingCommand("|".to_string()));
            }
            commands.push(self.command()?);
        }

        Ok(Pipeline { commands, negation })
    }

    /// Tests if the current and next tokens start a function definition.
    fn at_function_definition(&mut self) -> Result<bool> {
        Ok(self.stream.peek()?.id() == TokenId::Word
            && self.stream.peek_second()?.id() == TokenId::Operator(OpenParen))
    }

    /// Parses one command, dispatching on the (reserved-classified) current
    /// token.
    fn command(&mut self) -> Result<Command> {
        let id = self.stream.peek()?.id_reserved();
        match id {
            TokenId::Reserved(OpenBrace) => self.grouping().map(Command::Compound),
            TokenId::Operator(OpenParen) => self.subshell().map(Command::Compound),
            TokenId::Reserved(For) => self.for_loop().map(Command::Compound),
            TokenId::Reserved(Case) => self.case_command().map(Command::Compound),
            TokenId::Reserved(If) => self.if_command().map(Command::Compound),
            TokenId::Reserved(While) => self.while_clause(false).map(Command::Compound),
            TokenId::Reserved(Until) => self.while_clause(true).map(Command::Compound),
            TokenId::Word if self.at_function_definition()? => {
                self.function_definition().map(Command::Function)
            }
            _ => self.simple_command().map(Command::Simple),
        }
    }

    /// Parses a `do … done` clause.
    fn do_clause(&mut self) -> Result<List> {
        if !self.stream.eat_reserved(TokenId::Reserved(Do))? {
            return Err(SyntaxError::MissingDoClause);
        }
        let body = self.compound_list()?;
        if body.0.is_empty() {
            return Err(SyntaxError::EmptyDoClause);
        }
        if !self.stream.eat_reserved(TokenId::Reserved(Done))? {
            return Err(SyntaxError::UnclosedDoClause);
        }
        Ok(body)
    }
}
