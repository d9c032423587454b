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

//! Syntax parser for simple commands

use super::error::Result;
use super::lex::TokenId;
use super::Parser;
use crate::syntax::{Assign, SimpleCommand};

impl Parser {
    /// Parses a simple command.
    ///
    /// Assignment words and redirections may appear before the command
    /// name; after the first non-assignment word, every word is an
    /// argument, so `A=1 echo B=2` assigns `A` but prints `B=2`.
    ///
    /// A simple command must contain at least one assignment, word, or
    /// redirection; otherwise the current token is reported as unexpected.
    pub fn simple_command(&mut self) -> Result<SimpleCommand> {
        let mut assigns = Vec::new();
        let mut words = Vec::new();
        let mut redirs = Vec::new();

        // Assignments and redirections up to the command name.
        loop {
            if let Some(redir) = self.redirection()? {
                redirs.push(redir);
            } else if self.stream.at(TokenId::Word)? {
                match Assign::try_from(self.stream.take_word()?) {
                    Ok(assign) => assigns.push(assign),
                    Err(word) => {
                        words.push(word);
                        break;
                    }
                }
            } else {
                break;
            }
        }

        // Words and redirections after the command name.
        loop {
            if let Some(redir) = self.redirection()? {
                redirs.push(redir);
            } else if self.stream.at(TokenId::Word)? {
                words.push(self.stream.take_word()?);
            } else {
                break;
            }
        }

        if assigns.is_empty() && words.is_empty() && redirs.is_empty() {
            return Err(self.stream.unexpected());
        }

        Ok(SimpleCommand {
            assigns,
            words,
            redirs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::error::SyntaxError;
    use super::*;
    use crate::syntax::RedirOp;

    fn parse(source: &str) -> SimpleCommand {
        Parser::from_memory(source).simple_command().unwrap()
    }

    #[test]
    fn parser_simple_command_words_only() {
        let command = parse("echo hello world");
        assert_eq!(command.assigns, []);
        assert_eq!(command.to_string(), "echo hello world");
        assert_eq!(command.words.len(), 3);
    }

    #[test]
    fn parser_simple_command_assignments_before_name() {
        let command = parse("A=1 B=2 env");
        assert_eq!(command.assigns.len(), 2);
        assert_eq!(command.assigns[0].name, "A");
        assert_eq!(command.assigns[1].name, "B");
        assert_eq!(command.words.len(), 1);
    }

    #[test]
    fn parser_simple_command_assignment_after_name_is_a_word() {
        let command = parse("echo A=1");
        assert_eq!(command.assigns, []);
        assert_eq!(command.words.len(), 2);
        assert_eq!(command.words[1].0, "A=1");
    }

    #[test]
    fn parser_simple_command_assignments_only() {
        let command = parse("A=1 B=2");
        assert_eq!(command.assigns.len(), 2);
        assert_eq!(command.words, []);
    }

    #[test]
    fn parser_simple_command_redirections_anywhere() {
        let command = parse(">a echo <b hello 2>&1");
        assert_eq!(command.words.len(), 2);
        assert_eq!(command.redirs.len(), 3);
        assert_eq!(command.redirs[0].op, RedirOp::FileOut);
        assert_eq!(command.redirs[1].op, RedirOp::FileIn);
        assert_eq!(command.redirs[2].fd, Some(2));
    }

    #[test]
    fn parser_simple_command_stops_at_operator() {
        let mut parser = Parser::from_memory("echo a; echo b");
        let command = parser.simple_command().unwrap();
        assert_eq!(command.to_string(), "echo a");
    }

    #[test]
    fn parser_simple_command_empty_is_an_error() {
        let e = Parser::from_memory(";").simple_command().unwrap_err();
        assert_eq!(e, SyntaxError::UnexpectedToken(";".to_string()));
    }
}
