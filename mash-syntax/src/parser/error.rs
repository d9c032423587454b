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

//! Definition of errors that happen in the lexer and the parser.
//!
//! Lexical errors (an unterminated quotation or an unbalanced expansion) and
//! grammatical errors share one type because both abort the current input
//! unit the same way: the rest of the line is discarded in interactive mode,
//! and the whole program is rejected otherwise.

use thiserror::Error;

/// Types of errors that may happen in parsing
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    /// A single quotation lacks a closing `'`.
    #[error("the single quote is not closed")]
    UnclosedSingleQuote,
    /// A double quotation lacks a closing `"`.
    #[error("the double quote is not closed")]
    UnclosedDoubleQuote,
    /// A command substitution started with `` ` `` lacks a closing `` ` ``.
    #[error("the backquote is not closed")]
    UnclosedBackquote,
    /// A parameter expansion lacks a closing `}`.
    #[error("the parameter expansion is not closed")]
    UnclosedParam,
    /// A command substitution started with `$(` lacks a closing `)`.
    #[error("the command substitution is not closed")]
    UnclosedCommandSubstitution,
    /// An arithmetic expansion lacks a closing `))`.
    #[error("the arithmetic expansion is not closed")]
    UnclosedArith,
    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
    /// The input ended in the middle of a command.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The file descriptor specified for a redirection cannot be used.
    #[error("the file descriptor is too large")]
    FdOutOfRange,
    /// A redirection operator is missing its operand.
    #[error("the redirection operator is missing its operand")]
    MissingRedirOperand,
    /// A grouping is not closed.
    #[error("the grouping is missing its closing `}}`")]
    UnclosedGrouping,
    /// A grouping contains no commands.
    #[error("the grouping is missing its content")]
    EmptyGrouping,
    /// A subshell is not closed.
    #[error("the subshell is missing its closing `)`")]
    UnclosedSubshell,
    /// A subshell contains no commands.
    #[error("the subshell is missing its content")]
    EmptySubshell,
    /// An `if` command is missing the `then` clause.
    #[error("the `if` command is missing the `then` clause")]
    IfMissingThen,
    /// An `if` command's condition is empty.
    #[error("the `if` command is missing its condition")]
    EmptyIfCondition,
    /// An `if` command's body is empty.
    #[error("the `if` command is missing its body")]
    EmptyIfBody,
    /// An `elif` clause is missing the `then` clause.
    #[error("the `elif` clause is missing the `then` clause")]
    ElifMissingThen,
    /// An `elif` clause's condition is empty.
    #[error("the `elif` clause is missing its condition")]
    EmptyElifCondition,
    /// An `elif` clause's body is empty.
    #[error("the `elif` clause is missing its body")]
    EmptyElifBody,
    /// An `else` clause is empty.
    #[error("the `else` clause is missing its content")]
    EmptyElse,
    /// An `if` command is not closed.
    #[error("the `if` command is missing its closing `fi`")]
    UnclosedIf,
    /// A `do` clause is missing its `do`.
    #[error("the loop is missing its `do` clause")]
    MissingDoClause,
    /// A `do` clause is not closed.
    #[error("the `do` clause is missing its closing `done`")]
    UnclosedDoClause,
    /// A `do` clause contains no commands.
    #[error("the `do` clause is missing its content")]
    EmptyDoClause,
    /// A `while` loop's condition is empty.
    #[error("the `while` loop is missing its condition")]
    EmptyWhileCondition,
    /// An `until` loop's condition is empty.
    #[error("the `until` loop is missing its condition")]
    EmptyUntilCondition,
    /// The variable name is missing or invalid in a `for` loop.
    #[error("the `for` loop is missing a valid variable name")]
    InvalidForName,
    /// The `case` command is missing its subject.
    #[error("the subject is missing after `case`")]
    MissingCaseSubject,
    /// The `case` command is missing `in` after the subject.
    #[error("`in` is missing in the `case` command")]
    MissingIn,
    /// A pattern is missing in a `case` item.
    #[error("a pattern is missing in the `case` command")]
    MissingPattern,
    /// The `)` is missing in a `case` item.
    #[error("the pattern list is not properly closed by a `)`")]
    UnclosedPatternList,
    /// A `case` command is not closed.
    #[error("the `case` command is missing its closing `esac`")]
    UnclosedCase,
    /// The `(` is not followed by `)` in a function definition.
    #[error("`)` is missing after `(`")]
    UnmatchedParenthesis,
    /// The function body is not a brace group.
    #[error("the function body must be a grouping")]
    InvalidFunctionBody,
    /// A command is missing after `&&`, `||`, or `|`.
    #[error("a command is missing after `{0}`")]
    MissingCommand(String),
}

/// Entire result of parsing
pub type Result<T> = std::result::Result<T, SyntaxError>;
