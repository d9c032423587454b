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

//! Shell command language syntax
//!
//! This module contains types that represent abstract syntax trees (ASTs) of
//! the shell language.
//!
//! The AST type that represents a whole script is [`List`], a vector of
//! [`Item`]s. An `Item` is a possibly asynchronous [`AndOrList`], which is a
//! sequence of conditionally executed [`Pipeline`]s. A `Pipeline` is a
//! sequence of [`Command`]s separated by `|`.
//!
//! There are three types of `Command`s: [`SimpleCommand`],
//! [`CompoundCommand`], and [`FunctionDefinition`], where `CompoundCommand`
//! in turn comes in many variants.
//!
//! A [`Word`] is the raw text of a token, quotation characters included.
//! The parser never interprets quoting beyond token boundaries; the expander
//! re-reads the word text when the command is executed.
//!
//! Most AST types support the [`Display`](std::fmt::Display) trait, which
//! allows you to convert an AST back to source code. The conversion always
//! produces single-line source that parses to an equal AST, so round-trip
//! tests can assert `parse → print → parse` stability.

use crate::parser::lex::Operator;
use itertools::Itertools;
use std::fmt;
#[cfg(unix)]
use std::os::unix::io::RawFd;
use std::rc::Rc;

#[cfg(not(unix))]
type RawFd = i32;

/// Token that may involve quoting and expansion
///
/// A word is the raw source text of a token, with every quotation character
/// (`\`, `'`, `"`, `` ` ``, `$`-expansions) preserved verbatim. It depends on
/// context whether an empty word is valid or not.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Word(pub String);

impl Word {
    /// Creates a constant word.
    ///
    /// This is a convenience function mainly for tests. The argument is used
    /// verbatim, so any special characters in it will be treated as quoting
    /// or expansion when the word is expanded.
    #[must_use]
    pub fn with_str(s: &str) -> Word {
        Word(s.to_string())
    }

    /// Returns the raw text of the word.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if the string is a valid variable name.
///
/// A name starts with an ASCII letter or underscore and continues with ASCII
/// alphanumerics and underscores. The empty string is not a name.
#[must_use]
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Assignment word
///
/// An assignment word is a word of the form `name=value` where the part
/// before the first `=` is a non-empty run of ASCII alphanumerics and
/// underscores. The value keeps its quotation characters like any other
/// [`Word`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Assign {
    /// Name of the variable the assignment modifies
    pub name: String,
    /// Value assigned to the variable
    pub value: Word,
}

/// Converts a word to an assignment if it has the `name=value` form.
///
/// On failure, the original word is returned intact in the error value.
impl TryFrom<Word> for Assign {
    type Error = Word;
    fn try_from(word: Word) -> Result<Assign, Word> {
        match word.0.find('=') {
            Some(eq) if eq > 0 && word.0[..eq].bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') => {
                let value = Word(word.0[eq + 1..].to_string());
                let mut name = word.0;
                name.truncate(eq);
                Ok(Assign { name, value })
            }
            _ => Err(word),
        }
    }
}

impl fmt::Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Redirection operator
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RedirOp {
    /// `<` (open a file for input)
    FileIn,
    /// `<>` (open a file for input and output)
    FileInOut,
    /// `>` (open a file for output; truncate)
    FileOut,
    /// `>>` (open a file for output; append)
    FileAppend,
    /// `>|` (open a file for output; no-clobber semantics are a no-op here)
    FileClobber,
    /// `<&` (copy or close an input file descriptor)
    FdIn,
    /// `>&` (copy or close an output file descriptor)
    FdOut,
}

impl RedirOp {
    /// Returns true if the left-hand file descriptor defaults to standard
    /// input rather than standard output.
    #[must_use]
    pub fn is_input(self) -> bool {
        use RedirOp::*;
        matches!(self, FileIn | FileInOut | FdIn)
    }
}

/// Error from [`RedirOp::try_from`] for an operator token that is not a
/// redirection operator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("not a redirection operator")]
pub struct TryFromOperatorError;

impl TryFrom<Operator> for RedirOp {
    type Error = TryFromOperatorError;
    fn try_from(op: Operator) -> Result<RedirOp, TryFromOperatorError> {
        use Operator::*;
        match op {
            Less => Ok(RedirOp::FileIn),
            LessGreat => Ok(RedirOp::FileInOut),
            Great => Ok(RedirOp::FileOut),
            GreatGreat => Ok(RedirOp::FileAppend),
            Clobber => Ok(RedirOp::FileClobber),
            LessAnd => Ok(RedirOp::FdIn),
            GreatAnd => Ok(RedirOp::FdOut),
            _ => Err(TryFromOperatorError),
        }
    }
}

impl fmt::Display for RedirOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RedirOp::*;
        f.write_str(match self {
            FileIn => "<",
            FileInOut => "<>",
            FileOut => ">",
            FileAppend => ">>",
            FileClobber => ">|",
            FdIn => "<&",
            FdOut => ">&",
        })
    }
}

/// Redirection
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Redir {
    /// File descriptor modified by this redirection
    ///
    /// This is `Some` if the redirection was preceded by an explicit
    /// IO_NUMBER token, and `None` otherwise. See
    /// [`fd_or_default`](Self::fd_or_default) for the effective descriptor.
    pub fd: Option<RawFd>,
    /// Operator of this redirection
    pub op: RedirOp,
    /// Operand word (a file name, or a file descriptor for `<&` and `>&`)
    pub operand: Word,
}

impl Redir {
    /// Computes the file descriptor modified by this redirection.
    ///
    /// If `self.fd` is `Some(_)`, the value is returned intact. Otherwise,
    /// the default is selected depending on the operator: standard input for
    /// input operators and standard output for output operators.
    #[must_use]
    pub fn fd_or_default(&self) -> RawFd {
        self.fd.unwrap_or(if self.op.is_input() { 0 } else { 1 })
    }
}

impl fmt::Display for Redir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fd) = self.fd {
            write!(f, "{}", fd)?;
        }
        write!(f, "{}{}", self.op, self.operand)
    }
}

/// Command that involves assignments, redirections, and word expansions
///
/// In the shell language syntax, a valid simple command must contain at
/// least one of assignments, words, and redirections. The parser never
/// produces a completely empty simple command.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SimpleCommand {
    pub assigns: Vec<Assign>,
    pub words: Vec<Word>,
    pub redirs: Vec<Redir>,
}

impl fmt::Display for SimpleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let i1 = self.assigns.iter().map(|x| x as &dyn fmt::Display);
        let i2 = self.words.iter().map(|x| x as &dyn fmt::Display);
        let i3 = self.redirs.iter().map(|x| x as &dyn fmt::Display);
        write!(f, "{}", i1.chain(i2).chain(i3).format(" "))
    }
}

/// Condition and body of an `elif` clause
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ElifThen {
    pub condition: List,
    pub body: List,
}

impl fmt::Display for ElifThen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "elif {}then {}",
            Separated(&self.condition),
            Separated(&self.body)
        )
    }
}

/// Branch item of a `case` command
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CaseItem {
    /// Patterns the subject word is compared with
    ///
    /// A non-empty list of words separated by `|` in the source.
    pub patterns: Vec<Word>,
    /// Commands executed if any pattern matched
    pub body: List,
}

impl fmt::Display for CaseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {};;", self.patterns.iter().format(" | "), self.body)
    }
}

/// Command other than a simple command
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum CompoundCommand {
    /// List of commands executed in the current environment (`{ … }`)
    Grouping(List),
    /// List of commands executed in a forked child (`( … )`)
    Subshell(List),
    /// For loop
    For {
        /// Name of the loop variable
        name: Word,
        /// Words the variable iterates over
        ///
        /// `None` means the `in` clause was absent, which is distinct from
        /// an empty word list: without `in`, the loop iterates over the
        /// positional parameters.
        values: Option<Vec<Word>>,
        /// Commands executed for each iteration
        body: List,
    },
    /// Case conditional
    Case { subject: Word, items: Vec<CaseItem> },
    /// If conditional
    If {
        condition: List,
        body: List,
        elifs: Vec<ElifThen>,
        r#else: Option<List>,
    },
    /// While loop
    While { condition: List, body: List },
    /// Until loop
    Until { condition: List, body: List },
}

impl fmt::Display for CompoundCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompoundCommand::*;
        match self {
            Grouping(list) => write!(f, "{{ {}}}", Separated(list)),
            Subshell(list) => write!(f, "({})", list),
            For { name, values, body } => {
                write!(f, "for {name}")?;
                if let Some(values) = values {
                    f.write_str(" in")?;
                    for value in values {
                        write!(f, " {value}")?;
                    }
                    f.write_str(";")?;
                }
                write!(f, " do {}done", Separated(body))
            }
            Case { subject, items } => {
                write!(f, "case {subject} in ")?;
                for item in items {
                    write!(f, "{item} ")?;
                }
                f.write_str("esac")
            }
            If {
                condition,
                body,
                elifs,
                r#else,
            } => {
                write!(f, "if {}then {}", Separated(condition), Separated(body))?;
                for elif in elifs {
                    write!(f, "{elif}")?;
                }
                if let Some(r#else) = r#else {
                    write!(f, "else {}", Separated(r#else))?;
                }
                f.write_str("fi")
            }
            While { condition, body } => {
                write!(f, "while {}do {}done", Separated(condition), Separated(body))
            }
            Until { condition, body } => {
                write!(f, "until {}do {}done", Separated(condition), Separated(body))
            }
        }
    }
}

/// Definition of a function
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FunctionDefinition {
    /// Name of the function
    pub name: Word,
    /// Body of the function
    ///
    /// The parser only produces a [`CompoundCommand::Grouping`] here since
    /// the grammar requires a brace group as the function body. The body is
    /// reference-counted so that calling the function does not clone it.
    pub body: Rc<CompoundCommand>,
}

impl fmt::Display for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}() {}", self.name, self.body)
    }
}

/// Element of a pipeline
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Command {
    /// Simple command
    Simple(SimpleCommand),
    /// Compound command
    Compound(CompoundCommand),
    /// Function definition command
    Function(FunctionDefinition),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Simple(c) => c.fmt(f),
            Command::Compound(c) => c.fmt(f),
            Command::Function(c) => c.fmt(f),
        }
    }
}

/// Commands separated by `|`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Pipeline {
    /// Elements of the pipeline
    ///
    /// The parser guarantees a non-empty vector.
    pub commands: Vec<Command>,
    /// Whether the pipeline begins with a `!`, which negates the exit status
    pub negation: bool,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negation {
            f.write_str("! ")?;
        }
        write!(f, "{}", self.commands.iter().format(" | "))
    }
}

/// Condition that decides if a [`Pipeline`] in an [`AndOrList`] should be
/// executed
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AndOr {
    /// `&&` (execute if the previous pipeline succeeded)
    AndThen,
    /// `||` (execute if the previous pipeline failed)
    OrElse,
}

impl fmt::Display for AndOr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AndOr::AndThen => "&&",
            AndOr::OrElse => "||",
        })
    }
}

/// Pipelines separated by `&&` and `||`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AndOrList {
    pub first: Pipeline,
    pub rest: Vec<(AndOr, Pipeline)>,
}

impl fmt::Display for AndOrList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, pipeline) in &self.rest {
            write!(f, " {op} {pipeline}")?;
        }
        Ok(())
    }
}

/// Element of a [`List`] that can be executed asynchronously
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Item {
    /// The command this item contains
    pub and_or: AndOrList,
    /// Whether the item is terminated by `&`
    ///
    /// Asynchronous execution is accepted by the grammar but rejected at run
    /// time.
    pub is_async: bool,
}

/// Sequence of [`Item`]s
///
/// A list is the whole content of a script as well as the body of every
/// compound command.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct List(pub Vec<Item>);

impl List {
    /// Returns true if the last item of the list is asynchronous.
    #[must_use]
    fn ends_async(&self) -> bool {
        self.0.last().is_some_and(|item| item.is_async)
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous_async = None;
        for item in &self.0 {
            match previous_async {
                None => (),
                Some(true) => f.write_str(" ")?,
                Some(false) => f.write_str("; ")?,
            }
            write!(f, "{}", item.and_or)?;
            if item.is_async {
                f.write_str("&")?;
            }
            previous_async = Some(item.is_async);
        }
        Ok(())
    }
}

/// Helper that prints a list followed by the separator a compound-command
/// body needs before its closing word (`; ` normally, `& ` after an
/// asynchronous item, nothing for an empty list).
struct Separated<'a>(&'a List);

impl fmt::Display for Separated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 .0.is_empty() {
            return Ok(());
        }
        write!(f, "{}", self.0)?;
        f.write_str(if self.0.ends_async() { " " } else { "; " })
    }
}
