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

//! Lexical analyzer.
//!
//! The [`Lexer`] produces one [`Token`] per call by delegating to the
//! quote-aware sub-readers of [`Reader`]. A token is just its source text
//! plus an IO-number flag; the classification into words, operators, and
//! reserved words is derived on demand because it depends on parser context.

mod reader;

pub use self::reader::is_special_param;
pub use self::reader::Reader;

use super::error::Result;
use std::fmt;

/// Operator token identifier
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    /// `&`
    And,
    /// `&&`
    AndAnd,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `;`
    Semicolon,
    /// `;;`
    SemicolonSemicolon,
    /// `<`
    Less,
    /// `<&`
    LessAnd,
    /// `<<`
    LessLess,
    /// `<<-`
    LessLessDash,
    /// `<>`
    LessGreat,
    /// `>`
    Great,
    /// `>&`
    GreatAnd,
    /// `>>`
    GreatGreat,
    /// `>|`
    Clobber,
    /// `|`
    Bar,
    /// `||`
    BarBar,
}

impl Operator {
    /// All the operators.
    pub const ALL: [Operator; 17] = [
        Operator::And,
        Operator::AndAnd,
        Operator::OpenParen,
        Operator::CloseParen,
        Operator::Semicolon,
        Operator::SemicolonSemicolon,
        Operator::Less,
        Operator::LessAnd,
        Operator::LessLess,
        Operator::LessLessDash,
        Operator::LessGreat,
        Operator::Great,
        Operator::GreatAnd,
        Operator::GreatGreat,
        Operator::Clobber,
        Operator::Bar,
        Operator::BarBar,
    ];

    /// Returns the source representation of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        use Operator::*;
        match self {
            And => "&",
            AndAnd => "&&",
            OpenParen => "(",
            CloseParen => ")",
            Semicolon => ";",
            SemicolonSemicolon => ";;",
            Less => "<",
            LessAnd => "<&",
            LessLess => "<<",
            LessLessDash => "<<-",
            LessGreat => "<>",
            Great => ">",
            GreatAnd => ">&",
            GreatGreat => ">>",
            Clobber => ">|",
            Bar => "|",
            BarBar => "||",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Operator {
    type Error = ();
    fn try_from(s: &str) -> std::result::Result<Operator, ()> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or(())
    }
}

/// Returns true if the character can start an operator token.
#[must_use]
pub fn is_operator_char(c: char) -> bool {
    matches!(c, '&' | '|' | ';' | '<' | '>' | '(' | ')')
}

/// Returns true if the string is a prefix of some operator.
#[must_use]
fn is_operator_prefix(s: &str) -> bool {
    Operator::ALL.iter().any(|op| op.as_str().starts_with(s))
}

/// Token that is a reserved word in some grammatical contexts
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Keyword {
    /// `!`
    Bang,
    /// `case`
    Case,
    /// `do`
    Do,
    /// `done`
    Done,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `esac`
    Esac,
    /// `fi`
    Fi,
    /// `for`
    For,
    /// `if`
    If,
    /// `in`
    In,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `then`
    Then,
    /// `until`
    Until,
    /// `while`
    While,
}

impl Keyword {
    /// Returns the source representation of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Bang => "!",
            Case => "case",
            Do => "do",
            Done => "done",
            Elif => "elif",
            Else => "else",
            Esac => "esac",
            Fi => "fi",
            For => "for",
            If => "if",
            In => "in",
            OpenBrace => "{",
            CloseBrace => "}",
            Then => "then",
            Until => "until",
            While => "while",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Keyword {
    type Error = ();
    fn try_from(s: &str) -> std::result::Result<Keyword, ()> {
        use Keyword::*;
        match s {
            "!" => Ok(Bang),
            "case" => Ok(Case),
            "do" => Ok(Do),
            "done" => Ok(Done),
            "elif" => Ok(Elif),
            "else" => Ok(Else),
            "esac" => Ok(Esac),
            "fi" => Ok(Fi),
            "for" => Ok(For),
            "if" => Ok(If),
            "in" => Ok(In),
            "{" => Ok(OpenBrace),
            "}" => Ok(CloseBrace),
            "then" => Ok(Then),
            "until" => Ok(Until),
            "while" => Ok(While),
            _ => Err(()),
        }
    }
}

/// Token identifier, or classification of tokens
///
/// Whether a word token counts as a reserved word depends on where the
/// parser is in the grammar, so a token has two derived classifications:
/// [`Token::id`] never reports `Reserved` and [`Token::id_reserved`] does.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenId {
    /// Ordinary word token
    Word,
    /// Word token that is a reserved word in this context
    Reserved(Keyword),
    /// Operator token
    Operator(Operator),
    /// Digits immediately preceding a `<` or `>`
    IoNumber,
    /// Newline token
    Newline,
    /// Imaginary token identifier for the end of input
    EndOfInput,
}

/// Result of lexical analysis produced by the [`Lexer`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    /// Source text of the token, quotation characters included
    ///
    /// An empty value denotes the end of input.
    pub value: String,
    /// Whether this token is a run of digits immediately followed by a `<`
    /// or `>`
    pub is_io_number: bool,
}

impl Token {
    /// Classifies the token without reserved-word recognition.
    #[must_use]
    pub fn id(&self) -> TokenId {
        if self.value.is_empty() {
            TokenId::EndOfInput
        } else if self.is_io_number {
            TokenId::IoNumber
        } else if self.value == "\n" {
            TokenId::Newline
        } else if let Ok(op) = Operator::try_from(&self.value[..]) {
            TokenId::Operator(op)
        } else {
            TokenId::Word
        }
    }

    /// Classifies the token with reserved-word recognition.
    #[must_use]
    pub fn id_reserved(&self) -> TokenId {
        match self.id() {
            TokenId::Word => match Keyword::try_from(&self.value[..]) {
                Ok(keyword) => TokenId::Reserved(keyword),
                Err(()) => TokenId::Word,
            },
            id => id,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Lexical analyzer
///
/// The lexer produces one token per [`next_token`](Self::next_token) call.
/// After the end of input it keeps returning end-of-input tokens.
#[derive(Clone, Debug)]
pub struct Lexer {
    reader: Reader,
}

impl Lexer {
    /// Creates a lexer that reads the given source text.
    #[must_use]
    pub fn from_memory(source: &str) -> Lexer {
        Lexer {
            reader: Reader::new(source),
        }
    }

    /// Reads the longest operator at the cursor.
    fn operator_token(&mut self) -> Token {
        let mut value = String::new();
        while let Some(c) = self.reader.peek() {
            let mut candidate = value.clone();
            candidate.push(c);
            if !is_operator_prefix(&candidate) {
                break;
            }
            value.push(self.reader.pop());
        }
        Token {
            value,
            is_io_number: false,
        }
    }

    /// Skips a comment up to (but not including) the next newline.
    fn skip_comment(&mut self) {
        self.reader.eat('#');
        while !self.reader.eof() && !self.reader.at('\n') {
            self.reader.pop();
        }
    }

    /// Produces the next token.
    ///
    /// The token keeps all quotation characters; operators and newlines are
    /// returned as their own tokens; blanks separate words without producing
    /// tokens. The end of input yields a token with an empty value.
    pub fn next_token(&mut self) -> Result<Token> {
        let mut value = String::new();
        let mut is_io_number = false;

        while let Some(c) = self.reader.peek() {
            match c {
                '\\' => value.push_str(&self.reader.read_backslash_quote(true)),
                '\'' => value.push_str(&self.reader.read_single_quote(true)?),
                '"' => value.push_str(&self.reader.read_double_quote(true)?),
                '`' => value.push_str(&self.reader.read_backquote(true)?),
                '$' => value.push_str(&self.reader.read_dollar(true)?),
                c if is_operator_char(c) => {
                    if value.is_empty() {
                        return Ok(self.operator_token());
                    }
                    if (c == '<' || c == '>') && value.bytes().all(|b| b.is_ascii_digit()) {
                        is_io_number = true;
                    }
                    break;
                }
                ' ' | '\t' => {
                    self.reader.pop();
                    if !value.is_empty() {
                        break;
                    }
                }
                '\n' => {
                    if !value.is_empty() {
                        break;
                    }
                    self.reader.pop();
                    return Ok(Token {
                        value: "\n".to_string(),
                        is_io_number: false,
                    });
                }
                '#' if value.is_empty() => self.skip_comment(),
                _ => value.push(self.reader.pop()),
            }
        }

        Ok(Token {
            value,
            is_io_number,
        })
    }
}
