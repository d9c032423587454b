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

//! Quote-aware cursor over shell source text.
//!
//! The [`Reader`] is shared between the lexer and the word expander. Both
//! walk the same text with the same family of `read_*` functions; the
//! difference is the `keep_quotes` argument. The lexer keeps every quotation
//! character so the parser sees tokens exactly as written, and the expander
//! re-reads the token text with `keep_quotes = false`, which strips the
//! quotation while yielding the same content.
//!
//! Nested constructs are always read with quotes kept, regardless of the
//! caller's `keep_quotes`. A word like `"$(echo ')')"` must keep the inner
//! quote intact until the command substitution is parsed on its own.

use super::super::error::{Result, SyntaxError};

/// Returns true if the character is a special parameter name.
#[must_use]
pub fn is_special_param(c: char) -> bool {
    matches!(c, '@' | '*' | '#' | '?' | '-' | '$' | '!' | '0')
}

/// Cursor over program text with lookahead
///
/// The reader holds an index into an immutable sequence of characters.
/// Reading never modifies the text; every operation either inspects the
/// character at the cursor or advances the cursor.
#[derive(Clone, Debug)]
pub struct Reader {
    chars: Vec<char>,
    index: usize,
}

impl Reader {
    /// Creates a reader over the given source text.
    #[must_use]
    pub fn new(source: &str) -> Reader {
        Reader {
            chars: source.chars().collect(),
            index: 0,
        }
    }

    /// Returns true if the cursor is past the last character.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// Returns the number of characters consumed so far.
    ///
    /// Comparing positions around a `read_*` call tells how much input the
    /// call actually consumed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Returns the character at the cursor without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    /// Consumes and returns the character at the cursor.
    ///
    /// # Panics
    ///
    /// If the reader is at the end of input.
    pub fn pop(&mut self) -> char {
        let c = self.chars[self.index];
        self.index += 1;
        c
    }

    /// Tests if the character at the cursor is `c`.
    #[must_use]
    pub fn at(&self, c: char) -> bool {
        self.peek() == Some(c)
    }

    /// Tests if the text at the cursor starts with `prefix`.
    #[must_use]
    pub fn at_prefix(&self, prefix: &str) -> bool {
        let mut index = self.index;
        for p in prefix.chars() {
            if self.chars.get(index) != Some(&p) {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Consumes the character `c` at the cursor.
    ///
    /// # Panics
    ///
    /// If the cursor is not at `c`.
    pub fn eat(&mut self, c: char) {
        debug_assert!(self.at(c), "expected {c:?}");
        self.index += 1;
    }

    /// Consumes the `prefix` at the cursor.
    ///
    /// # Panics
    ///
    /// If the text at the cursor does not start with `prefix`.
    pub fn eat_prefix(&mut self, prefix: &str) {
        debug_assert!(self.at_prefix(prefix), "expected {prefix:?}");
        self.index += prefix.chars().count();
    }

    /// Consumes characters up to (but not including) the next quotation or
    /// expansion character (one of `\`, `'`, `"`, `` ` ``, `$`).
    ///
    /// This is used by the expander to copy literal runs of a word.
    pub fn read_regular_part(&mut self) -> String {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, '\\' | '\'' | '"' | '`' | '$') {
                break;
            }
            result.push(self.pop());
        }
        result
    }

    /// Reads one backslash escape.
    ///
    /// A backslash before a newline is a line continuation and yields
    /// nothing. A backslash at the end of input is a literal backslash.
    /// Otherwise the escaped character is returned, preceded by the
    /// backslash iff `keep_quotes`.
    pub fn read_backslash_quote(&mut self, keep_quotes: bool) -> String {
        let mut result = String::new();

        self.eat('\\');

        if self.eof() {
            result.push('\\');
        } else if self.at('\n') {
            self.pop();
        } else {
            if keep_quotes {
                result.push('\\');
            }
            result.push(self.pop());
        }

        result
    }

    /// Reads a single-quoted span from the opening `'` to the matching `'`.
    ///
    /// Every character inside is literal. Reaching the end of input before
    /// the closing quote is an error.
    pub fn read_single_quote(&mut self, keep_quotes: bool) -> Result<String> {
        let mut result = String::new();

        self.eat('\'');
        if keep_quotes {
            result.push('\'');
        }

        while !self.eof() && !self.at('\'') {
            result.push(self.pop());
        }

        if self.eof() {
            return Err(SyntaxError::UnclosedSingleQuote);
        }

        self.eat('\'');
        if keep_quotes {
            result.push('\'');
        }

        Ok(result)
    }

    /// Reads a double-quoted span from the opening `"` to the matching `"`.
    ///
    /// Inside, only `\$`, `` \` ``, `\"`, and `\\` are active escapes.
    /// Dollar and backquote expansions are read recursively with their text
    /// kept intact; everything else is literal.
    pub fn read_double_quote(&mut self, keep_quotes: bool) -> Result<String> {
        let mut result = String::new();

        self.eat('"');
        if keep_quotes {
            result.push('"');
        }

        while !self.eof() && !self.at('"') {
            if self.at_prefix("\\$")
                || self.at_prefix("\\`")
                || self.at_prefix("\\\"")
                || self.at_prefix("\\\\")
            {
                self.pop();
                if keep_quotes {
                    result.push('\\');
                }
                result.push(self.pop());
            } else if self.at('`') {
                result.push_str(&self.read_backquote(true)?);
            } else if self.at('$') {
                result.push_str(&self.read_dollar(true)?);
            } else {
                result.push(self.pop());
            }
        }

        if self.eof() {
            return Err(SyntaxError::UnclosedDoubleQuote);
        }

        self.eat('"');
        if keep_quotes {
            result.push('"');
        }

        Ok(result)
    }

    /// Reads a backquote command substitution.
    ///
    /// Inside, only `\$`, `` \` ``, and `\\` are active escapes; nested
    /// backquotes are not recognized at this level. When `keep_quotes` is
    /// false the active escapes are resolved, so `` `echo \`date\`` ``
    /// yields the inner program `` echo `date` ``.
    pub fn read_backquote(&mut self, keep_quotes: bool) -> Result<String> {
        let mut result = String::new();

        self.eat('`');
        if keep_quotes {
            result.push('`');
        }

        while !self.eof() && !self.at('`') {
            if self.at_prefix("\\$") || self.at_prefix("\\`") || self.at_prefix("\\\\") {
                self.pop();
                if keep_quotes {
                    result.push('\\');
                }
                result.push(self.pop());
            } else {
                result.push(self.pop());
            }
        }

        if self.eof() {
            return Err(SyntaxError::UnclosedBackquote);
        }

        self.eat('`');
        if keep_quotes {
            result.push('`');
        }

        Ok(result)
    }

    /// Reads an unbraced parameter expansion after a `$`.
    ///
    /// The parameter is a name, a single digit, or a special parameter
    /// character. A `$` followed by none of these is a literal dollar.
    pub fn read_param_expand(&mut self, keep_quotes: bool) -> String {
        let mut result = String::new();

        self.eat('$');
        if keep_quotes {
            result.push('$');
        }

        match self.peek() {
            None => "$".to_string(),
            Some(c) if c.is_ascii_digit() || is_special_param(c) => {
                result.push(self.pop());
                result
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                while let Some(c) = self.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        result.push(self.pop());
                    } else {
                        break;
                    }
                }
                result
            }
            Some(_) => "$".to_string(),
        }
    }

    /// Reads a braced parameter expansion (`${…}`).
    pub fn read_param_expand_in_braces(&mut self, keep_quotes: bool) -> Result<String> {
        self.read_delimited("${", "}", None, SyntaxError::UnclosedParam, keep_quotes)
    }

    /// Reads a `$(…)` command substitution.
    pub fn read_command_substitution(&mut self, keep_quotes: bool) -> Result<String> {
        self.read_delimited(
            "$(",
            ")",
            Some(('(', ')')),
            SyntaxError::UnclosedCommandSubstitution,
            keep_quotes,
        )
    }

    /// Reads a `$((…))` arithmetic expansion.
    pub fn read_arithmetic_expand(&mut self, keep_quotes: bool) -> Result<String> {
        self.read_delimited(
            "$((",
            "))",
            Some(('(', ')')),
            SyntaxError::UnclosedArith,
            keep_quotes,
        )
    }

    /// Reads whatever expansion starts at the `$` at the cursor.
    ///
    /// # Panics
    ///
    /// If the cursor is not at a `$`.
    pub fn read_dollar(&mut self, keep_quotes: bool) -> Result<String> {
        if self.at_prefix("$((") {
            self.read_arithmetic_expand(keep_quotes)
        } else if self.at_prefix("$(") {
            self.read_command_substitution(keep_quotes)
        } else if self.at_prefix("${") {
            self.read_param_expand_in_braces(keep_quotes)
        } else if self.at('$') {
            Ok(self.read_param_expand(keep_quotes))
        } else {
            panic!("read_dollar called without a $ at the cursor")
        }
    }

    /// Balanced nesting reader shared by the braced and parenthesized
    /// expansions.
    ///
    /// Reads from `start` to the matching `end`, balancing only on the
    /// configured brace pair and delegating to the quote sub-readers so that
    /// quotes and nested expansions inside do not confuse the balance. The
    /// delimiters respond to `keep_quotes`; the content is always kept
    /// verbatim for later re-reading.
    fn read_delimited(
        &mut self,
        start: &str,
        end: &str,
        braces: Option<(char, char)>,
        unclosed: SyntaxError,
        keep_quotes: bool,
    ) -> Result<String> {
        let mut result = String::new();
        let mut brace_level = 0u32;

        self.eat_prefix(start);
        if keep_quotes {
            result.push_str(start);
        }

        while !self.eof() {
            if brace_level == 0 && self.at_prefix(end) {
                break;
            }

            match braces {
                Some((left, _)) if self.at(left) => {
                    result.push(self.pop());
                    brace_level += 1;
                    continue;
                }
                Some((_, right)) if self.at(right) => {
                    result.push(self.pop());
                    brace_level = brace_level.saturating_sub(1);
                    continue;
                }
                _ => (),
            }

            if self.at('\'') {
                result.push_str(&self.read_single_quote(true)?);
            } else if self.at('"') {
                result.push_str(&self.read_double_quote(true)?);
            } else if self.at('\\') {
                result.push_str(&self.read_backslash_quote(true));
            } else if self.at('`') {
                result.push_str(&self.read_backquote(true)?);
            } else if self.at('$') {
                result.push_str(&self.read_dollar(true)?);
            } else {
                result.push(self.pop());
            }
        }

        if self.eof() {
            return Err(unclosed);
        }

        self.eat_prefix(end);
        if keep_quotes {
            result.push_str(end);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn reader_cursor_primitives() {
        let mut r = Reader::new("ab");
        assert!(!r.eof());
        assert_eq!(r.peek(), Some('a'));
        assert!(r.at('a'));
        assert!(!r.at('b'));
        assert!(r.at_prefix("ab"));
        assert!(!r.at_prefix("abc"));
        assert_eq!(r.pop(), 'a');
        assert_eq!(r.pop(), 'b');
        assert!(r.eof());
        assert_eq!(r.peek(), None);
        assert!(!r.at('a'));
        assert!(!r.at_prefix("a"));
        assert!(r.at_prefix(""));
    }

    #[test]
    fn read_regular_part_stops_at_quoting() {
        let mut r = Reader::new("abc$x");
        assert_eq!(r.read_regular_part(), "abc");
        assert!(r.at('$'));

        let mut r = Reader::new("a'b");
        assert_eq!(r.read_regular_part(), "a");

        let mut r = Reader::new("plain");
        assert_eq!(r.read_regular_part(), "plain");
        assert!(r.eof());
    }

    #[test]
    fn backslash_quote() {
        let mut r = Reader::new("\\a");
        assert_eq!(r.read_backslash_quote(true), "\\a");
        let mut r = Reader::new("\\a");
        assert_eq!(r.read_backslash_quote(false), "a");

        // line continuation disappears in both modes
        let mut r = Reader::new("\\\nx");
        assert_eq!(r.read_backslash_quote(true), "");
        assert!(r.at('x'));

        // backslash at end of input is literal
        let mut r = Reader::new("\\");
        assert_eq!(r.read_backslash_quote(false), "\\");
    }

    #[test]
    fn single_quote() {
        let mut r = Reader::new("'a b'");
        assert_eq!(r.read_single_quote(true).unwrap(), "'a b'");
        let mut r = Reader::new("'a b'");
        assert_eq!(r.read_single_quote(false).unwrap(), "a b");

        // no escapes inside single quotes
        let mut r = Reader::new(r"'\$x'");
        assert_eq!(r.read_single_quote(false).unwrap(), r"\$x");

        let mut r = Reader::new("'oops");
        assert_matches!(
            r.read_single_quote(true),
            Err(SyntaxError::UnclosedSingleQuote)
        );
    }

    #[test]
    fn double_quote_escapes() {
        let mut r = Reader::new(r#""a\$b\\c\"d\ne""#);
        assert_eq!(r.read_double_quote(false).unwrap(), r#"a$b\c"d\ne"#);

        let mut r = Reader::new(r#""a\$b""#);
        assert_eq!(r.read_double_quote(true).unwrap(), r#""a\$b""#);

        let mut r = Reader::new("\"oops");
        assert_matches!(
            r.read_double_quote(true),
            Err(SyntaxError::UnclosedDoubleQuote)
        );
    }

    #[test]
    fn double_quote_keeps_nested_expansions() {
        // Nested expansions keep their own text even in quote-removing mode;
        // they are re-read when the expansion is evaluated.
        let mut r = Reader::new(r#""x$(echo 'a b')y""#);
        assert_eq!(r.read_double_quote(false).unwrap(), "x$(echo 'a b')y");
    }

    #[test]
    fn backquote() {
        let mut r = Reader::new("`echo hi`");
        assert_eq!(r.read_backquote(true).unwrap(), "`echo hi`");
        let mut r = Reader::new("`echo hi`");
        assert_eq!(r.read_backquote(false).unwrap(), "echo hi");

        // active escapes resolve when quotes are removed
        let mut r = Reader::new(r"`echo \`date\``");
        assert_eq!(r.read_backquote(false).unwrap(), "echo `date`");

        // other backslashes are literal
        let mut r = Reader::new(r"`echo \n`");
        assert_eq!(r.read_backquote(false).unwrap(), r"echo \n");

        let mut r = Reader::new("`oops");
        assert_matches!(r.read_backquote(true), Err(SyntaxError::UnclosedBackquote));
    }

    #[test]
    fn param_expand_names() {
        let mut r = Reader::new("$foo_1+");
        assert_eq!(r.read_param_expand(true), "$foo_1");
        assert!(r.at('+'));

        let mut r = Reader::new("$foo_1+");
        assert_eq!(r.read_param_expand(false), "foo_1");
    }

    #[test]
    fn param_expand_digit_and_special() {
        let mut r = Reader::new("$12");
        assert_eq!(r.read_param_expand(false), "1");
        assert!(r.at('2'));

        for special in ['@', '*', '#', '?', '-', '$', '!', '0'] {
            let mut r = Reader::new(&format!("${special}"));
            assert_eq!(r.read_param_expand(false), special.to_string());
        }
    }

    #[test]
    fn param_expand_bare_dollar() {
        let mut r = Reader::new("$");
        assert_eq!(r.read_param_expand(true), "$");

        let mut r = Reader::new("$%");
        assert_eq!(r.read_param_expand(false), "$");
        assert!(r.at('%'));
    }

    #[test]
    fn braced_param_expand() {
        let mut r = Reader::new("${x:-y}z");
        assert_eq!(r.read_param_expand_in_braces(true).unwrap(), "${x:-y}");
        assert!(r.at('z'));

        let mut r = Reader::new("${x:-y}z");
        assert_eq!(r.read_param_expand_in_braces(false).unwrap(), "x:-y");

        let mut r = Reader::new("${x");
        assert_matches!(
            r.read_param_expand_in_braces(true),
            Err(SyntaxError::UnclosedParam)
        );
    }

    #[test]
    fn command_substitution_balances_parens() {
        let mut r = Reader::new("$(echo (a))b");
        assert_eq!(r.read_command_substitution(false).unwrap(), "echo (a)");
        assert!(r.at('b'));

        let mut r = Reader::new("$(echo $(echo x))");
        assert_eq!(r.read_command_substitution(false).unwrap(), "echo $(echo x)");

        let mut r = Reader::new("$(echo ')'");
        assert_matches!(
            r.read_command_substitution(true),
            Err(SyntaxError::UnclosedCommandSubstitution)
        );
    }

    #[test]
    fn command_substitution_ignores_quoted_parens() {
        let mut r = Reader::new("$(echo ')')x");
        assert_eq!(r.read_command_substitution(false).unwrap(), "echo ')'");
        assert!(r.at('x'));
    }

    #[test]
    fn arithmetic_expand() {
        let mut r = Reader::new("$((1 + (2 * 3)))x");
        assert_eq!(r.read_arithmetic_expand(false).unwrap(), "1 + (2 * 3)");
        assert!(r.at('x'));

        let mut r = Reader::new("$((1 + 2");
        assert_matches!(
            r.read_arithmetic_expand(true),
            Err(SyntaxError::UnclosedArith)
        );
    }

    #[test]
    fn dollar_dispatch() {
        let mut r = Reader::new("$((1))");
        assert_eq!(r.read_dollar(true).unwrap(), "$((1))");
        let mut r = Reader::new("$(x)");
        assert_eq!(r.read_dollar(true).unwrap(), "$(x)");
        let mut r = Reader::new("${x}");
        assert_eq!(r.read_dollar(true).unwrap(), "${x}");
        let mut r = Reader::new("$x");
        assert_eq!(r.read_dollar(true).unwrap(), "$x");
    }
}
