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

//! Field splitting
//!
//! Field splitting divides the results of unquoted parameter expansions and
//! command substitutions into fields, delimited by the separator characters
//! of `$IFS`. Separators come in two classes: whitespace separators are
//! "soft" — runs collapse, and leading and trailing runs disappear — while
//! non-whitespace separators are "hard" — every one of them delimits a
//! field, so two in a row produce an empty field between them, one at the
//! start produces a leading empty field, and one at the end leaves a
//! trailing empty field.
//!
//! Only expansion results are split. Literal and quoted parts of a word are
//! immune, so the [`FieldCollector`] distinguishes the two when characters
//! are pushed into it.

/// Type of characters that affect field splitting
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Class {
    /// Character that is not a separator
    NonIfs,
    /// Whitespace separator
    IfsWhitespace,
    /// Separator that is not whitespace
    IfsNonWhitespace,
}

/// Collection of input field separator characters
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ifs {
    chars: String,
}

impl Ifs {
    /// String containing the default separators
    ///
    /// The default separators are a space, tab, and newline.
    pub const DEFAULT: &'static str = " \t\n";

    /// Creates a new IFS consisting of the given separators.
    #[must_use]
    pub fn new<C: Into<String>>(chars: C) -> Ifs {
        Ifs {
            chars: chars.into(),
        }
    }

    /// Creates a new IFS containing no separators, which disables field
    /// splitting.
    #[must_use]
    pub fn empty() -> Ifs {
        Ifs::new("")
    }

    /// Tests if the given character is a separator contained in this IFS.
    #[inline]
    #[must_use]
    pub fn is_ifs(&self, c: char) -> bool {
        self.chars.contains(c)
    }

    /// Returns the class of the character.
    #[must_use]
    pub fn classify(&self, c: char) -> Class {
        if !self.is_ifs(c) {
            Class::NonIfs
        } else if c.is_whitespace() {
            Class::IfsWhitespace
        } else {
            Class::IfsNonWhitespace
        }
    }
}

/// The default IFS contains a space, tab, and newline.
impl Default for Ifs {
    fn default() -> Ifs {
        Ifs::new(Ifs::DEFAULT)
    }
}

/// Splitting state between characters
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// At the start of a word, before any field content or separator
    Start,
    /// Inside a field (the field exists even if the content is empty)
    InField,
    /// Just closed a field with a whitespace separator
    AfterSoft,
    /// Just closed a field with a non-whitespace separator
    AfterHard,
}

/// Accumulator that turns pushed characters into fields
///
/// The collector is fed the expansion of one word at a time: literal and
/// quoted content through [`push_literal`](Self::push_literal) and
/// [`start_field`](Self::start_field), expansion results through
/// [`push_split`](Self::push_split). [`finish_word`](Self::finish_word)
/// closes the word; the fields of all finished words accumulate in order.
///
/// A collector created with [`no_split`](Self::no_split) treats expansion
/// results as literal content, which implements the single-field expansion
/// used for assignment values, `case` subjects and patterns.
#[derive(Clone, Debug)]
pub struct FieldCollector {
    fields: Vec<String>,
    current: String,
    state: State,
    split: bool,
}

impl FieldCollector {
    /// Creates a collector that performs field splitting.
    #[must_use]
    pub fn new() -> FieldCollector {
        FieldCollector {
            fields: Vec::new(),
            current: String::new(),
            state: State::Start,
            split: true,
        }
    }

    /// Creates a collector that never splits.
    #[must_use]
    pub fn no_split() -> FieldCollector {
        FieldCollector {
            split: false,
            ..FieldCollector::new()
        }
    }

    /// Ensures the current field exists, even with no content.
    ///
    /// Empty quotes use this so that `''` makes an empty field rather than
    /// nothing.
    pub fn start_field(&mut self) {
        self.state = State::InField;
    }

    /// Appends literal or quoted content to the current field.
    ///
    /// The content is never split, no matter what characters it contains.
    pub fn push_literal(&mut self, s: &str) {
        if !s.is_empty() {
            self.current.push_str(s);
            self.state = State::InField;
        }
    }

    /// Appends the result of an unquoted expansion, splitting it on the
    /// given IFS.
    pub fn push_split(&mut self, s: &str, ifs: &Ifs) {
        if !self.split {
            return self.push_literal(s);
        }

        for c in s.chars() {
            match ifs.classify(c) {
                Class::NonIfs => {
                    self.current.push(c);
                    self.state = State::InField;
                }
                Class::IfsWhitespace => {
                    if self.state == State::InField {
                        self.delimit();
                        self.state = State::AfterSoft;
                    }
                }
                Class::IfsNonWhitespace => {
                    match self.state {
                        // a hard separator right after a soft one does not
                        // make an extra field
                        State::AfterSoft => (),
                        _ => self.delimit(),
                    }
                    self.state = State::AfterHard;
                }
            }
        }
    }

    /// Closes the current word.
    ///
    /// An open field is emitted; a trailing hard separator leaves a final
    /// empty field; trailing whitespace separators leave nothing.
    pub fn finish_word(&mut self) {
        match self.state {
            State::InField | State::AfterHard => self.delimit(),
            State::Start | State::AfterSoft => (),
        }
        self.state = State::Start;
    }

    /// Returns the fields of all finished words.
    #[must_use]
    pub fn into_fields(self) -> Vec<String> {
        debug_assert_eq!(self.state, State::Start, "unfinished word");
        self.fields
    }

    fn delimit(&mut self) {
        self.fields.push(std::mem::take(&mut self.current));
    }
}

impl Default for FieldCollector {
    fn default() -> FieldCollector {
        FieldCollector::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(value: &str, ifs: &Ifs) -> Vec<String> {
        let mut collector = FieldCollector::new();
        collector.push_split(value, ifs);
        collector.finish_word();
        collector.into_fields()
    }

    #[test]
    fn ifs_classification() {
        let ifs = Ifs::default();
        assert_eq!(ifs.classify(' '), Class::IfsWhitespace);
        assert_eq!(ifs.classify('\t'), Class::IfsWhitespace);
        assert_eq!(ifs.classify('\n'), Class::IfsWhitespace);
        assert_eq!(ifs.classify('a'), Class::NonIfs);

        let ifs = Ifs::new(": ");
        assert_eq!(ifs.classify(':'), Class::IfsNonWhitespace);
        assert_eq!(ifs.classify(' '), Class::IfsWhitespace);
        assert_eq!(ifs.classify('\t'), Class::NonIfs);
    }

    #[test]
    fn default_ifs_collapses_whitespace() {
        let ifs = Ifs::default();
        assert_eq!(split(" a  b ", &ifs), ["a", "b"]);
        assert_eq!(split("a\tb\nc", &ifs), ["a", "b", "c"]);
        assert_eq!(split("   ", &ifs), [] as [&str; 0]);
        assert_eq!(split("", &ifs), [] as [&str; 0]);
    }

    #[test]
    fn hard_separators_delimit_empty_fields() {
        let ifs = Ifs::new(":");
        assert_eq!(split(":a::b:", &ifs), ["", "a", "", "b", ""]);
        assert_eq!(split("a:b", &ifs), ["a", "b"]);
        assert_eq!(split(":", &ifs), ["", ""]);
    }

    #[test]
    fn hard_separators_bracketed_by_soft_ones() {
        let ifs = Ifs::new(": ");
        assert_eq!(split("a : b", &ifs), ["a", "b"]);
        assert_eq!(split("a :: b", &ifs), ["a", "", "b"]);
        assert_eq!(split(" : a", &ifs), ["", "a"]);
    }

    #[test]
    fn empty_ifs_disables_splitting() {
        let ifs = Ifs::empty();
        assert_eq!(split(" a b ", &ifs), [" a b "]);
    }

    #[test]
    fn literal_content_is_never_split() {
        let ifs = Ifs::default();
        let mut collector = FieldCollector::new();
        collector.push_literal("a b");
        collector.finish_word();
        assert_eq!(collector.into_fields(), ["a b"]);
    }

    #[test]
    fn split_result_joins_surrounding_literals() {
        // x="a b" in `pre$x/post` makes the fields "prea" and "b/post"
        let ifs = Ifs::default();
        let mut collector = FieldCollector::new();
        collector.push_literal("pre");
        collector.push_split("a b", &ifs);
        collector.push_literal("/post");
        collector.finish_word();
        assert_eq!(collector.into_fields(), ["prea", "b/post"]);
    }

    #[test]
    fn empty_quotes_make_an_empty_field() {
        let mut collector = FieldCollector::new();
        collector.start_field();
        collector.finish_word();
        assert_eq!(collector.into_fields(), [""]);
    }

    #[test]
    fn empty_expansion_makes_no_field() {
        let ifs = Ifs::default();
        let mut collector = FieldCollector::new();
        collector.push_split("", &ifs);
        collector.finish_word();
        assert_eq!(collector.into_fields(), [] as [&str; 0]);
    }

    #[test]
    fn field_open_after_split_continues_in_next_push() {
        let ifs = Ifs::default();
        let mut collector = FieldCollector::new();
        collector.push_split("a ", &ifs);
        collector.push_literal("y");
        collector.finish_word();
        assert_eq!(collector.into_fields(), ["a", "y"]);
    }

    #[test]
    fn multiple_words_accumulate() {
        let ifs = Ifs::default();
        let mut collector = FieldCollector::new();
        collector.push_literal("a");
        collector.finish_word();
        collector.push_split("b c", &ifs);
        collector.finish_word();
        assert_eq!(collector.into_fields(), ["a", "b", "c"]);
    }

    #[test]
    fn no_split_collector_keeps_expansions_whole() {
        let ifs = Ifs::default();
        let mut collector = FieldCollector::no_split();
        collector.push_split(" a  b ", &ifs);
        collector.finish_word();
        assert_eq!(collector.into_fields(), [" a  b "]);
    }
}
