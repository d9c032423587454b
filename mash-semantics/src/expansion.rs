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

//! Word expansion.
//!
//! A word in the syntax tree is raw source text with its quoting intact.
//! Expansion re-reads that text with the same quote-aware [`Reader`] the
//! tokenizer used, but in quote-removing mode, performing tilde expansion,
//! parameter expansion, and command substitution along the way. The result
//! is a list of fields: unquoted expansion results are [split](split) on
//! `$IFS` while literal and quoted content is not, and quote removal falls
//! out of the re-read for free.
//!
//! [`expand_words`] produces the field list for command words.
//! [`expand_word`] is the single-field form used where splitting must not
//! happen: assignment values, `case` subjects and patterns.

pub mod command_subst;
pub mod param;
pub mod split;

use self::command_subst::command_substitution;
use self::split::{FieldCollector, Ifs};
use crate::Result;
use mash_env::Env;
use mash_syntax::parser::lex::Reader;
use mash_syntax::parser::SyntaxError;
use mash_syntax::syntax::Word;

/// Expands words to fields, with field splitting.
pub fn expand_words(env: &mut Env, words: &[Word]) -> Result<Vec<String>> {
    let mut collector = FieldCollector::new();
    for word in words {
        expand_text_into(env, &word.0, &mut collector)?;
        collector.finish_word();
    }
    Ok(collector.into_fields())
}

/// Expands one word to exactly one string, with no field splitting.
pub fn expand_word(env: &mut Env, word: &Word) -> Result<String> {
    expand_text_single(env, &word.0)
}

/// Returns the current field separators.
fn current_ifs(env: &Env) -> Ifs {
    match env.variables.value("IFS") {
        Some(ifs) => Ifs::new(ifs),
        None => Ifs::default(),
    }
}

/// Pushes an expansion result into the collector, splitting it unless the
/// expansion is inside double quotes.
pub(crate) fn push_value(env: &Env, value: &str, quoted: bool, collector: &mut FieldCollector) {
    if quoted {
        collector.push_literal(value);
    } else {
        collector.push_split(value, &current_ifs(env));
    }
}

/// Expands word text to a single string using a non-splitting collector.
pub(crate) fn expand_text_single(env: &mut Env, text: &str) -> Result<String> {
    let mut collector = FieldCollector::no_split();
    expand_text_into(env, text, &mut collector)?;
    collector.finish_word();
    let mut fields = collector.into_fields();
    debug_assert!(fields.len() <= 1, "splitting cannot happen here");
    Ok(fields.pop().unwrap_or_default())
}

/// Expands word text into the collector.
pub(crate) fn expand_text_into(
    env: &mut Env,
    text: &str,
    collector: &mut FieldCollector,
) -> Result<()> {
    expand_text(env, text, collector, false)
}

/// Expands the word of an expansion modifier into the collector.
///
/// The substituted text as a whole is subject to field splitting, so here
/// even the word's literal characters split; only its quoted parts are
/// protected. This makes `${x:-a b}` two fields but `${x:-'a b'}` one.
pub(crate) fn expand_text_soft(
    env: &mut Env,
    text: &str,
    collector: &mut FieldCollector,
) -> Result<()> {
    expand_text(env, text, collector, true)
}

/// Core of the expansion: walks word text and feeds the collector.
fn expand_text(
    env: &mut Env,
    text: &str,
    collector: &mut FieldCollector,
    split_literals: bool,
) -> Result<()> {
    let mut reader = Reader::new(text);

    expand_tilde(env, text, &mut reader, collector);

    while let Some(c) = reader.peek() {
        match c {
            '\\' => {
                let escaped = reader.read_backslash_quote(false);
                if !escaped.is_empty() {
                    collector.start_field();
                    collector.push_literal(&escaped);
                }
            }
            '\'' => {
                let content = reader.read_single_quote(false)?;
                collector.start_field();
                collector.push_literal(&content);
            }
            '"' => expand_double_quote(env, &mut reader, collector)?,
            '`' => {
                let program = reader.read_backquote(false)?;
                let value = command_substitution(env, &program)?;
                push_value(env, &value, false, collector);
            }
            '$' => expand_dollar(env, &mut reader, false, collector)?,
            _ => {
                let run = reader.read_regular_part();
                if split_literals {
                    push_value(env, &run, false, collector);
                } else {
                    collector.push_literal(&run);
                }
            }
        }
    }

    Ok(())
}

/// Performs tilde expansion if the word starts with an unquoted `~`.
///
/// The tilde prefix runs to the first `/` or the end of the word and must
/// be entirely literal. An empty prefix expands to `$HOME`; a non-empty one
/// is looked up in the user database. If the lookup fails the word is left
/// alone and the reader does not move.
fn expand_tilde(env: &mut Env, text: &str, reader: &mut Reader, collector: &mut FieldCollector) {
    if !text.starts_with('~') {
        return;
    }

    let end = text.find('/').unwrap_or(text.len());
    let prefix = &text[1..end];
    if prefix
        .chars()
        .any(|c| matches!(c, '\\' | '\'' | '"' | '`' | '$'))
    {
        // none of the characters in the tilde prefix may be quoted
        return;
    }

    let home = if prefix.is_empty() {
        env.variables.value("HOME").map(str::to_string)
    } else {
        env.system
            .user_home_dir(prefix)
            .map(|dir| dir.to_string_lossy().into_owned())
    };

    if let Some(home) = home {
        collector.start_field();
        collector.push_literal(&home);
        for _ in 0..1 + prefix.chars().count() {
            reader.pop();
        }
    }
}

/// Expands a double-quoted span.
///
/// Inside double quotes, parameter expansions and command substitutions
/// happen but their results are not field-split, and only `\$`, `` \` ``,
/// `\"`, and `\\` are active escapes.
fn expand_double_quote(
    env: &mut Env,
    reader: &mut Reader,
    collector: &mut FieldCollector,
) -> Result<()> {
    reader.eat('"');
    collector.start_field();

    while !reader.eof() && !reader.at('"') {
        if reader.at_prefix("\\$")
            || reader.at_prefix("\\`")
            || reader.at_prefix("\\\"")
            || reader.at_prefix("\\\\")
        {
            reader.pop();
            let escaped = reader.pop();
            collector.push_literal(escaped.encode_utf8(&mut [0; 4]));
        } else if reader.at('\\') {
            // inactive escape: the backslash is literal
            reader.pop();
            collector.push_literal("\\");
        } else if reader.at('`') {
            let program = reader.read_backquote(false)?;
            let value = command_substitution(env, &program)?;
            collector.push_literal(&value);
        } else if reader.at('$') {
            expand_dollar(env, reader, true, collector)?;
        } else {
            let mut run = String::new();
            while let Some(c) = reader.peek() {
                if matches!(c, '\\' | '`' | '$' | '"') {
                    break;
                }
                run.push(reader.pop());
            }
            collector.push_literal(&run);
        }
    }

    if reader.eof() {
        return Err(SyntaxError::UnclosedDoubleQuote.into());
    }
    reader.eat('"');
    Ok(())
}

/// Expands whatever starts at the `$` at the cursor.
fn expand_dollar(
    env: &mut Env,
    reader: &mut Reader,
    quoted: bool,
    collector: &mut FieldCollector,
) -> Result<()> {
    if reader.at_prefix("$((") {
        reader.read_arithmetic_expand(false)?;
        return Err(crate::Error::ArithmeticUnsupported);
    }

    if reader.at_prefix("$(") {
        let program = reader.read_command_substitution(false)?;
        let value = command_substitution(env, &program)?;
        push_value(env, &value, quoted, collector);
        return Ok(());
    }

    if reader.at_prefix("${") {
        let inner = reader.read_param_expand_in_braces(false)?;
        return param::expand_braced(env, &inner, quoted, collector);
    }

    let before = reader.position();
    let param = reader.read_param_expand(false);
    if param == "$" && reader.position() - before == 1 {
        // a dollar that does not start an expansion is a literal dollar
        collector.start_field();
        collector.push_literal("$");
    } else if let Some(value) = param::param_value(env, &param) {
        push_value(env, &value, quoted, collector);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use mash_env::semantics::ExitStatus;
    use mash_env::RealSystem;

    fn env() -> Env {
        // SAFETY: these tests do not fork.
        let mut env = Env::with_system(unsafe { RealSystem::new() });
        env.variables.assign("x", "a b");
        env.variables.assign("colon", ":a::b:");
        env
    }

    fn fields(env: &mut Env, word: &str) -> Vec<String> {
        expand_words(env, &[Word::with_str(word)]).unwrap()
    }

    #[test]
    fn literal_word() {
        let mut env = env();
        assert_eq!(fields(&mut env, "hello"), ["hello"]);
        assert_eq!(fields(&mut env, "a=b/c"), ["a=b/c"]);
    }

    #[test]
    fn quote_removal() {
        let mut env = env();
        assert_eq!(fields(&mut env, "'a  b'"), ["a  b"]);
        assert_eq!(fields(&mut env, "\"a  b\""), ["a  b"]);
        assert_eq!(fields(&mut env, r"a\ b"), ["a b"]);
        assert_eq!(fields(&mut env, r#"a"b"'c'd"#), ["abcd"]);
    }

    #[test]
    fn empty_quotes_make_one_empty_field() {
        let mut env = env();
        assert_eq!(fields(&mut env, "''"), [""]);
        assert_eq!(fields(&mut env, "\"\""), [""]);
    }

    #[test]
    fn line_continuation_disappears() {
        let mut env = env();
        assert_eq!(fields(&mut env, "a\\\nb"), ["ab"]);
    }

    #[test]
    fn unquoted_parameter_is_split() {
        let mut env = env();
        assert_eq!(fields(&mut env, "$x"), ["a", "b"]);
        assert_eq!(fields(&mut env, "pre$x"), ["prea", "b"]);
    }

    #[test]
    fn quoted_parameter_is_not_split() {
        let mut env = env();
        assert_eq!(fields(&mut env, "\"$x\""), ["a b"]);
    }

    #[test]
    fn unset_parameter_expands_to_nothing() {
        let mut env = env();
        assert_eq!(fields(&mut env, "$nope"), [] as [&str; 0]);
        assert_eq!(fields(&mut env, "\"$nope\""), [""]);
    }

    #[test]
    fn ifs_hard_separators() {
        let mut env = env();
        env.variables.assign("IFS", ":");
        assert_eq!(fields(&mut env, "$colon"), ["", "a", "", "b", ""]);
    }

    #[test]
    fn empty_ifs_disables_splitting() {
        let mut env = env();
        env.variables.assign("IFS", "");
        assert_eq!(fields(&mut env, "$x"), ["a b"]);
    }

    #[test]
    fn special_parameters() {
        let mut env = env();
        env.exit_status = ExitStatus(7);
        env.arg0 = "mash".to_string();
        env.set_positional_params(vec!["p".to_string(), "q".to_string()]);

        assert_eq!(fields(&mut env, "$?"), ["7"]);
        assert_eq!(fields(&mut env, "$0"), ["mash"]);
        assert_eq!(fields(&mut env, "$#"), ["2"]);
        assert_eq!(fields(&mut env, "$1"), ["p"]);
        assert_eq!(fields(&mut env, "$@"), ["p", "q"]);
        assert_eq!(fields(&mut env, "\"$*\""), ["p q"]);
    }

    #[test]
    fn literal_dollar() {
        let mut env = env();
        assert_eq!(fields(&mut env, "$"), ["$"]);
        assert_eq!(fields(&mut env, "$%x"), ["$%x"]);
        assert_eq!(fields(&mut env, "\"$\""), ["$"]);
    }

    #[test]
    fn dollar_digit_takes_one_digit() {
        let mut env = env();
        env.set_positional_params(vec!["one".to_string()]);
        assert_eq!(fields(&mut env, "$12"), ["one2"]);
        assert_eq!(fields(&mut env, "${1}2"), ["one2"]);
    }

    #[test]
    fn braced_param_in_double_quotes() {
        let mut env = env();
        assert_eq!(fields(&mut env, "\"${x}\""), ["a b"]);
        assert_eq!(fields(&mut env, "\"${nope:-d e}\""), ["d e"]);
    }

    #[test]
    fn double_quote_escapes() {
        let mut env = env();
        assert_eq!(fields(&mut env, r#""\$x""#), ["$x"]);
        assert_eq!(fields(&mut env, r#""\n""#), ["\\n"]);
    }

    #[test]
    fn single_quotes_suppress_expansion() {
        let mut env = env();
        assert_eq!(fields(&mut env, "'$x'"), ["$x"]);
    }

    #[test]
    fn tilde_expansion() {
        let mut env = env();
        env.variables.assign("HOME", "/home/me");
        assert_eq!(fields(&mut env, "~"), ["/home/me"]);
        assert_eq!(fields(&mut env, "~/doc"), ["/home/me/doc"]);
        // quoted tildes do not expand
        assert_eq!(fields(&mut env, "'~'"), ["~"]);
        assert_eq!(fields(&mut env, r"\~"), ["~"]);
        // a quoted character in the prefix defeats the expansion, and the
        // rest of the word still expands normally
        assert_eq!(fields(&mut env, r"~\a/x"), ["~a/x"]);
    }

    #[test]
    fn tilde_unknown_user_is_left_alone() {
        let mut env = env();
        assert_eq!(
            fields(&mut env, "~no_such_user_here/x"),
            ["~no_such_user_here/x"]
        );
    }

    #[test]
    fn tilde_without_home_is_left_alone() {
        let mut env = env();
        env.variables.unset("HOME");
        assert_eq!(fields(&mut env, "~"), ["~"]);
    }

    #[test]
    fn arithmetic_expansion_is_unsupported() {
        let mut env = env();
        let e = expand_words(&mut env, &[Word::with_str("$((1+2))")]).unwrap_err();
        assert_eq!(e, Error::ArithmeticUnsupported);
    }

    #[test]
    fn expand_word_returns_single_string() {
        let mut env = env();
        let word = Word::with_str("$x");
        assert_eq!(expand_word(&mut env, &word).unwrap(), "a b");

        let word = Word::with_str("$nope");
        assert_eq!(expand_word(&mut env, &word).unwrap(), "");
    }

    #[test]
    fn multiple_words_expand_in_order() {
        let mut env = env();
        let words = [Word::with_str("a"), Word::with_str("$x"), Word::with_str("z")];
        assert_eq!(
            expand_words(&mut env, &words).unwrap(),
            ["a", "a", "b", "z"]
        );
    }
}
