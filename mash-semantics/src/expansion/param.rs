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

//! Parameter expansion
//!
//! This module evaluates parameters, both the bare `$name` form and the
//! braced `${…}` form with its modifiers. The `:` in a modifier makes the
//! empty value count as missing; without it only an unset parameter is
//! missing:
//!
//! - `${name-word}` substitutes `word` if missing
//! - `${name=word}` assigns the expanded `word` and uses it if missing
//! - `${name?word}` fails with `word` as the message if missing
//! - `${name+word}` substitutes `word` if *not* missing
//! - `${#name}` is the length of the value in characters

use super::split::FieldCollector;
use super::{expand_text_single, expand_text_soft, push_value};
use crate::{Error, Result};
use mash_env::Env;
use mash_syntax::parser::lex::is_special_param;

/// Computes the value of a parameter.
///
/// The parameter is a variable name, a positional parameter index, or a
/// special parameter. `None` means the parameter is unset.
#[must_use]
pub fn param_value(env: &Env, param: &str) -> Option<String> {
    match param {
        "@" | "*" => Some(env.positional_params().join(" ")),
        "#" => Some(env.positional_params().len().to_string()),
        "?" => Some(env.exit_status.to_string()),
        "$" => Some(env.main_pid.to_string()),
        "0" => Some(env.arg0.clone()),
        // Recognized but without a meaningful value in this shell: there
        // are no option flags to report and no asynchronous jobs.
        "-" | "!" => Some(String::new()),
        _ if param.bytes().all(|b| b.is_ascii_digit()) => {
            let index: usize = param.parse().ok()?;
            env.positional_params().get(index.checked_sub(1)?).cloned()
        }
        _ => env.variables.value(param).map(str::to_string),
    }
}

/// Splits the content of a braced expansion into the parameter name and the
/// modifier that follows it.
fn split_param(inner: &str) -> Result<(&str, &str)> {
    let mut chars = inner.chars();
    let len = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => inner
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count(),
        Some(c) if c.is_ascii_digit() => {
            inner.bytes().take_while(u8::is_ascii_digit).count()
        }
        Some(c) if is_special_param(c) => c.len_utf8(),
        _ => return Err(Error::InvalidParam(inner.to_string())),
    };
    Ok((&inner[..len], &inner[len..]))
}

/// Expands a braced parameter expansion into the collector.
///
/// `inner` is the text between the braces, with the inner quoting intact.
/// `quoted` tells whether the expansion occurs inside double quotes, which
/// suppresses field splitting of the result.
pub fn expand_braced(
    env: &mut Env,
    inner: &str,
    quoted: bool,
    collector: &mut FieldCollector,
) -> Result<()> {
    // ${#param} is the length of the value; a lone `#` is the positional
    // parameter count.
    if let Some(param) = inner.strip_prefix('#') {
        if !param.is_empty() {
            let (name, modifier) = split_param(param)?;
            if !modifier.is_empty() {
                return Err(Error::InvalidParam(inner.to_string()));
            }
            let length = param_value(env, name)
                .unwrap_or_default()
                .chars()
                .count()
                .to_string();
            push_value(env, &length, quoted, collector);
            return Ok(());
        }
    }

    let (name, modifier) = split_param(inner)?;
    if modifier.is_empty() {
        if let Some(value) = param_value(env, name) {
            push_value(env, &value, quoted, collector);
        }
        return Ok(());
    }

    let (colon, rest) = match modifier.strip_prefix(':') {
        Some(rest) => (true, rest),
        None => (false, modifier),
    };
    let Some(kind) = rest.chars().next() else {
        return Err(Error::InvalidParam(inner.to_string()));
    };
    let word = &rest[kind.len_utf8()..];

    let value = param_value(env, name);
    let missing = match &value {
        None => true,
        Some(value) => colon && value.is_empty(),
    };

    match kind {
        '-' => {
            if missing {
                expand_word_part(env, word, quoted, collector)?;
            } else {
                push_value(env, &value.unwrap(), quoted, collector);
            }
        }
        '+' => {
            if !missing {
                expand_word_part(env, word, quoted, collector)?;
            }
        }
        '=' => {
            if missing {
                let new_value = expand_text_single(env, word)?;
                env.variables.assign(name, new_value.clone());
                push_value(env, &new_value, quoted, collector);
            } else {
                push_value(env, &value.unwrap(), quoted, collector);
            }
        }
        '?' => {
            if missing {
                let message = if word.is_empty() {
                    "parameter null or not set".to_string()
                } else {
                    expand_text_single(env, word)?
                };
                return Err(Error::EmptyOrUnset {
                    param: name.to_string(),
                    message,
                });
            }
            push_value(env, &value.unwrap(), quoted, collector);
        }
        _ => return Err(Error::InvalidParam(inner.to_string())),
    }

    Ok(())
}

/// Expands the word part of a modifier into the collector.
fn expand_word_part(
    env: &mut Env,
    word: &str,
    quoted: bool,
    collector: &mut FieldCollector,
) -> Result<()> {
    if quoted {
        let value = expand_text_single(env, word)?;
        collector.start_field();
        collector.push_literal(&value);
        Ok(())
    } else {
        expand_text_soft(env, word, collector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mash_env::RealSystem;

    fn env() -> Env {
        // SAFETY: expansion tests do not fork.
        let mut env = Env::with_system(unsafe { RealSystem::new() });
        env.variables.assign("set", "value");
        env.variables.assign("empty", "");
        env
    }

    fn braced(env: &mut Env, inner: &str) -> Result<Vec<String>> {
        let mut collector = FieldCollector::new();
        expand_braced(env, inner, false, &mut collector)?;
        collector.finish_word();
        Ok(collector.into_fields())
    }

    #[test]
    fn param_value_variables_and_specials() {
        let mut env = env();
        env.arg0 = "mash".to_string();
        env.set_positional_params(vec!["one".to_string(), "two".to_string()]);
        env.exit_status = mash_env::semantics::ExitStatus(42);

        assert_eq!(param_value(&env, "set").as_deref(), Some("value"));
        assert_eq!(param_value(&env, "unset"), None);
        assert_eq!(param_value(&env, "1").as_deref(), Some("one"));
        assert_eq!(param_value(&env, "2").as_deref(), Some("two"));
        assert_eq!(param_value(&env, "3"), None);
        assert_eq!(param_value(&env, "#").as_deref(), Some("2"));
        assert_eq!(param_value(&env, "?").as_deref(), Some("42"));
        assert_eq!(param_value(&env, "0").as_deref(), Some("mash"));
        assert_eq!(param_value(&env, "@").as_deref(), Some("one two"));
        assert_eq!(
            param_value(&env, "$").as_deref(),
            Some(&*nix_pid_string(&env))
        );
    }

    fn nix_pid_string(env: &Env) -> String {
        env.main_pid.to_string()
    }

    #[test]
    fn plain_braced_param() {
        let mut env = env();
        assert_eq!(braced(&mut env, "set").unwrap(), ["value"]);
        assert_eq!(braced(&mut env, "unset").unwrap(), [] as [&str; 0]);
    }

    #[test]
    fn default_modifier() {
        let mut env = env();
        assert_eq!(braced(&mut env, "set:-d").unwrap(), ["value"]);
        assert_eq!(braced(&mut env, "empty:-d").unwrap(), ["d"]);
        assert_eq!(braced(&mut env, "unset:-d").unwrap(), ["d"]);

        // without the colon, empty is not missing; the empty value then
        // expands to no field at all
        assert_eq!(braced(&mut env, "empty-d").unwrap(), [] as [&str; 0]);
        assert_eq!(braced(&mut env, "unset-d").unwrap(), ["d"]);
    }

    #[test]
    fn default_modifier_word_keeps_its_quoting() {
        let mut env = env();
        assert_eq!(braced(&mut env, "unset:-'a b'").unwrap(), ["a b"]);
        assert_eq!(braced(&mut env, "unset:-a b").unwrap(), ["a", "b"]);
    }

    #[test]
    fn assign_modifier() {
        let mut env = env();
        assert_eq!(braced(&mut env, "unset:=d").unwrap(), ["d"]);
        assert_eq!(env.variables.value("unset"), Some("d"));

        assert_eq!(braced(&mut env, "set:=d").unwrap(), ["value"]);
        assert_eq!(env.variables.value("set"), Some("value"));

        assert_eq!(braced(&mut env, "empty:=d").unwrap(), ["d"]);
        assert_eq!(env.variables.value("empty"), Some("d"));
    }

    #[test]
    fn error_modifier() {
        let mut env = env();
        assert_eq!(braced(&mut env, "set:?oops").unwrap(), ["value"]);

        let e = braced(&mut env, "unset:?oops").unwrap_err();
        assert_eq!(
            e,
            Error::EmptyOrUnset {
                param: "unset".to_string(),
                message: "oops".to_string(),
            }
        );

        let e = braced(&mut env, "unset?").unwrap_err();
        assert_eq!(
            e,
            Error::EmptyOrUnset {
                param: "unset".to_string(),
                message: "parameter null or not set".to_string(),
            }
        );
    }

    #[test]
    fn alter_modifier() {
        let mut env = env();
        assert_eq!(braced(&mut env, "set:+d").unwrap(), ["d"]);
        assert_eq!(braced(&mut env, "empty:+d").unwrap(), [] as [&str; 0]);
        assert_eq!(braced(&mut env, "unset:+d").unwrap(), [] as [&str; 0]);

        // without the colon, an empty value is still set
        assert_eq!(braced(&mut env, "empty+d").unwrap(), ["d"]);
    }

    #[test]
    fn length_form() {
        let mut env = env();
        env.set_positional_params(vec!["one".to_string()]);
        assert_eq!(braced(&mut env, "#set").unwrap(), ["5"]);
        assert_eq!(braced(&mut env, "#unset").unwrap(), ["0"]);
        // ${#} is the number of positional parameters
        assert_eq!(braced(&mut env, "#").unwrap(), ["1"]);
    }

    #[test]
    fn invalid_forms() {
        let mut env = env();
        assert_matches::assert_matches!(
            braced(&mut env, "set%x"),
            Err(Error::InvalidParam(_))
        );
        assert_matches::assert_matches!(braced(&mut env, ""), Err(Error::InvalidParam(_)));
        assert_matches::assert_matches!(
            braced(&mut env, "set:"),
            Err(Error::InvalidParam(_))
        );
    }
}
