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

//! Shell command language syntax.
//!
//! This crate contains the syntactic half of the mash shell: a quote-aware
//! character [reader](parser::lex::Reader), a [lexer](parser::lex::Lexer)
//! producing tokens, and a recursive-descent [parser] that turns the token
//! stream into the abstract [syntax] tree.
//!
//! Words in the syntax tree keep their quotation characters exactly as they
//! appear in the source. It is the expander's job — not the parser's — to
//! strip quotes and perform expansions, which it does by re-reading the word
//! text with the same quote-aware reader in quote-removing mode.

pub mod parser;
pub mod syntax;
