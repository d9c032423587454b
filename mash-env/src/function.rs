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

//! Type definitions for functions.

use mash_syntax::syntax::CompoundCommand;
use std::collections::HashMap;
use std::rc::Rc;

/// Definition of a function
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    /// String that identifies the function
    pub name: String,

    /// Command that is executed when the function is called
    ///
    /// The body is reference-counted so that a function can be called
    /// without cloning the whole compound command.
    pub body: Rc<CompoundCommand>,
}

impl Function {
    /// Creates a new function.
    #[inline]
    #[must_use]
    pub fn new<N: Into<String>, B: Into<Rc<CompoundCommand>>>(name: N, body: B) -> Function {
        Function {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Collection of functions, keyed by name
#[derive(Clone, Debug, Default)]
pub struct FunctionSet {
    functions: HashMap<String, Rc<Function>>,
}

impl FunctionSet {
    /// Creates an empty function set.
    #[must_use]
    pub fn new() -> FunctionSet {
        Default::default()
    }

    /// Gets a reference to the function with the specified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rc<Function>> {
        self.functions.get(name)
    }

    /// Defines a function, replacing any previous definition with the same
    /// name.
    pub fn define(&mut self, function: Function) {
        self.functions
            .insert(function.name.clone(), Rc::new(function));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mash_syntax::syntax::List;

    fn body() -> CompoundCommand {
        CompoundCommand::Grouping(List(vec![]))
    }

    #[test]
    fn define_and_get() {
        let mut set = FunctionSet::new();
        assert!(set.get("f").is_none());

        set.define(Function::new("f", body()));
        assert_eq!(set.get("f").unwrap().name, "f");
    }

    #[test]
    fn define_replaces_previous_definition() {
        let mut set = FunctionSet::new();
        set.define(Function::new("f", body()));
        let first = Rc::clone(set.get("f").unwrap());

        set.define(Function::new("f", body()));
        let second = set.get("f").unwrap();
        assert!(!Rc::ptr_eq(&first, second));
    }
}
