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

//! Type definitions for variables.
//!
//! Variables and functions share no namespace, so this module knows nothing
//! about functions. Variables live in one flat [`VariableSet`]: functions do
//! not create variable scopes in this shell.

use std::collections::HashMap;
use std::ffi::CString;

/// Definition of a variable
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Variable {
    /// Value of the variable
    ///
    /// `None` means the variable has been marked for export without being
    /// assigned a value yet. Such a variable is still unset for parameter
    /// expansion and does not appear in the environment of child processes.
    pub value: Option<String>,

    /// Whether this variable is exported or not
    ///
    /// An exported variable is also referred to as an _environment
    /// variable_: it is passed to the environment of every command the
    /// shell executes.
    pub is_exported: bool,
}

impl Variable {
    /// Creates an unexported variable with a value.
    #[must_use]
    pub fn new<V: Into<String>>(value: V) -> Variable {
        Variable {
            value: Some(value.into()),
            is_exported: false,
        }
    }

    /// Makes the variable exported.
    ///
    /// This is a convenience function for doing `self.is_exported = true`
    /// in a method chain.
    #[inline]
    #[must_use]
    pub fn export(mut self) -> Variable {
        self.is_exported = true;
        self
    }
}

/// Collection of variables
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VariableSet {
    all_variables: HashMap<String, Variable>,
}

impl VariableSet {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> VariableSet {
        Default::default()
    }

    /// Gets a reference to the variable with the specified name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.all_variables.get(name)
    }

    /// Gets the value of the variable with the specified name.
    ///
    /// Returns `None` if the variable is unset, including a variable that
    /// was exported without a value.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name)?.value.as_deref()
    }

    /// Assigns a value to a variable.
    ///
    /// An existing variable keeps its export flag; a new variable is not
    /// exported.
    pub fn assign<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        let name = name.into();
        let value = value.into();
        match self.all_variables.get_mut(&name) {
            Some(variable) => variable.value = Some(value),
            None => {
                self.all_variables.insert(name, Variable::new(value));
            }
        }
    }

    /// Inserts a variable, replacing any previous definition.
    pub fn insert<N: Into<String>>(&mut self, name: N, variable: Variable) {
        self.all_variables.insert(name.into(), variable);
    }

    /// Marks a variable as exported, creating a valueless entry if the
    /// variable is unset.
    pub fn export<N: Into<String>>(&mut self, name: N) {
        self.all_variables
            .entry(name.into())
            .and_modify(|variable| variable.is_exported = true)
            .or_insert(Variable {
                value: None,
                is_exported: true,
            });
    }

    /// Removes a variable.
    pub fn unset(&mut self, name: &str) {
        self.all_variables.remove(name);
    }

    /// Returns an iterator over all variables, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.all_variables
            .iter()
            .map(|(name, variable)| (name.as_str(), variable))
    }

    /// Imports every `NAME=value` pair of the host process environment as
    /// an exported variable.
    pub fn import_environ(&mut self) {
        for (name, value) in std::env::vars_os() {
            let name = name.to_string_lossy().into_owned();
            let value = value.to_string_lossy().into_owned();
            self.insert(name, Variable::new(value).export());
        }
    }

    /// Returns the `NAME=value` strings for all exported variables that
    /// have a value, in the form `execvpe` wants.
    ///
    /// Names or values containing a NUL byte cannot be represented and are
    /// silently dropped.
    #[must_use]
    pub fn environ(&self) -> Vec<CString> {
        self.all_variables
            .iter()
            .filter(|(_, variable)| variable.is_exported)
            .filter_map(|(name, variable)| {
                let value = variable.value.as_ref()?;
                CString::new(format!("{name}={value}")).ok()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_and_get() {
        let mut set = VariableSet::new();
        assert_eq!(set.get("foo"), None);
        assert_eq!(set.value("foo"), None);

        set.assign("foo", "bar");
        assert_eq!(set.value("foo"), Some("bar"));
        assert!(!set.get("foo").unwrap().is_exported);

        set.assign("foo", "baz");
        assert_eq!(set.value("foo"), Some("baz"));
    }

    #[test]
    fn assign_keeps_export_flag() {
        let mut set = VariableSet::new();
        set.insert("foo", Variable::new("1").export());
        set.assign("foo", "2");
        let variable = set.get("foo").unwrap();
        assert_eq!(variable.value.as_deref(), Some("2"));
        assert!(variable.is_exported);
    }

    #[test]
    fn export_unset_variable_remains_unset() {
        let mut set = VariableSet::new();
        set.export("foo");
        assert!(set.get("foo").unwrap().is_exported);
        assert_eq!(set.value("foo"), None);
        // and it is not in the environ
        assert!(set.environ().is_empty());

        set.assign("foo", "now");
        assert_eq!(set.value("foo"), Some("now"));
        assert!(set.get("foo").unwrap().is_exported);
        assert_eq!(set.environ().len(), 1);
    }

    #[test]
    fn unset_removes_variable() {
        let mut set = VariableSet::new();
        set.assign("foo", "bar");
        set.unset("foo");
        assert_eq!(set.get("foo"), None);
    }

    #[test]
    fn environ_contains_exported_variables_only() {
        let mut set = VariableSet::new();
        set.assign("local", "1");
        set.insert("public", Variable::new("2").export());

        let environ = set.environ();
        assert_eq!(environ.len(), 1);
        assert_eq!(environ[0].to_str().unwrap(), "public=2");
    }
}
