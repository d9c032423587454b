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

//! Implementation of function definition semantics.

use super::Command;
use crate::Result;
use mash_env::function::Function;
use mash_env::semantics::ExitStatus;
use mash_env::Env;
use mash_syntax::syntax::FunctionDefinition;
use std::rc::Rc;

impl Command for FunctionDefinition {
    /// Registers the function, replacing any previous definition with the
    /// same name.
    fn execute(&self, env: &mut Env) -> Result<()> {
        let function = Function::new(self.name.as_str(), Rc::clone(&self.body));
        env.functions.define(function);
        env.exit_status = ExitStatus::SUCCESS;
        Ok(())
    }
}
