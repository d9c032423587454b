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

//! Intrinsic utilities.
//!
//! These are the utilities that cannot work as external programs because
//! they must modify the shell process itself: `exit`, `export`, and `cd`.
//! Everything else is found through `PATH`.
//!
//! `exit` and `export` are special intrinsics that take precedence over
//! functions; `cd` is a regular one that a function may shadow.

use mash_env::io::Fd;
use mash_env::semantics::ExitStatus;
use mash_env::variable::Variable;
use mash_env::Env;
use std::ffi::CString;

/// Type of intrinsic utility implementations
pub type Main = fn(&mut Env, &[String]) -> ExitStatus;

/// Looks up a special intrinsic utility.
#[must_use]
pub fn special(name: &str) -> Option<Main> {
    match name {
        "exit" => Some(exit),
        "export" => Some(export),
        _ => None,
    }
}

/// Looks up a regular intrinsic utility.
#[must_use]
pub fn regular(name: &str) -> Option<Main> {
    match name {
        "cd" => Some(cd),
        _ => None,
    }
}

/// The `exit` utility: ends the shell process.
///
/// Without an operand the shell exits with the current exit status. This
/// works inside a subshell too, where the "shell process" is the child.
fn exit(env: &mut Env, args: &[String]) -> ExitStatus {
    let status = match args.first() {
        None => env.exit_status,
        Some(operand) => match operand.parse() {
            Ok(status) => ExitStatus(status),
            Err(_) => {
                env.print_error(&format!("exit: {operand}: numeric argument required"));
                ExitStatus::ERROR
            }
        },
    };
    std::process::exit(status.0)
}

/// The `export` utility: marks variables as environment variables.
///
/// An operand of the form `name=value` assigns and exports in one step.
/// Without operands, the exported variables are listed on standard output.
fn export(env: &mut Env, args: &[String]) -> ExitStatus {
    if args.is_empty() {
        let mut lines = env
            .variables
            .iter()
            .filter(|(_, variable)| variable.is_exported)
            .map(|(name, variable)| match &variable.value {
                Some(value) => format!("export {name}={value}\n"),
                None => format!("export {name}\n"),
            })
            .collect::<Vec<_>>();
        lines.sort();
        let output = lines.concat();
        let _ = env.system.write_all(Fd::STDOUT, output.as_bytes());
        return ExitStatus::SUCCESS;
    }

    for arg in args {
        match arg.find('=') {
            Some(eq) if eq > 0 => {
                let name = &arg[..eq];
                let value = &arg[eq + 1..];
                env.variables
                    .insert(name, Variable::new(value).export());
            }
            _ => env.variables.export(arg.as_str()),
        }
    }
    ExitStatus::SUCCESS
}

/// The `cd` utility: changes the working directory.
///
/// Without an operand the target is `$HOME`.
fn cd(env: &mut Env, args: &[String]) -> ExitStatus {
    let dir = match args.first() {
        Some(dir) => dir.clone(),
        None => match env.variables.value("HOME") {
            Some(home) if !home.is_empty() => home.to_string(),
            _ => {
                env.print_error("cd: HOME not set");
                return ExitStatus::FAILURE;
            }
        },
    };

    let path = match CString::new(dir.clone()) {
        Ok(path) => path,
        Err(_) => {
            env.print_error(&format!("cd: {dir}: invalid directory name"));
            return ExitStatus::FAILURE;
        }
    };

    match env.system.chdir(&path) {
        Ok(()) => ExitStatus::SUCCESS,
        Err(errno) => {
            env.print_error(&format!("cd: {dir}: {errno}"));
            ExitStatus::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mash_env::RealSystem;

    fn env() -> Env {
        // SAFETY: these tests do not fork.
        Env::with_system(unsafe { RealSystem::new() })
    }

    #[test]
    fn lookup_classification() {
        assert!(special("exit").is_some());
        assert!(special("export").is_some());
        assert!(special("cd").is_none());
        assert!(regular("cd").is_some());
        assert!(regular("echo").is_none());
    }

    #[test]
    fn export_assigns_and_exports() {
        let mut env = env();
        export(&mut env, &["FOO=bar".to_string()]);
        let variable = env.variables.get("FOO").unwrap();
        assert_eq!(variable.value.as_deref(), Some("bar"));
        assert!(variable.is_exported);
    }

    #[test]
    fn export_marks_existing_variable() {
        let mut env = env();
        env.variables.assign("FOO", "bar");
        export(&mut env, &["FOO".to_string()]);
        let variable = env.variables.get("FOO").unwrap();
        assert_eq!(variable.value.as_deref(), Some("bar"));
        assert!(variable.is_exported);
    }

    #[test]
    fn cd_without_home_fails() {
        let mut env = env();
        env.variables.unset("HOME");
        assert_eq!(cd(&mut env, &[]), ExitStatus::FAILURE);
    }
}
